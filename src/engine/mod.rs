pub mod chat;
pub mod media;
pub mod normalize;
pub mod report;
pub mod schema;
pub mod speech;
pub mod studio;

use serde::{Deserialize, Serialize};

/// User inputs collected by the search form. All fields are free-form and
/// optional; defaults are substituted at prompt-construction time, never left
/// as empty strings in the instruction text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
}

pub(crate) const DEFAULT_PRODUCT: &str = "trending high-margin products";
pub(crate) const DEFAULT_BUDGET: &str = "Not specified";
pub(crate) const DEFAULT_REGION: &str = "Global";
pub(crate) const DEFAULT_EXPERIENCE: &str = "Beginner";

/// Treat missing and blank inputs the same way.
pub(crate) fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
}

/// Supported image aspect ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Vertical,
}

impl AspectRatio {
    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Vertical => "9:16",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_params_fall_back_to_defaults() {
        assert_eq!(or_default(&None, DEFAULT_REGION), "Global");
        assert_eq!(or_default(&Some("  ".to_string()), DEFAULT_BUDGET), "Not specified");
        assert_eq!(or_default(&Some("Europe".to_string()), DEFAULT_REGION), "Europe");
    }

    #[test]
    fn aspect_ratios_round_trip_through_serde() {
        for (ratio, wire) in [
            (AspectRatio::Square, "\"1:1\""),
            (AspectRatio::Portrait, "\"3:4\""),
            (AspectRatio::Landscape, "\"16:9\""),
            (AspectRatio::Vertical, "\"9:16\""),
        ] {
            assert_eq!(serde_json::to_string(&ratio).unwrap(), wire);
            assert_eq!(ratio.as_str(), wire.trim_matches('"'));
        }
    }
}
