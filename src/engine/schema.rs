use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Response schema sent with every report request. The same declaration
/// drives validation on the way back: every field a `required` list names
/// here is non-optional on the typed `ProductReport`.
static REPORT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "overview": {
                "type": "OBJECT",
                "properties": {
                    "explanation": { "type": "STRING", "description": "Max 150 chars" },
                    "useCases": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "buyerTypes": { "type": "ARRAY", "items": { "type": "STRING" } }
                },
                "required": ["explanation", "useCases", "buyerTypes"]
            },
            "trends": {
                "type": "OBJECT",
                "properties": {
                    "status": { "type": "STRING" },
                    "chartData": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "month": { "type": "STRING" },
                                "interest": { "type": "NUMBER" }
                            }
                        }
                    }
                },
                "required": ["status", "chartData"]
            },
            "pricing": {
                "type": "OBJECT",
                "properties": {
                    "mvp": { "type": "NUMBER" },
                    "mvpROI": { "type": "STRING" },
                    "mvpValueNote": { "type": "STRING" },
                    "competitive": { "type": "NUMBER" },
                    "competitiveROI": { "type": "STRING" },
                    "competitiveValueNote": { "type": "STRING" },
                    "premium": { "type": "NUMBER" },
                    "premiumROI": { "type": "STRING" },
                    "premiumValueNote": { "type": "STRING" },
                    "notes": { "type": "STRING" }
                },
                "required": [
                    "mvp",
                    "competitive",
                    "premium",
                    "mvpValueNote",
                    "competitiveValueNote",
                    "premiumValueNote"
                ]
            },
            "metaAds": {
                "type": "OBJECT",
                "properties": {
                    "bestTime": {
                        "type": "OBJECT",
                        "properties": {
                            "peakTime": { "type": "STRING" },
                            "days": { "type": "ARRAY", "items": { "type": "STRING" } },
                            "reasoning": { "type": "STRING" }
                        },
                        "required": ["peakTime", "days", "reasoning"]
                    },
                    "targeting": {
                        "type": "OBJECT",
                        "properties": {
                            "specificAudienceInterests": {
                                "type": "ARRAY",
                                "items": { "type": "STRING" }
                            },
                            "lookalikeStrategy": { "type": "STRING" }
                        },
                        "required": ["specificAudienceInterests", "lookalikeStrategy"]
                    },
                    "budgetTips": { "type": "STRING" }
                },
                "required": ["bestTime", "targeting"]
            },
            "seoListing": {
                "type": "OBJECT",
                "properties": {
                    "titles": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "type": { "type": "STRING" },
                                "content": { "type": "STRING" }
                            },
                            "required": ["type", "content"]
                        }
                    },
                    "metaDescriptions": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "type": { "type": "STRING" },
                                "content": { "type": "STRING" }
                            },
                            "required": ["type", "content"]
                        }
                    }
                },
                "required": ["titles", "metaDescriptions"]
            },
            "scalingStrategy": {
                "type": "OBJECT",
                "properties": {
                    "reinvestmentTriggers": { "type": "STRING" },
                    "lineExpansionIdeas": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "brandBuildingStrategy": { "type": "STRING" },
                    "actionableAdvice": { "type": "STRING" }
                },
                "required": [
                    "reinvestmentTriggers",
                    "lineExpansionIdeas",
                    "brandBuildingStrategy",
                    "actionableAdvice"
                ]
            },
            "verdict": {
                "type": "OBJECT",
                "properties": {
                    "decision": { "type": "STRING" },
                    "launchTime": { "type": "STRING" },
                    "todayAction": { "type": "STRING" },
                    "successFactors": { "type": "ARRAY", "items": { "type": "STRING" } }
                },
                "required": ["decision", "launchTime", "todayAction", "successFactors"]
            }
        },
        "required": [
            "overview",
            "trends",
            "pricing",
            "metaAds",
            "seoListing",
            "scalingStrategy",
            "verdict"
        ]
    })
});

pub fn report_schema() -> &'static Value {
    &REPORT_SCHEMA
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required_list(value: &Value) -> Vec<&str> {
        value["required"]
            .as_array()
            .expect("required list")
            .iter()
            .filter_map(Value::as_str)
            .collect()
    }

    #[test]
    fn top_level_sections_are_all_required() {
        assert_eq!(
            required_list(report_schema()),
            vec![
                "overview",
                "trends",
                "pricing",
                "metaAds",
                "seoListing",
                "scalingStrategy",
                "verdict"
            ]
        );
    }

    #[test]
    fn pricing_requires_tiers_and_value_notes_only() {
        let pricing = &report_schema()["properties"]["pricing"];
        let required = required_list(pricing);
        assert!(required.contains(&"mvp"));
        assert!(required.contains(&"competitive"));
        assert!(required.contains(&"premium"));
        assert!(required.contains(&"mvpValueNote"));
        assert!(!required.contains(&"mvpROI"));
        assert!(!required.contains(&"notes"));
    }

    #[test]
    fn meta_ads_budget_tips_stay_optional() {
        let meta_ads = &report_schema()["properties"]["metaAds"];
        assert_eq!(required_list(meta_ads), vec!["bestTime", "targeting"]);
        assert!(meta_ads["properties"]["budgetTips"].is_object());
    }
}
