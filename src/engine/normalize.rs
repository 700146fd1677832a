use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::EngineError;
use crate::gemini::InlineData;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```(?:json)?").unwrap());

/// Strip the code-fence markers the model sometimes wraps JSON output in.
/// Idempotent: fenced and already-clean input normalize to the same string.
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE.replace_all(raw, "").trim().to_string()
}

/// Parse a JSON-bearing text response into `T`.
///
/// Absent or whitespace-only text is `EmptyResponse`; anything that survives
/// fence stripping but fails to parse into the expected shape is
/// `MalformedData`, tagged with the operation for diagnostics.
pub fn parse_json<T: DeserializeOwned>(
    operation: &'static str,
    raw: Option<&str>,
) -> Result<T, EngineError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(EngineError::EmptyResponse)?;

    let clean = strip_code_fences(raw);
    serde_json::from_str(&clean).map_err(|e| EngineError::malformed(operation, e.to_string()))
}

/// Render an inline binary part as a data URI for direct display.
pub fn to_data_uri(inline: &InlineData) -> String {
    format!("data:{};base64,{}", inline.mime_type, inline.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn fence_stripping_is_idempotent() {
        let fenced = "```json\n{\"ok\": true}\n```";
        let once = strip_code_fences(fenced);
        assert_eq!(once, "{\"ok\": true}");
        assert_eq!(strip_code_fences(&once), once);
    }

    #[test]
    fn bare_fences_without_language_tag_are_stripped() {
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
    }

    #[test]
    fn fenced_and_unfenced_parse_to_the_same_object() {
        let plain: Value = parse_json("test_op", Some("{\"a\": 1}")).unwrap();
        let fenced: Value = parse_json("test_op", Some("```json\n{\"a\": 1}\n```")).unwrap();
        assert_eq!(plain, fenced);
    }

    #[test]
    fn absent_text_is_an_empty_response() {
        let err = parse_json::<Value>("test_op", None).unwrap_err();
        assert!(matches!(err, EngineError::EmptyResponse));
    }

    #[test]
    fn whitespace_only_text_is_an_empty_response() {
        let err = parse_json::<Value>("test_op", Some("   \n\t ")).unwrap_err();
        assert!(matches!(err, EngineError::EmptyResponse));
    }

    #[test]
    fn garbage_text_is_malformed_and_carries_the_operation() {
        let err = parse_json::<Value>("generate_report", Some("not json at all")).unwrap_err();
        match err {
            EngineError::MalformedData { operation, .. } => {
                assert_eq!(operation, "generate_report")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn data_uri_carries_the_mime_type() {
        let inline = InlineData {
            mime_type: "image/png".to_string(),
            data: "QUJD".to_string(),
        };
        assert_eq!(to_data_uri(&inline), "data:image/png;base64,QUJD");
    }
}
