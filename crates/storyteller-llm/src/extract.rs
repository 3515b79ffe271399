//! Pull a JSON object out of free-form model output.
//!
//! Models answer either with a bare object or with an object wrapped in a
//! ```` ```json ```` fence. Anything else is rejected; there is no repair and
//! no retry.

use serde_json::{Map, Value};
use tracing::{debug, error};

/// Opening fence marker for JSON blocks.
const FENCE_OPEN: &str = "```json";
/// Closing fence marker.
const FENCE_CLOSE: &str = "```";

/// A parsed JSON object.
pub type JsonObject = Map<String, Value>;

/// Why a reply could not be turned into a JSON object.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The text is neither fenced nor starts with `{`.
    #[error("reply is neither a fenced nor a bare JSON object")]
    Unrecognized,

    /// The candidate text is not valid JSON.
    #[error("reply contains malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON, but not an object.
    #[error("reply JSON is not an object")]
    NotAnObject,
}

/// Locate the JSON candidate inside a reply without parsing it.
///
/// # Examples
///
/// ```
/// use storyteller_llm::extract::json_candidate;
///
/// assert_eq!(json_candidate("```json\n{\"a\":1}\n```"), Some("{\"a\":1}"));
/// assert_eq!(json_candidate("  {\"a\":1} "), Some("{\"a\":1}"));
/// assert_eq!(json_candidate("Sure! {\"a\":1}"), None);
/// ```
pub fn json_candidate(text: &str) -> Option<&str> {
    let text = text.trim();
    if let Some(rest) = text.strip_prefix(FENCE_OPEN) {
        let body = match rest.find(FENCE_CLOSE) {
            Some(end) => &rest[..end],
            None => rest,
        };
        Some(body.trim())
    } else if text.starts_with('{') {
        Some(text)
    } else {
        None
    }
}

/// Extract a JSON object from a model reply.
///
/// Fenced and bare replies with the same content produce the same object.
pub fn extract_json(text: &str) -> Result<JsonObject, ExtractError> {
    let result = json_candidate(text)
        .ok_or(ExtractError::Unrecognized)
        .and_then(|candidate| Ok(serde_json::from_str::<Value>(candidate)?))
        .and_then(|value| match value {
            Value::Object(map) => Ok(map),
            _ => Err(ExtractError::NotAnObject),
        });

    if let Err(ref e) = result {
        error!(error = %e, "Failed to extract JSON from model reply");
        debug!(reply = %text, "Unparsable model reply");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_object() {
        let obj = extract_json(r#"{"text": "Once upon a time", "sentiment": "happy"}"#).unwrap();
        assert_eq!(obj["text"], "Once upon a time");
        assert_eq!(obj["sentiment"], "happy");
    }

    #[test]
    fn test_fenced_equals_bare() {
        let bare = r#"{"list": [{"title": "Sky kingdom", "desc": "A kingdom above the clouds."}]}"#;
        let fenced = format!("```json\n{bare}\n```");

        assert_eq!(extract_json(&fenced).unwrap(), extract_json(bare).unwrap());
    }

    #[test]
    fn test_surrounding_whitespace() {
        let obj = extract_json("\n\n   ```json\n{\"a\": 1}\n```\n  ").unwrap();
        assert_eq!(Value::Object(obj), json!({"a": 1}));

        let obj = extract_json("\t{\"a\": 1}\n").unwrap();
        assert_eq!(Value::Object(obj), json!({"a": 1}));
    }

    #[test]
    fn test_fence_stops_at_first_close() {
        let reply = "```json\n{\"a\": 1}\n```\nSome trailing note\n```\nmore\n```";
        let obj = extract_json(reply).unwrap();
        assert_eq!(Value::Object(obj), json!({"a": 1}));
    }

    #[test]
    fn test_unterminated_fence_uses_remainder() {
        let obj = extract_json("```json\n{\"a\": 1}").unwrap();
        assert_eq!(obj["a"], 1);
    }

    #[test]
    fn test_prose_is_unrecognized() {
        let err = extract_json("Here is your story: {\"text\": \"hi\"}").unwrap_err();
        assert!(matches!(err, ExtractError::Unrecognized));

        let err = extract_json("").unwrap_err();
        assert!(matches!(err, ExtractError::Unrecognized));

        // Plain fence without the json tag is not accepted
        let err = extract_json("```\n{\"a\": 1}\n```").unwrap_err();
        assert!(matches!(err, ExtractError::Unrecognized));
    }

    #[test]
    fn test_malformed_json() {
        let err = extract_json("{\"text\": \"unterminated").unwrap_err();
        assert!(matches!(err, ExtractError::Json(_)));

        let err = extract_json("```json\n{not json}\n```").unwrap_err();
        assert!(matches!(err, ExtractError::Json(_)));
    }

    #[test]
    fn test_non_object() {
        let err = extract_json("```json\n[1, 2, 3]\n```").unwrap_err();
        assert!(matches!(err, ExtractError::NotAnObject));
    }
}
