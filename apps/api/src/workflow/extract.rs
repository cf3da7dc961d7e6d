//! Structured extraction: recovers the JSON payload embedded in a free-text model reply.
//!
//! Models routinely wrap JSON in commentary or markdown fences. Extraction takes the
//! span from the first opening delimiter to the last closing one and parses it.
//! Delimiters inside string values are not special-cased.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON {0} found in model reply")]
    NoJsonFound(&'static str),

    #[error("malformed JSON in model reply: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

/// Extracts the outermost `{...}` span and parses it.
pub fn extract_json_object(text: &str) -> Result<Value, ExtractError> {
    extract_span(text, '{', '}', "object")
}

/// Extracts the outermost `[...]` span and parses it.
pub fn extract_json_array(text: &str) -> Result<Value, ExtractError> {
    extract_span(text, '[', ']', "array")
}

/// Extracts whichever JSON value opens first in the text, object or array.
///
/// The stages know their reply shape and call the typed variants directly.
#[allow(dead_code)]
pub fn extract_json(text: &str) -> Result<Value, ExtractError> {
    match (text.find('{'), text.find('[')) {
        (Some(obj), Some(arr)) if arr < obj => extract_json_array(text),
        (Some(_), _) => extract_json_object(text),
        (None, Some(_)) => extract_json_array(text),
        (None, None) => Err(ExtractError::NoJsonFound("value")),
    }
}

fn extract_span(
    text: &str,
    open: char,
    close: char,
    kind: &'static str,
) -> Result<Value, ExtractError> {
    let start = text.find(open).ok_or(ExtractError::NoJsonFound(kind))?;
    let end = text.rfind(close).ok_or(ExtractError::NoJsonFound(kind))?;
    if end < start {
        return Err(ExtractError::NoJsonFound(kind));
    }
    // Both delimiters are single-byte ASCII, so `end + 1` is a char boundary.
    Ok(serde_json::from_str(&text[start..=end])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_surrounded_by_commentary() {
        let value =
            extract_json_object("Sure! Here's the JSON: {\"a\":1} Hope that helps!").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_no_json_is_reported_as_not_found() {
        let err = extract_json_object("no json here").unwrap_err();
        assert!(matches!(err, ExtractError::NoJsonFound("object")));
    }

    #[test]
    fn test_invalid_json_is_reported_as_malformed() {
        let err = extract_json_object("{a:1,}").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedJson(_)));
    }

    #[test]
    fn test_closing_brace_before_opening_is_not_found() {
        let err = extract_json_object("} nothing to see {").unwrap_err();
        assert!(matches!(err, ExtractError::NoJsonFound(_)));
    }

    #[test]
    fn test_markdown_fenced_object() {
        let text = "```json\n{\"name\": \"Ada\", \"skills\": [\"Rust\"]}\n```";
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["skills"][0], "Rust");
    }

    #[test]
    fn test_nested_objects_span_to_last_brace() {
        let text = "result: {\"breakdown\": {\"skills\": 20}, \"score\": 70} done";
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["breakdown"]["skills"], 20);
        assert_eq!(value["score"], 70);
    }

    #[test]
    fn test_two_separate_objects_are_malformed() {
        // First `{` to last `}` swallows both objects; naive by contract.
        let err = extract_json_object("{\"a\":1} and also {\"b\":2}").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedJson(_)));
    }

    #[test]
    fn test_array_extraction_ignores_leading_text() {
        let text = "Here are your questions:\n[\"Why Rust?\", \"Describe a hard bug.\"]\nGood luck";
        let value = extract_json_array(text).unwrap();
        assert_eq!(value, json!(["Why Rust?", "Describe a hard bug."]));
    }

    #[test]
    fn test_array_not_found() {
        let err = extract_json_array("{\"questions\": \"none\"}").unwrap_err();
        assert!(matches!(err, ExtractError::NoJsonFound("array")));
    }

    #[test]
    fn test_extract_json_picks_whichever_opens_first() {
        assert_eq!(extract_json("x [1, 2] y").unwrap(), json!([1, 2]));
        assert_eq!(
            extract_json("x {\"list\": [1]} y").unwrap(),
            json!({"list": [1]})
        );
        assert!(matches!(
            extract_json("plain prose"),
            Err(ExtractError::NoJsonFound("value"))
        ));
    }

    #[test]
    fn test_multibyte_text_around_json() {
        let value = extract_json_object("Résumé → {\"name\": \"José\"} ✓").unwrap();
        assert_eq!(value["name"], "José");
    }
}
