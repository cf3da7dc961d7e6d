//! Tolerant field decoders for model-produced JSON.
//!
//! Model replies follow the requested schema loosely: years arrive as `"5+"`,
//! skills as objects, names as `null`. These decoders accept whatever shape is
//! present and fall back to an empty value instead of failing the whole record.
//! Use with `#[serde(default, deserialize_with = "...")]`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Numbers, numeric strings (`"5"`, `"3.5 years"`, `"10+"`), otherwise `None`.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(as_number))
}

/// Any scalar rendered as a string; `null` and blank strings become `None`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(as_text)
        .filter(|s| !s.trim().is_empty()))
}

/// Like `opt_string`, with missing values as the empty string.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.unwrap_or_default())
}

/// Arrays of anything, each element rendered as text. A lone string is a one-element list.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.iter().filter_map(as_text).collect(),
        Some(other) => as_text(&other).into_iter().collect(),
        None => Vec::new(),
    };
    Ok(items.into_iter().filter(|s| !s.trim().is_empty()).collect())
}

/// A nested object decoded as `T`; `null`, scalars and arrays become `T::default()`.
pub fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
        _ => T::default(),
    })
}

/// Writes integral values as JSON integers (`84`, not `84.0`).
pub fn serialize_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
            serializer.serialize_i64(*v as i64)
        }
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_none(),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    }
}

fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let end = text
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        // Objects like {"name": "Rust", "years": 3} keep their values, in key order.
        Value::Object(map) => {
            let parts: Vec<String> = map.values().filter_map(as_text).collect();
            (!parts.is_empty()).then(|| parts.join(" - "))
        }
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(as_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "number")]
        years: Option<f64>,
        #[serde(default, deserialize_with = "opt_string")]
        name: Option<String>,
        #[serde(default, deserialize_with = "string")]
        summary: String,
        #[serde(default, deserialize_with = "string_list")]
        skills: Vec<String>,
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Nested {
        #[serde(default, deserialize_with = "number")]
        points: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    struct Outer {
        #[serde(default, deserialize_with = "object")]
        nested: Nested,
    }

    #[derive(serde::Serialize)]
    struct Written {
        #[serde(serialize_with = "serialize_number")]
        value: Option<f64>,
    }

    fn sample(json: &str) -> Sample {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_number_accepts_numbers_and_numeric_strings() {
        assert_eq!(sample(r#"{"years": 7}"#).years, Some(7.0));
        assert_eq!(sample(r#"{"years": 2.5}"#).years, Some(2.5));
        assert_eq!(sample(r#"{"years": "5+"}"#).years, Some(5.0));
        assert_eq!(sample(r#"{"years": " 3.5 years"}"#).years, Some(3.5));
    }

    #[test]
    fn test_number_tolerates_garbage() {
        assert_eq!(sample(r#"{"years": "several"}"#).years, None);
        assert_eq!(sample(r#"{"years": null}"#).years, None);
        assert_eq!(sample(r#"{"years": [1]}"#).years, None);
        assert_eq!(sample(r#"{}"#).years, None);
    }

    #[test]
    fn test_strings_from_scalars() {
        assert_eq!(sample(r#"{"name": "Ada"}"#).name.as_deref(), Some("Ada"));
        assert_eq!(sample(r#"{"name": "  "}"#).name, None);
        assert_eq!(sample(r#"{"name": null}"#).name, None);
        assert_eq!(sample(r#"{"summary": 42}"#).summary, "42");
        assert_eq!(sample(r#"{}"#).summary, "");
    }

    #[test]
    fn test_string_list_flattens_objects() {
        let p = sample(
            r#"{"skills": ["Rust", {"name": "Tokio", "usage": "async services"}, null, ""]}"#,
        );
        assert_eq!(p.skills, vec!["Rust", "Tokio - async services"]);
    }

    #[test]
    fn test_string_list_wraps_single_string() {
        assert_eq!(sample(r#"{"skills": "Rust"}"#).skills, vec!["Rust"]);
        assert!(sample(r#"{"skills": null}"#).skills.is_empty());
    }

    #[test]
    fn test_object_falls_back_to_default_for_non_objects() {
        for json in [r#"{"nested": null}"#, r#"{"nested": "n/a"}"#, r#"{"nested": [1]}"#, "{}"] {
            let outer: Outer = serde_json::from_str(json).unwrap();
            assert_eq!(outer.nested, Nested::default(), "input: {json}");
        }
        let outer: Outer = serde_json::from_str(r#"{"nested": {"points": "12"}}"#).unwrap();
        assert_eq!(outer.nested.points, Some(12.0));
    }

    #[test]
    fn test_integral_numbers_serialize_without_fraction() {
        let written = |value| serde_json::to_string(&Written { value }).unwrap();
        assert_eq!(written(Some(84.0)), r#"{"value":84}"#);
        assert_eq!(written(Some(7.5)), r#"{"value":7.5}"#);
        assert_eq!(written(None), r#"{"value":null}"#);
    }
}
