//! Forgiving field decoders for records written by hand or by older front ends.
//!
//! Stored collections are untyped JSON. A field holding the wrong kind of value
//! decodes as absent instead of rejecting the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Text field: strings only.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Identifier field (`id`, `cedula`, room number): strings, or numbers
/// stringified without a trailing `.0`.
pub fn opt_ident<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(number_to_string(&n)),
        _ => None,
    })
}

/// Occupant count: non-negative integers or numeric strings.
pub fn opt_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => number_to_count(&n),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

fn number_to_string(n: &Number) -> String {
    if let Some(f) = n.as_f64().filter(|_| n.is_f64()) {
        if f.fract() == 0.0 && f.abs() < 1e15 {
            return format!("{}", f as i64);
        }
    }
    n.to_string()
}

fn number_to_count(n: &Number) -> Option<u32> {
    if let Some(u) = n.as_u64() {
        return u32::try_from(u).ok();
    }
    n.as_f64()
        .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= f64::from(u32::MAX))
        .map(|f| f as u32)
}

/// Treat empty strings the way the booking pages did: as not set.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_text")]
        text: Option<String>,
        #[serde(default, deserialize_with = "opt_ident")]
        ident: Option<String>,
        #[serde(default, deserialize_with = "opt_count")]
        count: Option<u32>,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn ident_accepts_numbers() {
        assert_eq!(probe(r#"{"ident": 1234567890}"#).ident.as_deref(), Some("1234567890"));
        assert_eq!(probe(r#"{"ident": 101.0}"#).ident.as_deref(), Some("101"));
        assert_eq!(probe(r#"{"ident": "0102030405"}"#).ident.as_deref(), Some("0102030405"));
        assert_eq!(probe(r#"{"ident": true}"#).ident, None);
    }

    #[test]
    fn count_accepts_numeric_strings() {
        assert_eq!(probe(r#"{"count": 2}"#).count, Some(2));
        assert_eq!(probe(r#"{"count": "3"}"#).count, Some(3));
        assert_eq!(probe(r#"{"count": -1}"#).count, None);
        assert_eq!(probe(r#"{"count": "many"}"#).count, None);
    }

    #[test]
    fn text_rejects_non_strings() {
        assert_eq!(probe(r#"{"text": 5}"#).text, None);
        assert_eq!(probe(r#"{"text": null}"#).text, None);
        assert_eq!(probe(r#"{}"#).text, None);
    }

    #[test]
    fn present_skips_empty() {
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&Some("Web".into())), Some("Web"));
        assert_eq!(present(&None), None);
    }
}
