//! Lenient field decoders.
//!
//! The service is inconsistent about scalar types: flags arrive as `true`,
//! `1` or `"1"`, counters occasionally as strings, and missing values as
//! `null`. These helpers accept every observed spelling.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a flag from a bool, number or string; absent or `null` is `false`
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => matches!(s.trim(), "1" | "true" | "True"),
        _ => false,
    })
}

/// Decode a counter; absent, `null` or garbage is `0`
pub(crate) fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_i64(deserializer)?.map_or(0, |v| v.max(0) as u64))
}

/// Decode an optional integer from a number or numeric string.
///
/// `false` (used for "never" in some timestamp fields) decodes to `None`.
pub(crate) fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Decode an optional unsigned integer from a number or numeric string
pub(crate) fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_i64(deserializer)?.and_then(|v| u64::try_from(v).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "flag")]
        flag: bool,
        #[serde(default, deserialize_with = "count")]
        count: u64,
        #[serde(default, deserialize_with = "opt_i64")]
        when: Option<i64>,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_flag_spellings() {
        assert!(probe(r#"{"flag": true}"#).flag);
        assert!(probe(r#"{"flag": 1}"#).flag);
        assert!(probe(r#"{"flag": "1"}"#).flag);
        assert!(!probe(r#"{"flag": "0"}"#).flag);
        assert!(!probe(r#"{"flag": null}"#).flag);
        assert!(!probe(r#"{}"#).flag);
    }

    #[test]
    fn test_numeric_spellings() {
        assert_eq!(probe(r#"{"count": "42"}"#).count, 42);
        assert_eq!(probe(r#"{"count": null}"#).count, 0);
        assert_eq!(probe(r#"{"count": -3}"#).count, 0);
        assert_eq!(probe(r#"{"when": false}"#).when, None);
        assert_eq!(probe(r#"{"when": 1700000000}"#).when, Some(1700000000));
        assert_eq!(probe(r#"{"when": 12.9}"#).when, Some(12));
    }
}
