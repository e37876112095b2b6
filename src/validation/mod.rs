//! Admissibility rules for inbound writes.
//!
//! Each resource has a `validate` entry point that turns a loosely-typed
//! request payload into a typed record, or fails with either an accumulated
//! field-keyed error mapping or (for the warehouse format checks) an
//! immediate single-message failure.

pub mod inventory;
pub mod warehouse;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::FieldErrors;

/// Records a required-field message when the value is missing or empty.
pub(crate) fn require_text(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&str>,
    message: &str,
) {
    if value.map_or(true, |s| s.is_empty()) {
        errors.insert(field, message.to_string());
    }
}

/// Truthiness of a JSON value, matching the semantics the original client
/// payloads relied on: absent, null, `false`, `0` and `""` all count as
/// missing.
pub(crate) fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Loose numeric coercion for JSON values (`Number()`-style): numbers pass
/// through, blank strings and null coerce to zero, numeric strings parse,
/// anything else is non-numeric.
pub(crate) fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Deserializes a field so that an explicit `null` stays distinguishable
/// from an absent key (`Some(Value::Null)` vs `None`). Quantity needs this:
/// only a truly absent quantity is reported as missing.
pub(crate) fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values() {
        assert!(is_falsy(None));
        assert!(is_falsy(Some(&Value::Null)));
        assert!(is_falsy(Some(&json!(0))));
        assert!(is_falsy(Some(&json!(""))));
        assert!(is_falsy(Some(&json!(false))));
        assert!(!is_falsy(Some(&json!("0"))));
        assert!(!is_falsy(Some(&json!(3))));
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(to_number(&json!(5)), Some(5.0));
        assert_eq!(to_number(&json!("12")), Some(12.0));
        assert_eq!(to_number(&json!(" 3.5 ")), Some(3.5));
        assert_eq!(to_number(&json!("")), Some(0.0));
        assert_eq!(to_number(&Value::Null), Some(0.0));
        assert_eq!(to_number(&json!("abc")), None);
        assert_eq!(to_number(&json!([1])), None);
    }
}
