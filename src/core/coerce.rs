use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Shape of a numeric price attribute as it arrives from a write payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawNumber<'a> {
    NumericString(&'a str),
    Integer(i64),
    Float(f64),
    /// `null` or an empty/whitespace string
    Blank,
    Invalid,
}

impl<'a> RawNumber<'a> {
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::Null => RawNumber::Blank,
            Value::String(s) if s.trim().is_empty() => RawNumber::Blank,
            Value::String(s) => RawNumber::NumericString(s.trim()),
            Value::Number(n) => match n.as_i64() {
                Some(i) => RawNumber::Integer(i),
                None => n.as_f64().map(RawNumber::Float).unwrap_or(RawNumber::Invalid),
            },
            Value::Bool(_) | Value::Array(_) | Value::Object(_) => RawNumber::Invalid,
        }
    }

    /// Canonical float, `None` when the value is not a finite number.
    pub fn to_f64(self) -> Option<f64> {
        let number = match self {
            RawNumber::NumericString(s) => s.parse::<f64>().ok()?,
            RawNumber::Integer(i) => i as f64,
            RawNumber::Float(f) => f,
            RawNumber::Blank | RawNumber::Invalid => return None,
        };
        number.is_finite().then_some(number)
    }
}

/// Accepts a JSON number or a numeric string. Older stored payloads kept
/// nested prices as strings.
pub fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    RawNumber::from_value(&value)
        .to_f64()
        .ok_or_else(|| D::Error::custom(format!("expected a number, found {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify() {
        assert_eq!(RawNumber::from_value(&json!("5")), RawNumber::NumericString("5"));
        assert_eq!(RawNumber::from_value(&json!(5)), RawNumber::Integer(5));
        assert_eq!(RawNumber::from_value(&json!(-5.7)), RawNumber::Float(-5.7));
        assert_eq!(RawNumber::from_value(&json!(null)), RawNumber::Blank);
        assert_eq!(RawNumber::from_value(&json!("  ")), RawNumber::Blank);
        assert_eq!(RawNumber::from_value(&json!(true)), RawNumber::Invalid);
        assert_eq!(RawNumber::from_value(&json!({"net": 1})), RawNumber::Invalid);
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(RawNumber::NumericString("5.5").to_f64(), Some(5.5));
        assert_eq!(RawNumber::NumericString("-5").to_f64(), Some(-5.0));
        assert_eq!(RawNumber::Integer(-5).to_f64(), Some(-5.0));
        assert_eq!(RawNumber::Float(5.2).to_f64(), Some(5.2));
        assert_eq!(RawNumber::NumericString("abc").to_f64(), None);
        assert_eq!(RawNumber::NumericString("NaN").to_f64(), None);
        assert_eq!(RawNumber::NumericString("inf").to_f64(), None);
        assert_eq!(RawNumber::Blank.to_f64(), None);
    }

    #[test]
    fn test_u64_beyond_i64_is_float() {
        let value = json!(u64::MAX);
        assert!(matches!(RawNumber::from_value(&value), RawNumber::Float(_)));
    }
}
