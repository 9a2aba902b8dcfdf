//! # JSON Interop
//!
//! Every JSON document is a `Value`; the reverse only holds for values built
//! from JSON-shaped kinds. `From<serde_json::Value>` is total,
//! `TryFrom<&Value> for serde_json::Value` rejects undefined, bigint, symbol,
//! function and instance values as well as non-finite numbers.

use serde_json::{Map, Number};

use crate::error::ConversionError;
use crate::value::{Object, PropertyKey, Value, ValueKind};

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (PropertyKey::String(k), Value::from(v)))
                    .collect::<Object>(),
            ),
        }
    }
}

impl TryFrom<&Value> for serde_json::Value {
    type Error = ConversionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(serde_json::Value::Null),
            Value::Boolean(b) => Ok(serde_json::Value::Bool(*b)),
            Value::Number(n) if !n.is_finite() => Err(ConversionError::NonFiniteNumber(*n)),
            // Integral values inside the exactly representable range round-trip as JSON integers.
            Value::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                Ok(serde_json::Value::from(*n as i64))
            }
            Value::Number(n) => Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .ok_or(ConversionError::NonFiniteNumber(*n)),
            Value::String(s) => Ok(serde_json::Value::String(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(serde_json::Value::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(serde_json::Value::Array),
            Value::Object(map) => {
                let mut out = Map::new();
                for (key, item) in map {
                    match key {
                        PropertyKey::String(k) => {
                            out.insert(k.clone(), serde_json::Value::try_from(item)?);
                        }
                        PropertyKey::Symbol(_) => {
                            return Err(ConversionError::Unrepresentable {
                                kind: ValueKind::Symbol,
                            })
                        }
                    }
                }
                Ok(serde_json::Value::Object(out))
            }
            other => Err(ConversionError::Unrepresentable { kind: other.kind() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Symbol;
    use serde_json::json;

    #[test]
    fn test_json_into_value() {
        let value = Value::from(json!({"a": [1, "x", null, true]}));
        let expected = Value::object([(
            "a",
            Value::from(vec![Value::from(1), Value::from("x"), Value::Null, Value::from(true)]),
        )]);
        assert_eq!(value, expected);
    }

    #[test]
    fn test_value_back_to_json() {
        let doc = json!({"name": "vals", "tags": ["a", "b"], "size": 3, "ratio": 0.5});
        let value = Value::from(doc.clone());
        assert_eq!(serde_json::Value::try_from(&value).unwrap(), doc);
    }

    #[test]
    fn test_unrepresentable_kinds_rejected() {
        let err = serde_json::Value::try_from(&Value::Undefined).unwrap_err();
        assert_eq!(err, ConversionError::Unrepresentable { kind: ValueKind::Undefined });

        let err = serde_json::Value::try_from(&Value::from(vec![Value::bigint(1)])).unwrap_err();
        assert_eq!(err, ConversionError::Unrepresentable { kind: ValueKind::BigInt });

        let keyed = Value::object([(PropertyKey::from(Symbol::new("k")), Value::Null)]);
        assert!(serde_json::Value::try_from(&keyed).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = serde_json::Value::try_from(&Value::Number(f64::INFINITY)).unwrap_err();
        assert!(matches!(err, ConversionError::NonFiniteNumber(_)));
        assert_eq!(err.to_string(), "non-finite number inf has no JSON representation");
    }
}
