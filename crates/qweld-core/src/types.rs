//! Core value types for QWELD

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A scalar payload: the only shape allowed inside lists and maps.
///
/// Containers are one level deep by construction. There is no `Scalar`
/// variant for a list or a map, so a nested container cannot be expressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    /// NULL value
    Null,
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// Boolean
    Bool(bool),
    /// UTF-8 string
    Str(String),
}

impl Scalar {
    /// Human-readable shape name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Int(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Bool(_) => "boolean",
            Scalar::Str(_) => "string",
        }
    }

    /// Try to get as a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

/// A template argument value.
///
/// `Skip` is the distinguished skip sentinel. It is its own enum case rather
/// than a magic string or marker object, so it can never collide with
/// legitimate data; `Value::Skip == Value::Skip` and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// NULL value
    Null,
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// Boolean
    Bool(bool),
    /// UTF-8 string
    Str(String),
    /// Ordered list of scalars
    List(Vec<Scalar>),
    /// Insertion-ordered map of column name to scalar
    Map(IndexMap<String, Scalar>),
    /// Skip sentinel: elides the conditional block holding its placeholder
    Skip,
}

impl Value {
    /// Check if the value is the skip sentinel
    pub fn is_skip(&self) -> bool {
        matches!(self, Value::Skip)
    }

    /// Check if the value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Human-readable shape name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Skip => "skip sentinel",
        }
    }

    /// The scalar form of this value, if it has one.
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Value::Null => Some(Scalar::Null),
            Value::Int(v) => Some(Scalar::Int(*v)),
            Value::Float(v) => Some(Scalar::Float(*v)),
            Value::Bool(v) => Some(Scalar::Bool(*v)),
            Value::Str(s) => Some(Scalar::Str(s.clone())),
            Value::List(_) | Value::Map(_) | Value::Skip => None,
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::Null => Value::Null,
            Scalar::Int(v) => Value::Int(v),
            Scalar::Float(v) => Value::Float(v),
            Scalar::Bool(v) => Value::Bool(v),
            Scalar::Str(v) => Value::Str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Scalar>> for Value {
    fn from(v: Vec<Scalar>) -> Self {
        Value::List(v)
    }
}

impl From<IndexMap<String, Scalar>> for Value {
    fn from(v: IndexMap<String, Scalar>) -> Self {
        Value::Map(v)
    }
}

/// Convert one JSON node to a scalar. `path` names the node in errors.
fn json_scalar(json: &serde_json::Value, path: &str) -> Result<Scalar, ValueError> {
    match json {
        serde_json::Value::Null => Ok(Scalar::Null),
        serde_json::Value::Bool(b) => Ok(Scalar::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Scalar::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Scalar::Float(f))
            } else {
                Err(ValueError::UnsupportedNumber(n.to_string()))
            }
        }
        serde_json::Value::String(s) => Ok(Scalar::Str(s.clone())),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            Err(ValueError::NestedContainer {
                path: path.to_string(),
            })
        }
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = ValueError;

    /// Binding-layer conversion from JSON. Arrays become `List`, objects
    /// become `Map` with insertion order preserved; anything nested deeper
    /// than one container level is rejected.
    fn try_from(json: &serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Array(items) => {
                let mut list = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    list.push(json_scalar(item, &format!("[{}]", i))?);
                }
                Ok(Value::List(list))
            }
            serde_json::Value::Object(entries) => {
                let mut map = IndexMap::with_capacity(entries.len());
                for (key, entry) in entries {
                    map.insert(key.clone(), json_scalar(entry, &format!(".{}", key))?);
                }
                Ok(Value::Map(map))
            }
            other => Ok(json_scalar(other, "$")?.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_skip_sentinel_identity() {
        assert_eq!(Value::Skip, Value::Skip);
        assert_ne!(Value::Skip, Value::Str("__SKIP__".to_string()));
        assert_ne!(Value::Skip, Value::Null);
        assert!(Value::Skip.is_skip());
        assert!(!Value::Null.is_skip());
    }

    #[test]
    fn test_json_scalars_convert() {
        assert_eq!(Value::try_from(&json!(null)), Ok(Value::Null));
        assert_eq!(Value::try_from(&json!(true)), Ok(Value::Bool(true)));
        assert_eq!(Value::try_from(&json!(42)), Ok(Value::Int(42)));
        assert_eq!(Value::try_from(&json!(2.5)), Ok(Value::Float(2.5)));
        assert_eq!(
            Value::try_from(&json!("hello")),
            Ok(Value::Str("hello".to_string()))
        );
    }

    #[test]
    fn test_json_array_converts_to_list() {
        let value = Value::try_from(&json!([1, "two", null])).unwrap();
        assert_eq!(
            value,
            Value::List(vec![
                Scalar::Int(1),
                Scalar::Str("two".to_string()),
                Scalar::Null,
            ])
        );
    }

    #[test]
    fn test_json_object_preserves_insertion_order() {
        let value = Value::try_from(&json!({"zeta": 1, "alpha": 2})).unwrap();
        let Value::Map(map) = value else {
            panic!("expected a map");
        };
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_json_nested_array_rejected() {
        let err = Value::try_from(&json!([1, [2]])).unwrap_err();
        assert_eq!(
            err,
            ValueError::NestedContainer {
                path: "[1]".to_string()
            }
        );
    }

    #[test]
    fn test_json_nested_object_rejected() {
        let err = Value::try_from(&json!({"a": {"b": 1}})).unwrap_err();
        assert_eq!(
            err,
            ValueError::NestedContainer {
                path: ".a".to_string()
            }
        );
    }

    #[test]
    fn test_scalar_roundtrip_into_value() {
        assert_eq!(Value::from(Scalar::Int(7)), Value::Int(7));
        assert_eq!(
            Value::from(Scalar::Str("x".to_string())),
            Value::Str("x".to_string())
        );
    }
}
