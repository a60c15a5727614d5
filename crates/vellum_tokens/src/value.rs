//! Token values
//!
//! [`TokenValue`] is the typed form of everything a token can hold, from a raw
//! literal in a source document to a fully resolved value in a theme map.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// A token value
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<TokenValue>),
    Object(IndexMap<String, TokenValue>),
}

impl TokenValue {
    /// If this value is a reference (`{a.b.c}`), the dotted path it points to
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            TokenValue::String(s) => reference_path(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TokenValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, TokenValue>> {
        match self {
            TokenValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TokenValue::Null)
    }
}

/// Extract the dotted path from a reference string.
///
/// - `"{neutral.0}"` -> `Some("neutral.0")`
/// - `"#ffffff"` -> `None`
pub fn reference_path(s: &str) -> Option<&str> {
    s.strip_prefix('{')?.strip_suffix('}')
}

impl From<&str> for TokenValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<f64> for TokenValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for TokenValue {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<bool> for TokenValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<serde_json::Value> for TokenValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            // Every JSON number fits an f64 (u64/i64 lose precision past 2^53)
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(TokenValue::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(k, v)| (k, TokenValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Whole numbers are written without a fractional part (`400`, not `400.0`)
fn whole_number(n: f64) -> Option<i64> {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    (n.fract() == 0.0 && n.abs() <= MAX_SAFE).then_some(n as i64)
}

impl Serialize for TokenValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TokenValue::Null => serializer.serialize_unit(),
            TokenValue::Bool(b) => serializer.serialize_bool(*b),
            TokenValue::Number(n) => match whole_number(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            TokenValue::String(s) => serializer.serialize_str(s),
            TokenValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            TokenValue::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Null => f.write_str("null"),
            TokenValue::Bool(b) => write!(f, "{b}"),
            TokenValue::Number(n) => match whole_number(*n) {
                Some(i) => write!(f, "{i}"),
                None => write!(f, "{n}"),
            },
            TokenValue::String(s) => f.write_str(s),
            TokenValue::Array(_) | TokenValue::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}
