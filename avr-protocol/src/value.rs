//! Dynamic value model for device properties
//!
//! Every property decoded from or written to the device is carried as a
//! [`Value`]. The engine never interprets values beyond what the property
//! table's codecs require; hosts get typed access via the `as_*` helpers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A property value as seen by the engine and the host.
///
/// `Display` renders the value the way the wire codecs expect: booleans as
/// `true`/`false`, floats without a fractional part as plain integers
/// (`5.0` renders as `5`, `-2.5` as `-2.5`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Boolean view. Accepts `Bool`, the integers `0`/`1` and the strings
    /// `"true"`/`"false"` so host toggles survive loosely typed writes.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Int(0) => Some(false),
            Value::Int(1) => Some(true),
            Value::Str(s) if s == "true" => Some(true),
            Value::Str(s) if s == "false" => Some(false),
            _ => None,
        }
    }

    /// Numeric view of `Int`, `Float` or a parseable `Str`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::Str(s) => s.parse().ok(),
            Value::Bool(_) => None,
        }
    }

    /// Integer view of `Int`, an integral `Float` or a parseable `Str`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Float(n) if n.fract() == 0.0 => Some(*n as i64),
            Value::Str(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// String view, only for `Str` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Value::Float(n) => write!(f, "{}", n),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_wire_expectations() {
        assert_eq!(Value::Int(4).to_string(), "4");
        assert_eq!(Value::Float(5.0).to_string(), "5");
        assert_eq!(Value::Float(-2.5).to_string(), "-2.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Str("04".into()).to_string(), "04");
    }

    #[test]
    fn test_loose_bool_conversion() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(0).as_bool(), Some(false));
        assert_eq!(Value::Int(1).as_bool(), Some(true));
        assert_eq!(Value::Str("true".into()).as_bool(), Some(true));
        assert_eq!(Value::Str("on".into()).as_bool(), None);
        assert_eq!(Value::Int(7).as_bool(), None);
    }

    #[test]
    fn test_numeric_views() {
        assert_eq!(Value::Int(-80).as_f64(), Some(-80.0));
        assert_eq!(Value::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(Value::Str("12".into()).as_i64(), Some(12));
        assert_eq!(Value::Float(2.5).as_i64(), None);
    }
}
