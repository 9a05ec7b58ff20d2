//! # Kind Coercion Table
//!
//! Maps a declared [`PropKind`] to its default value and to the converter that
//! turns a raw attribute string into a typed [`Value`].
//!
//! | Kind      | Default | Conversion                                   |
//! |-----------|---------|----------------------------------------------|
//! | (none)    | `""`    | raw string                                   |
//! | `string`  | `""`    | raw string                                   |
//! | `boolean` | `false` | `false` iff `"false"` (any case), else `true` |
//! | `int`     | `0`     | integer prefix                               |
//! | `number`  | `0.0`   | float prefix                                 |
//! | `json`    | `{}`    | `serde_json` parse, errors propagate         |
//!
//! Kind names stay strings on the wire so manifests written for other hosts
//! can declare them directly.

use crate::error::{CoercionError, CoercionResult};
use crate::numeric::{parse_float_prefix, parse_int_prefix};
use crate::value::Value;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropKind {
    String,
    Number,
    Int,
    Json,
    Boolean,
    /// A kind name no converter exists for
    Unknown(String),
}

impl PropKind {
    pub fn as_str(&self) -> &str {
        match self {
            PropKind::String => "string",
            PropKind::Number => "number",
            PropKind::Int => "int",
            PropKind::Json => "json",
            PropKind::Boolean => "boolean",
            PropKind::Unknown(name) => name,
        }
    }

    /// Resolve a kind name; unrecognized names become [`PropKind::Unknown`]
    pub fn from_name(name: &str) -> Self {
        match name {
            "string" => PropKind::String,
            "number" => PropKind::Number,
            "int" => PropKind::Int,
            "json" => PropKind::Json,
            "boolean" => PropKind::Boolean,
            other => PropKind::Unknown(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, PropKind::Unknown(_))
    }
}

impl FromStr for PropKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PropKind::from_name(s))
    }
}

impl fmt::Display for PropKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PropKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PropKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(PropKind::from_name(&name))
    }
}

/// Initial value of a field before any attribute or write reaches it
pub fn default_for(kind: Option<&PropKind>) -> Value {
    match kind {
        None | Some(PropKind::String) => Value::String(String::new()),
        Some(PropKind::Boolean) => Value::Boolean(false),
        Some(PropKind::Int) => Value::Int(0),
        Some(PropKind::Number) => Value::Number(0.0),
        Some(PropKind::Json) => Value::Json(serde_json::Value::Object(serde_json::Map::new())),
        Some(PropKind::Unknown(name)) => {
            warn!(kind = %name, "Unknown property kind - defaulting to null");
            Value::Null
        }
    }
}

/// Convert a raw attribute value for `field` according to `kind`.
///
/// `raw` is `None` when the attribute was removed.
pub fn convert(kind: &PropKind, field: &str, raw: Option<&str>) -> CoercionResult<Value> {
    match kind {
        PropKind::String => Ok(raw.map(Value::from).unwrap_or(Value::Null)),
        PropKind::Boolean => Ok(Value::Boolean(match raw {
            Some(s) => !s.eq_ignore_ascii_case("false"),
            None => false,
        })),
        PropKind::Int => Ok(coerce_numeric(field, raw, parse_int_prefix)),
        PropKind::Number => Ok(coerce_numeric(field, raw, parse_float_prefix)),
        PropKind::Json => match raw {
            Some(s) => serde_json::from_str(s)
                .map(Value::Json)
                .map_err(|source| CoercionError::MalformedJson {
                    field: field.to_string(),
                    source,
                }),
            None => Ok(Value::Null),
        },
        PropKind::Unknown(name) => {
            warn!(kind = %name, field, "Unknown property kind - storing null");
            Ok(Value::Null)
        }
    }
}

/// Bring a written value in line with the field's declared kind.
///
/// Only the numeric kinds are adjusted: an `Int` written to a `number` field
/// becomes a `Number`, and an integral `Number` written to an `int` field
/// becomes an `Int`. Everything else is stored as given.
pub fn conform(kind: &PropKind, value: Value) -> Value {
    match (kind, value) {
        (PropKind::Number, Value::Int(n)) => Value::Number(n as f64),
        (PropKind::Int, Value::Number(n))
            if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 =>
        {
            Value::Int(n as i64)
        }
        (_, value) => value,
    }
}

fn coerce_numeric(field: &str, raw: Option<&str>, parse: fn(&str) -> Value) -> Value {
    let value = raw.map(parse).unwrap_or(Value::NotANumber);
    if value.is_nan() {
        warn!(field, raw = ?raw, "Attribute is not numeric - storing NaN");
    }
    value
}
