//! Host-side values supplied as call arguments.

use alloy_primitives::{U256, hex};
use serde_json::{Map, Number, Value as JsonValue};

/// A call argument before it is checked against its declared type.
///
/// Integers of every width are held as 256-bit unsigned values so that
/// `u64`, `u128` and `u256` arguments never lose precision. Numeric strings
/// are also accepted wherever an integer is declared.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Null,
    Bool(bool),
    /// A non-negative integer.
    Int(U256),
    /// A JSON number that is negative or fractional. Never encodable.
    Number(Number),
    Str(String),
    /// Raw bytes, encoded as-is under `vector<u8>`.
    Bytes(Vec<u8>),
    List(Vec<HostValue>),
    /// A struct-shaped value; only passed through on view calls.
    Object(Map<String, JsonValue>),
}

impl HostValue {
    /// Build a list from anything convertible into host values.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<HostValue>,
    {
        HostValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a byte value.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        HostValue::Bytes(bytes.into())
    }

    /// Short description of the runtime shape, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::Null => "null",
            HostValue::Bool(_) => "bool",
            HostValue::Int(_) => "integer",
            HostValue::Number(_) => "number",
            HostValue::Str(_) => "string",
            HostValue::Bytes(_) => "bytes",
            HostValue::List(_) => "list",
            HostValue::Object(_) => "object",
        }
    }

    /// JSON form used when a value is passed through untouched.
    ///
    /// Integers that fit in 64 bits become JSON numbers, wider ones decimal
    /// strings. Bytes become `0x`-prefixed hex.
    pub fn to_json(&self) -> JsonValue {
        match self {
            HostValue::Null => JsonValue::Null,
            HostValue::Bool(b) => JsonValue::Bool(*b),
            HostValue::Int(v) => match u64::try_from(*v) {
                Ok(small) => JsonValue::from(small),
                Err(_) => JsonValue::String(v.to_string()),
            },
            HostValue::Number(n) => JsonValue::Number(n.clone()),
            HostValue::Str(s) => JsonValue::String(s.clone()),
            HostValue::Bytes(b) => JsonValue::String(hex::encode_prefixed(b)),
            HostValue::List(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            HostValue::Object(map) => JsonValue::Object(map.clone()),
        }
    }
}

impl From<JsonValue> for HostValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => HostValue::Null,
            JsonValue::Bool(b) => HostValue::Bool(b),
            JsonValue::Number(n) => match n.as_u64() {
                Some(v) => HostValue::Int(U256::from(v)),
                None => HostValue::Number(n),
            },
            JsonValue::String(s) => HostValue::Str(s),
            JsonValue::Array(items) => HostValue::list(items),
            JsonValue::Object(map) => HostValue::Object(map),
        }
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        HostValue::Bool(value)
    }
}

macro_rules! impl_from_uint {
    ($($t:ty),*) => {
        $(
            impl From<$t> for HostValue {
                fn from(value: $t) -> Self {
                    HostValue::Int(U256::from(value))
                }
            }
        )*
    };
}

impl_from_uint!(u8, u16, u32, u64, u128, usize);

impl From<U256> for HostValue {
    fn from(value: U256) -> Self {
        HostValue::Int(value)
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        HostValue::Str(value.to_string())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        HostValue::Str(value)
    }
}

impl From<&[u8]> for HostValue {
    fn from(value: &[u8]) -> Self {
        HostValue::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for HostValue {
    fn from(value: Vec<u8>) -> Self {
        HostValue::Bytes(value)
    }
}

impl From<Vec<HostValue>> for HostValue {
    fn from(value: Vec<HostValue>) -> Self {
        HostValue::List(value)
    }
}
