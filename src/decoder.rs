//! Decoding of view-call return values.
//!
//! A node delivers `u64`, `u128` and `u256` results as decimal strings,
//! since they may exceed what a JSON number holds exactly. Each declared
//! return slot gets an optional decoder: wide integer slots are widened to
//! a 256-bit integer, every other slot is passed through unchanged.

use alloy_primitives::U256;
use serde_json::Value as JsonValue;

use crate::bcs::{CodecError, parse_numeric_literal};
use crate::types::{PrimitiveKind, TypeDescriptor, TypeTagError};

/// A decoded view result slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnValue {
    /// A `u64`/`u128`/`u256` slot, exact.
    Integer(U256),
    /// Anything else, exactly as the transport delivered it.
    Raw(JsonValue),
}

impl ReturnValue {
    pub fn as_integer(&self) -> Option<U256> {
        match self {
            ReturnValue::Integer(v) => Some(*v),
            ReturnValue::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&JsonValue> {
        match self {
            ReturnValue::Raw(v) => Some(v),
            ReturnValue::Integer(_) => None,
        }
    }
}

/// Decoder attached to one return slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnDecoder {
    /// Numeric string to 256-bit integer, bounded by the declared width.
    WideInteger(PrimitiveKind),
}

impl ReturnDecoder {
    /// The decoder for a declared return type, or `None` for pass-through.
    pub fn for_type(ty: &TypeDescriptor) -> Option<Self> {
        match ty.primitive() {
            Some(kind) if kind.is_wide_integer() => Some(ReturnDecoder::WideInteger(kind)),
            _ => None,
        }
    }

    pub fn decode(&self, raw: JsonValue) -> Result<ReturnValue, CodecError> {
        let ReturnDecoder::WideInteger(kind) = *self;
        let value = match &raw {
            JsonValue::String(s) => parse_numeric_literal(s)?,
            JsonValue::Number(n) => n
                .as_u64()
                .map(U256::from)
                .ok_or_else(|| CodecError::MalformedNumericLiteral(n.to_string()))?,
            other => return Err(CodecError::MalformedNumericLiteral(other.to_string())),
        };
        let bits = kind.integer_bits().unwrap_or(256);
        if value.bit_len() > bits {
            return Err(CodecError::OutOfRange {
                value: value.to_string(),
                ty: kind.name().to_string(),
            });
        }
        Ok(ReturnValue::Integer(value))
    }
}

/// One entry per declared return type tag.
pub fn decoders_for(returns: &[String]) -> Result<Vec<Option<ReturnDecoder>>, TypeTagError> {
    returns
        .iter()
        .map(|tag| TypeDescriptor::parse(tag).map(|ty| ReturnDecoder::for_type(&ty)))
        .collect()
}

/// Apply slot decoders to a transport result, in order.
///
/// Slots without a decoder, and any values beyond the declared slots, are
/// passed through.
pub fn apply_decoders(
    decoders: &[Option<ReturnDecoder>],
    values: Vec<JsonValue>,
) -> Result<Vec<ReturnValue>, CodecError> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, raw)| match decoders.get(i).copied().flatten() {
            Some(decoder) => decoder.decode(raw),
            None => Ok(ReturnValue::Raw(raw)),
        })
        .collect()
}
