//! Lifting canonical binary data back to host values.

use alloy_primitives::U256;

use super::{BcsReader, CodecError};
use crate::types::{AccountAddress, PrimitiveKind, TypeDescriptor};
use crate::value::HostValue;

/// Decode a complete encoding of `ty`. Trailing bytes are an error.
pub fn decode(ty: &TypeDescriptor, bytes: &[u8]) -> Result<HostValue, CodecError> {
    let mut reader = BcsReader::new(bytes);
    let value = decode_from(ty, &mut reader)?;
    reader.finish()?;
    Ok(value)
}

/// Decode one value of type `ty` from the reader's current position.
pub fn decode_from(ty: &TypeDescriptor, reader: &mut BcsReader<'_>) -> Result<HostValue, CodecError> {
    match ty {
        TypeDescriptor::Primitive(kind) => decode_primitive(*kind, reader),
        TypeDescriptor::Vector(inner) => {
            let len = reader.read_len()?;
            if inner.primitive() == Some(PrimitiveKind::U8) {
                return Ok(HostValue::Bytes(reader.read_slice(len)?.to_vec()));
            }
            let mut items = Vec::new();
            for _ in 0..len {
                items.push(decode_from(inner, reader)?);
            }
            Ok(HostValue::List(items))
        }
        other => Err(CodecError::UnsupportedType(format!("cannot decode {other}"))),
    }
}

fn decode_primitive(kind: PrimitiveKind, reader: &mut BcsReader<'_>) -> Result<HostValue, CodecError> {
    match kind {
        PrimitiveKind::Bool => Ok(HostValue::Bool(reader.read_bool()?)),
        PrimitiveKind::Address => {
            let bytes = reader.read_slice(AccountAddress::LENGTH)?;
            Ok(HostValue::Str(AccountAddress::from_slice(bytes)?.to_long_string()))
        }
        PrimitiveKind::String => {
            let len = reader.read_len()?;
            let bytes = reader.read_slice(len)?;
            let s = std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)?;
            Ok(HostValue::Str(s.to_string()))
        }
        PrimitiveKind::Signer => Err(CodecError::UnsupportedType("signer".to_string())),
        PrimitiveKind::U8
        | PrimitiveKind::U16
        | PrimitiveKind::U32
        | PrimitiveKind::U64
        | PrimitiveKind::U128
        | PrimitiveKind::U256 => {
            let width = kind.integer_bits().unwrap_or(256) / 8;
            let bytes = reader.read_slice(width)?;
            let v = U256::try_from_le_slice(bytes).ok_or_else(|| CodecError::OutOfRange {
                value: format!("{width}-byte integer"),
                ty: kind.name().to_string(),
            })?;
            Ok(HostValue::Int(v))
        }
    }
}
