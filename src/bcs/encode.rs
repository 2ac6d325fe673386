//! Host value lowering to canonical binary form.

use alloy_primitives::U256;

use super::{BcsWriter, CodecError};
use crate::types::{AccountAddress, PrimitiveKind, StructTag, TypeDescriptor};
use crate::value::HostValue;

/// Encode a host value under its declared type.
pub fn encode(ty: &TypeDescriptor, value: &HostValue) -> Result<Vec<u8>, CodecError> {
    let mut writer = BcsWriter::new();
    encode_into(ty, value, &mut writer)?;
    Ok(writer.into_bytes())
}

/// Encode a host value, appending to an existing writer.
pub fn encode_into(
    ty: &TypeDescriptor,
    value: &HostValue,
    writer: &mut BcsWriter,
) -> Result<(), CodecError> {
    match ty {
        TypeDescriptor::Primitive(kind) => encode_primitive(*kind, value, writer),
        TypeDescriptor::Vector(inner) => encode_vector(inner, value, writer),
        TypeDescriptor::StructRef(tag) => Err(CodecError::UnsupportedType(format!(
            "struct argument {tag}"
        ))),
        TypeDescriptor::Reference { .. } => Err(CodecError::UnsupportedType(format!(
            "reference argument {ty}"
        ))),
        TypeDescriptor::Generic(index) => Err(CodecError::UnsupportedType(format!(
            "unbound generic T{index}"
        ))),
    }
}

fn encode_primitive(
    kind: PrimitiveKind,
    value: &HostValue,
    writer: &mut BcsWriter,
) -> Result<(), CodecError> {
    match kind {
        PrimitiveKind::Bool => writer.write_bool(expect_bool(value)?),
        PrimitiveKind::Address => writer.write_fixed(expect_address(value)?.as_bytes()),
        PrimitiveKind::String => match value {
            HostValue::Str(s) => writer.write_str(s)?,
            other => return Err(CodecError::mismatch(kind.name(), other.type_name())),
        },
        PrimitiveKind::Signer => {
            return Err(CodecError::UnsupportedType(
                "signer is injected by the VM and cannot be encoded".to_string(),
            ));
        }
        PrimitiveKind::U8
        | PrimitiveKind::U16
        | PrimitiveKind::U32
        | PrimitiveKind::U64
        | PrimitiveKind::U128
        | PrimitiveKind::U256 => {
            let v = expect_uint(kind, value)?;
            let width = kind.integer_bits().unwrap_or(256) / 8;
            let le: [u8; 32] = v.to_le_bytes();
            let bytes = le.get(..width).ok_or_else(|| CodecError::OutOfRange {
                value: v.to_string(),
                ty: kind.name().to_string(),
            })?;
            writer.write_fixed(bytes);
        }
    }
    Ok(())
}

fn encode_vector(
    inner: &TypeDescriptor,
    value: &HostValue,
    writer: &mut BcsWriter,
) -> Result<(), CodecError> {
    // `vector<u8>` also carries raw blobs and UTF-8 text.
    if inner.primitive() == Some(PrimitiveKind::U8) {
        match value {
            HostValue::Bytes(bytes) => return writer.write_bytes(bytes),
            HostValue::Str(s) => return writer.write_str(s),
            _ => {}
        }
    }

    match value {
        HostValue::List(items) => {
            writer.write_len(items.len())?;
            for item in items {
                encode_into(inner, item, writer)?;
            }
            Ok(())
        }
        other => Err(CodecError::mismatch(
            format!("vector<{inner}>"),
            other.type_name(),
        )),
    }
}

fn expect_bool(value: &HostValue) -> Result<bool, CodecError> {
    match value {
        HostValue::Bool(b) => Ok(*b),
        HostValue::Str(s) if s == "true" => Ok(true),
        HostValue::Str(s) if s == "false" => Ok(false),
        other => Err(CodecError::mismatch("bool", other.type_name())),
    }
}

fn expect_address(value: &HostValue) -> Result<AccountAddress, CodecError> {
    match value {
        HostValue::Str(s) => AccountAddress::from_hex(s),
        HostValue::Bytes(b) => AccountAddress::from_slice(b),
        other => Err(CodecError::mismatch("address", other.type_name())),
    }
}

/// Read an unsigned integer of the given kind from a host value, checking
/// that it fits the declared width.
pub fn expect_uint(kind: PrimitiveKind, value: &HostValue) -> Result<U256, CodecError> {
    let bits = kind
        .integer_bits()
        .ok_or_else(|| CodecError::mismatch(kind.name(), "integer"))?;
    let v = match value {
        HostValue::Int(v) => *v,
        HostValue::Str(s) => parse_numeric_literal(s)?,
        other => return Err(CodecError::mismatch(kind.name(), other.type_name())),
    };
    if v.bit_len() > bits {
        return Err(CodecError::OutOfRange {
            value: v.to_string(),
            ty: kind.name().to_string(),
        });
    }
    Ok(v)
}

/// Parse a decimal or `0x`-prefixed hex literal into a 256-bit unsigned integer.
pub fn parse_numeric_literal(literal: &str) -> Result<U256, CodecError> {
    let malformed = || CodecError::MalformedNumericLiteral(literal.to_string());
    let (digits, radix) = match literal
        .strip_prefix("0x")
        .or_else(|| literal.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (literal, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix as u32)) {
        return Err(malformed());
    }
    U256::from_str_radix(digits, radix).map_err(|_| malformed())
}

/// Encode a type tag as it appears in a call's type-argument list.
pub fn encode_type_tag(ty: &TypeDescriptor, writer: &mut BcsWriter) -> Result<(), CodecError> {
    match ty {
        TypeDescriptor::Primitive(kind) => match kind {
            PrimitiveKind::Bool => writer.write_uleb128(0),
            PrimitiveKind::U8 => writer.write_uleb128(1),
            PrimitiveKind::U64 => writer.write_uleb128(2),
            PrimitiveKind::U128 => writer.write_uleb128(3),
            PrimitiveKind::Address => writer.write_uleb128(4),
            PrimitiveKind::Signer => writer.write_uleb128(5),
            PrimitiveKind::U16 => writer.write_uleb128(8),
            PrimitiveKind::U32 => writer.write_uleb128(9),
            PrimitiveKind::U256 => writer.write_uleb128(10),
            PrimitiveKind::String => {
                writer.write_uleb128(7);
                encode_struct_tag(
                    &AccountAddress::ONE,
                    "string",
                    "String",
                    &[],
                    writer,
                )?;
            }
        },
        TypeDescriptor::Vector(inner) => {
            writer.write_uleb128(6);
            encode_type_tag(inner, writer)?;
        }
        TypeDescriptor::StructRef(StructTag {
            address,
            module,
            name,
            type_args,
        }) => {
            writer.write_uleb128(7);
            encode_struct_tag(address, module, name, type_args, writer)?;
        }
        TypeDescriptor::Reference { .. } | TypeDescriptor::Generic(_) => {
            return Err(CodecError::UnsupportedType(format!(
                "{ty} is not a concrete type argument"
            )));
        }
    }
    Ok(())
}

fn encode_struct_tag(
    address: &AccountAddress,
    module: &str,
    name: &str,
    type_args: &[TypeDescriptor],
    writer: &mut BcsWriter,
) -> Result<(), CodecError> {
    writer.write_fixed(address.as_bytes());
    writer.write_str(module)?;
    writer.write_str(name)?;
    writer.write_len(type_args.len())?;
    for arg in type_args {
        encode_type_tag(arg, writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(tag: &str) -> TypeDescriptor {
        TypeDescriptor::parse(tag).unwrap()
    }

    #[test]
    fn test_fixed_width_integers_little_endian() {
        assert_eq!(encode(&ty("u8"), &HostValue::from(0xabu8)).unwrap(), vec![0xab]);
        assert_eq!(
            encode(&ty("u16"), &HostValue::from(0x0102u16)).unwrap(),
            vec![0x02, 0x01]
        );
        assert_eq!(
            encode(&ty("u32"), &HostValue::from(1u32)).unwrap(),
            vec![1, 0, 0, 0]
        );
        assert_eq!(
            encode(&ty("u64"), &HostValue::from("18446744073709551615")).unwrap(),
            vec![0xff; 8]
        );
        assert_eq!(encode(&ty("u128"), &HostValue::from(1u8)).unwrap().len(), 16);
        assert_eq!(
            encode(&ty("u256"), &HostValue::Int(U256::MAX)).unwrap(),
            vec![0xff; 32]
        );
    }

    #[test]
    fn test_integer_overflow_is_rejected() {
        assert!(matches!(
            encode(&ty("u8"), &HostValue::from(256u16)),
            Err(CodecError::OutOfRange { .. })
        ));
        assert!(matches!(
            encode(&ty("u64"), &HostValue::from("18446744073709551616")),
            Err(CodecError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(parse_numeric_literal("42").unwrap(), U256::from(42u8));
        assert_eq!(parse_numeric_literal("0xff").unwrap(), U256::from(255u8));
        for bad in ["", "-1", "1.5", "abc", "0x", "0xgg", " 1"] {
            assert!(
                matches!(
                    parse_numeric_literal(bad),
                    Err(CodecError::MalformedNumericLiteral(_))
                ),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_negative_numbers_are_type_mismatches() {
        let value = HostValue::from(serde_json::json!(-3));
        assert!(matches!(
            encode(&ty("u64"), &value),
            Err(CodecError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_bool_and_address() {
        assert_eq!(encode(&ty("bool"), &HostValue::Bool(true)).unwrap(), vec![1]);
        assert_eq!(encode(&ty("bool"), &HostValue::from("false")).unwrap(), vec![0]);

        let bytes = encode(&ty("address"), &HostValue::from("0x1")).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes.last(), Some(&1));

        assert!(matches!(
            encode(&ty("address"), &HostValue::from("0xnothex")),
            Err(CodecError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_string_is_length_prefixed() {
        assert_eq!(
            encode(&ty("0x1::string::String"), &HostValue::from("hi")).unwrap(),
            vec![2, b'h', b'i']
        );
    }

    #[test]
    fn test_vector_u8_accepts_bytes_and_text() {
        let vec_u8 = ty("vector<u8>");
        let from_bytes = encode(&vec_u8, &HostValue::bytes(vec![1, 2, 3])).unwrap();
        let from_text = encode(&vec_u8, &HostValue::from("abc")).unwrap();
        let element_wise = encode(&vec_u8, &HostValue::list([1u8, 2, 3])).unwrap();

        assert_eq!(from_bytes, vec![3, 1, 2, 3]);
        assert_eq!(from_text, vec![3, b'a', b'b', b'c']);
        assert_ne!(from_text, element_wise);
    }

    #[test]
    fn test_nested_vectors() {
        let value = HostValue::list([HostValue::list([1u64, 2]), HostValue::list(Vec::<u64>::new())]);
        let bytes = encode(&ty("vector<vector<u64>>"), &value).unwrap();
        let mut expected = vec![2, 2];
        expected.extend_from_slice(&1u64.to_le_bytes());
        expected.extend_from_slice(&2u64.to_le_bytes());
        expected.push(0);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_vector_requires_list() {
        assert!(matches!(
            encode(&ty("vector<u64>"), &HostValue::from(5u8)),
            Err(CodecError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_structs_and_signers_are_unsupported() {
        let object = HostValue::from(serde_json::json!({"id": 1}));
        assert!(matches!(
            encode(&ty("0x1::guid::GUID"), &object),
            Err(CodecError::UnsupportedType(_))
        ));
        assert!(matches!(
            encode(&ty("vector<0x1::guid::ID>"), &HostValue::list([object])),
            Err(CodecError::UnsupportedType(_))
        ));
        assert!(matches!(
            encode(&ty("signer"), &HostValue::from("0x1")),
            Err(CodecError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_type_tag_encoding() {
        let mut w = BcsWriter::new();
        encode_type_tag(&ty("vector<u64>"), &mut w).unwrap();
        assert_eq!(w.as_bytes(), &[6, 2]);

        let mut w = BcsWriter::new();
        encode_type_tag(&ty("0x1::aptos_coin::AptosCoin"), &mut w).unwrap();
        let bytes = w.into_bytes();
        assert_eq!(bytes.first(), Some(&7));
        // tag + address + "aptos_coin" + "AptosCoin" + empty type args
        assert_eq!(bytes.len(), 1 + 32 + 11 + 10 + 1);

        let mut w = BcsWriter::new();
        assert!(encode_type_tag(&ty("T0"), &mut w).is_err());
    }
}
