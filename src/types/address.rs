//! 32-byte account addresses.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::hex;

use crate::bcs::CodecError;

/// A 32-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AccountAddress([u8; AccountAddress::LENGTH]);

impl AccountAddress {
    /// Length of an address in bytes.
    pub const LENGTH: usize = 32;

    /// The zero address.
    pub const ZERO: Self = Self([0u8; Self::LENGTH]);

    /// The framework address `0x1`.
    pub const ONE: Self = {
        let mut bytes = [0u8; Self::LENGTH];
        bytes[Self::LENGTH - 1] = 1;
        Self(bytes)
    };

    pub const fn new(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse an address from hex, with or without `0x`.
    ///
    /// Short forms are left-padded with zeros (`0x1` is the framework
    /// address). At most 64 hex digits are accepted.
    pub fn from_hex(s: &str) -> Result<Self, CodecError> {
        let invalid = || CodecError::InvalidAddress(s.to_string());
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if digits.is_empty()
            || digits.len() > Self::LENGTH * 2
            || !digits.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(invalid());
        }

        let padded = format!("{digits:0>64}");
        let bytes = hex::decode(padded).map_err(|_| invalid())?;
        let bytes: [u8; Self::LENGTH] = bytes.try_into().map_err(|_| invalid())?;
        Ok(Self(bytes))
    }

    /// Build an address from exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
        let bytes: [u8; Self::LENGTH] = bytes.try_into().map_err(|_| {
            CodecError::InvalidAddress(format!("expected 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; Self::LENGTH] {
        &self.0
    }

    /// `0x` followed by all 64 hex digits.
    pub fn to_long_string(&self) -> String {
        hex::encode_prefixed(self.0)
    }

    /// `0x` followed by the hex digits without leading zeros (`0x1`, `0x0`).
    pub fn to_short_string(&self) -> String {
        let full = hex::encode(self.0);
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{trimmed}")
        }
    }
}

impl FromStr for AccountAddress {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_long_string())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_short_string())
    }
}
