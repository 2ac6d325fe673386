//! Canonical binary encoding of call arguments.
//!
//! Arguments for entry calls travel as canonical bytes: fixed-width
//! little-endian integers, a single byte for `bool`, 32 raw bytes for an
//! address, and a ULEB128 length prefix in front of every string, byte
//! string and vector.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for encoding and decoding
//! - [`writer`]: Output buffer and primitive writes
//! - [`reader`]: Bounds-checked input cursor
//! - [`encode`]: Type-directed lowering of host values
//! - [`decode`]: Type-directed lifting back to host values

mod decode;
mod encode;
mod error;
mod reader;
mod writer;

pub use decode::{decode, decode_from};
pub use encode::{encode, encode_into, encode_type_tag, expect_uint, parse_numeric_literal};
pub use error::CodecError;
pub use reader::BcsReader;
pub use writer::BcsWriter;

/// Longest sequence the format carries (2^31 - 1 elements).
pub const MAX_SEQUENCE_LENGTH: u64 = (1 << 31) - 1;
