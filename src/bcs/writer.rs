//! Growable output buffer for canonical encoding.

use super::{CodecError, MAX_SEQUENCE_LENGTH};

/// Append-only byte sink with the primitive writes every encoding is built from.
#[derive(Debug, Default, Clone)]
pub struct BcsWriter {
    buf: Vec<u8>,
}

impl BcsWriter {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    /// Write bytes with no length prefix.
    #[inline]
    pub fn write_fixed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Seven bits per byte, low group first, high bit set on all but the last.
    pub fn write_uleb128(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.buf.push((value & 0x7f) as u8 | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
    }

    /// Write a sequence length, rejecting lengths the format cannot carry.
    pub fn write_len(&mut self, len: usize) -> Result<(), CodecError> {
        let len = len as u64;
        if len > MAX_SEQUENCE_LENGTH {
            return Err(CodecError::SequenceTooLong(len));
        }
        self.write_uleb128(len);
        Ok(())
    }

    /// Length-prefixed byte string.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        self.write_len(bytes.len())?;
        self.write_fixed(bytes);
        Ok(())
    }

    /// Length-prefixed UTF-8.
    pub fn write_str(&mut self, s: &str) -> Result<(), CodecError> {
        self.write_bytes(s.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uleb(value: u64) -> Vec<u8> {
        let mut w = BcsWriter::new();
        w.write_uleb128(value);
        w.into_bytes()
    }

    #[test]
    fn test_uleb128_groups() {
        assert_eq!(uleb(0), vec![0x00]);
        assert_eq!(uleb(1), vec![0x01]);
        assert_eq!(uleb(127), vec![0x7f]);
        assert_eq!(uleb(128), vec![0x80, 0x01]);
        assert_eq!(uleb(300), vec![0xac, 0x02]);
        assert_eq!(uleb(16384), vec![0x80, 0x80, 0x01]);
        assert_eq!(uleb(u64::from(u32::MAX)), vec![0xff, 0xff, 0xff, 0xff, 0x0f]);
    }

    #[test]
    fn test_length_prefixed_string() {
        let mut w = BcsWriter::new();
        w.write_str("abc").unwrap();
        assert_eq!(w.as_bytes(), &[3, b'a', b'b', b'c']);
    }

    #[test]
    fn test_length_limit() {
        let mut w = BcsWriter::new();
        let too_long = (MAX_SEQUENCE_LENGTH + 1) as usize;
        assert_eq!(
            w.write_len(too_long),
            Err(CodecError::SequenceTooLong(MAX_SEQUENCE_LENGTH + 1))
        );
        assert!(w.is_empty());
    }
}
