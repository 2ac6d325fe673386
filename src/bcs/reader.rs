//! Bounds-checked input cursor for canonical decoding.

use super::{CodecError, MAX_SEQUENCE_LENGTH};

/// Cursor over an encoded byte slice. Every read returns an error instead
/// of panicking when the input runs out.
pub struct BcsReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> BcsReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        let byte = self
            .buf
            .get(self.pos)
            .copied()
            .ok_or(CodecError::BufferTooSmall {
                needed: self.pos + 1,
                available: self.buf.len(),
            })?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidBool(other)),
        }
    }

    #[inline]
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        let end = self.pos.saturating_add(len);
        let slice = self
            .buf
            .get(self.pos..end)
            .ok_or(CodecError::BufferTooSmall {
                needed: end,
                available: self.buf.len(),
            })?;
        self.pos = end;
        Ok(slice)
    }

    pub fn read_uleb128(&mut self) -> Result<u64, CodecError> {
        let mut value: u64 = 0;
        let mut shift = 0u32;
        loop {
            let byte = self.read_u8()?;
            let group = u64::from(byte & 0x7f);
            if shift >= 64 || (shift == 63 && group > 1) {
                return Err(CodecError::NonCanonicalUleb128);
            }
            value |= group << shift;
            if byte & 0x80 == 0 {
                // A trailing zero group means the value had a shorter encoding.
                if byte == 0 && shift > 0 {
                    return Err(CodecError::NonCanonicalUleb128);
                }
                return Ok(value);
            }
            shift += 7;
        }
    }

    pub fn read_len(&mut self) -> Result<usize, CodecError> {
        let len = self.read_uleb128()?;
        if len > MAX_SEQUENCE_LENGTH {
            return Err(CodecError::SequenceTooLong(len));
        }
        usize::try_from(len).map_err(|_| CodecError::SequenceTooLong(len))
    }

    /// Succeeds only if every input byte was consumed.
    pub fn finish(self) -> Result<(), CodecError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(CodecError::TrailingBytes(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_uleb128() {
        assert_eq!(BcsReader::new(&[0x00]).read_uleb128(), Ok(0));
        assert_eq!(BcsReader::new(&[0xac, 0x02]).read_uleb128(), Ok(300));
        assert_eq!(
            BcsReader::new(&[0x80]).read_uleb128(),
            Err(CodecError::BufferTooSmall { needed: 2, available: 1 })
        );
    }

    #[test]
    fn test_rejects_padded_uleb128() {
        assert_eq!(
            BcsReader::new(&[0x81, 0x00]).read_uleb128(),
            Err(CodecError::NonCanonicalUleb128)
        );
    }

    #[test]
    fn test_finish_reports_trailing_bytes() {
        let mut r = BcsReader::new(&[1, 2, 3]);
        assert_eq!(r.read_u8(), Ok(1));
        assert_eq!(r.finish(), Err(CodecError::TrailingBytes(2)));
    }

    #[test]
    fn test_read_slice_out_of_bounds() {
        let mut r = BcsReader::new(&[1, 2]);
        assert!(r.read_slice(3).is_err());
        assert_eq!(r.read_slice(2), Ok(&[1u8, 2][..]));
    }
}
