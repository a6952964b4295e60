//! Bounds-checked read and write cursors.
//!
//! Every generated decoder and encoder goes through these two types instead
//! of tracking offsets by hand. A read past the end of the buffer is an
//! [`CodecError::InsufficientBytes`], never a panic.

use crate::error::{CodecError, CodecResult};

/// Read cursor over a byte slice.
///
/// ```
/// use anchor_layout::Reader;
///
/// let data = [0x40, 0x42, 0x0f, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01];
/// let mut reader = Reader::new(&data);
/// assert_eq!(u64::from_le_bytes(reader.read_array::<8>().unwrap()), 1_000_000);
/// assert_eq!(reader.read_u8().unwrap(), 1);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Start reading at `offset`. An offset past the end is an error.
    pub fn at(data: &'a [u8], offset: usize) -> CodecResult<Self> {
        if offset > data.len() {
            return Err(CodecError::InsufficientBytes {
                offset: 0,
                needed: offset,
                remaining: data.len(),
            });
        }
        Ok(Self { data, pos: offset })
    }

    /// Current byte offset into the underlying slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrow the next `n` bytes and advance past them.
    pub fn take(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(self.short(n));
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> CodecResult<u8> {
        Ok(self.take(1)?[0])
    }

    /// Look at the next byte without consuming it.
    pub fn peek_u8(&self) -> CodecResult<u8> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or_else(|| self.short(1))
    }

    pub fn skip(&mut self, n: usize) -> CodecResult<()> {
        self.take(n).map(|_| ())
    }

    /// Unread remainder of the slice.
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Fail if any bytes are left unread.
    pub fn finish(&self) -> CodecResult<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(CodecError::TrailingBytes(n)),
        }
    }

    fn short(&self, needed: usize) -> CodecError {
        CodecError::InsufficientBytes {
            offset: self.pos,
            needed,
            remaining: self.remaining(),
        }
    }
}

/// Write cursor over a caller-owned mutable byte slice.
///
/// The cursor never grows the buffer: callers size it up front from
/// [`Encode::encoded_len`](crate::Encode::encoded_len).
#[derive(Debug)]
pub struct Writer<'a> {
    data: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Start writing at `offset`. An offset past the end is an error.
    pub fn at(data: &'a mut [u8], offset: usize) -> CodecResult<Self> {
        if offset > data.len() {
            return Err(CodecError::InsufficientBytes {
                offset: 0,
                needed: offset,
                remaining: data.len(),
            });
        }
        Ok(Self { data, pos: offset })
    }

    /// Current byte offset into the underlying slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> CodecResult<()> {
        let end = self.pos + bytes.len();
        if end > self.data.len() {
            return Err(CodecError::InsufficientBytes {
                offset: self.pos,
                needed: bytes.len(),
                remaining: self.remaining(),
            });
        }
        self.data[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> CodecResult<()> {
        self.write_bytes(&[value])
    }
}
