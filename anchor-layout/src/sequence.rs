//! Sequences: length-prefixed vectors, strings and fixed arrays.
//!
//! - `Vec<T>`: u32 LE element count, then the elements
//! - `String` and `str`: u32 LE byte count, then UTF-8 bytes
//! - `[T; N]`: the N elements only, the count belongs to the schema

use crate::{
    codec::{Decode, Encode, Layout},
    cursor::{Reader, Writer},
    error::{CodecError, CodecResult},
};

/// Width of the vector length prefix.
pub const LEN_PREFIX: usize = 4;

/// Read a u32 length prefix and check that `len` elements of at least
/// `min_elem_len` bytes each can still fit in the reader.
///
/// The check runs before any allocation, so a corrupt prefix cannot make
/// the decoder reserve gigabytes. A non-zero count of zero-sized elements
/// consumes no input and is rejected outright.
pub fn read_len(reader: &mut Reader<'_>, min_elem_len: usize) -> CodecResult<usize> {
    let offset = reader.position();
    let len = u32::decode(reader)? as usize;
    if min_elem_len == 0 && len > 0 {
        return Err(CodecError::ZeroSizedElements { offset, len });
    }
    let min_bytes = len.saturating_mul(min_elem_len);
    if min_bytes > reader.remaining() {
        return Err(CodecError::MalformedLength {
            offset,
            len,
            min_bytes,
            remaining: reader.remaining(),
        });
    }
    Ok(len)
}

fn write_len(writer: &mut Writer<'_>, len: usize) -> CodecResult<()> {
    let len = u32::try_from(len).map_err(|_| CodecError::MalformedLength {
        offset: writer.position(),
        len,
        min_bytes: len,
        remaining: writer.remaining(),
    })?;
    len.encode(writer)
}

impl<T: Layout> Layout for Vec<T> {
    const MIN_LEN: usize = LEN_PREFIX;
}

impl<T: Encode> Encode for Vec<T> {
    fn encoded_len(&self) -> usize {
        LEN_PREFIX + self.iter().map(Encode::encoded_len).sum::<usize>()
    }

    fn encode(&self, writer: &mut Writer<'_>) -> CodecResult<()> {
        if T::MIN_LEN == 0 && !self.is_empty() {
            return Err(CodecError::ZeroSizedElements {
                offset: writer.position(),
                len: self.len(),
            });
        }
        write_len(writer, self.len())?;
        self.iter().try_for_each(|item| item.encode(writer))
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(reader: &mut Reader<'_>) -> CodecResult<Self> {
        let len = read_len(reader, T::MIN_LEN)?;
        let mut items = Vec::with_capacity(len.min(reader.remaining()));
        for _ in 0..len {
            items.push(T::decode(reader)?);
        }
        Ok(items)
    }
}

impl Layout for str {
    const MIN_LEN: usize = LEN_PREFIX;
}

impl Encode for str {
    fn encoded_len(&self) -> usize {
        LEN_PREFIX + self.len()
    }

    fn encode(&self, writer: &mut Writer<'_>) -> CodecResult<()> {
        write_len(writer, self.len())?;
        writer.write_bytes(self.as_bytes())
    }
}

impl Layout for String {
    const MIN_LEN: usize = LEN_PREFIX;
}

impl Encode for String {
    fn encoded_len(&self) -> usize {
        self.as_str().encoded_len()
    }

    fn encode(&self, writer: &mut Writer<'_>) -> CodecResult<()> {
        self.as_str().encode(writer)
    }
}

impl Decode for String {
    fn decode(reader: &mut Reader<'_>) -> CodecResult<Self> {
        let len = read_len(reader, 1)?;
        let offset = reader.position();
        let bytes = reader.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8 { offset })
    }
}

impl<T: Layout, const N: usize> Layout for [T; N] {
    const MIN_LEN: usize = T::MIN_LEN * N;
    const FIXED_LEN: Option<usize> = match T::FIXED_LEN {
        Some(len) => Some(len * N),
        None => None,
    };
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encoded_len(&self) -> usize {
        match T::FIXED_LEN {
            Some(len) => len * N,
            None => self.iter().map(Encode::encoded_len).sum(),
        }
    }

    fn encode(&self, writer: &mut Writer<'_>) -> CodecResult<()> {
        self.iter().try_for_each(|item| item.encode(writer))
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode(reader: &mut Reader<'_>) -> CodecResult<Self> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::decode(reader)?);
        }
        items
            .try_into()
            .map_err(|items: Vec<T>| CodecError::SchemaMismatch {
                schema: core::any::type_name::<Self>(),
                declared: N,
                written: items.len(),
            })
    }
}
