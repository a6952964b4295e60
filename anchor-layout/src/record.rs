//! Whole-value encode and decode.
//!
//! These are the entry points callers use; the traits in [`crate::codec`]
//! are what schemas implement.

use crate::{
    codec::{Decode, Encode},
    cursor::{Reader, Writer},
    error::{CodecError, CodecResult},
};

/// Encode `value` into a fresh buffer sized from its `encoded_len`.
///
/// A value whose encoder writes a different number of bytes than it
/// declared fails with [`CodecError::SchemaMismatch`] instead of
/// returning a truncated or padded buffer.
pub fn to_vec<T: Encode + ?Sized>(value: &T) -> CodecResult<Vec<u8>> {
    let declared = value.encoded_len();
    let mut buf = vec![0u8; declared];
    let mut writer = Writer::new(&mut buf);
    let schema = core::any::type_name::<T>();
    match value.encode(&mut writer) {
        Ok(()) => {}
        Err(CodecError::InsufficientBytes { offset, needed, .. }) => {
            return Err(CodecError::SchemaMismatch {
                schema,
                declared,
                written: offset + needed,
            });
        }
        Err(err) => return Err(err),
    }
    let written = writer.position();
    if written != declared {
        return Err(CodecError::SchemaMismatch {
            schema,
            declared,
            written,
        });
    }
    Ok(buf)
}

/// Encode `value` into `buf` starting at `offset`. Returns bytes written.
pub fn encode_into<T: Encode + ?Sized>(
    value: &T,
    buf: &mut [u8],
    offset: usize,
) -> CodecResult<usize> {
    let mut writer = Writer::at(buf, offset)?;
    value.encode(&mut writer)?;
    Ok(writer.position() - offset)
}

/// Decode a `T` from `buf` starting at `offset`. Returns the value and the
/// number of bytes consumed.
pub fn decode_at<T: Decode>(buf: &[u8], offset: usize) -> CodecResult<(T, usize)> {
    let mut reader = Reader::at(buf, offset)?;
    let value = T::decode(&mut reader)?;
    Ok((value, reader.position() - offset))
}

/// Decode a `T` that must occupy all of `buf`.
pub fn from_slice<T: Decode>(buf: &[u8]) -> CodecResult<T> {
    let mut reader = Reader::new(buf);
    let value = T::decode(&mut reader)?;
    reader.finish()?;
    Ok(value)
}

/// Decode a `T` from the front of `buf`, ignoring whatever follows.
///
/// Account buffers are routinely allocated larger than the record they
/// hold, so this is the default for account data.
pub fn from_prefix<T: Decode>(buf: &[u8]) -> CodecResult<T> {
    T::decode(&mut Reader::new(buf))
}
