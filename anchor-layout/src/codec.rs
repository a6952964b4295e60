//! Codec traits and the primitive codec.
//!
//! Wire rules for primitives:
//! - integers and floats: fixed width, little-endian, no padding
//! - `bool`: one byte, `0` or `1`
//! - `Pubkey`: 32 raw bytes

use solana_pubkey::Pubkey;

use crate::{
    cursor::{Reader, Writer},
    error::{CodecError, CodecResult},
};

/// Static size facts about a schema.
pub trait Layout {
    /// Smallest number of bytes any encoded value of this type occupies.
    ///
    /// Used to reject length prefixes that cannot possibly fit in the
    /// remaining input before allocating for them.
    const MIN_LEN: usize;

    /// Exact encoded size when every value has the same size.
    const FIXED_LEN: Option<usize> = None;
}

pub trait Encode: Layout {
    /// Number of bytes [`encode`](Encode::encode) writes for this value.
    fn encoded_len(&self) -> usize;

    fn encode(&self, writer: &mut Writer<'_>) -> CodecResult<()>;
}

pub trait Decode: Layout + Sized {
    fn decode(reader: &mut Reader<'_>) -> CodecResult<Self>;
}

/// Fixed size of `T`, summed the way record layouts sum their fields.
pub const fn sum_fixed(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + b),
        _ => None,
    }
}

macro_rules! impl_le_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Layout for $ty {
                const MIN_LEN: usize = core::mem::size_of::<$ty>();
                const FIXED_LEN: Option<usize> = Some(core::mem::size_of::<$ty>());
            }

            impl Encode for $ty {
                #[inline]
                fn encoded_len(&self) -> usize {
                    core::mem::size_of::<$ty>()
                }

                #[inline]
                fn encode(&self, writer: &mut Writer<'_>) -> CodecResult<()> {
                    writer.write_bytes(&self.to_le_bytes())
                }
            }

            impl Decode for $ty {
                #[inline]
                fn decode(reader: &mut Reader<'_>) -> CodecResult<Self> {
                    Ok(<$ty>::from_le_bytes(reader.read_array()?))
                }
            }
        )*
    };
}

impl_le_primitive!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

impl Layout for bool {
    const MIN_LEN: usize = 1;
    const FIXED_LEN: Option<usize> = Some(1);
}

impl Encode for bool {
    fn encoded_len(&self) -> usize {
        1
    }

    fn encode(&self, writer: &mut Writer<'_>) -> CodecResult<()> {
        writer.write_u8(u8::from(*self))
    }
}

impl Decode for bool {
    fn decode(reader: &mut Reader<'_>) -> CodecResult<Self> {
        let offset = reader.position();
        match reader.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(CodecError::InvalidBool { offset, value }),
        }
    }
}

impl Layout for Pubkey {
    const MIN_LEN: usize = 32;
    const FIXED_LEN: Option<usize> = Some(32);
}

impl Encode for Pubkey {
    fn encoded_len(&self) -> usize {
        32
    }

    fn encode(&self, writer: &mut Writer<'_>) -> CodecResult<()> {
        writer.write_bytes(self.as_ref())
    }
}

impl Decode for Pubkey {
    fn decode(reader: &mut Reader<'_>) -> CodecResult<Self> {
        Ok(Pubkey::new_from_array(reader.read_array()?))
    }
}

impl<T: Layout> Layout for Box<T> {
    const MIN_LEN: usize = T::MIN_LEN;
    const FIXED_LEN: Option<usize> = T::FIXED_LEN;
}

impl<T: Encode> Encode for Box<T> {
    fn encoded_len(&self) -> usize {
        self.as_ref().encoded_len()
    }

    fn encode(&self, writer: &mut Writer<'_>) -> CodecResult<()> {
        self.as_ref().encode(writer)
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode(reader: &mut Reader<'_>) -> CodecResult<Self> {
        T::decode(reader).map(Box::new)
    }
}
