//! Tagged unions: an ordinal selecting one of a closed set of variants.
//!
//! Schemas are plain Rust enums. The ordinal of a variant is its
//! declaration index; the derive macro emits the ordinal table, and
//! decoding an ordinal outside it fails with
//! [`CodecError::UnexpectedOrdinal`].

use crate::{
    codec::{Decode, Encode},
    cursor::{Reader, Writer},
    error::{CodecError, CodecResult},
};

/// Encoded width of a tagged-union ordinal.
///
/// One byte unless the schema declares otherwise; the System Program, for
/// example, tags its instructions with a u32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrdinalWidth {
    U8,
    U16,
    U32,
}

impl OrdinalWidth {
    /// Width for a declared byte count. Only 1, 2 and 4 are valid.
    pub const fn from_bytes(bytes: usize) -> Option<Self> {
        match bytes {
            1 => Some(Self::U8),
            2 => Some(Self::U16),
            4 => Some(Self::U32),
            _ => None,
        }
    }

    pub const fn len(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }

    /// Write `ordinal` at this width. An ordinal the width cannot hold
    /// fails instead of being truncated onto another variant's tag.
    pub fn write(self, writer: &mut Writer<'_>, ordinal: u32) -> CodecResult<()> {
        let overflow = |_| CodecError::OrdinalOverflow {
            ordinal,
            width: self.len(),
        };
        match self {
            Self::U8 => u8::try_from(ordinal).map_err(overflow)?.encode(writer),
            Self::U16 => u16::try_from(ordinal).map_err(overflow)?.encode(writer),
            Self::U32 => ordinal.encode(writer),
        }
    }

    pub fn read(self, reader: &mut Reader<'_>) -> CodecResult<u32> {
        Ok(match self {
            Self::U8 => u8::decode(reader)? as u32,
            Self::U16 => u16::decode(reader)? as u32,
            Self::U32 => u32::decode(reader)?,
        })
    }
}

/// A closed, ordered variant set.
pub trait TaggedUnion: Encode + Decode {
    /// Enum name used in error messages.
    const NAME: &'static str;
    const ORDINAL_WIDTH: OrdinalWidth;
    /// Variant names in declaration (ordinal) order.
    const VARIANTS: &'static [&'static str];

    fn ordinal(&self) -> u32;

    fn variant_name(&self) -> &'static str {
        Self::VARIANTS[self.ordinal() as usize]
    }
}

/// Read an ordinal and check it against a declared variant count.
///
/// Derived decoders call this before matching on the ordinal, so the
/// fallback arm of their `match` is never reached with a live ordinal.
pub fn read_ordinal(
    reader: &mut Reader<'_>,
    width: OrdinalWidth,
    variant_count: usize,
    schema: &'static str,
) -> CodecResult<u32> {
    let ordinal = width.read(reader)?;
    if ordinal as usize >= variant_count {
        return Err(unexpected_ordinal(schema, ordinal));
    }
    Ok(ordinal)
}

pub fn unexpected_ordinal(schema: &'static str, ordinal: u32) -> CodecError {
    CodecError::UnexpectedOrdinal { schema, ordinal }
}

/// Smallest payload among the variants. Zero for an empty list.
pub const fn min_payload_len(lens: &[usize]) -> usize {
    if lens.is_empty() {
        return 0;
    }
    let mut min = lens[0];
    let mut i = 1;
    while i < lens.len() {
        if lens[i] < min {
            min = lens[i];
        }
        i += 1;
    }
    min
}

/// Common fixed payload size, if every variant has the same one.
pub const fn common_fixed_len(lens: &[Option<usize>]) -> Option<usize> {
    if lens.is_empty() {
        return None;
    }
    let first = match lens[0] {
        Some(len) => len,
        None => return None,
    };
    let mut i = 1;
    while i < lens.len() {
        match lens[i] {
            Some(len) if len == first => {}
            _ => return None,
        }
        i += 1;
    }
    Some(first)
}
