//! Discriminated schemas: accounts, instruction arguments and events.
//!
//! All three share one wire shape, `discriminator ‖ record`. They differ
//! in how the discriminator is derived and in what they are decoded from.

use crate::{
    codec::{Decode, Encode},
    cursor::Reader,
    discriminator::{Discriminator, DISCRIMINATOR_LEN},
    error::{CodecError, CodecResult},
    filter::Filter,
    layout::HasLayout,
    record::to_vec,
    types::Describe,
};

/// `discriminator ‖ encode(value)`.
pub fn prefixed<T: Encode + ?Sized>(
    discriminator: &Discriminator,
    value: &T,
) -> CodecResult<Vec<u8>> {
    let body = to_vec(value)?;
    let mut data = Vec::with_capacity(DISCRIMINATOR_LEN + body.len());
    data.extend_from_slice(discriminator.as_bytes());
    data.extend_from_slice(&body);
    Ok(data)
}

/// Check the leading discriminator, then decode the record behind it.
///
/// Error offsets are relative to the start of `data`. With `strict`, bytes
/// left after the record are an error; otherwise they are ignored.
pub fn decode_prefixed<T: Decode>(
    schema: &'static str,
    expected: &Discriminator,
    data: &[u8],
    strict: bool,
) -> CodecResult<T> {
    let mut reader = Reader::new(data);
    let found = Discriminator::decode(&mut reader)?;
    if found != *expected {
        return Err(CodecError::DiscriminatorMismatch {
            schema,
            expected: *expected,
            found,
        });
    }
    let value = T::decode(&mut reader)?;
    if strict {
        reader.finish()?;
    }
    Ok(value)
}

/// Account state owned by a program.
///
/// The layout base of an account is [`DISCRIMINATOR_LEN`], so every
/// offset reported by [`HasLayout::LAYOUT`] is an absolute position in
/// the account data.
pub trait AccountSchema: Encode + Decode + Describe + HasLayout {
    const NAME: &'static str;
    /// `sha256("account:<NAME>")[..8]` unless assigned.
    const DISCRIMINATOR: Discriminator;

    /// Decode account data. Bytes past the record are ignored, since
    /// accounts are often allocated with headroom.
    fn try_from_account_data(data: &[u8]) -> CodecResult<Self> {
        decode_prefixed(Self::NAME, &Self::DISCRIMINATOR, data, false)
    }

    /// Decode account data that must contain exactly one record.
    fn try_from_account_data_strict(data: &[u8]) -> CodecResult<Self> {
        decode_prefixed(Self::NAME, &Self::DISCRIMINATOR, data, true)
    }

    fn to_account_data(&self) -> CodecResult<Vec<u8>> {
        prefixed(&Self::DISCRIMINATOR, self)
    }

    /// Account data size, when every field is fixed width.
    fn size() -> Option<usize> {
        Self::LAYOUT.fixed_size()
    }

    /// `dataSize` filter. `None` for variable-size accounts.
    fn size_filter() -> Option<Filter> {
        Self::size().map(Filter::data_size)
    }

    fn discriminator_filter() -> Filter {
        Filter::memcmp(0, Self::DISCRIMINATOR.0)
    }

    fn field_offset(field: &str) -> CodecResult<usize> {
        Self::LAYOUT.offset_of(field)
    }

    fn field_filter<V: Encode + ?Sized>(field: &str, value: &V) -> CodecResult<Filter> {
        Filter::field(&Self::LAYOUT, field, value)
    }
}

/// Arguments of one program instruction.
pub trait InstructionArgs: Encode + Decode + Describe {
    /// Display name, e.g. `Deposit`.
    const NAME: &'static str;
    /// Assigned by the schema or `sha256("global:<snake_name>")[..8]`.
    const DISCRIMINATOR: Discriminator;
    /// Account role names in instruction order.
    const ACCOUNT_NAMES: &'static [&'static str] = &[];

    fn to_instruction_data(&self) -> CodecResult<Vec<u8>> {
        prefixed(&Self::DISCRIMINATOR, self)
    }

    fn try_from_instruction_data(data: &[u8]) -> CodecResult<Self> {
        decode_prefixed(Self::NAME, &Self::DISCRIMINATOR, data, false)
    }

    fn try_from_instruction_data_strict(data: &[u8]) -> CodecResult<Self> {
        decode_prefixed(Self::NAME, &Self::DISCRIMINATOR, data, true)
    }
}

/// A program event emitted through the log.
pub trait EventSchema: Encode + Decode + Describe {
    const NAME: &'static str;
    /// `sha256("event:<NAME>")[..8]` unless assigned.
    const DISCRIMINATOR: Discriminator;

    fn to_event_data(&self) -> CodecResult<Vec<u8>> {
        prefixed(&Self::DISCRIMINATOR, self)
    }

    fn try_from_event_data(data: &[u8]) -> CodecResult<Self> {
        decode_prefixed(Self::NAME, &Self::DISCRIMINATOR, data, false)
    }
}
