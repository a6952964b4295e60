//! Codec errors.

use thiserror::Error;

use crate::discriminator::Discriminator;

/// Error raised while encoding, decoding, dispatching or building filters.
///
/// Every variant aborts the operation that produced it. Nothing in this
/// crate substitutes a default value for a failed field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("insufficient bytes at offset {offset}: needed {needed}, {remaining} remaining")]
    InsufficientBytes {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error(
        "malformed length {len} at offset {offset}: needs at least {min_bytes} bytes, {remaining} remaining"
    )]
    MalformedLength {
        offset: usize,
        len: usize,
        min_bytes: usize,
        remaining: usize,
    },

    #[error("length {len} at offset {offset} counts zero-sized elements")]
    ZeroSizedElements { offset: usize, len: usize },

    #[error("malformed optional tag {tag:#04x} at offset {offset}")]
    MalformedOptionalTag { offset: usize, tag: u8 },

    #[error("invalid bool byte {value:#04x} at offset {offset}")]
    InvalidBool { offset: usize, value: u8 },

    #[error("invalid utf-8 string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("unexpected ordinal [{ordinal}] for enum [{schema}]")]
    UnexpectedOrdinal { schema: &'static str, ordinal: u32 },

    #[error("ordinal {ordinal} does not fit a {width}-byte tag")]
    OrdinalOverflow { ordinal: u32, width: usize },

    #[error("unknown schema discriminator {0}")]
    UnknownSchema(Discriminator),

    #[error("discriminator mismatch for {schema}: expected {expected}, found {found}")]
    DiscriminatorMismatch {
        schema: &'static str,
        expected: Discriminator,
        found: Discriminator,
    },

    #[error("discriminator {discriminator} registered for both {first} and {second}")]
    DuplicateDiscriminator {
        discriminator: Discriminator,
        first: &'static str,
        second: &'static str,
    },

    #[error("schema mismatch for {schema}: declared length {declared}, wrote {written}")]
    SchemaMismatch {
        schema: &'static str,
        declared: usize,
        written: usize,
    },

    #[error("{0} trailing bytes left after decode")]
    TrailingBytes(usize),

    #[error("{schema} has no field `{field}`")]
    UnknownField { schema: &'static str, field: String },

    #[error("field `{field}` of {schema} follows variable-length field `{after}`")]
    VariableOffset {
        schema: &'static str,
        field: &'static str,
        after: &'static str,
    },

    #[error("filter value for `{field}` is {actual} bytes, field is {expected} bytes")]
    FilterWidth {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("instruction targets program {found}, expected {expected}")]
    ProgramMismatch { expected: String, found: String },
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
