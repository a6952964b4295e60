//! Borsh-compatible codec and schema dispatch for Anchor program clients.
//!
//! Schemas are plain Rust types deriving [`Codec`]. From one declaration
//! the derive produces:
//! - the wire codec ([`Encode`] / [`Decode`]) with exact length accounting
//! - a static [`RecordLayout`] and `<FIELD>_OFFSET` constants for
//!   `getProgramAccounts` filters
//! - [`AccountSchema`], [`InstructionArgs`] or [`EventSchema`] with the
//!   8-byte discriminator
//! - a [`Describe`] implementation for readable output
//!
//! ```
//! use anchor_layout::{from_slice, to_vec, Codec};
//!
//! #[derive(Codec, Debug, PartialEq)]
//! struct Transfer {
//!     amount: u64,
//!     flag: bool,
//! }
//!
//! let value = Transfer { amount: 1_000_000, flag: true };
//! let bytes = to_vec(&value).unwrap();
//! assert_eq!(bytes, [0x40, 0x42, 0x0f, 0, 0, 0, 0, 0, 0x01]);
//! assert_eq!(from_slice::<Transfer>(&bytes).unwrap(), value);
//! assert_eq!(Transfer::FLAG_OFFSET, Some(8));
//! ```

pub mod codec;
pub mod config;
pub mod cursor;
pub mod discriminator;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod instruction;
pub mod layout;
mod optional;
pub mod program_error;
pub mod record;
pub mod registry;
pub mod schema;
pub mod sequence;
pub mod types;
pub mod variant;

#[cfg(not(target_os = "solana"))]
pub mod formatter;

pub use anchor_layout_derive::Codec;
pub use codec::{sum_fixed, Decode, Encode, Layout};
pub use config::DecoderConfig;
pub use cursor::{Reader, Writer};
pub use discriminator::{Discriminator, DISCRIMINATOR_LEN};
pub use dispatch::{Dispatcher, DispatcherBuilder};
pub use error::{CodecError, CodecResult};
pub use filter::{Filter, Memcmp};
#[cfg(not(target_os = "solana"))]
pub use formatter::InstructionFormatter;
pub use instruction::{
    build_instruction, build_raw, parse_instruction, roles, IndexGuidance, InstructionBuilder,
};
pub use layout::{FieldLayout, HasLayout, RecordLayout};
pub use program_error::{ErrorTable, ProgramErrorEntry, CUSTOM_ERROR_START};
pub use record::{decode_at, encode_into, from_prefix, from_slice, to_vec};
pub use registry::{describe_account, describe_instruction, ProgramRegistry, ProgramSchema};
pub use schema::{AccountSchema, EventSchema, InstructionArgs};
pub use sequence::LEN_PREFIX;
pub use types::{DecodedAccount, DecodedField, DecodedInstruction, Describe};
pub use variant::{OrdinalWidth, TaggedUnion};
