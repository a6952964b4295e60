//! Derive macro for anchor-layout schemas.
//!
//! ```ignore
//! use anchor_layout::Codec;
//!
//! #[derive(Codec)]
//! #[codec(account)]
//! pub struct Vault {
//!     pub authority: Pubkey,
//!     pub total_deposits: u64,
//!     pub label: String,
//! }
//!
//! #[derive(Codec)]
//! #[codec(instruction, account_names = ["vault", "depositor"])]
//! pub struct DepositArgs {
//!     pub amount: u64,
//! }
//!
//! #[derive(Codec)]
//! #[codec(ordinal_width = 4)]
//! pub enum Strategy {
//!     Idle,
//!     Lend { market: Pubkey },
//! }
//! ```
//!
//! ## Attributes
//!
//! | Attribute | Effect |
//! |-----------|--------|
//! | `account` | `AccountSchema`, discriminator `sha256("account:<Name>")[..8]`, offsets start after it |
//! | `instruction` | `InstructionArgs`, discriminator `sha256("global:<snake_name>")[..8]` |
//! | `event` | `EventSchema`, discriminator `sha256("event:<Name>")[..8]` |
//! | `name = ".."` | schema name used for hashing and display |
//! | `discriminator = [..]` | explicit 8-byte discriminator, nothing hashed |
//! | `ordinal_width = 1 \| 2 \| 4` | enum ordinal width in bytes, bounds the variant count |
//! | `account_names = [..]` | instruction account role names |
//!
//! Instruction type names drop an `IxData`, `Args` or `Instruction` suffix
//! before hashing: `InitializeVaultArgs` hashes `global:initialize_vault`.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod attrs;
mod discriminator;
mod expand;

/// Derives `Layout`, `Encode`, `Decode`, `Describe` and `HasLayout`, plus
/// `TaggedUnion` for enums and the schema trait selected by attributes.
#[proc_macro_derive(Codec, attributes(codec))]
pub fn derive_codec(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand::derive_codec(&input)
        .unwrap_or_else(|err| err.write_errors())
        .into()
}
