//! 8-byte schema discriminators.
//!
//! Anchor prefixes every account and instruction payload with the first
//! eight bytes of a sha256 over a namespaced name:
//!
//! | kind        | preimage               |
//! |-------------|------------------------|
//! | account     | `account:<TypeName>`   |
//! | instruction | `global:<snake_name>`  |
//! | event       | `event:<TypeName>`     |
//!
//! Instruction discriminators may also be assigned explicitly by the
//! schema, in which case nothing is hashed.

use core::fmt;

use sha2::{Digest, Sha256};

use crate::{
    codec::{Decode, Encode, Layout},
    cursor::{Reader, Writer},
    error::{CodecError, CodecResult},
};

pub const DISCRIMINATOR_LEN: usize = 8;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Discriminator(pub [u8; DISCRIMINATOR_LEN]);

impl Discriminator {
    pub const fn new(bytes: [u8; DISCRIMINATOR_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; DISCRIMINATOR_LEN] {
        &self.0
    }

    /// Leading discriminator of `data`.
    pub fn from_slice(data: &[u8]) -> CodecResult<Self> {
        Reader::new(data).read_array().map(Self)
    }

    /// Hash `<namespace>:<name>` and keep the first eight bytes.
    pub fn hashed(namespace: &str, name: &str) -> Self {
        let digest = Sha256::new()
            .chain_update(namespace.as_bytes())
            .chain_update(b":")
            .chain_update(name.as_bytes())
            .finalize();
        let mut bytes = [0u8; DISCRIMINATOR_LEN];
        bytes.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
        Self(bytes)
    }

    pub fn for_account(type_name: &str) -> Self {
        Self::hashed("account", type_name)
    }

    /// `snake_name` is the instruction handler name, e.g. `initialize_vault`.
    pub fn for_instruction(snake_name: &str) -> Self {
        Self::hashed("global", snake_name)
    }

    pub fn for_event(type_name: &str) -> Self {
        Self::hashed("event", type_name)
    }

    /// Fail unless `data` starts with this discriminator.
    pub fn check(&self, schema: &'static str, data: &[u8]) -> CodecResult<()> {
        let found = Self::from_slice(data)?;
        if found != *self {
            return Err(CodecError::DiscriminatorMismatch {
                schema,
                expected: *self,
                found,
            });
        }
        Ok(())
    }
}

impl From<[u8; DISCRIMINATOR_LEN]> for Discriminator {
    fn from(bytes: [u8; DISCRIMINATOR_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Discriminator {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Discriminator({self})")
    }
}

impl Layout for Discriminator {
    const MIN_LEN: usize = DISCRIMINATOR_LEN;
    const FIXED_LEN: Option<usize> = Some(DISCRIMINATOR_LEN);
}

impl Encode for Discriminator {
    fn encoded_len(&self) -> usize {
        DISCRIMINATOR_LEN
    }

    fn encode(&self, writer: &mut Writer<'_>) -> CodecResult<()> {
        writer.write_bytes(&self.0)
    }
}

impl Decode for Discriminator {
    fn decode(reader: &mut Reader<'_>) -> CodecResult<Self> {
        reader.read_array().map(Self)
    }
}
