//! Server-side account filters.
//!
//! Serializes to the `getProgramAccounts` filter shape:
//!
//! ```json
//! [{ "dataSize": 165 }, { "memcmp": { "offset": 8, "bytes": "<base58>" } }]
//! ```

use serde::{Serialize, Serializer};

use crate::{
    codec::Encode,
    error::{CodecError, CodecResult},
    layout::RecordLayout,
    record::to_vec,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Filter {
    DataSize(u64),
    Memcmp(Memcmp),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Memcmp {
    pub offset: usize,
    #[serde(serialize_with = "serialize_base58")]
    pub bytes: Vec<u8>,
}

fn serialize_base58<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&bs58::encode(bytes).into_string())
}

impl Memcmp {
    pub fn matches(&self, data: &[u8]) -> bool {
        match self.offset.checked_add(self.bytes.len()) {
            Some(end) => data.get(self.offset..end) == Some(self.bytes.as_slice()),
            None => false,
        }
    }
}

impl Filter {
    pub fn memcmp(offset: usize, bytes: impl Into<Vec<u8>>) -> Self {
        Self::Memcmp(Memcmp {
            offset,
            bytes: bytes.into(),
        })
    }

    pub fn data_size(len: usize) -> Self {
        Self::DataSize(len as u64)
    }

    /// Memcmp on a record field, with the value encoded by its codec.
    ///
    /// The field must have a static offset and a fixed width, and the
    /// encoded value must be exactly that wide.
    pub fn field<T: Encode + ?Sized>(
        layout: &RecordLayout,
        field: &str,
        value: &T,
    ) -> CodecResult<Self> {
        let offset = layout.offset_of(field)?;
        let (_, slot) = layout.field(field)?;
        let bytes = to_vec(value)?;
        match slot.fixed_len {
            Some(expected) if expected == bytes.len() => Ok(Self::memcmp(offset, bytes)),
            expected => Err(CodecError::FilterWidth {
                field: slot.name,
                expected: expected.unwrap_or(0),
                actual: bytes.len(),
            }),
        }
    }

    /// Evaluate the filter against raw account data, as the RPC node would.
    pub fn matches(&self, data: &[u8]) -> bool {
        match self {
            Self::DataSize(len) => data.len() as u64 == *len,
            Self::Memcmp(memcmp) => memcmp.matches(data),
        }
    }
}
