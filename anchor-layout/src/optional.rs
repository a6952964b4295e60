//! `Option<T>`: one presence byte, then the value if present.

use crate::{
    codec::{Decode, Encode, Layout},
    cursor::{Reader, Writer},
    error::{CodecError, CodecResult},
};

const NONE_TAG: u8 = 0;
const SOME_TAG: u8 = 1;

impl<T: Layout> Layout for Option<T> {
    const MIN_LEN: usize = 1;
}

impl<T: Encode> Encode for Option<T> {
    fn encoded_len(&self) -> usize {
        match self {
            None => 1,
            Some(value) => 1 + value.encoded_len(),
        }
    }

    fn encode(&self, writer: &mut Writer<'_>) -> CodecResult<()> {
        match self {
            None => writer.write_u8(NONE_TAG),
            Some(value) => {
                writer.write_u8(SOME_TAG)?;
                value.encode(writer)
            }
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(reader: &mut Reader<'_>) -> CodecResult<Self> {
        let offset = reader.position();
        match reader.read_u8()? {
            NONE_TAG => Ok(None),
            SOME_TAG => T::decode(reader).map(Some),
            tag => Err(CodecError::MalformedOptionalTag { offset, tag }),
        }
    }
}
