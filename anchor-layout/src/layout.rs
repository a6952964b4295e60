//! Static field offsets.
//!
//! A [`RecordLayout`] lists a record's fields in wire order with their
//! fixed widths. Offsets are computed from that list, so they move with
//! the schema instead of being maintained by hand.

use crate::error::{CodecError, CodecResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    /// `None` for variable-length fields (vectors, strings, optionals,
    /// unions with payloads of differing size).
    pub fixed_len: Option<usize>,
}

impl FieldLayout {
    pub const fn new(name: &'static str, fixed_len: Option<usize>) -> Self {
        Self { name, fixed_len }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    pub name: &'static str,
    /// Bytes preceding the first field: 8 for accounts (the discriminator),
    /// 0 for plain records.
    pub base: usize,
    pub fields: &'static [FieldLayout],
}

impl RecordLayout {
    pub const fn new(name: &'static str, base: usize, fields: &'static [FieldLayout]) -> Self {
        Self { name, base, fields }
    }

    /// Offset of the field at `index`, or `None` when a variable-length
    /// field precedes it or the index is out of range.
    pub const fn offset_at(&self, index: usize) -> Option<usize> {
        if index >= self.fields.len() {
            return None;
        }
        let mut offset = self.base;
        let mut i = 0;
        while i < index {
            match self.fields[i].fixed_len {
                Some(len) => offset += len,
                None => return None,
            }
            i += 1;
        }
        Some(offset)
    }

    /// Total size including `base` when every field is fixed.
    pub const fn fixed_size(&self) -> Option<usize> {
        let mut size = self.base;
        let mut i = 0;
        while i < self.fields.len() {
            match self.fields[i].fixed_len {
                Some(len) => size += len,
                None => return None,
            }
            i += 1;
        }
        Some(size)
    }

    pub fn field(&self, name: &str) -> CodecResult<(usize, &'static FieldLayout)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, field)| field.name == name)
            .ok_or_else(|| CodecError::UnknownField {
                schema: self.name,
                field: name.to_string(),
            })
    }

    /// Byte offset of `name` from the start of the buffer.
    pub fn offset_of(&self, name: &str) -> CodecResult<usize> {
        let (index, field) = self.field(name)?;
        if let Some(after) = self.fields[..index].iter().find(|f| f.fixed_len.is_none()) {
            return Err(CodecError::VariableOffset {
                schema: self.name,
                field: field.name,
                after: after.name,
            });
        }
        let preceding: usize = self.fields[..index]
            .iter()
            .filter_map(|f| f.fixed_len)
            .sum();
        Ok(self.base + preceding)
    }

    /// `(name, offset)` for every field whose offset is static.
    pub fn offsets(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.fields
            .iter()
            .enumerate()
            .map_while(|(i, field)| self.offset_at(i).map(|offset| (field.name, offset)))
    }
}

/// Implemented by every derived record and union.
pub trait HasLayout {
    const LAYOUT: RecordLayout;
}
