//! TIFF tag value reading.
//!
//! Values are stored either inline in the IFD entry (for small values) or at
//! an offset inside the TIFF structure. The whole structure is in memory, so
//! reading is a bounds-checked slice.

use bytes::Bytes;

use super::parser::{ByteOrder, IfdEntry, TiffHeader};
use super::tags::FieldType;
use crate::error::TiffError;

// =============================================================================
// ValueReader
// =============================================================================

/// Reads tag values from an in-memory TIFF structure.
pub struct ValueReader<'a> {
    data: &'a [u8],
    header: &'a TiffHeader,
}

impl<'a> ValueReader<'a> {
    pub fn new(data: &'a [u8], header: &'a TiffHeader) -> Self {
        Self { data, header }
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.header.byte_order
    }

    /// Read raw bytes for an IFD entry's value.
    ///
    /// # Errors
    /// - `UnknownFieldType` if the entry's type is not a TIFF type
    /// - `ValueOutOfBounds` if an offset value lies outside the structure
    pub fn read_bytes(&self, entry: &IfdEntry) -> Result<Bytes, TiffError> {
        let size = entry
            .value_byte_size()
            .ok_or(TiffError::UnknownFieldType(entry.field_type_raw))?;

        if entry.is_inline {
            return Ok(Bytes::copy_from_slice(
                &entry.value_offset_bytes[..size as usize],
            ));
        }
        self.slice(entry.tag, entry.value_offset, size)
            .map(Bytes::copy_from_slice)
    }

    /// Bytes at an arbitrary offset, such as a thumbnail or preview stream.
    pub fn slice(&self, tag: u16, offset: u64, size: u64) -> Result<&'a [u8], TiffError> {
        let out_of_bounds = TiffError::ValueOutOfBounds { tag, offset, size };
        let start = usize::try_from(offset).map_err(|_| out_of_bounds.clone())?;
        let len = usize::try_from(size).map_err(|_| out_of_bounds.clone())?;
        let end = start.checked_add(len).ok_or(out_of_bounds.clone())?;
        self.data.get(start..end).ok_or(out_of_bounds)
    }

    /// Read a single u32 value from a Short, Long or IFD entry.
    pub fn read_u32(&self, entry: &IfdEntry) -> Result<u32, TiffError> {
        if let Some(value) = entry.inline_u32(self.header.byte_order) {
            return Ok(value);
        }
        self.read_u64_array(entry)?
            .first()
            .map(|&v| v as u32)
            .ok_or(TiffError::UnknownFieldType(entry.field_type_raw))
    }

    /// Read an array of unsigned integers, widening Short and Long values.
    pub fn read_u64_array(&self, entry: &IfdEntry) -> Result<Vec<u64>, TiffError> {
        let field_type = entry
            .field_type
            .ok_or(TiffError::UnknownFieldType(entry.field_type_raw))?;
        let bytes = self.read_bytes(entry)?;
        Ok(parse_u64_array(
            &bytes,
            entry.count as usize,
            field_type,
            self.header.byte_order,
        ))
    }
}

// =============================================================================
// Convenience functions for reading from bytes directly
// =============================================================================

/// Parse an array of unsigned integers from raw bytes.
///
/// Types other than Short, Long, Long8 and the IFD pointer types yield an
/// empty vector.
pub fn parse_u64_array(
    bytes: &[u8],
    count: usize,
    field_type: FieldType,
    byte_order: ByteOrder,
) -> Vec<u64> {
    let width = field_type.size_in_bytes();
    let read: fn(ByteOrder, &[u8]) -> u64 = match field_type {
        FieldType::Short => |o, b| o.read_u16(b) as u64,
        FieldType::Long | FieldType::Ifd => |o, b| o.read_u32(b) as u64,
        FieldType::Long8 | FieldType::Ifd8 => |o, b| o.read_u64(b),
        _ => return Vec::new(),
    };

    bytes
        .chunks_exact(width)
        .take(count)
        .map(|chunk| read(byte_order, chunk))
        .collect()
}
