//! Classic TIFF directory serialization.
//!
//! Each directory is written as its entry table followed by the values that
//! do not fit inline, padded to even offsets. Directory sizes depend only on
//! their entries, so a caller can lay out every directory first and patch
//! the pointer entries before writing anything.

use super::parser::{ByteOrder, TIFF_HEADER_SIZE, VERSION_TIFF};
use super::tags::FieldType;
use crate::error::TiffError;

/// One entry ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub tag: u16,
    pub field_type: FieldType,
    pub count: u32,
    /// Encoded value, already in the target byte order
    pub data: Vec<u8>,
}

impl RawEntry {
    /// A single Long, used for pointers and lengths.
    pub fn long(tag: u16, value: u32, byte_order: ByteOrder) -> Self {
        let mut data = Vec::with_capacity(4);
        byte_order.put_u32(&mut data, value);
        Self {
            tag,
            field_type: FieldType::Long,
            count: 1,
            data,
        }
    }

    /// A single Short.
    pub fn short(tag: u16, value: u16, byte_order: ByteOrder) -> Self {
        let mut data = Vec::with_capacity(2);
        byte_order.put_u16(&mut data, value);
        Self {
            tag,
            field_type: FieldType::Short,
            count: 1,
            data,
        }
    }

    fn is_inline(&self) -> bool {
        self.data.len() as u64 <= FieldType::INLINE_CLASSIC
    }

    fn external_size(&self) -> usize {
        if self.is_inline() {
            0
        } else {
            self.data.len() + self.data.len() % 2
        }
    }
}

/// Size in bytes of a directory holding `entries`, values included.
pub fn ifd_size(entries: &[RawEntry]) -> usize {
    2 + entries.len() * 12 + 4 + entries.iter().map(RawEntry::external_size).sum::<usize>()
}

/// Append the 8-byte classic TIFF header pointing at offset 8.
pub fn write_header(out: &mut Vec<u8>, byte_order: ByteOrder) {
    out.extend_from_slice(&byte_order.marker());
    byte_order.put_u16(out, VERSION_TIFF);
    byte_order.put_u32(out, TIFF_HEADER_SIZE as u32);
}

/// Append one directory at the current end of `out`.
///
/// `out` must start at the TIFF header, so its length is the directory's
/// offset. Entries are written sorted by tag.
///
/// # Errors
/// - `TooManyEntries` if there are more entries than a directory can count
/// - `TooLarge` if an offset would not fit in 32 bits
pub fn write_ifd(
    out: &mut Vec<u8>,
    entries: &[RawEntry],
    next_ifd_offset: u32,
    byte_order: ByteOrder,
) -> Result<(), TiffError> {
    let count =
        u16::try_from(entries.len()).map_err(|_| TiffError::TooManyEntries(entries.len() as u64))?;

    let mut sorted: Vec<&RawEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.tag);

    let start = out.len();
    let mut external_offset = start + 2 + entries.len() * 12 + 4;
    let end = start + ifd_size(entries);
    if u32::try_from(end).is_err() {
        return Err(TiffError::TooLarge(end));
    }

    byte_order.put_u16(out, count);
    for entry in &sorted {
        byte_order.put_u16(out, entry.tag);
        byte_order.put_u16(out, entry.field_type.as_u16());
        byte_order.put_u32(out, entry.count);
        if entry.is_inline() {
            let mut field = [0u8; 4];
            field[..entry.data.len()].copy_from_slice(&entry.data);
            out.extend_from_slice(&field);
        } else {
            byte_order.put_u32(out, external_offset as u32);
            external_offset += entry.external_size();
        }
    }
    byte_order.put_u32(out, next_ifd_offset);

    for entry in sorted.iter().filter(|e| !e.is_inline()) {
        out.extend_from_slice(&entry.data);
        if entry.data.len() % 2 == 1 {
            out.push(0);
        }
    }

    debug_assert_eq!(out.len(), end);
    Ok(())
}
