//! TIFF structures as used by Exif blocks and TIFF files.
//!
//! # Key Concepts
//!
//! - **Byte order**: TIFF structures declare their endianness (II = little-endian,
//!   MM = big-endian) in the header. All multi-byte values must be read respecting
//!   this order.
//!
//! - **IFD (Image File Directory)**: a table of tagged entries plus a pointer to
//!   the next directory. Exif data lives in IFD0, the sub-IFDs it points to
//!   (Exif, GPS, Interoperability), and IFD1 for the thumbnail.
//!
//! - **Inline vs offset values**: Small values are stored inline in the IFD entry,
//!   larger values are stored at an offset pointed to by the entry.

mod parser;
mod tags;
mod values;
mod writer;

pub use parser::{
    ByteOrder, Ifd, IfdEntry, TiffHeader, BIGTIFF_HEADER_SIZE, MAX_IFD_ENTRIES, TIFF_HEADER_SIZE,
};
pub use tags::{Compression, FieldType, TiffTag};
pub use values::{parse_u64_array, ValueReader};
pub use writer::{ifd_size, write_header, write_ifd, RawEntry};
