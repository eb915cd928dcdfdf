//! Byte-level I/O for opened images.
//!
//! - [`ByteSource`]: seekable stream over a file or an owned buffer
//! - [`read_all`]: whole-content copy that leaves the stream as it found it
//! - endian helpers shared by the TIFF, JPEG and IPTC codecs

mod endian;
mod source;
mod transfer;

pub use endian::{
    put_u16_be, put_u32_be, read_u16_be, read_u16_le, read_u32_be, read_u32_le, read_u64_be,
    read_u64_le,
};
pub use source::{ByteSource, FileSource, MemorySource};
pub use transfer::{read_all, PreserveReadState};
