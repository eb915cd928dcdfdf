//! The Exif namespace.
//!
//! Keys are written `Exif.<Group>.<TagName>`, where the group names the IFD
//! holding the entry: `Image` (IFD0), `Photo`, `GPSInfo`, `Iop` and
//! `Thumbnail` (IFD1).

mod datum;
mod key;
mod print;
mod tag;
pub mod tags;
mod thumbnail;
mod value;

pub use datum::ExifDatum;
pub use key::{ExifGroup, ExifKey};
pub use tag::ExifTag;
pub use tags::{Printer, Section, TagInfo};
pub use thumbnail::ExifThumbnail;
pub use value::{Charset, CommentValue, ExifType, ExifValue};
