//! # imgmeta
//!
//! Read and edit the Exif, IPTC and XMP metadata embedded in image files,
//! without re-encoding the image data.
//!
//! ## Features
//!
//! - **Three namespaces**: Exif tags keyed by IFD and tag number, IPTC
//!   datasets with repeatable values, XMP properties with text, array and
//!   language-alternative values
//! - **Live tags**: tags obtained from an image write straight into its
//!   metadata; detached tags can be attached to any image later
//! - **Formats**: JPEG read and write, TIFF read
//! - **Thumbnails and previews**: extraction and replacement of the Exif
//!   thumbnail, listing of embedded previews
//!
//! ## Architecture
//!
//! - [`mod@format`] - the codec: JPEG segments, TIFF/Exif IFDs, IPTC-IIM, XMP packets
//! - [`exif`], [`iptc`], [`xmp`] - keys, values, static tag tables and tag handles
//! - [`container`] - ordered per-namespace entry storage shared by images and tags
//! - [`image`] - opened images and the metadata-read state
//! - [`io`] - byte sources and whole-content transfer
//! - [`config`] - limits and write options
//! - [`lock`] - suspension of a caller-held execution lock around codec work
//!
//! ## Example
//!
//! ```rust,no_run
//! use imgmeta::{Image, IptcTag};
//!
//! let mut image = Image::open("photo.jpg")?;
//! image.read_metadata()?;
//!
//! let mut make = image.exif_tag("Exif.Image.Make")?;
//! println!("{} = {}", make.name(), make.raw_value());
//! make.set_raw_value("Acme")?;
//!
//! let mut keywords = IptcTag::new("Iptc.Application2.Keywords")?;
//! keywords.set_raw_values(&["beach", "sunset"])?;
//! keywords.set_parent_image(&image)?;
//!
//! image.write_metadata()?;
//! # Ok::<(), imgmeta::MetadataError>(())
//! ```

mod binding;
pub mod config;
pub mod container;
pub mod error;
pub mod exif;
pub mod format;
pub mod image;
pub mod io;
pub mod iptc;
pub mod lock;
pub mod preview;
pub mod xmp;

// Re-export commonly used types
pub use config::Config;
pub use container::{Datum, SharedContainer, TagContainer};
pub use error::{CodecError, ConfigError, ErrorCode, MetadataError, Result, TiffError};
pub use exif::{ExifDatum, ExifGroup, ExifKey, ExifTag, ExifThumbnail, ExifValue};
pub use format::tiff::ByteOrder;
pub use format::ImageFormat;
pub use image::{Image, OpenOptions};
pub use iptc::{IptcDatum, IptcDate, IptcKey, IptcTag, IptcTime, IptcValue};
pub use lock::{ExecutionLock, NoLock, SuspendGuard};
pub use preview::Preview;
pub use xmp::{
    initialize, is_initialized, namespace_prefix, namespace_uri, register_namespace, shutdown,
    unregister_all_namespaces, unregister_namespace, ArrayKind, GpsCoordinate, GpsDirection,
    XmpBasicType, XmpDate, XmpDatum, XmpKey, XmpTag, XmpTime, XmpTypedValue, XmpValue,
    XmpValueType,
};
