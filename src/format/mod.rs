//! The image codec.
//!
//! Parses and serializes the metadata blocks of supported containers:
//!
//! - **JPEG**: Exif, XMP, Photoshop/IPTC and comment segments; read and write
//! - **TIFF**: IFD0 and its sub-directories, IPTC and XMP carrier tags; read only
//!
//! Use [`ImageHandle::open`] to wrap a byte source; the format is detected
//! from its magic bytes.

pub mod detect;
pub mod exif;
pub mod handle;
pub mod iptc;
pub mod jpeg;
pub mod tiff;
pub mod xmp;

pub use detect::{detect_format, is_jpeg_header, is_tiff_header, ImageFormat};
pub use handle::{ImageHandle, MetadataUpdate, ParsedMetadata, PreviewImage};

/// Decode stored text: UTF-8 when valid, Latin-1 otherwise.
pub(crate) fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text() {
        assert_eq!(decode_text("Zürich".as_bytes()), "Zürich");
        assert_eq!(decode_text(b"Z\xfcrich"), "Zürich");
        assert_eq!(decode_text(b""), "");
    }
}
