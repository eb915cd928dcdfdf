//! Format detection from magic bytes.
//!
//! Supported formats:
//!
//! - **JPEG**: `FF D8 FF`
//! - **TIFF**: `II*\0` (little-endian) or `MM\0*` (big-endian); read only

use crate::error::{CodecError, ErrorCode};

// =============================================================================
// ImageFormat
// =============================================================================

/// Detected container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Tiff,
}

impl ImageFormat {
    /// Get a human-readable name for the format.
    pub const fn name(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Tiff => "TIFF",
        }
    }

    pub const fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Tiff => "image/tiff",
        }
    }

    /// File extension including the leading dot.
    pub const fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => ".jpg",
            ImageFormat::Tiff => ".tif",
        }
    }

    pub const fn supports_writing(&self) -> bool {
        matches!(self, ImageFormat::Jpeg)
    }
}

/// Bytes needed to tell the formats apart.
pub const MAGIC_LEN: usize = 4;

/// Detect the format from the first bytes of the data.
///
/// # Errors
/// `NotAnImage` if the bytes match no supported format.
pub fn detect_format(magic: &[u8]) -> Result<ImageFormat, CodecError> {
    if is_jpeg_header(magic) {
        return Ok(ImageFormat::Jpeg);
    }
    if is_tiff_header(magic) {
        return Ok(ImageFormat::Tiff);
    }
    Err(CodecError::new(
        ErrorCode::NotAnImage,
        "data does not start with a known image signature",
    ))
}

pub fn is_jpeg_header(bytes: &[u8]) -> bool {
    bytes.len() >= 3 && bytes[0] == 0xFF && bytes[1] == 0xD8 && bytes[2] == 0xFF
}

/// Check if the bytes start with a classic TIFF header.
///
/// BigTIFF files are not metadata carriers this crate understands.
pub fn is_tiff_header(bytes: &[u8]) -> bool {
    if bytes.len() < 4 {
        return false;
    }
    matches!(
        (bytes[0], bytes[1], bytes[2], bytes[3]),
        (0x49, 0x49, 0x2A, 0x00) | (0x4D, 0x4D, 0x00, 0x2A)
    )
}
