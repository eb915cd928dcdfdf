//! Opened image data and the read/write entry points of the codec.

use std::sync::{Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use tracing::{debug, warn};

use super::detect::{detect_format, ImageFormat, MAGIC_LEN};
use super::exif::{parse_exif, previews, serialize_exif, ExifOrigin};
use super::iptc::{iptc_from_resources, parse_iim, parse_resources, serialize_iim, update_resources};
use super::jpeg::JpegStructure;
use super::xmp::{parse_packet, serialize_packet};
use super::decode_text;
use crate::config::Config;
use crate::error::{CodecError, ErrorCode};
use crate::exif::ExifDatum;
use crate::format::tiff::ByteOrder;
use crate::io::{read_all, ByteSource, PreserveReadState};
use crate::iptc::IptcDatum;
use crate::xmp::XmpDatum;

/// Everything `read` finds in an image.
#[derive(Debug, Clone, Default)]
pub struct ParsedMetadata {
    pub exif: Vec<ExifDatum>,
    /// Byte order of the Exif block, if there is one
    pub byte_order: Option<ByteOrder>,
    pub iptc: Vec<IptcDatum>,
    pub xmp: Vec<XmpDatum>,
    pub comment: Option<String>,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

/// Metadata to write back.
#[derive(Debug, Clone, Copy)]
pub struct MetadataUpdate<'a> {
    pub exif: &'a [ExifDatum],
    pub byte_order: ByteOrder,
    pub iptc: &'a [IptcDatum],
    pub xmp: &'a [XmpDatum],
    /// `None` or empty removes the comment
    pub comment: Option<&'a str>,
}

/// An embedded image, copied out of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub mime_type: &'static str,
    /// Extension including the leading dot
    pub extension: &'static str,
    pub width: u32,
    pub height: u32,
    pub data: Bytes,
}

/// An opened image.
///
/// The source stays closed between calls; every operation opens it, reads
/// what it needs and restores the state it was found in.
pub struct ImageHandle {
    source: Mutex<Box<dyn ByteSource>>,
    format: ImageFormat,
    config: Config,
}

impl std::fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageHandle")
            .field("source", &self.identifier())
            .field("format", &self.format)
            .finish()
    }
}

impl ImageHandle {
    /// Wrap a source, detecting its format.
    ///
    /// # Errors
    /// - `DataSourceOpenFailed` if the source cannot be opened
    /// - `NotAnImage` if the data is no supported image
    pub fn open(mut source: Box<dyn ByteSource>, config: Config) -> Result<Self, CodecError> {
        let mut magic = [0u8; MAGIC_LEN];
        let mut filled = 0;
        {
            let mut guard = PreserveReadState::new(source.as_mut())?;
            while filled < magic.len() {
                let read = guard.source().read(&mut magic[filled..])?;
                if read == 0 {
                    break;
                }
                filled += read;
            }
        }
        let format = detect_format(&magic[..filled])?;
        debug!(source = source.identifier(), format = format.name(), "opened image");

        Ok(Self {
            source: Mutex::new(source),
            format,
            config,
        })
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the file, or `memory://`.
    pub fn identifier(&self) -> String {
        self.source().identifier().to_string()
    }

    fn source(&self) -> MutexGuard<'_, Box<dyn ByteSource>> {
        self.source.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current content of the source.
    ///
    /// # Errors
    /// `MallocFailed` if the source exceeds the configured buffer size.
    pub fn raw_bytes(&self) -> Result<Bytes, CodecError> {
        let mut source = self.source();
        read_all(source.as_mut(), self.config.max_buffer_size)
    }

    /// Parse every metadata block.
    pub fn read(&self) -> Result<ParsedMetadata, CodecError> {
        let data = self.raw_bytes()?;
        let parsed = match self.format {
            ImageFormat::Jpeg => self.read_jpeg(&data)?,
            ImageFormat::Tiff => self.read_tiff(&data)?,
        };
        debug!(
            exif = parsed.exif.len(),
            iptc = parsed.iptc.len(),
            xmp = parsed.xmp.len(),
            width = parsed.pixel_width,
            height = parsed.pixel_height,
            "read metadata"
        );
        Ok(parsed)
    }

    fn read_jpeg(&self, data: &Bytes) -> Result<ParsedMetadata, CodecError> {
        let blocks = JpegStructure::parse(data)?.blocks();
        let mut parsed = ParsedMetadata::default();

        if let Some(exif) = &blocks.exif {
            let block = parse_exif(exif, ExifOrigin::JpegSegment)?;
            parsed.exif = block.datums;
            parsed.byte_order = Some(block.byte_order);
        }
        if let Some(packet) = &blocks.xmp {
            parsed.xmp = parse_packet(packet, self.config.auto_register_namespaces)?;
        }
        if let Some(photoshop) = &blocks.photoshop {
            match parse_resources(photoshop) {
                Ok(resources) => {
                    if let Some(iim) = iptc_from_resources(&resources) {
                        parsed.iptc = parse_iim(&iim);
                    }
                }
                Err(e) => warn!(error = %e, "ignoring unreadable Photoshop resources"),
            }
        }
        parsed.comment = blocks
            .comment
            .as_deref()
            .map(|c| decode_text(c).trim_end_matches('\0').to_string());
        if let Some((width, height)) = blocks.dimensions {
            parsed.pixel_width = width;
            parsed.pixel_height = height;
        }
        Ok(parsed)
    }

    fn read_tiff(&self, data: &Bytes) -> Result<ParsedMetadata, CodecError> {
        let block = parse_exif(data, ExifOrigin::TiffFile)?;
        let mut parsed = ParsedMetadata {
            exif: block.datums,
            byte_order: Some(block.byte_order),
            ..ParsedMetadata::default()
        };
        if let Some(iim) = &block.iptc {
            parsed.iptc = parse_iim(iim);
        }
        if let Some(packet) = &block.xmp {
            parsed.xmp = parse_packet(packet, self.config.auto_register_namespaces)?;
        }
        if let Some((width, height)) = block.dimensions {
            parsed.pixel_width = width;
            parsed.pixel_height = height;
        }
        Ok(parsed)
    }

    /// Serialize metadata and replace the content of the source.
    ///
    /// # Errors
    /// - `WritingImageFormatUnsupported` for formats other than JPEG
    /// - `TooLargeJpegSegment` if a block does not fit a segment
    /// - `MallocFailed` if the result exceeds the configured buffer size
    /// - `ImageWriteFailed` if the source cannot be replaced
    pub fn write(&self, update: &MetadataUpdate<'_>) -> Result<(), CodecError> {
        if !self.format.supports_writing() {
            return Err(CodecError::new(
                ErrorCode::WritingImageFormatUnsupported,
                format!("writing {} metadata is not supported", self.format.name()),
            ));
        }

        let data = self.raw_bytes()?;
        let structure = JpegStructure::parse(&data)?;
        let blocks = structure.blocks();

        let exif = serialize_exif(update.exif, update.byte_order)?;
        let xmp = serialize_packet(update.xmp, self.config.xmp_padding)?;
        let iim = serialize_iim(update.iptc, self.config.write_utf8_charset);
        let photoshop = update_resources(blocks.photoshop.as_ref(), iim.as_deref())?;
        let comment = update.comment.filter(|c| !c.is_empty()).map(str::as_bytes);

        let output = structure
            .with_blocks(exif.as_deref(), xmp.as_deref(), photoshop.as_deref(), comment)?
            .serialize();
        if output.len() as u64 > self.config.max_buffer_size {
            return Err(CodecError::new(
                ErrorCode::MallocFailed,
                format!(
                    "rewritten image is {} bytes, limit is {}",
                    output.len(),
                    self.config.max_buffer_size
                ),
            ));
        }

        let mut source = self.source();
        source.replace(&output).map_err(|e| {
            CodecError::new(
                ErrorCode::ImageWriteFailed,
                format!("{}: {e}", source.identifier()),
            )
        })?;
        debug!(source = source.identifier(), bytes = output.len(), "wrote metadata");
        Ok(())
    }

    /// Embedded images, smallest first.
    pub fn previews(&self) -> Result<Vec<PreviewImage>, CodecError> {
        let data = self.raw_bytes()?;
        match self.format {
            ImageFormat::Jpeg => match JpegStructure::parse(&data)?.blocks().exif {
                Some(exif) => previews(&exif),
                None => Ok(Vec::new()),
            },
            ImageFormat::Tiff => previews(&data),
        }
    }
}
