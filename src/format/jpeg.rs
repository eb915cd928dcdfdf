//! JPEG segment structure.
//!
//! Metadata lives in marker segments ahead of the first scan:
//!
//! - APP1 `Exif\0\0`: a TIFF structure holding Exif
//! - APP1 `http://ns.adobe.com/xap/1.0/\0`: the XMP packet
//! - APP13 `Photoshop 3.0\0`: image resources, one of which holds IPTC-IIM
//! - COM: the image comment
//!
//! Everything from the first SOS marker onwards is kept verbatim.

use bytes::Bytes;
use tracing::{debug, trace};

use crate::error::{CodecError, ErrorCode};

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image marker
pub const EOI: u8 = 0xD9;

/// Start Of Scan marker
pub const SOS: u8 = 0xDA;

/// Application segment 0 (JFIF) marker
pub const APP0: u8 = 0xE0;

/// Application segment 1 (Exif, XMP) marker
pub const APP1: u8 = 0xE1;

/// Application segment 13 (Photoshop) marker
pub const APP13: u8 = 0xED;

/// Comment marker
pub const COM: u8 = 0xFE;

pub const EXIF_ID: &[u8] = b"Exif\0\0";
pub const XMP_ID: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";
pub const PHOTOSHOP_ID: &[u8] = b"Photoshop 3.0\0";

/// Largest payload one segment can carry: the length field counts itself.
pub const MAX_SEGMENT_PAYLOAD: usize = 0xFFFF - 2;

/// Markers without a length field.
fn is_standalone(marker: u8) -> bool {
    marker == 0x01 || (0xD0..=0xD7).contains(&marker)
}

/// Start Of Frame markers, which carry the image dimensions.
pub fn is_sof(marker: u8) -> bool {
    (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC)
}

// =============================================================================
// Structure
// =============================================================================

/// One marker segment, without its marker and length bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub marker: u8,
    pub data: Bytes,
}

impl Segment {
    /// Build a segment, checking that the payload fits.
    ///
    /// # Errors
    /// `TooLargeJpegSegment` if the payload exceeds [`MAX_SEGMENT_PAYLOAD`].
    pub fn new(marker: u8, data: impl Into<Bytes>) -> Result<Self, CodecError> {
        let data = data.into();
        if data.len() > MAX_SEGMENT_PAYLOAD {
            return Err(CodecError::new(
                ErrorCode::TooLargeJpegSegment,
                format!(
                    "segment 0x{marker:02X} payload of {} bytes exceeds {MAX_SEGMENT_PAYLOAD}",
                    data.len()
                ),
            ));
        }
        Ok(Self { marker, data })
    }

    pub fn has_id(&self, marker: u8, id: &[u8]) -> bool {
        self.marker == marker && self.data.starts_with(id)
    }

    pub fn is_exif(&self) -> bool {
        self.has_id(APP1, EXIF_ID)
    }

    pub fn is_xmp(&self) -> bool {
        self.has_id(APP1, XMP_ID)
    }

    pub fn is_photoshop(&self) -> bool {
        self.has_id(APP13, PHOTOSHOP_ID)
    }

    /// Width and height from a Start Of Frame segment.
    pub fn frame_dimensions(&self) -> Option<(u32, u32)> {
        if !is_sof(self.marker) || self.data.len() < 5 {
            return None;
        }
        let height = u16::from_be_bytes([self.data[1], self.data[2]]) as u32;
        let width = u16::from_be_bytes([self.data[3], self.data[4]]) as u32;
        Some((width, height))
    }
}

/// A JPEG split into header segments and the rest of the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JpegStructure {
    pub segments: Vec<Segment>,
    /// Bytes from the first SOS (or EOI) marker to the end
    pub scan: Bytes,
}

impl JpegStructure {
    /// Split a JPEG stream into segments.
    ///
    /// # Errors
    /// - `NotAJpeg` if the data does not start with SOI
    /// - `CorruptedMetadata` if a segment runs past the end of the data
    pub fn parse(data: &Bytes) -> Result<Self, CodecError> {
        if !data.starts_with(&SOI) {
            return Err(CodecError::new(ErrorCode::NotAJpeg, "missing SOI marker"));
        }

        let mut segments = Vec::new();
        let mut pos = 2;
        loop {
            if pos >= data.len() {
                debug!("JPEG stream ends without a scan");
                return Ok(Self {
                    segments,
                    scan: Bytes::new(),
                });
            }
            if data[pos] != 0xFF {
                return Err(CodecError::new(
                    ErrorCode::CorruptedMetadata,
                    format!("expected a marker at offset {pos}"),
                ));
            }
            // Fill bytes
            while pos + 1 < data.len() && data[pos + 1] == 0xFF {
                pos += 1;
            }
            let marker_start = pos;
            let Some(&marker) = data.get(pos + 1) else {
                return Err(CodecError::new(
                    ErrorCode::CorruptedMetadata,
                    "truncated marker",
                ));
            };
            pos += 2;

            if marker == SOS || marker == EOI {
                trace!(segments = segments.len(), "reached JPEG scan");
                return Ok(Self {
                    segments,
                    scan: data.slice(marker_start..),
                });
            }
            if is_standalone(marker) {
                segments.push(Segment {
                    marker,
                    data: Bytes::new(),
                });
                continue;
            }

            let Some(length_bytes) = data.get(pos..pos + 2) else {
                return Err(truncated(marker));
            };
            let length = u16::from_be_bytes([length_bytes[0], length_bytes[1]]) as usize;
            if length < 2 || pos + length > data.len() {
                return Err(truncated(marker));
            }
            segments.push(Segment {
                marker,
                data: data.slice(pos + 2..pos + length),
            });
            pos += length;
        }
    }

    /// Image dimensions from the first Start Of Frame segment.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.segments.iter().find_map(Segment::frame_dimensions)
    }

    pub fn serialize(&self) -> Vec<u8> {
        let header: usize = self.segments.iter().map(|s| s.data.len() + 4).sum();
        let mut out = Vec::with_capacity(2 + header + self.scan.len());
        out.extend_from_slice(&SOI);
        for segment in &self.segments {
            out.push(0xFF);
            out.push(segment.marker);
            if is_standalone(segment.marker) {
                continue;
            }
            out.extend_from_slice(&((segment.data.len() + 2) as u16).to_be_bytes());
            out.extend_from_slice(&segment.data);
        }
        out.extend_from_slice(&self.scan);
        out
    }
}

fn truncated(marker: u8) -> CodecError {
    CodecError::new(
        ErrorCode::CorruptedMetadata,
        format!("segment 0x{marker:02X} runs past the end of the data"),
    )
}

// =============================================================================
// Metadata blocks
// =============================================================================

/// Raw metadata blocks found in a JPEG.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JpegBlocks {
    /// TIFF structure following `Exif\0\0`
    pub exif: Option<Bytes>,
    /// XMP packet
    pub xmp: Option<Bytes>,
    /// Photoshop image resources, concatenated across APP13 segments
    pub photoshop: Option<Bytes>,
    pub comment: Option<Bytes>,
    pub dimensions: Option<(u32, u32)>,
}

impl JpegStructure {
    pub fn blocks(&self) -> JpegBlocks {
        let mut blocks = JpegBlocks {
            dimensions: self.dimensions(),
            ..JpegBlocks::default()
        };
        let mut photoshop: Vec<u8> = Vec::new();

        for segment in &self.segments {
            if segment.is_exif() && blocks.exif.is_none() {
                blocks.exif = Some(segment.data.slice(EXIF_ID.len()..));
            } else if segment.is_xmp() && blocks.xmp.is_none() {
                blocks.xmp = Some(segment.data.slice(XMP_ID.len()..));
            } else if segment.is_photoshop() {
                photoshop.extend_from_slice(&segment.data[PHOTOSHOP_ID.len()..]);
            } else if segment.marker == COM && blocks.comment.is_none() {
                blocks.comment = Some(segment.data.clone());
            }
        }
        if !photoshop.is_empty() {
            blocks.photoshop = Some(Bytes::from(photoshop));
        }
        blocks
    }

    /// Replace the metadata segments, keeping every other segment.
    ///
    /// Leading APP0 segments stay first; then come Exif, XMP, Photoshop and
    /// the comment, followed by the remaining segments in their original order.
    /// `None` blocks are removed.
    pub fn with_blocks(
        &self,
        exif: Option<&[u8]>,
        xmp: Option<&[u8]>,
        photoshop: Option<&[u8]>,
        comment: Option<&[u8]>,
    ) -> Result<Self, CodecError> {
        let is_metadata = |s: &Segment| {
            s.is_exif() || s.is_xmp() || s.is_photoshop() || s.marker == COM
        };
        let leading = self
            .segments
            .iter()
            .take_while(|s| s.marker == APP0)
            .count();

        let mut segments: Vec<Segment> = self.segments[..leading].to_vec();
        if let Some(exif) = exif {
            segments.push(Segment::new(APP1, [EXIF_ID, exif].concat())?);
        }
        if let Some(xmp) = xmp {
            segments.push(Segment::new(APP1, [XMP_ID, xmp].concat())?);
        }
        if let Some(photoshop) = photoshop {
            let room = MAX_SEGMENT_PAYLOAD - PHOTOSHOP_ID.len();
            for chunk in photoshop.chunks(room) {
                segments.push(Segment::new(APP13, [PHOTOSHOP_ID, chunk].concat())?);
            }
        }
        if let Some(comment) = comment {
            segments.push(Segment::new(COM, comment.to_vec())?);
        }
        segments.extend(
            self.segments[leading..]
                .iter()
                .filter(|s| !is_metadata(s))
                .cloned(),
        );

        Ok(Self {
            segments,
            scan: self.scan.clone(),
        })
    }
}
