//! Exif blocks: TIFF directory trees holding Exif entries.
//!
//! # Layout
//!
//! ```text
//! header ─► IFD0 (Image) ─► IFD1 (Thumbnail) ─► JPEG thumbnail
//!            ├─ ExifTag ─► Exif IFD (Photo) ─ InteroperabilityTag ─► Iop IFD
//!            └─ GPSTag ──► GPS IFD (GPSInfo)
//! ```
//!
//! Pointer tags are never exposed as entries. On write, the tree is laid out
//! as header, IFD0, Exif, Iop, GPS, IFD1, then the thumbnail stream.

use std::collections::HashSet;

use bytes::Bytes;
use tracing::{debug, trace, warn};

use super::detect::is_jpeg_header;
use super::handle::PreviewImage;
use super::jpeg::JpegStructure;
use super::tiff::{
    ifd_size, write_header, write_ifd, ByteOrder, Compression, Ifd, RawEntry, TiffHeader,
    TiffTag, ValueReader, TIFF_HEADER_SIZE,
};
use crate::error::{CodecError, ErrorCode, TiffError};
use crate::exif::{ExifDatum, ExifGroup, ExifKey, ExifValue};

/// Directories visited before a chain is considered looping.
const MAX_IFDS: usize = 64;

/// Where a TIFF structure comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExifOrigin {
    /// APP1 segment of a JPEG
    JpegSegment,
    /// A whole TIFF file
    TiffFile,
}

/// Result of parsing a TIFF structure.
#[derive(Debug, Clone)]
pub struct ExifBlock {
    pub datums: Vec<ExifDatum>,
    pub byte_order: ByteOrder,
    /// IPTC-NAA bytes carried by IFD0
    pub iptc: Option<Bytes>,
    /// XMP packet carried by IFD0
    pub xmp: Option<Bytes>,
    /// Width and height declared by IFD0
    pub dimensions: Option<(u32, u32)>,
}

// =============================================================================
// Reading
// =============================================================================

struct Walker<'a> {
    data: &'a Bytes,
    header: TiffHeader,
    visited: HashSet<u64>,
}

impl<'a> Walker<'a> {
    fn new(data: &'a Bytes) -> Result<Self, CodecError> {
        let header = TiffHeader::parse(data, data.len() as u64)?;
        if header.is_bigtiff {
            return Err(CodecError::new(
                ErrorCode::CorruptedMetadata,
                "BigTIFF structures are not supported",
            ));
        }
        Ok(Self {
            data,
            header,
            visited: HashSet::new(),
        })
    }

    fn reader(&self) -> ValueReader<'_> {
        ValueReader::new(self.data, &self.header)
    }

    /// Read the directory at `offset`, refusing offsets already visited.
    fn ifd(&mut self, offset: u64) -> Result<Ifd, CodecError> {
        if self.visited.len() >= MAX_IFDS || !self.visited.insert(offset) {
            return Err(CodecError::new(
                ErrorCode::CorruptedMetadata,
                format!("directory loop at offset {offset}"),
            ));
        }
        Ok(Ifd::read_at(self.data, offset, &self.header)?)
    }

    /// Follow a pointer entry. Broken pointers are logged and ignored.
    fn sub_ifd(&mut self, parent: &Ifd, tag: TiffTag) -> Option<Ifd> {
        let entry = parent.find(tag.as_u16())?;
        let offset = match self.reader().read_u32(entry) {
            Ok(offset) => offset as u64,
            Err(e) => {
                warn!(tag = tag.as_u16(), error = %e, "unreadable directory pointer");
                return None;
            }
        };
        match self.ifd(offset) {
            Ok(ifd) => Some(ifd),
            Err(e) => {
                warn!(tag = tag.as_u16(), offset, error = %e, "skipping sub-directory");
                None
            }
        }
    }

    fn collect(&self, ifd: &Ifd, group: ExifGroup, origin: ExifOrigin, out: &mut Vec<ExifDatum>) {
        let reader = self.reader();
        for entry in &ifd.entries {
            if is_hidden(entry.tag, origin) {
                trace!(tag = entry.tag, "hiding structural tag");
                continue;
            }
            let Some(field_type) = entry.field_type else {
                warn!(
                    tag = entry.tag,
                    field_type = entry.field_type_raw,
                    "skipping entry of unknown type"
                );
                continue;
            };
            let key = ExifKey::new(group, entry.tag);
            let bytes = match reader.read_bytes(entry) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(key = %key, error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            match ExifValue::decode(field_type, key.value_type(), &bytes, reader.byte_order()) {
                Some(value) => out.push(ExifDatum::new(key, value)),
                None => warn!(key = %key, "skipping entry with undecodable value"),
            }
        }
    }

    fn u32_of(&self, ifd: &Ifd, tag: TiffTag) -> Option<u32> {
        self.reader().read_u32(ifd.find(tag.as_u16())?).ok()
    }

    fn dimensions(&self, ifd: &Ifd) -> Option<(u32, u32)> {
        Some((
            self.u32_of(ifd, TiffTag::ImageWidth)?,
            self.u32_of(ifd, TiffTag::ImageLength)?,
        ))
    }

    /// JPEG stream described by a directory, with its offset.
    ///
    /// Either the `JPEGInterchangeFormat` pair or a single JPEG-compressed
    /// strip.
    fn embedded_jpeg(&self, ifd: &Ifd) -> Option<(u64, Bytes)> {
        let reader = self.reader();
        let interchange = (
            self.u32_of(ifd, TiffTag::JpegInterchangeFormat),
            self.u32_of(ifd, TiffTag::JpegInterchangeFormatLength),
        );
        let (offset, length) = match interchange {
            (Some(offset), Some(length)) => (offset as u64, length as u64),
            _ => {
                let compression = self.u32_of(ifd, TiffTag::Compression)?;
                if !Compression::from_u16(compression as u16).map_or(false, Compression::is_jpeg) {
                    return None;
                }
                let offsets = reader
                    .read_u64_array(ifd.find(TiffTag::StripOffsets.as_u16())?)
                    .ok()?;
                let counts = reader
                    .read_u64_array(ifd.find(TiffTag::StripByteCounts.as_u16())?)
                    .ok()?;
                match (offsets.as_slice(), counts.as_slice()) {
                    ([offset], [count]) => (*offset, *count),
                    _ => return None,
                }
            }
        };

        let bytes = match reader.slice(TiffTag::JpegInterchangeFormat.as_u16(), offset, length) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "embedded image lies outside the block");
                return None;
            }
        };
        if !is_jpeg_header(bytes) {
            trace!(offset, "embedded image is not a JPEG stream");
            return None;
        }
        Some((offset, Bytes::copy_from_slice(bytes)))
    }
}

fn is_hidden(tag: u16, origin: ExifOrigin) -> bool {
    TiffTag::from_u16(tag).map_or(false, |t| {
        t.is_structural() || (origin == ExifOrigin::TiffFile && t == TiffTag::SubIfds)
    })
}

/// Parse a TIFF structure into Exif entries.
///
/// # Errors
/// `CorruptedMetadata` if the header or IFD0 is unreadable. Problems further
/// down the tree are logged and the affected entries skipped.
pub fn parse_exif(data: &Bytes, origin: ExifOrigin) -> Result<ExifBlock, CodecError> {
    let mut walker = Walker::new(data)?;
    let byte_order = walker.header.byte_order;
    let ifd0 = walker.ifd(walker.header.first_ifd_offset)?;

    let mut datums = Vec::new();
    walker.collect(&ifd0, ExifGroup::Image, origin, &mut datums);

    if let Some(photo) = walker.sub_ifd(&ifd0, TiffTag::ExifIfd) {
        walker.collect(&photo, ExifGroup::Photo, origin, &mut datums);
        if let Some(iop) = walker.sub_ifd(&photo, TiffTag::InteropIfd) {
            walker.collect(&iop, ExifGroup::Iop, origin, &mut datums);
        }
    }
    if let Some(gps) = walker.sub_ifd(&ifd0, TiffTag::GpsIfd) {
        walker.collect(&gps, ExifGroup::GpsInfo, origin, &mut datums);
    }

    if ifd0.next_ifd_offset != 0 {
        match walker.ifd(ifd0.next_ifd_offset) {
            Ok(ifd1) => {
                walker.collect(&ifd1, ExifGroup::Thumbnail, origin, &mut datums);
                if let Some((_, stream)) = walker.embedded_jpeg(&ifd1) {
                    let key = ExifKey::new(
                        ExifGroup::Thumbnail,
                        TiffTag::JpegInterchangeFormat.as_u16(),
                    );
                    if let Some(datum) = datums.iter_mut().find(|d| d.key == key) {
                        datum.data_area = Some(stream);
                    }
                }
            }
            Err(e) => warn!(error = %e, "skipping IFD1"),
        }
    }

    let carrier = |tag: TiffTag| {
        let entry = ifd0.find(tag.as_u16())?;
        walker.reader().read_bytes(entry).ok()
    };
    let iptc = carrier(TiffTag::IptcNaa);
    let xmp = carrier(TiffTag::XmlPacket);
    let dimensions = walker.dimensions(&ifd0);

    debug!(entries = datums.len(), %byte_order, "parsed Exif block");
    Ok(ExifBlock {
        datums,
        byte_order,
        iptc,
        xmp,
        dimensions,
    })
}

/// Embedded JPEG images of a TIFF structure, smallest first.
///
/// Looks at IFD0's sub-directories and every directory chained after IFD0.
pub fn previews(data: &Bytes) -> Result<Vec<PreviewImage>, CodecError> {
    let mut walker = Walker::new(data)?;
    let ifd0 = walker.ifd(walker.header.first_ifd_offset)?;

    let mut candidates = Vec::new();
    if let Some(entry) = ifd0.find(TiffTag::SubIfds.as_u16()) {
        let offsets = walker.reader().read_u64_array(entry).unwrap_or_default();
        for offset in offsets {
            match walker.ifd(offset) {
                Ok(ifd) => candidates.push(ifd),
                Err(e) => warn!(offset, error = %e, "skipping sub-image directory"),
            }
        }
    }
    let mut next = ifd0.next_ifd_offset;
    while next != 0 {
        match walker.ifd(next) {
            Ok(ifd) => {
                next = ifd.next_ifd_offset;
                candidates.push(ifd);
            }
            Err(e) => {
                warn!(offset = next, error = %e, "directory chain ends early");
                break;
            }
        }
    }

    let mut seen = HashSet::new();
    let mut previews = Vec::new();
    for ifd in &candidates {
        let Some((offset, data)) = walker.embedded_jpeg(ifd) else {
            continue;
        };
        if !seen.insert((offset, data.len())) {
            continue;
        }
        let (width, height) = walker
            .dimensions(ifd)
            .or_else(|| JpegStructure::parse(&data).ok()?.dimensions())
            .unwrap_or((0, 0));
        previews.push(PreviewImage {
            mime_type: "image/jpeg",
            extension: ".jpg",
            width,
            height,
            data,
        });
    }
    previews.sort_by_key(|p| p.data.len());
    debug!(count = previews.len(), "found embedded previews");
    Ok(previews)
}

// =============================================================================
// Writing
// =============================================================================

/// Serialize entries into a TIFF structure for an APP1 segment.
///
/// Returns `None` when no entry holds a value. The thumbnail stream is taken
/// from the data area of `Exif.Thumbnail.JPEGInterchangeFormat`; its offset
/// and length entries are regenerated.
pub fn serialize_exif(
    datums: &[ExifDatum],
    byte_order: ByteOrder,
) -> Result<Option<Vec<u8>>, CodecError> {
    let bo = byte_order;
    let interchange = TiffTag::JpegInterchangeFormat.as_u16();
    let interchange_length = TiffTag::JpegInterchangeFormatLength.as_u16();

    let mut image = Vec::new();
    let mut photo = Vec::new();
    let mut gps = Vec::new();
    let mut iop = Vec::new();
    let mut thumbnail = Vec::new();
    let mut thumbnail_data: Option<Bytes> = None;

    for datum in datums {
        let Some(value) = &datum.value else {
            debug!(key = %datum.key, "skipping entry without value");
            continue;
        };
        let tag = datum.key.tag();
        if TiffTag::from_u16(tag).map_or(false, TiffTag::is_structural) {
            debug!(key = %datum.key, "skipping structural tag");
            continue;
        }
        if datum.key.group() == ExifGroup::Thumbnail {
            if tag == interchange_length {
                continue;
            }
            if tag == interchange {
                match &datum.data_area {
                    Some(stream) => thumbnail_data = Some(stream.clone()),
                    None => warn!(key = %datum.key, "thumbnail offset without data, dropped"),
                }
                continue;
            }
        }

        let (field_type, count, data) = value.encode(bo);
        let entry = RawEntry {
            tag,
            field_type,
            count,
            data,
        };
        match datum.key.group() {
            ExifGroup::Image => image.push(entry),
            ExifGroup::Photo => photo.push(entry),
            ExifGroup::GpsInfo => gps.push(entry),
            ExifGroup::Iop => iop.push(entry),
            ExifGroup::Thumbnail => thumbnail.push(entry),
        }
    }

    if let Some(stream) = &thumbnail_data {
        let length = u32::try_from(stream.len()).map_err(|_| TiffError::TooLarge(stream.len()))?;
        thumbnail.push(RawEntry::long(interchange, 0, bo));
        thumbnail.push(RawEntry::long(interchange_length, length, bo));
    }
    if [&image, &photo, &gps, &iop, &thumbnail]
        .iter()
        .all(|entries| entries.is_empty())
    {
        return Ok(None);
    }

    // Pointers are single Longs, so directory sizes are final before patching.
    if !iop.is_empty() {
        photo.push(RawEntry::long(TiffTag::InteropIfd.as_u16(), 0, bo));
    }
    if !photo.is_empty() {
        image.push(RawEntry::long(TiffTag::ExifIfd.as_u16(), 0, bo));
    }
    if !gps.is_empty() {
        image.push(RawEntry::long(TiffTag::GpsIfd.as_u16(), 0, bo));
    }

    let photo_offset = TIFF_HEADER_SIZE + ifd_size(&image);
    let iop_offset = photo_offset + size_of(&photo);
    let gps_offset = iop_offset + size_of(&iop);
    let ifd1_offset = gps_offset + size_of(&gps);
    let stream_offset = ifd1_offset + size_of(&thumbnail);
    let total = stream_offset + thumbnail_data.as_ref().map_or(0, Bytes::len);
    if u32::try_from(total).is_err() {
        return Err(TiffError::TooLarge(total).into());
    }

    patch(&mut image, TiffTag::ExifIfd.as_u16(), photo_offset, bo);
    patch(&mut image, TiffTag::GpsIfd.as_u16(), gps_offset, bo);
    patch(&mut photo, TiffTag::InteropIfd.as_u16(), iop_offset, bo);
    patch(&mut thumbnail, interchange, stream_offset, bo);

    let mut out = Vec::with_capacity(total);
    write_header(&mut out, bo);
    let next = if thumbnail.is_empty() { 0 } else { ifd1_offset as u32 };
    write_ifd(&mut out, &image, next, bo)?;
    for entries in [&photo, &iop, &gps, &thumbnail] {
        if !entries.is_empty() {
            write_ifd(&mut out, entries, 0, bo)?;
        }
    }
    if let Some(stream) = &thumbnail_data {
        out.extend_from_slice(stream);
    }

    debug!(bytes = out.len(), "serialized Exif block");
    Ok(Some(out))
}

fn size_of(entries: &[RawEntry]) -> usize {
    if entries.is_empty() {
        0
    } else {
        ifd_size(entries)
    }
}

fn patch(entries: &mut [RawEntry], tag: u16, offset: usize, byte_order: ByteOrder) {
    if let Some(entry) = entries.iter_mut().find(|e| e.tag == tag) {
        *entry = RawEntry::long(tag, offset as u32, byte_order);
    }
}
