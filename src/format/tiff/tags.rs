//! Numeric vocabulary shared by the IFD parser and writer.
//!
//! Field types fix the element width of an entry; structural tags are the
//! pointers and carriers the codec resolves itself instead of exposing them
//! as metadata entries.

// =============================================================================
// Field types
// =============================================================================

/// Element type of an IFD entry.
///
/// Exif only defines types 1 to 12; the BigTIFF types are accepted when
/// reading TIFF files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum FieldType {
    /// u8
    Byte = 1,

    /// NUL-terminated text
    Ascii = 2,

    /// u16
    Short = 3,

    /// u32
    Long = 4,

    /// u32 numerator over u32 denominator
    Rational = 5,

    /// i8
    SByte = 6,

    /// Opaque bytes, interpreted per tag
    Undefined = 7,

    /// i16
    SShort = 8,

    /// i32
    SLong = 9,

    /// i32 numerator over i32 denominator
    SRational = 10,

    /// f32
    Float = 11,

    /// f64
    Double = 12,

    /// u32 directory offset
    Ifd = 13,

    /// u64, BigTIFF
    Long8 = 16,

    /// i64, BigTIFF
    SLong8 = 17,

    /// u64 directory offset, BigTIFF
    Ifd8 = 18,
}

impl FieldType {
    /// Width of one element.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float | FieldType::Ifd => 4,
            FieldType::Rational
            | FieldType::SRational
            | FieldType::Double
            | FieldType::Long8
            | FieldType::SLong8
            | FieldType::Ifd8 => 8,
        }
    }

    /// `None` for type codes outside the TIFF 6 and BigTIFF tables.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            6 => Some(FieldType::SByte),
            7 => Some(FieldType::Undefined),
            8 => Some(FieldType::SShort),
            9 => Some(FieldType::SLong),
            10 => Some(FieldType::SRational),
            11 => Some(FieldType::Float),
            12 => Some(FieldType::Double),
            13 => Some(FieldType::Ifd),
            16 => Some(FieldType::Long8),
            17 => Some(FieldType::SLong8),
            18 => Some(FieldType::Ifd8),
            _ => None,
        }
    }

    /// Numeric value written in IFD entries.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Bytes of value data held in the entry itself, classic layout.
    pub const INLINE_CLASSIC: u64 = 4;

    /// Bytes of value data held in the entry itself, BigTIFF layout.
    pub const INLINE_BIG: u64 = 8;

    /// Whether `count` elements live in the entry instead of at an offset.
    #[inline]
    pub fn fits_inline(self, count: u64, is_bigtiff: bool) -> bool {
        let limit = if is_bigtiff {
            Self::INLINE_BIG
        } else {
            Self::INLINE_CLASSIC
        };
        (self.size_in_bytes() as u64).saturating_mul(count) <= limit
    }
}

// =============================================================================
// Structural Tags
// =============================================================================

/// Tags the codec interprets itself.
///
/// Pointer and carrier tags are never exposed as metadata entries: their
/// values are offsets into the block being parsed, so they are regenerated
/// on every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TiffTag {
    /// Pixel columns
    ImageWidth = 256,

    /// Pixel rows
    ImageLength = 257,

    /// Codec of the image data
    Compression = 259,

    /// Byte offsets of strips
    StripOffsets = 273,

    /// Byte counts of strips
    StripByteCounts = 279,

    /// Offsets of child IFDs (preview images in raw files)
    SubIfds = 330,

    /// Offset of an embedded JPEG stream
    JpegInterchangeFormat = 513,

    /// Length of the embedded JPEG stream
    JpegInterchangeFormatLength = 514,

    /// XMP packet carried in a TIFF file
    XmlPacket = 700,

    /// IPTC-NAA records carried in a TIFF file
    IptcNaa = 33723,

    /// Offset of the Exif sub-IFD
    ExifIfd = 34665,

    /// Offset of the GPS sub-IFD
    GpsIfd = 34853,

    /// Offset of the Interoperability sub-IFD
    InteropIfd = 40965,
}

impl TiffTag {
    /// `None` for tags that carry ordinary metadata.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            256 => Some(TiffTag::ImageWidth),
            257 => Some(TiffTag::ImageLength),
            259 => Some(TiffTag::Compression),
            273 => Some(TiffTag::StripOffsets),
            279 => Some(TiffTag::StripByteCounts),
            330 => Some(TiffTag::SubIfds),
            513 => Some(TiffTag::JpegInterchangeFormat),
            514 => Some(TiffTag::JpegInterchangeFormatLength),
            700 => Some(TiffTag::XmlPacket),
            33723 => Some(TiffTag::IptcNaa),
            34665 => Some(TiffTag::ExifIfd),
            34853 => Some(TiffTag::GpsIfd),
            40965 => Some(TiffTag::InteropIfd),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Whether the tag is hidden from the metadata containers.
    ///
    /// `SubIfds` is only hidden in TIFF files, which are never rewritten.
    #[inline]
    pub const fn is_structural(self) -> bool {
        matches!(
            self,
            TiffTag::ExifIfd
                | TiffTag::GpsIfd
                | TiffTag::InteropIfd
                | TiffTag::IptcNaa
                | TiffTag::XmlPacket
        )
    }
}

// =============================================================================
// Compression
// =============================================================================

/// Compression values relevant to embedded thumbnails and previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Compression {
    /// Uncompressed
    None = 1,

    /// "Old-style" JPEG, used by Exif thumbnails
    OldJpeg = 6,

    /// JPEG compression
    Jpeg = 7,
}

impl Compression {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Compression::None),
            6 => Some(Compression::OldJpeg),
            7 => Some(Compression::Jpeg),
            _ => None,
        }
    }

    /// Whether image data with this compression is a JPEG stream.
    #[inline]
    pub const fn is_jpeg(self) -> bool {
        matches!(self, Compression::OldJpeg | Compression::Jpeg)
    }
}

// =============================================================================
// Tests
// =============================================================================
