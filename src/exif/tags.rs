//! Static Exif tag tables.
//!
//! IFD0 and IFD1 (`Image` and `Thumbnail` groups) share one table; the Exif,
//! GPS and Interoperability sub-IFDs each have their own.

use super::value::ExifType;

/// Section a tag is documented under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    ImageStructure,
    RecordingOffset,
    ImageCharacteristics,
    OtherTags,
    ExifFormat,
    ExifVersion,
    ImageConfig,
    UserInfo,
    RelatedFile,
    DateTime,
    CaptureConditions,
    Gps,
    Interoperability,
    Unknown,
}

impl Section {
    pub const fn name(self) -> &'static str {
        match self {
            Section::ImageStructure => "ImageStructure",
            Section::RecordingOffset => "RecordingOffset",
            Section::ImageCharacteristics => "ImageCharacteristics",
            Section::OtherTags => "OtherTags",
            Section::ExifFormat => "ExifFormat",
            Section::ExifVersion => "ExifVersion",
            Section::ImageConfig => "ImageConfig",
            Section::UserInfo => "UserInfo",
            Section::RelatedFile => "RelatedFile",
            Section::DateTime => "DateTime",
            Section::CaptureConditions => "CaptureConditions",
            Section::Gps => "GPS",
            Section::Interoperability => "Interoperability",
            Section::Unknown => "Unknown",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Section::ImageStructure => "Image data structure",
            Section::RecordingOffset => "Recording offset",
            Section::ImageCharacteristics => "Image data characteristics",
            Section::OtherTags => "Other data",
            Section::ExifFormat => "Exif data structure",
            Section::ExifVersion => "Exif version",
            Section::ImageConfig => "Image configuration",
            Section::UserInfo => "User information",
            Section::RelatedFile => "Related file",
            Section::DateTime => "Date and time",
            Section::CaptureConditions => "Picture taking conditions",
            Section::Gps => "GPS information",
            Section::Interoperability => "Interoperability information",
            Section::Unknown => "Unknown section",
        }
    }
}

/// How `human_value()` renders a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Printer {
    /// The raw value
    Value,
    /// Lookup of a single integer
    Enum(&'static [(i64, &'static str)]),
    ExposureTime,
    FNumber,
    FocalLength,
    /// Four ASCII digits such as `0230`
    Version,
    /// Comment text without its charset
    Comment,
    /// Degrees, minutes and seconds
    GpsCoordinate,
    /// UCS-2 little-endian bytes (Windows XP tags)
    XpString,
}

/// Static description of one tag.
#[derive(Debug, Clone, Copy)]
pub struct TagInfo {
    pub tag: u16,
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub section: Section,
    pub value_type: ExifType,
    pub printer: Printer,
}

const fn tag(
    tag: u16,
    name: &'static str,
    label: &'static str,
    section: Section,
    value_type: ExifType,
    printer: Printer,
    description: &'static str,
) -> TagInfo {
    TagInfo {
        tag,
        name,
        label,
        description,
        section,
        value_type,
        printer,
    }
}

/// Which table a group's tags come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Ifd0,
    Exif,
    Gps,
    Iop,
}

impl Table {
    pub fn tags(self) -> &'static [TagInfo] {
        match self {
            Table::Ifd0 => IFD0_TAGS,
            Table::Exif => EXIF_TAGS,
            Table::Gps => GPS_TAGS,
            Table::Iop => IOP_TAGS,
        }
    }

    pub fn by_tag(self, number: u16) -> Option<&'static TagInfo> {
        self.tags().iter().find(|info| info.tag == number)
    }

    pub fn by_name(self, name: &str) -> Option<&'static TagInfo> {
        self.tags().iter().find(|info| info.name == name)
    }
}

// =============================================================================
// Enumerations
// =============================================================================

const ORIENTATION: &[(i64, &str)] = &[
    (1, "top, left"),
    (2, "top, right"),
    (3, "bottom, right"),
    (4, "bottom, left"),
    (5, "left, top"),
    (6, "right, top"),
    (7, "right, bottom"),
    (8, "left, bottom"),
];

const RESOLUTION_UNIT: &[(i64, &str)] = &[(1, "none"), (2, "inch"), (3, "cm")];

const COMPRESSION: &[(i64, &str)] = &[
    (1, "Uncompressed"),
    (2, "CCITT RLE"),
    (5, "LZW"),
    (6, "JPEG"),
    (7, "JPEG"),
    (8, "Deflate/ZIP"),
    (32773, "PackBits"),
];

const PHOTOMETRIC: &[(i64, &str)] = &[
    (0, "White Is Zero"),
    (1, "Black Is Zero"),
    (2, "RGB"),
    (3, "RGB Palette"),
    (5, "CMYK"),
    (6, "YCbCr"),
];

const YCBCR_POSITIONING: &[(i64, &str)] = &[(1, "Centered"), (2, "Co-sited")];

const PLANAR_CONFIGURATION: &[(i64, &str)] = &[(1, "Chunky"), (2, "Planar")];

const EXPOSURE_PROGRAM: &[(i64, &str)] = &[
    (0, "Not defined"),
    (1, "Manual"),
    (2, "Auto"),
    (3, "Aperture priority"),
    (4, "Shutter priority"),
    (5, "Creative program"),
    (6, "Action program"),
    (7, "Portrait mode"),
    (8, "Landscape mode"),
];

const METERING_MODE: &[(i64, &str)] = &[
    (0, "Unknown"),
    (1, "Average"),
    (2, "Center weighted average"),
    (3, "Spot"),
    (4, "Multi-spot"),
    (5, "Multi-segment"),
    (6, "Partial"),
    (255, "Other"),
];

const LIGHT_SOURCE: &[(i64, &str)] = &[
    (0, "Unknown"),
    (1, "Daylight"),
    (2, "Fluorescent"),
    (3, "Tungsten (incandescent light)"),
    (4, "Flash"),
    (9, "Fine weather"),
    (10, "Cloudy weather"),
    (11, "Shade"),
    (17, "Standard light A"),
    (18, "Standard light B"),
    (19, "Standard light C"),
    (20, "D55"),
    (21, "D65"),
    (22, "D75"),
    (23, "D50"),
    (24, "ISO studio tungsten"),
    (255, "Other light source"),
];

const FLASH: &[(i64, &str)] = &[
    (0x00, "No flash"),
    (0x01, "Fired"),
    (0x05, "Fired, return light not detected"),
    (0x07, "Fired, return light detected"),
    (0x08, "Yes, did not fire"),
    (0x09, "Yes, compulsory"),
    (0x0d, "Yes, compulsory, return light not detected"),
    (0x0f, "Yes, compulsory, return light detected"),
    (0x10, "No, compulsory"),
    (0x18, "No, auto"),
    (0x19, "Yes, auto"),
    (0x1d, "Yes, auto, return light not detected"),
    (0x1f, "Yes, auto, return light detected"),
    (0x20, "No flash function"),
    (0x41, "Yes, red-eye reduction"),
    (0x59, "Yes, auto, red-eye reduction"),
];

const COLOR_SPACE: &[(i64, &str)] = &[(1, "sRGB"), (2, "Adobe RGB"), (0xffff, "Uncalibrated")];

const SENSING_METHOD: &[(i64, &str)] = &[
    (1, "Not defined"),
    (2, "One-chip color area"),
    (3, "Two-chip color area"),
    (4, "Three-chip color area"),
    (5, "Color sequential area"),
    (7, "Trilinear sensor"),
    (8, "Color sequential linear"),
];

const CUSTOM_RENDERED: &[(i64, &str)] = &[(0, "Normal process"), (1, "Custom process")];

const EXPOSURE_MODE: &[(i64, &str)] = &[(0, "Auto"), (1, "Manual"), (2, "Auto bracket")];

const WHITE_BALANCE: &[(i64, &str)] = &[(0, "Auto"), (1, "Manual")];

const SCENE_CAPTURE_TYPE: &[(i64, &str)] = &[
    (0, "Standard"),
    (1, "Landscape"),
    (2, "Portrait"),
    (3, "Night scene"),
];

const GAIN_CONTROL: &[(i64, &str)] = &[
    (0, "None"),
    (1, "Low gain up"),
    (2, "High gain up"),
    (3, "Low gain down"),
    (4, "High gain down"),
];

const CONTRAST: &[(i64, &str)] = &[(0, "Normal"), (1, "Soft"), (2, "Hard")];

const SATURATION: &[(i64, &str)] = &[(0, "Normal"), (1, "Low"), (2, "High")];

const SUBJECT_DISTANCE_RANGE: &[(i64, &str)] = &[
    (0, "Unknown"),
    (1, "Macro"),
    (2, "Close view"),
    (3, "Distant view"),
];

const GPS_ALTITUDE_REF: &[(i64, &str)] = &[(0, "Above sea level"), (1, "Below sea level")];

const GPS_DIFFERENTIAL: &[(i64, &str)] = &[
    (0, "Without correction"),
    (1, "Correction applied"),
];

// =============================================================================
// IFD0 / IFD1
// =============================================================================

use ExifType as T;
use Printer as P;
use Section as S;

#[rustfmt::skip]
static IFD0_TAGS: &[TagInfo] = &[
    tag(0x00fe, "NewSubfileType", "New Subfile Type", S::ImageStructure, T::Long, P::Value,
        "A general indication of the kind of data contained in this subfile."),
    tag(0x0100, "ImageWidth", "Image Width", S::ImageStructure, T::Long, P::Value,
        "The number of columns of image data, equal to the number of pixels per row."),
    tag(0x0101, "ImageLength", "Image Length", S::ImageStructure, T::Long, P::Value,
        "The number of rows of image data."),
    tag(0x0102, "BitsPerSample", "Bits per Sample", S::ImageStructure, T::Short, P::Value,
        "The number of bits per image component."),
    tag(0x0103, "Compression", "Compression", S::ImageStructure, T::Short, P::Enum(COMPRESSION),
        "The compression scheme used for the image data."),
    tag(0x0106, "PhotometricInterpretation", "Photometric Interpretation", S::ImageStructure,
        T::Short, P::Enum(PHOTOMETRIC), "The pixel composition."),
    tag(0x010e, "ImageDescription", "Image Description", S::OtherTags, T::Ascii, P::Value,
        "A character string giving the title of the image."),
    tag(0x010f, "Make", "Manufacturer", S::OtherTags, T::Ascii, P::Value,
        "The manufacturer of the recording equipment."),
    tag(0x0110, "Model", "Model", S::OtherTags, T::Ascii, P::Value,
        "The model name or model number of the equipment."),
    tag(0x0111, "StripOffsets", "Strip Offsets", S::RecordingOffset, T::Long, P::Value,
        "For each strip, the byte offset of that strip."),
    tag(0x0112, "Orientation", "Orientation", S::ImageStructure, T::Short, P::Enum(ORIENTATION),
        "The image orientation viewed in terms of rows and columns."),
    tag(0x0115, "SamplesPerPixel", "Samples per Pixel", S::ImageStructure, T::Short, P::Value,
        "The number of components per pixel."),
    tag(0x0116, "RowsPerStrip", "Rows per Strip", S::RecordingOffset, T::Long, P::Value,
        "The number of rows per strip."),
    tag(0x0117, "StripByteCounts", "Strip Byte Count", S::RecordingOffset, T::Long, P::Value,
        "The total number of bytes in each strip."),
    tag(0x011a, "XResolution", "X-Resolution", S::ImageStructure, T::Rational, P::Value,
        "The number of pixels per resolution unit in the image width direction."),
    tag(0x011b, "YResolution", "Y-Resolution", S::ImageStructure, T::Rational, P::Value,
        "The number of pixels per resolution unit in the image height direction."),
    tag(0x011c, "PlanarConfiguration", "Planar Configuration", S::ImageStructure, T::Short,
        P::Enum(PLANAR_CONFIGURATION), "Indicates whether pixel components are recorded in chunky or planar format."),
    tag(0x0128, "ResolutionUnit", "Resolution Unit", S::ImageStructure, T::Short,
        P::Enum(RESOLUTION_UNIT), "The unit for measuring the X and Y resolutions."),
    tag(0x012d, "TransferFunction", "Transfer Function", S::ImageCharacteristics, T::Short,
        P::Value, "A transfer function for the image, described in tabular style."),
    tag(0x0131, "Software", "Software", S::OtherTags, T::Ascii, P::Value,
        "The name and version of the software or firmware used to generate the image."),
    tag(0x0132, "DateTime", "Date and Time", S::OtherTags, T::Ascii, P::Value,
        "The date and time of image creation."),
    tag(0x013b, "Artist", "Artist", S::OtherTags, T::Ascii, P::Value,
        "The name of the camera owner, photographer or image creator."),
    tag(0x013e, "WhitePoint", "White Point", S::ImageCharacteristics, T::Rational, P::Value,
        "The chromaticity of the white point of the image."),
    tag(0x013f, "PrimaryChromaticities", "Primary Chromaticities", S::ImageCharacteristics,
        T::Rational, P::Value, "The chromaticity of the three primary colors of the image."),
    tag(0x0201, "JPEGInterchangeFormat", "JPEG Interchange Format", S::RecordingOffset, T::Long,
        P::Value, "The offset to the start byte of compressed thumbnail data."),
    tag(0x0202, "JPEGInterchangeFormatLength", "JPEG Interchange Format Length",
        S::RecordingOffset, T::Long, P::Value, "The number of bytes of compressed thumbnail data."),
    tag(0x0211, "YCbCrCoefficients", "YCbCr Coefficients", S::ImageCharacteristics, T::Rational,
        P::Value, "The matrix coefficients for transformation from RGB to YCbCr image data."),
    tag(0x0212, "YCbCrSubSampling", "YCbCr Sub-Sampling", S::ImageStructure, T::Short, P::Value,
        "The sampling ratio of chrominance components in relation to the luminance component."),
    tag(0x0213, "YCbCrPositioning", "YCbCr Positioning", S::ImageStructure, T::Short,
        P::Enum(YCBCR_POSITIONING), "The position of chrominance components in relation to the luminance component."),
    tag(0x0214, "ReferenceBlackWhite", "Reference Black/White", S::ImageCharacteristics,
        T::Rational, P::Value, "The reference black point value and reference white point value."),
    tag(0x4746, "Rating", "Windows Rating", S::OtherTags, T::Short, P::Value,
        "Rating tag used by Windows."),
    tag(0x4749, "RatingPercent", "Windows Rating Percent", S::OtherTags, T::Short, P::Value,
        "Rating tag used by Windows, value in percent."),
    tag(0x8298, "Copyright", "Copyright", S::OtherTags, T::Ascii, P::Value,
        "Copyright information."),
    tag(0x8769, "ExifTag", "Exif IFD Pointer", S::ExifFormat, T::Long, P::Value,
        "A pointer to the Exif IFD."),
    tag(0x8773, "InterColorProfile", "Inter Color Profile", S::OtherTags, T::Undefined,
        P::Value, "Contains an InterColor Consortium (ICC) format color space characterization."),
    tag(0x8825, "GPSTag", "GPS Info IFD Pointer", S::ExifFormat, T::Long, P::Value,
        "A pointer to the GPS Info IFD."),
    tag(0x9c9b, "XPTitle", "Windows Title", S::OtherTags, T::Byte, P::XpString,
        "Title tag used by Windows, encoded in UCS2."),
    tag(0x9c9c, "XPComment", "Windows Comment", S::OtherTags, T::Byte, P::XpString,
        "Comment tag used by Windows, encoded in UCS2."),
    tag(0x9c9d, "XPAuthor", "Windows Author", S::OtherTags, T::Byte, P::XpString,
        "Author tag used by Windows, encoded in UCS2."),
    tag(0x9c9e, "XPKeywords", "Windows Keywords", S::OtherTags, T::Byte, P::XpString,
        "Keywords tag used by Windows, encoded in UCS2."),
    tag(0x9c9f, "XPSubject", "Windows Subject", S::OtherTags, T::Byte, P::XpString,
        "Subject tag used by Windows, encoded in UCS2."),
    tag(0xc4a5, "PrintImageMatching", "Print Image Matching", S::OtherTags, T::Undefined,
        P::Value, "Print Image Matching, description needed."),
];

// =============================================================================
// Exif IFD
// =============================================================================

#[rustfmt::skip]
static EXIF_TAGS: &[TagInfo] = &[
    tag(0x829a, "ExposureTime", "Exposure Time", S::CaptureConditions, T::Rational,
        P::ExposureTime, "Exposure time, given in seconds."),
    tag(0x829d, "FNumber", "FNumber", S::CaptureConditions, T::Rational, P::FNumber,
        "The F number."),
    tag(0x8822, "ExposureProgram", "Exposure Program", S::CaptureConditions, T::Short,
        P::Enum(EXPOSURE_PROGRAM), "The class of the program used by the camera to set exposure."),
    tag(0x8824, "SpectralSensitivity", "Spectral Sensitivity", S::CaptureConditions, T::Ascii,
        P::Value, "The spectral sensitivity of each channel of the camera used."),
    tag(0x8827, "ISOSpeedRatings", "ISO Speed Ratings", S::CaptureConditions, T::Short, P::Value,
        "The ISO Speed and ISO Latitude of the camera or input device."),
    tag(0x8830, "SensitivityType", "Sensitivity Type", S::CaptureConditions, T::Short, P::Value,
        "Which of the sensitivity parameters is used for ISOSpeedRatings."),
    tag(0x9000, "ExifVersion", "Exif Version", S::ExifVersion, T::Undefined, P::Version,
        "The version of the Exif standard supported."),
    tag(0x9003, "DateTimeOriginal", "Date and Time (original)", S::DateTime, T::Ascii, P::Value,
        "The date and time when the original image data was generated."),
    tag(0x9004, "DateTimeDigitized", "Date and Time (digitized)", S::DateTime, T::Ascii,
        P::Value, "The date and time when the image was stored as digital data."),
    tag(0x9010, "OffsetTime", "Offset Time", S::DateTime, T::Ascii, P::Value,
        "Time difference from Universal Time Coordinated of DateTime."),
    tag(0x9011, "OffsetTimeOriginal", "Offset Time Original", S::DateTime, T::Ascii, P::Value,
        "Time difference from Universal Time Coordinated of DateTimeOriginal."),
    tag(0x9012, "OffsetTimeDigitized", "Offset Time Digitized", S::DateTime, T::Ascii, P::Value,
        "Time difference from Universal Time Coordinated of DateTimeDigitized."),
    tag(0x9101, "ComponentsConfiguration", "Components Configuration", S::ImageConfig,
        T::Undefined, P::Value, "Information specific to compressed data."),
    tag(0x9102, "CompressedBitsPerPixel", "Compressed Bits per Pixel", S::ImageConfig,
        T::Rational, P::Value, "Information specific to compressed data."),
    tag(0x9201, "ShutterSpeedValue", "Shutter speed", S::CaptureConditions, T::SRational,
        P::Value, "Shutter speed, in APEX units."),
    tag(0x9202, "ApertureValue", "Aperture", S::CaptureConditions, T::Rational, P::Value,
        "The lens aperture, in APEX units."),
    tag(0x9203, "BrightnessValue", "Brightness", S::CaptureConditions, T::SRational, P::Value,
        "The value of brightness, in APEX units."),
    tag(0x9204, "ExposureBiasValue", "Exposure Bias", S::CaptureConditions, T::SRational,
        P::Value, "The exposure bias, in APEX units."),
    tag(0x9205, "MaxApertureValue", "Max Aperture Value", S::CaptureConditions, T::Rational,
        P::Value, "The smallest F number of the lens, in APEX units."),
    tag(0x9206, "SubjectDistance", "Subject Distance", S::CaptureConditions, T::Rational,
        P::Value, "The distance to the subject, given in meters."),
    tag(0x9207, "MeteringMode", "Metering Mode", S::CaptureConditions, T::Short,
        P::Enum(METERING_MODE), "The metering mode."),
    tag(0x9208, "LightSource", "Light Source", S::CaptureConditions, T::Short,
        P::Enum(LIGHT_SOURCE), "The kind of light source."),
    tag(0x9209, "Flash", "Flash", S::CaptureConditions, T::Short, P::Enum(FLASH),
        "Indicates the status of flash when the image was shot."),
    tag(0x920a, "FocalLength", "Focal Length", S::CaptureConditions, T::Rational,
        P::FocalLength, "The actual focal length of the lens, in mm."),
    tag(0x9214, "SubjectArea", "Subject Area", S::CaptureConditions, T::Short, P::Value,
        "The location and area of the main subject in the overall scene."),
    tag(0x927c, "MakerNote", "Maker Note", S::UserInfo, T::Undefined, P::Value,
        "A tag for manufacturers of Exif writers to record any desired information."),
    tag(0x9286, "UserComment", "User Comment", S::UserInfo, T::Comment, P::Comment,
        "A tag for Exif users to write keywords or comments on the image."),
    tag(0x9290, "SubSecTime", "Sub-seconds Time", S::DateTime, T::Ascii, P::Value,
        "Fractions of seconds for the DateTime tag."),
    tag(0x9291, "SubSecTimeOriginal", "Sub-seconds Time Original", S::DateTime, T::Ascii,
        P::Value, "Fractions of seconds for the DateTimeOriginal tag."),
    tag(0x9292, "SubSecTimeDigitized", "Sub-seconds Time Digitized", S::DateTime, T::Ascii,
        P::Value, "Fractions of seconds for the DateTimeDigitized tag."),
    tag(0xa000, "FlashpixVersion", "FlashPix Version", S::ExifVersion, T::Undefined,
        P::Version, "The FlashPix format version supported by a FPXR file."),
    tag(0xa001, "ColorSpace", "Color Space", S::ImageCharacteristics, T::Short,
        P::Enum(COLOR_SPACE), "The color space information tag."),
    tag(0xa002, "PixelXDimension", "Pixel X Dimension", S::ImageConfig, T::Long, P::Value,
        "The width of the meaningful image data."),
    tag(0xa003, "PixelYDimension", "Pixel Y Dimension", S::ImageConfig, T::Long, P::Value,
        "The height of the meaningful image data."),
    tag(0xa004, "RelatedSoundFile", "Related Sound File", S::RelatedFile, T::Ascii, P::Value,
        "The name of an audio file related to the image data."),
    tag(0xa005, "InteroperabilityTag", "Interoperability IFD Pointer", S::ExifFormat, T::Long,
        P::Value, "A pointer to the Interoperability IFD."),
    tag(0xa20e, "FocalPlaneXResolution", "Focal Plane X-Resolution", S::CaptureConditions,
        T::Rational, P::Value, "The number of pixels in the image width direction per unit on the focal plane."),
    tag(0xa20f, "FocalPlaneYResolution", "Focal Plane Y-Resolution", S::CaptureConditions,
        T::Rational, P::Value, "The number of pixels in the image height direction per unit on the focal plane."),
    tag(0xa210, "FocalPlaneResolutionUnit", "Focal Plane Resolution Unit", S::CaptureConditions,
        T::Short, P::Enum(RESOLUTION_UNIT), "The unit for measuring the focal plane resolutions."),
    tag(0xa215, "ExposureIndex", "Exposure index", S::CaptureConditions, T::Rational, P::Value,
        "The exposure index selected on the camera or input device."),
    tag(0xa217, "SensingMethod", "Sensing Method", S::CaptureConditions, T::Short,
        P::Enum(SENSING_METHOD), "The image sensor type on the camera or input device."),
    tag(0xa300, "FileSource", "File Source", S::CaptureConditions, T::Undefined, P::Value,
        "Indicates the image source."),
    tag(0xa301, "SceneType", "Scene Type", S::CaptureConditions, T::Undefined, P::Value,
        "Indicates the type of scene."),
    tag(0xa302, "CFAPattern", "Color Filter Array Pattern", S::CaptureConditions, T::Undefined,
        P::Value, "The color filter array geometric pattern of the image sensor."),
    tag(0xa401, "CustomRendered", "Custom Rendered", S::CaptureConditions, T::Short,
        P::Enum(CUSTOM_RENDERED), "The use of special processing on image data."),
    tag(0xa402, "ExposureMode", "Exposure Mode", S::CaptureConditions, T::Short,
        P::Enum(EXPOSURE_MODE), "The exposure mode set when the image was shot."),
    tag(0xa403, "WhiteBalance", "White Balance", S::CaptureConditions, T::Short,
        P::Enum(WHITE_BALANCE), "The white balance mode set when the image was shot."),
    tag(0xa404, "DigitalZoomRatio", "Digital Zoom Ratio", S::CaptureConditions, T::Rational,
        P::Value, "The digital zoom ratio when the image was shot."),
    tag(0xa405, "FocalLengthIn35mmFilm", "Focal Length In 35mm Film", S::CaptureConditions,
        T::Short, P::Value, "The equivalent focal length assuming a 35mm film camera, in mm."),
    tag(0xa406, "SceneCaptureType", "Scene Capture Type", S::CaptureConditions, T::Short,
        P::Enum(SCENE_CAPTURE_TYPE), "The type of scene that was shot."),
    tag(0xa407, "GainControl", "Gain Control", S::CaptureConditions, T::Short,
        P::Enum(GAIN_CONTROL), "The degree of overall image gain adjustment."),
    tag(0xa408, "Contrast", "Contrast", S::CaptureConditions, T::Short, P::Enum(CONTRAST),
        "The direction of contrast processing applied by the camera."),
    tag(0xa409, "Saturation", "Saturation", S::CaptureConditions, T::Short, P::Enum(SATURATION),
        "The direction of saturation processing applied by the camera."),
    tag(0xa40a, "Sharpness", "Sharpness", S::CaptureConditions, T::Short, P::Enum(CONTRAST),
        "The direction of sharpness processing applied by the camera."),
    tag(0xa40c, "SubjectDistanceRange", "Subject Distance Range", S::CaptureConditions,
        T::Short, P::Enum(SUBJECT_DISTANCE_RANGE), "The distance to the subject."),
    tag(0xa420, "ImageUniqueID", "Image Unique ID", S::OtherTags, T::Ascii, P::Value,
        "An identifier assigned uniquely to each image."),
    tag(0xa430, "CameraOwnerName", "Camera Owner Name", S::OtherTags, T::Ascii, P::Value,
        "The owner of the camera used to capture the image."),
    tag(0xa431, "BodySerialNumber", "Body Serial Number", S::OtherTags, T::Ascii, P::Value,
        "The serial number of the body of the camera."),
    tag(0xa432, "LensSpecification", "Lens Specification", S::OtherTags, T::Rational, P::Value,
        "The minimum and maximum focal length and F numbers of the lens."),
    tag(0xa433, "LensMake", "Lens Make", S::OtherTags, T::Ascii, P::Value,
        "The lens manufacturer."),
    tag(0xa434, "LensModel", "Lens Model", S::OtherTags, T::Ascii, P::Value,
        "The lens model name and model number."),
    tag(0xa435, "LensSerialNumber", "Lens Serial Number", S::OtherTags, T::Ascii, P::Value,
        "The serial number of the interchangeable lens."),
];

// =============================================================================
// GPS IFD
// =============================================================================

#[rustfmt::skip]
static GPS_TAGS: &[TagInfo] = &[
    tag(0x0000, "GPSVersionID", "GPS Version ID", S::Gps, T::Byte, P::Value,
        "The version of the GPS information IFD."),
    tag(0x0001, "GPSLatitudeRef", "GPS Latitude Reference", S::Gps, T::Ascii, P::Value,
        "Indicates whether the latitude is north or south latitude."),
    tag(0x0002, "GPSLatitude", "GPS Latitude", S::Gps, T::Rational, P::GpsCoordinate,
        "The latitude as degrees, minutes and seconds."),
    tag(0x0003, "GPSLongitudeRef", "GPS Longitude Reference", S::Gps, T::Ascii, P::Value,
        "Indicates whether the longitude is east or west longitude."),
    tag(0x0004, "GPSLongitude", "GPS Longitude", S::Gps, T::Rational, P::GpsCoordinate,
        "The longitude as degrees, minutes and seconds."),
    tag(0x0005, "GPSAltitudeRef", "GPS Altitude Reference", S::Gps, T::Byte,
        P::Enum(GPS_ALTITUDE_REF), "The altitude used as the reference altitude."),
    tag(0x0006, "GPSAltitude", "GPS Altitude", S::Gps, T::Rational, P::Value,
        "The altitude based on the reference in GPSAltitudeRef, in meters."),
    tag(0x0007, "GPSTimeStamp", "GPS Time Stamp", S::Gps, T::Rational, P::Value,
        "The time as UTC, as hour, minute and second."),
    tag(0x0008, "GPSSatellites", "GPS Satellites", S::Gps, T::Ascii, P::Value,
        "The GPS satellites used for measurements."),
    tag(0x0009, "GPSStatus", "GPS Status", S::Gps, T::Ascii, P::Value,
        "The status of the GPS receiver when the image is recorded."),
    tag(0x000a, "GPSMeasureMode", "GPS Measure Mode", S::Gps, T::Ascii, P::Value,
        "The GPS measurement mode."),
    tag(0x000b, "GPSDOP", "GPS Data Degree of Precision", S::Gps, T::Rational, P::Value,
        "The GPS DOP (data degree of precision)."),
    tag(0x000c, "GPSSpeedRef", "GPS Speed Reference", S::Gps, T::Ascii, P::Value,
        "The unit used to express the GPS receiver speed of movement."),
    tag(0x000d, "GPSSpeed", "GPS Speed", S::Gps, T::Rational, P::Value,
        "The speed of GPS receiver movement."),
    tag(0x000e, "GPSTrackRef", "GPS Track Ref", S::Gps, T::Ascii, P::Value,
        "The reference for giving the direction of GPS receiver movement."),
    tag(0x000f, "GPSTrack", "GPS Track", S::Gps, T::Rational, P::Value,
        "The direction of GPS receiver movement."),
    tag(0x0010, "GPSImgDirectionRef", "GPS Image Direction Reference", S::Gps, T::Ascii,
        P::Value, "The reference for giving the direction of the image when it is captured."),
    tag(0x0011, "GPSImgDirection", "GPS Image Direction", S::Gps, T::Rational, P::Value,
        "The direction of the image when it was captured."),
    tag(0x0012, "GPSMapDatum", "GPS Map Datum", S::Gps, T::Ascii, P::Value,
        "The geodetic survey data used by the GPS receiver."),
    tag(0x0013, "GPSDestLatitudeRef", "GPS Destination Latitude Reference", S::Gps, T::Ascii,
        P::Value, "Indicates whether the latitude of the destination point is north or south."),
    tag(0x0014, "GPSDestLatitude", "GPS Destination Latitude", S::Gps, T::Rational,
        P::GpsCoordinate, "The latitude of the destination point."),
    tag(0x0015, "GPSDestLongitudeRef", "GPS Destination Longitude Reference", S::Gps, T::Ascii,
        P::Value, "Indicates whether the longitude of the destination point is east or west."),
    tag(0x0016, "GPSDestLongitude", "GPS Destination Longitude", S::Gps, T::Rational,
        P::GpsCoordinate, "The longitude of the destination point."),
    tag(0x0017, "GPSDestBearingRef", "GPS Destination Bearing Reference", S::Gps, T::Ascii,
        P::Value, "The reference used for the bearing to the destination point."),
    tag(0x0018, "GPSDestBearing", "GPS Destination Bearing", S::Gps, T::Rational, P::Value,
        "The bearing to the destination point."),
    tag(0x0019, "GPSDestDistanceRef", "GPS Destination Distance Reference", S::Gps, T::Ascii,
        P::Value, "The unit used to express the distance to the destination point."),
    tag(0x001a, "GPSDestDistance", "GPS Destination Distance", S::Gps, T::Rational, P::Value,
        "The distance to the destination point."),
    tag(0x001b, "GPSProcessingMethod", "GPS Processing Method", S::Gps, T::Comment, P::Comment,
        "The name of the method used for location finding."),
    tag(0x001c, "GPSAreaInformation", "GPS Area Information", S::Gps, T::Comment, P::Comment,
        "The name of the GPS area."),
    tag(0x001d, "GPSDateStamp", "GPS Date Stamp", S::Gps, T::Ascii, P::Value,
        "The date and time information relative to UTC, as YYYY:MM:DD."),
    tag(0x001e, "GPSDifferential", "GPS Differential", S::Gps, T::Short,
        P::Enum(GPS_DIFFERENTIAL), "Indicates whether differential correction is applied."),
];

// =============================================================================
// Interoperability IFD
// =============================================================================

#[rustfmt::skip]
static IOP_TAGS: &[TagInfo] = &[
    tag(0x0001, "InteroperabilityIndex", "Interoperability Index", S::Interoperability, T::Ascii,
        P::Value, "The identification of the Interoperability rule."),
    tag(0x0002, "InteroperabilityVersion", "Interoperability Version", S::Interoperability,
        T::Undefined, P::Version, "Interoperability version."),
    tag(0x1000, "RelatedImageFileFormat", "Related Image File Format", S::Interoperability,
        T::Ascii, P::Value, "File format of image file."),
    tag(0x1001, "RelatedImageWidth", "Related Image Width", S::Interoperability, T::Long,
        P::Value, "Image width."),
    tag(0x1002, "RelatedImageLength", "Related Image Length", S::Interoperability, T::Long,
        P::Value, "Image height."),
];
