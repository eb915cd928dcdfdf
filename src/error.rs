use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Errors surfaced to callers of the metadata API.
///
/// Every public operation either succeeds or fails with exactly one of these
/// kinds. Codec failures are classified through [`From<CodecError>`].
#[derive(Debug, Clone, Error)]
pub enum MetadataError {
    /// Metadata access attempted before `read_metadata()`
    #[error("metadata not read")]
    MetadataNotRead,

    /// Key string is not well-formed for its namespace
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// No entry exists for the key
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Value does not validate against the namespace rules
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// More than one value assigned to a non-repeatable record key
    #[error("tag not repeatable: {0}")]
    NotRepeatable(String),

    /// Value requested in a shape other than the one stored
    #[error("type mismatch for {key}: stored {stored}, requested {requested}")]
    TypeMismatch {
        key: String,
        stored: &'static str,
        requested: &'static str,
    },

    /// Data is not a recognized image
    #[error("unreadable image: {0}")]
    UnreadableImage(String),

    /// Image type is recognized but not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Embedded metadata is structurally broken
    #[error("corrupt metadata: {0}")]
    CorruptMetadata(String),

    /// XMP prefix is already in use
    #[error("namespace prefix already registered: {0}")]
    DuplicatePrefix(String),

    /// XMP namespace is not registered
    #[error("namespace not found: {0}")]
    NamespaceNotFound(String),

    /// Built-in XMP namespaces cannot be unregistered
    #[error("cannot unregister built-in namespace: {0}")]
    BuiltinNamespace(String),

    /// Allocation refused or size ceiling exceeded
    #[error("out of memory: {0}")]
    OutOfMemory(String),

    /// Feature not implemented for this format
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Failure of the underlying byte stream
    #[error("I/O error: {0}")]
    Io(String),

    /// Unclassified codec failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl MetadataError {
    pub(crate) fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        MetadataError::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for MetadataError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::OutOfMemory => MetadataError::OutOfMemory(err.to_string()),
            _ => MetadataError::Io(err.to_string()),
        }
    }
}

/// Errors that can occur when parsing TIFF structures
#[derive(Debug, Clone, Error)]
pub enum TiffError {
    /// Invalid TIFF magic bytes (not II or MM)
    #[error("Invalid TIFF magic bytes: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidMagic(u16),

    /// Invalid TIFF version number
    #[error("Invalid TIFF version: expected 42 (TIFF) or 43 (BigTIFF), got {0}")]
    InvalidVersion(u16),

    /// Invalid BigTIFF offset byte size (must be 8)
    #[error("Invalid BigTIFF offset byte size: expected 8, got {0}")]
    InvalidBigTiffOffsetSize(u16),

    /// Data is too small to contain the structure
    #[error("Data too small: need at least {required} bytes, got {actual}")]
    FileTooSmall { required: u64, actual: u64 },

    /// Invalid IFD offset (points outside the data)
    #[error("Invalid IFD offset: {0}")]
    InvalidIfdOffset(u64),

    /// Value area of an entry lies outside the data
    #[error("Value of tag 0x{tag:04x} out of bounds: offset {offset}, size {size}")]
    ValueOutOfBounds { tag: u16, offset: u64, size: u64 },

    /// IFD declares more entries than allowed
    #[error("Too many directory entries: {0}")]
    TooManyEntries(u64),

    /// Unknown field type in IFD entry
    #[error("Unknown field type: {0}")]
    UnknownFieldType(u16),

    /// Value too large for classic TIFF offsets
    #[error("TIFF structure too large: {0} bytes")]
    TooLarge(usize),
}

// =============================================================================
// Codec error taxonomy
// =============================================================================

/// Error codes reported by the image codec.
///
/// Every code maps to exactly one [`MetadataError`] kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success,
    GeneralError,
    ErrorMessage,
    CallFailed,
    // I/O
    DataSourceOpenFailed,
    FileOpenFailed,
    FailedToReadImageData,
    FileRenameFailed,
    TransferFailed,
    MemoryTransferFailed,
    InputDataReadFailed,
    ImageWriteFailed,
    OffsetOutOfRange,
    // values
    InvalidDataset,
    ValueNotSet,
    ValueTooLarge,
    InvalidCharset,
    UnsupportedDateFormat,
    UnsupportedTimeFormat,
    TooLargeJpegSegment,
    DecodeLangAltPropertyFailed,
    EncodeLangAltPropertyFailed,
    InvalidXmpText,
    // keys
    InvalidRecord,
    InvalidKey,
    InvalidTag,
    InvalidIfdId,
    NoNamespaceInfoForXmpPrefix,
    NoPrefixForNamespace,
    SchemaNamespaceNotRegistered,
    // structure
    NotAnImage,
    FileContainsUnknownImageType,
    MemoryContainsUnknownImageType,
    NotAJpeg,
    NoImageInInputData,
    TooManyTiffDirectoryEntries,
    InvalidTypeValue,
    CorruptedMetadata,
    InvalidXmp,
    TiffDirectoryTooLarge,
    // unsupported
    UnsupportedImageType,
    WritingImageFormatUnsupported,
    FunctionNotSupported,
    UnhandledXmpNode,
    // resources
    MallocFailed,
    ArithmeticOverflow,
}

/// Error reported by the image codec.
#[derive(Debug, Clone, Error)]
#[error("{message} ({code:?})")]
pub struct CodecError {
    pub code: ErrorCode,
    pub message: String,
}

impl CodecError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<TiffError> for CodecError {
    fn from(err: TiffError) -> Self {
        let code = match err {
            TiffError::TooManyEntries(_) => ErrorCode::TooManyTiffDirectoryEntries,
            TiffError::UnknownFieldType(_) => ErrorCode::InvalidTypeValue,
            TiffError::TooLarge(_) => ErrorCode::TooLargeJpegSegment,
            _ => ErrorCode::CorruptedMetadata,
        };
        CodecError::new(code, err.to_string())
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                ErrorCode::FileOpenFailed
            }
            std::io::ErrorKind::UnexpectedEof => ErrorCode::InputDataReadFailed,
            std::io::ErrorKind::OutOfMemory => ErrorCode::MallocFailed,
            _ => ErrorCode::TransferFailed,
        };
        CodecError::new(code, err.to_string())
    }
}

impl From<CodecError> for MetadataError {
    fn from(err: CodecError) -> Self {
        let message = err.message;
        match err.code {
            ErrorCode::DataSourceOpenFailed
            | ErrorCode::FileOpenFailed
            | ErrorCode::FailedToReadImageData
            | ErrorCode::FileRenameFailed
            | ErrorCode::TransferFailed
            | ErrorCode::MemoryTransferFailed
            | ErrorCode::InputDataReadFailed
            | ErrorCode::ImageWriteFailed
            | ErrorCode::OffsetOutOfRange => MetadataError::Io(message),

            ErrorCode::InvalidDataset
            | ErrorCode::ValueNotSet
            | ErrorCode::ValueTooLarge
            | ErrorCode::InvalidCharset
            | ErrorCode::UnsupportedDateFormat
            | ErrorCode::UnsupportedTimeFormat
            | ErrorCode::TooLargeJpegSegment
            | ErrorCode::DecodeLangAltPropertyFailed
            | ErrorCode::EncodeLangAltPropertyFailed
            | ErrorCode::InvalidXmpText
            | ErrorCode::ArithmeticOverflow => MetadataError::InvalidValue {
                key: String::new(),
                message,
            },

            ErrorCode::InvalidRecord
            | ErrorCode::InvalidKey
            | ErrorCode::InvalidTag
            | ErrorCode::InvalidIfdId
            | ErrorCode::NoNamespaceInfoForXmpPrefix
            | ErrorCode::NoPrefixForNamespace
            | ErrorCode::SchemaNamespaceNotRegistered => MetadataError::InvalidKey(message),

            ErrorCode::NotAnImage
            | ErrorCode::FileContainsUnknownImageType
            | ErrorCode::MemoryContainsUnknownImageType
            | ErrorCode::NotAJpeg
            | ErrorCode::NoImageInInputData => MetadataError::UnreadableImage(message),

            ErrorCode::TooManyTiffDirectoryEntries
            | ErrorCode::InvalidTypeValue
            | ErrorCode::CorruptedMetadata
            | ErrorCode::InvalidXmp
            | ErrorCode::TiffDirectoryTooLarge => MetadataError::CorruptMetadata(message),

            ErrorCode::UnsupportedImageType => MetadataError::UnsupportedFormat(message),

            ErrorCode::WritingImageFormatUnsupported
            | ErrorCode::FunctionNotSupported
            | ErrorCode::UnhandledXmpNode => MetadataError::Unsupported(message),

            ErrorCode::MallocFailed => MetadataError::OutOfMemory(message),

            ErrorCode::Success
            | ErrorCode::GeneralError
            | ErrorCode::ErrorMessage
            | ErrorCode::CallFailed => MetadataError::Internal(message),
        }
    }
}

/// Errors raised while loading a [`Config`](crate::config::Config).
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Environment variable holds an unparsable value
    #[error("invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },

    /// JSON document could not be decoded
    #[error("invalid configuration: {0}")]
    Json(String),
}
