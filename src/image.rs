//! Opened images and their metadata containers.
//!
//! An [`Image`] starts out opened but unread: only [`Image::raw_bytes`]
//! works until [`Image::read_metadata`] has parsed the file. From then on
//! the three containers are live, and tags obtained from the image write
//! straight into them.
//!
//! Callers must not use one image (or a tag attached to it) from two
//! threads at once.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use bytes::Bytes;
use tracing::debug;

use crate::config::Config;
use crate::container::{self, shared, SharedContainer, TagContainer};
use crate::error::{CodecError, MetadataError, Result};
use crate::exif::{ExifDatum, ExifKey, ExifTag, ExifThumbnail};
use crate::format::iptc::detect_charset;
use crate::format::tiff::ByteOrder;
use crate::format::{ImageHandle, MetadataUpdate};
use crate::io::{ByteSource, FileSource, MemorySource};
use crate::iptc::{IptcDatum, IptcKey, IptcTag};
use crate::lock::{no_lock, unlocked, ExecutionLock};
use crate::preview::Preview;
use crate::xmp::{XmpDatum, XmpKey, XmpTag};

// =============================================================================
// Open options
// =============================================================================

/// Builder for opening images with a non-default configuration or an
/// execution lock.
///
/// # Example
///
/// ```rust,no_run
/// use imgmeta::{Config, OpenOptions};
///
/// let config = Config { xmp_padding: 0, ..Config::default() };
/// let mut image = OpenOptions::new().config(config).open("photo.jpg")?;
/// image.read_metadata()?;
/// # Ok::<(), imgmeta::MetadataError>(())
/// ```
#[derive(Clone)]
pub struct OpenOptions {
    config: Config,
    lock: Arc<dyn ExecutionLock>,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            config: Config::default(),
            lock: no_lock(),
        }
    }
}

impl std::fmt::Debug for OpenOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenOptions")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Lock released around open, read, write and raw-byte extraction.
    pub fn execution_lock(mut self, lock: Arc<dyn ExecutionLock>) -> Self {
        self.lock = lock;
        self
    }

    /// Open an image file. Metadata is not read.
    ///
    /// # Errors
    /// - `Io` if the file cannot be opened
    /// - `UnreadableImage` if it is not a supported image
    pub fn open(self, path: impl AsRef<Path>) -> Result<Image> {
        let path = path.as_ref();
        let config = self.config.clone();
        let handle = unlocked(&*self.lock, || -> std::result::Result<_, CodecError> {
            let source = FileSource::new(path)?;
            ImageHandle::open(Box::new(source), config)
        })?;
        Ok(Image::new(handle, self.lock))
    }

    /// Open an image held in memory. The bytes are copied.
    ///
    /// # Errors
    /// - `OutOfMemory` if `data` exceeds the configured buffer size
    /// - `UnreadableImage` if it is not a supported image
    pub fn from_buffer(self, data: &[u8]) -> Result<Image> {
        if data.len() as u64 > self.config.max_buffer_size {
            return Err(MetadataError::OutOfMemory(format!(
                "buffer of {} bytes exceeds the limit of {}",
                data.len(),
                self.config.max_buffer_size
            )));
        }
        let config = self.config.clone();
        let handle = unlocked(&*self.lock, || {
            let source: Box<dyn ByteSource> = Box::new(MemorySource::new(data.to_vec()));
            ImageHandle::open(source, config)
        })?;
        Ok(Image::new(handle, self.lock))
    }
}

// =============================================================================
// Image
// =============================================================================

/// An opened image file or buffer.
pub struct Image {
    handle: ImageHandle,
    lock: Arc<dyn ExecutionLock>,
    metadata_read: bool,
    exif: SharedContainer<ExifDatum>,
    iptc: SharedContainer<IptcDatum>,
    xmp: SharedContainer<XmpDatum>,
    byte_order: Option<ByteOrder>,
    comment: Option<String>,
    pixel_width: u32,
    pixel_height: u32,
    thumbnail: OnceLock<ExifThumbnail>,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("handle", &self.handle)
            .field("metadata_read", &self.metadata_read)
            .finish_non_exhaustive()
    }
}

impl Image {
    fn new(handle: ImageHandle, lock: Arc<dyn ExecutionLock>) -> Self {
        Self {
            handle,
            lock,
            metadata_read: false,
            exif: shared(TagContainer::new()),
            iptc: shared(TagContainer::new()),
            xmp: shared(TagContainer::new()),
            byte_order: None,
            comment: None,
            pixel_width: 0,
            pixel_height: 0,
            thumbnail: OnceLock::new(),
        }
    }

    /// Open an image file with the default configuration.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        OpenOptions::new().open(path)
    }

    /// Open an in-memory image with the default configuration.
    pub fn from_buffer(data: &[u8]) -> Result<Self> {
        OpenOptions::new().from_buffer(data)
    }

    pub fn config(&self) -> &Config {
        self.handle.config()
    }

    /// Path of the file, or `memory://` for buffers.
    pub fn identifier(&self) -> String {
        self.handle.identifier()
    }

    pub fn is_metadata_read(&self) -> bool {
        self.metadata_read
    }

    fn ensure_read(&self) -> Result<()> {
        if self.metadata_read {
            Ok(())
        } else {
            Err(MetadataError::MetadataNotRead)
        }
    }

    // -------------------------------------------------------------------------
    // Read / write
    // -------------------------------------------------------------------------

    /// Parse the metadata of the image.
    ///
    /// Calling it again discards unsaved changes; the containers are
    /// refilled in place, so attached tags stay attached.
    ///
    /// # Errors
    /// `CorruptMetadata` or `UnsupportedFormat` when the codec rejects the
    /// metadata, `Io` when the source cannot be read.
    pub fn read_metadata(&mut self) -> Result<()> {
        let handle = &self.handle;
        let parsed = unlocked(&*self.lock, || handle.read())?;

        container::write(&self.exif).replace_all(parsed.exif);
        container::write(&self.iptc).replace_all(parsed.iptc);
        container::write(&self.xmp).replace_all(parsed.xmp);
        self.byte_order = parsed.byte_order;
        self.comment = parsed.comment;
        self.pixel_width = parsed.pixel_width;
        self.pixel_height = parsed.pixel_height;
        self.metadata_read = true;
        debug!(source = %self.handle.identifier(), "metadata read");
        Ok(())
    }

    /// Write the containers back to the source.
    ///
    /// # Errors
    /// - `MetadataNotRead` before [`read_metadata`](Self::read_metadata)
    /// - `Unsupported` for formats that cannot be written
    /// - `InvalidValue` when a block exceeds what the format can carry
    /// - `Io` when the source cannot be replaced
    pub fn write_metadata(&self) -> Result<()> {
        self.ensure_read()?;
        let exif = container::read(&self.exif).as_slice().to_vec();
        let iptc = container::read(&self.iptc).as_slice().to_vec();
        let xmp = container::read(&self.xmp).as_slice().to_vec();
        let update = MetadataUpdate {
            exif: &exif,
            byte_order: self.byte_order()?,
            iptc: &iptc,
            xmp: &xmp,
            comment: self.comment.as_deref(),
        };

        let handle = &self.handle;
        unlocked(&*self.lock, || handle.write(&update))?;
        Ok(())
    }

    /// Replace the selected containers of `other` with copies of this
    /// image's. Nothing stays shared between the two.
    ///
    /// # Errors
    /// `MetadataNotRead` unless both images have been read.
    pub fn copy_metadata(
        &self,
        other: &mut Image,
        exif: bool,
        iptc: bool,
        xmp: bool,
    ) -> Result<()> {
        self.ensure_read()?;
        other.ensure_read()?;
        if exif {
            let entries = container::read(&self.exif).as_slice().to_vec();
            container::write(&other.exif).replace_all(entries);
        }
        if iptc {
            let entries = container::read(&self.iptc).as_slice().to_vec();
            container::write(&other.iptc).replace_all(entries);
        }
        if xmp {
            let entries = container::read(&self.xmp).as_slice().to_vec();
            container::write(&other.xmp).replace_all(entries);
        }
        debug!(exif, iptc, xmp, "copied metadata");
        Ok(())
    }

    /// Current bytes of the source. Does not require reading metadata.
    ///
    /// # Errors
    /// `OutOfMemory` if the source exceeds the configured buffer size.
    pub fn raw_bytes(&self) -> Result<Bytes> {
        let handle = &self.handle;
        Ok(unlocked(&*self.lock, || handle.raw_bytes())?)
    }

    // -------------------------------------------------------------------------
    // Image properties
    // -------------------------------------------------------------------------

    pub fn mime_type(&self) -> Result<&'static str> {
        self.ensure_read()?;
        Ok(self.handle.format().mime_type())
    }

    pub fn pixel_width(&self) -> Result<u32> {
        self.ensure_read()?;
        Ok(self.pixel_width)
    }

    pub fn pixel_height(&self) -> Result<u32> {
        self.ensure_read()?;
        Ok(self.pixel_height)
    }

    pub fn comment(&self) -> Result<Option<&str>> {
        self.ensure_read()?;
        Ok(self.comment.as_deref())
    }

    pub fn set_comment(&mut self, comment: &str) -> Result<()> {
        self.ensure_read()?;
        self.comment = Some(comment.to_string());
        Ok(())
    }

    pub fn clear_comment(&mut self) -> Result<()> {
        self.ensure_read()?;
        self.comment = None;
        Ok(())
    }

    /// Byte order used for Exif values: the one read from the file, else
    /// little-endian.
    pub fn byte_order(&self) -> Result<ByteOrder> {
        self.ensure_read()?;
        Ok(self.byte_order.unwrap_or(ByteOrder::LittleEndian))
    }

    /// Character set of the IPTC values: `"UTF-8"` or `"ASCII"`, `None`
    /// when it cannot be told.
    pub fn iptc_charset(&self) -> Result<Option<&'static str>> {
        let iptc = container::read(self.iptc_container()?);
        Ok(detect_charset(iptc.as_slice()))
    }

    // -------------------------------------------------------------------------
    // Containers
    // -------------------------------------------------------------------------

    pub(crate) fn exif_container(&self) -> Result<&SharedContainer<ExifDatum>> {
        self.ensure_read()?;
        Ok(&self.exif)
    }

    pub(crate) fn iptc_container(&self) -> Result<&SharedContainer<IptcDatum>> {
        self.ensure_read()?;
        Ok(&self.iptc)
    }

    pub(crate) fn xmp_container(&self) -> Result<&SharedContainer<XmpDatum>> {
        self.ensure_read()?;
        Ok(&self.xmp)
    }

    // -------------------------------------------------------------------------
    // Exif
    // -------------------------------------------------------------------------

    /// Exif keys in file order.
    pub fn exif_keys(&self) -> Result<Vec<String>> {
        let exif = container::read(self.exif_container()?);
        Ok(exif.keys().iter().map(ToString::to_string).collect())
    }

    /// Attached tag for `key`.
    ///
    /// # Errors
    /// `InvalidKey` for malformed keys, `KeyNotFound` if the image has no
    /// such entry.
    pub fn exif_tag(&self, key: &str) -> Result<ExifTag> {
        let container = self.exif_container()?;
        let key = ExifKey::parse(key)?;
        if !container::read(container).contains(&key) {
            return Err(MetadataError::KeyNotFound(key.to_string()));
        }
        Ok(ExifTag::attached(key, Arc::clone(container), self.byte_order()?))
    }

    pub fn delete_exif_tag(&self, key: &str) -> Result<()> {
        let container = self.exif_container()?;
        let key = ExifKey::parse(key)?;
        if container::write(container).erase_first(&key).is_none() {
            return Err(MetadataError::KeyNotFound(key.to_string()));
        }
        debug!(key = %key, "deleted Exif tag");
        Ok(())
    }

    /// Thumbnail stored in the Exif data.
    pub fn thumbnail(&self) -> Result<&ExifThumbnail> {
        let exif = self.exif_container()?;
        Ok(self
            .thumbnail
            .get_or_init(|| ExifThumbnail::new(Arc::clone(exif))))
    }

    // -------------------------------------------------------------------------
    // IPTC
    // -------------------------------------------------------------------------

    /// IPTC keys in file order, each repeatable dataset listed once.
    pub fn iptc_keys(&self) -> Result<Vec<String>> {
        let iptc = container::read(self.iptc_container()?);
        Ok(iptc.unique_keys().iter().map(ToString::to_string).collect())
    }

    /// Attached tag holding every value for `key`.
    ///
    /// # Errors
    /// - `InvalidKey` for malformed keys
    /// - `KeyNotFound` if the image has no such dataset
    /// - `NotRepeatable` if a single-valued dataset appears several times
    pub fn iptc_tag(&self, key: &str) -> Result<IptcTag> {
        let container = self.iptc_container()?;
        let key = IptcKey::parse(key)?;
        if !container::read(container).contains(&key) {
            return Err(MetadataError::KeyNotFound(key.to_string()));
        }
        IptcTag::attached(key, Arc::clone(container))
    }

    /// Remove every value of `key`.
    pub fn delete_iptc_tag(&self, key: &str) -> Result<()> {
        let container = self.iptc_container()?;
        let key = IptcKey::parse(key)?;
        let removed = container::write(container).erase_where(|d| d.key == key);
        if removed == 0 {
            return Err(MetadataError::KeyNotFound(key.to_string()));
        }
        debug!(key = %key, removed, "deleted IPTC dataset");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // XMP
    // -------------------------------------------------------------------------

    /// XMP keys in packet order.
    pub fn xmp_keys(&self) -> Result<Vec<String>> {
        let xmp = container::read(self.xmp_container()?);
        Ok(xmp.keys().iter().map(ToString::to_string).collect())
    }

    /// Attached tag for `key`.
    ///
    /// # Errors
    /// `InvalidKey` for malformed keys or unregistered prefixes,
    /// `KeyNotFound` if the image has no such property.
    pub fn xmp_tag(&self, key: &str) -> Result<XmpTag> {
        let container = self.xmp_container()?;
        let key = XmpKey::parse(key)?;
        if !container::read(container).contains(&key) {
            return Err(MetadataError::KeyNotFound(key.to_string()));
        }
        Ok(XmpTag::attached(key, Arc::clone(container)))
    }

    /// Remove the property for `key` along with its array items and
    /// structure fields.
    pub fn delete_xmp_tag(&self, key: &str) -> Result<()> {
        let container = self.xmp_container()?;
        let key = XmpKey::parse(key)?;
        let path = key.to_string();
        let removed = container::write(container)
            .erase_where(|d| d.key == key || d.key.is_descendant_of(&key));
        if removed == 0 {
            return Err(MetadataError::KeyNotFound(path));
        }
        debug!(key = %path, removed, "deleted XMP property");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Previews
    // -------------------------------------------------------------------------

    /// Embedded preview images, smallest first.
    pub fn previews(&self) -> Result<Vec<Preview>> {
        self.ensure_read()?;
        let handle = &self.handle;
        let previews = unlocked(&*self.lock, || handle.previews())?;
        Ok(previews.into_iter().map(Preview::from).collect())
    }
}
