//! The IFD1 thumbnail of an image.
//!
//! The thumbnail stream lives in the data area of
//! `Exif.Thumbnail.JPEGInterchangeFormat`; the rest of the `Thumbnail`
//! group describes it.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::debug;

use crate::container::{self, SharedContainer};
use crate::error::{MetadataError, Result};
use crate::format::is_jpeg_header;

use super::datum::ExifDatum;
use super::key::{ExifGroup, ExifKey};
use super::value::ExifValue;

const COMPRESSION: u16 = 0x0103;
const X_RESOLUTION: u16 = 0x011a;
const Y_RESOLUTION: u16 = 0x011b;
const RESOLUTION_UNIT: u16 = 0x0128;
const INTERCHANGE_FORMAT: u16 = 0x0201;
const INTERCHANGE_FORMAT_LENGTH: u16 = 0x0202;

/// JPEG compression, as in the TIFF `Compression` tag.
const JPEG_COMPRESSION: u16 = 6;
/// Inches
const UNIT_INCH: u16 = 2;

fn thumbnail_key(tag: u16) -> ExifKey {
    ExifKey::new(ExifGroup::Thumbnail, tag)
}

/// Thumbnail view over an image's Exif entries.
#[derive(Debug, Clone)]
pub struct ExifThumbnail {
    exif: SharedContainer<ExifDatum>,
}

impl ExifThumbnail {
    pub(crate) fn new(exif: SharedContainer<ExifDatum>) -> Self {
        Self { exif }
    }

    /// JPEG bytes of the thumbnail, if there is one.
    pub fn data(&self) -> Option<Bytes> {
        container::read(&self.exif)
            .find(&thumbnail_key(INTERCHANGE_FORMAT))
            .and_then(|datum| datum.data_area.clone())
    }

    /// `image/jpeg`, or empty without a thumbnail.
    pub fn mime_type(&self) -> &'static str {
        if self.data().is_some() {
            "image/jpeg"
        } else {
            ""
        }
    }

    /// `.jpg`, or empty without a thumbnail.
    pub fn extension(&self) -> &'static str {
        if self.data().is_some() {
            ".jpg"
        } else {
            ""
        }
    }

    /// Write the thumbnail to `path` with the extension appended.
    ///
    /// Returns the path written.
    ///
    /// # Errors
    /// - `KeyNotFound` if there is no thumbnail
    /// - `Io` if the file cannot be written
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let data = self.data().ok_or_else(|| {
            MetadataError::KeyNotFound(thumbnail_key(INTERCHANGE_FORMAT).to_string())
        })?;
        let mut target = path.as_ref().as_os_str().to_os_string();
        target.push(self.extension());
        let target = PathBuf::from(target);
        std::fs::write(&target, &data)?;
        debug!(path = %target.display(), bytes = data.len(), "wrote thumbnail");
        Ok(target)
    }

    /// Replace the thumbnail with a JPEG stream.
    ///
    /// The whole `Thumbnail` group is rewritten.
    ///
    /// # Errors
    /// `InvalidValue` if `data` is not a JPEG stream.
    pub fn set_from_bytes(&self, data: &[u8]) -> Result<()> {
        if !is_jpeg_header(data) {
            return Err(MetadataError::invalid_value(
                thumbnail_key(INTERCHANGE_FORMAT).to_string(),
                "thumbnail data is not a JPEG stream",
            ));
        }
        let length = u32::try_from(data.len()).map_err(|_| {
            MetadataError::invalid_value(
                thumbnail_key(INTERCHANGE_FORMAT).to_string(),
                "thumbnail exceeds 4 GiB",
            )
        })?;

        let mut stream =
            ExifDatum::new(thumbnail_key(INTERCHANGE_FORMAT), ExifValue::Long(vec![0]));
        stream.data_area = Some(Bytes::copy_from_slice(data));
        let entries = [
            ExifDatum::new(thumbnail_key(COMPRESSION), ExifValue::Short(vec![JPEG_COMPRESSION])),
            ExifDatum::new(thumbnail_key(X_RESOLUTION), ExifValue::Rational(vec![(72, 1)])),
            ExifDatum::new(thumbnail_key(Y_RESOLUTION), ExifValue::Rational(vec![(72, 1)])),
            ExifDatum::new(thumbnail_key(RESOLUTION_UNIT), ExifValue::Short(vec![UNIT_INCH])),
            stream,
            ExifDatum::new(thumbnail_key(INTERCHANGE_FORMAT_LENGTH), ExifValue::Long(vec![length])),
        ];

        let mut exif = container::write(&self.exif);
        exif.erase_where(|d| d.key.group() == ExifGroup::Thumbnail);
        for entry in entries {
            exif.push(entry);
        }
        debug!(bytes = data.len(), "replaced thumbnail");
        Ok(())
    }

    /// Replace the thumbnail with the content of a JPEG file.
    ///
    /// # Errors
    /// - `Io` if the file cannot be read
    /// - `InvalidValue` if it is not a JPEG stream
    pub fn set_from_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = std::fs::read(path)?;
        self.set_from_bytes(&data)
    }

    /// Remove the thumbnail and every entry describing it.
    pub fn erase(&self) {
        let removed =
            container::write(&self.exif).erase_where(|d| d.key.group() == ExifGroup::Thumbnail);
        debug!(removed, "erased thumbnail");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{shared, TagContainer};

    fn tiny_jpeg() -> Vec<u8> {
        vec![0xFF, 0xD8, 0xFF, 0xD9]
    }

    fn keys(thumbnail: &ExifThumbnail) -> Vec<String> {
        container::read(&thumbnail.exif)
            .iter()
            .map(|d| d.key.to_string())
            .collect()
    }

    #[test]
    fn test_empty_thumbnail() {
        let thumbnail = ExifThumbnail::new(shared(TagContainer::new()));
        assert!(thumbnail.data().is_none());
        assert_eq!(thumbnail.mime_type(), "");
        assert_eq!(thumbnail.extension(), "");

        let dir = tempfile::tempdir().unwrap();
        let err = thumbnail.write_to_file(dir.path().join("thumb")).unwrap_err();
        assert!(matches!(err, MetadataError::KeyNotFound(_)));
    }

    #[test]
    fn test_set_from_bytes_rewrites_group() {
        let make = ExifDatum::new(
            ExifKey::parse("Exif.Image.Make").unwrap(),
            ExifValue::Ascii("Acme".into()),
        );
        let stale = ExifDatum::new(
            ExifKey::parse("Exif.Thumbnail.Orientation").unwrap(),
            ExifValue::Short(vec![3]),
        );
        let thumbnail = ExifThumbnail::new(shared(TagContainer::from_vec(vec![make, stale])));

        thumbnail.set_from_bytes(&tiny_jpeg()).unwrap();

        assert_eq!(thumbnail.data().unwrap(), Bytes::from(tiny_jpeg()));
        assert_eq!(thumbnail.mime_type(), "image/jpeg");
        assert_eq!(
            keys(&thumbnail),
            vec![
                "Exif.Image.Make",
                "Exif.Thumbnail.Compression",
                "Exif.Thumbnail.XResolution",
                "Exif.Thumbnail.YResolution",
                "Exif.Thumbnail.ResolutionUnit",
                "Exif.Thumbnail.JPEGInterchangeFormat",
                "Exif.Thumbnail.JPEGInterchangeFormatLength",
            ]
        );
    }

    #[test]
    fn test_set_from_bytes_rejects_non_jpeg() {
        let thumbnail = ExifThumbnail::new(shared(TagContainer::new()));
        let err = thumbnail.set_from_bytes(b"GIF89a").unwrap_err();
        assert!(matches!(err, MetadataError::InvalidValue { .. }));
        assert!(thumbnail.data().is_none());
    }

    #[test]
    fn test_write_to_file_appends_extension() {
        let thumbnail = ExifThumbnail::new(shared(TagContainer::new()));
        thumbnail.set_from_bytes(&tiny_jpeg()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let written = thumbnail.write_to_file(dir.path().join("thumb")).unwrap();
        assert_eq!(written, dir.path().join("thumb.jpg"));
        assert_eq!(std::fs::read(&written).unwrap(), tiny_jpeg());
    }

    #[test]
    fn test_erase() {
        let thumbnail = ExifThumbnail::new(shared(TagContainer::new()));
        thumbnail.set_from_bytes(&tiny_jpeg()).unwrap();
        thumbnail.erase();
        assert!(thumbnail.data().is_none());
        assert!(keys(&thumbnail).is_empty());
    }
}
