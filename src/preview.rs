//! Embedded preview images.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::debug;

use crate::error::Result;
use crate::format::PreviewImage;

/// A copy of one embedded preview image.
///
/// The bytes are captured when the previews are listed; the preview keeps
/// no link to the image it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    inner: PreviewImage,
}

impl From<PreviewImage> for Preview {
    fn from(inner: PreviewImage) -> Self {
        Self { inner }
    }
}

impl Preview {
    pub fn mime_type(&self) -> &'static str {
        self.inner.mime_type
    }

    /// Extension including the leading dot, such as `.jpg`.
    pub fn extension(&self) -> &'static str {
        self.inner.extension
    }

    /// Size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.inner.data.len()
    }

    pub fn width(&self) -> u32 {
        self.inner.width
    }

    pub fn height(&self) -> u32 {
        self.inner.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    pub fn data(&self) -> &Bytes {
        &self.inner.data
    }

    /// Write the preview to `path` with the extension appended.
    ///
    /// Returns the path written.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let mut target = path.as_ref().as_os_str().to_os_string();
        target.push(self.extension());
        let target = PathBuf::from(target);
        std::fs::write(&target, &self.inner.data)?;
        debug!(path = %target.display(), bytes = self.size(), "wrote preview");
        Ok(target)
    }
}
