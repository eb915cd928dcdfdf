use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

/// Seekable byte stream backing an opened image.
///
/// This abstraction lets the codec work the same way over files and owned
/// in-memory buffers. A source can be open or closed; the raw-byte transfer
/// protocol relies on being able to tell the two apart and restore either
/// state afterwards.
pub trait ByteSource: Send {
    /// Open the stream, positioned at offset 0.
    fn open(&mut self) -> io::Result<()>;

    /// Close the stream.
    fn close(&mut self) -> io::Result<()>;

    /// Whether the stream is currently open.
    fn is_open(&self) -> bool;

    /// Current read offset. The stream must be open.
    fn tell(&mut self) -> io::Result<u64>;

    /// Move the read offset. The stream must be open.
    fn seek(&mut self, offset: u64) -> io::Result<()>;

    /// Read up to `buf.len()` bytes, returning how many were read.
    ///
    /// Returns 0 at end of stream.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Total size of the stream in bytes.
    fn size(&self) -> io::Result<u64>;

    /// Replace the whole content of the stream.
    ///
    /// An open stream stays open and is positioned at offset 0.
    fn replace(&mut self, data: &[u8]) -> io::Result<()>;

    /// Identifier for logging (path or `memory://`).
    fn identifier(&self) -> &str;
}

fn not_open() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "stream is not open")
}

// =============================================================================
// FileSource
// =============================================================================

/// A file on disk, opened lazily.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    identifier: String,
    file: Option<File>,
}

impl FileSource {
    /// Create a source for `path`, checking that the file exists.
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = std::fs::metadata(&path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        Ok(Self {
            identifier: path.display().to_string(),
            path,
            file: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&mut self) -> io::Result<&mut File> {
        self.file.as_mut().ok_or_else(not_open)
    }
}

impl ByteSource for FileSource {
    fn open(&mut self) -> io::Result<()> {
        self.file = Some(File::open(&self.path)?);
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.file = None;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn tell(&mut self) -> io::Result<u64> {
        self.file()?.stream_position()
    }

    fn seek(&mut self, offset: u64) -> io::Result<()> {
        self.file()?.seek(SeekFrom::Start(offset)).map(|_| ())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file()?.read(buf)
    }

    fn size(&self) -> io::Result<u64> {
        Ok(std::fs::metadata(&self.path)?.len())
    }

    fn replace(&mut self, data: &[u8]) -> io::Result<()> {
        let was_open = self.is_open();
        self.file = None;

        // Write next to the original so the rename stays on one filesystem.
        let mut temp_name = self.path.file_name().unwrap_or_default().to_os_string();
        temp_name.push(".imgmeta-tmp");
        let temp_path = self.path.with_file_name(temp_name);

        let result = (|| {
            let mut temp = File::create(&temp_path)?;
            temp.write_all(data)?;
            temp.sync_all()?;
            std::fs::rename(&temp_path, &self.path)
        })();

        if result.is_err() {
            let _ = std::fs::remove_file(&temp_path);
        }
        result?;

        debug!(path = %self.identifier, bytes = data.len(), "replaced file content");

        if was_open {
            self.open()?;
        }
        Ok(())
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

// =============================================================================
// MemorySource
// =============================================================================

/// An owned in-memory buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: Vec<u8>,
    position: usize,
    open: bool,
}

impl MemorySource {
    /// Take ownership of a copy of `data`.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            position: 0,
            open: false,
        }
    }
}

impl ByteSource for MemorySource {
    fn open(&mut self) -> io::Result<()> {
        self.open = true;
        self.position = 0;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.open = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn tell(&mut self) -> io::Result<u64> {
        if !self.open {
            return Err(not_open());
        }
        Ok(self.position as u64)
    }

    fn seek(&mut self, offset: u64) -> io::Result<()> {
        if !self.open {
            return Err(not_open());
        }
        self.position = usize::try_from(offset)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "offset too large"))?;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.open {
            return Err(not_open());
        }
        let start = self.position.min(self.data.len());
        let count = buf.len().min(self.data.len() - start);
        buf[..count].copy_from_slice(&self.data[start..start + count]);
        self.position = start + count;
        Ok(count)
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.data.len() as u64)
    }

    fn replace(&mut self, data: &[u8]) -> io::Result<()> {
        self.data = data.to_vec();
        self.position = 0;
        Ok(())
    }

    fn identifier(&self) -> &str {
        "memory://"
    }
}
