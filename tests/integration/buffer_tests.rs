//! Raw byte transfer and execution lock tests.
//!
//! Tests verify:
//! - Raw bytes match the file content, before and after a write
//! - Sources that deliver less than their reported size are truncated
//! - The configured buffer limit applies to raw-byte extraction
//! - The execution lock is released around codec work only

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use sha2::{Digest, Sha256};

use imgmeta::format::ImageHandle;
use imgmeta::io::{ByteSource, MemorySource};
use imgmeta::{Config, ExecutionLock, ExifTag, Image, MetadataError, OpenOptions};

use super::test_utils::{create_test_jpeg, init_tracing, sample_jpeg, write_temp};

fn digest(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

// =============================================================================
// Raw bytes
// =============================================================================

#[test]
fn test_raw_bytes_match_file() {
    init_tracing();
    let (_dir, path) = write_temp("photo.jpg", &sample_jpeg());
    let image = Image::open(&path).unwrap();

    let raw = image.raw_bytes().unwrap();
    assert_eq!(digest(&raw), digest(&std::fs::read(&path).unwrap()));
}

#[test]
fn test_raw_bytes_follow_writes() {
    init_tracing();
    let (_dir, path) = write_temp("photo.jpg", &sample_jpeg());
    let mut image = Image::open(&path).unwrap();
    image.read_metadata().unwrap();
    let before = digest(&image.raw_bytes().unwrap());

    let mut artist = ExifTag::new("Exif.Image.Artist").unwrap();
    artist.set_raw_value("Ada").unwrap();
    artist.set_parent_image(&image).unwrap();
    image.write_metadata().unwrap();

    let after = digest(&image.raw_bytes().unwrap());
    assert_ne!(before, after);
    assert_eq!(after, digest(&std::fs::read(&path).unwrap()));
}

#[test]
fn test_raw_bytes_are_independent_copies() {
    init_tracing();
    let image = Image::from_buffer(&sample_jpeg()).unwrap();
    let first = image.raw_bytes().unwrap();
    let second = image.raw_bytes().unwrap();
    assert_eq!(first, second);
    assert_ne!(first.as_ptr(), second.as_ptr());
}

#[test]
fn test_raw_bytes_respect_buffer_limit() {
    init_tracing();
    let data = sample_jpeg();
    let (_dir, path) = write_temp("photo.jpg", &data);
    let config = Config {
        max_buffer_size: (data.len() - 1) as u64,
        ..Config::default()
    };
    let image = OpenOptions::new().config(config).open(&path).unwrap();

    assert!(matches!(
        image.raw_bytes(),
        Err(MetadataError::OutOfMemory(_))
    ));
}

// -----------------------------------------------------------------------------
// Short sources
// -----------------------------------------------------------------------------

/// Claims more bytes than it holds.
struct OverstatedSource {
    inner: MemorySource,
    extra: u64,
}

impl ByteSource for OverstatedSource {
    fn open(&mut self) -> io::Result<()> {
        self.inner.open()
    }
    fn close(&mut self) -> io::Result<()> {
        self.inner.close()
    }
    fn is_open(&self) -> bool {
        self.inner.is_open()
    }
    fn tell(&mut self) -> io::Result<u64> {
        self.inner.tell()
    }
    fn seek(&mut self, offset: u64) -> io::Result<()> {
        self.inner.seek(offset)
    }
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
    fn size(&self) -> io::Result<u64> {
        Ok(self.inner.size()? + self.extra)
    }
    fn replace(&mut self, data: &[u8]) -> io::Result<()> {
        self.inner.replace(data)
    }
    fn identifier(&self) -> &str {
        "overstated://"
    }
}

#[test]
fn test_short_source_is_truncated() {
    init_tracing();
    let data = sample_jpeg();
    let source = OverstatedSource {
        inner: MemorySource::new(data.clone()),
        extra: 512,
    };
    let handle = ImageHandle::open(Box::new(source), Config::default()).unwrap();

    let raw = handle.raw_bytes().unwrap();
    assert_eq!(raw, Bytes::from(data));
    assert!(!handle.read().unwrap().exif.is_empty());
}

// =============================================================================
// Execution lock
// =============================================================================

#[derive(Default)]
struct CountingLock {
    held: AtomicBool,
    releases: AtomicUsize,
}

impl ExecutionLock for CountingLock {
    fn release(&self) {
        assert!(self.held.swap(false, Ordering::SeqCst), "released twice");
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
    fn reacquire(&self) {
        assert!(!self.held.swap(true, Ordering::SeqCst), "reacquired twice");
    }
}

impl CountingLock {
    fn held() -> Arc<Self> {
        let lock = Arc::new(Self::default());
        lock.held.store(true, Ordering::SeqCst);
        lock
    }

    fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

#[test]
fn test_lock_released_around_codec_work() {
    init_tracing();
    let lock = CountingLock::held();
    let (_dir, path) = write_temp("photo.jpg", &sample_jpeg());

    let mut image = OpenOptions::new()
        .execution_lock(lock.clone())
        .open(&path)
        .unwrap();
    assert_eq!(lock.releases(), 1);

    image.read_metadata().unwrap();
    assert_eq!(lock.releases(), 2);

    // Container access does not touch the lock
    let _ = image.exif_keys().unwrap();
    let make = image.exif_tag("Exif.Image.Make").unwrap();
    assert_eq!(make.raw_value(), "Acme");
    assert_eq!(lock.releases(), 2);

    image.write_metadata().unwrap();
    image.raw_bytes().unwrap();
    assert_eq!(lock.releases(), 4);
    assert!(lock.held.load(Ordering::SeqCst));
}

#[test]
fn test_lock_reacquired_on_failure() {
    init_tracing();
    let lock = CountingLock::held();

    let err = OpenOptions::new()
        .execution_lock(lock.clone())
        .from_buffer(b"not an image at all")
        .unwrap_err();
    assert!(matches!(err, MetadataError::UnreadableImage(_)));
    assert_eq!(lock.releases(), 1);
    assert!(lock.held.load(Ordering::SeqCst));

    let image = OpenOptions::new()
        .execution_lock(lock.clone())
        .from_buffer(&create_test_jpeg(8, 8, 50))
        .unwrap();
    assert!(image.write_metadata().is_err());
    assert_eq!(lock.releases(), 2);
    assert!(lock.held.load(Ordering::SeqCst));
}
