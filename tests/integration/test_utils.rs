//! Test utilities for integration tests.
//!
//! This module builds fixture images: baseline JPEGs encoded with the `image`
//! crate, Exif/TIFF structures, and the APP segments carrying IPTC and XMP.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, Once, PoisonError};

use image::codecs::jpeg::JpegEncoder;
use image::{GrayImage, Luma};
use tempfile::TempDir;

// =============================================================================
// Tracing and global state
// =============================================================================

static TRACING: Once = Once::new();

/// Install a test subscriber once; filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

static REGISTRY_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that change the process-wide namespace registry.
pub fn registry_lock() -> MutexGuard<'static, ()> {
    REGISTRY_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// Test JPEG Creation
// =============================================================================

/// Create a grayscale baseline JPEG.
pub fn create_test_jpeg(width: u32, height: u32, quality: u8) -> Vec<u8> {
    let img = GrayImage::from_fn(width, height, |x, y| {
        let val = ((x + y) % 256) as u8;
        Luma([val])
    });

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode_image(&img).unwrap();
    buf
}

/// Wrap `payload` in a marker segment.
pub fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, marker];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// APP1 Exif segment around a TIFF structure.
pub fn exif_segment(tiff: &[u8]) -> Vec<u8> {
    segment(0xE1, &[b"Exif\0\0".as_slice(), tiff].concat())
}

/// APP1 XMP segment around a packet.
pub fn xmp_segment(packet: &str) -> Vec<u8> {
    segment(
        0xE1,
        &[b"http://ns.adobe.com/xap/1.0/\0".as_slice(), packet.as_bytes()].concat(),
    )
}

/// IPTC-IIM datasets as `(record, dataset, value)`.
pub fn iim(datasets: &[(u8, u8, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    for (record, dataset, value) in datasets {
        out.extend_from_slice(&[0x1C, *record, *dataset]);
        out.extend_from_slice(&(value.len() as u16).to_be_bytes());
        out.extend_from_slice(value);
    }
    out
}

/// APP13 segment holding a single 8BIM IPTC resource.
pub fn iptc_segment(datasets: &[(u8, u8, &[u8])]) -> Vec<u8> {
    let data = iim(datasets);
    let mut payload = b"Photoshop 3.0\0".to_vec();
    payload.extend_from_slice(b"8BIM");
    payload.extend_from_slice(&0x0404u16.to_be_bytes());
    payload.extend_from_slice(&[0, 0]);
    payload.extend_from_slice(&(data.len() as u32).to_be_bytes());
    payload.extend_from_slice(&data);
    if data.len() % 2 == 1 {
        payload.push(0);
    }
    segment(0xED, &payload)
}

/// Insert segments after SOI and a leading APP0.
pub fn insert_segments(jpeg: &[u8], segments: &[Vec<u8>]) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "not a JPEG stream");
    let mut at = 2;
    if jpeg[2..4] == [0xFF, 0xE0] {
        at += 2 + u16::from_be_bytes([jpeg[4], jpeg[5]]) as usize;
    }
    let mut out = jpeg[..at].to_vec();
    for s in segments {
        out.extend_from_slice(s);
    }
    out.extend_from_slice(&jpeg[at..]);
    out
}

// =============================================================================
// TIFF Structure Builder
// =============================================================================

#[derive(Debug, Clone)]
struct TiffEntry {
    tag: u16,
    field_type: u16,
    count: u32,
    data: Vec<u8>,
}

/// Builder for a TIFF structure with one IFD0 and an optional JPEG
/// thumbnail in IFD1.
#[derive(Debug, Clone)]
pub struct TiffBuilder {
    little_endian: bool,
    entries: Vec<TiffEntry>,
    thumbnail: Option<Vec<u8>>,
}

impl Default for TiffBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TiffBuilder {
    pub fn new() -> Self {
        Self {
            little_endian: true,
            entries: Vec::new(),
            thumbnail: None,
        }
    }

    pub fn big_endian(mut self) -> Self {
        self.little_endian = false;
        self
    }

    pub fn ascii(mut self, tag: u16, value: &str) -> Self {
        let mut data = value.as_bytes().to_vec();
        data.push(0);
        self.push(tag, 2, data.len() as u32, data);
        self
    }

    pub fn short(mut self, tag: u16, value: u16) -> Self {
        let data = self.u16_bytes(value);
        self.push(tag, 3, 1, data);
        self
    }

    pub fn long(mut self, tag: u16, value: u32) -> Self {
        let data = self.u32_bytes(value);
        self.push(tag, 4, 1, data);
        self
    }

    pub fn rational(mut self, tag: u16, numerator: u32, denominator: u32) -> Self {
        let mut data = self.u32_bytes(numerator);
        data.extend(self.u32_bytes(denominator));
        self.push(tag, 5, 1, data);
        self
    }

    /// Raw UNDEFINED bytes, such as an IPTC or XMP carrier.
    pub fn undefined(mut self, tag: u16, data: &[u8]) -> Self {
        self.push(tag, 7, data.len() as u32, data.to_vec());
        self
    }

    pub fn thumbnail(mut self, jpeg: Vec<u8>) -> Self {
        self.thumbnail = Some(jpeg);
        self
    }

    fn push(&mut self, tag: u16, field_type: u16, count: u32, data: Vec<u8>) {
        self.entries.push(TiffEntry {
            tag,
            field_type,
            count,
            data,
        });
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(if self.little_endian { b"II" } else { b"MM" });
        out.extend(self.u16_bytes(42));
        out.extend(self.u32_bytes(8));

        let mut entries = self.entries.clone();
        entries.sort_by_key(|e| e.tag);
        let next = self.write_ifd(&mut out, &entries);

        if let Some(jpeg) = &self.thumbnail {
            if out.len() % 2 == 1 {
                out.push(0);
            }
            let ifd1_start = out.len() as u32;
            let ifd1_size = 2 + 12 * 3 + 4;
            out[next..next + 4].copy_from_slice(&self.u32_bytes(ifd1_start));

            let ifd1 = vec![
                TiffEntry {
                    tag: 0x0103,
                    field_type: 3,
                    count: 1,
                    data: self.u16_bytes(6),
                },
                TiffEntry {
                    tag: 0x0201,
                    field_type: 4,
                    count: 1,
                    data: self.u32_bytes(ifd1_start + ifd1_size),
                },
                TiffEntry {
                    tag: 0x0202,
                    field_type: 4,
                    count: 1,
                    data: self.u32_bytes(jpeg.len() as u32),
                },
            ];
            self.write_ifd(&mut out, &ifd1);
            out.extend_from_slice(jpeg);
        }
        out
    }

    /// Write a directory and its value area; returns the position of its
    /// next-IFD pointer.
    fn write_ifd(&self, out: &mut Vec<u8>, entries: &[TiffEntry]) -> usize {
        let start = out.len();
        let mut data_offset = start + 2 + 12 * entries.len() + 4;
        let mut values = Vec::new();

        out.extend(self.u16_bytes(entries.len() as u16));
        for entry in entries {
            out.extend(self.u16_bytes(entry.tag));
            out.extend(self.u16_bytes(entry.field_type));
            out.extend(self.u32_bytes(entry.count));
            if entry.data.len() <= 4 {
                let mut inline = entry.data.clone();
                inline.resize(4, 0);
                out.extend(inline);
            } else {
                out.extend(self.u32_bytes(data_offset as u32));
                values.extend_from_slice(&entry.data);
                data_offset += entry.data.len();
                if entry.data.len() % 2 == 1 {
                    values.push(0);
                    data_offset += 1;
                }
            }
        }
        let next = out.len();
        out.extend(self.u32_bytes(0));
        out.extend(values);
        next
    }

    fn u16_bytes(&self, value: u16) -> Vec<u8> {
        if self.little_endian {
            value.to_le_bytes().to_vec()
        } else {
            value.to_be_bytes().to_vec()
        }
    }

    fn u32_bytes(&self, value: u32) -> Vec<u8> {
        if self.little_endian {
            value.to_le_bytes().to_vec()
        } else {
            value.to_be_bytes().to_vec()
        }
    }
}

// =============================================================================
// Sample Images
// =============================================================================

pub const SAMPLE_XMP: &str = r#"<?xpacket begin="" id="W5M0MpCehiHzreSzNTczkc9d"?>
<x:xmpmeta xmlns:x="adobe:ns:meta/">
 <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about=""
    xmlns:dc="http://purl.org/dc/elements/1.1/"
    xmlns:xmp="http://ns.adobe.com/xap/1.0/"
    xmp:Rating="3">
   <dc:format>image/jpeg</dc:format>
   <dc:subject>
    <rdf:Bag><rdf:li>beach</rdf:li><rdf:li>sunset</rdf:li></rdf:Bag>
   </dc:subject>
   <dc:title>
    <rdf:Alt>
     <rdf:li xml:lang="x-default">Holiday</rdf:li>
     <rdf:li xml:lang="fr-FR">Vacances</rdf:li>
    </rdf:Alt>
   </dc:title>
  </rdf:Description>
 </rdf:RDF>
</x:xmpmeta>
<?xpacket end="w"?>"#;

/// Exif block of the sample image: Make, Model, Orientation and a
/// 16x8 thumbnail.
pub fn sample_tiff() -> Vec<u8> {
    TiffBuilder::new()
        .ascii(0x010F, "Acme")
        .ascii(0x0110, "Roadrunner 3000")
        .short(0x0112, 1)
        .rational(0x011A, 72, 1)
        .thumbnail(create_test_jpeg(16, 8, 50))
        .build()
}

/// 64x48 JPEG carrying Exif, IPTC and XMP.
///
/// IPTC holds `Keywords` twice (`beach`, `sunset`) and `City` once.
pub fn sample_jpeg() -> Vec<u8> {
    insert_segments(
        &create_test_jpeg(64, 48, 80),
        &[
            exif_segment(&sample_tiff()),
            xmp_segment(SAMPLE_XMP),
            iptc_segment(&[
                (2, 25, b"beach"),
                (2, 90, b"Paris"),
                (2, 25, b"sunset"),
            ]),
        ],
    )
}

/// Write `data` to a file in a fresh temporary directory.
pub fn write_temp(name: &str, data: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, data).unwrap();
    (dir, path)
}
