//! Image lifecycle tests.
//!
//! Tests verify:
//! - Opening files and buffers, and rejection of non-images
//! - The metadata-read guard on every metadata accessor
//! - Write-then-read round trips for buffers and files
//! - Comments, deletions and metadata copies between images

use imgmeta::{Config, Image, MetadataError, OpenOptions};

use super::test_utils::{
    create_test_jpeg, init_tracing, sample_jpeg, sample_tiff, write_temp, TiffBuilder,
};

fn read_sample() -> Image {
    init_tracing();
    let mut image = Image::from_buffer(&sample_jpeg()).unwrap();
    image.read_metadata().unwrap();
    image
}

type Snapshot = (
    Vec<(String, String)>,
    Vec<(String, Vec<String>)>,
    Vec<(String, String)>,
);

/// All key/value pairs of an image, as strings.
///
/// The thumbnail offset is left out: it is laid out anew on every write.
fn snapshot(image: &Image) -> Snapshot {
    let exif = image
        .exif_keys()
        .unwrap()
        .into_iter()
        .map(|k| {
            let value = if k == "Exif.Thumbnail.JPEGInterchangeFormat" {
                String::new()
            } else {
                image.exif_tag(&k).unwrap().raw_value()
            };
            (k, value)
        })
        .collect();
    let iptc = image
        .iptc_keys()
        .unwrap()
        .into_iter()
        .map(|k| {
            let values = image.iptc_tag(&k).unwrap().raw_values();
            (k, values)
        })
        .collect();
    let xmp = image
        .xmp_keys()
        .unwrap()
        .into_iter()
        .map(|k| {
            let value = image.xmp_tag(&k).unwrap().raw_value();
            (k, value)
        })
        .collect();
    (exif, iptc, xmp)
}

// =============================================================================
// Open
// =============================================================================

#[test]
fn test_open_buffer_and_read() {
    let image = read_sample();

    assert_eq!(image.mime_type().unwrap(), "image/jpeg");
    assert_eq!(image.pixel_width().unwrap(), 64);
    assert_eq!(image.pixel_height().unwrap(), 48);
    assert_eq!(image.comment().unwrap(), None);
    assert_eq!(image.identifier(), "memory://");
    assert!(image.is_metadata_read());

    assert_eq!(
        image.exif_keys().unwrap(),
        vec![
            "Exif.Image.Make",
            "Exif.Image.Model",
            "Exif.Image.Orientation",
            "Exif.Image.XResolution",
            "Exif.Thumbnail.Compression",
            "Exif.Thumbnail.JPEGInterchangeFormat",
            "Exif.Thumbnail.JPEGInterchangeFormatLength",
        ]
    );
    assert_eq!(
        image.xmp_keys().unwrap(),
        vec!["Xmp.xmp.Rating", "Xmp.dc.format", "Xmp.dc.subject", "Xmp.dc.title"]
    );
}

#[test]
fn test_open_file() {
    init_tracing();
    let (_dir, path) = write_temp("sample.jpg", &sample_jpeg());
    let mut image = Image::open(&path).unwrap();
    assert_eq!(image.identifier(), path.display().to_string());

    image.read_metadata().unwrap();
    assert_eq!(image.exif_tag("Exif.Image.Make").unwrap().raw_value(), "Acme");
}

#[test]
fn test_open_rejects_non_images() {
    init_tracing();
    let err = Image::from_buffer(b"GIF89a\x01\x00\x01\x00").unwrap_err();
    assert!(matches!(err, MetadataError::UnreadableImage(_)));

    let err = Image::from_buffer(&[]).unwrap_err();
    assert!(matches!(err, MetadataError::UnreadableImage(_)));

    let (_dir, path) = write_temp("notes.txt", b"just some text");
    let err = Image::open(&path).unwrap_err();
    assert!(matches!(err, MetadataError::UnreadableImage(_)));
}

#[test]
fn test_open_missing_file_is_io_error() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let err = Image::open(dir.path().join("missing.jpg")).unwrap_err();
    assert!(matches!(err, MetadataError::Io(_)));
}

#[test]
fn test_buffer_larger_than_limit_is_out_of_memory() {
    init_tracing();
    let config = Config {
        max_buffer_size: 128,
        ..Config::default()
    };
    let err = OpenOptions::new()
        .config(config)
        .from_buffer(&sample_jpeg())
        .unwrap_err();
    assert!(matches!(err, MetadataError::OutOfMemory(_)));
}

#[test]
fn test_buffer_is_copied_at_open() {
    init_tracing();
    let mut data = sample_jpeg();
    let mut image = Image::from_buffer(&data).unwrap();
    data.iter_mut().for_each(|b| *b = 0);
    drop(data);

    image.read_metadata().unwrap();
    assert_eq!(image.exif_tag("Exif.Image.Make").unwrap().raw_value(), "Acme");
}

// =============================================================================
// Metadata-read guard
// =============================================================================

#[test]
fn test_accessors_fail_before_read() {
    init_tracing();
    let image = Image::from_buffer(&sample_jpeg()).unwrap();
    let not_read = |r: Result<(), MetadataError>| matches!(r, Err(MetadataError::MetadataNotRead));

    assert!(not_read(image.pixel_width().map(drop)));
    assert!(not_read(image.pixel_height().map(drop)));
    assert!(not_read(image.mime_type().map(drop)));
    assert!(not_read(image.comment().map(drop)));
    assert!(not_read(image.byte_order().map(drop)));
    assert!(not_read(image.iptc_charset().map(drop)));
    assert!(not_read(image.exif_keys().map(drop)));
    assert!(not_read(image.iptc_keys().map(drop)));
    assert!(not_read(image.xmp_keys().map(drop)));
    assert!(not_read(image.exif_tag("Exif.Image.Make").map(drop)));
    assert!(not_read(image.iptc_tag("Iptc.Application2.City").map(drop)));
    assert!(not_read(image.xmp_tag("Xmp.dc.format").map(drop)));
    assert!(not_read(image.delete_exif_tag("Exif.Image.Make")));
    assert!(not_read(image.thumbnail().map(drop)));
    assert!(not_read(image.previews().map(drop)));
    assert!(not_read(image.write_metadata()));
}

#[test]
fn test_raw_bytes_do_not_need_read() {
    init_tracing();
    let data = sample_jpeg();
    let image = Image::from_buffer(&data).unwrap();
    assert_eq!(image.raw_bytes().unwrap(), data);
}

#[test]
fn test_tag_attach_fails_before_read() {
    init_tracing();
    let image = Image::from_buffer(&sample_jpeg()).unwrap();
    let mut tag = imgmeta::ExifTag::new("Exif.Image.Artist").unwrap();
    assert!(matches!(
        tag.set_parent_image(&image),
        Err(MetadataError::MetadataNotRead)
    ));
    assert!(!tag.is_attached());
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn test_write_without_changes_keeps_metadata() {
    let image = read_sample();
    let before = snapshot(&image);
    image.write_metadata().unwrap();

    let mut reread = Image::from_buffer(&image.raw_bytes().unwrap()).unwrap();
    reread.read_metadata().unwrap();
    assert_eq!(snapshot(&reread), before);
    assert_eq!(reread.pixel_width().unwrap(), 64);
}

#[test]
fn test_write_is_idempotent() {
    let image = read_sample();
    image.write_metadata().unwrap();
    let first = image.raw_bytes().unwrap();
    image.write_metadata().unwrap();
    assert_eq!(image.raw_bytes().unwrap(), first);
}

#[test]
fn test_write_to_file_and_reopen() {
    init_tracing();
    let (_dir, path) = write_temp("edit.jpg", &sample_jpeg());
    {
        let mut image = Image::open(&path).unwrap();
        image.read_metadata().unwrap();
        image
            .exif_tag("Exif.Image.Make")
            .unwrap()
            .set_raw_value("Wile E.")
            .unwrap();
        image.set_comment("edited").unwrap();
        image.write_metadata().unwrap();
    }

    let mut image = Image::open(&path).unwrap();
    image.read_metadata().unwrap();
    assert_eq!(image.exif_tag("Exif.Image.Make").unwrap().raw_value(), "Wile E.");
    assert_eq!(image.comment().unwrap(), Some("edited"));
}

#[test]
fn test_reading_again_discards_changes() {
    let mut image = read_sample();
    let mut make = image.exif_tag("Exif.Image.Make").unwrap();
    make.set_raw_value("Changed").unwrap();

    image.read_metadata().unwrap();
    assert_eq!(make.raw_value(), "Acme");
    assert!(make.is_attached());
}

#[test]
fn test_plain_jpeg_gains_metadata() {
    init_tracing();
    let mut image = Image::from_buffer(&create_test_jpeg(40, 30, 75)).unwrap();
    image.read_metadata().unwrap();
    assert!(image.exif_keys().unwrap().is_empty());
    assert!(image.iptc_keys().unwrap().is_empty());
    assert!(image.xmp_keys().unwrap().is_empty());

    imgmeta::ExifTag::with_value("Exif.Image.Artist", imgmeta::ExifValue::Ascii("Ada".into()))
        .unwrap()
        .set_parent_image(&image)
        .unwrap();
    image.write_metadata().unwrap();

    let mut reread = Image::from_buffer(&image.raw_bytes().unwrap()).unwrap();
    reread.read_metadata().unwrap();
    assert_eq!(reread.exif_keys().unwrap(), vec!["Exif.Image.Artist"]);
    assert_eq!((reread.pixel_width().unwrap(), reread.pixel_height().unwrap()), (40, 30));
}

#[test]
fn test_tiff_is_read_only() {
    init_tracing();
    let tiff = TiffBuilder::new()
        .long(0x0100, 20)
        .long(0x0101, 10)
        .ascii(0x010F, "Acme")
        .build();
    let mut image = Image::from_buffer(&tiff).unwrap();
    image.read_metadata().unwrap();

    assert_eq!(image.mime_type().unwrap(), "image/tiff");
    assert_eq!((image.pixel_width().unwrap(), image.pixel_height().unwrap()), (20, 10));
    assert_eq!(image.exif_tag("Exif.Image.Make").unwrap().raw_value(), "Acme");
    assert!(matches!(image.write_metadata(), Err(MetadataError::Unsupported(_))));
}

#[test]
fn test_corrupt_exif_fails_read() {
    init_tracing();
    let mut broken = sample_tiff();
    broken[0] = b'X';
    broken[1] = b'X';
    let data = super::test_utils::insert_segments(
        &create_test_jpeg(8, 8, 50),
        &[super::test_utils::exif_segment(&broken)],
    );
    let mut image = Image::from_buffer(&data).unwrap();
    assert!(matches!(
        image.read_metadata(),
        Err(MetadataError::CorruptMetadata(_))
    ));
    assert!(!image.is_metadata_read());
}

// =============================================================================
// Comment, delete, copy
// =============================================================================

#[test]
fn test_comment_set_and_clear() {
    let mut image = read_sample();
    image.set_comment("Sunset over the bay").unwrap();
    image.write_metadata().unwrap();

    let mut reread = Image::from_buffer(&image.raw_bytes().unwrap()).unwrap();
    reread.read_metadata().unwrap();
    assert_eq!(reread.comment().unwrap(), Some("Sunset over the bay"));

    reread.clear_comment().unwrap();
    reread.write_metadata().unwrap();
    let mut cleared = Image::from_buffer(&reread.raw_bytes().unwrap()).unwrap();
    cleared.read_metadata().unwrap();
    assert_eq!(cleared.comment().unwrap(), None);
}

#[test]
fn test_delete_tags() {
    let image = read_sample();

    image.delete_exif_tag("Exif.Image.Model").unwrap();
    assert!(!image.exif_keys().unwrap().contains(&"Exif.Image.Model".to_string()));
    assert!(matches!(
        image.delete_exif_tag("Exif.Image.Model"),
        Err(MetadataError::KeyNotFound(_))
    ));

    image.delete_xmp_tag("Xmp.dc.subject").unwrap();
    assert!(matches!(
        image.xmp_tag("Xmp.dc.subject"),
        Err(MetadataError::KeyNotFound(_))
    ));
    assert!(matches!(
        image.delete_exif_tag("Exif.Image"),
        Err(MetadataError::InvalidKey(_))
    ));
}

#[test]
fn test_copy_metadata_is_a_snapshot() {
    let source = read_sample();
    let mut target = Image::from_buffer(&create_test_jpeg(16, 16, 50)).unwrap();

    assert!(matches!(
        source.copy_metadata(&mut target, true, true, true),
        Err(MetadataError::MetadataNotRead)
    ));
    target.read_metadata().unwrap();

    source.copy_metadata(&mut target, true, false, true).unwrap();
    assert_eq!(target.exif_keys().unwrap(), source.exif_keys().unwrap());
    assert_eq!(target.xmp_keys().unwrap(), source.xmp_keys().unwrap());
    assert!(target.iptc_keys().unwrap().is_empty());

    // Later edits on either side stay local
    source
        .exif_tag("Exif.Image.Make")
        .unwrap()
        .set_raw_value("Source only")
        .unwrap();
    assert_eq!(target.exif_tag("Exif.Image.Make").unwrap().raw_value(), "Acme");
}
