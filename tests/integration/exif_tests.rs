//! Exif, thumbnail and preview integration tests.
//!
//! Tests verify:
//! - Values of both byte orders, raw and interpreted
//! - Writing keeps the byte order of the file
//! - Thumbnail extraction, replacement and removal
//! - Preview enumeration and extraction

use imgmeta::{ByteOrder, ExifTag, ExifValue, Image, MetadataError};

use super::test_utils::{
    create_test_jpeg, exif_segment, init_tracing, insert_segments, sample_jpeg, TiffBuilder,
};

fn read(data: &[u8]) -> Image {
    init_tracing();
    let mut image = Image::from_buffer(data).unwrap();
    image.read_metadata().unwrap();
    image
}

fn reread(image: &Image) -> Image {
    image.write_metadata().unwrap();
    read(&image.raw_bytes().unwrap())
}

fn big_endian_jpeg() -> Vec<u8> {
    let tiff = TiffBuilder::new()
        .big_endian()
        .ascii(0x010F, "Motorola")
        .short(0x0112, 6)
        .build();
    insert_segments(&create_test_jpeg(8, 8, 50), &[exif_segment(&tiff)])
}

// =============================================================================
// Values
// =============================================================================

#[test]
fn test_tag_values_and_metadata() {
    let image = read(&sample_jpeg());

    let make = image.exif_tag("Exif.Image.Make").unwrap();
    assert_eq!(make.raw_value(), "Acme");
    assert_eq!(make.type_name(), "Ascii");
    assert_eq!(make.label(), "Manufacturer");
    assert!(make.is_attached());

    let orientation = image.exif_tag("Exif.Image.Orientation").unwrap();
    assert_eq!(orientation.value(), Some(ExifValue::Short(vec![1])));
    assert_eq!(orientation.human_value(), "top, left");

    let resolution = image.exif_tag("Exif.Image.XResolution").unwrap();
    assert_eq!(resolution.raw_value(), "72/1");

    assert!(matches!(
        image.exif_tag("Exif.Image.Artist"),
        Err(MetadataError::KeyNotFound(_))
    ));
    assert!(matches!(
        image.exif_tag("Exif.Bogus.Make"),
        Err(MetadataError::InvalidKey(_))
    ));
}

#[test]
fn test_big_endian_values() {
    let image = read(&big_endian_jpeg());
    assert_eq!(image.byte_order().unwrap(), ByteOrder::BigEndian);
    assert_eq!(image.exif_tag("Exif.Image.Make").unwrap().raw_value(), "Motorola");
    assert_eq!(
        image.exif_tag("Exif.Image.Orientation").unwrap().human_value(),
        "right, top"
    );
}

#[test]
fn test_write_keeps_byte_order() {
    let image = read(&big_endian_jpeg());
    image
        .exif_tag("Exif.Image.Orientation")
        .unwrap()
        .set_raw_value("1")
        .unwrap();

    let reread = reread(&image);
    assert_eq!(reread.byte_order().unwrap(), ByteOrder::BigEndian);
    assert_eq!(reread.exif_tag("Exif.Image.Orientation").unwrap().raw_value(), "1");
}

#[test]
fn test_new_tags_in_sub_directories_round_trip() {
    let image = read(&sample_jpeg());
    let mut exposure = ExifTag::new("Exif.Photo.ExposureTime").unwrap();
    exposure.set_raw_value("1/60").unwrap();
    exposure.set_parent_image(&image).unwrap();
    let mut latitude = ExifTag::new("Exif.GPSInfo.GPSLatitudeRef").unwrap();
    latitude.set_raw_value("N").unwrap();
    latitude.set_parent_image(&image).unwrap();

    let reread = reread(&image);
    assert_eq!(
        reread.exif_tag("Exif.Photo.ExposureTime").unwrap().raw_value(),
        "1/60"
    );
    assert_eq!(
        reread.exif_tag("Exif.GPSInfo.GPSLatitudeRef").unwrap().raw_value(),
        "N"
    );
    assert_eq!(reread.exif_tag("Exif.Image.Make").unwrap().raw_value(), "Acme");
}

#[test]
fn test_user_comment_with_charset() {
    let image = read(&create_test_jpeg(8, 8, 50));
    let mut comment = ExifTag::new("Exif.Photo.UserComment").unwrap();
    comment.set_raw_value("charset=\"Unicode\" Héllo").unwrap();
    comment.set_parent_image(&image).unwrap();

    let reread = reread(&image);
    assert_eq!(
        reread.exif_tag("Exif.Photo.UserComment").unwrap().raw_value(),
        "charset=\"Unicode\" Héllo"
    );
}

// =============================================================================
// Thumbnail
// =============================================================================

#[test]
fn test_thumbnail_read() {
    let image = read(&sample_jpeg());
    let thumbnail = image.thumbnail().unwrap();
    let data = thumbnail.data().unwrap();
    assert_eq!(&data[..2], &[0xFF, 0xD8]);
    assert_eq!(thumbnail.mime_type(), "image/jpeg");
    assert_eq!(thumbnail.extension(), ".jpg");

    let dir = tempfile::tempdir().unwrap();
    let written = thumbnail.write_to_file(dir.path().join("thumb")).unwrap();
    assert_eq!(written, dir.path().join("thumb.jpg"));
    assert_eq!(std::fs::read(written).unwrap(), data);
}

#[test]
fn test_thumbnail_replace_and_write() {
    let image = read(&sample_jpeg());
    let replacement = create_test_jpeg(24, 12, 60);
    image.thumbnail().unwrap().set_from_bytes(&replacement).unwrap();

    let reread = reread(&image);
    assert_eq!(reread.thumbnail().unwrap().data().unwrap(), replacement);
    assert_eq!(reread.exif_tag("Exif.Image.Make").unwrap().raw_value(), "Acme");
}

#[test]
fn test_thumbnail_from_file() {
    let image = read(&create_test_jpeg(32, 32, 50));
    let replacement = create_test_jpeg(8, 8, 50);
    let (_dir, path) = super::test_utils::write_temp("thumb.jpg", &replacement);

    image.thumbnail().unwrap().set_from_file(&path).unwrap();
    assert_eq!(image.thumbnail().unwrap().data().unwrap(), replacement);

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.jpg");
    assert!(matches!(
        image.thumbnail().unwrap().set_from_file(&missing),
        Err(MetadataError::Io(_))
    ));
}

#[test]
fn test_thumbnail_erase() {
    let image = read(&sample_jpeg());
    image.thumbnail().unwrap().erase();
    assert!(image.thumbnail().unwrap().data().is_none());

    let reread = reread(&image);
    assert!(reread.thumbnail().unwrap().data().is_none());
    assert!(reread
        .exif_keys()
        .unwrap()
        .iter()
        .all(|k| !k.starts_with("Exif.Thumbnail.")));
}

// =============================================================================
// Previews
// =============================================================================

#[test]
fn test_previews_list_embedded_images() {
    let image = read(&sample_jpeg());
    let previews = image.previews().unwrap();
    assert_eq!(previews.len(), 1);

    let preview = &previews[0];
    assert_eq!(preview.mime_type(), "image/jpeg");
    assert_eq!(preview.extension(), ".jpg");
    assert_eq!(preview.dimensions(), (16, 8));
    assert_eq!(preview.size(), preview.data().len());

    let dir = tempfile::tempdir().unwrap();
    let written = preview.write_to_file(dir.path().join("preview")).unwrap();
    assert_eq!(std::fs::read(written).unwrap(), preview.data().to_vec());
}

#[test]
fn test_previews_are_snapshots() {
    let image = read(&sample_jpeg());
    let before = image.previews().unwrap();
    image.thumbnail().unwrap().erase();
    image.write_metadata().unwrap();

    assert!(image.previews().unwrap().is_empty());
    assert_eq!(before.len(), 1);
    assert!(!before[0].data().is_empty());
}

#[test]
fn test_no_previews_without_exif() {
    let image = read(&create_test_jpeg(8, 8, 50));
    assert!(image.previews().unwrap().is_empty());
}
