//! Tag binding tests.
//!
//! Tests verify, for every namespace:
//! - First attach of a detached tag copies its value into the image
//! - Attaching twice to the same image changes nothing
//! - Moving a tag to another image leaves the first image intact
//! - Attaching to an image without the key creates the entry

use imgmeta::{ExifTag, ExifValue, Image, IptcTag, XmpTag};

use super::test_utils::{create_test_jpeg, init_tracing, sample_jpeg};

fn read(data: &[u8]) -> Image {
    init_tracing();
    let mut image = Image::from_buffer(data).unwrap();
    image.read_metadata().unwrap();
    image
}

fn exif_values(image: &Image, key: &str) -> Vec<String> {
    image
        .exif_keys()
        .unwrap()
        .into_iter()
        .filter(|k| k == key)
        .map(|k| image.exif_tag(&k).unwrap().raw_value())
        .collect()
}

// =============================================================================
// Exif
// =============================================================================

#[test]
fn test_exif_first_attach_copies_value() {
    let image = read(&create_test_jpeg(8, 8, 50));
    let mut tag = ExifTag::new("Exif.Image.Artist").unwrap();
    tag.set_raw_value("Ada Lovelace").unwrap();
    assert!(!tag.is_attached());

    tag.set_parent_image(&image).unwrap();

    assert!(tag.is_attached());
    assert_eq!(exif_values(&image, "Exif.Image.Artist"), vec!["Ada Lovelace"]);
    assert_eq!(tag.byte_order(), Some(image.byte_order().unwrap()));
}

#[test]
fn test_exif_attach_twice_is_noop() {
    let image = read(&sample_jpeg());
    let mut tag = ExifTag::with_value("Exif.Image.Artist", ExifValue::Ascii("Ada".into())).unwrap();

    tag.set_parent_image(&image).unwrap();
    let once = image.exif_keys().unwrap();
    tag.set_parent_image(&image).unwrap();

    assert_eq!(image.exif_keys().unwrap(), once);
    assert_eq!(exif_values(&image, "Exif.Image.Artist"), vec!["Ada"]);
}

#[test]
fn test_exif_tag_from_image_reattached_is_noop() {
    let image = read(&sample_jpeg());
    let mut make = image.exif_tag("Exif.Image.Make").unwrap();
    make.set_parent_image(&image).unwrap();
    assert_eq!(exif_values(&image, "Exif.Image.Make"), vec!["Acme"]);
}

#[test]
fn test_exif_rebind_moves_value_and_keeps_source() {
    let first = read(&sample_jpeg());
    let second = read(&create_test_jpeg(8, 8, 50));

    let mut make = first.exif_tag("Exif.Image.Make").unwrap();
    make.set_parent_image(&second).unwrap();
    assert_eq!(exif_values(&second, "Exif.Image.Make"), vec!["Acme"]);
    assert_eq!(exif_values(&first, "Exif.Image.Make"), vec!["Acme"]);

    // Writes now go to the second image only
    make.set_raw_value("Moved").unwrap();
    assert_eq!(exif_values(&second, "Exif.Image.Make"), vec!["Moved"]);
    assert_eq!(exif_values(&first, "Exif.Image.Make"), vec!["Acme"]);
}

#[test]
fn test_exif_rebind_overwrites_existing_entry() {
    let first = read(&sample_jpeg());
    let second = read(&sample_jpeg());
    second
        .exif_tag("Exif.Image.Make")
        .unwrap()
        .set_raw_value("Other")
        .unwrap();

    let mut make = first.exif_tag("Exif.Image.Make").unwrap();
    make.set_parent_image(&second).unwrap();
    assert_eq!(exif_values(&second, "Exif.Image.Make"), vec!["Acme"]);
}

#[test]
fn test_exif_unset_tag_creates_entry() {
    let image = read(&create_test_jpeg(8, 8, 50));
    let mut tag = ExifTag::new("Exif.Photo.UserComment").unwrap();
    tag.set_parent_image(&image).unwrap();

    assert_eq!(image.exif_keys().unwrap(), vec!["Exif.Photo.UserComment"]);
    assert_eq!(image.exif_tag("Exif.Photo.UserComment").unwrap().raw_value(), "");

    // An entry without value is not written
    image.write_metadata().unwrap();
    let reread = read(&image.raw_bytes().unwrap());
    assert!(reread.exif_keys().unwrap().is_empty());
}

#[test]
fn test_dropping_attached_tag_keeps_entry() {
    let image = read(&sample_jpeg());
    {
        let mut tag = ExifTag::new("Exif.Image.Artist").unwrap();
        tag.set_raw_value("Grace").unwrap();
        tag.set_parent_image(&image).unwrap();
    }
    assert_eq!(exif_values(&image, "Exif.Image.Artist"), vec!["Grace"]);
}

// =============================================================================
// IPTC
// =============================================================================

#[test]
fn test_iptc_first_attach_copies_all_values() {
    let image = read(&create_test_jpeg(8, 8, 50));
    let mut tag = IptcTag::new("Iptc.Application2.Keywords").unwrap();
    tag.set_raw_values(&["a", "b", "c"]).unwrap();

    tag.set_parent_image(&image).unwrap();

    assert_eq!(image.iptc_keys().unwrap(), vec!["Iptc.Application2.Keywords"]);
    assert_eq!(
        image.iptc_tag("Iptc.Application2.Keywords").unwrap().raw_values(),
        vec!["a", "b", "c"]
    );
}

#[test]
fn test_iptc_attach_twice_is_noop() {
    let image = read(&sample_jpeg());
    let mut keywords = image.iptc_tag("Iptc.Application2.Keywords").unwrap();
    keywords.set_parent_image(&image).unwrap();
    keywords.set_parent_image(&image).unwrap();
    assert_eq!(keywords.raw_values(), vec!["beach", "sunset"]);
    assert_eq!(
        image.iptc_keys().unwrap(),
        vec!["Iptc.Application2.Keywords", "Iptc.Application2.City"]
    );
}

#[test]
fn test_iptc_rebind_replaces_values_in_target() {
    let first = read(&sample_jpeg());
    let second = read(&sample_jpeg());
    second
        .iptc_tag("Iptc.Application2.Keywords")
        .unwrap()
        .set_raw_values(&["one", "two", "three"])
        .unwrap();

    let mut keywords = first.iptc_tag("Iptc.Application2.Keywords").unwrap();
    keywords.set_parent_image(&second).unwrap();

    assert_eq!(
        second.iptc_tag("Iptc.Application2.Keywords").unwrap().raw_values(),
        vec!["beach", "sunset"]
    );
    assert_eq!(
        first.iptc_tag("Iptc.Application2.Keywords").unwrap().raw_values(),
        vec!["beach", "sunset"]
    );
}

// =============================================================================
// XMP
// =============================================================================

#[test]
fn test_xmp_first_attach_and_rebind() {
    let first = read(&create_test_jpeg(8, 8, 50));
    let second = read(&create_test_jpeg(8, 8, 50));

    let mut title = XmpTag::new("Xmp.dc.title").unwrap();
    title.set_lang_alt_value([("x-default", "Dawn")]).unwrap();
    title.set_parent_image(&first).unwrap();
    title.set_parent_image(&first).unwrap();
    assert_eq!(first.xmp_keys().unwrap(), vec!["Xmp.dc.title"]);

    title.set_parent_image(&second).unwrap();
    title.set_lang_alt_value([("x-default", "Dusk")]).unwrap();

    assert_eq!(
        first.xmp_tag("Xmp.dc.title").unwrap().lang_alt_value().unwrap(),
        vec![("x-default".to_string(), "Dawn".to_string())]
    );
    assert_eq!(
        second.xmp_tag("Xmp.dc.title").unwrap().lang_alt_value().unwrap(),
        vec![("x-default".to_string(), "Dusk".to_string())]
    );
}

#[test]
fn test_xmp_attached_tags_share_the_entry() {
    let image = read(&sample_jpeg());
    let mut a = image.xmp_tag("Xmp.dc.format").unwrap();
    let b = image.xmp_tag("Xmp.dc.format").unwrap();

    a.set_text_value("image/x-test").unwrap();
    assert_eq!(b.text_value().unwrap(), "image/x-test");
}
