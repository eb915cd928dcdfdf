//! IPTC integration tests.
//!
//! Tests verify:
//! - Repeatable datasets listed once per key, in first-occurrence order
//! - Value lists replaced as a whole, never partially
//! - Single-valued datasets refusing lists
//! - Character set detection and the UTF-8 marker on write

use imgmeta::{Image, IptcTag, IptcValue, MetadataError};

use super::test_utils::{create_test_jpeg, init_tracing, insert_segments, iptc_segment, sample_jpeg};

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

// =============================================================================
// Keys
// =============================================================================

#[test]
fn test_keys_are_deduplicated_in_order() {
    let image = read(&sample_jpeg());
    assert_eq!(
        image.iptc_keys().unwrap(),
        vec!["Iptc.Application2.Keywords", "Iptc.Application2.City"]
    );
}

#[test]
fn test_tag_collects_every_value() {
    let image = read(&sample_jpeg());
    let keywords = image.iptc_tag("Iptc.Application2.Keywords").unwrap();
    assert_eq!(keywords.raw_values(), vec!["beach", "sunset"]);
    assert!(keywords.is_attached());

    let city = image.iptc_tag("Iptc.Application2.City").unwrap();
    assert_eq!(city.values(), vec![IptcValue::text("Paris")]);

    assert!(matches!(
        image.iptc_tag("Iptc.Application2.Caption"),
        Err(MetadataError::KeyNotFound(_))
    ));
    assert!(matches!(
        image.iptc_tag("Iptc.Application2"),
        Err(MetadataError::InvalidKey(_))
    ));
}

#[test]
fn test_duplicated_single_valued_dataset_is_refused() {
    let data = insert_segments(
        &create_test_jpeg(8, 8, 50),
        &[iptc_segment(&[(2, 90, b"Paris"), (2, 90, b"Lyon")])],
    );
    let image = read(&data);
    assert!(matches!(
        image.iptc_tag("Iptc.Application2.City"),
        Err(MetadataError::NotRepeatable(_))
    ));
}

// =============================================================================
// Values
// =============================================================================

#[test]
fn test_repeatable_values_replace_all_entries() {
    let image = read(&sample_jpeg());
    let mut keywords = image.iptc_tag("Iptc.Application2.Keywords").unwrap();

    keywords.set_raw_values(&["a", "b", "c"]).unwrap();
    keywords.set_raw_values(&["x"]).unwrap();

    let reread = reread(&image);
    assert_eq!(
        reread.iptc_tag("Iptc.Application2.Keywords").unwrap().raw_values(),
        vec!["x"]
    );
    assert_eq!(
        reread.iptc_tag("Iptc.Application2.City").unwrap().raw_values(),
        vec!["Paris"]
    );
}

#[test]
fn test_list_on_single_valued_dataset_fails() {
    let image = read(&sample_jpeg());
    let mut city = image.iptc_tag("Iptc.Application2.City").unwrap();

    let err = city.set_raw_values(&["Paris", "Lyon"]).unwrap_err();
    assert!(matches!(err, MetadataError::NotRepeatable(_)));
    assert_eq!(
        image.iptc_tag("Iptc.Application2.City").unwrap().raw_values(),
        vec!["Paris"]
    );
}

#[test]
fn test_failed_list_leaves_container_untouched() {
    let image = read(&sample_jpeg());
    let mut keywords = image.iptc_tag("Iptc.Application2.Keywords").unwrap();

    let too_long = "k".repeat(100);
    let err = keywords
        .set_raw_values(&["first", "second", too_long.as_str()])
        .unwrap_err();
    assert!(matches!(err, MetadataError::InvalidValue { .. }));
    assert_eq!(
        image.iptc_tag("Iptc.Application2.Keywords").unwrap().raw_values(),
        vec!["beach", "sunset"]
    );
}

#[test]
fn test_empty_list_removes_dataset() {
    let image = read(&sample_jpeg());
    let mut keywords = image.iptc_tag("Iptc.Application2.Keywords").unwrap();
    keywords.set_values(Vec::new()).unwrap();
    assert_eq!(image.iptc_keys().unwrap(), vec!["Iptc.Application2.City"]);
}

#[test]
fn test_delete_removes_every_value() {
    let image = read(&sample_jpeg());
    image.delete_iptc_tag("Iptc.Application2.Keywords").unwrap();
    assert_eq!(image.iptc_keys().unwrap(), vec!["Iptc.Application2.City"]);
    assert!(matches!(
        image.delete_iptc_tag("Iptc.Application2.Keywords"),
        Err(MetadataError::KeyNotFound(_))
    ));
}

#[test]
fn test_typed_datasets_round_trip() {
    let image = read(&create_test_jpeg(8, 8, 50));
    IptcTag::with_values(
        "Iptc.Application2.DateCreated",
        vec![IptcValue::Date(imgmeta::IptcDate::new(2023, 7, 14).unwrap())],
    )
    .unwrap()
    .set_parent_image(&image)
    .unwrap();
    let mut time = IptcTag::new("Iptc.Application2.TimeCreated").unwrap();
    time.set_raw_values(&["18:30:00+02:00"]).unwrap();
    time.set_parent_image(&image).unwrap();

    let reread = reread(&image);
    assert_eq!(
        reread.iptc_tag("Iptc.Application2.DateCreated").unwrap().raw_values(),
        vec!["2023-07-14"]
    );
    assert_eq!(
        reread.iptc_tag("Iptc.Application2.TimeCreated").unwrap().raw_values(),
        vec!["18:30:00+02:00"]
    );
}

// =============================================================================
// Character set
// =============================================================================

#[test]
fn test_charset_detection() {
    let image = read(&sample_jpeg());
    assert_eq!(image.iptc_charset().unwrap(), Some("ASCII"));

    let latin1 = insert_segments(
        &create_test_jpeg(8, 8, 50),
        &[iptc_segment(&[(2, 90, b"Z\xfcrich")])],
    );
    assert_eq!(read(&latin1).iptc_charset().unwrap(), None);
}

#[test]
fn test_non_ascii_values_get_utf8_marker() {
    let image = read(&sample_jpeg());
    image
        .iptc_tag("Iptc.Application2.City")
        .unwrap()
        .set_raw_values(&["Zürich"])
        .unwrap();

    let reread = reread(&image);
    assert_eq!(reread.iptc_charset().unwrap(), Some("UTF-8"));
    assert_eq!(
        reread.iptc_tag("Iptc.Application2.City").unwrap().raw_values(),
        vec!["Zürich"]
    );
    assert!(reread
        .iptc_keys()
        .unwrap()
        .contains(&"Iptc.Envelope.CharacterSet".to_string()));
}
