//! XMP integration tests.
//!
//! Tests verify:
//! - The three value shapes read from a packet, with shape detection
//! - Shape changes and validation through attached tags
//! - Structured properties: indices, replacement and moves between images
//! - Typed conversion of declared property types
//! - Namespace registration and its effect on reading and writing

use imgmeta::{
    namespace_prefix, namespace_uri, register_namespace, unregister_namespace, GpsCoordinate,
    Image, MetadataError, XmpTag, XmpTypedValue, XmpValue, XmpValueType,
};

use super::test_utils::{
    create_test_jpeg, init_tracing, insert_segments, registry_lock, sample_jpeg, xmp_segment,
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

fn packet(namespaces: &str, body: &str) -> String {
    format!(
        concat!(
            r#"<x:xmpmeta xmlns:x="adobe:ns:meta/">"#,
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">"#,
            r#"<rdf:Description rdf:about="" {namespaces}>{body}</rdf:Description>"#,
            "</rdf:RDF></x:xmpmeta>",
        ),
        namespaces = namespaces,
        body = body,
    )
}

/// Image whose packet holds a two-event `xmpMM:History`.
fn history_jpeg() -> Vec<u8> {
    let body = r#"<xmpMM:History><rdf:Seq>
        <rdf:li rdf:parseType="Resource"><stEvt:action>created</stEvt:action></rdf:li>
        <rdf:li rdf:parseType="Resource"><stEvt:action>saved</stEvt:action></rdf:li>
    </rdf:Seq></xmpMM:History>"#;
    let namespaces = concat!(
        r#"xmlns:xmpMM="http://ns.adobe.com/xap/1.0/mm/" "#,
        r#"xmlns:stEvt="http://ns.adobe.com/xap/1.0/sType/ResourceEvent#""#,
    );
    insert_segments(
        &create_test_jpeg(8, 8, 50),
        &[xmp_segment(&packet(namespaces, body))],
    )
}

fn text(image: &Image, key: &str) -> String {
    image.xmp_tag(key).unwrap().text_value().unwrap()
}

// =============================================================================
// Shapes
// =============================================================================

#[test]
fn test_shapes_read_from_packet() {
    let image = read(&sample_jpeg());

    let rating = image.xmp_tag("Xmp.xmp.Rating").unwrap();
    assert_eq!(rating.text_value().unwrap(), "3");

    let subject = image.xmp_tag("Xmp.dc.subject").unwrap();
    assert_eq!(subject.value_type(), XmpValueType::XmpBag);
    assert_eq!(subject.array_value().unwrap(), vec!["beach", "sunset"]);

    let title = image.xmp_tag("Xmp.dc.title").unwrap();
    assert_eq!(title.value_type(), XmpValueType::LangAlt);
    assert_eq!(
        title.lang_alt_value().unwrap(),
        vec![
            ("x-default".to_string(), "Holiday".to_string()),
            ("fr-FR".to_string(), "Vacances".to_string()),
        ]
    );
}

#[test]
fn test_wrong_shape_request_fails() {
    let image = read(&sample_jpeg());
    let format = image.xmp_tag("Xmp.dc.format").unwrap();
    assert!(matches!(
        format.lang_alt_value(),
        Err(MetadataError::TypeMismatch { .. })
    ));
    assert!(matches!(
        format.array_value(),
        Err(MetadataError::TypeMismatch { .. })
    ));

    let subject = image.xmp_tag("Xmp.dc.subject").unwrap();
    assert!(matches!(
        subject.text_value(),
        Err(MetadataError::TypeMismatch { .. })
    ));
}

#[test]
fn test_changed_shapes_survive_write() {
    let image = read(&sample_jpeg());
    let mut subject = image.xmp_tag("Xmp.dc.subject").unwrap();
    subject.set_array_value(["dune", "wave", "gull"]).unwrap();
    let mut title = image.xmp_tag("Xmp.dc.title").unwrap();
    title
        .set_lang_alt_value([("x-default", "Shore"), ("de-DE", "Ufer")])
        .unwrap();

    let mut creator = XmpTag::new("Xmp.dc.creator").unwrap();
    creator.set_array_value(["Ada"]).unwrap();
    creator.set_parent_image(&image).unwrap();

    let reread = reread(&image);
    assert_eq!(
        reread.xmp_tag("Xmp.dc.subject").unwrap().value(),
        Some(XmpValue::Array {
            kind: imgmeta::ArrayKind::Bag,
            items: vec!["dune".into(), "wave".into(), "gull".into()],
        })
    );
    assert_eq!(
        reread.xmp_tag("Xmp.dc.title").unwrap().lang_alt_value().unwrap(),
        vec![
            ("x-default".to_string(), "Shore".to_string()),
            ("de-DE".to_string(), "Ufer".to_string()),
        ]
    );
    assert_eq!(
        reread.xmp_tag("Xmp.dc.creator").unwrap().value_type(),
        XmpValueType::XmpSeq
    );
}

#[test]
fn test_invalid_values_rejected_before_commit() {
    let image = read(&sample_jpeg());
    let mut title = image.xmp_tag("Xmp.dc.title").unwrap();
    let empty: [(&str, &str); 0] = [];
    assert!(matches!(
        title.set_lang_alt_value(empty),
        Err(MetadataError::InvalidValue { .. })
    ));
    assert!(matches!(
        title.set_lang_alt_value([("not a language", "text")]),
        Err(MetadataError::InvalidValue { .. })
    ));
    assert_eq!(
        image.xmp_tag("Xmp.dc.title").unwrap().lang_alt_value().unwrap().len(),
        2
    );
}

// =============================================================================
// Structures
// =============================================================================

#[test]
fn test_structures_flattened_and_deleted() {
    let image = read(&history_jpeg());

    assert_eq!(
        image.xmp_keys().unwrap(),
        vec![
            "Xmp.xmpMM.History",
            "Xmp.xmpMM.History[1]/stEvt:action",
            "Xmp.xmpMM.History[2]/stEvt:action",
        ]
    );
    assert_eq!(
        image
            .xmp_tag("Xmp.xmpMM.History[2]/stEvt:action")
            .unwrap()
            .text_value()
            .unwrap(),
        "saved"
    );

    let reread = reread(&image);
    assert_eq!(reread.xmp_keys().unwrap(), image.xmp_keys().unwrap());

    image.delete_xmp_tag("Xmp.xmpMM.History").unwrap();
    assert!(image.xmp_keys().unwrap().is_empty());
}

#[test]
fn test_out_of_range_index_rejected() {
    let image = read(&history_jpeg());
    for key in [
        "Xmp.xmpMM.History[18446744073709551615]/stEvt:action",
        "Xmp.xmpMM.History[65536]/stEvt:action",
        "Xmp.dc.subject[4294967296]",
    ] {
        assert!(
            matches!(XmpTag::new(key), Err(MetadataError::InvalidKey(_))),
            "{key} accepted"
        );
        assert!(matches!(
            image.xmp_tag(key),
            Err(MetadataError::InvalidKey(_))
        ));
    }
    assert_eq!(image.xmp_keys().unwrap().len(), 3);
    image.write_metadata().unwrap();
}

#[test]
fn test_gapped_index_written_compacted() {
    let image = read(&history_jpeg());
    let mut event = XmpTag::new("Xmp.xmpMM.History[5]/stEvt:action").unwrap();
    event.set_text_value("archived").unwrap();
    event.set_parent_image(&image).unwrap();

    let reread = reread(&image);
    assert_eq!(
        reread.xmp_keys().unwrap(),
        vec![
            "Xmp.xmpMM.History",
            "Xmp.xmpMM.History[1]/stEvt:action",
            "Xmp.xmpMM.History[2]/stEvt:action",
            "Xmp.xmpMM.History[3]/stEvt:action",
        ]
    );
    assert_eq!(text(&reread, "Xmp.xmpMM.History[3]/stEvt:action"), "archived");
}

#[test]
fn test_set_value_on_structure_parent_replaces_children() {
    let image = read(&history_jpeg());
    let mut history = image.xmp_tag("Xmp.xmpMM.History").unwrap();
    history.set_text_value("flat").unwrap();
    assert_eq!(image.xmp_keys().unwrap(), vec!["Xmp.xmpMM.History"]);

    let reread = reread(&image);
    assert_eq!(reread.xmp_keys().unwrap(), vec!["Xmp.xmpMM.History"]);
    assert_eq!(text(&reread, "Xmp.xmpMM.History"), "flat");
}

#[test]
fn test_structure_moves_with_its_parent() {
    let source = read(&history_jpeg());
    let target = read(&create_test_jpeg(8, 8, 50));

    let mut history = source.xmp_tag("Xmp.xmpMM.History").unwrap();
    history.set_parent_image(&target).unwrap();

    assert_eq!(target.xmp_keys().unwrap(), source.xmp_keys().unwrap());
    assert_eq!(source.xmp_keys().unwrap().len(), 3);

    let reread = reread(&target);
    assert_eq!(text(&reread, "Xmp.xmpMM.History[1]/stEvt:action"), "created");
    assert_eq!(text(&reread, "Xmp.xmpMM.History[2]/stEvt:action"), "saved");
}

#[test]
fn test_moved_structure_replaces_stale_children() {
    let target = read(&history_jpeg());
    let mut history = XmpTag::new("Xmp.xmpMM.History").unwrap();
    history.set_array_value(["one"]).unwrap();
    history.set_parent_image(&target).unwrap();

    assert_eq!(target.xmp_keys().unwrap(), vec!["Xmp.xmpMM.History"]);
    let reread = reread(&target);
    assert_eq!(
        reread.xmp_tag("Xmp.xmpMM.History").unwrap().array_value().unwrap(),
        vec!["one"]
    );
}

// =============================================================================
// Typed values
// =============================================================================

#[test]
fn test_typed_values_survive_write() {
    let image = read(&sample_jpeg());
    assert_eq!(
        image.xmp_tag("Xmp.xmp.Rating").unwrap().typed_value().unwrap(),
        Some(XmpTypedValue::Integer(3))
    );

    let mut latitude = XmpTag::new("Xmp.exif.GPSLatitude").unwrap();
    let coordinate = GpsCoordinate::parse("48,51.4N").unwrap();
    latitude
        .set_typed_value(&XmpTypedValue::GpsCoordinate(coordinate))
        .unwrap();
    latitude.set_parent_image(&image).unwrap();
    let mut exposure = XmpTag::new("Xmp.exif.ExposureTime").unwrap();
    exposure.set_text_value("a sixtieth").unwrap();
    exposure.set_parent_image(&image).unwrap();

    let reread = reread(&image);
    assert_eq!(text(&reread, "Xmp.exif.GPSLatitude"), "48,51,24N");
    assert_eq!(
        reread.xmp_tag("Xmp.exif.GPSLatitude").unwrap().typed_value().unwrap(),
        Some(XmpTypedValue::GpsCoordinate(coordinate))
    );
    assert_eq!(
        reread.xmp_tag("Xmp.exif.ExposureTime").unwrap().typed_value().unwrap(),
        Some(XmpTypedValue::Text("a sixtieth".into()))
    );
}

// =============================================================================
// Namespaces
// =============================================================================

#[test]
fn test_custom_namespace_round_trip() {
    let _registry = registry_lock();
    imgmeta::initialize();
    register_namespace("http://example.com/imgmeta-test/", "imt").unwrap();
    assert_eq!(
        namespace_uri("imt").as_deref(),
        Some("http://example.com/imgmeta-test/")
    );

    let image = read(&create_test_jpeg(8, 8, 50));
    let mut tag = XmpTag::new("Xmp.imt.mood").unwrap();
    tag.set_text_value("calm").unwrap();
    tag.set_parent_image(&image).unwrap();
    let reread = reread(&image);
    assert_eq!(
        reread.xmp_tag("Xmp.imt.mood").unwrap().text_value().unwrap(),
        "calm"
    );

    // Unregistered in between: writing the entry fails
    unregister_namespace("http://example.com/imgmeta-test/").unwrap();
    assert!(matches!(
        reread.write_metadata(),
        Err(MetadataError::InvalidKey(_))
    ));
    assert!(matches!(
        XmpTag::new("Xmp.imt.mood"),
        Err(MetadataError::InvalidKey(_))
    ));
}

#[test]
fn test_registration_errors() {
    let _registry = registry_lock();
    imgmeta::initialize();

    assert!(matches!(
        register_namespace("http://purl.org/dc/elements/1.1/", "dc"),
        Err(MetadataError::DuplicatePrefix(_))
    ));
    assert!(matches!(
        register_namespace("http://example.com/no-slash", "nsl"),
        Err(MetadataError::InvalidValue { .. })
    ));
    assert!(matches!(
        unregister_namespace("http://purl.org/dc/elements/1.1/"),
        Err(MetadataError::BuiltinNamespace(_))
    ));
    assert!(matches!(
        unregister_namespace("http://example.com/never-registered/"),
        Err(MetadataError::NamespaceNotFound(_))
    ));
}

#[test]
fn test_unknown_namespace_registered_on_read() {
    let _registry = registry_lock();
    imgmeta::initialize();

    let uri = "http://example.com/imgmeta-discovered/";
    let data = insert_segments(
        &create_test_jpeg(8, 8, 50),
        &[xmp_segment(&packet(
            &format!(r#"xmlns:disc="{uri}""#),
            "<disc:level>7</disc:level>",
        ))],
    );
    let image = read(&data);
    let prefix = namespace_prefix(uri).unwrap();
    let key = format!("Xmp.{prefix}.level");
    assert_eq!(image.xmp_keys().unwrap(), vec![key.clone()]);
    assert_eq!(image.xmp_tag(&key).unwrap().text_value().unwrap(), "7");

    unregister_namespace(uri).unwrap();
}
