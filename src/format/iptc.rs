//! IPTC-IIM datasets and the Photoshop image resources that carry them.
//!
//! A dataset is `0x1C record dataset length value`. Lengths of 0x8000 and
//! above switch to the extended form: the low 15 bits give the size of the
//! length field that follows.
//!
//! In JPEG files the datasets live in Photoshop resource 0x0404 inside APP13:
//!
//! ```text
//! "8BIM" id:u16 name:pascal (padded to even) size:u32 data (padded to even)
//! ```

use bytes::Bytes;
use tracing::{debug, trace, warn};

use crate::error::{CodecError, ErrorCode};
use crate::io::{put_u16_be, put_u32_be, read_u16_be, read_u32_be};
use crate::iptc::{datasets, IptcDatum, IptcKey, IptcValue};

/// Dataset tag marker.
const MARKER: u8 = 0x1C;

/// Resource holding the IPTC-IIM datasets.
pub const IPTC_RESOURCE: u16 = 0x0404;

/// Digest of the IPTC resource; stale once the datasets change.
pub const IPTC_DIGEST_RESOURCE: u16 = 0x0425;

const RESOURCE_SIGNATURE: &[u8; 4] = b"8BIM";

/// `ESC % G`: the character set marker for UTF-8.
pub const UTF8_MARKER: &[u8] = b"\x1b%G";

// =============================================================================
// Datasets
// =============================================================================

/// Decode IIM datasets.
///
/// Decoding stops at the first malformed dataset; the datasets before it
/// are kept.
pub fn parse_iim(data: &[u8]) -> Vec<IptcDatum> {
    let mut datums = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        if data[pos] != MARKER {
            if data[pos..].iter().any(|&b| b != 0) {
                warn!(offset = pos, "unexpected byte in IPTC data, stopping");
            }
            break;
        }
        let Some(head) = data.get(pos + 1..pos + 5) else {
            warn!(offset = pos, "truncated IPTC dataset header");
            break;
        };
        let record = head[0] as u16;
        let dataset = head[1] as u16;
        let mut length = read_u16_be(&head[2..4]) as usize;
        pos += 5;

        if length & 0x8000 != 0 {
            let size = length & 0x7FFF;
            let Some(field) = data.get(pos..pos + size).filter(|_| size <= 4) else {
                warn!(record, dataset, "invalid extended IPTC length");
                break;
            };
            length = field.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize);
            pos += size;
        }

        let Some(value) = data.get(pos..pos + length) else {
            warn!(record, dataset, length, "IPTC dataset runs past the end of the data");
            break;
        };
        let key = IptcKey::new(record, dataset);
        datums.push(IptcDatum::new(key, IptcValue::decode(key.value_type(), value)));
        pos += length;
    }

    trace!(count = datums.len(), "decoded IPTC datasets");
    datums
}

/// Encode datasets, grouped by record.
///
/// Records are written in ascending order; datasets keep their order within
/// a record. With `write_utf8_charset`, non-ASCII text and no character set
/// dataset adds `Iptc.Envelope.CharacterSet` set to UTF-8. Returns `None`
/// when nothing holds a value.
pub fn serialize_iim(datums: &[IptcDatum], write_utf8_charset: bool) -> Option<Vec<u8>> {
    let charset_key = IptcKey::new(datasets::ENVELOPE, datasets::CHARACTER_SET);

    let mut entries: Vec<(IptcKey, Vec<u8>)> = datums
        .iter()
        .filter_map(|datum| match &datum.value {
            Some(value) => Some((datum.key, value.encode())),
            None => {
                debug!(key = %datum.key, "skipping dataset without value");
                None
            }
        })
        .collect();
    if entries.is_empty() {
        return None;
    }

    let needs_marker = write_utf8_charset
        && datums
            .iter()
            .any(|d| d.value.as_ref().map_or(false, IptcValue::is_non_ascii_text))
        && !entries.iter().any(|(key, _)| *key == charset_key);
    if needs_marker {
        debug!("adding UTF-8 character set marker");
        entries.insert(0, (charset_key, UTF8_MARKER.to_vec()));
    }

    entries.sort_by_key(|(key, _)| key.record());

    let mut out = Vec::new();
    for (key, value) in &entries {
        out.push(MARKER);
        out.push(key.record() as u8);
        out.push(key.dataset() as u8);
        if value.len() < 0x8000 {
            put_u16_be(&mut out, value.len() as u16);
        } else {
            put_u16_be(&mut out, 0x8004);
            put_u32_be(&mut out, value.len() as u32);
        }
        out.extend_from_slice(value);
    }
    Some(out)
}

/// Character set of the datasets: declared by `Iptc.Envelope.CharacterSet`,
/// else guessed from the text values.
pub fn detect_charset(datums: &[IptcDatum]) -> Option<&'static str> {
    let charset_key = IptcKey::new(datasets::ENVELOPE, datasets::CHARACTER_SET);
    let declared = datums
        .iter()
        .find(|d| d.key == charset_key)
        .and_then(|d| d.value.as_ref())
        .map(IptcValue::encode);
    if declared.as_deref() == Some(UTF8_MARKER) {
        return Some("UTF-8");
    }

    let texts: Vec<&[u8]> = datums
        .iter()
        .filter_map(|d| match &d.value {
            Some(IptcValue::String(bytes)) => Some(bytes.as_slice()),
            _ => None,
        })
        .collect();
    if texts.iter().all(|t| t.is_ascii()) {
        Some("ASCII")
    } else if texts.iter().all(|t| std::str::from_utf8(t).is_ok()) {
        Some("UTF-8")
    } else {
        None
    }
}

// =============================================================================
// Photoshop image resources
// =============================================================================

/// One image resource block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub signature: [u8; 4],
    pub id: u16,
    /// Pascal name as stored, padding included
    pub name: Bytes,
    pub data: Bytes,
}

/// Split Photoshop image resources.
///
/// # Errors
/// `CorruptedMetadata` if a resource runs past the end of the data.
pub fn parse_resources(data: &Bytes) -> Result<Vec<Resource>, CodecError> {
    let corrupt = |msg: String| CodecError::new(ErrorCode::CorruptedMetadata, msg);
    let mut resources = Vec::new();
    let mut pos = 0;

    while pos + 4 <= data.len() {
        let mut signature = [0u8; 4];
        signature.copy_from_slice(&data[pos..pos + 4]);
        if !is_known_signature(&signature) {
            if data[pos..].iter().any(|&b| b != 0) {
                warn!(offset = pos, "unknown image resource signature, stopping");
            }
            break;
        }
        let id = data
            .get(pos + 4..pos + 6)
            .map(read_u16_be)
            .ok_or_else(|| corrupt(format!("truncated resource at {pos}")))?;
        let name_start = pos + 6;
        let name_len = *data
            .get(name_start)
            .ok_or_else(|| corrupt(format!("truncated resource 0x{id:04X}")))?
            as usize;
        // length byte plus name, padded to even
        let name_size = (name_len + 1 + 1) & !1;
        let size_start = name_start + name_size;
        let size = data
            .get(size_start..size_start + 4)
            .map(read_u32_be)
            .ok_or_else(|| corrupt(format!("truncated resource 0x{id:04X}")))?
            as usize;
        let data_start = size_start + 4;
        let data_end = data_start
            .checked_add(size)
            .filter(|&end| end <= data.len())
            .ok_or_else(|| corrupt(format!("resource 0x{id:04X} runs past the end")))?;

        resources.push(Resource {
            signature,
            id,
            name: data.slice(name_start..size_start),
            data: data.slice(data_start..data_end),
        });
        pos = data_end + size % 2;
    }
    Ok(resources)
}

fn is_known_signature(signature: &[u8; 4]) -> bool {
    matches!(signature, b"8BIM" | b"PHUT" | b"AgHg" | b"DCSR" | b"MeSa")
}

/// Datasets carried by the resources, if any.
pub fn iptc_from_resources(resources: &[Resource]) -> Option<Bytes> {
    resources
        .iter()
        .find(|r| &r.signature == RESOURCE_SIGNATURE && r.id == IPTC_RESOURCE)
        .map(|r| r.data.clone())
}

/// Rebuild Photoshop resources with new IPTC data.
///
/// The IPTC resource keeps its position (new ones are appended) and the
/// digest resource is dropped. `iptc = None` removes the IPTC resource.
/// Returns `None` when no resource is left.
pub fn update_resources(
    existing: Option<&Bytes>,
    iptc: Option<&[u8]>,
) -> Result<Option<Vec<u8>>, CodecError> {
    let mut resources = match existing {
        Some(data) => parse_resources(data)?,
        None => Vec::new(),
    };
    resources.retain(|r| r.id != IPTC_DIGEST_RESOURCE);

    let position = resources
        .iter()
        .position(|r| &r.signature == RESOURCE_SIGNATURE && r.id == IPTC_RESOURCE);
    match (position, iptc) {
        (Some(index), Some(data)) => resources[index].data = Bytes::copy_from_slice(data),
        (Some(index), None) => {
            resources.remove(index);
        }
        (None, Some(data)) => resources.push(Resource {
            signature: *RESOURCE_SIGNATURE,
            id: IPTC_RESOURCE,
            name: Bytes::from_static(&[0, 0]),
            data: Bytes::copy_from_slice(data),
        }),
        (None, None) => {}
    }

    if resources.is_empty() {
        return Ok(None);
    }

    let mut out = Vec::new();
    for resource in &resources {
        out.extend_from_slice(&resource.signature);
        put_u16_be(&mut out, resource.id);
        out.extend_from_slice(&resource.name);
        put_u32_be(&mut out, resource.data.len() as u32);
        out.extend_from_slice(&resource.data);
        if resource.data.len() % 2 == 1 {
            out.push(0);
        }
    }
    Ok(Some(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iptc::IptcDate;

    fn datum(key: &str, value: IptcValue) -> IptcDatum {
        IptcDatum::new(IptcKey::parse(key).unwrap(), value)
    }

    fn keys(datums: &[IptcDatum]) -> Vec<String> {
        datums.iter().map(|d| d.key.to_string()).collect()
    }

    // -------------------------------------------------------------------------
    // Datasets
    // -------------------------------------------------------------------------

    #[test]
    fn test_iim_round_trip_groups_records() {
        let datums = vec![
            datum("Iptc.Application2.Keywords", IptcValue::text("beach")),
            datum("Iptc.Envelope.ModelVersion", IptcValue::Short(4)),
            datum("Iptc.Application2.Keywords", IptcValue::text("sun")),
            datum(
                "Iptc.Application2.DateCreated",
                IptcValue::Date(IptcDate::new(2024, 7, 1).unwrap()),
            ),
        ];
        let bytes = serialize_iim(&datums, true).unwrap();
        let parsed = parse_iim(&bytes);

        assert_eq!(
            keys(&parsed),
            vec![
                "Iptc.Envelope.ModelVersion",
                "Iptc.Application2.Keywords",
                "Iptc.Application2.Keywords",
                "Iptc.Application2.DateCreated",
            ]
        );
        assert_eq!(parsed[1].value, Some(IptcValue::text("beach")));
        assert_eq!(parsed[2].value, Some(IptcValue::text("sun")));
        assert_eq!(parsed[3].value.as_ref().unwrap().to_string(), "2024-07-01");
    }

    #[test]
    fn test_utf8_marker_added_for_non_ascii_text() {
        let datums = vec![datum("Iptc.Application2.City", IptcValue::text("Zürich"))];
        let parsed = parse_iim(&serialize_iim(&datums, true).unwrap());
        assert_eq!(keys(&parsed)[0], "Iptc.Envelope.CharacterSet");
        assert_eq!(detect_charset(&parsed), Some("UTF-8"));

        let parsed = parse_iim(&serialize_iim(&datums, false).unwrap());
        assert_eq!(keys(&parsed), vec!["Iptc.Application2.City"]);
    }

    #[test]
    fn test_extended_length() {
        let caption = "x".repeat(0x9000);
        let datums = vec![datum("Iptc.Application2.Caption", IptcValue::text(&caption))];
        let bytes = serialize_iim(&datums, false).unwrap();
        assert_eq!(&bytes[3..5], &[0x80, 0x04]);
        assert_eq!(parse_iim(&bytes)[0].value, Some(IptcValue::text(caption)));
    }

    #[test]
    fn test_truncated_dataset_keeps_earlier_ones() {
        let datums = vec![
            datum("Iptc.Application2.City", IptcValue::text("Paris")),
            datum("Iptc.Application2.CountryName", IptcValue::text("France")),
        ];
        let bytes = serialize_iim(&datums, false).unwrap();
        let parsed = parse_iim(&bytes[..bytes.len() - 2]);
        assert_eq!(keys(&parsed), vec!["Iptc.Application2.City"]);
    }

    #[test]
    fn test_unset_values_are_skipped() {
        let key = IptcKey::parse("Iptc.Application2.City").unwrap();
        assert!(serialize_iim(&[IptcDatum::empty(key)], true).is_none());
    }

    #[test]
    fn test_detect_charset_without_marker() {
        let ascii = vec![datum("Iptc.Application2.City", IptcValue::text("Paris"))];
        assert_eq!(detect_charset(&ascii), Some("ASCII"));
        let latin1 = vec![datum(
            "Iptc.Application2.City",
            IptcValue::String(b"Z\xfcrich".to_vec()),
        )];
        assert_eq!(detect_charset(&latin1), None);
    }

    // -------------------------------------------------------------------------
    // Resources
    // -------------------------------------------------------------------------

    fn resource_bytes(id: u16, data: &[u8]) -> Vec<u8> {
        let mut out = b"8BIM".to_vec();
        out.extend_from_slice(&id.to_be_bytes());
        out.extend_from_slice(&[0, 0]);
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        out.extend_from_slice(data);
        if data.len() % 2 == 1 {
            out.push(0);
        }
        out
    }

    #[test]
    fn test_update_keeps_other_resources_in_place() {
        let mut existing = resource_bytes(0x03ED, &[1, 2, 3]);
        existing.extend(resource_bytes(IPTC_RESOURCE, b"old"));
        existing.extend(resource_bytes(IPTC_DIGEST_RESOURCE, &[0; 16]));
        existing.extend(resource_bytes(0x0409, &[9; 4]));
        let existing = Bytes::from(existing);

        let updated = update_resources(Some(&existing), Some(b"new!")).unwrap().unwrap();
        let resources = parse_resources(&Bytes::from(updated)).unwrap();
        let ids: Vec<u16> = resources.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0x03ED, IPTC_RESOURCE, 0x0409]);
        assert_eq!(resources[0].data.as_ref(), &[1, 2, 3]);
        assert_eq!(iptc_from_resources(&resources).unwrap().as_ref(), b"new!");
    }

    #[test]
    fn test_update_removes_and_appends() {
        let existing = Bytes::from(resource_bytes(IPTC_RESOURCE, b"old"));
        assert!(update_resources(Some(&existing), None).unwrap().is_none());

        let created = update_resources(None, Some(b"\x1c\x02\x19\x00\x01a")).unwrap().unwrap();
        let resources = parse_resources(&Bytes::from(created)).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].id, IPTC_RESOURCE);
    }

    #[test]
    fn test_truncated_resource_is_corrupt() {
        let mut data = resource_bytes(IPTC_RESOURCE, b"abcdef");
        data.truncate(data.len() - 3);
        let err = parse_resources(&Bytes::from(data)).unwrap_err();
        assert_eq!(err.code, ErrorCode::CorruptedMetadata);
    }
}
