use bytes::Bytes;

use super::key::ExifKey;
use super::value::ExifValue;
use crate::container::Datum;

/// One Exif entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ExifDatum {
    pub key: ExifKey,
    /// `None` until a value is assigned; such entries are not written.
    pub value: Option<ExifValue>,
    /// Bytes the value points to, such as the thumbnail stream behind
    /// `JPEGInterchangeFormat`.
    pub data_area: Option<Bytes>,
}

impl ExifDatum {
    pub fn new(key: ExifKey, value: ExifValue) -> Self {
        Self {
            key,
            value: Some(value),
            data_area: None,
        }
    }

    pub fn empty(key: ExifKey) -> Self {
        Self {
            key,
            value: None,
            data_area: None,
        }
    }
}

impl Datum for ExifDatum {
    type Key = ExifKey;

    fn key(&self) -> &ExifKey {
        &self.key
    }
}
