use super::key::XmpKey;
use super::value::XmpValue;
use crate::container::Datum;

/// One XMP property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmpDatum {
    pub key: XmpKey,
    /// `None` until a value is assigned; such entries are not written.
    pub value: Option<XmpValue>,
}

impl XmpDatum {
    pub fn new(key: XmpKey, value: XmpValue) -> Self {
        Self {
            key,
            value: Some(value),
        }
    }

    pub fn empty(key: XmpKey) -> Self {
        Self { key, value: None }
    }
}

impl Datum for XmpDatum {
    type Key = XmpKey;

    fn key(&self) -> &XmpKey {
        &self.key
    }
}
