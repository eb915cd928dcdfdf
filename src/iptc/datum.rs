use super::key::IptcKey;
use super::value::IptcValue;
use crate::container::Datum;

/// One IPTC dataset occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IptcDatum {
    pub key: IptcKey,
    /// `None` until a value is assigned; such entries are not written.
    pub value: Option<IptcValue>,
}

impl IptcDatum {
    pub fn new(key: IptcKey, value: IptcValue) -> Self {
        Self {
            key,
            value: Some(value),
        }
    }

    pub fn empty(key: IptcKey) -> Self {
        Self { key, value: None }
    }
}

impl Datum for IptcDatum {
    type Key = IptcKey;

    fn key(&self) -> &IptcKey {
        &self.key
    }
}
