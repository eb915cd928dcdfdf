use std::fmt;
use std::str::FromStr;

use super::datasets::{self, DatasetInfo, RecordInfo};
use super::value::IptcType;
use crate::error::{MetadataError, Result};

/// Key of an IPTC dataset, written `Iptc.<Record>.<Dataset>`.
///
/// Unknown records and datasets are written as `0x` numbers, as in
/// `Iptc.Application2.0x00ff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IptcKey {
    record: u16,
    dataset: u16,
}

impl IptcKey {
    pub const fn new(record: u16, dataset: u16) -> Self {
        Self { record, dataset }
    }

    /// Parse a key string.
    ///
    /// # Errors
    /// `InvalidKey` if the family is not `Iptc` or a component is neither a
    /// known name nor a `0x` number.
    pub fn parse(key: &str) -> Result<Self> {
        let invalid = || MetadataError::InvalidKey(key.to_string());

        let mut parts = key.splitn(3, '.');
        let (Some("Iptc"), Some(record), Some(dataset)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let record = match parse_hex(record) {
            Some(number) => number,
            None => datasets::record_by_name(record).ok_or_else(invalid)?.number,
        };
        let dataset = match parse_hex(dataset) {
            Some(number) => number,
            None => datasets::record(record)
                .and_then(|r| r.datasets.iter().find(|d| d.name == dataset))
                .ok_or_else(invalid)?
                .number,
        };
        Ok(Self { record, dataset })
    }

    pub const fn record(&self) -> u16 {
        self.record
    }

    pub const fn dataset(&self) -> u16 {
        self.dataset
    }

    pub fn info(&self) -> Option<&'static DatasetInfo> {
        datasets::dataset(self.record, self.dataset)
    }

    pub fn record_info(&self) -> Option<&'static RecordInfo> {
        datasets::record(self.record)
    }

    pub fn record_name(&self) -> String {
        match self.record_info() {
            Some(info) => info.name.to_string(),
            None => format!("0x{:04x}", self.record),
        }
    }

    pub fn dataset_name(&self) -> String {
        match self.info() {
            Some(info) => info.name.to_string(),
            None => format!("0x{:04x}", self.dataset),
        }
    }

    /// Declared type; unknown datasets hold strings.
    pub fn value_type(&self) -> IptcType {
        self.info().map_or(IptcType::String, |info| info.value_type)
    }

    /// Unknown datasets are repeatable.
    pub fn is_repeatable(&self) -> bool {
        self.info().map_or(true, |info| info.repeatable)
    }
}

fn parse_hex(component: &str) -> Option<u16> {
    let hex = component.strip_prefix("0x")?;
    if hex.is_empty() || hex.len() > 4 {
        return None;
    }
    u16::from_str_radix(hex, 16).ok()
}

impl fmt::Display for IptcKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iptc.{}.{}", self.record_name(), self.dataset_name())
    }
}

impl FromStr for IptcKey {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
