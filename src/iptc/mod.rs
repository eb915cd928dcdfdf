//! The IPTC-IIM namespace.
//!
//! Keys are written `Iptc.<Record>.<Dataset>`. Some datasets are repeatable
//! and hold several entries under one key.

pub mod datasets;
mod datum;
mod key;
mod tag;
mod value;

pub use datasets::{DatasetInfo, RecordInfo};
pub use datum::IptcDatum;
pub use key::IptcKey;
pub use tag::IptcTag;
pub use value::{IptcDate, IptcTime, IptcType, IptcValue};
