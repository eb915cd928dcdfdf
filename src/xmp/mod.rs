//! The XMP namespace.
//!
//! Keys are written `Xmp.<prefix>.<property path>`, where the prefix must be
//! registered in the process-wide [`namespace`] registry. Nested properties
//! use `[n]` for array items and `/prefix:name` for structure fields.

mod datum;
mod key;
pub mod namespace;
pub mod properties;
mod tag;
mod typed;
mod value;

pub use datum::XmpDatum;
pub use key::{PathSegment, XmpKey, MAX_ARRAY_INDEX};
pub use namespace::{
    initialize, is_initialized, namespace_prefix, namespace_uri, register_namespace, shutdown,
    unregister_all_namespaces, unregister_namespace,
};
pub use properties::PropertyInfo;
pub use tag::XmpTag;
pub use typed::{GpsCoordinate, GpsDirection, XmpBasicType, XmpDate, XmpTime, XmpTypedValue};
pub use value::{ArrayKind, XmpValue, XmpValueType, X_DEFAULT};
