use std::fmt;
use std::str::FromStr;

use super::namespace::{is_valid_prefix, namespace_uri};
use super::properties::{property, PropertyInfo};
use crate::error::{MetadataError, Result};

/// Key of an XMP property, written `Xmp.<prefix>.<path>`.
///
/// The path is a property name, optionally followed by structure fields and
/// array indices: `Xmp.xmpMM.History[1]/stEvt:action`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmpKey {
    prefix: String,
    property: String,
}

/// Largest array index a path may address.
pub const MAX_ARRAY_INDEX: usize = 65_535;

/// One step of a property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub prefix: String,
    pub name: String,
    /// 1-based array index
    pub index: Option<usize>,
}

impl PathSegment {
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.prefix, self.name)
    }
}

impl XmpKey {
    /// Parse a key string.
    ///
    /// # Errors
    /// `InvalidKey` if the family is not `Xmp`, the path is malformed, or a
    /// prefix in it is not registered.
    pub fn parse(key: &str) -> Result<Self> {
        let invalid = || MetadataError::InvalidKey(key.to_string());

        let mut parts = key.splitn(3, '.');
        let (Some("Xmp"), Some(prefix), Some(property)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        let segments = parse_path(prefix, property).ok_or_else(invalid)?;
        for segment in &segments {
            if namespace_uri(&segment.prefix).is_none() {
                return Err(invalid());
            }
        }
        Ok(Self {
            prefix: prefix.to_string(),
            property: property.to_string(),
        })
    }

    /// Build a key from parts known to be valid, skipping the registry check.
    pub(crate) fn from_parts(prefix: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            property: property.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Property path after the prefix.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Name of the top-level property.
    pub fn root(&self) -> &str {
        let end = self
            .property
            .find(['[', '/'])
            .unwrap_or(self.property.len());
        &self.property[..end]
    }

    /// Whether the key names a top-level property rather than a path into one.
    pub fn is_simple(&self) -> bool {
        !self.property.contains(['[', '/'])
    }

    /// Whether this key names a field or item nested under `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &XmpKey) -> bool {
        self.prefix == ancestor.prefix
            && self
                .property
                .strip_prefix(ancestor.property.as_str())
                .is_some_and(|rest| rest.starts_with('[') || rest.starts_with('/'))
    }

    pub fn segments(&self) -> Vec<PathSegment> {
        parse_path(&self.prefix, &self.property).unwrap_or_default()
    }

    pub fn namespace_uri(&self) -> Option<String> {
        namespace_uri(&self.prefix)
    }

    pub fn info(&self) -> Option<&'static PropertyInfo> {
        if self.is_simple() {
            property(&self.prefix, &self.property)
        } else {
            None
        }
    }
}

fn parse_path(prefix: &str, property: &str) -> Option<Vec<PathSegment>> {
    if !is_valid_prefix(prefix) {
        return None;
    }
    let mut segments = Vec::new();
    for (i, raw) in property.split('/').enumerate() {
        let (segment_prefix, rest) = if i == 0 {
            (prefix, raw)
        } else {
            raw.split_once(':')?
        };
        if !is_valid_prefix(segment_prefix) {
            return None;
        }
        let (name, index) = match rest.split_once('[') {
            Some((name, tail)) => {
                let digits = tail.strip_suffix(']')?;
                let index: usize = digits.parse().ok()?;
                if index == 0 || index > MAX_ARRAY_INDEX {
                    return None;
                }
                (name, Some(index))
            }
            None => (rest, None),
        };
        if !is_valid_prefix(name) {
            return None;
        }
        segments.push(PathSegment {
            prefix: segment_prefix.to_string(),
            name: name.to_string(),
            index,
        });
    }
    Some(segments)
}

impl fmt::Display for XmpKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Xmp.{}.{}", self.prefix, self.property)
    }
}

impl FromStr for XmpKey {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
