use std::fmt;
use std::str::FromStr;

use super::tags::{Table, TagInfo};
use super::value::ExifType;
use crate::error::{MetadataError, Result};

/// IFD a tag lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExifGroup {
    /// IFD0
    Image,
    /// Exif sub-IFD
    Photo,
    /// GPS sub-IFD
    GpsInfo,
    /// Interoperability sub-IFD
    Iop,
    /// IFD1
    Thumbnail,
}

impl ExifGroup {
    pub const ALL: [ExifGroup; 5] = [
        ExifGroup::Image,
        ExifGroup::Photo,
        ExifGroup::GpsInfo,
        ExifGroup::Iop,
        ExifGroup::Thumbnail,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ExifGroup::Image => "Image",
            ExifGroup::Photo => "Photo",
            ExifGroup::GpsInfo => "GPSInfo",
            ExifGroup::Iop => "Iop",
            ExifGroup::Thumbnail => "Thumbnail",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.name() == name)
    }

    pub(crate) const fn table(self) -> Table {
        match self {
            ExifGroup::Image | ExifGroup::Thumbnail => Table::Ifd0,
            ExifGroup::Photo => Table::Exif,
            ExifGroup::GpsInfo => Table::Gps,
            ExifGroup::Iop => Table::Iop,
        }
    }
}

/// Key of an Exif entry, written `Exif.<Group>.<TagName>`.
///
/// Tags missing from the tables are written with their number, as in
/// `Exif.Photo.0xbeef`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExifKey {
    group: ExifGroup,
    tag: u16,
}

impl ExifKey {
    pub const fn new(group: ExifGroup, tag: u16) -> Self {
        Self { group, tag }
    }

    /// Parse a key string.
    ///
    /// # Errors
    /// `InvalidKey` if the family is not `Exif`, the group is unknown, or the
    /// tag is neither a known name for the group nor a `0x` number.
    pub fn parse(key: &str) -> Result<Self> {
        let invalid = || MetadataError::InvalidKey(key.to_string());

        let mut parts = key.splitn(3, '.');
        let (Some("Exif"), Some(group), Some(name)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        let group = ExifGroup::from_name(group).ok_or_else(invalid)?;

        let tag = match name.strip_prefix("0x") {
            Some(hex) if !hex.is_empty() && hex.len() <= 4 => {
                u16::from_str_radix(hex, 16).map_err(|_| invalid())?
            }
            Some(_) => return Err(invalid()),
            None => group.table().by_name(name).ok_or_else(invalid)?.tag,
        };
        Ok(Self { group, tag })
    }

    pub const fn group(&self) -> ExifGroup {
        self.group
    }

    pub const fn tag(&self) -> u16 {
        self.tag
    }

    pub fn info(&self) -> Option<&'static TagInfo> {
        self.group.table().by_tag(self.tag)
    }

    pub fn tag_name(&self) -> String {
        match self.info() {
            Some(info) => info.name.to_string(),
            None => format!("0x{:04x}", self.tag),
        }
    }

    /// Declared type; tags missing from the tables are Ascii.
    pub fn value_type(&self) -> ExifType {
        self.info().map_or(ExifType::Ascii, |info| info.value_type)
    }
}

impl fmt::Display for ExifKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Exif.{}.{}", self.group.name(), self.tag_name())
    }
}

impl FromStr for ExifKey {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        let key = ExifKey::parse("Exif.Image.Make").unwrap();
        assert_eq!(key.group(), ExifGroup::Image);
        assert_eq!(key.tag(), 0x010f);
        assert_eq!(key.to_string(), "Exif.Image.Make");

        let key = ExifKey::parse("Exif.GPSInfo.GPSLatitude").unwrap();
        assert_eq!(key.tag(), 0x0002);

        let key = ExifKey::parse("Exif.Thumbnail.Compression").unwrap();
        assert_eq!(key.group(), ExifGroup::Thumbnail);
    }

    #[test]
    fn test_numeric_tags_are_canonicalized() {
        let key = ExifKey::parse("Exif.Image.0x010F").unwrap();
        assert_eq!(key.to_string(), "Exif.Image.Make");

        let key = ExifKey::parse("Exif.Photo.0xbeef").unwrap();
        assert_eq!(key.to_string(), "Exif.Photo.0xbeef");
        assert_eq!(key.value_type(), ExifType::Ascii);
    }

    #[test]
    fn test_parse_invalid() {
        for key in [
            "",
            "Exif",
            "Exif.Image",
            "Iptc.Image.Make",
            "Exif.Camera.Make",
            "Exif.Image.NoSuchTag",
            "Exif.Photo.Make",
            "Exif.Image.0x",
            "Exif.Image.0x12345",
            "Exif.Image.0xzz",
        ] {
            assert!(
                matches!(ExifKey::parse(key), Err(MetadataError::InvalidKey(_))),
                "{key} parsed"
            );
        }
    }
}
