//! Exif values and their raw string form.
//!
//! The raw form is what tags expose through `raw_value()`:
//! - numeric types: values separated by single spaces
//! - rationals: `numerator/denominator`
//! - `Undefined`: decimal byte values separated by spaces
//! - `Ascii`: the text itself
//! - `Comment`: `charset="Ascii" text`, or the plain text when no charset is set

use std::fmt;

use crate::format::decode_text;
use crate::format::tiff::{ByteOrder, FieldType};

// =============================================================================
// ExifType
// =============================================================================

/// Logical type of an Exif value.
///
/// Matches the TIFF field types, plus `Comment` for Undefined fields that
/// start with an 8-byte character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExifType {
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SByte,
    Undefined,
    SShort,
    SLong,
    SRational,
    Float,
    Double,
    Comment,
}

impl ExifType {
    pub const fn name(self) -> &'static str {
        match self {
            ExifType::Byte => "Byte",
            ExifType::Ascii => "Ascii",
            ExifType::Short => "Short",
            ExifType::Long => "Long",
            ExifType::Rational => "Rational",
            ExifType::SByte => "SByte",
            ExifType::Undefined => "Undefined",
            ExifType::SShort => "SShort",
            ExifType::SLong => "SLong",
            ExifType::SRational => "SRational",
            ExifType::Float => "Float",
            ExifType::Double => "Double",
            ExifType::Comment => "Comment",
        }
    }

    /// TIFF field type used to store values of this type.
    pub const fn field_type(self) -> FieldType {
        match self {
            ExifType::Byte => FieldType::Byte,
            ExifType::Ascii => FieldType::Ascii,
            ExifType::Short => FieldType::Short,
            ExifType::Long => FieldType::Long,
            ExifType::Rational => FieldType::Rational,
            ExifType::SByte => FieldType::SByte,
            ExifType::Undefined | ExifType::Comment => FieldType::Undefined,
            ExifType::SShort => FieldType::SShort,
            ExifType::SLong => FieldType::SLong,
            ExifType::SRational => FieldType::SRational,
            ExifType::Float => FieldType::Float,
            ExifType::Double => FieldType::Double,
        }
    }

    /// Exif type for a stored field type.
    ///
    /// 64-bit BigTIFF types have no Exif equivalent.
    pub const fn from_field_type(field_type: FieldType) -> Option<Self> {
        match field_type {
            FieldType::Byte => Some(ExifType::Byte),
            FieldType::Ascii => Some(ExifType::Ascii),
            FieldType::Short => Some(ExifType::Short),
            FieldType::Long | FieldType::Ifd => Some(ExifType::Long),
            FieldType::Rational => Some(ExifType::Rational),
            FieldType::SByte => Some(ExifType::SByte),
            FieldType::Undefined => Some(ExifType::Undefined),
            FieldType::SShort => Some(ExifType::SShort),
            FieldType::SLong => Some(ExifType::SLong),
            FieldType::SRational => Some(ExifType::SRational),
            FieldType::Float => Some(ExifType::Float),
            FieldType::Double => Some(ExifType::Double),
            FieldType::Long8 | FieldType::SLong8 | FieldType::Ifd8 => None,
        }
    }
}

// =============================================================================
// Comment values
// =============================================================================

/// Character code of a comment value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    Ascii,
    Unicode,
    Jis,
    Undefined,
}

impl Charset {
    const fn name(self) -> &'static str {
        match self {
            Charset::Ascii => "Ascii",
            Charset::Unicode => "Unicode",
            Charset::Jis => "Jis",
            Charset::Undefined => "Undefined",
        }
    }

    const fn code(self) -> &'static [u8; 8] {
        match self {
            Charset::Ascii => b"ASCII\0\0\0",
            Charset::Unicode => b"UNICODE\0",
            Charset::Jis => b"JIS\0\0\0\0\0",
            Charset::Undefined => &[0; 8],
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Ascii" => Some(Charset::Ascii),
            "Unicode" => Some(Charset::Unicode),
            "Jis" => Some(Charset::Jis),
            "Undefined" => Some(Charset::Undefined),
            _ => None,
        }
    }
}

/// Text prefixed by its character code, as used by `UserComment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentValue {
    pub charset: Charset,
    pub text: String,
}

impl CommentValue {
    fn parse(raw: &str) -> Result<Self, String> {
        let Some(rest) = raw.strip_prefix("charset=") else {
            return Ok(CommentValue {
                charset: Charset::Undefined,
                text: raw.to_string(),
            });
        };

        let (name, text) = match rest.split_once(' ') {
            Some((name, text)) => (name, text),
            None => (rest, ""),
        };
        let name = name.trim_matches('"');
        let charset =
            Charset::from_name(name).ok_or_else(|| format!("invalid charset \"{name}\""))?;
        if charset == Charset::Ascii && !text.is_ascii() {
            return Err("non-ASCII text with charset Ascii".to_string());
        }
        Ok(CommentValue {
            charset,
            text: text.to_string(),
        })
    }

    fn decode(bytes: &[u8], byte_order: ByteOrder) -> Self {
        if bytes.len() < 8 {
            return CommentValue {
                charset: Charset::Undefined,
                text: decode_text(trim_nul(bytes)),
            };
        }
        let (code, body) = bytes.split_at(8);
        let charset = [Charset::Ascii, Charset::Unicode, Charset::Jis]
            .into_iter()
            .find(|c| c.code() == code)
            .unwrap_or(Charset::Undefined);

        let text = match charset {
            Charset::Unicode => decode_ucs2(body, byte_order),
            _ => decode_text(trim_nul(body)),
        };
        CommentValue { charset, text }
    }

    fn encode(&self, byte_order: ByteOrder) -> Vec<u8> {
        let mut out = self.charset.code().to_vec();
        match self.charset {
            Charset::Unicode => {
                for unit in self.text.encode_utf16() {
                    byte_order.put_u16(&mut out, unit);
                }
            }
            _ => out.extend_from_slice(self.text.as_bytes()),
        }
        out
    }
}

impl fmt::Display for CommentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.charset {
            Charset::Undefined => f.write_str(&self.text),
            charset => write!(f, "charset=\"{}\" {}", charset.name(), self.text),
        }
    }
}

fn trim_nul(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}

fn decode_ucs2(bytes: &[u8], byte_order: ByteOrder) -> String {
    // A byte order mark overrides the Exif byte order.
    let (order, body) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (ByteOrder::LittleEndian, rest),
        [0xFE, 0xFF, rest @ ..] => (ByteOrder::BigEndian, rest),
        _ => (byte_order, bytes),
    };
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| order.read_u16(pair))
        .collect();
    let end = units.iter().rposition(|&u| u != 0).map_or(0, |i| i + 1);
    String::from_utf16_lossy(&units[..end])
}

// =============================================================================
// ExifValue
// =============================================================================

/// A decoded Exif value.
#[derive(Debug, Clone, PartialEq)]
pub enum ExifValue {
    Byte(Vec<u8>),
    Ascii(String),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<(u32, u32)>),
    SByte(Vec<i8>),
    Undefined(Vec<u8>),
    SShort(Vec<i16>),
    SLong(Vec<i32>),
    SRational(Vec<(i32, i32)>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Comment(CommentValue),
}

impl ExifValue {
    pub fn exif_type(&self) -> ExifType {
        match self {
            ExifValue::Byte(_) => ExifType::Byte,
            ExifValue::Ascii(_) => ExifType::Ascii,
            ExifValue::Short(_) => ExifType::Short,
            ExifValue::Long(_) => ExifType::Long,
            ExifValue::Rational(_) => ExifType::Rational,
            ExifValue::SByte(_) => ExifType::SByte,
            ExifValue::Undefined(_) => ExifType::Undefined,
            ExifValue::SShort(_) => ExifType::SShort,
            ExifValue::SLong(_) => ExifType::SLong,
            ExifValue::SRational(_) => ExifType::SRational,
            ExifValue::Float(_) => ExifType::Float,
            ExifValue::Double(_) => ExifType::Double,
            ExifValue::Comment(_) => ExifType::Comment,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.exif_type().name()
    }

    /// Parse the raw string form of a value of `exif_type`.
    ///
    /// Returns a message describing the first offending component on error.
    pub fn parse(exif_type: ExifType, raw: &str) -> Result<Self, String> {
        Ok(match exif_type {
            ExifType::Ascii => ExifValue::Ascii(raw.to_string()),
            ExifType::Comment => ExifValue::Comment(CommentValue::parse(raw)?),
            ExifType::Byte => ExifValue::Byte(parse_list(raw, exif_type)?),
            ExifType::Undefined => ExifValue::Undefined(parse_list(raw, exif_type)?),
            ExifType::Short => ExifValue::Short(parse_list(raw, exif_type)?),
            ExifType::Long => ExifValue::Long(parse_list(raw, exif_type)?),
            ExifType::SByte => ExifValue::SByte(parse_list(raw, exif_type)?),
            ExifType::SShort => ExifValue::SShort(parse_list(raw, exif_type)?),
            ExifType::SLong => ExifValue::SLong(parse_list(raw, exif_type)?),
            ExifType::Float => ExifValue::Float(parse_list(raw, exif_type)?),
            ExifType::Double => ExifValue::Double(parse_list(raw, exif_type)?),
            ExifType::Rational => ExifValue::Rational(
                raw.split_whitespace()
                    .map(|token| parse_fraction::<u32>(token, exif_type))
                    .collect::<Result<_, _>>()?,
            ),
            ExifType::SRational => ExifValue::SRational(
                raw.split_whitespace()
                    .map(|token| parse_fraction::<i32>(token, exif_type))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }

    /// Decode a stored value.
    ///
    /// `declared` is the type the tag is documented with; it only matters for
    /// comment tags, which are stored as Undefined. Returns `None` for field
    /// types without an Exif equivalent.
    pub fn decode(
        field_type: FieldType,
        declared: ExifType,
        bytes: &[u8],
        byte_order: ByteOrder,
    ) -> Option<Self> {
        let stored = ExifType::from_field_type(field_type)?;
        let o = byte_order;
        Some(match stored {
            ExifType::Undefined if declared == ExifType::Comment => {
                ExifValue::Comment(CommentValue::decode(bytes, o))
            }
            ExifType::Byte => ExifValue::Byte(bytes.to_vec()),
            ExifType::Undefined => ExifValue::Undefined(bytes.to_vec()),
            ExifType::Ascii => {
                let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
                ExifValue::Ascii(decode_text(&bytes[..end]))
            }
            ExifType::SByte => ExifValue::SByte(bytes.iter().map(|&b| b as i8).collect()),
            ExifType::Short => ExifValue::Short(chunks(bytes, 2, |c| o.read_u16(c))),
            ExifType::SShort => ExifValue::SShort(chunks(bytes, 2, |c| o.read_u16(c) as i16)),
            ExifType::Long => ExifValue::Long(chunks(bytes, 4, |c| o.read_u32(c))),
            ExifType::SLong => ExifValue::SLong(chunks(bytes, 4, |c| o.read_u32(c) as i32)),
            ExifType::Float => {
                ExifValue::Float(chunks(bytes, 4, |c| f32::from_bits(o.read_u32(c))))
            }
            ExifType::Double => {
                ExifValue::Double(chunks(bytes, 8, |c| f64::from_bits(o.read_u64(c))))
            }
            ExifType::Rational => ExifValue::Rational(chunks(bytes, 8, |c| {
                (o.read_u32(&c[0..4]), o.read_u32(&c[4..8]))
            })),
            ExifType::SRational => ExifValue::SRational(chunks(bytes, 8, |c| {
                (o.read_u32(&c[0..4]) as i32, o.read_u32(&c[4..8]) as i32)
            })),
            ExifType::Comment => return None,
        })
    }

    /// Encode for storage: field type, value count and bytes.
    pub fn encode(&self, byte_order: ByteOrder) -> (FieldType, u32, Vec<u8>) {
        let o = byte_order;
        let mut out = Vec::new();
        match self {
            ExifValue::Byte(v) | ExifValue::Undefined(v) => out.extend_from_slice(v),
            ExifValue::SByte(v) => out.extend(v.iter().map(|&b| b as u8)),
            ExifValue::Ascii(s) => {
                out.extend_from_slice(s.as_bytes());
                out.push(0);
            }
            ExifValue::Comment(c) => out = c.encode(o),
            ExifValue::Short(v) => v.iter().for_each(|&x| o.put_u16(&mut out, x)),
            ExifValue::SShort(v) => v.iter().for_each(|&x| o.put_u16(&mut out, x as u16)),
            ExifValue::Long(v) => v.iter().for_each(|&x| o.put_u32(&mut out, x)),
            ExifValue::SLong(v) => v.iter().for_each(|&x| o.put_u32(&mut out, x as u32)),
            ExifValue::Float(v) => v.iter().for_each(|&x| o.put_u32(&mut out, x.to_bits())),
            ExifValue::Double(v) => v.iter().for_each(|&x| o.put_u64(&mut out, x.to_bits())),
            ExifValue::Rational(v) => v.iter().for_each(|&(n, d)| {
                o.put_u32(&mut out, n);
                o.put_u32(&mut out, d);
            }),
            ExifValue::SRational(v) => v.iter().for_each(|&(n, d)| {
                o.put_u32(&mut out, n as u32);
                o.put_u32(&mut out, d as u32);
            }),
        }
        let field_type = self.exif_type().field_type();
        let count = (out.len() / field_type.size_in_bytes()) as u32;
        (field_type, count, out)
    }

    /// Number of components.
    pub fn count(&self) -> usize {
        match self {
            ExifValue::Byte(v) | ExifValue::Undefined(v) => v.len(),
            ExifValue::Ascii(s) => s.len() + 1,
            ExifValue::Comment(c) => c.encode(ByteOrder::LittleEndian).len(),
            ExifValue::Short(v) => v.len(),
            ExifValue::Long(v) => v.len(),
            ExifValue::Rational(v) => v.len(),
            ExifValue::SByte(v) => v.len(),
            ExifValue::SShort(v) => v.len(),
            ExifValue::SLong(v) => v.len(),
            ExifValue::SRational(v) => v.len(),
            ExifValue::Float(v) => v.len(),
            ExifValue::Double(v) => v.len(),
        }
    }

    /// Component `index` as an integer, for integer types.
    pub fn to_i64(&self, index: usize) -> Option<i64> {
        match self {
            ExifValue::Byte(v) | ExifValue::Undefined(v) => v.get(index).map(|&x| x as i64),
            ExifValue::Short(v) => v.get(index).map(|&x| x as i64),
            ExifValue::Long(v) => v.get(index).map(|&x| x as i64),
            ExifValue::SByte(v) => v.get(index).map(|&x| x as i64),
            ExifValue::SShort(v) => v.get(index).map(|&x| x as i64),
            ExifValue::SLong(v) => v.get(index).map(|&x| x as i64),
            _ => None,
        }
    }

    /// Component `index` as a fraction, for rational types.
    pub fn to_rational(&self, index: usize) -> Option<(i64, i64)> {
        match self {
            ExifValue::Rational(v) => v.get(index).map(|&(n, d)| (n as i64, d as i64)),
            ExifValue::SRational(v) => v.get(index).map(|&(n, d)| (n as i64, d as i64)),
            _ => None,
        }
    }

    /// Component `index` as a float, for any numeric type.
    pub fn to_f64(&self, index: usize) -> Option<f64> {
        match self {
            ExifValue::Float(v) => v.get(index).map(|&x| x as f64),
            ExifValue::Double(v) => v.get(index).copied(),
            _ => match self.to_rational(index) {
                Some((_, 0)) => None,
                Some((n, d)) => Some(n as f64 / d as f64),
                None => self.to_i64(index).map(|x| x as f64),
            },
        }
    }
}

impl fmt::Display for ExifValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        match self {
            ExifValue::Ascii(s) => f.write_str(s),
            ExifValue::Comment(c) => write!(f, "{c}"),
            ExifValue::Byte(v) | ExifValue::Undefined(v) => join(f, v),
            ExifValue::Short(v) => join(f, v),
            ExifValue::Long(v) => join(f, v),
            ExifValue::SByte(v) => join(f, v),
            ExifValue::SShort(v) => join(f, v),
            ExifValue::SLong(v) => join(f, v),
            ExifValue::Float(v) => join(f, v),
            ExifValue::Double(v) => join(f, v),
            ExifValue::Rational(v) => {
                let parts: Vec<String> = v.iter().map(|(n, d)| format!("{n}/{d}")).collect();
                join(f, &parts)
            }
            ExifValue::SRational(v) => {
                let parts: Vec<String> = v.iter().map(|(n, d)| format!("{n}/{d}")).collect();
                join(f, &parts)
            }
        }
    }
}

fn chunks<T>(bytes: &[u8], width: usize, read: impl Fn(&[u8]) -> T) -> Vec<T> {
    bytes.chunks_exact(width).map(read).collect()
}

fn parse_list<T: std::str::FromStr>(raw: &str, exif_type: ExifType) -> Result<Vec<T>, String> {
    raw.split_whitespace()
        .map(|token| {
            token
                .parse()
                .map_err(|_| format!("'{token}' is not a valid {} component", exif_type.name()))
        })
        .collect()
}

fn parse_fraction<T: std::str::FromStr + From<u8>>(
    token: &str,
    exif_type: ExifType,
) -> Result<(T, T), String> {
    let invalid = || format!("'{token}' is not a valid {} component", exif_type.name());
    match token.split_once('/') {
        Some((n, d)) => Ok((
            n.parse().map_err(|_| invalid())?,
            d.parse().map_err(|_| invalid())?,
        )),
        None => Ok((token.parse().map_err(|_| invalid())?, T::from(1u8))),
    }
}
