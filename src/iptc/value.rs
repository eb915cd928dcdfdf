//! IPTC dataset values.
//!
//! Raw string forms:
//! - `String`: the text
//! - `Short`: decimal
//! - `Date`: `YYYY-MM-DD`
//! - `Time`: `HH:MM:SS+HH:MM`
//! - `Undefined`: decimal byte values separated by spaces

use std::fmt;

use crate::format::decode_text;

/// Value type of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IptcType {
    String,
    Short,
    Date,
    Time,
    Undefined,
}

impl IptcType {
    pub const fn name(self) -> &'static str {
        match self {
            IptcType::String => "String",
            IptcType::Short => "Short",
            IptcType::Date => "Date",
            IptcType::Time => "Time",
            IptcType::Undefined => "Undefined",
        }
    }
}

// =============================================================================
// Date and time
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IptcDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl IptcDate {
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, String> {
        if year > 9999 || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(format!("{year:04}-{month:02}-{day:02} is not a valid date"));
        }
        Ok(Self { year, month, day })
    }

    /// Parse `YYYY-MM-DD` or the stored `YYYYMMDD` form.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let digits: String = match raw.len() {
            10 if raw.as_bytes()[4] == b'-' && raw.as_bytes()[7] == b'-' => {
                raw.chars().filter(|&c| c != '-').collect()
            }
            8 => raw.to_string(),
            _ => return Err(format!("unsupported date format '{raw}'")),
        };
        if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("unsupported date format '{raw}'"));
        }
        let number = |range: std::ops::Range<usize>| digits[range].parse::<u16>().unwrap_or(0);
        Self::new(number(0..4), number(4..6) as u8, number(6..8) as u8)
    }

    fn to_stored(self) -> String {
        format!("{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for IptcDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IptcTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Offset from UTC in minutes
    pub utc_offset: i16,
}

impl IptcTime {
    pub fn new(hour: u8, minute: u8, second: u8, utc_offset: i16) -> Result<Self, String> {
        if hour > 23 || minute > 59 || second > 60 || utc_offset.abs() >= 24 * 60 {
            return Err(format!(
                "{hour:02}:{minute:02}:{second:02} offset {utc_offset} is not a valid time"
            ));
        }
        Ok(Self {
            hour,
            minute,
            second,
            utc_offset,
        })
    }

    /// Parse `HH:MM:SS±HH:MM` or the stored `HHMMSS±HHMM` form.
    ///
    /// A missing offset means UTC.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let unsupported = || format!("unsupported time format '{raw}'");
        let compact: String = raw.chars().filter(|&c| c != ':').collect();
        let (clock, offset) = match compact.find(['+', '-']) {
            Some(at) => compact.split_at(at),
            None => (compact.as_str(), ""),
        };
        if clock.len() != 6 || !clock.bytes().all(|b| b.is_ascii_digit()) {
            return Err(unsupported());
        }
        let field = |s: &str, range: std::ops::Range<usize>| s[range].parse::<u8>().unwrap_or(0);

        let utc_offset = if offset.is_empty() {
            0
        } else {
            let (sign, digits) = offset.split_at(1);
            if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(unsupported());
            }
            let minutes = field(digits, 0..2) as i16 * 60 + field(digits, 2..4) as i16;
            if sign == "-" {
                -minutes
            } else {
                minutes
            }
        };
        Self::new(
            field(clock, 0..2),
            field(clock, 2..4),
            field(clock, 4..6),
            utc_offset,
        )
    }

    fn sign_and_offset(self) -> (char, u16, u16) {
        let sign = if self.utc_offset < 0 { '-' } else { '+' };
        let offset = self.utc_offset.unsigned_abs();
        (sign, offset / 60, offset % 60)
    }

    fn to_stored(self) -> String {
        let (sign, h, m) = self.sign_and_offset();
        format!(
            "{:02}{:02}{:02}{sign}{h:02}{m:02}",
            self.hour, self.minute, self.second
        )
    }
}

impl fmt::Display for IptcTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, h, m) = self.sign_and_offset();
        write!(
            f,
            "{:02}:{:02}:{:02}{sign}{h:02}:{m:02}",
            self.hour, self.minute, self.second
        )
    }
}

// =============================================================================
// IptcValue
// =============================================================================

/// A decoded dataset value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IptcValue {
    /// Text as stored; not necessarily UTF-8
    String(Vec<u8>),
    Short(u16),
    Date(IptcDate),
    Time(IptcTime),
    Undefined(Vec<u8>),
}

impl IptcValue {
    pub fn text(text: impl Into<String>) -> Self {
        IptcValue::String(text.into().into_bytes())
    }

    pub fn value_type(&self) -> IptcType {
        match self {
            IptcValue::String(_) => IptcType::String,
            IptcValue::Short(_) => IptcType::Short,
            IptcValue::Date(_) => IptcType::Date,
            IptcValue::Time(_) => IptcType::Time,
            IptcValue::Undefined(_) => IptcType::Undefined,
        }
    }

    pub fn parse(value_type: IptcType, raw: &str) -> Result<Self, String> {
        Ok(match value_type {
            IptcType::String => IptcValue::String(raw.as_bytes().to_vec()),
            IptcType::Short => IptcValue::Short(
                raw.trim()
                    .parse()
                    .map_err(|_| format!("'{raw}' is not a valid Short"))?,
            ),
            IptcType::Date => IptcValue::Date(IptcDate::parse(raw)?),
            IptcType::Time => IptcValue::Time(IptcTime::parse(raw)?),
            IptcType::Undefined => IptcValue::Undefined(
                raw.split_whitespace()
                    .map(|token| {
                        token
                            .parse()
                            .map_err(|_| format!("'{token}' is not a valid byte"))
                    })
                    .collect::<Result<_, _>>()?,
            ),
        })
    }

    /// Decode stored bytes.
    ///
    /// Dates and times that do not parse are kept as strings, so reading
    /// a sloppy file never loses data.
    pub fn decode(value_type: IptcType, bytes: &[u8]) -> Self {
        match value_type {
            IptcType::String => IptcValue::String(bytes.to_vec()),
            IptcType::Undefined => IptcValue::Undefined(bytes.to_vec()),
            IptcType::Short => match bytes {
                [hi, lo] => IptcValue::Short(u16::from_be_bytes([*hi, *lo])),
                _ => IptcValue::Undefined(bytes.to_vec()),
            },
            IptcType::Date => std::str::from_utf8(bytes)
                .ok()
                .and_then(|s| IptcDate::parse(s).ok())
                .map_or_else(|| IptcValue::String(bytes.to_vec()), IptcValue::Date),
            IptcType::Time => std::str::from_utf8(bytes)
                .ok()
                .and_then(|s| IptcTime::parse(s).ok())
                .map_or_else(|| IptcValue::String(bytes.to_vec()), IptcValue::Time),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            IptcValue::String(bytes) | IptcValue::Undefined(bytes) => bytes.clone(),
            IptcValue::Short(n) => n.to_be_bytes().to_vec(),
            IptcValue::Date(date) => date.to_stored().into_bytes(),
            IptcValue::Time(time) => time.to_stored().into_bytes(),
        }
    }

    /// Whether the value holds bytes outside ASCII, counting only text.
    pub(crate) fn is_non_ascii_text(&self) -> bool {
        matches!(self, IptcValue::String(bytes) if !bytes.is_ascii())
    }
}

impl fmt::Display for IptcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IptcValue::String(bytes) => f.write_str(&decode_text(bytes)),
            IptcValue::Short(n) => write!(f, "{n}"),
            IptcValue::Date(date) => write!(f, "{date}"),
            IptcValue::Time(time) => write!(f, "{time}"),
            IptcValue::Undefined(bytes) => {
                for (i, b) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{b}")?;
                }
                Ok(())
            }
        }
    }
}
