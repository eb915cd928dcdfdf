//! Typed views of XMP text.
//!
//! Schema types are written like `Integer`, `seq Date` or
//! `Closed Choice of Integer`; the last word names the simple type of the
//! value or of each array item. Text forms:
//! - `Boolean`: `True` or `False`
//! - `Integer`, `Real`: decimal
//! - `Rational`: `numerator/denominator`
//! - `Date`: `YYYY[-MM[-DD[Thh:mm[:ss[.s+]][TZD]]]]`, TZD being `Z` or `±hh:mm`
//! - `GPSCoordinate`: `DDD,MM,SSk` or `DDD,MM.mmk`, with `k` one of `NSEW`
//! - `MIMEType`: `type/subtype`

use std::fmt;

use tracing::debug;

/// Simple type of an XMP value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmpBasicType {
    Boolean,
    Integer,
    Real,
    Rational,
    Date,
    GpsCoordinate,
    MimeType,
    /// Any text form, including `URI`, `URL`, `AgentName` and `Locale`
    Text,
}

impl XmpBasicType {
    /// Simple type named by a schema type string; unknown types are text.
    pub fn from_schema(xmp_type: &str) -> Self {
        match xmp_type.split_whitespace().last().unwrap_or("") {
            "Boolean" => XmpBasicType::Boolean,
            "Integer" => XmpBasicType::Integer,
            "Real" => XmpBasicType::Real,
            "Rational" => XmpBasicType::Rational,
            "Date" => XmpBasicType::Date,
            "GPSCoordinate" => XmpBasicType::GpsCoordinate,
            "MIMEType" => XmpBasicType::MimeType,
            _ => XmpBasicType::Text,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            XmpBasicType::Boolean => "Boolean",
            XmpBasicType::Integer => "Integer",
            XmpBasicType::Real => "Real",
            XmpBasicType::Rational => "Rational",
            XmpBasicType::Date => "Date",
            XmpBasicType::GpsCoordinate => "GPSCoordinate",
            XmpBasicType::MimeType => "MIMEType",
            XmpBasicType::Text => "Text",
        }
    }
}

/// Parse exactly `width` ASCII digits.
fn fixed_digits(text: &str, width: usize) -> Option<u32> {
    if text.len() != width || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

// =============================================================================
// Date
// =============================================================================

/// Time of day within an [`XmpDate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XmpTime {
    pub hour: u8,
    pub minute: u8,
    pub second: Option<u8>,
    pub nanosecond: u32,
    /// Offset from UTC in minutes; `None` for local time
    pub utc_offset: Option<i16>,
}

impl XmpTime {
    pub fn new(
        hour: u8,
        minute: u8,
        second: Option<u8>,
        nanosecond: u32,
        utc_offset: Option<i16>,
    ) -> Result<Self, String> {
        let valid = hour < 24
            && minute < 60
            && second.map_or(nanosecond == 0, |s| s < 60)
            && nanosecond < 1_000_000_000
            && utc_offset.map_or(true, |o| o.unsigned_abs() < 24 * 60);
        if !valid {
            return Err(format!(
                "{hour:02}:{minute:02}:{:02} is not a valid time",
                second.unwrap_or(0)
            ));
        }
        Ok(Self {
            hour,
            minute,
            second,
            nanosecond,
            utc_offset,
        })
    }

    fn parse(raw: &str) -> Option<Self> {
        let (clock, utc_offset) = if let Some(clock) = raw.strip_suffix('Z') {
            (clock, Some(0))
        } else if let Some(at) = raw.rfind(['+', '-']) {
            let (clock, zone) = raw.split_at(at);
            let (hours, minutes) = zone[1..].split_once(':')?;
            let minutes = (fixed_digits(hours, 2)? * 60 + fixed_digits(minutes, 2)?) as i16;
            (clock, Some(if zone.starts_with('-') { -minutes } else { minutes }))
        } else {
            (raw, None)
        };

        let mut parts = clock.split(':');
        let hour = fixed_digits(parts.next()?, 2)? as u8;
        let minute = fixed_digits(parts.next()?, 2)? as u8;
        let (second, nanosecond) = match parts.next() {
            None => (None, 0),
            Some(seconds) => {
                let (whole, fraction) = match seconds.split_once('.') {
                    Some((whole, fraction)) => (whole, Some(fraction)),
                    None => (seconds, None),
                };
                let nanosecond = match fraction {
                    None => 0,
                    Some(f) if !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()) => {
                        let mut digits: String = f.chars().take(9).collect();
                        while digits.len() < 9 {
                            digits.push('0');
                        }
                        digits.parse().ok()?
                    }
                    Some(_) => return None,
                };
                (Some(fixed_digits(whole, 2)? as u8), nanosecond)
            }
        };
        if parts.next().is_some() {
            return None;
        }
        Self::new(hour, minute, second, nanosecond, utc_offset).ok()
    }
}

impl fmt::Display for XmpTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)?;
        if let Some(second) = self.second {
            write!(f, ":{second:02}")?;
            if self.nanosecond > 0 {
                let fraction = format!("{:09}", self.nanosecond);
                write!(f, ".{}", fraction.trim_end_matches('0'))?;
            }
        }
        match self.utc_offset {
            None => Ok(()),
            Some(0) => f.write_str("Z"),
            Some(offset) => {
                let sign = if offset < 0 { '-' } else { '+' };
                let offset = offset.unsigned_abs();
                write!(f, "{sign}{:02}:{:02}", offset / 60, offset % 60)
            }
        }
    }
}

/// An XMP date, precise to the year, month, day or time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XmpDate {
    pub year: u16,
    pub month: Option<u8>,
    pub day: Option<u8>,
    pub time: Option<XmpTime>,
}

impl XmpDate {
    pub fn new(
        year: u16,
        month: Option<u8>,
        day: Option<u8>,
        time: Option<XmpTime>,
    ) -> Result<Self, String> {
        let valid = year <= 9999
            && match (month, day) {
                (None, None) => time.is_none(),
                (Some(m), None) => (1..=12).contains(&m) && time.is_none(),
                (Some(m), Some(d)) => {
                    (1..=12).contains(&m) && (1..=days_in_month(year, m)).contains(&d)
                }
                (None, Some(_)) => false,
            };
        if !valid {
            return Err(format!(
                "{year:04}-{:02}-{:02} is not a valid date",
                month.unwrap_or(0),
                day.unwrap_or(0)
            ));
        }
        Ok(Self {
            year,
            month,
            day,
            time,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        let unsupported = || format!("unsupported date format '{raw}'");
        let (date, time) = match raw.split_once('T') {
            Some((date, time)) => (date, Some(time)),
            None => (raw, None),
        };

        let mut parts = date.split('-');
        let year = parts
            .next()
            .and_then(|y| fixed_digits(y, 4))
            .ok_or_else(unsupported)?;
        let mut field = || -> Result<Option<u8>, String> {
            parts
                .next()
                .map(|p| fixed_digits(p, 2).map(|v| v as u8).ok_or_else(unsupported))
                .transpose()
        };
        let month = field()?;
        let day = field()?;
        if parts.next().is_some() {
            return Err(unsupported());
        }
        let time = match time {
            Some(time) => Some(XmpTime::parse(time).ok_or_else(unsupported)?),
            None => None,
        };
        Self::new(year as u16, month, day, time)
    }
}

impl fmt::Display for XmpDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.year)?;
        if let Some(month) = self.month {
            write!(f, "-{month:02}")?;
        }
        if let Some(day) = self.day {
            write!(f, "-{day:02}")?;
        }
        if let Some(time) = &self.time {
            write!(f, "T{time}")?;
        }
        Ok(())
    }
}

// =============================================================================
// GPS coordinate
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpsDirection {
    North,
    South,
    East,
    West,
}

impl GpsDirection {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(GpsDirection::North),
            'S' => Some(GpsDirection::South),
            'E' => Some(GpsDirection::East),
            'W' => Some(GpsDirection::West),
            _ => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            GpsDirection::North => 'N',
            GpsDirection::South => 'S',
            GpsDirection::East => 'E',
            GpsDirection::West => 'W',
        }
    }

    const fn max_degrees(self) -> u16 {
        match self {
            GpsDirection::North | GpsDirection::South => 90,
            GpsDirection::East | GpsDirection::West => 180,
        }
    }
}

/// A latitude or longitude in degrees, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpsCoordinate {
    pub degrees: u16,
    pub minutes: u8,
    pub seconds: u8,
    pub direction: GpsDirection,
}

impl GpsCoordinate {
    pub fn new(
        degrees: u16,
        minutes: u8,
        seconds: u8,
        direction: GpsDirection,
    ) -> Result<Self, String> {
        let total = u32::from(degrees) * 3600 + u32::from(minutes) * 60 + u32::from(seconds);
        if minutes >= 60 || seconds >= 60 || total > u32::from(direction.max_degrees()) * 3600 {
            return Err(format!(
                "{degrees},{minutes:02},{seconds:02}{} is out of range",
                direction.as_char()
            ));
        }
        Ok(Self {
            degrees,
            minutes,
            seconds,
            direction,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        let unsupported = || format!("unsupported GPS coordinate '{raw}'");
        let mut chars = raw.chars();
        let direction = chars
            .next_back()
            .and_then(GpsDirection::from_char)
            .ok_or_else(unsupported)?;
        let body = chars.as_str();
        let whole = |s: &str| -> Result<u32, String> {
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) || s.len() > 3 {
                return Err(unsupported());
            }
            s.parse().map_err(|_| unsupported())
        };

        let parts: Vec<&str> = body.split(',').collect();
        let (degrees, seconds_total) = match *parts.as_slice() {
            [degrees, minutes, seconds] => {
                let (minutes, seconds) = (whole(minutes)?, whole(seconds)?);
                if minutes >= 60 || seconds >= 60 {
                    return Err(unsupported());
                }
                (whole(degrees)?, minutes * 60 + seconds)
            }
            [degrees, minutes] => {
                let (int, frac) = minutes.split_once('.').unwrap_or((minutes, ""));
                if !frac.bytes().all(|b| b.is_ascii_digit()) || whole(int)? >= 60 {
                    return Err(unsupported());
                }
                let minutes: f64 = minutes.parse().map_err(|_| unsupported())?;
                (whole(degrees)?, (minutes * 60.0).round() as u32)
            }
            _ => return Err(unsupported()),
        };
        let degrees = u16::try_from(degrees).map_err(|_| unsupported())?;
        // rounding may carry a full minute or degree
        let degrees = degrees + (seconds_total / 3600) as u16;
        let seconds_total = seconds_total % 3600;
        Self::new(
            degrees,
            (seconds_total / 60) as u8,
            (seconds_total % 60) as u8,
            direction,
        )
    }

    /// Signed decimal degrees, negative to the south and west.
    pub fn to_decimal_degrees(&self) -> f64 {
        let value = f64::from(self.degrees)
            + f64::from(self.minutes) / 60.0
            + f64::from(self.seconds) / 3600.0;
        match self.direction {
            GpsDirection::South | GpsDirection::West => -value,
            GpsDirection::North | GpsDirection::East => value,
        }
    }
}

impl fmt::Display for GpsCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{:02},{:02}{}",
            self.degrees,
            self.minutes,
            self.seconds,
            self.direction.as_char()
        )
    }
}

// =============================================================================
// XmpTypedValue
// =============================================================================

/// XMP text converted to its simple type.
#[derive(Debug, Clone, PartialEq)]
pub enum XmpTypedValue {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Rational { numerator: i64, denominator: i64 },
    Date(XmpDate),
    GpsCoordinate(GpsCoordinate),
    MimeType { media_type: String, subtype: String },
    Text(String),
}

impl XmpTypedValue {
    pub fn basic_type(&self) -> XmpBasicType {
        match self {
            XmpTypedValue::Boolean(_) => XmpBasicType::Boolean,
            XmpTypedValue::Integer(_) => XmpBasicType::Integer,
            XmpTypedValue::Real(_) => XmpBasicType::Real,
            XmpTypedValue::Rational { .. } => XmpBasicType::Rational,
            XmpTypedValue::Date(_) => XmpBasicType::Date,
            XmpTypedValue::GpsCoordinate(_) => XmpBasicType::GpsCoordinate,
            XmpTypedValue::MimeType { .. } => XmpBasicType::MimeType,
            XmpTypedValue::Text(_) => XmpBasicType::Text,
        }
    }

    /// Parse `raw` as `basic_type`.
    ///
    /// # Errors
    /// A message naming the text that is not a valid `basic_type` value.
    pub fn parse(basic_type: XmpBasicType, raw: &str) -> Result<Self, String> {
        let invalid = || format!("'{raw}' is not a valid {}", basic_type.name());
        let value = match basic_type {
            XmpBasicType::Boolean => match raw {
                "True" => XmpTypedValue::Boolean(true),
                "False" => XmpTypedValue::Boolean(false),
                _ => return Err(invalid()),
            },
            XmpBasicType::Integer => {
                XmpTypedValue::Integer(raw.trim().parse().map_err(|_| invalid())?)
            }
            XmpBasicType::Real => {
                let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
                if !value.is_finite() {
                    return Err(invalid());
                }
                XmpTypedValue::Real(value)
            }
            XmpBasicType::Rational => {
                let (numerator, denominator) = raw.split_once('/').ok_or_else(invalid)?;
                let numerator: i64 = numerator.trim().parse().map_err(|_| invalid())?;
                let denominator: i64 = denominator.trim().parse().map_err(|_| invalid())?;
                if denominator == 0 {
                    return Err(invalid());
                }
                XmpTypedValue::Rational {
                    numerator,
                    denominator,
                }
            }
            XmpBasicType::Date => XmpTypedValue::Date(XmpDate::parse(raw)?),
            XmpBasicType::GpsCoordinate => {
                XmpTypedValue::GpsCoordinate(GpsCoordinate::parse(raw)?)
            }
            XmpBasicType::MimeType => {
                let (media_type, subtype) = raw.split_once('/').ok_or_else(invalid)?;
                let token = |s: &str| {
                    !s.is_empty() && !s.contains('/') && !s.contains(char::is_whitespace)
                };
                if !token(media_type) || !token(subtype) {
                    return Err(invalid());
                }
                XmpTypedValue::MimeType {
                    media_type: media_type.to_string(),
                    subtype: subtype.to_string(),
                }
            }
            XmpBasicType::Text => XmpTypedValue::Text(raw.to_string()),
        };
        Ok(value)
    }

    /// Like [`parse`](Self::parse), keeping text that does not convert as
    /// [`XmpTypedValue::Text`].
    pub fn convert(basic_type: XmpBasicType, raw: &str) -> Self {
        Self::parse(basic_type, raw).unwrap_or_else(|message| {
            debug!(%message, "keeping XMP value as text");
            XmpTypedValue::Text(raw.to_string())
        })
    }
}

impl fmt::Display for XmpTypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmpTypedValue::Boolean(true) => f.write_str("True"),
            XmpTypedValue::Boolean(false) => f.write_str("False"),
            XmpTypedValue::Integer(value) => write!(f, "{value}"),
            XmpTypedValue::Real(value) => write!(f, "{value}"),
            XmpTypedValue::Rational {
                numerator,
                denominator,
            } => write!(f, "{numerator}/{denominator}"),
            XmpTypedValue::Date(date) => write!(f, "{date}"),
            XmpTypedValue::GpsCoordinate(coordinate) => write!(f, "{coordinate}"),
            XmpTypedValue::MimeType {
                media_type,
                subtype,
            } => write!(f, "{media_type}/{subtype}"),
            XmpTypedValue::Text(text) => f.write_str(text),
        }
    }
}
