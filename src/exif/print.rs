//! Interpreted rendering of Exif values.

use super::tags::Printer;
use super::value::ExifValue;

/// Render `value` the way a photo viewer would show it.
///
/// Values that do not fit the printer fall back to their raw form in
/// parentheses.
pub(crate) fn human_value(printer: Printer, value: &ExifValue) -> String {
    let rendered = match printer {
        Printer::Value => return value.to_string(),
        Printer::Enum(labels) => single_integer(value).and_then(|n| {
            labels
                .iter()
                .find(|(code, _)| *code == n)
                .map(|(_, label)| label.to_string())
        }),
        Printer::ExposureTime => exposure_time(value),
        Printer::FNumber => value.to_f64(0).map(|f| format!("F{}", trim_decimal(f, 1))),
        Printer::FocalLength => value
            .to_f64(0)
            .map(|f| format!("{} mm", trim_decimal(f, 1))),
        Printer::Version => version(value),
        Printer::Comment => match value {
            ExifValue::Comment(comment) => Some(comment.text.clone()),
            _ => None,
        },
        Printer::GpsCoordinate => gps_coordinate(value),
        Printer::XpString => xp_string(value),
    };
    rendered.unwrap_or_else(|| format!("({value})"))
}

fn single_integer(value: &ExifValue) -> Option<i64> {
    if value.count() != 1 {
        return None;
    }
    value.to_i64(0)
}

fn trim_decimal(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a.abs()
    } else {
        gcd(b, a % b)
    }
}

fn exposure_time(value: &ExifValue) -> Option<String> {
    let (n, d) = value.to_rational(0)?;
    if d == 0 {
        return None;
    }
    let g = gcd(n, d).max(1);
    let (n, d) = (n / g, d / g);
    Some(if d == 1 {
        format!("{n} s")
    } else if n == 1 {
        format!("1/{d} s")
    } else {
        format!("{} s", trim_decimal(n as f64 / d as f64, 1))
    })
}

fn version(value: &ExifValue) -> Option<String> {
    let ExifValue::Undefined(bytes) = value else {
        return None;
    };
    let digits: &[u8; 4] = bytes.as_slice().try_into().ok()?;
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let major = (digits[0] - b'0') * 10 + (digits[1] - b'0');
    Some(format!("{major}.{}{}", digits[2] as char, digits[3] as char))
}

fn gps_coordinate(value: &ExifValue) -> Option<String> {
    if value.count() != 3 {
        return None;
    }
    let degrees = value.to_f64(0)?;
    let minutes = value.to_f64(1)?;
    let seconds = value.to_f64(2)?;
    Some(format!(
        "{} deg {}' {}\"",
        trim_decimal(degrees, 0),
        trim_decimal(minutes, 0),
        trim_decimal(seconds, 2)
    ))
}

fn xp_string(value: &ExifValue) -> Option<String> {
    let ExifValue::Byte(bytes) = value else {
        return None;
    };
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&unit| unit != 0)
        .collect();
    String::from_utf16(&units).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exif::value::{Charset, CommentValue};

    const ORIENTATION: &[(i64, &str)] = &[(1, "top, left"), (6, "right, top")];

    #[test]
    fn test_enum_lookup() {
        let printer = Printer::Enum(ORIENTATION);
        assert_eq!(human_value(printer, &ExifValue::Short(vec![6])), "right, top");
        assert_eq!(human_value(printer, &ExifValue::Short(vec![9])), "(9)");
        assert_eq!(human_value(printer, &ExifValue::Short(vec![1, 6])), "(1 6)");
    }

    #[test]
    fn test_exposure_and_aperture() {
        let time = |n, d| human_value(Printer::ExposureTime, &ExifValue::Rational(vec![(n, d)]));
        assert_eq!(time(1, 60), "1/60 s");
        assert_eq!(time(10, 600), "1/60 s");
        assert_eq!(time(2, 1), "2 s");
        assert_eq!(time(3, 2), "1.5 s");
        assert_eq!(time(1, 0), "(1/0)");

        let f = |n, d| human_value(Printer::FNumber, &ExifValue::Rational(vec![(n, d)]));
        assert_eq!(f(28, 10), "F2.8");
        assert_eq!(f(8, 1), "F8");

        let focal = human_value(Printer::FocalLength, &ExifValue::Rational(vec![(50, 1)]));
        assert_eq!(focal, "50 mm");
    }

    #[test]
    fn test_version_and_comment() {
        let version = human_value(Printer::Version, &ExifValue::Undefined(b"0230".to_vec()));
        assert_eq!(version, "2.30");

        let comment = ExifValue::Comment(CommentValue {
            charset: Charset::Ascii,
            text: "hello".to_string(),
        });
        assert_eq!(human_value(Printer::Comment, &comment), "hello");
    }

    #[test]
    fn test_gps_and_xp() {
        let coordinate = ExifValue::Rational(vec![(46, 1), (27, 1), (3850, 100)]);
        assert_eq!(
            human_value(Printer::GpsCoordinate, &coordinate),
            "46 deg 27' 38.5\""
        );

        let xp = ExifValue::Byte(vec![b'H', 0, b'i', 0, 0, 0]);
        assert_eq!(human_value(Printer::XpString, &xp), "Hi");
    }
}
