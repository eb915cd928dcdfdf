//! XMP property values.
//!
//! A property holds plain text, an ordered or unordered array of text, or a
//! language alternative mapping language tags to text.

use std::fmt;

/// Language tag of the default entry of a language alternative.
pub const X_DEFAULT: &str = "x-default";

/// Container kind of an array value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayKind {
    /// Unordered
    Bag,
    /// Ordered
    Seq,
    /// Alternatives
    Alt,
}

impl ArrayKind {
    pub(crate) const fn rdf_element(self) -> &'static str {
        match self {
            ArrayKind::Bag => "rdf:Bag",
            ArrayKind::Seq => "rdf:Seq",
            ArrayKind::Alt => "rdf:Alt",
        }
    }

    pub(crate) fn from_rdf_name(local_name: &[u8]) -> Option<Self> {
        match local_name {
            b"Bag" => Some(ArrayKind::Bag),
            b"Seq" => Some(ArrayKind::Seq),
            b"Alt" => Some(ArrayKind::Alt),
            _ => None,
        }
    }
}

/// Shape of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmpValueType {
    XmpText,
    XmpAlt,
    XmpBag,
    XmpSeq,
    LangAlt,
}

impl XmpValueType {
    pub const fn name(self) -> &'static str {
        match self {
            XmpValueType::XmpText => "XmpText",
            XmpValueType::XmpAlt => "XmpAlt",
            XmpValueType::XmpBag => "XmpBag",
            XmpValueType::XmpSeq => "XmpSeq",
            XmpValueType::LangAlt => "LangAlt",
        }
    }

    pub(crate) const fn array_kind(self) -> Option<ArrayKind> {
        match self {
            XmpValueType::XmpAlt => Some(ArrayKind::Alt),
            XmpValueType::XmpBag => Some(ArrayKind::Bag),
            XmpValueType::XmpSeq => Some(ArrayKind::Seq),
            XmpValueType::XmpText | XmpValueType::LangAlt => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmpValue {
    Text(String),
    Array { kind: ArrayKind, items: Vec<String> },
    /// `(language, text)` pairs, `x-default` first when present
    LangAlt(Vec<(String, String)>),
}

impl XmpValue {
    pub fn value_type(&self) -> XmpValueType {
        match self {
            XmpValue::Text(_) => XmpValueType::XmpText,
            XmpValue::Array {
                kind: ArrayKind::Bag,
                ..
            } => XmpValueType::XmpBag,
            XmpValue::Array {
                kind: ArrayKind::Seq,
                ..
            } => XmpValueType::XmpSeq,
            XmpValue::Array {
                kind: ArrayKind::Alt,
                ..
            } => XmpValueType::XmpAlt,
            XmpValue::LangAlt(_) => XmpValueType::LangAlt,
        }
    }

    /// Build a language alternative, moving `x-default` to the front.
    pub fn lang_alt<L, T>(entries: impl IntoIterator<Item = (L, T)>) -> Self
    where
        L: Into<String>,
        T: Into<String>,
    {
        let mut entries: Vec<(String, String)> = entries
            .into_iter()
            .map(|(lang, text)| (lang.into(), text.into()))
            .collect();
        if let Some(index) = entries.iter().position(|(lang, _)| lang == X_DEFAULT) {
            let default = entries.remove(index);
            entries.insert(0, default);
        }
        XmpValue::LangAlt(entries)
    }

    /// Check that the value can be written to a packet.
    pub(crate) fn validate(&self) -> Result<(), String> {
        match self {
            XmpValue::Text(text) => check_text(text),
            XmpValue::Array { items, .. } => {
                if items.is_empty() {
                    return Err("array values cannot be empty".to_string());
                }
                items.iter().try_for_each(|item| check_text(item))
            }
            XmpValue::LangAlt(entries) => {
                if entries.is_empty() {
                    return Err("language alternatives cannot be empty".to_string());
                }
                for (lang, text) in entries {
                    if !is_valid_language(lang) {
                        return Err(format!("'{lang}' is not a valid language tag"));
                    }
                    check_text(text)?;
                }
                let mut langs: Vec<&str> = entries.iter().map(|(l, _)| l.as_str()).collect();
                langs.sort_unstable();
                if langs.windows(2).any(|pair| pair[0] == pair[1]) {
                    return Err("duplicate language in language alternative".to_string());
                }
                Ok(())
            }
        }
    }

    /// Parse `lang="fr-FR" texte`, or plain text for `x-default`.
    pub(crate) fn parse_lang_entry(raw: &str) -> (String, String) {
        if let Some(rest) = raw.strip_prefix("lang=") {
            let rest = rest.trim_start_matches('"');
            if let Some((lang, text)) = rest.split_once('"') {
                return (lang.to_string(), text.strip_prefix(' ').unwrap_or(text).to_string());
            }
        }
        (X_DEFAULT.to_string(), raw.to_string())
    }
}

impl fmt::Display for XmpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmpValue::Text(text) => f.write_str(text),
            XmpValue::Array { items, .. } => f.write_str(&items.join(", ")),
            XmpValue::LangAlt(entries) => {
                for (i, (lang, text)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "lang=\"{lang}\" {text}")?;
                }
                Ok(())
            }
        }
    }
}

fn check_text(text: &str) -> Result<(), String> {
    match text
        .chars()
        .find(|&c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
    {
        Some(c) => Err(format!("character U+{:04X} cannot be stored in XMP", c as u32)),
        None => Ok(()),
    }
}

fn is_valid_language(lang: &str) -> bool {
    !lang.is_empty()
        && lang
            .split('-')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()))
}
