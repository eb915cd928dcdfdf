use tracing::debug;

use crate::binding::Binding;
use crate::container::SharedContainer;
use crate::error::{MetadataError, Result};
use crate::image::Image;

use super::datum::XmpDatum;
use super::key::XmpKey;
use super::typed::{XmpBasicType, XmpTypedValue};
use super::value::{ArrayKind, XmpValue, XmpValueType};

/// An XMP property, detached or attached to an image.
///
/// The value is one of three shapes: text, an array of text or a language
/// alternative. Getters fail with `TypeMismatch` when asked for a shape
/// other than the stored one.
#[derive(Debug)]
pub struct XmpTag {
    key: XmpKey,
    binding: Binding<XmpDatum>,
}

impl XmpTag {
    /// Create a detached tag without a value.
    ///
    /// # Errors
    /// `InvalidKey` if `key` is malformed or uses an unregistered prefix.
    pub fn new(key: &str) -> Result<Self> {
        Ok(Self {
            key: XmpKey::parse(key)?,
            binding: Binding::detached(),
        })
    }

    /// Create a detached tag holding `value`.
    pub fn with_value(key: &str, value: XmpValue) -> Result<Self> {
        let mut tag = Self::new(key)?;
        tag.set_value(value)?;
        Ok(tag)
    }

    pub(crate) fn attached(key: XmpKey, container: SharedContainer<XmpDatum>) -> Self {
        Self {
            key,
            binding: Binding::attached(container),
        }
    }

    pub fn key(&self) -> &XmpKey {
        &self.key
    }

    /// Property path, such as `subject` or `History[1]/stEvt:action`.
    pub fn name(&self) -> &str {
        self.key.property()
    }

    pub fn prefix(&self) -> &str {
        self.key.prefix()
    }

    pub fn namespace_uri(&self) -> Option<String> {
        self.key.namespace_uri()
    }

    pub fn title(&self) -> &'static str {
        self.key.info().map_or("", |info| info.title)
    }

    pub fn description(&self) -> &'static str {
        self.key.info().map_or("", |info| info.description)
    }

    /// Type as written in the schema, such as `bag Text`.
    pub fn type_name(&self) -> &'static str {
        match self.key.info() {
            Some(info) => info.xmp_type,
            None => self.value_type().name(),
        }
    }

    /// Shape of the stored value, else the declared one, else text.
    pub fn value_type(&self) -> XmpValueType {
        if let Some(value) = self.value() {
            return value.value_type();
        }
        self.key
            .info()
            .map_or(XmpValueType::XmpText, |info| info.value_type)
    }

    pub fn value(&self) -> Option<XmpValue> {
        let key = &self.key;
        self.binding
            .with(|entries| entries.find(key).and_then(|d| d.value.clone()))
    }

    /// String form of the value; empty when unset.
    pub fn raw_value(&self) -> String {
        self.value().map(|v| v.to_string()).unwrap_or_default()
    }

    fn mismatch(&self, stored: &XmpValue, requested: &'static str) -> MetadataError {
        MetadataError::TypeMismatch {
            key: self.key.to_string(),
            stored: stored.value_type().name(),
            requested,
        }
    }

    /// # Errors
    /// `TypeMismatch` if the stored value is not text.
    pub fn text_value(&self) -> Result<String> {
        match self.value() {
            None => Ok(String::new()),
            Some(XmpValue::Text(text)) => Ok(text),
            Some(other) => Err(self.mismatch(&other, XmpValueType::XmpText.name())),
        }
    }

    /// # Errors
    /// `TypeMismatch` if the stored value is not an array.
    pub fn array_value(&self) -> Result<Vec<String>> {
        match self.value() {
            None => Ok(Vec::new()),
            Some(XmpValue::Array { items, .. }) => Ok(items),
            Some(other) => Err(self.mismatch(&other, "array")),
        }
    }

    /// # Errors
    /// `TypeMismatch` if the stored value is not a language alternative.
    pub fn lang_alt_value(&self) -> Result<Vec<(String, String)>> {
        match self.value() {
            None => Ok(Vec::new()),
            Some(XmpValue::LangAlt(entries)) => Ok(entries),
            Some(other) => Err(self.mismatch(&other, XmpValueType::LangAlt.name())),
        }
    }

    /// Simple type the schema declares for the value or its items; `Text`
    /// for properties without a schema entry.
    pub fn basic_type(&self) -> XmpBasicType {
        self.key
            .info()
            .map_or(XmpBasicType::Text, |info| XmpBasicType::from_schema(info.xmp_type))
    }

    /// Text value converted to [`basic_type`](Self::basic_type); text that
    /// does not convert comes back as [`XmpTypedValue::Text`]. `None` when
    /// unset.
    ///
    /// # Errors
    /// `TypeMismatch` if the stored value is not text.
    pub fn typed_value(&self) -> Result<Option<XmpTypedValue>> {
        match self.value() {
            None => Ok(None),
            Some(XmpValue::Text(text)) => {
                Ok(Some(XmpTypedValue::convert(self.basic_type(), &text)))
            }
            Some(other) => Err(self.mismatch(&other, XmpValueType::XmpText.name())),
        }
    }

    /// Array items converted like [`typed_value`](Self::typed_value).
    pub fn typed_values(&self) -> Result<Vec<XmpTypedValue>> {
        let basic_type = self.basic_type();
        Ok(self
            .array_value()?
            .iter()
            .map(|item| XmpTypedValue::convert(basic_type, item))
            .collect())
    }

    /// Store `value` as text.
    ///
    /// # Errors
    /// `InvalidValue` if the schema declares another simple type.
    pub fn set_typed_value(&mut self, value: &XmpTypedValue) -> Result<()> {
        self.check_basic_type(value)?;
        self.set_text_value(&value.to_string())
    }

    /// Store `values` as array items, like [`set_typed_value`](Self::set_typed_value).
    pub fn set_typed_values<'a>(
        &mut self,
        values: impl IntoIterator<Item = &'a XmpTypedValue>,
    ) -> Result<()> {
        let items = values
            .into_iter()
            .map(|value| {
                self.check_basic_type(value)?;
                Ok(value.to_string())
            })
            .collect::<Result<Vec<_>>>()?;
        self.set_array_value(items)
    }

    fn check_basic_type(&self, value: &XmpTypedValue) -> Result<()> {
        let declared = self.basic_type();
        if declared == XmpBasicType::Text || value.basic_type() == declared {
            return Ok(());
        }
        Err(MetadataError::invalid_value(
            self.key.to_string(),
            format!(
                "expected a {} value, got {}",
                declared.name(),
                value.basic_type().name()
            ),
        ))
    }

    pub fn set_text_value(&mut self, text: &str) -> Result<()> {
        self.set_value(XmpValue::Text(text.to_string()))
    }

    /// Store an array, keeping the stored container kind, else the
    /// declared one, else `Bag`.
    pub fn set_array_value<S: Into<String>>(
        &mut self,
        items: impl IntoIterator<Item = S>,
    ) -> Result<()> {
        let kind = self.array_kind();
        self.set_value(XmpValue::Array {
            kind,
            items: items.into_iter().map(Into::into).collect(),
        })
    }

    pub fn set_lang_alt_value<L, T>(
        &mut self,
        entries: impl IntoIterator<Item = (L, T)>,
    ) -> Result<()>
    where
        L: Into<String>,
        T: Into<String>,
    {
        self.set_value(XmpValue::lang_alt(entries))
    }

    /// Store a single string in the current shape: text, a one-item array,
    /// or one `lang="…" text` entry.
    pub fn set_raw_value(&mut self, raw: &str) -> Result<()> {
        let value = match self.value_type() {
            XmpValueType::XmpText => XmpValue::Text(raw.to_string()),
            XmpValueType::LangAlt => {
                let (lang, text) = XmpValue::parse_lang_entry(raw);
                XmpValue::LangAlt(vec![(lang, text)])
            }
            XmpValueType::XmpAlt | XmpValueType::XmpBag | XmpValueType::XmpSeq => XmpValue::Array {
                kind: self.array_kind(),
                items: vec![raw.to_string()],
            },
        };
        self.set_value(value)
    }

    /// Replace the value, whatever shape it had.
    ///
    /// Fields and items nested under the key are removed: the new value
    /// stands for the whole property.
    ///
    /// # Errors
    /// `InvalidValue` for empty arrays or language alternatives, invalid
    /// language tags, and control characters; the value is left unchanged.
    pub fn set_value(&mut self, value: XmpValue) -> Result<()> {
        value
            .validate()
            .map_err(|message| MetadataError::invalid_value(self.key.to_string(), message))?;
        let key = self.key.clone();
        self.binding.with_mut(|entries| {
            let nested = entries.erase_where(|d| d.key.is_descendant_of(&key));
            if nested > 0 {
                debug!(key = %key, nested, "replaced structured XMP value");
            }
            match entries.find_mut(&key) {
                Some(datum) => datum.value = Some(value),
                None => entries.push(XmpDatum::new(key.clone(), value)),
            }
        });
        Ok(())
    }

    fn array_kind(&self) -> ArrayKind {
        if let Some(XmpValue::Array { kind, .. }) = self.value() {
            return kind;
        }
        self.key
            .info()
            .and_then(|info| info.value_type.array_kind())
            .unwrap_or(ArrayKind::Bag)
    }

    pub fn is_attached(&self) -> bool {
        self.binding.is_attached()
    }

    /// Attach the tag to `image`, copying its value into the image.
    ///
    /// Nested fields and items travel with the property and replace any
    /// the image held under the same key.
    ///
    /// # Errors
    /// `MetadataNotRead` if the image metadata has not been read.
    pub fn set_parent_image(&mut self, image: &Image) -> Result<()> {
        let container = image.xmp_container()?;
        let root = self.key.clone();
        let key = self.key.clone();
        self.binding.rebind_covering(
            &root,
            container,
            |k| k == &root || k.is_descendant_of(&root),
            move || XmpDatum::empty(key),
        );
        Ok(())
    }
}
