use crate::binding::Binding;
use crate::container::SharedContainer;
use crate::error::{MetadataError, Result};
use crate::format::tiff::ByteOrder;
use crate::image::Image;

use super::datum::ExifDatum;
use super::key::{ExifGroup, ExifKey};
use super::print::human_value;
use super::tags::{Printer, Section};
use super::value::ExifValue;

/// An Exif entry, detached or attached to an image.
///
/// Detached tags keep their value to themselves until
/// [`set_parent_image`](Self::set_parent_image) copies it into an image.
#[derive(Debug)]
pub struct ExifTag {
    key: ExifKey,
    binding: Binding<ExifDatum>,
    /// Byte order of the image the tag is attached to
    byte_order: Option<ByteOrder>,
}

impl ExifTag {
    /// Create a detached tag without a value.
    ///
    /// # Errors
    /// `InvalidKey` if `key` is not an Exif key.
    pub fn new(key: &str) -> Result<Self> {
        Ok(Self {
            key: ExifKey::parse(key)?,
            binding: Binding::detached(),
            byte_order: None,
        })
    }

    /// Create a detached tag holding `value`.
    pub fn with_value(key: &str, value: ExifValue) -> Result<Self> {
        let mut tag = Self::new(key)?;
        tag.set_value(value);
        Ok(tag)
    }

    pub(crate) fn attached(
        key: ExifKey,
        container: SharedContainer<ExifDatum>,
        byte_order: ByteOrder,
    ) -> Self {
        Self {
            key,
            binding: Binding::attached(container),
            byte_order: Some(byte_order),
        }
    }

    pub fn key(&self) -> ExifKey {
        self.key
    }

    pub fn group(&self) -> ExifGroup {
        self.key.group()
    }

    pub fn tag(&self) -> u16 {
        self.key.tag()
    }

    pub fn name(&self) -> String {
        self.key.tag_name()
    }

    pub fn label(&self) -> &'static str {
        self.key.info().map_or("", |info| info.label)
    }

    pub fn description(&self) -> &'static str {
        self.key.info().map_or("", |info| info.description)
    }

    pub fn section_name(&self) -> &'static str {
        self.section().name()
    }

    pub fn section_description(&self) -> &'static str {
        self.section().description()
    }

    fn section(&self) -> Section {
        self.key.info().map_or(Section::Unknown, |info| info.section)
    }

    /// Type of the stored value, or the declared type when unset.
    pub fn type_name(&self) -> &'static str {
        match self.value() {
            Some(value) => value.type_name(),
            None => self.key.value_type().name(),
        }
    }

    pub fn value(&self) -> Option<ExifValue> {
        let key = self.key;
        self.binding
            .with(|entries| entries.find(&key).and_then(|d| d.value.clone()))
    }

    /// String form of the value; empty when unset.
    pub fn raw_value(&self) -> String {
        self.value().map(|v| v.to_string()).unwrap_or_default()
    }

    /// Interpreted form of the value, such as `1/60 s` for an exposure time.
    pub fn human_value(&self) -> String {
        let printer = self.key.info().map_or(Printer::Value, |info| info.printer);
        self.value()
            .map(|value| human_value(printer, &value))
            .unwrap_or_default()
    }

    /// Parse `raw` as the stored type, or the declared one when unset.
    ///
    /// # Errors
    /// `InvalidValue` if `raw` does not parse; the value is left unchanged.
    pub fn set_raw_value(&mut self, raw: &str) -> Result<()> {
        let value_type = match self.value() {
            Some(current) => current.exif_type(),
            None => self.key.value_type(),
        };
        let value = ExifValue::parse(value_type, raw)
            .map_err(|message| MetadataError::invalid_value(self.key.to_string(), message))?;
        self.set_value(value);
        Ok(())
    }

    pub fn set_value(&mut self, value: ExifValue) {
        let key = self.key;
        self.binding.with_mut(|entries| match entries.find_mut(&key) {
            Some(datum) => datum.value = Some(value),
            None => entries.push(ExifDatum::new(key, value)),
        });
    }

    /// Byte order of the attached image; `None` while detached.
    pub fn byte_order(&self) -> Option<ByteOrder> {
        self.byte_order
    }

    pub fn is_attached(&self) -> bool {
        self.binding.is_attached()
    }

    /// Attach the tag to `image`, copying its value into the image.
    ///
    /// # Errors
    /// `MetadataNotRead` if the image metadata has not been read.
    pub fn set_parent_image(&mut self, image: &Image) -> Result<()> {
        let container = image.exif_container()?;
        let byte_order = image.byte_order()?;
        let key = self.key;
        self.binding.rebind(&key, container, || ExifDatum::empty(key));
        self.byte_order = Some(byte_order);
        Ok(())
    }
}
