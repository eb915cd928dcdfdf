use crate::binding::Binding;
use crate::container::{self, SharedContainer};
use crate::error::{MetadataError, Result};
use crate::image::Image;

use super::datum::IptcDatum;
use super::key::IptcKey;
use super::value::IptcValue;

/// The values of one IPTC dataset, detached or attached to an image.
///
/// Repeatable datasets hold a list; every other dataset holds at most one
/// value.
#[derive(Debug)]
pub struct IptcTag {
    key: IptcKey,
    binding: Binding<IptcDatum>,
}

impl IptcTag {
    /// Create a detached tag without values.
    ///
    /// # Errors
    /// `InvalidKey` if `key` is not an IPTC key.
    pub fn new(key: &str) -> Result<Self> {
        Ok(Self {
            key: IptcKey::parse(key)?,
            binding: Binding::detached(),
        })
    }

    /// Create a detached tag holding `values`.
    pub fn with_values(key: &str, values: Vec<IptcValue>) -> Result<Self> {
        let mut tag = Self::new(key)?;
        tag.set_values(values)?;
        Ok(tag)
    }

    /// # Errors
    /// `NotRepeatable` if the container holds several values for a dataset
    /// that allows one.
    pub(crate) fn attached(key: IptcKey, container: SharedContainer<IptcDatum>) -> Result<Self> {
        let count = container::read(&container).count(&key);
        if count > 1 && !key.is_repeatable() {
            return Err(MetadataError::NotRepeatable(key.to_string()));
        }
        Ok(Self {
            key,
            binding: Binding::attached(container),
        })
    }

    pub fn key(&self) -> IptcKey {
        self.key
    }

    pub fn record(&self) -> u16 {
        self.key.record()
    }

    pub fn dataset(&self) -> u16 {
        self.key.dataset()
    }

    pub fn name(&self) -> String {
        self.key.dataset_name()
    }

    pub fn title(&self) -> &'static str {
        self.key.info().map_or("", |info| info.title)
    }

    pub fn description(&self) -> &'static str {
        self.key.info().map_or("", |info| info.description)
    }

    /// Label of the dataset in Photoshop; empty if it has none.
    pub fn photoshop_name(&self) -> &'static str {
        self.key.info().map_or("", |info| info.photoshop)
    }

    pub fn record_name(&self) -> String {
        self.key.record_name()
    }

    pub fn record_description(&self) -> &'static str {
        self.key.record_info().map_or("", |info| info.description)
    }

    pub fn is_repeatable(&self) -> bool {
        self.key.is_repeatable()
    }

    /// Declared value type.
    pub fn type_name(&self) -> &'static str {
        self.key.value_type().name()
    }

    pub fn values(&self) -> Vec<IptcValue> {
        self.binding
            .entries(&self.key)
            .into_iter()
            .filter_map(|datum| datum.value)
            .collect()
    }

    pub fn raw_values(&self) -> Vec<String> {
        self.values().iter().map(ToString::to_string).collect()
    }

    /// Parse every string as the declared type, then replace the values.
    ///
    /// # Errors
    /// - `NotRepeatable` for several values on a single-valued dataset
    /// - `InvalidValue` if any value does not parse or fit the dataset
    ///
    /// On error no value is changed.
    pub fn set_raw_values<S: AsRef<str>>(&mut self, raw: &[S]) -> Result<()> {
        self.check_count(raw.len())?;
        let value_type = self.key.value_type();
        let values = raw
            .iter()
            .map(|raw| {
                IptcValue::parse(value_type, raw.as_ref())
                    .map_err(|message| MetadataError::invalid_value(self.key.to_string(), message))
            })
            .collect::<Result<Vec<_>>>()?;
        self.set_values(values)
    }

    /// Replace the values.
    ///
    /// Existing entries are overwritten in order, extra values appended and
    /// surplus entries removed. An empty list removes the dataset.
    ///
    /// # Errors
    /// - `NotRepeatable` for several values on a single-valued dataset
    /// - `InvalidValue` if a value has the wrong type or length
    ///
    /// On error no value is changed.
    pub fn set_values(&mut self, values: Vec<IptcValue>) -> Result<()> {
        self.check_count(values.len())?;
        let staged = values
            .into_iter()
            .map(|value| -> Result<IptcDatum> {
                self.validate(&value)?;
                Ok(IptcDatum::new(self.key, value))
            })
            .collect::<Result<Vec<_>>>()?;

        let key = self.key;
        self.binding
            .with_mut(|entries| entries.replace_key_entries(&key, staged));
        Ok(())
    }

    fn check_count(&self, count: usize) -> Result<()> {
        if count > 1 && !self.is_repeatable() {
            return Err(MetadataError::NotRepeatable(self.key.to_string()));
        }
        Ok(())
    }

    fn validate(&self, value: &IptcValue) -> Result<()> {
        let Some(info) = self.key.info() else {
            return Ok(());
        };
        if value.value_type() != info.value_type {
            return Err(MetadataError::invalid_value(
                self.key.to_string(),
                format!(
                    "expected a {} value, got {}",
                    info.value_type.name(),
                    value.value_type().name()
                ),
            ));
        }
        let length = value.encode().len();
        if length < info.min_len || length > info.max_len {
            return Err(MetadataError::invalid_value(
                self.key.to_string(),
                format!(
                    "{length} bytes, allowed {}..={}",
                    info.min_len, info.max_len
                ),
            ));
        }
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        self.binding.is_attached()
    }

    /// Attach the tag to `image`, copying its values into the image.
    ///
    /// # Errors
    /// `MetadataNotRead` if the image metadata has not been read.
    pub fn set_parent_image(&mut self, image: &Image) -> Result<()> {
        let container = image.iptc_container()?;
        let key = self.key;
        self.binding.rebind(&key, container, || IptcDatum::empty(key));
        Ok(())
    }
}
