//! Configuration for opening and writing images.
//!
//! Configuration can come from:
//! - [`Config::default()`] with the defaults below
//! - Environment variables with the `IMGMETA_` prefix ([`Config::from_env`])
//! - A JSON document ([`Config::from_json_str`])
//!
//! # Environment Variables
//!
//! - `IMGMETA_MAX_BUFFER_SIZE` - Largest buffer accepted or produced, in bytes (default: 2 GiB)
//! - `IMGMETA_XMP_PADDING` - Padding bytes written inside XMP packets (default: 2048)
//! - `IMGMETA_WRITE_UTF8_CHARSET` - Mark non-ASCII IPTC data as UTF-8 on write (default: true)
//! - `IMGMETA_AUTO_REGISTER_NAMESPACES` - Register unknown XMP namespaces on read (default: true)

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// =============================================================================
// Default Values
// =============================================================================

/// Default ceiling for in-memory buffers (2 GiB).
pub const DEFAULT_MAX_BUFFER_SIZE: u64 = 2 * 1024 * 1024 * 1024;

/// Default XMP packet padding in bytes.
pub const DEFAULT_XMP_PADDING: usize = 2048;

const ENV_MAX_BUFFER_SIZE: &str = "IMGMETA_MAX_BUFFER_SIZE";
const ENV_XMP_PADDING: &str = "IMGMETA_XMP_PADDING";
const ENV_WRITE_UTF8_CHARSET: &str = "IMGMETA_WRITE_UTF8_CHARSET";
const ENV_AUTO_REGISTER_NAMESPACES: &str = "IMGMETA_AUTO_REGISTER_NAMESPACES";

/// Settings applied to an [`Image`](crate::Image) for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Largest buffer accepted by `from_buffer` or produced by `raw_bytes`.
    ///
    /// Exceeding it fails with `OutOfMemory`.
    pub max_buffer_size: u64,

    /// Whitespace padding written inside the XMP packet so it can be
    /// edited in place by other tools.
    pub xmp_padding: usize,

    /// Write the `Iptc.Envelope.CharacterSet` UTF-8 marker when IPTC values
    /// contain non-ASCII text and no marker is present.
    pub write_utf8_charset: bool,

    /// Register unknown XMP namespaces found while reading a packet.
    ///
    /// Only effective while the namespace registry is initialized; when off,
    /// properties in unknown namespaces are dropped.
    pub auto_register_namespaces: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
            xmp_padding: DEFAULT_XMP_PADDING,
            write_utf8_charset: true,
            auto_register_namespaces: true,
        }
    }
}

impl Config {
    /// Build a configuration from `IMGMETA_*` environment variables.
    ///
    /// Unset variables keep their default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Parse a configuration from JSON. Missing fields keep their default.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(value) = lookup(ENV_MAX_BUFFER_SIZE) {
            config.max_buffer_size = parse_env(ENV_MAX_BUFFER_SIZE, &value)?;
        }
        if let Some(value) = lookup(ENV_XMP_PADDING) {
            config.xmp_padding = parse_env(ENV_XMP_PADDING, &value)?;
        }
        if let Some(value) = lookup(ENV_WRITE_UTF8_CHARSET) {
            config.write_utf8_charset = parse_bool(ENV_WRITE_UTF8_CHARSET, &value)?;
        }
        if let Some(value) = lookup(ENV_AUTO_REGISTER_NAMESPACES) {
            config.auto_register_namespaces = parse_bool(ENV_AUTO_REGISTER_NAMESPACES, &value)?;
        }

        Ok(config)
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
    })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var,
            value: value.to_string(),
        }),
    }
}
