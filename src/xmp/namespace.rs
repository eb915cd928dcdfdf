//! Process-wide XMP namespace vocabulary.
//!
//! Built-in namespaces are always known. Custom namespaces live in a registry
//! that exists between [`initialize`] and [`shutdown`]; registration calls
//! must be serialized by the caller.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{MetadataError, Result};

/// Namespaces known without registration: `(prefix, uri)`.
pub static BUILTIN_NAMESPACES: &[(&str, &str)] = &[
    ("dc", "http://purl.org/dc/elements/1.1/"),
    ("xmp", "http://ns.adobe.com/xap/1.0/"),
    ("xmpRights", "http://ns.adobe.com/xap/1.0/rights/"),
    ("xmpMM", "http://ns.adobe.com/xap/1.0/mm/"),
    ("xmpBJ", "http://ns.adobe.com/xap/1.0/bj/"),
    ("xmpTPg", "http://ns.adobe.com/xap/1.0/t/pg/"),
    ("xmpG", "http://ns.adobe.com/xap/1.0/g/"),
    ("xmpGImg", "http://ns.adobe.com/xap/1.0/g/img/"),
    ("xmpDM", "http://ns.adobe.com/xmp/1.0/DynamicMedia/"),
    ("xmpidq", "http://ns.adobe.com/xmp/Identifier/qual/1.0/"),
    ("stEvt", "http://ns.adobe.com/xap/1.0/sType/ResourceEvent#"),
    ("stRef", "http://ns.adobe.com/xap/1.0/sType/ResourceRef#"),
    ("stDim", "http://ns.adobe.com/xap/1.0/sType/Dimensions#"),
    ("pdf", "http://ns.adobe.com/pdf/1.3/"),
    ("photoshop", "http://ns.adobe.com/photoshop/1.0/"),
    ("crs", "http://ns.adobe.com/camera-raw-settings/1.0/"),
    ("lr", "http://ns.adobe.com/lightroom/1.0/"),
    ("tiff", "http://ns.adobe.com/tiff/1.0/"),
    ("exif", "http://ns.adobe.com/exif/1.0/"),
    ("exifEX", "http://cipa.jp/exif/1.0/"),
    ("aux", "http://ns.adobe.com/exif/1.0/aux/"),
    ("iptc", "http://iptc.org/std/Iptc4xmpCore/1.0/xmlns/"),
    ("iptcExt", "http://iptc.org/std/Iptc4xmpExt/2008-02-29/"),
    ("plus", "http://ns.useplus.org/ldf/xmp/1.0/"),
    ("mwg-rs", "http://www.metadataworkinggroup.com/schemas/regions/"),
    ("mwg-kw", "http://www.metadataworkinggroup.com/schemas/keywords/"),
    ("digiKam", "http://www.digikam.org/ns/1.0/"),
    ("MicrosoftPhoto", "http://ns.microsoft.com/photo/1.0/"),
    ("MP", "http://ns.microsoft.com/photo/1.2/"),
];

/// Prefixes used by the packet syntax itself.
const RESERVED_PREFIXES: &[&str] = &["x", "rdf", "xml", "xmlns"];

#[derive(Debug, Clone)]
struct CustomNamespace {
    prefix: String,
    uri: String,
}

#[derive(Debug, Default)]
struct Registry {
    custom: Vec<CustomNamespace>,
}

static REGISTRY: RwLock<Option<Registry>> = RwLock::new(None);

fn registry() -> RwLockReadGuard<'static, Option<Registry>> {
    REGISTRY.read().unwrap_or_else(PoisonError::into_inner)
}

fn registry_mut() -> RwLockWriteGuard<'static, Option<Registry>> {
    REGISTRY.write().unwrap_or_else(PoisonError::into_inner)
}

/// Create the registry. Calling it again keeps existing registrations.
pub fn initialize() {
    let mut guard = registry_mut();
    if guard.is_none() {
        debug!("initializing XMP namespace registry");
        *guard = Some(Registry::default());
    }
}

/// Drop the registry and every custom namespace in it.
pub fn shutdown() {
    debug!("shutting down XMP namespace registry");
    *registry_mut() = None;
}

pub fn is_initialized() -> bool {
    registry().is_some()
}

/// Register `uri` under `prefix`.
///
/// A URI that is already known may be registered under an additional prefix.
///
/// # Errors
/// - `Internal` if the registry is not initialized
/// - `InvalidValue` if `uri` does not end with `/` or `prefix` is not a valid name
/// - `DuplicatePrefix` if `prefix` is already in use
pub fn register_namespace(uri: &str, prefix: &str) -> Result<()> {
    if !uri.ends_with('/') {
        return Err(MetadataError::invalid_value(
            uri,
            "namespace name must end with '/'",
        ));
    }
    if !is_valid_prefix(prefix) {
        return Err(MetadataError::invalid_value(prefix, "invalid namespace prefix"));
    }

    let mut guard = registry_mut();
    let registry = guard.as_mut().ok_or_else(not_initialized)?;

    let taken = RESERVED_PREFIXES.contains(&prefix)
        || builtin_uri(prefix).is_some()
        || registry.custom.iter().any(|ns| ns.prefix == prefix);
    if taken {
        return Err(MetadataError::DuplicatePrefix(prefix.to_string()));
    }

    debug!(prefix, uri, "registering XMP namespace");
    registry.custom.push(CustomNamespace {
        prefix: prefix.to_string(),
        uri: uri.to_string(),
    });
    Ok(())
}

/// Remove the most recent custom registration of `uri`.
///
/// # Errors
/// - `Internal` if the registry is not initialized
/// - `BuiltinNamespace` if `uri` is only known as a built-in namespace
/// - `NamespaceNotFound` if `uri` is not registered
pub fn unregister_namespace(uri: &str) -> Result<()> {
    let mut guard = registry_mut();
    let registry = guard.as_mut().ok_or_else(not_initialized)?;

    if let Some(index) = registry.custom.iter().rposition(|ns| ns.uri == uri) {
        let removed = registry.custom.remove(index);
        debug!(prefix = %removed.prefix, uri, "unregistered XMP namespace");
        return Ok(());
    }
    if builtin_prefix(uri).is_some() {
        return Err(MetadataError::BuiltinNamespace(uri.to_string()));
    }
    Err(MetadataError::NamespaceNotFound(uri.to_string()))
}

/// Remove every custom namespace.
///
/// # Errors
/// `Internal` if the registry is not initialized.
pub fn unregister_all_namespaces() -> Result<()> {
    let mut guard = registry_mut();
    let registry = guard.as_mut().ok_or_else(not_initialized)?;
    registry.custom.clear();
    Ok(())
}

/// URI registered for `prefix`.
pub fn namespace_uri(prefix: &str) -> Option<String> {
    if let Some(uri) = builtin_uri(prefix) {
        return Some(uri.to_string());
    }
    registry()
        .as_ref()?
        .custom
        .iter()
        .find(|ns| ns.prefix == prefix)
        .map(|ns| ns.uri.clone())
}

/// Prefix for `uri`: the built-in one, else the most recent registration.
pub fn namespace_prefix(uri: &str) -> Option<String> {
    if let Some(prefix) = builtin_prefix(uri) {
        return Some(prefix.to_string());
    }
    registry()
        .as_ref()?
        .custom
        .iter()
        .rev()
        .find(|ns| ns.uri == uri)
        .map(|ns| ns.prefix.clone())
}

/// Register a namespace met while reading a packet, deriving a free prefix
/// from `suggested`. Returns the prefix used, or `None` when the registry is
/// not initialized.
pub(crate) fn register_discovered(uri: &str, suggested: &str) -> Option<String> {
    let mut guard = registry_mut();
    let registry = guard.as_mut()?;

    if let Some(existing) = registry.custom.iter().rev().find(|ns| ns.uri == uri) {
        return Some(existing.prefix.clone());
    }

    let base = if is_valid_prefix(suggested) { suggested } else { "ns" };
    let is_free = |candidate: &str| {
        !RESERVED_PREFIXES.contains(&candidate)
            && builtin_uri(candidate).is_none()
            && !registry.custom.iter().any(|ns| ns.prefix == candidate)
    };
    let prefix = std::iter::once(base.to_string())
        .chain((1..).map(|n| format!("{base}{n}")))
        .find(|candidate| is_free(candidate))?;

    debug!(prefix = %prefix, uri, "registering namespace found in packet");
    registry.custom.push(CustomNamespace {
        prefix: prefix.clone(),
        uri: uri.to_string(),
    });
    Some(prefix)
}

fn builtin_uri(prefix: &str) -> Option<&'static str> {
    BUILTIN_NAMESPACES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, uri)| *uri)
}

fn builtin_prefix(uri: &str) -> Option<&'static str> {
    BUILTIN_NAMESPACES
        .iter()
        .find(|(_, u)| *u == uri)
        .map(|(prefix, _)| *prefix)
}

/// XML name without a colon.
pub(crate) fn is_valid_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn not_initialized() -> MetadataError {
    MetadataError::Internal("XMP namespace registry is not initialized".to_string())
}
