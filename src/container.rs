//! Ordered per-namespace metadata store.
//!
//! A [`TagContainer`] keeps datums in insertion order and looks them up by
//! key. Keys are not unique: repeatable IPTC datasets hold several entries
//! under one key. The container performs no validation; tags validate
//! values before committing them here.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// One raw metadata entry.
pub trait Datum: Clone {
    type Key: Clone + Eq + Hash + Display;

    fn key(&self) -> &Self::Key;
}

/// Insertion-ordered sequence of datums for one namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct TagContainer<D> {
    entries: Vec<D>,
}

/// A container owned by an image and shared with the tags attached to it.
pub type SharedContainer<D> = Arc<RwLock<TagContainer<D>>>;

impl<D> Default for TagContainer<D> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<D: Datum> TagContainer<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(entries: Vec<D>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, D> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[D] {
        &self.entries
    }

    pub fn push(&mut self, datum: D) {
        self.entries.push(datum);
    }

    /// First entry for `key`.
    pub fn find(&self, key: &D::Key) -> Option<&D> {
        self.entries.iter().find(|d| d.key() == key)
    }

    pub fn find_mut(&mut self, key: &D::Key) -> Option<&mut D> {
        self.entries.iter_mut().find(|d| d.key() == key)
    }

    /// Every entry for `key`, in order.
    pub fn find_all(&self, key: &D::Key) -> Vec<&D> {
        self.entries.iter().filter(|d| d.key() == key).collect()
    }

    pub fn count(&self, key: &D::Key) -> usize {
        self.entries.iter().filter(|d| d.key() == key).count()
    }

    pub fn contains(&self, key: &D::Key) -> bool {
        self.find(key).is_some()
    }

    /// Remove the first entry for `key`, returning it.
    pub fn erase_first(&mut self, key: &D::Key) -> Option<D> {
        let index = self.entries.iter().position(|d| d.key() == key)?;
        Some(self.entries.remove(index))
    }

    /// Remove every entry matching `predicate`. Returns how many were removed.
    pub fn erase_where(&mut self, mut predicate: impl FnMut(&D) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|d| !predicate(d));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Key of every entry, duplicates included.
    pub fn keys(&self) -> Vec<D::Key> {
        self.entries.iter().map(|d| d.key().clone()).collect()
    }

    /// Distinct keys in first-occurrence order.
    pub fn unique_keys(&self) -> Vec<D::Key> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|d| seen.insert(d.key().clone()))
            .map(|d| d.key().clone())
            .collect()
    }

    pub fn replace_all(&mut self, entries: Vec<D>) {
        self.entries = entries;
    }

    /// Replace the entries for `key` with `values`.
    ///
    /// Existing entries are overwritten in place and keep their position;
    /// extra values are appended and surplus entries are removed.
    pub fn replace_key_entries(&mut self, key: &D::Key, values: Vec<D>) {
        self.replace_where(|d| d.key() == key, values);
    }

    /// Replace every entry matching `predicate` with `values`, slot by slot.
    ///
    /// Same placement rules as [`replace_key_entries`](Self::replace_key_entries).
    pub fn replace_where(&mut self, predicate: impl Fn(&D) -> bool, values: Vec<D>) {
        let mut incoming = values.into_iter();
        let mut index = 0;
        while index < self.entries.len() {
            if !predicate(&self.entries[index]) {
                index += 1;
                continue;
            }
            match incoming.next() {
                Some(value) => {
                    self.entries[index] = value;
                    index += 1;
                }
                None => {
                    self.entries.remove(index);
                }
            }
        }
        self.entries.extend(incoming);
    }
}

impl<'a, D> IntoIterator for &'a TagContainer<D> {
    type Item = &'a D;
    type IntoIter = std::slice::Iter<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// =============================================================================
// Lock helpers
// =============================================================================

/// Wrap a container for sharing.
pub fn shared<D>(container: TagContainer<D>) -> SharedContainer<D> {
    Arc::new(RwLock::new(container))
}

/// Read access. A poisoned lock still holds a consistent container, since
/// every mutation is a single commit.
pub(crate) fn read<D>(container: &SharedContainer<D>) -> RwLockReadGuard<'_, TagContainer<D>> {
    container
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

pub(crate) fn write<D>(container: &SharedContainer<D>) -> RwLockWriteGuard<'_, TagContainer<D>> {
    container
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
