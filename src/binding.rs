//! Where a tag keeps its entries.
//!
//! A tag is either detached, owning a private container nobody else can
//! reach, or attached to the shared container of an image. Dropping a
//! detached tag drops its private entries; an attached tag only drops its
//! handle on the shared container.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::container::{self, Datum, SharedContainer, TagContainer};

#[derive(Debug)]
pub(crate) enum Binding<D> {
    Owned(TagContainer<D>),
    Attached(SharedContainer<D>),
}

impl<D: Datum> Binding<D> {
    pub(crate) fn detached() -> Self {
        Binding::Owned(TagContainer::new())
    }

    pub(crate) fn attached(container: SharedContainer<D>) -> Self {
        Binding::Attached(container)
    }

    pub(crate) fn is_attached(&self) -> bool {
        matches!(self, Binding::Attached(_))
    }

    /// Whether this binding refers to `container` itself, not a copy of it.
    pub(crate) fn is_attached_to(&self, container: &SharedContainer<D>) -> bool {
        match self {
            Binding::Attached(current) => Arc::ptr_eq(current, container),
            Binding::Owned(_) => false,
        }
    }

    pub(crate) fn with<R>(&self, f: impl FnOnce(&TagContainer<D>) -> R) -> R {
        match self {
            Binding::Owned(entries) => f(entries),
            Binding::Attached(shared) => f(&container::read(shared)),
        }
    }

    pub(crate) fn with_mut<R>(&mut self, f: impl FnOnce(&mut TagContainer<D>) -> R) -> R {
        match self {
            Binding::Owned(entries) => f(entries),
            Binding::Attached(shared) => f(&mut container::write(shared)),
        }
    }

    /// Copies of the entries for `key`, in container order.
    pub(crate) fn entries(&self, key: &D::Key) -> Vec<D> {
        self.with(|c| c.find_all(key).into_iter().cloned().collect())
    }

    /// Attach to `target`, carrying the entries for `key` along.
    ///
    /// Binding to the container already attached is a no-op. Otherwise the
    /// current entries replace those under `key` in `target`; when there
    /// are none, `empty()` is inserted unless `target` already has the key.
    /// The previous container is left untouched; a private one is dropped.
    pub(crate) fn rebind(
        &mut self,
        key: &D::Key,
        target: &SharedContainer<D>,
        empty: impl FnOnce() -> D,
    ) {
        self.rebind_covering(key, target, |k| k == key, empty);
    }

    /// Like [`rebind`](Self::rebind), for a tag whose value spans every
    /// entry whose key satisfies `covers`, `key` included.
    ///
    /// All covered entries move in one step: those already in `target` are
    /// replaced under a single write lock.
    pub(crate) fn rebind_covering(
        &mut self,
        key: &D::Key,
        target: &SharedContainer<D>,
        covers: impl Fn(&D::Key) -> bool,
        empty: impl FnOnce() -> D,
    ) {
        if self.is_attached_to(target) {
            trace!(key = %key, "tag already attached to this container");
            return;
        }

        // Captured before the target is locked: the two may never be held together.
        let captured: Vec<D> = self.with(|c| {
            c.iter()
                .filter(|d| covers(d.key()))
                .cloned()
                .collect()
        });
        let carried = captured.len();
        let was_attached = self.is_attached();
        {
            let mut target_entries = container::write(target);
            if captured.is_empty() {
                if !target_entries.contains(key) {
                    target_entries.push(empty());
                }
            } else {
                target_entries.replace_where(|d| covers(d.key()), captured);
            }
        }

        let previous = std::mem::replace(self, Binding::Attached(Arc::clone(target)));
        drop(previous);
        debug!(key = %key, was_attached, carried, "attached tag to image");
    }
}
