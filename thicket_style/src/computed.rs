// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Computed-style snapshots.

use std::sync::Arc;

use smallvec::SmallVec;
use thicket_property::{PropertyId, PropertyRegistry};

use crate::value::ComputedValue;

type Entries = SmallVec<[(PropertyId, ComputedValue); 16]>;

/// An immutable snapshot of a node's computed values.
///
/// Cloning is cheap (`Arc`). A recomputation builds a new snapshot and
/// swaps it in whole; readers holding the previous one keep seeing a
/// consistent style.
#[derive(Clone, Debug, Default)]
pub struct ComputedStyle {
    /// Sorted by `PropertyId` for binary search lookup.
    entries: Arc<Entries>,
}

impl ComputedStyle {
    /// Returns the empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from entries in any order. Later duplicates win.
    pub fn from_entries(entries: impl IntoIterator<Item = (PropertyId, ComputedValue)>) -> Self {
        let mut sorted: Entries = SmallVec::new();
        for (id, value) in entries {
            match sorted.binary_search_by_key(&id, |(k, _)| *k) {
                Ok(idx) => sorted[idx].1 = value,
                Err(idx) => sorted.insert(idx, (id, value)),
            }
        }
        Self {
            entries: Arc::new(sorted),
        }
    }

    /// Returns the value for `id`.
    #[must_use]
    pub fn get(&self, id: PropertyId) -> Option<&ComputedValue> {
        self.entries
            .binary_search_by_key(&id, |(k, _)| *k)
            .ok()
            .map(|idx| &self.entries[idx].1)
    }

    /// Returns the value for a property name or alias.
    ///
    /// Fails closed: a name that is no longer registered yields `None` even
    /// if the snapshot predates its removal.
    #[must_use]
    pub fn get_by_name(&self, registry: &PropertyRegistry, name: &str) -> Option<&ComputedValue> {
        let id = registry.resolve(name)?;
        self.get(id)
    }

    /// Returns the numeric value for a name, if it is a resolved number.
    #[must_use]
    pub fn number(&self, registry: &PropertyRegistry, name: &str) -> Option<f64> {
        self.get_by_name(registry, name)
            .and_then(ComputedValue::as_number)
    }

    /// Returns `true` if `id` has a value.
    #[must_use]
    pub fn contains(&self, id: PropertyId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the snapshot holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the values in `PropertyId` order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &ComputedValue)> {
        self.entries.iter().map(|(id, v)| (*id, v))
    }

    /// Returns a new snapshot with `id` set to `value`.
    #[must_use]
    pub fn with_value(&self, id: PropertyId, value: ComputedValue) -> Self {
        let mut entries = (*self.entries).clone();
        match entries.binary_search_by_key(&id, |(k, _)| *k) {
            Ok(idx) => entries[idx].1 = value,
            Err(idx) => entries.insert(idx, (id, value)),
        }
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Returns `true` if both handles share one snapshot.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.entries, &b.entries)
    }
}

impl PartialEq for ComputedStyle {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || self.entries == other.entries
    }
}
