// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry slot handles.

use core::fmt;

/// Slot of a property in a [`PropertyRegistry`](crate::PropertyRegistry).
///
/// Slots are handed out in registration order. Replacing a registered name's
/// metadata keeps its slot, and unregistering leaves a hole that is never
/// refilled, so a handle held across registry edits either still names the
/// same property or names nothing.
///
/// Computed styles keep their entries sorted by slot.
///
/// ```rust
/// use thicket_property::PropertyId;
///
/// let width = PropertyId::new(3);
/// assert_eq!(width.index(), 3);
/// assert_eq!(width.to_string(), "#3");
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyId(u16);

impl PropertyId {
    /// Wraps a raw slot number.
    ///
    /// Handles are normally obtained from
    /// [`PropertyRegistry::register`](crate::PropertyRegistry::register) or a
    /// name lookup.
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Slot number.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyId#{}", self.0)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
