// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node identity.

use core::fmt;

/// Identifier for a node in a [`Scene`](crate::Scene).
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// - On creation, a fresh slot starts at generation `0`.
/// - On destruction, the slot's generation is bumped, so every existing
///   `NodeId` for it becomes stale.
/// - A reused slot hands out the bumped generation, producing a new, distinct
///   `NodeId`.
///
/// Stale ids never alias a different live node. Use
/// [`Scene::is_alive`](crate::Scene::is_alive) to check liveness.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self { idx, generation }
    }

    pub(crate) const fn slot(self) -> usize {
        self.idx as usize
    }

    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@gen{})", self.idx, self.generation)
    }
}
