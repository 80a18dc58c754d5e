// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

bitflags::bitflags! {
    /// Per-node staleness of derived data.
    ///
    /// Each bit is a two-state cache: set means the derived value must be
    /// recomputed on the next read. A geometry change implies a bounds
    /// change, but bounds can also go stale from a transform change alone.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u8 {
        /// The computed style must be recalculated.
        const STYLE           = 0b0000_0001;
        /// Geometry, length measurements and local bounds are stale.
        const GEOMETRY        = 0b0000_0010;
        /// The local and world transforms are stale.
        const WORLD_TRANSFORM = 0b0000_0100;
        /// World geometry bounds and aggregate subtree bounds are stale.
        const BOUNDS          = 0b0000_1000;
    }
}

impl Default for DirtyFlags {
    fn default() -> Self {
        Self::all()
    }
}
