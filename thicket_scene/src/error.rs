// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thicket_property::RegistryError;
use thiserror::Error;

use crate::id::NodeId;

/// Errors reported by [`Scene`](crate::Scene) mutations.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum SceneError {
    /// The id refers to a destroyed node.
    #[error("{0:?} is not alive")]
    StaleNode(NodeId),
    /// The edit would make a node its own ancestor.
    #[error("{child:?} is an ancestor of {parent:?}")]
    Cycle {
        /// The would-be parent.
        parent: NodeId,
        /// The would-be child.
        child: NodeId,
    },
    /// The node is not a child of the given parent.
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The expected parent.
        parent: NodeId,
        /// The node that was named as its child.
        child: NodeId,
    },
    /// An insertion index past the end of the child list.
    #[error("child index {index} out of range for {len} children")]
    ChildIndex {
        /// The requested position.
        index: usize,
        /// The number of children.
        len: usize,
    },
    /// A metadata operation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
