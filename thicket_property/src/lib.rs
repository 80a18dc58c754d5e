// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Property: the style property metadata registry.
//!
//! Every style property a node can carry is described by a
//! [`PropertyMetadata`] entry: its value syntax, default, keyword set, aliases
//! and behavioral flags (inherited, interpolable, independent,
//! layout-dependent, parse priority, and which derived data it affects).
//!
//! ## Core Concepts
//!
//! - [`PropertyRegistry`] is an append-mostly table keyed by canonical name.
//!   Alias names resolve to the canonical entry. Lookups of unknown names
//!   report [`RegistryError::UnknownProperty`].
//! - [`PropertyId`] is a compact handle to a registered entry. Ids are never
//!   reused after [`PropertyRegistry::unregister`], so a stale id can never
//!   alias a different property.
//! - Every mutation bumps [`PropertyRegistry::revision`], which lets derived
//!   caches notice that metadata changed underneath them.
//! - [`SharedRegistry`] is the read-mostly handle several scene graphs can
//!   share; recalculation holds a read lock, registration a write lock.
//!
//! ## Quick Start
//!
//! ```rust
//! use thicket_property::{Affects, PropertyMetadataBuilder, PropertyRegistry, PropertySyntax};
//!
//! let mut registry = PropertyRegistry::new();
//! let id = registry
//!     .register(
//!         PropertyMetadataBuilder::new("lineWidth")
//!             .syntax(PropertySyntax::LengthPercentage)
//!             .default_value("1")
//!             .inherits(true)
//!             .alias("strokeWidth")
//!             .affects(Affects::GEOMETRY)
//!             .build(),
//!     )
//!     .unwrap();
//!
//! assert_eq!(registry.resolve("strokeWidth"), Some(id));
//! assert!(registry.get_metadata("lineWidth").unwrap().inherits());
//! ```
//!
//! [`PropertyRegistry::with_defaults`] provides the built-in table for
//! SVG-like shapes.

mod builtin;
mod error;
mod id;
mod metadata;
mod registry;
mod syntax;

pub use error::RegistryError;
pub use id::PropertyId;
pub use metadata::{Affects, LengthBasis, PropertyMetadata, PropertyMetadataBuilder};
pub use registry::{PropertyRegistry, SharedRegistry};
pub use syntax::PropertySyntax;
