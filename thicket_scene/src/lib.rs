// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Scene: a retained 2D shape tree with lazy derived data.
//!
//! A [`Scene`] owns nodes addressed by generational [`NodeId`]s. Each node
//! draws one [`ShapeKind`] and carries declared style attributes. Everything
//! else is derived on demand and cached behind per-node [`DirtyFlags`]:
//!
//! - the computed style, resolved against the parent's snapshot and the
//!   shared [`PropertyRegistry`](thicket_property::PropertyRegistry);
//! - the origin-adjusted geometry with its length measurements and
//!   stroke-inclusive local bounds;
//! - local and world transforms;
//! - world-space geometry bounds and aggregate subtree bounds.
//!
//! Mutations only mark what went stale. Reads recompute the minimum along the
//! path from the root to the queried node, so a burst of edits followed by
//! one read costs one recalculation.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use thicket_scene::{Scene, ShapeKind};
//!
//! let mut scene = Scene::new();
//! let line = scene.create_node(ShapeKind::Polyline);
//! scene.set_attribute(line, "points", "10,10 110,10 110,60").unwrap();
//! scene.set_attribute(line, "strokeWidth", 2.0).unwrap();
//!
//! // Shapes are positioned at the top-left of their geometry.
//! assert_eq!(scene.local_position(line), Some(Point::new(10.0, 10.0)));
//! assert_eq!(scene.total_length(line), Some(150.0));
//!
//! scene.translate(line, Vec2::new(5.0, 0.0)).unwrap();
//! assert_eq!(scene.point_at(line, 1.0), Some(Point::new(115.0, 60.0)));
//!
//! // Recalculating twice without edits does no work the second time.
//! scene.recalc(line).unwrap();
//! assert!(scene.recalc(line).unwrap().is_cache_hit());
//! ```

mod error;
mod flags;
mod id;
mod scene;
mod shape;

pub use error::SceneError;
pub use flags::DirtyFlags;
pub use id::NodeId;
pub use scene::{RecalcReport, Scene};
pub use shape::ShapeKind;
