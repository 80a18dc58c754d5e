// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Geometry: per-shape geometric derivations for a retained 2D scene.
//!
//! This crate holds the pure functions a scene graph needs to answer geometric
//! questions about its shapes without knowing anything about styles or trees:
//!
//! - [`Aabb`]: center + half-extents bounding boxes, with transform and union.
//! - [`PathCommand`] / [`PathData`]: absolute, fixed-arity path commands.
//! - [`normalize_path`]: converts relative and shorthand SVG path segments into
//!   absolute commands, offset by an origin. Any non-finite coordinate rejects
//!   the whole sequence and yields the canonical empty path.
//! - [`Geometry`]: a closed set of shape descriptors (circle, ellipse, rect,
//!   line, polyline, polygon, path) with origin extraction and stroke-aware
//!   bounds.
//! - [`Measure`]: cached cumulative segment lengths supporting total length,
//!   point-at-ratio, and start/end tangents.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use thicket_geometry::{Geometry, Measure};
//!
//! let line = Geometry::Polyline(vec![
//!     Point::new(50.0, 50.0),
//!     Point::new(100.0, 50.0),
//!     Point::new(100.0, 100.0),
//! ]);
//!
//! let measure = Measure::new(&line);
//! assert_eq!(measure.total_length(), 100.0);
//! assert_eq!(measure.point_at(0.5), Some(Point::new(100.0, 50.0)));
//! ```
//!
//! Curve arclength uses [`ACCURACY`]; straight segments are exact.

mod aabb;
mod error;
mod measure;
mod path;
mod shape;

pub use aabb::Aabb;
pub use error::GeometryError;
pub use measure::{Measure, Tangent};
pub use path::{PathCommand, PathData, PathSegment, normalize_path, try_normalize_path};
pub use shape::Geometry;

/// Accuracy used for curve arclength and inverse arclength evaluation.
pub const ACCURACY: f64 = 1e-3;

/// Tolerance used when flattening primitive shapes into Bézier paths.
pub const TOLERANCE: f64 = 0.1;
