// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape descriptors.

use kurbo::{BezPath, Circle, Ellipse, Point, Rect, Shape as _, Vec2};

use crate::aabb::Aabb;
use crate::path::PathData;

/// A shape's untransformed geometry.
///
/// This is a closed set: every drawable shape kind maps to exactly one
/// variant, and all derivations match on it.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Circle given by center and radius.
    Circle {
        /// Center point.
        center: Point,
        /// Radius; never negative.
        radius: f64,
    },
    /// Axis-aligned ellipse given by center and radii.
    Ellipse {
        /// Center point.
        center: Point,
        /// Radii along x and y; never negative.
        radii: Vec2,
    },
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// A single straight segment.
    Line(Point, Point),
    /// Open sequence of points.
    Polyline(Vec<Point>),
    /// Closed sequence of points.
    Polygon(Vec<Point>),
    /// Absolute path commands.
    Path(PathData),
}

impl Geometry {
    /// Returns `true` if the shape has no area or outline to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Polyline(points) | Self::Polygon(points) => points.is_empty(),
            Self::Path(path) => path.is_empty(),
            _ => false,
        }
    }

    /// Returns `true` if every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Circle { center, radius } => center.is_finite() && radius.is_finite(),
            Self::Ellipse { center, radii } => center.is_finite() && radii.is_finite(),
            Self::Rect(rect) => rect.is_finite(),
            Self::Line(a, b) => a.is_finite() && b.is_finite(),
            Self::Polyline(points) | Self::Polygon(points) => {
                points.iter().all(|p| p.is_finite())
            }
            // Path data is validated on construction.
            Self::Path(_) => true,
        }
    }

    /// Returns `true` for shapes without an interior, whose only visible
    /// paint is their stroke.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Line(..) | Self::Polyline(_))
    }

    /// Returns the anchor of the shape's local frame.
    ///
    /// Point- and path-based shapes anchor at the minimum corner of their
    /// geometry, rectangles at their `(x, y)` corner, and circles and
    /// ellipses at their center. Empty shapes anchor at the origin.
    #[must_use]
    pub fn origin(&self) -> Point {
        match self {
            Self::Circle { center, .. } | Self::Ellipse { center, .. } => *center,
            Self::Rect(rect) => rect.abs().origin(),
            _ => self.bounds().map_or(Point::ZERO, |r| r.origin()),
        }
    }

    /// Returns a copy with every coordinate offset by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        match self {
            Self::Circle { center, radius } => Self::Circle {
                center: *center + offset,
                radius: *radius,
            },
            Self::Ellipse { center, radii } => Self::Ellipse {
                center: *center + offset,
                radii: *radii,
            },
            Self::Rect(rect) => Self::Rect(*rect + offset),
            Self::Line(a, b) => Self::Line(*a + offset, *b + offset),
            Self::Polyline(points) => Self::Polyline(points.iter().map(|p| *p + offset).collect()),
            Self::Polygon(points) => Self::Polygon(points.iter().map(|p| *p + offset).collect()),
            Self::Path(path) => Self::Path(path.translated(offset)),
        }
    }

    /// Returns the tight axis-aligned bounds of the untransformed geometry,
    /// without any stroke.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Circle { center, radius } => {
                Some(Rect::from_center_size(*center, (radius * 2.0, radius * 2.0)))
            }
            Self::Ellipse { center, radii } => {
                Some(Rect::from_center_size(*center, (radii.x * 2.0, radii.y * 2.0)))
            }
            Self::Rect(rect) => Some(rect.abs()),
            Self::Line(a, b) => Some(Rect::from_points(*a, *b)),
            Self::Polyline(points) | Self::Polygon(points) => points_bounds(points),
            Self::Path(path) => path.bounding_box(),
        }
    }

    /// Returns the bounds expanded by `halo` on every side.
    ///
    /// The scene passes the resolved line width as the halo when a stroke is
    /// present, and zero otherwise.
    #[must_use]
    pub fn stroke_bounds(&self, halo: f64) -> Option<Aabb> {
        let bounds = self.bounds()?;
        let aabb = Aabb::from_rect(bounds);
        if halo > 0.0 && halo.is_finite() {
            Some(aabb.inflate(halo))
        } else {
            Some(aabb)
        }
    }

    /// Converts the outline into a Bézier path.
    #[must_use]
    pub fn to_bez_path(&self) -> BezPath {
        match self {
            Self::Circle { center, radius } => {
                Circle::new(*center, *radius).to_path(crate::TOLERANCE)
            }
            Self::Ellipse { center, radii } => {
                Ellipse::new(*center, *radii, 0.0).to_path(crate::TOLERANCE)
            }
            Self::Rect(rect) => rect.abs().to_path(crate::TOLERANCE),
            Self::Line(a, b) => {
                let mut path = BezPath::new();
                path.move_to(*a);
                path.line_to(*b);
                path
            }
            Self::Polyline(points) | Self::Polygon(points) => {
                let mut path = BezPath::new();
                let mut iter = points.iter();
                if let Some(first) = iter.next() {
                    path.move_to(*first);
                    for p in iter {
                        path.line_to(*p);
                    }
                    if matches!(self, Self::Polygon(_)) {
                        path.close_path();
                    }
                }
                path
            }
            Self::Path(path) => path.to_bez_path(),
        }
    }
}

fn points_bounds(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    Some(
        rest.iter()
            .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{PathSegment, normalize_path};

    fn staircase() -> Vec<Point> {
        let mut points = vec![Point::new(50.0, 50.0)];
        for i in 0..15 {
            let last = points[i];
            let next = if i % 2 == 0 {
                Point::new(last.x + 50.0, last.y)
            } else {
                Point::new(last.x, last.y + 50.0)
            };
            points.push(next);
        }
        points
    }

    #[test]
    fn polyline_origin_is_min_corner() {
        let line = Geometry::Polyline(staircase());
        assert_eq!(line.origin(), Point::new(50.0, 50.0));
        assert_eq!(line.bounds(), Some(Rect::new(50.0, 50.0, 450.0, 400.0)));
    }

    #[test]
    fn stroke_halo_grows_each_side() {
        let local = Geometry::Polyline(staircase()).translated(Vec2::new(-50.0, -50.0));
        let aabb = local.stroke_bounds(10.0).unwrap();
        assert_eq!(aabb.center, Point::new(200.0, 175.0));
        assert_eq!(aabb.half_extents, Vec2::new(210.0, 185.0));

        let wider = local.stroke_bounds(20.0).unwrap();
        assert_eq!(wider.center, aabb.center);
        assert_eq!(wider.half_extents, Vec2::new(220.0, 195.0));

        let bare = local.stroke_bounds(0.0).unwrap();
        assert_eq!(bare.half_extents, Vec2::new(200.0, 175.0));
    }

    #[test]
    fn primitive_origins() {
        let circle = Geometry::Circle {
            center: Point::new(10.0, 20.0),
            radius: 5.0,
        };
        assert_eq!(circle.origin(), Point::new(10.0, 20.0));
        assert_eq!(circle.bounds(), Some(Rect::new(5.0, 15.0, 15.0, 25.0)));

        let rect = Geometry::Rect(Rect::new(3.0, 4.0, 13.0, 24.0));
        assert_eq!(rect.origin(), Point::new(3.0, 4.0));

        let line = Geometry::Line(Point::new(10.0, 0.0), Point::new(0.0, 10.0));
        assert_eq!(line.origin(), Point::ZERO);
        assert!(line.is_open());
        assert!(!rect.is_open());
    }

    #[test]
    fn path_origin_uses_bounds() {
        let path = normalize_path(
            &[
                PathSegment::new('M', &[20.0, 30.0]),
                PathSegment::new('L', &[40.0, 10.0]),
            ],
            Vec2::ZERO,
        );
        let geometry = Geometry::Path(path);
        assert_eq!(geometry.origin(), Point::new(20.0, 10.0));
        let local = geometry.translated(-geometry.origin().to_vec2());
        assert_eq!(local.bounds(), Some(Rect::new(0.0, 0.0, 20.0, 20.0)));
    }

    #[test]
    fn empty_shapes_have_no_bounds() {
        assert!(Geometry::Polyline(Vec::new()).is_empty());
        assert_eq!(Geometry::Polyline(Vec::new()).bounds(), None);
        assert_eq!(Geometry::Path(PathData::empty()).stroke_bounds(4.0), None);
        assert_eq!(Geometry::Polygon(Vec::new()).origin(), Point::ZERO);
    }

    #[test]
    fn non_finite_points_are_detected() {
        let bad = Geometry::Polyline(vec![Point::ZERO, Point::new(f64::NAN, 1.0)]);
        assert!(!bad.is_finite());
        assert!(Geometry::Polygon(staircase()).is_finite());
    }
}
