// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape kinds and geometry construction from computed style.

use kurbo::{Point, Rect, Vec2};
use thicket_geometry::{Geometry, PathData};
use thicket_property::PropertyRegistry;
use thicket_style::{ComputedStyle, ComputedValue, Paint};

/// What a node draws.
///
/// The kind selects which computed properties describe the geometry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// A container without geometry of its own.
    #[default]
    Group,
    /// `cx`, `cy`, `r`.
    Circle,
    /// `cx`, `cy`, `rx`, `ry`.
    Ellipse,
    /// `x`, `y`, `width`, `height`.
    Rect,
    /// `x1`, `y1`, `x2`, `y2`.
    Line,
    /// `points`, open.
    Polyline,
    /// `points`, closed.
    Polygon,
    /// `path` (alias `d`).
    Path,
}

impl ShapeKind {
    /// Builds the untransformed geometry for this kind from `style`.
    ///
    /// Missing or unresolved numbers count as zero. Geometry with a
    /// non-finite coordinate degrades to the empty path. Groups have none.
    #[must_use]
    pub fn geometry(self, style: &ComputedStyle, registry: &PropertyRegistry) -> Option<Geometry> {
        let num = |name: &str| style.number(registry, name).unwrap_or(0.0);
        let points = || match style.get_by_name(registry, "points") {
            Some(ComputedValue::Points(points)) => points.clone(),
            _ => Vec::new(),
        };

        let geometry = match self {
            Self::Group => return None,
            Self::Circle => Geometry::Circle {
                center: Point::new(num("cx"), num("cy")),
                radius: num("r").max(0.0),
            },
            Self::Ellipse => Geometry::Ellipse {
                center: Point::new(num("cx"), num("cy")),
                radii: Vec2::new(num("rx").max(0.0), num("ry").max(0.0)),
            },
            Self::Rect => {
                let origin = Point::new(num("x"), num("y"));
                Geometry::Rect(Rect::from_origin_size(
                    origin,
                    (num("width").max(0.0), num("height").max(0.0)),
                ))
            }
            Self::Line => Geometry::Line(
                Point::new(num("x1"), num("y1")),
                Point::new(num("x2"), num("y2")),
            ),
            Self::Polyline => Geometry::Polyline(points()),
            Self::Polygon => Geometry::Polygon(points()),
            Self::Path => match style.get_by_name(registry, "path") {
                Some(ComputedValue::Path(path)) => Geometry::Path(path.clone()),
                _ => Geometry::Path(PathData::empty()),
            },
        };

        if geometry.is_finite() {
            Some(geometry)
        } else {
            tracing::debug!(kind = ?self, "non-finite geometry replaced with the empty path");
            Some(Geometry::Path(PathData::empty()))
        }
    }
}

/// Returns the stroke halo: the resolved line width when a stroke is
/// painted, zero otherwise.
///
/// Open shapes are always treated as stroked.
pub(crate) fn stroke_halo(
    geometry: &Geometry,
    style: &ComputedStyle,
    registry: &PropertyRegistry,
) -> f64 {
    let stroked = geometry.is_open()
        || matches!(
            style.get_by_name(registry, "stroke"),
            Some(ComputedValue::Paint(Paint::Color(_) | Paint::Reference(_)))
        );
    if !stroked {
        return 0.0;
    }
    style
        .number(registry, "lineWidth")
        .filter(|w| w.is_finite())
        .unwrap_or(0.0)
        .max(0.0)
}

#[cfg(test)]
mod tests {
    use thicket_style::{DeclaredStyle, RawValue, ResolveCx, compute_style};

    use super::*;

    fn style(registry: &PropertyRegistry, items: &[(&str, RawValue)]) -> ComputedStyle {
        let mut declared = DeclaredStyle::new();
        for (name, value) in items {
            declared.set(registry, name, value.clone());
        }
        compute_style(
            registry,
            &declared,
            None,
            &ComputedStyle::new(),
            &ResolveCx::new(),
        )
        .style
    }

    #[test]
    fn groups_have_no_geometry() {
        let registry = PropertyRegistry::with_defaults();
        let style = style(&registry, &[]);
        assert_eq!(ShapeKind::Group.geometry(&style, &registry), None);
    }

    #[test]
    fn circle_from_style() {
        let registry = PropertyRegistry::with_defaults();
        let style = style(
            &registry,
            &[("cx", 10.0.into()), ("cy", 20.0.into()), ("r", 5.0.into())],
        );
        assert_eq!(
            ShapeKind::Circle.geometry(&style, &registry),
            Some(Geometry::Circle {
                center: Point::new(10.0, 20.0),
                radius: 5.0
            })
        );
    }

    #[test]
    fn non_finite_coordinates_degrade_to_empty_path() {
        let registry = PropertyRegistry::with_defaults();
        let style = style(&registry, &[("r", f64::INFINITY.into())]);
        assert_eq!(
            ShapeKind::Circle.geometry(&style, &registry),
            Some(Geometry::Path(PathData::empty()))
        );
    }

    #[test]
    fn halo_follows_stroke() {
        let registry = PropertyRegistry::with_defaults();
        let plain = style(&registry, &[("lineWidth", 4.0.into())]);
        let stroked = style(
            &registry,
            &[("lineWidth", 4.0.into()), ("stroke", "red".into())],
        );
        let rect = ShapeKind::Rect.geometry(&plain, &registry).unwrap();
        assert_eq!(stroke_halo(&rect, &plain, &registry), 0.0);
        assert_eq!(stroke_halo(&rect, &stroked, &registry), 4.0);

        let line = ShapeKind::Line.geometry(&plain, &registry).unwrap();
        assert_eq!(stroke_halo(&line, &plain, &registry), 4.0);
    }
}
