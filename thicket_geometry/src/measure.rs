// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc length, point-at-ratio and tangents.
//!
//! A [`Measure`] is built once from a [`Geometry`] and caches the cumulative
//! length at the end of every segment, so repeated `point_at` queries cost a
//! binary search plus one segment evaluation.

use kurbo::{ParamCurve, ParamCurveArclen, PathSeg, Point};

use crate::shape::Geometry;

/// A directed pair of points describing a tangent.
///
/// For the start of a shape this is `[second, first]`; for the end it is
/// `[second_to_last, last]`. Magnitude and orientation are preserved so that
/// callers can place arrowheads or markers.
pub type Tangent = [Point; 2];

/// Cached length measurements over a shape's outline.
#[derive(Clone, Debug, Default)]
pub struct Measure {
    segments: Vec<PathSeg>,
    /// Cumulative length at the end of each segment.
    cumulative: Vec<f64>,
    first: Option<Point>,
}

impl Measure {
    /// Measures `geometry`.
    ///
    /// Straight segments (lines, polylines, polygons) are measured exactly;
    /// curves use [`crate::ACCURACY`].
    #[must_use]
    pub fn new(geometry: &Geometry) -> Self {
        let segments: Vec<PathSeg> = match geometry {
            Geometry::Line(a, b) => vec![PathSeg::Line(kurbo::Line::new(*a, *b))],
            Geometry::Polyline(points) => lines(points, false),
            Geometry::Polygon(points) => lines(points, true),
            other => other.to_bez_path().segments().collect(),
        };
        let first = match geometry {
            Geometry::Polyline(points) | Geometry::Polygon(points) => points.first().copied(),
            _ => segments.first().map(|s| s.start()),
        };

        let mut total = 0.0;
        let cumulative = segments
            .iter()
            .map(|seg| {
                total += seg.arclen(crate::ACCURACY);
                total
            })
            .collect();

        Self {
            segments,
            cumulative,
            first,
        }
    }

    /// Returns the total outline length.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Returns the point at `ratio` of the total length.
    ///
    /// `ratio <= 0` and zero-length shapes yield the first point; `ratio >= 1`
    /// yields the last point. Out-of-range ratios are clamped, never
    /// extrapolated. Returns `None` only for shapes with no points at all.
    #[must_use]
    pub fn point_at(&self, ratio: f64) -> Option<Point> {
        let first = self.first?;
        let total = self.total_length();
        if ratio.is_nan() || ratio <= 0.0 || total <= 0.0 {
            return Some(first);
        }
        let Some(last_seg) = self.segments.last() else {
            return Some(first);
        };
        if ratio >= 1.0 {
            return Some(last_seg.end());
        }

        let target = ratio * total;
        let idx = self
            .cumulative
            .partition_point(|&len| len < target)
            .min(self.segments.len() - 1);
        let seg = self.segments[idx];
        let start_len = if idx == 0 { 0.0 } else { self.cumulative[idx - 1] };
        let seg_len = self.cumulative[idx] - start_len;
        if seg_len <= 0.0 {
            return Some(seg.start());
        }
        let local = target - start_len;
        let t = match seg {
            PathSeg::Line(_) => local / seg_len,
            _ => seg.inv_arclen(local, crate::ACCURACY),
        };
        Some(seg.eval(t.clamp(0.0, 1.0)))
    }

    /// Returns the start tangent as `[second, first]`.
    ///
    /// Returns `None` if the shape has fewer than two points.
    #[must_use]
    pub fn start_tangent(&self) -> Option<Tangent> {
        let seg = self.segments.first()?;
        let (p0, rest) = controls(seg);
        let next = rest.into_iter().find(|p| *p != p0).unwrap_or(rest[0]);
        Some([next, p0])
    }

    /// Returns the end tangent as `[second_to_last, last]`.
    ///
    /// Returns `None` if the shape has fewer than two points.
    #[must_use]
    pub fn end_tangent(&self) -> Option<Tangent> {
        let seg = self.segments.last()?;
        let (p0, rest) = controls(seg);
        let end = seg.end();
        let prev = core::iter::once(p0)
            .chain(rest)
            .rev()
            .skip(1)
            .find(|p| *p != end)
            .unwrap_or(p0);
        Some([prev, end])
    }
}

fn lines(points: &[Point], closed: bool) -> Vec<PathSeg> {
    let mut segs: Vec<PathSeg> = points
        .windows(2)
        .map(|w| PathSeg::Line(kurbo::Line::new(w[0], w[1])))
        .collect();
    if closed
        && let (Some(first), Some(last)) = (points.first(), points.last())
        && points.len() > 2
        && first != last
    {
        segs.push(PathSeg::Line(kurbo::Line::new(*last, *first)));
    }
    segs
}

/// Splits a segment into its start point and the remaining control points,
/// padded with the end point so the tail always has three entries.
fn controls(seg: &PathSeg) -> (Point, [Point; 3]) {
    match *seg {
        PathSeg::Line(l) => (l.p0, [l.p1, l.p1, l.p1]),
        PathSeg::Quad(q) => (q.p0, [q.p1, q.p2, q.p2]),
        PathSeg::Cubic(c) => (c.p0, [c.p1, c.p2, c.p3]),
    }
}
