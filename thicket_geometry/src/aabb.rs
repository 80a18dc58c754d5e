// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes in center/half-extents form.

use kurbo::{Affine, Point, Rect, Vec2};

/// An axis-aligned bounding box stored as a center and half-extents.
///
/// Half-extents are never negative. Conversion from a [`Rect`] normalizes
/// the rectangle first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Center of the box.
    pub center: Point,
    /// Half of the box size along each axis.
    pub half_extents: Vec2,
}

impl Aabb {
    /// Creates a box from its center and half-extents.
    #[must_use]
    pub const fn new(center: Point, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Creates a box covering `rect`.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self {
            center: rect.center(),
            half_extents: Vec2::new(rect.width() * 0.5, rect.height() * 0.5),
        }
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Point {
        self.center - self.half_extents
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Point {
        self.center + self.half_extents
    }

    /// Returns the box as a [`Rect`].
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.min(), self.max())
    }

    /// Grows the box by `amount` on every side.
    #[must_use]
    pub fn inflate(&self, amount: f64) -> Self {
        Self {
            center: self.center,
            half_extents: self.half_extents + Vec2::new(amount, amount),
        }
    }

    /// Returns the smallest box containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_rect(self.to_rect().union(other.to_rect()))
    }

    /// Returns the axis-aligned box enclosing `self` after `transform`.
    ///
    /// This is conservative under rotation and skew.
    #[must_use]
    pub fn transform(&self, transform: Affine) -> Self {
        Self::from_rect(transform.transform_rect_bbox(self.to_rect()))
    }

    /// Returns `true` if `point` lies inside or on the boundary of the box.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let d = point - self.center;
        d.x.abs() <= self.half_extents.x && d.y.abs() <= self.half_extents.y
    }
}
