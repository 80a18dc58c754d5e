// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw (declared) and computed (typed) values.

use core::fmt;

use kurbo::{Affine, Point, Rect, Vec2};
use peniko::Color;
use smallvec::SmallVec;
use thicket_geometry::PathData;

/// A declared value as supplied by the host.
///
/// Hosts may declare values as text (`"10px"`, `"M0,0 L10,10"`), as bare
/// numbers, or as nested lists (`[[50, 50], [100, 50]]`).
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    /// A bare number in user units.
    Number(f64),
    /// Text to be parsed by the property's grammar.
    Str(String),
    /// A list of values.
    List(Vec<Self>),
}

impl RawValue {
    /// Builds a list value from anything convertible into raw values.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns the text if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a numeric value.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<[f64; 2]> for RawValue {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::List(vec![Self::Number(x), Self::Number(y)])
    }
}

impl From<Vec<Self>> for RawValue {
    fn from(value: Vec<Self>) -> Self {
        Self::List(value)
    }
}

impl<T: Into<Self>> FromIterator<T> for RawValue {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::list(iter)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A resolved paint.
#[derive(Clone, Debug)]
pub enum Paint {
    /// Nothing is painted.
    None,
    /// A solid color.
    Color(Color),
    /// A paint server (gradient, pattern) referenced by id, resolved by the renderer.
    Reference(String),
}

impl PartialEq for Paint {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Color(a), Self::Color(b)) => same_color(a, b),
            (Self::Reference(a), Self::Reference(b)) => a == b,
            _ => false,
        }
    }
}

/// A stacking order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ZIndex {
    /// Document order.
    #[default]
    Auto,
    /// An explicit stacking level.
    Value(i32),
}

/// A length that may still be relative to an extent known only later.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Dimension {
    /// Absolute user units.
    Px(f64),
    /// Percent of the extent, e.g. `50.0` for `50%`.
    Percent(f64),
}

impl Dimension {
    /// Resolves against `extent`.
    #[must_use]
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => p / 100.0 * extent,
        }
    }
}

/// The pivot of a node's style transform, relative to its geometry bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformOrigin {
    /// Horizontal offset from the left edge.
    pub x: Dimension,
    /// Vertical offset from the top edge.
    pub y: Dimension,
}

impl TransformOrigin {
    /// The top-left corner of the bounds.
    pub const TOP_LEFT: Self = Self {
        x: Dimension::Percent(0.0),
        y: Dimension::Percent(0.0),
    };

    /// Resolves the pivot point within `bounds`.
    #[must_use]
    pub fn resolve(&self, bounds: Rect) -> Point {
        Point::new(
            bounds.x0 + self.x.resolve(bounds.width()),
            bounds.y0 + self.y.resolve(bounds.height()),
        )
    }
}

impl Default for TransformOrigin {
    fn default() -> Self {
        Self::TOP_LEFT
    }
}

/// One operation of a filter chain.
///
/// Amounts are fractions (`50%` is `0.5`); angles are degrees; lengths are
/// user units.
#[derive(Clone, Debug)]
pub enum FilterOp {
    /// Gaussian blur radius.
    Blur(f64),
    /// Brightness multiplier.
    Brightness(f64),
    /// Contrast multiplier.
    Contrast(f64),
    /// Offset shadow.
    DropShadow {
        /// Shadow offset.
        offset: Vec2,
        /// Blur radius.
        blur: f64,
        /// Shadow color.
        color: Color,
    },
    /// Grayscale amount.
    Grayscale(f64),
    /// Hue rotation in degrees.
    HueRotate(f64),
    /// Inversion amount.
    Invert(f64),
    /// Opacity multiplier.
    Opacity(f64),
    /// Saturation multiplier.
    Saturate(f64),
    /// Sepia amount.
    Sepia(f64),
}

impl PartialEq for FilterOp {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Blur(a), Self::Blur(b))
            | (Self::Brightness(a), Self::Brightness(b))
            | (Self::Contrast(a), Self::Contrast(b))
            | (Self::Grayscale(a), Self::Grayscale(b))
            | (Self::HueRotate(a), Self::HueRotate(b))
            | (Self::Invert(a), Self::Invert(b))
            | (Self::Opacity(a), Self::Opacity(b))
            | (Self::Saturate(a), Self::Saturate(b))
            | (Self::Sepia(a), Self::Sepia(b)) => a == b,
            (
                Self::DropShadow {
                    offset: o1,
                    blur: b1,
                    color: c1,
                },
                Self::DropShadow {
                    offset: o2,
                    blur: b2,
                    color: c2,
                },
            ) => o1 == o2 && b1 == b2 && same_color(c1, c2),
            _ => false,
        }
    }
}

/// A typed, resolved property value.
#[derive(Clone, Debug)]
pub enum ComputedValue {
    /// A number: coordinates, lengths and percentages resolved to user units,
    /// clamped opacities and blurs, offset distances.
    Number(f64),
    /// One to four resolved lengths.
    Lengths(SmallVec<[f64; 4]>),
    /// A color.
    Color(Color),
    /// A paint.
    Paint(Paint),
    /// A stacking order.
    ZIndex(ZIndex),
    /// An ordered list of points.
    Points(Vec<Point>),
    /// Normalized absolute path commands.
    Path(PathData),
    /// A composed affine transform.
    Transform(Affine),
    /// A transform pivot.
    TransformOrigin(TransformOrigin),
    /// A filter chain; empty for `none`.
    Filter(Vec<FilterOp>),
    /// A reference by id (`url(#id)`), or `None` for `none`.
    Reference(Option<String>),
    /// Free text.
    Text(String),
    /// One of the property's keywords.
    Keyword(String),
    /// A well-formed value waiting for a resolution basis.
    Pending(RawValue),
}

impl ComputedValue {
    /// Returns the number if this is a numeric value.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the keyword or text, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Keyword(s) | Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the paint if this is a paint value.
    #[must_use]
    pub fn as_paint(&self) -> Option<&Paint> {
        match self {
            Self::Paint(p) => Some(p),
            _ => None,
        }
    }

    /// Returns `true` if the value is still waiting for a basis.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

impl PartialEq for ComputedValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Lengths(a), Self::Lengths(b)) => a == b,
            (Self::Color(a), Self::Color(b)) => same_color(a, b),
            (Self::Paint(a), Self::Paint(b)) => a == b,
            (Self::ZIndex(a), Self::ZIndex(b)) => a == b,
            (Self::Points(a), Self::Points(b)) => a == b,
            (Self::Path(a), Self::Path(b)) => a == b,
            (Self::Transform(a), Self::Transform(b)) => a == b,
            (Self::TransformOrigin(a), Self::TransformOrigin(b)) => a == b,
            (Self::Filter(a), Self::Filter(b)) => a == b,
            (Self::Reference(a), Self::Reference(b)) => a == b,
            (Self::Text(a), Self::Text(b)) | (Self::Keyword(a), Self::Keyword(b)) => a == b,
            (Self::Pending(a), Self::Pending(b)) => a == b,
            _ => false,
        }
    }
}

fn same_color(a: &Color, b: &Color) -> bool {
    a.components == b.components
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_value_conversions() {
        assert_eq!(RawValue::from(2.5), RawValue::Number(2.5));
        assert_eq!(RawValue::from(3), RawValue::Number(3.0));
        assert_eq!(RawValue::from("red").as_str(), Some("red"));
        let points: RawValue = [[0.0, 0.0], [10.0, 5.0]].into_iter().collect();
        assert_eq!(points.to_string(), "[[0, 0], [10, 5]]");
    }

    #[test]
    fn paint_equality_compares_components() {
        let a = Paint::Color(Color::from_rgba8(255, 0, 0, 255));
        let b = Paint::Color(Color::from_rgba8(255, 0, 0, 255));
        let c = Paint::Color(Color::from_rgba8(0, 0, 255, 255));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Paint::None);
        assert_eq!(
            Paint::Reference("grad".into()),
            Paint::Reference("grad".into())
        );
    }

    #[test]
    fn transform_origin_resolves_within_bounds() {
        let bounds = Rect::new(-10.0, -20.0, 10.0, 20.0);
        assert_eq!(TransformOrigin::TOP_LEFT.resolve(bounds), Point::new(-10.0, -20.0));
        let center = TransformOrigin {
            x: Dimension::Percent(50.0),
            y: Dimension::Px(5.0),
        };
        assert_eq!(center.resolve(bounds), Point::new(0.0, -15.0));
    }

    #[test]
    fn computed_values_of_different_kinds_differ() {
        assert_ne!(ComputedValue::Number(1.0), ComputedValue::Text("1".into()));
        assert_ne!(
            ComputedValue::Keyword("a".into()),
            ComputedValue::Text("a".into())
        );
    }
}
