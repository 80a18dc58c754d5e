// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Absolute path commands and normalization of SVG path segments.
//!
//! A [`PathData`] only ever holds absolute, fixed-arity commands. Relative
//! commands (`m`, `l`, `c`, ...) and shorthands (`H`, `V`, `S`, `T`) are
//! resolved by [`normalize_path`] before storage.

use core::fmt::Write as _;

use kurbo::{Arc, BezPath, PathEl, Point, Rect, Shape as _, SvgArc, Vec2};
use smallvec::SmallVec;

use crate::error::GeometryError;

/// One absolute path command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath at the point.
    MoveTo(Point),
    /// Straight line to the point.
    LineTo(Point),
    /// Quadratic Bézier with one control point.
    QuadTo(Point, Point),
    /// Cubic Bézier with two control points.
    CurveTo(Point, Point, Point),
    /// Elliptical arc, SVG endpoint parameterization.
    ArcTo {
        /// Arc radii.
        radii: Vec2,
        /// Rotation of the ellipse x-axis, in degrees.
        x_rotation: f64,
        /// Whether the larger of the two candidate arcs is taken.
        large_arc: bool,
        /// Whether the arc is drawn in the positive-angle direction.
        sweep: bool,
        /// End point.
        to: Point,
    },
    /// Close the current subpath.
    Close,
}

impl PathCommand {
    /// Returns the SVG letter of the absolute command.
    #[must_use]
    pub fn letter(&self) -> char {
        match self {
            Self::MoveTo(_) => 'M',
            Self::LineTo(_) => 'L',
            Self::QuadTo(..) => 'Q',
            Self::CurveTo(..) => 'C',
            Self::ArcTo { .. } => 'A',
            Self::Close => 'Z',
        }
    }

    /// Returns the end point of the command, if it has one.
    #[must_use]
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) | Self::QuadTo(_, p) | Self::CurveTo(_, _, p) => {
                Some(p)
            }
            Self::ArcTo { to, .. } => Some(to),
            Self::Close => None,
        }
    }

    fn is_finite(&self) -> bool {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) => p.is_finite(),
            Self::QuadTo(a, b) => a.is_finite() && b.is_finite(),
            Self::CurveTo(a, b, c) => a.is_finite() && b.is_finite() && c.is_finite(),
            Self::ArcTo {
                radii,
                x_rotation,
                to,
                ..
            } => radii.is_finite() && x_rotation.is_finite() && to.is_finite(),
            Self::Close => true,
        }
    }

    fn translated(self, offset: Vec2) -> Self {
        match self {
            Self::MoveTo(p) => Self::MoveTo(p + offset),
            Self::LineTo(p) => Self::LineTo(p + offset),
            Self::QuadTo(a, b) => Self::QuadTo(a + offset, b + offset),
            Self::CurveTo(a, b, c) => Self::CurveTo(a + offset, b + offset, c + offset),
            Self::ArcTo {
                radii,
                x_rotation,
                large_arc,
                sweep,
                to,
            } => Self::ArcTo {
                radii,
                x_rotation,
                large_arc,
                sweep,
                to: to + offset,
            },
            Self::Close => Self::Close,
        }
    }
}

/// A raw path segment as written in SVG path data.
///
/// The command letter may be relative (lowercase) or a shorthand; the
/// argument count must match [`PathSegment::arity`] for the letter.
#[derive(Clone, Debug, PartialEq)]
pub struct PathSegment {
    /// The SVG command letter.
    pub command: char,
    /// The numeric arguments.
    pub args: SmallVec<[f64; 7]>,
}

impl PathSegment {
    /// Creates a segment from a command letter and its arguments.
    #[must_use]
    pub fn new(command: char, args: &[f64]) -> Self {
        Self {
            command,
            args: SmallVec::from_slice(args),
        }
    }

    /// Returns the number of arguments the command letter takes.
    ///
    /// Returns `None` for letters that are not SVG path commands.
    #[must_use]
    pub fn arity(command: char) -> Option<usize> {
        match command.to_ascii_uppercase() {
            'M' | 'L' | 'T' => Some(2),
            'H' | 'V' => Some(1),
            'S' | 'Q' => Some(4),
            'C' => Some(6),
            'A' => Some(7),
            'Z' => Some(0),
            _ => None,
        }
    }

    fn check_arity(&self) -> Result<(), GeometryError> {
        let expected =
            Self::arity(self.command).ok_or(GeometryError::UnknownCommand(self.command))?;
        if expected == self.args.len() {
            Ok(())
        } else {
            Err(GeometryError::Arity {
                command: self.command,
                expected,
                found: self.args.len(),
            })
        }
    }
}

/// An ordered sequence of absolute path commands.
///
/// The empty sequence is the canonical value for rejected geometry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    /// Returns the canonical empty path.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Wraps already-absolute commands.
    ///
    /// Returns [`GeometryError::NonFinite`] if any coordinate is not finite,
    /// or [`GeometryError::MissingMoveTo`] if the first command draws.
    pub fn from_commands(commands: Vec<PathCommand>) -> Result<Self, GeometryError> {
        if let Some(bad) = commands.iter().find(|c| !c.is_finite()) {
            return Err(GeometryError::NonFinite {
                command: bad.letter(),
            });
        }
        if let Some(first) = commands.first()
            && !matches!(first, PathCommand::MoveTo(_))
        {
            return Err(GeometryError::MissingMoveTo {
                command: first.letter(),
            });
        }
        Ok(Self { commands })
    }

    /// Returns the commands.
    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Returns `true` if the path has no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns the number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns a copy with every coordinate offset by `offset`.
    ///
    /// Arc radii and flags are left untouched.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            commands: self.commands.iter().map(|c| c.translated(offset)).collect(),
        }
    }

    /// Converts the commands into a [`BezPath`], expanding arcs into cubics.
    #[must_use]
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut current = Point::ZERO;
        let mut start = Point::ZERO;
        let mut open = false;
        for command in &self.commands {
            match command {
                PathCommand::MoveTo(_) => {}
                // Nothing to close.
                PathCommand::Close if !open => continue,
                PathCommand::Close => {}
                // Drawing without an open subpath starts one at the current point.
                _ if !open => {
                    path.move_to(current);
                    start = current;
                    open = true;
                }
                _ => {}
            }
            match *command {
                PathCommand::MoveTo(p) => {
                    path.move_to(p);
                    start = p;
                    open = true;
                }
                PathCommand::LineTo(p) => path.line_to(p),
                PathCommand::QuadTo(c, p) => path.quad_to(c, p),
                PathCommand::CurveTo(c1, c2, p) => path.curve_to(c1, c2, p),
                PathCommand::ArcTo {
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                    to,
                } => {
                    let svg_arc = SvgArc {
                        from: current,
                        to,
                        radii,
                        x_rotation: x_rotation.to_radians(),
                        large_arc,
                        sweep,
                    };
                    match Arc::from_svg_arc(&svg_arc) {
                        Some(arc) => arc.to_cubic_beziers(crate::TOLERANCE, |p1, p2, p| {
                            path.curve_to(p1, p2, p);
                        }),
                        // Zero radii or coincident endpoints degrade to a line.
                        None => path.line_to(to),
                    }
                }
                PathCommand::Close => {
                    path.close_path();
                    current = start;
                    open = false;
                    continue;
                }
            }
            if let Some(p) = command.end_point() {
                current = p;
            }
        }
        path
    }

    /// Returns the tight bounding box of the path, or `None` if it is empty.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Rect> {
        if self.is_empty() {
            return None;
        }
        let path = self.to_bez_path();
        if path.elements().iter().all(|el| matches!(el, PathEl::MoveTo(_))) {
            // A bare move-to still anchors a point.
            return self
                .commands
                .iter()
                .find_map(PathCommand::end_point)
                .map(|p| Rect::from_points(p, p));
        }
        Some(path.bounding_box())
    }

    /// Formats the path as SVG path data with every endpoint offset by `-origin`.
    ///
    /// Arc radii, rotation and flags are written unchanged. A non-finite
    /// coordinate anywhere yields the empty string.
    #[must_use]
    pub fn to_svg(&self, origin: Vec2) -> String {
        let mut out = String::new();
        for (i, command) in self.commands.iter().enumerate() {
            if !command.is_finite() {
                return String::new();
            }
            if i > 0 {
                out.push(' ');
            }
            let c = command.translated(-origin);
            // Writing into a `String` cannot fail.
            let _ = match c {
                PathCommand::MoveTo(p) => write!(out, "M {},{}", p.x, p.y),
                PathCommand::LineTo(p) => write!(out, "L {},{}", p.x, p.y),
                PathCommand::QuadTo(a, p) => write!(out, "Q {} {},{} {}", a.x, a.y, p.x, p.y),
                PathCommand::CurveTo(a, b, p) => write!(
                    out,
                    "C {} {},{} {},{} {}",
                    a.x, a.y, b.x, b.y, p.x, p.y
                ),
                PathCommand::ArcTo {
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                    to,
                } => write!(
                    out,
                    "A {} {} {} {} {} {} {}",
                    radii.x,
                    radii.y,
                    x_rotation,
                    u8::from(large_arc),
                    u8::from(sweep),
                    to.x,
                    to.y
                ),
                PathCommand::Close => write!(out, "Z"),
            };
        }
        out
    }
}

/// Normalizes SVG path segments into absolute commands offset by `-origin`.
///
/// Returns the canonical empty path if any segment is malformed or resolves
/// to a non-finite coordinate; use [`try_normalize_path`] to see why.
#[must_use]
pub fn normalize_path(segments: &[PathSegment], origin: Vec2) -> PathData {
    match try_normalize_path(segments, origin) {
        Ok(path) => path,
        Err(err) => {
            tracing::debug!(%err, "rejecting degenerate path");
            PathData::empty()
        }
    }
}

/// Normalizes SVG path segments into absolute commands offset by `-origin`.
///
/// Relative commands are resolved against the current point, `H`/`V` expand
/// into line-tos, and `S`/`T` reflect the previous control point (or use the
/// current point when the previous command was not of the same family).
/// A non-empty sequence must open with a move-to.
pub fn try_normalize_path(
    segments: &[PathSegment],
    origin: Vec2,
) -> Result<PathData, GeometryError> {
    let mut commands = Vec::with_capacity(segments.len());
    let mut current = Point::ZERO;
    let mut subpath_start = Point::ZERO;
    // Last control point of the previous cubic or quadratic, for reflection.
    let mut last_cubic_ctrl: Option<Point> = None;
    let mut last_quad_ctrl: Option<Point> = None;

    for segment in segments {
        segment.check_arity()?;
        let relative = segment.command.is_ascii_lowercase();
        let base = if relative { current.to_vec2() } else { Vec2::ZERO };
        let a = &segment.args;
        let pt = |x: f64, y: f64| Point::new(x, y) + base;

        let command = match segment.command.to_ascii_uppercase() {
            'M' => {
                let p = pt(a[0], a[1]);
                subpath_start = p;
                PathCommand::MoveTo(p)
            }
            'L' => PathCommand::LineTo(pt(a[0], a[1])),
            'H' => {
                let x = if relative { current.x + a[0] } else { a[0] };
                PathCommand::LineTo(Point::new(x, current.y))
            }
            'V' => {
                let y = if relative { current.y + a[0] } else { a[0] };
                PathCommand::LineTo(Point::new(current.x, y))
            }
            'Q' => PathCommand::QuadTo(pt(a[0], a[1]), pt(a[2], a[3])),
            'T' => {
                let ctrl = last_quad_ctrl.map_or(current, |c| current + (current - c));
                PathCommand::QuadTo(ctrl, pt(a[0], a[1]))
            }
            'C' => PathCommand::CurveTo(pt(a[0], a[1]), pt(a[2], a[3]), pt(a[4], a[5])),
            'S' => {
                let ctrl = last_cubic_ctrl.map_or(current, |c| current + (current - c));
                PathCommand::CurveTo(ctrl, pt(a[0], a[1]), pt(a[2], a[3]))
            }
            'A' => PathCommand::ArcTo {
                radii: Vec2::new(a[0].abs(), a[1].abs()),
                x_rotation: a[2],
                large_arc: a[3] != 0.0,
                sweep: a[4] != 0.0,
                to: pt(a[5], a[6]),
            },
            'Z' => PathCommand::Close,
            _ => return Err(GeometryError::UnknownCommand(segment.command)),
        };

        if commands.is_empty() && !matches!(command, PathCommand::MoveTo(_)) {
            return Err(GeometryError::MissingMoveTo {
                command: segment.command,
            });
        }

        if !command.is_finite() {
            return Err(GeometryError::NonFinite {
                command: segment.command,
            });
        }

        (last_cubic_ctrl, last_quad_ctrl) = match command {
            PathCommand::CurveTo(_, c2, _) => (Some(c2), None),
            PathCommand::QuadTo(c, _) => (None, Some(c)),
            _ => (None, None),
        };
        current = match command {
            PathCommand::Close => subpath_start,
            _ => command.end_point().unwrap_or(current),
        };
        commands.push(command.translated(-origin));
    }

    Ok(PathData { commands })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(command: char, args: &[f64]) -> PathSegment {
        PathSegment::new(command, args)
    }

    #[test]
    fn absolute_commands_pass_through() {
        let path = normalize_path(
            &[
                seg('M', &[0.0, 0.0]),
                seg('L', &[10.0, 0.0]),
                seg('Q', &[10.0, 10.0, 0.0, 10.0]),
                seg('Z', &[]),
            ],
            Vec2::ZERO,
        );
        assert_eq!(
            path.commands(),
            &[
                PathCommand::MoveTo(Point::new(0.0, 0.0)),
                PathCommand::LineTo(Point::new(10.0, 0.0)),
                PathCommand::QuadTo(Point::new(10.0, 10.0), Point::new(0.0, 10.0)),
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn relative_and_shorthand_are_resolved() {
        let path = normalize_path(
            &[
                seg('M', &[10.0, 10.0]),
                seg('h', &[5.0]),
                seg('v', &[5.0]),
                seg('l', &[-5.0, 0.0]),
                seg('z', &[]),
                seg('m', &[1.0, 1.0]),
            ],
            Vec2::ZERO,
        );
        assert_eq!(
            path.commands(),
            &[
                PathCommand::MoveTo(Point::new(10.0, 10.0)),
                PathCommand::LineTo(Point::new(15.0, 10.0)),
                PathCommand::LineTo(Point::new(15.0, 15.0)),
                PathCommand::LineTo(Point::new(10.0, 15.0)),
                PathCommand::Close,
                // Relative to the subpath start after close.
                PathCommand::MoveTo(Point::new(11.0, 11.0)),
            ]
        );
    }

    #[test]
    fn smooth_curves_reflect_previous_control() {
        let path = normalize_path(
            &[
                seg('M', &[0.0, 0.0]),
                seg('C', &[0.0, 10.0, 10.0, 10.0, 10.0, 0.0]),
                seg('S', &[20.0, -10.0, 20.0, 0.0]),
            ],
            Vec2::ZERO,
        );
        assert_eq!(
            path.commands()[2],
            PathCommand::CurveTo(
                Point::new(10.0, -10.0),
                Point::new(20.0, -10.0),
                Point::new(20.0, 0.0)
            )
        );

        let path = normalize_path(
            &[
                seg('M', &[0.0, 0.0]),
                seg('Q', &[5.0, 5.0, 10.0, 0.0]),
                seg('t', &[10.0, 0.0]),
            ],
            Vec2::ZERO,
        );
        assert_eq!(
            path.commands()[2],
            PathCommand::QuadTo(Point::new(15.0, -5.0), Point::new(20.0, 0.0))
        );
    }

    #[test]
    fn smooth_without_previous_uses_current_point() {
        let path = normalize_path(
            &[seg('M', &[3.0, 4.0]), seg('T', &[10.0, 0.0])],
            Vec2::ZERO,
        );
        assert_eq!(
            path.commands()[1],
            PathCommand::QuadTo(Point::new(3.0, 4.0), Point::new(10.0, 0.0))
        );
    }

    #[test]
    fn origin_offsets_coordinates_but_not_arc_radii() {
        let path = normalize_path(
            &[
                seg('M', &[10.0, 20.0]),
                seg('A', &[5.0, 6.0, 30.0, 1.0, 0.0, 20.0, 20.0]),
            ],
            Vec2::new(10.0, 20.0),
        );
        assert_eq!(
            path.commands(),
            &[
                PathCommand::MoveTo(Point::new(0.0, 0.0)),
                PathCommand::ArcTo {
                    radii: Vec2::new(5.0, 6.0),
                    x_rotation: 30.0,
                    large_arc: true,
                    sweep: false,
                    to: Point::new(10.0, 0.0),
                },
            ]
        );
    }

    #[test]
    fn non_finite_rejects_whole_path() {
        let segments = [seg('M', &[0.0, 0.0]), seg('L', &[f64::INFINITY, 0.0])];
        assert!(normalize_path(&segments, Vec2::ZERO).is_empty());
        assert_eq!(
            try_normalize_path(&segments, Vec2::ZERO),
            Err(GeometryError::NonFinite { command: 'L' })
        );

        let nan = [seg('M', &[f64::NAN, 0.0])];
        assert!(normalize_path(&nan, Vec2::ZERO).is_empty());
    }

    #[test]
    fn wrong_arity_is_reported() {
        let err = try_normalize_path(&[seg('C', &[1.0, 2.0])], Vec2::ZERO).unwrap_err();
        assert_eq!(
            err,
            GeometryError::Arity {
                command: 'C',
                expected: 6,
                found: 2
            }
        );
        assert_eq!(
            try_normalize_path(&[seg('X', &[])], Vec2::ZERO),
            Err(GeometryError::UnknownCommand('X'))
        );
    }

    #[test]
    fn drawing_before_a_move_is_rejected() {
        assert_eq!(
            try_normalize_path(
                &[seg('L', &[10.0, 10.0]), seg('L', &[20.0, 0.0])],
                Vec2::ZERO
            ),
            Err(GeometryError::MissingMoveTo { command: 'L' })
        );
        assert_eq!(
            try_normalize_path(&[seg('z', &[]), seg('M', &[0.0, 0.0])], Vec2::ZERO),
            Err(GeometryError::MissingMoveTo { command: 'z' })
        );
        assert!(normalize_path(&[seg('l', &[5.0, 5.0])], Vec2::ZERO).is_empty());
        assert_eq!(
            PathData::from_commands(vec![PathCommand::LineTo(Point::new(1.0, 1.0))]),
            Err(GeometryError::MissingMoveTo { command: 'L' })
        );
    }

    #[test]
    fn bez_path_opens_a_subpath_before_drawing() {
        let path = PathData {
            commands: vec![
                PathCommand::Close,
                PathCommand::LineTo(Point::new(10.0, 0.0)),
                PathCommand::Close,
                PathCommand::LineTo(Point::new(0.0, 10.0)),
            ],
        };
        let bez = path.to_bez_path();
        assert_eq!(
            bez.elements(),
            &[
                PathEl::MoveTo(Point::ZERO),
                PathEl::LineTo(Point::new(10.0, 0.0)),
                PathEl::ClosePath,
                PathEl::MoveTo(Point::ZERO),
                PathEl::LineTo(Point::new(0.0, 10.0)),
            ]
        );
        assert!((bez.perimeter(crate::TOLERANCE) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn svg_formatting_matches_renderer_syntax() {
        let path = normalize_path(
            &[
                seg('M', &[10.0, 10.0]),
                seg('L', &[20.0, 10.0]),
                seg('Q', &[25.0, 15.0, 20.0, 20.0]),
                seg('C', &[15.0, 25.0, 10.0, 25.0, 10.0, 20.0]),
                seg('A', &[5.0, 5.0, 0.0, 0.0, 1.0, 10.0, 10.0]),
                seg('Z', &[]),
            ],
            Vec2::ZERO,
        );
        assert_eq!(
            path.to_svg(Vec2::new(10.0, 10.0)),
            "M 0,0 L 10,0 Q 15 5,10 10 C 5 15,0 15,0 10 A 5 5 0 0 1 0 0 Z"
        );
    }

    #[test]
    fn svg_formatting_rejects_non_finite() {
        let path = PathData {
            commands: vec![
                PathCommand::MoveTo(Point::ZERO),
                PathCommand::LineTo(Point::new(f64::NAN, 0.0)),
            ],
        };
        assert_eq!(path.to_svg(Vec2::ZERO), "");
        assert!(PathData::from_commands(path.commands().to_vec()).is_err());
    }

    #[test]
    fn bounding_box_includes_curves() {
        let path = normalize_path(
            &[seg('M', &[0.0, 0.0]), seg('Q', &[5.0, 10.0, 10.0, 0.0])],
            Vec2::ZERO,
        );
        let bbox = path.bounding_box().unwrap();
        assert_eq!(bbox.x0, 0.0);
        assert_eq!(bbox.x1, 10.0);
        assert!((bbox.y1 - 5.0).abs() < 1e-9);
        assert_eq!(PathData::empty().bounding_box(), None);
    }

    #[test]
    fn arc_expands_to_curves() {
        let path = normalize_path(
            &[
                seg('M', &[0.0, 0.0]),
                seg('A', &[5.0, 5.0, 0.0, 0.0, 1.0, 10.0, 0.0]),
            ],
            Vec2::ZERO,
        );
        let bez = path.to_bez_path();
        assert!(
            bez.elements()
                .iter()
                .any(|el| matches!(el, PathEl::CurveTo(..)))
        );
    }
}
