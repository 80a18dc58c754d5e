// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-syntax value parsing.
//!
//! [`parse`] is a pure function of the raw value, the syntax and the
//! [`ResolveCx`]; dispatch is a closed `match` over [`PropertySyntax`].

use peniko::Color;
use peniko::color::{Srgb, parse_color};
use smallvec::SmallVec;
use thicket_property::{PropertyMetadata, PropertySyntax};

use crate::context::ResolveCx;
use crate::error::ParseError;
use crate::lexer::{is_separator, split_unit, url_reference};
use crate::value::{ComputedValue, Dimension, Paint, RawValue, TransformOrigin, ZIndex};
use crate::{filter, path, transform};

/// Parses `raw` against `syntax`, resolving relative units through `cx`.
///
/// # Example
///
/// ```rust
/// use kurbo::Size;
/// use thicket_property::PropertySyntax;
/// use thicket_style::{ComputedValue, ParseError, RawValue, ResolveCx, parse};
///
/// let cx = ResolveCx::new().with_basis(Size::new(200.0, 100.0));
/// let value = parse(&RawValue::from("50%"), PropertySyntax::LengthPercentage, &cx);
/// assert_eq!(value, Ok(ComputedValue::Number(100.0)));
///
/// let opacity = parse(&RawValue::from(1.5), PropertySyntax::OpacityValue, &cx);
/// assert_eq!(opacity, Ok(ComputedValue::Number(1.0)));
///
/// let unresolved = parse(
///     &RawValue::from("50%"),
///     PropertySyntax::LengthPercentage,
///     &ResolveCx::new(),
/// );
/// assert_eq!(unresolved, Err(ParseError::UnresolvedBasis("50%".into())));
/// ```
pub fn parse(
    raw: &RawValue,
    syntax: PropertySyntax,
    cx: &ResolveCx,
) -> Result<ComputedValue, ParseError> {
    use PropertySyntax as S;

    match syntax {
        S::Number => number(raw, syntax).map(ComputedValue::Number),
        S::OpacityValue => fraction(raw, syntax).map(|v| ComputedValue::Number(v.clamp(0.0, 1.0))),
        S::OffsetDistance => {
            fraction(raw, syntax).map(|v| ComputedValue::Number(v.clamp(0.0, 1.0)))
        }
        S::ShadowBlur => number(raw, syntax).map(|v| ComputedValue::Number(v.max(0.0))),
        S::Coordinate | S::LengthPercentage => {
            length(raw, syntax, cx, true).map(ComputedValue::Number)
        }
        S::Length => length(raw, syntax, cx, false).map(ComputedValue::Number),
        S::Percentage => percentage(raw, cx).map(ComputedValue::Number),
        S::LengthPercentage12 => lengths(raw, syntax, cx, 2).map(ComputedValue::Lengths),
        S::LengthPercentage14 => lengths(raw, syntax, cx, 4).map(ComputedValue::Lengths),
        S::Color => color(text(raw, syntax)?, syntax).map(ComputedValue::Color),
        S::Paint => paint(text(raw, syntax)?).map(ComputedValue::Paint),
        S::ZIndex => z_index(raw).map(ComputedValue::ZIndex),
        S::ListOfPoints => path::points(raw).map(ComputedValue::Points),
        S::Path => path::path(raw).map(ComputedValue::Path),
        S::Filter => filter::filter(text(raw, syntax)?, cx).map(ComputedValue::Filter),
        S::Transform => transform::transform(raw, cx).map(ComputedValue::Transform),
        S::TransformOrigin => transform_origin(text(raw, syntax)?, cx)
            .map(ComputedValue::TransformOrigin),
        S::OffsetPath | S::ClipPath => reference(text(raw, syntax)?, syntax),
        S::Text => Ok(ComputedValue::Text(match raw {
            RawValue::Str(s) => s.clone(),
            other => other.to_string(),
        })),
        S::TextTransform => {
            let word = text(raw, syntax)?.trim();
            match word {
                "none" | "capitalize" | "uppercase" | "lowercase" => {
                    Ok(ComputedValue::Keyword(word.to_owned()))
                }
                _ => Err(ParseError::UnknownKeyword(word.to_owned())),
            }
        }
    }
}

/// Parses `raw` for the property described by `metadata`.
///
/// Keywords of the property are accepted verbatim before its syntax is
/// consulted. A property without a syntax accepts only its keywords, or
/// free text if it has none.
pub fn parse_property(
    raw: &RawValue,
    metadata: &PropertyMetadata,
    cx: &ResolveCx,
) -> Result<ComputedValue, ParseError> {
    if let RawValue::Str(s) = raw
        && metadata.is_keyword(s.trim())
    {
        return Ok(ComputedValue::Keyword(s.trim().to_owned()));
    }
    match metadata.syntax() {
        Some(syntax) => parse(raw, syntax, &cx.with_percent_of(metadata.percent_basis())),
        None if metadata.keywords().is_empty() => Ok(ComputedValue::Text(raw.to_string())),
        None => Err(ParseError::UnknownKeyword(raw.to_string())),
    }
}

fn text(raw: &RawValue, syntax: PropertySyntax) -> Result<&str, ParseError> {
    raw.as_str()
        .ok_or_else(|| ParseError::malformed(syntax, raw.to_string()))
}

pub(crate) fn number(raw: &RawValue, syntax: PropertySyntax) -> Result<f64, ParseError> {
    let value = match raw {
        RawValue::Number(n) => *n,
        RawValue::Str(s) => match split_unit(s) {
            Some((v, "")) => v,
            _ => return Err(ParseError::malformed(syntax, s.as_str())),
        },
        RawValue::List(_) => return Err(ParseError::malformed(syntax, raw.to_string())),
    };
    if value.is_nan() {
        return Err(ParseError::malformed(syntax, raw.to_string()));
    }
    Ok(value)
}

/// A number or a percentage of one (`50%` is `0.5`).
fn fraction(raw: &RawValue, syntax: PropertySyntax) -> Result<f64, ParseError> {
    if let RawValue::Str(s) = raw
        && let Some((v, "%")) = split_unit(s)
    {
        return Ok(v / 100.0);
    }
    number(raw, syntax)
}

/// Resolves one length token to user units.
pub(crate) fn length_str(
    s: &str,
    syntax: PropertySyntax,
    cx: &ResolveCx,
    allow_percent: bool,
) -> Result<f64, ParseError> {
    let Some((value, unit)) = split_unit(s) else {
        return Err(ParseError::malformed(syntax, s));
    };
    let unresolved = || ParseError::UnresolvedBasis(s.trim().to_owned());
    match unit {
        "" | "px" => Ok(value),
        "%" if allow_percent => cx
            .percent_basis()
            .map(|basis| value / 100.0 * basis)
            .ok_or_else(unresolved),
        "em" => cx.em_basis().map(|em| value * em).ok_or_else(unresolved),
        "vw" => cx
            .viewport()
            .map(|v| value / 100.0 * v.width)
            .ok_or_else(unresolved),
        "vh" => cx
            .viewport()
            .map(|v| value / 100.0 * v.height)
            .ok_or_else(unresolved),
        _ => Err(ParseError::malformed(syntax, s)),
    }
}

fn length(
    raw: &RawValue,
    syntax: PropertySyntax,
    cx: &ResolveCx,
    allow_percent: bool,
) -> Result<f64, ParseError> {
    match raw {
        RawValue::Number(n) if !n.is_nan() => Ok(*n),
        RawValue::Str(s) => length_str(s, syntax, cx, allow_percent),
        _ => Err(ParseError::malformed(syntax, raw.to_string())),
    }
}

fn percentage(raw: &RawValue, cx: &ResolveCx) -> Result<f64, ParseError> {
    let syntax = PropertySyntax::Percentage;
    let percent = match raw {
        RawValue::Number(n) => *n,
        RawValue::Str(s) => match split_unit(s) {
            Some((v, "%")) => v,
            _ => return Err(ParseError::malformed(syntax, s.as_str())),
        },
        RawValue::List(_) => return Err(ParseError::malformed(syntax, raw.to_string())),
    };
    cx.percent_basis()
        .map(|basis| percent / 100.0 * basis)
        .ok_or_else(|| ParseError::UnresolvedBasis(raw.to_string()))
}

fn lengths(
    raw: &RawValue,
    syntax: PropertySyntax,
    cx: &ResolveCx,
    max: usize,
) -> Result<SmallVec<[f64; 4]>, ParseError> {
    let values = match raw {
        RawValue::Number(n) => SmallVec::from_slice(&[*n]),
        RawValue::Str(s) => s
            .split(is_separator)
            .filter(|t| !t.is_empty())
            .map(|t| length_str(t, syntax, cx, true))
            .collect::<Result<SmallVec<_>, _>>()?,
        RawValue::List(items) => items
            .iter()
            .map(|item| length(item, syntax, cx, true))
            .collect::<Result<SmallVec<_>, _>>()?,
    };
    if values.is_empty() {
        return Err(ParseError::Empty(syntax));
    }
    if values.len() > max {
        return Err(ParseError::Arity {
            command: syntax.tag().to_owned(),
            expected: max,
            found: values.len(),
        });
    }
    Ok(values)
}

pub(crate) fn color(s: &str, syntax: PropertySyntax) -> Result<Color, ParseError> {
    parse_color(s.trim())
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|_| ParseError::malformed(syntax, s))
}

fn paint(s: &str) -> Result<Paint, ParseError> {
    let s = s.trim();
    if s == "none" {
        return Ok(Paint::None);
    }
    if let Some(id) = url_reference(s) {
        return Ok(Paint::Reference(id.to_owned()));
    }
    color(s, PropertySyntax::Paint).map(Paint::Color)
}

fn z_index(raw: &RawValue) -> Result<ZIndex, ParseError> {
    let syntax = PropertySyntax::ZIndex;
    if raw.as_str().map(str::trim) == Some("auto") {
        return Ok(ZIndex::Auto);
    }
    let value = number(raw, syntax)?;
    if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(ParseError::malformed(syntax, raw.to_string()));
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "range and integrality checked above"
    )]
    let value = value as i32;
    Ok(ZIndex::Value(value))
}

fn reference(s: &str, syntax: PropertySyntax) -> Result<ComputedValue, ParseError> {
    let s = s.trim();
    if s == "none" {
        return Ok(ComputedValue::Reference(None));
    }
    url_reference(s)
        .map(|id| ComputedValue::Reference(Some(id.to_owned())))
        .ok_or_else(|| ParseError::malformed(syntax, s))
}

fn transform_origin(s: &str, cx: &ResolveCx) -> Result<TransformOrigin, ParseError> {
    let syntax = PropertySyntax::TransformOrigin;
    let tokens: Vec<&str> = s.split(is_separator).filter(|t| !t.is_empty()).collect();
    let dimension = |t: &str| -> Result<Dimension, ParseError> {
        match t {
            "left" | "top" => Ok(Dimension::Percent(0.0)),
            "center" => Ok(Dimension::Percent(50.0)),
            "right" | "bottom" => Ok(Dimension::Percent(100.0)),
            _ => match split_unit(t) {
                Some((v, "%")) => Ok(Dimension::Percent(v)),
                _ => length_str(t, syntax, cx, false).map(Dimension::Px),
            },
        }
    };
    let vertical = |t: &str| matches!(t, "top" | "bottom");
    let horizontal = |t: &str| matches!(t, "left" | "right");

    match tokens.as_slice() {
        [] => Err(ParseError::Empty(syntax)),
        &[only] if vertical(only) => Ok(TransformOrigin {
            x: Dimension::Percent(50.0),
            y: dimension(only)?,
        }),
        &[only] => Ok(TransformOrigin {
            x: dimension(only)?,
            y: Dimension::Percent(50.0),
        }),
        &[a, b] => {
            let (x, y) = if vertical(a) || horizontal(b) { (b, a) } else { (a, b) };
            if vertical(x) || horizontal(y) {
                return Err(ParseError::malformed(syntax, s));
            }
            Ok(TransformOrigin {
                x: dimension(x)?,
                y: dimension(y)?,
            })
        }
        _ => Err(ParseError::Arity {
            command: syntax.tag().to_owned(),
            expected: 2,
            found: tokens.len(),
        }),
    }
}
