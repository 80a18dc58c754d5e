// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `<filter>` grammar.

use kurbo::Vec2;
use peniko::Color;
use thicket_property::PropertySyntax;

use crate::context::ResolveCx;
use crate::error::ParseError;
use crate::lexer::{functions, scan_number, split_top_level, split_unit};
use crate::parse::{color, length_str};
use crate::transform::degrees;
use crate::value::FilterOp;

const SYNTAX: PropertySyntax = PropertySyntax::Filter;

/// Parses a filter chain. `none` is the empty chain.
pub(crate) fn filter(text: &str, cx: &ResolveCx) -> Result<Vec<FilterOp>, ParseError> {
    let text = text.trim();
    if text.is_empty() || text == "none" {
        return Ok(Vec::new());
    }
    let calls = functions(text).ok_or_else(|| ParseError::malformed(SYNTAX, text))?;
    calls
        .into_iter()
        .map(|(name, args)| filter_op(name, args, cx))
        .collect()
}

fn filter_op(name: &str, args: &str, cx: &ResolveCx) -> Result<FilterOp, ParseError> {
    let op = match name {
        "blur" => FilterOp::Blur(if args.is_empty() {
            0.0
        } else {
            length_str(args, SYNTAX, cx, false)?.max(0.0)
        }),
        "brightness" => FilterOp::Brightness(amount(args)?),
        "contrast" => FilterOp::Contrast(amount(args)?),
        "grayscale" => FilterOp::Grayscale(amount(args)?.min(1.0)),
        "invert" => FilterOp::Invert(amount(args)?.min(1.0)),
        "opacity" => FilterOp::Opacity(amount(args)?.min(1.0)),
        "saturate" => FilterOp::Saturate(amount(args)?),
        "sepia" => FilterOp::Sepia(amount(args)?.min(1.0)),
        "hue-rotate" => FilterOp::HueRotate(if args.is_empty() {
            0.0
        } else {
            degrees(args)?
        }),
        "drop-shadow" => drop_shadow(args, cx)?,
        _ => return Err(ParseError::UnknownFilter(name.to_owned())),
    };
    Ok(op)
}

/// A non-negative number or percentage; omitted means `1`.
fn amount(args: &str) -> Result<f64, ParseError> {
    let value = match split_unit(args) {
        None if args.is_empty() => 1.0,
        Some((v, "")) => v,
        Some((v, "%")) => v / 100.0,
        _ => return Err(ParseError::malformed(SYNTAX, args)),
    };
    if value < 0.0 {
        return Err(ParseError::malformed(SYNTAX, args));
    }
    Ok(value)
}

fn drop_shadow(args: &str, cx: &ResolveCx) -> Result<FilterOp, ParseError> {
    let mut lengths = Vec::with_capacity(3);
    let mut shadow_color = None;
    for token in split_top_level(args, char::is_whitespace) {
        let numeric = scan_number(token).is_some();
        if numeric && (shadow_color.is_none() || lengths.len() < 2) {
            lengths.push(length_str(token, SYNTAX, cx, false)?);
        } else if shadow_color.is_none() {
            shadow_color = Some(color(token, SYNTAX)?);
        } else {
            return Err(ParseError::malformed(SYNTAX, args));
        }
    }
    if !(2..=3).contains(&lengths.len()) {
        return Err(ParseError::Arity {
            command: "drop-shadow".into(),
            expected: 3,
            found: lengths.len(),
        });
    }
    Ok(FilterOp::DropShadow {
        offset: Vec2::new(lengths[0], lengths[1]),
        blur: lengths.get(2).copied().unwrap_or_default().max(0.0),
        color: shadow_color.unwrap_or(Color::BLACK),
    })
}
