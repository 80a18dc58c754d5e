// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `<transform>` grammar.

use kurbo::{Affine, Vec2};
use thicket_property::PropertySyntax;

use crate::context::ResolveCx;
use crate::error::ParseError;
use crate::lexer::{functions, is_separator, split_unit};
use crate::parse::{length_str, number};
use crate::value::RawValue;

const SYNTAX: PropertySyntax = PropertySyntax::Transform;

/// Parses an angle into degrees. Bare numbers are degrees; `rad`, `turn`
/// and `grad` are converted.
pub(crate) fn degrees(s: &str) -> Result<f64, ParseError> {
    let degrees = match split_unit(s) {
        Some((v, "" | "deg")) => v,
        Some((v, "rad")) => v.to_degrees(),
        Some((v, "turn")) => v * 360.0,
        Some((v, "grad")) => v * 0.9,
        _ => return Err(ParseError::malformed(SYNTAX, s)),
    };
    Ok(degrees)
}

fn angle(s: &str) -> Result<f64, ParseError> {
    degrees(s).map(f64::to_radians)
}

fn arity(name: &str, args: &[&str], allowed: &[usize]) -> Result<(), ParseError> {
    if allowed.contains(&args.len()) {
        Ok(())
    } else {
        Err(ParseError::Arity {
            command: name.to_owned(),
            expected: allowed.iter().copied().max().unwrap_or_default(),
            found: args.len(),
        })
    }
}

/// Parses a transform list, composing functions left to right.
///
/// A list of six numbers is taken as matrix coefficients.
pub(crate) fn transform(raw: &RawValue, cx: &ResolveCx) -> Result<Affine, ParseError> {
    let text = match raw {
        RawValue::Str(s) => s.trim(),
        RawValue::List(items) if items.len() == 6 => {
            let mut coeffs = [0.0; 6];
            for (c, item) in coeffs.iter_mut().zip(items) {
                *c = number(item, SYNTAX)?;
            }
            return Ok(Affine::new(coeffs));
        }
        _ => return Err(ParseError::malformed(SYNTAX, raw.to_string())),
    };
    if text.is_empty() || text == "none" {
        return Ok(Affine::IDENTITY);
    }

    let calls = functions(text).ok_or_else(|| ParseError::malformed(SYNTAX, text))?;
    let mut result = Affine::IDENTITY;
    for (name, args) in calls {
        let args: Vec<&str> = args.split(is_separator).filter(|a| !a.is_empty()).collect();
        let len = |i: usize| length_str(args[i], SYNTAX, cx, false);
        let num = |i: usize| number(&RawValue::from(args[i]), SYNTAX);

        let step = match name {
            "matrix" => {
                arity(name, &args, &[6])?;
                let mut coeffs = [0.0; 6];
                for (i, c) in coeffs.iter_mut().enumerate() {
                    *c = num(i)?;
                }
                Affine::new(coeffs)
            }
            "translate" => {
                arity(name, &args, &[1, 2])?;
                let y = if args.len() == 2 { len(1)? } else { 0.0 };
                Affine::translate((len(0)?, y))
            }
            "translateX" => {
                arity(name, &args, &[1])?;
                Affine::translate((len(0)?, 0.0))
            }
            "translateY" => {
                arity(name, &args, &[1])?;
                Affine::translate((0.0, len(0)?))
            }
            "scale" => {
                arity(name, &args, &[1, 2])?;
                let sx = num(0)?;
                let sy = if args.len() == 2 { num(1)? } else { sx };
                Affine::scale_non_uniform(sx, sy)
            }
            "scaleX" => {
                arity(name, &args, &[1])?;
                Affine::scale_non_uniform(num(0)?, 1.0)
            }
            "scaleY" => {
                arity(name, &args, &[1])?;
                Affine::scale_non_uniform(1.0, num(0)?)
            }
            "rotate" => {
                arity(name, &args, &[1, 3])?;
                let rotation = Affine::rotate(angle(args[0])?);
                if args.len() == 3 {
                    let center = Vec2::new(len(1)?, len(2)?);
                    Affine::translate(center) * rotation * Affine::translate(-center)
                } else {
                    rotation
                }
            }
            "skew" => {
                arity(name, &args, &[1, 2])?;
                let ky = if args.len() == 2 { angle(args[1])?.tan() } else { 0.0 };
                Affine::skew(angle(args[0])?.tan(), ky)
            }
            "skewX" => {
                arity(name, &args, &[1])?;
                Affine::skew(angle(args[0])?.tan(), 0.0)
            }
            "skewY" => {
                arity(name, &args, &[1])?;
                Affine::skew(0.0, angle(args[0])?.tan())
            }
            _ => return Err(ParseError::malformed(SYNTAX, name)),
        };
        result *= step;
    }
    Ok(result)
}
