// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path data and point list grammars.

use kurbo::{Point, Vec2};
use thicket_geometry::{PathData, PathSegment, normalize_path};
use thicket_property::PropertySyntax;

use crate::error::ParseError;
use crate::lexer::{is_separator, scan_number};
use crate::parse::number;
use crate::value::RawValue;

/// Parses `<path>`: SVG path text or a list of `[command, args...]` lists.
///
/// Malformed input, including data that draws before its first move-to, is a
/// [`ParseError`]; well-formed input whose coordinates are not finite
/// normalizes to the empty path.
pub(crate) fn path(raw: &RawValue) -> Result<PathData, ParseError> {
    let segments = match raw {
        RawValue::Str(s) if matches!(s.trim(), "" | "none") => return Ok(PathData::empty()),
        RawValue::Str(s) => segments_from_text(s)?,
        RawValue::List(items) => items
            .iter()
            .map(segment_from_list)
            .collect::<Result<Vec<_>, _>>()?,
        RawValue::Number(_) => {
            return Err(ParseError::malformed(PropertySyntax::Path, raw.to_string()));
        }
    };
    if let Some(first) = segments.first()
        && !first.command.eq_ignore_ascii_case(&'m')
    {
        return Err(ParseError::malformed(PropertySyntax::Path, raw.to_string()));
    }
    Ok(normalize_path(&segments, Vec2::ZERO))
}

fn checked_segment(command: char, args: &[f64]) -> Result<PathSegment, ParseError> {
    let expected = PathSegment::arity(command).ok_or(ParseError::UnknownCommand(command))?;
    if args.len() != expected {
        return Err(ParseError::Arity {
            command: command.to_string(),
            expected,
            found: args.len(),
        });
    }
    Ok(PathSegment::new(command, args))
}

fn segment_from_list(item: &RawValue) -> Result<PathSegment, ParseError> {
    let malformed = || ParseError::malformed(PropertySyntax::Path, item.to_string());
    let (head, args) = match item {
        RawValue::List(parts) => parts.split_first().ok_or_else(malformed)?,
        // A bare "Z" item.
        RawValue::Str(_) => (item, &[][..]),
        RawValue::Number(_) => return Err(malformed()),
    };
    let mut letters = head.as_str().ok_or_else(malformed)?.trim().chars();
    let (Some(command), None) = (letters.next(), letters.next()) else {
        return Err(malformed());
    };
    let args = args
        .iter()
        .map(|a| a.as_number().ok_or_else(malformed))
        .collect::<Result<Vec<_>, _>>()?;
    checked_segment(command, &args)
}

/// Tokenizes SVG path data, expanding implicit command repeats.
fn segments_from_text(text: &str) -> Result<Vec<PathSegment>, ParseError> {
    let mut segments = Vec::new();
    let mut rest = text.trim_start_matches(is_separator);

    while let Some(letter) = rest.chars().next() {
        if !letter.is_ascii_alphabetic() {
            return Err(ParseError::malformed(PropertySyntax::Path, text));
        }
        let arity = PathSegment::arity(letter).ok_or(ParseError::UnknownCommand(letter))?;
        rest = rest[1..].trim_start_matches(is_separator);
        if arity == 0 {
            segments.push(PathSegment::new(letter, &[]));
            continue;
        }

        let mut command = letter;
        let mut groups = 0;
        loop {
            let mut args = Vec::with_capacity(arity);
            while args.len() < arity {
                let is_flag = command.eq_ignore_ascii_case(&'a') && matches!(args.len(), 3 | 4);
                let scanned = if is_flag {
                    match rest.as_bytes().first() {
                        Some(b'0') => Some((0.0, 1)),
                        Some(b'1') => Some((1.0, 1)),
                        _ => None,
                    }
                } else {
                    scan_number(rest)
                };
                let Some((value, len)) = scanned else { break };
                args.push(value);
                rest = rest[len..].trim_start_matches(is_separator);
            }
            if args.is_empty() && groups > 0 {
                break;
            }
            segments.push(checked_segment(command, &args)?);
            groups += 1;
            // Extra coordinate pairs after a move-to are line-tos.
            command = match command {
                'M' => 'L',
                'm' => 'l',
                c => c,
            };
            if rest.is_empty() {
                break;
            }
        }
    }
    Ok(segments)
}

/// Parses `<list-of-points>`: `[[x, y], ...]` or `"x,y x,y"`.
pub(crate) fn points(raw: &RawValue) -> Result<Vec<Point>, ParseError> {
    let syntax = PropertySyntax::ListOfPoints;
    let points = match raw {
        RawValue::List(items) => items
            .iter()
            .map(|item| match item {
                RawValue::List(pair) if pair.len() == 2 => {
                    Ok(Point::new(number(&pair[0], syntax)?, number(&pair[1], syntax)?))
                }
                _ => Err(ParseError::malformed(syntax, item.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?,
        RawValue::Str(s) => {
            let coords = s
                .split(is_separator)
                .filter(|t| !t.is_empty())
                .map(|t| number(&RawValue::from(t), syntax))
                .collect::<Result<Vec<_>, _>>()?;
            if coords.len() % 2 != 0 {
                return Err(ParseError::malformed(syntax, s.as_str()));
            }
            coords
                .chunks_exact(2)
                .map(|c| Point::new(c[0], c[1]))
                .collect()
        }
        RawValue::Number(_) => return Err(ParseError::malformed(syntax, raw.to_string())),
    };
    if points.is_empty() {
        return Err(ParseError::Empty(syntax));
    }
    Ok(points)
}
