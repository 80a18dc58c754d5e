// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry error taxonomy.

use thiserror::Error;

/// Errors produced while deriving geometry.
///
/// None of these are fatal: callers degrade the offending shape to its
/// canonical empty value and keep the rest of the scene renderable.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum GeometryError {
    /// A command resolved to a non-finite coordinate.
    #[error("path command `{command}` resolved to a non-finite coordinate")]
    NonFinite {
        /// The (source) command letter that produced the value.
        command: char,
    },
    /// A segment carried the wrong number of arguments for its command.
    #[error("path command `{command}` expects {expected} arguments, found {found}")]
    Arity {
        /// The command letter.
        command: char,
        /// Arguments required by the command.
        expected: usize,
        /// Arguments supplied.
        found: usize,
    },
    /// The command letter is not an SVG path command.
    #[error("unknown path command `{0}`")]
    UnknownCommand(char),
    /// Path data must open with a move-to.
    #[error("path data starts with `{command}` instead of a move-to")]
    MissingMoveTo {
        /// The leading command letter.
        command: char,
    },
}
