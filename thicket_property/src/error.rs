// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors reported by the [`PropertyRegistry`](crate::PropertyRegistry).
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// No canonical name or alias matches.
    #[error("unknown property `{0}`")]
    UnknownProperty(String),
    /// The syntax tag is not one of the recognized value syntaxes.
    #[error("unknown value syntax `{0}`")]
    UnknownSyntax(String),
    /// An alias (or canonical name) is already taken by another property.
    #[error("alias `{alias}` collides with property `{existing}`")]
    AliasCollision {
        /// The offending name.
        alias: String,
        /// The property that already owns it.
        existing: String,
    },
    /// The registry ran out of property ids.
    #[error("too many properties registered (max {0})")]
    Exhausted(usize),
}
