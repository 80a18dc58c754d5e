// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thicket_property::PropertySyntax;
use thiserror::Error;

/// Errors produced while parsing a raw value against a syntax.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The raw value does not match the syntax's grammar.
    #[error("malformed {syntax} value `{value}`")]
    Malformed {
        /// The syntax being parsed.
        syntax: PropertySyntax,
        /// The offending input, as written.
        value: String,
    },
    /// A path command or transform function carried the wrong number of arguments.
    #[error("`{command}` expects {expected} arguments, found {found}")]
    Arity {
        /// The command letter or function name.
        command: String,
        /// Arguments required.
        expected: usize,
        /// Arguments supplied.
        found: usize,
    },
    /// A keyword-only property was given a word outside its keyword set.
    #[error("`{0}` is not a valid keyword")]
    UnknownKeyword(String),
    /// A filter chain names an unknown filter function.
    #[error("unknown filter function `{0}`")]
    UnknownFilter(String),
    /// Path data contains a letter that is not a path command.
    #[error("unknown path command `{0}`")]
    UnknownCommand(char),
    /// The value is empty where the syntax requires content.
    #[error("empty {0} value")]
    Empty(PropertySyntax),
    /// A relative unit was used with no basis to resolve it against.
    #[error("`{0}` needs a resolution basis")]
    UnresolvedBasis(String),
}

impl ParseError {
    pub(crate) fn malformed(syntax: PropertySyntax, value: impl Into<String>) -> Self {
        Self::Malformed {
            syntax,
            value: value.into(),
        }
    }

    /// Returns `true` if the value was well-formed but could not be resolved yet.
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::UnresolvedBasis(_))
    }
}

/// A per-property diagnostic from a style computation.
///
/// None of these abort the computation; the affected property keeps a
/// fallback value.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum StyleError {
    /// The declared name has no registered metadata.
    #[error("unknown property `{0}`")]
    UnknownProperty(String),
    /// The declared value failed to parse.
    #[error("invalid value for `{property}`")]
    Parse {
        /// Canonical property name.
        property: String,
        /// The underlying parse failure.
        #[source]
        source: ParseError,
    },
}

impl StyleError {
    /// Returns the property name the diagnostic refers to.
    #[must_use]
    pub fn property(&self) -> &str {
        match self {
            Self::UnknownProperty(name) | Self::Parse { property: name, .. } => name,
        }
    }
}
