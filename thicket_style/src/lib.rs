// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Style: value parsing and computed-style resolution.
//!
//! Hosts declare loosely typed [`RawValue`]s on nodes. This crate turns them
//! into typed [`ComputedValue`]s using the syntax and flags recorded in a
//! [`thicket_property::PropertyRegistry`].
//!
//! ## Core Concepts
//!
//! - [`parse`] dispatches on [`PropertySyntax`](thicket_property::PropertySyntax)
//!   and resolves relative units (`%`, `em`, `vw`, `vh`) through a
//!   [`ResolveCx`]. A missing basis is an error
//!   ([`ParseError::UnresolvedBasis`]), never a silent zero.
//! - [`DeclaredStyle`] holds what the host wrote, keyed by canonical name.
//! - [`ComputedStyle`] is an immutable, cheaply cloned snapshot.
//! - [`compute_style`] combines declarations, the parent's snapshot and the
//!   registry into a new snapshot, reporting which properties changed and any
//!   per-property diagnostics.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Size;
//! use thicket_property::PropertyRegistry;
//! use thicket_style::{ComputedStyle, DeclaredStyle, ResolveCx, compute_style};
//!
//! let registry = PropertyRegistry::with_defaults();
//! let mut declared = DeclaredStyle::new();
//! declared.set(&registry, "r", "25%".into());
//! declared.set(&registry, "strokeWidth", "0.5em".into());
//!
//! let cx = ResolveCx::new().with_basis(Size::new(200.0, 200.0));
//! let outcome = compute_style(&registry, &declared, None, &ComputedStyle::new(), &cx);
//! assert!(outcome.diagnostics.is_empty());
//! assert_eq!(outcome.style.number(&registry, "r"), Some(50.0));
//! assert_eq!(outcome.style.number(&registry, "lineWidth"), Some(8.0));
//! ```

mod compute;
mod computed;
mod context;
mod declared;
mod error;
mod filter;
mod lexer;
mod parse;
mod path;
mod transform;
mod value;

pub use compute::{FONT_SIZE, StyleOutcome, compute_style, initial};
pub use computed::ComputedStyle;
pub use context::{DEFAULT_FONT_SIZE, ResolveCx};
pub use declared::DeclaredStyle;
pub use error::{ParseError, StyleError};
pub use parse::{parse, parse_property};
pub use value::{ComputedValue, Dimension, FilterOp, Paint, RawValue, TransformOrigin, ZIndex};
