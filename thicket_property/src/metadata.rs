// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property metadata definitions.
//!
//! This module provides [`PropertyMetadata`] for storing property configuration
//! and [`PropertyMetadataBuilder`] for ergonomic construction.

use crate::syntax::PropertySyntax;

bitflags::bitflags! {
    /// Derived data invalidated when a property's computed value changes.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Affects: u8 {
        /// Shape geometry (bounds, length, tangents) must be recomputed.
        const GEOMETRY  = 0b0000_0001;
        /// The local transform must be recomposed.
        const TRANSFORM = 0b0000_0010;
        /// Only painting changes; no geometric derivation is affected.
        const PAINT     = 0b0000_0100;
    }
}

/// What a percentage of this property is a percentage of.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LengthBasis {
    /// The basis width.
    #[default]
    Width,
    /// The basis height.
    Height,
    /// The normalized diagonal, `sqrt((w² + h²) / 2)`.
    Diagonal,
    /// The parent's computed font size.
    FontSize,
}

/// Metadata for a style property.
///
/// Immutable once registered; re-registering the same name replaces the
/// entry as a whole.
///
/// # Example
///
/// ```rust
/// use thicket_property::{PropertyMetadataBuilder, PropertySyntax};
///
/// let metadata = PropertyMetadataBuilder::new("fill")
///     .syntax(PropertySyntax::Paint)
///     .default_value("black")
///     .inherits(true)
///     .build();
///
/// assert_eq!(metadata.name(), "fill");
/// assert_eq!(metadata.default_value(), Some("black"));
/// assert!(metadata.inherits());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyMetadata {
    name: String,
    syntax: Option<PropertySyntax>,
    keywords: Vec<String>,
    aliases: Vec<String>,
    default_value: Option<String>,
    inherits: bool,
    interpolable: bool,
    independent: bool,
    layout_dependent: bool,
    parse_priority: Option<i32>,
    affects: Affects,
    percent_basis: LengthBasis,
}

impl PropertyMetadata {
    /// Returns the canonical name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value syntax, if the property has one.
    ///
    /// Properties without a syntax accept their keywords or plain text.
    #[must_use]
    #[inline]
    pub fn syntax(&self) -> Option<PropertySyntax> {
        self.syntax
    }

    /// Returns the valid keyword values.
    #[must_use]
    #[inline]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Returns `true` if `value` is one of the property's keywords.
    #[must_use]
    pub fn is_keyword(&self, value: &str) -> bool {
        self.keywords.iter().any(|k| k == value)
    }

    /// Returns the alias names that resolve to this property.
    #[must_use]
    #[inline]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns the textual default value.
    #[must_use]
    #[inline]
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Returns whether an unset value is taken from the parent.
    #[must_use]
    #[inline]
    pub fn inherits(&self) -> bool {
        self.inherits
    }

    /// Returns whether the property can be animated smoothly.
    #[must_use]
    #[inline]
    pub fn interpolable(&self) -> bool {
        self.interpolable
    }

    /// Returns whether an inherited change can be applied to children directly
    /// instead of forcing them to recalculate.
    #[must_use]
    #[inline]
    pub fn independent(&self) -> bool {
        self.independent
    }

    /// Returns whether the resolved value depends on layout.
    #[must_use]
    #[inline]
    pub fn layout_dependent(&self) -> bool {
        self.layout_dependent
    }

    /// Returns the explicit parse priority, if one was declared.
    ///
    /// Properties without one are ordered by registration order.
    #[must_use]
    #[inline]
    pub fn parse_priority(&self) -> Option<i32> {
        self.parse_priority
    }

    /// Returns the derived data invalidated by changes to this property.
    #[must_use]
    #[inline]
    pub fn affects(&self) -> Affects {
        self.affects
    }

    /// Returns whether a change invalidates shape geometry.
    #[must_use]
    #[inline]
    pub fn affects_geometry(&self) -> bool {
        self.affects.contains(Affects::GEOMETRY)
    }

    /// Returns what percentages of this property resolve against.
    #[must_use]
    #[inline]
    pub fn percent_basis(&self) -> LengthBasis {
        self.percent_basis
    }
}

/// Builder for [`PropertyMetadata`].
///
/// # Example
///
/// ```rust
/// use thicket_property::{Affects, LengthBasis, PropertyMetadataBuilder, PropertySyntax};
///
/// let metadata = PropertyMetadataBuilder::new("height")
///     .syntax(PropertySyntax::LengthPercentage)
///     .default_value("0")
///     .percent_of(LengthBasis::Height)
///     .affects(Affects::GEOMETRY)
///     .layout_dependent(true)
///     .build();
///
/// assert!(metadata.affects_geometry());
/// ```
#[derive(Clone, Debug)]
pub struct PropertyMetadataBuilder {
    metadata: PropertyMetadata,
}

impl PropertyMetadataBuilder {
    /// Creates a new builder for the given canonical name.
    ///
    /// All flags default to `false`, with no syntax, default value,
    /// keywords or aliases.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            metadata: PropertyMetadata {
                name: name.into(),
                syntax: None,
                keywords: Vec::new(),
                aliases: Vec::new(),
                default_value: None,
                inherits: false,
                interpolable: false,
                independent: false,
                layout_dependent: false,
                parse_priority: None,
                affects: Affects::empty(),
                percent_basis: LengthBasis::Width,
            },
        }
    }

    /// Sets the value syntax.
    #[must_use]
    pub fn syntax(mut self, syntax: PropertySyntax) -> Self {
        self.metadata.syntax = Some(syntax);
        self
    }

    /// Adds keyword values.
    #[must_use]
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata
            .keywords
            .extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Adds an alias name.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.metadata.aliases.push(alias.into());
        self
    }

    /// Sets the textual default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.metadata.default_value = Some(value.into());
        self
    }

    /// Sets whether the property inherits from the parent.
    #[must_use]
    pub fn inherits(mut self, inherits: bool) -> Self {
        self.metadata.inherits = inherits;
        self
    }

    /// Sets whether the property is interpolable.
    #[must_use]
    pub fn interpolable(mut self, interpolable: bool) -> Self {
        self.metadata.interpolable = interpolable;
        self
    }

    /// Sets whether the property is independent.
    #[must_use]
    pub fn independent(mut self, independent: bool) -> Self {
        self.metadata.independent = independent;
        self
    }

    /// Sets whether the property is layout-dependent.
    #[must_use]
    pub fn layout_dependent(mut self, layout_dependent: bool) -> Self {
        self.metadata.layout_dependent = layout_dependent;
        self
    }

    /// Sets an explicit parse priority. Lower values resolve first.
    #[must_use]
    pub fn parse_priority(mut self, priority: i32) -> Self {
        self.metadata.parse_priority = Some(priority);
        self
    }

    /// Sets the derived data invalidated by changes.
    #[must_use]
    pub fn affects(mut self, affects: Affects) -> Self {
        self.metadata.affects = affects;
        self
    }

    /// Sets what percentages resolve against.
    #[must_use]
    pub fn percent_of(mut self, basis: LengthBasis) -> Self {
        self.metadata.percent_basis = basis;
        self
    }

    /// Builds the [`PropertyMetadata`].
    #[must_use]
    pub fn build(self) -> PropertyMetadata {
        self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_defaults() {
        let metadata = PropertyMetadataBuilder::new("x").build();
        assert_eq!(metadata.name(), "x");
        assert_eq!(metadata.syntax(), None);
        assert_eq!(metadata.default_value(), None);
        assert!(!metadata.inherits());
        assert!(!metadata.interpolable());
        assert!(!metadata.independent());
        assert!(!metadata.layout_dependent());
        assert_eq!(metadata.parse_priority(), None);
        assert!(metadata.affects().is_empty());
        assert_eq!(metadata.percent_basis(), LengthBasis::Width);
    }

    #[test]
    fn metadata_builder() {
        let metadata = PropertyMetadataBuilder::new("lineCap")
            .keywords(["butt", "round", "square"])
            .default_value("butt")
            .inherits(true)
            .independent(true)
            .parse_priority(-1)
            .affects(Affects::PAINT | Affects::GEOMETRY)
            .build();

        assert!(metadata.is_keyword("round"));
        assert!(!metadata.is_keyword("miter"));
        assert_eq!(metadata.keywords().len(), 3);
        assert!(metadata.independent());
        assert_eq!(metadata.parse_priority(), Some(-1));
        assert!(metadata.affects_geometry());
        assert!(metadata.affects().contains(Affects::PAINT));
    }

    #[test]
    fn metadata_aliases() {
        let metadata = PropertyMetadataBuilder::new("path").alias("d").build();
        assert_eq!(metadata.aliases(), &["d".to_owned()]);
    }
}
