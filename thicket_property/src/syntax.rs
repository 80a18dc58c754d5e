// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value syntax tags.

use core::fmt;
use core::str::FromStr;

use crate::error::RegistryError;

/// The value grammar of a property.
///
/// Tags follow the SVG/CSS content type names; see [`PropertySyntax::tag`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertySyntax {
    /// `<coordinate>`
    Coordinate,
    /// `<color>`
    Color,
    /// `<paint>`: a color, `none`, or a paint-server reference.
    Paint,
    /// `<number>`
    Number,
    /// `<opacity-value>`: a number clamped to `[0, 1]`.
    OpacityValue,
    /// `<shadow-blur>`: a number clamped to `[0, ∞)`.
    ShadowBlur,
    /// `<length>`
    Length,
    /// `<percentage>`
    Percentage,
    /// `<length> | <percentage>`
    LengthPercentage,
    /// `[<length> | <percentage>]{1,2}`
    LengthPercentage12,
    /// `[<length> | <percentage>]{1,4}`
    LengthPercentage14,
    /// `<list-of-points>`
    ListOfPoints,
    /// `<path>`
    Path,
    /// `<filter>`
    Filter,
    /// `<z-index>`
    ZIndex,
    /// `<offset-path>`
    OffsetPath,
    /// `<offset-distance>`
    OffsetDistance,
    /// `<clip-path>`
    ClipPath,
    /// `<transform>`
    Transform,
    /// `<transform-origin>`
    TransformOrigin,
    /// `<text>`
    Text,
    /// `<text-transform>`
    TextTransform,
}

impl PropertySyntax {
    /// Every syntax, in declaration order.
    pub const ALL: [Self; 22] = [
        Self::Coordinate,
        Self::Color,
        Self::Paint,
        Self::Number,
        Self::OpacityValue,
        Self::ShadowBlur,
        Self::Length,
        Self::Percentage,
        Self::LengthPercentage,
        Self::LengthPercentage12,
        Self::LengthPercentage14,
        Self::ListOfPoints,
        Self::Path,
        Self::Filter,
        Self::ZIndex,
        Self::OffsetPath,
        Self::OffsetDistance,
        Self::ClipPath,
        Self::Transform,
        Self::TransformOrigin,
        Self::Text,
        Self::TextTransform,
    ];

    /// Returns the textual tag, e.g. `<color>`.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Coordinate => "<coordinate>",
            Self::Color => "<color>",
            Self::Paint => "<paint>",
            Self::Number => "<number>",
            Self::OpacityValue => "<opacity-value>",
            Self::ShadowBlur => "<shadow-blur>",
            Self::Length => "<length>",
            Self::Percentage => "<percentage>",
            Self::LengthPercentage => "<length> | <percentage>",
            Self::LengthPercentage12 => "[<length> | <percentage>]{1,2}",
            Self::LengthPercentage14 => "[<length> | <percentage>]{1,4}",
            Self::ListOfPoints => "<list-of-points>",
            Self::Path => "<path>",
            Self::Filter => "<filter>",
            Self::ZIndex => "<z-index>",
            Self::OffsetPath => "<offset-path>",
            Self::OffsetDistance => "<offset-distance>",
            Self::ClipPath => "<clip-path>",
            Self::Transform => "<transform>",
            Self::TransformOrigin => "<transform-origin>",
            Self::Text => "<text>",
            Self::TextTransform => "<text-transform>",
        }
    }
}

impl fmt::Display for PropertySyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PropertySyntax {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|syntax| syntax.tag() == trimmed)
            .ok_or_else(|| RegistryError::UnknownSyntax(trimmed.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for syntax in PropertySyntax::ALL {
            assert_eq!(syntax.tag().parse::<PropertySyntax>(), Ok(syntax));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(
            "<angle>".parse::<PropertySyntax>(),
            Err(RegistryError::UnknownSyntax("<angle>".into()))
        );
    }

    #[test]
    fn display_uses_tag() {
        assert_eq!(PropertySyntax::OpacityValue.to_string(), "<opacity-value>");
    }
}
