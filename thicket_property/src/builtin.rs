// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The built-in property table for SVG-like shapes.

use crate::metadata::{Affects, LengthBasis, PropertyMetadata, PropertyMetadataBuilder};
use crate::registry::PropertyRegistry;
use crate::syntax::PropertySyntax;

/// Parse priority of transform-related properties; they resolve after
/// everything registered in the default table.
const TRANSFORM_PRIORITY: i32 = 100;

fn length(name: &str, basis: LengthBasis) -> PropertyMetadataBuilder {
    PropertyMetadataBuilder::new(name)
        .syntax(PropertySyntax::LengthPercentage)
        .default_value("0")
        .interpolable(true)
        .percent_of(basis)
        .affects(Affects::GEOMETRY)
}

fn number(name: &str, syntax: PropertySyntax, default: &str) -> PropertyMetadataBuilder {
    PropertyMetadataBuilder::new(name)
        .syntax(syntax)
        .default_value(default)
        .interpolable(true)
        .affects(Affects::PAINT)
}

fn builtin_properties() -> Vec<PropertyMetadata> {
    use LengthBasis::{Diagonal, FontSize, Height, Width};
    use PropertySyntax as S;

    vec![
        // `em` lengths in everything below resolve against this, so it goes first.
        PropertyMetadataBuilder::new("fontSize")
            .syntax(S::LengthPercentage)
            .default_value("16px")
            .inherits(true)
            .interpolable(true)
            .percent_of(FontSize)
            .build(),
        PropertyMetadataBuilder::new("fontFamily")
            .default_value("sans-serif")
            .inherits(true)
            .build(),
        PropertyMetadataBuilder::new("fontWeight")
            .keywords(["normal", "bold", "bolder", "lighter"])
            .default_value("normal")
            .inherits(true)
            .build(),
        PropertyMetadataBuilder::new("visibility")
            .keywords(["visible", "hidden"])
            .default_value("visible")
            .inherits(true)
            .independent(true)
            .affects(Affects::PAINT)
            .build(),
        PropertyMetadataBuilder::new("pointerEvents")
            .keywords([
                "auto",
                "none",
                "visiblepainted",
                "visiblefill",
                "visiblestroke",
                "visible",
                "painted",
                "fill",
                "stroke",
                "all",
            ])
            .default_value("auto")
            .inherits(true)
            .independent(true)
            .build(),
        number("opacity", S::OpacityValue, "1").build(),
        number("fillOpacity", S::OpacityValue, "1")
            .inherits(true)
            .build(),
        number("strokeOpacity", S::OpacityValue, "1")
            .inherits(true)
            .build(),
        PropertyMetadataBuilder::new("fill")
            .syntax(S::Paint)
            .default_value("black")
            .inherits(true)
            .interpolable(true)
            .affects(Affects::PAINT)
            .build(),
        PropertyMetadataBuilder::new("stroke")
            .syntax(S::Paint)
            .default_value("none")
            .inherits(true)
            .interpolable(true)
            // Toggling the stroke toggles the stroke halo in the bounds.
            .affects(Affects::PAINT | Affects::GEOMETRY)
            .build(),
        length("lineWidth", Diagonal)
            .alias("strokeWidth")
            .default_value("1")
            .inherits(true)
            .build(),
        PropertyMetadataBuilder::new("lineCap")
            .keywords(["butt", "round", "square"])
            .default_value("butt")
            .inherits(true)
            .affects(Affects::PAINT)
            .build(),
        PropertyMetadataBuilder::new("lineJoin")
            .keywords(["miter", "round", "bevel"])
            .default_value("miter")
            .inherits(true)
            .affects(Affects::PAINT)
            .build(),
        number("miterLimit", S::Number, "4")
            .inherits(true)
            .build(),
        PropertyMetadataBuilder::new("lineDash")
            .syntax(S::LengthPercentage12)
            .percent_of(Diagonal)
            .inherits(true)
            .interpolable(true)
            .affects(Affects::PAINT)
            .build(),
        PropertyMetadataBuilder::new("shadowColor")
            .syntax(S::Color)
            .default_value("transparent")
            .interpolable(true)
            .affects(Affects::PAINT)
            .build(),
        number("shadowBlur", S::ShadowBlur, "0").build(),
        number("shadowOffsetX", S::Number, "0").build(),
        number("shadowOffsetY", S::Number, "0").build(),
        length("x", Width).syntax(S::Coordinate).build(),
        length("y", Height).syntax(S::Coordinate).build(),
        length("cx", Width).syntax(S::Coordinate).build(),
        length("cy", Height).syntax(S::Coordinate).build(),
        length("r", Diagonal).build(),
        length("rx", Width).build(),
        length("ry", Height).build(),
        length("width", Width).layout_dependent(true).build(),
        length("height", Height).layout_dependent(true).build(),
        length("x1", Width).syntax(S::Coordinate).build(),
        length("y1", Height).syntax(S::Coordinate).build(),
        length("x2", Width).syntax(S::Coordinate).build(),
        length("y2", Height).syntax(S::Coordinate).build(),
        PropertyMetadataBuilder::new("points")
            .syntax(S::ListOfPoints)
            .interpolable(true)
            .affects(Affects::GEOMETRY)
            .build(),
        PropertyMetadataBuilder::new("path")
            .alias("d")
            .syntax(S::Path)
            .interpolable(true)
            .affects(Affects::GEOMETRY)
            .build(),
        PropertyMetadataBuilder::new("transform")
            .syntax(S::Transform)
            .default_value("none")
            .interpolable(true)
            .parse_priority(TRANSFORM_PRIORITY)
            .affects(Affects::TRANSFORM)
            .build(),
        PropertyMetadataBuilder::new("transformOrigin")
            .syntax(S::TransformOrigin)
            .default_value("left top")
            .parse_priority(TRANSFORM_PRIORITY)
            .affects(Affects::TRANSFORM)
            .build(),
        PropertyMetadataBuilder::new("zIndex")
            .syntax(S::ZIndex)
            .default_value("auto")
            .interpolable(true)
            .independent(true)
            .build(),
        PropertyMetadataBuilder::new("filter")
            .syntax(S::Filter)
            .default_value("none")
            .independent(true)
            .affects(Affects::PAINT)
            .build(),
        PropertyMetadataBuilder::new("clipPath")
            .syntax(S::ClipPath)
            .default_value("none")
            .affects(Affects::PAINT)
            .build(),
        PropertyMetadataBuilder::new("offsetPath")
            .syntax(S::OffsetPath)
            .default_value("none")
            .affects(Affects::TRANSFORM)
            .build(),
        PropertyMetadataBuilder::new("offsetDistance")
            .syntax(S::OffsetDistance)
            .default_value("0")
            .interpolable(true)
            .affects(Affects::TRANSFORM)
            .build(),
        PropertyMetadataBuilder::new("text")
            .syntax(S::Text)
            .default_value("")
            .affects(Affects::GEOMETRY)
            .build(),
        PropertyMetadataBuilder::new("textTransform")
            .syntax(S::TextTransform)
            .default_value("none")
            .inherits(true)
            .affects(Affects::GEOMETRY)
            .build(),
        PropertyMetadataBuilder::new("textAlign")
            .keywords(["start", "center", "end", "left", "right"])
            .default_value("start")
            .inherits(true)
            .affects(Affects::GEOMETRY)
            .build(),
        PropertyMetadataBuilder::new("padding")
            .syntax(S::LengthPercentage14)
            .default_value("0")
            .layout_dependent(true)
            .affects(Affects::GEOMETRY)
            .build(),
    ]
}

impl PropertyRegistry {
    /// Creates a registry populated with the built-in property table.
    ///
    /// Hosts may register additional properties or override built-in ones
    /// afterwards.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for metadata in builtin_properties() {
            if let Err(err) = registry.register(metadata) {
                tracing::warn!(%err, "skipping built-in property");
            }
        }
        registry
    }
}
