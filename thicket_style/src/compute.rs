// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Computing a node's style from its declarations and its parent.

use smallvec::SmallVec;
use thicket_property::{PropertyId, PropertyMetadata, PropertyRegistry};

use crate::computed::ComputedStyle;
use crate::context::{DEFAULT_FONT_SIZE, ResolveCx};
use crate::declared::DeclaredStyle;
use crate::error::StyleError;
use crate::parse::parse_property;
use crate::value::{ComputedValue, RawValue};

/// Name of the property `em` lengths resolve against.
pub const FONT_SIZE: &str = "fontSize";

/// The result of [`compute_style`].
#[derive(Clone, Debug)]
pub struct StyleOutcome {
    /// The new snapshot; the previous one, shared, if nothing changed.
    pub style: ComputedStyle,
    /// Properties whose value differs from the previous snapshot, in id order.
    pub changed: SmallVec<[PropertyId; 8]>,
    /// Per-property problems; each affected property fell back.
    pub diagnostics: Vec<StyleError>,
}

impl StyleOutcome {
    /// Returns `true` if no value changed.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.changed.is_empty()
    }
}

#[derive(Clone, Copy)]
enum Source<'a> {
    Declared(&'a RawValue),
    Inherited,
}

/// Computes a style snapshot.
///
/// The candidates are the declared properties plus every inherited property
/// the node does not declare. They resolve in ascending parse priority, so a
/// later property sees the `em` basis set by the font size. A value that
/// fails to parse falls back to the property default and is reported in
/// [`StyleOutcome::diagnostics`]; a value missing a resolution basis is kept
/// as [`ComputedValue::Pending`].
///
/// `inherit`, `initial` and `unset` are honored for every property.
///
/// # Example
///
/// ```rust
/// use thicket_property::PropertyRegistry;
/// use thicket_style::{ComputedStyle, DeclaredStyle, ResolveCx, compute_style};
///
/// let registry = PropertyRegistry::with_defaults();
/// let mut parent_declared = DeclaredStyle::new();
/// parent_declared.set(&registry, "lineWidth", 4.0.into());
/// let parent = compute_style(
///     &registry,
///     &parent_declared,
///     None,
///     &ComputedStyle::new(),
///     &ResolveCx::new(),
/// );
///
/// let child = compute_style(
///     &registry,
///     &DeclaredStyle::new(),
///     Some(&parent.style),
///     &ComputedStyle::new(),
///     &ResolveCx::new(),
/// );
/// assert_eq!(child.style.number(&registry, "strokeWidth"), Some(4.0));
/// ```
pub fn compute_style(
    registry: &PropertyRegistry,
    declared: &DeclaredStyle,
    parent: Option<&ComputedStyle>,
    previous: &ComputedStyle,
    cx: &ResolveCx,
) -> StyleOutcome {
    let mut diagnostics = Vec::new();

    // 1. Candidates: declared, then inherited and not declared.
    let mut candidates: Vec<(PropertyId, Source<'_>)> = Vec::with_capacity(declared.len() + 16);
    for (name, raw) in declared.iter() {
        match registry.resolve(name) {
            Some(id) => match candidates.iter_mut().find(|(c, _)| *c == id) {
                Some(existing) => existing.1 = Source::Declared(raw),
                None => candidates.push((id, Source::Declared(raw))),
            },
            None => {
                tracing::debug!(property = name, "skipping unknown property");
                diagnostics.push(StyleError::UnknownProperty(name.to_owned()));
            }
        }
    }
    for id in registry.inherited() {
        if !candidates.iter().any(|(c, _)| *c == id) {
            candidates.push((id, Source::Inherited));
        }
    }

    // 2. Lower priority resolves first.
    candidates.sort_by_key(|(id, _)| registry.priority(*id));

    // 3. Resolve.
    let parent_font_size = parent
        .and_then(|p| p.number(registry, FONT_SIZE))
        .unwrap_or(DEFAULT_FONT_SIZE);
    let mut cx = cx.with_parent_font_size(parent_font_size);
    let mut entries = Vec::with_capacity(candidates.len());
    for (id, source) in candidates {
        let Some(metadata) = registry.get(id) else {
            continue;
        };
        let inherited = || parent.and_then(|p| p.get(id)).cloned();
        let value = match source {
            Source::Inherited => inherited().or_else(|| initial(metadata, &cx)),
            Source::Declared(raw) => match raw.as_str().map(str::trim) {
                Some("inherit") => inherited().or_else(|| initial(metadata, &cx)),
                Some("initial") => initial(metadata, &cx),
                Some("unset") if metadata.inherits() => {
                    inherited().or_else(|| initial(metadata, &cx))
                }
                Some("unset") => initial(metadata, &cx),
                _ => match parse_property(raw, metadata, &cx) {
                    Ok(value) => Some(value),
                    Err(err) => {
                        tracing::debug!(
                            property = metadata.name(),
                            %raw,
                            %err,
                            "declared value rejected"
                        );
                        let fallback = if err.is_unresolved() {
                            Some(ComputedValue::Pending(raw.clone()))
                        } else {
                            initial(metadata, &cx)
                        };
                        diagnostics.push(StyleError::Parse {
                            property: metadata.name().to_owned(),
                            source: err,
                        });
                        fallback
                    }
                },
            },
        };
        let Some(value) = value else { continue };
        if metadata.name() == FONT_SIZE
            && let Some(size) = value.as_number()
        {
            cx = cx.with_font_size(size);
        }
        entries.push((id, value));
    }

    // 4. Compare with the previous snapshot.
    let next = ComputedStyle::from_entries(entries);
    let mut changed: SmallVec<[PropertyId; 8]> = next
        .iter()
        .filter(|(id, value)| previous.get(*id) != Some(*value))
        .map(|(id, _)| id)
        .collect();
    changed.extend(
        previous
            .iter()
            .filter(|(id, _)| !next.contains(*id))
            .map(|(id, _)| id),
    );
    changed.sort_unstable();

    let style = if changed.is_empty() {
        previous.clone()
    } else {
        next
    };
    StyleOutcome {
        style,
        changed,
        diagnostics,
    }
}

/// Resolves the property's default value.
///
/// Returns `None` if the property has no default, or its default does not
/// parse (a registration error, logged once per resolution).
pub fn initial(metadata: &PropertyMetadata, cx: &ResolveCx) -> Option<ComputedValue> {
    let text = metadata.default_value()?;
    let raw = RawValue::from(text);
    match parse_property(&raw, metadata, cx) {
        Ok(value) => Some(value),
        Err(err) if err.is_unresolved() => Some(ComputedValue::Pending(raw)),
        Err(err) => {
            tracing::warn!(property = metadata.name(), %err, "default value does not parse");
            None
        }
    }
}
