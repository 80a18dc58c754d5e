// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declared (author-supplied) style.

use smallvec::SmallVec;
use thicket_property::PropertyRegistry;

use crate::value::RawValue;

/// The raw values a host declared on a node, keyed by property name.
///
/// Names are canonicalized through the registry when it knows them, so
/// `strokeWidth` and `lineWidth` address the same declaration. Unknown names
/// are kept as written and reported when the style is computed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeclaredStyle {
    entries: SmallVec<[(String, RawValue); 8]>,
}

impl DeclaredStyle {
    /// Creates an empty declaration set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `value` for `name`, replacing any earlier declaration.
    ///
    /// Returns `true` if the declared value changed.
    pub fn set(&mut self, registry: &PropertyRegistry, name: &str, value: RawValue) -> bool {
        let name = canonical(registry, name);
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) if *existing == value => false,
            Some((_, existing)) => {
                *existing = value;
                true
            }
            None => {
                self.entries.push((name, value));
                true
            }
        }
    }

    /// Removes the declaration for `name`, returning it.
    pub fn remove(&mut self, registry: &PropertyRegistry, name: &str) -> Option<RawValue> {
        let name = canonical(registry, name);
        let idx = self.entries.iter().position(|(n, _)| *n == name)?;
        Some(self.entries.remove(idx).1)
    }

    /// Returns the declared value for `name`.
    #[must_use]
    pub fn get(&self, registry: &PropertyRegistry, name: &str) -> Option<&RawValue> {
        let name = canonical(registry, name);
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Returns `true` if `name` is declared.
    #[must_use]
    pub fn contains(&self, registry: &PropertyRegistry, name: &str) -> bool {
        self.get(registry, name).is_some()
    }

    /// Returns the declarations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn canonical(registry: &PropertyRegistry, name: &str) -> String {
    registry
        .resolve(name)
        .and_then(|id| registry.name(id))
        .unwrap_or(name)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use thicket_property::PropertyMetadataBuilder;

    use super::*;

    fn registry() -> PropertyRegistry {
        let mut registry = PropertyRegistry::new();
        registry
            .register(
                PropertyMetadataBuilder::new("lineWidth")
                    .alias("strokeWidth")
                    .build(),
            )
            .unwrap();
        registry
    }

    #[test]
    fn aliases_share_a_declaration() {
        let registry = registry();
        let mut declared = DeclaredStyle::new();
        assert!(declared.set(&registry, "strokeWidth", 4.0.into()));
        assert_eq!(
            declared.get(&registry, "lineWidth"),
            Some(&RawValue::Number(4.0))
        );
        assert!(declared.set(&registry, "lineWidth", 5.0.into()));
        assert_eq!(declared.len(), 1);
    }

    #[test]
    fn setting_the_same_value_is_not_a_change() {
        let registry = registry();
        let mut declared = DeclaredStyle::new();
        declared.set(&registry, "lineWidth", 4.0.into());
        assert!(!declared.set(&registry, "lineWidth", 4.0.into()));
    }

    #[test]
    fn unknown_names_are_kept() {
        let registry = registry();
        let mut declared = DeclaredStyle::new();
        declared.set(&registry, "glow", "lots".into());
        assert!(declared.contains(&registry, "glow"));
        assert_eq!(
            declared.remove(&registry, "glow"),
            Some(RawValue::from("lots"))
        );
        assert!(declared.is_empty());
    }
}
