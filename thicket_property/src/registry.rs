// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property metadata registry.
//!
//! This module provides [`PropertyRegistry`] for registering and looking up
//! property metadata by canonical name, alias, or [`PropertyId`].

use std::sync::{Arc, RwLock};

use hashbrown::HashMap;

use crate::error::RegistryError;
use crate::id::PropertyId;
use crate::metadata::PropertyMetadata;

/// A registry shared between scene graphs.
///
/// Reads (recalculation) take the read lock; registration takes the write
/// lock and therefore waits for in-flight recalculations to finish.
pub type SharedRegistry = Arc<RwLock<PropertyRegistry>>;

#[derive(Clone, Debug)]
struct Registration {
    metadata: PropertyMetadata,
    /// Position in registration order; the default parse priority.
    order: u32,
}

/// A registry for style property metadata.
///
/// Properties are registered by canonical name; aliases resolve to the same
/// entry. Unregistered slots are tombstoned rather than reused.
///
/// # Example
///
/// ```rust
/// use thicket_property::{PropertyMetadataBuilder, PropertyRegistry, RegistryError};
///
/// let mut registry = PropertyRegistry::new();
/// let path = registry
///     .register(PropertyMetadataBuilder::new("path").alias("d").build())
///     .unwrap();
///
/// assert_eq!(registry.resolve("d"), Some(path));
/// assert_eq!(registry.get_metadata("d").unwrap().name(), "path");
///
/// registry.unregister("path").unwrap();
/// assert_eq!(
///     registry.get_metadata("d").unwrap_err(),
///     RegistryError::UnknownProperty("d".into())
/// );
/// ```
#[derive(Clone, Default)]
pub struct PropertyRegistry {
    properties: Vec<Option<Registration>>,
    by_name: HashMap<String, PropertyId>,
    next_order: u32,
    revision: u64,
}

impl PropertyRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the registry for sharing between scene graphs.
    #[must_use]
    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(RwLock::new(self))
    }

    /// Registers `metadata`, replacing any entry with the same canonical name.
    ///
    /// A replaced entry keeps its [`PropertyId`] and registration order.
    /// Fails with [`RegistryError::AliasCollision`] if the canonical name or
    /// any alias is already owned by a different property.
    pub fn register(&mut self, metadata: PropertyMetadata) -> Result<PropertyId, RegistryError> {
        let existing = self.canonical_id(metadata.name());
        let names = core::iter::once(metadata.name())
            .chain(metadata.aliases().iter().map(String::as_str));
        for name in names {
            if let Some(owner) = self.by_name.get(name).copied()
                && Some(owner) != existing
            {
                return Err(RegistryError::AliasCollision {
                    alias: name.to_owned(),
                    existing: self.name(owner).unwrap_or_default().to_owned(),
                });
            }
        }

        let id = match existing {
            Some(id) => {
                if let Some(old) = self.properties[usize::from(id.index())].take() {
                    for alias in old.metadata.aliases() {
                        self.by_name.remove(alias.as_str());
                    }
                    self.properties[usize::from(id.index())] = Some(Registration {
                        metadata,
                        order: old.order,
                    });
                }
                tracing::debug!(property = %id, "replaced property metadata");
                id
            }
            None => {
                let index = u16::try_from(self.properties.len())
                    .ok()
                    .filter(|i| *i < u16::MAX)
                    .ok_or(RegistryError::Exhausted(usize::from(u16::MAX)))?;
                let id = PropertyId::new(index);
                self.properties.push(Some(Registration {
                    metadata,
                    order: self.next_order,
                }));
                self.next_order += 1;
                id
            }
        };

        if let Some(registration) = &self.properties[usize::from(id.index())] {
            let metadata = &registration.metadata;
            self.by_name.insert(metadata.name().to_owned(), id);
            for alias in metadata.aliases() {
                self.by_name.insert(alias.clone(), id);
            }
        }
        self.revision += 1;
        Ok(id)
    }

    /// Removes the property registered under `name` (canonical or alias).
    ///
    /// Returns the removed metadata. The id is never handed out again.
    pub fn unregister(&mut self, name: &str) -> Result<PropertyMetadata, RegistryError> {
        let id = self
            .resolve(name)
            .ok_or_else(|| RegistryError::UnknownProperty(name.to_owned()))?;
        let registration = self.properties[usize::from(id.index())]
            .take()
            .ok_or_else(|| RegistryError::UnknownProperty(name.to_owned()))?;
        self.by_name.remove(registration.metadata.name());
        for alias in registration.metadata.aliases() {
            self.by_name.remove(alias.as_str());
        }
        self.revision += 1;
        tracing::debug!(property = registration.metadata.name(), "unregistered property");
        Ok(registration.metadata)
    }

    /// Returns the metadata for `name`, resolving aliases.
    pub fn get_metadata(&self, name: &str) -> Result<&PropertyMetadata, RegistryError> {
        self.resolve(name)
            .and_then(|id| self.get(id))
            .ok_or_else(|| RegistryError::UnknownProperty(name.to_owned()))
    }

    /// Resolves a canonical name or alias to its id.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<PropertyId> {
        self.by_name.get(name).copied()
    }

    /// Returns the metadata of a live property.
    #[must_use]
    pub fn get(&self, id: PropertyId) -> Option<&PropertyMetadata> {
        self.properties
            .get(usize::from(id.index()))
            .and_then(Option::as_ref)
            .map(|r| &r.metadata)
    }

    /// Returns `true` if `id` refers to a live property.
    #[must_use]
    pub fn contains(&self, id: PropertyId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the canonical name of a live property.
    #[must_use]
    pub fn name(&self, id: PropertyId) -> Option<&str> {
        self.get(id).map(PropertyMetadata::name)
    }

    /// Returns the effective parse priority of `id` as a sort key.
    ///
    /// The explicit priority wins when declared; otherwise the registration
    /// order is used. Ties are broken by registration order.
    #[must_use]
    pub fn priority(&self, id: PropertyId) -> Option<(i64, u32)> {
        let registration = self.properties.get(usize::from(id.index()))?.as_ref()?;
        let primary = registration
            .metadata
            .parse_priority()
            .map_or(i64::from(registration.order), i64::from);
        Some((primary, registration.order))
    }

    /// Returns whether a live property inherits.
    #[must_use]
    pub fn inherits(&self, id: PropertyId) -> bool {
        self.get(id).is_some_and(PropertyMetadata::inherits)
    }

    /// Returns the number of live properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.iter().filter(|p| p.is_some()).count()
    }

    /// Returns `true` if no properties are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the mutation counter, bumped by every register/unregister.
    #[must_use]
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns an iterator over live properties in id order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &PropertyMetadata)> {
        self.properties.iter().enumerate().filter_map(|(i, r)| {
            let r = r.as_ref()?;
            Some((PropertyId::new(u16::try_from(i).ok()?), &r.metadata))
        })
    }

    /// Returns an iterator over live inherited properties.
    pub fn inherited(&self) -> impl Iterator<Item = PropertyId> + '_ {
        self.iter()
            .filter(|(_, m)| m.inherits())
            .map(|(id, _)| id)
    }

    fn canonical_id(&self, name: &str) -> Option<PropertyId> {
        self.resolve(name)
            .filter(|id| self.name(*id) == Some(name))
    }
}

impl core::fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyRegistry")
            .field("count", &self.len())
            .field("revision", &self.revision)
            .field(
                "properties",
                &self.iter().map(|(_, m)| m.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
