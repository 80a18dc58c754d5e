// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene graph: node storage, topology, style recalculation and derived caches.

use std::sync::{Arc, PoisonError};

use kurbo::{Affine, Point, Rect, Size, Vec2};
use smallvec::SmallVec;
use thicket_geometry::{Aabb, Geometry, Measure, Tangent};
use thicket_property::{Affects, PropertyId, PropertyMetadata, PropertyRegistry, SharedRegistry};
use thicket_style::{
    ComputedStyle, ComputedValue, DeclaredStyle, RawValue, ResolveCx, StyleError,
    TransformOrigin, compute_style,
};

use crate::error::SceneError;
use crate::flags::DirtyFlags;
use crate::id::NodeId;
use crate::shape::{ShapeKind, stroke_halo};

type Chain = SmallVec<[NodeId; 16]>;

/// What a call to [`Scene::recalc`] did.
#[derive(Clone, Debug, Default)]
pub struct RecalcReport {
    /// Nodes whose style was recomputed, root first.
    pub recomputed: Vec<NodeId>,
    /// Per-property problems. None of them stopped the recalculation.
    pub diagnostics: Vec<(NodeId, StyleError)>,
}

impl RecalcReport {
    /// Returns `true` if every style along the chain was already current.
    #[must_use]
    pub fn is_cache_hit(&self) -> bool {
        self.recomputed.is_empty()
    }
}

#[derive(Clone, Debug)]
struct Node {
    kind: ShapeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,

    declared: DeclaredStyle,
    computed: ComputedStyle,
    /// Registry revision seen by the last recalculation.
    style_revision: Option<u64>,
    dirty: DirtyFlags,

    position: Point,
    rotation: f64,
    scale: Vec2,

    /// Geometry origin adopted by the last geometry computation.
    origin: Option<Point>,
    /// Origin-adjusted geometry.
    geometry: Option<Geometry>,
    measure: Measure,
    local_bounds: Option<Aabb>,

    local_transform: Affine,
    world_transform: Affine,
    /// Own geometry united with all descendants, in world space.
    bounds: Option<Aabb>,
    /// Registry revision the aggregate bounds were computed under.
    bounds_revision: Option<u64>,
}

impl Node {
    fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            declared: DeclaredStyle::new(),
            computed: ComputedStyle::new(),
            style_revision: None,
            dirty: DirtyFlags::all(),
            position: Point::ZERO,
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            origin: None,
            geometry: None,
            measure: Measure::default(),
            local_bounds: None,
            local_transform: Affine::IDENTITY,
            world_transform: Affine::IDENTITY,
            bounds: None,
            bounds_revision: None,
        }
    }

    fn style_is_stale(&self, registry: &PropertyRegistry) -> bool {
        self.dirty.contains(DirtyFlags::STYLE) || self.style_revision != Some(registry.revision())
    }

    /// `translate(position) * rotate * scale * (style transform about its pivot)`.
    fn compose_local(&self, registry: &PropertyRegistry) -> Affine {
        let style_transform = match self.computed.get_by_name(registry, "transform") {
            Some(ComputedValue::Transform(transform)) => *transform,
            _ => Affine::IDENTITY,
        };
        let origin = match self.computed.get_by_name(registry, "transformOrigin") {
            Some(ComputedValue::TransformOrigin(origin)) => *origin,
            _ => TransformOrigin::default(),
        };
        let frame = self
            .geometry
            .as_ref()
            .and_then(Geometry::bounds)
            .unwrap_or(Rect::ZERO);
        let pivot = origin.resolve(frame).to_vec2();

        Affine::translate(self.position.to_vec2())
            * Affine::rotate(self.rotation)
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
            * Affine::translate(pivot)
            * style_transform
            * Affine::translate(-pivot)
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// A retained tree of shape nodes.
///
/// Mutations only record declarations and set [`DirtyFlags`]; derived data
/// (computed style, geometry, transforms, bounds) is recomputed on the next
/// read that needs it. Many mutations between two reads cost one
/// recalculation.
///
/// Reads that need fresh data take `&mut self` and return `None` for stale
/// ids. [`Scene::computed_style`] is the one read that returns whatever was
/// last computed without recalculating.
#[derive(Debug)]
pub struct Scene {
    registry: SharedRegistry,
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    viewport: Option<Size>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty scene with its own built-in property registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(PropertyRegistry::with_defaults().into_shared())
    }

    /// Creates an empty scene sharing `registry` with other scenes.
    #[must_use]
    pub fn with_registry(registry: SharedRegistry) -> Self {
        Self {
            registry,
            slots: Vec::new(),
            free_list: Vec::new(),
            viewport: None,
        }
    }

    /// Returns the registry handle.
    #[must_use]
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    // -- Nodes --

    /// Creates a detached node drawing `kind`.
    ///
    /// The node starts with no declarations and every derived cache dirty.
    pub fn create_node(&mut self, kind: ShapeKind) -> NodeId {
        let node = Node::new(kind);
        let id = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.node = Some(node);
            NodeId::new(idx, slot.generation)
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "scenes never approach u32::MAX nodes"
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId::new(idx, 0)
        };
        tracing::trace!(?id, ?kind, "node created");
        id
    }

    /// Destroys `id` and its whole subtree.
    ///
    /// Every id in the subtree becomes stale.
    pub fn destroy(&mut self, id: NodeId) -> Result<(), SceneError> {
        self.check(id)?;
        self.detach(id);
        let mut stack = vec![id];
        let mut count = 0_usize;
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.slot()];
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
            }
            slot.generation = slot.generation.wrapping_add(1);
            self.free_list.push(current.idx);
            count += 1;
        }
        tracing::debug!(?id, count, "subtree destroyed");
        Ok(())
    }

    /// Returns `true` if `id` refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    /// Returns `true` if the scene has no live nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the shape kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<ShapeKind> {
        self.node(id).map(|n| n.kind)
    }

    /// Returns the node's pending invalidations.
    #[must_use]
    pub fn dirty_flags(&self, id: NodeId) -> Option<DirtyFlags> {
        self.node(id).map(|n| n.dirty)
    }

    // -- Topology --

    /// Appends `child` as the last child of `parent`, moving it from any
    /// previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.attach(parent, child, None)
    }

    /// Inserts `child` at `index` among `parent`'s children, moving it from
    /// any previous parent.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), SceneError> {
        self.attach(parent, child, Some(index))
    }

    /// Detaches `child` from `parent`. The child stays alive as a root.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.check(parent)?;
        if self.check(child)?.parent != Some(parent) {
            return Err(SceneError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(())
    }

    /// Moves `child` under `parent`, or makes it a root.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> Result<(), SceneError> {
        match parent {
            Some(parent) => self.attach(parent, child, None),
            None => {
                self.check(child)?;
                self.detach(child);
                Ok(())
            }
        }
    }

    /// Returns the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Returns the children of a node in order; empty for stale ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[][..], |n| n.children.as_slice())
    }

    /// Returns all live nodes without a parent, in slot order.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        self.live_ids()
            .filter(|id| self.parent(*id).is_none())
            .collect()
    }

    fn attach(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: Option<usize>,
    ) -> Result<(), SceneError> {
        self.check(parent)?;
        self.check(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(SceneError::Cycle { parent, child });
        }
        let len = self
            .children(parent)
            .iter()
            .filter(|c| **c != child)
            .count();
        let index = index.unwrap_or(len);
        if index > len {
            return Err(SceneError::ChildIndex { index, len });
        }

        self.detach(child);
        if let Some(node) = self.node_mut(parent) {
            node.children.insert(index, child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        self.mark_subtree(
            child,
            DirtyFlags::STYLE | DirtyFlags::WORLD_TRANSFORM | DirtyFlags::BOUNDS,
        );
        self.mark_bounds_upward(parent);
        tracing::trace!(?parent, ?child, index, "child attached");
        Ok(())
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|c| *c != child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = None;
        }
        self.mark_subtree(
            child,
            DirtyFlags::STYLE | DirtyFlags::WORLD_TRANSFORM | DirtyFlags::BOUNDS,
        );
        self.mark_bounds_upward(parent);
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    // -- Style --

    /// Declares `value` for the property `name` (or an alias).
    ///
    /// Unknown names are accepted here and reported by the next
    /// [`recalc`](Self::recalc).
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<RawValue>,
    ) -> Result<(), SceneError> {
        let registry = Arc::clone(&self.registry);
        let registry = registry.read().unwrap_or_else(PoisonError::into_inner);
        let node = self.check_mut(id)?;
        if node.declared.set(&registry, name, value.into()) {
            self.mark_style(id);
            tracing::trace!(?id, property = name, "attribute set");
        }
        Ok(())
    }

    /// Removes a declaration, returning the removed value.
    pub fn remove_attribute(
        &mut self,
        id: NodeId,
        name: &str,
    ) -> Result<Option<RawValue>, SceneError> {
        let registry = Arc::clone(&self.registry);
        let registry = registry.read().unwrap_or_else(PoisonError::into_inner);
        let node = self.check_mut(id)?;
        let removed = node.declared.remove(&registry, name);
        if removed.is_some() {
            self.mark_style(id);
        }
        Ok(removed)
    }

    /// Returns the declared (raw) value for `name`.
    #[must_use]
    pub fn declared_value(&self, id: NodeId, name: &str) -> Option<RawValue> {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        self.node(id)?.declared.get(&registry, name).cloned()
    }

    /// Returns the last computed style without recalculating.
    ///
    /// This may lag behind declarations made since the last recalculation.
    #[must_use]
    pub fn computed_style(&self, id: NodeId) -> Option<&ComputedStyle> {
        self.node(id).map(|n| &n.computed)
    }

    /// Recalculates if needed, then returns the computed style.
    pub fn style(&mut self, id: NodeId) -> Option<ComputedStyle> {
        self.recalc(id).ok()?;
        self.node(id).map(|n| n.computed.clone())
    }

    /// Brings the computed style of `id` and its ancestors up to date.
    ///
    /// Only nodes that are style-dirty, or that last computed against an
    /// older registry revision, are recomputed; ancestors first. Calling this
    /// twice without an intervening mutation does no work the second time.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn recalc(&mut self, id: NodeId) -> Result<RecalcReport, SceneError> {
        self.check(id)?;
        let registry = Arc::clone(&self.registry);
        let registry = registry.read().unwrap_or_else(PoisonError::into_inner);
        let mut report = RecalcReport::default();
        self.refresh_style(id, &registry, &mut report);
        if !report.is_cache_hit() {
            tracing::debug!(
                recomputed = report.recomputed.len(),
                diagnostics = report.diagnostics.len(),
                "style recalculated"
            );
        }
        Ok(report)
    }

    fn refresh_style(
        &mut self,
        id: NodeId,
        registry: &PropertyRegistry,
        report: &mut RecalcReport,
    ) {
        for current in self.ancestry(id) {
            // Resolving the basis may settle ancestor geometry, which can in
            // turn mark this node dirty.
            let basis = self.percent_basis(current, registry);
            if self
                .node(current)
                .is_some_and(|n| n.style_is_stale(registry))
            {
                self.recompute_style(current, basis, registry, report);
            }
        }
    }

    fn recompute_style(
        &mut self,
        id: NodeId,
        basis: Option<Size>,
        registry: &PropertyRegistry,
        report: &mut RecalcReport,
    ) {
        let parent_style = self
            .parent(id)
            .and_then(|p| self.node(p))
            .map(|p| p.computed.clone());
        let Some(node) = self.node(id) else {
            return;
        };
        let cx = ResolveCx::new()
            .with_viewport(self.viewport)
            .with_optional_basis(basis);
        let outcome = compute_style(
            registry,
            &node.declared,
            parent_style.as_ref(),
            &node.computed,
            &cx,
        );

        for diagnostic in outcome.diagnostics {
            tracing::debug!(?id, %diagnostic, "style diagnostic");
            report.diagnostics.push((id, diagnostic));
        }
        if let Some(node) = self.node_mut(id) {
            node.computed = outcome.style;
            node.style_revision = Some(registry.revision());
            node.dirty.remove(DirtyFlags::STYLE);
        }
        report.recomputed.push(id);

        for property in outcome.changed {
            self.apply_change(id, property, registry);
        }
    }

    /// Invalidates what depends on `property` after its value changed on `id`.
    fn apply_change(&mut self, id: NodeId, property: PropertyId, registry: &PropertyRegistry) {
        let Some(metadata) = registry.get(property) else {
            // Unregistered; everything derived may have read it.
            self.mark_geometry(id);
            self.mark_transform(id);
            return;
        };
        let affects = metadata.affects();
        if affects.contains(Affects::GEOMETRY) {
            self.mark_geometry(id);
        }
        if affects.contains(Affects::TRANSFORM) {
            self.mark_transform(id);
        }
        self.propagate_to_children(id, property, metadata, registry);
    }

    /// Marks children that take `property` from `id` as style-dirty, or
    /// patches independent inherited values into them directly.
    fn propagate_to_children(
        &mut self,
        id: NodeId,
        property: PropertyId,
        metadata: &PropertyMetadata,
        registry: &PropertyRegistry,
    ) {
        let Some(node) = self.node(id) else {
            return;
        };
        let value = node.computed.get(property).cloned();
        let children = node.children.clone();

        for child in children {
            let Some(node) = self.node_mut(child) else {
                continue;
            };
            let declared = node.declared.get(registry, metadata.name());
            if !follows_parent(declared, metadata) {
                continue;
            }
            match &value {
                Some(value)
                    if declared.is_none()
                        && metadata.independent()
                        && !node.dirty.contains(DirtyFlags::STYLE) =>
                {
                    if node.computed.get(property) == Some(value) {
                        continue;
                    }
                    node.computed = node.computed.with_value(property, value.clone());
                    tracing::trace!(?child, property = metadata.name(), "inherited value patched");
                    self.apply_change(child, property, registry);
                }
                _ => self.mark_style(child),
            }
        }
    }

    /// The size `%` resolves against for `id`: the nearest ancestor with
    /// geometry, else the viewport.
    fn percent_basis(&mut self, id: NodeId, registry: &PropertyRegistry) -> Option<Size> {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            self.ensure_geometry(ancestor, registry);
            let node = self.node(ancestor)?;
            if let Some(rect) = node.geometry.as_ref().and_then(Geometry::bounds) {
                return Some(rect.size());
            }
            current = node.parent;
        }
        self.viewport
    }

    /// Sets the viewport used for root percentages and `vw`/`vh`.
    pub fn set_viewport(&mut self, viewport: Option<Size>) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        for slot in &mut self.slots {
            if let Some(node) = &mut slot.node {
                node.dirty |= DirtyFlags::STYLE | DirtyFlags::BOUNDS;
            }
        }
        tracing::debug!(?viewport, "viewport changed");
    }

    /// Returns the viewport.
    #[must_use]
    pub fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    // -- Metadata --

    /// Registers or overrides property metadata.
    ///
    /// Every node recalculates lazily against the new revision.
    pub fn register_metadata(
        &mut self,
        metadata: PropertyMetadata,
    ) -> Result<PropertyId, SceneError> {
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        let name = metadata.name().to_owned();
        let id = registry.register(metadata)?;
        tracing::debug!(property = %name, ?id, "metadata registered");
        Ok(id)
    }

    /// Unregisters property metadata, returning the removed entry.
    ///
    /// Computed values for the property drop out at each node's next
    /// recalculation.
    pub fn unregister_metadata(&mut self, name: &str) -> Result<PropertyMetadata, SceneError> {
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        let metadata = registry.unregister(name)?;
        tracing::debug!(property = name, "metadata unregistered");
        Ok(metadata)
    }

    /// Returns the metadata for a name or alias.
    pub fn metadata(&self, name: &str) -> Result<PropertyMetadata, SceneError> {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        Ok(registry.get_metadata(name)?.clone())
    }

    // -- Transforms --

    /// Sets the local position.
    pub fn set_local_position(&mut self, id: NodeId, position: Point) -> Result<(), SceneError> {
        self.check_mut(id)?.position = position;
        self.mark_transform(id);
        Ok(())
    }

    /// Moves the node by `offset` in its parent's frame.
    pub fn translate(&mut self, id: NodeId, offset: Vec2) -> Result<(), SceneError> {
        self.check_mut(id)?.position += offset;
        self.mark_transform(id);
        Ok(())
    }

    /// Sets the local rotation, in radians.
    pub fn set_local_rotation(&mut self, id: NodeId, radians: f64) -> Result<(), SceneError> {
        self.check_mut(id)?.rotation = radians;
        self.mark_transform(id);
        Ok(())
    }

    /// Sets the local scale.
    pub fn set_local_scale(&mut self, id: NodeId, scale: Vec2) -> Result<(), SceneError> {
        self.check_mut(id)?.scale = scale;
        self.mark_transform(id);
        Ok(())
    }

    /// Returns the local position.
    ///
    /// Shapes follow their geometry: when the geometry's origin moves, the
    /// position moves with it.
    pub fn local_position(&mut self, id: NodeId) -> Option<Point> {
        self.refreshed(id).map(|n| n.position)
    }

    /// Returns the local rotation, in radians.
    #[must_use]
    pub fn local_rotation(&self, id: NodeId) -> Option<f64> {
        self.node(id).map(|n| n.rotation)
    }

    /// Returns the local scale.
    #[must_use]
    pub fn local_scale(&self, id: NodeId) -> Option<Vec2> {
        self.node(id).map(|n| n.scale)
    }

    /// Returns the transform from the node's frame to its parent's.
    pub fn local_transform(&mut self, id: NodeId) -> Option<Affine> {
        self.refreshed(id).map(|n| n.local_transform)
    }

    /// Returns the transform from the node's frame to world space.
    pub fn world_transform(&mut self, id: NodeId) -> Option<Affine> {
        self.refreshed(id).map(|n| n.world_transform)
    }

    // -- Geometry --

    /// Returns the origin-adjusted geometry in the node's frame.
    pub fn geometry(&mut self, id: NodeId) -> Option<&Geometry> {
        self.refreshed(id)?.geometry.as_ref()
    }

    /// Returns the stroke-inclusive bounds in the node's frame.
    pub fn local_bounds(&mut self, id: NodeId) -> Option<Aabb> {
        self.refreshed(id)?.local_bounds
    }

    /// Returns the node's own stroke-inclusive bounds in world space.
    pub fn geometry_bounds(&mut self, id: NodeId) -> Option<Aabb> {
        let node = self.refreshed(id)?;
        node.local_bounds.map(|b| b.transform(node.world_transform))
    }

    /// Returns the world-space bounds of the node and all its descendants.
    pub fn bounds(&mut self, id: NodeId) -> Option<Aabb> {
        let registry = Arc::clone(&self.registry);
        let registry = registry.read().unwrap_or_else(PoisonError::into_inner);
        self.ensure_bounds(id, &registry)
    }

    /// Returns the outline length. Zero for groups.
    pub fn total_length(&mut self, id: NodeId) -> Option<f64> {
        self.refreshed(id).map(|n| n.measure.total_length())
    }

    /// Returns the world-space point at `ratio` of the outline length.
    ///
    /// Ratios outside `[0, 1]` clamp to the nearest endpoint.
    pub fn point_at(&mut self, id: NodeId, ratio: f64) -> Option<Point> {
        let node = self.refreshed(id)?;
        let point = node.measure.point_at(ratio)?;
        Some(node.world_transform * point)
    }

    /// Returns the world-space start tangent as `[second, first]`.
    pub fn start_tangent(&mut self, id: NodeId) -> Option<Tangent> {
        let node = self.refreshed(id)?;
        let [a, b] = node.measure.start_tangent()?;
        Some([node.world_transform * a, node.world_transform * b])
    }

    /// Returns the world-space end tangent as `[second_to_last, last]`.
    pub fn end_tangent(&mut self, id: NodeId) -> Option<Tangent> {
        let node = self.refreshed(id)?;
        let [a, b] = node.measure.end_tangent()?;
        Some([node.world_transform * a, node.world_transform * b])
    }

    // -- Derived data --

    /// Brings style, geometry and transforms of `id` up to date.
    fn refreshed(&mut self, id: NodeId) -> Option<&Node> {
        let registry = Arc::clone(&self.registry);
        {
            let registry = registry.read().unwrap_or_else(PoisonError::into_inner);
            self.refresh(id, &registry);
        }
        self.node(id)
    }

    fn refresh(&mut self, id: NodeId, registry: &PropertyRegistry) {
        let mut report = RecalcReport::default();
        self.refresh_style(id, registry, &mut report);
        for current in self.ancestry(id) {
            self.ensure_geometry(current, registry);
            let parent_world = self
                .parent(current)
                .and_then(|p| self.node(p))
                .map_or(Affine::IDENTITY, |p| p.world_transform);
            let Some(node) = self.node_mut(current) else {
                continue;
            };
            if node.dirty.contains(DirtyFlags::WORLD_TRANSFORM) {
                node.local_transform = node.compose_local(registry);
                node.world_transform = parent_world * node.local_transform;
                node.dirty.remove(DirtyFlags::WORLD_TRANSFORM);
            }
        }
    }

    /// Rebuilds geometry, measurements and local bounds if stale.
    ///
    /// Expects the node's style to be current.
    fn ensure_geometry(&mut self, id: NodeId, registry: &PropertyRegistry) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if !node.dirty.contains(DirtyFlags::GEOMETRY) {
            return;
        }
        node.dirty.remove(DirtyFlags::GEOMETRY);
        let old_size = node
            .geometry
            .as_ref()
            .and_then(Geometry::bounds)
            .map(|r| r.size());

        match node.kind.geometry(&node.computed, registry) {
            Some(geometry) => {
                let origin = geometry.origin();
                node.position += match node.origin {
                    Some(previous) => origin - previous,
                    None => origin.to_vec2(),
                };
                node.origin = Some(origin);
                let local = geometry.translated(-origin.to_vec2());
                let halo = stroke_halo(&local, &node.computed, registry);
                node.measure = Measure::new(&local);
                node.local_bounds = local.stroke_bounds(halo);
                node.geometry = Some(local);
            }
            None => {
                node.measure = Measure::default();
                node.local_bounds = None;
                node.geometry = None;
            }
        }
        tracing::trace!(?id, bounds = ?node.local_bounds, "geometry rebuilt");

        let new_size = node
            .geometry
            .as_ref()
            .and_then(Geometry::bounds)
            .map(|r| r.size());
        if new_size != old_size {
            // Children resolve percentages against this size.
            let children = node.children.clone();
            for child in children {
                self.mark_style(child);
            }
        }
        // The origin shift and the transform pivot both depend on geometry.
        self.mark_transform(id);
    }

    fn ensure_bounds(&mut self, id: NodeId, registry: &PropertyRegistry) -> Option<Aabb> {
        self.refresh(id, registry);
        let node = self.node(id)?;
        // A registry change can restyle descendants without marking anything.
        if !node.dirty.contains(DirtyFlags::BOUNDS)
            && node.bounds_revision == Some(registry.revision())
        {
            return node.bounds;
        }
        let mut bounds = node.local_bounds.map(|b| b.transform(node.world_transform));
        let children = node.children.clone();
        for child in children {
            if let Some(child_bounds) = self.ensure_bounds(child, registry) {
                bounds = Some(match bounds {
                    Some(acc) => acc.union(&child_bounds),
                    None => child_bounds,
                });
            }
        }
        let node = self.node_mut(id)?;
        node.bounds = bounds;
        node.bounds_revision = Some(registry.revision());
        node.dirty.remove(DirtyFlags::BOUNDS);
        bounds
    }

    // -- Invalidation --

    /// Marks `id` for restyling; any restyle may move the aggregate bounds
    /// of its ancestors.
    fn mark_style(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.dirty |= DirtyFlags::STYLE;
        }
        self.mark_bounds_upward(id);
    }

    fn mark_geometry(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.dirty |= DirtyFlags::GEOMETRY;
        }
        self.mark_bounds_upward(id);
    }

    fn mark_transform(&mut self, id: NodeId) {
        self.mark_subtree(id, DirtyFlags::WORLD_TRANSFORM | DirtyFlags::BOUNDS);
        self.mark_bounds_upward(id);
    }

    fn mark_subtree(&mut self, id: NodeId, flags: DirtyFlags) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.node_mut(current) {
                node.dirty |= flags;
                stack.extend(node.children.iter().copied());
            }
        }
    }

    fn mark_bounds_upward(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(id) = current {
            let Some(node) = self.node_mut(id) else {
                break;
            };
            node.dirty |= DirtyFlags::BOUNDS;
            current = node.parent;
        }
    }

    // -- Storage --

    fn node(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.slot())?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(id.slot())?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    fn check(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.node(id).ok_or(SceneError::StaleNode(id))
    }

    fn check_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.node_mut(id).ok_or(SceneError::StaleNode(id))
    }

    fn live_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.node.as_ref()?;
            let idx = u32::try_from(idx).ok()?;
            Some(NodeId::new(idx, slot.generation))
        })
    }

    /// `id` and its ancestors, root first.
    fn ancestry(&self, id: NodeId) -> Chain {
        let mut chain = Chain::new();
        let mut current = Some(id);
        while let Some(id) = current {
            if !self.is_alive(id) {
                break;
            }
            chain.push(id);
            current = self.parent(id);
        }
        chain.reverse();
        chain
    }
}

/// Returns `true` if a child with `declared` takes its value from its parent.
fn follows_parent(declared: Option<&RawValue>, metadata: &PropertyMetadata) -> bool {
    match declared.map(|raw| raw.as_str().map(str::trim)) {
        None => metadata.inherits(),
        Some(Some("inherit")) => true,
        Some(Some("unset")) => metadata.inherits(),
        Some(_) => false,
    }
}
