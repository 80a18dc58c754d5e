// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests driving a [`Scene`] through edits and reads.

use std::sync::PoisonError;

use kurbo::{Point, Size, Vec2};
use thicket_geometry::{Aabb, Geometry};
use thicket_property::{
    Affects, PropertyMetadataBuilder, PropertyRegistry, PropertySyntax, RegistryError,
};
use thicket_scene::{DirtyFlags, NodeId, Scene, SceneError, ShapeKind};
use thicket_style::{ComputedValue, RawValue, StyleError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A staircase: sixteen points stepping 50 right, then 50 down.
fn staircase() -> Vec<Point> {
    (0..16)
        .map(|i| {
            let step = f64::from(i / 2);
            let x = 50.0 + 50.0 * f64::from((i + 1) / 2);
            Point::new(x, 50.0 + 50.0 * step)
        })
        .collect()
}

fn points_value(points: &[Point]) -> RawValue {
    RawValue::list(points.iter().map(|p| [p.x, p.y]))
}

fn assert_near(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn assert_aabb(actual: Aabb, center: (f64, f64), half: (f64, f64)) {
    assert_near(actual.center.x, center.0);
    assert_near(actual.center.y, center.1);
    assert_near(actual.half_extents.x, half.0);
    assert_near(actual.half_extents.y, half.1);
}

fn keyword(scene: &Scene, id: NodeId, name: &str) -> Option<String> {
    let registry = scene
        .registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    scene
        .computed_style(id)?
        .get_by_name(&registry, name)?
        .as_str()
        .map(str::to_owned)
}

#[test]
fn staircase_fixture() {
    let points = staircase();
    assert_eq!(points.len(), 16);
    assert_eq!(points[0], Point::new(50.0, 50.0));
    assert_eq!(points[1], Point::new(100.0, 50.0));
    assert_eq!(points[2], Point::new(100.0, 100.0));
    assert_eq!(points[15], Point::new(450.0, 400.0));
}

#[test]
fn polyline_follows_its_points() {
    init_tracing();
    let mut scene = Scene::new();
    let line = scene.create_node(ShapeKind::Polyline);
    let points = staircase();
    scene.set_attribute(line, "points", points_value(&points)).unwrap();
    scene.set_attribute(line, "lineWidth", 10.0).unwrap();

    assert_eq!(scene.local_position(line), Some(Point::new(50.0, 50.0)));
    assert_near(scene.total_length(line).unwrap(), 750.0);
    assert_aabb(
        scene.geometry_bounds(line).unwrap(),
        (250.0, 225.0),
        (210.0, 185.0),
    );
    assert_eq!(scene.point_at(line, 0.0), Some(Point::new(50.0, 50.0)));
    assert_eq!(scene.point_at(line, 1.0), Some(Point::new(450.0, 400.0)));

    // A wider stroke grows the halo but not the length.
    scene.set_attribute(line, "strokeWidth", 20.0).unwrap();
    assert_aabb(
        scene.geometry_bounds(line).unwrap(),
        (250.0, 225.0),
        (220.0, 195.0),
    );
    assert_near(scene.total_length(line).unwrap(), 750.0);

    // Moving the first point moves the node with it.
    let mut moved = points.clone();
    moved[0] = Point::ZERO;
    scene.set_attribute(line, "points", points_value(&moved)).unwrap();
    assert_eq!(scene.local_position(line), Some(Point::ZERO));
    assert_near(scene.total_length(line).unwrap(), 700.0 + 12500_f64.sqrt());
    assert_aabb(
        scene.geometry_bounds(line).unwrap(),
        (225.0, 200.0),
        (245.0, 220.0),
    );
    assert_eq!(scene.point_at(line, 0.0), Some(Point::ZERO));

    // An explicit translation survives later geometry edits.
    scene.translate(line, Vec2::new(100.0, 0.0)).unwrap();
    scene.set_attribute(line, "points", points_value(&points)).unwrap();
    assert_eq!(scene.local_position(line), Some(Point::new(150.0, 50.0)));
    assert_aabb(
        scene.geometry_bounds(line).unwrap(),
        (350.0, 225.0),
        (220.0, 195.0),
    );
    assert_eq!(scene.point_at(line, 0.0), Some(Point::new(150.0, 50.0)));
}

#[test]
fn length_is_translation_invariant() {
    init_tracing();
    let mut scene = Scene::new();
    let line = scene.create_node(ShapeKind::Polyline);
    scene
        .set_attribute(line, "points", points_value(&staircase()))
        .unwrap();
    let before = scene.total_length(line).unwrap();

    scene.translate(line, Vec2::new(-30.0, 12.5)).unwrap();
    scene.set_local_rotation(line, 0.7).unwrap();
    assert_near(scene.total_length(line).unwrap(), before);
}

#[test]
fn point_at_clamps_out_of_range_ratios() {
    init_tracing();
    let mut scene = Scene::new();
    let line = scene.create_node(ShapeKind::Line);
    scene.set_attribute(line, "x1", 10.0).unwrap();
    scene.set_attribute(line, "y1", 10.0).unwrap();
    scene.set_attribute(line, "x2", 110.0).unwrap();
    scene.set_attribute(line, "y2", 10.0).unwrap();

    assert_eq!(scene.point_at(line, -0.5), Some(Point::new(10.0, 10.0)));
    assert_eq!(scene.point_at(line, 0.5), Some(Point::new(60.0, 10.0)));
    assert_eq!(scene.point_at(line, 2.0), Some(Point::new(110.0, 10.0)));

    let [second, first] = scene.start_tangent(line).unwrap();
    assert_eq!(first, Point::new(10.0, 10.0));
    assert_eq!(second, Point::new(110.0, 10.0));
}

#[test]
fn non_finite_paths_degrade_to_empty() {
    init_tracing();
    let mut scene = Scene::new();
    let path = scene.create_node(ShapeKind::Path);
    let data = RawValue::List(vec![
        RawValue::List(vec!["M".into(), 0.0.into(), 0.0.into()]),
        RawValue::List(vec!["L".into(), f64::INFINITY.into(), 0.0.into()]),
    ]);
    scene.set_attribute(path, "d", data).unwrap();

    let geometry = scene.geometry(path).unwrap();
    assert!(matches!(geometry, Geometry::Path(p) if p.is_empty()));
    assert_eq!(scene.total_length(path), Some(0.0));
    assert_eq!(scene.local_bounds(path), None);
    assert_eq!(scene.point_at(path, 0.5), None);
}

#[test]
fn paths_must_open_with_a_move() {
    init_tracing();
    let mut scene = Scene::new();
    let text = scene.create_node(ShapeKind::Path);
    scene.set_attribute(text, "d", "L 10 10 L 20 0").unwrap();
    let list = scene.create_node(ShapeKind::Path);
    let data = RawValue::List(vec![
        RawValue::List(vec!["L".into(), 10.0.into(), 10.0.into()]),
        RawValue::List(vec!["L".into(), 20.0.into(), 0.0.into()]),
    ]);
    scene.set_attribute(list, "d", data).unwrap();

    for id in [text, list] {
        let report = scene.recalc(id).unwrap();
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].1.property(), "path");
        let geometry = scene.geometry(id).unwrap();
        assert!(matches!(geometry, Geometry::Path(p) if p.is_empty()));
        assert_eq!(scene.total_length(id), Some(0.0));
        assert_eq!(scene.point_at(id, 0.5), None);
    }
}

#[test]
fn inherited_styles_are_recomputed_lazily() {
    init_tracing();
    let mut scene = Scene::new();
    let group = scene.create_node(ShapeKind::Group);
    let child = scene.create_node(ShapeKind::Circle);
    scene.append_child(group, child).unwrap();
    scene.set_attribute(group, "fontFamily", "serif").unwrap();
    scene.recalc(child).unwrap();
    assert_eq!(keyword(&scene, child, "fontFamily").as_deref(), Some("serif"));

    scene.set_attribute(group, "fontFamily", "monospace").unwrap();
    // Nothing has been recalculated yet.
    assert_eq!(keyword(&scene, child, "fontFamily").as_deref(), Some("serif"));

    let report = scene.recalc(child).unwrap();
    assert_eq!(report.recomputed, vec![group, child]);
    assert_eq!(
        keyword(&scene, child, "fontFamily").as_deref(),
        Some("monospace")
    );
}

#[test]
fn explicit_declarations_shadow_the_parent() {
    init_tracing();
    let mut scene = Scene::new();
    let group = scene.create_node(ShapeKind::Group);
    let child = scene.create_node(ShapeKind::Line);
    scene.append_child(group, child).unwrap();
    scene.set_attribute(group, "lineWidth", 4.0).unwrap();
    scene.set_attribute(child, "strokeWidth", 1.0).unwrap();
    scene.recalc(child).unwrap();

    scene.set_attribute(group, "lineWidth", 8.0).unwrap();
    let report = scene.recalc(group).unwrap();
    assert_eq!(report.recomputed, vec![group]);
    assert!(
        !scene
            .dirty_flags(child)
            .unwrap()
            .contains(DirtyFlags::STYLE)
    );
}

#[test]
fn independent_inherited_values_are_patched_into_children() {
    init_tracing();
    let mut scene = Scene::new();
    let group = scene.create_node(ShapeKind::Group);
    let child = scene.create_node(ShapeKind::Circle);
    let grandchild = scene.create_node(ShapeKind::Circle);
    scene.append_child(group, child).unwrap();
    scene.append_child(child, grandchild).unwrap();
    scene.set_attribute(group, "visibility", "hidden").unwrap();
    scene.recalc(grandchild).unwrap();
    assert_eq!(
        keyword(&scene, grandchild, "visibility").as_deref(),
        Some("hidden")
    );

    scene.set_attribute(group, "visibility", "visible").unwrap();
    let report = scene.recalc(group).unwrap();
    assert_eq!(report.recomputed, vec![group]);

    // Descendants were updated in place and stay clean.
    for id in [child, grandchild] {
        assert_eq!(keyword(&scene, id, "visibility").as_deref(), Some("visible"));
        assert!(!scene.dirty_flags(id).unwrap().contains(DirtyFlags::STYLE));
    }
    assert!(scene.recalc(grandchild).unwrap().is_cache_hit());
}

#[test]
fn dependent_inherited_values_dirty_children() {
    init_tracing();
    let mut scene = Scene::new();
    let group = scene.create_node(ShapeKind::Group);
    let child = scene.create_node(ShapeKind::Line);
    scene.append_child(group, child).unwrap();
    scene.recalc(child).unwrap();

    scene.set_attribute(group, "lineWidth", 6.0).unwrap();
    scene.recalc(group).unwrap();
    assert!(
        scene
            .dirty_flags(child)
            .unwrap()
            .contains(DirtyFlags::STYLE)
    );
    let style = scene.style(child).unwrap();
    let registry = scene
        .registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    assert_eq!(style.number(&registry, "lineWidth"), Some(6.0));
}

#[test]
fn second_recalc_is_free() {
    init_tracing();
    let mut scene = Scene::new();
    let group = scene.create_node(ShapeKind::Group);
    let child = scene.create_node(ShapeKind::Rect);
    scene.append_child(group, child).unwrap();
    scene.set_attribute(child, "width", "25%").unwrap();
    scene.set_viewport(Some(Size::new(400.0, 400.0)));

    let first = scene.recalc(child).unwrap();
    assert_eq!(first.recomputed, vec![group, child]);
    assert!(first.diagnostics.is_empty());
    let snapshot = scene.computed_style(child).unwrap().clone();

    let second = scene.recalc(child).unwrap();
    assert!(second.is_cache_hit());
    assert!(thicket_style::ComputedStyle::ptr_eq(
        &snapshot,
        scene.computed_style(child).unwrap()
    ));
}

#[test]
fn bad_values_are_reported_not_fatal() {
    init_tracing();
    let mut scene = Scene::new();
    let id = scene.create_node(ShapeKind::Circle);
    scene.set_attribute(id, "r", "a lot").unwrap();
    scene.set_attribute(id, "cx", 5.0).unwrap();
    scene.set_attribute(id, "glimmer", 1.0).unwrap();

    let report = scene.recalc(id).unwrap();
    assert_eq!(report.diagnostics.len(), 2);
    let unknown_glimmer =
        |e: &StyleError| matches!(e, StyleError::UnknownProperty(name) if name == "glimmer");
    assert!(
        report
            .diagnostics
            .iter()
            .any(|(node, e)| *node == id && unknown_glimmer(e))
    );
    assert!(report.diagnostics.iter().any(|(_, e)| e.property() == "r"));

    // The bad radius falls back to its default; the rest still applies.
    assert_eq!(scene.local_position(id), Some(Point::new(5.0, 0.0)));
}

#[test]
fn registry_changes_invalidate_every_node() {
    init_tracing();
    let mut scene = Scene::new();
    let group = scene.create_node(ShapeKind::Group);
    let child = scene.create_node(ShapeKind::Circle);
    scene.append_child(group, child).unwrap();
    scene.recalc(child).unwrap();
    assert!(scene.recalc(child).unwrap().is_cache_hit());

    let glow = scene
        .register_metadata(
            PropertyMetadataBuilder::new("glowRadius")
                .syntax(PropertySyntax::Number)
                .default_value("3")
                .inherits(true)
                .build(),
        )
        .unwrap();
    let report = scene.recalc(child).unwrap();
    assert_eq!(report.recomputed, vec![group, child]);
    let style = scene.computed_style(child).unwrap().clone();
    {
        let registry = scene
            .registry()
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        assert_eq!(style.number(&registry, "glowRadius"), Some(3.0));
    }

    let removed = scene.unregister_metadata("glowRadius").unwrap();
    assert_eq!(removed.name(), "glowRadius");
    assert_eq!(
        scene.metadata("glowRadius"),
        Err(SceneError::Registry(RegistryError::UnknownProperty(
            "glowRadius".into()
        )))
    );
    scene.recalc(child).unwrap();
    assert_eq!(scene.computed_style(child).unwrap().get(glow), None);
}

#[test]
fn scenes_can_share_a_registry() {
    init_tracing();
    let registry = PropertyRegistry::with_defaults().into_shared();
    let mut a = Scene::with_registry(registry.clone());
    let b = Scene::with_registry(registry);
    a.register_metadata(
        PropertyMetadataBuilder::new("glowRadius")
            .syntax(PropertySyntax::Number)
            .build(),
    )
    .unwrap();
    assert!(b.metadata("glowRadius").is_ok());
}

#[test]
fn children_compose_world_transforms() {
    init_tracing();
    let mut scene = Scene::new();
    let group = scene.create_node(ShapeKind::Group);
    let dot = scene.create_node(ShapeKind::Circle);
    scene.append_child(group, dot).unwrap();
    scene.set_attribute(dot, "cx", 10.0).unwrap();
    scene.set_attribute(dot, "r", 2.0).unwrap();
    scene.set_local_position(group, Point::new(100.0, 100.0)).unwrap();
    scene.set_local_scale(group, Vec2::new(2.0, 2.0)).unwrap();

    let world = scene.world_transform(dot).unwrap();
    assert_eq!(world * Point::ZERO, Point::new(120.0, 100.0));
    assert_aabb(scene.bounds(group).unwrap(), (120.0, 100.0), (4.0, 4.0));

    // Moving the parent moves the child's world position.
    scene.translate(group, Vec2::new(0.0, 50.0)).unwrap();
    assert_aabb(scene.geometry_bounds(dot).unwrap(), (120.0, 150.0), (4.0, 4.0));
}

#[test]
fn group_bounds_cover_all_descendants() {
    init_tracing();
    let mut scene = Scene::new();
    let group = scene.create_node(ShapeKind::Group);
    let a = scene.create_node(ShapeKind::Rect);
    let b = scene.create_node(ShapeKind::Rect);
    for (id, x) in [(a, 0.0), (b, 90.0)] {
        scene.append_child(group, id).unwrap();
        scene.set_attribute(id, "x", x).unwrap();
        scene.set_attribute(id, "width", 10.0).unwrap();
        scene.set_attribute(id, "height", 10.0).unwrap();
    }
    assert_aabb(scene.bounds(group).unwrap(), (50.0, 5.0), (50.0, 5.0));

    scene.remove_child(group, b).unwrap();
    assert_aabb(scene.bounds(group).unwrap(), (5.0, 5.0), (5.0, 5.0));

    scene.destroy(group).unwrap();
    assert!(!scene.is_alive(a));
    assert!(scene.is_alive(b));
    assert_eq!(scene.bounds(a), None);
    assert_eq!(
        scene.set_attribute(a, "x", 1.0),
        Err(SceneError::StaleNode(a))
    );
}

#[test]
fn group_bounds_follow_descendant_style_edits() {
    init_tracing();
    let mut scene = Scene::new();
    scene.set_viewport(Some(Size::new(100.0, 100.0)));
    let group = scene.create_node(ShapeKind::Group);
    let inner = scene.create_node(ShapeKind::Group);
    let dot = scene.create_node(ShapeKind::Circle);
    scene.append_child(group, inner).unwrap();
    scene.append_child(inner, dot).unwrap();
    scene.set_attribute(dot, "r", 5.0).unwrap();
    assert_aabb(scene.bounds(group).unwrap(), (0.0, 0.0), (5.0, 5.0));

    scene.set_attribute(dot, "r", 50.0).unwrap();
    assert_aabb(scene.bounds(group).unwrap(), (0.0, 0.0), (50.0, 50.0));

    scene.remove_attribute(dot, "r").unwrap();
    assert_aabb(scene.bounds(group).unwrap(), (0.0, 0.0), (0.0, 0.0));

    scene.set_attribute(dot, "r", "10%").unwrap();
    assert_aabb(scene.bounds(group).unwrap(), (0.0, 0.0), (10.0, 10.0));
    scene.set_viewport(Some(Size::new(200.0, 200.0)));
    assert_aabb(scene.bounds(group).unwrap(), (0.0, 0.0), (20.0, 20.0));
}

#[test]
fn group_bounds_follow_registry_changes() {
    init_tracing();
    let mut scene = Scene::new();
    let group = scene.create_node(ShapeKind::Group);
    let line = scene.create_node(ShapeKind::Line);
    scene.append_child(group, line).unwrap();
    scene.set_attribute(line, "x2", 10.0).unwrap();
    assert_aabb(scene.bounds(group).unwrap(), (5.0, 0.0), (6.0, 1.0));

    scene
        .register_metadata(
            PropertyMetadataBuilder::new("lineWidth")
                .syntax(PropertySyntax::LengthPercentage)
                .default_value("3")
                .inherits(true)
                .affects(Affects::GEOMETRY)
                .build(),
        )
        .unwrap();
    assert_aabb(scene.bounds(group).unwrap(), (5.0, 0.0), (8.0, 3.0));
}

#[test]
fn reparenting_rebases_percentages() {
    init_tracing();
    let mut scene = Scene::new();
    scene.set_viewport(Some(Size::new(1000.0, 1000.0)));
    let frame = scene.create_node(ShapeKind::Rect);
    scene.set_attribute(frame, "width", 200.0).unwrap();
    scene.set_attribute(frame, "height", 200.0).unwrap();
    let dot = scene.create_node(ShapeKind::Circle);
    scene.set_attribute(dot, "r", "10%").unwrap();

    let radius = |scene: &mut Scene| match scene.geometry(dot) {
        Some(Geometry::Circle { radius, .. }) => *radius,
        other => panic!("unexpected geometry {other:?}"),
    };
    assert_near(radius(&mut scene), 100.0);

    scene.append_child(frame, dot).unwrap();
    assert_near(radius(&mut scene), 20.0);
}

#[test]
fn pending_values_keep_their_text() {
    init_tracing();
    let mut scene = Scene::new();
    let id = scene.create_node(ShapeKind::Rect);
    scene.set_attribute(id, "height", "3vh").unwrap();
    let report = scene.recalc(id).unwrap();
    assert_eq!(report.diagnostics.len(), 1);
    let registry = PropertyRegistry::with_defaults();
    assert!(matches!(
        scene.computed_style(id).unwrap().get_by_name(&registry, "height"),
        Some(ComputedValue::Pending(raw)) if raw.as_str() == Some("3vh")
    ));
    assert_eq!(scene.declared_value(id, "height"), Some("3vh".into()));
}
