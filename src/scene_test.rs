#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn square(size: f64) -> Vec<Point> {
    vec![pt(0.0, 0.0), pt(size, 0.0), pt(size, size), pt(0.0, size)]
}

fn square_shape(x: f64, y: f64, size: f64) -> Shape {
    let mut shape = Shape::from_vertices(square(size), Color::WHITE);
    shape.move_to(pt(x, y));
    shape
}

/// One group at the origin holding two 10x10 squares with a gap between
/// them: shape 0 spans local (5,5)..(15,15), shape 1 spans (25,5)..(35,15).
fn two_shape_group() -> ShapeGroup {
    let mut group = ShapeGroup::new(pt(0.0, 0.0));
    group.add_shape(square_shape(5.0, 5.0, 10.0));
    group.add_shape(square_shape(25.0, 5.0, 10.0));
    group
}

// =============================================================
// Shape: construction and caches
// =============================================================

#[test]
fn new_shape_is_empty_and_inactive() {
    let shape = Shape::new(Color::BLACK);
    assert!(shape.vertices().is_empty());
    assert!(shape.indices().is_empty());
    assert!(!shape.is_active());
    assert_eq!(shape.color(), Color::BLACK);
}

#[test]
fn from_vertices_computes_bounds_and_tesselates() {
    let shape = Shape::from_vertices(square(10.0), Color::WHITE);
    assert_eq!(shape.bounding_box().min, pt(0.0, 0.0));
    assert_eq!(shape.bounding_box().max, pt(10.0, 10.0));
    assert_eq!(shape.indices().len(), 6);
    assert!(shape.is_tesselated());
}

#[test]
fn add_vertex_grows_bounds_in_the_same_call() {
    let mut shape = Shape::new(Color::WHITE);
    shape.add_vertex(pt(0.0, 0.0));
    shape.add_vertex(pt(4.0, 0.0));
    assert_eq!(shape.bounding_box().max, pt(4.0, 0.0));
    shape.add_vertex(pt(4.0, 7.0));
    assert_eq!(shape.bounding_box().max, pt(4.0, 7.0));
}

#[test]
fn add_vertex_invalidates_the_tesselation() {
    let mut shape = Shape::from_vertices(square(10.0), Color::WHITE);
    assert!(shape.is_tesselated());
    // Appending here keeps the boundary simple: the new vertex sits between
    // the last and first vertices of the square.
    shape.add_vertex(pt(-5.0, 5.0));
    assert!(!shape.is_tesselated());
    assert!(shape.indices().is_empty());
    shape.tesselate();
    assert!(shape.is_tesselated());
    assert_eq!(shape.indices().len(), 9);
}

#[test]
fn degenerate_shape_counts_as_tesselated() {
    let mut shape = Shape::new(Color::WHITE);
    shape.add_vertex(pt(0.0, 0.0));
    shape.add_vertex(pt(1.0, 0.0));
    assert!(shape.is_tesselated());
    shape.tesselate();
    assert!(shape.indices().is_empty());
}

// =============================================================
// Shape: hit-testing
// =============================================================

#[test]
fn contains_point_translates_into_local_space() {
    let shape = square_shape(5.0, 5.0, 10.0);
    assert!(shape.contains_point(pt(10.0, 10.0)));
    assert!(!shape.contains_point(pt(3.0, 3.0)));
    assert!(!shape.contains_point(pt(16.0, 10.0)));
}

#[test]
fn point_on_a_vertex_is_not_contained() {
    let shape = square_shape(5.0, 5.0, 10.0);
    // Group-local (5,5) is exactly the shape's (0,0) vertex.
    assert!(!shape.contains_point(pt(5.0, 5.0)));
    assert!(!shape.contains_point(pt(15.0, 15.0)));
}

#[test]
fn degenerate_shape_contains_nothing() {
    let mut shape = Shape::new(Color::WHITE);
    shape.add_vertex(pt(0.0, 0.0));
    shape.add_vertex(pt(10.0, 0.0));
    assert!(!shape.contains_point(pt(5.0, 0.0)));
}

#[test]
fn closest_boundary_point_projects_onto_an_edge() {
    let shape = Shape::from_vertices(square(10.0), Color::WHITE);
    let (point, edge) = shape.closest_boundary_point(pt(5.0, -3.0)).unwrap();
    assert_eq!(point, pt(5.0, 0.0));
    assert_eq!(edge, 0);
}

#[test]
fn closest_boundary_point_respects_shape_position() {
    let shape = square_shape(100.0, 0.0, 10.0);
    let (point, edge) = shape.closest_boundary_point(pt(105.0, -3.0)).unwrap();
    assert_eq!(point, pt(105.0, 0.0));
    assert_eq!(edge, 0);
}

#[test]
fn closest_boundary_point_on_empty_shape_is_none() {
    let shape = Shape::new(Color::WHITE);
    assert!(shape.closest_boundary_point(pt(0.0, 0.0)).is_none());
}

// =============================================================
// ShapeGroup: bounds and hit-testing
// =============================================================

#[test]
fn add_shape_refreshes_group_bounds() {
    let group = two_shape_group();
    assert_eq!(group.bounding_box().min, pt(5.0, 5.0));
    assert_eq!(group.bounding_box().max, pt(35.0, 15.0));
}

#[test]
fn empty_group_has_empty_bounds() {
    let group = ShapeGroup::new(pt(0.0, 0.0));
    assert!(!group.in_bounds(pt(0.0, 0.0)));
    assert!(!group.contains_point(pt(0.0, 0.0)));
}

#[test]
fn group_move_to_offsets_hit_testing() {
    let mut group = two_shape_group();
    group.move_to(pt(100.0, 100.0));
    assert!(group.contains_point(pt(110.0, 110.0)));
    assert!(!group.contains_point(pt(10.0, 10.0)));
}

#[test]
fn contains_point_requires_a_shape_hit() {
    let group = two_shape_group();
    // Inside the group bounds, but in the gap between the squares.
    assert!(group.in_bounds(pt(20.0, 10.0)));
    assert!(!group.contains_point(pt(20.0, 10.0)));
    assert!(group.contains_point(pt(10.0, 10.0)));
    assert!(group.contains_point(pt(30.0, 10.0)));
}

#[test]
fn shape_index_at_prefers_topmost() {
    let mut group = ShapeGroup::new(pt(0.0, 0.0));
    group.add_shape(square_shape(0.0, 0.0, 30.0));
    group.add_shape(square_shape(10.0, 10.0, 10.0));
    // The small square sits on top of the big one.
    assert_eq!(group.shape_index_at(pt(15.0, 15.0)), Some(1));
    assert_eq!(group.shape_index_at(pt(5.0, 5.0)), Some(0));
    assert_eq!(group.shape_index_at(pt(40.0, 40.0)), None);
}

#[test]
fn move_shape_refreshes_group_bounds() {
    let mut group = two_shape_group();
    group.move_shape(1, pt(50.0, 5.0));
    assert_eq!(group.bounding_box().max, pt(60.0, 15.0));
}

#[test]
fn deactivate_cascades_to_shapes() {
    let mut group = two_shape_group();
    group.set_active(true);
    group.activate_shape(1);
    assert!(group.is_active());
    assert!(group.shapes()[1].is_active());

    group.deactivate();
    assert!(!group.is_active());
    assert!(!group.shapes()[0].is_active());
    assert!(!group.shapes()[1].is_active());
}

// =============================================================
// Scene: authoring surface
// =============================================================

#[test]
fn add_group_returns_z_order_index() {
    let mut scene = Scene::new();
    assert_eq!(scene.add_group(ShapeGroup::new(pt(0.0, 0.0))), 0);
    assert_eq!(scene.add_group(ShapeGroup::new(pt(1.0, 1.0))), 1);
    assert_eq!(scene.len(), 2);
    assert!(!scene.is_empty());
}

#[test]
fn add_shape_to_missing_group_fails() {
    let mut scene = Scene::new();
    let result = scene.add_shape(0, Shape::new(Color::WHITE));
    assert_eq!(result, Err(SceneError::NoSuchGroup(0)));
}

#[test]
fn add_vertex_builds_shape_and_group_bounds() {
    let mut scene = Scene::new();
    let group = scene.add_group(ShapeGroup::new(pt(0.0, 0.0)));
    let shape = scene.add_shape(group, Shape::new(Color::WHITE)).unwrap();

    for v in square(10.0) {
        scene.add_vertex(group, shape, v).unwrap();
    }
    scene.tesselate(group, shape).unwrap();

    let authored = &scene.groups()[group].shapes()[shape];
    assert_eq!(authored.indices().len(), 6);
    assert_eq!(scene.groups()[group].bounding_box().max, pt(10.0, 10.0));
}

#[test]
fn add_vertex_to_missing_shape_fails() {
    let mut scene = Scene::new();
    let group = scene.add_group(ShapeGroup::new(pt(0.0, 0.0)));
    let result = scene.add_vertex(group, 3, pt(0.0, 0.0));
    assert_eq!(result, Err(SceneError::NoSuchShape { group, shape: 3 }));
    let result = scene.tesselate(7, 0);
    assert_eq!(result, Err(SceneError::NoSuchGroup(7)));
}

#[test]
fn scene_error_messages_name_the_indices() {
    assert_eq!(SceneError::NoSuchGroup(2).to_string(), "no shape group at index 2");
    assert_eq!(
        SceneError::NoSuchShape { group: 1, shape: 4 }.to_string(),
        "no shape at index 4 in group 1"
    );
}

#[test]
fn group_index_at_prefers_topmost() {
    let mut scene = Scene::new();
    let mut below = ShapeGroup::new(pt(0.0, 0.0));
    below.add_shape(square_shape(0.0, 0.0, 20.0));
    let mut above = ShapeGroup::new(pt(10.0, 10.0));
    above.add_shape(square_shape(0.0, 0.0, 20.0));
    scene.add_group(below);
    scene.add_group(above);

    // (15,15) lands on both; the later group wins.
    assert_eq!(scene.group_index_at(pt(15.0, 15.0)), Some(1));
    assert_eq!(scene.group_index_at(pt(5.0, 5.0)), Some(0));
    assert_eq!(scene.group_index_at(pt(50.0, 50.0)), None);
}

// =============================================================
// Scene: snapshot round-trip
// =============================================================

#[test]
fn snapshot_round_trip_rebuilds_caches() {
    let mut scene = Scene::new();
    let mut group = two_shape_group();
    group.move_to(pt(7.0, 7.0));
    group.set_active(true);
    group.activate_shape(0);
    scene.add_group(group);

    let json = serde_json::to_string(scene.groups()).unwrap();
    let groups: Vec<ShapeGroup> = serde_json::from_str(&json).unwrap();

    let mut restored = Scene::new();
    restored.load_snapshot(groups);

    let group = &restored.groups()[0];
    assert_eq!(group.position(), pt(7.0, 7.0));
    assert_eq!(group.bounding_box().min, pt(5.0, 5.0));
    assert_eq!(group.bounding_box().max, pt(35.0, 15.0));
    assert_eq!(group.shapes()[0].indices().len(), 6);
    assert_eq!(group.shapes()[0].bounding_box().max, pt(10.0, 10.0));
    // Selection state does not survive a snapshot; the machine restarts
    // from neutral.
    assert!(!group.is_active());
    assert!(!group.shapes()[0].is_active());
}

#[test]
fn color_components_survive_serialization() {
    let color = Color::new(0.25, 0.5, 0.75, 1.0);
    let json = serde_json::to_string(&color).unwrap();
    let back: Color = serde_json::from_str(&json).unwrap();
    assert_eq!(back, color);
}
