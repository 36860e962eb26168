//! Scene graph: shapes, shape groups, and the authoring surface.
//!
//! A [`Scene`] owns z-ordered [`ShapeGroup`]s; each group owns z-ordered
//! [`Shape`]s sharing the group's position offset. Later entries in either
//! list draw on top and win ambiguous hit tests. A world-space point maps
//! into shape-local space as `p - group.position - shape.position`; no
//! rotation or scale exists at this layer.
//!
//! Bounding boxes and triangle index buffers are caches, and every mutation
//! that can invalidate one recomputes it in the same call: `add_vertex`
//! rebuilds the shape box and discards the stale tesselation, `add_shape`
//! and the reposition operations rebuild the owning group's box. No call
//! site can forget a recompute because there is nothing separate to call.
//!
//! The active flags are written only by [`crate::engine::Engine`]; renderers
//! read them between updates. Serialization of the data model is derived so
//! a host can persist scenes, but the caches stay out of the wire format and
//! are rebuilt by [`Scene::load_snapshot`].

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geom::{self, BoundingBox, Point};

/// Error for index-addressed scene-authoring operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// No group exists at the given z-order index.
    #[error("no shape group at index {0}")]
    NoSuchGroup(usize),
    /// The group exists but has no shape at the given z-order index.
    #[error("no shape at index {shape} in group {group}")]
    NoSuchShape { group: usize, shape: usize },
}

/// An RGBA rendering attribute. Opaque to the engine; carried through for
/// the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// A single simple polygon.
///
/// Vertices are stored in shape-local space, ordered consistently around the
/// boundary. Shapes with fewer than three vertices are valid but cannot be
/// tesselated or hit-tested beyond their bounding box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    vertices: Vec<Point>,
    position: Point,
    color: Color,
    is_active: bool,
    #[serde(skip)]
    indices: Vec<usize>,
    #[serde(skip)]
    bounding_box: BoundingBox,
}

impl Shape {
    /// An empty shape at the group origin.
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            vertices: Vec::new(),
            position: Point::default(),
            color,
            is_active: false,
            indices: Vec::new(),
            bounding_box: BoundingBox::EMPTY,
        }
    }

    /// A shape from a finalized vertex list: bounds computed and polygon
    /// tesselated in one go.
    #[must_use]
    pub fn from_vertices(vertices: Vec<Point>, color: Color) -> Self {
        let mut shape = Self::new(color);
        shape.vertices = vertices;
        shape.rebuild_caches();
        shape
    }

    /// Append a boundary vertex. Recomputes the local bounding box and
    /// invalidates the cached tesselation; call [`Shape::tesselate`] once
    /// the vertex list is final.
    pub fn add_vertex(&mut self, vertex: Point) {
        self.vertices.push(vertex);
        self.bounding_box = BoundingBox::from_points(&self.vertices);
        self.indices.clear();
    }

    /// Recompute the cached triangle index buffer from the current vertex
    /// list. An amortized one-shot cost per shape edit, not per frame.
    pub fn tesselate(&mut self) {
        self.indices = geom::tesselate(&self.vertices);
    }

    /// Whether the cached tesselation matches the current vertex list.
    /// Degenerate shapes (fewer than three vertices) count as tesselated.
    #[must_use]
    pub fn is_tesselated(&self) -> bool {
        self.vertices.len() < 3 || !self.indices.is_empty()
    }

    /// Reposition the shape within its group. The caller owning the group
    /// must refresh the group bounds; inside this crate that is
    /// [`ShapeGroup::move_shape`].
    pub(crate) fn move_to(&mut self, position: Point) {
        self.position = position;
    }

    /// Whether a group-local point lands inside the polygon.
    ///
    /// A point exactly coincident with a vertex is defined as outside: the
    /// ray parity test is ambiguous there, so the answer is pinned.
    #[must_use]
    pub fn contains_point(&self, group_local: Point) -> bool {
        let local = group_local - self.position;
        if !self.bounding_box.contains(local) {
            return false;
        }
        if self.vertices.iter().any(|v| *v == local) {
            return false;
        }
        geom::point_in_polygon(local, &self.vertices)
    }

    /// Closest point on the polygon boundary to a group-local query point,
    /// with the index of the owning edge's first vertex. `None` for a shape
    /// with no vertices.
    #[must_use]
    pub fn closest_boundary_point(&self, group_local: Point) -> Option<(Point, usize)> {
        if self.vertices.is_empty() {
            return None;
        }

        let local = group_local - self.position;
        let mut best: Option<(Point, usize)> = None;
        let mut best_dist_sq = f64::INFINITY;
        for i in 0..self.vertices.len() {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % self.vertices.len()];
            let candidate = geom::closest_point_on_segment(local, a, b);
            let dist_sq = (candidate - local).dot(candidate - local);
            if dist_sq < best_dist_sq {
                best_dist_sq = dist_sq;
                best = Some((candidate + self.position, i));
            }
        }
        best
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Cached triangle index buffer (triples into [`Shape::vertices`]).
    /// Empty until [`Shape::tesselate`] runs; possibly shorter than
    /// `3 * (n - 2)` entries for degenerate polygons.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Offset of this shape relative to its owning group.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Shape-local bounds enclosing every vertex.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Whether this shape is the selected leaf.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// Rebuild both caches from the vertex list and drop any persisted
    /// active flag. Used after deserialization.
    fn rebuild_caches(&mut self) {
        self.bounding_box = BoundingBox::from_points(&self.vertices);
        self.tesselate();
        self.is_active = false;
    }
}

/// A z-ordered collection of shapes sharing a world-space position offset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShapeGroup {
    shapes: Vec<Shape>,
    position: Point,
    is_active: bool,
    #[serde(skip)]
    bounding_box: BoundingBox,
}

impl ShapeGroup {
    #[must_use]
    pub fn new(position: Point) -> Self {
        Self {
            shapes: Vec::new(),
            position,
            is_active: false,
            bounding_box: BoundingBox::EMPTY,
        }
    }

    /// Append a shape on top of the z-order and refresh the group bounds.
    /// Returns the new shape's index.
    pub fn add_shape(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.recalculate_bounding_box();
        self.shapes.len() - 1
    }

    /// Reposition the group in world space and refresh its bounds.
    pub fn move_to(&mut self, position: Point) {
        self.position = position;
        self.recalculate_bounding_box();
    }

    /// Reposition a child shape and refresh the group bounds in the same
    /// call. Panics if `shape` is stale; the engine treats that as a
    /// programmer error, not a recoverable condition.
    pub(crate) fn move_shape(&mut self, shape: usize, position: Point) {
        self.shapes[shape].move_to(position);
        self.recalculate_bounding_box();
    }

    /// Recompute the group-local bounds as the union of every child's
    /// translated bounding box.
    pub fn recalculate_bounding_box(&mut self) {
        self.bounding_box = self
            .shapes
            .iter()
            .map(|s| s.bounding_box().translate(s.position()))
            .fold(BoundingBox::EMPTY, BoundingBox::union);
    }

    /// Topmost shape containing a group-local point, if any. Later shapes
    /// win: the scan runs in reverse z-order.
    #[must_use]
    pub fn shape_index_at(&self, group_local: Point) -> Option<usize> {
        self.shapes.iter().rposition(|s| s.contains_point(group_local))
    }

    /// Whether a world-space point lands on any shape in this group.
    /// Rejects on the group bounds before scanning shapes.
    #[must_use]
    pub fn contains_point(&self, world: Point) -> bool {
        let local = world - self.position;
        if !self.bounding_box.contains(local) {
            return false;
        }
        self.shape_index_at(local).is_some()
    }

    /// Whether a world-space point lands inside the group's bounding box.
    /// Coarser than [`ShapeGroup::contains_point`]; the selection machine
    /// uses this to decide when to pop back out of a selected group.
    #[must_use]
    pub fn in_bounds(&self, world: Point) -> bool {
        self.bounding_box.contains(world - self.position)
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// Deactivate the group and cascade to every child shape.
    pub(crate) fn deactivate(&mut self) {
        self.is_active = false;
        for shape in &mut self.shapes {
            shape.set_active(false);
        }
    }

    pub(crate) fn activate_shape(&mut self, shape: usize) {
        self.shapes[shape].set_active(true);
    }

    pub(crate) fn deactivate_shape(&mut self, shape: usize) {
        self.shapes[shape].set_active(false);
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Offset of the group in world space.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Group-local bounds; re-derivable from the shapes at any time.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Whether this group is the current selection root.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    fn rebuild_caches(&mut self) {
        self.is_active = false;
        for shape in &mut self.shapes {
            shape.rebuild_caches();
        }
        self.recalculate_bounding_box();
    }
}

/// The scene graph root: a z-ordered list of groups.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    groups: Vec<ShapeGroup>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group on top of the z-order, returning its index.
    pub fn add_group(&mut self, group: ShapeGroup) -> usize {
        self.groups.push(group);
        self.groups.len() - 1
    }

    /// Add a shape to an existing group.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NoSuchGroup`] if `group` is out of range.
    pub fn add_shape(&mut self, group: usize, shape: Shape) -> Result<usize, SceneError> {
        let target = self.groups.get_mut(group).ok_or(SceneError::NoSuchGroup(group))?;
        Ok(target.add_shape(shape))
    }

    /// Append a vertex to a shape, refreshing the shape's and the owning
    /// group's bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] if either index is out of range.
    pub fn add_vertex(&mut self, group: usize, shape: usize, vertex: Point) -> Result<(), SceneError> {
        let target = self.groups.get_mut(group).ok_or(SceneError::NoSuchGroup(group))?;
        let owned = target
            .shapes
            .get_mut(shape)
            .ok_or(SceneError::NoSuchShape { group, shape })?;
        owned.add_vertex(vertex);
        target.recalculate_bounding_box();
        Ok(())
    }

    /// Tesselate a shape whose vertex list is final.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] if either index is out of range.
    pub fn tesselate(&mut self, group: usize, shape: usize) -> Result<(), SceneError> {
        let target = self.groups.get_mut(group).ok_or(SceneError::NoSuchGroup(group))?;
        let owned = target
            .shapes
            .get_mut(shape)
            .ok_or(SceneError::NoSuchShape { group, shape })?;
        owned.tesselate();
        Ok(())
    }

    /// Topmost group whose shapes contain a world-space point, if any.
    /// Later groups win: the scan runs in reverse z-order.
    #[must_use]
    pub fn group_index_at(&self, world: Point) -> Option<usize> {
        self.groups.iter().rposition(|g| g.contains_point(world))
    }

    /// Replace the whole scene from deserialized groups, rebuilding every
    /// cache and clearing every active flag so the selection machine can
    /// restart from neutral.
    pub fn load_snapshot(&mut self, groups: Vec<ShapeGroup>) {
        self.groups = groups;
        for group in &mut self.groups {
            group.rebuild_caches();
        }
    }

    #[must_use]
    pub fn groups(&self) -> &[ShapeGroup] {
        &self.groups
    }

    /// Mutable access by index for the interaction engine. Panics on a
    /// stale index: the scene changed underneath the state machine, which
    /// is a programmer error.
    pub(crate) fn group_mut(&mut self, group: usize) -> &mut ShapeGroup {
        &mut self.groups[group]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
