//! Stateless geometry kernel.
//!
//! Pure functions over [`Point`] and [`BoundingBox`]: inclusive box
//! containment, parametric segment intersection, fixed-ray point-in-polygon
//! testing, and ear-clipping tesselation. Nothing here holds state or
//! allocates beyond the returned index buffers; the scene graph in
//! [`crate::scene`] layers caching and coordinate-frame translation on top.
//!
//! All polygon operations assume a simple (non-self-intersecting) boundary
//! with a consistent winding. Degenerate input never panics: intersection
//! returns `None` where the parametric solution is undefined, and
//! tesselation gives up after a bounded number of stale scans, returning a
//! partial index buffer.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::{
    DIAGONAL_T_END, DIAGONAL_T_MID, DIAGONAL_T_START, MAX_STALE_SCANS, RAY_OFFSET_X, RAY_OFFSET_Y,
};

/// A 2-D point. The coordinate frame (world, group-local, shape-local)
/// depends on context; the kernel itself is frame-agnostic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 2-D cross product (the z component of the 3-D cross product).
    #[must_use]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Linear interpolation from `self` to `other` at parameter `t`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// An axis-aligned bounding box. Containment is inclusive on all four edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// The empty box: contains nothing, identity under [`BoundingBox::union`].
    pub const EMPTY: Self = Self {
        min: Point { x: f64::INFINITY, y: f64::INFINITY },
        max: Point { x: f64::NEG_INFINITY, y: f64::NEG_INFINITY },
    };

    /// Smallest box enclosing all of `points`. Empty input yields
    /// [`BoundingBox::EMPTY`].
    #[must_use]
    pub fn from_points(points: &[Point]) -> Self {
        points.iter().fold(Self::EMPTY, |bounds, p| Self {
            min: Point::new(bounds.min.x.min(p.x), bounds.min.y.min(p.y)),
            max: Point::new(bounds.max.x.max(p.x), bounds.max.y.max(p.y)),
        })
    }

    /// Inclusive containment test on both axes.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Smallest box enclosing both operands.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// The same box shifted by `offset`.
    #[must_use]
    pub fn translate(self, offset: Point) -> Self {
        Self { min: self.min + offset, max: self.max + offset }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Intersection of the finite segments `p1p2` and `p3p4`, if any.
///
/// Solves the two-line parametric form via cross-product determinants.
/// Degenerate input is handled before any division: four coincident points
/// intersect at that point, a single-point segment intersects nothing else,
/// and parallel or collinear segments (zero determinant) yield `None`.
#[must_use]
pub fn segments_intersect(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    if p1 == p2 && p2 == p3 && p3 == p4 {
        return Some(p1);
    }
    if p1 == p2 || p3 == p4 {
        return None;
    }

    let d = (p1 - p2).cross(p3 - p4);
    if d == 0.0 {
        return None;
    }

    let t = (p1 - p3).cross(p3 - p4) / d;
    let u = (p2 - p1).cross(p1 - p3) / d;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(p1 + (p2 - p1) * t)
    } else {
        None
    }
}

/// Whether the fixed ray cast from `point` crosses the segment `ab`.
///
/// The ray direction is a large, non-axis-aligned offset so that it cannot
/// run along an axis-aligned polygon edge.
#[must_use]
pub fn ray_crosses_segment(point: Point, a: Point, b: Point) -> bool {
    let far = point + Point::new(RAY_OFFSET_X, RAY_OFFSET_Y);
    segments_intersect(point, far, a, b).is_some()
}

/// Ray-casting point-in-polygon test with a bounding-box fast reject.
///
/// Counts how many polygon edges (consecutive vertex pairs, wrapping
/// last-to-first) the fixed ray from `point` crosses; an odd count means
/// inside. Polygons with fewer than three vertices contain nothing.
#[must_use]
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if !BoundingBox::from_points(polygon).contains(point) {
        return false;
    }

    let mut crossings = 0;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        if ray_crosses_segment(point, a, b) {
            crossings += 1;
        }
    }
    crossings % 2 == 1
}

/// Whether the segment `p1p2` lies entirely inside `polygon`.
///
/// Samples the segment at three interior parameters, none of which can
/// coincide with a polygon vertex when `p1` and `p2` are themselves
/// vertices. The mid sample must land inside the polygon, and the
/// near-endpoint samples, taken as a segment, must cross no polygon edge.
#[must_use]
pub fn segment_inside_polygon(p1: Point, p2: Point, polygon: &[Point]) -> bool {
    let near_start = p1.lerp(p2, DIAGONAL_T_START);
    let mid = p1.lerp(p2, DIAGONAL_T_MID);
    let near_end = p1.lerp(p2, DIAGONAL_T_END);

    if !point_in_polygon(mid, polygon) {
        return false;
    }

    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        if segments_intersect(near_start, near_end, a, b).is_some() {
            return false;
        }
    }
    true
}

/// Closest point to `point` on the finite segment `ab` (clamped projection).
/// A zero-length segment returns its endpoint.
#[must_use]
pub fn closest_point_on_segment(point: Point, a: Point, b: Point) -> Point {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq == 0.0 {
        return a;
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Ear-clipping tesselation of a simple polygon.
///
/// Returns a flat triangle index buffer (triples into `vertices`). Zero to
/// two vertices produce no triangles; three produce the single triangle
/// `(0, 1, 2)`. For larger polygons, consecutive vertex triples are scanned
/// for a valid ear (a first-to-third diagonal that lies inside the original
/// polygon outline), the ear's middle vertex is removed from the working
/// list, and the scan restarts. A valid simple polygon of `n` vertices
/// yields exactly `n - 2` triangles.
///
/// Self-intersecting or otherwise degenerate input cannot hang the loop:
/// after [`MAX_STALE_SCANS`] consecutive scans that clip nothing, the
/// triangulation stops and returns whatever it has. Callers must tolerate a
/// partial buffer; it signals a data-quality problem in the authored shape.
#[must_use]
pub fn tesselate(vertices: &[Point]) -> Vec<usize> {
    match vertices.len() {
        0..=2 => return Vec::new(),
        3 => return vec![0, 1, 2],
        _ => {}
    }

    let mut working: Vec<usize> = (0..vertices.len()).collect();
    let mut indices = Vec::with_capacity((vertices.len() - 2) * 3);
    let mut stale_scans = 0;

    while working.len() > 3 {
        let mut clipped = false;
        for j in 0..working.len() {
            let i0 = working[j];
            let i1 = working[(j + 1) % working.len()];
            let i2 = working[(j + 2) % working.len()];
            // Diagonal validity is checked against the original, fixed
            // outline, not the shrinking working list.
            if segment_inside_polygon(vertices[i0], vertices[i2], vertices) {
                indices.extend_from_slice(&[i0, i1, i2]);
                working.remove((j + 1) % working.len());
                clipped = true;
                break;
            }
        }

        if clipped {
            stale_scans = 0;
        } else {
            stale_scans += 1;
            if stale_scans > MAX_STALE_SCANS {
                tracing::warn!(
                    remaining = working.len(),
                    emitted = indices.len() / 3,
                    "ear clipping stalled; leaving polygon partially tesselated"
                );
                return indices;
            }
        }
    }

    indices.extend_from_slice(&working);
    indices
}
