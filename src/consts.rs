//! Shared numeric constants for the scene engine.

// ── Interaction timing ──────────────────────────────────────────

/// Maximum tick gap between two clicks, with no pointer movement in between,
/// for the pair to count as a selecting double-click.
pub const DOUBLE_CLICK_TICKS: u64 = 200;

// ── Ray casting ─────────────────────────────────────────────────

/// X component of the fixed point-in-polygon ray offset. Large and
/// deliberately non-axis-aligned so the ray never coincides with an
/// axis-aligned polygon edge.
pub const RAY_OFFSET_X: f64 = 109_340.0;

/// Y component of the fixed point-in-polygon ray offset.
pub const RAY_OFFSET_Y: f64 = 123_543.0;

// ── Tesselation ─────────────────────────────────────────────────

/// How many consecutive full ear-clipping scans may fail to clip an ear
/// before the triangulation gives up and returns a partial result.
pub const MAX_STALE_SCANS: usize = 16;

/// Sample parameter near the start of a candidate diagonal. Not 0.0, so the
/// sample never lands exactly on a polygon vertex.
pub const DIAGONAL_T_START: f64 = 0.01;

/// Interior sample parameter for a candidate diagonal. Off-center so it
/// cannot coincide with a vertex or an edge midpoint.
pub const DIAGONAL_T_MID: f64 = 0.3145;

/// Sample parameter near the end of a candidate diagonal.
pub const DIAGONAL_T_END: f64 = 0.99;
