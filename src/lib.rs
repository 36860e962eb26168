//! Interactive 2-D polygon scene engine.
//!
//! This crate owns the geometry and interaction core of a direct-manipulation
//! shape editor: a scene of polygon [`scene::Shape`]s organized into z-ordered
//! [`scene::ShapeGroup`]s, hit-tested with a small computational-geometry
//! kernel, and driven by a per-frame click/drag/selection state machine.
//! Click a group to grab it, double-click to drill in, drag to reposition,
//! click outside to pop back out.
//!
//! The host platform feeds the engine one normalized [`input::FrameInput`]
//! per frame (world-space mouse position, button edge/level flags, tick
//! counter) and reads the mutated scene back out afterwards. Rendering,
//! camera transforms, and persistence are the host's problem: the engine
//! produces positions, active flags, and cached triangle index buffers, and
//! never touches pixels or disk.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geom`] | Stateless geometry kernel: intersection, ray casting, ear-clipping tesselation |
//! | [`scene`] | Scene graph: shapes, shape groups, and the scene-authoring surface |
//! | [`input`] | Per-frame input snapshot and the interaction state enum |
//! | [`engine`] | The per-frame interaction state machine over the scene |
//! | [`consts`] | Shared numeric constants (double-click window, ray offset, scan cap) |

pub mod consts;
pub mod engine;
pub mod geom;
pub mod input;
pub mod scene;
