//! Input model: the per-frame snapshot, the edge-flag tracker, and the
//! interaction state enum.
//!
//! The platform layer translates native events into one [`FrameInput`] per
//! frame; [`InputTracker`] is the small helper that derives the edge flags
//! and the moved-since-down bit from raw level state. [`InteractState`] is
//! the interaction machine's tagged state: each variant carries exactly the
//! remembered context that state needs, so it is structurally impossible to
//! be mid-drag without a grab offset or mid-click without a press tick.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::Point;

/// Normalized input for one frame, in world space.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    /// World-space mouse position (already camera-transformed by the host).
    pub mouse: Point,
    /// The primary button went down this frame.
    pub just_clicked: bool,
    /// The primary button came up this frame.
    pub just_released: bool,
    /// The primary button is currently held.
    pub is_down: bool,
    /// The mouse has moved since the position recorded at button-down.
    pub moved_since_down: bool,
    /// Monotonically increasing frame counter. Frame-granular, not
    /// wall-clock-precise; all interaction timing is expressed in ticks.
    pub tick: u64,
}

/// Derives [`FrameInput`] edge flags from raw per-frame level state.
///
/// The host calls [`InputTracker::frame`] exactly once per frame with the
/// current mouse position, button level, and tick counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputTracker {
    was_down: bool,
    down_pos: Point,
}

impl InputTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold this frame's raw state into a normalized snapshot.
    pub fn frame(&mut self, mouse: Point, is_down: bool, tick: u64) -> FrameInput {
        let just_clicked = is_down && !self.was_down;
        let just_released = !is_down && self.was_down;
        if just_clicked {
            self.down_pos = mouse;
        }
        let moved_since_down = is_down && mouse != self.down_pos;
        self.was_down = is_down;

        FrameInput { mouse, just_clicked, just_released, is_down, moved_since_down, tick }
    }
}

/// The interaction machine's state, one variant per gesture phase.
///
/// The remembered fields live in the variants themselves: `press_pos` is the
/// world position of the first click (a second click only double-clicks from
/// the same spot), `click_tick` anchors the double-click window, and
/// `grab_offset` is `entity_position - press_pos`, applied as
/// `mouse + grab_offset` on every dragged frame. Dropping back to a parent
/// state discards the context automatically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractState {
    /// Nothing grabbed or selected; waiting for a click on a group.
    Neutral,
    /// A group took a first click and may be double-clicked or dragged.
    GroupClicked { group: usize, press_pos: Point, click_tick: u64 },
    /// The group follows the mouse while the button stays down.
    GroupDragged { group: usize, grab_offset: Point },
    /// The group is the selection root; clicks now address its shapes.
    GroupSelected { group: usize },
    /// A shape inside the selected group took a first click.
    ShapeClicked { group: usize, shape: usize, press_pos: Point, click_tick: u64 },
    /// The shape follows the mouse within its group while the button stays down.
    ShapeDragged { group: usize, shape: usize, grab_offset: Point },
    /// The shape is the selected leaf.
    ShapeSelected { group: usize, shape: usize },
}

impl Default for InteractState {
    fn default() -> Self {
        Self::Neutral
    }
}
