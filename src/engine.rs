//! The per-frame interaction state machine.
//!
//! [`Engine::update`] is a reducer over (current state, input snapshot,
//! scene): evaluated once per frame, it hit-tests the scene, applies the
//! transition table for the current state only, and mutates positions and
//! active flags in place. The renderer reads the scene between updates; the
//! engine is the sole writer of positions and active flags, so no locking is
//! needed as long as update and render strictly alternate.
//!
//! Timing is tick-based: a second click within [`DOUBLE_CLICK_TICKS`] of the
//! first, from the same position, selects; the window elapsing resets to the
//! parent state and swallows any click arriving on that same frame.
//! Exactly one group and at most one shape can be active at a time, and
//! deactivating a group cascades to its shapes.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::consts::DOUBLE_CLICK_TICKS;
use crate::geom::Point;
use crate::input::{FrameInput, InteractState};
use crate::scene::Scene;

/// The interaction engine: a scene plus the current gesture state.
#[derive(Debug, Default)]
pub struct Engine {
    pub scene: Scene,
    state: InteractState,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an authored scene, starting from the neutral state.
    #[must_use]
    pub fn with_scene(scene: Scene) -> Self {
        Self { scene, state: InteractState::Neutral }
    }

    /// The current gesture state.
    #[must_use]
    pub fn state(&self) -> InteractState {
        self.state
    }

    /// Index of the group that is the current selection root, if any.
    /// A merely clicked or dragged group is grabbed, not yet selected.
    #[must_use]
    pub fn active_group(&self) -> Option<usize> {
        match self.state {
            InteractState::GroupSelected { group }
            | InteractState::ShapeClicked { group, .. }
            | InteractState::ShapeDragged { group, .. }
            | InteractState::ShapeSelected { group, .. } => Some(group),
            InteractState::Neutral
            | InteractState::GroupClicked { .. }
            | InteractState::GroupDragged { .. } => None,
        }
    }

    /// Indices of the selected leaf shape as `(group, shape)`, if any.
    #[must_use]
    pub fn active_shape(&self) -> Option<(usize, usize)> {
        match self.state {
            InteractState::ShapeSelected { group, shape } => Some((group, shape)),
            _ => None,
        }
    }

    /// Evaluate one frame: apply the transition table for the current state
    /// and mutate the scene accordingly.
    pub fn update(&mut self, frame: &FrameInput) {
        let next = match self.state {
            InteractState::Neutral => self.on_neutral(frame),
            InteractState::GroupClicked { group, press_pos, click_tick } => {
                self.on_group_clicked(frame, group, press_pos, click_tick)
            }
            InteractState::GroupDragged { group, grab_offset } => {
                self.on_group_dragged(frame, group, grab_offset)
            }
            InteractState::GroupSelected { group } => self.on_group_selected(frame, group),
            InteractState::ShapeClicked { group, shape, press_pos, click_tick } => {
                self.on_shape_clicked(frame, group, shape, press_pos, click_tick)
            }
            InteractState::ShapeDragged { group, shape, grab_offset } => {
                self.on_shape_dragged(frame, group, shape, grab_offset)
            }
            InteractState::ShapeSelected { group, shape } => {
                self.on_shape_selected(frame, group, shape)
            }
        };

        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, tick = frame.tick, "interaction transition");
            self.state = next;
        }
    }

    /// Waiting for a click. A click on a group (topmost wins) grabs it and
    /// starts the double-click window.
    fn on_neutral(&mut self, frame: &FrameInput) -> InteractState {
        if frame.just_clicked {
            if let Some(group) = self.scene.group_index_at(frame.mouse) {
                return InteractState::GroupClicked {
                    group,
                    press_pos: frame.mouse,
                    click_tick: frame.tick,
                };
            }
        }
        InteractState::Neutral
    }

    /// A group is grabbed. The window elapsing wins over everything else,
    /// so a late second click is swallowed by the reset.
    fn on_group_clicked(
        &mut self,
        frame: &FrameInput,
        group: usize,
        press_pos: Point,
        click_tick: u64,
    ) -> InteractState {
        if frame.tick > click_tick + DOUBLE_CLICK_TICKS {
            return InteractState::Neutral;
        }
        if frame.just_clicked && frame.mouse == press_pos {
            self.scene.group_mut(group).set_active(true);
            return InteractState::GroupSelected { group };
        }
        if frame.is_down && frame.moved_since_down {
            let grab_offset = self.scene.groups()[group].position() - press_pos;
            return InteractState::GroupDragged { group, grab_offset };
        }
        InteractState::GroupClicked { group, press_pos, click_tick }
    }

    /// The group follows the mouse until the button comes up.
    fn on_group_dragged(
        &mut self,
        frame: &FrameInput,
        group: usize,
        grab_offset: Point,
    ) -> InteractState {
        if !frame.is_down {
            return InteractState::Neutral;
        }
        self.scene.group_mut(group).move_to(frame.mouse + grab_offset);
        InteractState::GroupDragged { group, grab_offset }
    }

    /// The group is the selection root. Clicks inside its bounds address
    /// child shapes (topmost wins); a click outside pops back to neutral.
    fn on_group_selected(&mut self, frame: &FrameInput, group: usize) -> InteractState {
        if frame.just_clicked {
            if !self.scene.groups()[group].in_bounds(frame.mouse) {
                self.scene.group_mut(group).deactivate();
                return InteractState::Neutral;
            }
            let local = frame.mouse - self.scene.groups()[group].position();
            if let Some(shape) = self.scene.groups()[group].shape_index_at(local) {
                return InteractState::ShapeClicked {
                    group,
                    shape,
                    press_pos: frame.mouse,
                    click_tick: frame.tick,
                };
            }
        }
        InteractState::GroupSelected { group }
    }

    /// A shape inside the selected group is grabbed. Same window logic as
    /// the group level, dropping back to the selected group on timeout.
    fn on_shape_clicked(
        &mut self,
        frame: &FrameInput,
        group: usize,
        shape: usize,
        press_pos: Point,
        click_tick: u64,
    ) -> InteractState {
        if frame.tick > click_tick + DOUBLE_CLICK_TICKS {
            return InteractState::GroupSelected { group };
        }
        if frame.just_clicked && frame.mouse == press_pos {
            self.scene.group_mut(group).activate_shape(shape);
            return InteractState::ShapeSelected { group, shape };
        }
        if frame.is_down && frame.moved_since_down {
            let grab_offset = self.scene.groups()[group].shapes()[shape].position() - press_pos;
            return InteractState::ShapeDragged { group, shape, grab_offset };
        }
        InteractState::ShapeClicked { group, shape, press_pos, click_tick }
    }

    /// The shape follows the mouse within its group until the button comes
    /// up; the owning group's bounds refresh with every repositioning.
    fn on_shape_dragged(
        &mut self,
        frame: &FrameInput,
        group: usize,
        shape: usize,
        grab_offset: Point,
    ) -> InteractState {
        if !frame.is_down {
            return InteractState::GroupSelected { group };
        }
        self.scene.group_mut(group).move_shape(shape, frame.mouse + grab_offset);
        InteractState::ShapeDragged { group, shape, grab_offset }
    }

    /// The shape is the selected leaf. A click outside it drops one level;
    /// a click outside the whole group's bounds clears both selections in
    /// the same frame.
    fn on_shape_selected(&mut self, frame: &FrameInput, group: usize, shape: usize) -> InteractState {
        if frame.just_clicked {
            let local = frame.mouse - self.scene.groups()[group].position();
            if !self.scene.groups()[group].shapes()[shape].contains_point(local) {
                self.scene.group_mut(group).deactivate_shape(shape);
                if !self.scene.groups()[group].in_bounds(frame.mouse) {
                    self.scene.group_mut(group).deactivate();
                    return InteractState::Neutral;
                }
                return InteractState::GroupSelected { group };
            }
        }
        InteractState::ShapeSelected { group, shape }
    }
}
