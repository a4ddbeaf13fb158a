//! Polled input
//!
//! The host owns the real devices. Each frame the simulation asks an
//! [`InputSource`] a handful of questions and folds the answers into a
//! [`TickInput`].

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::TickInput;

/// Logical controls, independent of physical bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    /// Primary fire (click)
    Fire,
    /// Held-down fire
    AltFire,
    /// Mana ring
    Burst,
    Pause,
}

/// Device state as seen by the simulation
pub trait InputSource {
    /// Currently down
    fn is_held(&self, control: Control) -> bool;
    /// Went down since the previous frame
    fn just_pressed(&self, control: Control) -> bool;
    /// Cursor position in screen space
    fn cursor(&self) -> Vec2;
}

impl TickInput {
    /// Snapshot the source for one frame
    pub fn poll(source: &impl InputSource) -> Self {
        Self {
            up: source.is_held(Control::Up),
            down: source.is_held(Control::Down),
            left: source.is_held(Control::Left),
            right: source.is_held(Control::Right),
            fire: source.just_pressed(Control::Fire) || source.is_held(Control::AltFire),
            burst: source.just_pressed(Control::Burst),
            pause: source.just_pressed(Control::Pause),
            cursor: source.cursor(),
            idle_mode: false,
        }
    }
}

/// Key state fed by press/release events, with per-frame edge detection
#[derive(Debug, Clone, Default)]
pub struct ControlState {
    held: HashSet<Control>,
    pressed: HashSet<Control>,
    cursor: Vec2,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, control: Control) {
        if self.held.insert(control) {
            self.pressed.insert(control);
        }
    }

    pub fn release(&mut self, control: Control) {
        self.held.remove(&control);
    }

    pub fn set_cursor(&mut self, cursor: Vec2) {
        self.cursor = cursor;
    }

    /// Forget this frame's edges; call once per frame after polling
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }
}

impl InputSource for ControlState {
    fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    fn just_pressed(&self, control: Control) -> bool {
        self.pressed.contains(&control)
    }

    fn cursor(&self) -> Vec2 {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_maps_controls() {
        let mut state = ControlState::new();
        state.press(Control::Up);
        state.press(Control::Left);
        state.set_cursor(Vec2::new(10.0, 20.0));

        let input = TickInput::poll(&state);
        assert!(input.up && input.left);
        assert!(!input.down && !input.right);
        assert_eq!(input.cursor, Vec2::new(10.0, 20.0));
        assert!(!input.fire);
        assert!(!input.idle_mode);
    }

    #[test]
    fn test_fire_is_edge_triggered_but_alt_fire_holds() {
        let mut state = ControlState::new();
        state.press(Control::Fire);
        assert!(TickInput::poll(&state).fire);
        state.end_frame();
        // Still held, but no new press
        assert!(!TickInput::poll(&state).fire);

        state.press(Control::AltFire);
        state.end_frame();
        assert!(TickInput::poll(&state).fire);
    }

    #[test]
    fn test_pause_and_burst_need_fresh_presses() {
        let mut state = ControlState::new();
        state.press(Control::Pause);
        state.press(Control::Burst);
        let input = TickInput::poll(&state);
        assert!(input.pause && input.burst);

        state.end_frame();
        // Repeat press while held is not a new edge
        state.press(Control::Pause);
        assert!(!TickInput::poll(&state).pause);

        state.release(Control::Pause);
        state.press(Control::Pause);
        assert!(TickInput::poll(&state).pause);
    }
}
