mod action;
mod shared;

pub use action::{Action, Bindings, Key};
pub use shared::SharedInput;

use glam::DVec2;
use winit::event::WindowEvent;

/// Read side of the input aggregator, as seen by one simulation tick.
pub trait InputSource {
    fn is_active(&self, action: Action) -> bool;
    /// Cursor displacement captured at the last checkpoint.
    fn cursor_delta(&self) -> DVec2;
}

/// Per-tick copy of held actions and checkpointed cursor data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    pub held: [bool; Action::COUNT],
    pub cursor_delta: DVec2,
    pub cursor: DVec2,
}

impl InputSource for InputSnapshot {
    fn is_active(&self, action: Action) -> bool {
        self.held[action.idx()]
    }

    fn cursor_delta(&self) -> DVec2 {
        self.cursor_delta
    }
}

/// Merges asynchronous key and cursor events into state the simulation reads
/// once per tick.
///
/// Cursor motion accumulates into a pending buffer until [`checkpoint_cursor`]
/// moves it into the readable delta, so any number of events between two ticks
/// is summed and none is counted twice.
///
/// [`checkpoint_cursor`]: InputState::checkpoint_cursor
pub struct InputState {
    bindings: Bindings,
    held: [bool; Action::COUNT],
    /// motion since the last checkpoint
    pending: DVec2,
    /// last absolute cursor sample, `None` until a baseline exists
    last_sample: Option<DVec2>,
    cursor_delta: DVec2,
    cursor: DVec2,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(Bindings::default())
    }
}

impl InputState {
    pub fn new(bindings: Bindings) -> Self {
        Self {
            bindings,
            held: [false; Action::COUNT],
            pending: DVec2::ZERO,
            last_sample: None,
            cursor_delta: DVec2::ZERO,
            cursor: DVec2::ZERO,
        }
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn set_action(&mut self, action: Action, pressed: bool) {
        self.held[action.idx()] = pressed;
    }

    pub fn key_event(&mut self, key: Key, pressed: bool) {
        for action in self.bindings.actions(key) {
            self.held[action.idx()] = pressed;
        }
    }

    /// Absolute cursor sample. The first sample only sets the baseline.
    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            crate::warn!("dropped non-finite cursor sample ({x}, {y})");
            return;
        }
        let sample = DVec2::new(x, y);
        if let Some(last) = self.last_sample {
            self.pending += sample - last;
        }
        self.last_sample = Some(sample);
    }

    /// Relative cursor motion, e.g. raw mouse deltas.
    pub fn accumulate_cursor(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            crate::warn!("dropped non-finite cursor delta ({dx}, {dy})");
            return;
        }
        self.pending += DVec2::new(dx, dy);
    }

    pub fn checkpoint_cursor(&mut self) {
        self.cursor_delta = std::mem::take(&mut self.pending);
        if let Some(last) = self.last_sample {
            self.cursor = last;
        }
    }

    pub fn is_active(&self, action: Action) -> bool {
        self.held[action.idx()]
    }

    pub fn cursor_delta(&self) -> DVec2 {
        self.cursor_delta
    }

    /// Absolute cursor position at the last checkpoint.
    pub fn cursor(&self) -> DVec2 {
        self.cursor
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            held: self.held,
            cursor_delta: self.cursor_delta,
            cursor: self.cursor,
        }
    }

    /// Releases every action and forgets the cursor baseline.
    /// Motion already buffered is kept for the next checkpoint.
    pub fn release_all(&mut self) {
        self.held = [false; Action::COUNT];
        self.last_sample = None;
    }

    pub fn window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                device_id: _,
                event,
                is_synthetic: _,
            } => {
                if event.repeat {
                    return;
                }
                if let winit::keyboard::PhysicalKey::Code(key) = event.physical_key {
                    self.key_event(key, event.state.is_pressed());
                }
            }
            WindowEvent::CursorMoved {
                device_id: _,
                position,
            } => self.cursor_moved(position.x, position.y),
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }
}

impl InputSource for InputState {
    fn is_active(&self, action: Action) -> bool {
        InputState::is_active(self, action)
    }

    fn cursor_delta(&self) -> DVec2 {
        InputState::cursor_delta(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn first_sample_is_baseline() {
        let mut input = InputState::default();
        input.cursor_moved(640.0, 360.0);
        input.checkpoint_cursor();
        assert_eq!(input.cursor_delta(), DVec2::ZERO);
        assert_eq!(input.cursor(), DVec2::new(640.0, 360.0));

        input.cursor_moved(650.0, 350.0);
        input.checkpoint_cursor();
        assert_eq!(input.cursor_delta(), DVec2::new(10.0, -10.0));
    }

    #[test]
    fn deltas_sum_between_checkpoints() {
        let mut input = InputState::default();
        input.accumulate_cursor(3.0, 4.0);
        input.accumulate_cursor(2.0, -1.0);
        input.checkpoint_cursor();
        assert_eq!(input.cursor_delta(), DVec2::new(5.0, 3.0));

        let mut input = InputState::default();
        input.cursor_moved(10.0, 10.0);
        input.cursor_moved(13.0, 14.0);
        input.cursor_moved(15.0, 13.0);
        input.checkpoint_cursor();
        assert_eq!(input.cursor_delta(), DVec2::new(5.0, 3.0));
        assert_eq!(input.cursor(), DVec2::new(15.0, 13.0));
    }

    #[test]
    fn checkpoint_drains_once() {
        let mut input = InputState::default();
        input.accumulate_cursor(1.0, 2.0);
        input.checkpoint_cursor();
        assert_eq!(input.cursor_delta(), DVec2::new(1.0, 2.0));
        // stable until the next checkpoint
        assert_eq!(input.cursor_delta(), DVec2::new(1.0, 2.0));
        input.checkpoint_cursor();
        assert_eq!(input.cursor_delta(), DVec2::ZERO);
    }

    #[test]
    fn non_finite_cursor_input_is_dropped() {
        let mut input = InputState::default();
        input.cursor_moved(0.0, 0.0);
        input.cursor_moved(f64::NAN, 5.0);
        input.accumulate_cursor(f64::INFINITY, 1.0);
        input.cursor_moved(2.0, 1.0);
        input.checkpoint_cursor();
        assert_eq!(input.cursor_delta(), DVec2::new(2.0, 1.0));
    }

    #[test]
    fn keys_drive_bound_actions() {
        let mut input = InputState::default();
        input.key_event(Key::KeyW, true);
        input.key_event(Key::KeyQ, true);
        assert!(input.is_active(Action::MoveForward));
        assert!(!input.is_active(Action::MoveBackward));
        input.key_event(Key::KeyW, false);
        assert!(!input.is_active(Action::MoveForward));

        input.set_action(Action::Quit, true);
        assert!(input.is_active(Action::Quit));
        assert!(input.snapshot().is_active(Action::Quit));
    }

    #[test]
    fn focus_loss_releases_and_rebaselines() {
        let mut input = InputState::default();
        input.key_event(Key::KeyD, true);
        input.cursor_moved(100.0, 100.0);
        input.cursor_moved(104.0, 100.0);
        input.window_event(&WindowEvent::Focused(false));
        assert!(!input.is_active(Action::StrafeRight));

        // the jump back in after refocus is not motion
        input.cursor_moved(500.0, 20.0);
        input.checkpoint_cursor();
        assert_eq!(input.cursor_delta(), DVec2::new(4.0, 0.0));
    }
}
