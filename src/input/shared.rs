use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{Action, InputSnapshot, InputState, Key};

/// Cloneable handle for feeding [`InputState`] from another thread.
///
/// Held actions and the cursor buffer live behind one lock, so
/// [`checkpoint`](SharedInput::checkpoint) always sees every event that
/// finished before it and hands back a consistent snapshot.
#[derive(Clone, Default)]
pub struct SharedInput {
    state: Arc<Mutex<InputState>>,
}

impl SharedInput {
    pub fn new(state: InputState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, InputState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_action(&self, action: Action, pressed: bool) {
        self.lock().set_action(action, pressed);
    }

    pub fn key_event(&self, key: Key, pressed: bool) {
        self.lock().key_event(key, pressed);
    }

    pub fn cursor_moved(&self, x: f64, y: f64) {
        self.lock().cursor_moved(x, y);
    }

    pub fn accumulate_cursor(&self, dx: f64, dy: f64) {
        self.lock().accumulate_cursor(dx, dy);
    }

    pub fn checkpoint(&self) -> InputSnapshot {
        let mut state = self.lock();
        state.checkpoint_cursor();
        state.snapshot()
    }
}
