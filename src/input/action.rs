use winit::keyboard::KeyCode;

pub type Key = KeyCode;

/// Input intent, independent of the physical key that triggers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    Quit,
}

impl Action {
    pub const COUNT: usize = 5;

    /// Every action, in the order movement is evaluated.
    pub const ALL: [Action; Self::COUNT] = [
        Action::MoveForward,
        Action::MoveBackward,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::Quit,
    ];

    pub const fn idx(self) -> usize {
        self as usize
    }
}

/// Fixed action to key table, one key per action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    keys: [Key; Action::COUNT],
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            keys: [Key::KeyW, Key::KeyS, Key::KeyA, Key::KeyD, Key::Escape],
        }
    }
}

impl Bindings {
    pub fn with(mut self, action: Action, key: Key) -> Self {
        self.keys[action.idx()] = key;
        self
    }

    pub fn key(&self, action: Action) -> Key {
        self.keys[action.idx()]
    }

    pub fn actions(&self, key: Key) -> impl Iterator<Item = Action> + '_ {
        Action::ALL
            .into_iter()
            .filter(move |&action| self.keys[action.idx()] == key)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn indices_match_all() {
        for (i, action) in Action::ALL.into_iter().enumerate() {
            assert_eq!(action.idx(), i);
        }
    }

    #[test]
    fn rebinding_replaces_old_key() {
        let bindings = Bindings::default().with(Action::MoveForward, Key::ArrowUp);
        assert_eq!(bindings.key(Action::MoveForward), Key::ArrowUp);
        assert_eq!(bindings.actions(Key::KeyW).count(), 0);
        assert_eq!(
            bindings.actions(Key::ArrowUp).collect::<Vec<_>>(),
            vec![Action::MoveForward]
        );
    }
}
