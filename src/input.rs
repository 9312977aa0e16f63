//! Keyboard input as the simulation sees it: a held / not-held query per key.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Confirm,
    Pause,
}

pub trait KeyInput {
    fn is_key_down(&self, key: Key) -> bool;
}

/// The set of keys held during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub confirm: bool,
    pub pause: bool,
}

impl KeySnapshot {
    /// No key held.
    pub fn none() -> Self {
        Self::default()
    }

    /// Same snapshot with `key` also held.
    pub fn with(mut self, key: Key) -> Self {
        self.set(key, true);
        self
    }

    pub fn set(&mut self, key: Key, down: bool) {
        match key {
            Key::Left => self.left = down,
            Key::Right => self.right = down,
            Key::Fire => self.fire = down,
            Key::Confirm => self.confirm = down,
            Key::Pause => self.pause = down,
        }
    }
}

impl KeyInput for KeySnapshot {
    fn is_key_down(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Fire => self.fire,
            Key::Confirm => self.confirm,
            Key::Pause => self.pause,
        }
    }
}
