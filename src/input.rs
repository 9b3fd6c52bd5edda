//! Input capability
//!
//! The simulation never sees keys or touches, only logical actions. Hosts
//! feed an `InputState` from keyboard or touch handlers; tests drive it
//! directly.

use serde::{Deserialize, Serialize};

/// Logical actions the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Jump,
    Kick,
    Stab,
    Shoot,
    /// Pause toggle; also starts the game from the splash screen and retries
    /// after game over
    Pause,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Left,
        Action::Right,
        Action::Jump,
        Action::Kick,
        Action::Stab,
        Action::Shoot,
        Action::Pause,
    ];

    /// Keyboard mapping (`KeyboardEvent.key`, case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "a" | "arrowleft" => Some(Action::Left),
            "d" | "arrowright" => Some(Action::Right),
            "w" | "arrowup" => Some(Action::Jump),
            "," => Some(Action::Kick),
            "." => Some(Action::Stab),
            "/" => Some(Action::Shoot),
            " " | "escape" => Some(Action::Pause),
            _ => None,
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// What the simulation needs from an input device
pub trait InputSource {
    /// Level-triggered: is the action held right now
    fn is_action_down(&self, action: Action) -> bool;
    /// Edge-triggered: was it pressed since the last read. Reading consumes it.
    fn is_action_pressed(&mut self, action: Action) -> bool;
}

/// Held/pressed bitsets for every action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    down: u8,
    pressed: u8,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key/button went down. Auto-repeat while held does not re-arm the edge.
    pub fn press(&mut self, action: Action) {
        if self.down & action.bit() == 0 {
            self.pressed |= action.bit();
        }
        self.down |= action.bit();
    }

    /// Key/button released; also discards an unread press
    pub fn release(&mut self, action: Action) {
        self.down &= !action.bit();
        self.pressed &= !action.bit();
    }

    /// Keyboard event helpers
    pub fn key_down(&mut self, key: &str) {
        if let Some(action) = Action::from_key(key) {
            self.press(action);
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(action) = Action::from_key(key) {
            self.release(action);
        }
    }

    /// Drop pending presses (used on restart so stale edges don't leak in)
    pub fn reset(&mut self) {
        self.pressed = 0;
    }

    /// Release everything (focus loss)
    pub fn clear(&mut self) {
        self.down = 0;
        self.pressed = 0;
    }
}

impl InputSource for InputState {
    fn is_action_down(&self, action: Action) -> bool {
        self.down & action.bit() != 0
    }

    fn is_action_pressed(&mut self, action: Action) -> bool {
        let pressed = self.pressed & action.bit() != 0;
        self.pressed &= !action.bit();
        pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_consumed_on_read() {
        let mut input = InputState::new();
        input.press(Action::Jump);
        assert!(input.is_action_down(Action::Jump));
        assert!(input.is_action_pressed(Action::Jump));
        assert!(!input.is_action_pressed(Action::Jump));
        assert!(input.is_action_down(Action::Jump));
    }

    #[test]
    fn test_held_key_does_not_rearm() {
        let mut input = InputState::new();
        input.press(Action::Kick);
        assert!(input.is_action_pressed(Action::Kick));
        input.press(Action::Kick); // auto-repeat
        assert!(!input.is_action_pressed(Action::Kick));
        input.release(Action::Kick);
        input.press(Action::Kick);
        assert!(input.is_action_pressed(Action::Kick));
    }

    #[test]
    fn test_key_mapping() {
        let mut input = InputState::new();
        input.key_down("D");
        input.key_down(" ");
        assert!(input.is_action_down(Action::Right));
        assert!(input.is_action_pressed(Action::Pause));
        input.key_up("d");
        assert!(!input.is_action_down(Action::Right));
        assert_eq!(Action::from_key("q"), None);
    }

    #[test]
    fn test_reset_keeps_held_keys() {
        let mut input = InputState::new();
        input.press(Action::Right);
        input.press(Action::Shoot);
        input.reset();
        assert!(input.is_action_down(Action::Right));
        assert!(!input.is_action_pressed(Action::Shoot));
        input.clear();
        assert!(!input.is_action_down(Action::Right));
    }
}
