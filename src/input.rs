//! Keyboard and pointer input
//!
//! Host event handlers only flip flags here. The game loop calls
//! [`InputTracker::sample`] once per tick, which hands back an
//! [`InputState`] and clears the one-shot requests.

use crate::sim::InputState;

/// Game actions a key can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    LeftFlipper,
    RightFlipper,
    Launch,
}

impl Key {
    /// Map a DOM-style key code (`KeyboardEvent.code`) to an action
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::LeftFlipper),
            "ArrowRight" | "KeyD" => Some(Key::RightFlipper),
            "Space" => Some(Key::Launch),
            _ => None,
        }
    }
}

/// Accumulates host input events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    left_held: bool,
    right_held: bool,
    launch: bool,
    restart: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed. Unknown codes are ignored.
    pub fn key_down(&mut self, code: &str) {
        match Key::from_code(code) {
            Some(Key::LeftFlipper) => self.left_held = true,
            Some(Key::RightFlipper) => self.right_held = true,
            Some(Key::Launch) => self.launch = true,
            None => log::trace!("Ignoring key down {:?}", code),
        }
    }

    /// Key released. Launch has no release action.
    pub fn key_up(&mut self, code: &str) {
        match Key::from_code(code) {
            Some(Key::LeftFlipper) => self.left_held = false,
            Some(Key::RightFlipper) => self.right_held = false,
            Some(Key::Launch) | None => {}
        }
    }

    /// Click/tap on the board launches, same as Space
    pub fn pointer_click(&mut self) {
        self.launch = true;
    }

    /// Restart button
    pub fn restart_clicked(&mut self) {
        self.restart = true;
    }

    /// Current input for one tick; one-shot requests are consumed
    pub fn sample(&mut self) -> InputState {
        let input = self.peek();
        self.launch = false;
        self.restart = false;
        input
    }

    /// Current input without consuming anything
    pub fn peek(&self) -> InputState {
        InputState {
            left: self.left_held,
            right: self.right_held,
            launch_requested: self.launch,
            restart_requested: self.restart,
        }
    }
}
