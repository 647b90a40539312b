//! Keyboard Input Module
//!
//! Owned key state that hosts feed with press/release events and read back
//! as an [`InputIntent`] once per frame.
//! Decoupled from any windowing system to use generic key codes.

use super::intent::InputIntent;

/// Generic key codes the player controls respond to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
    Space,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Tracks which control keys are held, plus the pointer drag.
///
/// Arrow keys and WASD are interchangeable; releasing one of a pair does
/// not release the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardState {
    arrows: InputIntent,
    letters: InputIntent,
    pointer_drag: bool,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release event.
    ///
    /// Returns `true` if the key controls the player.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match key {
            KeyCode::ArrowUp => self.arrows.forward = pressed,
            KeyCode::ArrowDown => self.arrows.backward = pressed,
            KeyCode::ArrowLeft => self.arrows.turn_left = pressed,
            KeyCode::ArrowRight => self.arrows.turn_right = pressed,
            KeyCode::W => self.letters.forward = pressed,
            KeyCode::S => self.letters.backward = pressed,
            KeyCode::A => self.letters.turn_left = pressed,
            KeyCode::D => self.letters.turn_right = pressed,
            KeyCode::Space => self.arrows.jump = pressed,
            KeyCode::Unknown => return false,
        }
        true
    }

    /// Pointer drag on the view (manual camera control).
    pub fn set_pointer_drag(&mut self, active: bool) {
        self.pointer_drag = active;
    }

    /// Intent for the current frame.
    pub fn intent(&self) -> InputIntent {
        let (a, l) = (self.arrows, self.letters);
        InputIntent {
            forward: a.forward || l.forward,
            backward: a.backward || l.backward,
            turn_left: a.turn_left || l.turn_left,
            turn_right: a.turn_right || l.turn_right,
            jump: a.jump,
            pointer_drag_active: self.pointer_drag,
        }
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
