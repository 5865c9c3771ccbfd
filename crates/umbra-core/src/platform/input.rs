// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Backend-agnostic input events and the per-frame input state built from them.

use std::collections::HashSet;

use crate::math::Vec2;

/// An engine-internal representation of a user input event.
///
/// Windowing backends translate their native events into this enum so the
/// game logic never sees backend types.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A keyboard key was pressed.
    KeyPressed {
        /// A string representation of the physical key code (e.g. `"KeyW"`).
        key_code: String,
    },
    /// A keyboard key was released.
    KeyReleased {
        /// A string representation of the physical key code.
        key_code: String,
    },
    /// A mouse button was pressed.
    MouseButtonPressed {
        /// The mouse button that was pressed.
        button: MouseButton,
    },
    /// A mouse button was released.
    MouseButtonReleased {
        /// The mouse button that was released.
        button: MouseButton,
    },
    /// The mouse cursor moved inside the window.
    MouseMoved {
        /// The new x-coordinate of the cursor.
        x: f32,
        /// The new y-coordinate of the cursor.
        y: f32,
    },
    /// Raw, unaccelerated mouse motion, reported even when the cursor is locked.
    MouseMotion {
        /// Horizontal motion delta.
        delta_x: f32,
        /// Vertical motion delta.
        delta_y: f32,
    },
}

/// An engine-internal representation of a mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The right mouse button.
    Right,
    /// The middle mouse button.
    Middle,
    /// The back mouse button (typically on the side).
    Back,
    /// The forward mouse button (typically on the side).
    Forward,
    /// Another mouse button, identified by a numeric code.
    Other(u16),
}

/// The movement keys the player responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    /// Walk forward (`W`).
    Forward,
    /// Walk backward (`S`).
    Backward,
    /// Strafe left (`A`).
    StrafeLeft,
    /// Strafe right (`D`).
    StrafeRight,
}

impl MoveKey {
    /// Maps a physical key code string to a movement key.
    pub fn from_key_code(key_code: &str) -> Option<Self> {
        match key_code {
            "KeyW" => Some(Self::Forward),
            "KeyS" => Some(Self::Backward),
            "KeyA" => Some(Self::StrafeLeft),
            "KeyD" => Some(Self::StrafeRight),
            _ => None,
        }
    }
}

const ESCAPE_KEY: &str = "Escape";

/// Accumulates input events between two updates.
///
/// Movement is derived from the set of held keys rather than from
/// press/release counters, so a release without a matching press (e.g. after
/// a focus change) cannot leave the player drifting.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<MoveKey>,
    mouse_delta: f32,
    cursor_captured: bool,
    capture_request: Option<bool>,
    quit_requested: bool,
}

impl InputState {
    /// Creates an empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one event into the state.
    pub fn handle(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyPressed { key_code } => {
                if let Some(key) = MoveKey::from_key_code(key_code) {
                    self.held.insert(key);
                } else if key_code == ESCAPE_KEY {
                    if self.cursor_captured {
                        self.capture_request = Some(false);
                    } else {
                        log::info!("Escape pressed with a free cursor, quit requested.");
                        self.quit_requested = true;
                    }
                }
            }
            InputEvent::KeyReleased { key_code } => {
                if let Some(key) = MoveKey::from_key_code(key_code) {
                    self.held.remove(&key);
                }
            }
            InputEvent::MouseButtonPressed {
                button: MouseButton::Left,
            } if !self.cursor_captured => {
                self.capture_request = Some(true);
            }
            InputEvent::MouseMotion { delta_x, .. } if self.cursor_captured => {
                self.mouse_delta += delta_x;
            }
            _ => {}
        }
    }

    /// Returns the movement offset implied by the held keys.
    ///
    /// `y` is the forward axis, `x` the strafe axis (positive = left).
    pub fn movement_offset(&self) -> Vec2 {
        let axis = |pos: MoveKey, neg: MoveKey| {
            let mut v = 0.0;
            if self.held.contains(&pos) {
                v += 1.0;
            }
            if self.held.contains(&neg) {
                v -= 1.0;
            }
            v
        };
        Vec2::new(
            axis(MoveKey::StrafeLeft, MoveKey::StrafeRight),
            axis(MoveKey::Forward, MoveKey::Backward),
        )
    }

    /// Returns and resets the horizontal mouse motion accumulated since the last call.
    pub fn take_mouse_delta(&mut self) -> f32 {
        std::mem::take(&mut self.mouse_delta)
    }

    /// Returns and clears a pending cursor capture (`true`) or release (`false`) request.
    pub fn take_capture_request(&mut self) -> Option<bool> {
        self.capture_request.take()
    }

    /// Records whether the backend actually captured the cursor.
    pub fn set_cursor_captured(&mut self, captured: bool) {
        self.cursor_captured = captured;
        if !captured {
            self.mouse_delta = 0.0;
        }
    }

    /// Returns `true` while the cursor is captured by the window.
    pub fn is_cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Returns `true` once the user asked to leave the game.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Forgets every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: &str) -> InputEvent {
        InputEvent::KeyPressed {
            key_code: key.to_string(),
        }
    }

    fn release(key: &str) -> InputEvent {
        InputEvent::KeyReleased {
            key_code: key.to_string(),
        }
    }

    #[test]
    fn test_movement_offset_follows_held_keys() {
        let mut input = InputState::new();
        input.handle(&press("KeyW"));
        input.handle(&press("KeyA"));
        assert_eq!(input.movement_offset(), Vec2::new(1.0, 1.0));

        input.handle(&press("KeyS"));
        assert_eq!(input.movement_offset(), Vec2::new(1.0, 0.0));

        input.handle(&release("KeyW"));
        input.handle(&release("KeyA"));
        input.handle(&press("KeyD"));
        assert_eq!(input.movement_offset(), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_unmatched_release_does_not_drift() {
        let mut input = InputState::new();
        input.handle(&release("KeyW"));
        assert_eq!(input.movement_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_mouse_motion_ignored_until_captured() {
        let mut input = InputState::new();
        let motion = InputEvent::MouseMotion {
            delta_x: 12.0,
            delta_y: 3.0,
        };
        input.handle(&motion);
        assert_eq!(input.take_mouse_delta(), 0.0);

        input.handle(&InputEvent::MouseButtonPressed {
            button: MouseButton::Left,
        });
        assert_eq!(input.take_capture_request(), Some(true));
        input.set_cursor_captured(true);

        input.handle(&motion);
        input.handle(&motion);
        assert_eq!(input.take_mouse_delta(), 24.0);
        assert_eq!(input.take_mouse_delta(), 0.0);
    }

    #[test]
    fn test_escape_releases_capture_then_quits() {
        let mut input = InputState::new();
        input.set_cursor_captured(true);

        input.handle(&press("Escape"));
        assert_eq!(input.take_capture_request(), Some(false));
        assert!(!input.quit_requested());

        input.set_cursor_captured(false);
        input.handle(&press("Escape"));
        assert!(input.quit_requested());
    }
}
