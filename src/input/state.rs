//! Input state management
//!
//! Polls keyboard (macroquad) and gamepad once per frame and folds both
//! into a single `Controls` snapshot for the scene.

use macroquad::prelude::*;
use super::button;
use super::{Gamepad, PadSnapshot};

/// Stick tilt past which a direction counts as held
const STICK_THRESHOLD: f32 = 0.5;

/// Directions held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Controls {
    /// Held on either device.
    pub fn merge(self, other: Controls) -> Controls {
        Controls {
            left: self.left || other.left,
            right: self.right || other.right,
            up: self.up || other.up,
            down: self.down || other.down,
        }
    }

    /// D-pad and stick of a pad; the south button also jumps.
    pub fn from_pad(pad: &PadSnapshot) -> Controls {
        if !pad.connected {
            return Controls::default();
        }
        let buttons = Controls {
            left: pad.is_down(button::DPAD_LEFT),
            right: pad.is_down(button::DPAD_RIGHT),
            up: pad.is_down(button::DPAD_UP) || pad.is_down(button::SOUTH),
            down: pad.is_down(button::DPAD_DOWN),
        };
        buttons.merge(Controls::from_stick(pad.stick))
    }

    /// Digital directions from an analog stick (y up).
    pub fn from_stick(stick: Vec2) -> Controls {
        Controls {
            left: stick.x <= -STICK_THRESHOLD,
            right: stick.x >= STICK_THRESHOLD,
            up: stick.y >= STICK_THRESHOLD,
            down: stick.y <= -STICK_THRESHOLD,
        }
    }
}

/// Unified input state that handles both keyboard and gamepad
pub struct InputState {
    gamepad: Gamepad,
}

impl InputState {
    pub fn new() -> Self {
        Self { gamepad: Gamepad::new() }
    }

    /// Call once per frame before reading controls
    pub fn poll(&mut self) {
        self.gamepad.poll();
    }

    pub fn controls(&self) -> Controls {
        self.keyboard().merge(self.gamepad_controls())
    }

    fn keyboard(&self) -> Controls {
        Controls {
            left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
            up: is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
            down: is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
        }
    }

    fn gamepad_controls(&self) -> Controls {
        Controls::from_pad(self.gamepad.snapshot())
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_is_or() {
        let keys = Controls { left: true, ..Default::default() };
        let pad = Controls { up: true, ..Default::default() };
        let both = keys.merge(pad);
        assert_eq!(both, Controls { left: true, up: true, right: false, down: false });
    }

    #[test]
    fn test_pad_south_button_jumps() {
        let pad = PadSnapshot {
            connected: true,
            buttons: 1 << button::SOUTH,
            stick: vec2(0.8, 0.0),
        };
        let c = Controls::from_pad(&pad);
        assert!(c.up && c.right && !c.left && !c.down);
        assert_eq!(Controls::from_pad(&PadSnapshot::default()), Controls::default());
    }

    #[test]
    fn test_stick_threshold() {
        assert_eq!(Controls::from_stick(vec2(-0.3, 0.0)), Controls::default());
        let c = Controls::from_stick(vec2(-0.9, 0.6));
        assert!(c.left && c.up && !c.right && !c.down);
    }
}
