//! Gamepad polling for native and WASM
//!
//! Both backends reduce the first connected pad to a `PadSnapshot` once
//! per frame; everything downstream reads the snapshot.
//!
//! Native: gilrs
//! WASM: the `aspera_gamepad` JS plugin in web/index.html (Web Gamepad API)

use macroquad::prelude::Vec2;

/// Button bits, numbered like the Web Gamepad API standard mapping.
pub mod button {
    /// South face button (A on Xbox, Cross on PlayStation)
    pub const SOUTH: u32 = 0;
    pub const DPAD_UP: u32 = 12;
    pub const DPAD_DOWN: u32 = 13;
    pub const DPAD_LEFT: u32 = 14;
    pub const DPAD_RIGHT: u32 = 15;
}

const STICK_DEADZONE: f32 = 0.15;

/// State of one pad for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PadSnapshot {
    pub connected: bool,
    /// Bit `n` set while button `n` is held
    pub buttons: u32,
    /// Left stick after the deadzone, y up
    pub stick: Vec2,
}

impl PadSnapshot {
    pub fn is_down(&self, button: u32) -> bool {
        self.connected && self.buttons & (1 << button) != 0
    }
}

#[cfg(target_arch = "wasm32")]
mod backend {
    use super::*;

    extern "C" {
        fn aspera_gamepad_has_gamepad() -> i32;
        fn aspera_gamepad_get_button_mask() -> u32;
        fn aspera_gamepad_get_left_stick_x() -> i32;
        fn aspera_gamepad_get_left_stick_y() -> i32;
    }

    pub struct Backend;

    impl Backend {
        pub fn new() -> Self {
            Backend
        }

        pub fn read(&mut self) -> PadSnapshot {
            // SAFETY: plain value-returning imports registered by the page plugin
            unsafe {
                if aspera_gamepad_has_gamepad() == 0 {
                    return PadSnapshot::default();
                }
                // The plugin scales axes by 10000; the browser reports y down
                let x = aspera_gamepad_get_left_stick_x() as f32 / 10000.0;
                let y = -(aspera_gamepad_get_left_stick_y() as f32 / 10000.0);
                PadSnapshot {
                    connected: true,
                    buttons: aspera_gamepad_get_button_mask(),
                    stick: apply_deadzone(x, y, STICK_DEADZONE),
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use super::*;
    use gilrs::{Axis, Button, Gilrs};
    use macroquad::logging::{info, warn};

    const MAPPING: [(Button, u32); 5] = [
        (Button::South, button::SOUTH),
        (Button::DPadUp, button::DPAD_UP),
        (Button::DPadDown, button::DPAD_DOWN),
        (Button::DPadLeft, button::DPAD_LEFT),
        (Button::DPadRight, button::DPAD_RIGHT),
    ];

    pub struct Backend {
        /// `None` when the platform has no usable gamepad backend
        gilrs: Option<Gilrs>,
    }

    impl Backend {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(gilrs) => {
                    info!("Gamepad backend ready");
                    Some(gilrs)
                }
                Err(e) => {
                    warn!("Gamepad support unavailable, keyboard only: {}", e);
                    None
                }
            };
            Self { gilrs }
        }

        pub fn read(&mut self) -> PadSnapshot {
            let Some(gilrs) = self.gilrs.as_mut() else {
                return PadSnapshot::default();
            };
            // Draining events keeps gilrs' cached state current
            while gilrs.next_event().is_some() {}

            let Some((_, pad)) = gilrs.gamepads().next() else {
                return PadSnapshot::default();
            };
            let buttons = MAPPING
                .iter()
                .filter(|(b, _)| pad.is_pressed(*b))
                .fold(0u32, |mask, (_, bit)| mask | (1u32 << *bit));
            let x = pad.value(Axis::LeftStickX);
            let y = pad.value(Axis::LeftStickY);

            PadSnapshot {
                connected: true,
                buttons,
                stick: apply_deadzone(x, y, STICK_DEADZONE),
            }
        }
    }
}

/// First connected gamepad, sampled once per frame.
pub struct Gamepad {
    backend: backend::Backend,
    snapshot: PadSnapshot,
}

impl Gamepad {
    pub fn new() -> Self {
        Self {
            backend: backend::Backend::new(),
            snapshot: PadSnapshot::default(),
        }
    }

    pub fn poll(&mut self) {
        self.snapshot = self.backend.read();
    }

    pub fn snapshot(&self) -> &PadSnapshot {
        &self.snapshot
    }
}

impl Default for Gamepad {
    fn default() -> Self {
        Self::new()
    }
}

/// Radial deadzone, rescaled so output still spans 0..1.
pub(crate) fn apply_deadzone(x: f32, y: f32, deadzone: f32) -> Vec2 {
    let stick = Vec2::new(x, y);
    let len = stick.length();
    if len < deadzone || len == 0.0 {
        return Vec2::ZERO;
    }
    stick * ((len - deadzone) / (1.0 - deadzone) / len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadzone_zeroes_small_input() {
        assert_eq!(apply_deadzone(0.1, 0.05, 0.15), Vec2::ZERO);
    }

    #[test]
    fn test_deadzone_rescales_full_tilt() {
        let v = apply_deadzone(1.0, 0.0, 0.15);
        assert!((v.x - 1.0).abs() < 1e-6);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_disconnected_pad_reports_nothing() {
        let pad = PadSnapshot { connected: false, buttons: u32::MAX, stick: Vec2::ZERO };
        assert!(!pad.is_down(button::SOUTH));
    }

    #[test]
    fn test_button_bits() {
        let pad = PadSnapshot {
            connected: true,
            buttons: (1 << button::SOUTH) | (1 << button::DPAD_LEFT),
            stick: Vec2::ZERO,
        };
        assert!(pad.is_down(button::SOUTH));
        assert!(pad.is_down(button::DPAD_LEFT));
        assert!(!pad.is_down(button::DPAD_RIGHT));
    }
}
