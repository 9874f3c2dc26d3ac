//! Per-node light state
//!
//! All state is volatile and resets to [`NodeState::BOOT`] on power-up.

use crate::color::Animation;

/// Highest brightness level
pub const BRIGHTNESS_MAX: u8 = 63;
/// Lowest brightness level; a powered node is never fully dark
pub const BRIGHTNESS_MIN: u8 = 1;
/// Highest animation speed
pub const SPEED_MAX: u8 = 63;
/// Lowest animation speed
pub const SPEED_MIN: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Hold the selected static color
    #[default]
    Static,
    /// Play the active animation
    Animated,
}

/// What the node is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeState {
    pub is_on: bool,
    pub mode: Mode,
    /// 1..=63
    pub brightness: u8,
    /// 0..=63
    pub speed: u8,
    pub color_index: u8,
    pub animation: Option<&'static Animation>,
}

impl NodeState {
    pub const BOOT: Self = Self {
        is_on: true,
        mode: Mode::Static,
        brightness: BRIGHTNESS_MAX,
        speed: SPEED_MAX / 8,
        color_index: 0,
        animation: None,
    };

    pub const fn is_animated(&self) -> bool {
        matches!(self.mode, Mode::Animated)
    }

    /// Step brightness by one, returns `true` if it changed
    pub fn step_brightness(&mut self, up: bool) -> bool {
        let next = step(self.brightness, up, BRIGHTNESS_MIN, BRIGHTNESS_MAX);
        let changed = next != self.brightness;
        self.brightness = next;
        changed
    }

    /// Step speed by one, returns `true` if it changed
    pub fn step_speed(&mut self, up: bool) -> bool {
        let next = step(self.speed, up, SPEED_MIN, SPEED_MAX);
        let changed = next != self.speed;
        self.speed = next;
        changed
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness.clamp(BRIGHTNESS_MIN, BRIGHTNESS_MAX);
    }

    pub fn set_speed(&mut self, speed: u8) {
        self.speed = speed.clamp(SPEED_MIN, SPEED_MAX);
    }
}

impl Default for NodeState {
    fn default() -> Self {
        Self::BOOT
    }
}

const fn step(value: u8, up: bool, min: u8, max: u8) -> u8 {
    if up {
        if value < max { value + 1 } else { max }
    } else if value > min {
        value - 1
    } else {
        min
    }
}
