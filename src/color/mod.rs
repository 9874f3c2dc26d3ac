mod palette;
mod utils;

use smart_leds::RGB;

pub use palette::{
    ANIMATION_FADE, ANIMATION_FLASH, ANIMATION_SMOOTH, ANIMATION_STROBE, Animation,
    STATIC_COLORS, animation, static_color,
};
pub use utils::{interpolate, interpolate_channel, rgb10, scale_brightness};

/// Linear color with 10-bit channels (0-1023)
pub type Rgb10 = RGB<u16>;

/// Largest channel value
pub const CHANNEL_MAX: u16 = 1023;
