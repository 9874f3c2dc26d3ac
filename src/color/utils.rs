use super::{CHANNEL_MAX, Rgb10};
use crate::state::BRIGHTNESS_MAX;

/// Build a color from 10-bit channels
pub const fn rgb10(r: u16, g: u16, b: u16) -> Rgb10 {
    Rgb10 { r, g, b }
}

/// Blend two channel values
///
/// `t` runs from 0 (all `a`) to 1023 (all `b`). Truncating division, no
/// rounding correction.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn interpolate_channel(a: u16, b: u16, t: u16) -> u16 {
    let t = (if t > CHANNEL_MAX { CHANNEL_MAX } else { t }) as u32;
    let max = CHANNEL_MAX as u32;
    ((a as u32 * (max - t) + b as u32 * t) / max) as u16
}

/// Blend two colors channel by channel
#[inline]
pub const fn interpolate(a: Rgb10, b: Rgb10, t: u16) -> Rgb10 {
    Rgb10 {
        r: interpolate_channel(a.r, b.r, t),
        g: interpolate_channel(a.g, b.g, t),
        b: interpolate_channel(a.b, b.b, t),
    }
}

/// Scale a color by a brightness level (1-63)
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn scale_brightness(color: Rgb10, brightness: u8) -> Rgb10 {
    let brightness = (if brightness > BRIGHTNESS_MAX {
        BRIGHTNESS_MAX
    } else {
        brightness
    }) as u32;
    let max = BRIGHTNESS_MAX as u32;
    Rgb10 {
        r: (color.r as u32 * brightness / max) as u16,
        g: (color.g as u32 * brightness / max) as u16,
        b: (color.b as u32 * brightness / max) as u16,
    }
}
