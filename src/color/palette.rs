//! Built-in color tables
//!
//! Static colors are laid out in rows: shades of red, green and blue
//! drifting towards the next primary, with white in the first row.

use super::{Rgb10, rgb10};
use crate::protocol::AnimationId;

/// Named color sequence played by the animation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    pub id: AnimationId,
    pub colors: &'static [Rgb10],
    /// Interpolate between neighbours instead of stepping
    pub smooth: bool,
}

impl Animation {
    pub const fn name(&self) -> &'static str {
        self.id.as_str()
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn color_count(&self) -> u8 {
        self.colors.len() as u8
    }
}

pub const STATIC_COLORS: [Rgb10; 16] = [
    rgb10(1023, 0, 0),
    rgb10(0, 1023, 0),
    rgb10(0, 0, 1023),
    rgb10(1023, 1023, 1023),
    rgb10(1023, 256, 0),
    rgb10(0, 1023, 256),
    rgb10(256, 0, 1023),
    rgb10(1023, 512, 0),
    rgb10(0, 1023, 512),
    rgb10(512, 0, 1023),
    rgb10(1023, 768, 0),
    rgb10(0, 1023, 768),
    rgb10(768, 0, 1023),
    rgb10(1023, 1023, 0),
    rgb10(0, 1023, 1023),
    rgb10(1023, 0, 1023),
];

const RED: Rgb10 = rgb10(1023, 0, 0);
const GREEN: Rgb10 = rgb10(0, 1023, 0);
const BLUE: Rgb10 = rgb10(0, 0, 1023);
const YELLOW: Rgb10 = rgb10(1023, 1023, 0);
const CYAN: Rgb10 = rgb10(0, 1023, 1023);
const MAGENTA: Rgb10 = rgb10(1023, 0, 1023);
const WHITE: Rgb10 = rgb10(1023, 1023, 1023);
const OFF: Rgb10 = rgb10(0, 0, 0);

pub const ANIMATION_FLASH: Animation = Animation {
    id: AnimationId::Flash,
    colors: &[RED, GREEN, BLUE],
    smooth: false,
};

pub const ANIMATION_STROBE: Animation = Animation {
    id: AnimationId::Strobe,
    colors: &[RED, GREEN, BLUE, YELLOW, CYAN, MAGENTA, WHITE],
    smooth: false,
};

pub const ANIMATION_FADE: Animation = Animation {
    id: AnimationId::Fade,
    colors: &[RED, OFF, GREEN, OFF, BLUE, OFF],
    smooth: true,
};

pub const ANIMATION_SMOOTH: Animation = Animation {
    id: AnimationId::Smooth,
    colors: &[GREEN, RED, BLUE, GREEN, WHITE],
    smooth: true,
};

/// Look up a static color by index
pub fn static_color(index: u8) -> Option<Rgb10> {
    STATIC_COLORS.get(usize::from(index)).copied()
}

/// Look up the sequence for an animation id
pub const fn animation(id: AnimationId) -> &'static Animation {
    match id {
        AnimationId::Flash => &ANIMATION_FLASH,
        AnimationId::Strobe => &ANIMATION_STROBE,
        AnimationId::Fade => &ANIMATION_FADE,
        AnimationId::Smooth => &ANIMATION_SMOOTH,
    }
}
