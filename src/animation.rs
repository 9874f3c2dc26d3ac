//! Animation engine
//!
//! Advances an accumulator once per scheduling tick and yields the color the
//! node should show. Two regimes, picked by [`Animation::smooth`]:
//!
//! - stepped: the accumulator grows by `speed * 4 + 1` and the output is the
//!   current color, changing only when the accumulator wraps
//! - smooth: the accumulator grows by `speed + 1` and the output blends the
//!   current and next colors using `t / 4` as a 0-1023 fraction
//!
//! Both regimes wrap after [`T_MAX`] and move to the next color.

use crate::color::{Animation, Rgb10, interpolate};

/// Accumulator ceiling; exceeding it wraps to zero
pub const T_MAX: u16 = 1023 * 4;

/// Interpolation progress through an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationState {
    t: u16,
    current: u8,
    next: u8,
}

impl AnimationState {
    pub const fn new() -> Self {
        Self {
            t: 0,
            current: 0,
            next: 1,
        }
    }

    /// Restart from the first color
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub const fn t(&self) -> u16 {
        self.t
    }

    pub const fn current_index(&self) -> u8 {
        self.current
    }

    pub const fn next_index(&self) -> u8 {
        self.next
    }

    /// Advance by one tick and return the resulting color
    pub fn advance(&mut self, animation: &Animation, speed: u8) -> Rgb10 {
        let step = if animation.smooth {
            u16::from(speed) + 1
        } else {
            u16::from(speed) * 4 + 1
        };

        self.t = self.t.saturating_add(step);
        if self.t > T_MAX {
            self.t = 0;
            self.current = self.next;
            self.next = next_index(self.current, animation.color_count());
        }

        self.sample(animation)
    }

    /// Color at the current position without advancing
    pub fn sample(&self, animation: &Animation) -> Rgb10 {
        let Some(current) = color_at(animation, self.current) else {
            return Rgb10::default();
        };
        if !animation.smooth {
            return current;
        }
        let next = color_at(animation, self.next).unwrap_or(current);
        interpolate(current, next, self.t / 4)
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}

fn color_at(animation: &Animation, index: u8) -> Option<Rgb10> {
    let count = animation.color_count();
    if count == 0 {
        return None;
    }
    animation.colors.get(usize::from(index % count)).copied()
}

const fn next_index(index: u8, count: u8) -> u8 {
    if count == 0 { 0 } else { (index + 1) % count }
}
