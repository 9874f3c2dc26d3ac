//! Perceptual brightness correction
//!
//! LEDs look far brighter at low duty cycles than a linear ramp suggests, so
//! linear channel values are pushed through a monotonic lookup table before
//! they reach the PWM generator.

/// Number of table entries, one per 10-bit input value
pub const GAMMA_TABLE_SIZE: usize = 1024;

const DUTY_MAX: u16 = 1023;

/// Linear value to duty count lookup, both on a 0-1023 scale
#[derive(Clone)]
pub struct GammaTable {
    lut: [u16; GAMMA_TABLE_SIZE],
}

impl GammaTable {
    /// Identity mapping
    #[allow(clippy::cast_possible_truncation)]
    pub const fn linear() -> Self {
        let mut lut = [0u16; GAMMA_TABLE_SIZE];
        let mut i = 0;
        while i < GAMMA_TABLE_SIZE {
            lut[i] = i as u16;
            i += 1;
        }
        Self { lut }
    }

    /// `duty = 1023 * (x / 1023) ^ exponent`, rounded
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn power(exponent: f32) -> Self {
        let max = f32::from(DUTY_MAX);
        let mut lut = [0u16; GAMMA_TABLE_SIZE];
        for (i, duty) in lut.iter_mut().enumerate() {
            let x = i as f32 / max;
            let y = libm::roundf(libm::powf(x, exponent) * max);
            *duty = y.clamp(0.0, max) as u16;
        }
        Self::from_table(lut)
    }

    /// The quadratic curve the light heads are calibrated for
    pub fn quadratic() -> Self {
        Self::power(2.0)
    }

    /// Use a table generated elsewhere
    ///
    /// Entries above 1023 are clamped and the table is forced to be
    /// non-decreasing.
    pub const fn from_table(mut lut: [u16; GAMMA_TABLE_SIZE]) -> Self {
        let mut i = 0;
        let mut floor = 0;
        while i < GAMMA_TABLE_SIZE {
            if lut[i] > DUTY_MAX {
                lut[i] = DUTY_MAX;
            }
            if lut[i] < floor {
                lut[i] = floor;
            }
            floor = lut[i];
            i += 1;
        }
        Self { lut }
    }

    /// Map a linear channel value to a duty count
    #[inline]
    pub fn map(&self, value: u16) -> u16 {
        self.lut[usize::from(value.min(DUTY_MAX))]
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.lut
    }
}

impl Default for GammaTable {
    fn default() -> Self {
        Self::quadratic()
    }
}

impl core::fmt::Debug for GammaTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GammaTable")
            .field("min", &self.lut[0])
            .field("max", &self.lut[GAMMA_TABLE_SIZE - 1])
            .finish()
    }
}
