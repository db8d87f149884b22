use smart_leds::RGB8;
use smart_leds::hsv::Hsv as HSV;

pub use smart_leds::hsv::hsv2rgb;

use crate::math8::map8;

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Inclusive range of hues on the 0-255 color circle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HueBand {
    start: u8,
    end: u8,
}

impl HueBand {
    pub const fn new(start: u8, end: u8) -> Self {
        Self { start, end }
    }

    /// Map a full-range 8-bit sample into the band
    #[inline]
    pub const fn sample(self, value: u8) -> u8 {
        map8(value, self.start, self.end)
    }

    /// Fully saturated color at `value` brightness for the given sample
    #[inline]
    pub fn color(self, sample: u8, value: u8) -> Rgb {
        hsv2rgb(Hsv {
            hue: self.sample(sample),
            sat: 255,
            val: value,
        })
    }
}
