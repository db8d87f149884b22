//! Global brightness ceiling

use super::Filter;
use crate::{color::Rgb, math8::scale8};

#[derive(Debug, Clone, Copy)]
pub(crate) struct BrightnessFilter {
    /// Brightness value (0-255 = 0.0-1.0)
    brightness: u8,
}

impl BrightnessFilter {
    pub(crate) const fn new(brightness: u8) -> Self {
        Self { brightness }
    }

    pub(crate) const fn get(self) -> u8 {
        self.brightness
    }

    pub(crate) fn set(&mut self, brightness: u8) {
        self.brightness = brightness;
    }
}

impl Filter for BrightnessFilter {
    fn apply(&mut self, frame: &mut [Rgb]) {
        let current = self.brightness;

        if current == 255 {
            return;
        }

        if current == 0 {
            frame.fill(Rgb::default());
            return;
        }

        for pixel in frame.iter_mut() {
            pixel.r = scale8(pixel.r, current);
            pixel.g = scale8(pixel.g, current);
            pixel.b = scale8(pixel.b, current);
        }
    }
}
