//! Solid color fill, used by the success blink

use embassy_time::Instant;

use super::Effect;
use crate::color::Rgb;
use crate::layout::Matrix;

#[derive(Debug, Clone, Copy)]
pub struct SolidEffect {
    color: Rgb,
}

impl SolidEffect {
    pub const fn new(color: Rgb) -> Self {
        Self { color }
    }
}

impl Effect for SolidEffect {
    fn render(&mut self, _now: Instant, matrix: &mut Matrix<'_>) {
        matrix.fill(self.color);
    }
}
