//! Failure cue: both diagonals of the matrix

use embassy_time::Instant;

use super::Effect;
use crate::color::Rgb;
use crate::config::{MATRIX_HEIGHT, MATRIX_WIDTH};
use crate::layout::Matrix;

/// Whether `(x, y)` lies on one of the two diagonals
///
/// Diagonals start at the top corners of the first row, so on a matrix taller
/// than it is wide they meet the side edges and stop there.
#[inline]
pub const fn on_cross(x: usize, y: usize) -> bool {
    x == y || x + y == MATRIX_WIDTH - 1
}

#[derive(Debug, Clone, Copy)]
pub struct CrossEffect {
    color: Rgb,
}

impl CrossEffect {
    pub const fn new(color: Rgb) -> Self {
        Self { color }
    }
}

impl Effect for CrossEffect {
    fn render(&mut self, _now: Instant, matrix: &mut Matrix<'_>) {
        matrix.clear();
        for y in 0..MATRIX_HEIGHT {
            for x in 0..MATRIX_WIDTH {
                if on_cross(x, y) {
                    matrix.set(x, y, self.color);
                }
            }
        }
    }
}
