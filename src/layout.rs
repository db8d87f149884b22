//! Pixel addressing for the serpentine-wired matrices
//!
//! Each matrix is wired as a snake: even rows run left-to-right, odd rows run
//! right-to-left. Matrices are chained, so stage `n` owns the contiguous block
//! `n * LEDS_PER_MATRIX .. (n + 1) * LEDS_PER_MATRIX` of the chain.

use crate::color::Rgb;
use crate::config::{LEDS_PER_MATRIX, MATRIX_HEIGHT, MATRIX_WIDTH, STAGE_COUNT};

/// Map a logical `(x, y)` pixel to its offset inside one matrix block
#[inline]
pub const fn xy_to_index(x: usize, y: usize) -> usize {
    let row_start = y * MATRIX_WIDTH;
    if y.is_multiple_of(2) {
        row_start + x
    } else {
        row_start + (MATRIX_WIDTH - 1 - x)
    }
}

/// Inverse of [`xy_to_index`]
#[inline]
pub const fn index_to_xy(index: usize) -> (usize, usize) {
    let y = index / MATRIX_WIDTH;
    let offset = index % MATRIX_WIDTH;
    if y.is_multiple_of(2) {
        (offset, y)
    } else {
        (MATRIX_WIDTH - 1 - offset, y)
    }
}

/// Get the block of LEDs owned by a stage
///
/// Panics if `stage >= STAGE_COUNT` or the buffer is shorter than the chain.
pub(crate) fn stage_block(leds: &mut [Rgb], stage: usize) -> &mut [Rgb] {
    debug_assert!(stage < STAGE_COUNT);
    let start = stage * LEDS_PER_MATRIX;
    &mut leds[start..start + LEDS_PER_MATRIX]
}

/// Mutable 2D view over a single matrix block
pub struct Matrix<'a> {
    leds: &'a mut [Rgb],
}

impl<'a> Matrix<'a> {
    /// Wrap a block of exactly `LEDS_PER_MATRIX` LEDs
    ///
    /// Returns `None` for a slice of any other length.
    pub fn new(leds: &'a mut [Rgb]) -> Option<Self> {
        if leds.len() != LEDS_PER_MATRIX {
            return None;
        }
        Some(Self { leds })
    }

    /// Set a single pixel, ignoring coordinates outside the matrix
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        if x < MATRIX_WIDTH && y < MATRIX_HEIGHT {
            self.leds[xy_to_index(x, y)] = color;
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < MATRIX_WIDTH && y < MATRIX_HEIGHT {
            Some(self.leds[xy_to_index(x, y)])
        } else {
            None
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        self.leds.fill(color);
    }

    pub fn clear(&mut self) {
        self.fill(Rgb::default());
    }
}
