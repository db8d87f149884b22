//! Idle prompt: a static hand silhouette inviting a press

use embassy_time::Instant;

use super::Effect;
use crate::color::Rgb;
use crate::config::{MATRIX_HEIGHT, MATRIX_WIDTH};
use crate::layout::Matrix;

/// Fixed-size monochrome bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap<const W: usize, const H: usize> {
    rows: [[bool; W]; H],
}

impl<const W: usize, const H: usize> Bitmap<W, H> {
    /// Build a bitmap from ASCII art, `#` = lit and `.` = dark
    ///
    /// Fails to compile when used in a const with malformed art.
    pub const fn from_art(art: [&str; H]) -> Self {
        let mut rows = [[false; W]; H];
        let mut y = 0;
        while y < H {
            let line = art[y].as_bytes();
            assert!(line.len() == W, "bitmap row has the wrong width");
            let mut x = 0;
            while x < W {
                rows[y][x] = match line[x] {
                    b'#' => true,
                    b'.' => false,
                    _ => panic!("bitmap art may only contain '#' and '.'"),
                };
                x += 1;
            }
            y += 1;
        }
        Self { rows }
    }

    #[inline]
    pub const fn is_set(&self, x: usize, y: usize) -> bool {
        x < W && y < H && self.rows[y][x]
    }

    /// Number of lit pixels
    pub fn count(&self) -> usize {
        self.rows.iter().flatten().filter(|lit| **lit).count()
    }
}

pub const HAND_SILHOUETTE: Bitmap<MATRIX_WIDTH, MATRIX_HEIGHT> = Bitmap::from_art([
    "................",
    "................",
    "................",
    "................",
    "................",
    "................",
    "................",
    "................",
    ".....#######....",
    "....#########...",
    "...###########..",
    "..#############.",
    ".##############.",
    "###############.",
    "##..###########.",
    "#...###########.",
    "....###########.",
    "....##.##.##.##.",
    "....##.##.##.##.",
    "....##.##.##.##.",
    "....##.##.##.##.",
    "....##.##.##.##.",
    "....##.##.##.##.",
    "....##.##.##....",
    "....##.##.##....",
    ".......##.......",
    "................",
    "................",
    "................",
    "................",
    "................",
    "................",
]);

/// Draws [`HAND_SILHOUETTE`] in a single color over black
#[derive(Debug, Clone, Copy)]
pub struct HandPromptEffect {
    color: Rgb,
}

impl HandPromptEffect {
    pub const fn new(color: Rgb) -> Self {
        Self { color }
    }
}

impl Effect for HandPromptEffect {
    fn render(&mut self, _now: Instant, matrix: &mut Matrix<'_>) {
        for y in 0..MATRIX_HEIGHT {
            for x in 0..MATRIX_WIDTH {
                let color = if HAND_SILHOUETTE.is_set(x, y) {
                    self.color
                } else {
                    Rgb::default()
                };
                matrix.set(x, y, color);
            }
        }
    }
}
