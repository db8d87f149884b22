//! Compile-time geometry and default tunables
//!
//! The puzzle topology is fixed: four 16x32 matrices chained on one data line,
//! each paired with one push-button.

use embassy_time::Duration;

use crate::color::{HueBand, Rgb};

/// Number of pixel columns in one matrix
pub const MATRIX_WIDTH: usize = 16;

/// Number of pixel rows in one matrix
pub const MATRIX_HEIGHT: usize = 32;

/// Number of stages (matrix + button pairs)
pub const STAGE_COUNT: usize = 4;

/// Number of LEDs in one matrix
pub const LEDS_PER_MATRIX: usize = MATRIX_WIDTH * MATRIX_HEIGHT;

/// Number of LEDs in the whole chain
pub const TOTAL_LEDS: usize = STAGE_COUNT * LEDS_PER_MATRIX;

/// Continuous hold required to fill one stage
pub const DEFAULT_FILL_DURATION: Duration = Duration::from_millis(32_000);

/// How long the red X stays on screen after a violation
pub const DEFAULT_FAILURE_DWELL: Duration = Duration::from_millis(2_000);

/// Length of one on or off phase of the success blink
pub const DEFAULT_SUCCESS_PHASE: Duration = Duration::from_millis(200);

/// Number of on/off repetitions of the success blink
pub const DEFAULT_SUCCESS_BLINKS: u8 = 3;

/// Time for the leading row to ramp from dark to full brightness
pub const DEFAULT_EDGE_RAMP: Duration = Duration::from_millis(1_000);

/// Global brightness ceiling applied to every flushed frame
pub const DEFAULT_BRIGHTNESS: u8 = 64;

/// Supply budget for the whole chain
pub const DEFAULT_MAX_CURRENT_MA: u32 = 1_000;

pub const PROMPT_COLOR: Rgb = Rgb { r: 0, g: 0, b: 255 };
pub const SUCCESS_COLOR: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const FAILURE_COLOR: Rgb = Rgb { r: 255, g: 0, b: 0 };

/// Red through yellow to green on the 0-255 hue circle
pub const FILL_HUE_BAND: HueBand = HueBand::new(0, 120);
