//! Liquid fill effect
//!
//! Each column carries a sine wave on its surface. Rows strictly below the
//! floored surface are lit with a noise-textured hue, the row at the surface
//! ramps in over the edge window, rows above stay dark.
//!
//! Two independent clocks drive the effect: the fill level and edge ramp come
//! from the press clock (captured in [`FillSnapshot`]), while the wave phase and
//! the noise time axis come from the real-time `now`.

use core::cmp::Ordering;
use core::f64::consts::TAU;

use embassy_time::{Duration, Instant};

use super::Effect;
use crate::color::{HueBand, Rgb};
use crate::command::FillSnapshot;
use crate::config::{MATRIX_HEIGHT, MATRIX_WIDTH};
use crate::layout::Matrix;
use crate::math8::progress8;
use crate::noise::noise3;

const DEFAULT_WAVE_AMPLITUDE: f32 = 1.5;
const DEFAULT_WAVE_FREQUENCY: f32 = 0.5;
const DEFAULT_WAVE_PERIOD_MS: u64 = 300;
const DEFAULT_NOISE_SCALE: u32 = 50;
const DEFAULT_NOISE_TIME_DIVISOR: u64 = 4;

/// Shape and speed of the surface wave
#[derive(Debug, Clone, Copy)]
pub struct WaveConfig {
    /// Peak displacement in rows
    pub amplitude: f32,
    /// Phase advance per column, in radians
    pub frequency: f32,
    /// Real time per radian of phase
    pub period: Duration,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            amplitude: DEFAULT_WAVE_AMPLITUDE,
            frequency: DEFAULT_WAVE_FREQUENCY,
            period: Duration::from_millis(DEFAULT_WAVE_PERIOD_MS),
        }
    }
}

impl WaveConfig {
    /// Wave phase at `now`, reduced to `0..TAU`
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn phase(&self, now: Instant) -> f32 {
        let period = self.period.as_millis().max(1) as f64;
        libm::fmod(now.as_millis() as f64 / period, TAU) as f32
    }

    /// Surface displacement of column `x` at the given phase
    #[allow(clippy::cast_precision_loss)]
    pub fn offset(&self, x: usize, phase: f32) -> f32 {
        self.amplitude * libm::sinf(x as f32 * self.frequency + phase)
    }
}

/// Sampling of the color texture
#[derive(Debug, Clone, Copy)]
pub struct NoiseConfig {
    /// Noise units per pixel; 256 units make one lattice cell
    pub spatial_scale: u32,
    /// Milliseconds per noise unit along the time axis
    pub time_divisor: u64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            spatial_scale: DEFAULT_NOISE_SCALE,
            time_divisor: DEFAULT_NOISE_TIME_DIVISOR,
        }
    }
}

impl NoiseConfig {
    /// Position along the time axis at `now`; wraps after ~200 days
    #[allow(clippy::cast_possible_truncation)]
    pub fn time_axis(&self, now: Instant) -> u32 {
        (now.as_millis() / self.time_divisor.max(1)) as u32
    }

    /// Noise sample (0-255) for a pixel on the given time slice
    #[allow(clippy::cast_possible_truncation)]
    pub fn sample(&self, x: usize, y: usize, time_axis: u32) -> u8 {
        let scale = self.spatial_scale;
        noise3(
            (x as u32).wrapping_mul(scale),
            (y as u32).wrapping_mul(scale),
            time_axis,
        )
    }
}

/// Animated liquid at a given fill level
#[derive(Debug, Clone, Copy)]
pub struct LiquidFillEffect {
    snapshot: FillSnapshot,
    band: HueBand,
    wave: WaveConfig,
    noise: NoiseConfig,
    edge_ramp: Duration,
}

impl LiquidFillEffect {
    pub const fn new(
        snapshot: FillSnapshot,
        band: HueBand,
        wave: WaveConfig,
        noise: NoiseConfig,
        edge_ramp: Duration,
    ) -> Self {
        Self {
            snapshot,
            band,
            wave,
            noise,
            edge_ramp,
        }
    }

    /// Brightness (0-255) of the leading row
    pub const fn edge_brightness(&self) -> u8 {
        progress8(self.snapshot.edge_elapsed, self.edge_ramp)
    }

    /// Floored surface row of column `x`; may be negative or past the top
    #[allow(clippy::cast_possible_truncation)]
    pub fn surface(&self, x: usize, phase: f32) -> i32 {
        let level = f32::from(self.snapshot.filled_rows) - self.wave.offset(x, phase);
        libm::floorf(level) as i32
    }
}

impl Effect for LiquidFillEffect {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn render(&mut self, now: Instant, matrix: &mut Matrix<'_>) {
        let phase = self.wave.phase(now);
        let time_axis = self.noise.time_axis(now);
        let edge = self.edge_brightness();

        for x in 0..MATRIX_WIDTH {
            let surface = self.surface(x, phase);
            for y in 0..MATRIX_HEIGHT {
                let color = match (y as i32).cmp(&surface) {
                    Ordering::Less => self.band.color(self.noise.sample(x, y, time_axis), 255),
                    Ordering::Equal => self.band.color(self.noise.sample(x, y, time_axis), edge),
                    Ordering::Greater => Rgb::default(),
                };
                matrix.set(x, y, color);
            }
        }
    }
}

/// Settled liquid: every pixel lit, texture frozen on one time slice
///
/// Independent of any clock, so a completed stage never flickers or regresses.
#[derive(Debug, Clone, Copy)]
pub struct SettledLiquidEffect {
    band: HueBand,
    noise: NoiseConfig,
}

impl SettledLiquidEffect {
    pub const fn new(band: HueBand, noise: NoiseConfig) -> Self {
        Self { band, noise }
    }
}

impl Effect for SettledLiquidEffect {
    fn render(&mut self, _now: Instant, matrix: &mut Matrix<'_>) {
        for y in 0..MATRIX_HEIGHT {
            for x in 0..MATRIX_WIDTH {
                matrix.set(x, y, self.band.color(self.noise.sample(x, y, 0), 255));
            }
        }
    }
}
