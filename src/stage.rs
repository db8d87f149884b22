//! Per-matrix progression state

use embassy_time::{Duration, Instant};

use crate::config::MATRIX_HEIGHT;

/// Lifecycle of a single stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageState {
    /// Waiting for its first valid press
    #[default]
    Idle,
    /// Press accepted this tick, promoted to `Filling` before the tick ends
    Pressed,
    /// Held and not yet full
    Filling,
    /// Filled; never regresses except on reset
    Complete,
}

/// One matrix + button pair
#[derive(Debug, Clone, Copy, Default)]
pub struct Stage {
    state: StageState,
    /// Last raw button reading, used for edge detection
    held: bool,
    press_start: Option<Instant>,
    level_rise_start: Option<Instant>,
    last_filled_rows: u8,
}

impl Stage {
    pub const fn new() -> Self {
        Self {
            state: StageState::Idle,
            held: false,
            press_start: None,
            level_rise_start: None,
            last_filled_rows: 0,
        }
    }

    pub const fn state(&self) -> StageState {
        self.state
    }

    pub const fn is_complete(&self) -> bool {
        matches!(self.state, StageState::Complete)
    }

    pub const fn is_held(&self) -> bool {
        self.held
    }

    pub const fn press_start(&self) -> Option<Instant> {
        self.press_start
    }

    /// Fraction (0.0-1.0) of the required hold that has elapsed
    #[allow(clippy::cast_precision_loss)]
    pub fn fill_progress(&self, now: Instant, fill_duration: Duration) -> f32 {
        if self.is_complete() {
            return 1.0;
        }
        let Some(start) = self.press_start else {
            return 0.0;
        };
        let total = fill_duration.as_millis();
        if total == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(start).as_millis();
        (elapsed as f32 / total as f32).clamp(0.0, 1.0)
    }

    /// Number of fully reached rows, `0..=MATRIX_HEIGHT`
    ///
    /// Integer floor of `progress * MATRIX_HEIGHT`, computed without floats so
    /// the last row is reached exactly when the hold reaches `fill_duration`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn filled_rows(&self, now: Instant, fill_duration: Duration) -> u8 {
        if self.is_complete() {
            return MATRIX_HEIGHT as u8;
        }
        let Some(start) = self.press_start else {
            return 0;
        };
        let total = fill_duration.as_millis();
        let elapsed = now.saturating_duration_since(start).as_millis();
        if total == 0 || elapsed >= total {
            return MATRIX_HEIGHT as u8;
        }
        ((elapsed * MATRIX_HEIGHT as u64) / total) as u8
    }

    /// Whether the hold has lasted the full fill duration
    pub fn is_filled(&self, now: Instant, fill_duration: Duration) -> bool {
        usize::from(self.filled_rows(now, fill_duration)) >= MATRIX_HEIGHT
    }

    /// Time since the leading row started ramping up
    ///
    /// The ramp timer restarts whenever the filled-row count changes.
    pub(crate) fn track_level(&mut self, rows: u8, now: Instant) -> Duration {
        if rows != self.last_filled_rows || self.level_rise_start.is_none() {
            self.last_filled_rows = rows;
            self.level_rise_start = Some(now);
        }
        self.level_rise_start
            .map_or(Duration::from_millis(0), |start| {
                now.saturating_duration_since(start)
            })
    }

    /// Record the raw button reading for the next edge check
    pub(crate) fn set_held(&mut self, held: bool) {
        self.held = held;
    }

    /// Accept a press on the active stage
    pub(crate) fn press(&mut self, now: Instant) {
        self.state = StageState::Pressed;
        self.held = true;
        self.press_start = Some(now);
        self.level_rise_start = Some(now);
        self.last_filled_rows = 0;
    }

    pub(crate) fn start_filling(&mut self) {
        if matches!(self.state, StageState::Pressed) {
            self.state = StageState::Filling;
        }
    }

    pub(crate) fn complete(&mut self) {
        self.state = StageState::Complete;
        self.last_filled_rows = MATRIX_HEIGHT as u8;
    }
}
