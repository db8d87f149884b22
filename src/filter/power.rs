//! Supply current ceiling
//!
//! Estimates the draw of the unscaled frame with the usual WS2812 figures (per
//! fully driven channel plus a small idle draw per LED), weighs it by the
//! requested brightness and lowers that brightness when the result exceeds
//! the budget. This is the FastLED `calculate_max_brightness_for_power_mW`
//! model: idle draw is scaled together with the channels.

use crate::color::Rgb;

const RED_MA: u32 = 16;
const GREEN_MA: u32 = 11;
const BLUE_MA: u32 = 15;
const IDLE_MA: u32 = 1;

/// Current budget of the LED supply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Current {
    Milliamps(u32),
    Unlimited,
}

/// Estimated current draw of a frame at full brightness, in milliamps
pub fn estimate_current_ma(frame: &[Rgb]) -> u32 {
    let channels: u32 = frame
        .iter()
        .map(|p| {
            u32::from(p.r) * RED_MA + u32::from(p.g) * GREEN_MA + u32::from(p.b) * BLUE_MA
        })
        .sum();
    let idle = u32::try_from(frame.len()).unwrap_or(u32::MAX).saturating_mul(IDLE_MA);
    channels / 255 + idle
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PowerLimit {
    max_current: Current,
}

impl PowerLimit {
    pub(crate) const fn new(max_current: Current) -> Self {
        Self { max_current }
    }

    /// Highest brightness, not above `target`, that keeps `frame` within budget
    ///
    /// `frame` must not be scaled yet.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn limit_brightness(&self, frame: &[Rgb], target: u8) -> u8 {
        let Current::Milliamps(budget) = self.max_current else {
            return target;
        };
        let requested = u64::from(estimate_current_ma(frame)) * u64::from(target) / 256;
        if requested <= u64::from(budget) {
            return target;
        }
        // requested > budget >= 0, so the divisor is never zero
        (u64::from(target) * u64::from(budget) / requested) as u8
    }
}
