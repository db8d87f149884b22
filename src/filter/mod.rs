use crate::color::Rgb;
use crate::config::{DEFAULT_BRIGHTNESS, DEFAULT_MAX_CURRENT_MA};

mod brightness;
mod power;

pub(crate) trait Filter {
    /// Apply the filter to a frame
    fn apply(&mut self, frame: &mut [Rgb]);
}

pub(crate) use brightness::BrightnessFilter;
pub use power::{Current, estimate_current_ma};
pub(crate) use power::PowerLimit;

#[derive(Debug, Clone, Copy)]
pub struct FilterProcessorConfig {
    /// Global brightness ceiling (0-255)
    pub brightness: u8,
    /// Supply current budget for the whole chain
    pub max_current: Current,
}

impl Default for FilterProcessorConfig {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
            max_current: Current::Milliamps(DEFAULT_MAX_CURRENT_MA),
        }
    }
}

/// Filter processor - applies post-processing to frames
///
/// The power ceiling only lowers the brightness; the frame is scaled once.
#[derive(Debug)]
pub(crate) struct FilterProcessor {
    pub brightness: BrightnessFilter,
    pub power: PowerLimit,
}

impl FilterProcessor {
    pub(crate) const fn new(config: &FilterProcessorConfig) -> Self {
        Self {
            brightness: BrightnessFilter::new(config.brightness),
            power: PowerLimit::new(config.max_current),
        }
    }

    /// Apply all processing to a frame
    pub(crate) fn apply(&mut self, frame: &mut [Rgb]) {
        let brightness = self.power.limit_brightness(frame, self.brightness.get());
        BrightnessFilter::new(brightness).apply(frame);
    }
}
