use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{HueBand, Rgb};
use crate::command::RenderCommand;
use crate::config::{
    DEFAULT_EDGE_RAMP, FAILURE_COLOR, FILL_HUE_BAND, PROMPT_COLOR, STAGE_COUNT, SUCCESS_COLOR,
    TOTAL_LEDS,
};
use crate::effect::{CrossEffect, EffectSlot, NoiseConfig, SolidEffect, WaveConfig};
use crate::filter::{FilterProcessor, FilterProcessorConfig};
use crate::layout::{Matrix, stage_block};

/// Colors used by the visual modes
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Hand silhouette
    pub prompt: Rgb,
    /// Success blink
    pub success: Rgb,
    /// Failure cross
    pub failure: Rgb,
    /// Hue range of the liquid texture
    pub fill: HueBand,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            prompt: PROMPT_COLOR,
            success: SUCCESS_COLOR,
            failure: FAILURE_COLOR,
            fill: FILL_HUE_BAND,
        }
    }
}

/// Configuration for the rendering engine
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub palette: Palette,
    pub wave: WaveConfig,
    pub noise: NoiseConfig,
    /// Time for the leading row to reach full brightness
    pub edge_ramp: Duration,
    pub filters: FilterProcessorConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            wave: WaveConfig::default(),
            noise: NoiseConfig::default(),
            edge_ramp: DEFAULT_EDGE_RAMP,
            filters: FilterProcessorConfig::default(),
        }
    }
}

/// Rendering engine - owns the shared pixel buffer of the whole chain
pub struct Renderer {
    config: RenderConfig,
    frame_buffer: [Rgb; TOTAL_LEDS],
    filters: FilterProcessor,
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            config: *config,
            frame_buffer: [Rgb::default(); TOTAL_LEDS],
            filters: FilterProcessor::new(&config.filters),
        }
    }

    /// Draw a controller command
    ///
    /// `animation_clock` is the real-time clock driving the wave and the noise
    /// texture; fill levels arrive inside the command from the press clock.
    /// Every command redraws the whole chain, so filters run on a fresh frame.
    pub fn render(&mut self, command: &RenderCommand, animation_clock: Instant) -> &[Rgb] {
        match *command {
            RenderCommand::Stages(visuals) => {
                for (stage, visual) in visuals.into_iter().enumerate() {
                    let slot = EffectSlot::for_visual(visual, &self.config);
                    self.draw_stage(stage, slot, animation_clock);
                }
            }
            RenderCommand::Failure { stage } => {
                self.frame_buffer.fill(Rgb::default());
                let slot = EffectSlot::Cross(CrossEffect::new(self.config.palette.failure));
                self.draw_stage(stage, slot, animation_clock);
            }
            RenderCommand::Success { stage, lit } => {
                self.frame_buffer.fill(Rgb::default());
                if lit {
                    let slot = EffectSlot::Solid(SolidEffect::new(self.config.palette.success));
                    self.draw_stage(stage, slot, animation_clock);
                }
            }
            RenderCommand::Clear => {
                self.frame_buffer.fill(Rgb::default());
            }
        }

        self.filters.apply(&mut self.frame_buffer);
        &self.frame_buffer
    }

    /// Blank the whole chain
    pub fn clear(&mut self) -> &[Rgb] {
        self.frame_buffer.fill(Rgb::default());
        &self.frame_buffer
    }

    pub const fn brightness(&self) -> u8 {
        self.filters.brightness.get()
    }

    /// Change the global brightness ceiling, effective from the next frame
    pub fn set_brightness(&mut self, brightness: u8) {
        #[cfg(feature = "esp32-log")]
        println!("[Renderer.set_brightness] brightness {}", brightness);
        self.filters.brightness.set(brightness);
    }

    fn draw_stage(&mut self, stage: usize, mut slot: EffectSlot, now: Instant) {
        if stage >= STAGE_COUNT {
            return;
        }
        if let Some(mut matrix) = Matrix::new(stage_block(&mut self.frame_buffer, stage)) {
            slot.render(now, &mut matrix);
        }
    }
}
