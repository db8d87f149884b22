//! Effect system with compile-time known effect variants
//!
//! All effects are stored in an enum to avoid heap allocations.
//! Each effect implements the `Effect` trait and draws one matrix.

mod cross;
mod hand;
mod liquid;
mod solid;

use embassy_time::Instant;

pub use cross::{CrossEffect, on_cross};
pub use hand::{Bitmap, HAND_SILHOUETTE, HandPromptEffect};
pub use liquid::{LiquidFillEffect, NoiseConfig, SettledLiquidEffect, WaveConfig};
pub use solid::SolidEffect;

use crate::command::StageVisual;
use crate::layout::Matrix;
use crate::renderer::RenderConfig;

pub trait Effect {
    /// Render a single frame into one matrix
    fn render(&mut self, now: Instant, matrix: &mut Matrix<'_>);
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone, Copy)]
pub enum EffectSlot {
    HandPrompt(HandPromptEffect),
    LiquidFill(LiquidFillEffect),
    SettledLiquid(SettledLiquidEffect),
    Cross(CrossEffect),
    Solid(SolidEffect),
}

impl EffectSlot {
    /// Pick the effect that draws a stage visual
    pub fn for_visual(visual: StageVisual, config: &RenderConfig) -> Self {
        match visual {
            StageVisual::IdlePrompt => Self::HandPrompt(HandPromptEffect::new(config.palette.prompt)),
            StageVisual::Filling(snapshot) => Self::LiquidFill(LiquidFillEffect::new(
                snapshot,
                config.palette.fill,
                config.wave,
                config.noise,
                config.edge_ramp,
            )),
            StageVisual::Complete => {
                Self::SettledLiquid(SettledLiquidEffect::new(config.palette.fill, config.noise))
            }
        }
    }

    /// Render the current effect
    pub fn render(&mut self, now: Instant, matrix: &mut Matrix<'_>) {
        match self {
            Self::HandPrompt(effect) => effect.render(now, matrix),
            Self::LiquidFill(effect) => effect.render(now, matrix),
            Self::SettledLiquid(effect) => effect.render(now, matrix),
            Self::Cross(effect) => effect.render(now, matrix),
            Self::Solid(effect) => effect.render(now, matrix),
        }
    }
}
