use embassy_time::Duration;

use crate::config::STAGE_COUNT;

/// Fill state captured from the press clock for one render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillSnapshot {
    /// Rows reached by the hold so far, `0..=MATRIX_HEIGHT`
    pub filled_rows: u8,
    /// Time since the filled-row count last changed
    pub edge_elapsed: Duration,
}

/// How a single stage should be drawn on a regular tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageVisual {
    /// Hand silhouette inviting a press
    IdlePrompt,
    /// Animated liquid at the given level
    Filling(FillSnapshot),
    /// Solid, unanimated full matrix
    Complete,
}

/// What the renderer must draw after a controller tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderCommand {
    /// Regular frame, one visual per stage
    Stages([StageVisual; STAGE_COUNT]),
    /// Failure cue: whole chain dark except an X on `stage`
    Failure { stage: usize },
    /// Success cue phase: `stage` fully lit or everything dark
    Success { stage: usize, lit: bool },
    /// A cue finished; blank the whole chain
    Clear,
}

impl RenderCommand {
    /// Visual assigned to a stage on a regular frame
    pub fn visual(&self, stage: usize) -> Option<StageVisual> {
        match self {
            Self::Stages(visuals) => visuals.get(stage).copied(),
            _ => None,
        }
    }
}
