//! Progression controller
//!
//! Owns the four stages, enforces the strict press order and drives the two
//! timed feedback cues. Both cues suspend input: while one is running, button
//! readings passed to [`Puzzle::tick`] are ignored and the caller is expected
//! not to sample the hardware at all (see [`Puzzle::accepts_input`]).

use embassy_time::{Duration, Instant};
use heapless::Deque;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::command::{FillSnapshot, RenderCommand, StageVisual};
use crate::config::{
    DEFAULT_FAILURE_DWELL, DEFAULT_FILL_DURATION, DEFAULT_SUCCESS_BLINKS, DEFAULT_SUCCESS_PHASE,
    STAGE_COUNT,
};
use crate::event::{PuzzleEvent, Violation};
use crate::stage::{Stage, StageState};

/// Maximum number of undrained events; a tick emits at most two
const EVENT_QUEUE_SIZE: usize = 8;

/// Timing of the progression and its feedback cues
#[derive(Debug, Clone, Copy)]
pub struct PuzzleTimings {
    /// Continuous hold required to fill one stage
    pub fill: Duration,
    /// How long the failure X stays up before the reset
    pub failure_dwell: Duration,
    /// Length of one on or off phase of the success blink
    pub success_phase: Duration,
    /// Number of on/off repetitions of the success blink
    pub success_blinks: u8,
}

impl Default for PuzzleTimings {
    fn default() -> Self {
        Self {
            fill: DEFAULT_FILL_DURATION,
            failure_dwell: DEFAULT_FAILURE_DWELL,
            success_phase: DEFAULT_SUCCESS_PHASE,
            success_blinks: DEFAULT_SUCCESS_BLINKS,
        }
    }
}

impl PuzzleTimings {
    /// Total length of the success blink sequence
    #[allow(clippy::cast_lossless)]
    pub const fn success_total(&self) -> Duration {
        Duration::from_millis(self.success_phase.as_millis() * 2 * self.success_blinks as u64)
    }
}

/// Timed feedback sub-state; input is suspended while one is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Failure { stage: usize, started_at: Instant },
    Success { stage: usize, started_at: Instant },
}

/// The whole puzzle: four stages and the index of the one accepting input
#[derive(Debug)]
pub struct Puzzle {
    timings: PuzzleTimings,
    stages: [Stage; STAGE_COUNT],
    current_stage: usize,
    lock_energized: bool,
    cue: Option<Cue>,
    events: Deque<PuzzleEvent, EVENT_QUEUE_SIZE>,
}

impl Puzzle {
    pub fn new(timings: &PuzzleTimings) -> Self {
        Self {
            timings: *timings,
            stages: [Stage::new(); STAGE_COUNT],
            current_stage: 0,
            lock_energized: false,
            cue: None,
            events: Deque::new(),
        }
    }

    /// Index of the only stage eligible for input; `STAGE_COUNT` once solved
    pub const fn current_stage(&self) -> usize {
        self.current_stage
    }

    pub fn stage(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    pub const fn stages(&self) -> &[Stage; STAGE_COUNT] {
        &self.stages
    }

    /// Level the lock output should have (true = unlocked)
    pub const fn lock_energized(&self) -> bool {
        self.lock_energized
    }

    pub const fn cue(&self) -> Option<Cue> {
        self.cue
    }

    /// Whether button readings are consumed on the next tick
    pub const fn accepts_input(&self) -> bool {
        self.cue.is_none()
    }

    pub fn is_solved(&self) -> bool {
        self.current_stage >= STAGE_COUNT
    }

    /// Fill progress (0.0-1.0) of a stage at `now`
    pub fn fill_progress(&self, stage: usize, now: Instant) -> f32 {
        self.stages
            .get(stage)
            .map_or(0.0, |s| s.fill_progress(now, self.timings.fill))
    }

    /// Take the oldest undrained event
    pub fn pop_event(&mut self) -> Option<PuzzleEvent> {
        self.events.pop_front()
    }

    /// Advance the puzzle by one tick
    ///
    /// `pressed` holds the raw button state of every stage (true = held).
    /// Stages are evaluated in index order; a violation or a completion ends
    /// the tick early and starts the matching cue.
    pub fn tick(&mut self, now: Instant, pressed: [bool; STAGE_COUNT]) -> RenderCommand {
        if let Some(cue) = self.cue {
            return self.advance_cue(cue, now);
        }

        for (index, &is_pressed) in pressed.iter().enumerate() {
            let stage = &mut self.stages[index];
            let was_held = stage.is_held();

            if is_pressed && !was_held {
                if stage.is_complete() {
                    return self.violate(index, Violation::AlreadyComplete, now);
                }
                if index != self.current_stage {
                    let expected = self.current_stage;
                    return self.violate(index, Violation::OutOfOrder { expected }, now);
                }
                stage.press(now);
            } else if !is_pressed && was_held {
                stage.set_held(false);
                if !stage.is_complete() {
                    if stage.is_filled(now, self.timings.fill) {
                        return self.complete(index, now);
                    }
                    return self.violate(index, Violation::EarlyRelease, now);
                }
            }

            let stage = &mut self.stages[index];
            if matches!(stage.state(), StageState::Pressed | StageState::Filling) {
                stage.start_filling();
                if stage.is_filled(now, self.timings.fill) {
                    return self.complete(index, now);
                }
            }
        }

        RenderCommand::Stages(self.visuals(now))
    }

    /// Return to the initial state: all stages idle, lock de-energized
    ///
    /// Idempotent; also cancels a running cue.
    pub fn reset(&mut self) {
        #[cfg(feature = "esp32-log")]
        println!("[Puzzle.reset] progress reset");
        self.stages = [Stage::new(); STAGE_COUNT];
        self.current_stage = 0;
        self.lock_energized = false;
        self.cue = None;
        self.push_event(PuzzleEvent::Reset);
    }

    /// Build per-stage visuals for a regular frame
    fn visuals(&mut self, now: Instant) -> [StageVisual; STAGE_COUNT] {
        let fill = self.timings.fill;
        let mut visuals = [StageVisual::IdlePrompt; STAGE_COUNT];
        for (visual, stage) in visuals.iter_mut().zip(self.stages.iter_mut()) {
            *visual = match stage.state() {
                StageState::Idle => StageVisual::IdlePrompt,
                StageState::Pressed | StageState::Filling => {
                    let filled_rows = stage.filled_rows(now, fill);
                    let edge_elapsed = stage.track_level(filled_rows, now);
                    StageVisual::Filling(FillSnapshot {
                        filled_rows,
                        edge_elapsed,
                    })
                }
                StageState::Complete => StageVisual::Complete,
            };
        }
        visuals
    }

    fn violate(&mut self, stage: usize, violation: Violation, now: Instant) -> RenderCommand {
        #[cfg(feature = "esp32-log")]
        println!("[Puzzle.violate] stage {}: {}", stage, violation);
        self.push_event(PuzzleEvent::Violation { stage, violation });
        self.cue = Some(Cue::Failure {
            stage,
            started_at: now,
        });
        RenderCommand::Failure { stage }
    }

    fn complete(&mut self, stage: usize, now: Instant) -> RenderCommand {
        self.stages[stage].complete();
        self.current_stage += 1;
        self.push_event(PuzzleEvent::StageComplete { stage });
        self.cue = Some(Cue::Success {
            stage,
            started_at: now,
        });
        RenderCommand::Success { stage, lit: true }
    }

    fn advance_cue(&mut self, cue: Cue, now: Instant) -> RenderCommand {
        match cue {
            Cue::Failure { stage, started_at } => {
                if now.saturating_duration_since(started_at) < self.timings.failure_dwell {
                    return RenderCommand::Failure { stage };
                }
                self.reset();
                RenderCommand::Clear
            }
            Cue::Success { stage, started_at } => {
                let elapsed = now.saturating_duration_since(started_at);
                if elapsed < self.timings.success_total() {
                    let phase_ms = self.timings.success_phase.as_millis().max(1);
                    let lit = (elapsed.as_millis() / phase_ms).is_multiple_of(2);
                    return RenderCommand::Success { stage, lit };
                }
                self.cue = None;
                if self.is_solved() && !self.lock_energized {
                    self.lock_energized = true;
                    self.push_event(PuzzleEvent::Unlocked);
                }
                RenderCommand::Clear
            }
        }
    }

    fn push_event(&mut self, event: PuzzleEvent) {
        let _ = self.events.push_back(event);
    }
}
