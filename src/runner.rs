//! Control loop step and frame pacing
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};
use embedded_hal::digital::{InputPin, OutputPin};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config::STAGE_COUNT;
use crate::event::EventLog;
use crate::hardware::{ButtonBank, HardwareError, LockActuator, OutputDriver};
use crate::puzzle::{Puzzle, PuzzleTimings};
use crate::renderer::{RenderConfig, Renderer};

/// Default frame duration (100 FPS)
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(10);

/// Size of the diagnostics log shared with a logging context
pub const EVENT_LOG_SIZE: usize = 16;

/// Diagnostics log type used by [`PuzzleRunner`]
pub type DiagnosticsLog = EventLog<EVENT_LOG_SIZE>;

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Owner of the puzzle, the pixel buffer and all hardware
///
/// # Usage
///
/// ```ignore
/// let mut runner = PuzzleRunner::new(buttons, lock, driver, &timings, &render)?;
///
/// loop {
///     let now = Instant::from_millis(get_current_time_ms());
///     let result = runner.tick(now)?;
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct PuzzleRunner<'a, B: InputPin, L: OutputPin, O: OutputDriver> {
    buttons: ButtonBank<B>,
    lock: LockActuator<L>,
    output: O,
    puzzle: Puzzle,
    renderer: Renderer,
    diagnostics: Option<&'a DiagnosticsLog>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, B: InputPin, L: OutputPin, O: OutputDriver> PuzzleRunner<'a, B, L, O> {
    /// Create a runner with the lock closed and the chain blanked
    pub fn new(
        buttons: [B; STAGE_COUNT],
        lock: L,
        output: O,
        timings: &PuzzleTimings,
        render: &RenderConfig,
    ) -> Result<Self, HardwareError> {
        let mut runner = Self {
            buttons: ButtonBank::new(buttons),
            lock: LockActuator::new(lock)?,
            output,
            puzzle: Puzzle::new(timings),
            renderer: Renderer::new(render),
            diagnostics: None,
            next_frame: Instant::from_millis(0),
            frame_duration: DEFAULT_FRAME_DURATION,
        };
        let frame = runner.renderer.clear();
        runner.output.write(frame);
        Ok(runner)
    }

    /// Mirror every puzzle event into a diagnostics log
    #[must_use]
    pub fn with_diagnostics(mut self, log: &'a DiagnosticsLog) -> Self {
        self.diagnostics = Some(log);
        self
    }

    /// Use a custom frame duration
    #[must_use]
    pub fn with_frame_duration(mut self, frame_duration: Duration) -> Self {
        self.frame_duration = frame_duration;
        self
    }

    /// Run one control loop step and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Samples the buttons, unless a feedback cue suspends input
    /// 3. Advances the puzzle, logs its events and drives the lock to the
    ///    puzzle's lock level (a failed write is retried on the next tick)
    /// 4. Renders the frame and flushes it once
    /// 5. Returns the deadline for the next frame
    pub fn tick(&mut self, now: Instant) -> Result<FrameResult, HardwareError> {
        // Drift correction: if we've fallen too far behind, reset to now
        // This prevents catch-up bursts after long stalls
        let max_drift = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift {
            self.next_frame = now;
        }

        let pressed = if self.puzzle.accepts_input() {
            self.buttons.read()?
        } else {
            [false; STAGE_COUNT]
        };

        let command = self.puzzle.tick(now, pressed);
        self.drain_events();
        self.lock.set(self.puzzle.lock_energized())?;

        let frame = self.renderer.render(&command, now);
        self.output.write(frame);

        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        Ok(FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        })
    }

    /// Reset the puzzle, blank the chain and close the lock
    pub fn reset(&mut self) -> Result<(), HardwareError> {
        self.puzzle.reset();
        self.drain_events();
        self.lock.set(self.puzzle.lock_energized())?;
        let frame = self.renderer.clear();
        self.output.write(frame);
        Ok(())
    }

    pub const fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    pub const fn lock(&self) -> &LockActuator<L> {
        &self.lock
    }

    /// Drain puzzle events into the diagnostics log
    fn drain_events(&mut self) {
        while let Some(event) = self.puzzle.pop_event() {
            #[cfg(feature = "esp32-log")]
            println!("[PuzzleRunner] {}", event);

            if let Some(log) = self.diagnostics {
                log.publish(event);
            }
        }
    }
}
