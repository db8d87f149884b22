#![no_std]

pub mod color;
pub mod command;
pub mod config;
pub mod effect;
pub mod event;
pub mod filter;
pub mod hardware;
pub mod layout;
pub mod math8;
pub mod noise;
pub mod puzzle;
pub mod renderer;
pub mod runner;
pub mod stage;

pub use command::{FillSnapshot, RenderCommand, StageVisual};
pub use config::{LEDS_PER_MATRIX, MATRIX_HEIGHT, MATRIX_WIDTH, STAGE_COUNT, TOTAL_LEDS};
pub use event::{EventLog, PuzzleEvent, Violation};
pub use filter::{Current, FilterProcessorConfig};
pub use hardware::{ButtonBank, HardwareError, LockActuator, OutputDriver};
pub use layout::{Matrix, index_to_xy, xy_to_index};
pub use puzzle::{Cue, Puzzle, PuzzleTimings};
pub use renderer::{Palette, RenderConfig, Renderer};
pub use runner::{DiagnosticsLog, FrameResult, PuzzleRunner};
pub use stage::{Stage, StageState};

pub use color::{HueBand, Hsv, Rgb};
pub use embassy_time::{Duration, Instant};
