//! Hardware seam: buttons, lock actuator and pixel flush
//!
//! Buttons and the lock are plain `embedded-hal` digital pins; the LED chain is
//! reached through [`OutputDriver`] so any WS2812 backend can be plugged in.

use core::fmt;

use embedded_hal::digital::{Error, ErrorKind, InputPin, OutputPin};

use crate::color::Rgb;
use crate::config::STAGE_COUNT;

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// `write` pushes the whole chain to the LEDs.
pub trait OutputDriver {
    /// Write colors to the LED chain
    fn write(&mut self, colors: &[Rgb]);
}

/// Failure to access a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    /// Reading the button of a stage failed
    Button { stage: usize, kind: ErrorKind },
    /// Driving the lock actuator failed
    Lock(ErrorKind),
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Button { stage, kind } => {
                write!(f, "failed to read button of stage {}: {}", stage, kind)
            }
            Self::Lock(kind) => write!(f, "failed to drive lock: {}", kind),
        }
    }
}

impl core::error::Error for HardwareError {}

/// The stage buttons, wired active-low against pull-ups
pub struct ButtonBank<P: InputPin> {
    pins: [P; STAGE_COUNT],
}

impl<P: InputPin> ButtonBank<P> {
    pub const fn new(pins: [P; STAGE_COUNT]) -> Self {
        Self { pins }
    }

    /// Sample every button once; `true` means pressed (pin LOW)
    ///
    /// No debouncing is done, every sample is taken at face value.
    pub fn read(&mut self) -> Result<[bool; STAGE_COUNT], HardwareError> {
        let mut pressed = [false; STAGE_COUNT];
        for (stage, (pin, state)) in self.pins.iter_mut().zip(pressed.iter_mut()).enumerate() {
            *state = pin.is_low().map_err(|err| HardwareError::Button {
                stage,
                kind: err.kind(),
            })?;
        }
        Ok(pressed)
    }
}

/// Level output driving the electromechanical lock
///
/// HIGH unlocks, LOW locks. The pin is only written when the level changes.
pub struct LockActuator<P: OutputPin> {
    pin: P,
    engaged: bool,
}

impl<P: OutputPin> LockActuator<P> {
    /// Take the pin and drive it LOW
    pub fn new(mut pin: P) -> Result<Self, HardwareError> {
        pin.set_low().map_err(|err| HardwareError::Lock(err.kind()))?;
        Ok(Self {
            pin,
            engaged: false,
        })
    }

    /// Whether the lock is currently open
    pub const fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Drive HIGH (`true`, open) or LOW (`false`, closed)
    ///
    /// The level is only recorded once the write succeeds, so a failed write
    /// is attempted again on the next call.
    pub fn set(&mut self, engaged: bool) -> Result<(), HardwareError> {
        if engaged == self.engaged {
            return Ok(());
        }
        let result = if engaged {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|err| HardwareError::Lock(err.kind()))?;
        self.engaged = engaged;
        Ok(())
    }
}
