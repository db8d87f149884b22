//! Puzzle events and the best-effort diagnostics log
//!
//! Events are observable outcomes of a controller tick. The control loop acts
//! on them (lock output) and may mirror them into an [`EventLog`], which another
//! execution context drains to print status lines. Nothing in the control path
//! reads the log back.

use core::cell::RefCell;
use core::fmt;

use critical_section::Mutex;
use heapless::Deque;

/// Input that breaks the press order or the hold-to-completion contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A stage other than the active one was pressed
    OutOfOrder { expected: usize },
    /// An already completed stage was pressed again
    AlreadyComplete,
    /// The active stage was released before it filled
    EarlyRelease,
}

/// Observable outcome of a controller tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleEvent {
    Violation { stage: usize, violation: Violation },
    StageComplete { stage: usize },
    /// All stages complete; the lock output must go high
    Unlocked,
    /// Puzzle returned to its initial state; the lock output must go low
    Reset,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfOrder { expected } => {
                write!(f, "pressed out of order (expected stage {})", expected)
            }
            Self::AlreadyComplete => f.write_str("pressed after completion"),
            Self::EarlyRelease => f.write_str("released before filling"),
        }
    }
}

impl fmt::Display for PuzzleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Violation { stage, violation } => {
                write!(f, "stage {} violation: {}", stage, violation)
            }
            Self::StageComplete { stage } => write!(f, "stage {} complete", stage),
            Self::Unlocked => f.write_str("all stages complete, lock open"),
            Self::Reset => f.write_str("progress reset"),
        }
    }
}

/// Bounded, interrupt-safe event log
///
/// Backed by a fixed-size `heapless::Deque` guarded by a critical section.
/// Publishing never fails: when the log is full the oldest event is dropped.
pub struct EventLog<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<PuzzleEvent, SIZE>>>,
}

impl<const SIZE: usize> EventLog<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Append an event, evicting the oldest one if the log is full
    pub fn publish(&self, event: PuzzleEvent) {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            if queue.is_full() {
                let _ = queue.pop_front();
            }
            let _ = queue.push_back(event);
        });
    }

    /// Take the oldest pending event
    pub fn try_take(&self) -> Option<PuzzleEvent> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for EventLog<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}
