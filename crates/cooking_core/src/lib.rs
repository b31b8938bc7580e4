//! Guided cooking: step navigation, the per-step countdown, and the task that
//! drives it.

pub mod controller;
pub mod session;
pub mod timer;

pub use controller::{CookingController, SessionEvent, TICK_PERIOD};
pub use session::{CookingSession, SessionError, SessionSnapshot, SessionState};
pub use timer::{format_clock, StepTimer, TickOutcome};

#[cfg(test)]
#[path = "tests/fixtures.rs"]
mod fixtures;
