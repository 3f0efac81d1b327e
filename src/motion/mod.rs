//! Motion module for nema-focuser.
//!
//! Provides move planning and the per-tick step batch.

mod executor;
mod plan;

pub use executor::{BatchOutcome, MotionExecutor, STEPS_PER_TICK};
pub use plan::{Direction, FocusDirection, MovePlan};
