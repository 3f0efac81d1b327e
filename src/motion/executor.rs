//! Motion execution - batched step pulses per timer tick.

use crate::motor::Position;

use super::plan::MovePlan;

/// Pulses emitted per timer tick.
pub const STEPS_PER_TICK: u32 = 10;

/// Result of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Pulses emitted in this batch.
    pub steps: u32,
    /// Whether the target has been reached.
    pub reached: bool,
}

/// Runtime state of an in-flight move.
#[derive(Debug, Clone)]
pub struct MotionExecutor {
    /// The plan being executed.
    plan: MovePlan,

    /// Pulses emitted since the move started.
    steps_taken: u32,
}

impl MotionExecutor {
    /// Create a new executor for a plan.
    pub fn new(plan: MovePlan) -> Self {
        Self {
            plan,
            steps_taken: 0,
        }
    }

    /// Get the plan.
    #[inline]
    pub fn plan(&self) -> &MovePlan {
        &self.plan
    }

    /// Pulses emitted so far.
    #[inline]
    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    /// Check if the position has reached the target.
    #[inline]
    pub fn is_complete(&self, position: &Position) -> bool {
        position.steps() == self.plan.target
    }

    /// Emit up to [`STEPS_PER_TICK`] pulses toward the target.
    ///
    /// `pulse` is called once per step; the position advances only after a
    /// pulse succeeds. The first failure ends the batch and is returned, with
    /// `position` reflecting every pulse emitted before it.
    pub fn run_batch<E, F>(&mut self, position: &mut Position, mut pulse: F) -> Result<BatchOutcome, E>
    where
        F: FnMut() -> Result<(), E>,
    {
        let mut steps = 0;
        while steps < STEPS_PER_TICK && !self.is_complete(position) {
            pulse()?;
            position.step(self.plan.direction);
            steps += 1;
            self.steps_taken += 1;
        }

        Ok(BatchOutcome {
            steps,
            reached: self.is_complete(position),
        })
    }
}
