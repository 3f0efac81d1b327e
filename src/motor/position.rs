//! Position tracking for the focuser.
//!
//! Position is counted in emitted step pulses; there is no hardware feedback.

use crate::motion::Direction;

/// Focuser position tracker bounded by `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Current position in steps
    steps: u32,
    /// Travel limit in steps
    max: u32,
}

impl Position {
    /// Create a tracker at `steps`, clamped to `max`.
    #[inline]
    pub fn new(steps: u32, max: u32) -> Self {
        Self {
            steps: steps.min(max),
            max,
        }
    }

    /// Get current position in steps.
    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Get the travel limit.
    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Clamp a requested target into `[0, max]`.
    #[inline]
    pub fn clamp(&self, target: u32) -> u32 {
        target.min(self.max)
    }

    /// Redefine the current position (sync), clamped to the limit.
    #[inline]
    pub fn set_steps(&mut self, steps: u32) {
        self.steps = self.clamp(steps);
    }

    /// Change the travel limit, pulling the position inside it.
    pub fn set_max(&mut self, max: u32) {
        self.max = max;
        self.steps = self.steps.min(max);
    }

    /// Account for one emitted pulse.
    #[inline]
    pub fn step(&mut self, direction: Direction) {
        self.steps = match direction {
            Direction::Forward => self.steps.saturating_add(1).min(self.max),
            Direction::Reverse => self.steps.saturating_sub(1),
        };
    }

    /// Target reached after moving `delta` steps in `direction`, clamped to `[0, max]`.
    pub fn offset(&self, direction: Direction, delta: u32) -> u32 {
        match direction {
            Direction::Forward => self.clamp(self.steps.saturating_add(delta)),
            Direction::Reverse => self.steps.saturating_sub(delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_tracking() {
        let mut pos = Position::new(0, 100);

        pos.step(Direction::Forward);
        pos.step(Direction::Forward);
        assert_eq!(pos.steps(), 2);

        pos.step(Direction::Reverse);
        assert_eq!(pos.steps(), 1);
    }

    #[test]
    fn test_position_saturates_at_bounds() {
        let mut pos = Position::new(0, 1);
        pos.step(Direction::Reverse);
        assert_eq!(pos.steps(), 0);

        pos.step(Direction::Forward);
        pos.step(Direction::Forward);
        assert_eq!(pos.steps(), 1);
    }

    #[test]
    fn test_offset_clamps() {
        let pos = Position::new(300, 100_000);
        assert_eq!(pos.offset(Direction::Reverse, 1000), 0);
        assert_eq!(pos.offset(Direction::Forward, u32::MAX), 100_000);
        assert_eq!(pos.offset(Direction::Forward, 200), 500);
    }

    #[test]
    fn test_set_max_pulls_position_in() {
        let mut pos = Position::new(900, 1000);
        pos.set_max(500);
        assert_eq!(pos.steps(), 500);
        assert_eq!(pos.clamp(600), 500);
    }
}
