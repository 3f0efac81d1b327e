//! Move planning: target clamping and direction.

use core::fmt;

use crate::motor::Position;

/// Direction of travel along the step axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Increasing position (direction line high).
    Forward,
    /// Decreasing position (direction line low).
    Reverse,
}

impl Direction {
    /// Direction needed to travel from `from` to `to`. Equal positions map to `Forward`.
    #[inline]
    pub fn between(from: u32, to: u32) -> Self {
        if to >= from {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }

    /// Check if this is the forward direction.
    #[inline]
    pub fn is_forward(self) -> bool {
        self == Direction::Forward
    }
}

/// Relative move direction as seen by focuser clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FocusDirection {
    /// Toward position 0.
    Inward,
    /// Toward the maximum position.
    Outward,
}

impl From<FocusDirection> for Direction {
    fn from(dir: FocusDirection) -> Self {
        match dir {
            FocusDirection::Inward => Direction::Reverse,
            FocusDirection::Outward => Direction::Forward,
        }
    }
}

impl fmt::Display for FocusDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FocusDirection::Inward => "inward",
            FocusDirection::Outward => "outward",
        })
    }
}

/// A planned single-direction move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlan {
    /// Clamped target position.
    pub target: u32,
    /// Direction fixed at request time.
    pub direction: Direction,
}

impl MovePlan {
    /// Plan a move to an absolute target, clamped to `[0, max]`.
    ///
    /// Returns `None` if the clamped target equals the current position.
    pub fn absolute(position: &Position, target: u32) -> Option<Self> {
        let target = position.clamp(target);
        let current = position.steps();
        if target == current {
            return None;
        }

        Some(Self {
            target,
            direction: Direction::between(current, target),
        })
    }

    /// Plan a relative move of `delta` steps, clamped to `[0, max]`.
    pub fn relative(position: &Position, dir: FocusDirection, delta: u32) -> Option<Self> {
        Self::absolute(position, position.offset(dir.into(), delta))
    }

    /// Number of steps from `position` to the target.
    #[inline]
    pub fn remaining(&self, position: &Position) -> u32 {
        self.target.abs_diff(position.steps())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_direction() {
        let pos = Position::new(200, 100_000);

        let out = MovePlan::absolute(&pos, 500).unwrap();
        assert_eq!(out.direction, Direction::Forward);
        assert_eq!(out.remaining(&pos), 300);

        let back = MovePlan::absolute(&pos, 50).unwrap();
        assert_eq!(back.direction, Direction::Reverse);
    }

    #[test]
    fn test_same_target_is_none() {
        let pos = Position::new(200, 100_000);
        assert!(MovePlan::absolute(&pos, 200).is_none());
    }

    #[test]
    fn test_target_clamped_to_max() {
        let pos = Position::new(0, 100_000);
        let plan = MovePlan::absolute(&pos, 100_001).unwrap();
        assert_eq!(plan.target, 100_000);

        let at_max = Position::new(100_000, 100_000);
        assert!(MovePlan::absolute(&at_max, 100_001).is_none());
    }

    #[test]
    fn test_relative_inward_floors_at_zero() {
        let pos = Position::new(300, 100_000);
        let plan = MovePlan::relative(&pos, FocusDirection::Inward, 1000).unwrap();
        assert_eq!(plan.target, 0);
        assert_eq!(plan.direction, Direction::Reverse);
    }
}
