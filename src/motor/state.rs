//! Motion state of the focuser.

use core::fmt;

/// Whether the focuser is emitting pulses.
///
/// The active channel's enable line is asserted exactly while `Moving`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionState {
    /// No move in progress; motors disabled.
    #[default]
    Idle,
    /// A move is in progress.
    Moving,
}

impl MotionState {
    /// Get the state name as a static string.
    pub const fn name(self) -> &'static str {
        match self {
            MotionState::Idle => "Idle",
            MotionState::Moving => "Moving",
        }
    }

    /// True while a move is in progress.
    #[inline]
    pub fn is_moving(self) -> bool {
        self == MotionState::Moving
    }
}

impl fmt::Display for MotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
