//! Out-of-range policy for runtime settings.

use serde::{Deserialize, Serialize};

use super::units::Range;

/// Policy for handling out-of-range setting values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum LimitPolicy {
    /// Reject values outside the valid range.
    #[default]
    Reject,
    /// Clamp values to the nearest bound.
    Clamp,
}

/// Outcome of applying a [`LimitPolicy`] to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Value was inside the range.
    Accepted(u32),
    /// Value was outside the range and moved to the nearest bound.
    Clamped(u32),
    /// Value was outside the range and refused.
    Rejected,
}

impl LimitPolicy {
    /// Apply the policy to a value against an inclusive range.
    pub fn apply(self, value: u32, range: Range) -> Applied {
        if range.contains(value) {
            Applied::Accepted(value)
        } else {
            match self {
                LimitPolicy::Reject => Applied::Rejected,
                LimitPolicy::Clamp => Applied::Clamped(range.clamp(value)),
            }
        }
    }
}
