//! Focuser configuration - the persisted settings surface.

use serde::{Deserialize, Serialize};

use super::limits::LimitPolicy;
use super::units::{
    Microsteps, DEFAULT_MAX_POSITION, DEFAULT_POLL_PERIOD_MS, DEFAULT_STEPS_PER_REVOLUTION,
    DEFAULT_STEP_DELAY_US,
};
use crate::motor::MotorChannel;

/// Complete focuser configuration, restored at startup and saved on change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocuserConfig {
    /// Delay after each step pulse in microseconds (10-10000).
    pub step_delay_us: u32,

    /// Motor steps per revolution (100-400). Advisory, not used for stepping.
    pub steps_per_revolution: u32,

    /// Microstep setting (1, 2, 4, 8, 16). Advisory, not used for stepping.
    pub microsteps: Microsteps,

    /// Active motor channel.
    pub channel: MotorChannel,

    /// Travel limit in steps.
    pub max_position: u32,

    /// Last known position in steps.
    pub position: u32,

    /// Timer period while idle, in milliseconds.
    pub poll_period_ms: u32,

    /// Invert direction line logic.
    pub reverse_direction: bool,

    /// How runtime setters treat out-of-range values.
    pub out_of_range: LimitPolicy,
}

impl Default for FocuserConfig {
    fn default() -> Self {
        Self {
            step_delay_us: DEFAULT_STEP_DELAY_US,
            steps_per_revolution: DEFAULT_STEPS_PER_REVOLUTION,
            microsteps: Microsteps::FULL,
            channel: MotorChannel::X,
            max_position: DEFAULT_MAX_POSITION,
            position: 0,
            poll_period_ms: DEFAULT_POLL_PERIOD_MS,
            reverse_direction: false,
            out_of_range: LimitPolicy::Reject,
        }
    }
}

impl FocuserConfig {
    /// Worst-case duration of one step batch in microseconds.
    pub fn batch_duration_us(&self, batch: u32) -> u32 {
        batch.saturating_mul(self.step_delay_us + super::units::PULSE_WIDTH_US)
    }
}
