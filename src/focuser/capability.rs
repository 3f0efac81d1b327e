//! Capability interface the device-integration layer holds.

use core::time::Duration;

use crate::error::Result;
use crate::motion::FocusDirection;
use crate::motor::{MotionState, MotorChannel};

/// Timer period while a move is in progress.
pub const MOVING_TICK: Duration = Duration::from_millis(1);

/// Motion capabilities advertised to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities(u8);

impl Capabilities {
    /// Absolute moves.
    pub const ABS_MOVE: Self = Self(1 << 0);
    /// Relative moves.
    pub const REL_MOVE: Self = Self(1 << 1);
    /// Abort in progress moves.
    pub const ABORT: Self = Self(1 << 2);
    /// Redefine position without moving.
    pub const SYNC: Self = Self(1 << 3);

    /// No capabilities.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Union of two sets.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether every flag in `other` is present.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionResult {
    /// Already at the target; nothing to do.
    Complete,
    /// Motion started; completion is reported from the timer.
    InProgress,
}

/// When the timer should fire next.
///
/// A single repeating task drives the focuser; its period depends on the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextTick {
    /// State after the tick.
    pub state: MotionState,
    /// Delay before the next tick.
    pub delay: Duration,
}

impl NextTick {
    /// Tick again as soon as possible to continue a move.
    pub const fn moving() -> Self {
        Self {
            state: MotionState::Moving,
            delay: MOVING_TICK,
        }
    }

    /// Tick at the idle poll period.
    pub const fn idle(poll_period_ms: u32) -> Self {
        Self {
            state: MotionState::Idle,
            delay: Duration::from_millis(poll_period_ms as u64),
        }
    }
}

/// Focuser operations exposed to the device-integration layer.
///
/// Implemented by [`Focuser`](super::Focuser); the integration layer holds it as
/// a trait object instead of extending a device base class.
pub trait FocuserDevice {
    /// Supported motion capabilities.
    fn capabilities(&self) -> Capabilities;

    /// Acquire the pin interface and disable all motors.
    fn connect(&mut self) -> Result<()>;

    /// Disable all motors and release the pin interface. Idempotent.
    fn disconnect(&mut self);

    /// Whether the pin interface is held.
    fn is_connected(&self) -> bool;

    /// Move to an absolute position in steps.
    fn move_absolute(&mut self, target: u32) -> Result<MotionResult>;

    /// Move by `delta` steps inward or outward.
    fn move_relative(&mut self, direction: FocusDirection, delta: u32) -> Result<MotionResult>;

    /// Stop any move in progress. No-op while idle.
    fn abort(&mut self);

    /// Redefine the current position without moving.
    fn sync(&mut self, position: u32) -> Result<u32>;

    /// Select the active motor channel.
    fn select_channel(&mut self, channel: MotorChannel) -> Result<()>;

    /// Set the inter-step delay; returns the applied value.
    fn set_step_delay_us(&mut self, value: u32) -> Result<u32>;

    /// Set steps per revolution; returns the applied value.
    fn set_steps_per_revolution(&mut self, value: u32) -> Result<u32>;

    /// Set the microstepping divisor.
    fn set_microsteps(&mut self, value: u16) -> Result<()>;

    /// Advance motion by one timer tick.
    fn timer_hit(&mut self) -> NextTick;

    /// Current position in steps.
    fn position(&self) -> u32;

    /// Current motion state.
    fn motion_state(&self) -> MotionState;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_flags() {
        let caps = Capabilities::ABS_MOVE.union(Capabilities::ABORT);
        assert!(caps.contains(Capabilities::ABS_MOVE));
        assert!(!caps.contains(Capabilities::SYNC));
        assert!(caps.contains(Capabilities::empty()));
    }

    #[test]
    fn test_tick_periods() {
        assert_eq!(NextTick::moving().delay, Duration::from_millis(1));
        assert_eq!(NextTick::idle(1000).delay, Duration::from_secs(1));
        assert_eq!(NextTick::idle(1000).state, MotionState::Idle);
    }
}
