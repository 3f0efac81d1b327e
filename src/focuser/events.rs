//! Events reported to the device-integration layer.

use crate::error::{ConnectError, MotorError};
use crate::motor::MotionState;

/// Setting that changed, so the configuration collaborator can persist it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigField {
    /// Inter-step delay.
    StepDelay,
    /// Steps per revolution.
    StepsPerRevolution,
    /// Microstepping mode.
    Microsteps,
    /// Active motor channel.
    Channel,
    /// Travel limit.
    MaxPosition,
}

impl ConfigField {
    /// Field name as used in the configuration file.
    pub const fn name(self) -> &'static str {
        match self {
            ConfigField::StepDelay => "step_delay_us",
            ConfigField::StepsPerRevolution => "steps_per_revolution",
            ConfigField::Microsteps => "microsteps",
            ConfigField::Channel => "channel",
            ConfigField::MaxPosition => "max_position",
        }
    }
}

/// Something the focuser reports.
#[derive(Debug, Clone, PartialEq)]
pub enum FocuserEvent {
    /// GPIO acquired, all motors disabled.
    Connected,
    /// GPIO released.
    Disconnected,
    /// Connecting failed; nothing was retained.
    ConnectionFailed(ConnectError),
    /// Position or state update. Follows the pulses that produced it.
    PositionChanged {
        /// Current position in steps.
        position: u32,
        /// Motion state after the update.
        state: MotionState,
    },
    /// Target reached.
    MotionComplete,
    /// Move stopped by `abort`.
    MotionAborted,
    /// Move stopped by a pin failure.
    MotionFault(MotorError),
    /// A setting changed.
    ConfigurationChanged(ConfigField),
}

/// Receiver of focuser events.
pub trait EventSink {
    /// Handle one event.
    fn emit(&mut self, event: FocuserEvent);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEvents;

impl EventSink for NoEvents {
    fn emit(&mut self, _event: FocuserEvent) {}
}

/// Adapts a closure into an [`EventSink`].
pub struct FnSink<F>(pub F);

impl<F> EventSink for FnSink<F>
where
    F: FnMut(FocuserEvent),
{
    fn emit(&mut self, event: FocuserEvent) {
        (self.0)(event)
    }
}

impl<E> EventSink for &mut E
where
    E: EventSink + ?Sized,
{
    fn emit(&mut self, event: FocuserEvent) {
        (**self).emit(event)
    }
}

#[cfg(feature = "std")]
impl EventSink for std::vec::Vec<FocuserEvent> {
    fn emit(&mut self, event: FocuserEvent) {
        self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_sink() {
        let mut count = 0;
        {
            let mut sink = FnSink(|_event: FocuserEvent| count += 1);
            sink.emit(FocuserEvent::MotionComplete);
            sink.emit(FocuserEvent::MotionAborted);
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn test_vec_sink() {
        let mut sink = Vec::new();
        sink.emit(FocuserEvent::Connected);
        assert_eq!(sink, vec![FocuserEvent::Connected]);
    }
}
