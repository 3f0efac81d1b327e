//! Motor module for nema-focuser.
//!
//! Provides the channel selection, pin interface, step pulse generator and
//! position tracking that the focuser drives.

mod channel;
mod gpio;
mod position;
mod pulse;
mod state;

pub use channel::{ChannelMap, ChannelPinout, ChannelPins, ChannelSelector, MotorChannel, PinRole};
pub use gpio::{GpioBank, GpioProvider};
pub use position::Position;
pub use pulse::{StepPulseGenerator, StepTiming};
pub use state::MotionState;
