//! Focuser module for nema-focuser.
//!
//! Provides the motion controller, its builder, the event surface and the
//! capability trait held by the device-integration layer.

mod builder;
mod capability;
mod driver;
mod events;

pub use builder::FocuserBuilder;
pub use capability::{Capabilities, FocuserDevice, MotionResult, NextTick, MOVING_TICK};
pub use driver::Focuser;
pub use events::{ConfigField, EventSink, FnSink, FocuserEvent, NoEvents};
