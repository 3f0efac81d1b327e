//! # nema-focuser
//!
//! Motion control for a NEMA stepper focuser on the Waveshare Stepper Motor
//! HAT (B), with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Three motor channels**: X, Y and Z, each with DIR/STEP/active-low ENABLE lines
//! - **embedded-hal 1.0**: Uses `OutputPin` for the lines, `DelayNs` for pulse timing
//! - **Timer-driven**: Motion advances in bounded batches from a single timer
//! - **Absolute and relative moves**, abort and sync, clamped to `[0, max_position]`
//! - **no_std compatible**: Core library works without standard library
//! - **Configuration-driven**: Settings persisted to and restored from TOML files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nema_focuser::{Focuser, FocusDirection};
//!
//! let config = nema_focuser::load_config("focuser.toml")?;
//!
//! let mut focuser = Focuser::builder()
//!     .gpio(my_gpio_provider)
//!     .config(config)
//!     .build()?;
//!
//! focuser.connect()?;
//! focuser.move_relative(FocusDirection::Outward, 500)?;
//!
//! loop {
//!     let next = focuser.timer_hit();
//!     sleep(next.delay);
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and `Vec` event sinks
//! - `defmt`: Enables defmt logging for embedded targets (otherwise `log` is used)

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod focuser;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use config::{validate_config, FocuserConfig, LimitPolicy};
pub use error::{ConfigError, ConnectError, Error, MotorError, Result};
pub use focuser::{
    Capabilities, EventSink, FnSink, Focuser, FocuserBuilder, FocuserDevice, FocuserEvent,
    MotionResult, NextTick, NoEvents,
};
pub use motion::{FocusDirection, STEPS_PER_TICK};
pub use motor::{GpioBank, GpioProvider, MotionState, MotorChannel};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, save_config};

// Unit types
pub use config::units::Microsteps;
