//! Error types for nema-focuser.
//!
//! Provides unified error handling across connection, configuration and motor control.

use core::fmt;

use crate::motor::{MotorChannel, PinRole};

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all focuser operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// GPIO interface could not be acquired
    Connect(ConnectError),
    /// Configuration parsing, validation or a rejected setting
    Config(ConfigError),
    /// Motor operation error
    Motor(MotorError),
}

/// Connection errors raised while acquiring the pin interface.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectError {
    /// The GPIO backend is unavailable (e.g. the GPIO daemon is not running)
    GpioUnavailable(heapless::String<64>),
    /// The pins were acquired but could not be driven to their safe state
    PinSetup(MotorError),
}

impl ConnectError {
    /// Build a `GpioUnavailable` error from a reason, truncating to 64 bytes.
    pub fn unavailable(reason: &str) -> Self {
        let mut msg = heapless::String::new();
        for c in reason.chars() {
            if msg.push(c).is_err() {
                break;
            }
        }
        ConnectError::GpioUnavailable(msg)
    }
}

/// Configuration-related errors.
///
/// Every out-of-range variant names the offending field and carries the rejected value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Step delay outside [10, 10000] microseconds
    StepDelayOutOfRange(u32),
    /// Steps per revolution outside [100, 400]
    StepsPerRevolutionOutOfRange(u32),
    /// Microstep divisor not one of 1, 2, 4, 8, 16
    InvalidMicrosteps(u16),
    /// Maximum position must be greater than zero
    InvalidMaxPosition(u32),
    /// Position beyond the configured maximum
    PositionOutOfRange {
        /// Requested position
        position: u32,
        /// Configured maximum position
        max: u32,
    },
    /// Idle poll period must be greater than zero
    InvalidPollPeriod(u32),
    /// A required builder field was not provided
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// The focuser is not connected to its GPIO interface
    NotConnected,
    /// Writing a pin failed
    PinWrite {
        /// Channel being driven
        channel: MotorChannel,
        /// Line that failed
        line: PinRole,
    },
    /// Channel changes are refused while a move is in progress
    ChannelBusy,
    /// Operation refused while a move is in progress
    Busy,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Connect(e) => write!(f, "Connection error: {}", e),
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
        }
    }
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectError::GpioUnavailable(reason) => write!(f, "GPIO unavailable: {}", reason),
            ConnectError::PinSetup(e) => write!(f, "Failed to disable motors: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::StepDelayOutOfRange(v) => {
                write!(f, "Step delay {} us out of range. Must be 10-10000", v)
            }
            ConfigError::StepsPerRevolutionOutOfRange(v) => {
                write!(f, "Steps per revolution {} out of range. Must be 100-400", v)
            }
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16", v)
            }
            ConfigError::InvalidMaxPosition(v) => write!(f, "Invalid max position: {}. Must be > 0", v),
            ConfigError::PositionOutOfRange { position, max } => {
                write!(f, "Position {} exceeds max position {}", position, max)
            }
            ConfigError::InvalidPollPeriod(v) => write!(f, "Invalid poll period: {} ms. Must be > 0", v),
            ConfigError::MissingField(name) => write!(f, "{} is required", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::NotConnected => write!(f, "Focuser not connected"),
            MotorError::PinWrite { channel, line } => {
                write!(f, "GPIO write failed on {} {} line", channel, line)
            }
            MotorError::ChannelBusy => write!(f, "Cannot change motor channel while moving"),
            MotorError::Busy => write!(f, "Operation not allowed while moving"),
        }
    }
}

// Conversion impls
impl From<ConnectError> for Error {
    fn from(e: ConnectError) -> Self {
        Error::Connect(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConnectError {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}
