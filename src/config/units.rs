//! Unit types and valid ranges for focuser settings.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Inclusive range of a numeric setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// Smallest accepted value.
    pub min: u32,
    /// Largest accepted value.
    pub max: u32,
}

impl Range {
    /// Create a new inclusive range.
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Check if a value lies inside the range.
    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a value into the range.
    #[inline]
    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }
}

/// Delay between step pulses, in microseconds.
pub const STEP_DELAY_RANGE_US: Range = Range::new(10, 10_000);

/// Default delay between step pulses, in microseconds.
pub const DEFAULT_STEP_DELAY_US: u32 = 1000;

/// Accepted steps-per-revolution values.
pub const STEPS_PER_REVOLUTION_RANGE: Range = Range::new(100, 400);

/// Default steps per revolution (1.8° NEMA 17).
pub const DEFAULT_STEPS_PER_REVOLUTION: u32 = 200;

/// Step line high time, in microseconds. Always shorter than the minimum step delay.
pub const PULSE_WIDTH_US: u32 = 2;

/// Default travel limit in steps.
pub const DEFAULT_MAX_POSITION: u32 = 100_000;

/// Default timer period while idle, in milliseconds.
pub const DEFAULT_POLL_PERIOD_MS: u32 = 1000;

/// Microstep divisor (1, 2, 4, 8, 16).
///
/// Stored and reported only; the stepping loop does not scale counts or timing by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(into = "u16")]
pub struct Microsteps(u16);

impl Microsteps {
    /// Full step (no microstepping).
    pub const FULL: Self = Self(1);
    /// Half step.
    pub const HALF: Self = Self(2);
    /// Quarter step.
    pub const QUARTER: Self = Self(4);
    /// Eighth step.
    pub const EIGHTH: Self = Self(8);
    /// Sixteenth step (finest mode of the HAT's DRV8825).
    pub const SIXTEENTH: Self = Self(16);

    const VALID_VALUES: [u16; 5] = [1, 2, 4, 8, 16];

    /// Create a new Microsteps value with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMicrosteps` if the value is not one of 1, 2, 4, 8, 16.
    pub fn new(value: u16) -> Result<Self, ConfigError> {
        if Self::VALID_VALUES.contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidMicrosteps(value))
        }
    }

    /// Get the raw divisor value.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl Default for Microsteps {
    fn default() -> Self {
        Self::FULL
    }
}

impl fmt::Display for Microsteps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1/{}", self.0)
    }
}

impl TryFrom<u16> for Microsteps {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Microsteps> for u16 {
    fn from(value: Microsteps) -> Self {
        value.0
    }
}

impl<'de> Deserialize<'de> for Microsteps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u16::deserialize(deserializer)?;
        Microsteps::new(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}
