//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::units::{STEPS_PER_REVOLUTION_RANGE, STEP_DELAY_RANGE_US};
use super::FocuserConfig;

/// Validate a focuser configuration.
///
/// Checks:
/// - Step delay is within [10, 10000] us
/// - Steps per revolution is within [100, 400]
/// - Max position and poll period are non-zero
/// - Stored position does not exceed max position
///
/// Microsteps are checked at deserialization time.
pub fn validate_config(config: &FocuserConfig) -> Result<()> {
    if !STEP_DELAY_RANGE_US.contains(config.step_delay_us) {
        return Err(Error::Config(ConfigError::StepDelayOutOfRange(
            config.step_delay_us,
        )));
    }

    if !STEPS_PER_REVOLUTION_RANGE.contains(config.steps_per_revolution) {
        return Err(Error::Config(ConfigError::StepsPerRevolutionOutOfRange(
            config.steps_per_revolution,
        )));
    }

    if config.max_position == 0 {
        return Err(Error::Config(ConfigError::InvalidMaxPosition(0)));
    }

    if config.position > config.max_position {
        return Err(Error::Config(ConfigError::PositionOutOfRange {
            position: config.position,
            max: config.max_position,
        }));
    }

    if config.poll_period_ms == 0 {
        return Err(Error::Config(ConfigError::InvalidPollPeriod(0)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&FocuserConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_step_delay() {
        let config = FocuserConfig {
            step_delay_us: 5,
            ..FocuserConfig::default()
        };

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::StepDelayOutOfRange(5)))
        ));
    }

    #[test]
    fn test_position_beyond_max() {
        let config = FocuserConfig {
            max_position: 1000,
            position: 1001,
            ..FocuserConfig::default()
        };

        assert_eq!(
            validate_config(&config),
            Err(Error::Config(ConfigError::PositionOutOfRange {
                position: 1001,
                max: 1000
            }))
        );
    }
}
