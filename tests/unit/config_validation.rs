//! Unit tests for configuration validation.

use nema_focuser::config::{parse_config, validate_config};
use nema_focuser::error::{ConfigError, Error};
use nema_focuser::FocuserConfig;

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let config = FocuserConfig {
        step_delay_us: 10,
        steps_per_revolution: 400,
        position: 100_000,
        ..FocuserConfig::default()
    };
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a step delay above the range.
#[test]
fn test_step_delay_too_long() {
    let result = parse_config("step_delay_us = 10001\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::StepDelayOutOfRange(10_001)))
    ));
}

/// Test validation fails for steps per revolution below the range.
#[test]
fn test_steps_per_revolution_too_low() {
    let result = parse_config("steps_per_revolution = 99\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::StepsPerRevolutionOutOfRange(99)))
    ));
}

/// Test validation fails for a stored position beyond the limit.
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

/// Test validation fails for zero limits.
#[test]
fn test_zero_limits() {
    assert!(matches!(
        parse_config("max_position = 0\nposition = 0\n"),
        Err(Error::Config(ConfigError::InvalidMaxPosition(0)))
    ));
    assert!(matches!(
        parse_config("poll_period_ms = 0\n"),
        Err(Error::Config(ConfigError::InvalidPollPeriod(0)))
    ));
}

/// Test that errors name the offending field.
#[test]
fn test_error_messages_name_field() {
    let err = parse_config("step_delay_us = 3\n").unwrap_err();
    assert!(err.to_string().contains("Step delay"), "unexpected message: {}", err);
}
