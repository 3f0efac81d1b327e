//! Unit tests for TOML configuration parsing.

use nema_focuser::config::units::Microsteps;
use nema_focuser::config::{load_config, parse_config, save_config, to_toml_string};
use nema_focuser::{FocuserConfig, LimitPolicy, MotorChannel};

/// Test parsing a complete focuser configuration from TOML.
#[test]
fn test_parse_focuser_config() {
    let toml_str = r#"
step_delay_us = 800
steps_per_revolution = 400
microsteps = 8
channel = "y"
max_position = 50000
position = 1200
poll_period_ms = 500
reverse_direction = true
out_of_range = "clamp"
"#;

    let config = parse_config(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.step_delay_us, 800);
    assert_eq!(config.steps_per_revolution, 400);
    assert_eq!(config.microsteps, Microsteps::EIGHTH);
    assert_eq!(config.channel, MotorChannel::Y);
    assert_eq!(config.max_position, 50_000);
    assert_eq!(config.position, 1200);
    assert_eq!(config.poll_period_ms, 500);
    assert!(config.reverse_direction);
    assert_eq!(config.out_of_range, LimitPolicy::Clamp);
}

/// Test that missing keys take their defaults.
#[test]
fn test_parse_partial_config() {
    let config = parse_config("channel = \"z\"\n").expect("Failed to parse TOML");

    assert_eq!(
        config,
        FocuserConfig {
            channel: MotorChannel::Z,
            ..FocuserConfig::default()
        }
    );
}

/// Test that an unsupported microstep divisor fails to parse.
#[test]
fn test_parse_invalid_microsteps() {
    let result: Result<FocuserConfig, _> = toml::from_str("microsteps = 32\n");
    assert!(result.is_err());
}

/// Test that an unknown channel name fails to parse.
#[test]
fn test_parse_invalid_channel() {
    assert!(parse_config("channel = \"w\"\n").is_err());
}

/// Test that rendered TOML reads back as the same configuration.
#[test]
fn test_render_and_parse() {
    let config = FocuserConfig {
        step_delay_us: 250,
        channel: MotorChannel::Z,
        microsteps: Microsteps::QUARTER,
        position: 77,
        ..FocuserConfig::default()
    };

    let rendered = to_toml_string(&config).expect("Failed to render");
    assert!(rendered.contains("channel = \"z\""));
    assert!(rendered.contains("microsteps = 4"));

    assert_eq!(parse_config(&rendered).unwrap(), config);
}

/// Test saving and loading through the filesystem.
#[test]
fn test_save_and_load_file() {
    let path = std::env::temp_dir().join(format!(
        "nema-focuser-unit-{}.toml",
        std::process::id()
    ));
    let config = FocuserConfig {
        step_delay_us: 4000,
        position: 9000,
        ..FocuserConfig::default()
    };

    save_config(&path, &config).expect("Failed to save");
    let loaded = load_config(&path).expect("Failed to load");
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, config);
}
