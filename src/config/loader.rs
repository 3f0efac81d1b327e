//! Configuration loading and saving (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::FocuserConfig;

fn truncated(text: &str) -> heapless::String<128> {
    let mut msg = heapless::String::new();
    for c in text.chars() {
        if msg.push(c).is_err() {
            break;
        }
    }
    msg
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use nema_focuser::load_config;
///
/// let config = load_config("focuser.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FocuserConfig> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| Error::Config(ConfigError::IoError(truncated(&e.to_string()))))?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// Missing keys take their defaults.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<FocuserConfig> {
    let config: FocuserConfig = toml::from_str(content)
        .map_err(|e| Error::Config(ConfigError::ParseError(truncated(e.message()))))?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

/// Render configuration as a TOML document.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_toml_string(config: &FocuserConfig) -> Result<String> {
    toml::to_string(config)
        .map_err(|e| Error::Config(ConfigError::ParseError(truncated(&e.to_string()))))
}

/// Save configuration to a TOML file, replacing any existing content.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the file cannot be written.
pub fn save_config<P: AsRef<Path>>(path: P, config: &FocuserConfig) -> Result<()> {
    super::validation::validate_config(config)?;
    let content = to_toml_string(config)?;
    fs::write(path.as_ref(), content)
        .map_err(|e| Error::Config(ConfigError::IoError(truncated(&e.to_string()))))
}
