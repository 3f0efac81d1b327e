//! Configuration module for nema-focuser.
//!
//! Provides the persisted focuser settings, their valid ranges and
//! loading/saving from TOML files (with `std` feature).

mod focuser;
mod limits;
#[cfg(feature = "std")]
mod loader;
pub mod units;
mod validation;

pub use focuser::FocuserConfig;
pub use limits::{Applied, LimitPolicy};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config, save_config, to_toml_string};

// Re-export unit types at config level
pub use units::{Microsteps, Range};
