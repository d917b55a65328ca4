//! Configuration loading and management for the on-call report engine.
//!
//! This module provides functionality to load report configuration from YAML
//! files, including rotation timing, day prices, excluded hours, rotation
//! users and their bank holiday calendars.
//!
//! # Example
//!
//! ```no_run
//! use oncall_report::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/example").unwrap();
//! println!("Prices in {}", config.currency());
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, UserCalendars};
pub use types::{
    DEFAULT_CHECK_ROTATION_CHANGE_EVERY, DEFAULT_DAILY_ROTATION_STARTS_AT, DayPrice,
    ExcludedHours, ReportConfig, ReportSettings, RotationInfo, RotationPrices, RotationUser,
};
