//! Configuration types for on-call reporting.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{BankHolidayCalendar, DayCategory};

/// Default hour at which a rotation day starts.
pub const DEFAULT_DAILY_ROTATION_STARTS_AT: u32 = 6;

/// Default sampling step in minutes.
pub const DEFAULT_CHECK_ROTATION_CHANGE_EVERY: u32 = 30;

/// Rotation timing settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RotationInfo {
    /// Hour of day at which a new rotation day starts.
    #[serde(default = "default_daily_rotation_starts_at")]
    pub daily_rotation_starts_at: u32,
    /// Sampling step in minutes.
    #[serde(default = "default_check_rotation_change_every")]
    pub check_rotation_change_every: u32,
}

impl Default for RotationInfo {
    fn default() -> Self {
        Self {
            daily_rotation_starts_at: DEFAULT_DAILY_ROTATION_STARTS_AT,
            check_rotation_change_every: DEFAULT_CHECK_ROTATION_CHANGE_EVERY,
        }
    }
}

fn default_daily_rotation_starts_at() -> u32 {
    DEFAULT_DAILY_ROTATION_STARTS_AT
}

fn default_check_rotation_change_every() -> u32 {
    DEFAULT_CHECK_ROTATION_CHANGE_EVERY
}

/// The daily price of one day category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DayPrice {
    /// The category this price applies to.
    pub day: DayCategory,
    /// Amount paid for a full day on call.
    pub price: Decimal,
}

/// Prices section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RotationPrices {
    /// Currency of every price (e.g., "GBP").
    pub currency: String,
    /// Daily price per category.
    #[serde(default)]
    pub days_prices: Vec<DayPrice>,
}

/// Hours of a day category that are not billed as on call.
///
/// The window is `[excluded_starts_at, excluded_ends_at)` in hours of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ExcludedHours {
    /// The category this window applies to.
    pub day: DayCategory,
    /// First excluded hour (inclusive).
    pub excluded_starts_at: u32,
    /// End of the window (exclusive).
    pub excluded_ends_at: u32,
}

impl ExcludedHours {
    /// Number of hours the window covers.
    pub fn width(&self) -> u32 {
        self.excluded_ends_at.saturating_sub(self.excluded_starts_at)
    }

    /// Returns true if `hour` falls inside the window.
    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.excluded_starts_at && hour < self.excluded_ends_at
    }
}

/// A user who takes part in rotations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RotationUser {
    /// The paging service user id.
    pub user_id: String,
    /// The user's name.
    pub name: String,
    /// Name of the bank holiday calendar that applies to the user.
    pub holidays_calendar: String,
}

/// The `report.yaml` file structure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportSettings {
    /// Rotation timing settings.
    #[serde(default)]
    pub rotation_info: RotationInfo,
    /// Prices section.
    pub rotation_prices: RotationPrices,
    /// Excluded hours per category.
    #[serde(default)]
    pub rotation_excluded_hours: Vec<ExcludedHours>,
    /// Users taking part in rotations.
    #[serde(default)]
    pub rotation_users: Vec<RotationUser>,
    /// Schedule ids left out of reports.
    #[serde(default)]
    pub schedules_to_ignore: Vec<String>,
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    settings: ReportSettings,
    /// Calendars keyed by `<name>-<year>`.
    calendars: HashMap<String, BankHolidayCalendar>,
}

impl ReportConfig {
    /// Creates a new ReportConfig from its component parts.
    pub fn new(settings: ReportSettings, calendars: Vec<BankHolidayCalendar>) -> Self {
        let calendars = calendars
            .into_iter()
            .map(|calendar| (calendar.key(), calendar))
            .collect();
        Self {
            settings,
            calendars,
        }
    }

    /// Returns the `report.yaml` settings.
    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Returns all calendars keyed by `<name>-<year>`.
    pub fn calendars(&self) -> &HashMap<String, BankHolidayCalendar> {
        &self.calendars
    }
}
