//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading report
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::models::{BankHolidayCalendar, CalendarLookup, DayCategory};

use super::types::{ExcludedHours, ReportConfig, ReportSettings, RotationUser};

/// Resolves the holiday calendar that applies to a user in a given year.
///
/// This is the seam between the aggregator and wherever user settings and
/// calendars live. A missing user is reported as [`ReportError::UserNotFound`]
/// so callers can skip that user; a missing calendar is reported as
/// [`ReportError::CalendarNotFound`].
pub trait UserCalendars {
    /// Returns the calendar configured for `user_id` in `year`.
    fn calendar_for_user(&self, user_id: &str, year: i32) -> ReportResult<&dyn CalendarLookup>;
}

/// Loads and provides access to report configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query prices, excluded hours, users and calendars.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/example/
/// ├── report.yaml          # Rotation info, prices, excluded hours, users
/// └── calendars/
///     └── uk-2024.yaml     # Bank holidays of calendar "uk" for 2024
/// ```
///
/// # Example
///
/// ```no_run
/// use oncall_report::config::ConfigLoader;
/// use oncall_report::models::DayCategory;
///
/// let loader = ConfigLoader::load("./config/example").unwrap();
/// let price = loader.find_price_by_day(DayCategory::Weekday).unwrap();
/// println!("Weekday price: {} {}", price, loader.currency());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ReportConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/example")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `report.yaml` or the `calendars` directory is missing
    /// - Any file contains invalid YAML
    /// - Rotation settings or excluded windows are out of range
    pub fn load<P: AsRef<Path>>(path: P) -> ReportResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<ReportSettings>(&path.join("report.yaml"))?;
        let calendars = Self::load_calendars(&path.join("calendars"))?;
        debug!(
            path = %path.display(),
            users_count = settings.rotation_users.len(),
            calendars_count = calendars.len(),
            "Loaded report configuration"
        );

        Self::from_parts(settings, calendars)
    }

    /// Builds a loader from already-parsed settings and calendars.
    pub fn from_parts(
        settings: ReportSettings,
        calendars: Vec<BankHolidayCalendar>,
    ) -> ReportResult<Self> {
        Self::validate(&settings)?;
        Ok(Self {
            config: ReportConfig::new(settings, calendars),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> ReportResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ReportError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ReportError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all calendar files from the calendars directory.
    fn load_calendars(calendars_dir: &Path) -> ReportResult<Vec<BankHolidayCalendar>> {
        let calendars_dir_str = calendars_dir.display().to_string();

        let entries = fs::read_dir(calendars_dir).map_err(|_| ReportError::ConfigNotFound {
            path: calendars_dir_str.clone(),
        })?;

        let mut calendars = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| ReportError::ConfigNotFound {
                path: calendars_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                calendars.push(Self::load_yaml::<BankHolidayCalendar>(&path)?);
            }
        }

        Ok(calendars)
    }

    fn validate(settings: &ReportSettings) -> ReportResult<()> {
        let info = &settings.rotation_info;
        if info.daily_rotation_starts_at > 23 {
            return Err(ReportError::InvalidConfiguration {
                message: format!(
                    "daily_rotation_starts_at must be an hour between 0 and 23, got {}",
                    info.daily_rotation_starts_at
                ),
            });
        }
        if info.check_rotation_change_every == 0 {
            return Err(ReportError::InvalidConfiguration {
                message: "check_rotation_change_every must be at least one minute".to_string(),
            });
        }

        for window in &settings.rotation_excluded_hours {
            if window.excluded_starts_at >= window.excluded_ends_at || window.excluded_ends_at > 24
            {
                return Err(ReportError::InvalidConfiguration {
                    message: format!(
                        "excluded hours for '{}' must satisfy start < end <= 24, got [{}, {})",
                        window.day, window.excluded_starts_at, window.excluded_ends_at
                    ),
                });
            }
        }

        Ok(())
    }

    /// Returns the underlying report configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Returns the `report.yaml` settings.
    pub fn settings(&self) -> &ReportSettings {
        self.config.settings()
    }

    /// Currency of every configured price.
    pub fn currency(&self) -> &str {
        &self.settings().rotation_prices.currency
    }

    /// Hour of day at which a rotation day starts.
    pub fn rotation_boundary_hour(&self) -> u32 {
        self.settings().rotation_info.daily_rotation_starts_at
    }

    /// Sampling step in minutes.
    pub fn check_every_minutes(&self) -> u32 {
        self.settings().rotation_info.check_rotation_change_every
    }

    /// Gets the daily price of a category.
    ///
    /// # Returns
    ///
    /// Returns the price if configured, or `PriceNotFound`.
    pub fn find_price_by_day(&self, category: DayCategory) -> ReportResult<Decimal> {
        self.settings()
            .rotation_prices
            .days_prices
            .iter()
            .find(|p| p.day == category)
            .map(|p| p.price)
            .ok_or(ReportError::PriceNotFound { category })
    }

    /// Gets the excluded window of a category, if one is configured.
    pub fn find_excluded_hours_by_day(&self, category: DayCategory) -> Option<&ExcludedHours> {
        self.settings()
            .rotation_excluded_hours
            .iter()
            .find(|w| w.day == category)
    }

    /// Gets a rotation user by paging service id.
    pub fn find_rotation_user(&self, user_id: &str) -> ReportResult<&RotationUser> {
        self.settings()
            .rotation_users
            .iter()
            .find(|u| u.user_id == user_id)
            .ok_or_else(|| ReportError::UserNotFound {
                user_id: user_id.to_string(),
            })
    }

    /// Returns true if a schedule is on the ignore list.
    pub fn is_schedule_ignored(&self, schedule_id: &str) -> bool {
        self.settings()
            .schedules_to_ignore
            .iter()
            .any(|id| id == schedule_id)
    }
}

impl UserCalendars for ConfigLoader {
    fn calendar_for_user(&self, user_id: &str, year: i32) -> ReportResult<&dyn CalendarLookup> {
        let user = self.find_rotation_user(user_id)?;
        let key = BankHolidayCalendar::key_for(&user.holidays_calendar, year);
        self.config
            .calendars()
            .get(&key)
            .map(|calendar| calendar as &dyn CalendarLookup)
            .ok_or_else(|| ReportError::CalendarNotFound {
                calendar: key,
                user_id: user_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/example"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn settings_from(yaml: &str) -> ReportSettings {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.currency(), "GBP");
        assert_eq!(loader.rotation_boundary_hour(), 6);
        assert_eq!(loader.check_every_minutes(), 30);
    }

    #[test]
    fn test_find_price_by_day() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(
            loader.find_price_by_day(DayCategory::Weekday).unwrap(),
            dec("80")
        );
        assert_eq!(
            loader.find_price_by_day(DayCategory::Weekend).unwrap(),
            dec("120")
        );
        assert_eq!(
            loader.find_price_by_day(DayCategory::BankHoliday).unwrap(),
            dec("150")
        );
    }

    #[test]
    fn test_find_excluded_hours_by_day() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let weekday = loader
            .find_excluded_hours_by_day(DayCategory::Weekday)
            .expect("weekday window configured");
        assert_eq!(weekday.excluded_starts_at, 9);
        assert_eq!(weekday.excluded_ends_at, 17);
        assert!(
            loader
                .find_excluded_hours_by_day(DayCategory::Weekend)
                .is_none()
        );
    }

    #[test]
    fn test_find_rotation_user() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let user = loader.find_rotation_user("PADA001").unwrap();
        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.holidays_calendar, "uk");
    }

    #[test]
    fn test_find_rotation_user_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.find_rotation_user("PUNKNOWN") {
            Err(ReportError::UserNotFound { user_id }) => assert_eq!(user_id, "PUNKNOWN"),
            other => panic!("Expected UserNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_is_schedule_ignored() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert!(loader.is_schedule_ignored("PIGNORED"));
        assert!(!loader.is_schedule_ignored("PPLATFORM"));
    }

    #[test]
    fn test_calendar_for_user_resolves_by_year() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let calendar = loader.calendar_for_user("PADA001", 2024).unwrap();
        // 2024-12-25 is Christmas Day, 2024-03-02 a Saturday
        assert!(calendar.is_bank_holiday(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()));
        assert!(calendar.is_weekend(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()));
    }

    #[test]
    fn test_calendar_for_user_missing_year_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.calendar_for_user("PADA001", 2019) {
            Err(ReportError::CalendarNotFound { calendar, user_id }) => {
                assert_eq!(calendar, "uk-2019");
                assert_eq!(user_id, "PADA001");
            }
            Err(other) => panic!("Expected CalendarNotFound error, got {:?}", other),
            Ok(_) => panic!("Expected CalendarNotFound error"),
        }
    }

    #[test]
    fn test_calendar_for_unknown_user_is_recoverable() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let error = loader.calendar_for_user("PUNKNOWN", 2024).err().unwrap();
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        match ConfigLoader::load("/nonexistent/path") {
            Err(ReportError::ConfigNotFound { path }) => {
                assert!(path.contains("report.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_missing_price_is_not_a_load_error() {
        let loader = ConfigLoader::from_parts(
            settings_from("rotation_prices: { currency: GBP }"),
            vec![],
        )
        .unwrap();

        match loader.find_price_by_day(DayCategory::Weekend) {
            Err(ReportError::PriceNotFound { category }) => {
                assert_eq!(category, DayCategory::Weekend)
            }
            other => panic!("Expected PriceNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_boundary_hour_out_of_range_is_rejected() {
        let result = ConfigLoader::from_parts(
            settings_from(
                r#"
rotation_info:
  daily_rotation_starts_at: 24
rotation_prices: { currency: GBP }
"#,
            ),
            vec![],
        );
        assert!(matches!(
            result,
            Err(ReportError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_zero_sampling_step_is_rejected() {
        let result = ConfigLoader::from_parts(
            settings_from(
                r#"
rotation_info:
  check_rotation_change_every: 0
rotation_prices: { currency: GBP }
"#,
            ),
            vec![],
        );
        assert!(matches!(
            result,
            Err(ReportError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_inverted_excluded_window_is_rejected() {
        let result = ConfigLoader::from_parts(
            settings_from(
                r#"
rotation_prices: { currency: GBP }
rotation_excluded_hours:
  - day: weekday
    excluded_starts_at: 17
    excluded_ends_at: 9
"#,
            ),
            vec![],
        );
        assert!(matches!(
            result,
            Err(ReportError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_full_day_excluded_window_loads() {
        // Rejected later by the pricing resolver, not by the loader.
        let result = ConfigLoader::from_parts(
            settings_from(
                r#"
rotation_prices: { currency: GBP }
rotation_excluded_hours:
  - day: weekend
    excluded_starts_at: 0
    excluded_ends_at: 24
"#,
            ),
            vec![],
        );
        assert!(result.is_ok());
    }
}
