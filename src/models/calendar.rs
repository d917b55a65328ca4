//! Bank holiday calendar models.
//!
//! This module contains the [`CalendarLookup`] seam the classifier queries and
//! the [`BankHolidayCalendar`] type loaded from configuration.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Answers day-type questions for one user's calendar and year.
///
/// The classifier only ever asks these two questions, so anything that can
/// answer them (a loaded calendar, a test fake) can drive a report.
pub trait CalendarLookup {
    /// Returns true if `date` is a bank holiday in this calendar.
    fn is_bank_holiday(&self, date: NaiveDate) -> bool;

    /// Returns true if `date` is a weekend day in this calendar.
    fn is_weekend(&self, date: NaiveDate) -> bool;
}

/// A single bank holiday.
///
/// # Example
///
/// ```
/// use oncall_report::models::BankHoliday;
/// use chrono::NaiveDate;
///
/// let holiday = BankHoliday {
///     date: NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
///     name: "Christmas Day".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankHoliday {
    /// The date of the bank holiday.
    pub date: NaiveDate,
    /// The name of the bank holiday (e.g., "Christmas Day").
    pub name: String,
}

/// A named bank holiday calendar for a single year.
///
/// Calendars are registered under `<name>-<year>` (see [`BankHolidayCalendar::key`]),
/// which is how a user's `holidays_calendar` setting is resolved for the year
/// being reported.
///
/// # Example
///
/// ```
/// use oncall_report::models::{BankHoliday, BankHolidayCalendar, CalendarLookup};
/// use chrono::NaiveDate;
///
/// let calendar = BankHolidayCalendar {
///     name: "uk".to_string(),
///     year: 2024,
///     bank_holidays: vec![BankHoliday {
///         date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
///         name: "Early May bank holiday".to_string(),
///     }],
///     weekend_days: BankHolidayCalendar::default_weekend_days(),
/// };
///
/// assert_eq!(calendar.key(), "uk-2024");
/// assert!(calendar.is_bank_holiday(NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()));
/// assert!(calendar.is_weekend(NaiveDate::from_ymd_opt(2024, 5, 4).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankHolidayCalendar {
    /// The calendar name referenced by rotation users (e.g., "uk").
    pub name: String,
    /// The year this calendar covers.
    pub year: i32,
    /// Bank holidays in this year.
    #[serde(default)]
    pub bank_holidays: Vec<BankHoliday>,
    /// Days of the week treated as weekend.
    #[serde(default = "BankHolidayCalendar::default_weekend_days")]
    pub weekend_days: Vec<Weekday>,
}

impl BankHolidayCalendar {
    /// Builds the registry key for a calendar name and year.
    pub fn key_for(name: &str, year: i32) -> String {
        format!("{}-{}", name, year)
    }

    /// Returns the registry key of this calendar.
    pub fn key(&self) -> String {
        Self::key_for(&self.name, self.year)
    }

    /// Saturday and Sunday.
    pub fn default_weekend_days() -> Vec<Weekday> {
        vec![Weekday::Sat, Weekday::Sun]
    }
}

impl CalendarLookup for BankHolidayCalendar {
    fn is_bank_holiday(&self, date: NaiveDate) -> bool {
        self.bank_holidays.iter().any(|h| h.date == date)
    }

    fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend_days.contains(&date.weekday())
    }
}
