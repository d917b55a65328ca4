//! Day classification and hour accumulation for single samples.
//!
//! Each sample taken while walking a coverage period is attributed to a
//! rotation day, classified as weekday, weekend or bank holiday, checked
//! against that category's excluded window and, if billable, added to the
//! user's running totals.
//!
//! # Rotation days
//!
//! A rotation day starts at the configured boundary hour, not at midnight. A
//! sample at 02:00 with a boundary of 06:00 is still part of the previous
//! night's shift, so it is classified by the previous calendar day: the
//! sample is moved back `hour + 1` hours, which always lands at 23:xx of the
//! day before. If that lands in another month than the one its coverage
//! period starts in, the sample is dropped.
//!
//! # Excluded windows
//!
//! Every category uses the same test: a sample is billable unless its hour is
//! in `[excluded_starts_at, excluded_ends_at)`. After a boundary shift the
//! hour tested is the shifted one.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::Decimal;

use crate::config::{ConfigLoader, ExcludedHours};
use crate::error::{ReportError, ReportResult};
use crate::models::{CalendarLookup, DayCategory, DayCategoryTotals};

/// What happened to a single sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// The sample was billed to this category.
    Billable(DayCategory),
    /// The sample fell inside this category's excluded window.
    Excluded(DayCategory),
    /// The sample's rotation day is in a different month than the report.
    OutsideMonth,
}

/// Classifies the calendar day a rotation day starts on.
///
/// Bank holidays take precedence over weekends, so a bank holiday on a
/// Saturday is a bank holiday.
///
/// # Example
///
/// ```
/// use oncall_report::calculation::categorize_date;
/// use oncall_report::models::{BankHolidayCalendar, CalendarLookup, DayCategory};
/// use chrono::NaiveDate;
///
/// let calendar = BankHolidayCalendar {
///     name: "uk".to_string(),
///     year: 2024,
///     bank_holidays: vec![],
///     weekend_days: BankHolidayCalendar::default_weekend_days(),
/// };
///
/// // 2024-03-03 is a Sunday
/// let sunday = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
/// assert_eq!(categorize_date(sunday, &calendar), DayCategory::Weekend);
/// ```
pub fn categorize_date(date: NaiveDate, calendar: &dyn CalendarLookup) -> DayCategory {
    if calendar.is_bank_holiday(date) {
        DayCategory::BankHoliday
    } else if calendar.is_weekend(date) {
        DayCategory::Weekend
    } else {
        DayCategory::Weekday
    }
}

/// Classifies samples and accumulates their hours.
///
/// Built once per report from configuration; holds no per-user state, so the
/// same classifier can be reused for every user and schedule.
#[derive(Debug, Clone)]
pub struct DayClassifier {
    boundary_hour: u32,
    step_minutes: u32,
    step_hours: Decimal,
    excluded_hours: Vec<ExcludedHours>,
}

impl DayClassifier {
    /// Creates a classifier.
    ///
    /// # Arguments
    ///
    /// * `boundary_hour` - Hour of day at which a rotation day starts, 0 to 23
    /// * `step_minutes` - Sampling step; each billable sample is worth `step_minutes / 60` hours
    /// * `excluded_hours` - Excluded windows; the first window per category applies
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidConfiguration`] if `boundary_hour` is not an
    /// hour of the day or `step_minutes` is zero.
    pub fn new(
        boundary_hour: u32,
        step_minutes: u32,
        excluded_hours: Vec<ExcludedHours>,
    ) -> ReportResult<Self> {
        if boundary_hour > 23 {
            return Err(ReportError::InvalidConfiguration {
                message: format!(
                    "rotation boundary must be an hour between 0 and 23, got {}",
                    boundary_hour
                ),
            });
        }
        if step_minutes == 0 {
            return Err(ReportError::InvalidConfiguration {
                message: "sampling step must be at least one minute".to_string(),
            });
        }
        Ok(Self {
            boundary_hour,
            step_minutes,
            step_hours: Decimal::from(step_minutes) / Decimal::from(60u32),
            excluded_hours,
        })
    }

    /// Creates a classifier from loaded configuration.
    pub fn from_config(config: &ConfigLoader) -> ReportResult<Self> {
        Self::new(
            config.rotation_boundary_hour(),
            config.check_every_minutes(),
            config.settings().rotation_excluded_hours.clone(),
        )
    }

    /// The sampling step as a duration.
    pub fn step(&self) -> Duration {
        Duration::minutes(i64::from(self.step_minutes))
    }

    /// Hours credited for one billable sample.
    pub fn step_hours(&self) -> Decimal {
        self.step_hours
    }

    fn excluded_window(&self, category: DayCategory) -> Option<&ExcludedHours> {
        self.excluded_hours.iter().find(|w| w.day == category)
    }

    /// Classifies one sample without touching any totals.
    ///
    /// # Arguments
    ///
    /// * `instant` - The sample, in the schedule's local time
    /// * `month_context` - The (year, month) the sample's coverage period starts in
    /// * `calendar` - The user's calendar for the report year
    pub fn classify(
        &self,
        instant: NaiveDateTime,
        month_context: (i32, u32),
        calendar: &dyn CalendarLookup,
    ) -> SampleOutcome {
        let hour = instant.hour();
        let instant = if hour < self.boundary_hour {
            let previous_night = instant - Duration::hours(i64::from(hour) + 1);
            if (previous_night.year(), previous_night.month()) != month_context {
                return SampleOutcome::OutsideMonth;
            }
            previous_night
        } else {
            instant
        };

        let category = categorize_date(instant.date(), calendar);
        match self.excluded_window(category) {
            Some(window) if window.contains_hour(instant.hour()) => {
                SampleOutcome::Excluded(category)
            }
            _ => SampleOutcome::Billable(category),
        }
    }

    /// Classifies one sample and, if billable, adds one step of hours to `totals`.
    ///
    /// # Example
    ///
    /// ```
    /// use oncall_report::calculation::{DayClassifier, SampleOutcome};
    /// use oncall_report::models::{BankHolidayCalendar, DayCategory, DayCategoryTotals};
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    ///
    /// let calendar = BankHolidayCalendar {
    ///     name: "uk".to_string(),
    ///     year: 2024,
    ///     bank_holidays: vec![],
    ///     weekend_days: BankHolidayCalendar::default_weekend_days(),
    /// };
    /// let classifier = DayClassifier::new(6, 30, vec![]).unwrap();
    /// let mut totals = DayCategoryTotals::default();
    ///
    /// // Monday 01:00 still belongs to Sunday night
    /// let sample = NaiveDateTime::parse_from_str("2024-03-04 01:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let outcome = classifier.accumulate(&mut totals, sample, (2024, 3), &calendar);
    ///
    /// assert_eq!(outcome, SampleOutcome::Billable(DayCategory::Weekend));
    /// assert_eq!(totals.weekend, Decimal::new(5, 1));
    /// ```
    pub fn accumulate(
        &self,
        totals: &mut DayCategoryTotals,
        instant: NaiveDateTime,
        month_context: (i32, u32),
        calendar: &dyn CalendarLookup,
    ) -> SampleOutcome {
        let outcome = self.classify(instant, month_context, calendar);
        if let SampleOutcome::Billable(category) = outcome {
            totals.add(category, self.step_hours);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BankHoliday, BankHolidayCalendar};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn uk_calendar() -> BankHolidayCalendar {
        BankHolidayCalendar {
            name: "uk".to_string(),
            year: 2024,
            bank_holidays: vec![
                BankHoliday {
                    date: make_date("2024-05-06"),
                    name: "Early May bank holiday".to_string(),
                },
                // A Saturday, to check precedence
                BankHoliday {
                    date: make_date("2024-06-01"),
                    name: "Made-up Saturday holiday".to_string(),
                },
            ],
            weekend_days: BankHolidayCalendar::default_weekend_days(),
        }
    }

    fn window(day: DayCategory, starts: u32, ends: u32) -> ExcludedHours {
        ExcludedHours {
            day,
            excluded_starts_at: starts,
            excluded_ends_at: ends,
        }
    }

    // ==========================================================================
    // Day categories
    // ==========================================================================
    #[test]
    fn test_monday_is_weekday() {
        // 2024-03-04 is a Monday
        assert_eq!(
            categorize_date(make_date("2024-03-04"), &uk_calendar()),
            DayCategory::Weekday
        );
    }

    #[test]
    fn test_saturday_is_weekend() {
        assert_eq!(
            categorize_date(make_date("2024-03-02"), &uk_calendar()),
            DayCategory::Weekend
        );
    }

    #[test]
    fn test_bank_holiday_monday_is_bank_holiday() {
        assert_eq!(
            categorize_date(make_date("2024-05-06"), &uk_calendar()),
            DayCategory::BankHoliday
        );
    }

    #[test]
    fn test_bank_holiday_on_weekend_counts_as_bank_holiday() {
        assert_eq!(
            categorize_date(make_date("2024-06-01"), &uk_calendar()),
            DayCategory::BankHoliday
        );
    }

    #[test]
    fn test_zero_step_is_rejected() {
        assert!(matches!(
            DayClassifier::new(6, 0, vec![]),
            Err(ReportError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_boundary_outside_the_day_is_rejected() {
        assert!(matches!(
            DayClassifier::new(24, 30, vec![]),
            Err(ReportError::InvalidConfiguration { .. })
        ));
    }

    // ==========================================================================
    // Rotation boundary
    // ==========================================================================
    #[test]
    fn test_sample_after_boundary_uses_own_day() {
        let classifier = DayClassifier::new(6, 30, vec![]).unwrap();
        let outcome = classifier.classify(
            make_datetime("2024-03-04", "06:00:00"),
            (2024, 3),
            &uk_calendar(),
        );
        assert_eq!(outcome, SampleOutcome::Billable(DayCategory::Weekday));
    }

    #[test]
    fn test_sample_before_boundary_uses_previous_day() {
        let classifier = DayClassifier::new(6, 30, vec![]).unwrap();
        // Monday 05:30 belongs to Sunday night
        let outcome = classifier.classify(
            make_datetime("2024-03-04", "05:30:00"),
            (2024, 3),
            &uk_calendar(),
        );
        assert_eq!(outcome, SampleOutcome::Billable(DayCategory::Weekend));
    }

    #[test]
    fn test_night_after_bank_holiday_is_bank_holiday() {
        let classifier = DayClassifier::new(6, 30, vec![]).unwrap();
        // Tuesday 2024-05-07 03:00 belongs to bank holiday Monday
        let outcome = classifier.classify(
            make_datetime("2024-05-07", "03:00:00"),
            (2024, 5),
            &uk_calendar(),
        );
        assert_eq!(outcome, SampleOutcome::Billable(DayCategory::BankHoliday));
    }

    #[test]
    fn test_zero_boundary_never_shifts() {
        let classifier = DayClassifier::new(0, 30, vec![]).unwrap();
        // Monday 00:00 with midnight boundary is Monday
        let outcome = classifier.classify(
            make_datetime("2024-03-04", "00:00:00"),
            (2024, 3),
            &uk_calendar(),
        );
        assert_eq!(outcome, SampleOutcome::Billable(DayCategory::Weekday));
    }

    #[test]
    fn test_first_of_month_early_hours_are_dropped() {
        let classifier = DayClassifier::new(6, 30, vec![]).unwrap();
        // 2024-03-01 02:00 belongs to the night of 2024-02-29
        let outcome = classifier.classify(
            make_datetime("2024-03-01", "02:00:00"),
            (2024, 3),
            &uk_calendar(),
        );
        assert_eq!(outcome, SampleOutcome::OutsideMonth);
    }

    #[test]
    fn test_next_month_early_hours_count_for_last_night() {
        let classifier = DayClassifier::new(6, 30, vec![]).unwrap();
        // 2024-04-01 02:00 belongs to Sunday 2024-03-31 night
        let outcome = classifier.classify(
            make_datetime("2024-04-01", "02:00:00"),
            (2024, 3),
            &uk_calendar(),
        );
        assert_eq!(outcome, SampleOutcome::Billable(DayCategory::Weekend));
    }

    #[test]
    fn test_first_of_january_is_dropped_for_previous_december() {
        let classifier = DayClassifier::new(6, 30, vec![]).unwrap();
        let outcome = classifier.classify(
            make_datetime("2025-01-01", "05:30:00"),
            (2025, 1),
            &uk_calendar(),
        );
        assert_eq!(outcome, SampleOutcome::OutsideMonth);
    }

    // ==========================================================================
    // Excluded windows
    // ==========================================================================
    #[test]
    fn test_weekday_sample_inside_office_hours_is_excluded() {
        let classifier =
            DayClassifier::new(6, 30, vec![window(DayCategory::Weekday, 9, 17)]).unwrap();
        let outcome = classifier.classify(
            make_datetime("2024-03-04", "10:00:00"),
            (2024, 3),
            &uk_calendar(),
        );
        assert_eq!(outcome, SampleOutcome::Excluded(DayCategory::Weekday));
    }

    #[test]
    fn test_weekday_sample_outside_office_hours_is_billable() {
        let classifier =
            DayClassifier::new(6, 30, vec![window(DayCategory::Weekday, 9, 17)]).unwrap();
        let calendar = uk_calendar();
        assert_eq!(
            classifier.classify(make_datetime("2024-03-04", "20:00:00"), (2024, 3), &calendar),
            SampleOutcome::Billable(DayCategory::Weekday)
        );
        // The window end is exclusive
        assert_eq!(
            classifier.classify(make_datetime("2024-03-04", "17:00:00"), (2024, 3), &calendar),
            SampleOutcome::Billable(DayCategory::Weekday)
        );
        assert_eq!(
            classifier.classify(make_datetime("2024-03-04", "08:30:00"), (2024, 3), &calendar),
            SampleOutcome::Billable(DayCategory::Weekday)
        );
    }

    #[test]
    fn test_weekend_window_excludes_samples() {
        let classifier =
            DayClassifier::new(6, 30, vec![window(DayCategory::Weekend, 10, 14)]).unwrap();
        let calendar = uk_calendar();
        assert_eq!(
            classifier.classify(make_datetime("2024-03-02", "11:00:00"), (2024, 3), &calendar),
            SampleOutcome::Excluded(DayCategory::Weekend)
        );
        assert_eq!(
            classifier.classify(make_datetime("2024-03-02", "15:00:00"), (2024, 3), &calendar),
            SampleOutcome::Billable(DayCategory::Weekend)
        );
    }

    #[test]
    fn test_bank_holiday_window_excludes_samples() {
        let classifier =
            DayClassifier::new(6, 30, vec![window(DayCategory::BankHoliday, 8, 20)]).unwrap();
        let calendar = uk_calendar();
        assert_eq!(
            classifier.classify(make_datetime("2024-05-06", "12:00:00"), (2024, 5), &calendar),
            SampleOutcome::Excluded(DayCategory::BankHoliday)
        );
        assert_eq!(
            classifier.classify(make_datetime("2024-05-06", "21:00:00"), (2024, 5), &calendar),
            SampleOutcome::Billable(DayCategory::BankHoliday)
        );
    }

    #[test]
    fn test_window_of_other_category_does_not_apply() {
        let classifier =
            DayClassifier::new(6, 30, vec![window(DayCategory::Weekday, 9, 17)]).unwrap();
        assert_eq!(
            classifier.classify(
                make_datetime("2024-03-02", "10:00:00"),
                (2024, 3),
                &uk_calendar()
            ),
            SampleOutcome::Billable(DayCategory::Weekend)
        );
    }

    #[test]
    fn test_shifted_sample_is_tested_at_hour_23() {
        // Window covering the small hours: 00:00-06:00 on weekdays
        let classifier =
            DayClassifier::new(6, 30, vec![window(DayCategory::Weekday, 0, 6)]).unwrap();
        let calendar = uk_calendar();
        // Tuesday 02:00 shifts to Monday 23:00, which is outside [0, 6)
        assert_eq!(
            classifier.classify(make_datetime("2024-03-05", "02:00:00"), (2024, 3), &calendar),
            SampleOutcome::Billable(DayCategory::Weekday)
        );
        // A window reaching 24 catches the shifted hour
        let classifier =
            DayClassifier::new(6, 30, vec![window(DayCategory::Weekday, 22, 24)]).unwrap();
        assert_eq!(
            classifier.classify(make_datetime("2024-03-05", "02:00:00"), (2024, 3), &calendar),
            SampleOutcome::Excluded(DayCategory::Weekday)
        );
    }

    // ==========================================================================
    // Accumulation
    // ==========================================================================
    #[test]
    fn test_accumulate_adds_half_hour_per_sample() {
        let classifier = DayClassifier::new(6, 30, vec![]).unwrap();
        let mut totals = DayCategoryTotals::default();
        let calendar = uk_calendar();

        classifier.accumulate(
            &mut totals,
            make_datetime("2024-03-04", "20:00:00"),
            (2024, 3),
            &calendar,
        );
        classifier.accumulate(
            &mut totals,
            make_datetime("2024-03-04", "20:30:00"),
            (2024, 3),
            &calendar,
        );

        assert_eq!(totals.weekday, dec("1.0"));
        assert_eq!(totals.weekend, Decimal::ZERO);
    }

    #[test]
    fn test_accumulate_uses_configured_step() {
        let classifier = DayClassifier::new(6, 15, vec![]).unwrap();
        let mut totals = DayCategoryTotals::default();
        classifier.accumulate(
            &mut totals,
            make_datetime("2024-03-04", "20:00:00"),
            (2024, 3),
            &uk_calendar(),
        );
        assert_eq!(classifier.step_hours(), dec("0.25"));
        assert_eq!(totals.weekday, dec("0.25"));
    }

    #[test]
    fn test_accumulate_skips_excluded_and_dropped_samples() {
        let classifier =
            DayClassifier::new(6, 30, vec![window(DayCategory::Weekday, 9, 17)]).unwrap();
        let mut totals = DayCategoryTotals::default();
        let calendar = uk_calendar();

        let excluded = classifier.accumulate(
            &mut totals,
            make_datetime("2024-03-04", "12:00:00"),
            (2024, 3),
            &calendar,
        );
        let dropped = classifier.accumulate(
            &mut totals,
            make_datetime("2024-03-01", "01:00:00"),
            (2024, 3),
            &calendar,
        );

        assert_eq!(excluded, SampleOutcome::Excluded(DayCategory::Weekday));
        assert_eq!(dropped, SampleOutcome::OutsideMonth);
        assert_eq!(totals, DayCategoryTotals::default());
    }

    #[test]
    fn test_from_example_config() {
        let loader = ConfigLoader::load("./config/example").unwrap();
        let classifier = DayClassifier::from_config(&loader).unwrap();
        assert_eq!(classifier.step(), Duration::minutes(30));
        assert_eq!(classifier.step_hours(), dec("0.5"));
    }
}
