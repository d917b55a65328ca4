//! Per-schedule aggregation of on-call hours.
//!
//! Walks every coverage period of every user at the classifier's sampling
//! step, accumulates hours per day category and derives day counts and
//! amounts from the report's [`PricingInfo`].

use tracing::{debug, warn};

use crate::config::UserCalendars;
use crate::error::ReportResult;
use crate::models::{
    CalendarLookup, CoveragePeriod, DayCategoryTotals, ReportWindow, ScheduleReport,
    ScheduleRotation, ScheduleUserReport, UserRotation,
};

use super::{DayClassifier, PricingInfo};

/// Samples coverage periods and accumulates billable hours.
///
/// The walk is half-open: samples are taken at `start`, `start + step`, ...
/// while strictly before `end`. A period whose start equals its end yields no
/// samples. Boundary-shifted samples are kept only if they stay in the month
/// their period starts in.
///
/// # Example
///
/// ```
/// use oncall_report::calculation::{DayClassifier, sample_periods};
/// use oncall_report::models::{BankHolidayCalendar, CoveragePeriod};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let calendar = BankHolidayCalendar {
///     name: "uk".to_string(),
///     year: 2024,
///     bank_holidays: vec![],
///     weekend_days: BankHolidayCalendar::default_weekend_days(),
/// };
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
///
/// // Monday 00:00-02:00 belongs to Sunday night with a 06:00 boundary
/// let periods = [CoveragePeriod { start: at("2024-03-04 00:00:00"), end: at("2024-03-04 02:00:00") }];
/// let totals = sample_periods(&DayClassifier::new(6, 30, vec![]).unwrap(), &periods, &calendar);
///
/// assert_eq!(totals.weekend, Decimal::new(20, 1));
/// assert_eq!(totals.weekday, Decimal::ZERO);
/// ```
pub fn sample_periods(
    classifier: &DayClassifier,
    periods: &[CoveragePeriod],
    calendar: &dyn CalendarLookup,
) -> DayCategoryTotals {
    let step = classifier.step();
    let mut totals = DayCategoryTotals::default();

    for period in periods {
        let month_context = period.month_context();
        let mut current = period.start;
        while current < period.end {
            classifier.accumulate(&mut totals, current, month_context, calendar);
            current += step;
        }
    }

    totals
}

/// Builds a user's schedule result from accumulated hours.
pub fn build_user_report(
    user_id: &str,
    name: &str,
    hours: DayCategoryTotals,
    pricing: &PricingInfo,
) -> ScheduleUserReport {
    let amounts = pricing.amounts(&hours);
    ScheduleUserReport {
        user_id: user_id.to_string(),
        name: name.to_string(),
        hours,
        days: pricing.day_counts(&hours),
        amounts,
        total_amount: amounts.total(),
    }
}

/// Aggregates schedules for one report window.
///
/// Holds only shared, read-only inputs: every call to
/// [`ScheduleAggregator::aggregate`] starts from zero totals, so aggregating
/// the same schedule twice gives the same result.
pub struct ScheduleAggregator<'a> {
    classifier: &'a DayClassifier,
    pricing: &'a PricingInfo,
    calendars: &'a dyn UserCalendars,
    window: ReportWindow,
}

impl<'a> ScheduleAggregator<'a> {
    /// Creates an aggregator for `window`.
    pub fn new(
        classifier: &'a DayClassifier,
        pricing: &'a PricingInfo,
        calendars: &'a dyn UserCalendars,
        window: ReportWindow,
    ) -> Self {
        Self {
            classifier,
            pricing,
            calendars,
            window,
        }
    }

    /// Aggregates one user's coverage against their calendar.
    pub fn aggregate_user(
        &self,
        rotation: &UserRotation,
        calendar: &dyn CalendarLookup,
    ) -> ScheduleUserReport {
        let hours = sample_periods(self.classifier, &rotation.periods, calendar);
        build_user_report(&rotation.user_id, &rotation.name, hours, self.pricing)
    }

    /// Aggregates every user of a schedule.
    ///
    /// Users without rotation configuration are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ReportError::CalendarNotFound`] if a configured
    /// user's calendar is missing for the report year.
    pub fn aggregate(&self, schedule: &ScheduleRotation) -> ReportResult<ScheduleReport> {
        let mut users = Vec::with_capacity(schedule.users.len());

        for rotation in &schedule.users {
            let calendar = match self
                .calendars
                .calendar_for_user(&rotation.user_id, self.window.year())
            {
                Ok(calendar) => calendar,
                Err(err) if err.is_recoverable() => {
                    warn!(
                        schedule_id = %schedule.id,
                        user_id = %rotation.user_id,
                        error = %err,
                        "Skipping user without rotation configuration"
                    );
                    continue;
                }
                Err(err) => return Err(err),
            };

            let report = self.aggregate_user(rotation, calendar);
            debug!(
                schedule_id = %schedule.id,
                user = %report.name,
                weekday_hours = %report.hours.weekday,
                weekend_hours = %report.hours.weekend,
                bank_holiday_hours = %report.hours.bank_holiday,
                total_amount = %report.total_amount,
                "Aggregated user coverage"
            );
            users.push(report);
        }

        Ok(ScheduleReport {
            id: schedule.id.clone(),
            name: schedule.name.clone(),
            users,
        })
    }
}
