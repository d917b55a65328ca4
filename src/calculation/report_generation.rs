//! Report generation.
//!
//! Runs one report end to end: resolve prices once, aggregate every schedule
//! that is not ignored, then fold the cross-schedule summary.

use std::time::Instant;

use tracing::info;

use crate::config::ConfigLoader;
use crate::error::ReportResult;
use crate::models::{OnCallReport, ReportWindow, ScheduleCoverage, ScheduleRotation};

use super::{DayClassifier, ScheduleAggregator, resolve_pricing, summarize_users};

/// Generates the report for `schedules` over `window`.
///
/// Schedules on the configuration's ignore list are skipped. Schedules are
/// reported in the order given.
///
/// # Errors
///
/// Fails on missing or invalid prices, on a missing calendar for a configured
/// user, and on malformed coverage timestamps. Users without rotation
/// configuration are skipped, not treated as errors.
///
/// # Example
///
/// ```no_run
/// use oncall_report::calculation::generate_report;
/// use oncall_report::config::ConfigLoader;
/// use oncall_report::models::ReportWindow;
///
/// let config = ConfigLoader::load("./config/example")?;
/// let window = ReportWindow::for_month(2024, 3, config.rotation_boundary_hour())?;
/// let report = generate_report(window, &[], &config)?;
/// assert!(report.schedules.is_empty());
/// # Ok::<(), oncall_report::error::ReportError>(())
/// ```
pub fn generate_report(
    window: ReportWindow,
    schedules: &[ScheduleCoverage],
    config: &ConfigLoader,
) -> ReportResult<OnCallReport> {
    let started = Instant::now();

    let pricing = resolve_pricing(config)?;
    info!(
        currency = %config.currency(),
        weekday_hourly_price = %pricing.weekday.hourly_price.round_dp(4),
        weekday_billable_hours = pricing.weekday.billable_hours_per_day,
        weekend_hourly_price = %pricing.weekend.hourly_price.round_dp(4),
        weekend_billable_hours = pricing.weekend.billable_hours_per_day,
        bank_holiday_hourly_price = %pricing.bank_holiday.hourly_price.round_dp(4),
        bank_holiday_billable_hours = pricing.bank_holiday.billable_hours_per_day,
        "Resolved hourly prices"
    );

    let classifier = DayClassifier::from_config(config)?;
    let aggregator = ScheduleAggregator::new(&classifier, &pricing, config, window);

    let mut schedule_reports = Vec::with_capacity(schedules.len());
    for coverage in schedules {
        if config.is_schedule_ignored(&coverage.id) {
            info!(schedule_id = %coverage.id, "Ignoring schedule");
            continue;
        }

        let rotation = ScheduleRotation::from_coverage(coverage)?;
        info!(
            schedule_id = %rotation.id,
            schedule_name = %rotation.name,
            users_count = rotation.users.len(),
            "Processing schedule"
        );
        schedule_reports.push(aggregator.aggregate(&rotation)?);
    }

    let users_summary = summarize_users(&schedule_reports, &pricing);

    info!(
        schedules_count = schedule_reports.len(),
        users_count = users_summary.len(),
        duration_us = started.elapsed().as_micros(),
        "Report generated"
    );

    Ok(OnCallReport {
        start: window.start,
        end: window.end,
        currency: config.currency().to_string(),
        schedules: schedule_reports,
        users_summary,
    })
}
