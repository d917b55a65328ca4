//! Fixed-width console table for a finished report.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{DayCategoryTotals, OnCallReport};

const RULE_WIDTH: usize = 118;

/// Formats a value with exactly two decimal places, rounding half away from zero.
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Plain-text rendering of a report: one table per schedule, then the
/// cross-schedule summary.
///
/// The "Wkend amt" column carries weekend and bank holiday amounts together.
pub struct ConsoleReport<'a>(pub &'a OnCallReport);

impl ConsoleReport<'_> {
    fn write_header(f: &mut fmt::Formatter<'_>, currency: &str) -> fmt::Result {
        let total_label = format!("Total ({})", currency);
        writeln!(
            f,
            "{:<24} {:>10} {:>10} {:>10} {:>8} {:>8} {:>8} {:>12} {:>12} {:>12}",
            "User",
            "Wkday h",
            "Wkend h",
            "BH h",
            "Wkday d",
            "Wkend d",
            "BH d",
            "Wkday amt",
            "Wkend amt",
            total_label,
        )?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))
    }

    fn write_row(
        f: &mut fmt::Formatter<'_>,
        name: &str,
        hours: &DayCategoryTotals,
        days: &DayCategoryTotals,
        amounts: &DayCategoryTotals,
        total: Decimal,
    ) -> fmt::Result {
        writeln!(
            f,
            "{:<24} {:>10} {:>10} {:>10} {:>8} {:>8} {:>8} {:>12} {:>12} {:>12}",
            name,
            format_amount(hours.weekday),
            format_amount(hours.weekend),
            format_amount(hours.bank_holiday),
            format_amount(days.weekday),
            format_amount(days.weekend),
            format_amount(days.bank_holiday),
            format_amount(amounts.weekday),
            format_amount(amounts.weekend + amounts.bank_holiday),
            format_amount(total),
        )
    }
}

impl fmt::Display for ConsoleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(
            f,
            "On-call report from {} to {}",
            report.start.format("%Y-%m-%d %H:%M"),
            report.end.format("%Y-%m-%d %H:%M"),
        )?;
        writeln!(f)?;

        for schedule in &report.schedules {
            writeln!(f, "Schedule: {} ({})", schedule.name, schedule.id)?;
            Self::write_header(f, &report.currency)?;
            if schedule.users.is_empty() {
                writeln!(f, "(no billable users)")?;
            }
            for user in &schedule.users {
                Self::write_row(
                    f,
                    &user.name,
                    &user.hours,
                    &user.days,
                    &user.amounts,
                    user.total_amount,
                )?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Users summary")?;
        Self::write_header(f, &report.currency)?;
        for user in &report.users_summary {
            Self::write_row(
                f,
                &user.name,
                &user.hours,
                &user.days,
                &user.amounts,
                user.total_amount,
            )?;
        }

        let grand_total: Decimal = report.users_summary.iter().map(|u| u.total_amount).sum();
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(
            f,
            "{:<24} {:>93}",
            "Total",
            format!("{} {}", format_amount(grand_total), report.currency)
        )
    }
}

/// Renders a report as plain text.
pub fn render_console(report: &OnCallReport) -> String {
    ConsoleReport(report).to_string()
}
