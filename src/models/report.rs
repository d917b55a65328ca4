//! Report result models.
//!
//! This module contains the per-schedule and cross-schedule structures a
//! report run produces, and the [`DayCategoryTotals`] accumulator they share.

use std::ops::AddAssign;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DayCategory;

/// One value per day category.
///
/// Used for accumulated hours, for day-count equivalents and for monetary
/// amounts. Values only ever grow while a report is built.
///
/// # Example
///
/// ```
/// use oncall_report::models::{DayCategory, DayCategoryTotals};
/// use rust_decimal::Decimal;
///
/// let mut totals = DayCategoryTotals::default();
/// totals.add(DayCategory::Weekend, Decimal::new(5, 1));
/// totals.add(DayCategory::Weekend, Decimal::new(5, 1));
/// assert_eq!(totals.get(DayCategory::Weekend), Decimal::ONE);
/// assert_eq!(totals.total(), Decimal::ONE);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCategoryTotals {
    /// Weekday value.
    pub weekday: Decimal,
    /// Weekend value.
    pub weekend: Decimal,
    /// Bank holiday value.
    pub bank_holiday: Decimal,
}

impl DayCategoryTotals {
    /// Returns the value for a category.
    pub fn get(&self, category: DayCategory) -> Decimal {
        match category {
            DayCategory::Weekday => self.weekday,
            DayCategory::Weekend => self.weekend,
            DayCategory::BankHoliday => self.bank_holiday,
        }
    }

    /// Adds `amount` to a category.
    pub fn add(&mut self, category: DayCategory, amount: Decimal) {
        match category {
            DayCategory::Weekday => self.weekday += amount,
            DayCategory::Weekend => self.weekend += amount,
            DayCategory::BankHoliday => self.bank_holiday += amount,
        }
    }

    /// Builds totals by evaluating `f` for every category.
    pub fn from_fn(mut f: impl FnMut(DayCategory) -> Decimal) -> Self {
        Self {
            weekday: f(DayCategory::Weekday),
            weekend: f(DayCategory::Weekend),
            bank_holiday: f(DayCategory::BankHoliday),
        }
    }

    /// Sum across all categories.
    pub fn total(&self) -> Decimal {
        self.weekday + self.weekend + self.bank_holiday
    }
}

impl AddAssign for DayCategoryTotals {
    fn add_assign(&mut self, other: Self) {
        self.weekday += other.weekday;
        self.weekend += other.weekend;
        self.bank_holiday += other.bank_holiday;
    }
}

/// One user's result within one schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleUserReport {
    /// The paging service user id.
    pub user_id: String,
    /// The user's display name.
    pub name: String,
    /// Billable hours per category.
    pub hours: DayCategoryTotals,
    /// Hours expressed as billable days per category.
    pub days: DayCategoryTotals,
    /// Amount owed per category.
    pub amounts: DayCategoryTotals,
    /// Sum of all amounts.
    pub total_amount: Decimal,
}

/// The result for one schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// The schedule id.
    pub id: String,
    /// The schedule's display name.
    pub name: String,
    /// One entry per user with resolvable configuration.
    pub users: Vec<ScheduleUserReport>,
}

/// One user's totals summed across every schedule in the report.
///
/// Users are merged by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSchedulesSummary {
    /// The user's display name.
    pub name: String,
    /// Billable hours per category.
    pub hours: DayCategoryTotals,
    /// Hours expressed as billable days per category.
    pub days: DayCategoryTotals,
    /// Amount owed per category.
    pub amounts: DayCategoryTotals,
    /// Sum of all amounts.
    pub total_amount: Decimal,
}

/// The complete output of a report run, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnCallReport {
    /// Start of the billing window.
    pub start: NaiveDateTime,
    /// End of the billing window.
    pub end: NaiveDateTime,
    /// Currency of every amount.
    pub currency: String,
    /// Per-schedule results, in request order.
    pub schedules: Vec<ScheduleReport>,
    /// Cross-schedule totals, sorted by name.
    pub users_summary: Vec<UserSchedulesSummary>,
}
