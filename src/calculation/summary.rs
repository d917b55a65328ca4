//! Cross-schedule summary.
//!
//! Folds every schedule's per-user results into one entry per user. Users are
//! matched by display name, not id: two distinct users sharing a name are
//! merged into one entry.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{DayCategoryTotals, ScheduleReport, UserSchedulesSummary};

use super::PricingInfo;

#[derive(Default)]
struct SummaryAccumulator {
    hours: DayCategoryTotals,
    amounts: DayCategoryTotals,
    total_amount: Decimal,
}

/// Sums every schedule's per-user results by user name.
///
/// Hours and amounts are summed as they are; day counts are recomputed from
/// the summed hours using `pricing`. The result is sorted by name.
pub fn summarize_users(
    schedules: &[ScheduleReport],
    pricing: &PricingInfo,
) -> Vec<UserSchedulesSummary> {
    let mut by_name: BTreeMap<&str, SummaryAccumulator> = BTreeMap::new();

    for user in schedules.iter().flat_map(|s| s.users.iter()) {
        let entry = by_name.entry(user.name.as_str()).or_default();
        entry.hours += user.hours;
        entry.amounts += user.amounts;
        entry.total_amount += user.total_amount;
    }

    by_name
        .into_iter()
        .map(|(name, acc)| UserSchedulesSummary {
            name: name.to_string(),
            days: pricing.day_counts(&acc.hours),
            hours: acc.hours,
            amounts: acc.amounts,
            total_amount: acc.total_amount,
        })
        .collect()
}
