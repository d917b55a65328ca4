//! Pricing resolution.
//!
//! Converts configured daily prices into hourly prices. A category with an
//! excluded window has fewer than 24 billable hours a day, so its daily price
//! is spread over those hours only.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigLoader, ExcludedHours};
use crate::error::{ReportError, ReportResult};
use crate::models::{DayCategory, DayCategoryTotals};

/// Hours in a calendar day.
pub const HOURS_PER_DAY: u32 = 24;

/// Resolved pricing of one day category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPricing {
    /// Amount paid for a full day on call.
    pub daily_rate: Decimal,
    /// Hours of the day that are billable (24 minus the excluded window).
    pub billable_hours_per_day: u32,
    /// `daily_rate / billable_hours_per_day`.
    pub hourly_price: Decimal,
}

/// Resolved pricing of every day category.
///
/// Computed once per report and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingInfo {
    /// Weekday pricing.
    pub weekday: CategoryPricing,
    /// Weekend pricing.
    pub weekend: CategoryPricing,
    /// Bank holiday pricing.
    pub bank_holiday: CategoryPricing,
}

impl PricingInfo {
    /// Returns the pricing of a category.
    pub fn for_category(&self, category: DayCategory) -> &CategoryPricing {
        match category {
            DayCategory::Weekday => &self.weekday,
            DayCategory::Weekend => &self.weekend,
            DayCategory::BankHoliday => &self.bank_holiday,
        }
    }

    /// Converts hours into billable-day equivalents.
    pub fn day_counts(&self, hours: &DayCategoryTotals) -> DayCategoryTotals {
        DayCategoryTotals::from_fn(|category| {
            hours.get(category)
                / Decimal::from(self.for_category(category).billable_hours_per_day)
        })
    }

    /// Converts hours into amounts owed.
    pub fn amounts(&self, hours: &DayCategoryTotals) -> DayCategoryTotals {
        DayCategoryTotals::from_fn(|category| {
            hours.get(category) * self.for_category(category).hourly_price
        })
    }
}

/// Resolves the pricing of a single category.
///
/// # Arguments
///
/// * `category` - The category being priced (used for error reporting)
/// * `daily_rate` - The configured daily price, if any
/// * `excluded` - The category's excluded window, if any
///
/// # Errors
///
/// Returns [`ReportError::PriceNotFound`] if no daily rate is configured and
/// [`ReportError::NoBillableHours`] if the excluded window covers the whole day.
///
/// # Example
///
/// ```
/// use oncall_report::calculation::resolve_category_pricing;
/// use oncall_report::config::ExcludedHours;
/// use oncall_report::models::DayCategory;
/// use rust_decimal::Decimal;
///
/// let office_hours = ExcludedHours {
///     day: DayCategory::Weekday,
///     excluded_starts_at: 9,
///     excluded_ends_at: 17,
/// };
/// let pricing = resolve_category_pricing(
///     DayCategory::Weekday,
///     Some(Decimal::new(80, 0)),
///     Some(&office_hours),
/// )
/// .unwrap();
///
/// assert_eq!(pricing.billable_hours_per_day, 16);
/// assert_eq!(pricing.hourly_price, Decimal::new(5, 0));
/// ```
pub fn resolve_category_pricing(
    category: DayCategory,
    daily_rate: Option<Decimal>,
    excluded: Option<&ExcludedHours>,
) -> ReportResult<CategoryPricing> {
    let daily_rate = daily_rate.ok_or(ReportError::PriceNotFound { category })?;

    let excluded_hours = excluded.map(ExcludedHours::width).unwrap_or(0);
    if excluded_hours >= HOURS_PER_DAY {
        return Err(ReportError::NoBillableHours {
            category,
            excluded_hours,
        });
    }
    let billable_hours_per_day = HOURS_PER_DAY - excluded_hours;

    Ok(CategoryPricing {
        daily_rate,
        billable_hours_per_day,
        hourly_price: daily_rate / Decimal::from(billable_hours_per_day),
    })
}

/// Resolves the pricing of every category from configuration.
///
/// # Errors
///
/// Fails on the first category without a price or without billable hours.
/// Either error is fatal to the report.
pub fn resolve_pricing(config: &ConfigLoader) -> ReportResult<PricingInfo> {
    let resolve = |category: DayCategory| -> ReportResult<CategoryPricing> {
        resolve_category_pricing(
            category,
            Some(config.find_price_by_day(category)?),
            config.find_excluded_hours_by_day(category),
        )
    };

    Ok(PricingInfo {
        weekday: resolve(DayCategory::Weekday)?,
        weekend: resolve(DayCategory::Weekend)?,
        bank_holiday: resolve(DayCategory::BankHoliday)?,
    })
}
