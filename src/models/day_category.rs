//! Day categories used to bucket on-call hours.

use serde::{Deserialize, Serialize};

/// The category a rotation day falls into for billing.
///
/// Classification precedence is bank holiday, then weekend, then weekday:
/// a bank holiday on a Saturday is a bank holiday.
///
/// # Example
///
/// ```
/// use oncall_report::models::DayCategory;
///
/// assert_eq!(DayCategory::BankHoliday.to_string(), "bankholiday");
/// assert_eq!("weekend".parse::<DayCategory>(), Ok(DayCategory::Weekend));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayCategory {
    /// Monday through Friday, not a bank holiday.
    #[serde(rename = "weekday")]
    Weekday,
    /// A weekend day of the user's calendar.
    #[serde(rename = "weekend")]
    Weekend,
    /// A bank holiday of the user's calendar.
    #[serde(rename = "bankholiday")]
    BankHoliday,
}

impl DayCategory {
    /// All categories in report order.
    pub const ALL: [DayCategory; 3] = [
        DayCategory::Weekday,
        DayCategory::Weekend,
        DayCategory::BankHoliday,
    ];

    /// The configuration key of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayCategory::Weekday => "weekday",
            DayCategory::Weekend => "weekend",
            DayCategory::BankHoliday => "bankholiday",
        }
    }
}

impl std::fmt::Display for DayCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DayCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekday" => Ok(DayCategory::Weekday),
            "weekend" => Ok(DayCategory::Weekend),
            "bankholiday" => Ok(DayCategory::BankHoliday),
            other => Err(format!("Unknown day category: {}", other)),
        }
    }
}
