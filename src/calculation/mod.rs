//! Calculation logic for the on-call report engine.
//!
//! This module contains the pricing resolver, the per-sample day classifier,
//! the per-schedule aggregator, the cross-schedule summary and the report
//! generation that ties them together.

mod day_classification;
mod pricing;
mod report_generation;
mod schedule_aggregation;
mod summary;

pub use day_classification::{DayClassifier, SampleOutcome, categorize_date};
pub use pricing::{
    CategoryPricing, HOURS_PER_DAY, PricingInfo, resolve_category_pricing, resolve_pricing,
};
pub use report_generation::generate_report;
pub use schedule_aggregation::{ScheduleAggregator, build_user_report, sample_periods};
pub use summary::summarize_users;
