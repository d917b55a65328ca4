//! Core data models for the on-call report engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calendar;
mod day_category;
mod report;
mod rotation;

pub use calendar::{BankHoliday, BankHolidayCalendar, CalendarLookup};
pub use day_category::DayCategory;
pub use report::{
    DayCategoryTotals, OnCallReport, ScheduleReport, ScheduleUserReport, UserSchedulesSummary,
};
pub use rotation::{
    CoveragePeriod, EntryUser, ReportWindow, ScheduleCoverage, ScheduleEntry, ScheduleRotation,
    UserRotation,
};
