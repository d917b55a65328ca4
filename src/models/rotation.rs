//! Coverage and rotation models.
//!
//! Raw schedule entries arrive as [`ScheduleCoverage`] (one per schedule, with
//! RFC 3339 timestamps). They are grouped per user into [`UserRotation`]s of
//! local wall-clock [`CoveragePeriod`]s before aggregation.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};

/// The user an on-call entry is rendered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryUser {
    /// The paging service user id.
    pub id: String,
    /// The user's display name.
    pub summary: String,
}

/// A single rendered entry of a schedule's final layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// The user on call for this entry.
    pub user: EntryUser,
    /// RFC 3339 start, carrying the schedule's UTC offset.
    pub start: String,
    /// RFC 3339 end, carrying the schedule's UTC offset.
    pub end: String,
}

/// Coverage data of one schedule as supplied by the coverage source.
///
/// # Example
///
/// ```
/// use oncall_report::models::ScheduleCoverage;
///
/// let json = r#"{
///     "id": "PSCHED1",
///     "name": "Platform",
///     "entries": [
///         {
///             "user": { "id": "PUSER1", "summary": "Ada Lovelace" },
///             "start": "2024-03-04T18:00:00+00:00",
///             "end": "2024-03-05T06:00:00+00:00"
///         }
///     ]
/// }"#;
/// let coverage: ScheduleCoverage = serde_json::from_str(json).unwrap();
/// assert_eq!(coverage.entries.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCoverage {
    /// The schedule id.
    pub id: String,
    /// The schedule's display name.
    pub name: String,
    /// The schedule's time zone name, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// The rendered entries, in chronological order.
    #[serde(default)]
    pub entries: Vec<ScheduleEntry>,
}

/// One contiguous block during which a user is on call.
///
/// Times are local to the schedule's time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoveragePeriod {
    /// Start of the block (inclusive).
    pub start: NaiveDateTime,
    /// End of the block (exclusive).
    pub end: NaiveDateTime,
}

impl CoveragePeriod {
    /// Wall-clock duration of the block in hours.
    pub fn duration_hours(&self) -> Decimal {
        let minutes = (self.end - self.start).num_minutes();
        Decimal::new(minutes, 0) / Decimal::new(60, 0)
    }

    /// The (year, month) the block starts in.
    ///
    /// Samples shifted back across the rotation boundary only count while
    /// they stay in this month.
    pub fn month_context(&self) -> (i32, u32) {
        (self.start.year(), self.start.month())
    }
}

/// All coverage of one user within one schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRotation {
    /// The paging service user id.
    pub user_id: String,
    /// The user's display name.
    pub name: String,
    /// Coverage blocks in the order they were supplied.
    pub periods: Vec<CoveragePeriod>,
}

impl UserRotation {
    /// Creates a rotation with no coverage.
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            periods: Vec::new(),
        }
    }

    /// Sum of the wall-clock durations of every period.
    pub fn covered_hours(&self) -> Decimal {
        self.periods.iter().map(CoveragePeriod::duration_hours).sum()
    }
}

/// A schedule with its coverage grouped per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRotation {
    /// The schedule id.
    pub id: String,
    /// The schedule's display name.
    pub name: String,
    /// One rotation per user, in order of first appearance.
    pub users: Vec<UserRotation>,
}

impl ScheduleRotation {
    /// Groups raw schedule entries into per-user rotations.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidTimestamp`] if any boundary is not RFC 3339
    /// and [`ReportError::InvalidPeriod`] if an entry ends before it starts.
    /// Either one invalidates the whole schedule.
    ///
    /// # Example
    ///
    /// ```
    /// use oncall_report::models::{EntryUser, ScheduleCoverage, ScheduleEntry, ScheduleRotation};
    ///
    /// let entry = |id: &str, start: &str, end: &str| ScheduleEntry {
    ///     user: EntryUser { id: id.to_string(), summary: format!("User {}", id) },
    ///     start: start.to_string(),
    ///     end: end.to_string(),
    /// };
    /// let coverage = ScheduleCoverage {
    ///     id: "PSCHED1".to_string(),
    ///     name: "Platform".to_string(),
    ///     time_zone: None,
    ///     entries: vec![
    ///         entry("P1", "2024-03-04T06:00:00+01:00", "2024-03-05T06:00:00+01:00"),
    ///         entry("P2", "2024-03-05T06:00:00+01:00", "2024-03-06T06:00:00+01:00"),
    ///         entry("P1", "2024-03-06T06:00:00+01:00", "2024-03-07T06:00:00+01:00"),
    ///     ],
    /// };
    ///
    /// let rotation = ScheduleRotation::from_coverage(&coverage).unwrap();
    /// assert_eq!(rotation.users.len(), 2);
    /// assert_eq!(rotation.users[0].periods.len(), 2);
    /// ```
    pub fn from_coverage(coverage: &ScheduleCoverage) -> ReportResult<Self> {
        let mut users: Vec<UserRotation> = Vec::new();
        let mut index_by_id: HashMap<&str, usize> = HashMap::new();

        for entry in &coverage.entries {
            let start = parse_local_timestamp(&coverage.id, &entry.start)?;
            let end = parse_local_timestamp(&coverage.id, &entry.end)?;
            if end < start {
                return Err(ReportError::InvalidPeriod {
                    schedule_id: coverage.id.clone(),
                    message: format!(
                        "entry for user '{}' ends ({}) before it starts ({})",
                        entry.user.id, entry.end, entry.start
                    ),
                });
            }

            let index = *index_by_id.entry(entry.user.id.as_str()).or_insert_with(|| {
                users.push(UserRotation::new(&entry.user.id, &entry.user.summary));
                users.len() - 1
            });
            users[index].periods.push(CoveragePeriod { start, end });
        }

        Ok(Self {
            id: coverage.id.clone(),
            name: coverage.name.clone(),
            users,
        })
    }
}

/// Parses an RFC 3339 timestamp into the wall-clock time of its own offset.
fn parse_local_timestamp(schedule_id: &str, value: &str) -> ReportResult<NaiveDateTime> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_local())
        .map_err(|e| ReportError::InvalidTimestamp {
            schedule_id: schedule_id.to_string(),
            value: value.to_string(),
            message: e.to_string(),
        })
}

/// The billing window a report covers.
///
/// A monthly window runs from the first of the month at midnight to the first
/// of the next month plus the rotation boundary hour, so the last night of the
/// month is fully covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    /// Start of the window (inclusive).
    pub start: NaiveDateTime,
    /// End of the window (exclusive).
    pub end: NaiveDateTime,
}

impl ReportWindow {
    /// Builds the window for a calendar month.
    ///
    /// # Example
    ///
    /// ```
    /// use oncall_report::models::ReportWindow;
    /// use chrono::NaiveDate;
    ///
    /// let window = ReportWindow::for_month(2024, 12, 6).unwrap();
    /// assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap().and_hms_opt(0, 0, 0).unwrap());
    /// assert_eq!(window.end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(6, 0, 0).unwrap());
    /// ```
    pub fn for_month(year: i32, month: u32, boundary_hour: u32) -> ReportResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            ReportError::CalculationError {
                message: format!("Invalid report month: {}-{:02}", year, month),
            }
        })?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1).ok_or_else(|| {
            ReportError::CalculationError {
                message: format!("Invalid report month: {}-{:02}", next_year, next_month),
            }
        })?;

        Ok(Self {
            start: first.and_time(NaiveTime::MIN),
            end: next_first.and_time(NaiveTime::MIN) + Duration::hours(i64::from(boundary_hour)),
        })
    }

    /// Builds the window for the month before `today`.
    pub fn previous_month(today: NaiveDate, boundary_hour: u32) -> ReportResult<Self> {
        let (year, month) = if today.month() == 1 {
            (today.year() - 1, 12)
        } else {
            (today.year(), today.month() - 1)
        };
        Self::for_month(year, month, boundary_hour)
    }

    /// The year used to resolve holiday calendars.
    pub fn year(&self) -> i32 {
        self.start.year()
    }
}
