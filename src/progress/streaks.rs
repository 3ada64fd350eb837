//! Streak tracking system
//!
//! Tracks consecutive days of practice. All comparisons happen on calendar
//! days (`NaiveDate`); which clock defines "today" is decided once by a
//! [`DayBoundary`] and must stay the same for every call.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProgressError;

/// Date format used for stored practice days
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Which clock decides where one practice day ends and the next begins
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// Midnight in the machine's local timezone
    #[default]
    Local,
    /// Midnight UTC
    Utc,
}

impl DayBoundary {
    /// Today's date according to this boundary
    pub fn today(&self) -> NaiveDate {
        match self {
            Self::Local => Local::now().date_naive(),
            Self::Utc => Utc::now().date_naive(),
        }
    }

    /// Practice day a Unix timestamp (milliseconds) falls on
    pub fn date_of(&self, timestamp_ms: i64) -> Result<NaiveDate, ProgressError> {
        let utc = DateTime::from_timestamp_millis(timestamp_ms)
            .ok_or(ProgressError::InvalidTimestamp(timestamp_ms))?;
        Ok(match self {
            Self::Local => utc.with_timezone(&Local).date_naive(),
            Self::Utc => utc.date_naive(),
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Utc => "utc",
        }
    }
}

/// Parse a stored `YYYY-MM-DD` practice date
pub fn parse_practice_date(s: &str) -> Result<NaiveDate, ProgressError> {
    NaiveDate::parse_from_str(s.trim(), DAY_FORMAT)
        .map_err(|_| ProgressError::InvalidDate(s.to_string()))
}

/// Format a practice date for storage
pub fn format_practice_date(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Whole days from `last_practice` to `today` (negative if in the future)
fn days_since(last_practice: NaiveDate, today: NaiveDate) -> i64 {
    (today - last_practice).num_days()
}

/// New streak count for a practice event happening `today`
///
/// Only call this when a practice session has actually been completed: a gap
/// restarts the streak at 1, not 0, because the current event counts.
pub fn calculate_streak(last_practice: Option<NaiveDate>, current: u32, today: NaiveDate) -> u32 {
    let Some(last) = last_practice else {
        return 1;
    };

    match days_since(last, today) {
        0 => current,
        1 => current.saturating_add(1),
        _ => 1,
    }
}

/// Whether the last practice happened today
pub fn practiced_today(last_practice: Option<NaiveDate>, today: NaiveDate) -> bool {
    last_practice == Some(today)
}

/// Days of grace left before the streak is lost
///
/// 1 if already practiced today, 0 if the last practice was yesterday (must
/// practice today), -1 if the streak is already lost or never started.
pub fn days_until_streak_lost(last_practice: Option<NaiveDate>, today: NaiveDate) -> i32 {
    match last_practice.map(|last| days_since(last, today)) {
        Some(0) => 1,
        Some(1) => 0,
        _ => -1,
    }
}

/// Where a learner stands with their daily streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakStatus {
    /// No streak yet
    NotStarted,
    /// Practiced today, streak is safe until tomorrow
    KeptAlive,
    /// Practiced yesterday, must practice today
    AtRisk,
    /// Gap of two or more days
    Lost,
}

impl StreakStatus {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotStarted => "Start your streak today by finishing a lesson!",
            Self::KeptAlive => "Streak kept alive! Come back tomorrow to keep it going.",
            Self::AtRisk => "Practice today to keep your streak!",
            Self::Lost => "Your streak has ended. Finish a lesson to start a new one.",
        }
    }
}

impl fmt::Display for StreakStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Classify the streak without changing it
pub fn streak_status(current: u32, last_practice: Option<NaiveDate>, today: NaiveDate) -> StreakStatus {
    let Some(last) = last_practice else {
        return StreakStatus::NotStarted;
    };
    if current == 0 {
        return StreakStatus::NotStarted;
    }

    match days_since(last, today) {
        0 => StreakStatus::KeptAlive,
        1 => StreakStatus::AtRisk,
        _ => StreakStatus::Lost,
    }
}

/// Stored streak state for one learner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakState {
    pub current: u32,
    /// Highest `current` ever reached
    pub longest: u32,
    pub last_practice: Option<NaiveDate>,
}

impl StreakState {
    /// Apply a completed practice session on `today`
    pub fn record_practice(&self, today: NaiveDate) -> StreakState {
        let current = calculate_streak(self.last_practice, self.current, today);
        StreakState {
            current,
            longest: self.longest.max(current),
            last_practice: Some(today),
        }
    }

    /// Whether `day` lies before the last recorded practice day
    ///
    /// A late report of an earlier day is not a new practice event.
    pub fn predates_last_practice(&self, day: NaiveDate) -> bool {
        self.last_practice.is_some_and(|last| day < last)
    }

    /// Whether this practice would move the streak (false on a repeat same-day event)
    pub fn can_extend(&self, today: NaiveDate) -> bool {
        !practiced_today(self.last_practice, today)
    }

    pub fn status(&self, today: NaiveDate) -> StreakStatus {
        streak_status(self.current, self.last_practice, today)
    }

    pub fn days_until_lost(&self, today: NaiveDate) -> i32 {
        days_until_streak_lost(self.last_practice, today)
    }
}
