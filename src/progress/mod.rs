//! Learner progress: XP levels, daily streaks and achievements
//!
//! `levels`, `streaks` and the achievement checker are pure functions over
//! snapshots of learner state. `ProgressManager` is the layer that loads that
//! state from `~/.frisian/progress.db`, feeds it through them and writes the
//! result back.
//!
//! # Usage
//!
//! ```ignore
//! let manager = ProgressManager::new(ProgressDb::open_default()?);
//!
//! // Apply a finished lesson
//! let events = manager.record_lesson(&completion)?;
//!
//! // Or use the pure core directly
//! let level = calculate_level(1200);
//! let qualifying = check_achievements(&snapshot);
//! ```

mod checker;
mod db;
mod definitions;
mod levels;
mod manager;
mod models;
mod streaks;

pub use checker::{achievement_progress, check_achievements, new_unlocks, StatsSnapshot};
pub use db::ProgressDb;
pub use definitions::{
    Achievement, AchievementCategory, AchievementId, Requirement, StatField, ACHIEVEMENTS,
};
pub use levels::{
    calculate_level, level_cost, level_progress, total_cost_for_level, xp_until_next_level,
    LevelCurve, LevelInfo, LevelUp, XpRewards,
};
pub use manager::ProgressManager;
pub use models::{LearnerProfile, LessonCompletion, ProgressEvent, UnlockedAchievement};
pub use streaks::{
    calculate_streak, days_until_streak_lost, format_practice_date, parse_practice_date,
    practiced_today, streak_status, DayBoundary, StreakState, StreakStatus,
};
