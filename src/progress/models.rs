//! Records passed into and out of the progress manager

use serde::{Deserialize, Serialize};

use super::definitions::Achievement;
use super::levels::LevelUp;
use super::streaks::StreakState;

/// A finished lesson, as reported by the lesson player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonCompletion {
    pub lesson_id: String,
    /// XP the lesson itself awards
    pub xp: u64,
    /// Every question right on the first try
    pub perfect: bool,
    /// Words practiced in this lesson (duplicates across lessons count once)
    #[serde(default)]
    pub words: Vec<String>,
    /// Skill finished by this lesson, if any
    #[serde(default)]
    pub skill_completed: Option<String>,
    /// Unix timestamp in milliseconds
    pub completed_at: i64,
}

/// Learner profile loaded from the database
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LearnerProfile {
    pub total_xp: u64,
    /// Stored level. Always equal to the level derived from `total_xp`
    /// unless the row was edited outside the manager.
    pub cached_level: u32,
    pub streak: StreakState,
}

/// An achievement that was just unlocked
#[derive(Debug, Clone)]
pub struct UnlockedAchievement {
    pub achievement: &'static Achievement,
    pub unlocked_at: i64,
}

/// Events that can happen while processing a lesson
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    AchievementUnlocked(UnlockedAchievement),
    LevelUp(LevelUp),
    StreakExtended { count: u32 },
    XpAwarded { amount: u64, reason: String },
}
