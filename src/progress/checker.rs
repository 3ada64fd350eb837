//! Achievement checking logic
//!
//! Evaluates every catalog entry against a stats snapshot. The checker
//! reports everything the learner qualifies for; finding out what is new
//! is a set difference against the already unlocked IDs.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::definitions::{Achievement, AchievementId, StatField, ACHIEVEMENTS};

/// Point-in-time learner totals used for achievement checks
///
/// Missing fields deserialize to 0, so a partial snapshot still evaluates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub lessons_completed: u64,
    pub total_xp: u64,
    pub current_streak: u64,
    pub longest_streak: u64,
    pub perfect_lessons: u64,
    pub words_learned: u64,
    pub skills_completed: u64,
}

impl StatField {
    /// Read this field from a snapshot
    pub fn read(&self, stats: &StatsSnapshot) -> u64 {
        match self {
            Self::LessonsCompleted => stats.lessons_completed,
            Self::XpEarned => stats.total_xp,
            Self::StreakDays => stats.longest_streak,
            Self::PerfectLessons => stats.perfect_lessons,
            Self::WordsLearned => stats.words_learned,
            Self::SkillCompleted => stats.skills_completed,
        }
    }
}

impl Achievement {
    /// Whether the snapshot meets this achievement's requirement
    pub fn is_met(&self, stats: &StatsSnapshot) -> bool {
        self.requirement.field.read(stats) >= self.requirement.threshold
    }
}

/// All achievements the snapshot qualifies for, in catalog order
pub fn check_achievements(stats: &StatsSnapshot) -> Vec<AchievementId> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| a.is_met(stats))
        .map(|a| a.id)
        .collect()
}

/// Qualifying achievements that are not unlocked yet
pub fn new_unlocks(qualifying: &[AchievementId], unlocked: &[AchievementId]) -> Vec<AchievementId> {
    let unlocked: HashSet<_> = unlocked.iter().collect();
    let mut seen = HashSet::new();
    qualifying
        .iter()
        .copied()
        .filter(|id| !unlocked.contains(id) && seen.insert(*id))
        .collect()
}

/// Progress towards an achievement as `(current, target)`, current capped at target
pub fn achievement_progress(achievement: &Achievement, stats: &StatsSnapshot) -> (u64, u64) {
    let target = achievement.requirement.threshold;
    (achievement.requirement.field.read(stats).min(target), target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_lesson_only() {
        let stats = StatsSnapshot {
            lessons_completed: 1,
            ..Default::default()
        };
        assert_eq!(check_achievements(&stats), vec![AchievementId::FirstLesson]);
    }

    #[test]
    fn test_empty_snapshot_unlocks_nothing() {
        assert!(check_achievements(&StatsSnapshot::default()).is_empty());
    }

    #[test]
    fn test_xp_tiers_fire_together() {
        let stats = StatsSnapshot {
            total_xp: 1000,
            ..Default::default()
        };
        let ids = check_achievements(&stats);
        assert!(ids.contains(&AchievementId::Xp100));
        assert!(ids.contains(&AchievementId::Xp500));
        assert!(ids.contains(&AchievementId::Xp1000));
        assert!(!ids.contains(&AchievementId::Xp5000));
    }

    #[test]
    fn test_streak_uses_longest() {
        let stats = StatsSnapshot {
            current_streak: 1,
            longest_streak: 7,
            ..Default::default()
        };
        let ids = check_achievements(&stats);
        assert!(ids.contains(&AchievementId::Streak3));
        assert!(ids.contains(&AchievementId::Streak7));

        let only_current = StatsSnapshot {
            current_streak: 7,
            longest_streak: 0,
            ..Default::default()
        };
        assert!(check_achievements(&only_current).is_empty());
    }

    #[test]
    fn test_new_unlocks_is_set_difference() {
        let qualifying = [
            AchievementId::FirstLesson,
            AchievementId::Xp100,
            AchievementId::Xp500,
        ];
        let unlocked = [AchievementId::Xp100, AchievementId::Streak3];
        assert_eq!(
            new_unlocks(&qualifying, &unlocked),
            vec![AchievementId::FirstLesson, AchievementId::Xp500]
        );
        assert!(new_unlocks(&qualifying, &qualifying).is_empty());
    }

    #[test]
    fn test_partial_snapshot_json() {
        let stats: StatsSnapshot = serde_json::from_str(r#"{"wordsLearned": 60}"#).unwrap();
        assert_eq!(stats.lessons_completed, 0);
        assert_eq!(check_achievements(&stats), vec![AchievementId::Words50]);
    }

    #[test]
    fn test_progress_is_capped() {
        let streak7 = Achievement::get(AchievementId::Streak7).unwrap();
        let stats = StatsSnapshot {
            longest_streak: 4,
            ..Default::default()
        };
        assert_eq!(achievement_progress(streak7, &stats), (4, 7));

        let stats = StatsSnapshot {
            longest_streak: 40,
            ..Default::default()
        };
        assert_eq!(achievement_progress(streak7, &stats), (7, 7));
    }
}
