//! Achievement definitions and metadata
//!
//! All achievements are defined here with their unlock requirement and reward.
//! The catalog is a read-only static and is never modified at runtime.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::error::ProgressError;

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AchievementId {
    // Lesson achievements
    FirstLesson,
    Lessons10,
    Lessons50,
    Lessons100,

    // XP achievements
    Xp100,
    Xp500,
    Xp1000,
    Xp5000,

    // Streak achievements
    Streak3,
    Streak7,
    Streak30,
    Streak100,

    // Accuracy achievements
    FirstPerfect,
    Perfect10,
    Perfect50,

    // Special achievements
    Words50,
    Words250,
    Words1000,
    FirstSkill,
    Skills5,
}

impl AchievementId {
    /// Get the string ID for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstLesson => "first_lesson",
            Self::Lessons10 => "lessons_10",
            Self::Lessons50 => "lessons_50",
            Self::Lessons100 => "lessons_100",
            Self::Xp100 => "xp_100",
            Self::Xp500 => "xp_500",
            Self::Xp1000 => "xp_1000",
            Self::Xp5000 => "xp_5000",
            Self::Streak3 => "streak_3",
            Self::Streak7 => "streak_7",
            Self::Streak30 => "streak_30",
            Self::Streak100 => "streak_100",
            Self::FirstPerfect => "first_perfect",
            Self::Perfect10 => "perfect_10",
            Self::Perfect50 => "perfect_50",
            Self::Words50 => "words_50",
            Self::Words250 => "words_250",
            Self::Words1000 => "words_1000",
            Self::FirstSkill => "first_skill",
            Self::Skills5 => "skills_5",
        }
    }

    /// Get all achievement IDs
    pub fn all() -> &'static [AchievementId] {
        &[
            Self::FirstLesson,
            Self::Lessons10,
            Self::Lessons50,
            Self::Lessons100,
            Self::Xp100,
            Self::Xp500,
            Self::Xp1000,
            Self::Xp5000,
            Self::Streak3,
            Self::Streak7,
            Self::Streak30,
            Self::Streak100,
            Self::FirstPerfect,
            Self::Perfect10,
            Self::Perfect50,
            Self::Words50,
            Self::Words250,
            Self::Words1000,
            Self::FirstSkill,
            Self::Skills5,
        ]
    }
}

impl FromStr for AchievementId {
    type Err = ProgressError;

    /// Parse from database string
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ProgressError::UnknownAchievement(s.to_string()))
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Achievement category for grouping in UI
///
/// Purely descriptive, plays no part in evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementCategory {
    Lessons,
    Xp,
    Streak,
    Accuracy,
    Special,
}

impl AchievementCategory {
    pub fn all() -> &'static [AchievementCategory] {
        &[
            Self::Lessons,
            Self::Xp,
            Self::Streak,
            Self::Accuracy,
            Self::Special,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Lessons => "Lessons",
            Self::Xp => "Experience",
            Self::Streak => "Streaks",
            Self::Accuracy => "Accuracy",
            Self::Special => "Special",
        }
    }
}

/// Learner statistic an achievement threshold is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    LessonsCompleted,
    XpEarned,
    /// Compared against the longest streak, so a broken streak keeps its credit
    StreakDays,
    PerfectLessons,
    WordsLearned,
    SkillCompleted,
}

impl StatField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LessonsCompleted => "lessons_completed",
            Self::XpEarned => "xp_earned",
            Self::StreakDays => "streak_days",
            Self::PerfectLessons => "perfect_lessons",
            Self::WordsLearned => "words_learned",
            Self::SkillCompleted => "skill_completed",
        }
    }
}

/// Unlock condition: `stat >= threshold`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub field: StatField,
    pub threshold: u64,
}

/// Achievement definition with all metadata
#[derive(Debug, Clone)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: AchievementCategory,
    pub requirement: Requirement,
    pub xp_reward: u64,
}

const fn needs(field: StatField, threshold: u64) -> Requirement {
    Requirement { field, threshold }
}

/// All achievement definitions
pub static ACHIEVEMENTS: &[Achievement] = &[
    // === LESSONS ===
    Achievement {
        id: AchievementId::FirstLesson,
        title: "Earste Stap",
        description: "Complete your first lesson",
        icon: "🎯",
        category: AchievementCategory::Lessons,
        requirement: needs(StatField::LessonsCompleted, 1),
        xp_reward: 10,
    },
    Achievement {
        id: AchievementId::Lessons10,
        title: "Goed Begun",
        description: "Complete 10 lessons",
        icon: "📚",
        category: AchievementCategory::Lessons,
        requirement: needs(StatField::LessonsCompleted, 10),
        xp_reward: 25,
    },
    Achievement {
        id: AchievementId::Lessons50,
        title: "Trouwe Learling",
        description: "Complete 50 lessons",
        icon: "🎓",
        category: AchievementCategory::Lessons,
        requirement: needs(StatField::LessonsCompleted, 50),
        xp_reward: 75,
    },
    Achievement {
        id: AchievementId::Lessons100,
        title: "Hûndert",
        description: "Complete 100 lessons",
        icon: "💯",
        category: AchievementCategory::Lessons,
        requirement: needs(StatField::LessonsCompleted, 100),
        xp_reward: 150,
    },
    // === XP ===
    Achievement {
        id: AchievementId::Xp100,
        title: "Op Gong",
        description: "Earn 100 XP",
        icon: "⭐",
        category: AchievementCategory::Xp,
        requirement: needs(StatField::XpEarned, 100),
        xp_reward: 10,
    },
    Achievement {
        id: AchievementId::Xp500,
        title: "Ferfolch",
        description: "Earn 500 XP",
        icon: "🌟",
        category: AchievementCategory::Xp,
        requirement: needs(StatField::XpEarned, 500),
        xp_reward: 25,
    },
    Achievement {
        id: AchievementId::Xp1000,
        title: "Tûzen",
        description: "Earn 1000 XP",
        icon: "✨",
        category: AchievementCategory::Xp,
        requirement: needs(StatField::XpEarned, 1000),
        xp_reward: 50,
    },
    Achievement {
        id: AchievementId::Xp5000,
        title: "Fryske Held",
        description: "Earn 5000 XP",
        icon: "🏆",
        category: AchievementCategory::Xp,
        requirement: needs(StatField::XpEarned, 5000),
        xp_reward: 200,
    },
    // === STREAK ===
    Achievement {
        id: AchievementId::Streak3,
        title: "Oan 'e Gong",
        description: "Practice 3 days in a row",
        icon: "🔥",
        category: AchievementCategory::Streak,
        requirement: needs(StatField::StreakDays, 3),
        xp_reward: 15,
    },
    Achievement {
        id: AchievementId::Streak7,
        title: "Wike Fol",
        description: "Practice 7 days in a row",
        icon: "📅",
        category: AchievementCategory::Streak,
        requirement: needs(StatField::StreakDays, 7),
        xp_reward: 50,
    },
    Achievement {
        id: AchievementId::Streak30,
        title: "Moanne Fol",
        description: "Practice 30 days in a row",
        icon: "🗓️",
        category: AchievementCategory::Streak,
        requirement: needs(StatField::StreakDays, 30),
        xp_reward: 200,
    },
    Achievement {
        id: AchievementId::Streak100,
        title: "Elfstedentocht",
        description: "Practice 100 days in a row",
        icon: "👑",
        category: AchievementCategory::Streak,
        requirement: needs(StatField::StreakDays, 100),
        xp_reward: 500,
    },
    // === ACCURACY ===
    Achievement {
        id: AchievementId::FirstPerfect,
        title: "Flaterfrij",
        description: "Finish a lesson without a single mistake",
        icon: "🎯",
        category: AchievementCategory::Accuracy,
        requirement: needs(StatField::PerfectLessons, 1),
        xp_reward: 15,
    },
    Achievement {
        id: AchievementId::Perfect10,
        title: "Skerpsinnich",
        description: "Finish 10 lessons without a single mistake",
        icon: "💎",
        category: AchievementCategory::Accuracy,
        requirement: needs(StatField::PerfectLessons, 10),
        xp_reward: 75,
    },
    Achievement {
        id: AchievementId::Perfect50,
        title: "Perfeksjonist",
        description: "Finish 50 lessons without a single mistake",
        icon: "🏅",
        category: AchievementCategory::Accuracy,
        requirement: needs(StatField::PerfectLessons, 50),
        xp_reward: 250,
    },
    // === SPECIAL ===
    Achievement {
        id: AchievementId::Words50,
        title: "Wurdsamler",
        description: "Learn 50 different words",
        icon: "📝",
        category: AchievementCategory::Special,
        requirement: needs(StatField::WordsLearned, 50),
        xp_reward: 25,
    },
    Achievement {
        id: AchievementId::Words250,
        title: "Wurdskat",
        description: "Learn 250 different words",
        icon: "📖",
        category: AchievementCategory::Special,
        requirement: needs(StatField::WordsLearned, 250),
        xp_reward: 100,
    },
    Achievement {
        id: AchievementId::Words1000,
        title: "Wandelend Wurdboek",
        description: "Learn 1000 different words",
        icon: "🧠",
        category: AchievementCategory::Special,
        requirement: needs(StatField::WordsLearned, 1000),
        xp_reward: 400,
    },
    Achievement {
        id: AchievementId::FirstSkill,
        title: "Feardigens",
        description: "Complete your first skill",
        icon: "🧩",
        category: AchievementCategory::Special,
        requirement: needs(StatField::SkillCompleted, 1),
        xp_reward: 20,
    },
    Achievement {
        id: AchievementId::Skills5,
        title: "Allround",
        description: "Complete 5 skills",
        icon: "🌈",
        category: AchievementCategory::Special,
        requirement: needs(StatField::SkillCompleted, 5),
        xp_reward: 100,
    },
];

static BY_ID: Lazy<HashMap<AchievementId, &'static Achievement>> =
    Lazy::new(|| ACHIEVEMENTS.iter().map(|a| (a.id, a)).collect());

impl Achievement {
    /// Get achievement definition by ID
    pub fn get(id: AchievementId) -> Option<&'static Achievement> {
        BY_ID.get(&id).copied()
    }

    /// Get total number of achievements
    pub fn total_count() -> usize {
        ACHIEVEMENTS.len()
    }

    /// Get total possible XP from all achievements
    pub fn total_xp() -> u64 {
        ACHIEVEMENTS.iter().map(|a| a.xp_reward).sum()
    }

    /// Achievements grouped by category, in display order
    pub fn by_category() -> Vec<(AchievementCategory, Vec<&'static Achievement>)> {
        AchievementCategory::all()
            .iter()
            .map(|&category| {
                let items = ACHIEVEMENTS
                    .iter()
                    .filter(|a| a.category == category)
                    .collect();
                (category, items)
            })
            .collect()
    }
}
