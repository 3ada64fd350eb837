//! Configuration loading and management

mod io;

pub use io::{write_locked, DEFAULT_CONFIG};

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::progress::{DayBoundary, LevelCurve, XpRewards};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Level cost curve
    #[serde(default)]
    pub curve: LevelCurve,

    /// Streak settings
    #[serde(default)]
    pub streak: StreakSettings,

    /// XP rewards
    #[serde(default)]
    pub rewards: RewardSettings,

    /// Database location
    #[serde(default)]
    pub database: DatabaseSettings,
}

/// Streak settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakSettings {
    /// "local" (default) or "utc". Changing this on an existing database
    /// can shift the stored practice day by one.
    pub day_boundary: DayBoundary,
}

/// XP reward settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardSettings {
    /// Extra XP for a lesson without mistakes
    pub perfect_lesson_bonus: u64,
}

impl Default for RewardSettings {
    fn default() -> Self {
        Self {
            perfect_lesson_bonus: XpRewards::PERFECT_LESSON_BONUS,
        }
    }
}

/// Database settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Path to progress.db (defaults to ~/.frisian/progress.db)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Check settings that would break level derivation
    pub fn validate(&self) -> Result<()> {
        self.curve.validate()?;
        Ok(())
    }

    /// Database path, falling back to the global default
    pub fn database_path(&self) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("progress.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.curve, LevelCurve::default());
        assert_eq!(config.streak.day_boundary, DayBoundary::Local);
        assert_eq!(config.rewards.perfect_lesson_bonus, 5);
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [curve]
            base = 120

            [streak]
            day_boundary = "utc"

            [database]
            path = "/tmp/progress.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.curve.base, 120);
        assert_eq!(config.curve.per_level_increment, 50);
        assert_eq!(config.streak.day_boundary, DayBoundary::Utc);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/progress.db"));
    }

    #[test]
    fn test_validate_rejects_flat_curve() {
        let config: Config = toml::from_str("[curve]\nper_level_increment = 0").unwrap();
        assert!(config.validate().is_err());
    }
}
