//! Configuration file I/O operations

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

/// Default configuration written by `frisian-progress init`
pub const DEFAULT_CONFIG: &str = r#"# Frisian course progress configuration
# =====================================

# Level curve. The XP needed to go from level n to n + 1 is
#   base + (n - 1) * per_level_increment + floor((n - 1) / bonus_every) * bonus
# base and per_level_increment must be greater than 0.
[curve]
base = 100
per_level_increment = 50
bonus = 25
bonus_every = 3

# Which midnight ends a practice day: "local" or "utc".
# Pick one and keep it; switching can move a stored day by one.
[streak]
day_boundary = "local"

[rewards]
perfect_lesson_bonus = 5

# [database]
# path = "/path/to/progress.db"
"#;

impl Config {
    /// Get the global config directory path (~/.frisian/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".frisian")
    }

    /// Get the global config file path (~/.frisian/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` if given, else the global config; defaults if neither exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let global_path = Self::global_config_path();
        if global_path.exists() {
            return Self::from_file(&global_path);
        }

        tracing::debug!(
            "No config at {}, using defaults",
            global_path.display()
        );
        Ok(Self::default())
    }

}

/// Write `content` to `path` under an exclusive lock, via temp file + rename
pub fn write_locked(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    // Separate lock file so the rename below does not drop the lock
    let lock_path = path.with_extension("toml.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| "Failed to acquire config lock")?;

    let temp_path = path.with_extension("toml.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| "Failed to write config content")?;
    temp_file
        .sync_all()
        .with_context(|| "Failed to sync config file")?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_write_locked_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        write_locked(&path, DEFAULT_CONFIG).unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap(), Config::default());

        let edited = DEFAULT_CONFIG.replace("perfect_lesson_bonus = 5", "perfect_lesson_bonus = 12");
        write_locked(&path, &edited).unwrap();
        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.rewards.perfect_lesson_bonus, 12);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_from_file_rejects_invalid_curve() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[curve]\nbase = 0\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("base must be greater than 0"));
    }
}
