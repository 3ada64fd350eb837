//! CLI command implementations

pub mod achievements;
pub mod init;
pub mod level;
pub mod record;
pub mod status;
pub mod streak;

use std::path::PathBuf;

use anyhow::Result;

use frisian_progress::config::Config;
use frisian_progress::progress::{ProgressDb, ProgressManager};

/// Global options shared by all commands
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
}

impl Context {
    pub fn config(&self) -> Result<Config> {
        Config::load(self.config_path.as_deref())
    }

    /// Open the progress store, `--db` taking precedence over the config
    pub fn manager(&self, config: &Config) -> Result<ProgressManager> {
        let path = self
            .db_path
            .clone()
            .unwrap_or_else(|| config.database_path());
        tracing::debug!("Opening progress db at {}", path.display());
        let db = ProgressDb::open(&path)?;
        Ok(ProgressManager::from_config(db, config))
    }
}
