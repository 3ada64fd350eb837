//! SQLite database connection and schema management for learner progress
//!
//! Manages the `~/.frisian/progress.db` database.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::config::Config;

/// Current schema version written on open
const SCHEMA_VERSION: i32 = 1;

/// Database wrapper shared between manager handles
#[derive(Clone)]
pub struct ProgressDb {
    conn: Arc<Mutex<Connection>>,
}

impl ProgressDb {
    /// Open or create the progress database at the default location (~/.frisian/progress.db)
    pub fn open_default() -> Result<Self> {
        let db_path = Config::global_config_dir().join("progress.db");
        Self::open(&db_path)
    }

    /// Open or create the progress database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create progress dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open progress db: {}", path.display()))?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(Duration::from_secs(5))?;

        Self::from_connection(conn)
    }

    /// In-memory database, used by tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory progress db")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Lock the connection
    pub fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("Progress DB lock poisoned")
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to initialize progress schema")?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version VALUES (?1)",
            [SCHEMA_VERSION],
        )?;
        Ok(())
    }

    /// Schema version stored in the database
    pub fn schema_version(&self) -> Result<i32> {
        let conn = self.conn();
        let version = conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |r| r.get(0),
        )?;
        Ok(version)
    }

    /// Delete all progress (XP, streak, completions, unlocks)
    pub fn reset_all(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(
            r#"
            DELETE FROM lesson_completions;
            DELETE FROM learned_words;
            DELETE FROM completed_skills;
            DELETE FROM achievement_unlocks;
            DELETE FROM xp_events;
            UPDATE learner_profile SET
                total_xp = 0, level = 1, current_streak = 0, longest_streak = 0,
                last_practice_date = NULL, updated_at = NULL
            WHERE id = 1;
            "#,
        )?;
        Ok(())
    }
}

/// Convert a counter for storage (SQLite integers are signed)
pub(crate) fn to_db_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Convert a stored counter back, treating negatives as 0
pub(crate) fn from_db_int(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// SQL schema for the progress database
const SCHEMA_SQL: &str = r#"
-- Learner profile (singleton). `level` is a cache of the level derived from total_xp.
CREATE TABLE IF NOT EXISTS learner_profile (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    total_xp INTEGER NOT NULL DEFAULT 0,
    level INTEGER NOT NULL DEFAULT 1,
    current_streak INTEGER NOT NULL DEFAULT 0,
    longest_streak INTEGER NOT NULL DEFAULT 0,
    last_practice_date TEXT,
    updated_at INTEGER
);
INSERT OR IGNORE INTO learner_profile (id) VALUES (1);

-- Completed lessons (append-only)
CREATE TABLE IF NOT EXISTS lesson_completions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    lesson_id TEXT NOT NULL,
    xp_earned INTEGER NOT NULL DEFAULT 0,
    perfect INTEGER NOT NULL DEFAULT 0,
    completed_at INTEGER NOT NULL,
    day_bucket TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_completion_lesson ON lesson_completions(lesson_id);
CREATE INDEX IF NOT EXISTS idx_completion_day ON lesson_completions(day_bucket);

-- Distinct words the learner has practiced
CREATE TABLE IF NOT EXISTS learned_words (
    word TEXT PRIMARY KEY,
    learned_at INTEGER NOT NULL
);

-- Distinct completed skills
CREATE TABLE IF NOT EXISTS completed_skills (
    skill_id TEXT PRIMARY KEY,
    completed_at INTEGER NOT NULL
);

-- Unlocked achievements: at most one row per achievement
CREATE TABLE IF NOT EXISTS achievement_unlocks (
    achievement_id TEXT PRIMARY KEY,
    unlocked_at INTEGER NOT NULL
);

-- XP ledger (append-only)
CREATE TABLE IF NOT EXISTS xp_events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    amount INTEGER NOT NULL,
    reason TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
"#;
