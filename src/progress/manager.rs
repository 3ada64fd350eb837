//! Progress Manager - applies learning events to the stored learner state
//!
//! Handles XP awards, streak updates, achievement unlocks and the level cache.
//! Every write runs inside one immediate transaction so concurrent writers
//! cannot interleave read-modify-write cycles on the profile row.

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, TransactionBehavior};
use tracing::{debug, info, warn};

use super::checker::{check_achievements, new_unlocks, StatsSnapshot};
use super::db::{from_db_int, to_db_int, ProgressDb};
use super::definitions::{Achievement, AchievementId};
use super::levels::{LevelCurve, XpRewards};
use super::models::{LearnerProfile, LessonCompletion, ProgressEvent, UnlockedAchievement};
use super::streaks::{format_practice_date, parse_practice_date, DayBoundary, StreakState};
use crate::config::Config;

/// Main manager for all progress features
#[derive(Clone)]
pub struct ProgressManager {
    db: ProgressDb,
    curve: LevelCurve,
    day_boundary: DayBoundary,
    perfect_bonus: u64,
}

impl ProgressManager {
    /// Create a manager with the default curve and local day boundary
    pub fn new(db: ProgressDb) -> Self {
        Self {
            db,
            curve: LevelCurve::default(),
            day_boundary: DayBoundary::default(),
            perfect_bonus: XpRewards::PERFECT_LESSON_BONUS,
        }
    }

    /// Create a manager using the curve, day boundary and rewards from `config`
    pub fn from_config(db: ProgressDb, config: &Config) -> Self {
        Self {
            db,
            curve: config.curve,
            day_boundary: config.streak.day_boundary,
            perfect_bonus: config.rewards.perfect_lesson_bonus,
        }
    }

    pub fn with_curve(mut self, curve: LevelCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn with_day_boundary(mut self, day_boundary: DayBoundary) -> Self {
        self.day_boundary = day_boundary;
        self
    }

    pub fn curve(&self) -> &LevelCurve {
        &self.curve
    }

    pub fn day_boundary(&self) -> DayBoundary {
        self.day_boundary
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ========================================
    // READ OPERATIONS
    // ========================================

    /// Get the current learner profile
    pub fn profile(&self) -> Result<LearnerProfile> {
        let conn = self.db.conn();
        load_profile(&conn)
    }

    /// Get the current stats snapshot
    pub fn snapshot(&self) -> Result<StatsSnapshot> {
        let conn = self.db.conn();
        let profile = load_profile(&conn)?;
        load_snapshot(&conn, &profile)
    }

    /// Get all unlocked achievements with their unlock time (ms)
    pub fn unlocked(&self) -> Result<Vec<(AchievementId, i64)>> {
        let conn = self.db.conn();
        load_unlocked(&conn)
    }

    /// Get all unlocked achievement IDs
    pub fn unlocked_ids(&self) -> Result<Vec<AchievementId>> {
        Ok(self.unlocked()?.into_iter().map(|(id, _)| id).collect())
    }

    // ========================================
    // WRITE OPERATIONS
    // ========================================

    /// Award XP outside of a lesson
    ///
    /// The new total goes through the achievement evaluator like lesson XP
    /// does. Returns the XP, unlock and level-up events.
    pub fn award_xp(&self, amount: u64, reason: &str) -> Result<Vec<ProgressEvent>> {
        let mut events = Vec::new();
        let now = Self::now_ms();
        let mut conn = self.db.conn();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let profile = load_profile(&tx)?;
        let mut total_xp = profile.total_xp.saturating_add(amount);
        if amount > 0 {
            insert_xp_event(&tx, amount, reason, now)?;
            events.push(ProgressEvent::XpAwarded {
                amount,
                reason: reason.to_string(),
            });
        }

        let updated = LearnerProfile {
            total_xp,
            ..profile
        };
        total_xp = apply_unlocks(&tx, &updated, now, &mut events)?;

        self.store_profile(&tx, total_xp, &profile.streak, now)?;
        tx.commit()?;

        if let Some(up) = self.curve.level_up(profile.total_xp, total_xp) {
            info!("Level up: {} -> {}", up.old_level, up.new_level);
            events.push(ProgressEvent::LevelUp(up));
        }
        Ok(events)
    }

    /// Apply a finished lesson: streak, XP, achievements and level, in one transaction
    ///
    /// Returns every event the lesson caused.
    pub fn record_lesson(&self, lesson: &LessonCompletion) -> Result<Vec<ProgressEvent>> {
        let mut events = Vec::new();
        let now = Self::now_ms();
        let day = self.day_boundary.date_of(lesson.completed_at)?;

        let mut conn = self.db.conn();
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to start progress transaction")?;

        let profile = load_profile(&tx)?;

        // Record the completion itself
        tx.execute(
            r#"INSERT INTO lesson_completions (lesson_id, xp_earned, perfect, completed_at, day_bucket)
               VALUES (?1, ?2, ?3, ?4, ?5)"#,
            rusqlite::params![
                lesson.lesson_id,
                to_db_int(lesson.xp),
                lesson.perfect as i32,
                lesson.completed_at,
                format_practice_date(day),
            ],
        )?;
        for word in &lesson.words {
            let word = normalize_word(word);
            if word.is_empty() {
                continue;
            }
            tx.execute(
                "INSERT OR IGNORE INTO learned_words (word, learned_at) VALUES (?1, ?2)",
                rusqlite::params![word, lesson.completed_at],
            )?;
        }
        if let Some(skill) = &lesson.skill_completed {
            tx.execute(
                "INSERT OR IGNORE INTO completed_skills (skill_id, completed_at) VALUES (?1, ?2)",
                rusqlite::params![skill, lesson.completed_at],
            )?;
        }

        // Streak: only the first practice of a day moves it, and a lesson
        // reported late for an earlier day leaves it alone
        let streak = if profile.streak.predates_last_practice(day) {
            debug!(
                "Lesson {} dated {} predates last practice, streak unchanged",
                lesson.lesson_id, day
            );
            profile.streak
        } else {
            let streak = profile.streak.record_practice(day);
            if profile.streak.can_extend(day) {
                debug!(
                    "Streak {} -> {} (longest {})",
                    profile.streak.current, streak.current, streak.longest
                );
                events.push(ProgressEvent::StreakExtended {
                    count: streak.current,
                });
            }
            streak
        };

        // Lesson XP
        let bonus = if lesson.perfect { self.perfect_bonus } else { 0 };
        let lesson_xp = lesson.xp.saturating_add(bonus);
        let mut total_xp = profile.total_xp.saturating_add(lesson_xp);
        if lesson_xp > 0 {
            let reason = format!("Lesson {} (+{} perfect bonus)", lesson.lesson_id, bonus);
            insert_xp_event(&tx, lesson_xp, &reason, now)?;
            events.push(ProgressEvent::XpAwarded {
                amount: lesson_xp,
                reason,
            });
        }

        let updated = LearnerProfile {
            total_xp,
            cached_level: profile.cached_level,
            streak,
        };
        total_xp = apply_unlocks(&tx, &updated, now, &mut events)?;

        self.store_profile(&tx, total_xp, &streak, now)?;
        tx.commit().context("Failed to commit lesson progress")?;

        if let Some(up) = self.curve.level_up(profile.total_xp, total_xp) {
            info!("Level up: {} -> {}", up.old_level, up.new_level);
            events.push(ProgressEvent::LevelUp(up));
        }

        Ok(events)
    }

    /// Recompute the level from XP and overwrite the cache if it drifted
    ///
    /// Returns true if the cached level had to be repaired.
    pub fn verify_level_cache(&self) -> Result<bool> {
        let conn = self.db.conn();
        let profile = load_profile(&conn)?;
        let derived = self.curve.calculate_level(profile.total_xp);
        if derived == profile.cached_level {
            return Ok(false);
        }

        warn!(
            "Cached level {} does not match derived level {} for {} XP; repairing",
            profile.cached_level, derived, profile.total_xp
        );
        conn.execute(
            "UPDATE learner_profile SET level = ?1, updated_at = ?2 WHERE id = 1",
            rusqlite::params![derived, Self::now_ms()],
        )?;
        Ok(true)
    }

    /// Administrative reset of all progress
    pub fn reset(&self) -> Result<()> {
        warn!("Resetting all learner progress");
        self.db.reset_all()
    }

    /// Write XP, the level derived from it, and the streak
    fn store_profile(
        &self,
        conn: &Connection,
        total_xp: u64,
        streak: &StreakState,
        now: i64,
    ) -> Result<()> {
        let level = self.curve.calculate_level(total_xp);
        conn.execute(
            r#"UPDATE learner_profile SET
                   total_xp = ?1, level = ?2, current_streak = ?3, longest_streak = ?4,
                   last_practice_date = ?5, updated_at = ?6
               WHERE id = 1"#,
            rusqlite::params![
                to_db_int(total_xp),
                level,
                streak.current,
                streak.longest,
                streak.last_practice.map(format_practice_date),
                now,
            ],
        )?;
        Ok(())
    }
}

fn load_profile(conn: &Connection) -> Result<LearnerProfile> {
    let (total_xp, level, current, longest, last_day) = conn.query_row(
        r#"SELECT total_xp, level, current_streak, longest_streak, last_practice_date
           FROM learner_profile WHERE id = 1"#,
        [],
        |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, i64>(1)?,
                r.get::<_, u32>(2)?,
                r.get::<_, u32>(3)?,
                r.get::<_, Option<String>>(4)?,
            ))
        },
    )?;

    let last_practice = match last_day {
        Some(day) => Some(parse_practice_date(&day).context("Corrupt last_practice_date")?),
        None => None,
    };

    // An out-of-range level only comes from edits outside the manager;
    // 0 never matches a derived level, so verification rewrites it
    let cached_level = u32::try_from(level).unwrap_or_else(|_| {
        warn!("Stored level {} is out of range", level);
        0
    });

    Ok(LearnerProfile {
        total_xp: from_db_int(total_xp),
        cached_level,
        streak: StreakState {
            current,
            longest: longest.max(current),
            last_practice,
        },
    })
}

fn count(conn: &Connection, sql: &str) -> Result<u64> {
    let n: i64 = conn.query_row(sql, [], |r| r.get(0))?;
    Ok(from_db_int(n))
}

fn load_snapshot(conn: &Connection, profile: &LearnerProfile) -> Result<StatsSnapshot> {
    Ok(StatsSnapshot {
        lessons_completed: count(conn, "SELECT COUNT(*) FROM lesson_completions")?,
        total_xp: profile.total_xp,
        current_streak: u64::from(profile.streak.current),
        longest_streak: u64::from(profile.streak.longest),
        perfect_lessons: count(
            conn,
            "SELECT COUNT(*) FROM lesson_completions WHERE perfect = 1",
        )?,
        words_learned: count(conn, "SELECT COUNT(*) FROM learned_words")?,
        skills_completed: count(conn, "SELECT COUNT(*) FROM completed_skills")?,
    })
}

fn load_unlocked(conn: &Connection) -> Result<Vec<(AchievementId, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT achievement_id, unlocked_at FROM achievement_unlocks ORDER BY unlocked_at, achievement_id",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;

    let mut unlocked = Vec::new();
    for row in rows {
        let (raw, at) = row?;
        match raw.parse::<AchievementId>() {
            Ok(id) => unlocked.push((id, at)),
            Err(e) => warn!("Skipping stored achievement: {}", e),
        }
    }
    Ok(unlocked)
}

/// Unlock every newly qualifying achievement and credit its reward
///
/// Rewards can push XP over another threshold, so evaluation repeats until
/// a round unlocks nothing; the catalog is finite so this ends. Returns the
/// total XP including rewards.
fn apply_unlocks(
    conn: &Connection,
    profile: &LearnerProfile,
    now: i64,
    events: &mut Vec<ProgressEvent>,
) -> Result<u64> {
    let mut total_xp = profile.total_xp;
    let mut stats = load_snapshot(conn, profile)?;
    loop {
        let already = load_unlocked(conn)?
            .into_iter()
            .map(|(id, _)| id)
            .collect::<Vec<_>>();
        let fresh = new_unlocks(&check_achievements(&stats), &already);
        if fresh.is_empty() {
            break;
        }

        let mut reward_xp = 0u64;
        for id in fresh {
            let Some(unlocked) = unlock_achievement(conn, id, now)? else {
                continue;
            };
            info!(
                "Achievement unlocked: {} ({})",
                unlocked.achievement.title,
                id.as_str()
            );
            reward_xp = reward_xp.saturating_add(unlocked.achievement.xp_reward);
            insert_xp_event(
                conn,
                unlocked.achievement.xp_reward,
                &format!("Achievement {}", id.as_str()),
                now,
            )?;
            events.push(ProgressEvent::AchievementUnlocked(unlocked));
        }
        if reward_xp == 0 {
            break;
        }
        total_xp = total_xp.saturating_add(reward_xp);
        stats.total_xp = total_xp;
    }
    Ok(total_xp)
}

/// Insert the unlock row; `None` if it already existed
fn unlock_achievement(
    conn: &Connection,
    id: AchievementId,
    now: i64,
) -> Result<Option<UnlockedAchievement>> {
    let Some(achievement) = Achievement::get(id) else {
        warn!("No definition for achievement {}", id);
        return Ok(None);
    };

    let inserted = conn.execute(
        "INSERT OR IGNORE INTO achievement_unlocks (achievement_id, unlocked_at) VALUES (?1, ?2)",
        rusqlite::params![id.as_str(), now],
    )?;
    if inserted == 0 {
        return Ok(None);
    }

    Ok(Some(UnlockedAchievement {
        achievement,
        unlocked_at: now,
    }))
}

fn insert_xp_event(conn: &Connection, amount: u64, reason: &str, now: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO xp_events (amount, reason, created_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![to_db_int(amount), reason, now],
    )?;
    Ok(())
}

/// Lowercase and trim a word so "Goeie" and "goeie " count once
fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}
