//! Record command implementation

use anyhow::Result;
use chrono::Utc;

use frisian_progress::progress::{LessonCompletion, ProgressEvent};

use super::Context;

/// Record a finished lesson and print what it caused
pub fn record_command(
    ctx: &Context,
    lesson_id: String,
    xp: u64,
    perfect: bool,
    words: Vec<String>,
    skill: Option<String>,
) -> Result<()> {
    let config = ctx.config()?;
    let manager = ctx.manager(&config)?;

    let completion = LessonCompletion {
        lesson_id,
        xp,
        perfect,
        words,
        skill_completed: skill,
        completed_at: Utc::now().timestamp_millis(),
    };
    let events = manager.record_lesson(&completion)?;

    println!("Recorded lesson {}", completion.lesson_id);
    for event in &events {
        match event {
            ProgressEvent::XpAwarded { amount, reason } => println!("  +{} XP  {}", amount, reason),
            ProgressEvent::StreakExtended { count } => println!("  🔥 {} day streak", count),
            ProgressEvent::AchievementUnlocked(unlocked) => println!(
                "  {} Achievement unlocked: {} (+{} XP)",
                unlocked.achievement.icon, unlocked.achievement.title, unlocked.achievement.xp_reward
            ),
            ProgressEvent::LevelUp(up) => {
                println!("  ⬆ Level up! {} -> {}", up.old_level, up.new_level)
            }
        }
    }

    let profile = manager.profile()?;
    println!(
        "Total: {} XP, level {}",
        profile.total_xp, profile.cached_level
    );
    Ok(())
}
