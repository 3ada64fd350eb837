//! Status and reset commands

use anyhow::{bail, Result};
use chrono::{DateTime, Local};

use frisian_progress::progress::{Achievement, LevelInfo};

use super::Context;

/// Show the stored learner progress
pub fn status_command(ctx: &Context) -> Result<()> {
    let config = ctx.config()?;
    let manager = ctx.manager(&config)?;

    if manager.verify_level_cache()? {
        println!("(repaired stored level)");
    }

    let profile = manager.profile()?;
    let info = LevelInfo::new(profile.total_xp, manager.curve());
    let today = manager.day_boundary().today();

    println!(
        "Level {} - {} XP ({:.1}%, {} XP to next level)",
        info.level, info.total_xp, info.progress, info.xp_until_next
    );
    println!(
        "Streak: {} days (longest {})",
        profile.streak.current, profile.streak.longest
    );
    match profile.streak.last_practice {
        Some(day) => println!("  Last practice: {}", day),
        None => println!("  Last practice: never"),
    }
    println!("  {}", profile.streak.status(today));

    let unlocked = manager.unlocked()?;
    println!(
        "\nAchievements ({}/{}):",
        unlocked.len(),
        Achievement::total_count()
    );
    for (id, at) in unlocked {
        let Some(achievement) = Achievement::get(id) else {
            continue;
        };
        let when = DateTime::from_timestamp_millis(at)
            .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!("  {} {:<22} {}", achievement.icon, achievement.title, when);
    }

    Ok(())
}

/// Delete all stored progress
pub fn reset_command(ctx: &Context, yes: bool) -> Result<()> {
    if !yes {
        bail!("Refusing to reset progress without --yes");
    }

    let config = ctx.config()?;
    ctx.manager(&config)?.reset()?;
    println!("All progress has been reset.");
    Ok(())
}
