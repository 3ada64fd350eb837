//! Streak command

use anyhow::Result;

use frisian_progress::progress::{
    calculate_streak, days_until_streak_lost, parse_practice_date, streak_status,
};

use super::Context;

/// Compute the streak after a practice event
pub fn streak_command(ctx: &Context, last: &str, current: u32, today: Option<&str>) -> Result<()> {
    let config = ctx.config()?;
    let today = match today {
        Some(day) => parse_practice_date(day)?,
        None => config.streak.day_boundary.today(),
    };
    let last = match last.trim() {
        "" | "none" | "-" => None,
        day => Some(parse_practice_date(day)?),
    };

    println!("Before: {}", streak_status(current, last, today));
    match days_until_streak_lost(last, today) {
        1 => println!("  Already practiced today"),
        0 => println!("  Last practiced yesterday, practice today to keep the streak"),
        _ if last.is_none() => println!("  No practice yet"),
        _ => println!("  Streak already lost"),
    }

    let next = calculate_streak(last, current, today);
    println!("After practicing on {}: {} day streak", today, next);
    Ok(())
}
