//! Level and curve commands

use anyhow::Result;

use frisian_progress::progress::LevelInfo;

use super::Context;

/// Show level details for an XP total
pub fn level_command(ctx: &Context, xp: u64) -> Result<()> {
    let config = ctx.config()?;
    let info = LevelInfo::new(xp, &config.curve);

    println!("Level {} ({} XP)", info.level, info.total_xp);
    println!(
        "  {}/{} XP into this level ({:.1}%)",
        info.xp_into_level,
        info.next_level_xp - info.level_start_xp,
        info.progress
    );
    println!(
        "  {} XP until level {} (at {} XP)",
        info.xp_until_next,
        info.level.saturating_add(1),
        info.next_level_xp
    );
    Ok(())
}

/// Print the first `levels` thresholds of the configured curve
pub fn curve_command(ctx: &Context, levels: u32) -> Result<()> {
    let config = ctx.config()?;
    let curve = config.curve;

    println!("{:>6}  {:>10}  {:>10}", "Level", "Starts at", "Cost");
    for level in 1..=levels.max(1) {
        println!(
            "{:>6}  {:>10}  {:>10}",
            level,
            curve.total_cost_for_level(level),
            curve.level_cost(level)
        );
    }
    Ok(())
}
