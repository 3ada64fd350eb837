//! Achievement commands

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context as _, Result};

use frisian_progress::progress::{
    achievement_progress, check_achievements, Achievement, AchievementId, StatsSnapshot,
    ACHIEVEMENTS,
};

use super::Context;

/// Evaluate a stats snapshot (from a file, stdin or the local store)
pub fn achievements_command(ctx: &Context, stats: Option<&Path>) -> Result<()> {
    let snapshot = match stats {
        Some(path) => read_snapshot(path)?,
        None => {
            let config = ctx.config()?;
            ctx.manager(&config)?.snapshot()?
        }
    };

    let qualifying = check_achievements(&snapshot);
    println!(
        "Qualifies for {}/{} achievements:\n",
        qualifying.len(),
        Achievement::total_count()
    );
    for achievement in ACHIEVEMENTS {
        let (current, target) = achievement_progress(achievement, &snapshot);
        let mark = if qualifying.contains(&achievement.id) { "x" } else { " " };
        println!(
            "  [{}] {} {:<20} {:>5}/{:<5} {}",
            mark,
            achievement.icon,
            achievement.id.as_str(),
            current,
            target,
            achievement.title
        );
    }
    Ok(())
}

fn read_snapshot(path: &Path) -> Result<StatsSnapshot> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stats from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stats file: {}", path.display()))?
    };

    serde_json::from_str(&content).context("Failed to parse stats snapshot")
}

/// List the catalog, or details of a single achievement
pub fn catalog_command(id: Option<&str>) -> Result<()> {
    if let Some(raw) = id {
        let Some(achievement) = raw
            .parse::<AchievementId>()
            .ok()
            .and_then(Achievement::get)
        else {
            match closest_id(raw) {
                Some(suggestion) => bail!("Unknown achievement '{}'. Did you mean '{}'?", raw, suggestion),
                None => bail!("Unknown achievement '{}'", raw),
            }
        };

        println!("{} {} ({})", achievement.icon, achievement.title, achievement.id);
        println!("  {}", achievement.description);
        println!("  Category: {}", achievement.category.label());
        println!(
            "  Requires: {} >= {}",
            achievement.requirement.field.as_str(),
            achievement.requirement.threshold
        );
        println!("  Reward:   {} XP", achievement.xp_reward);
        return Ok(());
    }

    for (category, items) in Achievement::by_category() {
        println!("{}:", category.label());
        for a in items {
            println!("  {} {:<20} {:<22} +{} XP", a.icon, a.id.as_str(), a.title, a.xp_reward);
        }
        println!();
    }
    println!(
        "{} achievements, {} XP in total",
        Achievement::total_count(),
        Achievement::total_xp()
    );
    Ok(())
}

/// Best fuzzy match among the catalog IDs
fn closest_id(raw: &str) -> Option<&'static str> {
    use strsim::jaro_winkler;

    AchievementId::all()
        .iter()
        .map(|id| (id.as_str(), jaro_winkler(raw, id.as_str())))
        .filter(|(_, score)| *score > 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_id() {
        assert_eq!(closest_id("first_leson"), Some("first_lesson"));
        assert_eq!(closest_id("zzz"), None);
    }
}
