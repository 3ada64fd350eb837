//! XP and Level system
//!
//! Levels follow a progressive cost curve: each level costs more than the one
//! before it, with an extra bump every few levels. The level is always derived
//! from lifetime XP and never stored as independent truth.

use serde::{Deserialize, Serialize};

use crate::error::ProgressError;

/// Cost curve for advancing from one level to the next
///
/// `level_cost(n) = base + (n - 1) * per_level_increment + ((n - 1) / bonus_every) * bonus`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelCurve {
    /// XP needed to go from level 1 to level 2
    pub base: u64,
    /// Linear growth of the cost per level
    pub per_level_increment: u64,
    /// Extra cost added once per completed block of levels
    pub bonus: u64,
    /// Block size for the bonus
    pub bonus_every: u32,
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self {
            base: 100,
            per_level_increment: 50,
            bonus: 25,
            bonus_every: 3,
        }
    }
}

impl LevelCurve {
    /// Reject curves whose level cost is not strictly increasing
    pub fn validate(&self) -> Result<(), ProgressError> {
        if self.base == 0 {
            return Err(ProgressError::InvalidCurve("base must be greater than 0".into()));
        }
        if self.per_level_increment == 0 {
            return Err(ProgressError::InvalidCurve(
                "per_level_increment must be greater than 0".into(),
            ));
        }
        if self.bonus_every == 0 {
            return Err(ProgressError::InvalidCurve(
                "bonus_every must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// XP required to advance from `level` to `level + 1` (level 0 counts as 1)
    pub fn level_cost(&self, level: u32) -> u64 {
        let steps = u64::from(level.max(1) - 1);
        let block = u64::from(self.bonus_every.max(1));
        self.base
            .saturating_add(steps.saturating_mul(self.per_level_increment))
            .saturating_add((steps / block).saturating_mul(self.bonus))
    }

    /// Minimum lifetime XP to have reached `level` (0 for level 1 and below)
    ///
    /// Closed form of the sum of `level_cost(1..level)`, saturating at `u64::MAX`.
    pub fn total_cost_for_level(&self, level: u32) -> u64 {
        u64::try_from(self.cumulative_cost(level)).unwrap_or(u64::MAX)
    }

    fn cumulative_cost(&self, level: u32) -> u128 {
        let terms = u128::from(level.max(1) - 1);
        if terms == 0 {
            return 0;
        }
        let block = u128::from(self.bonus_every.max(1));
        let full_blocks = terms / block;
        let remainder = terms % block;

        let base_part = terms.saturating_mul(u128::from(self.base));
        let linear_part =
            (terms * (terms - 1) / 2).saturating_mul(u128::from(self.per_level_increment));
        let bonus_steps =
            block * full_blocks * full_blocks.saturating_sub(1) / 2 + full_blocks * remainder;
        let bonus_part = bonus_steps.saturating_mul(u128::from(self.bonus));

        base_part
            .saturating_add(linear_part)
            .saturating_add(bonus_part)
    }

    /// Level reached with `total_xp` lifetime XP (always >= 1)
    pub fn calculate_level(&self, total_xp: u64) -> u32 {
        let xp = u128::from(total_xp);
        // cumulative_cost is strictly increasing, so search for the last
        // level whose entry cost is still covered.
        let (mut lo, mut hi) = (1u32, u32::MAX);
        if self.cumulative_cost(hi) <= xp {
            return hi;
        }
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.cumulative_cost(mid) <= xp {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }

    /// XP earned inside the current level
    pub fn xp_into_level(&self, total_xp: u64) -> u64 {
        let level = self.calculate_level(total_xp);
        total_xp.saturating_sub(self.total_cost_for_level(level))
    }

    /// Progress through the current level as a percentage in `[0, 100]`
    pub fn level_progress(&self, total_xp: u64) -> f64 {
        let level = self.calculate_level(total_xp);
        let cost = self.level_cost(level);
        if cost == 0 {
            return 100.0;
        }
        let into = total_xp.saturating_sub(self.total_cost_for_level(level));
        (into as f64 / cost as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// XP still needed to reach the next level
    pub fn xp_until_next_level(&self, total_xp: u64) -> u64 {
        let level = self.calculate_level(total_xp);
        let into = total_xp.saturating_sub(self.total_cost_for_level(level));
        self.level_cost(level).saturating_sub(into)
    }

    /// Detect a level change between two XP totals
    pub fn level_up(&self, old_xp: u64, new_xp: u64) -> Option<LevelUp> {
        let old_level = self.calculate_level(old_xp);
        let new_level = self.calculate_level(new_xp);
        (new_level > old_level).then_some(LevelUp {
            old_level,
            new_level,
        })
    }
}

/// Level of `total_xp` on the default curve
pub fn calculate_level(total_xp: u64) -> u32 {
    LevelCurve::default().calculate_level(total_xp)
}

/// Cost of advancing from `level` on the default curve
pub fn level_cost(level: u32) -> u64 {
    LevelCurve::default().level_cost(level)
}

/// Entry cost of `level` on the default curve
pub fn total_cost_for_level(level: u32) -> u64 {
    LevelCurve::default().total_cost_for_level(level)
}

/// Progress percentage within the current level on the default curve
pub fn level_progress(total_xp: u64) -> f64 {
    LevelCurve::default().level_progress(total_xp)
}

/// XP left until the next level on the default curve
pub fn xp_until_next_level(total_xp: u64) -> u64 {
    LevelCurve::default().xp_until_next_level(total_xp)
}

/// A level up event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
}

/// Level summary for display
#[derive(Debug, Clone, PartialEq)]
pub struct LevelInfo {
    pub total_xp: u64,
    pub level: u32,
    /// XP at which the current level started
    pub level_start_xp: u64,
    /// XP at which the next level starts
    pub next_level_xp: u64,
    pub xp_into_level: u64,
    pub xp_until_next: u64,
    /// 0.0 - 100.0
    pub progress: f64,
}

impl LevelInfo {
    pub fn new(total_xp: u64, curve: &LevelCurve) -> Self {
        let level = curve.calculate_level(total_xp);
        let level_start_xp = curve.total_cost_for_level(level);
        let cost = curve.level_cost(level);
        let xp_into_level = total_xp.saturating_sub(level_start_xp);

        Self {
            total_xp,
            level,
            level_start_xp,
            next_level_xp: level_start_xp.saturating_add(cost),
            xp_into_level,
            xp_until_next: cost.saturating_sub(xp_into_level),
            progress: curve.level_progress(total_xp),
        }
    }
}

/// XP rewards for learning actions
pub struct XpRewards;

impl XpRewards {
    /// Bonus for a lesson answered entirely right on the first try
    pub const PERFECT_LESSON_BONUS: u64 = 5;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walk the curve level by level, the slow way
    fn naive_level(curve: &LevelCurve, total_xp: u64) -> u32 {
        let mut level = 1;
        let mut required = 0u64;
        while required + curve.level_cost(level) <= total_xp {
            required += curve.level_cost(level);
            level += 1;
        }
        level
    }

    #[test]
    fn test_level_cost() {
        assert_eq!(level_cost(1), 100);
        assert_eq!(level_cost(2), 150);
        assert_eq!(level_cost(3), 200);
        assert_eq!(level_cost(4), 275); // first bonus block
        assert_eq!(level_cost(7), 450); // 100 + 300 + 50
        assert_eq!(level_cost(0), level_cost(1));
    }

    #[test]
    fn test_reference_thresholds() {
        let starts: Vec<u64> = (1..=5).map(total_cost_for_level).collect();
        assert_eq!(starts, vec![0, 100, 250, 450, 725]);
    }

    #[test]
    fn test_level_for_xp() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(99), 1);
        assert_eq!(calculate_level(100), 2);
        assert_eq!(calculate_level(249), 2);
        assert_eq!(calculate_level(250), 3);
        assert_eq!(calculate_level(449), 3);
        assert_eq!(calculate_level(450), 4);
    }

    #[test]
    fn test_closed_form_matches_walk() {
        let curve = LevelCurve::default();
        for xp in (0..20_000).step_by(7) {
            assert_eq!(curve.calculate_level(xp), naive_level(&curve, xp), "xp = {}", xp);
        }

        let mut running = 0u64;
        for level in 1..200 {
            assert_eq!(curve.total_cost_for_level(level), running);
            running += curve.level_cost(level);
        }
    }

    #[test]
    fn test_progress_and_remaining() {
        // Level 2 spans 100..250
        assert_eq!(level_progress(0), 0.0);
        assert!((level_progress(175) - 50.0).abs() < f64::EPSILON);
        assert_eq!(xp_until_next_level(175), 75);
        assert_eq!(xp_until_next_level(0), 100);
        assert_eq!(xp_until_next_level(100), 150);
    }

    #[test]
    fn test_huge_xp_does_not_panic() {
        let level = calculate_level(u64::MAX);
        assert!(level > 1 && level < u32::MAX);
        assert!(total_cost_for_level(level + 1) == u64::MAX);
        let progress = level_progress(u64::MAX);
        assert!((0.0..=100.0).contains(&progress));
    }

    #[test]
    fn test_level_up_detection() {
        let curve = LevelCurve::default();
        assert_eq!(curve.level_up(90, 95), None);
        assert_eq!(
            curve.level_up(90, 260),
            Some(LevelUp {
                old_level: 1,
                new_level: 3
            })
        );
    }

    #[test]
    fn test_level_info() {
        let info = LevelInfo::new(175, &LevelCurve::default());
        assert_eq!(info.level, 2);
        assert_eq!(info.level_start_xp, 100);
        assert_eq!(info.next_level_xp, 250);
        assert_eq!(info.xp_into_level, 75);
        assert_eq!(info.xp_until_next, 75);
    }

    #[test]
    fn test_curve_validation() {
        assert!(LevelCurve::default().validate().is_ok());
        let flat = LevelCurve {
            per_level_increment: 0,
            ..LevelCurve::default()
        };
        assert!(matches!(flat.validate(), Err(ProgressError::InvalidCurve(_))));
    }
}
