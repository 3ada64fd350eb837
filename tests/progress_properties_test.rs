//! Property tests for the pure progress core: levels, streaks and achievements

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use frisian_progress::progress::{
    calculate_level, calculate_streak, check_achievements, level_cost, level_progress,
    total_cost_for_level, xp_until_next_level, LevelCurve, StatsSnapshot, StreakState,
};

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn snapshot() -> impl Strategy<Value = StatsSnapshot> {
    (
        0u64..200,
        0u64..10_000,
        0u64..150,
        0u64..150,
        0u64..100,
        0u64..2_000,
        0u64..10,
    )
        .prop_map(
            |(lessons, xp, current, longest, perfect, words, skills)| StatsSnapshot {
                lessons_completed: lessons,
                total_xp: xp,
                current_streak: current,
                longest_streak: longest.max(current),
                perfect_lessons: perfect,
                words_learned: words,
                skills_completed: skills,
            },
        )
}

fn valid_curve() -> impl Strategy<Value = LevelCurve> {
    (1u64..500, 1u64..200, 0u64..100, 1u32..10).prop_map(
        |(base, per_level_increment, bonus, bonus_every)| LevelCurve {
            base,
            per_level_increment,
            bonus,
            bonus_every,
        },
    )
}

proptest! {
    #[test]
    fn level_is_positive_and_monotonic(xp in 0u64..50_000_000, extra in 0u64..1_000_000) {
        let level = calculate_level(xp);
        prop_assert!(level >= 1);
        prop_assert!(calculate_level(xp + extra) >= level);
    }

    #[test]
    fn level_matches_cumulative_cost(xp in any::<u64>()) {
        let level = calculate_level(xp);
        prop_assert!(total_cost_for_level(level) <= xp);
        // The next level's entry cost may saturate at u64::MAX for huge totals
        let next = total_cost_for_level(level + 1);
        prop_assert!(xp < next || next == u64::MAX);
    }

    #[test]
    fn progress_stays_in_bounds(xp in any::<u64>()) {
        let progress = level_progress(xp);
        prop_assert!((0.0..=100.0).contains(&progress));
    }

    #[test]
    fn remaining_xp_lands_on_next_level(xp in 0u64..10_000_000) {
        let level = calculate_level(xp);
        let remaining = xp_until_next_level(xp);
        prop_assert!(remaining >= 1 && remaining <= level_cost(level));
        prop_assert_eq!(calculate_level(xp + remaining), level + 1);
        prop_assert_eq!(calculate_level(xp + remaining - 1), level);
    }

    #[test]
    fn valid_curves_are_strictly_increasing(curve in valid_curve(), level in 1u32..5_000) {
        prop_assert!(curve.validate().is_ok());
        prop_assert!(curve.level_cost(level + 1) > curve.level_cost(level));
        prop_assert_eq!(
            curve.total_cost_for_level(level + 1),
            curve.total_cost_for_level(level) + curve.level_cost(level)
        );
    }

    #[test]
    fn first_practice_is_always_one(current in any::<u32>(), offset in 0u64..3_000) {
        let today = base_day() + Days::new(offset);
        prop_assert_eq!(calculate_streak(None, current, today), 1);
    }

    #[test]
    fn same_day_is_idempotent(current in any::<u32>(), offset in 0u64..3_000) {
        let today = base_day() + Days::new(offset);
        prop_assert_eq!(calculate_streak(Some(today), current, today), current);
    }

    #[test]
    fn yesterday_extends(current in 0u32..1_000_000, offset in 1u64..3_000) {
        let today = base_day() + Days::new(offset);
        let yesterday = today - Days::new(1);
        prop_assert_eq!(calculate_streak(Some(yesterday), current, today), current + 1);
    }

    #[test]
    fn gaps_reset_to_one(current in 1u32..1_000_000, gap in 2u64..400) {
        let today = base_day() + Days::new(500);
        let last = today - Days::new(gap);
        prop_assert_eq!(calculate_streak(Some(last), current, today), 1);
    }

    #[test]
    fn consecutive_days_count_up(days in 1u32..200) {
        let mut state = StreakState::default();
        for n in 1..=days {
            let today = base_day() + Days::new(u64::from(n));
            // Practicing twice the same day does not change anything
            state = state.record_practice(today).record_practice(today);
            prop_assert_eq!(state.current, n);
            prop_assert_eq!(state.longest, n);
        }
    }

    #[test]
    fn longest_never_drops_below_current(gaps in proptest::collection::vec(0u64..4, 1..60)) {
        let mut state = StreakState::default();
        let mut day = base_day();
        let mut longest_seen = 0;
        for gap in gaps {
            day = day + Days::new(gap);
            state = state.record_practice(day);
            prop_assert!(state.current >= 1);
            prop_assert!(state.longest >= state.current);
            prop_assert!(state.longest >= longest_seen);
            longest_seen = state.longest;
        }
    }

    #[test]
    fn achievements_are_monotonic(a in snapshot(), b in snapshot()) {
        let low = a;
        let high = StatsSnapshot {
            lessons_completed: a.lessons_completed + b.lessons_completed,
            total_xp: a.total_xp + b.total_xp,
            current_streak: a.current_streak + b.current_streak,
            longest_streak: a.longest_streak + b.longest_streak,
            perfect_lessons: a.perfect_lessons + b.perfect_lessons,
            words_learned: a.words_learned + b.words_learned,
            skills_completed: a.skills_completed + b.skills_completed,
        };

        let low_ids = check_achievements(&low);
        let high_ids = check_achievements(&high);
        for id in low_ids {
            prop_assert!(high_ids.contains(&id), "{} lost when stats grew", id);
        }
    }
}

#[test]
fn reference_levels() {
    assert_eq!(calculate_level(0), 1);
    assert_eq!(calculate_level(99), 1);
    assert_eq!(calculate_level(100), 2);
    assert_eq!(calculate_level(249), 2);
    assert_eq!(calculate_level(250), 3);
}
