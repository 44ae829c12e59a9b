//! Streak Tracker — consecutive-day and consecutive-Monday counters.

use chrono::NaiveDate;

use crate::models::gamification::ACTIVE_DAYS_LIMIT;
use crate::models::{Stats, StreakData};
use crate::utils::dates::{date_str, days_between, is_monday, parse_date};

/// A return after two weeks or more away, observed before the streak
/// reset overwrites last_active_date.
pub const COMEBACK_GAP_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, Default)]
pub struct StreakOutcome {
    pub comeback: bool,
}

/// Apply one session date to the daily streak state.
pub fn apply(streak: &mut StreakData, session_date: NaiveDate) -> StreakOutcome {
    let last_active = streak
        .last_active_date
        .as_deref()
        .and_then(|d| parse_date(d).ok());
    let gap = last_active.map(|d| days_between(d, session_date));

    let comeback = matches!(gap, Some(g) if g >= COMEBACK_GAP_DAYS);

    match gap {
        None => streak.current_streak_days = 1,
        Some(g) if g >= 2 => streak.current_streak_days = 1,
        Some(1) => streak.current_streak_days += 1,
        _ => {} // same day — streak unchanged
    }
    streak.longest_streak = streak.longest_streak.max(streak.current_streak_days);

    let date = date_str(session_date);
    streak.last_active_date = Some(date.clone());
    if !streak.active_days.contains(&date) {
        streak.active_days.push(date);
        if streak.active_days.len() > ACTIVE_DAYS_LIMIT {
            let excess = streak.active_days.len() - ACTIVE_DAYS_LIMIT;
            streak.active_days.drain(..excess);
        }
    }

    StreakOutcome { comeback }
}

/// Consecutive week-over-week Mondays. Gap of exactly one week (up to but
/// not including two) extends the run; anything else restarts it.
pub fn apply_monday(stats: &mut Stats, session_date: NaiveDate) {
    if !is_monday(session_date) {
        return;
    }
    let last_monday = stats
        .last_monday_date
        .as_deref()
        .and_then(|d| parse_date(d).ok());
    stats.monday_streak = match last_monday {
        Some(prev) => {
            let gap = days_between(prev, session_date);
            if (7..14).contains(&gap) {
                stats.monday_streak + 1
            } else {
                1
            }
        }
        None => 1,
    };
    stats.last_monday_date = Some(date_str(session_date));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn first_session_starts_at_one() {
        let mut streak = StreakData::default();
        apply(&mut streak, d("2025-06-02"));
        assert_eq!(streak.current_streak_days, 1);
        assert_eq!(streak.longest_streak, 1);
        assert_eq!(streak.last_active_date.as_deref(), Some("2025-06-02"));
        assert_eq!(streak.active_days, vec!["2025-06-02"]);
    }

    #[test]
    fn consecutive_days_increment_by_exactly_one() {
        let mut streak = StreakData::default();
        for (i, date) in ["2025-06-02", "2025-06-03", "2025-06-04"].iter().enumerate() {
            apply(&mut streak, d(date));
            assert_eq!(streak.current_streak_days, i as u32 + 1);
        }
    }

    #[test]
    fn same_day_repeat_leaves_streak_unchanged() {
        let mut streak = StreakData::default();
        apply(&mut streak, d("2025-06-02"));
        apply(&mut streak, d("2025-06-03"));
        apply(&mut streak, d("2025-06-03"));
        assert_eq!(streak.current_streak_days, 2);
        assert_eq!(streak.active_days.len(), 2);
    }

    #[test]
    fn gap_of_two_or_more_resets_but_longest_survives() {
        let mut streak = StreakData::default();
        apply(&mut streak, d("2025-06-02"));
        apply(&mut streak, d("2025-06-03"));
        apply(&mut streak, d("2025-06-04"));
        apply(&mut streak, d("2025-06-07")); // 3-day gap
        assert_eq!(streak.current_streak_days, 1);
        assert_eq!(streak.longest_streak, 3);
    }

    #[test]
    fn comeback_flagged_at_fourteen_days() {
        let mut streak = StreakData::default();
        apply(&mut streak, d("2025-06-01"));
        assert!(!apply(&mut streak, d("2025-06-14")).comeback); // 13 days
        let mut streak = StreakData::default();
        apply(&mut streak, d("2025-06-01"));
        assert!(apply(&mut streak, d("2025-06-15")).comeback); // 14 days
    }

    #[test]
    fn active_days_bounded_to_limit() {
        let mut streak = StreakData::default();
        let start = d("2020-01-01");
        for i in 0..(ACTIVE_DAYS_LIMIT + 10) {
            apply(&mut streak, start + chrono::Duration::days(i as i64));
        }
        assert_eq!(streak.active_days.len(), ACTIVE_DAYS_LIMIT);
        // Oldest entries dropped first
        assert_eq!(streak.active_days[0], "2020-01-11");
    }

    #[test]
    fn monday_streak_counts_consecutive_weeks() {
        let mut stats = Stats::default();
        apply_monday(&mut stats, d("2025-06-02")); // Monday
        assert_eq!(stats.monday_streak, 1);
        apply_monday(&mut stats, d("2025-06-09")); // next Monday
        assert_eq!(stats.monday_streak, 2);
        apply_monday(&mut stats, d("2025-06-23")); // skipped one
        assert_eq!(stats.monday_streak, 1);
    }

    #[test]
    fn non_monday_is_ignored() {
        let mut stats = Stats::default();
        apply_monday(&mut stats, d("2025-06-04")); // Wednesday
        assert_eq!(stats.monday_streak, 0);
        assert!(stats.last_monday_date.is_none());
    }
}
