//! Points Ledger — converts session signals into FP events in a fixed
//! order, enforcing the daily session cap and one-time-only awards.

use crate::engine::metrics::SessionMetrics;
use crate::engine::weekly::WeekStatus;
use crate::models::{EventKind, GamificationState, PointEvent};

pub const SESSION_POINTS: u32 = 50;
/// Hard ceiling on session_complete FP per calendar day
pub const DAILY_SESSION_CAP: u32 = 100;
pub const FULL_DAY_POINTS: u32 = 25;
pub const PR_POINTS: u32 = 100;
pub const WEIGHT_INCREASE_POINTS: u32 = 30;
pub const REP_INCREASE_POINTS: u32 = 20;
pub const PERFECT_WEEK_POINTS: u32 = 200;
pub const FIRST_WORKOUT_POINTS: u32 = 50;
pub const PROFILE_SETUP_POINTS: u32 = 100;

pub const STREAK_MILESTONES: &[(u32, u32)] = &[(7, 150), (30, 500), (90, 1500)];

/// How many distinct dates of cap bookkeeping to retain.
pub const SESSION_FP_WINDOW_DAYS: usize = 14;

pub struct LedgerContext<'a> {
    pub metrics: &'a SessionMetrics,
    pub session_exercise_count: usize,
    pub planned_exercise_count: usize,
    /// "YYYY-MM-DD" of the session, drives the daily cap window
    pub session_date: &'a str,
    pub week: &'a WeekStatus,
    pub streak_days: u32,
    /// Profile has a non-empty fitness level (gates the setup bonus)
    pub has_fitness_level: bool,
    /// Processing timestamp applied to every event
    pub now: &'a str,
}

/// Apply all ledger rules in order. Events are appended to the state's
/// history (ring-buffered) and summed into the running total; the same
/// events are returned for the caller's session summary.
pub fn run(state: &mut GamificationState, ctx: &LedgerContext) -> Vec<PointEvent> {
    let mut events = Vec::new();

    // 1. Session completion, capped per calendar date. The cap is tracked
    // per date so an interleaved backdated session never resets it.
    let awarded_today = state
        .stats
        .session_fp_by_date
        .get(ctx.session_date)
        .copied()
        .unwrap_or(0);
    let remaining = DAILY_SESSION_CAP.saturating_sub(awarded_today);
    if remaining > 0 {
        let points = SESSION_POINTS.min(remaining);
        *state
            .stats
            .session_fp_by_date
            .entry(ctx.session_date.to_string())
            .or_insert(0) += points;
        while state.stats.session_fp_by_date.len() > SESSION_FP_WINDOW_DAYS {
            state.stats.session_fp_by_date.pop_first();
        }
        add(state, &mut events, EventKind::SessionComplete, points, ctx.now, None);
    }

    // 2. Full plan day completed
    if ctx.planned_exercise_count > 0
        && ctx.session_exercise_count >= ctx.planned_exercise_count
    {
        add(state, &mut events, EventKind::FullDayComplete, FULL_DAY_POINTS, ctx.now, None);
    }

    // 3. PRs (already capped at 5 by the metrics pass)
    for _ in 0..ctx.metrics.pr_count {
        add(state, &mut events, EventKind::PersonalRecord, PR_POINTS, ctx.now, None);
    }

    // 4–5. Progressive overload
    for _ in 0..ctx.metrics.weight_overloads {
        add(state, &mut events, EventKind::WeightIncrease, WEIGHT_INCREASE_POINTS, ctx.now, None);
    }
    for _ in 0..ctx.metrics.rep_overloads {
        add(state, &mut events, EventKind::RepIncrease, REP_INCREASE_POINTS, ctx.now, None);
    }

    // 6. Perfect week — once per week key, ever
    if ctx.week.perfect {
        let award_key = format!("perfect_week:{}", ctx.week.week_key);
        if !state.is_awarded(&award_key) {
            state.mark_awarded(&award_key, ctx.now);
            add(
                state,
                &mut events,
                EventKind::PerfectWeek,
                PERFECT_WEEK_POINTS,
                ctx.now,
                Some(ctx.week.week_key.clone()),
            );
        }
    }

    // 7. Streak milestones — each at most once ever, even after resets
    for &(days, points) in STREAK_MILESTONES {
        if ctx.streak_days >= days {
            let key = EventKind::Streak(days).key();
            if !state.is_awarded(&key) {
                state.mark_awarded(&key, ctx.now);
                add(state, &mut events, EventKind::Streak(days), points, ctx.now, None);
            }
        }
    }

    // 8. First workout ever
    if state.stats.total_sessions == 1 {
        add(state, &mut events, EventKind::FirstWorkout, FIRST_WORKOUT_POINTS, ctx.now, None);
    }

    // 9. Profile setup bonus, once, requires a fitness level
    if !state.stats.profile_setup_awarded && ctx.has_fitness_level {
        state.stats.profile_setup_awarded = true;
        add(state, &mut events, EventKind::ProfileSetup, PROFILE_SETUP_POINTS, ctx.now, None);
    }

    events
}

fn add(
    state: &mut GamificationState,
    events: &mut Vec<PointEvent>,
    event: EventKind,
    points: u32,
    now: &str,
    week_key: Option<String>,
) {
    let ev = PointEvent {
        event,
        points,
        timestamp: now.to_string(),
        week_key,
    };
    events.push(ev.clone());
    state.push_event(ev);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(perfect: bool) -> WeekStatus {
        WeekStatus {
            week_key: "2025-06-02".to_string(),
            perfect,
            newly_recorded: perfect,
        }
    }

    fn ctx<'a>(metrics: &'a SessionMetrics, w: &'a WeekStatus) -> LedgerContext<'a> {
        LedgerContext {
            metrics,
            session_exercise_count: 0,
            planned_exercise_count: 0,
            session_date: "2025-06-02",
            week: w,
            streak_days: 1,
            has_fitness_level: false,
            now: "2025-06-02T18:00:00+00:00",
        }
    }

    fn points_for(events: &[PointEvent], kind: &EventKind) -> u32 {
        events.iter().filter(|e| &e.event == kind).map(|e| e.points).sum()
    }

    #[test]
    fn daily_session_cap_holds_across_many_sessions() {
        let mut state = GamificationState::new();
        let metrics = SessionMetrics::default();
        let w = week(false);
        let mut day_total = 0;
        for _ in 0..4 {
            state.stats.total_sessions += 1;
            let events = run(&mut state, &ctx(&metrics, &w));
            day_total += points_for(&events, &EventKind::SessionComplete);
        }
        assert_eq!(day_total, DAILY_SESSION_CAP);
        // Third and fourth sessions earned nothing from completion
        assert_eq!(state.stats.session_fp_by_date["2025-06-02"], DAILY_SESSION_CAP);
    }

    #[test]
    fn backdated_session_does_not_reopen_the_cap() {
        let mut state = GamificationState::new();
        let metrics = SessionMetrics::default();
        let w = week(false);

        // Two sessions today exhaust the cap
        let mut today = ctx(&metrics, &w);
        today.session_date = "2025-06-03";
        state.stats.total_sessions = 1;
        run(&mut state, &today);
        state.stats.total_sessions = 2;
        run(&mut state, &today);

        // A backdated session for yesterday earns its own day's FP
        let mut yesterday = ctx(&metrics, &w);
        yesterday.session_date = "2025-06-02";
        state.stats.total_sessions = 3;
        let back = run(&mut state, &yesterday);
        assert_eq!(points_for(&back, &EventKind::SessionComplete), SESSION_POINTS);

        // Today's cap is still exhausted
        state.stats.total_sessions = 4;
        let third_today = run(&mut state, &today);
        assert_eq!(points_for(&third_today, &EventKind::SessionComplete), 0);
        assert_eq!(state.stats.session_fp_by_date["2025-06-03"], DAILY_SESSION_CAP);
    }

    #[test]
    fn cap_bookkeeping_window_is_bounded() {
        let mut state = GamificationState::new();
        state.stats.total_sessions = 1;
        let metrics = SessionMetrics::default();
        let w = week(false);
        let dates: Vec<String> =
            (1..=SESSION_FP_WINDOW_DAYS as u32 + 5).map(|i| format!("2025-07-{:02}", i)).collect();
        for date in &dates {
            let mut c = ctx(&metrics, &w);
            c.session_date = date;
            run(&mut state, &c);
        }
        assert_eq!(state.stats.session_fp_by_date.len(), SESSION_FP_WINDOW_DAYS);
        // Oldest dates evicted first
        assert!(!state.stats.session_fp_by_date.contains_key("2025-07-01"));
        assert!(state.stats.session_fp_by_date.contains_key(dates.last().unwrap().as_str()));
    }

    #[test]
    fn cap_resets_on_a_new_day() {
        let mut state = GamificationState::new();
        let metrics = SessionMetrics::default();
        let w = week(false);
        state.stats.total_sessions = 1;
        run(&mut state, &ctx(&metrics, &w));
        run(&mut state, &ctx(&metrics, &w));

        let mut next_day = ctx(&metrics, &w);
        next_day.session_date = "2025-06-03";
        let events = run(&mut state, &next_day);
        assert_eq!(points_for(&events, &EventKind::SessionComplete), SESSION_POINTS);
    }

    #[test]
    fn first_session_scenario_totals_100() {
        let mut state = GamificationState::new();
        state.stats.total_sessions = 1;
        let metrics = SessionMetrics::default();
        let w = week(false);
        let events = run(&mut state, &ctx(&metrics, &w));
        assert_eq!(events.len(), 2);
        assert_eq!(points_for(&events, &EventKind::SessionComplete), 50);
        assert_eq!(points_for(&events, &EventKind::FirstWorkout), 50);
        assert_eq!(state.total_points, 100);
    }

    #[test]
    fn pr_and_overload_awards_scale_with_counts() {
        let mut state = GamificationState::new();
        state.stats.total_sessions = 2;
        let metrics = SessionMetrics {
            pr_count: 2,
            weight_overloads: 1,
            rep_overloads: 1,
            ..SessionMetrics::default()
        };
        let w = week(false);
        let events = run(&mut state, &ctx(&metrics, &w));
        assert_eq!(points_for(&events, &EventKind::PersonalRecord), 200);
        assert_eq!(points_for(&events, &EventKind::WeightIncrease), 30);
        assert_eq!(points_for(&events, &EventKind::RepIncrease), 20);
    }

    #[test]
    fn perfect_week_pays_once_per_week_key() {
        let mut state = GamificationState::new();
        state.stats.total_sessions = 5;
        let metrics = SessionMetrics::default();
        let w = week(true);
        let first = run(&mut state, &ctx(&metrics, &w));
        assert_eq!(points_for(&first, &EventKind::PerfectWeek), PERFECT_WEEK_POINTS);
        assert_eq!(
            first.iter().find(|e| e.event == EventKind::PerfectWeek).unwrap().week_key,
            Some("2025-06-02".to_string())
        );
        let second = run(&mut state, &ctx(&metrics, &w));
        assert_eq!(points_for(&second, &EventKind::PerfectWeek), 0);
    }

    #[test]
    fn streak_milestones_never_repeat() {
        let mut state = GamificationState::new();
        state.stats.total_sessions = 10;
        let metrics = SessionMetrics::default();
        let w = week(false);

        let mut c = ctx(&metrics, &w);
        c.streak_days = 7;
        let first = run(&mut state, &c);
        assert_eq!(points_for(&first, &EventKind::Streak(7)), 150);

        // Streak resets, regrows past 7 — no second payout
        let mut c = ctx(&metrics, &w);
        c.streak_days = 9;
        c.session_date = "2025-06-20";
        let again = run(&mut state, &c);
        assert_eq!(points_for(&again, &EventKind::Streak(7)), 0);
    }

    #[test]
    fn thirty_day_streak_pays_all_reached_milestones() {
        let mut state = GamificationState::new();
        state.stats.total_sessions = 30;
        let metrics = SessionMetrics::default();
        let w = week(false);
        let mut c = ctx(&metrics, &w);
        c.streak_days = 30;
        let events = run(&mut state, &c);
        assert_eq!(points_for(&events, &EventKind::Streak(7)), 150);
        assert_eq!(points_for(&events, &EventKind::Streak(30)), 500);
        assert_eq!(points_for(&events, &EventKind::Streak(90)), 0);
    }

    #[test]
    fn profile_bonus_needs_level_and_is_one_time() {
        let mut state = GamificationState::new();
        state.stats.total_sessions = 2;
        let metrics = SessionMetrics::default();
        let w = week(false);

        let without = run(&mut state, &ctx(&metrics, &w));
        assert_eq!(points_for(&without, &EventKind::ProfileSetup), 0);

        let mut c = ctx(&metrics, &w);
        c.has_fitness_level = true;
        let with = run(&mut state, &c);
        assert_eq!(points_for(&with, &EventKind::ProfileSetup), PROFILE_SETUP_POINTS);

        let repeat = run(&mut state, &c);
        assert_eq!(points_for(&repeat, &EventKind::ProfileSetup), 0);
    }

    #[test]
    fn full_day_bonus_requires_a_nonempty_plan() {
        let mut state = GamificationState::new();
        state.stats.total_sessions = 2;
        let metrics = SessionMetrics::default();
        let w = week(false);

        let mut c = ctx(&metrics, &w);
        c.session_exercise_count = 4;
        c.planned_exercise_count = 4;
        let events = run(&mut state, &c);
        assert_eq!(points_for(&events, &EventKind::FullDayComplete), FULL_DAY_POINTS);

        let mut c = ctx(&metrics, &w);
        c.session_exercise_count = 3;
        c.planned_exercise_count = 4;
        let short = run(&mut state, &c);
        assert_eq!(points_for(&short, &EventKind::FullDayComplete), 0);
    }
}
