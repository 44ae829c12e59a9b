//! Gamification State Store orchestration.
//!
//! One "process session" call loads the persisted document, re-derives
//! per-exercise baselines from recent history, runs the calculators in
//! dependency order on an in-memory copy, and writes the result back once
//! under a compare-and-set revision check.

use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Datelike, Local, NaiveDate, Timelike};
use rusqlite::Connection;

use crate::config::ProfileConfig;
use crate::db::repository::{GamificationRepo, SessionRepo};
use crate::engine::{badges, ledger, metrics, streak, weekly};
use crate::engine::metrics::ExercisePerf;
use crate::models::rank::{rank_for_points, Rank};
use crate::models::{Badge, EarnedBadge, EventKind, GamificationState, Plan, PointEvent, Session};
use crate::utils::dates::parse_date;

/// How many prior sessions feed the PR / overload baselines.
const BASELINE_SESSION_LIMIT: usize = 20;
/// CAS retries before giving up on a contended document.
const MAX_STORE_ATTEMPTS: usize = 3;

/// What a single processed session earned. Badge FP is counted in the
/// persisted total but reported separately from `new_points`.
#[derive(Debug, Default)]
pub struct SessionOutcome {
    pub new_points: u64,
    pub fp_events: Vec<PointEvent>,
    pub new_badges: Vec<&'static Badge>,
    pub rank_up: Option<&'static Rank>,
}

/// The single public entry point: run the full pipeline for one logged
/// session and persist the updated document. Recomputes from persisted
/// truth, so a failed attempt can safely be retried.
pub fn process_session(
    conn: &Connection,
    session: &Session,
    plan: Option<&Plan>,
    profile: &ProfileConfig,
) -> Result<SessionOutcome> {
    for attempt in 1..=MAX_STORE_ATTEMPTS {
        let (mut state, revision) = GamificationRepo::load_or_default(conn);

        let baselines = build_baselines(conn, session).unwrap_or_else(|err| {
            log::warn!("Failed to load previous performance, skipping PR detection: {}", err);
            BTreeMap::new()
        });

        let now = Local::now();
        let outcome = run_pipeline(&mut state, session, plan, profile, &baselines, now);

        if GamificationRepo::store(conn, &state, revision)? {
            return Ok(outcome);
        }
        log::warn!(
            "Gamification document changed underneath us (attempt {}/{}), recomputing",
            attempt,
            MAX_STORE_ATTEMPTS
        );
    }
    Err(anyhow!("Gamification document too contended; session points not recorded"))
}

/// Baselines from the most recent prior sessions: the newest occurrence of
/// an exercise fixes its best weight/reps, and every occurrence counts
/// toward its history depth. The in-flight session is excluded by its
/// completion timestamp.
fn build_baselines(
    conn: &Connection,
    current: &Session,
) -> Result<BTreeMap<String, ExercisePerf>> {
    let mut baselines: BTreeMap<String, ExercisePerf> = BTreeMap::new();
    for session in SessionRepo::recent(conn, BASELINE_SESSION_LIMIT)? {
        if session.completed_at == current.completed_at {
            continue;
        }
        for ex in &session.exercises {
            let perf = baselines.entry(ex.name.clone()).or_insert_with(|| ExercisePerf {
                max_weight: ex.max_weight(),
                max_reps: ex.max_reps(),
                session_count: 0,
            });
            perf.session_count += 1;
        }
    }
    Ok(baselines)
}

/// The pure core: everything between load and store. Takes the clock as a
/// value so tests can drive it.
pub fn run_pipeline(
    state: &mut GamificationState,
    session: &Session,
    plan: Option<&Plan>,
    profile: &ProfileConfig,
    baselines: &BTreeMap<String, ExercisePerf>,
    now: DateTime<Local>,
) -> SessionOutcome {
    let now_iso = now.to_rfc3339();
    let session_date = parse_date(&session.date).unwrap_or_else(|_| now.date_naive());
    let session_hour = DateTime::parse_from_rfc3339(&session.completed_at)
        .map(|t| t.hour())
        .ok();

    let plan_day = plan.and_then(|p| session.day_index.and_then(|i| p.day(i)));
    let planned = plan_day.map(|d| d.exercises.as_slice()).unwrap_or(&[]);

    // 1. Pure session metrics
    let m = metrics::compute(session, planned, baselines);

    // 2. Streaks (comeback observed before the reset)
    let streak_outcome = streak::apply(&mut state.streak, session_date);
    streak::apply_monday(&mut state.stats, session_date);

    // 3. Cumulative stats
    state.stats.total_sessions += 1;
    state.stats.total_volume += m.volume;
    state.stats.total_prs += m.pr_count;
    state.stats.total_progressive_exercises += m.overloaded_exercises;
    if m.bodyweight_only {
        state.stats.bodyweight_only_sessions += 1;
    }

    // 4. Repeat-day counter
    let day_label = session
        .day_label
        .clone()
        .or_else(|| plan_day.map(|d| d.day_label.clone()));
    if let (Some(plan_id), Some(label)) = (&session.plan_id, &day_label) {
        let key = format!("{}_{}", plan_id, label);
        *state.stats.repeat_sessions.entry(key).or_insert(0) += 1;
    }
    let max_repeat_session = state.stats.repeat_sessions.values().copied().max().unwrap_or(0);

    // 5. Perfect week
    let target = weekly_target(profile, state);
    state.weekly_session_target = target;
    let week = weekly::check_perfect_week(state, session_date, target);
    let perfect_weeks_this_month = weekly::perfect_weeks_in_month(state, session_date);

    // 6. Ledger
    let previous_points = state.total_points;
    let streak_days = state.streak.current_streak_days;
    let ledger_ctx = ledger::LedgerContext {
        metrics: &m,
        session_exercise_count: session.exercises.len(),
        planned_exercise_count: planned.len(),
        session_date: &session.date,
        week: &week,
        streak_days,
        has_fitness_level: profile.has_fitness_level(),
        now: &now_iso,
    };
    let fp_events = ledger::run(state, &ledger_ctx);
    let new_points: u64 = fp_events.iter().map(|e| e.points as u64).sum();

    // 7. Badges, over a snapshot of the post-ledger state
    let ctx = badges::BadgeContext {
        total_sessions: state.stats.total_sessions,
        total_prs: state.stats.total_prs,
        total_progressive_exercises: state.stats.total_progressive_exercises,
        total_volume: state.stats.total_volume,
        plans_completed: state.stats.plans_completed,
        bodyweight_only_sessions: state.stats.bodyweight_only_sessions,
        monday_streak: state.stats.monday_streak,
        streak_days: state.streak.current_streak_days,
        perfect_weeks: state.perfect_weeks,
        perfect_weeks_this_month,
        session_date,
        session_hour,
        session_duration_min: session.duration_min,
        avg_rpe: m.avg_rpe,
        is_birthday: is_birthday(profile, session_date),
        overachiever: m.overachiever,
        session_pr_count: m.pr_count,
        max_repeat_session,
        comeback: streak_outcome.comeback,
    };
    let unlocked = badges::newly_unlocked(&ctx, &state.earned_badges);
    let mut new_badges = Vec::with_capacity(unlocked.len());
    for def in unlocked {
        state.earned_badges.push(EarnedBadge {
            badge_id: def.badge.id.to_string(),
            earned_at: now_iso.clone(),
        });
        state.push_event(PointEvent {
            event: EventKind::Badge(def.badge.id.to_string()),
            points: def.badge.points_awarded,
            timestamp: now_iso.clone(),
            week_key: None,
        });
        new_badges.push(&def.badge);
    }

    // 8. Rank, after session AND badge FP
    let previous_rank = rank_for_points(previous_points);
    let final_rank = rank_for_points(state.total_points);
    state.current_rank = final_rank.level;
    let rank_up = (final_rank.level > previous_rank.level).then_some(final_rank);

    SessionOutcome {
        new_points,
        fp_events,
        new_badges,
        rank_up,
    }
}

/// Weekly session target resolution: the profile setting wins outright,
/// the stored target covers sessions processed before setup ran.
pub fn weekly_target(profile: &ProfileConfig, state: &GamificationState) -> u32 {
    if profile.days_per_week > 0 {
        profile.days_per_week
    } else if state.weekly_session_target > 0 {
        state.weekly_session_target
    } else {
        4
    }
}

fn is_birthday(profile: &ProfileConfig, session_date: NaiveDate) -> bool {
    let Some(dob) = profile.date_of_birth.as_deref().and_then(|d| parse_date(d).ok()) else {
        return false;
    };
    dob.month() == session_date.month() && dob.day() == session_date.day()
}
