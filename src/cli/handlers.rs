use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::Connection;
use std::io::{self, BufRead, Write};

use crate::cli::args::PlanCommands;
use crate::config::AppConfig;
use crate::db::repository::{GamificationRepo, MetaRepo, PlanRepo, SessionRepo};
use crate::engine::badges;
use crate::engine::processor::{process_session, weekly_target};
use crate::models::rank::{next_rank, rank_for_points, rank_progress};
use crate::models::{Plan, Session};
use crate::utils::dates::{date_str, week_days};
use crate::utils::format::{format_duration_min, format_volume, progress_bar};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! print_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        print!("\x1b[0m");
    }};
}

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Setup wizard ────────────────────────────────────────────────────────────

pub fn handle_setup(conn: &Connection, config: &mut AppConfig, reset: bool) -> Result<()> {
    if !reset {
        if let Some(done) = MetaRepo::get(conn, "setup_done")? {
            if done == "1" {
                println!("FitForge is already configured. Use --reset to reconfigure.");
                return Ok(());
            }
        }
    }

    println!();
    println_colored!(GOLD, "  FitForge Setup");
    println!();

    let days = prompt("  Training days per week [4]: ")?;
    config.profile.days_per_week = if days.is_empty() {
        4
    } else {
        days.parse()
            .map_err(|_| anyhow!("'{}' is not a number", days))?
    };
    if config.profile.days_per_week == 0 || config.profile.days_per_week > 7 {
        return Err(anyhow!("Training days must be between 1 and 7"));
    }

    let level = prompt("  Fitness level (beginner/intermediate/advanced) [skip]: ")?;
    let level = level.to_lowercase();
    match level.as_str() {
        "" | "beginner" | "intermediate" | "advanced" => {
            config.profile.fitness_level = level;
        }
        other => return Err(anyhow!("Unknown fitness level '{}'", other)),
    }

    let dob = prompt("  Date of birth, YYYY-MM-DD [skip]: ")?;
    config.profile.date_of_birth = if dob.is_empty() {
        None
    } else {
        crate::utils::dates::parse_date(&dob)?;
        Some(dob)
    };

    let unit = prompt("  Weight unit (lbs/kg) [lbs]: ")?;
    match unit.as_str() {
        "" => {}
        "lbs" | "kg" => config.display.weight_unit = unit,
        other => return Err(anyhow!("Unknown weight unit '{}'", other)),
    }

    config.save()?;
    MetaRepo::set(conn, "setup_done", "1")?;
    println!();
    println_colored!(GREEN, "  ✓ Setup complete. Log your first session with: fitforge log <file>");
    println!();
    Ok(())
}

// ─── Log a session ───────────────────────────────────────────────────────────

pub fn handle_log(
    conn: &Connection,
    config: &AppConfig,
    file: &str,
    plan_id: Option<String>,
    day: Option<usize>,
) -> Result<()> {
    let raw = std::fs::read_to_string(file).with_context(|| format!("Reading {}", file))?;
    let session: Session = serde_json::from_str(&raw).context("Parsing session JSON")?;

    let now = Local::now();
    let mut session = session.normalize(&date_str(now.date_naive()), &now.to_rfc3339());
    if plan_id.is_some() {
        session.plan_id = plan_id;
    }
    if day.is_some() {
        session.day_index = day;
    }

    if session.exercises.is_empty() {
        return Err(anyhow!("Session has no exercises, nothing to log"));
    }

    let plan = match &session.plan_id {
        Some(id) => Some(
            PlanRepo::get(conn, id)?.ok_or_else(|| anyhow!("No plan with id '{}'", id))?,
        ),
        None => None,
    };

    SessionRepo::insert(conn, &session)
        .with_context(|| format!("Saving session completed at {}", session.completed_at))?;

    // The session is saved either way; a scoring failure must not undo that.
    // Reprocessing is safe, so the worst case is points arriving late.
    let outcome = match process_session(conn, &session, plan.as_ref(), &config.profile) {
        Ok(outcome) => outcome,
        Err(err) => {
            log::warn!("Session saved but scoring failed: {}", err);
            println_colored!(AMBER, "  Session saved — points could not be awarded this time");
            return Ok(());
        }
    };

    let volume: f64 = session
        .exercises
        .iter()
        .flat_map(|ex| ex.sets.iter())
        .map(|s| s.reps as f64 * s.weight)
        .sum();

    println!();
    println_colored!(
        GOLD,
        "  Session logged — {} · {} exercises · {} {} · {}",
        session.date,
        session.exercises.len(),
        format_volume(volume),
        config.display.weight_unit,
        format_duration_min(session.duration_min)
    );
    println!();

    for event in &outcome.fp_events {
        println_colored!(GREEN, "  +{:<5} {}", event.points, event.event.display_name());
    }
    if outcome.fp_events.is_empty() {
        println_colored!(DIM, "  No points this time — daily session cap reached");
    }

    for badge in &outcome.new_badges {
        println!();
        println_colored!(
            AMBER,
            "  {} Badge unlocked: {} (+{} FP)",
            badge.icon,
            badge.name,
            badge.points_awarded
        );
        println_colored!(DIM, "     {}", badge.flavour_text);
    }

    if let Some(rank) = outcome.rank_up {
        println!();
        println_colored!(BOLD, "  {} RANK UP — {} (level {})", rank.icon, rank.title, rank.level);
        println_colored!(DIM, "     {}", rank.perk);
    }

    let (state, _) = GamificationRepo::load_or_default(conn);
    println!();
    println_colored!(
        DIM,
        "  Total: {} FP · {} · streak {} days",
        state.total_points,
        rank_for_points(state.total_points).title,
        state.streak.current_streak_days
    );
    println!();
    Ok(())
}

// ─── Status ──────────────────────────────────────────────────────────────────

pub fn handle_status(conn: &Connection, config: &AppConfig) -> Result<()> {
    let (state, _) = GamificationRepo::load_or_default(conn);
    let rank = rank_for_points(state.total_points);
    let today = Local::now().date_naive();

    println!();
    println_colored!(GOLD, "  {} {} — level {}", rank.icon, rank.title, rank.level);
    println_colored!(BOLD, "  {} FP", state.total_points);
    match next_rank(rank.level) {
        Some(next) => {
            let bar = progress_bar(
                state.total_points - rank.points_required,
                next.points_required - rank.points_required,
                20,
            );
            println_colored!(
                DIM,
                "  {} {}%  →  {} at {} FP",
                bar,
                rank_progress(state.total_points),
                next.title,
                next.points_required
            );
        }
        None => println_colored!(DIM, "  Top of the ladder."),
    }

    println!();
    println_colored!(
        BOLD,
        "  Streak:   {} days current  |  {} days best",
        state.streak.current_streak_days,
        state.streak.longest_streak
    );

    let week = week_days(today);
    let this_week = week
        .iter()
        .filter(|d| state.streak.active_days.contains(d))
        .count();
    let target = weekly_target(&config.profile, &state);
    if this_week as u32 >= target {
        println_colored!(GREEN, "  Week:     {}/{} sessions ✓ perfect week", this_week, target);
    } else {
        println_colored!(AMBER, "  Week:     {}/{} sessions", this_week, target);
    }

    println!(
        "  Badges:   {} earned  |  Perfect weeks: {}",
        state.earned_badges.len(),
        state.perfect_weeks
    );
    println!();
    Ok(())
}

// ─── Badges ──────────────────────────────────────────────────────────────────

pub fn handle_badges(conn: &Connection, all: bool) -> Result<()> {
    let (state, _) = GamificationRepo::load_or_default(conn);

    println!();
    if all {
        println_colored!(GOLD, "  Badge Catalog");
        println!();
        for def in badges::all() {
            let b = &def.badge;
            if state.has_badge(b.id) {
                println_colored!(GREEN, "  ✓ {} {:<20} {}", b.icon, b.name, b.description);
            } else if b.is_hidden {
                println_colored!(DIM, "  ? {:<23} Secret badge — keep lifting", "???");
            } else {
                println_colored!(DIM, "  ○ {} {:<20} {}", b.icon, b.name, b.description);
            }
        }
    } else if state.earned_badges.is_empty() {
        println_colored!(DIM, "  No badges yet. Log sessions to start earning them.");
    } else {
        println_colored!(GOLD, "  Earned Badges ({})", state.earned_badges.len());
        println!();
        for earned in &state.earned_badges {
            // Catalog entries can disappear across versions; keep the record
            let (icon, name) = badges::by_id(&earned.badge_id)
                .map(|d| (d.badge.icon, d.badge.name))
                .unwrap_or(("•", earned.badge_id.as_str()));
            let date = earned.earned_at.chars().take(10).collect::<String>();
            println!("  {} {:<20} {}", icon, name, date);
        }
    }
    println!();
    Ok(())
}

// ─── History ─────────────────────────────────────────────────────────────────

pub fn handle_history(conn: &Connection, limit: usize) -> Result<()> {
    let (state, _) = GamificationRepo::load_or_default(conn);

    println!();
    if state.points_history.is_empty() {
        println_colored!(DIM, "  No point events yet.");
        println!();
        return Ok(());
    }

    println_colored!(GOLD, "  Recent Points");
    println!();
    for event in state.points_history.iter().rev().take(limit) {
        let date = event.timestamp.chars().take(10).collect::<String>();
        println!(
            "  {}  {}+{:<5}\x1b[0m {}",
            date,
            GREEN,
            event.points,
            event.event.display_name()
        );
    }
    println!();
    Ok(())
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(conn: &Connection, config: &AppConfig, week: bool) -> Result<()> {
    let (state, _) = GamificationRepo::load_or_default(conn);
    let s = &state.stats;

    println!();
    println_colored!(GOLD, "  Lifetime Statistics");
    println!();
    println_colored!(BOLD, "  Sessions:        {}", s.total_sessions);
    println!(
        "  Volume:          {} {}",
        format_volume(s.total_volume),
        config.display.weight_unit
    );
    println!("  PRs:             {}", s.total_prs);
    println!("  Overloads:       {}", s.total_progressive_exercises);
    println!("  Perfect weeks:   {}", state.perfect_weeks);
    println!("  Plans finished:  {}", s.plans_completed);
    if s.bodyweight_only_sessions > 0 {
        println!("  Bodyweight-only: {}", s.bodyweight_only_sessions);
    }

    if week {
        let today = Local::now().date_naive();
        let start = today - chrono::Duration::days(6);
        let dates = SessionRepo::dates_in_range(conn, &date_str(start), &date_str(today))?;
        println!();
        println_colored!(DIM, "  Last 7 days  (● = trained, ○ = rest)");
        println!();
        print!("  ");
        for offset in 0..7 {
            let day = date_str(start + chrono::Duration::days(offset));
            if dates.contains(&day) {
                print_colored!(GREEN, "● ");
            } else {
                print_colored!(DIM, "○ ");
            }
        }
        println!();
    }
    println!();
    Ok(())
}

// ─── Plans ───────────────────────────────────────────────────────────────────

pub fn handle_plan(conn: &Connection, action: &PlanCommands) -> Result<()> {
    match action {
        PlanCommands::Add { file } => {
            let raw =
                std::fs::read_to_string(file).with_context(|| format!("Reading {}", file))?;
            let plan: Plan = serde_json::from_str(&raw).context("Parsing plan JSON")?;
            if plan.id.is_empty() {
                return Err(anyhow!("Plan needs a non-empty id"));
            }
            if plan.days.is_empty() {
                return Err(anyhow!("Plan '{}' has no days", plan.id));
            }
            PlanRepo::insert(conn, &plan)?;
            println_colored!(
                GREEN,
                "  ✓ Saved plan '{}' — {} ({} days)",
                plan.id,
                plan.name,
                plan.days.len()
            );
        }
        PlanCommands::List => {
            let plans = PlanRepo::list(conn)?;
            println!();
            if plans.is_empty() {
                println_colored!(DIM, "  No plans yet. Add one with: fitforge plan add <file>");
            } else {
                println_colored!(GOLD, "  Plans");
                println!();
                for plan in &plans {
                    let exercises: usize = plan.days.iter().map(|d| d.exercises.len()).sum();
                    println!(
                        "  {:<16} {}  ({} days, {} exercises)",
                        plan.id,
                        plan.name,
                        plan.days.len(),
                        exercises
                    );
                }
            }
            println!();
        }
        PlanCommands::Complete { id } => {
            let plan =
                PlanRepo::get(conn, id)?.ok_or_else(|| anyhow!("No plan with id '{}'", id))?;
            let completed = GamificationRepo::record_plan_completion(conn)?;
            println_colored!(
                GREEN,
                "  ✓ Completed '{}' — {} plan{} finished overall",
                plan.name,
                completed,
                if completed == 1 { "" } else { "s" }
            );
        }
    }
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn handle_export(conn: &Connection, config: &AppConfig) -> Result<()> {
    let (state, _) = GamificationRepo::load_or_default(conn);
    let rank = rank_for_points(state.total_points);
    let today = Local::now().date_naive();
    let start = today - chrono::Duration::days(6);
    let dates = SessionRepo::dates_in_range(conn, &date_str(start), &date_str(today))?;

    println!("# fitforge — Progress Summary");
    println!("# {}", date_str(today));
    println!();
    println!("Rank:    {} (level {})", rank.title, rank.level);
    println!("Points:  {} FP", state.total_points);
    println!("Streak:  {} days (best: {})", state.streak.current_streak_days, state.streak.longest_streak);
    println!();
    println!("## Activity (last 7 days)");
    for offset in 0..7 {
        let day = date_str(start + chrono::Duration::days(offset));
        let mark = if dates.contains(&day) { "█" } else { "░" };
        println!("  {}  {}", day, mark);
    }
    println!();
    println!("## Totals");
    println!(
        "  Sessions: {}  |  Volume: {} {}  |  PRs: {}",
        state.stats.total_sessions,
        format_volume(state.stats.total_volume),
        config.display.weight_unit,
        state.stats.total_prs
    );
    println!(
        "  Perfect weeks: {}  |  Plans finished: {}",
        state.perfect_weeks, state.stats.plans_completed
    );
    if !state.earned_badges.is_empty() {
        println!();
        println!("## Badges ({})", state.earned_badges.len());
        for earned in &state.earned_badges {
            let name = badges::by_id(&earned.badge_id)
                .map(|d| d.badge.name)
                .unwrap_or(earned.badge_id.as_str());
            let date = earned.earned_at.chars().take(10).collect::<String>();
            println!("  {}  {}", date, name);
        }
    }
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
}
