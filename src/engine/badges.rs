//! Badge Evaluator — a declarative catalog of one-time unlocks.
//!
//! Each badge is a predicate over an immutable snapshot of post-ledger
//! stats and session signals. Earned badges are skipped on re-evaluation;
//! the locked→earned transition is one-way.

use chrono::{Datelike, NaiveDate};

use crate::models::badge::{Badge, BadgeCategory};
use crate::models::EarnedBadge;

/// Snapshot of everything badge predicates may look at. Built by the
/// processor after the ledger pass, never mutated during evaluation.
#[derive(Debug, Clone)]
pub struct BadgeContext {
    pub total_sessions: u32,
    pub total_prs: u32,
    pub total_progressive_exercises: u32,
    pub total_volume: f64,
    pub plans_completed: u32,
    pub bodyweight_only_sessions: u32,
    pub monday_streak: u32,
    pub streak_days: u32,
    pub perfect_weeks: u32,
    pub perfect_weeks_this_month: u32,
    pub session_date: NaiveDate,
    /// Hour of completion (local), None when the timestamp didn't parse
    pub session_hour: Option<u32>,
    pub session_duration_min: u32,
    pub avg_rpe: Option<f64>,
    pub is_birthday: bool,
    pub overachiever: bool,
    pub session_pr_count: u32,
    pub max_repeat_session: u32,
    pub comeback: bool,
}

pub struct BadgeDef {
    pub badge: Badge,
    pub unlocked: fn(&BadgeContext) -> bool,
}

macro_rules! badge {
    ($id:literal, $name:literal, $desc:literal, $cat:ident, $hidden:literal,
     $points:literal, $icon:literal, $flavour:literal, $pred:expr) => {
        BadgeDef {
            badge: Badge {
                id: $id,
                name: $name,
                description: $desc,
                category: BadgeCategory::$cat,
                is_hidden: $hidden,
                points_awarded: $points,
                icon: $icon,
                flavour_text: $flavour,
            },
            unlocked: $pred,
        }
    };
}

pub static BADGES: &[BadgeDef] = &[
    // ── Consistency ──────────────────────────────────────────────────────
    badge!("first_rep", "First Rep", "Log your first workout session.",
        Consistency, false, 25, "🏁",
        "Every forge starts cold.",
        |c| c.total_sessions >= 1),
    badge!("showing_up", "Showing Up", "Log 10 workout sessions.",
        Consistency, false, 75, "📅",
        "Half the battle, all of the habit.",
        |c| c.total_sessions >= 10),
    badge!("habitual", "Habitual", "Log 25 workout sessions.",
        Consistency, false, 150, "🔄",
        "This is just what you do now.",
        |c| c.total_sessions >= 25),
    badge!("century", "Century", "Log 100 workout sessions.",
        Consistency, false, 500, "💯",
        "Three digits of dedication.",
        |c| c.total_sessions >= 100),
    badge!("iron_commitment", "Iron Commitment", "Log 250 workout sessions.",
        Consistency, false, 1000, "⛓",
        "The iron knows your name.",
        |c| c.total_sessions >= 250),
    badge!("perfect_week", "Perfect Week", "Hit your weekly session target.",
        Consistency, false, 100, "✨",
        "Seven days, zero excuses.",
        |c| c.perfect_weeks >= 1),
    badge!("flawless_month", "Flawless Month", "Four perfect weeks in one calendar month.",
        Consistency, false, 400, "🗓",
        "A month without a missed beat.",
        |c| c.perfect_weeks_this_month >= 4),
    // ── Strength ─────────────────────────────────────────────────────────
    badge!("first_pr", "First PR", "Set your first personal record.",
        Strength, false, 50, "📈",
        "The first of many.",
        |c| c.total_prs >= 1),
    badge!("record_breaker", "Record Breaker", "Set 10 personal records.",
        Strength, false, 200, "🏆",
        "Records exist to be rewritten.",
        |c| c.total_prs >= 10),
    badge!("pr_machine", "PR Machine", "Set 50 personal records.",
        Strength, false, 750, "🤖",
        "Beep boop, new record detected.",
        |c| c.total_prs >= 50),
    badge!("progresser", "Progresser", "Achieve progressive overload on 5 exercises.",
        Strength, false, 150, "📊",
        "Heavier, or more. Always forward.",
        |c| c.total_progressive_exercises >= 5),
    badge!("volume_king", "Volume King", "Move 1,000,000 lbs of lifetime volume.",
        Strength, false, 1000, "🏔",
        "You have lifted a small mountain.",
        |c| c.total_volume >= 1_000_000.0),
    // ── Plans ────────────────────────────────────────────────────────────
    badge!("plan_graduate", "Plan Graduate", "Complete a full workout plan.",
        Plans, false, 200, "🎓",
        "Saw it through to the last day.",
        |c| c.plans_completed >= 1),
    badge!("double_down", "Double Down", "Complete 2 workout plans.",
        Plans, false, 300, "✌",
        "Once is a feat. Twice is a pattern.",
        |c| c.plans_completed >= 2),
    badge!("program_collector", "Program Collector", "Complete 5 workout plans.",
        Plans, false, 750, "📚",
        "A library of finished programs.",
        |c| c.plans_completed >= 5),
    // ── Streaks ──────────────────────────────────────────────────────────
    badge!("week_warrior", "Week Warrior", "Train 7 days in a row.",
        Streaks, false, 150, "🔥",
        "One week, no gaps.",
        |c| c.streak_days >= 7),
    badge!("monthly_grind", "Monthly Grind", "Train 30 days in a row.",
        Streaks, false, 500, "🌙",
        "A full month on the anvil.",
        |c| c.streak_days >= 30),
    badge!("quarterly_athlete", "Quarterly Athlete", "Train 90 days in a row.",
        Streaks, false, 1500, "🌊",
        "A season of showing up.",
        |c| c.streak_days >= 90),
    badge!("year_of_iron", "Year of Iron", "Train 365 days in a row.",
        Streaks, false, 5000, "🗿",
        "A full lap of the sun, every single day.",
        |c| c.streak_days >= 365),
    // ── Secret ───────────────────────────────────────────────────────────
    badge!("night_owl", "Night Owl", "Finish a workout between midnight and 5 AM.",
        Secret, true, 150, "🦉",
        "The gym is quietest at 3 AM.",
        |c| matches!(c.session_hour, Some(h) if h < 5)),
    badge!("early_bird", "Early Bird", "Finish a workout between 5 and 6 AM.",
        Secret, true, 150, "🐦",
        "Beat the sunrise to the rack.",
        |c| matches!(c.session_hour, Some(5))),
    badge!("birthday_gains", "Birthday Gains", "Train on your birthday.",
        Secret, true, 250, "🎂",
        "Another year heavier.",
        |c| c.is_birthday),
    badge!("new_year_lifts", "New Year Lifts", "Train on January 1st.",
        Secret, true, 250, "🎆",
        "Resolution: kept.",
        |c| c.session_date.month() == 1 && c.session_date.day() == 1),
    badge!("dead_of_winter", "Dead of Winter", "Train on the winter solstice.",
        Secret, true, 250, "❄",
        "Shortest day, longest session.",
        |c| c.session_date.month() == 12 && c.session_date.day() == 21),
    badge!("monday_warrior", "Monday Warrior", "Train 4 Mondays in a row.",
        Secret, true, 200, "🛡",
        "The hardest day, conquered weekly.",
        |c| c.monday_streak >= 4),
    badge!("comeback_kid", "Comeback Kid", "Return after 14+ days away.",
        Secret, true, 200, "🪃",
        "The comeback is always stronger.",
        |c| c.comeback),
    badge!("the_long_haul", "The Long Haul", "Finish a session of 90+ minutes.",
        Secret, true, 150, "⏳",
        "Time under tension, and then some.",
        |c| c.session_duration_min >= 90),
    badge!("quick_draw", "Quick Draw", "Finish a session in under 30 minutes.",
        Secret, true, 100, "⚡",
        "In, out, done.",
        |c| c.session_duration_min > 0 && c.session_duration_min < 30),
    badge!("max_effort", "Max Effort", "Average RPE 9 or higher across a session.",
        Secret, true, 150, "🥵",
        "Nothing left in the tank.",
        |c| matches!(c.avg_rpe, Some(r) if r >= 9.0)),
    badge!("easy_sunday", "Easy Sunday", "Average RPE 4 or lower across a session.",
        Secret, true, 100, "🛋",
        "Active recovery still counts.",
        |c| matches!(c.avg_rpe, Some(r) if r <= 4.0)),
    badge!("the_purist", "The Purist", "Log 10 bodyweight-only sessions.",
        Secret, true, 300, "🤸",
        "No iron required.",
        |c| c.bodyweight_only_sessions >= 10),
    badge!("overachiever", "Overachiever", "Do more sets than planned on every exercise.",
        Secret, true, 200, "➕",
        "The plan was a floor, not a ceiling.",
        |c| c.overachiever),
    badge!("triple_threat", "Triple Threat", "Set 3 personal records in one session.",
        Secret, true, 300, "🎯",
        "Three records, one session.",
        |c| c.session_pr_count >= 3),
    badge!("groundhog_gains", "Groundhog Gains", "Repeat the same plan day 5 times.",
        Secret, true, 250, "🐿",
        "Same day, better you.",
        |c| c.max_repeat_session >= 5),
];

pub fn all() -> &'static [BadgeDef] {
    BADGES
}

pub fn by_id(id: &str) -> Option<&'static BadgeDef> {
    BADGES.iter().find(|def| def.badge.id == id)
}

/// Evaluate the whole catalog against a snapshot, skipping already-earned
/// badges. Returns newly unlocked definitions in catalog order.
pub fn newly_unlocked(ctx: &BadgeContext, earned: &[EarnedBadge]) -> Vec<&'static BadgeDef> {
    BADGES
        .iter()
        .filter(|def| !earned.iter().any(|e| e.badge_id == def.badge.id))
        .filter(|def| (def.unlocked)(ctx))
        .collect()
}
