use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Audit window for the FP event log. The running total is the source of
/// truth; the log keeps only the most recent entries.
pub const HISTORY_LIMIT: usize = 100;
/// Bound on the stored active-day list (oldest dropped first).
pub const ACTIVE_DAYS_LIMIT: usize = 400;

// ─── FP events ───────────────────────────────────────────────────────────────

/// A point-earning event kind. Stored as a plain string in the document
/// (badge bonuses encode as "badge_<id>").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EventKind {
    SessionComplete,
    FullDayComplete,
    PersonalRecord,
    WeightIncrease,
    RepIncrease,
    PerfectWeek,
    /// Streak milestone at N days (7, 30, 90)
    Streak(u32),
    FirstWorkout,
    ProfileSetup,
    Badge(String),
}

impl EventKind {
    pub fn key(&self) -> String {
        match self {
            EventKind::SessionComplete => "session_complete".to_string(),
            EventKind::FullDayComplete => "full_day_complete".to_string(),
            EventKind::PersonalRecord => "personal_record".to_string(),
            EventKind::WeightIncrease => "weight_increase".to_string(),
            EventKind::RepIncrease => "rep_increase".to_string(),
            EventKind::PerfectWeek => "perfect_week".to_string(),
            EventKind::Streak(days) => format!("streak_{}", days),
            EventKind::FirstWorkout => "first_workout".to_string(),
            EventKind::ProfileSetup => "profile_setup".to_string(),
            EventKind::Badge(id) => format!("badge_{}", id),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            EventKind::SessionComplete => "Session complete".to_string(),
            EventKind::FullDayComplete => "Full day completed".to_string(),
            EventKind::PersonalRecord => "Personal record".to_string(),
            EventKind::WeightIncrease => "Weight increase".to_string(),
            EventKind::RepIncrease => "Rep increase".to_string(),
            EventKind::PerfectWeek => "Perfect week".to_string(),
            EventKind::Streak(days) => format!("{}-day streak", days),
            EventKind::FirstWorkout => "First workout".to_string(),
            EventKind::ProfileSetup => "Profile setup".to_string(),
            EventKind::Badge(id) => format!("Badge: {}", id),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> String {
        kind.key()
    }
}

impl TryFrom<String> for EventKind {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for EventKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(id) = s.strip_prefix("badge_") {
            return Ok(EventKind::Badge(id.to_string()));
        }
        if let Some(days) = s.strip_prefix("streak_") {
            let days: u32 = days
                .parse()
                .map_err(|_| anyhow::anyhow!("Bad streak event '{}'", s))?;
            return Ok(EventKind::Streak(days));
        }
        match s {
            "session_complete" => Ok(EventKind::SessionComplete),
            "full_day_complete" => Ok(EventKind::FullDayComplete),
            "personal_record" => Ok(EventKind::PersonalRecord),
            "weight_increase" => Ok(EventKind::WeightIncrease),
            "rep_increase" => Ok(EventKind::RepIncrease),
            "perfect_week" => Ok(EventKind::PerfectWeek),
            "first_workout" => Ok(EventKind::FirstWorkout),
            "profile_setup" => Ok(EventKind::ProfileSetup),
            _ => Err(anyhow::anyhow!("Unknown event kind: {}", s)),
        }
    }
}

/// Immutable once appended to the history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointEvent {
    pub event: EventKind,
    pub points: u32,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarnedBadge {
    pub badge_id: String,
    pub earned_at: String,
}

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreakData {
    #[serde(default)]
    pub current_streak_days: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub last_active_date: Option<String>,
    #[serde(default)]
    pub active_days: Vec<String>,
}

/// Free-form counter bag accumulated across all sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub total_sessions: u32,
    /// Lifetime volume in lbs
    #[serde(default)]
    pub total_volume: f64,
    #[serde(default)]
    pub total_prs: u32,
    /// Distinct overload detections (one per exercise per session)
    #[serde(default)]
    pub total_progressive_exercises: u32,
    #[serde(default)]
    pub plans_completed: u32,
    #[serde(default)]
    pub bodyweight_only_sessions: u32,
    /// Consecutive Mondays with a workout
    #[serde(default)]
    pub monday_streak: u32,
    #[serde(default)]
    pub last_monday_date: Option<String>,
    /// "<plan_id>_<day_label>" → times that exact plan day was logged
    #[serde(default)]
    pub repeat_sessions: BTreeMap<String, u32>,
    /// Monday keys of weeks already counted as perfect
    #[serde(default)]
    pub perfect_week_dates: Vec<String>,
    #[serde(default)]
    pub profile_setup_awarded: bool,
    /// session_complete FP already awarded per date, a bounded window so
    /// backdated sessions can't reopen an exhausted day's cap
    #[serde(default)]
    pub session_fp_by_date: BTreeMap<String, u32>,
}

/// The one-per-user gamification document. Mutated only by the per-session
/// processing pipeline and persisted atomically under a revision check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GamificationState {
    #[serde(default)]
    pub total_points: u64,
    /// Derived — always rank_for_points(total_points).level
    #[serde(default)]
    pub current_rank: u8,
    #[serde(default)]
    pub points_history: Vec<PointEvent>,
    #[serde(default)]
    pub earned_badges: Vec<EarnedBadge>,
    #[serde(default)]
    pub streak: StreakData,
    #[serde(default)]
    pub perfect_weeks: u32,
    #[serde(default)]
    pub weekly_session_target: u32,
    /// One-time award key → timestamp. O(1) idempotence checks for streak
    /// milestones, per-week perfect-week bonuses and the profile bonus,
    /// independent of the trimmed event history.
    #[serde(default)]
    pub awarded: BTreeMap<String, String>,
    #[serde(default)]
    pub stats: Stats,
}

impl GamificationState {
    pub fn new() -> Self {
        Self {
            current_rank: 1,
            weekly_session_target: 4,
            ..Self::default()
        }
    }

    /// Append an FP event, add its points to the total, and trim the
    /// history ring buffer.
    pub fn push_event(&mut self, event: PointEvent) {
        self.total_points += event.points as u64;
        self.points_history.push(event);
        if self.points_history.len() > HISTORY_LIMIT {
            let excess = self.points_history.len() - HISTORY_LIMIT;
            self.points_history.drain(..excess);
        }
    }

    pub fn is_awarded(&self, key: &str) -> bool {
        self.awarded.contains_key(key)
    }

    pub fn mark_awarded(&mut self, key: &str, timestamp: &str) {
        self.awarded
            .entry(key.to_string())
            .or_insert_with(|| timestamp.to_string());
    }

    pub fn has_badge(&self, badge_id: &str) -> bool {
        self.earned_badges.iter().any(|b| b.badge_id == badge_id)
    }
}
