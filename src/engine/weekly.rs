//! Weekly/Monthly Aggregator — perfect-week detection over Monday–Sunday
//! calendar weeks, keyed by the week's Monday date.

use chrono::NaiveDate;

use crate::models::GamificationState;
use crate::utils::dates::{date_str, month_key, week_days, week_monday};

#[derive(Debug, Clone)]
pub struct WeekStatus {
    /// Monday of the session's week, "YYYY-MM-DD"
    pub week_key: String,
    /// Session count this week met the target
    pub perfect: bool,
    /// This call recorded the week for the first time
    pub newly_recorded: bool,
}

/// Check the session's week against the target and record it (once) when
/// perfect. Expects the session date to already be in `streak.active_days`.
pub fn check_perfect_week(
    state: &mut GamificationState,
    session_date: NaiveDate,
    target: u32,
) -> WeekStatus {
    let week_key = date_str(week_monday(session_date));
    let days = week_days(session_date);

    let active_this_week = state
        .streak
        .active_days
        .iter()
        .filter(|d| days.contains(d))
        .count() as u32;
    let perfect = active_this_week >= target;

    let mut newly_recorded = false;
    if perfect && !state.stats.perfect_week_dates.contains(&week_key) {
        state.stats.perfect_week_dates.push(week_key.clone());
        state.perfect_weeks += 1;
        newly_recorded = true;
    }

    WeekStatus { week_key, perfect, newly_recorded }
}

/// Perfect weeks whose Monday falls in the session's calendar month.
/// A week spanning a month boundary counts toward its Monday's month.
pub fn perfect_weeks_in_month(state: &GamificationState, session_date: NaiveDate) -> u32 {
    let month = date_str(session_date);
    let month = month_key(&month).to_string();
    state
        .stats
        .perfect_week_dates
        .iter()
        .filter(|d| d.starts_with(&month))
        .count() as u32
}
