//! Session Metrics Calculator — pure derivations over a single session
//! plus historical per-exercise baselines. No I/O, no state mutation.

use std::collections::BTreeMap;

use crate::exercises;
use crate::models::{PlannedExercise, Session};

/// Max 5 PR awards per session, first encountered in session order.
pub const PR_CAP: u32 = 5;
/// Overload detection needs this many recorded sessions of history;
/// anything less is too noisy to call a trend.
pub const OVERLOAD_MIN_HISTORY: u32 = 3;

/// Best previously recorded numbers for one exercise.
#[derive(Debug, Clone, Default)]
pub struct ExercisePerf {
    pub max_weight: f64,
    pub max_reps: u32,
    pub session_count: u32,
}

#[derive(Debug, Clone, Default)]
pub struct SessionMetrics {
    /// Sum of weight × reps over all sets, in lbs
    pub volume: f64,
    /// Mean of positive RPE values, None when no set carries one
    pub avg_rpe: Option<f64>,
    pub bodyweight_only: bool,
    pub pr_count: u32,
    pub pr_exercises: Vec<String>,
    pub weight_overloads: u32,
    pub rep_overloads: u32,
    /// Exercises with at least one overload this session
    pub overloaded_exercises: u32,
    /// Every exercise beat its planned set count
    pub overachiever: bool,
}

pub fn compute(
    session: &Session,
    planned: &[PlannedExercise],
    previous: &BTreeMap<String, ExercisePerf>,
) -> SessionMetrics {
    let exercises = &session.exercises;

    let mut metrics = SessionMetrics {
        volume: session_volume(session),
        avg_rpe: average_rpe(session),
        bodyweight_only: is_bodyweight_session(session),
        overachiever: is_overachiever(session, planned),
        ..SessionMetrics::default()
    };

    for ex in exercises {
        let Some(prev) = previous.get(&ex.name) else {
            continue;
        };
        let max_weight = ex.max_weight();
        let max_reps = ex.max_reps();

        // PR: strictly beat the recorded best weight or reps
        if (max_weight > prev.max_weight || max_reps > prev.max_reps)
            && metrics.pr_count < PR_CAP
        {
            metrics.pr_count += 1;
            metrics.pr_exercises.push(ex.name.clone());
        }

        // Overload: weight check takes priority, one kind per exercise
        if prev.session_count >= OVERLOAD_MIN_HISTORY {
            if max_weight > prev.max_weight {
                metrics.weight_overloads += 1;
                metrics.overloaded_exercises += 1;
            } else if max_reps > prev.max_reps {
                metrics.rep_overloads += 1;
                metrics.overloaded_exercises += 1;
            }
        }
    }

    metrics
}

fn session_volume(session: &Session) -> f64 {
    session
        .exercises
        .iter()
        .flat_map(|ex| &ex.sets)
        .map(|s| s.weight * s.reps as f64)
        .sum()
}

fn average_rpe(session: &Session) -> Option<f64> {
    let rpes: Vec<f64> = session
        .exercises
        .iter()
        .flat_map(|ex| &ex.sets)
        .filter_map(|s| s.rpe)
        .filter(|r| *r > 0.0)
        .collect();
    if rpes.is_empty() {
        return None;
    }
    Some(rpes.iter().sum::<f64>() / rpes.len() as f64)
}

fn is_bodyweight_session(session: &Session) -> bool {
    if session.exercises.is_empty() {
        return false;
    }
    session
        .exercises
        .iter()
        .all(|ex| exercises::is_bodyweight(&ex.name))
}

/// More logged sets than planned on every exercise. Only meaningful when a
/// plan day exists and every session exercise has a planned counterpart.
fn is_overachiever(session: &Session, planned: &[PlannedExercise]) -> bool {
    if planned.is_empty() || session.exercises.is_empty() {
        return false;
    }
    session.exercises.iter().all(|ex| {
        planned
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(&ex.name))
            .is_some_and(|p| ex.sets.len() as u32 > p.sets)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Exercise, SetEntry};

    fn set(reps: u32, weight: f64, rpe: Option<f64>) -> SetEntry {
        SetEntry { reps, weight, rpe }
    }

    fn session_with(exercises: Vec<Exercise>) -> Session {
        Session {
            exercises,
            ..Session::default()
        }
    }

    fn perf(max_weight: f64, max_reps: u32, session_count: u32) -> ExercisePerf {
        ExercisePerf { max_weight, max_reps, session_count }
    }

    #[test]
    fn volume_sums_weight_times_reps() {
        let s = session_with(vec![Exercise {
            name: "Barbell Bench Press".into(),
            sets: vec![set(5, 100.0, None), set(5, 110.0, None)],
        }]);
        let m = compute(&s, &[], &BTreeMap::new());
        assert_eq!(m.volume, 1050.0);
    }

    #[test]
    fn rpe_ignores_missing_and_zero() {
        let s = session_with(vec![Exercise {
            name: "Barbell Curl".into(),
            sets: vec![set(8, 60.0, Some(8.0)), set(8, 60.0, Some(0.0)), set(8, 60.0, None)],
        }]);
        assert_eq!(compute(&s, &[], &BTreeMap::new()).avg_rpe, Some(8.0));

        let no_rpe = session_with(vec![Exercise {
            name: "Barbell Curl".into(),
            sets: vec![set(8, 60.0, None)],
        }]);
        assert_eq!(compute(&no_rpe, &[], &BTreeMap::new()).avg_rpe, None);
    }

    #[test]
    fn bodyweight_only_needs_every_exercise() {
        let pure = session_with(vec![
            Exercise { name: "Push-Up".into(), sets: vec![set(20, 0.0, None)] },
            Exercise { name: "Plank".into(), sets: vec![set(1, 0.0, None)] },
        ]);
        assert!(compute(&pure, &[], &BTreeMap::new()).bodyweight_only);

        let mixed = session_with(vec![
            Exercise { name: "Push-Up".into(), sets: vec![set(20, 0.0, None)] },
            Exercise { name: "Barbell Curl".into(), sets: vec![set(10, 40.0, None)] },
        ]);
        assert!(!compute(&mixed, &[], &BTreeMap::new()).bodyweight_only);

        let empty = session_with(vec![]);
        assert!(!compute(&empty, &[], &BTreeMap::new()).bodyweight_only);
    }

    #[test]
    fn pr_needs_a_baseline_and_a_strict_beat() {
        let s = session_with(vec![
            Exercise { name: "Barbell Deadlift".into(), sets: vec![set(5, 315.0, None)] },
            Exercise { name: "Barbell Curl".into(), sets: vec![set(10, 50.0, None)] },
            Exercise { name: "Leg Press".into(), sets: vec![set(10, 400.0, None)] },
        ]);
        let mut prev = BTreeMap::new();
        prev.insert("Barbell Deadlift".to_string(), perf(300.0, 5, 4)); // weight PR
        prev.insert("Barbell Curl".to_string(), perf(50.0, 10, 4)); // equal — no PR
        // Leg Press has no baseline — no PR
        let m = compute(&s, &[], &prev);
        assert_eq!(m.pr_count, 1);
        assert_eq!(m.pr_exercises, vec!["Barbell Deadlift"]);
    }

    #[test]
    fn pr_count_caps_at_five() {
        let names = ["A", "B", "C", "D", "E", "F", "G"];
        let exercises = names
            .iter()
            .map(|n| Exercise { name: n.to_string(), sets: vec![set(10, 100.0, None)] })
            .collect();
        let prev: BTreeMap<String, ExercisePerf> = names
            .iter()
            .map(|n| (n.to_string(), perf(50.0, 5, 4)))
            .collect();
        let m = compute(&session_with(exercises), &[], &prev);
        assert_eq!(m.pr_count, 5);
        assert_eq!(m.pr_exercises, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn overload_requires_three_sessions_of_history() {
        let s = session_with(vec![
            Exercise { name: "Barbell Back Squat".into(), sets: vec![set(5, 230.0, None)] },
            Exercise { name: "Leg Press".into(), sets: vec![set(12, 400.0, None)] },
        ]);
        let mut prev = BTreeMap::new();
        prev.insert("Barbell Back Squat".to_string(), perf(225.0, 5, 4));
        prev.insert("Leg Press".to_string(), perf(400.0, 10, 2)); // thin history
        let m = compute(&s, &[], &prev);
        assert_eq!(m.weight_overloads, 1);
        assert_eq!(m.rep_overloads, 0);
        assert_eq!(m.overloaded_exercises, 1);
    }

    #[test]
    fn weight_overload_takes_priority_over_reps() {
        let s = session_with(vec![Exercise {
            name: "Barbell Bench Press".into(),
            sets: vec![set(10, 200.0, None)],
        }]);
        let mut prev = BTreeMap::new();
        prev.insert("Barbell Bench Press".to_string(), perf(190.0, 8, 5));
        let m = compute(&s, &[], &prev);
        // Both weight and reps improved; only the weight increase is counted
        assert_eq!(m.weight_overloads, 1);
        assert_eq!(m.rep_overloads, 0);
        assert_eq!(m.overloaded_exercises, 1);
    }

    #[test]
    fn overachiever_needs_planned_counterparts() {
        let planned = vec![PlannedExercise { name: "Push-Up".into(), sets: 3, reps: 10 }];
        let more_sets = session_with(vec![Exercise {
            name: "Push-Up".into(),
            sets: vec![set(10, 0.0, None); 4],
        }]);
        assert!(compute(&more_sets, &planned, &BTreeMap::new()).overachiever);

        let equal_sets = session_with(vec![Exercise {
            name: "Push-Up".into(),
            sets: vec![set(10, 0.0, None); 3],
        }]);
        assert!(!compute(&equal_sets, &planned, &BTreeMap::new()).overachiever);

        let unplanned = session_with(vec![Exercise {
            name: "Burpee".into(),
            sets: vec![set(10, 0.0, None); 4],
        }]);
        assert!(!compute(&unplanned, &planned, &BTreeMap::new()).overachiever);

        // Free session (no plan) never counts
        assert!(!compute(&more_sets, &[], &BTreeMap::new()).overachiever);
    }
}
