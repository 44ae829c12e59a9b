use serde::{Deserialize, Deserializer, Serialize};

/// One logged set. Missing or malformed numbers deserialize to zero —
/// a bad set must never block logging or point calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetEntry {
    #[serde(default, deserialize_with = "reps_or_zero")]
    pub reps: u32,
    #[serde(default, deserialize_with = "weight_or_zero")]
    pub weight: f64,
    #[serde(default, deserialize_with = "rpe_or_none")]
    pub rpe: Option<f64>,
}

/// Best-effort numeric read of a JSON value: numbers pass through,
/// numeric strings parse, everything else (null, booleans, garbage text,
/// NaN/inf) yields None.
fn lenient_number(value: &serde_json::Value) -> Option<f64> {
    let n = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) if s.trim().is_empty() => 0.0,
        serde_json::Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn reps_or_zero<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
    let value = serde_json::Value::deserialize(de)?;
    Ok(lenient_number(&value)
        .filter(|n| *n >= 0.0)
        .map(|n| n as u32)
        .unwrap_or(0))
}

fn weight_or_zero<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    let value = serde_json::Value::deserialize(de)?;
    Ok(lenient_number(&value).unwrap_or(0.0))
}

fn rpe_or_none<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    let value = serde_json::Value::deserialize(de)?;
    Ok(lenient_number(&value))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub sets: Vec<SetEntry>,
}

impl Exercise {
    /// Heaviest weight lifted across all sets.
    pub fn max_weight(&self) -> f64 {
        self.sets.iter().map(|s| s.weight).fold(0.0, f64::max)
    }

    /// Highest rep count across all sets.
    pub fn max_reps(&self) -> u32 {
        self.sets.iter().map(|s| s.reps).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing)]
    pub id: Option<i64>,
    /// "YYYY-MM-DD" — daily granularity for streak tracking
    #[serde(default)]
    pub date: String,
    /// RFC 3339 completion timestamp — also the dedup key against history
    #[serde(default)]
    pub completed_at: String,
    /// Minutes
    #[serde(default)]
    pub duration_min: u32,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub day_index: Option<usize>,
    #[serde(default)]
    pub day_label: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl Session {
    /// Fill in date/completion time for sessions logged without them.
    pub fn normalize(mut self, today: &str, now_iso: &str) -> Self {
        if self.date.is_empty() {
            self.date = today.to_string();
        }
        if self.completed_at.is_empty() {
            self.completed_at = now_iso.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_set_values() {
        let ex = Exercise {
            name: "Barbell Bench Press".into(),
            sets: vec![
                SetEntry { reps: 8, weight: 135.0, rpe: Some(7.0) },
                SetEntry { reps: 5, weight: 185.0, rpe: Some(9.0) },
                SetEntry { reps: 10, weight: 115.0, rpe: None },
            ],
        };
        assert_eq!(ex.max_weight(), 185.0);
        assert_eq!(ex.max_reps(), 10);
    }

    #[test]
    fn empty_exercise_is_zero() {
        let ex = Exercise { name: "Plank".into(), sets: vec![] };
        assert_eq!(ex.max_weight(), 0.0);
        assert_eq!(ex.max_reps(), 0);
    }

    #[test]
    fn malformed_sets_deserialize_to_zero() {
        let ex: Exercise =
            serde_json::from_str(r#"{"name": "Push-Up", "sets": [{}]}"#).unwrap();
        assert_eq!(ex.sets[0].reps, 0);
        assert_eq!(ex.sets[0].weight, 0.0);
        assert!(ex.sets[0].rpe.is_none());
    }

    #[test]
    fn non_numeric_set_values_coerce_instead_of_failing() {
        let ex: Exercise = serde_json::from_str(
            r#"{"name": "Push-Up", "sets": [
                {"reps": "five", "weight": "heavy", "rpe": "hard"},
                {"reps": null, "weight": null, "rpe": null},
                {"reps": "12", "weight": "45.5", "rpe": 8},
                {"reps": -3, "weight": true, "rpe": ""}
            ]}"#,
        )
        .unwrap();

        assert_eq!(ex.sets[0].reps, 0);
        assert_eq!(ex.sets[0].weight, 0.0);
        assert!(ex.sets[0].rpe.is_none());

        assert_eq!(ex.sets[1].reps, 0);
        assert_eq!(ex.sets[1].weight, 0.0);

        // Numeric strings still count
        assert_eq!(ex.sets[2].reps, 12);
        assert_eq!(ex.sets[2].weight, 45.5);
        assert_eq!(ex.sets[2].rpe, Some(8.0));

        assert_eq!(ex.sets[3].reps, 0);
        assert_eq!(ex.sets[3].weight, 0.0);
        assert_eq!(ex.sets[3].rpe, Some(0.0)); // empty string, filtered out of averages
    }
}
