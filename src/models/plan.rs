use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannedExercise {
    pub name: String,
    #[serde(default)]
    pub sets: u32,
    #[serde(default)]
    pub reps: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanDay {
    pub day_label: String,
    #[serde(default)]
    pub exercises: Vec<PlannedExercise>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub days: Vec<PlanDay>,
}

impl Plan {
    pub fn day(&self, index: usize) -> Option<&PlanDay> {
        self.days.get(index)
    }
}
