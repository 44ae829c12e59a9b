use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    Consistency,
    Strength,
    Plans,
    Streaks,
    Secret,
}

impl BadgeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeCategory::Consistency => "consistency",
            BadgeCategory::Strength => "strength",
            BadgeCategory::Plans => "plans",
            BadgeCategory::Streaks => "streaks",
            BadgeCategory::Secret => "secret",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BadgeCategory::Consistency => "Consistency",
            BadgeCategory::Strength => "Strength",
            BadgeCategory::Plans => "Plans",
            BadgeCategory::Streaks => "Streaks",
            BadgeCategory::Secret => "Secret",
        }
    }
}

/// Static catalog entry — per-user earned state lives in the
/// gamification document, not here.
#[derive(Debug, Clone)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: BadgeCategory,
    pub is_hidden: bool,
    pub points_awarded: u32,
    pub icon: &'static str,
    pub flavour_text: &'static str,
}
