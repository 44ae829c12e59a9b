pub mod badge;
pub mod gamification;
pub mod plan;
pub mod rank;
pub mod session;

pub use badge::{Badge, BadgeCategory};
pub use gamification::{EarnedBadge, EventKind, GamificationState, PointEvent, Stats, StreakData};
pub use plan::{Plan, PlanDay, PlannedExercise};
pub use rank::{rank_for_points, Rank, RANKS};
pub use session::{Exercise, Session, SetEntry};
