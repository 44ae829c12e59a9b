pub mod badges;
pub mod ledger;
pub mod metrics;
pub mod processor;
pub mod streak;
pub mod weekly;

pub use metrics::{ExercisePerf, SessionMetrics};
pub use processor::{process_session, SessionOutcome};
