pub mod library;

pub use library::{equipment_for, is_bodyweight};
