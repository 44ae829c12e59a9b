pub mod settings;

pub use settings::{AppConfig, ProfileConfig};
