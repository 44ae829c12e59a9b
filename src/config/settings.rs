use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_days_per_week() -> u32 {
    4
}
fn default_weight_unit() -> String {
    "lbs".to_string()
}

/// The user profile. `days_per_week` doubles as the weekly session target
/// for perfect-week detection; `fitness_level` gates the profile bonus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_days_per_week")]
    pub days_per_week: u32,
    /// beginner / intermediate / advanced — empty until setup runs
    #[serde(default)]
    pub fitness_level: String,
    /// "YYYY-MM-DD", used only for the birthday badge
    #[serde(default)]
    pub date_of_birth: Option<String>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            days_per_week: default_days_per_week(),
            fitness_level: String::new(),
            date_of_birth: None,
        }
    }
}

impl ProfileConfig {
    pub fn has_fitness_level(&self) -> bool {
        !self.fitness_level.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_weight_unit")]
    pub weight_unit: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            weight_unit: default_weight_unit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "fitforge")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("fitforge.db"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: AppConfig = toml::from_str(
            "[profile]\nfitness_level = \"intermediate\"\n",
        )
        .unwrap();
        assert_eq!(config.profile.days_per_week, 4);
        assert!(config.profile.has_fitness_level());
        assert_eq!(config.display.weight_unit, "lbs");
    }

    #[test]
    fn empty_fitness_level_does_not_count() {
        let profile = ProfileConfig::default();
        assert!(!profile.has_fitness_level());
        let spaced = ProfileConfig { fitness_level: "  ".to_string(), ..Default::default() };
        assert!(!spaced.has_fitness_level());
    }
}
