//! Configuration management for the candidate ranker

use crate::error::{RankerError, Result};
use crate::processing::category::{default_related_groups, CategoryTable};
use crate::processing::qualification::DEFAULT_MAX_QUALIFICATION;
use crate::processing::ranker::Ranker;
use crate::processing::scorer::FitScorer;
use crate::processing::shortlist::ShortlistPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub categories: CategoryConfig,
    pub shortlist: ShortlistConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Ceiling of the qualification scale
    pub max_qualification: f64,
}

/// Related-category groups used for partial category credit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    pub related_groups: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortlistConfig {
    pub min_skill_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Csv,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_qualification: DEFAULT_MAX_QUALIFICATION,
        }
    }
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            related_groups: default_related_groups(),
        }
    }
}

impl Default for ShortlistConfig {
    fn default() -> Self {
        Self {
            min_skill_score: 0.0,
            limit: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl Config {
    /// Loads the config from `path`, or from the default location when `None`.
    /// A missing file is created with defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path);

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Config>(&content).map_err(|e| {
                RankerError::Configuration(format!(
                    "Failed to parse config {}: {}",
                    config_path.display(),
                    e
                ))
            })?
        } else {
            log::info!("No config at {}, writing defaults", config_path.display());
            let config = Self::default();
            config.save_to(&config_path)?;
            config
        };

        config.validate()?;
        Ok(config)
    }

    /// Overwrites `config_path` with defaults without reading it first, so a
    /// file that fails to parse or validate can still be repaired.
    pub fn reset(config_path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(config_path)?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("candidate-ranker")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let max = self.scoring.max_qualification;
        if !max.is_finite() || max <= 0.0 {
            return Err(RankerError::Configuration(format!(
                "scoring.max_qualification must be a positive number, got {}",
                max
            )));
        }

        let gate = self.shortlist.min_skill_score;
        if !(0.0..=100.0).contains(&gate) {
            return Err(RankerError::Configuration(format!(
                "shortlist.min_skill_score must be within 0..=100, got {}",
                gate
            )));
        }
        Ok(())
    }

    pub fn category_table(&self) -> CategoryTable {
        CategoryTable::from_groups(&self.categories.related_groups)
    }

    pub fn fit_scorer(&self) -> FitScorer {
        FitScorer::new(self.category_table(), self.scoring.max_qualification)
    }

    pub fn ranker(&self) -> Ranker {
        Ranker::new(self.fit_scorer())
    }

    pub fn shortlist_policy(&self) -> ShortlistPolicy {
        ShortlistPolicy {
            min_skill_score: self.shortlist.min_skill_score,
            limit: self.shortlist.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("related_groups"));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let text = r#"
            [categories]
            related_groups = [["Civil", "Architecture"]]
        "#;
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.scoring.max_qualification, 10.0);
        assert_eq!(config.output.format, OutputFormat::Console);

        let table = config.category_table();
        assert_eq!(table.affinity("Civil", Some("architecture")), 70.0);
        assert_eq!(table.affinity("Electronics", Some("Electrical")), 0.0);
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load(Some(path.as_path())).unwrap();
        assert!(path.exists());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_rejects_invalid_scale() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scoring]\nmax_qualification = 0.0\n").unwrap();

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, RankerError::Configuration(_)));
    }

    #[test]
    fn test_reset_repairs_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[shortlist]\nmin_skill_score = 150.0\n").unwrap();
        assert!(Config::load(Some(path.as_path())).is_err());

        let reset = Config::reset(&path).unwrap();
        assert_eq!(reset, Config::default());
        assert_eq!(Config::load(Some(path.as_path())).unwrap(), Config::default());
    }

    #[test]
    fn test_reset_repairs_unparseable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scoring\n").unwrap();

        Config::reset(&path).unwrap();
        assert!(Config::load(Some(path.as_path())).is_ok());
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scoring\nmax_qualification = ").unwrap();
        assert!(Config::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_shortlist_policy_from_config() {
        let mut config = Config::default();
        config.shortlist.min_skill_score = 25.0;
        config.shortlist.limit = Some(5);
        let policy = config.shortlist_policy();
        assert_eq!(policy.min_skill_score, 25.0);
        assert_eq!(policy.limit, Some(5));
    }
}
