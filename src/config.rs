use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::error::RecommendError;

/// Size of the exploration tail appended to every refined set
pub const EXPLORE_TAIL_LEN: usize = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Recommender configuration
///
/// Every field may be omitted from the YAML file and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Size of the initial random sample
    pub initial_size: usize,
    /// Number of most similar items in a refined set
    pub top_k: usize,
    /// Number of similar items the display shows in refined mode
    pub max_new_recs: usize,
    pub vocabulary: VocabularyConfig,
    /// Seed for sampling and tail shuffling, entropy when absent
    pub seed: Option<u64>,
}

/// Document frequency thresholds for the vocabulary filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Minimum number of documents a term must occur in
    pub min_df: usize,
    /// Maximum fraction of documents a term may occur in
    pub max_df: f64,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            initial_size: 101,
            top_k: 8,
            max_new_recs: 8,
            vocabulary: VocabularyConfig::default(),
            seed: None,
        }
    }
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            min_df: 3,
            max_df: 0.9,
        }
    }
}

impl RecommenderConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: RecommenderConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from `recommender.yaml` if it exists, otherwise use defaults.
    pub fn load_or_default() -> Self {
        Self::load_or_default_from("recommender.yaml")
    }

    /// Load configuration from `path`, falling back to defaults.
    /// A file that exists but does not parse is reported and ignored.
    pub fn load_or_default_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::FileRead(_)) => Self::default(),
            Err(e @ ConfigError::Parse(_)) => {
                warn!(path = %path.display(), error = %e, "config ignored, using defaults");
                Self::default()
            }
        }
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.initial_size == 0 {
            return Err(RecommendError::InvalidConfig("initial_size must be positive".into()));
        }
        if self.top_k == 0 {
            return Err(RecommendError::InvalidConfig("top_k must be positive".into()));
        }
        if self.max_new_recs == 0 {
            return Err(RecommendError::InvalidConfig("max_new_recs must be positive".into()));
        }
        self.vocabulary.validate()
    }
}

impl VocabularyConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(RecommendError::InvalidConfig(format!(
                "max_df must be in (0, 1], got {}",
                self.max_df
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_config_default() {
        let config = RecommenderConfig::default();
        assert_eq!(config.initial_size, 101);
        assert_eq!(config.top_k, 8);
        assert_eq!(config.max_new_recs, 8);
        assert_eq!(config.vocabulary.min_df, 3);
        assert_eq!(config.vocabulary.max_df, 0.9);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "top_k: 5\nseed: 42\nvocabulary:\n  min_df: 2").unwrap();

        let config = RecommenderConfig::load(file.path()).unwrap();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.vocabulary.min_df, 2);
        assert_eq!(config.vocabulary.max_df, 0.9);
        assert_eq!(config.initial_size, 101);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RecommenderConfig::load("/nonexistent/recommender.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileRead(_)));
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "top_k: [not, a, number").unwrap();

        assert!(matches!(RecommenderConfig::load(file.path()), Err(ConfigError::Parse(_))));
        assert_eq!(RecommenderConfig::load_or_default_from(file.path()), RecommenderConfig::default());
        assert_eq!(
            RecommenderConfig::load_or_default_from("/nonexistent/recommender.yaml"),
            RecommenderConfig::default()
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = RecommenderConfig::default();
        config.top_k = 0;
        assert!(matches!(config.validate(), Err(RecommendError::InvalidConfig(_))));

        let mut config = RecommenderConfig::default();
        config.vocabulary.max_df = 1.5;
        assert!(matches!(config.validate(), Err(RecommendError::InvalidConfig(_))));
    }
}
