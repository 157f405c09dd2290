use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Cross-document sentence similarity must be strictly above this to count as support.
pub const SIMILARITY_THRESHOLD: f64 = 0.30;
/// Sentences need more than this many characters after normalization.
pub const MIN_SENTENCE_CHARS: usize = 20;
pub const MAX_CONSENSUS_ITEMS: usize = 10;
pub const MAX_DISCORDANCE_ITEMS: usize = 10;
/// Only the opening sentences of each document are discordance candidates.
pub const OPENING_SENTENCES: usize = 3;
pub const SENTENCE_MAX_FEATURES: usize = 50;
pub const DOCUMENT_MAX_FEATURES: usize = 100;
/// Placeholder score carried by every discordance item.
pub const DISCORDANCE_UNIQUENESS: f64 = 1.0;

/// Env var the CLI reads `--config` from when the flag is absent.
pub const CONFIG_ENV: &str = "CONSENSUS_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub similarity_threshold: f64,
    pub min_sentence_chars: usize,
    pub max_consensus_items: usize,
    pub max_discordance_items: usize,
    pub opening_sentences: usize,
    pub sentence_max_features: usize,
    pub document_max_features: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: SIMILARITY_THRESHOLD,
            min_sentence_chars: MIN_SENTENCE_CHARS,
            max_consensus_items: MAX_CONSENSUS_ITEMS,
            max_discordance_items: MAX_DISCORDANCE_ITEMS,
            opening_sentences: OPENING_SENTENCES,
            sentence_max_features: SENTENCE_MAX_FEATURES,
            document_max_features: DOCUMENT_MAX_FEATURES,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            bail!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            );
        }
        if self.sentence_max_features == 0 || self.document_max_features == 0 {
            bail!("max_features caps must be greater than zero");
        }
        if self.max_consensus_items == 0 || self.max_discordance_items == 0 {
            bail!("item caps must be greater than zero");
        }
        Ok(())
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let cfg: AnalysisConfig =
            serde_yaml::from_str(raw).context("parsing analysis config YAML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg = Self::from_yaml_str(&raw)
            .with_context(|| format!("invalid config {}", path.display()))?;
        debug!("Loaded analysis config - path={}, config={:?}", path.display(), cfg);
        Ok(cfg)
    }

    /// `--config` (or `CONSENSUS_CONFIG`, resolved by the CLI) > built-in defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                debug!("Using config file: {}", p.display());
                Self::load(p)
            }
            None => {
                debug!("No config file given, using built-in thresholds");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_named_constants() {
        let cfg = AnalysisConfig::default();
        assert!((cfg.similarity_threshold - 0.30).abs() < f64::EPSILON);
        assert_eq!(cfg.sentence_max_features, 50);
        assert_eq!(cfg.document_max_features, 100);
        assert_eq!(cfg.opening_sentences, 3);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let cfg = AnalysisConfig::from_yaml_str("similarity_threshold: 0.5\n").unwrap();
        assert!((cfg.similarity_threshold - 0.5).abs() < f64::EPSILON);
        assert_eq!(cfg.max_consensus_items, MAX_CONSENSUS_ITEMS);
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        assert!(AnalysisConfig::from_yaml_str("similarity_threshold: 1.5\n").is_err());
        assert!(AnalysisConfig::from_yaml_str("sentence_max_features: 0\n").is_err());
    }

    #[test]
    fn resolve_without_path_uses_defaults() {
        assert_eq!(AnalysisConfig::resolve(None).unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.yaml");
        std::fs::write(&path, "opening_sentences: 2\n").unwrap();
        let cfg = AnalysisConfig::load(&path).unwrap();
        assert_eq!(cfg.opening_sentences, 2);
    }
}
