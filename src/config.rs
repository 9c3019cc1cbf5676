use crate::{
    domain::{BoardConfig, Extractor, InsertEdge, SplitPolicy},
    error::{HandoverError, Result},
    report::ReportLabels,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};
use tokio::fs;

/// How pasted text turns into units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub split: SplitPolicy,
    pub insert: InsertEdge,
    pub strip_bullets: bool,
}

impl ExtractionConfig {
    pub fn extractor(&self) -> Extractor {
        Extractor {
            policy: self.split,
            strip_bullets: self.strip_bullets,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandoverConfig {
    /// Key the document is stored under
    pub storage_key: String,
    pub board: BoardConfig,
    pub extraction: ExtractionConfig,
    pub labels: ReportLabels,
}

impl Default for HandoverConfig {
    fn default() -> Self {
        Self {
            storage_key: Self::DEFAULT_STORAGE_KEY.to_string(),
            board: BoardConfig::default(),
            extraction: ExtractionConfig::default(),
            labels: ReportLabels::default(),
        }
    }
}

impl HandoverConfig {
    pub const DEFAULT_STORAGE_KEY: &'static str = "army_ops_update_v3";

    /// Parses and validates a TOML configuration
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML configuration file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).await?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(HandoverError::ConfigError(
                "storage_key must not be empty".to_string(),
            ));
        }
        if self.board.lanes.is_empty() {
            return Err(HandoverError::ConfigError(
                "at least one lane must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for lane in &self.board.lanes {
            if lane.id.as_str().trim().is_empty() {
                return Err(HandoverError::ConfigError(
                    "lane id must not be empty".to_string(),
                ));
            }
            if !seen.insert(&lane.id) {
                return Err(HandoverError::ConfigError(format!(
                    "duplicate lane id '{}'",
                    lane.id
                )));
            }
        }
        Ok(())
    }
}
