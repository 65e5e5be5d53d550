//! Portal configuration.
//!
//! Example:
//! ```toml
//! symptom_table = "tables/symptoms.toml"
//! seed = 7
//!
//! [latency]
//! chat_reply_ms = 1500
//! symptom_analysis_ms = 2000
//! ```
//!
//! Every key is optional. Missing table paths fall back to the built-in
//! tables; relative paths are resolved against the config file's directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use careportal_contracts::error::{PortalError, PortalResult};
use careportal_core::LatencyConfig;

use crate::{
    matcher::TableSymptomMatcher,
    responder::CannedResponder,
    table::{ResponseTable, SymptomTable},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub latency: LatencyConfig,

    /// Replaces the built-in symptom table.
    pub symptom_table: Option<PathBuf>,

    /// Replaces the built-in chat replies.
    pub response_table: Option<PathBuf>,

    /// Makes chat reply selection reproducible.
    pub seed: Option<u64>,
}

impl PortalConfig {
    pub fn from_toml_str(s: &str) -> PortalResult<Self> {
        toml::from_str(s).map_err(|e| PortalError::Config {
            reason: format!("failed to parse portal config TOML: {}", e),
        })
    }

    pub fn from_file(path: &Path) -> PortalResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PortalError::Config {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        let mut config = Self::from_toml_str(&contents)?;

        if let Some(base) = path.parent() {
            config.symptom_table = config.symptom_table.map(|p| base.join(p));
            config.response_table = config.response_table.map(|p| base.join(p));
        }

        debug!(path = %path.display(), "portal config loaded");
        Ok(config)
    }

    /// Build the symptom matcher this config describes.
    pub fn symptom_matcher(&self) -> PortalResult<TableSymptomMatcher> {
        let table = match &self.symptom_table {
            Some(path) => SymptomTable::from_file(path)?,
            None => SymptomTable::builtin()?,
        };
        Ok(TableSymptomMatcher::new(table))
    }

    /// Build the chat responder this config describes.
    pub fn responder(&self) -> PortalResult<CannedResponder> {
        let table = match &self.response_table {
            Some(path) => ResponseTable::from_file(path)?,
            None => ResponseTable::builtin()?,
        };
        match self.seed {
            Some(seed) => CannedResponder::seeded(table, seed),
            None => CannedResponder::new(table),
        }
    }
}
