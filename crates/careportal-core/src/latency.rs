//! Simulated latency settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Artificial delays, in milliseconds, applied before each simulated result.
///
/// Deserialized from the `[latency]` table of the portal config; any field
/// left out keeps its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub chat_reply_ms: u64,
    pub symptom_analysis_ms: u64,
    pub patient_search_ms: u64,
    pub patient_add_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            chat_reply_ms: 1500,
            symptom_analysis_ms: 2000,
            patient_search_ms: 1000,
            patient_add_ms: 1500,
        }
    }
}

impl LatencyConfig {
    /// No artificial delay anywhere. Used by `--fast` and tests.
    pub fn instant() -> Self {
        Self {
            chat_reply_ms: 0,
            symptom_analysis_ms: 0,
            patient_search_ms: 0,
            patient_add_ms: 0,
        }
    }

    pub fn chat_reply(&self) -> Duration {
        Duration::from_millis(self.chat_reply_ms)
    }

    pub fn symptom_analysis(&self) -> Duration {
        Duration::from_millis(self.symptom_analysis_ms)
    }

    pub fn patient_search(&self) -> Duration {
        Duration::from_millis(self.patient_search_ms)
    }

    pub fn patient_add(&self) -> Duration {
        Duration::from_millis(self.patient_add_ms)
    }
}
