//! Table-driven symptom matcher.
//!
//! Matching algorithm:
//!
//! 1. Lowercase the description.
//! 2. Iterate keys in declaration order.
//! 3. Return a clone of the first matching key's candidates, unmodified.
//! 4. If no key matched → the single fallback candidate.
//!
//! There is no tokenizing, stemming or re-ranking. The matcher holds no
//! mutable state, so the same description always yields the same list.

use std::path::Path;

use tracing::{debug, warn};

use careportal_contracts::{diagnosis::DiagnosisCandidate, error::PortalResult};
use careportal_core::traits::SymptomMatcher;

use crate::table::{SymptomKey, SymptomTable};

/// A `SymptomMatcher` backed by a validated `SymptomTable`.
#[derive(Debug, Clone)]
pub struct TableSymptomMatcher {
    table: SymptomTable,
}

impl TableSymptomMatcher {
    pub fn new(table: SymptomTable) -> Self {
        Self { table }
    }

    /// Matcher over the built-in table.
    pub fn builtin() -> PortalResult<Self> {
        Ok(Self::new(SymptomTable::builtin()?))
    }

    pub fn from_file(path: &Path) -> PortalResult<Self> {
        Ok(Self::new(SymptomTable::from_file(path)?))
    }

    pub fn table(&self) -> &SymptomTable {
        &self.table
    }

    /// The key that `description` would match, if any.
    pub fn matched_key(&self, description: &str) -> Option<&SymptomKey> {
        let normalized = description.to_lowercase();
        self.table.keys.iter().find(|key| key.matches(&normalized))
    }
}

impl SymptomMatcher for TableSymptomMatcher {
    fn match_symptoms(&self, description: &str) -> Vec<DiagnosisCandidate> {
        debug!(
            description_len = description.len(),
            keys = self.table.keys.len(),
            "matching symptoms"
        );

        if let Some(key) = self.matched_key(description) {
            debug!(
                phrase = %key.phrase,
                candidates = key.candidates.len(),
                "symptom key matched"
            );
            return key.candidates.clone();
        }

        warn!("no symptom key matched; returning fallback candidate");
        vec![self.table.fallback.clone()]
    }
}
