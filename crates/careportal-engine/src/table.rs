//! Lookup table types and their TOML schema.
//!
//! A `SymptomTable` holds an ordered list of `SymptomKey`s plus the fallback
//! candidate. Keys are evaluated in declaration order and the first key whose
//! phrase occurs in the description wins.
//!
//! Tables are read-only after loading. Every constructor validates the
//! content, so a table that exists is a table the matcher can rely on.

use std::path::Path;

use serde::{Deserialize, Serialize};

use careportal_contracts::{
    diagnosis::DiagnosisCandidate,
    error::{PortalError, PortalResult},
};

const BUILTIN_SYMPTOMS: &str = include_str!("../tables/symptoms.toml");
const BUILTIN_RESPONSES: &str = include_str!("../tables/responses.toml");

/// One substring trigger and the candidates it yields.
///
/// Example in TOML:
/// ```toml
/// [[keys]]
/// phrase = "fever headache"
///
///   [[keys.candidates]]
///   disease = "Common Cold"
///   probability = 0.75
///   description = "..."
///   recommendations = ["Rest"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomKey {
    /// Lowercase phrase, matched as a plain substring (not tokenized).
    pub phrase: String,

    /// Returned verbatim, in this order, when the phrase matches.
    pub candidates: Vec<DiagnosisCandidate>,
}

impl SymptomKey {
    /// Return true if `normalized` (already lowercased) contains the phrase.
    ///
    /// Word order matters: "headache and fever" does not contain
    /// "fever headache".
    pub fn matches(&self, normalized: &str) -> bool {
        normalized.contains(&self.phrase)
    }
}

/// The symptom-to-diagnosis lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomTable {
    /// Ordered keys. Earlier keys win ties.
    pub keys: Vec<SymptomKey>,

    /// The single candidate returned when no key matches.
    pub fallback: DiagnosisCandidate,
}

impl SymptomTable {
    /// Parse and validate a symptom table from TOML.
    ///
    /// Returns `Config` if the TOML is malformed and `TableValidation` if it
    /// parses but breaks a table invariant.
    pub fn from_toml_str(s: &str) -> PortalResult<Self> {
        let table: SymptomTable = toml::from_str(s).map_err(|e| PortalError::Config {
            reason: format!("failed to parse symptom table TOML: {}", e),
        })?;
        table.validate()?;
        Ok(table)
    }

    /// Read the file at `path` and parse it as a symptom table.
    pub fn from_file(path: &Path) -> PortalResult<Self> {
        Self::from_toml_str(&read_table(path)?)
    }

    /// The table shipped with the crate.
    pub fn builtin() -> PortalResult<Self> {
        Self::from_toml_str(BUILTIN_SYMPTOMS)
    }

    fn validate(&self) -> PortalResult<()> {
        for (idx, key) in self.keys.iter().enumerate() {
            if key.phrase.trim().is_empty() {
                return Err(invalid(format!("key #{} has a blank phrase", idx)));
            }
            if key.phrase != key.phrase.to_lowercase() {
                return Err(invalid(format!(
                    "phrase '{}' must be lowercase; descriptions are lowercased before matching",
                    key.phrase
                )));
            }
            if key.candidates.is_empty() {
                return Err(invalid(format!("phrase '{}' has no candidates", key.phrase)));
            }
            for candidate in &key.candidates {
                validate_candidate(candidate, &key.phrase)?;
            }
        }
        validate_candidate(&self.fallback, "fallback")
    }
}

fn validate_candidate(candidate: &DiagnosisCandidate, owner: &str) -> PortalResult<()> {
    if candidate.disease.trim().is_empty() {
        return Err(invalid(format!("'{}' has a candidate with a blank disease", owner)));
    }
    if !(0.0..=1.0).contains(&candidate.probability) {
        return Err(invalid(format!(
            "'{}' candidate '{}' has probability {} outside [0, 1]",
            owner, candidate.disease, candidate.probability
        )));
    }
    Ok(())
}

/// The canned replies for the generic chat.
///
/// Example in TOML:
/// ```toml
/// responses = ["I see. Have you experienced this before?"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTable {
    pub responses: Vec<String>,
}

impl ResponseTable {
    /// Parse and validate a response table from TOML.
    pub fn from_toml_str(s: &str) -> PortalResult<Self> {
        let table: ResponseTable = toml::from_str(s).map_err(|e| PortalError::Config {
            reason: format!("failed to parse response table TOML: {}", e),
        })?;
        table.validate()?;
        Ok(table)
    }

    /// Read the file at `path` and parse it as a response table.
    pub fn from_file(path: &Path) -> PortalResult<Self> {
        Self::from_toml_str(&read_table(path)?)
    }

    /// The replies shipped with the crate.
    pub fn builtin() -> PortalResult<Self> {
        Self::from_toml_str(BUILTIN_RESPONSES)
    }

    pub(crate) fn validate(&self) -> PortalResult<()> {
        if self.responses.is_empty() {
            return Err(invalid("response table is empty".to_string()));
        }
        if let Some(idx) = self.responses.iter().position(|r| r.trim().is_empty()) {
            return Err(invalid(format!("response #{} is blank", idx)));
        }
        Ok(())
    }
}

fn read_table(path: &Path) -> PortalResult<String> {
    std::fs::read_to_string(path).map_err(|e| PortalError::Config {
        reason: format!("failed to read table file '{}': {}", path.display(), e),
    })
}

fn invalid(reason: String) -> PortalError {
    PortalError::TableValidation { reason }
}
