//! Diagnosis candidate types produced by the symptom matcher.

use serde::{Deserialize, Serialize};

/// Shown beneath every result set in the analyzer panel.
pub const DIAGNOSIS_DISCLAIMER: &str = "These results are AI-generated suggestions based on the \
symptoms provided. Always use professional medical judgment and follow proper diagnostic protocols.";

/// A single diagnosis suggestion.
///
/// Candidates are read straight from the symptom table; the matcher never
/// re-ranks them, so list order is whatever the table author chose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisCandidate {
    pub disease: String,
    /// Confidence in `[0, 1]`. Enforced when the table is loaded.
    pub probability: f64,
    pub description: String,
    /// Ordered next steps.
    pub recommendations: Vec<String>,
}

impl DiagnosisCandidate {
    /// The "NN% match" badge value: `probability * 100`, rounded.
    pub fn match_percent(&self) -> u8 {
        (self.probability * 100.0).round().clamp(0.0, 100.0) as u8
    }
}
