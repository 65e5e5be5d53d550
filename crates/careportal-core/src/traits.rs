//! Trait seams between the sessions and the engine implementations.
//!
//! - `ResponseSelector` picks a canned chat reply
//! - `SymptomMatcher`   maps a symptom description to diagnosis candidates
//! - `TranscriptWriter` records every message in append order
//!
//! Sessions only talk to these traits, so the engine tables and the
//! transcript store can be swapped without touching session logic.

use careportal_contracts::{
    diagnosis::DiagnosisCandidate, error::PortalResult, message::Message,
};

/// Chooses a reply for the generic chat feature.
///
/// Implementations must be total: every input, including an empty string,
/// yields a non-empty reply drawn from a fixed set. The reply is not
/// required to relate to `user_text` in any way.
pub trait ResponseSelector: Send + Sync {
    fn select_response(&self, user_text: &str) -> String;
}

/// Maps a free-text symptom description to an ordered candidate list.
///
/// Implementations must be total and deterministic for a given table: "no
/// match" is a fallback list, not an error. Callers guarantee the
/// description is not blank.
pub trait SymptomMatcher: Send + Sync {
    fn match_symptoms(&self, description: &str) -> Vec<DiagnosisCandidate>;
}

/// Append-only message sink for one session.
pub trait TranscriptWriter: Send + Sync {
    /// Append `message` and return its position in the transcript.
    ///
    /// Messages are never modified or removed once appended.
    fn append(&self, message: Message) -> PortalResult<u64>;
}
