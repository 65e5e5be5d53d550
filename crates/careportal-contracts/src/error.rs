//! Error types for the CarePortal workspace.
//!
//! The matching engine itself is total; these variants cover the plumbing
//! around it (input gating, table loading, sessions and the directory).

use thiserror::Error;

/// The unified error type for the CarePortal crates.
#[derive(Debug, Error)]
pub enum PortalError {
    /// A send or search was attempted with blank text.
    #[error("{field} must not be blank")]
    BlankInput { field: String },

    /// The session cannot accept input right now (e.g. analysis pending).
    #[error("session busy: {reason}")]
    Busy { reason: String },

    /// The session was closed; no further input is accepted.
    #[error("session {session_id} is closed")]
    SessionClosed { session_id: String },

    /// A doctor or patient id is not present in the directory.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: String, id: String },

    /// A configuration or table file is unreadable or malformed.
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// A table parsed correctly but its content breaks a table invariant.
    #[error("table validation failed: {reason}")]
    TableValidation { reason: String },

    /// The transcript could not record a message.
    #[error("transcript write failed: {reason}")]
    TranscriptWrite { reason: String },

    /// A deferred task panicked or was aborted before it resolved.
    #[error("deferred task failed: {reason}")]
    Deferred { reason: String },
}

/// Convenience alias used throughout the CarePortal crates.
pub type PortalResult<T> = Result<T, PortalError>;
