//! In-memory implementation of `TranscriptWriter`.
//!
//! `Transcript` keeps every entry in a `Vec` behind an `Arc<Mutex<_>>`, so
//! the session and its deferred reply tasks can all hold a handle and append
//! from whichever worker thread the timer fires on.
//!
//! Use `export()` to take a snapshot and `verify_order()` at any time to
//! confirm the append-only invariants still hold.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::debug;

use careportal_contracts::{
    error::{PortalError, PortalResult},
    message::{Message, SessionId},
};
use careportal_core::traits::TranscriptWriter;

use crate::{
    entry::{TranscriptEntry, TranscriptLog},
    order::verify_order,
};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct TranscriptState {
    /// All entries appended so far, in append order.
    pub(crate) entries: Vec<TranscriptEntry>,

    /// The next sequence number to assign (starts at 0).
    pub(crate) sequence: u64,
}

// ── Public transcript ─────────────────────────────────────────────────────────

/// An append-only message transcript scoped to one session.
///
/// Cloning is cheap and every clone observes the same entries. Nothing is
/// persisted: the transcript disappears with its last handle.
#[derive(Clone)]
pub struct Transcript {
    session_id: String,
    pub(crate) state: Arc<Mutex<TranscriptState>>,
}

impl Transcript {
    /// Create an empty transcript for a fresh session.
    pub fn new() -> Self {
        Self::for_session(&SessionId::new())
    }

    /// Create an empty transcript labelled with an existing session id.
    pub fn for_session(session_id: &SessionId) -> Self {
        Self {
            session_id: session_id.0.to_string(),
            state: Arc::new(Mutex::new(TranscriptState {
                entries: Vec::new(),
                sequence: 0,
            })),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    // Readers keep going on a poisoned lock: entries are only ever pushed
    // whole, so the Vec is never observed half-written.
    fn read(&self) -> MutexGuard<'_, TranscriptState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All entries, in append order.
    pub fn entries(&self) -> Vec<TranscriptEntry> {
        self.read().entries.clone()
    }

    /// All messages, in append order.
    pub fn messages(&self) -> Vec<Message> {
        self.read()
            .entries
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The most recently appended message.
    pub fn last(&self) -> Option<Message> {
        self.read().entries.last().map(|e| e.message.clone())
    }

    /// Take a snapshot of everything appended so far.
    pub fn export(&self) -> TranscriptLog {
        TranscriptLog {
            session_id: self.session_id.clone(),
            entries: self.entries(),
            exported_at: Utc::now(),
        }
    }

    /// Check the append-only invariants. See [`verify_order`].
    pub fn verify_order(&self) -> bool {
        verify_order(&self.read().entries)
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

// ── TranscriptWriter impl ─────────────────────────────────────────────────────

impl TranscriptWriter for Transcript {
    /// Append one message and return the sequence number it was given.
    ///
    /// Returns `Err(TranscriptWrite)` only if the internal mutex is poisoned.
    fn append(&self, message: Message) -> PortalResult<u64> {
        let mut state = self.state.lock().map_err(|e| PortalError::TranscriptWrite {
            reason: format!("transcript lock poisoned: {}", e),
        })?;

        let sequence = state.sequence;
        debug!(
            session_id = %self.session_id,
            sequence,
            sender = ?message.sender,
            "appending message"
        );

        state.entries.push(TranscriptEntry { sequence, message });
        state.sequence += 1;

        Ok(sequence)
    }
}
