//! Transcript entry and export types.
//!
//! `TranscriptEntry` pairs an immutable `Message` with its position in the
//! session. `TranscriptLog` is the snapshot produced by `Transcript::export()`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use careportal_contracts::message::Message;

/// A single message at a fixed position in one session's transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Position in the transcript, starting at 0 with no gaps.
    pub sequence: u64,

    /// The message exactly as appended.
    pub message: Message,
}

/// A point-in-time copy of a transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptLog {
    /// The session whose messages are recorded here.
    pub session_id: String,

    /// All entries in append order (sequence 0 first).
    pub entries: Vec<TranscriptEntry>,

    /// Wall-clock time (UTC) the snapshot was taken.
    pub exported_at: DateTime<Utc>,
}
