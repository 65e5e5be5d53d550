//! # careportal-transcript
//!
//! In-memory, append-only session transcript for the CarePortal mock engine.
//!
//! ## Overview
//!
//! Every message a session records, user or bot, is wrapped in a
//! `TranscriptEntry` carrying its position. Entries are never modified or
//! removed; `verify_order` detects any gap, reorder or duplicate.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use careportal_transcript::Transcript;
//! use careportal_core::traits::TranscriptWriter;
//!
//! let transcript = Transcript::new();
//! transcript.append(Message::from_user("fever headache", None))?;
//!
//! assert!(transcript.verify_order());
//! let log = transcript.export();
//! ```

pub mod entry;
pub mod order;
pub mod transcript;

pub use entry::{TranscriptEntry, TranscriptLog};
pub use order::verify_order;
pub use transcript::Transcript;

// ── Tests ─────────────────────────────────────────────────────────────────────
