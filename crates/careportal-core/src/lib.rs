//! # careportal-core
//!
//! Session runtime for the CarePortal mock engine.
//!
//! This crate provides:
//! - The three seam traits (`ResponseSelector`, `SymptomMatcher`, `TranscriptWriter`)
//! - `Deferred`, the cancellable one-shot timer behind every simulated delay
//! - `ChatSession` and `SymptomSession`, which gate input, record the
//!   transcript and apply the delay in the correct order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use careportal_core::{ChatSession, LatencyConfig};
//!
//! let session = ChatSession::open(UserRole::Patient, selector, transcript, latency.chat_reply())?;
//! let reply = session.send("I have a headache", None)?.wait().await?;
//! ```

pub mod chat;
pub mod deferred;
pub mod latency;
pub mod symptom;
pub mod traits;

pub use chat::{ChatSession, PendingReply};
pub use deferred::Deferred;
pub use latency::LatencyConfig;
pub use symptom::{Analysis, PendingAnalysis, SymptomSession};
