//! Transcript message types.
//!
//! A `Message` is created once, either when the user sends text or when the
//! engine finishes a simulated response, and is never modified afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a single transcript message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub uuid::Uuid);

impl MessageId {
    /// Create a new, unique message ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier for one UI session (one chat window, one analyzer panel).
///
/// Transcripts are scoped to a session and are lost when it is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    /// Create a new, unique session ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Typed by the person using the portal.
    User,
    /// Produced by the mock engine.
    Bot,
}

/// Which dashboard the session belongs to. Selects the chat greeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Patient,
    Doctor,
}

/// Kind of file attached to a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Document,
}

impl AttachmentKind {
    fn extension(self) -> &'static str {
        match self {
            Self::Image => "jpg",
            Self::Document => "pdf",
        }
    }

    fn placeholder_url(self) -> &'static str {
        match self {
            Self::Image => "https://placeholder.com/150",
            Self::Document => "https://placeholder.com/document",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Document => "document",
        }
    }
}

/// A simulated file attachment. Nothing is uploaded; the URL is a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub kind: AttachmentKind,
    /// `"<kind>-<unix millis>.<jpg|pdf>"`.
    pub name: String,
    pub url: String,
}

impl Attachment {
    /// Build the placeholder attachment for `kind`, named after `at`.
    pub fn placeholder(kind: AttachmentKind, at: DateTime<Utc>) -> Self {
        Self {
            kind,
            name: format!(
                "{}-{}.{}",
                kind.label(),
                at.timestamp_millis(),
                kind.extension()
            ),
            url: kind.placeholder_url().to_string(),
        }
    }
}

/// One immutable entry in a session transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    /// The text exactly as entered or produced; never trimmed.
    pub content: String,
    /// Wall-clock creation time (UTC).
    pub timestamp: DateTime<Utc>,
    pub sender: Sender,
    /// Only user messages carry attachments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl Message {
    /// A user-originated message created now.
    pub fn from_user(content: impl Into<String>, attachment: Option<AttachmentKind>) -> Self {
        let timestamp = Utc::now();
        Self {
            id: MessageId::new(),
            content: content.into(),
            timestamp,
            sender: Sender::User,
            attachment: attachment.map(|kind| Attachment::placeholder(kind, timestamp)),
        }
    }

    /// A bot-originated message created now.
    pub fn from_bot(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            content: content.into(),
            timestamp: Utc::now(),
            sender: Sender::Bot,
            attachment: None,
        }
    }

    /// `HH:MM` in UTC, the format the chat bubbles show.
    pub fn display_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}
