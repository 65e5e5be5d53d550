//! The generic chat session.
//!
//! Send flow:
//!
//!   blank check → append user message → [delay] → select_response → append bot message
//!
//! The user message is appended synchronously inside `send()`, before the
//! reply is even scheduled, so a reply can never precede its trigger in the
//! transcript.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use careportal_contracts::{
    error::{PortalError, PortalResult},
    message::{AttachmentKind, Message, SessionId, UserRole},
};

use crate::{
    deferred::Deferred,
    traits::{ResponseSelector, TranscriptWriter},
};

/// First message of a patient-facing chat.
pub const PATIENT_GREETING: &str = "Hello! How can I help you today?";

/// First message of a doctor-facing chat.
pub const DOCTOR_GREETING: &str = "Hi doctor! You can review your patient conversations here.";

/// Greeting appended when a chat session opens.
pub fn greeting_for(role: UserRole) -> &'static str {
    match role {
        UserRole::Patient => PATIENT_GREETING,
        UserRole::Doctor => DOCTOR_GREETING,
    }
}

/// Decrements the pending-reply counter when the scheduled work is dropped,
/// whether it ran or was cancelled.
struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Handle to a reply that has been scheduled but may not have arrived yet.
#[derive(Debug)]
pub struct PendingReply {
    inner: Deferred<PortalResult<Message>>,
}

impl PendingReply {
    /// Cancel this reply only; other pending replies are unaffected.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// Wait for the bot message. `Ok(None)` if the reply was cancelled.
    pub async fn wait(self) -> PortalResult<Option<Message>> {
        self.inner.wait().await?.transpose()
    }
}

/// One chat window: a transcript plus a simulated conversational partner.
///
/// Must be used from within a tokio runtime. Dropping the session cancels
/// every reply still pending.
pub struct ChatSession {
    id: SessionId,
    role: UserRole,
    selector: Arc<dyn ResponseSelector>,
    transcript: Arc<dyn TranscriptWriter>,
    delay: Duration,
    token: CancellationToken,
    pending: Arc<AtomicUsize>,
}

impl ChatSession {
    /// Open a session and append the role's greeting.
    pub fn open(
        role: UserRole,
        selector: Arc<dyn ResponseSelector>,
        transcript: Arc<dyn TranscriptWriter>,
        delay: Duration,
    ) -> PortalResult<Self> {
        transcript.append(Message::from_bot(greeting_for(role)))?;

        let id = SessionId::new();
        debug!(session_id = %id.0, ?role, "chat session opened");

        Ok(Self {
            id,
            role,
            selector,
            transcript,
            delay,
            token: CancellationToken::new(),
            pending: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Record `text` as a user message and schedule the bot reply.
    ///
    /// Blank text (after trimming) is rejected with `BlankInput`, and a
    /// closed session with `SessionClosed`; in both cases nothing is
    /// appended. The stored content is `text` as given, untrimmed.
    pub fn send(
        &self,
        text: &str,
        attachment: Option<AttachmentKind>,
    ) -> PortalResult<PendingReply> {
        if text.trim().is_empty() {
            return Err(PortalError::BlankInput {
                field: "message".to_string(),
            });
        }
        if self.token.is_cancelled() {
            return Err(PortalError::SessionClosed {
                session_id: self.id.0.to_string(),
            });
        }

        let sequence = self.transcript.append(Message::from_user(text, attachment))?;
        debug!(session_id = %self.id.0, sequence, "user message recorded");

        self.pending.fetch_add(1, Ordering::SeqCst);
        let guard = PendingGuard(Arc::clone(&self.pending));

        let selector = Arc::clone(&self.selector);
        let transcript = Arc::clone(&self.transcript);
        let session_id = self.id.0;
        let prompt = text.to_string();

        let inner = Deferred::schedule(self.delay, self.token.child_token(), move || -> PortalResult<Message> {
            let _guard = guard;
            let reply = Message::from_bot(selector.select_response(&prompt));
            let sequence = transcript.append(reply.clone())?;
            info!(
                session_id = %session_id,
                sequence,
                "new message received"
            );
            Ok(reply)
        });

        Ok(PendingReply { inner })
    }

    /// True while at least one reply is still pending.
    pub fn is_typing(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    /// Tear the session down: cancel every pending reply and refuse
    /// further sends with `SessionClosed`.
    pub fn close(&self) {
        debug!(session_id = %self.id.0, "chat session closing");
        self.token.cancel();
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use careportal_contracts::message::Sender;

    use super::*;

    // ── Mock helpers ─────────────────────────────────────────────────────────

    /// Always answers with the same text and counts calls.
    struct EchoSelector {
        calls: Arc<Mutex<u32>>,
    }

    impl ResponseSelector for EchoSelector {
        fn select_response(&self, _user_text: &str) -> String {
            *self.calls.lock().unwrap() += 1;
            "noted".to_string()
        }
    }

    #[derive(Default)]
    struct MockTranscript {
        messages: Mutex<Vec<Message>>,
    }

    impl TranscriptWriter for MockTranscript {
        fn append(&self, message: Message) -> PortalResult<u64> {
            let mut messages = self.messages.lock().unwrap();
            messages.push(message);
            Ok(messages.len() as u64 - 1)
        }
    }

    impl MockTranscript {
        fn contents(&self) -> Vec<(Sender, String)> {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .map(|m| (m.sender, m.content.clone()))
                .collect()
        }
    }

    fn open(role: UserRole, delay: Duration) -> (ChatSession, Arc<MockTranscript>, Arc<Mutex<u32>>) {
        let calls = Arc::new(Mutex::new(0));
        let transcript = Arc::new(MockTranscript::default());
        let session = ChatSession::open(
            role,
            Arc::new(EchoSelector { calls: Arc::clone(&calls) }),
            transcript.clone(),
            delay,
        )
        .unwrap();
        (session, transcript, calls)
    }

    // ── Tests ────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn greeting_depends_on_role() {
        let (_patient, transcript, _) = open(UserRole::Patient, Duration::ZERO);
        assert_eq!(transcript.contents(), vec![(Sender::Bot, PATIENT_GREETING.to_string())]);

        let (_doctor, transcript, _) = open(UserRole::Doctor, Duration::ZERO);
        assert_eq!(transcript.contents(), vec![(Sender::Bot, DOCTOR_GREETING.to_string())]);
    }

    #[tokio::test]
    async fn blank_message_is_rejected_and_not_recorded() {
        let (session, transcript, calls) = open(UserRole::Patient, Duration::ZERO);

        match session.send("   \n\t", None) {
            Err(PortalError::BlankInput { field }) => assert_eq!(field, "message"),
            other => panic!("expected BlankInput, got {:?}", other.map(|_| ())),
        }

        assert_eq!(transcript.contents().len(), 1, "only the greeting");
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn reply_follows_its_trigger() {
        let (session, transcript, calls) = open(UserRole::Patient, Duration::from_millis(5));

        let pending = session.send("I have a sore throat", None).unwrap();

        // The user message is visible before the reply arrives.
        assert_eq!(transcript.contents().len(), 2);
        assert!(session.is_typing());

        let reply = pending.wait().await.unwrap().expect("reply should arrive");
        assert_eq!(reply.sender, Sender::Bot);
        assert_eq!(reply.content, "noted");

        assert_eq!(
            transcript.contents(),
            vec![
                (Sender::Bot, PATIENT_GREETING.to_string()),
                (Sender::User, "I have a sore throat".to_string()),
                (Sender::Bot, "noted".to_string()),
            ]
        );
        assert_eq!(*calls.lock().unwrap(), 1);
        assert!(!session.is_typing());
    }

    #[tokio::test]
    async fn attachment_is_carried_on_user_message() {
        let (session, transcript, _) = open(UserRole::Doctor, Duration::ZERO);

        session
            .send("lab results", Some(AttachmentKind::Document))
            .unwrap()
            .wait()
            .await
            .unwrap();

        let messages = transcript.messages.lock().unwrap();
        let attached = messages[1].attachment.as_ref().expect("attachment recorded");
        assert_eq!(attached.kind, AttachmentKind::Document);
        assert!(attached.name.ends_with(".pdf"));
        assert!(messages[2].attachment.is_none());
    }

    #[tokio::test]
    async fn close_cancels_pending_reply() {
        let (session, transcript, calls) = open(UserRole::Patient, Duration::from_secs(60));

        let pending = session.send("hello?", None).unwrap();
        session.close();

        assert!(pending.wait().await.unwrap().is_none());
        assert_eq!(transcript.contents().len(), 2, "greeting + user message only");
        assert_eq!(*calls.lock().unwrap(), 0);
        assert!(!session.is_typing());

        match session.send("still there?", None) {
            Err(PortalError::SessionClosed { .. }) => {}
            other => panic!("expected SessionClosed, got {:?}", other.map(|_| ())),
        }
        assert_eq!(transcript.contents().len(), 2);
    }

    #[tokio::test]
    async fn dropping_session_turns_reply_into_no_op() {
        let (session, transcript, calls) = open(UserRole::Patient, Duration::from_secs(60));

        let pending = session.send("are you there", None).unwrap();
        drop(session);

        assert!(pending.wait().await.unwrap().is_none());
        assert_eq!(transcript.contents().len(), 2);
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn cancelling_one_reply_leaves_others() {
        let (session, transcript, _) = open(UserRole::Patient, Duration::from_millis(20));

        let first = session.send("first", None).unwrap();
        let second = session.send("second", None).unwrap();
        first.cancel();

        assert!(first.wait().await.unwrap().is_none());
        assert!(second.wait().await.unwrap().is_some());

        let contents = transcript.contents();
        assert_eq!(contents.len(), 4);
        assert_eq!(contents[3], (Sender::Bot, "noted".to_string()));
    }
}
