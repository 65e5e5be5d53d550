//! The symptom analyzer session.
//!
//! Unlike chat, only one analysis may be pending at a time: the input is
//! locked while the analyzer "thinks". A completed analysis replaces the
//! latest-results slot wholesale before the bot message is appended.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, PoisonError,
};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use careportal_contracts::{
    diagnosis::DiagnosisCandidate,
    error::{PortalError, PortalResult},
    message::{Message, SessionId},
};

use crate::{
    deferred::Deferred,
    traits::{SymptomMatcher, TranscriptWriter},
};

/// First message of the analyzer panel.
pub const ANALYZER_GREETING: &str =
    "Hello doctor, describe the patient's symptoms, and I'll help identify possible diagnoses.";

/// Bot message appended after every completed analysis.
pub const ANALYSIS_COMPLETE: &str = "I've analyzed the symptoms and have some potential diagnoses \
to consider. Please review the results.";

/// Clears the analyzing flag once the scheduled work is dropped.
struct AnalyzingGuard(Arc<AtomicBool>);

impl Drop for AnalyzingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// The outcome of one completed analysis.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub results: Vec<DiagnosisCandidate>,
    /// The bot message that announced the results.
    pub message: Message,
}

/// Handle to an analysis that is still running.
#[derive(Debug)]
pub struct PendingAnalysis {
    inner: Deferred<PortalResult<Analysis>>,
}

impl PendingAnalysis {
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    /// Wait for the analysis. `Ok(None)` if it was cancelled.
    pub async fn wait(self) -> PortalResult<Option<Analysis>> {
        self.inner.wait().await?.transpose()
    }
}

/// One analyzer panel: transcript, matcher and the latest result set.
///
/// Must be used from within a tokio runtime.
pub struct SymptomSession {
    id: SessionId,
    matcher: Arc<dyn SymptomMatcher>,
    transcript: Arc<dyn TranscriptWriter>,
    delay: Duration,
    token: CancellationToken,
    analyzing: Arc<AtomicBool>,
    latest: Arc<Mutex<Vec<DiagnosisCandidate>>>,
}

impl SymptomSession {
    /// Open a session and append the analyzer greeting.
    pub fn open(
        matcher: Arc<dyn SymptomMatcher>,
        transcript: Arc<dyn TranscriptWriter>,
        delay: Duration,
    ) -> PortalResult<Self> {
        transcript.append(Message::from_bot(ANALYZER_GREETING))?;

        let id = SessionId::new();
        debug!(session_id = %id.0, "symptom session opened");

        Ok(Self {
            id,
            matcher,
            transcript,
            delay,
            token: CancellationToken::new(),
            analyzing: Arc::new(AtomicBool::new(false)),
            latest: Arc::new(Mutex::new(Vec::new())),
        })
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Record `description` and schedule its analysis.
    ///
    /// # Errors
    ///
    /// - `BlankInput` when `description` is blank after trimming.
    /// - `SessionClosed` after `close()`.
    /// - `Busy` when a previous analysis has not finished yet.
    ///
    /// In every case nothing is appended to the transcript.
    pub fn submit(&self, description: &str) -> PortalResult<PendingAnalysis> {
        if description.trim().is_empty() {
            return Err(PortalError::BlankInput {
                field: "symptoms".to_string(),
            });
        }
        if self.token.is_cancelled() {
            return Err(PortalError::SessionClosed {
                session_id: self.id.0.to_string(),
            });
        }

        if self
            .analyzing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(PortalError::Busy {
                reason: "symptom analysis already in progress".to_string(),
            });
        }
        let guard = AnalyzingGuard(Arc::clone(&self.analyzing));

        let sequence = self.transcript.append(Message::from_user(description, None))?;
        debug!(session_id = %self.id.0, sequence, "symptom description recorded");

        let matcher = Arc::clone(&self.matcher);
        let transcript = Arc::clone(&self.transcript);
        let latest = Arc::clone(&self.latest);
        let session_id = self.id.0;
        let description = description.to_string();

        let inner = Deferred::schedule(
            self.delay,
            self.token.child_token(),
            move || -> PortalResult<Analysis> {
                let _guard = guard;
                let results = matcher.match_symptoms(&description);

                *latest.lock().unwrap_or_else(PoisonError::into_inner) = results.clone();

                let message = Message::from_bot(ANALYSIS_COMPLETE);
                transcript.append(message.clone())?;
                info!(
                    session_id = %session_id,
                    candidates = results.len(),
                    "symptom analysis complete"
                );
                Ok(Analysis { results, message })
            },
        );

        Ok(PendingAnalysis { inner })
    }

    /// True while an analysis is pending.
    pub fn is_analyzing(&self) -> bool {
        self.analyzing.load(Ordering::SeqCst)
    }

    /// The result set of the most recent completed analysis.
    ///
    /// Empty until the first analysis completes.
    pub fn latest_results(&self) -> Vec<DiagnosisCandidate> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Cancel the pending analysis, if any, and refuse further submits.
    pub fn close(&self) {
        debug!(session_id = %self.id.0, "symptom session closing");
        self.token.cancel();
    }
}

impl Drop for SymptomSession {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
