//! One-shot, cancellable delayed work.
//!
//! Every simulated "thinking" pause in the portal goes through `Deferred`:
//! the work runs only after the delay elapses and only if its cancellation
//! token is still live. A session that is torn down cancels its token, and
//! every update it had scheduled becomes a no-op.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use careportal_contracts::error::{PortalError, PortalResult};

/// A pending delayed computation.
///
/// Dropping a `Deferred` does not cancel it; call [`Deferred::cancel`] or
/// cancel the parent token.
#[derive(Debug)]
pub struct Deferred<T> {
    handle: JoinHandle<Option<T>>,
    token: CancellationToken,
}

impl<T: Send + 'static> Deferred<T> {
    /// Spawn `work` to run after `delay` on the current tokio runtime.
    ///
    /// If `token` is cancelled before the delay elapses, `work` is never
    /// called and the task resolves to `None`.
    pub fn schedule<F>(delay: Duration, token: CancellationToken, work: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let task_token = token.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = task_token.cancelled() => {
                    debug!("deferred work cancelled before delay elapsed");
                    None
                }
                _ = tokio::time::sleep(delay) => {
                    if task_token.is_cancelled() {
                        None
                    } else {
                        Some(work())
                    }
                }
            }
        });
        Self { handle, token }
    }

    /// Cancel this task only. Has no effect once the work has run.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True once the task has resolved, whether it ran or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task. `Ok(None)` means it was cancelled.
    pub async fn wait(self) -> PortalResult<Option<T>> {
        self.handle.await.map_err(|e| PortalError::Deferred {
            reason: e.to_string(),
        })
    }
}
