//! Debounce window for availability checks.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Default debounce window between the last keystroke and the probe.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Runs at most one job at a time, after a quiet window.
///
/// Scheduling a job cancels the previous one, whether it is still waiting
/// for its window or already running. A cancelled job is dropped at its
/// next await point and never completes.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    current: Option<CancellationToken>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            current: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Cancels any pending job and schedules `job` to start once the window
    /// has elapsed.
    pub fn schedule<F>(&mut self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let token = CancellationToken::new();
        self.current = Some(token.clone());
        let window = self.window;

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::trace!("Debounced job cancelled");
                }
                _ = async {
                    tokio::time::sleep(window).await;
                    job.await;
                } => {}
            }
        });
    }

    /// Cancels the pending job, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }

    /// Whether a job was scheduled and has not been cancelled. A job that has
    /// already finished still counts until the next `schedule` or `cancel`.
    pub fn is_armed(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
