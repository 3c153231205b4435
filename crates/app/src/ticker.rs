//! Fixed-interval, self-rescheduling timer.
//!
//! A [`Ticker`] waits one interval, runs the tick to completion, and only
//! then arms the next wait. A slow tick pushes the next one back instead of
//! overlapping it, and there is never more than one pending tick.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Handle to a running tick loop.
///
/// Dropping the handle also stops the loop at its next wait.
pub struct Ticker {
    cancel: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn a tick loop calling `tick` every `interval`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F, Fut>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (cancel, mut cancelled) = watch::channel(false);
        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.changed() => break,
                    () = tokio::time::sleep(interval) => {}
                }
                tick().await;
            }
        });

        Self {
            cancel,
            task: Some(task),
        }
    }

    /// Whether a future tick is still armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Disarm the loop.
    ///
    /// A tick that is already running is allowed to finish; this waits for
    /// it. Returns `true` only for the call that disarmed a live loop, so
    /// calling it again is a harmless no-op.
    pub async fn cancel(&mut self) -> bool {
        let Some(task) = self.task.take() else {
            return false;
        };
        let was_armed = !task.is_finished();
        let _ = self.cancel.send(true);
        if let Err(err) = task.await {
            tracing::warn!(%err, "tick loop ended abnormally");
        }
        was_armed
    }
}
