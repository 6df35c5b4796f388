//! Fixed-delay background task used for periodic update checks

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

/// Handle to a running periodic task.
///
/// Dropping the handle without calling [`PeriodicTask::shutdown`] aborts the task.
pub struct PeriodicTask {
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    /// Stops the loop after the currently running job, if any, and waits for it
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Runs `job` immediately and then once per `period` until shut down.
///
/// Runs never overlap; a slow run delays the next one instead of bunching up.
pub fn spawn_periodic<F, Fut>(period: Duration, mut job: F) -> PeriodicTask
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => job().await,
                _ = shutdown_rx.changed() => {
                    debug!("Periodic task shutting down");
                    break;
                }
            }
        }
    });

    PeriodicTask {
        shutdown: shutdown_tx,
        handle: Some(handle),
    }
}
