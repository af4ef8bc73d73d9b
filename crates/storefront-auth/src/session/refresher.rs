//! Background task that keeps the access token fresh.

use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use storefront_entity::session::SessionState;

use super::manager::SessionManager;

/// Spawns the periodic refresh loop.
#[derive(Debug)]
pub struct SessionRefresher;

impl SessionRefresher {
    /// Start refreshing every `period` while the session is `Authenticated`.
    ///
    /// The loop ends on [`RefresherHandle::shutdown`], when the handle is
    /// dropped, or when the session is logged out or expires.
    pub fn spawn(manager: SessionManager, period: Duration) -> RefresherHandle {
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let mut events = manager.subscribe_events();

        let task = tokio::spawn(async move {
            info!(period_secs = period.as_secs(), "Session refresher started");

            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = cancel_rx.changed() => {
                        debug!("Session refresher received shutdown signal");
                        break;
                    }
                    event = events.recv() => match event {
                        Ok(event) if event.is_terminal() => {
                            debug!(?event, "Session ended, stopping refresher");
                            break;
                        }
                        Ok(_) | Err(RecvError::Lagged(_)) => {}
                        Err(RecvError::Closed) => break,
                    },
                    _ = ticker.tick() => {
                        if manager.state() != SessionState::Authenticated {
                            continue;
                        }
                        if let Err(e) = manager.refresh().await {
                            warn!(kind = %e.kind, "Scheduled token refresh failed");
                        }
                    }
                }
            }

            info!("Session refresher stopped");
        });

        RefresherHandle {
            cancel_tx,
            task: Some(task),
        }
    }
}

/// Owns the refresher task. Dropping it cancels the task.
#[derive(Debug)]
pub struct RefresherHandle {
    cancel_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl RefresherHandle {
    /// Whether the loop has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Signal the loop to stop and wait for it.
    pub async fn shutdown(mut self) {
        let _ = self.cancel_tx.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Session refresher task failed");
            }
        }
    }
}

impl Drop for RefresherHandle {
    fn drop(&mut self) {
        let _ = self.cancel_tx.send(true);
    }
}
