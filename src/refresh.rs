//! Auto-refresh scheduler
//!
//! Emits a tick on a fixed interval so the dashboard re-runs its fetch path,
//! using a tokio channel to communicate with the main application loop.
//! Toggling the schedule off stops future ticks without touching a fetch
//! that is already in flight.

use std::time::Duration;

use tokio::sync::{mpsc, watch};

/// Interval between automatic refreshes
pub const AUTO_REFRESH_INTERVAL: Duration = Duration::from_millis(30_000);

/// Messages sent from the scheduler to the main app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMessage {
    /// Time to re-run the fetch path with the current filters
    Tick,
}

/// Configuration for the refresh scheduler
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Interval between ticks
    pub interval: Duration,
    /// Whether auto-refresh starts enabled
    pub enabled: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: AUTO_REFRESH_INTERVAL,
            enabled: true,
        }
    }
}

/// Handle for controlling the background refresh scheduler
pub struct RefreshHandle {
    /// Channel for receiving refresh ticks
    pub receiver: mpsc::Receiver<RefreshMessage>,
    /// Gate controlling whether ticks are scheduled
    enabled_tx: watch::Sender<bool>,
    /// Flag to signal shutdown
    shutdown_tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    /// Spawns the scheduler task and returns its control handle.
    ///
    /// While the gate is off the interval keeps running but no tick is
    /// emitted, so re-enabling resumes cleanly on the next interval edge.
    pub fn spawn(config: RefreshConfig) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(4);
        let (enabled_tx, enabled_rx) = watch::channel(config.enabled);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let interval_period = config.interval;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(interval_period);
            // Skip the first tick (immediate)
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if *enabled_rx.borrow() {
                            let _ = msg_tx.send(RefreshMessage::Tick).await;
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
        });

        Self {
            receiver: msg_rx,
            enabled_tx,
            shutdown_tx,
        }
    }

    /// Turns scheduling on or off without affecting in-flight work.
    pub fn set_enabled(&self, enabled: bool) {
        let _ = self.enabled_tx.send(enabled);
    }

    /// Whether ticks are currently being scheduled
    pub fn is_enabled(&self) -> bool {
        *self.enabled_tx.borrow()
    }

    /// Shuts down the scheduler task. Safe to call from the teardown path;
    /// never blocks and never panics.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.try_send(());
    }
}

/// Checks for a pending refresh tick without blocking.
pub fn try_recv(handle: &mut RefreshHandle) -> Option<RefreshMessage> {
    handle.receiver.try_recv().ok()
}
