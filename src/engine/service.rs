// SPDX-License-Identifier: GPL-3.0-only

//! Engine task
//!
//! Runs a [`TelemetryEngine`] on its own tokio task. Notifications go in
//! through a bounded mpsc channel and are applied strictly in arrival
//! order; snapshots come out through a watch channel holding the latest
//! [`ViewModel`]. The overlay deadline is a `sleep_until` raced against the
//! inbox on the same task, so expiry never runs concurrently with a
//! notification.

use crate::engine::{EngineSettings, Notification, TelemetryEngine, ViewModel};
use crate::errors::EngineError;
use futures::future::OptionFuture;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

/// Cloneable producer side for transport adapters
#[derive(Debug, Clone)]
pub struct NotificationSender {
    tx: mpsc::Sender<Notification>,
}

impl NotificationSender {
    /// Queue a notification, waiting for room if the inbox is full
    pub async fn notify(&self, notification: Notification) -> Result<(), EngineError> {
        self.tx
            .send(notification)
            .await
            .map_err(|_| EngineError::ChannelClosed)
    }
}

/// Running engine task
pub struct EngineHandle {
    sender: NotificationSender,
    snapshots: watch::Receiver<Arc<ViewModel>>,
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl EngineHandle {
    /// Start the engine task on the current runtime
    pub fn spawn(settings: EngineSettings, capacity: usize) -> Self {
        let engine = TelemetryEngine::new(settings);
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let (snapshot_tx, snapshots) = watch::channel(Arc::new(engine.snapshot()));
        let (stop_tx, stop_rx) = oneshot::channel();

        let task = tokio::spawn(run(engine, rx, snapshot_tx, stop_rx));
        info!(capacity, "Telemetry engine started");

        Self {
            sender: NotificationSender { tx },
            snapshots,
            stop: Some(stop_tx),
            task,
        }
    }

    pub async fn notify(&self, notification: Notification) -> Result<(), EngineError> {
        self.sender.notify(notification).await
    }

    pub fn sender(&self) -> NotificationSender {
        self.sender.clone()
    }

    /// New subscription; the current snapshot is marked as seen
    pub fn subscribe(&self) -> watch::Receiver<Arc<ViewModel>> {
        let mut rx = self.snapshots.clone();
        rx.mark_unchanged();
        rx
    }

    /// Most recently published snapshot
    pub fn latest(&self) -> Arc<ViewModel> {
        self.snapshots.borrow().clone()
    }

    /// Stop the task and wait for it
    ///
    /// Notifications already queued are dropped.
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Err(e) = self.task.await {
            warn!(error = %e, "Engine task ended abnormally");
        }
        info!("Telemetry engine stopped");
    }
}

async fn run(
    mut engine: TelemetryEngine,
    mut rx: mpsc::Receiver<Notification>,
    snapshots: watch::Sender<Arc<ViewModel>>,
    mut stop: oneshot::Receiver<()>,
) {
    loop {
        let expiry: OptionFuture<_> = engine.overlay_deadline().map(sleep_until).into();

        // Inbox before expiry: a trigger that is already queued cancels it
        let published = tokio::select! {
            biased;

            _ = &mut stop => {
                debug!("Engine stop requested");
                break;
            }
            notification = rx.recv() => {
                let Some(notification) = notification else {
                    debug!("All notification senders dropped");
                    break;
                };
                engine.handle(notification, Instant::now())
            }
            Some(()) = expiry => engine.expire_overlay(Instant::now()),
        };

        if let Some(vm) = published {
            snapshots.send_replace(Arc::new(vm));
        }
    }
}
