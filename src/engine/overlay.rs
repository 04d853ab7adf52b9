// SPDX-License-Identifier: GPL-3.0-only

//! Overlay auto-hide timer
//!
//! A restartable single-shot delay. The engine task owns the timer and
//! drives it with explicit instants: [`OverlayTimer::trigger`] when something
//! should show the overlay, [`OverlayTimer::expire`] when the deadline sleep
//! wakes up. Because both run on the same task, a trigger that is processed
//! before the expiry is dispatched always cancels that expiry.

use crate::errors::EngineError;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Visibility of the full camera info overlay
///
/// Invariant: `visible` is false only when no deadline is pending.
#[derive(Debug, Clone)]
pub struct OverlayTimer {
    duration: Duration,
    visible: bool,
    deadline: Option<Instant>,
}

impl OverlayTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            visible: false,
            deadline: None,
        }
    }

    /// Show the overlay and restart the countdown from `now`
    ///
    /// If the deadline cannot be computed the overlay stays visible with no
    /// pending expiry rather than flickering.
    pub fn trigger(&mut self, now: Instant) -> Result<(), EngineError> {
        self.visible = true;
        match now.checked_add(self.duration) {
            Some(deadline) => {
                if self.deadline.replace(deadline).is_some() {
                    debug!("Overlay countdown restarted");
                } else {
                    debug!(duration_ms = self.duration.as_millis() as u64, "Overlay shown");
                }
                Ok(())
            }
            None => {
                self.deadline = None;
                Err(EngineError::TimerFault(format!(
                    "cannot schedule expiry {:?} after {:?}",
                    self.duration, now
                )))
            }
        }
    }

    /// Hide the overlay if the pending deadline has passed
    ///
    /// Returns true when this call hid the overlay. A stale wake-up (the
    /// deadline moved because of a retrigger) does nothing.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.visible = false;
                debug!("Overlay hidden");
                true
            }
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
