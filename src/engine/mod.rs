// SPDX-License-Identifier: GPL-3.0-only

//! Telemetry display state engine
//!
//! [`TelemetryEngine`] is the synchronous core: it owns the camera and
//! switcher state plus the overlay timer, applies one [`Notification`] at a
//! time and produces a fresh [`ViewModel`] after every accepted mutation.
//! [`service`] wraps it in a tokio task with channels on both sides.

mod handlers;

pub mod formatting;
pub mod highlight;
pub mod notification;
pub mod overlay;
pub mod service;
pub mod state;
pub mod types;
pub mod view;
pub mod view_model;

pub use notification::Notification;
pub use service::{EngineHandle, NotificationSender};
pub use types::{AuxContent, CameraStatus, LogicalField, PropertyName, PropertyValue, Tally, View};
pub use view_model::{FieldView, ViewModel};

use crate::config::Config;
use crate::constants::timing;
use overlay::OverlayTimer;
use state::{CameraState, SwitcherState};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Per-instance engine settings
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Identity of the tracked camera, display only
    pub camera_name: String,
    /// Initial switcher input assignment
    pub switcher_input: Option<String>,
    pub overlay_duration: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            camera_name: String::new(),
            switcher_input: None,
            overlay_duration: timing::OVERLAY_DURATION,
        }
    }
}

impl From<&Config> for EngineSettings {
    fn from(config: &Config) -> Self {
        Self {
            camera_name: config.camera_name.clone(),
            switcher_input: config.switcher_input.clone(),
            overlay_duration: Duration::from_millis(config.overlay_duration_ms),
        }
    }
}

/// What applying a notification did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Outcome {
    /// State changed; a recompute pass is due
    pub accepted: bool,
    /// The overlay countdown must (re)start
    pub trigger: bool,
}

impl Outcome {
    pub(crate) const REJECTED: Outcome = Outcome {
        accepted: false,
        trigger: false,
    };
    pub(crate) const ACCEPTED: Outcome = Outcome {
        accepted: true,
        trigger: false,
    };
    pub(crate) const TRIGGER: Outcome = Outcome {
        accepted: true,
        trigger: true,
    };
}

/// Single-writer engine state
#[derive(Debug)]
pub struct TelemetryEngine {
    camera_name: String,
    camera: CameraState,
    switcher: SwitcherState,
    overlay: OverlayTimer,
    revision: u64,
}

impl TelemetryEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            camera_name: settings.camera_name,
            camera: CameraState::new(settings.switcher_input),
            switcher: SwitcherState::default(),
            overlay: OverlayTimer::new(settings.overlay_duration),
            revision: 0,
        }
    }

    /// Apply one notification observed at `now`
    ///
    /// Returns the new snapshot, or `None` when nothing changed (rejected
    /// input). An overlay trigger always wins over an expiry due at the same
    /// instant; a non-triggering notification at or past the deadline first
    /// retires the countdown so the snapshot it produces is current.
    pub fn handle(&mut self, notification: Notification, now: Instant) -> Option<ViewModel> {
        let kind = notification.kind();
        let outcome = self.dispatch(notification);

        let mut expired = false;
        if outcome.trigger {
            if let Err(e) = self.overlay.trigger(now) {
                warn!(error = %e, "Overlay stays visible");
            }
        } else if self.overlay.deadline().is_some_and(|deadline| now >= deadline) {
            expired = self.overlay.expire(now);
        }

        if outcome.accepted || expired {
            Some(self.recompute())
        } else {
            debug!(kind, "Notification left state unchanged");
            None
        }
    }

    /// Hide the overlay if its deadline has been reached
    pub fn expire_overlay(&mut self, now: Instant) -> Option<ViewModel> {
        self.overlay.expire(now).then(|| self.recompute())
    }

    /// Pending overlay expiry, if any
    pub fn overlay_deadline(&self) -> Option<Instant> {
        self.overlay.deadline()
    }

    /// Current state as a snapshot, without starting a new pass
    pub fn snapshot(&self) -> ViewModel {
        view_model::assemble(
            self.revision,
            &self.camera_name,
            &self.camera,
            &self.switcher,
            self.overlay.is_visible(),
        )
    }

    pub fn view(&self) -> View {
        view::select_view(self.switcher.aux_content(), self.camera.status())
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn recompute(&mut self) -> ViewModel {
        self.revision += 1;
        self.snapshot()
    }

    fn dispatch(&mut self, notification: Notification) -> Outcome {
        match notification {
            Notification::PropertyChanged { field, value } => {
                self.handle_property_changed(&field, value)
            }
            Notification::CameraDump { properties } => self.handle_camera_dump(&properties),
            Notification::AllowedValuesChanged { allowed } => self.handle_allowed_values(&allowed),
            Notification::StatusChanged { status } => self.handle_status_changed(&status),
            Notification::TallyChanged { tally } => self.handle_tally_changed(tally),
            Notification::TallySourcesChanged { sources } => self.handle_tally_sources(&sources),
            Notification::SwitcherInputChanged { id } => self.handle_switcher_input_changed(id),
            Notification::AuxContentChanged { aux } => self.handle_aux_content_changed(aux),
            Notification::SelectedModeChanged { mode } => self.handle_selected_mode_changed(mode),
        }
    }
}
