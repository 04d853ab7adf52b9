// SPDX-License-Identifier: GPL-3.0-only

//! Notification handlers
//!
//! One handler per input. Each mutates state and reports whether a recompute
//! pass is due and whether the overlay countdown restarts.

use crate::engine::types::{AuxContent, PropertyValue, Tally, View};
use crate::engine::{Outcome, TelemetryEngine};
use std::collections::BTreeMap;
use tracing::{debug, info};

impl TelemetryEngine {
    // =========================================================================
    // Camera Handlers
    // =========================================================================

    pub(crate) fn handle_property_changed(&mut self, field: &str, value: PropertyValue) -> Outcome {
        match self.camera.update(field, value) {
            Ok(_) => Outcome::ACCEPTED,
            // Already logged by the store
            Err(_) => Outcome::REJECTED,
        }
    }

    pub(crate) fn handle_camera_dump(&mut self, properties: &BTreeMap<String, PropertyValue>) -> Outcome {
        if self.camera.apply_dump(properties) {
            Outcome::ACCEPTED
        } else {
            Outcome::REJECTED
        }
    }

    pub(crate) fn handle_allowed_values(&mut self, allowed: &BTreeMap<String, Vec<String>>) -> Outcome {
        if self.camera.set_allowed(allowed) {
            Outcome::ACCEPTED
        } else {
            Outcome::REJECTED
        }
    }

    pub(crate) fn handle_status_changed(&mut self, status: &str) -> Outcome {
        let before = self.camera.status();
        self.camera.set_status(status);
        if before != self.camera.status() {
            info!(camera = %self.camera_name, status = ?self.camera.status(), "Camera status changed");
        }
        Outcome::ACCEPTED
    }

    pub(crate) fn handle_selected_mode_changed(&mut self, mode: Option<String>) -> Outcome {
        debug!(mode = ?mode, "Selected mode changed");
        self.camera.set_selected_mode(mode);
        Outcome::ACCEPTED
    }

    // =========================================================================
    // Switcher Handlers
    // =========================================================================

    pub(crate) fn handle_tally_changed(&mut self, tally: Tally) -> Outcome {
        debug!(tally = ?tally, "Tally updated");
        self.camera.set_tally(tally);
        Outcome::TRIGGER
    }

    /// Resolve the switcher's full tally map for the tracked camera
    ///
    /// Maps that do not mention our input are ignored.
    pub(crate) fn handle_tally_sources(&mut self, sources: &BTreeMap<String, (bool, bool)>) -> Outcome {
        let Some(input) = self.camera.switcher_input() else {
            debug!("No switcher input assigned, ignoring tally sources");
            return Outcome::REJECTED;
        };
        let Some(&(is_program, is_preview)) = sources.get(input) else {
            debug!(input = %input, "Tally sources do not mention our input");
            return Outcome::REJECTED;
        };
        self.handle_tally_changed(Tally::from_flags(is_program, is_preview))
    }

    /// A new input id while the camera screen is up counts as a camera switch
    pub(crate) fn handle_switcher_input_changed(&mut self, id: String) -> Outcome {
        let view = self.view();
        let changed = self.camera.set_switcher_input(id);
        if changed && view == View::CameraOnline {
            info!(
                camera = %self.camera_name,
                input = self.camera.switcher_input().unwrap_or_default(),
                "Camera switched"
            );
            Outcome::TRIGGER
        } else {
            Outcome::ACCEPTED
        }
    }

    pub(crate) fn handle_aux_content_changed(&mut self, aux: AuxContent) -> Outcome {
        self.switcher.set_aux_content(aux);
        Outcome::TRIGGER
    }
}
