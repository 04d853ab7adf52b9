// SPDX-License-Identifier: GPL-3.0-only

//! Engine state
//!
//! [`CameraState`] is the property store for the one tracked camera,
//! [`SwitcherState`] holds what the video switcher reports. Both are mutated
//! in place by the engine task only.

use crate::engine::types::{AuxContent, CameraStatus, PropertyName, PropertyValue, Tally};
use crate::errors::EngineError;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Current camera properties and the most recently updated one
///
/// Invariant: `last_changed` is either `None` or a key present in `fields`.
#[derive(Debug, Clone, Default)]
pub struct CameraState {
    status: CameraStatus,
    /// Raw status payload, e.g. an error description from the camera node
    status_text: String,
    fields: BTreeMap<PropertyName, PropertyValue>,
    last_changed: Option<PropertyName>,
    /// Allowed values per property as published by the camera node
    allowed: BTreeMap<PropertyName, Vec<String>>,
    tally: Tally,
    switcher_input: Option<String>,
}

impl CameraState {
    pub fn new(switcher_input: Option<String>) -> Self {
        Self {
            switcher_input,
            ..Self::default()
        }
    }

    /// Store a property value
    ///
    /// Every accepted update counts as a change, even when the value is
    /// identical to the stored one, so `last_changed` always moves.
    /// Unknown names are rejected without touching any state.
    pub fn update(&mut self, field: &str, value: PropertyValue) -> Result<PropertyName, EngineError> {
        let name = match field.parse::<PropertyName>() {
            Ok(name) => name,
            Err(e) => {
                warn!(field = %field, "Rejecting update for unknown camera property");
                return Err(e);
            }
        };
        debug!(field = %name, value = %value, "Camera property updated");
        self.fields.insert(name, value);
        self.last_changed = Some(name);
        Ok(name)
    }

    /// Apply a full state dump from the camera node
    ///
    /// Keys are applied in ascending name order. Entries equal to the stored
    /// value are skipped so that re-publishing the whole state does not
    /// highlight untouched fields. Returns true if anything was stored.
    pub fn apply_dump(&mut self, dump: &BTreeMap<String, PropertyValue>) -> bool {
        let mut accepted = false;
        for (field, value) in dump {
            let Ok(name) = field.parse::<PropertyName>() else {
                warn!(field = %field, "Ignoring unknown camera property in dump");
                continue;
            };
            if self.fields.get(&name) == Some(value) {
                continue;
            }
            self.fields.insert(name, value.clone());
            self.last_changed = Some(name);
            accepted = true;
        }
        debug!(accepted, entries = dump.len(), "Camera dump applied");
        accepted
    }

    /// Store allowed value lists; unknown keys are dropped
    ///
    /// Returns true if any list was stored.
    pub fn set_allowed(&mut self, allowed: &BTreeMap<String, Vec<String>>) -> bool {
        let mut stored = false;
        for (field, values) in allowed {
            match field.parse::<PropertyName>() {
                Ok(name) => {
                    self.allowed.insert(name, values.clone());
                    stored = true;
                }
                Err(_) => warn!(field = %field, "Ignoring allowed values for unknown property"),
            }
        }
        stored
    }

    /// Store the externally selected mode without moving `last_changed`
    pub fn set_selected_mode(&mut self, mode: Option<String>) {
        let value = mode.map(PropertyValue::Text).unwrap_or_default();
        self.fields.insert(PropertyName::SelectedMode, value);
    }

    /// Set status from a raw payload; `last_changed` is untouched
    pub fn set_status(&mut self, payload: &str) {
        self.status = CameraStatus::from_payload(payload);
        self.status_text = payload.to_string();
    }

    pub fn set_tally(&mut self, tally: Tally) {
        self.tally = tally;
    }

    /// Assign the switcher input; returns true if the identity changed
    pub fn set_switcher_input(&mut self, id: String) -> bool {
        let changed = self.switcher_input.as_deref() != Some(id.as_str());
        self.switcher_input = Some(id);
        changed
    }

    /// Current value or the empty value; never fails
    pub fn get(&self, name: PropertyName) -> &PropertyValue {
        const EMPTY: &PropertyValue = &PropertyValue::Empty;
        self.fields.get(&name).unwrap_or(EMPTY)
    }

    /// Current value rendered as text, empty if absent
    pub fn text(&self, name: PropertyName) -> String {
        self.get(name).to_string()
    }

    pub fn status(&self) -> CameraStatus {
        self.status
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn last_changed(&self) -> Option<PropertyName> {
        self.last_changed
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn switcher_input(&self) -> Option<&str> {
        self.switcher_input.as_deref()
    }

    pub fn selected_mode(&self) -> Option<String> {
        let value = self.get(PropertyName::SelectedMode);
        (!value.is_empty()).then(|| value.to_string())
    }

    pub fn allowed(&self, name: PropertyName) -> &[String] {
        self.allowed.get(&name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// What the video switcher reports
#[derive(Debug, Clone, Default)]
pub struct SwitcherState {
    aux_content: AuxContent,
}

impl SwitcherState {
    pub fn aux_content(&self) -> &AuxContent {
        &self.aux_content
    }

    pub fn set_aux_content(&mut self, aux: AuxContent) {
        debug!(aux = ?aux, "Switcher aux content updated");
        self.aux_content = aux;
    }
}
