// SPDX-License-Identifier: GPL-3.0-only

//! Normalized engine inputs
//!
//! Transport adapters decode whatever they receive (MQTT topics, JSON
//! payloads) into these. The serde form is tagged by `"event"`:
//!
//! ```json
//! {"event": "property_changed", "field": "iso", "value": "400"}
//! {"event": "aux_content_changed", "aux": "MVW"}
//! ```

use crate::engine::types::{AuxContent, PropertyValue, Tally};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    /// One camera property arrived
    PropertyChanged {
        field: String,
        #[serde(default)]
        value: PropertyValue,
    },
    /// Full state published by the camera node
    CameraDump { properties: BTreeMap<String, PropertyValue> },
    /// Allowed values per property
    AllowedValuesChanged { allowed: BTreeMap<String, Vec<String>> },
    /// Raw status payload from the camera node
    StatusChanged { status: String },
    TallyChanged { tally: Tally },
    /// Switcher tally map: input id -> (program, preview)
    TallySourcesChanged { sources: BTreeMap<String, (bool, bool)> },
    /// Switcher input assigned to the tracked camera
    SwitcherInputChanged { id: String },
    AuxContentChanged { aux: AuxContent },
    /// Mode picked by the external controller; `None` clears it
    SelectedModeChanged {
        #[serde(default)]
        mode: Option<String>,
    },
}

impl Notification {
    pub fn property(field: &str, value: impl Into<PropertyValue>) -> Self {
        Notification::PropertyChanged {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn status(status: &str) -> Self {
        Notification::StatusChanged {
            status: status.to_string(),
        }
    }

    pub fn aux(aux: &str) -> Self {
        Notification::AuxContentChanged { aux: aux.into() }
    }

    pub fn switcher_input(id: &str) -> Self {
        Notification::SwitcherInputChanged { id: id.to_string() }
    }

    pub fn selected_mode(mode: &str) -> Self {
        Notification::SelectedModeChanged {
            mode: Some(mode.to_string()),
        }
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::PropertyChanged { .. } => "property_changed",
            Notification::CameraDump { .. } => "camera_dump",
            Notification::AllowedValuesChanged { .. } => "allowed_values_changed",
            Notification::StatusChanged { .. } => "status_changed",
            Notification::TallyChanged { .. } => "tally_changed",
            Notification::TallySourcesChanged { .. } => "tally_sources_changed",
            Notification::SwitcherInputChanged { .. } => "switcher_input_changed",
            Notification::AuxContentChanged { .. } => "aux_content_changed",
            Notification::SelectedModeChanged { .. } => "selected_mode_changed",
        }
    }
}
