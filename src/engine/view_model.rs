// SPDX-License-Identifier: GPL-3.0-only

//! Render-agnostic view model
//!
//! One immutable [`ViewModel`] is assembled per recompute pass. It owns all
//! of its data, so renderers can hold on to it while the engine moves on.

use crate::engine::formatting::{self, Surface};
use crate::engine::highlight;
use crate::engine::state::{CameraState, SwitcherState};
use crate::engine::types::{LogicalField, PropertyName, Tally, View};
use crate::engine::view::select_view;
use crate::errors::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// One display field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldView {
    pub text: String,
    /// Freshly changed
    pub highlighted: bool,
    /// Framed by the mode selector
    pub selected: bool,
}

/// Snapshot handed to renderers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    /// Increments with every recompute pass
    pub revision: u64,
    pub view: View,
    pub fields: BTreeMap<LogicalField, FieldView>,
    pub overlay_visible: bool,
    pub tally: Tally,
    pub camera_name: String,
    pub status_text: String,
    pub selected_mode: Option<String>,
    /// Allowed values of the property behind the selected mode
    pub selected_choices: Vec<String>,
}

impl ViewModel {
    /// Field view, or an empty one
    pub fn field(&self, field: LogicalField) -> FieldView {
        self.fields.get(&field).cloned().unwrap_or_default()
    }

    pub fn text(&self, field: LogicalField) -> &str {
        self.fields.get(&field).map(|f| f.text.as_str()).unwrap_or("")
    }

    /// Fields currently highlighted, in display order
    pub fn highlighted_fields(&self) -> Vec<LogicalField> {
        self.fields
            .iter()
            .filter(|(_, v)| v.highlighted)
            .map(|(k, _)| *k)
            .collect()
    }

    /// One-line summary used by the replay command
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("#{} {}", self.revision, self.view.display_name())];
        if self.view == View::CameraOnline {
            for field in [
                LogicalField::Aperture,
                LogicalField::ShutterSpeed,
                LogicalField::ExposureCompensation,
                LogicalField::Iso,
                LogicalField::WhiteBalance,
                LogicalField::Focus,
            ] {
                let view = self.field(field);
                if view.text.is_empty() {
                    continue;
                }
                if view.highlighted {
                    parts.push(format!("[{}]", view.text));
                } else {
                    parts.push(view.text);
                }
            }
        }
        if self.tally != Tally::None {
            parts.push(format!("tally={}", self.tally.display_name()));
        }
        if self.overlay_visible {
            parts.push("overlay".to_string());
        }
        parts.join(" | ")
    }
}

/// Texts for every logical field, logging composites that fell back to empty
fn field_texts(camera: &CameraState) -> BTreeMap<LogicalField, String> {
    let fallible: [(LogicalField, Result<String, EngineError>); 3] = [
        (
            LogicalField::WhiteBalance,
            formatting::try_white_balance_text(camera, Surface::Handheld),
        ),
        (
            LogicalField::WhiteBalanceOverlay,
            formatting::try_white_balance_text(camera, Surface::Overlay),
        ),
        (
            LogicalField::ExposureCompensation,
            formatting::try_ev_text(camera),
        ),
    ];

    let mut texts = BTreeMap::new();
    for (field, result) in fallible {
        let text = result.unwrap_or_else(|e| {
            debug!(field = field.name(), error = %e, "Rendering composite as empty");
            String::new()
        });
        texts.insert(field, text);
    }

    texts.insert(LogicalField::ShutterSpeed, formatting::shutterspeed_text(camera));
    texts.insert(LogicalField::Aperture, formatting::aperture_text(camera));
    texts.insert(LogicalField::Iso, formatting::iso_text(camera));
    texts.insert(LogicalField::Focus, formatting::focus_text(camera));
    texts.insert(LogicalField::AutoExposure, formatting::autoexposure_text(camera));
    texts.insert(LogicalField::Camera, formatting::camera_label_text(camera));
    texts.insert(
        LogicalField::SwitcherInput,
        camera.switcher_input().unwrap_or_default().to_string(),
    );
    texts
}

/// Compose one snapshot from the current engine state
pub fn assemble(
    revision: u64,
    camera_name: &str,
    camera: &CameraState,
    switcher: &SwitcherState,
    overlay_visible: bool,
) -> ViewModel {
    let last_changed = camera.last_changed();
    let selected_mode = camera.selected_mode();
    let mode = selected_mode.as_deref();

    let fields = field_texts(camera)
        .into_iter()
        .map(|(field, text)| {
            let view = FieldView {
                text,
                highlighted: highlight::is_highlighted(field, last_changed),
                selected: highlight::is_selected(field, mode),
            };
            (field, view)
        })
        .collect();

    let selected_choices = highlight::selected_property(mode)
        .map(|name: PropertyName| camera.allowed(name).to_vec())
        .unwrap_or_default();

    ViewModel {
        revision,
        view: select_view(switcher.aux_content(), camera.status()),
        fields,
        overlay_visible,
        tally: camera.tally(),
        camera_name: camera_name.to_string(),
        status_text: camera.status_text().to_string(),
        selected_mode,
        selected_choices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::AuxContent;

    #[test]
    fn test_assemble_empty_state() {
        let vm = assemble(0, "cam", &CameraState::default(), &SwitcherState::default(), false);
        assert_eq!(vm.view, View::CameraOffline);
        assert_eq!(vm.fields.len(), LogicalField::ALL.len());
        assert!(vm.highlighted_fields().is_empty());
        assert_eq!(vm.text(LogicalField::Focus), "MF");
        assert_eq!(vm.text(LogicalField::WhiteBalance), "");
        assert!(!vm.overlay_visible);
    }

    #[test]
    fn test_assemble_online_with_highlight() {
        let mut camera = CameraState::new(Some("3".to_string()));
        camera.set_status("online");
        camera.update("aperture", "4".into()).unwrap();
        camera.update("iso", "800".into()).unwrap();
        camera.set_selected_mode(Some("aperture".to_string()));

        let mut switcher = SwitcherState::default();
        switcher.set_aux_content(AuxContent::from("CAM3"));

        let vm = assemble(5, "rp", &camera, &switcher, true);
        assert_eq!(vm.revision, 5);
        assert_eq!(vm.view, View::CameraOnline);
        assert_eq!(vm.highlighted_fields(), [LogicalField::Iso]);
        assert_eq!(vm.text(LogicalField::Iso), "ISO 800");
        assert_eq!(vm.text(LogicalField::SwitcherInput), "3");
        assert!(vm.field(LogicalField::Aperture).selected);
        assert!(!vm.field(LogicalField::Iso).selected);
        assert!(vm.overlay_visible);
        assert_eq!(vm.camera_name, "rp");
    }

    #[test]
    fn test_selected_choices() {
        let mut camera = CameraState::default();
        let mut allowed = BTreeMap::new();
        allowed.insert("iso".to_string(), vec!["100".to_string(), "200".to_string()]);
        assert!(camera.set_allowed(&allowed));
        camera.set_selected_mode(Some("iso".to_string()));

        let vm = assemble(1, "cam", &camera, &SwitcherState::default(), false);
        assert_eq!(vm.selected_choices, ["100", "200"]);
    }

    #[test]
    fn test_snapshot_serializes_with_wire_names() {
        let mut camera = CameraState::default();
        camera.update("shutterspeed", "1/50".into()).unwrap();
        let vm = assemble(1, "cam", &camera, &SwitcherState::default(), false);
        let json = serde_json::to_value(&vm).unwrap();
        assert_eq!(json["view"], "camera_offline");
        assert_eq!(json["fields"]["shutterspeed"]["text"], "1/50s");
        assert_eq!(json["fields"]["shutterspeed"]["highlighted"], true);
    }

    #[test]
    fn test_summary_marks_highlight() {
        let mut camera = CameraState::default();
        camera.set_status("online");
        camera.update("aperture", "2.8".into()).unwrap();
        let vm = assemble(2, "cam", &camera, &SwitcherState::default(), true);
        let summary = vm.summary();
        assert!(summary.starts_with("#2 Camera online"));
        assert!(summary.contains("[F/2.8]"));
        assert!(summary.ends_with("overlay"));
    }
}
