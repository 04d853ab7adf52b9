// SPDX-License-Identifier: GPL-3.0-only

//! Change highlighting
//!
//! Maps the most recently updated property to the logical display field it
//! drives. At most one group is highlighted at a time and it stays lit until
//! the next accepted update.

use crate::engine::types::{LogicalField, PropertyName};

/// Highlight group a property belongs to, if any
pub fn group_of(name: PropertyName) -> Option<LogicalField> {
    match name {
        PropertyName::ShutterSpeed => Some(LogicalField::ShutterSpeed),
        PropertyName::Aperture => Some(LogicalField::Aperture),
        PropertyName::Iso => Some(LogicalField::Iso),
        PropertyName::ExposureCompensation => Some(LogicalField::ExposureCompensation),
        PropertyName::WhiteBalance
        | PropertyName::WhiteBalanceAdjustA
        | PropertyName::WhiteBalanceAdjustB
        | PropertyName::ColorTemperature => Some(LogicalField::WhiteBalance),
        PropertyName::MovieServoAf | PropertyName::ManualFocusDrive => Some(LogicalField::Focus),
        PropertyName::CameraModel
        | PropertyName::LensName
        | PropertyName::AutoExposureMode
        | PropertyName::AutoExposureModeDial
        | PropertyName::SelectedMode => None,
    }
}

/// Whether `field` is lit for the given `last_changed` marker
pub fn is_highlighted(field: LogicalField, last_changed: Option<PropertyName>) -> bool {
    let Some(group) = last_changed.and_then(group_of) else {
        return false;
    };
    match field {
        // Both white balance renditions light up together
        LogicalField::WhiteBalanceOverlay => group == LogicalField::WhiteBalance,
        LogicalField::SwitcherInput | LogicalField::AutoExposure | LogicalField::Camera => false,
        field => group == field,
    }
}

/// Logical field framed by the external mode selector
///
/// The controller names modes after properties, except white balance
/// which it calls "wb".
pub fn selected_field(mode: Option<&str>) -> Option<LogicalField> {
    match mode? {
        "shutterspeed" => Some(LogicalField::ShutterSpeed),
        "aperture" => Some(LogicalField::Aperture),
        "iso" => Some(LogicalField::Iso),
        "exposurecompensation" => Some(LogicalField::ExposureCompensation),
        "wb" | "whitebalance" => Some(LogicalField::WhiteBalance),
        "focus" | "movieservoaf" | "manualfocusdrive" => Some(LogicalField::Focus),
        _ => None,
    }
}

/// Whether `field` carries the selection frame
pub fn is_selected(field: LogicalField, mode: Option<&str>) -> bool {
    match selected_field(mode) {
        Some(LogicalField::WhiteBalance) => {
            matches!(field, LogicalField::WhiteBalance | LogicalField::WhiteBalanceOverlay)
        }
        Some(selected) => selected == field,
        None => false,
    }
}

/// Property whose allowed values belong to the selected mode
pub fn selected_property(mode: Option<&str>) -> Option<PropertyName> {
    match selected_field(mode)? {
        LogicalField::ShutterSpeed => Some(PropertyName::ShutterSpeed),
        LogicalField::Aperture => Some(PropertyName::Aperture),
        LogicalField::Iso => Some(PropertyName::Iso),
        LogicalField::ExposureCompensation => Some(PropertyName::ExposureCompensation),
        LogicalField::WhiteBalance => Some(PropertyName::WhiteBalance),
        LogicalField::Focus => Some(PropertyName::MovieServoAf),
        _ => None,
    }
}
