// SPDX-License-Identifier: GPL-3.0-only

//! Top-level view selection

use crate::engine::types::{AuxContent, CameraStatus, View};

/// Pick the screen to show; the first matching rule wins
///
/// 1. Aux output on multiview shows the multiview screen, whatever the camera does.
/// 2. A camera that is not online shows the offline screen.
/// 3. Otherwise the camera screen.
pub fn select_view(aux: &AuxContent, status: CameraStatus) -> View {
    match (aux, status) {
        (AuxContent::Multiview, _) => View::AuxMultiview,
        (_, CameraStatus::Online) => View::CameraOnline,
        (_, CameraStatus::Offline) => View::CameraOffline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiview_overrides_offline() {
        assert_eq!(
            select_view(&AuxContent::from("MVW"), CameraStatus::Offline),
            View::AuxMultiview
        );
        assert_eq!(
            select_view(&AuxContent::from("MVW"), CameraStatus::Online),
            View::AuxMultiview
        );
    }

    #[test]
    fn test_camera_views() {
        assert_eq!(
            select_view(&AuxContent::from("CAM2"), CameraStatus::Online),
            View::CameraOnline
        );
        assert_eq!(
            select_view(&AuxContent::from("CAM2"), CameraStatus::Offline),
            View::CameraOffline
        );
        assert_eq!(
            select_view(&AuxContent::default(), CameraStatus::Offline),
            View::CameraOffline
        );
    }

    #[test]
    fn test_selection_is_idempotent() {
        let aux = AuxContent::from("CAM1");
        let first = select_view(&aux, CameraStatus::Online);
        assert_eq!(select_view(&aux, CameraStatus::Online), first);
    }
}
