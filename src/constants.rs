// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Aux source id the switcher publishes for the multiview layout
pub const AUX_MULTIVIEW: &str = "MVW";

/// Camera status payload meaning the camera node is up
pub const STATUS_ONLINE: &str = "online";

/// White balance value that switches the main text to the color temperature
pub const WB_COLOR_TEMPERATURE: &str = "Color Temperature";

/// White balance value that gets the "WB " prefix on the overlay surface
pub const WB_AUTO: &str = "Auto";

/// `movieservoaf` value meaning continuous autofocus is active
pub const SERVO_AF_ON: &str = "On";

/// Timing constants
pub mod timing {
    use super::Duration;

    /// How long the full camera info overlay stays up after a trigger
    pub const OVERLAY_DURATION_MS: u64 = 2500;

    /// [`OVERLAY_DURATION_MS`] as a `Duration`
    pub const OVERLAY_DURATION: Duration = Duration::from_millis(OVERLAY_DURATION_MS);

    /// Terminal renderer poll interval
    pub const RENDER_POLL_INTERVAL: Duration = Duration::from_millis(16);
}

/// Engine channel sizing
pub mod channels {
    /// Pending notifications before senders start to wait
    pub const NOTIFICATION_CAPACITY: usize = 64;
}

/// Tally indicator colors
///
/// These are the RGB triplets the camera nodes drive their preview LED with.
pub mod tally_colors {
    /// On-air
    pub const PROGRAM: (u8, u8, u8) = (50, 0, 0);
    /// Queued as next
    pub const PREVIEW: (u8, u8, u8) = (0, 20, 0);
    /// Neither
    pub const NONE: (u8, u8, u8) = (0, 0, 0);
}

/// Application information utilities
pub mod app_info {
    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }

    /// Application directory name under the user config dir
    pub const CONFIG_DIR_NAME: &str = "camera-telemetry";

    /// Config file name inside [`CONFIG_DIR_NAME`]
    pub const CONFIG_FILE_NAME: &str = "config.json";
}
