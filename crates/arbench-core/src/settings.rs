// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! User-facing session settings as plain values.
//!
//! Hosts show their own settings UI: they read [`SessionSettings::choices`],
//! let the user edit the copy, then apply it with [`SessionSettings::commit`]
//! and reconfigure the session.

use crate::tracking::{
    CameraConfigFilter, DepthMode, InstantPlacementMode, LightEstimationMode, SessionConfig,
    StereoCameraUsage, UpdateMode,
};
use serde::{Deserialize, Serialize};

/// Depth-related preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthSettings {
    /// Occlude virtual content with the depth image.
    pub use_depth_for_occlusion: bool,
    /// Render the depth image as a color overlay.
    pub depth_color_visualization_enabled: bool,
    /// Whether the user has already been asked to enable depth occlusion.
    pub depth_enable_dialog_shown: bool,
}

impl DepthSettings {
    /// Returns true the first time it is called, then false forever.
    ///
    /// The flag flips as a side effect, so callers must persist the settings
    /// afterwards for the answer to survive restarts.
    pub fn should_show_depth_enable_dialog(&mut self) -> bool {
        let show = !self.depth_enable_dialog_shown;
        self.depth_enable_dialog_shown = true;
        show
    }

    /// Whether any depth feature is requested.
    pub fn depth_requested(&self) -> bool {
        self.use_depth_for_occlusion || self.depth_color_visualization_enabled
    }
}

/// Instant placement preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstantPlacementSettings {
    /// Place anchors at an approximate distance before surfaces are found.
    pub enabled: bool,
}

/// The editable subset of the settings, as shown in a settings menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsChoices {
    /// Depth occlusion checkbox.
    pub use_depth_for_occlusion: bool,
    /// Depth visualization checkbox.
    pub depth_color_visualization_enabled: bool,
    /// Instant placement checkbox.
    pub instant_placement_enabled: bool,
}

/// All session preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Depth preferences.
    pub depth: DepthSettings,
    /// Instant placement preferences.
    pub instant_placement: InstantPlacementSettings,
}

impl SessionSettings {
    /// The current values of every editable setting.
    pub fn choices(&self) -> SettingsChoices {
        SettingsChoices {
            use_depth_for_occlusion: self.depth.use_depth_for_occlusion,
            depth_color_visualization_enabled: self.depth.depth_color_visualization_enabled,
            instant_placement_enabled: self.instant_placement.enabled,
        }
    }

    /// Applies edited choices. The dialog flag is left untouched.
    pub fn commit(&mut self, choices: SettingsChoices) {
        self.depth.use_depth_for_occlusion = choices.use_depth_for_occlusion;
        self.depth.depth_color_visualization_enabled = choices.depth_color_visualization_enabled;
        self.instant_placement.enabled = choices.instant_placement_enabled;
    }

    /// Builds the tracking configuration for these settings.
    ///
    /// Depth stays disabled unless `allow_depth` is set, the device supports
    /// it and a depth feature is requested.
    pub fn session_config(&self, depth_supported: bool, allow_depth: bool) -> SessionConfig {
        let depth_mode = if allow_depth && depth_supported && self.depth.depth_requested() {
            DepthMode::Automatic
        } else {
            DepthMode::Disabled
        };
        let instant_placement_mode = if self.instant_placement.enabled {
            InstantPlacementMode::LocalYUp
        } else {
            InstantPlacementMode::Disabled
        };
        SessionConfig {
            light_estimation_mode: LightEstimationMode::EnvironmentalHdr,
            depth_mode,
            instant_placement_mode,
            update_mode: UpdateMode::LatestCameraImage,
            camera_config_filter: CameraConfigFilter {
                stereo_usage: Some(StereoCameraUsage::RequireAndUse),
            },
            camera_config: None,
        }
    }
}

/// Loads and saves [`SessionSettings`] across runs.
pub trait SettingsStore {
    /// Reads the stored settings, or the defaults when nothing is stored.
    fn load(&self) -> anyhow::Result<SessionSettings>;

    /// Replaces the stored settings.
    fn save(&self, settings: &SessionSettings) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_dialog_is_shown_once() {
        let mut depth = DepthSettings::default();
        assert!(depth.should_show_depth_enable_dialog());
        assert!(!depth.should_show_depth_enable_dialog());
        assert!(depth.depth_enable_dialog_shown);
    }

    #[test]
    fn commit_then_choices_round_trip() {
        let mut settings = SessionSettings::default();
        settings.depth.depth_enable_dialog_shown = true;
        let choices = SettingsChoices {
            use_depth_for_occlusion: true,
            depth_color_visualization_enabled: false,
            instant_placement_enabled: true,
        };
        settings.commit(choices);
        assert_eq!(settings.choices(), choices);
        assert!(settings.depth.depth_enable_dialog_shown);
    }

    #[test]
    fn depth_is_forced_off_unless_allowed() {
        let mut settings = SessionSettings::default();
        settings.depth.use_depth_for_occlusion = true;
        assert_eq!(
            settings.session_config(true, false).depth_mode,
            DepthMode::Disabled
        );
        assert_eq!(
            settings.session_config(false, true).depth_mode,
            DepthMode::Disabled
        );
        assert_eq!(
            settings.session_config(true, true).depth_mode,
            DepthMode::Automatic
        );
    }

    #[test]
    fn session_config_fixed_modes() {
        let mut settings = SessionSettings::default();
        let config = settings.session_config(false, false);
        assert_eq!(
            config.light_estimation_mode,
            LightEstimationMode::EnvironmentalHdr
        );
        assert_eq!(config.update_mode, UpdateMode::LatestCameraImage);
        assert_eq!(config.instant_placement_mode, InstantPlacementMode::Disabled);
        assert_eq!(
            config.camera_config_filter.stereo_usage,
            Some(StereoCameraUsage::RequireAndUse)
        );

        settings.instant_placement.enabled = true;
        assert_eq!(
            settings.session_config(false, false).instant_placement_mode,
            InstantPlacementMode::LocalYUp
        );
    }
}
