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

//! Session configuration handed to the tracking runtime.

use serde::{Deserialize, Serialize};

/// Light estimation produced by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LightEstimationMode {
    /// No light estimation.
    Disabled,
    /// A single ambient intensity value.
    AmbientIntensity,
    /// Main light, spherical harmonics and an HDR cubemap.
    #[default]
    EnvironmentalHdr,
}

/// Depth image production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DepthMode {
    /// No depth images.
    #[default]
    Disabled,
    /// Depth images produced automatically when supported.
    Automatic,
}

/// Instant placement behavior of hit tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InstantPlacementMode {
    /// Instant placement hit tests are not available.
    #[default]
    Disabled,
    /// Instant placement points with a Y-up local frame.
    LocalYUp,
}

/// How `update()` waits for camera images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpdateMode {
    /// Block until a new camera image is available.
    Blocking,
    /// Return immediately with the latest camera image.
    #[default]
    LatestCameraImage,
}

/// Whether a camera config uses the stereo camera pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StereoCameraUsage {
    /// The stereo pair is required and used.
    RequireAndUse,
    /// The stereo pair is not used.
    DoNotUse,
}

/// One camera configuration supported by the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Runtime identifier of the config.
    pub id: u32,
    /// Camera image width in pixels.
    pub width: u32,
    /// Camera image height in pixels.
    pub height: u32,
    /// Stereo usage of the config.
    pub stereo_usage: StereoCameraUsage,
}

/// A filter over the supported camera configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CameraConfigFilter {
    /// Required stereo usage, or `None` to accept any.
    pub stereo_usage: Option<StereoCameraUsage>,
}

impl CameraConfigFilter {
    /// Returns whether `config` passes the filter.
    pub fn matches(&self, config: &CameraConfig) -> bool {
        match self.stereo_usage {
            Some(usage) => usage == config.stereo_usage,
            None => true,
        }
    }
}

/// The full configuration applied to a tracking session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Light estimation mode.
    pub light_estimation_mode: LightEstimationMode,
    /// Depth mode.
    pub depth_mode: DepthMode,
    /// Instant placement mode.
    pub instant_placement_mode: InstantPlacementMode,
    /// Update mode.
    pub update_mode: UpdateMode,
    /// Filter used to pick the camera config.
    pub camera_config_filter: CameraConfigFilter,
    /// The chosen camera config, or `None` to keep the runtime default.
    pub camera_config: Option<CameraConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(stereo_usage: StereoCameraUsage) -> CameraConfig {
        CameraConfig {
            id: 0,
            width: 640,
            height: 480,
            stereo_usage,
        }
    }

    #[test]
    fn empty_filter_accepts_everything() {
        let filter = CameraConfigFilter::default();
        assert!(filter.matches(&config(StereoCameraUsage::DoNotUse)));
        assert!(filter.matches(&config(StereoCameraUsage::RequireAndUse)));
    }

    #[test]
    fn stereo_filter_rejects_mono() {
        let filter = CameraConfigFilter {
            stereo_usage: Some(StereoCameraUsage::RequireAndUse),
        };
        assert!(!filter.matches(&config(StereoCameraUsage::DoNotUse)));
        assert!(filter.matches(&config(StereoCameraUsage::RequireAndUse)));
    }
}
