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

//! The tracking data model and the contract of the tracking runtime.
//!
//! A [`TrackingProvider`] produces one immutable [`Frame`] per tick. Frames
//! carry the camera, the light estimate, the point cloud, an optional depth
//! image and the event-track data embedded in a recording. Anchors and hit
//! results refer back to [`Trackable`]s reported by the provider.

mod config;
mod error;
mod frame;
mod light;
mod playback;
mod pose;
mod provider;
mod session;
mod trackable;

pub use self::config::{
    CameraConfig, CameraConfigFilter, DepthMode, InstantPlacementMode, LightEstimationMode,
    SessionConfig, StereoCameraUsage, UpdateMode,
};
pub use self::error::TrackingError;
pub use self::frame::{Camera, DepthImage, DisplayRotation, Frame, PointCloud};
pub use self::light::{CubemapHandle, LightEstimate, LightEstimateState, SPHERICAL_HARMONICS_LEN};
pub use self::playback::{EventTrack, PlaybackEvent, PlaybackStatus, RecordingStatus};
pub use self::pose::Pose;
pub use self::provider::{HitTestMode, TrackingProvider};
pub use self::session::{SessionState, TrackingSession};
pub use self::trackable::{
    Anchor, AnchorId, DepthPoint, HitResult, InstantPlacementPoint, Plane, Point,
    PointOrientationMode, Trackable, TrackableId, TrackableKind, TrackingState,
};
