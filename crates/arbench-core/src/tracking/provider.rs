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

use super::{
    Anchor, CameraConfig, CameraConfigFilter, DepthMode, DisplayRotation, EventTrack, Frame,
    HitResult, PlaybackStatus, RecordingStatus, SessionConfig, Trackable, TrackableKind,
    TrackingError,
};
use crate::math::Vec2;
use crate::renderer::TextureId;
use std::path::Path;

/// The kind of hit test to run for a tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitTestMode {
    /// Intersect the tap ray with known geometry.
    Ray,
    /// Like [`HitTestMode::Ray`], but fall back to an instant-placement point at
    /// the given distance along the ray when nothing is hit.
    InstantPlacement {
        /// Assumed distance to the surface, in meters.
        approximate_distance_m: f32,
    },
}

/// The contract of a tracking runtime, live or replaying a recording.
///
/// All calls happen on the render thread, so implementations need not be
/// `Send`.
pub trait TrackingProvider {
    /// Applies a session configuration. May be called again while paused.
    fn configure(&mut self, config: &SessionConfig) -> Result<(), TrackingError>;

    /// Lists the camera configs that pass `filter`, preferred first.
    fn supported_camera_configs(&self, filter: &CameraConfigFilter) -> Vec<CameraConfig>;

    /// Returns whether the device supports the given depth mode.
    fn is_depth_mode_supported(&self, mode: DepthMode) -> bool;

    /// Selects a recording to play back instead of the live camera.
    fn set_playback_dataset(&mut self, path: &Path) -> Result<(), TrackingError>;

    /// Starts or resumes the session.
    fn resume(&mut self) -> Result<(), TrackingError>;

    /// Pauses the session. Frames must not be requested until resumed.
    fn pause(&mut self);

    /// Releases every runtime resource. The provider is unusable afterwards.
    fn close(&mut self);

    /// Binds the textures the camera image is streamed into.
    fn set_camera_texture_names(&mut self, names: &[TextureId]);

    /// Notifies the runtime of the display rotation and viewport size.
    fn set_display_geometry(&mut self, rotation: DisplayRotation, width: u32, height: u32);

    /// Produces the next frame.
    fn update(&mut self) -> Result<Frame, TrackingError>;

    /// Intersects a screen point with the known trackables of `frame`.
    /// Results are sorted nearest first.
    fn hit_test(&self, frame: &Frame, point: Vec2, mode: HitTestMode) -> Vec<HitResult>;

    /// Returns every trackable of the given kind known to the session.
    fn all_trackables(&self, kind: TrackableKind) -> Vec<Trackable>;

    /// Creates an anchor attached to the trackable of `hit`.
    fn create_anchor(&mut self, hit: &HitResult) -> Result<Anchor, TrackingError>;

    /// Refreshes the pose and tracking status of an anchor after an update.
    fn sync_anchor(&self, anchor: &mut Anchor);

    /// Current playback status.
    fn playback_status(&self) -> PlaybackStatus;

    /// Current recording status.
    fn recording_status(&self) -> RecordingStatus;

    /// Appends a payload to a track of the active recording.
    fn record_track_data(&mut self, track: EventTrack, payload: &[u8])
        -> Result<(), TrackingError>;
}
