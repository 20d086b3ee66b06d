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

//! A [`TrackingProvider`] that replays a recorded session.
//!
//! Frames are delivered one per update in capture order. Playback status is
//! `Ok` until the last frame has been delivered and `Finished` afterwards.
//! Taps are hit-tested geometrically against the planes and feature points
//! recorded with the current frame.

mod hit_test;
mod recording;

pub use hit_test::{
    hit_trackables, instant_placement_hit, intersect_plane, intersect_point, screen_ray, Ray,
    POINT_HIT_RADIUS_M,
};
pub use recording::{RecordedFrame, Recording};

use arbench_core::math::Vec2;
use arbench_core::renderer::TextureId;
use arbench_core::tracking::{
    Anchor, AnchorId, CameraConfig, CameraConfigFilter, DepthMode, DisplayRotation, EventTrack,
    Frame, HitResult, HitTestMode, InstantPlacementMode, PlaybackStatus, Plane, Point,
    RecordingStatus, SessionConfig, Trackable, TrackableId, TrackableKind, TrackingError,
    TrackingProvider, TrackingState,
};
use std::cell::Cell;
use std::path::{Path, PathBuf};

/// Ids handed to instant-placement points, above any recorded plane id.
const INSTANT_PLACEMENT_ID_BASE: u64 = 1 << 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplayState {
    Stopped,
    Running,
    Paused,
    Closed,
}

/// Replays a [`Recording`] as if it came from a live tracking runtime.
#[derive(Debug)]
pub struct RecordedSession {
    state: ReplayState,
    dataset: Option<PathBuf>,
    recording: Option<Recording>,
    cursor: usize,
    io_error: bool,
    config: SessionConfig,
    camera_textures: Vec<TextureId>,
    viewport: (u32, u32),
    rotation: DisplayRotation,
    geometry_changed: bool,
    current_planes: Vec<Plane>,
    current_points: Vec<Point>,
    next_instant_id: Cell<u64>,
}

impl Default for RecordedSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordedSession {
    /// Creates a session with no dataset. Call
    /// [`TrackingProvider::set_playback_dataset`] before resuming.
    pub fn new() -> Self {
        Self {
            state: ReplayState::Stopped,
            dataset: None,
            recording: None,
            cursor: 0,
            io_error: false,
            config: SessionConfig::default(),
            camera_textures: Vec::new(),
            viewport: (0, 0),
            rotation: DisplayRotation::default(),
            geometry_changed: false,
            current_planes: Vec::new(),
            current_points: Vec::new(),
            next_instant_id: Cell::new(INSTANT_PLACEMENT_ID_BASE),
        }
    }

    /// Creates a session that plays an in-memory recording.
    pub fn from_recording(recording: Recording) -> Self {
        Self {
            recording: Some(recording),
            ..Self::new()
        }
    }

    /// Simulates a read failure: playback status becomes `IoError`.
    pub fn inject_io_error(&mut self) {
        self.io_error = true;
    }

    /// The configuration last applied.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The dataset selected for playback, if any.
    pub fn dataset(&self) -> Option<&Path> {
        self.dataset.as_deref()
    }

    /// Textures the camera image is streamed into.
    pub fn camera_textures(&self) -> &[TextureId] {
        &self.camera_textures
    }

    /// Display rotation and viewport last reported by the host.
    pub fn display_geometry(&self) -> (DisplayRotation, u32, u32) {
        (self.rotation, self.viewport.0, self.viewport.1)
    }

    /// Number of frames delivered so far.
    pub fn frames_delivered(&self) -> usize {
        self.cursor
    }

    fn frame_count(&self) -> usize {
        self.recording.as_ref().map_or(0, |r| r.frames.len())
    }

    fn ensure_open(&self) -> Result<(), TrackingError> {
        if self.state == ReplayState::Closed {
            return Err(TrackingError::ProviderUnavailable(
                "the replay session is closed".to_string(),
            ));
        }
        Ok(())
    }

    fn mint_instant_placement_id(&self) -> TrackableId {
        let id = self.next_instant_id.get();
        self.next_instant_id.set(id + 1);
        TrackableId(id)
    }
}

impl TrackingProvider for RecordedSession {
    fn configure(&mut self, config: &SessionConfig) -> Result<(), TrackingError> {
        self.ensure_open()?;
        log::debug!("Replay configured: {config:?}");
        self.config = config.clone();
        Ok(())
    }

    fn supported_camera_configs(&self, filter: &CameraConfigFilter) -> Vec<CameraConfig> {
        self.recording
            .as_ref()
            .map(|r| {
                r.camera_configs
                    .iter()
                    .filter(|c| filter.matches(c))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_depth_mode_supported(&self, mode: DepthMode) -> bool {
        match mode {
            DepthMode::Disabled => true,
            DepthMode::Automatic => self.recording.as_ref().is_some_and(|r| r.depth_supported),
        }
    }

    fn set_playback_dataset(&mut self, path: &Path) -> Result<(), TrackingError> {
        self.ensure_open()?;
        if self.state == ReplayState::Running {
            return Err(TrackingError::PlaybackFailed(
                "cannot change the dataset while running".to_string(),
            ));
        }
        let recording =
            Recording::load(path).map_err(|e| TrackingError::PlaybackFailed(format!("{e:#}")))?;
        self.dataset = Some(path.to_path_buf());
        self.recording = Some(recording);
        self.cursor = 0;
        self.io_error = false;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), TrackingError> {
        self.ensure_open()?;
        if self.recording.is_none() {
            return Err(TrackingError::CameraUnavailable);
        }
        self.state = ReplayState::Running;
        Ok(())
    }

    fn pause(&mut self) {
        if self.state == ReplayState::Running {
            self.state = ReplayState::Paused;
        }
    }

    fn close(&mut self) {
        if self.state != ReplayState::Closed {
            log::debug!(
                "Replay closed after {} of {} frames.",
                self.cursor,
                self.frame_count()
            );
        }
        self.state = ReplayState::Closed;
        self.current_planes.clear();
        self.current_points.clear();
    }

    fn set_camera_texture_names(&mut self, names: &[TextureId]) {
        self.camera_textures = names.to_vec();
    }

    fn set_display_geometry(&mut self, rotation: DisplayRotation, width: u32, height: u32) {
        self.rotation = rotation;
        self.viewport = (width, height);
        self.geometry_changed = true;
    }

    fn update(&mut self) -> Result<Frame, TrackingError> {
        if self.state != ReplayState::Running {
            return Err(TrackingError::SessionNotTracking);
        }
        if self.io_error {
            return Err(TrackingError::PlaybackFailed(
                "the recording could not be read".to_string(),
            ));
        }
        let Some(recorded) = self
            .recording
            .as_ref()
            .and_then(|r| r.frames.get(self.cursor))
        else {
            return Err(TrackingError::ProviderUnavailable(
                "no frames left in the recording".to_string(),
            ));
        };
        let mut frame = recorded.frame.clone();
        self.current_planes = recorded.planes.clone();
        self.current_points = recorded.points.clone();
        self.cursor += 1;

        if self.config.depth_mode == DepthMode::Disabled {
            frame.depth_image = None;
        }
        frame.display_geometry_changed |= std::mem::take(&mut self.geometry_changed);
        Ok(frame)
    }

    fn hit_test(&self, frame: &Frame, point: Vec2, mode: HitTestMode) -> Vec<HitResult> {
        let Some(ray) = screen_ray(&frame.camera, point, self.viewport) else {
            log::debug!("Hit test without a viewport; nothing hit.");
            return Vec::new();
        };
        let mut hits = hit_trackables(&ray, &self.current_planes, &self.current_points);
        if let HitTestMode::InstantPlacement {
            approximate_distance_m,
        } = mode
        {
            if hits.is_empty() && self.config.instant_placement_mode != InstantPlacementMode::Disabled
            {
                hits.push(instant_placement_hit(
                    &ray,
                    approximate_distance_m,
                    self.mint_instant_placement_id(),
                ));
            }
        }
        hits
    }

    fn all_trackables(&self, kind: TrackableKind) -> Vec<Trackable> {
        match kind {
            TrackableKind::Plane => self
                .current_planes
                .iter()
                .cloned()
                .map(Trackable::Plane)
                .collect(),
            TrackableKind::Point => self
                .current_points
                .iter()
                .cloned()
                .map(Trackable::Point)
                .collect(),
            _ => Vec::new(),
        }
    }

    fn create_anchor(&mut self, hit: &HitResult) -> Result<Anchor, TrackingError> {
        self.ensure_open()?;
        Ok(Anchor {
            id: AnchorId::new_v4(),
            pose: hit.hit_pose,
            tracking_state: TrackingState::Tracking,
            trackable_id: hit.trackable.id(),
            trackable_kind: hit.trackable.kind(),
        })
    }

    fn sync_anchor(&self, anchor: &mut Anchor) {
        let state = match anchor.trackable_kind {
            TrackableKind::Plane => self
                .current_planes
                .iter()
                .find(|p| p.id == anchor.trackable_id)
                .map(|p| p.tracking_state),
            TrackableKind::Point => self
                .current_points
                .iter()
                .find(|p| p.id == anchor.trackable_id)
                .map(|p| p.tracking_state),
            _ => None,
        };
        if let Some(state) = state {
            anchor.tracking_state = state;
        }
    }

    fn playback_status(&self) -> PlaybackStatus {
        if self.recording.is_none() {
            PlaybackStatus::Idle
        } else if self.io_error {
            PlaybackStatus::IoError
        } else if self.cursor < self.frame_count() {
            PlaybackStatus::Ok
        } else {
            PlaybackStatus::Finished
        }
    }

    fn recording_status(&self) -> RecordingStatus {
        RecordingStatus::Idle
    }

    fn record_track_data(&mut self, track: EventTrack, _: &[u8]) -> Result<(), TrackingError> {
        Err(TrackingError::RecordingFailed(format!(
            "a replay session cannot record the {track:?} track"
        )))
    }
}
