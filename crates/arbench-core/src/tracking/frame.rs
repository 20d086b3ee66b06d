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

//! Per-tick frame data.

use super::{EventTrack, LightEstimate, PlaybackEvent, Pose, TrackingError, TrackingState};
use crate::math::{Mat4, Vec4};
use serde::{Deserialize, Serialize};

/// Rotation of the display relative to the device's natural orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayRotation {
    /// Natural orientation.
    #[default]
    Rotation0,
    /// Rotated a quarter turn.
    Rotation90,
    /// Upside down.
    Rotation180,
    /// Rotated three quarter turns.
    Rotation270,
}

/// The camera of one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Pose of the physical camera sensor.
    pub pose: Pose,
    /// Pose of the virtual camera aligned with the current display rotation.
    pub display_oriented_pose: Pose,
    /// Whether the camera is being tracked.
    pub tracking_state: TrackingState,
    /// Vertical field of view, in radians.
    pub fov_y_radians: f32,
    /// Width divided by height of the display viewport.
    pub aspect_ratio: f32,
}

impl Camera {
    /// The world-to-view matrix of the display-oriented camera.
    pub fn view_matrix(&self) -> Mat4 {
        self.display_oriented_pose.inverse().to_matrix()
    }

    /// The projection matrix for the given clip planes.
    pub fn projection_matrix(&self, z_near: f32, z_far: f32) -> Mat4 {
        Mat4::perspective_rh_no(self.fov_y_radians, self.aspect_ratio, z_near, z_far)
    }
}

/// A snapshot of the tracked feature points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointCloud {
    /// Timestamp of the point-cloud estimate. Unchanged when the cloud did not
    /// move since the previous frame.
    pub timestamp_ns: i64,
    /// `(x, y, z, confidence)` per point.
    pub points: Vec<Vec4>,
}

/// A 16-bit depth image in millimeters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major depth samples.
    pub data: Vec<u16>,
}

/// One immutable frame produced by a tracking update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Capture timestamp. Zero until the camera produced its first image.
    pub timestamp_ns: i64,
    /// The camera of this frame.
    pub camera: Camera,
    /// The light estimate of this frame.
    pub light_estimate: LightEstimate,
    /// The point cloud of this frame.
    pub point_cloud: PointCloud,
    /// The depth image, when depth is enabled and has been computed.
    #[serde(default)]
    pub depth_image: Option<DepthImage>,
    /// Track data recorded alongside this frame, in timestamp order.
    #[serde(default)]
    pub track_data: Vec<PlaybackEvent>,
    /// Whether the display geometry changed since the previous frame.
    #[serde(default)]
    pub display_geometry_changed: bool,
}

impl Frame {
    /// Iterates the events of `track` embedded in this frame, oldest first.
    pub fn updated_track_data(&self, track: EventTrack) -> impl Iterator<Item = &PlaybackEvent> {
        let id = track.uuid();
        self.track_data.iter().filter(move |e| e.track_id == id)
    }

    /// Returns the depth image, or [`TrackingError::NotYetAvailable`] when the
    /// runtime has not computed one for this frame.
    pub fn acquire_depth_image(&self) -> Result<&DepthImage, TrackingError> {
        self.depth_image
            .as_ref()
            .ok_or(TrackingError::NotYetAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Quaternion, Vec3};
    use approx::assert_relative_eq;

    fn frame_with_tracks(track_data: Vec<PlaybackEvent>) -> Frame {
        Frame {
            timestamp_ns: 1,
            camera: Camera {
                pose: Pose::IDENTITY,
                display_oriented_pose: Pose::IDENTITY,
                tracking_state: TrackingState::Tracking,
                fov_y_radians: 1.0,
                aspect_ratio: 1.0,
            },
            light_estimate: LightEstimate::not_valid(),
            point_cloud: PointCloud::default(),
            depth_image: None,
            track_data,
            display_geometry_changed: false,
        }
    }

    #[test]
    fn updated_track_data_filters_by_track() {
        let frame = frame_with_tracks(vec![
            PlaybackEvent::new(EventTrack::Phase, 1, vec![0, 0, 0, 3]),
            PlaybackEvent::new(EventTrack::Tap, 1, vec![0; 8]),
            PlaybackEvent::new(EventTrack::Phase, 2, vec![0, 0, 0, 4]),
        ]);
        let phases: Vec<_> = frame.updated_track_data(EventTrack::Phase).collect();
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].timestamp_ns, 1);
        assert_eq!(frame.updated_track_data(EventTrack::Tap).count(), 1);
    }

    #[test]
    fn missing_depth_is_not_yet_available() {
        let frame = frame_with_tracks(Vec::new());
        assert_eq!(
            frame.acquire_depth_image(),
            Err(TrackingError::NotYetAvailable)
        );
    }

    #[test]
    fn view_matrix_moves_world_into_camera_space() {
        let mut frame = frame_with_tracks(Vec::new());
        frame.camera.display_oriented_pose =
            Pose::new(Vec3::new(0.0, 0.0, 2.0), Quaternion::IDENTITY);
        let p = frame.camera.view_matrix().transform_point3(Vec3::ZERO);
        assert_relative_eq!(p.z, -2.0, epsilon = 1e-5);
    }
}
