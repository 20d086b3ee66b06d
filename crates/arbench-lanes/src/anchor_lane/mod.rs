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

//! Anchor Lane
//!
//! Turns a tap into at most one anchor. The provider hit-tests the tap,
//! returning candidates nearest first, and the first candidate whose trackable
//! qualifies gets the anchor.

use crate::playback_lane::encode_tap;
use arbench_core::input::TapEvent;
use arbench_core::settings::SessionSettings;
use arbench_core::tracking::{
    Anchor, DepthMode, EventTrack, Frame, HitResult, HitTestMode, PointOrientationMode, Pose,
    RecordingStatus, Trackable, TrackingProvider, TrackingState,
};

/// What a tap produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlacementOutcome {
    /// The anchor appended for this tap, if any.
    pub anchor: Option<Anchor>,
    /// Whether the host should ask the user to enable depth occlusion.
    pub suggest_depth_occlusion: bool,
    /// Whether `settings` were modified and need persisting.
    pub settings_changed: bool,
}

/// Places anchors from taps and owns the anchors of the session.
///
/// Anchors are append-only for the lifetime of the session.
#[derive(Debug)]
pub struct AnchorPlacementEngine {
    anchors: Vec<Anchor>,
    approximate_distance_m: f32,
}

impl AnchorPlacementEngine {
    /// Creates an engine whose instant-placement hit tests assume surfaces
    /// `approximate_distance_m` meters away.
    pub fn new(approximate_distance_m: f32) -> Self {
        Self {
            anchors: Vec::new(),
            approximate_distance_m,
        }
    }

    /// Handles one tap.
    ///
    /// While the provider is recording, the raw tap coordinates are written
    /// to the tap track first, so the interaction can be replayed. Nothing
    /// else happens unless the camera is tracking.
    pub fn on_tap(
        &mut self,
        frame: &Frame,
        provider: &mut dyn TrackingProvider,
        tap: &TapEvent,
        settings: &mut SessionSettings,
    ) -> PlacementOutcome {
        if provider.recording_status() == RecordingStatus::Ok {
            if let Err(e) = provider.record_track_data(EventTrack::Tap, &encode_tap(tap)) {
                log::error!("Error in recording tap input into external data track: {e}");
            }
        }

        let camera = &frame.camera;
        if camera.tracking_state != TrackingState::Tracking {
            return PlacementOutcome::default();
        }

        let mode = if settings.instant_placement.enabled {
            HitTestMode::InstantPlacement {
                approximate_distance_m: self.approximate_distance_m,
            }
        } else {
            HitTestMode::Ray
        };
        let hits = provider.hit_test(frame, tap.position(), mode);
        let Some(hit) = select_hit(&hits, &camera.pose) else {
            log::trace!("Tap at ({}, {}) hit nothing placeable.", tap.x, tap.y);
            return PlacementOutcome::default();
        };

        let anchor = match provider.create_anchor(hit) {
            Ok(anchor) => anchor,
            Err(e) => {
                log::warn!("Failed to create anchor: {e}");
                return PlacementOutcome::default();
            }
        };
        log::debug!(
            "Anchor {:?} placed on {:?} {:?}.",
            anchor.id,
            anchor.trackable_kind,
            anchor.trackable_id
        );
        self.anchors.push(anchor.clone());

        let first_ask = settings.depth.should_show_depth_enable_dialog();
        let suggest_depth_occlusion =
            first_ask && provider.is_depth_mode_supported(DepthMode::Automatic);
        PlacementOutcome {
            anchor: Some(anchor),
            suggest_depth_occlusion,
            settings_changed: first_ask,
        }
    }

    /// Refreshes every anchor from the provider after an update.
    pub fn sync(&mut self, provider: &dyn TrackingProvider) {
        for anchor in &mut self.anchors {
            provider.sync_anchor(anchor);
        }
    }

    /// The anchors placed so far, oldest first.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Anchors currently tracking, the ones that get drawn.
    pub fn tracking_anchors(&self) -> impl Iterator<Item = &Anchor> {
        self.anchors
            .iter()
            .filter(|a| a.tracking_state == TrackingState::Tracking)
    }
}

/// Returns the first hit, in list order, that may receive an anchor.
pub fn select_hit<'h>(hits: &'h [HitResult], camera_pose: &Pose) -> Option<&'h HitResult> {
    hits.iter().find(|hit| qualifies(hit, camera_pose))
}

/// Whether a hit may receive an anchor.
///
/// Planes must contain the hit inside their polygon and face the camera.
/// Points need an estimated surface normal. Instant-placement and depth
/// points always qualify.
pub fn qualifies(hit: &HitResult, camera_pose: &Pose) -> bool {
    match &hit.trackable {
        Trackable::Plane(plane) => {
            plane.is_pose_in_polygon(&hit.hit_pose)
                && distance_to_plane(&hit.hit_pose, camera_pose) > 0.0
        }
        Trackable::Point(point) => {
            point.orientation_mode == PointOrientationMode::EstimatedSurfaceNormal
        }
        Trackable::InstantPlacementPoint(_) | Trackable::DepthPoint(_) => true,
    }
}

/// Signed distance from a plane to the camera, positive on the side the plane
/// normal points to.
pub fn distance_to_plane(plane_pose: &Pose, camera_pose: &Pose) -> f32 {
    let normal = plane_pose.y_axis();
    (camera_pose.translation - plane_pose.translation).dot(normal)
}
