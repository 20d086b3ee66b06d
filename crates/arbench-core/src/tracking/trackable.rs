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

//! Trackables, hit results and anchors.

use super::Pose;
use crate::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The tracking status of a trackable, an anchor or the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrackingState {
    /// Actively tracked; poses are current.
    Tracking,
    /// Tracking is temporarily lost and may resume.
    #[default]
    Paused,
    /// Tracking has stopped and will never resume.
    Stopped,
}

/// A provider-assigned identifier for a trackable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackableId(pub u64);

/// The kinds of trackables a provider can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackableKind {
    /// A detected planar surface.
    Plane,
    /// A feature point.
    Point,
    /// A point placed at an assumed distance before geometry is known.
    InstantPlacementPoint,
    /// A point derived from the depth image.
    DepthPoint,
}

/// How the orientation of a [`Point`] was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointOrientationMode {
    /// The orientation is the identity; no surface information.
    #[default]
    InitializedToIdentity,
    /// The orientation follows a surface normal estimated around the point.
    EstimatedSurfaceNormal,
}

/// A detected planar surface with a bounded polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Identifier of the plane.
    pub id: TrackableId,
    /// Pose of the plane center. The local Y axis is the plane normal.
    pub center_pose: Pose,
    /// Boundary polygon in the plane-local XZ frame, counter-clockwise.
    pub polygon: Vec<Vec2>,
    /// Current tracking status.
    pub tracking_state: TrackingState,
}

impl Plane {
    /// Returns whether `pose` projects inside the plane's boundary polygon.
    ///
    /// The position is expressed in the plane-local frame and tested against
    /// the XZ polygon with the even-odd rule. The vertical offset is ignored.
    pub fn is_pose_in_polygon(&self, pose: &Pose) -> bool {
        if self.polygon.len() < 3 {
            return false;
        }
        let local = self.center_pose.inverse().transform_point(pose.translation);
        point_in_polygon(Vec2::new(local.x, local.z), &self.polygon)
    }

    /// The plane normal in world space.
    pub fn normal(&self) -> Vec3 {
        self.center_pose.y_axis()
    }
}

fn point_in_polygon(p: Vec2, polygon: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// A tracked feature point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Identifier of the point.
    pub id: TrackableId,
    /// World-space pose of the point.
    pub pose: Pose,
    /// How the orientation of [`Point::pose`] was obtained.
    pub orientation_mode: PointOrientationMode,
    /// Current tracking status.
    pub tracking_state: TrackingState,
}

/// A point placed at an approximate distance along the tap ray.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstantPlacementPoint {
    /// Identifier of the point.
    pub id: TrackableId,
    /// World-space pose of the point.
    pub pose: Pose,
    /// Current tracking status.
    pub tracking_state: TrackingState,
}

/// A point sampled from the depth image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthPoint {
    /// Identifier of the point.
    pub id: TrackableId,
    /// World-space pose of the point.
    pub pose: Pose,
    /// Current tracking status.
    pub tracking_state: TrackingState,
}

/// Any real-world feature the provider reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Trackable {
    /// A planar surface.
    Plane(Plane),
    /// A feature point.
    Point(Point),
    /// An instant-placement point.
    InstantPlacementPoint(InstantPlacementPoint),
    /// A depth-derived point.
    DepthPoint(DepthPoint),
}

impl Trackable {
    /// The identifier of the underlying trackable.
    pub fn id(&self) -> TrackableId {
        match self {
            Trackable::Plane(p) => p.id,
            Trackable::Point(p) => p.id,
            Trackable::InstantPlacementPoint(p) => p.id,
            Trackable::DepthPoint(p) => p.id,
        }
    }

    /// The kind of the underlying trackable.
    pub fn kind(&self) -> TrackableKind {
        match self {
            Trackable::Plane(_) => TrackableKind::Plane,
            Trackable::Point(_) => TrackableKind::Point,
            Trackable::InstantPlacementPoint(_) => TrackableKind::InstantPlacementPoint,
            Trackable::DepthPoint(_) => TrackableKind::DepthPoint,
        }
    }

    /// The tracking status of the underlying trackable.
    pub fn tracking_state(&self) -> TrackingState {
        match self {
            Trackable::Plane(p) => p.tracking_state,
            Trackable::Point(p) => p.tracking_state,
            Trackable::InstantPlacementPoint(p) => p.tracking_state,
            Trackable::DepthPoint(p) => p.tracking_state,
        }
    }
}

/// One candidate returned by a hit test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitResult {
    /// The trackable that was hit.
    pub trackable: Trackable,
    /// The pose of the intersection point.
    pub hit_pose: Pose,
    /// Distance from the camera to the intersection, in meters.
    pub distance: f32,
}

/// A stable identifier for an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorId(pub Uuid);

impl AnchorId {
    /// Generates a fresh random identifier.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A persistent reference to a real-world pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Identity of the anchor.
    pub id: AnchorId,
    /// Current world-space pose, refined by the provider every update.
    pub pose: Pose,
    /// Current tracking status.
    pub tracking_state: TrackingState,
    /// The trackable the anchor was attached to.
    pub trackable_id: TrackableId,
    /// The kind of trackable the anchor was attached to.
    pub trackable_kind: TrackableKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_plane(center: Vec3) -> Plane {
        Plane {
            id: TrackableId(1),
            center_pose: Pose::from_translation(center),
            polygon: vec![
                Vec2::new(-1.0, -1.0),
                Vec2::new(1.0, -1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(-1.0, 1.0),
            ],
            tracking_state: TrackingState::Tracking,
        }
    }

    #[test]
    fn pose_inside_polygon() {
        let plane = square_plane(Vec3::new(0.0, -1.0, -2.0));
        let hit = Pose::from_translation(Vec3::new(0.5, -1.0, -2.5));
        assert!(plane.is_pose_in_polygon(&hit));
    }

    #[test]
    fn pose_outside_polygon() {
        let plane = square_plane(Vec3::new(0.0, -1.0, -2.0));
        let hit = Pose::from_translation(Vec3::new(1.5, -1.0, -2.0));
        assert!(!plane.is_pose_in_polygon(&hit));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        let mut plane = square_plane(Vec3::ZERO);
        plane.polygon.truncate(2);
        assert!(!plane.is_pose_in_polygon(&Pose::IDENTITY));
    }

    #[test]
    fn trackable_accessors() {
        let t = Trackable::Point(Point {
            id: TrackableId(7),
            pose: Pose::IDENTITY,
            orientation_mode: PointOrientationMode::EstimatedSurfaceNormal,
            tracking_state: TrackingState::Tracking,
        });
        assert_eq!(t.id(), TrackableId(7));
        assert_eq!(t.kind(), TrackableKind::Point);
        assert_eq!(t.tracking_state(), TrackingState::Tracking);
    }
}
