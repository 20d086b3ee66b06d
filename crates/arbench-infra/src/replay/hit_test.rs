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

//! Screen-space hit testing against recorded geometry.

use arbench_core::math::{Vec2, Vec3};
use arbench_core::tracking::{
    Camera, HitResult, InstantPlacementPoint, Plane, Point, Pose, Trackable, TrackableId,
    TrackingState,
};

/// Clip planes used to unproject taps. Only the ray direction matters.
const RAY_Z_NEAR: f32 = 0.1;
const RAY_Z_FAR: f32 = 100.0;

/// How far a feature point may lie from the tap ray and still be hit, in meters.
pub const POINT_HIT_RADIUS_M: f32 = 0.05;

/// A world-space ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start of the ray, on the near plane.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// The point `distance` meters along the ray.
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Unprojects a tap in viewport pixels into a world-space ray.
///
/// Returns `None` for an empty viewport or a degenerate camera.
pub fn screen_ray(camera: &Camera, point: Vec2, viewport: (u32, u32)) -> Option<Ray> {
    let (width, height) = viewport;
    if width == 0 || height == 0 {
        return None;
    }
    let ndc_x = 2.0 * point.x / width as f32 - 1.0;
    let ndc_y = 1.0 - 2.0 * point.y / height as f32;
    let view_projection = camera.projection_matrix(RAY_Z_NEAR, RAY_Z_FAR) * camera.view_matrix();
    let inverse = view_projection.inverse()?;
    let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, -1.0));
    let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
    let direction = far - near;
    if direction.length_squared() == 0.0 {
        return None;
    }
    Some(Ray {
        origin: near,
        direction: direction.normalize(),
    })
}

/// Intersects `ray` with a tracking plane, inside its polygon.
pub fn intersect_plane(ray: &Ray, plane: &Plane) -> Option<HitResult> {
    if plane.tracking_state != TrackingState::Tracking {
        return None;
    }
    let normal = plane.normal();
    let denom = ray.direction.dot(normal);
    if denom.abs() < 1e-6 {
        return None;
    }
    let distance = (plane.center_pose.translation - ray.origin).dot(normal) / denom;
    if distance <= 0.0 {
        return None;
    }
    let hit_pose = Pose::new(ray.at(distance), plane.center_pose.rotation);
    if !plane.is_pose_in_polygon(&hit_pose) {
        return None;
    }
    Some(HitResult {
        trackable: Trackable::Plane(plane.clone()),
        hit_pose,
        distance,
    })
}

/// Hits `ray` against a tracking feature point.
///
/// The point is hit when its closest approach to the ray, in front of the
/// ray origin, is within [`POINT_HIT_RADIUS_M`]. The hit pose is the point's
/// own pose so an estimated surface normal carries over to the anchor.
pub fn intersect_point(ray: &Ray, point: &Point) -> Option<HitResult> {
    if point.tracking_state != TrackingState::Tracking {
        return None;
    }
    let position = point.pose.translation;
    let distance = (position - ray.origin).dot(ray.direction);
    if distance <= 0.0 || ray.at(distance).distance(position) > POINT_HIT_RADIUS_M {
        return None;
    }
    Some(HitResult {
        trackable: Trackable::Point(point.clone()),
        hit_pose: point.pose,
        distance,
    })
}

/// Hits `ray` against recorded planes and points, nearest first.
pub fn hit_trackables(ray: &Ray, planes: &[Plane], points: &[Point]) -> Vec<HitResult> {
    let mut hits: Vec<HitResult> = planes
        .iter()
        .filter_map(|plane| intersect_plane(ray, plane))
        .chain(points.iter().filter_map(|point| intersect_point(ray, point)))
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// An instant-placement point `distance` meters along `ray`, oriented with
/// world Y up.
pub fn instant_placement_hit(ray: &Ray, distance: f32, id: TrackableId) -> HitResult {
    let pose = Pose::from_translation(ray.at(distance));
    HitResult {
        trackable: Trackable::InstantPlacementPoint(InstantPlacementPoint {
            id,
            pose,
            tracking_state: TrackingState::Tracking,
        }),
        hit_pose: pose,
        distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use arbench_core::tracking::{PointOrientationMode, TrackableKind};

    fn camera_at(height: f32) -> Camera {
        let pose = Pose::from_translation(Vec3::new(0.0, height, 0.0));
        Camera {
            pose,
            display_oriented_pose: pose,
            tracking_state: TrackingState::Tracking,
            fov_y_radians: std::f32::consts::FRAC_PI_2,
            aspect_ratio: 1.0,
        }
    }

    fn wall(z: f32) -> Plane {
        // Rotated so its normal faces +Z, towards a camera at the origin.
        let rotation = arbench_core::math::Quaternion::from_axis_angle(
            Vec3::X,
            std::f32::consts::FRAC_PI_2,
        );
        Plane {
            id: TrackableId(z.abs() as u64),
            center_pose: Pose::new(Vec3::new(0.0, 0.0, z), rotation),
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
    fn center_tap_looks_down_negative_z() {
        let ray = screen_ray(&camera_at(0.0), Vec2::new(50.0, 50.0), (100, 100)).unwrap();
        assert_relative_eq!(ray.direction.z, -1.0, epsilon = 1e-4);
        assert_relative_eq!(ray.origin.z, -RAY_Z_NEAR, epsilon = 1e-4);
    }

    #[test]
    fn empty_viewport_has_no_ray() {
        assert!(screen_ray(&camera_at(0.0), Vec2::ZERO, (0, 100)).is_none());
    }

    #[test]
    fn nearest_plane_comes_first() {
        let ray = screen_ray(&camera_at(0.0), Vec2::new(50.0, 50.0), (100, 100)).unwrap();
        let hits = hit_trackables(&ray, &[wall(-3.0), wall(-1.5)], &[]);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].trackable.id(), TrackableId(1));
        assert!(hits[0].distance < hits[1].distance);
        assert_relative_eq!(hits[0].hit_pose.translation.z, -1.5, epsilon = 1e-4);
    }

    #[test]
    fn planes_behind_or_outside_are_missed() {
        let ray = screen_ray(&camera_at(0.0), Vec2::new(50.0, 50.0), (100, 100)).unwrap();
        assert!(intersect_plane(&ray, &wall(2.0)).is_none());
        let mut far_off = wall(-2.0);
        far_off.center_pose.translation.x = 10.0;
        assert!(intersect_plane(&ray, &far_off).is_none());
        let mut stopped = wall(-2.0);
        stopped.tracking_state = TrackingState::Stopped;
        assert!(intersect_plane(&ray, &stopped).is_none());
    }

    fn point_at(z: f32, x: f32) -> Point {
        Point {
            id: TrackableId(7),
            pose: Pose::from_translation(Vec3::new(x, 0.0, z)),
            orientation_mode: PointOrientationMode::EstimatedSurfaceNormal,
            tracking_state: TrackingState::Tracking,
        }
    }

    #[test]
    fn point_near_the_ray_is_hit() {
        let ray = screen_ray(&camera_at(0.0), Vec2::new(50.0, 50.0), (100, 100)).unwrap();
        let hit = intersect_point(&ray, &point_at(-1.0, 0.02)).unwrap();
        assert_eq!(hit.trackable.kind(), TrackableKind::Point);
        assert_relative_eq!(hit.hit_pose.translation.x, 0.02);
        assert_relative_eq!(hit.distance, 1.0 - RAY_Z_NEAR, epsilon = 1e-4);

        assert!(intersect_point(&ray, &point_at(-1.0, 0.5)).is_none());
        assert!(intersect_point(&ray, &point_at(1.0, 0.0)).is_none());
    }

    #[test]
    fn planes_and_points_are_sorted_together() {
        let ray = screen_ray(&camera_at(0.0), Vec2::new(50.0, 50.0), (100, 100)).unwrap();
        let hits = hit_trackables(&ray, &[wall(-3.0)], &[point_at(-1.0, 0.0)]);
        let kinds: Vec<_> = hits.iter().map(|h| h.trackable.kind()).collect();
        assert_eq!(kinds, [TrackableKind::Point, TrackableKind::Plane]);
    }

    #[test]
    fn instant_placement_lands_at_distance() {
        let ray = screen_ray(&camera_at(1.0), Vec2::new(50.0, 50.0), (100, 100)).unwrap();
        let hit = instant_placement_hit(&ray, 2.0, TrackableId(9));
        assert_relative_eq!(hit.hit_pose.translation.y, 1.0, epsilon = 1e-4);
        assert_relative_eq!(hit.hit_pose.translation.z, -2.0 - RAY_Z_NEAR, epsilon = 1e-3);
        assert_eq!(hit.trackable.id(), TrackableId(9));
    }
}
