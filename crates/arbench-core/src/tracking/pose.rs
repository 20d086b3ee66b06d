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

use crate::math::{Mat4, Quaternion, Vec3};
use serde::{Deserialize, Serialize};

/// A rigid transform from an object's local frame to world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// World-space translation.
    pub translation: Vec3,
    /// World-space rotation. Expected to be a unit quaternion.
    pub rotation: Quaternion,
}

impl Pose {
    /// The pose at the origin with no rotation.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quaternion::IDENTITY,
    };

    /// Creates a pose from a translation and a rotation.
    pub fn new(translation: Vec3, rotation: Quaternion) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Creates a pose with no rotation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quaternion::IDENTITY)
    }

    /// Returns the model matrix of this pose.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }

    /// Returns the pose that undoes this one.
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.conjugate();
        Self {
            translation: -rotation.rotate_vec3(self.translation),
            rotation,
        }
    }

    /// Applies `other` in this pose's local frame.
    pub fn compose(&self, other: &Pose) -> Self {
        Self {
            translation: self.transform_point(other.translation),
            rotation: self.rotation * other.rotation,
        }
    }

    /// Maps a point from local to world space.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.rotation.rotate_vec3(p) + self.translation
    }

    /// The local X axis expressed in world space.
    pub fn x_axis(&self) -> Vec3 {
        self.rotation.rotate_vec3(Vec3::X)
    }

    /// The local Y axis expressed in world space. For planes this is the
    /// surface normal.
    pub fn y_axis(&self) -> Vec3 {
        self.rotation.rotate_vec3(Vec3::Y)
    }

    /// The local Z axis expressed in world space.
    pub fn z_axis(&self) -> Vec3 {
        self.rotation.rotate_vec3(Vec3::Z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FRAC_PI_2;
    use approx::assert_relative_eq;

    #[test]
    fn inverse_composes_to_identity() {
        let pose = Pose::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2),
        );
        let p = Vec3::new(-0.5, 4.0, 2.0);
        let back = pose.inverse().transform_point(pose.transform_point(p));
        assert_relative_eq!(back.x, p.x, epsilon = 1e-5);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-5);
        assert_relative_eq!(back.z, p.z, epsilon = 1e-5);
    }

    #[test]
    fn matrix_agrees_with_transform_point() {
        let pose = Pose::new(
            Vec3::new(0.0, 1.0, 0.0),
            Quaternion::from_axis_angle(Vec3::X, 0.3),
        );
        let p = Vec3::new(1.0, 1.0, 1.0);
        let a = pose.to_matrix().transform_point3(p);
        let b = pose.transform_point(p);
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn identity_axes() {
        assert_eq!(Pose::IDENTITY.y_axis(), Vec3::Y);
        assert_eq!(Pose::IDENTITY.x_axis(), Vec3::X);
    }
}
