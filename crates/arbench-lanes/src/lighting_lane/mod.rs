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

//! Lighting Lane
//!
//! Converts the per-frame light estimate into [`ShadingParameters`] for the
//! environmental HDR shader.

use arbench_core::math::{Mat4, Vec4};
use arbench_core::renderer::{CubemapFilter, ShadingParameters, TextureId};
use arbench_core::tracking::{LightEstimate, SPHERICAL_HARMONICS_LEN};
use thiserror::Error;

/// Per-coefficient factors applied to the ambient spherical harmonics.
///
/// Each folds together the normalized SH basis function, the Lambertian
/// `1/pi` and the cosine-lobe convolution, so the shader evaluates
/// irradiance directly.
pub const SPHERICAL_HARMONIC_FACTORS: [f32; 9] = [
    0.282095, -0.325735, 0.325735, -0.325735, 0.273137, -0.273137, 0.078848, -0.273137, 0.136569,
];

/// Errors raised while transforming a light estimate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LightingError {
    /// The spherical harmonics do not hold exactly 27 values.
    #[error(
        "The given coefficients array must be of length {expected} (3 components per 9 coefficients), got {actual}"
    )]
    InvalidArgument {
        /// Required length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },
}

/// Multiplies every SH scalar by the factor of its coefficient.
///
/// `out[i] = coefficients[i] * SPHERICAL_HARMONIC_FACTORS[i / 3]`.
pub fn premultiply_spherical_harmonics(
    coefficients: &[f32],
) -> Result<[f32; SPHERICAL_HARMONICS_LEN], LightingError> {
    if coefficients.len() != SPHERICAL_HARMONICS_LEN {
        return Err(LightingError::InvalidArgument {
            expected: SPHERICAL_HARMONICS_LEN,
            actual: coefficients.len(),
        });
    }
    let mut out = [0.0; SPHERICAL_HARMONICS_LEN];
    for (i, (dst, src)) in out.iter_mut().zip(coefficients).enumerate() {
        *dst = src * SPHERICAL_HARMONIC_FACTORS[i / 3];
    }
    Ok(out)
}

/// Keeps the shading parameters of the virtual object shader up to date.
pub struct LightEstimationTransformer {
    cubemap_filter: Box<dyn CubemapFilter>,
    parameters: ShadingParameters,
}

impl LightEstimationTransformer {
    /// Creates a transformer that prefilters cubemaps with `cubemap_filter`.
    pub fn new(cubemap_filter: Box<dyn CubemapFilter>) -> Self {
        Self {
            cubemap_filter,
            parameters: ShadingParameters::default(),
        }
    }

    /// Applies a light estimate seen from `view`.
    ///
    /// An invalid estimate only clears [`ShadingParameters::lighting_valid`];
    /// the rest keeps the last valid values. On error nothing is modified.
    /// A view matrix without an inverse keeps the previous inverse.
    pub fn apply(
        &mut self,
        estimate: &LightEstimate,
        view: &Mat4,
    ) -> Result<&ShadingParameters, LightingError> {
        if !estimate.is_valid() {
            self.parameters.lighting_valid = false;
            return Ok(&self.parameters);
        }

        let spherical_harmonics = premultiply_spherical_harmonics(&estimate.spherical_harmonics)?;
        let view_inverse = view.inverse().unwrap_or_else(|| {
            log::warn!("View matrix is not invertible; keeping the previous inverse.");
            self.parameters.view_inverse
        });
        let view_light_direction = *view * Vec4::from_vec3(estimate.main_light_direction, 0.0);

        if let Some(cubemap) = &estimate.cubemap {
            if let Err(e) = self.cubemap_filter.update(cubemap) {
                log::warn!("Failed to filter the environment cubemap: {e}");
            }
        }

        self.parameters = ShadingParameters {
            lighting_valid: true,
            view_inverse,
            view_light_direction,
            light_intensity: estimate.main_light_intensity,
            spherical_harmonics,
            cubemap: self.cubemap_filter.filtered_texture(),
        };
        Ok(&self.parameters)
    }

    /// The current shading parameters.
    pub fn parameters(&self) -> &ShadingParameters {
        &self.parameters
    }

    /// Roughness mip levels of the filtered cubemap, injected as a shader
    /// define.
    pub fn mipmap_levels(&self) -> u32 {
        self.cubemap_filter.mipmap_levels()
    }

    /// The filtered cubemap texture, bound once at shader setup.
    pub fn filtered_cubemap(&self) -> Option<TextureId> {
        self.cubemap_filter.filtered_texture()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use arbench_core::math::{Quaternion, Vec3, FRAC_PI_2};
    use arbench_core::renderer::RenderError;
    use arbench_core::tracking::{CubemapHandle, LightEstimateState, Pose};
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingFilter {
        updates: Rc<Cell<u32>>,
    }

    impl CubemapFilter for CountingFilter {
        fn update(&mut self, _: &CubemapHandle) -> Result<(), RenderError> {
            self.updates.set(self.updates.get() + 1);
            Ok(())
        }
        fn filtered_texture(&self) -> Option<TextureId> {
            Some(TextureId(42))
        }
        fn mipmap_levels(&self) -> u32 {
            5
        }
    }

    fn transformer() -> (LightEstimationTransformer, Rc<Cell<u32>>) {
        let updates = Rc::new(Cell::new(0));
        let filter = CountingFilter {
            updates: updates.clone(),
        };
        (LightEstimationTransformer::new(Box::new(filter)), updates)
    }

    fn valid_estimate() -> LightEstimate {
        LightEstimate {
            state: LightEstimateState::Valid,
            main_light_direction: Vec3::new(0.0, 1.0, 0.0),
            main_light_intensity: Vec3::new(0.9, 0.8, 0.7),
            spherical_harmonics: (0..27).map(|i| i as f32).collect(),
            cubemap: Some(CubemapHandle {
                id: 1,
                face_size: 16,
            }),
        }
    }

    #[test]
    fn premultiply_uses_factor_of_coefficient() {
        let input: Vec<f32> = (0..27).map(|i| (i + 1) as f32 * 0.5).collect();
        let out = premultiply_spherical_harmonics(&input).unwrap();
        for i in 0..27 {
            assert_relative_eq!(out[i], input[i] * SPHERICAL_HARMONIC_FACTORS[i / 3]);
        }
    }

    #[test]
    fn premultiply_rejects_other_lengths() {
        for len in [0, 9, 26, 28] {
            let input = vec![1.0; len];
            assert_eq!(
                premultiply_spherical_harmonics(&input),
                Err(LightingError::InvalidArgument {
                    expected: 27,
                    actual: len
                })
            );
        }
    }

    #[test]
    fn valid_estimate_transforms_light_into_view_space() {
        let (mut lighting, updates) = transformer();
        // Camera rolled a quarter turn about Z: world up becomes view +X.
        let camera = Pose::new(Vec3::ZERO, Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2));
        let view = camera.inverse().to_matrix();

        let params = lighting.apply(&valid_estimate(), &view).unwrap().clone();
        assert!(params.lighting_valid);
        assert_relative_eq!(params.view_light_direction.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(params.view_light_direction.y, 0.0, epsilon = 1e-5);
        assert_eq!(params.view_light_direction.w, 0.0);
        assert_eq!(params.light_intensity, Vec3::new(0.9, 0.8, 0.7));
        assert_eq!(params.cubemap, Some(TextureId(42)));
        assert_eq!(updates.get(), 1);

        let round_trip = params.view_inverse * view;
        assert_relative_eq!(round_trip.cols[0].x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(round_trip.cols[3].w, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn invalid_estimate_keeps_previous_lighting() {
        let (mut lighting, updates) = transformer();
        let view = Mat4::IDENTITY;
        let before = lighting.apply(&valid_estimate(), &view).unwrap().clone();

        let after = lighting.apply(&LightEstimate::not_valid(), &view).unwrap();
        assert!(!after.lighting_valid);
        assert_eq!(after.spherical_harmonics, before.spherical_harmonics);
        assert_eq!(after.view_light_direction, before.view_light_direction);
        assert_eq!(updates.get(), 1);
    }

    #[test]
    fn malformed_harmonics_leave_state_untouched() {
        let (mut lighting, updates) = transformer();
        let mut estimate = valid_estimate();
        estimate.spherical_harmonics.pop();
        assert!(matches!(
            lighting.apply(&estimate, &Mat4::IDENTITY),
            Err(LightingError::InvalidArgument { actual: 26, .. })
        ));
        assert!(!lighting.parameters().lighting_valid);
        assert_eq!(updates.get(), 0);
    }

    #[test]
    fn singular_view_keeps_previous_inverse() {
        let (mut lighting, updates) = transformer();
        let view = Pose::from_translation(Vec3::new(0.0, 0.0, -3.0)).to_matrix();
        let before = lighting.apply(&valid_estimate(), &view).unwrap().view_inverse;

        let mut singular = Mat4::IDENTITY;
        singular.cols[1] = Vec4::ZERO;
        let after = lighting.apply(&valid_estimate(), &singular).unwrap();

        assert!(after.lighting_valid);
        assert_eq!(after.view_inverse, before);
        assert_eq!(after.view_light_direction, Vec4::ZERO);
        assert_eq!(updates.get(), 2);
    }
}
