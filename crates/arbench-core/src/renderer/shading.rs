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

//! Shading inputs derived from a light estimate.

use super::{TextureId, UniformValue};
use crate::math::{Mat4, Vec3, Vec4};
use crate::tracking::SPHERICAL_HARMONICS_LEN;

/// The lighting state consumed by the virtual object shader.
///
/// When [`ShadingParameters::lighting_valid`] is false the shader falls back to
/// ambient-only shading and the other fields keep whatever the last valid
/// estimate produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadingParameters {
    /// Whether the lighting fields below are current.
    pub lighting_valid: bool,
    /// Inverse of the view matrix of the frame that produced the lighting.
    pub view_inverse: Mat4,
    /// Direction towards the main light, in view space (`w = 0`).
    pub view_light_direction: Vec4,
    /// Linear RGB main light intensity.
    pub light_intensity: Vec3,
    /// Pre-multiplied spherical harmonics, 9 RGB triplets.
    pub spherical_harmonics: [f32; SPHERICAL_HARMONICS_LEN],
    /// Prefiltered environment cubemap.
    pub cubemap: Option<TextureId>,
}

impl Default for ShadingParameters {
    fn default() -> Self {
        Self {
            lighting_valid: false,
            view_inverse: Mat4::IDENTITY,
            view_light_direction: Vec4::ZERO,
            light_intensity: Vec3::ZERO,
            spherical_harmonics: [0.0; SPHERICAL_HARMONICS_LEN],
            cubemap: None,
        }
    }
}

impl ShadingParameters {
    /// The uniform assignments that bring a shader up to date.
    ///
    /// Only the validity flag is emitted while lighting is invalid.
    pub fn uniforms(&self) -> Vec<(&'static str, UniformValue)> {
        let mut out = vec![(
            "u_LightEstimateIsValid",
            UniformValue::Bool(self.lighting_valid),
        )];
        if !self.lighting_valid {
            return out;
        }
        out.push(("u_ViewInverse", UniformValue::Mat4(self.view_inverse)));
        out.push((
            "u_ViewLightDirection",
            UniformValue::Vec4(self.view_light_direction),
        ));
        out.push(("u_LightIntensity", UniformValue::Vec3(self.light_intensity)));
        out.push((
            "u_SphericalHarmonicsCoefficients",
            UniformValue::Vec3Array(self.spherical_harmonics.to_vec()),
        ));
        if let Some(cubemap) = self.cubemap {
            out.push(("u_Cubemap", UniformValue::Texture(cubemap)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lighting_only_sets_flag() {
        let params = ShadingParameters::default();
        let uniforms = params.uniforms();
        assert_eq!(uniforms.len(), 1);
        assert_eq!(
            uniforms[0],
            ("u_LightEstimateIsValid", UniformValue::Bool(false))
        );
    }

    #[test]
    fn valid_lighting_sets_every_uniform() {
        let params = ShadingParameters {
            lighting_valid: true,
            cubemap: Some(TextureId(3)),
            ..Default::default()
        };
        let names: Vec<_> = params.uniforms().into_iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec![
                "u_LightEstimateIsValid",
                "u_ViewInverse",
                "u_ViewLightDirection",
                "u_LightIntensity",
                "u_SphericalHarmonicsCoefficients",
                "u_Cubemap",
            ]
        );
    }
}
