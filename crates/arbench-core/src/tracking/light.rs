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

use crate::math::Vec3;
use serde::{Deserialize, Serialize};

/// Number of spherical-harmonics scalars in an HDR light estimate: 9
/// coefficients for each of the 3 color channels.
pub const SPHERICAL_HARMONICS_LEN: usize = 27;

/// Whether a light estimate can be used for shading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LightEstimateState {
    /// The estimate is usable.
    Valid,
    /// The estimate must be ignored this frame.
    #[default]
    NotValid,
}

/// An opaque handle to the environment cubemap of a light estimate.
///
/// The faces are owned by the tracking runtime; a cubemap filter turns them
/// into a prefiltered texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubemapHandle {
    /// Runtime identifier of the cubemap image set.
    pub id: u64,
    /// Edge length of each face, in texels.
    pub face_size: u32,
}

/// Real-world lighting inferred for one frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LightEstimate {
    /// Validity flag.
    pub state: LightEstimateState,
    /// World-space direction towards the main light.
    pub main_light_direction: Vec3,
    /// Linear RGB intensity of the main light.
    pub main_light_intensity: Vec3,
    /// Ambient spherical harmonics, 9 coefficients × RGB, coefficient-major.
    pub spherical_harmonics: Vec<f32>,
    /// The HDR environment cubemap, when one was produced.
    pub cubemap: Option<CubemapHandle>,
}

impl LightEstimate {
    /// An estimate flagged as not valid.
    pub fn not_valid() -> Self {
        Self::default()
    }

    /// Returns whether the estimate can be used for shading.
    pub fn is_valid(&self) -> bool {
        self.state == LightEstimateState::Valid
    }
}
