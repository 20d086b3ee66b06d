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

use crate::renderer::{RenderError, TextureId};
use crate::tracking::CubemapHandle;

/// Prefilters the HDR environment cubemap for specular image-based lighting.
pub trait CubemapFilter {
    /// Refilters the cubemap from a new light estimate.
    fn update(&mut self, cubemap: &CubemapHandle) -> Result<(), RenderError>;

    /// The filtered cubemap texture bound to the `u_Cubemap` sampler.
    fn filtered_texture(&self) -> Option<TextureId>;

    /// Number of roughness mip levels in the filtered texture.
    fn mipmap_levels(&self) -> u32;
}
