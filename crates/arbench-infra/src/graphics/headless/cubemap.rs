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

//! Environment cubemap prefiltering without a GPU.

use super::HeadlessRenderer;
use arbench_core::renderer::{CubemapFilter, RenderError, TextureId};
use arbench_core::tracking::CubemapHandle;

/// Tracks the environment cubemap the way a prefiltering pass would.
///
/// The filtered texture has one mip level per halving of the face resolution,
/// down to a single texel, and is always
/// [`HeadlessRenderer::ENVIRONMENT_CUBEMAP`].
#[derive(Debug)]
pub struct HeadlessCubemapFilter {
    resolution: u32,
    importance_samples: u32,
    last_source: Option<CubemapHandle>,
    updates: u64,
}

impl HeadlessCubemapFilter {
    /// Creates a filter producing `resolution`-sized faces from
    /// `importance_samples` samples per texel.
    pub fn new(resolution: u32, importance_samples: u32) -> Self {
        Self {
            resolution: resolution.max(1),
            importance_samples,
            last_source: None,
            updates: 0,
        }
    }

    /// Face size of the filtered cubemap.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Samples taken per filtered texel.
    pub fn importance_samples(&self) -> u32 {
        self.importance_samples
    }

    /// Number of times the cubemap was refiltered.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// The source cubemap of the last update.
    pub fn last_source(&self) -> Option<CubemapHandle> {
        self.last_source
    }
}

impl CubemapFilter for HeadlessCubemapFilter {
    fn update(&mut self, cubemap: &CubemapHandle) -> Result<(), RenderError> {
        if cubemap.face_size == 0 {
            return Err(RenderError::Backend(format!(
                "cubemap {} has empty faces",
                cubemap.id
            )));
        }
        self.last_source = Some(*cubemap);
        self.updates += 1;
        Ok(())
    }

    fn filtered_texture(&self) -> Option<TextureId> {
        Some(HeadlessRenderer::ENVIRONMENT_CUBEMAP)
    }

    fn mipmap_levels(&self) -> u32 {
        u32::BITS - self.resolution.leading_zeros()
    }
}
