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

//! Resource handles and plain data exchanged with a renderer.

use crate::math::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Handle to a mesh owned by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshId(pub u32);

/// Handle to a shader program owned by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShaderId(pub u32);

/// Handle to a texture owned by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Handle to an offscreen framebuffer. `None` targets mean the default
/// framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FramebufferId(pub u32);

/// Handle to a GPU timer query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerQueryId(pub u32);

/// How mesh vertices are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveMode {
    /// One point per vertex.
    Points,
    /// Independent triangles.
    Triangles,
    /// A triangle strip.
    TriangleStrip,
    /// A triangle fan around the first vertex.
    TriangleFan,
}

/// Describes a mesh to create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDescriptor {
    /// Debug label.
    pub label: String,
    /// Primitive assembly mode.
    pub primitive: PrimitiveMode,
    /// Asset to load the geometry from, or `None` for a dynamic mesh.
    pub asset_path: Option<String>,
}

/// Describes a shader program to create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderDescriptor {
    /// Debug label.
    pub label: String,
    /// Vertex stage asset.
    pub vertex_path: String,
    /// Fragment stage asset.
    pub fragment_path: String,
    /// Preprocessor defines injected into both stages.
    pub defines: Vec<(String, String)>,
}

/// Pixel storage of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureFormat {
    /// 8-bit RGBA.
    Rgba8,
    /// 16-bit single channel, used for depth in millimeters.
    R16,
    /// Externally streamed camera image.
    External,
    /// Square two-channel half-float texture stored raw, without a header.
    Rg16Float {
        /// Width and height in texels.
        size: u32,
    },
}

impl TextureFormat {
    /// Byte length of a raw asset in this format, for formats stored raw.
    pub fn raw_len(&self) -> Option<u64> {
        match *self {
            TextureFormat::Rg16Float { size } => Some(u64::from(size) * u64::from(size) * 4),
            _ => None,
        }
    }
}

/// Describes a texture to create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Debug label.
    pub label: String,
    /// Pixel storage.
    pub format: TextureFormat,
    /// Asset to load the texels from, or `None` for a dynamic texture.
    pub asset_path: Option<String>,
}

/// The size of the default framebuffer viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// A value assigned to a named shader uniform.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    /// `bool`
    Bool(bool),
    /// `int`
    Int(i32),
    /// `float`
    Float(f32),
    /// `vec3`
    Vec3(Vec3),
    /// `vec4`
    Vec4(Vec4),
    /// `mat4`
    Mat4(Mat4),
    /// `vec3[]`, flattened.
    Vec3Array(Vec<f32>),
    /// `sampler`
    Texture(TextureId),
}

/// RGBA8 pixels read back from a framebuffer, bottom row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tightly packed RGBA8 data.
    pub rgba: Vec<u8>,
}

impl PixelBuffer {
    /// Returns a copy with the row order reversed, so that the first row is
    /// the top of the image.
    pub fn flipped_vertically(&self) -> PixelBuffer {
        let stride = self.width as usize * 4;
        let mut rgba = Vec::with_capacity(self.rgba.len());
        if stride > 0 {
            for row in self.rgba.chunks_exact(stride).rev() {
                rgba.extend_from_slice(row);
            }
        }
        PixelBuffer {
            width: self.width,
            height: self.height,
            rgba,
        }
    }
}
