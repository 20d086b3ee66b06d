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

use crate::math::{LinearRgba, Vec4};
use crate::renderer::{
    FramebufferId, MeshDescriptor, MeshId, PixelBuffer, RenderError, ShaderDescriptor, ShaderId,
    TextureDescriptor, TextureId, UniformValue, Viewport,
};

/// The drawing contract used by the frame pipeline.
///
/// A target of `None` always means the default framebuffer. Implementations
/// live on the render thread.
pub trait Renderer {
    /// Creates a mesh, loading its geometry from an asset when one is named.
    fn create_mesh(&mut self, descriptor: &MeshDescriptor) -> Result<MeshId, RenderError>;

    /// Compiles a shader program.
    fn create_shader(&mut self, descriptor: &ShaderDescriptor) -> Result<ShaderId, RenderError>;

    /// Creates a texture, loading its texels from an asset when one is named.
    fn create_texture(&mut self, descriptor: &TextureDescriptor)
        -> Result<TextureId, RenderError>;

    /// Creates an offscreen color and depth target.
    fn create_framebuffer(&mut self, width: u32, height: u32)
        -> Result<FramebufferId, RenderError>;

    /// Resizes an offscreen target.
    fn resize_framebuffer(
        &mut self,
        framebuffer: FramebufferId,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError>;

    /// Sets the size of the default framebuffer viewport.
    fn set_viewport(&mut self, width: u32, height: u32);

    /// The size of the default framebuffer viewport.
    fn viewport(&self) -> Viewport;

    /// Clears a target to a color.
    fn clear(&mut self, target: Option<FramebufferId>, color: LinearRgba);

    /// Assigns a uniform on a shader program.
    fn set_uniform(
        &mut self,
        shader: ShaderId,
        name: &str,
        value: UniformValue,
    ) -> Result<(), RenderError>;

    /// Replaces the vertex data of a dynamic mesh.
    fn upload_vertices(&mut self, mesh: MeshId, vertices: &[Vec4]) -> Result<(), RenderError>;

    /// Replaces the texels of a 16-bit single channel texture.
    fn upload_texture_r16(
        &mut self,
        texture: TextureId,
        width: u32,
        height: u32,
        texels: &[u16],
    ) -> Result<(), RenderError>;

    /// Draws a mesh with a shader into a target.
    fn draw(
        &mut self,
        mesh: MeshId,
        shader: ShaderId,
        target: Option<FramebufferId>,
    ) -> Result<(), RenderError>;

    /// Reads back a rectangle of the default framebuffer as RGBA8.
    fn read_pixels(&self, x: u32, y: u32, width: u32, height: u32)
        -> Result<PixelBuffer, RenderError>;
}
