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

//! A renderer that keeps every resource in memory and draws nothing.
//!
//! It validates handles and asset files exactly like a GPU backend would and
//! counts the work submitted to each target, which is enough to run and
//! inspect the benchmark pipeline on a machine without a display.

use arbench_core::math::{LinearRgba, Vec4};
use arbench_core::renderer::{
    FramebufferId, MeshDescriptor, MeshId, PixelBuffer, PrimitiveMode, RenderError, Renderer,
    ResourceKind, ShaderDescriptor, ShaderId, TextureDescriptor, TextureFormat, TextureId,
    UniformValue, Viewport,
};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
struct MeshEntry {
    label: String,
    primitive: PrimitiveMode,
    vertices: Vec<Vec4>,
}

#[derive(Debug)]
struct ShaderEntry {
    label: String,
    defines: Vec<(String, String)>,
    uniforms: HashMap<String, UniformValue>,
}

#[derive(Debug)]
struct TextureEntry {
    label: String,
    format: TextureFormat,
    width: u32,
    height: u32,
}

#[derive(Debug)]
struct FramebufferEntry {
    width: u32,
    height: u32,
    clear_color: LinearRgba,
}

/// Work submitted to one render target since creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetStats {
    /// Number of clears.
    pub clears: u64,
    /// Number of draw calls.
    pub draws: u64,
}

/// A [`Renderer`] without a GPU.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    asset_root: Option<PathBuf>,
    next_id: u32,
    meshes: HashMap<MeshId, MeshEntry>,
    shaders: HashMap<ShaderId, ShaderEntry>,
    textures: HashMap<TextureId, TextureEntry>,
    framebuffers: HashMap<FramebufferId, FramebufferEntry>,
    stats: HashMap<Option<FramebufferId>, TargetStats>,
    viewport: Viewport,
    pixels: Vec<u8>,
}

impl HeadlessRenderer {
    /// The texture reserved for the prefiltered environment cubemap.
    pub const ENVIRONMENT_CUBEMAP: TextureId = TextureId(0);

    /// Creates a renderer whose assets are virtual: any asset path is
    /// accepted without touching the filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer that resolves asset paths against `root` and fails
    /// when a file is missing or cannot be decoded.
    pub fn with_asset_root(root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: Some(root.into()),
            ..Self::default()
        }
    }

    fn generate_id(&mut self) -> u32 {
        // Id 0 is the environment cubemap.
        self.next_id += 1;
        self.next_id
    }

    fn resolve_asset(&self, path: &str) -> Result<Option<PathBuf>, RenderError> {
        let Some(root) = &self.asset_root else {
            return Ok(None);
        };
        let full = root.join(path);
        if full.is_file() {
            Ok(Some(full))
        } else {
            Err(RenderError::AssetLoad {
                path: path.to_string(),
                reason: "file not found".to_string(),
            })
        }
    }

    /// Work submitted to `target` so far. `None` is the default framebuffer.
    pub fn stats(&self, target: Option<FramebufferId>) -> TargetStats {
        self.stats.get(&target).copied().unwrap_or_default()
    }

    /// Total draw calls over every target.
    pub fn total_draws(&self) -> u64 {
        self.stats.values().map(|s| s.draws).sum()
    }

    /// The last value assigned to a uniform.
    pub fn uniform(&self, shader: ShaderId, name: &str) -> Option<&UniformValue> {
        self.shaders.get(&shader)?.uniforms.get(name)
    }

    /// The vertices last uploaded to a mesh.
    pub fn vertices(&self, mesh: MeshId) -> Option<&[Vec4]> {
        self.meshes.get(&mesh).map(|m| m.vertices.as_slice())
    }

    /// The size of an offscreen target.
    pub fn framebuffer_size(&self, framebuffer: FramebufferId) -> Option<(u32, u32)> {
        self.framebuffers
            .get(&framebuffer)
            .map(|f| (f.width, f.height))
    }

    /// Looks up a shader by its debug label.
    pub fn shader_by_label(&self, label: &str) -> Option<ShaderId> {
        self.shaders
            .iter()
            .find(|(_, s)| s.label == label)
            .map(|(id, _)| *id)
    }

    /// The preprocessor defines a shader was compiled with.
    pub fn shader_defines(&self, shader: ShaderId) -> Option<&[(String, String)]> {
        self.shaders.get(&shader).map(|s| s.defines.as_slice())
    }

    /// Looks up a mesh by its debug label.
    pub fn mesh_by_label(&self, label: &str) -> Option<MeshId> {
        self.meshes
            .iter()
            .find(|(_, m)| m.label == label)
            .map(|(id, _)| *id)
    }

    /// Looks up a texture by its debug label, with its size.
    pub fn texture_by_label(&self, label: &str) -> Option<(TextureId, u32, u32)> {
        self.textures
            .iter()
            .find(|(_, t)| t.label == label)
            .map(|(id, t)| (*id, t.width, t.height))
    }

    fn texture_mut(&mut self, texture: TextureId) -> Result<&mut TextureEntry, RenderError> {
        self.textures
            .get_mut(&texture)
            .ok_or(RenderError::ResourceNotFound(ResourceKind::Texture(texture)))
    }

    fn check_target(&self, target: Option<FramebufferId>) -> Result<(), RenderError> {
        match target {
            Some(fb) if !self.framebuffers.contains_key(&fb) => {
                Err(RenderError::ResourceNotFound(ResourceKind::Framebuffer(fb)))
            }
            _ => Ok(()),
        }
    }
}

fn decode_dimensions(path: &Path, asset: &str) -> Result<(u32, u32), RenderError> {
    image::image_dimensions(path).map_err(|e| RenderError::AssetLoad {
        path: asset.to_string(),
        reason: e.to_string(),
    })
}

fn check_raw_len(path: &Path, asset: &str, format: TextureFormat) -> Result<(), RenderError> {
    let actual = fs::metadata(path)
        .map_err(|e| RenderError::AssetLoad {
            path: asset.to_string(),
            reason: e.to_string(),
        })?
        .len();
    match format.raw_len() {
        Some(expected) if expected != actual => Err(RenderError::AssetLoad {
            path: asset.to_string(),
            reason: format!("expected {expected} bytes of raw texels, found {actual}"),
        }),
        _ => Ok(()),
    }
}

fn to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Renderer for HeadlessRenderer {
    fn create_mesh(&mut self, descriptor: &MeshDescriptor) -> Result<MeshId, RenderError> {
        if let Some(path) = &descriptor.asset_path {
            self.resolve_asset(path)?;
        }
        let id = MeshId(self.generate_id());
        log::trace!("Created mesh '{}' ({id:?}).", descriptor.label);
        self.meshes.insert(
            id,
            MeshEntry {
                label: descriptor.label.clone(),
                primitive: descriptor.primitive,
                vertices: Vec::new(),
            },
        );
        Ok(id)
    }

    fn create_shader(&mut self, descriptor: &ShaderDescriptor) -> Result<ShaderId, RenderError> {
        self.resolve_asset(&descriptor.vertex_path)?;
        self.resolve_asset(&descriptor.fragment_path)?;
        let id = ShaderId(self.generate_id());
        log::trace!("Created shader '{}' ({id:?}).", descriptor.label);
        self.shaders.insert(
            id,
            ShaderEntry {
                label: descriptor.label.clone(),
                defines: descriptor.defines.clone(),
                uniforms: HashMap::new(),
            },
        );
        Ok(id)
    }

    fn create_texture(&mut self, descriptor: &TextureDescriptor) -> Result<TextureId, RenderError> {
        let (width, height) = match (&descriptor.asset_path, descriptor.format) {
            (Some(asset), TextureFormat::Rg16Float { size }) => {
                if let Some(path) = self.resolve_asset(asset)? {
                    check_raw_len(&path, asset, descriptor.format)?;
                }
                (size, size)
            }
            (Some(asset), _) => match self.resolve_asset(asset)? {
                Some(path) => decode_dimensions(&path, asset)?,
                None => (1, 1),
            },
            (None, _) => (0, 0),
        };
        let id = TextureId(self.generate_id());
        self.textures.insert(
            id,
            TextureEntry {
                label: descriptor.label.clone(),
                format: descriptor.format,
                width,
                height,
            },
        );
        Ok(id)
    }

    fn create_framebuffer(&mut self, width: u32, height: u32) -> Result<FramebufferId, RenderError> {
        let id = FramebufferId(self.generate_id());
        self.framebuffers.insert(
            id,
            FramebufferEntry {
                width,
                height,
                clear_color: LinearRgba::TRANSPARENT,
            },
        );
        Ok(id)
    }

    fn resize_framebuffer(
        &mut self,
        framebuffer: FramebufferId,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let entry = self
            .framebuffers
            .get_mut(&framebuffer)
            .ok_or(RenderError::ResourceNotFound(ResourceKind::Framebuffer(
                framebuffer,
            )))?;
        entry.width = width;
        entry.height = height;
        Ok(())
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Viewport { width, height };
        self.pixels = vec![0; width as usize * height as usize * 4];
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self, target: Option<FramebufferId>, color: LinearRgba) {
        match target {
            None => {
                let texel = [to_u8(color.r), to_u8(color.g), to_u8(color.b), to_u8(color.a)];
                for px in self.pixels.chunks_exact_mut(4) {
                    px.copy_from_slice(&texel);
                }
            }
            Some(fb) => match self.framebuffers.get_mut(&fb) {
                Some(entry) => entry.clear_color = color,
                None => {
                    log::warn!("Clear of unknown framebuffer {fb:?} ignored.");
                    return;
                }
            },
        }
        self.stats.entry(target).or_default().clears += 1;
    }

    fn set_uniform(
        &mut self,
        shader: ShaderId,
        name: &str,
        value: UniformValue,
    ) -> Result<(), RenderError> {
        let entry = self
            .shaders
            .get_mut(&shader)
            .ok_or(RenderError::ResourceNotFound(ResourceKind::Shader(shader)))?;
        entry.uniforms.insert(name.to_string(), value);
        Ok(())
    }

    fn upload_vertices(&mut self, mesh: MeshId, vertices: &[Vec4]) -> Result<(), RenderError> {
        let entry = self
            .meshes
            .get_mut(&mesh)
            .ok_or(RenderError::ResourceNotFound(ResourceKind::Mesh(mesh)))?;
        entry.vertices.clear();
        entry.vertices.extend_from_slice(vertices);
        Ok(())
    }

    fn upload_texture_r16(
        &mut self,
        texture: TextureId,
        width: u32,
        height: u32,
        texels: &[u16],
    ) -> Result<(), RenderError> {
        if texels.len() != width as usize * height as usize {
            return Err(RenderError::Backend(format!(
                "expected {} depth texels, got {}",
                width as usize * height as usize,
                texels.len()
            )));
        }
        let entry = self.texture_mut(texture)?;
        if entry.format != TextureFormat::R16 {
            return Err(RenderError::Backend(format!(
                "texture '{}' is not a 16-bit texture",
                entry.label
            )));
        }
        entry.width = width;
        entry.height = height;
        Ok(())
    }

    fn draw(
        &mut self,
        mesh: MeshId,
        shader: ShaderId,
        target: Option<FramebufferId>,
    ) -> Result<(), RenderError> {
        let Some(entry) = self.meshes.get(&mesh) else {
            return Err(RenderError::ResourceNotFound(ResourceKind::Mesh(mesh)));
        };
        if !self.shaders.contains_key(&shader) {
            return Err(RenderError::ResourceNotFound(ResourceKind::Shader(shader)));
        }
        self.check_target(target)?;
        log::trace!(
            "Draw '{}' ({:?}, {} vertices) into {target:?}.",
            entry.label,
            entry.primitive,
            entry.vertices.len()
        );
        self.stats.entry(target).or_default().draws += 1;
        Ok(())
    }

    fn read_pixels(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<PixelBuffer, RenderError> {
        if x + width > self.viewport.width || y + height > self.viewport.height {
            return Err(RenderError::Backend(format!(
                "read of {width}x{height} at ({x}, {y}) exceeds the {}x{} viewport",
                self.viewport.width, self.viewport.height
            )));
        }
        let stride = self.viewport.width as usize * 4;
        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for row in y as usize..(y + height) as usize {
            let start = row * stride + x as usize * 4;
            rgba.extend_from_slice(&self.pixels[start..start + width as usize * 4]);
        }
        Ok(PixelBuffer {
            width,
            height,
            rgba,
        })
    }
}
