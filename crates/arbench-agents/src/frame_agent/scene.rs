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

//! GPU resources of the benchmark scene.

use arbench_core::math::{LinearRgba, Vec4};
use arbench_core::renderer::{
    FramebufferId, MeshDescriptor, MeshId, PrimitiveMode, RenderError, Renderer,
    ShaderDescriptor, ShaderId, TextureDescriptor, TextureFormat, TextureId, UniformValue,
};
use arbench_core::tracking::DisplayRotation;

/// Color of the point cloud: `(31, 188, 210)`.
const POINT_CLOUD_COLOR: LinearRgba =
    LinearRgba::new(31.0 / 255.0, 188.0 / 255.0, 210.0 / 255.0, 1.0);
const POINT_SIZE: f32 = 5.0;
/// Width and height of the DFG lookup table of the environmental HDR shader.
pub const DFG_RESOLUTION: u32 = 64;

/// Handles to everything the frame pipeline draws with.
///
/// Created once the render surface exists; all handles are owned by the
/// renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneResources {
    /// External texture the camera image is streamed into.
    pub camera_color_texture: TextureId,
    /// 16-bit depth texture used for occlusion.
    pub camera_depth_texture: TextureId,
    /// Full-screen quad for the camera background and the composite.
    pub background_mesh: MeshId,
    /// Draws the camera image.
    pub background_shader: ShaderId,
    /// Blends the offscreen virtual scene over the background.
    pub composite_shader: ShaderId,
    /// Dynamic point list.
    pub point_cloud_mesh: MeshId,
    /// Flat-colored points.
    pub point_cloud_shader: ShaderId,
    /// Dynamic polygon of the plane being drawn.
    pub plane_mesh: MeshId,
    /// Grid shader for planes.
    pub plane_shader: ShaderId,
    /// The model placed on anchors.
    pub virtual_object_mesh: MeshId,
    /// Environmental HDR shader of the model.
    pub virtual_object_shader: ShaderId,
    /// Split-sum DFG lookup table sampled by the environmental HDR shader.
    pub dfg_texture: TextureId,
    /// Offscreen target of the virtual scene, sized like the viewport.
    pub virtual_scene_framebuffer: FramebufferId,
}

impl SceneResources {
    /// Loads every mesh, shader and texture.
    ///
    /// `mipmap_levels` is injected into the virtual object shader as
    /// `NUMBER_OF_MIPMAP_LEVELS`; `filtered_cubemap` is bound to its
    /// `u_Cubemap` sampler and the DFG table to `u_DfgTexture`.
    pub fn create(
        renderer: &mut dyn Renderer,
        mipmap_levels: u32,
        filtered_cubemap: Option<TextureId>,
    ) -> Result<Self, RenderError> {
        let camera_color_texture = renderer.create_texture(&texture(
            "camera_color",
            TextureFormat::External,
            None,
        ))?;
        let camera_depth_texture =
            renderer.create_texture(&texture("camera_depth", TextureFormat::R16, None))?;
        let background_mesh =
            renderer.create_mesh(&mesh("background", PrimitiveMode::TriangleStrip, None))?;
        renderer.upload_vertices(
            background_mesh,
            &background_quad(DisplayRotation::Rotation0),
        )?;
        let background_shader = renderer.create_shader(&shader(
            "background",
            "shaders/background_show_camera.vert",
            "shaders/background_show_camera.frag",
            Vec::new(),
        ))?;
        renderer.set_uniform(
            background_shader,
            "u_CameraColorTexture",
            UniformValue::Texture(camera_color_texture),
        )?;
        let composite_shader = renderer.create_shader(&shader(
            "composite",
            "shaders/occlusion.vert",
            "shaders/occlusion.frag",
            Vec::new(),
        ))?;
        renderer.set_uniform(
            composite_shader,
            "u_CameraDepthTexture",
            UniformValue::Texture(camera_depth_texture),
        )?;

        let dfg_texture = renderer.create_texture(&texture(
            "dfg",
            TextureFormat::Rg16Float {
                size: DFG_RESOLUTION,
            },
            Some("models/dfg.raw"),
        ))?;

        let point_cloud_mesh =
            renderer.create_mesh(&mesh("point_cloud", PrimitiveMode::Points, None))?;
        let point_cloud_shader = renderer.create_shader(&shader(
            "point_cloud",
            "shaders/point_cloud.vert",
            "shaders/point_cloud.frag",
            Vec::new(),
        ))?;
        renderer.set_uniform(
            point_cloud_shader,
            "u_Color",
            UniformValue::Vec4(POINT_CLOUD_COLOR.into()),
        )?;
        renderer.set_uniform(point_cloud_shader, "u_PointSize", UniformValue::Float(POINT_SIZE))?;

        let plane_mesh = renderer.create_mesh(&mesh("plane", PrimitiveMode::TriangleFan, None))?;
        let plane_shader = renderer.create_shader(&shader(
            "plane",
            "shaders/plane.vert",
            "shaders/plane.frag",
            Vec::new(),
        ))?;

        let albedo = renderer.create_texture(&texture(
            "pawn_albedo",
            TextureFormat::Rgba8,
            Some("models/pawn_albedo.png"),
        ))?;
        let roughness_metallic_ao = renderer.create_texture(&texture(
            "pawn_roughness_metallic_ao",
            TextureFormat::Rgba8,
            Some("models/pawn_roughness_metallic_ao.png"),
        ))?;
        let virtual_object_mesh = renderer.create_mesh(&mesh(
            "pawn",
            PrimitiveMode::Triangles,
            Some("models/pawn.obj"),
        ))?;
        let virtual_object_shader = renderer.create_shader(&shader(
            "environmental_hdr",
            "shaders/environmental_hdr.vert",
            "shaders/environmental_hdr.frag",
            vec![(
                "NUMBER_OF_MIPMAP_LEVELS".to_string(),
                mipmap_levels.to_string(),
            )],
        ))?;
        renderer.set_uniform(
            virtual_object_shader,
            "u_AlbedoTexture",
            UniformValue::Texture(albedo),
        )?;
        renderer.set_uniform(
            virtual_object_shader,
            "u_RoughnessMetallicAmbientOcclusionTexture",
            UniformValue::Texture(roughness_metallic_ao),
        )?;
        renderer.set_uniform(
            virtual_object_shader,
            "u_DfgTexture",
            UniformValue::Texture(dfg_texture),
        )?;
        if let Some(cubemap) = filtered_cubemap {
            renderer.set_uniform(
                virtual_object_shader,
                "u_Cubemap",
                UniformValue::Texture(cubemap),
            )?;
        }

        let virtual_scene_framebuffer = renderer.create_framebuffer(1, 1)?;

        log::info!("Scene resources created.");
        Ok(Self {
            camera_color_texture,
            camera_depth_texture,
            background_mesh,
            background_shader,
            composite_shader,
            point_cloud_mesh,
            point_cloud_shader,
            plane_mesh,
            plane_shader,
            virtual_object_mesh,
            virtual_object_shader,
            dfg_texture,
            virtual_scene_framebuffer,
        })
    }
}

/// The full-screen background quad as a triangle strip.
///
/// Each vertex is `(ndc_x, ndc_y, u, v)`; texture coordinates turn with the
/// display so the camera image stays upright.
pub fn background_quad(rotation: DisplayRotation) -> [Vec4; 4] {
    // Counter-clockwise from the bottom-left corner.
    const CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
    const UVS: [(f32, f32); 4] = [(0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)];
    let turns = match rotation {
        DisplayRotation::Rotation0 => 0,
        DisplayRotation::Rotation90 => 1,
        DisplayRotation::Rotation180 => 2,
        DisplayRotation::Rotation270 => 3,
    };
    let vertex = |corner: usize| {
        let (x, y) = CORNERS[corner];
        let (u, v) = UVS[(corner + turns) % 4];
        Vec4::new(x, y, u, v)
    };
    // Strip order: bottom-left, bottom-right, top-left, top-right.
    [vertex(0), vertex(1), vertex(3), vertex(2)]
}

fn mesh(label: &str, primitive: PrimitiveMode, asset_path: Option<&str>) -> MeshDescriptor {
    MeshDescriptor {
        label: label.to_string(),
        primitive,
        asset_path: asset_path.map(str::to_string),
    }
}

fn shader(
    label: &str,
    vertex_path: &str,
    fragment_path: &str,
    defines: Vec<(String, String)>,
) -> ShaderDescriptor {
    ShaderDescriptor {
        label: label.to_string(),
        vertex_path: vertex_path.to_string(),
        fragment_path: fragment_path.to_string(),
        defines,
    }
}

fn texture(label: &str, format: TextureFormat, asset_path: Option<&str>) -> TextureDescriptor {
    TextureDescriptor {
        label: label.to_string(),
        format,
        asset_path: asset_path.map(str::to_string),
    }
}
