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

//! In-memory collaborators for driving the orchestrator in tests.

#![allow(dead_code)]

use arbench_core::input::{TapEvent, TapInput};
use arbench_core::math::{Vec2, Vec3, Vec4};
use arbench_core::renderer::*;
use arbench_core::settings::{SessionSettings, SettingsStore};
use arbench_core::tracking::*;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

// --- Tracking provider ---

/// Whether the provider plays a recording or runs live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Recording,
    Live,
}

#[derive(Default)]
pub struct ProviderLog {
    pub calls: Vec<String>,
    pub frames: VecDeque<Result<Frame, TrackingError>>,
    pub resume_error: Option<TrackingError>,
    pub io_error: bool,
    pub hits: Vec<HitResult>,
    pub hit_points: Vec<Vec2>,
    pub planes: Vec<Trackable>,
    pub configs: Vec<SessionConfig>,
    pub recorded: Vec<(EventTrack, Vec<u8>)>,
    pub depth_supported: bool,
}

impl ProviderLog {
    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| c.as_str() == call).count()
    }
}

pub struct MockProvider {
    pub source: Source,
    pub log: Rc<RefCell<ProviderLog>>,
}

impl MockProvider {
    pub fn new(source: Source) -> (Self, Rc<RefCell<ProviderLog>>) {
        let log = Rc::new(RefCell::new(ProviderLog::default()));
        (
            Self {
                source,
                log: Rc::clone(&log),
            },
            log,
        )
    }

    fn call(&self, name: &str) {
        self.log.borrow_mut().calls.push(name.to_string());
    }
}

impl TrackingProvider for MockProvider {
    fn configure(&mut self, config: &SessionConfig) -> Result<(), TrackingError> {
        self.call("configure");
        self.log.borrow_mut().configs.push(config.clone());
        Ok(())
    }
    fn supported_camera_configs(&self, filter: &CameraConfigFilter) -> Vec<CameraConfig> {
        let configs = [
            CameraConfig {
                id: 1,
                width: 640,
                height: 480,
                stereo_usage: StereoCameraUsage::DoNotUse,
            },
            CameraConfig {
                id: 2,
                width: 1920,
                height: 1080,
                stereo_usage: StereoCameraUsage::RequireAndUse,
            },
        ];
        configs.into_iter().filter(|c| filter.matches(c)).collect()
    }
    fn is_depth_mode_supported(&self, mode: DepthMode) -> bool {
        mode == DepthMode::Disabled || self.log.borrow().depth_supported
    }
    fn set_playback_dataset(&mut self, _: &Path) -> Result<(), TrackingError> {
        self.call("set_playback_dataset");
        Ok(())
    }
    fn resume(&mut self) -> Result<(), TrackingError> {
        self.call("resume");
        match self.log.borrow_mut().resume_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
    fn pause(&mut self) {
        self.call("pause");
    }
    fn close(&mut self) {
        self.call("close");
    }
    fn set_camera_texture_names(&mut self, _: &[TextureId]) {
        self.call("set_camera_texture_names");
    }
    fn set_display_geometry(&mut self, _: DisplayRotation, _: u32, _: u32) {
        self.call("set_display_geometry");
    }
    fn update(&mut self) -> Result<Frame, TrackingError> {
        self.call("update");
        self.log
            .borrow_mut()
            .frames
            .pop_front()
            .unwrap_or(Err(TrackingError::ProviderUnavailable("no frames".into())))
    }
    fn hit_test(&self, _: &Frame, point: Vec2, _: HitTestMode) -> Vec<HitResult> {
        let mut log = self.log.borrow_mut();
        log.hit_points.push(point);
        log.hits.clone()
    }
    fn all_trackables(&self, kind: TrackableKind) -> Vec<Trackable> {
        match kind {
            TrackableKind::Plane => self.log.borrow().planes.clone(),
            _ => Vec::new(),
        }
    }
    fn create_anchor(&mut self, hit: &HitResult) -> Result<Anchor, TrackingError> {
        Ok(Anchor {
            id: AnchorId::new_v4(),
            pose: hit.hit_pose,
            tracking_state: TrackingState::Tracking,
            trackable_id: hit.trackable.id(),
            trackable_kind: hit.trackable.kind(),
        })
    }
    fn sync_anchor(&self, _: &mut Anchor) {}
    fn playback_status(&self) -> PlaybackStatus {
        let log = self.log.borrow();
        match self.source {
            Source::Live => PlaybackStatus::Idle,
            Source::Recording if log.io_error => PlaybackStatus::IoError,
            Source::Recording if log.frames.is_empty() => PlaybackStatus::Finished,
            Source::Recording => PlaybackStatus::Ok,
        }
    }
    fn recording_status(&self) -> RecordingStatus {
        RecordingStatus::Idle
    }
    fn record_track_data(&mut self, track: EventTrack, payload: &[u8]) -> Result<(), TrackingError> {
        self.log.borrow_mut().recorded.push((track, payload.to_vec()));
        Ok(())
    }
}

// --- Frames ---

pub fn sh_coefficients() -> Vec<f32> {
    (0..SPHERICAL_HARMONICS_LEN).map(|i| i as f32 * 0.1).collect()
}

pub fn frame(timestamp_ns: i64, tracking_state: TrackingState) -> Frame {
    let pose = Pose::from_translation(Vec3::new(0.0, 1.5, 0.0));
    Frame {
        timestamp_ns,
        camera: Camera {
            pose,
            display_oriented_pose: pose,
            tracking_state,
            fov_y_radians: 1.0,
            aspect_ratio: 0.75,
        },
        light_estimate: LightEstimate {
            state: LightEstimateState::Valid,
            main_light_direction: Vec3::new(0.0, 1.0, 0.0),
            main_light_intensity: Vec3::new(1.0, 0.9, 0.8),
            spherical_harmonics: sh_coefficients(),
            cubemap: Some(CubemapHandle { id: 1, face_size: 16 }),
        },
        point_cloud: PointCloud {
            timestamp_ns,
            points: vec![Vec4::new(0.0, 0.0, -1.0, 0.9)],
        },
        depth_image: None,
        track_data: Vec::new(),
        display_geometry_changed: false,
    }
}

pub fn floor_hit() -> HitResult {
    HitResult {
        trackable: Trackable::Plane(Plane {
            id: TrackableId(7),
            center_pose: Pose::IDENTITY,
            polygon: vec![
                Vec2::new(-2.0, -2.0),
                Vec2::new(2.0, -2.0),
                Vec2::new(2.0, 2.0),
                Vec2::new(-2.0, 2.0),
            ],
            tracking_state: TrackingState::Tracking,
        }),
        hit_pose: Pose::from_translation(Vec3::new(0.0, 0.0, -1.0)),
        distance: 1.8,
    }
}

// --- Renderer ---

#[derive(Default)]
pub struct RenderLog {
    pub next_id: u32,
    pub fail_assets: bool,
    pub viewport: Viewport,
    /// Target and alpha of every clear.
    pub clears: Vec<(Option<FramebufferId>, f32)>,
    pub draws: Vec<(MeshId, ShaderId, Option<FramebufferId>)>,
    pub uniforms: Vec<(ShaderId, String, UniformValue)>,
    pub uploads: Vec<MeshId>,
    pub depth_uploads: u32,
    pub shader_labels: HashMap<ShaderId, String>,
    pub mesh_labels: HashMap<MeshId, String>,
    pub textures: HashMap<TextureId, TextureDescriptor>,
    pub shader_defines: HashMap<ShaderId, Vec<(String, String)>>,
    pub framebuffer_sizes: HashMap<FramebufferId, (u32, u32)>,
}

impl RenderLog {
    pub fn shader(&self, label: &str) -> ShaderId {
        *self
            .shader_labels
            .iter()
            .find(|(_, l)| l.as_str() == label)
            .map(|(id, _)| id)
            .expect("shader exists")
    }

    pub fn mesh(&self, label: &str) -> MeshId {
        *self
            .mesh_labels
            .iter()
            .find(|(_, l)| l.as_str() == label)
            .map(|(id, _)| id)
            .expect("mesh exists")
    }

    pub fn texture(&self, label: &str) -> (TextureId, TextureDescriptor) {
        self.textures
            .iter()
            .find(|(_, t)| t.label == label)
            .map(|(id, t)| (*id, t.clone()))
            .expect("texture exists")
    }

    pub fn draws_with(&self, shader_label: &str) -> usize {
        let shader = self.shader(shader_label);
        self.draws.iter().filter(|(_, s, _)| *s == shader).count()
    }

    pub fn uniform_values(&self, shader_label: &str, name: &str) -> Vec<UniformValue> {
        let shader = self.shader(shader_label);
        self.uniforms
            .iter()
            .filter(|(s, n, _)| *s == shader && n == name)
            .map(|(_, _, v)| v.clone())
            .collect()
    }
}

pub struct MockRenderer {
    pub log: Rc<RefCell<RenderLog>>,
}

impl MockRenderer {
    pub fn new() -> (Self, Rc<RefCell<RenderLog>>) {
        let log = Rc::new(RefCell::new(RenderLog::default()));
        (Self { log: Rc::clone(&log) }, log)
    }

    fn next_id(&self) -> u32 {
        let mut log = self.log.borrow_mut();
        log.next_id += 1;
        log.next_id
    }

    fn check_asset(&self, path: Option<&String>) -> Result<(), RenderError> {
        match path {
            Some(path) if self.log.borrow().fail_assets => Err(RenderError::AssetLoad {
                path: path.clone(),
                reason: "missing".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl Renderer for MockRenderer {
    fn create_mesh(&mut self, descriptor: &MeshDescriptor) -> Result<MeshId, RenderError> {
        self.check_asset(descriptor.asset_path.as_ref())?;
        let id = MeshId(self.next_id());
        self.log
            .borrow_mut()
            .mesh_labels
            .insert(id, descriptor.label.clone());
        Ok(id)
    }
    fn create_shader(&mut self, descriptor: &ShaderDescriptor) -> Result<ShaderId, RenderError> {
        let id = ShaderId(self.next_id());
        let mut log = self.log.borrow_mut();
        log.shader_labels.insert(id, descriptor.label.clone());
        log.shader_defines.insert(id, descriptor.defines.clone());
        Ok(id)
    }
    fn create_texture(&mut self, descriptor: &TextureDescriptor) -> Result<TextureId, RenderError> {
        self.check_asset(descriptor.asset_path.as_ref())?;
        let id = TextureId(self.next_id());
        self.log.borrow_mut().textures.insert(id, descriptor.clone());
        Ok(id)
    }
    fn create_framebuffer(&mut self, width: u32, height: u32) -> Result<FramebufferId, RenderError> {
        let id = FramebufferId(self.next_id());
        self.log
            .borrow_mut()
            .framebuffer_sizes
            .insert(id, (width, height));
        Ok(id)
    }
    fn resize_framebuffer(
        &mut self,
        framebuffer: FramebufferId,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        self.log
            .borrow_mut()
            .framebuffer_sizes
            .insert(framebuffer, (width, height));
        Ok(())
    }
    fn set_viewport(&mut self, width: u32, height: u32) {
        self.log.borrow_mut().viewport = Viewport { width, height };
    }
    fn viewport(&self) -> Viewport {
        self.log.borrow().viewport
    }
    fn clear(&mut self, target: Option<FramebufferId>, color: arbench_core::math::LinearRgba) {
        self.log.borrow_mut().clears.push((target, color.a));
    }
    fn set_uniform(
        &mut self,
        shader: ShaderId,
        name: &str,
        value: UniformValue,
    ) -> Result<(), RenderError> {
        self.log
            .borrow_mut()
            .uniforms
            .push((shader, name.to_string(), value));
        Ok(())
    }
    fn upload_vertices(&mut self, mesh: MeshId, _: &[Vec4]) -> Result<(), RenderError> {
        self.log.borrow_mut().uploads.push(mesh);
        Ok(())
    }
    fn upload_texture_r16(
        &mut self,
        _: TextureId,
        _: u32,
        _: u32,
        _: &[u16],
    ) -> Result<(), RenderError> {
        self.log.borrow_mut().depth_uploads += 1;
        Ok(())
    }
    fn draw(
        &mut self,
        mesh: MeshId,
        shader: ShaderId,
        target: Option<FramebufferId>,
    ) -> Result<(), RenderError> {
        self.log.borrow_mut().draws.push((mesh, shader, target));
        Ok(())
    }
    fn read_pixels(
        &self,
        _: u32,
        _: u32,
        width: u32,
        height: u32,
    ) -> Result<PixelBuffer, RenderError> {
        Ok(PixelBuffer {
            width,
            height,
            rgba: vec![0; (width * height * 4) as usize],
        })
    }
}

// --- GPU timer ---

#[derive(Default)]
pub struct TimerLog {
    pub frame: u64,
    pub created: u32,
    pub deleted: u32,
    pub begun: u32,
    pub ended_at: HashMap<TimerQueryId, u64>,
}

pub struct MockTimer {
    pub supported: bool,
    pub latency: u64,
    pub value_ns: u64,
    pub log: Rc<RefCell<TimerLog>>,
}

impl MockTimer {
    pub fn new(supported: bool, latency: u64, value_ns: u64) -> (Self, Rc<RefCell<TimerLog>>) {
        let log = Rc::new(RefCell::new(TimerLog::default()));
        (
            Self {
                supported,
                latency,
                value_ns,
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl GpuTimerBackend for MockTimer {
    fn supports_timer_queries(&self) -> bool {
        self.supported
    }
    fn create_query(&mut self) -> Result<TimerQueryId, TimingError> {
        let mut log = self.log.borrow_mut();
        log.created += 1;
        Ok(TimerQueryId(log.created))
    }
    fn begin_query(&mut self, query: TimerQueryId) {
        let mut log = self.log.borrow_mut();
        log.begun += 1;
        log.ended_at.remove(&query);
    }
    fn end_query(&mut self, query: TimerQueryId) {
        let mut log = self.log.borrow_mut();
        let frame = log.frame;
        log.ended_at.insert(query, frame);
        log.frame += 1;
    }
    fn is_result_available(&self, query: TimerQueryId) -> bool {
        let log = self.log.borrow();
        log.ended_at
            .get(&query)
            .is_some_and(|end| log.frame >= end + self.latency)
    }
    fn query_result_ns(&self, _: TimerQueryId) -> u64 {
        self.value_ns
    }
    fn delete_query(&mut self, _: TimerQueryId) {
        self.log.borrow_mut().deleted += 1;
    }
}

// --- Cubemap filter ---

pub struct MockCubemapFilter {
    pub updates: Rc<RefCell<u32>>,
}

impl CubemapFilter for MockCubemapFilter {
    fn update(&mut self, _: &CubemapHandle) -> Result<(), RenderError> {
        *self.updates.borrow_mut() += 1;
        Ok(())
    }
    fn filtered_texture(&self) -> Option<TextureId> {
        Some(TextureId(900))
    }
    fn mipmap_levels(&self) -> u32 {
        5
    }
}

// --- Snapshot, input, settings, log sink ---

pub struct RecordingSnapshotWriter {
    pub written: Rc<RefCell<Vec<PathBuf>>>,
}

impl SnapshotWriter for RecordingSnapshotWriter {
    fn write_snapshot(&mut self, _: &PixelBuffer, path: &Path) -> anyhow::Result<()> {
        self.written.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

pub struct ScriptedTaps {
    pub taps: VecDeque<TapEvent>,
    pub polls: Rc<RefCell<u32>>,
}

impl TapInput for ScriptedTaps {
    fn poll_tap(&mut self) -> Option<TapEvent> {
        *self.polls.borrow_mut() += 1;
        self.taps.pop_front()
    }
}

#[derive(Default, Clone)]
pub struct MemorySettingsStore {
    pub stored: Rc<RefCell<Option<SessionSettings>>>,
    pub saves: Rc<RefCell<u32>>,
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> anyhow::Result<SessionSettings> {
        Ok(self.stored.borrow().unwrap_or_default())
    }
    fn save(&self, settings: &SessionSettings) -> anyhow::Result<()> {
        *self.stored.borrow_mut() = Some(*settings);
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

/// A `Write + Send` sink whose contents stay readable after it is boxed.
#[derive(Clone, Default)]
pub struct SharedSink(pub Arc<Mutex<Vec<u8>>>);

impl SharedSink {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
