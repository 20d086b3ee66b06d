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

//! Defines the FrameOrchestrator, the central agent of a benchmark run.

use super::control::{ControlHandle, ControlSignal};
use super::display::DisplayGeometry;
use super::events::{Advisory, OrchestratorEvent, OrchestratorState, RunOutcome, TickOutcome};
use super::scene::{background_quad, SceneResources};
use crate::config::BenchmarkConfig;
use arbench_core::event::EventBus;
use arbench_core::input::{TapEvent, TapInput};
use arbench_core::math::{LinearRgba, Mat4, Vec4};
use arbench_core::renderer::{
    CubemapFilter, GpuTimerBackend, RenderError, Renderer, ShadingParameters, SnapshotWriter,
    TimingError, UniformValue,
};
use arbench_core::settings::{SessionSettings, SettingsChoices, SettingsStore};
use arbench_core::tracking::{
    Anchor, DepthMode, DisplayRotation, Frame, PlaybackStatus, Trackable, TrackableKind,
    TrackingError, TrackingProvider, TrackingSession, TrackingState,
};
use arbench_core::utils::timer::{Clock, SystemClock};
use arbench_lanes::{
    AnchorPlacementEngine, GpuTimingRingBuffer, LightEstimationTransformer, TrackPlaybackReader,
};
use arbench_telemetry::{FrameTimer, PerformanceLogEntry, PerformanceLogger};
use std::sync::Arc;

/// The phase reported until a recording says otherwise.
const INITIAL_PHASE: i32 = 1;

/// Live input used when the host wires none.
struct NoLiveInput;

impl TapInput for NoLiveInput {
    fn poll_tap(&mut self) -> Option<TapEvent> {
        None
    }
}

/// The agent that drives one benchmark run.
///
/// It owns the tracking session and every lane, and runs the per-frame
/// sequence in [`FrameOrchestrator::tick`]. All methods must be called from
/// the render thread; other threads use a [`ControlHandle`].
pub struct FrameOrchestrator {
    config: BenchmarkConfig,
    state: OrchestratorState,
    outcome: Option<RunOutcome>,

    // --- Collaborators ---
    session: TrackingSession,
    renderer: Box<dyn Renderer>,
    timer_backend: Box<dyn GpuTimerBackend>,
    tap_input: Box<dyn TapInput>,
    snapshot_writer: Option<Box<dyn SnapshotWriter>>,
    settings_store: Option<Box<dyn SettingsStore>>,
    clock: Arc<dyn Clock>,

    // --- Lanes ---
    playback: TrackPlaybackReader,
    anchors: AnchorPlacementEngine,
    lighting: LightEstimationTransformer,
    timing: GpuTimingRingBuffer,
    logger: PerformanceLogger,

    // --- Per-session state ---
    settings: SessionSettings,
    scene: Option<SceneResources>,
    display: DisplayGeometry,
    camera_textures_bound: bool,
    background_rotation: Option<DisplayRotation>,
    last_point_cloud_timestamp: i64,
    keep_screen_on: Option<bool>,
    phase: i32,
    frames_rendered: u64,

    // --- Host communication ---
    events: EventBus<OrchestratorEvent>,
    control_tx: flume::Sender<ControlSignal>,
    control_rx: flume::Receiver<ControlSignal>,
}

impl FrameOrchestrator {
    /// Creates an idle orchestrator around its mandatory collaborators.
    pub fn new(
        config: BenchmarkConfig,
        provider: Box<dyn TrackingProvider>,
        renderer: Box<dyn Renderer>,
        timer_backend: Box<dyn GpuTimerBackend>,
        cubemap_filter: Box<dyn CubemapFilter>,
    ) -> Self {
        let (control_tx, control_rx) = flume::unbounded();
        Self {
            state: OrchestratorState::Idle,
            outcome: None,
            session: TrackingSession::new(provider),
            renderer,
            timer_backend,
            tap_input: Box::new(NoLiveInput),
            snapshot_writer: None,
            settings_store: None,
            clock: Arc::new(SystemClock),
            playback: TrackPlaybackReader::new(),
            anchors: AnchorPlacementEngine::new(config.approximate_distance_m),
            lighting: LightEstimationTransformer::new(cubemap_filter),
            timing: GpuTimingRingBuffer::new(),
            logger: PerformanceLogger::disabled(),
            settings: config.settings,
            scene: None,
            display: DisplayGeometry::new(),
            camera_textures_bound: false,
            background_rotation: None,
            last_point_cloud_timestamp: 0,
            keep_screen_on: None,
            phase: INITIAL_PHASE,
            frames_rendered: 0,
            events: EventBus::new(),
            control_tx,
            control_rx,
            config,
        }
    }

    /// Sets the source of live taps, used whenever no recording is playing.
    pub fn with_tap_input(mut self, tap_input: Box<dyn TapInput>) -> Self {
        self.tap_input = tap_input;
        self
    }

    /// Sets the writer of the end-of-run snapshot.
    pub fn with_snapshot_writer(mut self, writer: Box<dyn SnapshotWriter>) -> Self {
        self.snapshot_writer = Some(writer);
        self
    }

    /// Loads settings from `store` and persists every later change to it.
    ///
    /// When loading fails the configured settings are kept.
    pub fn with_settings_store(mut self, store: Box<dyn SettingsStore>) -> Self {
        match store.load() {
            Ok(settings) => self.settings = settings,
            Err(e) => log::warn!("Failed to load settings, using defaults: {e:#}"),
        }
        self.settings_store = Some(store);
        self
    }

    /// Sets the wall clock used for the performance log.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Uses an already opened performance log instead of opening
    /// [`BenchmarkConfig::performance_log_path`] on resume.
    pub fn with_performance_logger(mut self, logger: PerformanceLogger) -> Self {
        self.logger = logger;
        self
    }

    // --- Host callbacks ---

    /// Creates the scene resources. Call once the render surface exists.
    ///
    /// On failure an advisory is published and every later tick is skipped.
    pub fn surface_created(&mut self) -> Result<(), RenderError> {
        match SceneResources::create(
            self.renderer.as_mut(),
            self.lighting.mipmap_levels(),
            self.lighting.filtered_cubemap(),
        ) {
            Ok(scene) => {
                self.scene = Some(scene);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to read a required asset file: {e}");
                self.events.publish(OrchestratorEvent::Advisory(
                    Advisory::AssetLoadFailed(e.to_string()),
                ));
                Err(e)
            }
        }
    }

    /// Reacts to a new surface size or rotation.
    pub fn surface_changed(&mut self, width: u32, height: u32, rotation: DisplayRotation) {
        self.display.on_surface_changed(rotation, width, height);
        self.renderer.set_viewport(width, height);
        if let Some(scene) = self.scene {
            if let Err(e) =
                self.renderer
                    .resize_framebuffer(scene.virtual_scene_framebuffer, width, height)
            {
                log::warn!("Failed to resize the virtual scene framebuffer: {e}");
            }
        }
    }

    /// Configures and resumes the session, entering [`OrchestratorState::Tracking`].
    ///
    /// An unavailable camera publishes an advisory and stays idle. A recording
    /// that cannot be played ends the run with [`RunOutcome::PlaybackFailed`].
    pub fn resume(&mut self) -> Result<(), TrackingError> {
        match self.state {
            OrchestratorState::Tracking => return Ok(()),
            OrchestratorState::Finished => {
                return Err(TrackingError::ProviderUnavailable(
                    "the benchmark run has finished".to_string(),
                ))
            }
            OrchestratorState::Idle => {}
        }

        match self.resume_session() {
            Ok(()) => {
                self.display.resume();
                self.state = OrchestratorState::Tracking;
                log::info!("Benchmark resumed ({}).", self.config.recording_name());
                Ok(())
            }
            Err(TrackingError::CameraUnavailable) => {
                log::error!("Camera not available during resume.");
                self.events
                    .publish(OrchestratorEvent::Advisory(Advisory::CameraUnavailable));
                Err(TrackingError::CameraUnavailable)
            }
            Err(TrackingError::PlaybackFailed(reason)) => {
                log::error!("Playback failed during resume: {reason}");
                self.events.publish(OrchestratorEvent::Advisory(
                    Advisory::PlaybackFailed(reason.clone()),
                ));
                self.finish(RunOutcome::PlaybackFailed);
                Err(TrackingError::PlaybackFailed(reason))
            }
            Err(e) => {
                log::error!("Failed to resume the tracking session: {e}");
                Err(e)
            }
        }
    }

    fn resume_session(&mut self) -> Result<(), TrackingError> {
        self.configure_session()?;
        if let Some(path) = &self.config.recording_path {
            self.session.provider_mut().set_playback_dataset(path)?;
        }
        self.open_performance_log();
        self.session.resume()
    }

    /// Pauses the session. The display helper goes first.
    pub fn pause(&mut self) {
        if self.state != OrchestratorState::Tracking {
            return;
        }
        self.display.pause();
        self.session.pause();
        self.state = OrchestratorState::Idle;
        log::info!("Benchmark paused.");
    }

    /// Releases everything without producing an outcome.
    ///
    /// The display helper is paused before the session is closed. The
    /// orchestrator cannot be resumed afterwards.
    pub fn teardown(&mut self) {
        if self.state == OrchestratorState::Finished {
            return;
        }
        self.display.pause();
        self.session.close();
        self.release_collection_resources();
        self.state = OrchestratorState::Idle;
        log::info!("Benchmark torn down.");
    }

    /// Commits edited settings, persists them and reconfigures the session.
    pub fn apply_settings(&mut self, choices: SettingsChoices) {
        self.settings.commit(choices);
        self.persist_settings();
        if self.state == OrchestratorState::Finished {
            return;
        }
        if let Err(e) = self.configure_session() {
            log::warn!("Failed to reconfigure the session: {e}");
        }
    }

    // --- The frame ---

    /// Runs one frame.
    ///
    /// The steps run in a fixed order; later steps read state written by
    /// earlier ones.
    pub fn tick(&mut self) -> TickOutcome {
        let clock = Arc::clone(&self.clock);
        let timer = FrameTimer::start(clock.as_ref());

        self.drain_control();
        if self.state != OrchestratorState::Tracking {
            return TickOutcome::Skipped;
        }
        let Some(scene) = self.scene else {
            return TickOutcome::Skipped;
        };

        let status = self.session.provider().playback_status();
        match status {
            PlaybackStatus::Finished => {
                self.finish(RunOutcome::Completed);
                return TickOutcome::Finished(RunOutcome::Completed);
            }
            PlaybackStatus::IoError => {
                self.events.publish(OrchestratorEvent::Advisory(
                    Advisory::PlaybackFailed("the recording stopped producing frames".to_string()),
                ));
                self.finish(RunOutcome::PlaybackFailed);
                return TickOutcome::Finished(RunOutcome::PlaybackFailed);
            }
            PlaybackStatus::Idle | PlaybackStatus::Ok => {}
        }

        self.renderer.clear(None, LinearRgba::BLACK);

        if !self.camera_textures_bound {
            self.session
                .provider_mut()
                .set_camera_texture_names(&[scene.camera_color_texture]);
            self.camera_textures_bound = true;
        }

        self.display
            .update_session_if_needed(self.session.provider_mut());

        let process_mark = timer.mark();
        let frame = match self.session.update() {
            Ok(frame) => frame,
            Err(TrackingError::CameraUnavailable) => {
                log::error!("Camera not available during the frame.");
                self.events
                    .publish(OrchestratorEvent::Advisory(Advisory::CameraUnavailable));
                return TickOutcome::CameraUnavailable;
            }
            Err(e @ (TrackingError::PlaybackFailed(_) | TrackingError::ProviderUnavailable(_))) => {
                log::error!("Tracking provider lost: {e}");
                self.events.publish(OrchestratorEvent::Advisory(
                    Advisory::PlaybackFailed(e.to_string()),
                ));
                self.finish(RunOutcome::PlaybackFailed);
                return TickOutcome::Finished(RunOutcome::PlaybackFailed);
            }
            Err(e) => {
                log::warn!("Skipping frame: {e}");
                return TickOutcome::Aborted(e.to_string());
            }
        };
        let camera = &frame.camera;
        let projection = camera.projection_matrix(self.config.z_near, self.config.z_far);
        let view = camera.view_matrix();

        let input_mark = timer.mark();
        let process_time_ms = timer.since(process_mark);
        self.handle_tap(&frame, status);
        let input_time_ms = timer.since(input_mark);

        self.update_keep_screen_on(camera.tracking_state);

        if let Some(phase) = self.playback.next_phase(&frame, status) {
            if phase != self.phase {
                log::info!("Benchmark phase {} -> {}.", self.phase, phase);
                self.events.publish(OrchestratorEvent::PhaseChanged(phase));
            }
            self.phase = phase;
        }

        self.update_background(&scene, &frame);
        if frame.timestamp_ns != 0 {
            warn_on_error(
                self.renderer
                    .draw(scene.background_mesh, scene.background_shader, None),
                "draw the camera background",
            );
        }

        // Only a paused camera hides virtual content; a stopped one still draws.
        let draw_virtual = camera.tracking_state != TrackingState::Paused;
        if draw_virtual {
            self.draw_point_cloud(&scene, &frame, &(projection * view));
            self.draw_planes(&scene, &projection, &view);
        } else {
            log::trace!("Camera paused; virtual content skipped.");
        }

        match self.lighting.apply(&frame.light_estimate, &view) {
            Ok(parameters) => {
                apply_shading(self.renderer.as_mut(), &scene, parameters);
            }
            Err(e) => {
                let advisory = Advisory::LightEstimateRejected(e.to_string());
                log::error!("{advisory}");
                self.events.publish(OrchestratorEvent::Advisory(advisory));
                return TickOutcome::Aborted(e.to_string());
            }
        }

        if let Err(e) = self.timing.begin_frame(self.timer_backend.as_mut()) {
            return match e {
                TimingError::Unsupported => {
                    log::error!("{}", Advisory::TimerQueriesUnsupported);
                    self.events.publish(OrchestratorEvent::Advisory(
                        Advisory::TimerQueriesUnsupported,
                    ));
                    TickOutcome::TimerUnsupported
                }
                TimingError::QueryAllocation(reason) => {
                    log::error!("Failed to allocate a GPU timer query: {reason}");
                    TickOutcome::Aborted(reason)
                }
            };
        }

        self.renderer
            .clear(Some(scene.virtual_scene_framebuffer), LinearRgba::TRANSPARENT);
        if draw_virtual {
            self.draw_anchors(&scene, &projection, &view);
        }
        warn_on_error(
            self.renderer
                .draw(scene.background_mesh, scene.composite_shader, None),
            "composite the virtual scene",
        );

        self.timing.end_frame(self.timer_backend.as_mut());

        self.logger.write(&PerformanceLogEntry {
            phase: self.phase,
            frame_time_ms: timer.frame_start_ms(),
            process_time_ms,
            input_time_ms,
            gpu_time_ns: self.timing.last_elapsed_ns(),
            total_frame_time_ms: timer.total_ms(),
        });
        self.frames_rendered += 1;
        TickOutcome::Rendered
    }

    fn handle_tap(&mut self, frame: &Frame, status: PlaybackStatus) {
        let Some(tap) = self
            .playback
            .next_tap(frame, status, self.tap_input.as_mut())
        else {
            return;
        };
        let outcome = self.anchors.on_tap(
            frame,
            self.session.provider_mut(),
            &tap,
            &mut self.settings,
        );
        if let Some(anchor) = &outcome.anchor {
            self.events
                .publish(OrchestratorEvent::AnchorPlaced(anchor.id));
        }
        if outcome.suggest_depth_occlusion {
            self.events.publish(OrchestratorEvent::SuggestDepthOcclusion);
        }
        if outcome.settings_changed {
            self.persist_settings();
        }
    }

    fn update_keep_screen_on(&mut self, tracking_state: TrackingState) {
        let keep = tracking_state == TrackingState::Tracking;
        if self.keep_screen_on != Some(keep) {
            self.keep_screen_on = Some(keep);
            self.events.publish(OrchestratorEvent::KeepScreenOn(keep));
        }
    }

    fn update_background(&mut self, scene: &SceneResources, frame: &Frame) {
        let rotation = self.display.rotation();
        if frame.display_geometry_changed || self.background_rotation != Some(rotation) {
            warn_on_error(
                self.renderer
                    .upload_vertices(scene.background_mesh, &background_quad(rotation)),
                "update the background geometry",
            );
            self.background_rotation = Some(rotation);
        }

        if frame.camera.tracking_state != TrackingState::Tracking
            || !self.settings.depth.depth_requested()
        {
            return;
        }
        // A missing depth image is normal for the first frames.
        if let Ok(depth) = frame.acquire_depth_image() {
            warn_on_error(
                self.renderer.upload_texture_r16(
                    scene.camera_depth_texture,
                    depth.width,
                    depth.height,
                    &depth.data,
                ),
                "upload the depth image",
            );
        }
    }

    fn draw_point_cloud(&mut self, scene: &SceneResources, frame: &Frame, view_projection: &Mat4) {
        let cloud = &frame.point_cloud;
        if cloud.timestamp_ns > self.last_point_cloud_timestamp {
            warn_on_error(
                self.renderer
                    .upload_vertices(scene.point_cloud_mesh, &cloud.points),
                "upload the point cloud",
            );
            self.last_point_cloud_timestamp = cloud.timestamp_ns;
        }
        warn_on_error(
            self.renderer.set_uniform(
                scene.point_cloud_shader,
                "u_ModelViewProjection",
                UniformValue::Mat4(*view_projection),
            ),
            "set the point cloud transform",
        );
        warn_on_error(
            self.renderer
                .draw(scene.point_cloud_mesh, scene.point_cloud_shader, None),
            "draw the point cloud",
        );
    }

    fn draw_planes(&mut self, scene: &SceneResources, projection: &Mat4, view: &Mat4) {
        for trackable in self.session.provider().all_trackables(TrackableKind::Plane) {
            let Trackable::Plane(plane) = trackable else {
                continue;
            };
            if plane.tracking_state != TrackingState::Tracking || plane.polygon.len() < 3 {
                continue;
            }
            let vertices: Vec<Vec4> = plane
                .polygon
                .iter()
                .map(|v| Vec4::new(v.x, 0.0, v.y, 1.0))
                .collect();
            let model = plane.center_pose.to_matrix();
            let model_view_projection = *projection * *view * model;
            warn_on_error(
                self.renderer.upload_vertices(scene.plane_mesh, &vertices),
                "upload a plane polygon",
            );
            warn_on_error(
                self.renderer
                    .set_uniform(scene.plane_shader, "u_Model", UniformValue::Mat4(model)),
                "set the plane model matrix",
            );
            warn_on_error(
                self.renderer.set_uniform(
                    scene.plane_shader,
                    "u_ModelViewProjection",
                    UniformValue::Mat4(model_view_projection),
                ),
                "set the plane transform",
            );
            warn_on_error(
                self.renderer
                    .draw(scene.plane_mesh, scene.plane_shader, None),
                "draw a plane",
            );
        }
    }

    fn draw_anchors(&mut self, scene: &SceneResources, projection: &Mat4, view: &Mat4) {
        self.anchors.sync(self.session.provider());
        for anchor in self.anchors.tracking_anchors() {
            let model_view = *view * anchor.pose.to_matrix();
            let model_view_projection = *projection * model_view;
            warn_on_error(
                self.renderer.set_uniform(
                    scene.virtual_object_shader,
                    "u_ModelView",
                    UniformValue::Mat4(model_view),
                ),
                "set the anchor model-view matrix",
            );
            warn_on_error(
                self.renderer.set_uniform(
                    scene.virtual_object_shader,
                    "u_ModelViewProjection",
                    UniformValue::Mat4(model_view_projection),
                ),
                "set the anchor transform",
            );
            warn_on_error(
                self.renderer.draw(
                    scene.virtual_object_mesh,
                    scene.virtual_object_shader,
                    Some(scene.virtual_scene_framebuffer),
                ),
                "draw an anchor",
            );
        }
    }

    // --- Lifecycle helpers ---

    fn drain_control(&mut self) {
        let signals: Vec<ControlSignal> = self.control_rx.try_iter().collect();
        for signal in signals {
            log::debug!("Applying control signal {signal:?}.");
            match signal {
                ControlSignal::Pause => self.pause(),
                ControlSignal::Resume => {
                    // Failures are already reported as advisories.
                    let _ = self.resume();
                }
                ControlSignal::SurfaceChanged {
                    width,
                    height,
                    rotation,
                } => self.surface_changed(width, height, rotation),
                ControlSignal::ApplySettings(choices) => self.apply_settings(choices),
            }
        }
    }

    fn configure_session(&mut self) -> Result<(), TrackingError> {
        let provider = self.session.provider();
        let depth_supported = provider.is_depth_mode_supported(DepthMode::Automatic);
        let mut config = self
            .settings
            .session_config(depth_supported, self.config.allow_depth);
        config.camera_config = provider
            .supported_camera_configs(&config.camera_config_filter)
            .into_iter()
            .next();
        log::debug!("Configuring session: {config:?}");
        self.session.configure(&config)
    }

    fn open_performance_log(&mut self) {
        if self.logger.is_open() {
            return;
        }
        let Some(path) = &self.config.performance_log_path else {
            return;
        };
        match PerformanceLogger::open_append(path, &self.config.recording_name()) {
            Ok(logger) => self.logger = logger,
            Err(e) => log::error!("Failed to open the performance log: {e:#}"),
        }
    }

    fn persist_settings(&self) {
        if let Some(store) = &self.settings_store {
            if let Err(e) = store.save(&self.settings) {
                log::warn!("Failed to save settings: {e:#}");
            }
        }
    }

    /// Ends the run exactly once: snapshot (on completion), log, timer
    /// queries, then the session.
    fn finish(&mut self, outcome: RunOutcome) {
        if self.state == OrchestratorState::Finished {
            return;
        }
        self.display.pause();
        if outcome == RunOutcome::Completed {
            self.save_snapshot();
        }
        self.release_collection_resources();
        self.session.close();
        self.state = OrchestratorState::Finished;
        self.outcome = Some(outcome);
        log::info!(
            "Benchmark finished: {outcome:?} after {} frames.",
            self.frames_rendered
        );
        self.events.publish(OrchestratorEvent::Finished(outcome));
    }

    fn save_snapshot(&mut self) {
        let Some(path) = self.config.snapshot_path() else {
            return;
        };
        let Some(writer) = self.snapshot_writer.as_mut() else {
            log::debug!("No snapshot writer; skipping {}.", path.display());
            return;
        };
        let viewport = self.renderer.viewport();
        let pixels = match self
            .renderer
            .read_pixels(0, 0, viewport.width, viewport.height)
        {
            Ok(pixels) => pixels,
            Err(e) => {
                log::error!("Failed to read back the last frame: {e}");
                return;
            }
        };
        match writer.write_snapshot(&pixels, &path) {
            Ok(()) => log::info!("Saved last frame to {}.", path.display()),
            Err(e) => log::error!("Failed to save the last frame: {e:#}"),
        }
    }

    fn release_collection_resources(&mut self) {
        self.logger.close();
        self.timing.release(self.timer_backend.as_mut());
    }

    // --- Accessors ---

    /// Current lifecycle state.
    pub fn state(&self) -> OrchestratorState {
        self.state
    }

    /// How the run ended, once it has.
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    /// The event bus the host drains.
    pub fn events(&self) -> &EventBus<OrchestratorEvent> {
        &self.events
    }

    /// A new handle for steering this orchestrator from other threads.
    pub fn control_handle(&self) -> ControlHandle {
        ControlHandle::new(self.control_tx.clone())
    }

    /// Current benchmark phase.
    pub fn phase(&self) -> i32 {
        self.phase
    }

    /// Current session settings.
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Anchors placed so far.
    pub fn anchors(&self) -> &[Anchor] {
        self.anchors.anchors()
    }

    /// Frames that reached the performance log.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// The GPU timing ring.
    pub fn timing(&self) -> &GpuTimingRingBuffer {
        &self.timing
    }

    /// The shading parameters of the last frame.
    pub fn shading_parameters(&self) -> &ShadingParameters {
        self.lighting.parameters()
    }

    /// The performance log.
    pub fn performance_log(&self) -> &PerformanceLogger {
        &self.logger
    }

    /// The display geometry helper.
    pub fn display(&self) -> &DisplayGeometry {
        &self.display
    }

    /// The run configuration.
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }
}

fn apply_shading(
    renderer: &mut dyn Renderer,
    scene: &SceneResources,
    parameters: &ShadingParameters,
) {
    for (name, value) in parameters.uniforms() {
        warn_on_error(
            renderer.set_uniform(scene.virtual_object_shader, name, value),
            "update a lighting uniform",
        );
    }
}

fn warn_on_error(result: Result<(), RenderError>, what: &str) {
    if let Err(e) = result {
        log::warn!("Failed to {what}: {e}");
    }
}
