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

// Headless benchmark runner.
// Run with: cargo run -p sandbox -- --recording <file.json>

use anyhow::{bail, Context, Result};
use arbench_agents::{
    BenchmarkConfig, FrameOrchestrator, OrchestratorEvent, RunOutcome, TickOutcome,
};
use arbench_core::tracking::{DisplayRotation, TrackingError};
use arbench_infra::graphics::headless::TimerSource;
use arbench_infra::{
    FileSettingsStore, HeadlessCubemapFilter, HeadlessRenderer, JpegSnapshotWriter,
    RecordedSession, SimulatedTimerQueries,
};
use arbench_telemetry::logging::init_logging;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Replays a recorded AR session through the benchmark pipeline")]
struct Cli {
    /// Benchmark configuration (RON).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Recording to replay. Overrides the configuration.
    #[arg(short, long)]
    recording: Option<PathBuf>,

    /// Performance log to append to. Overrides the configuration.
    #[arg(short, long)]
    log: Option<PathBuf>,

    /// Settings file, created on first save.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Directory holding shaders, models and textures. Assets are virtual
    /// when omitted.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Stop after this many ticks even if the recording has not ended.
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Headless viewport width.
    #[arg(long, default_value_t = 1080)]
    width: u32,

    /// Headless viewport height.
    #[arg(long, default_value_t = 1920)]
    height: u32,

    /// Frames before a GPU timer result can be read back.
    #[arg(long, default_value_t = 3)]
    gpu_latency: u64,

    /// Simulate a device without GPU timer queries.
    #[arg(long)]
    no_timer: bool,
}

fn main() -> ExitCode {
    init_logging("info");
    let cli = Cli::parse();
    match run(&cli) {
        Ok(Some(RunOutcome::Completed)) | Ok(None) => ExitCode::SUCCESS,
        Ok(Some(RunOutcome::PlaybackFailed)) => ExitCode::from(1),
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn load_config(cli: &Cli) -> Result<BenchmarkConfig> {
    let mut config = match &cli.config {
        Some(path) => BenchmarkConfig::load(path)?,
        None => BenchmarkConfig::default(),
    };
    if let Some(recording) = &cli.recording {
        config.recording_path = Some(recording.clone());
    }
    if let Some(log) = &cli.log {
        config.performance_log_path = Some(log.clone());
    }
    Ok(config)
}

fn build(cli: &Cli, config: BenchmarkConfig) -> FrameOrchestrator {
    let renderer = match &cli.assets {
        Some(root) => HeadlessRenderer::with_asset_root(root),
        None => HeadlessRenderer::new(),
    };
    let timer = if cli.no_timer {
        SimulatedTimerQueries::unsupported()
    } else {
        SimulatedTimerQueries::new(cli.gpu_latency, TimerSource::HostElapsed)
    };
    let filter =
        HeadlessCubemapFilter::new(config.cubemap_resolution, config.cubemap_importance_samples);

    let mut orchestrator = FrameOrchestrator::new(
        config,
        Box::new(RecordedSession::new()),
        Box::new(renderer),
        Box::new(timer),
        Box::new(filter),
    )
    .with_snapshot_writer(Box::new(JpegSnapshotWriter::new()));
    if let Some(settings) = &cli.settings {
        orchestrator = orchestrator.with_settings_store(Box::new(FileSettingsStore::new(settings)));
    }
    orchestrator
}

/// Runs the benchmark. `None` means the tick cap stopped it early.
fn run(cli: &Cli) -> Result<Option<RunOutcome>> {
    let config = load_config(cli)?;
    if config.recording_path.is_none() {
        bail!("No recording to replay; pass --recording or set recording_path");
    }
    let mut orchestrator = build(cli, config);

    orchestrator
        .surface_created()
        .context("Failed to create the scene")?;
    orchestrator.surface_changed(cli.width, cli.height, DisplayRotation::Rotation0);
    match orchestrator.resume() {
        Ok(()) => {}
        Err(TrackingError::PlaybackFailed(_)) => {
            report_events(&orchestrator);
            return Ok(orchestrator.outcome());
        }
        Err(e) => return Err(e).context("Failed to start the session"),
    }

    let mut ticks = 0u64;
    let outcome = loop {
        if cli.max_ticks.is_some_and(|cap| ticks >= cap) {
            log::warn!("Tick cap of {ticks} reached before the recording ended.");
            orchestrator.teardown();
            break None;
        }
        let tick = orchestrator.tick();
        ticks += 1;
        report_events(&orchestrator);
        match tick {
            TickOutcome::Finished(outcome) => break Some(outcome),
            TickOutcome::Aborted(reason) => log::debug!("Tick {ticks} aborted: {reason}"),
            _ => {}
        }
    };

    log::info!(
        "{} frames rendered in {ticks} ticks, {} anchors placed.",
        orchestrator.frames_rendered(),
        orchestrator.anchors().len()
    );
    if let Some(path) = &orchestrator.config().performance_log_path {
        log::info!("Performance log: {}", path.display());
    }
    Ok(outcome)
}

fn report_events(orchestrator: &FrameOrchestrator) {
    for event in orchestrator.events().drain() {
        match event {
            OrchestratorEvent::Advisory(advisory) => log::warn!("{advisory}"),
            OrchestratorEvent::SuggestDepthOcclusion => {
                log::info!("This device supports depth; enable occlusion in the settings.")
            }
            OrchestratorEvent::PhaseChanged(phase) => log::info!("Entering phase {phase}."),
            other => log::debug!("{other:?}"),
        }
    }
}
