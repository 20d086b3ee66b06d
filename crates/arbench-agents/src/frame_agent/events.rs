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

//! States, outcomes and host notifications of the orchestrator.

use arbench_core::tracking::AnchorId;
use std::fmt;

/// Lifecycle of a [`FrameOrchestrator`](super::FrameOrchestrator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrchestratorState {
    /// Not ticking: never resumed, paused, or torn down.
    #[default]
    Idle,
    /// Resumed; every tick renders a frame.
    Tracking,
    /// The run is over. Terminal.
    Finished,
}

/// How a benchmark run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The recording played to its end.
    Completed,
    /// The recording could not be opened or stopped producing frames.
    PlaybackFailed,
}

/// What a single call to [`FrameOrchestrator::tick`](super::FrameOrchestrator::tick)
/// did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not tracking, or no scene resources; nothing happened.
    Skipped,
    /// A frame was rendered and logged.
    Rendered,
    /// The camera was unavailable; retried next tick.
    CameraUnavailable,
    /// GPU timer queries are missing; the frame stopped after lighting.
    TimerUnsupported,
    /// The frame was abandoned on an unexpected error.
    Aborted(String),
    /// The run ended during this tick.
    Finished(RunOutcome),
}

/// A message for the user, shown by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// The camera could not be acquired.
    CameraUnavailable,
    /// A shader, model or texture asset failed to load.
    AssetLoadFailed(String),
    /// The device cannot time GPU work, so the benchmark measures nothing.
    TimerQueriesUnsupported,
    /// The recording could not be played.
    PlaybackFailed(String),
    /// The frame's light estimate could not be turned into shading.
    LightEstimateRejected(String),
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::CameraUnavailable => {
                write!(f, "Camera not available. Try restarting the app.")
            }
            Advisory::AssetLoadFailed(reason) => {
                write!(f, "Failed to read a required asset file: {reason}")
            }
            Advisory::TimerQueriesUnsupported => write!(
                f,
                "GPU timer queries (EXT_disjoint_timer_query) are unavailable on this device"
            ),
            Advisory::PlaybackFailed(reason) => write!(f, "Playback failed: {reason}"),
            Advisory::LightEstimateRejected(reason) => {
                write!(f, "Light estimate rejected: {reason}")
            }
        }
    }
}

/// Notifications published on the orchestrator's event bus.
#[derive(Debug, Clone, PartialEq)]
pub enum OrchestratorEvent {
    /// Show a message to the user.
    Advisory(Advisory),
    /// Keep the display awake (`true`) or let it sleep.
    KeepScreenOn(bool),
    /// Ask the user whether to enable depth occlusion.
    SuggestDepthOcclusion,
    /// An anchor was placed.
    AnchorPlaced(AnchorId),
    /// The recording moved to another benchmark phase.
    PhaseChanged(i32),
    /// The run ended.
    Finished(RunOutcome),
}
