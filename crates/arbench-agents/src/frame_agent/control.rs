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

//! Cross-thread control of the orchestrator.

use arbench_core::settings::SettingsChoices;
use arbench_core::tracking::DisplayRotation;

/// A request applied by the orchestrator at the start of its next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlSignal {
    /// Pause the session.
    Pause,
    /// Resume the session.
    Resume,
    /// The render surface changed size or rotation.
    SurfaceChanged {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
        /// New display rotation.
        rotation: DisplayRotation,
    },
    /// Apply edited settings and reconfigure the session.
    ApplySettings(SettingsChoices),
}

/// A cloneable, `Send` handle for steering an orchestrator from any thread.
///
/// Signals are queued; the render thread drains them once per tick, so they
/// never race with a frame in progress.
#[derive(Debug, Clone)]
pub struct ControlHandle {
    sender: flume::Sender<ControlSignal>,
}

impl ControlHandle {
    pub(crate) fn new(sender: flume::Sender<ControlSignal>) -> Self {
        Self { sender }
    }

    /// Queues a signal. Returns `false` once the orchestrator is gone.
    pub fn send(&self, signal: ControlSignal) -> bool {
        match self.sender.send(signal) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Dropping control signal {:?}: orchestrator is gone.", e.0);
                false
            }
        }
    }

    /// Queues [`ControlSignal::Pause`].
    pub fn pause(&self) -> bool {
        self.send(ControlSignal::Pause)
    }

    /// Queues [`ControlSignal::Resume`].
    pub fn resume(&self) -> bool {
        self.send(ControlSignal::Resume)
    }

    /// Queues [`ControlSignal::SurfaceChanged`].
    pub fn surface_changed(&self, width: u32, height: u32, rotation: DisplayRotation) -> bool {
        self.send(ControlSignal::SurfaceChanged {
            width,
            height,
            rotation,
        })
    }

    /// Queues [`ControlSignal::ApplySettings`].
    pub fn apply_settings(&self, choices: SettingsChoices) -> bool {
        self.send(ControlSignal::ApplySettings(choices))
    }
}
