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

//! Acts as the **[A]gent** of the benchmark: the frame orchestrator.
//!
//! The orchestrator owns the tracking session and the per-frame lanes. It is
//! driven from the render thread by three host callbacks (surface created,
//! surface changed, draw frame) plus the resume/pause lifecycle, and talks
//! back to the host through an event bus. Other threads steer it through a
//! [`ControlHandle`].

mod agent;
mod control;
mod display;
mod events;
mod scene;

pub use agent::FrameOrchestrator;
pub use control::{ControlHandle, ControlSignal};
pub use display::DisplayGeometry;
pub use events::{Advisory, OrchestratorEvent, OrchestratorState, RunOutcome, TickOutcome};
pub use scene::{background_quad, SceneResources};
