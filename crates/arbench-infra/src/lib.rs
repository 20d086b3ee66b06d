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

//! # ARBench Infra
//!
//! Concrete implementations of the collaborator contracts defined in
//! `arbench-core`. Everything here runs without a device or a GPU: recorded
//! sessions replace the tracking runtime and the headless renderer replaces
//! the graphics backend, so a full benchmark run can be reproduced on any
//! machine.

#![warn(missing_docs)]

pub mod graphics;
pub mod platform;
pub mod replay;
pub mod settings_store;
pub mod snapshot;

pub use graphics::headless::{HeadlessCubemapFilter, HeadlessRenderer, SimulatedTimerQueries};
pub use platform::input::{QueuedTapInput, TapSender};
pub use replay::RecordedSession;
pub use settings_store::FileSettingsStore;
pub use snapshot::JpegSnapshotWriter;
