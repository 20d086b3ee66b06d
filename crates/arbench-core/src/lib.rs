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

//! # ARBench Core
//!
//! Foundational crate containing the math primitives, the tracking data model
//! and the interface contracts of the collaborators that drive the per-frame
//! benchmark pipeline.

#![warn(missing_docs)]

pub mod event;
pub mod input;
pub mod math;
pub mod renderer;
pub mod settings;
pub mod tracking;
pub mod utils;

pub use settings::SessionSettings;
pub use tracking::{Frame, TrackingProvider, TrackingSession};
pub use utils::timer::Stopwatch;
