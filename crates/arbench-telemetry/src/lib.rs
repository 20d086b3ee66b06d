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

//! # ARBench Telemetry
//!
//! The append-only per-frame performance log, the phase-boundary timer that
//! feeds it, and process-wide logger initialisation.

#![warn(missing_docs)]

pub mod frame_timer;
pub mod logging;
pub mod perf_log;

pub use frame_timer::{FrameTimer, PhaseMark};
pub use perf_log::{PerformanceLogEntry, PerformanceLogger};
