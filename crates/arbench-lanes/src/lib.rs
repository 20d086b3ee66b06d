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

//! # ARBench Lanes
//!
//! The hot-path stages composed by the frame orchestrator. Each lane owns its
//! own state and talks to the outside world only through the collaborator
//! traits of `arbench-core`.

#![warn(missing_docs)]

pub mod anchor_lane;
pub mod lighting_lane;
pub mod playback_lane;
pub mod timing_lane;

pub use anchor_lane::{AnchorPlacementEngine, PlacementOutcome};
pub use lighting_lane::{LightEstimationTransformer, LightingError};
pub use playback_lane::{PayloadError, TrackPlaybackReader};
pub use timing_lane::{GpuTimingRingBuffer, RING_SIZE};
