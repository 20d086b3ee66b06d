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

//! Wall-clock phase timing for one frame.

use arbench_core::utils::timer::Clock;

/// A point in time captured by [`FrameTimer::mark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseMark(u64);

/// Measures the phases of one frame against a [`Clock`].
///
/// Created at the very start of a tick; the start timestamp is what the
/// performance log reports as the frame time.
pub struct FrameTimer<'a> {
    clock: &'a dyn Clock,
    frame_start_ms: u64,
}

impl<'a> FrameTimer<'a> {
    /// Starts timing a frame now.
    pub fn start(clock: &'a dyn Clock) -> Self {
        Self {
            frame_start_ms: clock.now_ms(),
            clock,
        }
    }

    /// Wall-clock timestamp at which the frame started, in epoch milliseconds.
    pub fn frame_start_ms(&self) -> u64 {
        self.frame_start_ms
    }

    /// Captures the current time as the start of a phase.
    pub fn mark(&self) -> PhaseMark {
        PhaseMark(self.clock.now_ms())
    }

    /// Milliseconds elapsed since `mark`.
    pub fn since(&self, mark: PhaseMark) -> u64 {
        self.clock.now_ms().saturating_sub(mark.0)
    }

    /// Milliseconds elapsed since the frame started.
    pub fn total_ms(&self) -> u64 {
        self.clock.now_ms().saturating_sub(self.frame_start_ms)
    }
}
