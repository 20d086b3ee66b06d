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

//! Timing Lane
//!
//! Measures the GPU time of the anchor pass with a ring of timer queries.
//! The result of a query is polled, never waited for: each frame reads the
//! slot written `RING_SIZE - 1` frames ago if its result is ready, and keeps
//! the previous value otherwise. Reported times therefore lag by up to
//! `RING_SIZE - 1` frames, and longer under GPU backpressure.

use arbench_core::renderer::{GpuTimerBackend, TimerQueryId, TimingError};

/// Number of timer queries in the ring.
pub const RING_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, Default)]
struct TimingSlot {
    query: Option<TimerQueryId>,
    /// Ended but not read back yet.
    pending: bool,
}

/// A fixed ring of GPU timer queries.
#[derive(Debug)]
pub struct GpuTimingRingBuffer {
    slots: [TimingSlot; RING_SIZE],
    index: usize,
    in_flight: bool,
    last_elapsed_ns: u64,
    overwritten_unread: u64,
}

impl Default for GpuTimingRingBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuTimingRingBuffer {
    /// Creates an empty ring. Queries are allocated lazily.
    pub fn new() -> Self {
        Self {
            slots: [TimingSlot::default(); RING_SIZE],
            index: 0,
            in_flight: false,
            last_elapsed_ns: 0,
            overwritten_unread: 0,
        }
    }

    /// Runs the begin-step of a frame.
    ///
    /// Allocates the current slot's query if needed, harvests the oldest slot
    /// when its result is ready, then starts timing into the current slot.
    /// Fails with [`TimingError::Unsupported`] on devices without timer
    /// queries.
    pub fn begin_frame(&mut self, backend: &mut dyn GpuTimerBackend) -> Result<(), TimingError> {
        if !backend.supports_timer_queries() {
            return Err(TimingError::Unsupported);
        }

        let query = match self.slots[self.index].query {
            Some(query) => query,
            None => {
                let query = backend.create_query()?;
                self.slots[self.index].query = Some(query);
                query
            }
        };

        let oldest = &mut self.slots[(self.index + 1) % RING_SIZE];
        if let Some(oldest_query) = oldest.query {
            if oldest.pending && backend.is_result_available(oldest_query) {
                self.last_elapsed_ns = backend.query_result_ns(oldest_query);
                oldest.pending = false;
            }
        }

        let current = &mut self.slots[self.index];
        if current.pending {
            self.overwritten_unread += 1;
            log::warn!(
                "GPU timer query in slot {} restarted before its result was read.",
                self.index
            );
            current.pending = false;
        }

        backend.begin_query(query);
        self.in_flight = true;
        Ok(())
    }

    /// Runs the end-step of a frame and advances the ring.
    ///
    /// Does nothing if no query was begun this frame.
    pub fn end_frame(&mut self, backend: &mut dyn GpuTimerBackend) {
        if !self.in_flight {
            return;
        }
        if let Some(query) = self.slots[self.index].query {
            backend.end_query(query);
            self.slots[self.index].pending = true;
        }
        self.in_flight = false;
        self.index = (self.index + 1) % RING_SIZE;
    }

    /// The most recent elapsed time read back, in nanoseconds. Zero until the
    /// first result arrives.
    pub fn last_elapsed_ns(&self) -> u64 {
        self.last_elapsed_ns
    }

    /// Slot the next frame will time into.
    pub fn index(&self) -> usize {
        self.index
    }

    /// How many query results were lost because their slot came around again
    /// before they were available.
    pub fn overwritten_unread(&self) -> u64 {
        self.overwritten_unread
    }

    /// Number of allocated queries.
    pub fn allocated(&self) -> usize {
        self.slots.iter().filter(|s| s.query.is_some()).count()
    }

    /// Deletes every allocated query and resets the ring.
    pub fn release(&mut self, backend: &mut dyn GpuTimerBackend) {
        let mut deleted = 0;
        for slot in &mut self.slots {
            if let Some(query) = slot.query.take() {
                backend.delete_query(query);
                deleted += 1;
            }
            slot.pending = false;
        }
        if deleted > 0 {
            log::debug!("Released {deleted} GPU timer queries.");
        }
        self.index = 0;
        self.in_flight = false;
    }
}
