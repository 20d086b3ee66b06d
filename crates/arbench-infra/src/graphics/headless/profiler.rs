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

//! Simulated GPU elapsed-time queries.
//!
//! Results become readable a fixed number of frames after their query ended,
//! which reproduces the asynchronous readback of a real device. A frame ends
//! with every `end_query`.

use arbench_core::renderer::{GpuTimerBackend, TimerQueryId, TimingError};
use arbench_core::utils::timer::Stopwatch;
use std::collections::HashMap;

/// What a finished query reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSource {
    /// Always the same elapsed time, in nanoseconds.
    Fixed(u64),
    /// The host time spent between `begin_query` and `end_query`.
    HostElapsed,
}

#[derive(Debug, Default)]
struct QueryState {
    running: Option<Stopwatch>,
    ended_at_frame: Option<u64>,
    elapsed_ns: u64,
}

/// A [`GpuTimerBackend`] driven by the host clock.
#[derive(Debug)]
pub struct SimulatedTimerQueries {
    supported: bool,
    latency_frames: u64,
    source: TimerSource,
    frame: u64,
    next_id: u32,
    queries: HashMap<TimerQueryId, QueryState>,
}

impl SimulatedTimerQueries {
    /// Creates a backend whose results are available `latency_frames` frames
    /// after their query ended.
    pub fn new(latency_frames: u64, source: TimerSource) -> Self {
        Self {
            supported: true,
            latency_frames,
            source,
            frame: 0,
            next_id: 0,
            queries: HashMap::new(),
        }
    }

    /// A device without elapsed-time queries.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new(0, TimerSource::Fixed(0))
        }
    }

    /// Number of live query objects.
    pub fn live_queries(&self) -> usize {
        self.queries.len()
    }
}

impl GpuTimerBackend for SimulatedTimerQueries {
    fn supports_timer_queries(&self) -> bool {
        self.supported
    }

    fn create_query(&mut self) -> Result<TimerQueryId, TimingError> {
        if !self.supported {
            return Err(TimingError::Unsupported);
        }
        self.next_id += 1;
        let id = TimerQueryId(self.next_id);
        self.queries.insert(id, QueryState::default());
        Ok(id)
    }

    fn begin_query(&mut self, query: TimerQueryId) {
        match self.queries.get_mut(&query) {
            Some(state) => {
                state.running = Some(Stopwatch::new());
                state.ended_at_frame = None;
            }
            None => log::warn!("begin_query on unknown query {query:?}."),
        }
    }

    fn end_query(&mut self, query: TimerQueryId) {
        let frame = self.frame;
        self.frame += 1;
        let Some(state) = self.queries.get_mut(&query) else {
            log::warn!("end_query on unknown query {query:?}.");
            return;
        };
        let Some(stopwatch) = state.running.take() else {
            log::warn!("end_query on {query:?} without begin_query.");
            return;
        };
        state.elapsed_ns = match self.source {
            TimerSource::Fixed(ns) => ns,
            TimerSource::HostElapsed => stopwatch.elapsed_ns().unwrap_or(u64::MAX),
        };
        state.ended_at_frame = Some(frame);
    }

    fn is_result_available(&self, query: TimerQueryId) -> bool {
        self.queries
            .get(&query)
            .and_then(|s| s.ended_at_frame)
            .is_some_and(|ended| self.frame >= ended + self.latency_frames)
    }

    fn query_result_ns(&self, query: TimerQueryId) -> u64 {
        self.queries.get(&query).map_or(0, |s| s.elapsed_ns)
    }

    fn delete_query(&mut self, query: TimerQueryId) {
        if self.queries.remove(&query).is_none() {
            log::warn!("delete_query on unknown query {query:?}.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_arrives_after_latency() {
        let mut timer = SimulatedTimerQueries::new(2, TimerSource::Fixed(1_500));
        let a = timer.create_query().unwrap();
        let b = timer.create_query().unwrap();

        timer.begin_query(a);
        timer.end_query(a);
        assert!(!timer.is_result_available(a));

        timer.begin_query(b);
        timer.end_query(b);
        assert!(timer.is_result_available(a));
        assert!(!timer.is_result_available(b));
        assert_eq!(timer.query_result_ns(a), 1_500);
    }

    #[test]
    fn restarting_a_query_hides_its_old_result() {
        let mut timer = SimulatedTimerQueries::new(0, TimerSource::Fixed(7));
        let q = timer.create_query().unwrap();
        timer.begin_query(q);
        timer.end_query(q);
        assert!(timer.is_result_available(q));
        timer.begin_query(q);
        assert!(!timer.is_result_available(q));
    }

    #[test]
    fn host_elapsed_is_measured() {
        let mut timer = SimulatedTimerQueries::new(0, TimerSource::HostElapsed);
        let q = timer.create_query().unwrap();
        timer.begin_query(q);
        std::thread::sleep(std::time::Duration::from_millis(2));
        timer.end_query(q);
        assert!(timer.query_result_ns(q) >= 2_000_000);
    }

    #[test]
    fn unsupported_device_allocates_nothing() {
        let mut timer = SimulatedTimerQueries::unsupported();
        assert!(!timer.supports_timer_queries());
        assert_eq!(timer.create_query(), Err(TimingError::Unsupported));
    }

    #[test]
    fn delete_releases_the_query() {
        let mut timer = SimulatedTimerQueries::new(1, TimerSource::Fixed(0));
        let q = timer.create_query().unwrap();
        assert_eq!(timer.live_queries(), 1);
        timer.delete_query(q);
        assert_eq!(timer.live_queries(), 0);
    }
}
