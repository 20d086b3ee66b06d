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

use crate::renderer::{TimerQueryId, TimingError};

/// Elapsed-time GPU queries, read back asynchronously.
///
/// Results become available some frames after [`GpuTimerBackend::end_query`];
/// callers poll [`GpuTimerBackend::is_result_available`] and must never block.
pub trait GpuTimerBackend {
    /// Returns whether the device exposes elapsed-time queries.
    fn supports_timer_queries(&self) -> bool;

    /// Allocates a new query object.
    fn create_query(&mut self) -> Result<TimerQueryId, TimingError>;

    /// Starts timing the GPU commands that follow.
    fn begin_query(&mut self, query: TimerQueryId);

    /// Stops timing. The result is produced asynchronously.
    fn end_query(&mut self, query: TimerQueryId);

    /// Non-blocking check for the result of the last begin/end pair.
    fn is_result_available(&self, query: TimerQueryId) -> bool;

    /// Reads the elapsed time in nanoseconds. Only meaningful once available.
    fn query_result_ns(&self, query: TimerQueryId) -> u64;

    /// Releases a query object.
    fn delete_query(&mut self, query: TimerQueryId);
}
