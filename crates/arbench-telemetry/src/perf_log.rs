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

//! The append-only performance log.
//!
//! One text line per frame:
//! `phase,frameTimeMs,processTimeMs,inputTimeMs,gpuTime,totalFrameTimeMs`.
//! A run starts with a `test <recording-name>` header line. The file is opened
//! in append mode so successive runs accumulate in one log.
//!
//! Telemetry must never abort a benchmark run: every I/O failure is logged and
//! swallowed.

use anyhow::Context;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One line of the performance log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerformanceLogEntry {
    /// Benchmark phase active during the frame.
    pub phase: i32,
    /// Wall-clock time at the start of the frame, epoch milliseconds.
    pub frame_time_ms: u64,
    /// Duration of the tracking update.
    pub process_time_ms: u64,
    /// Duration of input handling.
    pub input_time_ms: u64,
    /// Last GPU elapsed time read back, in nanoseconds. May lag the frame.
    pub gpu_time_ns: u64,
    /// Duration of the whole frame up to the log write.
    pub total_frame_time_ms: u64,
}

impl PerformanceLogEntry {
    /// Formats the entry as a newline-terminated log line.
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{},{}\n",
            self.phase,
            self.frame_time_ms,
            self.process_time_ms,
            self.input_time_ms,
            self.gpu_time_ns,
            self.total_frame_time_ms
        )
    }
}

/// Writes [`PerformanceLogEntry`] lines to a sink until closed.
pub struct PerformanceLogger {
    sink: Option<Box<dyn Write + Send>>,
    lines_written: u64,
}

impl PerformanceLogger {
    /// Opens `path` in append mode and writes the run header.
    pub fn open_append(path: &Path, recording_name: &str) -> anyhow::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open performance log '{}'", path.display()))?;
        log::info!("Performance log opened at '{}'.", path.display());
        Ok(Self::from_writer(
            Box::new(BufWriter::new(file)),
            recording_name,
        ))
    }

    /// Wraps an arbitrary writer and writes the run header.
    pub fn from_writer(writer: Box<dyn Write + Send>, recording_name: &str) -> Self {
        let mut logger = Self {
            sink: Some(writer),
            lines_written: 0,
        };
        logger.write_raw(&format!("test {recording_name}\n"));
        logger
    }

    /// A logger that drops everything.
    pub fn disabled() -> Self {
        Self {
            sink: None,
            lines_written: 0,
        }
    }

    /// Whether the logger still has an open sink.
    pub fn is_open(&self) -> bool {
        self.sink.is_some()
    }

    /// Number of entry lines successfully written, header excluded.
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Appends one entry line.
    pub fn write(&mut self, entry: &PerformanceLogEntry) {
        if self.write_raw(&entry.to_line()) {
            self.lines_written += 1;
        }
    }

    /// Flushes buffered lines to the sink.
    pub fn flush(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            if let Err(e) = sink.flush() {
                log::error!("Failed to flush performance log: {e}");
            }
        }
    }

    /// Flushes and releases the sink. Later writes are dropped.
    pub fn close(&mut self) {
        self.flush();
        if self.sink.take().is_some() {
            log::debug!(
                "Performance log closed after {} frames.",
                self.lines_written
            );
        }
    }

    fn write_raw(&mut self, line: &str) -> bool {
        let Some(sink) = self.sink.as_mut() else {
            return false;
        };
        match sink.write_all(line.as_bytes()) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to log frame data: {e}");
                false
            }
        }
    }
}

impl Drop for PerformanceLogger {
    fn drop(&mut self) {
        self.close();
    }
}
