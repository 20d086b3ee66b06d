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

//! The on-disk recording format.
//!
//! A recording is one JSON document holding the frames of a captured session
//! in order. Each frame carries the trackables the runtime knew about when it
//! was captured, so hit tests replay against the same geometry.

use anyhow::Context;
use arbench_core::tracking::{CameraConfig, Frame, Plane, Point};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One captured frame plus the trackables known at that time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// The frame as the runtime produced it.
    #[serde(flatten)]
    pub frame: Frame,
    /// Planes known to the session when the frame was captured.
    #[serde(default)]
    pub planes: Vec<Plane>,
    /// Feature points known to the session when the frame was captured.
    #[serde(default)]
    pub points: Vec<Point>,
}

/// A captured session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recording {
    /// Camera configs the capturing device supported, preferred first.
    #[serde(default)]
    pub camera_configs: Vec<CameraConfig>,
    /// Whether the capturing device supported automatic depth.
    #[serde(default)]
    pub depth_supported: bool,
    /// Frames in capture order.
    pub frames: Vec<RecordedFrame>,
}

impl Recording {
    /// Reads a recording from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read recording '{}'", path.display()))?;
        let recording: Recording = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse recording '{}'", path.display()))?;
        log::info!(
            "Loaded recording '{}' ({} frames).",
            path.display(),
            recording.frames.len()
        );
        Ok(recording)
    }

    /// Writes the recording as JSON.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let text = serde_json::to_string(self).context("Failed to serialize recording")?;
        fs::write(path, text)
            .with_context(|| format!("Failed to write recording '{}'", path.display()))
    }
}
