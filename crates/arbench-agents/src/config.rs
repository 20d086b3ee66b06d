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

//! Benchmark run configuration, stored as RON.

use anyhow::Context;
use arbench_core::settings::SessionSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything a benchmark run needs besides its collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Recording to play back. `None` runs on the live camera.
    pub recording_path: Option<PathBuf>,
    /// Performance log, appended to across runs. `None` disables it.
    pub performance_log_path: Option<PathBuf>,
    /// Near clip plane, in meters.
    pub z_near: f32,
    /// Far clip plane, in meters.
    pub z_far: f32,
    /// Assumed surface distance for instant placement, in meters.
    pub approximate_distance_m: f32,
    /// Face size of the filtered environment cubemap.
    pub cubemap_resolution: u32,
    /// Importance samples per texel when filtering the cubemap.
    pub cubemap_importance_samples: u32,
    /// Lets the session enable depth when supported and requested.
    pub allow_depth: bool,
    /// Initial session settings, overridden by a settings store if any.
    pub settings: SessionSettings,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            recording_path: None,
            performance_log_path: None,
            z_near: 0.1,
            z_far: 100.0,
            approximate_distance_m: 2.0,
            cubemap_resolution: 16,
            cubemap_importance_samples: 32,
            allow_depth: false,
            settings: SessionSettings::default(),
        }
    }
}

impl BenchmarkConfig {
    /// Parses a configuration from RON text. Missing fields take defaults.
    pub fn from_ron_str(text: &str) -> anyhow::Result<Self> {
        ron::de::from_str(text).context("Failed to parse benchmark configuration")
    }

    /// Reads a configuration file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_ron_str(&text)
    }

    /// Serializes to pretty RON.
    pub fn to_ron_string(&self) -> anyhow::Result<String> {
        let pretty = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        ron::ser::to_string_pretty(self, pretty)
            .context("Failed to serialize benchmark configuration")
    }

    /// Name written in the performance log header: the recording's file name,
    /// or `live`.
    pub fn recording_name(&self) -> String {
        self.recording_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "live".to_string())
    }

    /// Where the end-of-run snapshot goes: the recording path with its
    /// extension replaced by `jpg`.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.recording_path
            .as_ref()
            .map(|path| path.with_extension("jpg"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = BenchmarkConfig::from_ron_str("()").unwrap();
        assert_eq!(config, BenchmarkConfig::default());
        assert_eq!(config.z_near, 0.1);
        assert_eq!(config.cubemap_resolution, 16);
        assert!(!config.allow_depth);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = BenchmarkConfig::from_ron_str(
            r#"(
                recording_path: Some("recordings/run1.mp4"),
                approximate_distance_m: 1.5,
                settings: (instant_placement: (enabled: true)),
            )"#,
        )
        .unwrap();
        assert_eq!(config.approximate_distance_m, 1.5);
        assert!(config.settings.instant_placement.enabled);
        assert_eq!(config.z_far, 100.0);
        assert_eq!(config.recording_name(), "run1.mp4");
        assert_eq!(
            config.snapshot_path(),
            Some(PathBuf::from("recordings/run1.jpg"))
        );
    }

    #[test]
    fn live_runs_have_no_snapshot() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.recording_name(), "live");
        assert_eq!(config.snapshot_path(), None);
    }

    #[test]
    fn pretty_output_parses_back() {
        let mut config = BenchmarkConfig::default();
        config.performance_log_path = Some(PathBuf::from("fps.csv"));
        let text = config.to_ron_string().unwrap();
        assert_eq!(BenchmarkConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(BenchmarkConfig::load(&dir.path().join("missing.ron")).is_err());
    }
}
