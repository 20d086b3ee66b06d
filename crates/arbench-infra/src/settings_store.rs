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

//! Persists [`SessionSettings`] as a RON file.

use anyhow::Context;
use arbench_core::settings::{SessionSettings, SettingsStore};
use std::fs;
use std::path::{Path, PathBuf};

/// A [`SettingsStore`] backed by one RON file.
///
/// A missing file reads as the default settings.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// Creates a store for `path`. Nothing is read until [`SettingsStore::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> anyhow::Result<SessionSettings> {
        if !self.path.exists() {
            log::debug!(
                "No settings at '{}', using defaults.",
                self.path.display()
            );
            return Ok(SessionSettings::default());
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings '{}'", self.path.display()))?;
        ron::de::from_str(&text)
            .with_context(|| format!("Failed to parse settings '{}'", self.path.display()))
    }

    fn save(&self, settings: &SessionSettings) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create settings directory '{}'", parent.display())
                })?;
            }
        }
        let pretty_config = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        let text = ron::ser::to_string_pretty(settings, pretty_config)
            .context("Failed to serialize settings")?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write settings '{}'", self.path.display()))?;
        log::debug!("Settings saved to '{}'.", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path().join("settings.ron"));
        assert_eq!(store.load().unwrap(), SessionSettings::default());
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path().join("nested/settings.ron"));
        let mut settings = SessionSettings::default();
        settings.depth.depth_enable_dialog_shown = true;
        settings.instant_placement.enabled = true;
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(&path, "(instant_placement: (enabled: true))").unwrap();
        let settings = FileSettingsStore::new(&path).load().unwrap();
        assert!(settings.instant_placement.enabled);
        assert!(!settings.depth.depth_enable_dialog_shown);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(&path, "not ron at all {").unwrap();
        assert!(FileSettingsStore::new(&path).load().is_err());
    }
}
