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

//! Tracks the display geometry and forwards changes to the tracking runtime.

use arbench_core::tracking::{DisplayRotation, TrackingProvider};

/// Remembers the latest surface size and rotation, and tells the provider
/// about them once per change.
///
/// Must be paused before the session is paused or closed, so that no frame
/// in flight pushes geometry into a released session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayGeometry {
    rotation: DisplayRotation,
    width: u32,
    height: u32,
    changed: bool,
    paused: bool,
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayGeometry {
    /// A paused helper with no surface yet.
    pub fn new() -> Self {
        Self {
            rotation: DisplayRotation::Rotation0,
            width: 0,
            height: 0,
            changed: false,
            paused: true,
        }
    }

    /// Records a new surface size and rotation.
    pub fn on_surface_changed(&mut self, rotation: DisplayRotation, width: u32, height: u32) {
        self.rotation = rotation;
        self.width = width;
        self.height = height;
        self.changed = true;
    }

    /// Starts forwarding changes.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Stops forwarding changes. Pending ones are kept for the next resume.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Whether forwarding is stopped.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current rotation.
    pub fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    /// Current surface size.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Width over height, or 1 before the first surface.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Pushes a pending change to `provider`. Returns whether one was sent.
    pub fn update_session_if_needed(&mut self, provider: &mut dyn TrackingProvider) -> bool {
        if self.paused || !self.changed {
            return false;
        }
        provider.set_display_geometry(self.rotation, self.width, self.height);
        self.changed = false;
        log::debug!(
            "Display geometry sent: {:?} {}x{}.",
            self.rotation,
            self.width,
            self.height
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_paused_without_a_surface() {
        let display = DisplayGeometry::new();
        assert!(display.is_paused());
        assert_eq!(display.size(), (0, 0));
        assert_eq!(display.aspect_ratio(), 1.0);
    }

    #[test]
    fn surface_change_is_remembered_across_pause() {
        let mut display = DisplayGeometry::new();
        display.on_surface_changed(DisplayRotation::Rotation90, 1920, 1080);
        display.pause();
        assert_eq!(display.rotation(), DisplayRotation::Rotation90);
        assert_eq!(display.size(), (1920, 1080));
        assert!((display.aspect_ratio() - 1920.0 / 1080.0).abs() < f32::EPSILON);
    }
}
