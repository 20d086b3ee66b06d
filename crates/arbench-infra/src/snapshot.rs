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

//! JPEG snapshots of the last composited frame.

use anyhow::{anyhow, Context};
use arbench_core::renderer::{PixelBuffer, SnapshotWriter};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// JPEG quality used for end-of-run snapshots.
pub const DEFAULT_JPEG_QUALITY: u8 = 50;

/// Writes read-back framebuffers as JPEG files.
#[derive(Debug, Clone, Copy)]
pub struct JpegSnapshotWriter {
    quality: u8,
}

impl JpegSnapshotWriter {
    /// A writer using [`DEFAULT_JPEG_QUALITY`].
    pub fn new() -> Self {
        Self::with_quality(DEFAULT_JPEG_QUALITY)
    }

    /// A writer using `quality` (1-100).
    pub fn with_quality(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

impl Default for JpegSnapshotWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotWriter for JpegSnapshotWriter {
    fn write_snapshot(&mut self, pixels: &PixelBuffer, path: &Path) -> anyhow::Result<()> {
        // Framebuffer rows come bottom first.
        let flipped = pixels.flipped_vertically();
        let rgba = RgbaImage::from_raw(flipped.width, flipped.height, flipped.rgba)
            .ok_or_else(|| {
                anyhow!(
                    "Pixel buffer does not match its {}x{} size",
                    pixels.width,
                    pixels.height
                )
            })?;
        let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();

        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("Failed to replace '{}'", path.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create '{}'", path.display()))?;
        let mut writer = BufWriter::new(file);
        JpegEncoder::new_with_quality(&mut writer, self.quality)
            .encode_image(&rgb)
            .with_context(|| format!("Failed to encode '{}'", path.display()))?;
        Ok(())
    }
}
