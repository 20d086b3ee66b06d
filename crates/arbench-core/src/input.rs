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

//! Live input capture contracts.

use crate::math::Vec2;
use serde::{Deserialize, Serialize};

/// A single-finger tap in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TapEvent {
    /// Horizontal position, from the left edge.
    pub x: f32,
    /// Vertical position, from the top edge.
    pub y: f32,
}

impl TapEvent {
    /// Creates a tap at `(x, y)`.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The tap position as a vector.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// A source of live taps, polled from the render thread.
pub trait TapInput {
    /// Removes and returns the oldest pending tap.
    fn poll_tap(&mut self) -> Option<TapEvent>;
}
