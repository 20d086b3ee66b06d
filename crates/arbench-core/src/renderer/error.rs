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

//! Error types for rendering and GPU timing.

use super::{FramebufferId, MeshId, ShaderId, TextureId};
use std::fmt;

/// A top-level error raised by a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A shader, mesh or texture asset could not be read or decoded.
    AssetLoad {
        /// The asset that failed.
        path: String,
        /// The underlying reason.
        reason: String,
    },
    /// A handle does not refer to a live resource.
    ResourceNotFound(ResourceKind),
    /// The graphics backend reported an error.
    Backend(String),
}

/// The resource named by [`RenderError::ResourceNotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// A mesh handle.
    Mesh(MeshId),
    /// A shader handle.
    Shader(ShaderId),
    /// A texture handle.
    Texture(TextureId),
    /// A framebuffer handle.
    Framebuffer(FramebufferId),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::AssetLoad { path, reason } => {
                write!(f, "Failed to read a required asset file '{path}': {reason}")
            }
            RenderError::ResourceNotFound(kind) => write!(f, "Resource not found: {kind:?}"),
            RenderError::Backend(msg) => write!(f, "Graphics backend error: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

/// An error raised by a GPU timer backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimingError {
    /// The device exposes no elapsed-time queries.
    Unsupported,
    /// A query object could not be allocated.
    QueryAllocation(String),
}

impl fmt::Display for TimingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingError::Unsupported => {
                write!(f, "GPU timer queries are unavailable on this device")
            }
            TimingError::QueryAllocation(reason) => {
                write!(f, "Failed to allocate a timer query: {reason}")
            }
        }
    }
}

impl std::error::Error for TimingError {}
