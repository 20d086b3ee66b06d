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

//! Error type reported by tracking runtimes.

use std::fmt;

/// An error raised by a [`TrackingProvider`](super::TrackingProvider) or by
/// the [`TrackingSession`](super::TrackingSession) wrapper.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingError {
    /// The camera could not be acquired. Usually transient: another client
    /// holds the device or the runtime is restarting.
    CameraUnavailable,
    /// The playback dataset could not be opened or stopped producing frames.
    PlaybackFailed(String),
    /// The requested data (depth image, cubemap) is not ready for this frame.
    NotYetAvailable,
    /// A frame was requested while the session is not tracking.
    SessionNotTracking,
    /// Track data could not be written to the active recording.
    RecordingFailed(String),
    /// The tracking runtime is gone for good.
    ProviderUnavailable(String),
    /// A recorded frame or track payload is malformed.
    InvalidPayload(String),
}

impl fmt::Display for TrackingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackingError::CameraUnavailable => {
                write!(f, "Camera not available. Try restarting the app.")
            }
            TrackingError::PlaybackFailed(reason) => write!(f, "Playback failed: {reason}"),
            TrackingError::NotYetAvailable => write!(f, "Data not yet available for this frame"),
            TrackingError::SessionNotTracking => {
                write!(f, "The tracking session is not in the tracking state")
            }
            TrackingError::RecordingFailed(reason) => {
                write!(f, "Failed to record track data: {reason}")
            }
            TrackingError::ProviderUnavailable(reason) => {
                write!(f, "Tracking provider unavailable: {reason}")
            }
            TrackingError::InvalidPayload(reason) => write!(f, "Invalid payload: {reason}"),
        }
    }
}

impl std::error::Error for TrackingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason() {
        let err = TrackingError::PlaybackFailed("missing file".into());
        assert_eq!(err.to_string(), "Playback failed: missing file");
    }
}
