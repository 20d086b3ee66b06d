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

//! Embedded event tracks and playback/recording status.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed tracks that carry benchmark events inside a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTrack {
    /// Screen taps; payload is two big-endian `f32` (x, y).
    Tap,
    /// Benchmark phase markers; payload is one big-endian `i32`.
    Phase,
}

const TAP_TRACK_ID: Uuid = Uuid::from_u128(0x53069eb5_21ef_4946_b71c_6ac4979216a6);
const PHASE_TRACK_ID: Uuid = Uuid::from_u128(0x53069eb5_21ef_4946_b71c_6ac4979216a7);

impl EventTrack {
    /// The 128-bit identifier under which the track is stored.
    pub const fn uuid(self) -> Uuid {
        match self {
            EventTrack::Tap => TAP_TRACK_ID,
            EventTrack::Phase => PHASE_TRACK_ID,
        }
    }

    /// The MIME type attached to the track in a recording.
    pub const fn mime_type(self) -> &'static str {
        match self {
            EventTrack::Tap => "application/recording-playback-tap",
            EventTrack::Phase => "application/recording-playback-phase",
        }
    }

    /// Resolves a stored track identifier, if it belongs to a known track.
    pub fn from_uuid(id: &Uuid) -> Option<Self> {
        if *id == TAP_TRACK_ID {
            Some(EventTrack::Tap)
        } else if *id == PHASE_TRACK_ID {
            Some(EventTrack::Phase)
        } else {
            None
        }
    }

    /// Exact payload length expected on this track, in bytes.
    pub const fn payload_len(self) -> usize {
        match self {
            EventTrack::Tap => 8,
            EventTrack::Phase => 4,
        }
    }
}

/// One timestamped event read from a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackEvent {
    /// Identifier of the track the event belongs to.
    pub track_id: Uuid,
    /// Timestamp of the frame the event was recorded with.
    pub timestamp_ns: i64,
    /// Raw payload bytes.
    pub payload: Vec<u8>,
}

impl PlaybackEvent {
    /// Creates an event on a known track.
    pub fn new(track: EventTrack, timestamp_ns: i64, payload: Vec<u8>) -> Self {
        Self {
            track_id: track.uuid(),
            timestamp_ns,
            payload,
        }
    }

    /// The known track this event belongs to, if any.
    pub fn track(&self) -> Option<EventTrack> {
        EventTrack::from_uuid(&self.track_id)
    }
}

/// State of dataset playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// No dataset is being played back; input is live.
    #[default]
    Idle,
    /// Playback is in progress.
    Ok,
    /// Playback stopped because the dataset could not be read.
    IoError,
    /// Every frame of the dataset has been delivered.
    Finished,
}

/// State of track recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecordingStatus {
    /// Nothing is being recorded.
    #[default]
    Idle,
    /// A recording is in progress and accepts track data.
    Ok,
}
