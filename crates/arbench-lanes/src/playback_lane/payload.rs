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

//! Big-endian wire format of the event track payloads.

use arbench_core::input::TapEvent;
use arbench_core::tracking::EventTrack;
use thiserror::Error;

/// A track payload that cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// The payload does not have the fixed length of its track.
    #[error("{track:?} payload must be {expected} bytes, got {actual}")]
    WrongLength {
        /// Track the payload was read from.
        track: EventTrack,
        /// Required length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },
}

fn check_len(track: EventTrack, payload: &[u8]) -> Result<(), PayloadError> {
    let expected = track.payload_len();
    if payload.len() != expected {
        return Err(PayloadError::WrongLength {
            track,
            expected,
            actual: payload.len(),
        });
    }
    Ok(())
}

/// Decodes a tap payload: `x` then `y`, each a big-endian `f32`.
pub fn decode_tap(payload: &[u8]) -> Result<TapEvent, PayloadError> {
    check_len(EventTrack::Tap, payload)?;
    let x = f32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]]);
    let y = f32::from_be_bytes([payload[4], payload[5], payload[6], payload[7]]);
    Ok(TapEvent::new(x, y))
}

/// Encodes a tap payload.
pub fn encode_tap(tap: &TapEvent) -> Vec<u8> {
    let mut out = Vec::with_capacity(EventTrack::Tap.payload_len());
    out.extend_from_slice(&tap.x.to_be_bytes());
    out.extend_from_slice(&tap.y.to_be_bytes());
    out
}

/// Decodes a phase payload: one big-endian `i32`.
pub fn decode_phase(payload: &[u8]) -> Result<i32, PayloadError> {
    check_len(EventTrack::Phase, payload)?;
    Ok(i32::from_be_bytes([
        payload[0], payload[1], payload[2], payload[3],
    ]))
}

/// Encodes a phase payload.
pub fn encode_phase(phase: i32) -> Vec<u8> {
    phase.to_be_bytes().to_vec()
}
