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

//! Playback Lane
//!
//! Reads benchmark events from the tracks embedded in a recording. While a
//! recording is playing back, taps come only from the tap track of the
//! current frame and the live input source is never consulted, so a replay
//! reproduces the recorded interaction exactly.

mod payload;

pub use payload::{decode_phase, decode_tap, encode_phase, encode_tap, PayloadError};

use arbench_core::input::{TapEvent, TapInput};
use arbench_core::tracking::{EventTrack, Frame, PlaybackEvent, PlaybackStatus};

/// Pulls at most one event per track per frame.
#[derive(Debug, Default)]
pub struct TrackPlaybackReader {
    dropped_events: u64,
}

impl TrackPlaybackReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the earliest event of `track` in `frame`.
    ///
    /// Any further events on the same track in this frame are dropped.
    pub fn poll<'f>(&mut self, frame: &'f Frame, track: EventTrack) -> Option<&'f PlaybackEvent> {
        let mut events = frame.updated_track_data(track);
        let first = events.next();
        let extra = events.count() as u64;
        if extra > 0 {
            log::debug!("Dropping {extra} extra {track:?} event(s) in one frame.");
            self.dropped_events += extra;
        }
        first
    }

    /// Returns the tap to handle this frame.
    ///
    /// During playback (`status == Ok`) the tap comes from the tap track only;
    /// otherwise the live source is polled.
    pub fn next_tap(
        &mut self,
        frame: &Frame,
        status: PlaybackStatus,
        live: &mut dyn TapInput,
    ) -> Option<TapEvent> {
        if status != PlaybackStatus::Ok {
            return live.poll_tap();
        }
        let event = self.poll(frame, EventTrack::Tap)?;
        match decode_tap(&event.payload) {
            Ok(tap) => Some(tap),
            Err(e) => {
                log::warn!("Ignoring recorded tap: {e}");
                None
            }
        }
    }

    /// Returns the phase marker recorded with this frame, if any.
    ///
    /// Only meaningful during playback; returns `None` otherwise.
    pub fn next_phase(&mut self, frame: &Frame, status: PlaybackStatus) -> Option<i32> {
        if status != PlaybackStatus::Ok {
            return None;
        }
        let event = self.poll(frame, EventTrack::Phase)?;
        match decode_phase(&event.payload) {
            Ok(phase) => Some(phase),
            Err(e) => {
                log::warn!("Ignoring recorded phase: {e}");
                None
            }
        }
    }

    /// Total number of same-frame events skipped so far.
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbench_core::tracking::{
        Camera, LightEstimate, PointCloud, Pose, TrackingState,
    };
    use std::collections::VecDeque;

    struct LiveTaps {
        taps: VecDeque<TapEvent>,
        polls: u32,
    }

    impl TapInput for LiveTaps {
        fn poll_tap(&mut self) -> Option<TapEvent> {
            self.polls += 1;
            self.taps.pop_front()
        }
    }

    fn live(taps: &[TapEvent]) -> LiveTaps {
        LiveTaps {
            taps: taps.iter().copied().collect(),
            polls: 0,
        }
    }

    fn frame(track_data: Vec<PlaybackEvent>) -> Frame {
        Frame {
            timestamp_ns: 33,
            camera: Camera {
                pose: Pose::IDENTITY,
                display_oriented_pose: Pose::IDENTITY,
                tracking_state: TrackingState::Tracking,
                fov_y_radians: 1.0,
                aspect_ratio: 0.5,
            },
            light_estimate: LightEstimate::not_valid(),
            point_cloud: PointCloud::default(),
            depth_image: None,
            track_data,
            display_geometry_changed: false,
        }
    }

    fn tap_event(x: f32, y: f32) -> PlaybackEvent {
        PlaybackEvent::new(EventTrack::Tap, 33, encode_tap(&TapEvent::new(x, y)))
    }

    #[test]
    fn replay_reads_tap_track_and_ignores_live() {
        let f = frame(vec![tap_event(10.0, 20.0)]);
        let mut source = live(&[TapEvent::new(1.0, 1.0)]);
        let mut reader = TrackPlaybackReader::new();

        let tap = reader.next_tap(&f, PlaybackStatus::Ok, &mut source);
        assert_eq!(tap, Some(TapEvent::new(10.0, 20.0)));
        assert_eq!(source.polls, 0);
    }

    #[test]
    fn replay_without_track_data_has_no_tap() {
        let f = frame(Vec::new());
        let mut source = live(&[TapEvent::new(1.0, 1.0)]);
        let mut reader = TrackPlaybackReader::new();

        assert_eq!(reader.next_tap(&f, PlaybackStatus::Ok, &mut source), None);
        assert_eq!(source.polls, 0);
    }

    #[test]
    fn live_mode_polls_the_live_source() {
        let f = frame(vec![tap_event(10.0, 20.0)]);
        let mut source = live(&[TapEvent::new(1.0, 2.0)]);
        let mut reader = TrackPlaybackReader::new();

        let tap = reader.next_tap(&f, PlaybackStatus::Idle, &mut source);
        assert_eq!(tap, Some(TapEvent::new(1.0, 2.0)));
        assert_eq!(source.polls, 1);
    }

    #[test]
    fn only_first_event_per_track_is_consumed() {
        let f = frame(vec![tap_event(1.0, 1.0), tap_event(2.0, 2.0), tap_event(3.0, 3.0)]);
        let mut reader = TrackPlaybackReader::new();
        let event = reader.poll(&f, EventTrack::Tap).expect("first tap");
        assert_eq!(decode_tap(&event.payload), Ok(TapEvent::new(1.0, 1.0)));
        assert_eq!(reader.dropped_events(), 2);
    }

    #[test]
    fn phase_is_read_only_during_playback() {
        let f = frame(vec![PlaybackEvent::new(EventTrack::Phase, 33, encode_phase(4))]);
        let mut reader = TrackPlaybackReader::new();
        assert_eq!(reader.next_phase(&f, PlaybackStatus::Ok), Some(4));
        assert_eq!(reader.next_phase(&f, PlaybackStatus::Idle), None);
        assert_eq!(reader.next_phase(&f, PlaybackStatus::Finished), None);
    }

    #[test]
    fn malformed_payload_is_ignored() {
        let f = frame(vec![PlaybackEvent::new(EventTrack::Phase, 33, vec![1, 2])]);
        let mut reader = TrackPlaybackReader::new();
        assert_eq!(reader.next_phase(&f, PlaybackStatus::Ok), None);
    }
}
