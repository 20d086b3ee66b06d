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

//! Live tap capture.
//!
//! The windowing or touch layer pushes taps from its own thread through a
//! [`TapSender`]; the render thread polls them through [`QueuedTapInput`],
//! one per frame.

use arbench_core::input::{TapEvent, TapInput};

/// Maximum number of taps waiting for the render thread.
pub const TAP_QUEUE_CAPACITY: usize = 16;

/// The producing end of a tap queue. Cheap to clone and `Send`.
#[derive(Debug, Clone)]
pub struct TapSender {
    tx: flume::Sender<TapEvent>,
}

impl TapSender {
    /// Queues a tap. Returns `false` when the tap was dropped because the
    /// queue is full or the consumer is gone.
    pub fn push(&self, tap: TapEvent) -> bool {
        match self.tx.try_send(tap) {
            Ok(()) => true,
            Err(flume::TrySendError::Full(tap)) => {
                log::debug!("Tap queue full, dropping tap at ({}, {}).", tap.x, tap.y);
                false
            }
            Err(flume::TrySendError::Disconnected(_)) => {
                log::debug!("Tap queue closed, dropping tap.");
                false
            }
        }
    }
}

/// The consuming end of a bounded tap queue.
#[derive(Debug)]
pub struct QueuedTapInput {
    rx: flume::Receiver<TapEvent>,
}

impl QueuedTapInput {
    /// Creates a queue holding at most [`TAP_QUEUE_CAPACITY`] taps.
    pub fn new() -> (Self, TapSender) {
        let (tx, rx) = flume::bounded(TAP_QUEUE_CAPACITY);
        (Self { rx }, TapSender { tx })
    }

    /// Number of taps waiting.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl TapInput for QueuedTapInput {
    fn poll_tap(&mut self) -> Option<TapEvent> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taps_are_polled_in_order() {
        let (mut input, sender) = QueuedTapInput::new();
        sender.push(TapEvent::new(1.0, 2.0));
        sender.push(TapEvent::new(3.0, 4.0));
        assert_eq!(input.poll_tap(), Some(TapEvent::new(1.0, 2.0)));
        assert_eq!(input.poll_tap(), Some(TapEvent::new(3.0, 4.0)));
        assert_eq!(input.poll_tap(), None);
    }

    #[test]
    fn overflow_is_dropped() {
        let (mut input, sender) = QueuedTapInput::new();
        for i in 0..TAP_QUEUE_CAPACITY {
            assert!(sender.push(TapEvent::new(i as f32, 0.0)));
        }
        assert!(!sender.push(TapEvent::new(99.0, 0.0)));
        assert_eq!(input.pending(), TAP_QUEUE_CAPACITY);
        assert_eq!(input.poll_tap().map(|t| t.x), Some(0.0));
    }

    #[test]
    fn taps_cross_threads() {
        let (mut input, sender) = QueuedTapInput::new();
        std::thread::spawn(move || {
            sender.push(TapEvent::new(5.0, 6.0));
        })
        .join()
        .unwrap();
        assert_eq!(input.poll_tap(), Some(TapEvent::new(5.0, 6.0)));
    }

    #[test]
    fn push_after_consumer_dropped_fails() {
        let (input, sender) = QueuedTapInput::new();
        drop(input);
        assert!(!sender.push(TapEvent::new(0.0, 0.0)));
    }
}
