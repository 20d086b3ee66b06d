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

//! Lifecycle wrapper around a tracking provider.

use super::{Frame, SessionConfig, TrackingError, TrackingProvider};

/// Lifecycle of a [`TrackingSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created but never resumed.
    Uninitialized,
    /// Resumed; frames may be pulled.
    Tracking,
    /// Paused by the host.
    Paused,
    /// Closed. Terminal.
    Finished,
}

/// Owns the tracking provider and enforces its lifecycle.
///
/// Frames can only be pulled while the session is [`SessionState::Tracking`].
/// Closing is idempotent and releases the provider exactly once.
pub struct TrackingSession {
    provider: Box<dyn TrackingProvider>,
    state: SessionState,
}

impl TrackingSession {
    /// Wraps a provider in a new, uninitialized session.
    pub fn new(provider: Box<dyn TrackingProvider>) -> Self {
        Self {
            provider,
            state: SessionState::Uninitialized,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Applies a configuration to the provider.
    pub fn configure(&mut self, config: &SessionConfig) -> Result<(), TrackingError> {
        if self.state == SessionState::Finished {
            return Err(TrackingError::ProviderUnavailable(
                "session already closed".to_string(),
            ));
        }
        self.provider.configure(config)
    }

    /// Resumes the provider and enters the tracking state.
    pub fn resume(&mut self) -> Result<(), TrackingError> {
        if self.state == SessionState::Finished {
            return Err(TrackingError::ProviderUnavailable(
                "session already closed".to_string(),
            ));
        }
        self.provider.resume()?;
        self.state = SessionState::Tracking;
        log::debug!("Tracking session resumed.");
        Ok(())
    }

    /// Pauses the provider. No-op unless tracking.
    pub fn pause(&mut self) {
        if self.state == SessionState::Tracking {
            self.provider.pause();
            self.state = SessionState::Paused;
            log::debug!("Tracking session paused.");
        }
    }

    /// Pulls the next frame.
    pub fn update(&mut self) -> Result<Frame, TrackingError> {
        if self.state != SessionState::Tracking {
            return Err(TrackingError::SessionNotTracking);
        }
        self.provider.update()
    }

    /// Closes the provider. Later calls are no-ops.
    pub fn close(&mut self) {
        if self.state != SessionState::Finished {
            self.provider.close();
            self.state = SessionState::Finished;
            log::debug!("Tracking session closed.");
        }
    }

    /// Shared access to the provider.
    pub fn provider(&self) -> &dyn TrackingProvider {
        self.provider.as_ref()
    }

    /// Exclusive access to the provider.
    pub fn provider_mut(&mut self) -> &mut dyn TrackingProvider {
        self.provider.as_mut()
    }
}
