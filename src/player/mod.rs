// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Playback session and engine control.
//!
//! This module owns the player state machine and translates session commands
//! into calls on an opaque [`PlaybackEngine`]. The engine is a singleton for
//! the session's lifetime; the session guarantees the prior media resource is
//! stopped before a new one is loaded, so no two decodes ever overlap.
//!
//! Every command is valid from every state: commands that do not apply to the
//! current state are no-ops rather than errors, so a caller double-issuing a
//! control can never crash the session.

#[cfg(feature = "mpv")]
pub mod mpv;

use log::warn;

use crate::catalog::CatalogApi;
use crate::error::SessionError;
use crate::model::Song;

/// The observable playback state of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Playing,
    Paused,
    Stopped,
}

/// Opaque media engine boundary.
///
/// The session never inspects engine-internal buffering or decoding details;
/// it only loads media, starts, pauses, stops, and queries coarse state.
/// `play` starts the loaded media, or resumes it when paused.
pub trait PlaybackEngine {
    fn load_media(&mut self, path: &str) -> Result<(), SessionError>;
    fn play(&mut self) -> Result<(), SessionError>;
    fn pause(&mut self) -> Result<(), SessionError>;
    fn stop(&mut self) -> Result<(), SessionError>;
    fn query_state(&mut self) -> PlayerState;
}

/// The player state machine bound to one engine instance.
pub struct PlaybackSession {
    engine: Box<dyn PlaybackEngine>,
    state: PlayerState,
    current_song: Option<Song>,
    current_media_path: Option<String>,
}

impl PlaybackSession {
    pub fn new(engine: Box<dyn PlaybackEngine>) -> Self {
        Self {
            engine,
            state: PlayerState::Idle,
            current_song: None,
            current_media_path: None,
        }
    }

    /// Switches playback to `song`, from any state.
    ///
    /// Any current engine playback is stopped first so the prior decode
    /// handle is released before the new media loads. The remote play count
    /// is recorded best-effort: a statistics failure is logged and swallowed,
    /// never allowed to block playback.
    pub fn play(&mut self, song: Song, catalog: &dyn CatalogApi) -> Result<(), SessionError> {
        if self.engine.query_state() == PlayerState::Playing {
            self.engine.stop()?;
        }

        let media_path = song.media_path();
        self.engine.load_media(&media_path)?;

        if let Err(err) = catalog.record_play(song.key()) {
            warn!("failed to record play for {}: {err}", song.key());
        }

        self.engine.play()?;

        self.state = PlayerState::Playing;
        self.current_media_path = Some(media_path);
        self.current_song = Some(song);
        Ok(())
    }

    /// Pauses playback; a no-op unless currently playing.
    pub fn pause(&mut self) -> Result<(), SessionError> {
        if self.state == PlayerState::Playing {
            self.engine.pause()?;
            self.state = PlayerState::Paused;
        }
        Ok(())
    }

    /// Resumes playback; a no-op unless currently paused.
    pub fn resume(&mut self) -> Result<(), SessionError> {
        if self.state == PlayerState::Paused {
            self.engine.play()?;
            self.state = PlayerState::Playing;
        }
        Ok(())
    }

    /// Stops playback, from any state.
    pub fn stop(&mut self) -> Result<(), SessionError> {
        self.engine.stop()?;
        self.state = PlayerState::Stopped;
        Ok(())
    }

    /// Resets the session to idle, releasing any engine activity. Engine
    /// failures during teardown are logged, not propagated.
    pub fn teardown(&mut self) {
        if let Err(err) = self.engine.stop() {
            warn!("engine stop during teardown failed: {err}");
        }
        self.state = PlayerState::Idle;
        self.current_song = None;
        self.current_media_path = None;
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.current_song.as_ref()
    }

    pub fn current_media_path(&self) -> Option<&str> {
        self.current_media_path.as_deref()
    }
}
