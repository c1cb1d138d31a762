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

//! MPV-backed playback engine.
//!
//! Implements [`PlaybackEngine`] over `libmpv` with video output disabled.
//! Loading replaces any current media in the same engine instance, and the
//! pause property drives the pause/resume distinction.

use mpv::MpvHandlerBuilder;

use crate::error::SessionError;
use crate::player::{PlaybackEngine, PlayerState};

pub struct MpvEngine {
    handler: mpv::MpvHandler,
}

impl MpvEngine {
    /// Builds an audio-only libmpv instance.
    pub fn new() -> Result<Self, SessionError> {
        let mut builder = MpvHandlerBuilder::new()
            .map_err(|err| SessionError::Engine(format!("failed to create MPV builder: {err}")))?;
        builder
            .set_option("vo", "null")
            .map_err(|err| SessionError::Engine(format!("failed to disable video output: {err}")))?;
        let handler = builder
            .build()
            .map_err(|err| SessionError::Engine(format!("failed to build MPV handler: {err}")))?;
        Ok(Self { handler })
    }

    fn engine_err(action: &str, err: mpv::Error) -> SessionError {
        SessionError::Engine(format!("{action}: {err}"))
    }
}

impl PlaybackEngine for MpvEngine {
    fn load_media(&mut self, path: &str) -> Result<(), SessionError> {
        self.handler
            .command(&["loadfile", path, "replace"])
            .map_err(|err| Self::engine_err("loadfile", err))?;
        // Loading starts paused; the session decides when playback begins.
        self.handler
            .set_property("pause", true)
            .map_err(|err| Self::engine_err("pause after load", err))
    }

    fn play(&mut self) -> Result<(), SessionError> {
        self.handler
            .set_property("pause", false)
            .map_err(|err| Self::engine_err("unpause", err))
    }

    fn pause(&mut self) -> Result<(), SessionError> {
        self.handler
            .set_property("pause", true)
            .map_err(|err| Self::engine_err("pause", err))
    }

    fn stop(&mut self) -> Result<(), SessionError> {
        self.handler
            .command(&["stop"])
            .map_err(|err| Self::engine_err("stop", err))
    }

    fn query_state(&mut self) -> PlayerState {
        let idle = self
            .handler
            .get_property::<bool>("idle-active")
            .unwrap_or(true);
        if idle {
            return PlayerState::Stopped;
        }
        let paused = self.handler.get_property::<bool>("pause").unwrap_or(false);
        if paused {
            PlayerState::Paused
        } else {
            PlayerState::Playing
        }
    }
}
