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

//! Session error taxonomy.
//!
//! Every fallible operation in the crate surfaces one of these kinds. The
//! catalog client and import resolver propagate errors verbatim; the playback
//! session swallows (and logs) only play-statistics failures.

use thiserror::Error;

/// Errors surfaced by the session controller and its collaborators.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Transport failure, timeout, or a non-2xx response with no more
    /// specific meaning. The detail preserves the remote response body
    /// verbatim when one was received.
    #[error("network error: {0}")]
    Network(String),

    /// Locally-detectable bad input, reported before any remote request is
    /// issued.
    #[error("{0}")]
    Validation(String),

    /// The remote catalog confirmed the key does not exist.
    #[error("song not found: {0}")]
    NotFound(String),

    /// Unsupported or unreadable media file on import.
    #[error("import failed: {0}")]
    Import(String),

    /// A queue position or snapshot index was out of bounds.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The playback engine rejected a command.
    #[error("playback engine error: {0}")]
    Engine(String),
}

impl SessionError {
    /// True when the error means the remote record no longer exists, which
    /// is the controller's cue to reconcile the queue.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SessionError::NotFound(_))
    }
}
