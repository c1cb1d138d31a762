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

//! Remote catalog service client.
//!
//! This module is the fetch/mutate boundary to the remote catalog service
//! that owns the authoritative song records. All operations are synchronous
//! blocking requests against a single endpoint; there is no local caching
//! and no retry — staleness is bounded only by the time between a fetch and
//! its use, and a caller needing resilience retries at its own layer.
//!
//! Remote errors are surfaced verbatim: a non-2xx response body is preserved
//! unchanged as the error detail.

use std::time::Duration;

use log::debug;

use crate::config::AppConfig;
use crate::error::SessionError;
use crate::model::{Snapshot, Song};

/// Interface to the remote catalog service.
///
/// A trait seam so the session controller can be exercised against an
/// in-memory catalog in tests.
pub trait CatalogApi {
    /// Fetches the full catalog as an immutable snapshot. An empty library
    /// yields an empty snapshot, not an error.
    fn fetch_all(&self) -> Result<Snapshot, SessionError>;

    /// Submits a new song record to the catalog.
    fn create(&self, song: &Song) -> Result<(), SessionError>;

    /// Sets the rating for the song with the given stable key.
    fn update_rating(&self, key: &str, rating: i64) -> Result<(), SessionError>;

    /// Increments the remote play count and last-played timestamp. Callers
    /// treat this as best-effort and must not block session progression on
    /// its outcome beyond logging a failure.
    fn record_play(&self, key: &str) -> Result<(), SessionError>;

    /// Deletes the song with the given stable key from the catalog.
    fn delete(&self, key: &str) -> Result<(), SessionError>;
}

/// Catalog client backed by `ureq`.
pub struct HttpCatalogClient {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpCatalogClient {
    /// Creates a client for the catalog service named in the configuration.
    ///
    /// Timeouts are mandatory so a dead endpoint surfaces as a network error
    /// instead of hanging the session indefinitely.
    pub fn new(config: &AppConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(config.connect_timeout_secs))
            .timeout_read(Duration::from_secs(config.request_timeout_secs))
            .timeout_write(Duration::from_secs(config.request_timeout_secs))
            .build();
        Self {
            agent,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Maps a `ureq` failure to a session error, reading and preserving the
    /// remote response body verbatim when one exists. A 404 means the remote
    /// confirmed the key does not exist.
    fn map_error(err: ureq::Error, key: Option<&str>) -> SessionError {
        match err {
            ureq::Error::Status(404, _) => {
                SessionError::NotFound(key.unwrap_or("unknown key").to_string())
            }
            ureq::Error::Status(code, response) => {
                let body = response
                    .into_string()
                    .unwrap_or_else(|_| format!("status {code}"));
                SessionError::Network(body)
            }
            ureq::Error::Transport(transport) => SessionError::Network(transport.to_string()),
        }
    }
}

impl CatalogApi for HttpCatalogClient {
    fn fetch_all(&self) -> Result<Snapshot, SessionError> {
        let url = self.url("/songs/all");
        debug!("GET {url}");
        let songs: Vec<Song> = self
            .agent
            .get(&url)
            .call()
            .map_err(|err| Self::map_error(err, None))?
            .into_json()
            .map_err(|err| SessionError::Network(format!("malformed catalog response: {err}")))?;
        Ok(Snapshot::new(songs))
    }

    fn create(&self, song: &Song) -> Result<(), SessionError> {
        let url = self.url("/songs");
        debug!("POST {url} ({})", song.filename);
        self.agent
            .post(&url)
            .send_json(song)
            .map_err(|err| Self::map_error(err, Some(song.key())))?;
        Ok(())
    }

    fn update_rating(&self, key: &str, rating: i64) -> Result<(), SessionError> {
        let url = self.url(&format!("/songs/rating/{key}"));
        debug!("PUT {url}");
        self.agent
            .put(&url)
            .send_json(serde_json::json!({ "rating": rating }))
            .map_err(|err| Self::map_error(err, Some(key)))?;
        Ok(())
    }

    fn record_play(&self, key: &str) -> Result<(), SessionError> {
        let url = self.url(&format!("/songs/play_count/{key}"));
        debug!("PUT {url}");
        self.agent
            .put(&url)
            .call()
            .map_err(|err| Self::map_error(err, Some(key)))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), SessionError> {
        let url = self.url(&format!("/songs/{key}"));
        debug!("DELETE {url}");
        self.agent
            .delete(&url)
            .call()
            .map_err(|err| Self::map_error(err, Some(key)))?;
        Ok(())
    }
}
