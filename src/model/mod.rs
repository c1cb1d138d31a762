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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application — catalog
//! [`Song`] records, immutable catalog [`Snapshot`]s, and [`QueueEntry`]
//! references held by the play queue.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// A catalog song record, wire-compatible with the remote catalog service.
///
/// The record is owned by the remote service; the controller only ever holds
/// read-only copies obtained from a [`Snapshot`]. The `filename` is the
/// stable key used to address the song across fetches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    /// Display runtime as `minutes:seconds` text, as stored by the service.
    pub runtime: String,
    /// Directory prefix of the media file, including the trailing separator.
    pub pathname: String,
    /// Media file name; the stable key for this record.
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(default)]
    pub play_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_played: Option<String>,
}

impl Song {
    /// The stable key identifying this song across catalog fetches.
    pub fn key(&self) -> &str {
        &self.filename
    }

    /// Location of the underlying media, per the wire contract a plain
    /// concatenation of `pathname` and `filename`.
    pub fn media_path(&self) -> String {
        format!("{}{}", self.pathname, self.filename)
    }
}

/// An immutable, ordered point-in-time copy of the catalog.
///
/// Index-based commands must resolve their index against a snapshot fetched
/// at command time; indices from one snapshot are meaningless against any
/// other because external mutation rotates them.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    songs: Vec<Song>,
}

impl Snapshot {
    pub fn new(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Resolves an index into the snapshot, failing with an index error
    /// (never panicking) when out of bounds.
    pub fn song_at(&self, index: usize) -> Result<&Song, SessionError> {
        self.songs.get(index).ok_or(SessionError::IndexOutOfBounds {
            index,
            len: self.songs.len(),
        })
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn titles(&self) -> Vec<String> {
        self.songs.iter().map(|song| song.title.clone()).collect()
    }
}

/// A queue reference to a song by stable key, with its display title.
///
/// Entries reference songs by key, never by index, since catalog indices
/// rotate as other clients mutate the library. The referenced key existed in
/// some snapshot at enqueue time but is not guaranteed to still exist.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueEntry {
    pub key: String,
    pub title: String,
}

impl QueueEntry {
    pub fn for_song(song: &Song) -> Self {
        Self {
            key: song.filename.clone(),
            title: song.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(filename: &str, title: &str) -> Song {
        Song {
            title: title.to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            genre: "Genre".to_string(),
            runtime: "3:25".to_string(),
            pathname: "/music/".to_string(),
            filename: filename.to_string(),
            rating: None,
            play_count: 0,
            last_played: None,
        }
    }

    #[test]
    fn media_path_concatenates_pathname_and_filename() {
        assert_eq!(song("a.mp3", "A").media_path(), "/music/a.mp3");
    }

    #[test]
    fn snapshot_resolves_valid_index() {
        let snapshot = Snapshot::new(vec![song("a.mp3", "A"), song("b.mp3", "B")]);
        assert_eq!(snapshot.song_at(1).unwrap().title, "B");
    }

    #[test]
    fn snapshot_rejects_out_of_bounds_index() {
        let snapshot = Snapshot::new(vec![]);
        assert!(matches!(
            snapshot.song_at(0),
            Err(SessionError::IndexOutOfBounds { index: 0, len: 0 })
        ));
    }

    #[test]
    fn song_deserializes_without_optional_fields() {
        let json = r#"{
            "title": "X",
            "artist": "Y",
            "album": "Z",
            "genre": "Rock",
            "runtime": "2:5",
            "pathname": "/music/",
            "filename": "x.mp3"
        }"#;
        let song: Song = serde_json::from_str(json).unwrap();
        assert_eq!(song.rating, None);
        assert_eq!(song.play_count, 0);
        assert_eq!(song.last_played, None);
    }
}
