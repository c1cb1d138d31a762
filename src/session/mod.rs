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

//! Session controller: the composition root.
//!
//! The controller binds the catalog client, the playback session, and the
//! queue manager behind one command surface. Every index-based command
//! fetches a fresh catalog snapshot, resolves the index against it, and then
//! acts by the song's stable key — an index from an earlier snapshot is never
//! re-derived against a fresher one, since out-of-band mutation by other
//! clients rotates index meaning between commands.
//!
//! The controller processes one command to completion at a time (including
//! its network round-trip); callers issuing overlapping commands must
//! serialize them before they reach the controller.

use std::path::{Path, PathBuf};

use log::info;

use crate::catalog::CatalogApi;
use crate::error::SessionError;
use crate::import;
use crate::model::{QueueEntry, Snapshot, Song};
use crate::player::{PlaybackSession, PlayerState};
use crate::queue::QueueManager;

pub struct SessionController<C: CatalogApi> {
    catalog: C,
    playback: PlaybackSession,
    queue: QueueManager,
}

impl<C: CatalogApi> SessionController<C> {
    pub fn new(catalog: C, playback: PlaybackSession) -> Self {
        Self {
            catalog,
            playback,
            queue: QueueManager::new(),
        }
    }

    /// Fetches a fresh catalog snapshot.
    pub fn snapshot(&self) -> Result<Snapshot, SessionError> {
        self.catalog.fetch_all()
    }

    /// Song titles in catalog order, from a fresh snapshot.
    pub fn list_titles(&self) -> Result<Vec<String>, SessionError> {
        Ok(self.catalog.fetch_all()?.titles())
    }

    /// Plays the song at `index` in a freshly fetched snapshot.
    pub fn play_index(&mut self, index: usize) -> Result<(), SessionError> {
        let snapshot = self.catalog.fetch_all()?;
        let song = snapshot.song_at(index)?.clone();
        self.playback.play(song, &self.catalog)
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        self.playback.pause()
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        self.playback.resume()
    }

    pub fn stop(&mut self) -> Result<(), SessionError> {
        self.playback.stop()
    }

    /// Appends the song at `index` in a fresh snapshot to the play queue.
    pub fn enqueue_index(&mut self, index: usize) -> Result<(), SessionError> {
        let snapshot = self.catalog.fetch_all()?;
        let song = snapshot.song_at(index)?;
        self.queue.enqueue(song);
        Ok(())
    }

    /// Removes and returns the queue entry at `position`.
    pub fn dequeue_at(&mut self, position: usize) -> Result<QueueEntry, SessionError> {
        self.queue.dequeue_at(position)
    }

    pub fn queue_titles(&self) -> Vec<String> {
        self.queue.titles()
    }

    /// Plays the queued entry at `position`, looking its key up in a fresh
    /// snapshot. When the song has been deleted out-of-band the stale entry
    /// is reconciled away and the lookup failure is surfaced.
    pub fn play_queued(&mut self, position: usize) -> Result<(), SessionError> {
        let entries = self.queue.entries();
        let entry = entries
            .get(position)
            .ok_or(SessionError::IndexOutOfBounds {
                index: position,
                len: entries.len(),
            })?;

        let snapshot = self.catalog.fetch_all()?;
        let Some(song) = snapshot
            .songs()
            .iter()
            .find(|song| song.key() == entry.key)
            .cloned()
        else {
            self.queue.reconcile_deletion(&entry.key);
            return Err(SessionError::NotFound(entry.key.clone()));
        };

        self.queue.dequeue_at(position)?;
        self.playback.play(song, &self.catalog)
    }

    /// Rates the song at `index` in a fresh snapshot.
    ///
    /// The rating input is validated locally first: a non-integer never
    /// produces a remote request of any kind.
    pub fn rate_index(&mut self, index: usize, rating: &str) -> Result<(), SessionError> {
        let rating: i64 = rating
            .trim()
            .parse()
            .map_err(|_| SessionError::Validation("Rating must be a number".to_string()))?;

        let snapshot = self.catalog.fetch_all()?;
        let song = snapshot.song_at(index)?;
        self.catalog.update_rating(song.key(), rating)
    }

    /// Deletes the song at `index` in a fresh snapshot from the catalog.
    ///
    /// On remote success every queue entry referencing the song is removed
    /// before this returns, so the caller never observes a state where the
    /// catalog has deleted the song but the queue still lists it.
    pub fn delete_index(&mut self, index: usize) -> Result<Song, SessionError> {
        let snapshot = self.catalog.fetch_all()?;
        let song = snapshot.song_at(index)?.clone();

        self.catalog.delete(song.key())?;
        self.queue.reconcile_deletion(song.key());

        info!("deleted {} from library", song.key());
        Ok(song)
    }

    /// Imports a local media file and submits it to the catalog.
    pub fn import_file(&mut self, path: &Path) -> Result<Song, SessionError> {
        let song = import::resolve(path)?;
        self.catalog.create(&song)?;
        info!("added {} to library", song.key());
        Ok(song)
    }

    /// Imports every recognized audio file under a directory, submitting
    /// each resolved record. Per-file failures are reported, not fatal.
    pub fn import_dir(&mut self, root: &Path) -> Vec<(PathBuf, Result<Song, SessionError>)> {
        import::resolve_dir(root)
            .into_iter()
            .map(|(path, resolved)| {
                let outcome = resolved.and_then(|song| {
                    self.catalog.create(&song)?;
                    Ok(song)
                });
                (path, outcome)
            })
            .collect()
    }

    pub fn player_state(&self) -> PlayerState {
        self.playback.state()
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.playback.current_song()
    }

    /// Tears the session down, resetting the player to idle.
    pub fn teardown(&mut self) {
        self.playback.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::player::PlaybackEngine;

    /// In-memory catalog double recording every request it serves.
    struct FakeCatalog {
        songs: RefCell<Vec<Song>>,
        requests: RefCell<Vec<String>>,
        fail_delete: Cell<bool>,
    }

    impl FakeCatalog {
        fn with_songs(songs: Vec<Song>) -> Self {
            Self {
                songs: RefCell::new(songs),
                requests: RefCell::new(vec![]),
                fail_delete: Cell::new(false),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }
    }

    impl CatalogApi for FakeCatalog {
        fn fetch_all(&self) -> Result<Snapshot, SessionError> {
            self.requests.borrow_mut().push("fetch_all".to_string());
            Ok(Snapshot::new(self.songs.borrow().clone()))
        }

        fn create(&self, song: &Song) -> Result<(), SessionError> {
            self.requests
                .borrow_mut()
                .push(format!("create {}", song.filename));
            self.songs.borrow_mut().push(song.clone());
            Ok(())
        }

        fn update_rating(&self, key: &str, rating: i64) -> Result<(), SessionError> {
            self.requests
                .borrow_mut()
                .push(format!("rate {key} {rating}"));
            if self.songs.borrow().iter().any(|song| song.filename == key) {
                Ok(())
            } else {
                Err(SessionError::NotFound(key.to_string()))
            }
        }

        fn record_play(&self, key: &str) -> Result<(), SessionError> {
            self.requests.borrow_mut().push(format!("play {key}"));
            Ok(())
        }

        fn delete(&self, key: &str) -> Result<(), SessionError> {
            self.requests.borrow_mut().push(format!("delete {key}"));
            if self.fail_delete.get() {
                return Err(SessionError::Network("catalog offline".to_string()));
            }
            let mut songs = self.songs.borrow_mut();
            let before = songs.len();
            songs.retain(|song| song.filename != key);
            if songs.len() < before {
                Ok(())
            } else {
                Err(SessionError::NotFound(key.to_string()))
            }
        }
    }

    /// Minimal engine double; state transitions only.
    struct StubEngine {
        state: PlayerState,
    }

    impl PlaybackEngine for StubEngine {
        fn load_media(&mut self, _path: &str) -> Result<(), SessionError> {
            Ok(())
        }

        fn play(&mut self) -> Result<(), SessionError> {
            self.state = PlayerState::Playing;
            Ok(())
        }

        fn pause(&mut self) -> Result<(), SessionError> {
            self.state = PlayerState::Paused;
            Ok(())
        }

        fn stop(&mut self) -> Result<(), SessionError> {
            self.state = PlayerState::Stopped;
            Ok(())
        }

        fn query_state(&mut self) -> PlayerState {
            self.state
        }
    }

    fn song(filename: &str, title: &str) -> Song {
        Song {
            title: title.to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            genre: String::new(),
            runtime: "2:5".to_string(),
            pathname: "/music/".to_string(),
            filename: filename.to_string(),
            rating: None,
            play_count: 0,
            last_played: None,
        }
    }

    fn controller(songs: Vec<Song>) -> SessionController<FakeCatalog> {
        let playback = PlaybackSession::new(Box::new(StubEngine {
            state: PlayerState::Idle,
        }));
        SessionController::new(FakeCatalog::with_songs(songs), playback)
    }

    #[test]
    fn play_index_resolves_against_fresh_snapshot() {
        let mut controller = controller(vec![song("a.mp3", "A"), song("b.mp3", "B")]);

        controller.play_index(1).unwrap();

        assert_eq!(controller.player_state(), PlayerState::Playing);
        assert_eq!(controller.current_song().unwrap().title, "B");
    }

    #[test]
    fn play_index_on_empty_library_is_an_index_error() {
        let mut controller = controller(vec![]);

        assert!(matches!(
            controller.play_index(0),
            Err(SessionError::IndexOutOfBounds { index: 0, len: 0 })
        ));
        assert_eq!(controller.player_state(), PlayerState::Idle);
    }

    #[test]
    fn enqueue_then_dequeue_is_fifo() {
        let mut controller = controller(vec![song("a.mp3", "A"), song("b.mp3", "B")]);

        controller.enqueue_index(0).unwrap();
        controller.enqueue_index(1).unwrap();

        let first = controller.dequeue_at(0).unwrap();
        assert_eq!(first.title, "A");
        assert_eq!(controller.queue_titles(), ["B"]);
    }

    #[test]
    fn non_numeric_rating_issues_no_remote_request() {
        let mut controller = controller(vec![song("a.mp3", "A")]);

        let err = controller.rate_index(0, "abc").unwrap_err();

        assert!(matches!(err, SessionError::Validation(msg) if msg == "Rating must be a number"));
        assert!(controller.catalog.requests().is_empty());
    }

    #[test]
    fn valid_rating_is_sent_by_stable_key() {
        let mut controller = controller(vec![song("a.mp3", "A")]);

        controller.rate_index(0, "4").unwrap();

        assert_eq!(controller.catalog.requests(), ["fetch_all", "rate a.mp3 4"]);
    }

    #[test]
    fn delete_reconciles_queue_before_returning() {
        let mut controller = controller(vec![song("a.mp3", "A"), song("b.mp3", "B")]);
        controller.enqueue_index(0).unwrap();
        controller.enqueue_index(1).unwrap();
        controller.enqueue_index(0).unwrap();
        assert_eq!(controller.queue_titles(), ["A", "B", "A"]);

        let deleted = controller.delete_index(0).unwrap();

        assert_eq!(deleted.filename, "a.mp3");
        assert_eq!(controller.queue_titles(), ["B"]);
    }

    #[test]
    fn failed_delete_leaves_queue_untouched() {
        let mut controller = controller(vec![song("a.mp3", "A")]);
        controller.enqueue_index(0).unwrap();
        controller.catalog.fail_delete.set(true);

        let err = controller.delete_index(0).unwrap_err();

        assert!(matches!(err, SessionError::Network(_)));
        assert_eq!(controller.queue_titles(), ["A"]);
    }

    #[test]
    fn play_queued_reconciles_stale_entry() {
        let mut controller = controller(vec![song("a.mp3", "A")]);
        controller.enqueue_index(0).unwrap();

        // Another client deletes the song after it was enqueued.
        controller.catalog.songs.borrow_mut().clear();

        let err = controller.play_queued(0).unwrap_err();

        assert!(err.is_not_found());
        assert!(controller.queue_titles().is_empty());
        assert_eq!(controller.player_state(), PlayerState::Idle);
    }

    #[test]
    fn play_queued_plays_and_removes_the_entry() {
        let mut controller = controller(vec![song("a.mp3", "A"), song("b.mp3", "B")]);
        controller.enqueue_index(1).unwrap();

        controller.play_queued(0).unwrap();

        assert_eq!(controller.current_song().unwrap().title, "B");
        assert!(controller.queue_titles().is_empty());
    }

    #[test]
    fn play_records_play_count_through_catalog() {
        let mut controller = controller(vec![song("a.mp3", "A")]);

        controller.play_index(0).unwrap();

        assert_eq!(controller.catalog.requests(), ["fetch_all", "play a.mp3"]);
    }

    #[test]
    fn list_titles_reflects_catalog_order() {
        let controller = controller(vec![song("b.mp3", "B"), song("a.mp3", "A")]);
        assert_eq!(controller.list_titles().unwrap(), ["B", "A"]);
    }
}
