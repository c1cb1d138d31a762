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

//! Play queue management.
//!
//! This module owns the ordered, volatile play queue for the lifetime of a
//! session. Entries reference songs by stable key; duplicates are permitted.
//!
//! The queue never re-validates entries against the catalog on its own. It
//! learns about deletions only when told to reconcile — a stale entry for a
//! deleted song is tolerated until the controller next acts on it.

use log::debug;

use crate::error::SessionError;
use crate::model::{QueueEntry, Song};

#[derive(Debug, Default)]
pub struct QueueManager {
    entries: Vec<QueueEntry>,
}

impl QueueManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry referencing the song's stable key.
    pub fn enqueue(&mut self, song: &Song) {
        self.entries.push(QueueEntry::for_song(song));
    }

    /// Removes and returns the entry at the given position, FIFO by
    /// position, failing when out of bounds.
    pub fn dequeue_at(&mut self, position: usize) -> Result<QueueEntry, SessionError> {
        if position >= self.entries.len() {
            return Err(SessionError::IndexOutOfBounds {
                index: position,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(position))
    }

    /// Removes every entry referencing the deleted key, duplicates included.
    /// Returns the number of entries removed.
    pub fn reconcile_deletion(&mut self, key: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.key != key);
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!("reconciled deletion of {key}: {removed} queue entries removed");
        }
        removed
    }

    /// Display titles in queue order.
    pub fn titles(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.title.clone()).collect()
    }

    /// A value snapshot of the queue for consumers; the queue itself stays
    /// owned here.
    pub fn entries(&self) -> Vec<QueueEntry> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
