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

//! # Music Library Session Controller.
//!
//! A client-side session controller for a personal audio library. It drives a
//! single playback engine, maintains an ephemeral ordered play queue, and
//! keeps both in sync with a remote catalog service that owns the
//! authoritative song records.
//!
//! The controller reconciles three independently-changing views of state:
//!
//! * The **remote catalog**, fetched as immutable point-in-time snapshots.
//! * The **playback session**, a local player state machine over an opaque
//!   media engine.
//! * The **play queue**, a volatile ordered list keyed by stable song
//!   identity.
//!
//! ## Architecture
//!
//! The [`session::SessionController`] is the composition root. Every command
//! that addresses a song "by index" fetches a fresh catalog snapshot first
//! and resolves the index against it, then acts by the song's stable key
//! (its filename), so that concurrent mutation by other clients can never
//! redirect a command to the wrong record.
//!
//! The controller processes one command at a time; callers issuing commands
//! concurrently must serialize them before they reach the controller.

pub mod catalog;
pub mod config;
pub mod error;
pub mod import;
pub mod model;
pub mod player;
pub mod queue;
pub mod session;
pub mod util;

pub use error::SessionError;
