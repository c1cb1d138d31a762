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

//! Song import resolution.
//!
//! This module turns a local media file plus its embedded tags into a
//! catalog-ready [`Song`] record, using `Lofty` for metadata extraction.
//!
//! A resolved record has no rating and a zero play count; it is not yet
//! persisted — the caller submits it through the catalog client.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use lofty::prelude::*;
use lofty::probe::Probe;
use log::debug;
use walkdir::WalkDir;

use crate::error::SessionError;
use crate::model::Song;
use crate::util::format::format_runtime;

/// Audio container extensions accepted for import.
const SUPPORTED_EXTENSIONS: [&str; 6] = ["mp3", "flac", "ogg", "wav", "m4a", "aac"];

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.iter().any(|s| *s == ext)
        })
        .unwrap_or(false)
}

/// Resolves a local media file into a catalog-ready [`Song`].
///
/// Files whose extension is not a recognized audio container are rejected
/// with an import error. Missing tag fields are not errors: they resolve to
/// the library's fallback markers instead.
pub fn resolve(path: &Path) -> Result<Song, SessionError> {
    if !is_supported(path) {
        return Err(SessionError::Import("unsupported file type".to_string()));
    }

    let tagged_file = Probe::open(path)
        .and_then(|probe| probe.read())
        .map_err(|err| SessionError::Import(format!("{}: {err}", path.display())))?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| SessionError::Import("path has no file name".to_string()))?;

    let pathname = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            format!("{}{}", parent.display(), MAIN_SEPARATOR)
        }
        _ => String::new(),
    };

    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag());

    let title = tag
        .and_then(|t| t.title().map(|v| v.to_string()))
        .unwrap_or_else(|| filename.clone());
    let artist = tag
        .and_then(|t| t.artist().map(|v| v.to_string()))
        .unwrap_or_else(|| "Unknown Artist".to_string());
    let album = tag
        .and_then(|t| t.album().map(|v| v.to_string()))
        .unwrap_or_else(|| "Unknown Album".to_string());
    let genre = tag
        .and_then(|t| t.genre().map(|v| v.to_string()))
        .unwrap_or_default();

    let runtime = format_runtime(tagged_file.properties().duration().as_secs());

    debug!("resolved {} ({runtime})", path.display());

    Ok(Song {
        title,
        artist,
        album,
        genre,
        runtime,
        pathname,
        filename,
        rating: None,
        play_count: 0,
        last_played: None,
    })
}

/// Resolves every recognized audio file under a directory.
///
/// Non-audio files are skipped silently; audio files that fail to resolve
/// are reported per file rather than aborting the traversal, so one corrupt
/// download does not sink a whole library import.
pub fn resolve_dir(root: &Path) -> Vec<(PathBuf, Result<Song, SessionError>)> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file() && is_supported(entry.path()))
        .map(|entry| {
            let path = entry.path().to_path_buf();
            let resolved = resolve(&path);
            (path, resolved)
        })
        .collect()
}
