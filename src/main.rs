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

//! # Music Library Session Shell.
//!
//! A line-oriented front end over the session controller. Each input line is
//! one command, processed to completion before the next is read, which
//! naturally serializes commands the way the controller requires.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tunelink::catalog::HttpCatalogClient;
use tunelink::config;
use tunelink::player::mpv::MpvEngine;
use tunelink::player::PlaybackSession;
use tunelink::session::SessionController;

const HELP: &str = "\
commands:
  list                 show catalog titles
  play <n>             play catalog entry n
  pause | resume | stop
  queue                show the play queue
  enqueue <n>          append catalog entry n to the queue
  dequeue <n>          remove queue entry n
  play-queue <n>       play queue entry n
  rate <n> <rating>    rate catalog entry n
  delete <n>           delete catalog entry n from the library
  add <file>           import a media file into the library
  add-dir <dir>        import every audio file under a directory
  quit";

fn main() -> Result<()> {
    let mut clog = colog::default_builder();
    clog.filter(None, log::LevelFilter::Info);
    clog.init();

    let cfg = config::load_config();
    log::info!("catalog service: {}", cfg.server_url);

    let catalog = HttpCatalogClient::new(&cfg);
    let engine = MpvEngine::new().context("Failed to initialise playback engine")?;
    let playback = PlaybackSession::new(Box::new(engine));
    let mut controller = SessionController::new(catalog, playback);

    let stdin = io::stdin();
    print!("> ");
    io::stdout().flush().ok();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command input")?;
        if !dispatch(&mut controller, line.trim()) {
            break;
        }
        print!("> ");
        io::stdout().flush().ok();
    }

    controller.teardown();
    Ok(())
}

/// Executes one command line; returns false when the session should end.
fn dispatch(controller: &mut SessionController<HttpCatalogClient>, line: &str) -> bool {
    let mut parts = line.splitn(3, ' ');
    let command = parts.next().unwrap_or_default();
    let arg = parts.next();
    let rest = parts.next();

    let outcome = match (command, arg, rest) {
        ("", _, _) => Ok(()),
        ("help", _, _) => {
            println!("{HELP}");
            Ok(())
        }
        ("quit", _, _) | ("exit", _, _) => return false,
        ("list", _, _) => controller.list_titles().map(|titles| {
            for (index, title) in titles.iter().enumerate() {
                println!("{index:3}  {title}");
            }
        }),
        ("queue", _, _) => {
            for (index, title) in controller.queue_titles().iter().enumerate() {
                println!("{index:3}  {title}");
            }
            Ok(())
        }
        ("pause", _, _) => controller.pause(),
        ("resume", _, _) => controller.resume(),
        ("stop", _, _) => controller.stop(),
        ("play", Some(n), _) => parse_index(n).and_then(|n| {
            controller.play_index(n)?;
            if let Some(song) = controller.current_song() {
                println!("playing: {} - {}", song.artist, song.title);
            }
            Ok(())
        }),
        ("enqueue", Some(n), _) => parse_index(n).and_then(|n| controller.enqueue_index(n)),
        ("dequeue", Some(n), _) => parse_index(n).and_then(|n| {
            let entry = controller.dequeue_at(n)?;
            println!("removed: {}", entry.title);
            Ok(())
        }),
        ("play-queue", Some(n), _) => parse_index(n).and_then(|n| controller.play_queued(n)),
        ("rate", Some(n), Some(rating)) => {
            parse_index(n).and_then(|n| controller.rate_index(n, rating))
        }
        ("delete", Some(n), _) => parse_index(n).and_then(|n| {
            let song = controller.delete_index(n)?;
            println!("{} has been deleted from library", song.title);
            Ok(())
        }),
        ("add", Some(path), _) => controller.import_file(Path::new(path)).map(|song| {
            println!("{} has been added to library", song.title);
        }),
        ("add-dir", Some(dir), _) => {
            for (path, outcome) in controller.import_dir(Path::new(dir)) {
                match outcome {
                    Ok(song) => println!("added {}", song.title),
                    Err(err) => println!("skipped {}: {err}", path.display()),
                }
            }
            Ok(())
        }
        _ => {
            println!("unrecognised command, try 'help'");
            Ok(())
        }
    };

    if let Err(err) = outcome {
        println!("error: {err}");
    }
    true
}

fn parse_index(input: &str) -> Result<usize, tunelink::SessionError> {
    input
        .trim()
        .parse()
        .map_err(|_| tunelink::SessionError::Validation("index must be a number".to_string()))
}
