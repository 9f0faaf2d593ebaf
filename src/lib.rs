/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The rules of the game: board, pieces, move generation, and legality.
mod board;

/// Opening lines played before the engine starts searching.
mod book;

/// The engine's move selection, book first and search second.
mod bot;

/// Commands understood by the interactive front end.
mod cli;

/// Per-side countdown clocks.
mod clock;

/// Game settings: mode, difficulty level, and playing style.
mod config;

/// Code related to the engine's functionality, such as user input handling.
mod engine;

/// Errors reported to the user of a game.
mod error;

/// Evaluation of chess positions.
mod eval;

/// A game session: turns, history, undo, and the end of the game.
mod game;

/// Ordering of moves during search.
mod movepicker;

/// Piece-Square tables.
mod psqt;

/// Saving and loading games as JSON.
mod save;

/// Scores of positions, in tenths of a centipawn.
mod score;

/// Main engine logic; all search related code.
mod search;

pub use board::*;
pub use book::*;
pub use bot::*;
pub use cli::*;
pub use clock::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use eval::*;
pub use game::*;
pub use movepicker::*;
pub use psqt::*;
pub use score::*;
pub use search::*;
