/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use thiserror::Error;

/// Reasons a [`Game`](crate::Game) refuses a request.
///
/// A refused request never changes the game.
#[derive(Error, Debug)]
pub enum GameError {
    /// A save file is missing fields or holds values that cannot describe a game.
    #[error("Corrupt save data: {0}")]
    CorruptSaveData(String),

    /// An opening book entry is not a legal move in the position it was looked up for.
    #[error("Opening book suggested {mv}, which is not a legal move")]
    InvalidBookMove { mv: String },

    /// A position cannot be reached in a game, such as one with two Kings of the same color.
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    /// The requested move is not legal for the side to move.
    #[error("Illegal move: {mv}")]
    IllegalMove { mv: String },

    /// The engine plays the side to move.
    #[error("It is not your turn")]
    NotYourTurn,

    /// The game has ended.
    #[error("The game is over")]
    GameOver,

    /// There are no moves left to take back.
    #[error("There is nothing to undo")]
    NothingToUndo,

    /// The engine is choosing a move.
    #[error("The engine is thinking")]
    Busy,

    /// The engine's move was chosen for a position the game is no longer in.
    #[error("The engine's move {mv} no longer fits the game")]
    StaleDecision { mv: String },

    /// The engine stopped without choosing a move.
    #[error("The engine failed to choose a move")]
    EngineFailed,

    /// Reading or writing a save file failed.
    #[error("Save file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A game could not be serialized.
    #[error("Save file serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
