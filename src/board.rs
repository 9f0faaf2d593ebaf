/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Legality filtering and check detection.
mod legal;

/// The `8x8` grid of pieces.
mod mailbox;

/// Pseudo-legal move generation for every piece kind.
mod movegen;

/// Moves and move lists.
mod moves;

/// Performance testing of move generation.
mod perft;

/// Colors, piece kinds, and pieces.
mod piece;

/// Squares of the board.
mod square;

pub use legal::*;
pub use mailbox::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use square::*;
