/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arrayvec::ArrayVec;

use super::{Board, Color, PieceKind, Square};

/// Most destinations a single piece can ever have (a Queen in the middle of an empty board).
pub const MAX_DESTINATIONS: usize = 27;

/// Destinations reachable by a single piece.
pub type Destinations = ArrayVec<Square, MAX_DESTINATIONS>;

/// `(row, col)` deltas of a Knight's jumps.
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// `(row, col)` deltas along files and ranks.
const ROOK_DELTAS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// `(row, col)` deltas along diagonals.
const BISHOP_DELTAS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// `(row, col)` deltas in every direction; a King's steps and a Queen's rays.
const QUEEN_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Generates the pseudo-legal destinations of the piece on `square`.
///
/// Pseudo-legal means the piece moves according to its movement pattern and the current occupancy,
/// with no regard for whether its own King is left in check.
/// Destinations never hold a friendly piece and never leave the board.
/// An empty `square` has no destinations.
///
/// # Example
/// ```
/// # use newt::{pseudo_legal_moves, Board};
/// let board = Board::default();
/// let knight = pseudo_legal_moves(&board, "g1".parse().unwrap());
/// assert_eq!(knight.len(), 2);
/// ```
pub fn pseudo_legal_moves(board: &Board, square: Square) -> Destinations {
    let mut destinations = Destinations::new();
    let Some(piece) = board.piece_at(square) else {
        return destinations;
    };
    let color = piece.color();

    match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, square, color, &mut destinations),
        PieceKind::Knight => step_moves(board, square, color, &KNIGHT_DELTAS, &mut destinations),
        PieceKind::King => step_moves(board, square, color, &QUEEN_DELTAS, &mut destinations),
        PieceKind::Bishop => ray_moves(board, square, color, &BISHOP_DELTAS, &mut destinations),
        PieceKind::Rook => ray_moves(board, square, color, &ROOK_DELTAS, &mut destinations),
        PieceKind::Queen => ray_moves(board, square, color, &QUEEN_DELTAS, &mut destinations),
    }

    destinations
}

/// Single push, double push from the starting row through two empty squares, and diagonal captures.
///
/// No en passant.
fn pawn_moves(board: &Board, square: Square, color: Color, destinations: &mut Destinations) {
    let forward = color.forward();

    if let Some(single) = square.offset(forward, 0).filter(|&to| board.is_empty(to)) {
        destinations.push(single);

        if square.row() == color.pawn_row() {
            if let Some(double) = square.offset(2 * forward, 0).filter(|&to| board.is_empty(to)) {
                destinations.push(double);
            }
        }
    }

    for dcol in [-1, 1] {
        if let Some(to) = square.offset(forward, dcol) {
            if board.color_at(to) == Some(color.opponent()) {
                destinations.push(to);
            }
        }
    }
}

/// Knight and King moves: each delta is taken once, if on the board and not onto a friendly piece.
///
/// No castling.
fn step_moves(
    board: &Board,
    square: Square,
    color: Color,
    deltas: &[(i8, i8)],
    destinations: &mut Destinations,
) {
    for &(drow, dcol) in deltas {
        if let Some(to) = square.offset(drow, dcol) {
            if board.color_at(to) != Some(color) {
                destinations.push(to);
            }
        }
    }
}

/// Sliding moves: walk each ray until the edge of the board.
///
/// A ray stops before a friendly piece and on an enemy piece.
fn ray_moves(
    board: &Board,
    square: Square,
    color: Color,
    deltas: &[(i8, i8)],
    destinations: &mut Destinations,
) {
    for &(drow, dcol) in deltas {
        let mut current = square;
        while let Some(to) = current.offset(drow, dcol) {
            match board.color_at(to) {
                None => destinations.push(to),
                Some(occupant) => {
                    if occupant != color {
                        destinations.push(to);
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

/// Counts how many pieces of each side could pseudo-legally move onto every square.
///
/// Each entry is (White's count) minus (Black's count), indexed `[row][col]`.
/// Positive squares are controlled by White, negative ones by Black.
pub fn attack_map(board: &Board) -> [[i32; 8]; 8] {
    let mut map = [[0; 8]; 8];

    for (square, piece) in board.iter() {
        let weight = piece.color().negation_multiplier();
        for to in pseudo_legal_moves(board, square) {
            map[to.row() as usize][to.col() as usize] += weight;
        }
    }

    map
}
