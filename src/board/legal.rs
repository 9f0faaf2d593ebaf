/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{pseudo_legal_moves, Board, Color, Move, MoveList, Square};

/// Returns `true` if `color`'s King is attacked by any of its opponent's pieces.
///
/// A board without a King of `color` is reported as being in check.
///
/// # Example
/// ```
/// # use newt::{is_in_check, Board, Color};
/// let board = Board::from_fen("4k3/8/8/8/8/8/8/4K2r").unwrap();
/// assert!(is_in_check(&board, Color::White));
/// assert!(!is_in_check(&board, Color::Black));
/// ```
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.king_square(color) else {
        return true;
    };

    board
        .pieces_of(color.opponent())
        .any(|(square, _)| pseudo_legal_moves(board, square).contains(&king))
}

/// Generates every legal move of the piece on `square`.
///
/// Each pseudo-legal destination is tried on a copy of the board and kept only if the mover's King
/// is not attacked afterwards.
pub fn legal_moves_from(board: &Board, square: Square) -> MoveList {
    let mut moves = MoveList::new();
    let Some(piece) = board.piece_at(square) else {
        return moves;
    };

    for to in pseudo_legal_moves(board, square) {
        let Some(mv) = Move::new(board, square, to) else {
            continue;
        };

        if !is_in_check(&board.with_move_made(mv), piece.color()) {
            moves.push(mv);
        }
    }

    moves
}

/// Generates every legal move for `color`.
///
/// Pieces are visited row by row, then column by column, and each piece's destinations keep the
/// order of [`pseudo_legal_moves`], so the resulting list is reproducible.
/// An empty list means `color` is checkmated or stalemated.
///
/// # Panics
/// If `color` has more than [`MAX_NUM_MOVES`](crate::MAX_NUM_MOVES) moves, which a
/// [`Board::validate`]d board cannot reach.
///
/// # Example
/// ```
/// # use newt::{legal_moves, Board, Color};
/// assert_eq!(legal_moves(&Board::default(), Color::White).len(), 20);
/// ```
pub fn legal_moves(board: &Board, color: Color) -> MoveList {
    let mut moves = MoveList::new();

    for (square, _) in board.pieces_of(color) {
        moves.extend(legal_moves_from(board, square));
    }

    moves
}

/// Returns `true` if `color` has at least one legal move.
///
/// Stops at the first one found.
pub fn has_legal_moves(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|(square, _)| !legal_moves_from(board, square).is_empty())
}

/// `color` has no legal moves and is in check.
#[inline(always)]
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    !has_legal_moves(board, color) && is_in_check(board, color)
}

/// `color` has no legal moves but is not in check.
#[inline(always)]
pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !has_legal_moves(board, color) && !is_in_check(board, color)
}
