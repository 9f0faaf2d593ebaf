/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{anyhow, bail, Result};

use super::{Board, Piece, PieceKind, Square, MAX_PIECES_PER_SIDE};

/// Maximum number of moves one side can have on a [`Board::validate`]d board.
///
/// At most 15 Queens with 27 moves each, plus 8 King moves. Real games peak at
/// [218](<https://www.chessprogramming.org/Chess_Position#cite_note-4>).
pub const MAX_NUM_MOVES: usize = (MAX_PIECES_PER_SIDE - 1) * 27 + 8;

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// Represents a move made on a chess board.
///
/// Besides the source and destination, a move remembers the piece that moved and the piece it
/// captured (if any), both read from the board when the move was created.
/// That is everything needed to revert it with [`Board::unmake_move`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
}

impl Move {
    /// Creates a [`Move`] of whatever piece stands on `from` to `to`, as seen on `board`.
    ///
    /// Returns `None` if `from` is empty. No legality checks are performed.
    ///
    /// # Example
    /// ```
    /// # use newt::{Board, Move};
    /// let board = Board::default();
    /// let e2e4 = Move::new(&board, "e2".parse().unwrap(), "e4".parse().unwrap()).unwrap();
    /// assert_eq!(e2e4.to_string(), "e2e4");
    /// assert!(Move::new(&board, "e4".parse().unwrap(), "e5".parse().unwrap()).is_none());
    /// ```
    #[inline(always)]
    pub fn new(board: &Board, from: Square, to: Square) -> Option<Self> {
        Some(Self {
            from,
            to,
            piece: board.piece_at(from)?,
            captured: board.piece_at(to),
        })
    }

    /// Parses a move in coordinate notation (`"e2e4"`) against `board`.
    ///
    /// A trailing promotion letter is accepted only if it is `q`, since pawns always promote to Queens.
    pub fn from_uci(board: &Board, uci: &str) -> Result<Self> {
        let uci = uci.trim();
        if !(4..=5).contains(&uci.len()) || !uci.is_ascii() {
            bail!("Move must be in coordinate notation, like \"e2e4\". Got {uci:?}");
        }

        let from = uci[0..2].parse()?;
        let to = uci[2..4].parse()?;
        let mv = Self::new(board, from, to).ok_or_else(|| anyhow!("No piece on {from} to move"))?;

        if let Some(promotion) = uci.get(4..) {
            if !promotion.is_empty() {
                if !mv.is_promotion() {
                    bail!("{uci:?} is not a promotion");
                }
                if PieceKind::from_char(promotion.as_bytes()[0] as char)? != PieceKind::Queen {
                    bail!("Pawns may only promote to a Queen. Got {uci:?}");
                }
            }
        }

        Ok(mv)
    }

    /// The source square of this move.
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// The destination square of this move.
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// The piece being moved.
    #[inline(always)]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// The piece standing on the destination square, if any.
    #[inline(always)]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }

    /// Returns `true` if this move captures a piece.
    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Returns `true` if this is a pawn reaching the far row.
    ///
    /// Promotions always produce a Queen.
    #[inline(always)]
    pub const fn is_promotion(&self) -> bool {
        self.piece.is_pawn() && self.to.row() == self.piece.color().promotion_row()
    }

    /// Converts this move to coordinate notation, such as `"e2e4"`.
    ///
    /// This is also the form used to build opening book keys.
    #[inline(always)]
    pub fn to_uci(&self) -> String {
        self.to_string()
    }

    /// Short notation shown in the move list: piece letter (none for pawns),
    /// `x` for captures, then the destination.
    ///
    /// # Example
    /// ```
    /// # use newt::{Board, Move};
    /// let board = Board::default();
    /// let mv = Move::from_uci(&board, "g1f3").unwrap();
    /// assert_eq!(mv.notation(), "Nf3");
    /// ```
    pub fn notation(&self) -> String {
        let mut notation = String::with_capacity(4);

        if !self.piece.is_pawn() {
            notation.push(self.piece.kind().char().to_ascii_uppercase());
        }
        if self.is_capture() {
            notation.push('x');
        }
        notation += &self.to.to_uci();

        notation
    }
}

impl fmt::Display for Move {
    /// Moves are displayed in coordinate notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({:?}", self.piece)?;
        if let Some(captured) = self.captured {
            write!(f, " takes {captured:?}")?;
        }
        if self.is_promotion() {
            write!(f, ", promotes")?;
        }
        write!(f, ")")
    }
}

impl<T: AsRef<str>> PartialEq<T> for Move {
    /// Compare a move against its coordinate notation.
    #[inline(always)]
    fn eq(&self, other: &T) -> bool {
        self.to_string() == other.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_parsing() {
        let board = Board::from_fen("r3k3/1P6/8/3p4/4P3/8/8/4K3").unwrap();

        let exd5 = Move::from_uci(&board, "e4d5").unwrap();
        assert!(exd5.is_capture());
        assert_eq!(exd5.notation(), "xd5");
        assert_eq!(exd5, "e4d5");

        let promo = Move::from_uci(&board, "b7a8q").unwrap();
        assert!(promo.is_promotion());
        assert!(promo.is_capture());

        assert!(Move::from_uci(&board, "b7b8n").is_err());
        assert!(Move::from_uci(&board, "e4e5q").is_err());
        assert!(Move::from_uci(&board, "a1a2").is_err());
        assert!(Move::from_uci(&board, "e4").is_err());
    }

    #[test]
    fn test_notation() {
        let board = Board::from_fen("4k3/8/8/3q4/4P3/8/8/3QK3").unwrap();
        assert_eq!(Move::from_uci(&board, "d1d5").unwrap().notation(), "Qxd5");
        assert_eq!(Move::from_uci(&board, "e1e2").unwrap().notation(), "Ke2");
        assert_eq!(Move::from_uci(&board, "e4e5").unwrap().notation(), "e5");
    }
}
