/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Result};

use super::{Color, Move, Piece, PieceKind, Square};

/// Most pieces one side may have on a valid board.
pub const MAX_PIECES_PER_SIDE: usize = 16;

/// FEN piece placement of the standard starting position.
pub const FEN_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// An `8x8` mailbox of optional pieces.
///
/// This is pure data. Move generation lives in [`pseudo_legal_moves`](crate::pseudo_legal_moves)
/// and the legality rules in [`legal_moves`](crate::legal_moves).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board([Option<Piece>; Square::COUNT]);

impl Board {
    /// Creates a new, empty [`Board`].
    ///
    /// # Example
    /// ```
    /// # use newt::Board;
    /// let board = Board::new();
    /// assert_eq!(board.to_fen(), "8/8/8/8/8/8/8/8");
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self([None; Square::COUNT])
    }

    /// Creates a [`Board`] in the standard starting position.
    #[inline(always)]
    pub fn startpos() -> Self {
        // Safe unwrap: the constant is a valid placement.
        Self::from_fen(FEN_STARTPOS).unwrap()
    }

    /// Creates a [`Board`] from the piece-placement field of a FEN string.
    ///
    /// Any fields after the first whitespace are ignored.
    ///
    /// # Example
    /// ```
    /// # use newt::{Board, Piece};
    /// let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    /// assert_eq!(board.piece_at("e1".parse().unwrap()), Some(Piece::WHITE_KING));
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let placement = fen.split_ascii_whitespace().next().unwrap_or_default();
        let rows = placement.split('/').collect::<Vec<_>>();
        if rows.len() != Square::SIDE as usize {
            bail!(
                "FEN placement must have 8 rows separated by '/'. Got {} in {placement:?}",
                rows.len()
            );
        }

        let mut board = Self::new();
        for (row, pieces) in rows.into_iter().enumerate() {
            let mut col = 0;
            for c in pieces.chars() {
                if let Some(empty) = c.to_digit(10) {
                    if col as u32 + empty > Square::SIDE as u32 {
                        bail!("FEN row {pieces:?} has more than 8 squares");
                    }
                    col += empty as u8;
                } else {
                    if col >= Square::SIDE {
                        bail!("FEN row {pieces:?} has more than 8 squares");
                    }
                    board.place(Piece::from_fen_char(c)?, Square::new(row as u8, col));
                    col += 1;
                }
            }

            if col != Square::SIDE {
                bail!("FEN row {pieces:?} must describe exactly 8 squares, found {col}");
            }
        }

        board.validate()?;
        Ok(board)
    }

    /// Checks that every side has at most one King and at most [`MAX_PIECES_PER_SIDE`] pieces.
    ///
    /// A side without a King is allowed. It can never get out of check.
    ///
    /// # Example
    /// ```
    /// # use newt::{Board, Piece};
    /// let mut board = Board::startpos();
    /// assert!(board.validate().is_ok());
    /// board.place(Piece::WHITE_KING, "e4".parse().unwrap());
    /// assert!(board.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        for color in Color::all() {
            let kings = self.pieces_of(color).filter(|(_, piece)| piece.is_king()).count();
            if kings > 1 {
                bail!("{} has {kings} Kings on the board", color.name());
            }

            let pieces = self.pieces_of(color).count();
            if pieces > MAX_PIECES_PER_SIDE {
                bail!(
                    "{} has {pieces} pieces on the board, more than {MAX_PIECES_PER_SIDE}",
                    color.name()
                );
            }
        }

        Ok(())
    }

    /// Generates the piece-placement field of a FEN string for this board.
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(72);

        for row in 0..Square::SIDE {
            let mut empty = 0;
            for col in 0..Square::SIDE {
                if let Some(piece) = self.piece_at(Square::new(row, col)) {
                    if empty != 0 {
                        fen.push_str(&empty.to_string());
                        empty = 0;
                    }
                    fen.push(piece.fen_char());
                } else {
                    empty += 1;
                }
            }

            if empty != 0 {
                fen.push_str(&empty.to_string());
            }
            if row != Square::SIDE - 1 {
                fen.push('/');
            }
        }

        fen
    }

    /// Fetches the piece on `square`, if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.0[square.index()]
    }

    /// Returns `true` if there is no piece on `square`.
    #[inline(always)]
    pub const fn is_empty(&self, square: Square) -> bool {
        self.0[square.index()].is_none()
    }

    /// Color of the piece on `square`, if there is one.
    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|piece| piece.color())
    }

    /// Places `piece` on `square`, replacing whatever was there.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.0[square] = Some(piece);
    }

    /// Iterates over every occupied square, in row-major order.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// Iterates over every square occupied by `color`, in row-major order.
    #[inline(always)]
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter(move |(_, piece)| piece.color() == color)
    }

    /// Locates the King of `color`.
    ///
    /// Returns the first one found if, for some reason, there are several.
    #[inline(always)]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        Square::iter().find(|&square| self.piece_at(square) == Some(king))
    }

    /// Sum of the material values of `color`'s pieces, King excluded, in centipawns.
    ///
    /// # Example
    /// ```
    /// # use newt::{Board, Color};
    /// assert_eq!(Board::startpos().material(Color::White), 3900);
    /// ```
    pub fn material(&self, color: Color) -> i32 {
        self.pieces_of(color)
            .filter(|(_, piece)| !piece.is_king())
            .map(|(_, piece)| crate::value_of(piece.kind()))
            .sum()
    }

    /// Applies `mv` to the board. No enforcement of legality.
    ///
    /// Pawns reaching the far row become Queens.
    #[inline(always)]
    pub fn make_move(&mut self, mv: Move) {
        let moved = if mv.is_promotion() {
            mv.piece().promoted(PieceKind::Queen)
        } else {
            mv.piece()
        };

        self.0[mv.from()] = None;
        self.0[mv.to()] = Some(moved);
    }

    /// Reverts `mv`, which must be the last move applied with [`Board::make_move`].
    #[inline(always)]
    pub fn unmake_move(&mut self, mv: Move) {
        self.0[mv.from()] = Some(mv.piece());
        self.0[mv.to()] = mv.captured();
    }

    /// Copies `self` and returns a [`Board`] after having applied the provided [`Move`].
    #[inline(always)]
    pub fn with_move_made(&self, mv: Move) -> Self {
        let mut copied = *self;
        copied.make_move(mv);
        copied
    }
}

impl Default for Board {
    /// The default [`Board`] is the standard starting position.
    #[inline(always)]
    fn default() -> Self {
        Self::startpos()
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<Square> for Board {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Allocate just enough capacity
        let mut board = String::with_capacity(198);

        for row in 0..Square::SIDE {
            board += &format!("{}| ", Square::new(row, 0).rank_char());

            for col in 0..Square::SIDE {
                let occupant = self
                    .piece_at(Square::new(row, col))
                    .map(|piece| piece.fen_char())
                    .unwrap_or('.');

                board += &format!("{occupant} ");
            }

            board += "\n"
        }
        board += " +";
        for _ in 0..Square::SIDE {
            board += "--";
        }
        board += "\n   ";
        for col in 0..Square::SIDE {
            board += &format!("{} ", Square::new(0, col).file_char());
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}
