/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{value_of, Color, Piece, PieceKind, Score, Square};

/// Positional table shared by pawns and knights, written from White's side of the board:
/// the first row is rank 8 (row 0 of the board), the last row is rank 1.
///
/// Entries are in tenths of a centipawn, so a `50` is worth half a centipawn.
#[rustfmt::skip]
const PAWN_TABLE: [i32; Square::COUNT] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

/// Pieces without a positional table.
const FLAT_TABLE: [i32; Square::COUNT] = [0; Square::COUNT];

const PAWN: Psqt = Psqt::new(PieceKind::Pawn, PAWN_TABLE);
const KNIGHT: Psqt = Psqt::new(PieceKind::Knight, PAWN_TABLE);
const BISHOP: Psqt = Psqt::new(PieceKind::Bishop, FLAT_TABLE);
const ROOK: Psqt = Psqt::new(PieceKind::Rook, FLAT_TABLE);
const QUEEN: Psqt = Psqt::new(PieceKind::Queen, FLAT_TABLE);
const KING: Psqt = Psqt::new(PieceKind::King, FLAT_TABLE);

/// A Piece-Square Table: the material value of a piece plus its positional bonus on each square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Psqt([i32; Square::COUNT]);

impl Psqt {
    /// Value of `piece` standing on `square`, always positive, from its own side's point of view.
    ///
    /// White reads the table as written; Black reads it with the rows mirrored.
    #[inline(always)]
    pub fn eval(piece: Piece, square: Square) -> Score {
        Score(Self::get_table_for(piece.kind()).get_relative(square, piece.color()))
    }

    /// Fetch the Piece-Square Table for the provided [`PieceKind`].
    #[inline(always)]
    pub fn get_table_for<'a>(kind: PieceKind) -> &'a Self {
        match kind {
            PieceKind::Pawn => &PAWN,
            PieceKind::Knight => &KNIGHT,
            PieceKind::Bishop => &BISHOP,
            PieceKind::Rook => &ROOK,
            PieceKind::Queen => &QUEEN,
            PieceKind::King => &KING,
        }
    }

    /// Creates a new [`Psqt`] for the provided [`PieceKind`] and array of positional values.
    const fn new(kind: PieceKind, psqt: [i32; Square::COUNT]) -> Self {
        let mut table = psqt;

        let mut i = 0;
        while i < psqt.len() {
            table[i] = psqt[i] + value_of(kind) * Score::UNITS_PER_CENTIPAWN;
            i += 1;
        }

        Self(table)
    }

    /// Get the value of this PSQT at the provided square.
    #[inline(always)]
    pub const fn get(&self, square: Square) -> i32 {
        self.0[square.index()]
    }

    /// Get the value of this PSQT at the provided square, relative to `color`.
    #[inline(always)]
    pub const fn get_relative(&self, square: Square, color: Color) -> i32 {
        match color {
            Color::White => self.get(square),
            Color::Black => self.get(square.flipped_row()),
        }
    }
}

impl fmt::Display for Psqt {
    /// Printing a [`Psqt`] will display it in the same way it is written in the code (White's perspective).
    ///
    /// If the alternate formatter is used (`#`), it will print as if from Black's perspective.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color = if f.alternate() {
            Color::Black
        } else {
            Color::White
        };

        for row in 0..Square::SIDE {
            write!(f, "{}| ", Square::new(row, 0).rank_char())?;
            for col in 0..Square::SIDE {
                let value = self.get_relative(Square::new(row, col), color);
                write!(f, "{value:6} ")?;
            }
            writeln!(f)?;
        }
        // Format line at bottom of board
        write!(f, " +")?;
        for _ in 0..Square::SIDE {
            write!(f, "-------")?;
        }
        write!(f, "\n   ")?;
        for col in 0..Square::SIDE {
            write!(f, "{:>6} ", Square::new(0, col).file_char())?;
        }

        Ok(())
    }
}
