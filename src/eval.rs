/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Board, Color, PieceKind, Psqt, Score, Square, Style};

/// Encapsulates the logic of scoring a chess position.
///
/// Every piece contributes its material value plus, for pawns and knights, a positional bonus.
/// The sum is taken from the engine's side, Black: a high score is good for Black and a low score
/// is good for White. During a negamax search, the side to move flips this with [`Evaluator::eval_for`].
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    /// The board whose position to evaluate.
    board: &'a Board,

    /// Personality applied to the final score.
    style: Style,
}

impl<'a> Evaluator<'a> {
    /// Construct a new [`Evaluator`] with the default [`Style`].
    #[inline(always)]
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            style: Style::default(),
        }
    }

    /// Scale the final score by `style`.
    #[inline(always)]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Evaluate this position from Black's perspective.
    ///
    /// # Example
    /// ```
    /// # use newt::{Board, Evaluator, Score};
    /// // Black is up a Queen
    /// let board = Board::from_fen("3qk3/8/8/8/8/8/8/4K3").unwrap();
    /// assert_eq!(Evaluator::new(&board).eval(), Score::from_centipawns(900));
    /// ```
    #[inline(always)]
    pub fn eval(&self) -> Score {
        self.eval_for(Color::Black)
    }

    /// Evaluate this position from `color`'s perspective.
    ///
    /// A positive/high number is good for the `color`, while a negative number is better for the opponent.
    /// A score of 0 is considered equal.
    #[inline(always)]
    pub fn eval_for(&self, color: Color) -> Score {
        let mut score = Score::DRAW;

        // Iterate over every occupied square
        for (square, piece) in self.board.iter() {
            let value = Psqt::eval(piece, square);

            // Flip scores appropriately to evaluate from `color`'s perspective
            if color == piece.color() {
                score += value;
            } else {
                score -= value;
            }
        }

        self.style.apply(score)
    }

    /// Fetches the value for the piece on the specified square, if one exists.
    ///
    /// Positive for White. Only used when printing the evaluator.
    #[inline(always)]
    fn value_at(&self, square: Square) -> Option<Score> {
        self.board
            .piece_at(square)
            .filter(|piece| !piece.is_king())
            .map(|piece| Psqt::eval(piece, square) * piece.color().negation_multiplier())
    }
}

impl fmt::Display for Evaluator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  +")?;
        for _ in 0..Square::SIDE {
            write!(f, "-----+")?;
        }
        writeln!(f)?;
        for row in 0..Square::SIDE {
            write!(f, "{} |", Square::new(row, 0).rank_char())?;

            // Step 1: Write the piece char
            for col in 0..Square::SIDE {
                let piece = self.board.piece_at(Square::new(row, col));
                let piece_char = piece.map(|p| p.fen_char()).unwrap_or(' ');
                write!(f, "  {piece_char}  |")?;
            }
            writeln!(f)?;
            write!(f, "  |")?;

            // Step 2: Write the contribution of that piece
            for col in 0..Square::SIDE {
                let score = if let Some(val) = self.value_at(Square::new(row, col)) {
                    format!("{:^5}", format!("{:+.1}", val.normalize()))
                } else {
                    String::from("     ")
                };
                write!(f, "{score}|")?;
            }

            writeln!(f)?;

            write!(f, "  +")?;
            for _ in 0..Square::SIDE {
                write!(f, "-----+")?;
            }
            writeln!(f)?;
        }
        for col in 0..Square::SIDE {
            write!(f, "     {}", Square::new(0, col).file_char())?;
        }

        let score = self.eval_for(Color::White);

        let winning_side = if score > Score::DRAW {
            Some(Color::White)
        } else if score < Score::DRAW {
            Some(Color::Black)
        } else {
            None
        };

        writeln!(f, "\n\nStyle: {}", self.style)?;
        writeln!(
            f,
            "Material: {} (white) / {} (black)",
            self.board.material(Color::White),
            self.board.material(Color::Black)
        )?;
        writeln!(
            f,
            "Winning side: {}",
            winning_side.map(|c| c.name()).unwrap_or("N/A")
        )?;
        write!(f, "Score: {score} (white)")?;

        Ok(())
    }
}

/// Returns the material value of the provided `PieceKind`, in centipawns.
///
/// Values are obtained from here: <https://www.chessprogramming.org/Simplified_Evaluation_Function>
#[inline(always)]
pub const fn value_of(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20_000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_is_balanced() {
        let board = Board::default();
        assert_eq!(Evaluator::new(&board).eval(), Score::DRAW);
        assert_eq!(
            Evaluator::new(&board)
                .with_style(Style::Aggressive)
                .eval_for(Color::White),
            Score::DRAW
        );
    }

    #[test]
    fn test_perspectives_are_opposite() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8",
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR",
        ];

        for fen in fens {
            let board = Board::from_fen(fen).unwrap();
            let eval = Evaluator::new(&board);
            assert_eq!(eval.eval(), -eval.eval_for(Color::White), "{fen}");
        }
    }

    #[test]
    fn test_positional_bonus() {
        // 1. e4: the pawn moves from a -20 square to a +20 square, worth 4 centipawns to White
        let board = Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR").unwrap();
        assert_eq!(Evaluator::new(&board).eval_for(Color::White), Score(40));
        assert_eq!(
            Evaluator::new(&board)
                .with_style(Style::Aggressive)
                .eval_for(Color::White),
            Score(44)
        );
    }
}
