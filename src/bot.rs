/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use rand::Rng;

use crate::{
    Board, Color, GameConfig, GameError, GameResult, Move, OpeningBook, Search, SearchConfig,
    SearchResult,
};

/// How the engine arrived at a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSource {
    /// Taken from the opening book without searching.
    Book,

    /// Found by searching.
    Search(SearchResult),
}

/// A move chosen by the engine, along with the position it was chosen in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    mv: Move,
    source: DecisionSource,
    position: Board,
}

impl Decision {
    /// The chosen move.
    #[inline(always)]
    pub const fn mv(&self) -> Move {
        self.mv
    }

    #[inline(always)]
    pub const fn source(&self) -> DecisionSource {
        self.source
    }

    /// The board the move was chosen on.
    #[inline(always)]
    pub const fn position(&self) -> &Board {
        &self.position
    }

    /// A short message describing the decision, for display.
    ///
    /// # Example
    /// ```
    /// # use newt::{Board, Color, GameConfig, Opponent};
    /// let opponent = Opponent::new(&GameConfig::default());
    /// let decision = opponent
    ///     .decide(&mut Board::default(), Color::White, Some(""), &mut rand::rng())
    ///     .unwrap();
    /// assert_eq!(decision.advisory(), "Playing from Opening Book");
    /// ```
    pub fn advisory(&self) -> String {
        match self.source {
            DecisionSource::Book => String::from("Playing from Opening Book"),
            DecisionSource::Search(_) => format!(
                "Bot moved {} to improve position.",
                self.mv.piece().kind().name()
            ),
        }
    }
}

/// The engine's move selection: the opening book first, then a fixed-depth search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opponent {
    /// Opening lines consulted before searching.
    pub book: OpeningBook,

    /// Depth and style of the search.
    pub search: SearchConfig,

    /// Check book moves against the legal moves before playing them.
    pub verify_book: bool,
}

impl Opponent {
    /// An opponent with the standard book, playing at `config`'s level and style.
    #[inline(always)]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            book: OpeningBook::default(),
            search: SearchConfig::from(config),
            verify_book: config.verify_book,
        }
    }

    /// Chooses a move for `color`.
    ///
    /// `book_line` is the coordinate notation of every move played so far, or `None` if the game
    /// is known to be out of book. The board is restored before returning.
    ///
    /// # Panics
    /// If the book has nothing to offer and `color` has no legal moves.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        color: Color,
        book_line: Option<&str>,
        rng: &mut R,
    ) -> GameResult<Decision> {
        let position = *board;

        if let Some(line) = book_line {
            if let Some(mv) = self.probe_book(board, color, line, rng)? {
                tracing::debug!(%mv, line, "book move");
                return Ok(Decision {
                    mv,
                    source: DecisionSource::Book,
                    position,
                });
            }
        }

        let result = Search::new(board, color, self.search).start();
        let mv = result.bestmove.ok_or(GameError::GameOver)?;

        Ok(Decision {
            mv,
            source: DecisionSource::Search(result),
            position,
        })
    }

    /// Book entries are trusted unless `verify_book` is set.
    fn probe_book<R: Rng + ?Sized>(
        &self,
        board: &Board,
        color: Color,
        line: &str,
        rng: &mut R,
    ) -> GameResult<Option<Move>> {
        if self.verify_book {
            return self.book.probe_checked(board, color, line, rng);
        }

        self.book
            .probe(line, rng)
            .map(|suggestion| {
                Move::new(board, suggestion.from, suggestion.to).ok_or_else(|| {
                    GameError::InvalidBookMove {
                        mv: suggestion.to_string(),
                    }
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{BookMove, Square, Style};

    fn opponent(level: u8) -> Opponent {
        Opponent::new(&GameConfig {
            level,
            ..Default::default()
        })
    }

    #[test]
    fn test_book_is_used_from_startpos() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut board = Board::default();

        let decision = opponent(4)
            .decide(&mut board, Color::White, Some(""), &mut rng)
            .unwrap();

        assert_eq!(decision.source(), DecisionSource::Book);
        assert!(["e2e4", "d2d4", "g1f3"].contains(&decision.mv().to_string().as_str()));
        assert_eq!(board, Board::default());
    }

    #[test]
    fn test_out_of_book_searches() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3").unwrap();

        let decision = opponent(1)
            .decide(&mut board, Color::Black, None, &mut rng)
            .unwrap();
        assert!(matches!(decision.source(), DecisionSource::Search(_)));
        assert_eq!(decision.mv(), "d5e4");
        assert_eq!(decision.advisory(), "Bot moved Pawn to improve position.");

        // Unknown lines fall through to search too
        let mut board = Board::default();
        let decision = opponent(1)
            .decide(&mut board, Color::White, Some("a2a3"), &mut rng)
            .unwrap();
        assert!(matches!(decision.source(), DecisionSource::Search(_)));
    }

    #[test]
    fn test_unverified_book_still_needs_a_piece() {
        let mut rng = StdRng::seed_from_u64(42);
        // No pawn on e2: the trusted book move cannot even be built
        let mut board = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPP1PPP/RNBQKBNR").unwrap();
        const E2E4: &[(&str, &[BookMove])] = &[(
            "",
            &[BookMove {
                from: Square::new(6, 4),
                to: Square::new(4, 4),
            }],
        )];
        let mut bot = opponent(1);
        bot.book = OpeningBook::new(E2E4);

        let res = bot.decide(&mut board, Color::White, Some(""), &mut rng);
        assert!(matches!(res, Err(GameError::InvalidBookMove { .. })));
    }

    #[test]
    fn test_style_is_forwarded() {
        let bot = Opponent::new(&GameConfig {
            level: 3,
            style: Style::Aggressive,
            ..Default::default()
        });
        assert_eq!(bot.search.depth, 3);
        assert_eq!(bot.search.style, Style::Aggressive);
    }
}
