/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use rand::Rng;

use crate::{legal_moves, Board, Color, GameError, GameResult, Move, Square};

/// A suggested move, as a pair of squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookMove {
    pub from: Square,
    pub to: Square,
}

impl BookMove {
    #[inline(always)]
    const fn new(from: (u8, u8), to: (u8, u8)) -> Self {
        Self {
            from: Square::new(from.0, from.1),
            to: Square::new(to.0, to.1),
        }
    }
}

impl fmt::Display for BookMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Book lines, keyed by every coordinate move played so far, concatenated.
const STANDARD_LINES: &[(&str, &[BookMove])] = &[
    (
        "",
        &[
            BookMove::new((6, 4), (4, 4)), // e2e4
            BookMove::new((6, 3), (4, 3)), // d2d4
            BookMove::new((7, 6), (5, 5)), // g1f3
        ],
    ),
    (
        "e2e4",
        &[
            BookMove::new((1, 4), (3, 4)), // e7e5
            BookMove::new((1, 2), (3, 2)), // c7c5
        ],
    ),
    (
        "d2d4",
        &[
            BookMove::new((1, 3), (3, 3)), // d7d5
            BookMove::new((0, 6), (2, 5)), // g8f6
        ],
    ),
];

/// A fixed table of opening moves.
///
/// Lookups are exact matches on the game's move string, so any position not in the table falls
/// through to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningBook {
    lines: &'static [(&'static str, &'static [BookMove])],
}

impl OpeningBook {
    /// Creates a book from a static table of lines.
    #[inline(always)]
    pub const fn new(lines: &'static [(&'static str, &'static [BookMove])]) -> Self {
        Self { lines }
    }

    /// The suggestions stored for `key`, if any.
    pub fn moves_for(&self, key: &str) -> Option<&'static [BookMove]> {
        self.lines
            .iter()
            .find(|(line, _)| *line == key)
            .map(|(_, moves)| *moves)
            .filter(|moves| !moves.is_empty())
    }

    /// Picks one of the suggestions for `key` uniformly at random.
    ///
    /// # Example
    /// ```
    /// # use newt::OpeningBook;
    /// let book = OpeningBook::default();
    /// let mv = book.probe("e2e4", &mut rand::rng()).unwrap();
    /// assert!(["e7e5", "c7c5"].contains(&mv.to_string().as_str()));
    /// assert!(book.probe("e2e4e7e5", &mut rand::rng()).is_none());
    /// ```
    pub fn probe<R: Rng + ?Sized>(&self, key: &str, rng: &mut R) -> Option<BookMove> {
        let moves = self.moves_for(key)?;
        Some(moves[rng.random_range(0..moves.len())])
    }

    /// Like [`OpeningBook::probe`], but also confirms the pick is a legal move for `color`.
    pub fn probe_checked<R: Rng + ?Sized>(
        &self,
        board: &Board,
        color: Color,
        key: &str,
        rng: &mut R,
    ) -> GameResult<Option<Move>> {
        let Some(suggestion) = self.probe(key, rng) else {
            return Ok(None);
        };

        legal_moves(board, color)
            .into_iter()
            .find(|mv| mv.from() == suggestion.from && mv.to() == suggestion.to)
            .map(Some)
            .ok_or_else(|| GameError::InvalidBookMove {
                mv: suggestion.to_string(),
            })
    }
}

impl Default for OpeningBook {
    /// The standard book: 1. e4, 1. d4 or 1. Nf3, then a reply to 1. e4 or 1. d4.
    #[inline(always)]
    fn default() -> Self {
        Self::new(STANDARD_LINES)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_every_line_is_legal_from_startpos() {
        let book = OpeningBook::default();

        for (key, moves) in STANDARD_LINES {
            let mut board = Board::default();
            let mut color = Color::White;
            for i in (0..key.len()).step_by(4) {
                let mv = Move::from_uci(&board, &key[i..i + 4]).unwrap();
                board.make_move(mv);
                color = color.opponent();
            }

            let legal = legal_moves(&board, color);
            for suggestion in *moves {
                assert!(
                    legal
                        .iter()
                        .any(|mv| mv.from() == suggestion.from && mv.to() == suggestion.to),
                    "{suggestion} is not legal after {key:?}"
                );
            }
            assert!(book.moves_for(key).is_some());
        }
    }

    #[test]
    fn test_probe_covers_every_suggestion() {
        let book = OpeningBook::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let mv = book.probe("", &mut rng).unwrap().to_string();
            if !seen.contains(&mv) {
                seen.push(mv);
            }
        }
        seen.sort();
        assert_eq!(seen, ["d2d4", "e2e4", "g1f3"]);
    }

    #[test]
    fn test_unknown_keys_fall_through() {
        let book = OpeningBook::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(book.probe("g1f3", &mut rng).is_none());
        assert!(book.probe("e2e4e7e5", &mut rng).is_none());
        assert!(book.probe("e2e", &mut rng).is_none());
    }

    #[test]
    fn test_probe_checked_rejects_bad_entries() {
        const BAD: &[(&str, &[BookMove])] = &[("", &[BookMove::new((6, 4), (3, 4))])];
        let book = OpeningBook::new(BAD);
        let mut rng = StdRng::seed_from_u64(3);

        let res = book.probe_checked(&Board::default(), Color::White, "", &mut rng);
        assert!(matches!(res, Err(GameError::InvalidBookMove { .. })));

        let res = OpeningBook::default().probe_checked(&Board::default(), Color::White, "", &mut rng);
        assert!(res.unwrap().is_some());
    }
}
