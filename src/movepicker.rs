/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::cmp::Reverse;

use arrayvec::ArrayVec;

use crate::{value_of, Move, MoveList, MAX_NUM_MOVES};

/// Yields moves best-first according to a scoring function.
///
/// Moves with equal scores keep the order they were generated in.
pub struct MovePicker {
    moves: ArrayVec<(Move, i32), MAX_NUM_MOVES>,
    current: usize,
}

impl MovePicker {
    /// Scores every move with `score_fn` and orders them, highest score first.
    pub fn new(moves: MoveList, score_fn: impl Fn(&Move) -> i32) -> Self {
        let mut scored = moves
            .into_iter()
            .map(|mv| (mv, score_fn(&mv)))
            .collect::<ArrayVec<_, MAX_NUM_MOVES>>();

        // Stable, so ties stay in generation order
        scored.sort_by_key(|&(_, score)| Reverse(score));

        Self {
            moves: scored,
            current: 0,
        }
    }

    /// Orders captures first, most valuable victim first.
    #[inline(always)]
    pub fn captures_first(moves: MoveList) -> Self {
        Self::new(moves, capture_value)
    }
}

impl Iterator for MovePicker {
    type Item = (Move, i32);

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.moves.get(self.current).copied()?;
        self.current += 1;
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.moves.len() - self.current;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MovePicker {}

/// Material value of the piece `mv` captures, or `0` for quiet moves.
#[inline(always)]
pub fn capture_value(mv: &Move) -> i32 {
    mv.captured().map(|victim| value_of(victim.kind())).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{legal_moves, Board, Color};

    #[test]
    fn test_captures_come_first_and_ties_are_stable() {
        // The Queen on d4 can take a Rook on d7 or a Knight on g7; the pawn on b2 can take a Knight on a3
        let board = Board::from_fen("4k3/3r2n1/8/8/3Q4/n7/1P6/4K3").unwrap();
        let moves = legal_moves(&board, Color::White);
        let quiets = moves
            .iter()
            .filter(|mv| !mv.is_capture())
            .copied()
            .collect::<Vec<_>>();

        let ordered = MovePicker::captures_first(moves.clone())
            .map(|(mv, _)| mv)
            .collect::<Vec<_>>();

        assert_eq!(ordered.len(), moves.len());
        assert_eq!(ordered[0], "d4d7");
        // Both Knight captures are worth the same, so generation order wins: b2 (row 6) comes after d4 (row 4)
        assert_eq!(ordered[1], "d4g7");
        assert_eq!(ordered[2], "b2a3");
        assert_eq!(&ordered[3..], quiets.as_slice());
    }
}
