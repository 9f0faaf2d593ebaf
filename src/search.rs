/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use crate::{
    is_in_check, legal_moves, Board, Color, Evaluator, GameConfig, Move, MovePicker, Score, Style,
};

/// Maximum depth that can be searched
pub const MAX_DEPTH: usize = 255;

/// The result of a search, containing the best move found, score, and total nodes searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchResult {
    /// Number of nodes searched.
    pub nodes: u64,

    /// Best move found during the search.
    pub bestmove: Option<Move>,

    /// Evaluation of the position after `bestmove` is made, from the searching side's perspective.
    pub score: Score,
}

impl Default for SearchResult {
    /// A default search result should initialize to a *very bad* value,
    /// since there isn't a move to play.
    #[inline(always)]
    fn default() -> Self {
        Self {
            nodes: 0,
            bestmove: None,
            score: -Score::INF,
        }
    }
}

/// Configuration variables for executing a [`Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Depth, in plies, of the search. Every line is searched exactly this deep.
    pub depth: usize,

    /// Personality applied to every evaluation.
    pub style: Style,
}

impl Default for SearchConfig {
    #[inline(always)]
    fn default() -> Self {
        Self {
            depth: 1,
            style: Style::default(),
        }
    }
}

impl From<&GameConfig> for SearchConfig {
    /// The difficulty level is the search depth.
    #[inline(always)]
    fn from(config: &GameConfig) -> Self {
        Self {
            depth: config.level as usize,
            style: config.style,
        }
    }
}

/// Executes a fixed-depth search on the provided board.
///
/// The board is borrowed mutably: moves are applied and reverted in place while searching,
/// and it is left exactly as it was found once the search returns.
pub struct Search<'a> {
    /// The board to search on.
    board: &'a mut Board,

    /// The side to find a move for.
    color: Color,

    /// The result of the search, updated as-needed during search.
    result: SearchResult,

    /// Configuration variables for this instance of the search.
    config: SearchConfig,
}

impl<'a> Search<'a> {
    /// Construct a new [`Search`] instance to find a move for `color` on the provided [`Board`].
    #[inline(always)]
    pub fn new(board: &'a mut Board, color: Color, config: SearchConfig) -> Self {
        Self {
            board,
            color,
            result: SearchResult::default(),
            config,
        }
    }

    /// Start the search, returning its results.
    ///
    /// Every root move is searched with a full window at `depth - 1`, captures first.
    /// The first move with the strictly greatest score wins.
    ///
    /// # Panics
    /// If `color` has no legal moves. Callers must only search live positions.
    pub fn start(mut self) -> SearchResult {
        let starttime = Instant::now();
        let moves = legal_moves(self.board, self.color);
        assert!(
            !moves.is_empty(),
            "Cannot search {:?} for {}: no legal moves",
            self.board,
            self.color
        );

        let depth = self.config.depth.clamp(1, MAX_DEPTH);

        for (mv, _) in MovePicker::captures_first(moves) {
            self.board.make_move(mv);
            let score = -self.negamax(self.color.opponent(), depth - 1, -Score::INF, Score::INF, 1);
            self.board.unmake_move(mv);

            if score > self.result.score {
                self.result.score = score;
                self.result.bestmove = Some(mv);
            }
        }

        tracing::debug!(
            depth,
            nodes = self.result.nodes,
            score = %self.result.score,
            bestmove = ?self.result.bestmove,
            elapsed_ms = starttime.elapsed().as_millis() as u64,
            "search finished"
        );

        self.result
    }

    /// Primary location of search logic.
    ///
    /// Uses the [negamax](https://www.chessprogramming.org/Negamax) algorithm with fail-hard
    /// alpha-beta pruning. Scores are from `color`'s perspective.
    fn negamax(
        &mut self,
        color: Color,
        depth: usize,
        mut alpha: Score,
        beta: Score,
        ply: i32,
    ) -> Score {
        self.result.nodes += 1;

        // If we've reached a terminal node, evaluate the position
        if depth == 0 {
            return Evaluator::new(self.board)
                .with_style(self.config.style)
                .eval_for(color);
        }

        let moves = legal_moves(self.board, color);

        // If there are no legal moves, it's either mate or a draw.
        if moves.is_empty() {
            return if is_in_check(self.board, color) {
                // Prefer earlier mates
                -Score::MATE + ply
            } else {
                Score::DRAW
            };
        }

        for (mv, _) in MovePicker::captures_first(moves) {
            self.board.make_move(mv);
            let score = -self.negamax(color.opponent(), depth - 1, -beta, -alpha, ply + 1);
            self.board.unmake_move(mv);

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(fen: &str, color: Color, depth: usize) -> SearchResult {
        let mut board = fen.parse::<Board>().unwrap();
        let before = board;
        let config = SearchConfig {
            depth,
            ..Default::default()
        };

        let res = Search::new(&mut board, color, config).start();
        assert_eq!(board, before, "Search on {fen:?} did not restore the board");
        res
    }

    fn ensure_is_mate_in(fen: &str, color: Color, depth: usize, moves: i32) {
        let res = search(fen, color, depth);
        assert!(
            res.score.is_mate(),
            "Search on {fen:?} at depth {depth} produced result that is not mate.\nResult: {res:#?}"
        );
        assert_eq!(
            res.score.moves_to_mate(),
            moves,
            "Search on {fen:?} at depth {depth} produced result not mate in {moves}.\nResult: {res:#?}"
        );
    }

    #[test]
    fn test_white_mate_in_1() {
        ensure_is_mate_in("k7/8/KQ6/8/8/8/8/8", Color::White, 2, 1);
    }

    #[test]
    fn test_black_mated_in_1() {
        ensure_is_mate_in("1k6/8/KQ6/2Q5/8/8/8/8", Color::Black, 3, -1);
    }

    #[test]
    fn test_black_finds_mate() {
        // Back-rank mate with the Rook
        let res = search("r5k1/8/8/8/8/8/5PPP/6K1", Color::Black, 2);
        assert_eq!(res.bestmove.unwrap(), "a8a1");
        assert!(res.score.is_mate());
    }

    #[test]
    fn test_takes_the_only_winning_capture() {
        let res = search("4k3/8/8/3p4/4P3/8/8/4K3", Color::White, 1);
        assert_eq!(res.bestmove.unwrap(), "e4d5");

        let res = search("4k3/8/8/3p4/4P3/8/8/4K3", Color::Black, 1);
        assert_eq!(res.bestmove.unwrap(), "d5e4");
    }

    #[test]
    fn test_deeper_search_restores_board() {
        let res = search(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
            Color::White,
            3,
        );
        assert!(res.bestmove.is_some());
        assert!(res.nodes > 0);
    }

    #[test]
    fn test_first_best_move_wins_ties() {
        // Only the two Kings: every move scores the same, so the first generated move is kept
        let board: Board = "4k3/8/8/8/8/8/8/4K3".parse().unwrap();
        let first = legal_moves(&board, Color::White)[0];
        let res = search("4k3/8/8/8/8/8/8/4K3", Color::White, 2);
        assert_eq!(res.bestmove, Some(first));
    }

    #[test]
    #[should_panic]
    fn test_searching_a_stalemate_panics() {
        search("k7/8/1Q6/8/8/8/8/K7", Color::Black, 1);
    }
}
