/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    has_legal_moves, is_in_check, legal_moves, Board, Clock, Color, Decision, GameConfig,
    GameError, GameResult, Move, MoveList, Opponent, Square,
};

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalReason {
    Checkmate,
    Stalemate,
    Timeout,
}

impl TerminalReason {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Checkmate => "checkmate",
            Self::Stalemate => "stalemate",
            Self::Timeout => "timeout",
        }
    }
}

/// How a game ended, and who won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Outcome {
    pub reason: TerminalReason,

    /// `None` for a draw.
    pub winner: Option<Color>,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner {
            Some(winner) => write!(f, "{} wins by {}", winner.name(), self.reason.name()),
            None => write!(f, "Draw by {}", self.reason.name()),
        }
    }
}

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Waiting for `color` to move.
    AwaitingMove(Color),

    /// The engine is choosing a move for `color`.
    Evaluating(Color),

    /// The game is over.
    Terminal(Outcome),
}

/// Everything needed to restore a game to an earlier point, minus its history and settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot {
    pub board: Board,
    pub turn: Color,
    pub clock: Clock,

    /// Display notation of every move played so far.
    pub pgn: Vec<String>,

    /// Coordinate notation of every move played so far, concatenated, used to look moves up in
    /// the opening book. `None` once the game is known to be out of book.
    pub book_line: Option<String>,
}

impl Snapshot {
    /// The standard starting position with `seconds` on each clock.
    pub fn startpos(seconds: u32) -> Self {
        Self {
            board: Board::startpos(),
            turn: Color::White,
            clock: Clock::new(seconds),
            pgn: Vec::new(),
            book_line: Some(String::new()),
        }
    }
}

/// Hooks for whatever presents a [`Game`].
///
/// Every method does nothing by default.
pub trait GameObserver {
    /// Called after `mv` has been played. `snapshot` is the new state of the game.
    fn on_move_applied(&mut self, _mv: &Move, _notation: &str, _snapshot: &Snapshot) {}

    /// Called once when the game ends.
    fn on_terminal(&mut self, _outcome: &Outcome) {}

    /// Called with a short description of each move the engine chooses, before it is played.
    fn on_advisory(&mut self, _message: &str) {}
}

/// The engine's pending move choice, detached from the [`Game`] so it can run anywhere.
///
/// Obtained with [`Game::begin_evaluation`]. Pass the result of [`Evaluation::run`] to
/// [`Game::finish_evaluation`].
#[derive(Debug, Clone)]
pub struct Evaluation {
    board: Board,
    color: Color,
    book_line: Option<String>,
    opponent: Opponent,
    rng: StdRng,
}

impl Evaluation {
    /// The side the engine is choosing a move for.
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Chooses the move. This is the only slow part of a game.
    pub fn run(mut self) -> GameResult<Decision> {
        self.opponent.decide(
            &mut self.board,
            self.color,
            self.book_line.as_deref(),
            &mut self.rng,
        )
    }
}

/// A game of chess between a human and the engine, or two humans.
///
/// The game owns its board. Every move is validated, recorded in the history, and checked for the
/// end of the game. A rejected request leaves the game exactly as it was.
pub struct Game {
    pub(crate) current: Snapshot,
    pub(crate) history: Vec<Snapshot>,
    pub(crate) config: GameConfig,
    status: GameStatus,
    observer: Option<Box<dyn GameObserver>>,
    rng: StdRng,
}

impl Game {
    /// Starts a new game from the standard position.
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Starts a new game whose opening book picks are driven by `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        tracing::info!(
            mode = %config.mode,
            level = config.level,
            style = %config.style,
            "new game"
        );

        Self {
            current: Snapshot::startpos(config.time_control),
            history: Vec::new(),
            config,
            status: GameStatus::AwaitingMove(Color::White),
            observer: None,
            rng,
        }
    }

    /// Replaces the position with `board`, `turn` to move, keeping the settings and clearing the history.
    ///
    /// The game is out of book unless this is the starting position.
    /// A board that fails [`Board::validate`] is refused and the game is left as it was.
    pub fn set_position(&mut self, board: Board, turn: Color) -> GameResult<()> {
        board
            .validate()
            .map_err(|e| GameError::InvalidPosition(e.to_string()))?;

        let book_line = (board == Board::startpos() && turn.is_white()).then(String::new);
        self.restore(
            Snapshot {
                board,
                turn,
                clock: Clock::new(self.config.time_control),
                pgn: Vec::new(),
                book_line,
            },
            Vec::new(),
        );
        Ok(())
    }

    /// Installs `observer`, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl GameObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.current.board
    }

    /// Side to move.
    #[inline(always)]
    pub const fn turn(&self) -> Color {
        self.current.turn
    }

    #[inline(always)]
    pub const fn clock(&self) -> &Clock {
        &self.current.clock
    }

    /// Display notation of every move played so far.
    #[inline(always)]
    pub fn pgn(&self) -> &[String] {
        &self.current.pgn
    }

    #[inline(always)]
    pub fn book_line(&self) -> Option<&str> {
        self.current.book_line.as_deref()
    }

    /// The state of the game right now.
    #[inline(always)]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.current
    }

    /// Earlier states, oldest first, one per move played.
    #[inline(always)]
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    #[inline(always)]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline(always)]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[inline(always)]
    pub const fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Terminal(_))
    }

    /// Returns `true` if the engine plays the side to move and the game is not over.
    #[inline(always)]
    pub fn is_bot_turn(&self) -> bool {
        matches!(self.status, GameStatus::AwaitingMove(color) if self.config.mode.bot_color() == Some(color))
    }

    /// Every legal move for the side to move.
    #[inline(always)]
    pub fn legal_moves(&self) -> MoveList {
        legal_moves(&self.current.board, self.current.turn)
    }

    /// Creates a [`Move`] from coordinate notation, if it is legal for the side to move.
    pub fn parse_move(&self, uci: &str) -> GameResult<Move> {
        let mv = Move::from_uci(&self.current.board, uci).map_err(|_| GameError::IllegalMove {
            mv: uci.to_string(),
        })?;

        self.find_legal(mv.from(), mv.to())
    }

    /// Plays `mv` for a human.
    ///
    /// Rejected if the game is over, the engine is thinking, the engine plays the side to move,
    /// or `mv` is not legal.
    pub fn play_move(&mut self, mv: Move) -> GameResult<()> {
        self.ensure_human_turn()?;
        let mv = self.find_legal(mv.from(), mv.to())?;
        self.apply(mv);
        Ok(())
    }

    /// Parses and plays a move in coordinate notation for a human.
    #[inline(always)]
    pub fn play_uci(&mut self, uci: &str) -> GameResult<()> {
        self.ensure_human_turn()?;
        let mv = self.parse_move(uci)?;
        self.play_move(mv)
    }

    fn ensure_human_turn(&self) -> GameResult<()> {
        match self.status {
            GameStatus::Terminal(_) => Err(GameError::GameOver),
            GameStatus::Evaluating(_) => Err(GameError::Busy),
            GameStatus::AwaitingMove(_) if self.is_bot_turn() => Err(GameError::NotYourTurn),
            GameStatus::AwaitingMove(_) => Ok(()),
        }
    }

    /// Lets the engine choose and play a move for the side to move, blocking until it has.
    pub fn play_bot_move(&mut self) -> GameResult<Decision> {
        let evaluation = self.begin_evaluation()?;
        let decision = evaluation.run();
        self.finish_evaluation(decision)
    }

    /// Hands the engine's move choice off, so it can be computed elsewhere.
    ///
    /// The game refuses moves and undos until [`Game::finish_evaluation`] is called.
    pub fn begin_evaluation(&mut self) -> GameResult<Evaluation> {
        let color = match self.status {
            GameStatus::Terminal(_) => return Err(GameError::GameOver),
            GameStatus::Evaluating(_) => return Err(GameError::Busy),
            GameStatus::AwaitingMove(color) => color,
        };

        self.status = GameStatus::Evaluating(color);

        Ok(Evaluation {
            board: self.current.board,
            color,
            book_line: self.current.book_line.clone(),
            opponent: Opponent::new(&self.config),
            rng: StdRng::seed_from_u64(self.rng.random()),
        })
    }

    /// Plays the engine's move, or returns to waiting if it failed.
    ///
    /// A decision made for a different position, or arriving after the game ended, is discarded.
    pub fn finish_evaluation(
        &mut self,
        decision: GameResult<Decision>,
    ) -> GameResult<Decision> {
        let GameStatus::Evaluating(color) = self.status else {
            return Err(match (self.status, decision) {
                (GameStatus::Terminal(_), _) => GameError::GameOver,
                (_, Ok(decision)) => GameError::StaleDecision {
                    mv: decision.mv().to_string(),
                },
                (_, Err(e)) => e,
            });
        };

        self.status = GameStatus::AwaitingMove(color);
        let decision = decision?;

        if decision.position() != &self.current.board {
            return Err(GameError::StaleDecision {
                mv: decision.mv().to_string(),
            });
        }

        let advisory = decision.advisory();
        tracing::info!(%advisory, mv = %decision.mv(), "engine move");
        if let Some(observer) = self.observer.as_mut() {
            observer.on_advisory(&advisory);
        }

        self.apply(decision.mv());
        Ok(decision)
    }

    /// Removes one second from the side to move's clock.
    ///
    /// Returns the outcome if this tick ran the clock out. Does nothing once the game is over.
    pub fn tick(&mut self) -> Option<Outcome> {
        if self.is_over() {
            return None;
        }

        let turn = self.current.turn;
        if !self.current.clock.tick(turn) {
            return None;
        }

        let outcome = Outcome {
            reason: TerminalReason::Timeout,
            winner: Some(turn.opponent()),
        };
        self.end(outcome);
        Some(outcome)
    }

    /// Takes back the last move, or the last two in bot mode so the human is to move again.
    ///
    /// Reopens a finished game.
    pub fn undo(&mut self) -> GameResult<()> {
        if matches!(self.status, GameStatus::Evaluating(_)) {
            return Err(GameError::Busy);
        }

        let steps = if self.config.mode.bot_color().is_some()
            && self.current.turn.is_white()
            && self.history.len() > 1
        {
            2
        } else {
            1
        };

        let mut restored = None;
        for _ in 0..steps {
            restored = self.history.pop().or(restored);
        }
        let snapshot = restored.ok_or(GameError::NothingToUndo)?;

        tracing::info!(steps, "undo");
        self.current = snapshot;
        self.status = GameStatus::AwaitingMove(self.current.turn);
        Ok(())
    }

    /// Replaces the current state and history, re-deriving the status.
    pub(crate) fn restore(&mut self, current: Snapshot, history: Vec<Snapshot>) {
        self.current = current;
        self.history = history;
        self.status = GameStatus::AwaitingMove(self.current.turn);

        let turn = self.current.turn;
        let outcome = self.terminal_outcome().or_else(|| {
            (self.current.clock.remaining(turn) == 0).then_some(Outcome {
                reason: TerminalReason::Timeout,
                winner: Some(turn.opponent()),
            })
        });
        if let Some(outcome) = outcome {
            self.status = GameStatus::Terminal(outcome);
        }
    }

    /// Finds the legal move from `from` to `to`.
    fn find_legal(&self, from: Square, to: Square) -> GameResult<Move> {
        legal_moves(&self.current.board, self.current.turn)
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to)
            .ok_or_else(|| GameError::IllegalMove {
                mv: format!("{from}{to}"),
            })
    }

    /// Records the current state, plays `mv`, and checks whether the game is over.
    fn apply(&mut self, mv: Move) {
        self.history.push(self.current.clone());

        let notation = mv.notation();
        self.current.board.make_move(mv);
        self.current.pgn.push(notation.clone());
        if let Some(line) = self.current.book_line.as_mut() {
            line.push_str(&mv.to_uci());
        }
        self.current.turn = self.current.turn.opponent();
        self.status = GameStatus::AwaitingMove(self.current.turn);

        tracing::info!(%notation, "move executed");
        if let Some(observer) = self.observer.as_mut() {
            observer.on_move_applied(&mv, &notation, &self.current);
        }

        if let Some(outcome) = self.terminal_outcome() {
            self.end(outcome);
        }
    }

    /// Checkmate or stalemate for the side to move, if it has no legal moves.
    fn terminal_outcome(&self) -> Option<Outcome> {
        let turn = self.current.turn;
        if has_legal_moves(&self.current.board, turn) {
            return None;
        }

        Some(if is_in_check(&self.current.board, turn) {
            Outcome {
                reason: TerminalReason::Checkmate,
                winner: Some(turn.opponent()),
            }
        } else {
            Outcome {
                reason: TerminalReason::Stalemate,
                winner: None,
            }
        })
    }

    fn end(&mut self, outcome: Outcome) {
        self.status = GameStatus::Terminal(outcome);
        tracing::info!(reason = outcome.reason.name(), winner = ?outcome.winner, "game over");

        if let Some(observer) = self.observer.as_mut() {
            observer.on_terminal(&outcome);
        }
    }
}

impl Default for Game {
    #[inline(always)]
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("current", &self.current)
            .field("history", &self.history.len())
            .field("config", &self.config)
            .field("status", &self.status)
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", self.current.board)?;
        writeln!(f, "{}", self.current.clock)?;
        match self.status {
            GameStatus::AwaitingMove(color) => write!(f, "{} to move", color.name())?,
            GameStatus::Evaluating(color) => write!(f, "Engine is thinking for {}", color.name())?,
            GameStatus::Terminal(outcome) => write!(f, "{outcome}")?,
        }
        if !self.current.pgn.is_empty() {
            write!(f, "\nMoves: {}", self.current.pgn.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{Mode, Piece};

    fn bot_game(level: u8) -> Game {
        Game::with_seed(
            GameConfig {
                mode: Mode::Bot,
                level,
                ..Default::default()
            },
            7,
        )
    }

    #[derive(Default, Clone)]
    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl GameObserver for Recorder {
        fn on_move_applied(&mut self, _mv: &Move, notation: &str, _snapshot: &Snapshot) {
            self.0.lock().unwrap().push(format!("move {notation}"));
        }

        fn on_terminal(&mut self, outcome: &Outcome) {
            self.0.lock().unwrap().push(format!("end {outcome}"));
        }

        fn on_advisory(&mut self, message: &str) {
            self.0.lock().unwrap().push(format!("advisory {message}"));
        }
    }

    #[test]
    fn test_rejected_moves_leave_the_game_alone() {
        let mut game = Game::default();
        let before = game.snapshot().clone();

        assert!(matches!(game.play_uci("e2e5"), Err(GameError::IllegalMove { .. })));
        assert!(matches!(game.play_uci("e7e5"), Err(GameError::IllegalMove { .. })));
        assert!(matches!(game.play_uci("zz"), Err(GameError::IllegalMove { .. })));
        assert!(matches!(game.undo(), Err(GameError::NothingToUndo)));

        assert_eq!(game.snapshot(), &before);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_moves_are_recorded() {
        let mut game = Game::default();
        game.play_uci("e2e4").unwrap();
        game.play_uci("d7d5").unwrap();
        game.play_uci("e4d5").unwrap();

        assert_eq!(game.pgn(), ["e4", "d5", "xd5"]);
        assert_eq!(game.book_line(), Some("e2e4d7d5e4d5"));
        assert_eq!(game.history().len(), 3);
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.status(), GameStatus::AwaitingMove(Color::Black));
    }

    #[test]
    fn test_bot_refuses_human_moves_on_its_turn() {
        let mut game = bot_game(1);
        game.play_uci("e2e4").unwrap();
        assert!(game.is_bot_turn());
        assert!(matches!(game.play_uci("e7e5"), Err(GameError::NotYourTurn)));

        let decision = game.play_bot_move().unwrap();
        assert_eq!(decision.advisory(), "Playing from Opening Book");
        assert!(["e7e5", "c7c5"].contains(&decision.mv().to_string().as_str()));
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn test_undo_in_bot_mode_takes_back_two_moves() {
        let mut game = bot_game(1);
        let start = game.snapshot().clone();

        game.play_uci("e2e4").unwrap();
        game.play_bot_move().unwrap();
        assert_eq!(game.history().len(), 2);

        game.undo().unwrap();
        assert_eq!(game.snapshot(), &start);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_busy_while_evaluating() {
        let mut game = bot_game(1);
        game.play_uci("d2d4").unwrap();

        let evaluation = game.begin_evaluation().unwrap();
        assert_eq!(evaluation.color(), Color::Black);
        assert!(matches!(game.undo(), Err(GameError::Busy)));
        assert!(matches!(game.begin_evaluation(), Err(GameError::Busy)));

        // The clock keeps running while the engine thinks
        game.tick();
        assert_eq!(game.clock().black, game.config().time_control - 1);

        game.finish_evaluation(evaluation.run()).unwrap();
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.status(), GameStatus::AwaitingMove(Color::White));
    }

    #[test]
    fn test_stale_decisions_are_discarded() {
        let mut game = bot_game(1);
        game.play_uci("d2d4").unwrap();
        let decision = game.begin_evaluation().unwrap().run();

        let mut other = bot_game(1);
        other.play_uci("e2e4").unwrap();
        other.begin_evaluation().unwrap();
        assert!(matches!(
            other.finish_evaluation(decision),
            Err(GameError::StaleDecision { .. })
        ));
        assert_eq!(other.status(), GameStatus::AwaitingMove(Color::Black));
        assert_eq!(other.history().len(), 1);
    }

    #[test]
    fn test_duplicate_decisions_are_discarded() {
        let mut game = bot_game(1);
        game.play_uci("d2d4").unwrap();
        let decision = game.begin_evaluation().unwrap().run().unwrap();
        let mv = decision.mv().to_string();

        game.finish_evaluation(Ok(decision)).unwrap();
        assert_eq!(game.history().len(), 2);

        let res = game.finish_evaluation(Ok(decision));
        assert!(
            matches!(&res, Err(GameError::StaleDecision { mv: stale }) if *stale == mv),
            "got {res:?}"
        );
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.status(), GameStatus::AwaitingMove(Color::White));
    }

    #[test]
    fn test_failed_evaluation_returns_to_waiting() {
        let mut game = bot_game(1);
        game.play_uci("d2d4").unwrap();
        game.begin_evaluation().unwrap();

        assert!(matches!(
            game.finish_evaluation(Err(GameError::EngineFailed)),
            Err(GameError::EngineFailed)
        ));
        assert_eq!(game.status(), GameStatus::AwaitingMove(Color::Black));
        assert!(game.play_bot_move().is_ok());
    }

    #[test]
    fn test_clock_runs_out_while_evaluating() {
        let mut game = Game::with_seed(
            GameConfig {
                mode: Mode::Bot,
                level: 1,
                time_control: 2,
                ..Default::default()
            },
            7,
        );
        game.play_uci("d2d4").unwrap();
        let evaluation = game.begin_evaluation().unwrap();

        assert_eq!(game.tick(), None);
        let outcome = game.tick().unwrap();
        assert_eq!(
            outcome,
            Outcome {
                reason: TerminalReason::Timeout,
                winner: Some(Color::White),
            }
        );

        // The engine's move arrives too late to be played
        assert!(matches!(
            game.finish_evaluation(evaluation.run()),
            Err(GameError::GameOver)
        ));
        assert_eq!(game.status(), GameStatus::Terminal(outcome));
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.clock().black, 0);
    }

    #[test]
    fn test_timeout() {
        let mut game = Game::new(GameConfig {
            time_control: 2,
            ..Default::default()
        });

        assert_eq!(game.tick(), None);
        let outcome = game.tick().unwrap();
        assert_eq!(outcome.reason, TerminalReason::Timeout);
        assert_eq!(outcome.winner, Some(Color::Black));
        assert!(game.is_over());
        assert!(matches!(game.play_uci("e2e4"), Err(GameError::GameOver)));
        assert_eq!(game.tick(), None);
    }

    #[test]
    fn test_checkmate_and_undo_reopens() {
        let mut game = Game::default();
        let recorder = Recorder::default();
        game.set_observer(recorder.clone());

        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.play_uci(mv).unwrap();
        }

        let outcome = Outcome {
            reason: TerminalReason::Checkmate,
            winner: Some(Color::Black),
        };
        assert_eq!(game.status(), GameStatus::Terminal(outcome));
        assert_eq!(
            recorder.0.lock().unwrap().last().unwrap(),
            "end black wins by checkmate"
        );
        assert_eq!(recorder.0.lock().unwrap().len(), 5);

        game.undo().unwrap();
        assert_eq!(game.status(), GameStatus::AwaitingMove(Color::Black));
        assert_eq!(game.pgn(), ["f3", "e5", "g4"]);
    }

    #[test]
    fn test_set_position_detects_stalemate() {
        let mut game = Game::default();
        game.set_position(Board::from_fen("k7/8/1Q6/8/8/8/8/K7").unwrap(), Color::Black)
            .unwrap();

        assert_eq!(
            game.status(),
            GameStatus::Terminal(Outcome {
                reason: TerminalReason::Stalemate,
                winner: None
            })
        );
        assert_eq!(game.book_line(), None);
    }

    #[test]
    fn test_set_position_refuses_impossible_boards() {
        let mut game = Game::default();
        game.play_uci("e2e4").unwrap();
        let before = game.snapshot().clone();

        // Parsing checks the piece counts too
        let crowded = "k3Q1QQ/2Q2Q2/7Q/1Q3Q2/1Q5Q/2Q5/QQ3QQ1/3Q1Q1K";
        assert!(Board::from_fen(crowded).is_err());

        let mut board = Board::new();
        for (i, square) in Square::iter().take(17).enumerate() {
            let piece = if i == 0 { Piece::WHITE_KING } else { Piece::WHITE_QUEEN };
            board.place(piece, square);
        }
        board.place(Piece::BLACK_KING, "e1".parse().unwrap());

        assert!(matches!(
            game.set_position(board, Color::White),
            Err(GameError::InvalidPosition(_))
        ));

        let mut two_kings = Board::new();
        two_kings.place(Piece::BLACK_KING, "a8".parse().unwrap());
        two_kings.place(Piece::BLACK_KING, "h8".parse().unwrap());
        two_kings.place(Piece::WHITE_KING, "e1".parse().unwrap());
        assert!(matches!(
            game.set_position(two_kings, Color::Black),
            Err(GameError::InvalidPosition(_))
        ));

        assert_eq!(game.snapshot(), &before);
        assert_eq!(game.history().len(), 1);
    }
}
