/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt, io,
    panic::{self, AssertUnwindSafe},
    sync::mpsc::{channel, Receiver, Sender},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::{
    attack_map, legal_moves_from, perft_generic, Board, Decision, DecisionSource, EngineCommand,
    Evaluator, Game, GameConfig, GameError, GameObserver, GameResult, GameStatus, Move, MoveList,
    Outcome, Side, Snapshot, Square,
};

/// How often the side to move loses a second.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Prints game events to `stdout` as they happen.
#[derive(Debug, Clone, Copy, Default)]
struct Printer;

impl GameObserver for Printer {
    fn on_move_applied(&mut self, _mv: &Move, notation: &str, snapshot: &Snapshot) {
        println!("{} played {notation}", snapshot.turn.opponent().name());
    }

    fn on_terminal(&mut self, outcome: &Outcome) {
        println!("Game over: {outcome}");
    }

    fn on_advisory(&mut self, message: &str) {
        println!("{message}");
    }
}

/// The Newt chess game, driven by commands from `stdin`.
#[derive(Debug)]
pub struct Engine {
    /// The game being played.
    game: Game,

    /// One half of a channel, responsible for sending commands to the engine to execute.
    sender: Sender<EngineCommand>,

    /// One half of a channel, responsible for receiving commands for the engine to execute.
    receiver: Receiver<EngineCommand>,

    /// Handle to the thread choosing the engine's move, if one is running.
    worker: Option<JoinHandle<()>>,

    /// Set when the engine failed to choose a move, until the user changes the position.
    stalled: bool,
}

impl Engine {
    /// Constructs a new [`Engine`] instance to be executed with [`Engine::run`].
    pub fn new() -> Self {
        let (sender, receiver) = channel();

        let mut game = Game::default();
        game.set_observer(Printer);

        Self {
            game,
            sender,
            receiver,
            worker: None,
            stalled: false,
        }
    }

    /// Returns a string of the engine's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// Sends an [`EngineCommand`] to the engine to be executed.
    pub fn send_command(&self, command: EngineCommand) {
        // Safe unwrap: `send` can only fail if its corresponding receiver doesn't exist,
        //  and our engine's `Receiver` lives exactly as long as the engine does.
        self.sender.send(command).unwrap();
    }

    /// Execute the main event loop for the engine.
    ///
    /// This function spawns a thread to handle input from `stdin`, another to run the clocks, and
    /// waits on received commands.
    pub fn run(&mut self) -> Result<()> {
        println!("{}", self.name());

        // Spawn a separate thread for handling user input
        let sender = self.sender.clone();
        thread::spawn(|| {
            if let Err(err) = input_handler(sender) {
                tracing::error!("Input handler thread stopping after fatal error: {err}");
            }
        });

        // The clocks run on their own so they keep going while the engine thinks
        let sender = self.sender.clone();
        thread::spawn(move || loop {
            thread::sleep(TICK_INTERVAL);
            if sender.send(EngineCommand::Tick).is_err() {
                break;
            }
        });

        // Loop on user input
        while let Ok(cmd) = self.receiver.recv() {
            match cmd {
                EngineCommand::Exit => break,

                EngineCommand::Tick => {
                    self.game.tick();
                }

                EngineCommand::BotDecision { result } => self.finish_bot_move(result),

                // Keep running, even on error
                cmd => {
                    if let Err(e) = self.execute(cmd) {
                        tracing::warn!("{e:#}");
                    }
                }
            }

            self.start_bot_move();
        }

        Ok(())
    }

    /// Executes a single command typed by the user.
    fn execute(&mut self, cmd: EngineCommand) -> Result<()> {
        match cmd {
            EngineCommand::New {
                mode,
                level,
                style,
                time,
            } => self.new_game(GameConfig {
                mode,
                level,
                style,
                time_control: time,
                ..Default::default()
            })?,

            EngineCommand::Move { mv } => self.game.play_uci(&mv)?,

            EngineCommand::Undo => {
                self.game.undo()?;
                self.stalled = false;
                self.display();
            }

            EngineCommand::Display => self.display(),

            EngineCommand::Moves { square } => self.moves(square),

            EngineCommand::Eval { pretty } => self.eval(pretty),

            EngineCommand::Heatmap => println!("{}", Heatmap(self.game.board())),

            EngineCommand::Position { fen, turn: Side(turn) } => {
                self.ensure_idle()?;
                let board = Board::from_fen(&fen)?;
                self.game.set_position(board, turn)?;
                self.stalled = false;
                self.display();
            }

            EngineCommand::Perft { depth } => self.perft::<false>(depth),

            EngineCommand::Splitperft { depth } => self.perft::<true>(depth),

            EngineCommand::Save { path } => {
                self.game
                    .save(&path)
                    .with_context(|| format!("Failed to save game to {}", path.display()))?;
                println!("Saved to {}", path.display());
            }

            EngineCommand::Load { path } => {
                self.game
                    .load(&path)
                    .with_context(|| format!("Failed to load game from {}", path.display()))?;
                self.stalled = false;
                self.display();
            }

            EngineCommand::Status => self.status(),

            EngineCommand::Exit | EngineCommand::Tick | EngineCommand::BotDecision { .. } => {
                bail!("This command is handled by the main loop")
            }
        }

        Ok(())
    }

    /// Replaces the game with a fresh one using `config`.
    fn new_game(&mut self, config: GameConfig) -> Result<()> {
        self.ensure_idle()?;
        config.validate()?;

        self.game = Game::new(config);
        self.game.set_observer(Printer);
        self.stalled = false;
        self.display();
        Ok(())
    }

    /// Fails if the engine is still choosing a move.
    fn ensure_idle(&self) -> Result<()> {
        if self.worker.is_some() {
            bail!("The engine is still thinking");
        }
        Ok(())
    }

    /// Hands the engine's move choice to a worker thread, if it is the engine's turn.
    fn start_bot_move(&mut self) {
        if self.worker.is_some() || self.stalled || !self.game.is_bot_turn() {
            return;
        }

        let evaluation = match self.game.begin_evaluation() {
            Ok(evaluation) => evaluation,
            Err(e) => {
                tracing::warn!("Could not start the engine: {e}");
                return;
            }
        };

        println!("Thinking...");
        let sender = self.sender.clone();
        self.worker = Some(thread::spawn(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(|| evaluation.run()))
                .unwrap_or(Err(GameError::EngineFailed));
            // The engine may have exited while we were thinking
            let _ = sender.send(EngineCommand::BotDecision { result });
        }));
    }

    /// Plays the move chosen by the worker thread.
    fn finish_bot_move(&mut self, result: GameResult<Decision>) {
        if let Some(handle) = self.worker.take() {
            let id = handle.thread().id();
            if handle.join().is_err() {
                tracing::error!("Failed to join on thread {id:?}");
            }
        }

        match self.game.finish_evaluation(result) {
            Ok(decision) => {
                if let DecisionSource::Search(result) = decision.source() {
                    tracing::debug!(
                        nodes = result.nodes,
                        score = %result.score,
                        "search finished"
                    );
                }
                self.display();
            }
            Err(GameError::EngineFailed) => {
                self.stalled = true;
                tracing::error!(
                    "The engine failed to choose a move. Use `undo`, `new`, `position` or `load` to continue"
                );
            }
            Err(e) => tracing::warn!("Discarded the engine's move: {e}"),
        }
    }

    /// Executes the `display` command, printing the current position.
    fn display(&self) {
        println!("{}", self.game);
    }

    /// Executes the `moves` command.
    fn moves(&self, square: Option<Square>) {
        let moves = if let Some(square) = square {
            legal_moves_from(self.game.board(), square)
                .into_iter()
                .filter(|mv| mv.piece().color() == self.game.turn())
                .collect::<MoveList>()
        } else {
            self.game.legal_moves()
        };

        // If there are none, print "(none)"
        let moves_string = if moves.is_empty() {
            String::from("(none)")
        } else {
            // Otherwise, join them by comma-space
            moves
                .into_iter()
                .map(|mv| mv.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("{moves_string}");
    }

    /// Executes the `eval` command, printing an evaluation of the current position.
    fn eval(&self, pretty: bool) {
        let evaluator = Evaluator::new(self.game.board()).with_style(self.game.config().style);
        if pretty {
            println!("{evaluator}\n");
        }

        println!(
            "{} ({})",
            evaluator.eval_for(self.game.turn()),
            self.game.turn().name()
        );
    }

    /// Executes the `perft` and `splitperft` commands.
    fn perft<const SPLIT: bool>(&self, depth: usize) {
        let now = Instant::now();
        let nodes = perft_generic::<true, SPLIT>(self.game.board(), self.game.turn(), depth);
        let elapsed = now.elapsed();

        let nps = (nodes as f64 / elapsed.as_secs_f64().max(f64::EPSILON)) as u64;
        if SPLIT {
            println!();
        }
        println!("{nodes} nodes in {}ms ({nps} nps)", elapsed.as_millis());
    }

    /// Executes the `status` command.
    fn status(&self) {
        let config = self.game.config();
        println!(
            "Mode: {} | Level: {} | Style: {}",
            config.mode, config.level, config.style
        );
        println!("{}", self.game.clock());
        match self.game.status() {
            GameStatus::AwaitingMove(color) => println!("{} to move", color.name()),
            GameStatus::Evaluating(color) => println!("Engine is thinking for {}", color.name()),
            GameStatus::Terminal(outcome) => println!("Game over: {outcome}"),
        }
        match self.game.book_line() {
            Some(_) => println!("In book, {} moves played", self.game.pgn().len()),
            None => println!("Out of book, {} moves played", self.game.pgn().len()),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints a board's attack map, White attackers minus Black attackers on each square.
struct Heatmap<'a>(&'a Board);

impl fmt::Display for Heatmap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = attack_map(self.0);
        for (row, counts) in map.iter().enumerate() {
            write!(f, "{} |", Square::new(row as u8, 0).rank_char())?;
            for count in counts {
                write!(f, " {count:>+2}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for col in 0..Square::SIDE {
            write!(f, "  {}", Square::new(0, col).file_char())?;
        }
        Ok(())
    }
}

/// Loops endlessly to await input via `stdin`, sending all successfully-parsed commands through the supplied `sender`.
fn input_handler(sender: Sender<EngineCommand>) -> Result<()> {
    let mut buffer = String::with_capacity(256);

    loop {
        // Clear the buffer, read input, and trim the trailing newline
        buffer.clear();
        let bytes = io::stdin()
            .read_line(&mut buffer)
            .context("Failed to read line when parsing commands")?;

        // For ctrl + d
        if 0 == bytes {
            sender
                .send(EngineCommand::Exit)
                .context("Failed to send 'exit' command after receiving empty input")?;

            return Ok(());
        }

        // Trim any leading/trailing whitespace
        let buf = buffer.trim();

        // Ignore empty lines
        if buf.is_empty() {
            continue;
        }

        match EngineCommand::try_parse_from(buf.split_ascii_whitespace()) {
            // If successful, send the command to the engine
            Ok(cmd) => sender
                .send(cmd)
                .context("Failed to send command to engine")?,

            // If an invalid command was received, just print the error and continue running
            Err(err) => eprintln!("{err}"),
        }
    }
}
