/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{path::PathBuf, str::FromStr};

use anyhow::{bail, Result};
use clap::Parser;

use crate::{
    Color, Decision, GameResult, Mode, Square, Style, DEFAULT_TIME_CONTROL, MAX_LEVEL, MIN_LEVEL,
};

/// A command to be sent to the engine.
#[derive(Debug, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<COMMAND>")
)]
pub enum EngineCommand {
    /// Start a new game from the standard position.
    New {
        /// Who plays Black.
        #[arg(short, long, value_enum, default_value_t = Mode::Pvp)]
        mode: Mode,

        /// Engine difficulty, used as its search depth.
        #[arg(
            short,
            long,
            default_value_t = MIN_LEVEL,
            value_parser = clap::value_parser!(u8).range(MIN_LEVEL as i64..=MAX_LEVEL as i64)
        )]
        level: u8,

        /// Engine personality.
        #[arg(short, long, value_enum, default_value_t = Style::Standard)]
        style: Style,

        /// Seconds on each side's clock.
        #[arg(short, long, default_value_t = DEFAULT_TIME_CONTROL)]
        time: u32,
    },

    /// Play a move in coordinate notation, such as `e2e4`.
    #[command(alias = "m")]
    Move { mv: String },

    /// Take back the last move. In bot mode, takes back the engine's reply as well.
    Undo,

    /// Print the board, clocks, and game status.
    #[command(alias = "d")]
    Display,

    /// Show all legal moves for the side to move, or for the piece on a specific square.
    Moves { square: Option<Square> },

    /// Print an evaluation of the current position, from the perspective of the side to move.
    Eval {
        /// If set, the contribution of every piece will be printed as well.
        #[arg(short, long, default_value = "false")]
        pretty: bool,
    },

    /// Print how many White pieces minus how many Black pieces attack each square.
    #[command(alias = "heat")]
    Heatmap,

    /// Set up a position from the piece placement of a FEN string. Clears the history.
    Position {
        fen: String,

        /// Side to move, `w` or `b`.
        #[arg(default_value = "w")]
        turn: Side,
    },

    /// Performs a perft on the current position at the supplied depth, printing total node count.
    Perft { depth: usize },

    /// Performs a split perft on the current position at the supplied depth.
    #[command(alias = "sperft")]
    Splitperft { depth: usize },

    /// Write the game to a JSON file.
    Save { path: PathBuf },

    /// Replace the game with one read from a JSON file.
    Load { path: PathBuf },

    /// Print the game settings and status.
    Status,

    /// Quit the engine.
    #[command(alias = "quit")]
    Exit,

    /// One second has passed on the side to move's clock.
    #[command(skip)]
    Tick,

    /// The engine has finished choosing a move.
    #[command(skip)]
    BotDecision { result: GameResult<Decision> },
}

impl FromStr for EngineCommand {
    type Err = clap::Error;
    /// Attempt to parse an [`EngineCommand`] from a line of input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}

/// Side to move, as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Side(pub Color);

impl FromStr for Side {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Self(Color::from_char(c)?)),
            _ => bail!("Side to move must be either 'w' or 'b'. Found {s:?}"),
        }
    }
}
