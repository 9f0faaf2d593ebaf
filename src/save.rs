/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Board, Clock, Color, Game, GameConfig, GameError, GameResult, GameStatus, Mode, Piece,
    Snapshot, Square, Style, MAX_LEVEL, MIN_LEVEL,
};

/// A board as saved: rows of piece codes (`"wp"`, `"bk"`, ...), `""` for empty squares.
type SavedBoard = Vec<Vec<String>>;

/// One entry of a saved game's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SavedSnapshot {
    board: SavedBoard,
    turn: Color,
    #[serde(rename = "tW")]
    white_time: u32,
    #[serde(rename = "tB")]
    black_time: u32,
    pgn: Vec<String>,
    #[serde(rename = "moveStr", default, skip_serializing_if = "Option::is_none")]
    move_str: Option<String>,
}

/// The top level of a save file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveData {
    board: SavedBoard,
    turn: Color,
    history: Vec<SavedSnapshot>,
    pgn: Vec<String>,
    mode: Mode,
    level: u8,
    style: Style,
    #[serde(rename = "tW")]
    white_time: u32,
    #[serde(rename = "tB")]
    black_time: u32,
    #[serde(rename = "moveStr", default, skip_serializing_if = "Option::is_none")]
    move_str: Option<String>,
}

fn corrupt(reason: impl Into<String>) -> GameError {
    GameError::CorruptSaveData(reason.into())
}

fn save_board(board: &Board) -> SavedBoard {
    (0..Square::SIDE)
        .map(|row| {
            (0..Square::SIDE)
                .map(|col| {
                    board
                        .piece_at(Square::new(row, col))
                        .map(|piece| piece.code())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect()
}

fn load_board(rows: &SavedBoard) -> GameResult<Board> {
    if rows.len() != Square::SIDE as usize {
        return Err(corrupt(format!("board has {} rows, expected 8", rows.len())));
    }

    let mut board = Board::new();
    for (row, codes) in rows.iter().enumerate() {
        if codes.len() != Square::SIDE as usize {
            return Err(corrupt(format!(
                "board row {row} has {} squares, expected 8",
                codes.len()
            )));
        }

        for (col, code) in codes.iter().enumerate() {
            if code.is_empty() {
                continue;
            }
            let piece = Piece::from_code(code)
                .map_err(|e| corrupt(format!("board row {row} column {col}: {e}")))?;
            board.place(piece, Square::new(row as u8, col as u8));
        }
    }

    board
        .validate()
        .map_err(|e| corrupt(format!("board: {e}")))?;
    Ok(board)
}

/// Files written before book lines were saved are out of book, unless nothing has been played yet.
fn load_book_line(
    saved: Option<&String>,
    board: &Board,
    turn: Color,
    pgn: &[String],
) -> Option<String> {
    saved.cloned().or_else(|| {
        (pgn.is_empty() && turn.is_white() && *board == Board::startpos()).then(String::new)
    })
}

impl SavedSnapshot {
    fn new(snapshot: &Snapshot) -> Self {
        Self {
            board: save_board(&snapshot.board),
            turn: snapshot.turn,
            white_time: snapshot.clock.white,
            black_time: snapshot.clock.black,
            pgn: snapshot.pgn.clone(),
            move_str: snapshot.book_line.clone(),
        }
    }

    fn load(&self) -> GameResult<Snapshot> {
        let board = load_board(&self.board)?;
        Ok(Snapshot {
            book_line: load_book_line(self.move_str.as_ref(), &board, self.turn, &self.pgn),
            board,
            turn: self.turn,
            clock: Clock {
                white: self.white_time,
                black: self.black_time,
            },
            pgn: self.pgn.clone(),
        })
    }
}

impl SaveData {
    fn new(game: &Game) -> Self {
        let current = SavedSnapshot::new(game.snapshot());
        let config = game.config();

        Self {
            board: current.board,
            turn: current.turn,
            history: game.history().iter().map(SavedSnapshot::new).collect(),
            pgn: current.pgn,
            mode: config.mode,
            level: config.level,
            style: config.style,
            white_time: current.white_time,
            black_time: current.black_time,
            move_str: current.move_str,
        }
    }

    /// Validates everything and builds the state to restore.
    fn load(self, base: &GameConfig) -> GameResult<(Snapshot, Vec<Snapshot>, GameConfig)> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.level) {
            return Err(corrupt(format!(
                "level must be between {MIN_LEVEL} and {MAX_LEVEL}, got {}",
                self.level
            )));
        }

        let history = self
            .history
            .iter()
            .enumerate()
            .map(|(i, snapshot)| {
                snapshot.load().map_err(|e| match e {
                    GameError::CorruptSaveData(reason) => corrupt(format!("history[{i}]: {reason}")),
                    other => other,
                })
            })
            .collect::<GameResult<Vec<_>>>()?;

        let current = SavedSnapshot {
            board: self.board,
            turn: self.turn,
            white_time: self.white_time,
            black_time: self.black_time,
            pgn: self.pgn,
            move_str: self.move_str,
        }
        .load()?;

        let config = GameConfig {
            mode: self.mode,
            level: self.level,
            style: self.style,
            ..*base
        };

        Ok((current, history, config))
    }
}

impl Game {
    /// Serializes this game, history included, to JSON.
    ///
    /// # Example
    /// ```
    /// # use newt::Game;
    /// let json = Game::default().to_json().unwrap();
    /// assert!(json.contains("\"turn\":\"w\""));
    /// assert!(json.contains("\"tW\":600"));
    /// ```
    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string(&SaveData::new(self))?)
    }

    /// Replaces this game with the one described by `json`.
    ///
    /// The clock length and book verification settings are kept. Nothing changes if `json` is
    /// not a valid game.
    pub fn load_json(&mut self, json: &str) -> GameResult<()> {
        if matches!(self.status(), GameStatus::Evaluating(_)) {
            return Err(GameError::Busy);
        }

        let loaded = serde_json::from_str::<SaveData>(json)
            .map_err(|e| corrupt(e.to_string()))
            .and_then(|data| data.load(&self.config));

        let (current, history, config) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::warn!(error = %e, "rejected save data");
                return Err(e);
            }
        };

        self.config = config;
        self.restore(current, history);
        tracing::info!(
            moves = self.history.len(),
            mode = %self.config.mode,
            level = self.config.level,
            style = %self.config.style,
            "game loaded"
        );
        Ok(())
    }

    /// Writes this game to the file at `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> GameResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), "game saved");
        Ok(())
    }

    /// Replaces this game with the one saved in the file at `path`.
    pub fn load(&mut self, path: impl AsRef<Path>) -> GameResult<()> {
        let json = fs::read_to_string(path)?;
        self.load_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played_game() -> Game {
        let mut game = Game::with_seed(
            GameConfig {
                mode: Mode::Bot,
                level: 2,
                style: Style::Aggressive,
                ..Default::default()
            },
            11,
        );
        game.play_uci("e2e4").unwrap();
        game.play_bot_move().unwrap();
        game.tick();
        game.play_uci("g1f3").unwrap();
        game.play_bot_move().unwrap();
        game
    }

    #[test]
    fn test_round_trip() {
        let game = played_game();
        let json = game.to_json().unwrap();

        let mut loaded = Game::default();
        loaded.load_json(&json).unwrap();

        assert_eq!(loaded.snapshot(), game.snapshot());
        assert_eq!(loaded.history(), game.history());
        assert_eq!(loaded.config(), game.config());
        assert_eq!(loaded.status(), game.status());
        assert_eq!(loaded.to_json().unwrap(), json);
    }

    #[test]
    fn test_format_field_names() {
        let json = played_game().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        for key in ["board", "turn", "history", "pgn", "mode", "level", "style", "tW", "tB"] {
            assert!(value.get(key).is_some(), "missing {key:?} in {json}");
        }
        assert_eq!(value["mode"], "bot");
        assert_eq!(value["style"], "aggressive");
        assert_eq!(value["board"][0][4], "bk");
        assert_eq!(value["board"][4][0], "");
        assert_eq!(value["history"][0]["board"][6][4], "wp");
        assert_eq!(value["history"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_corrupt_data_leaves_state_untouched() {
        let mut game = played_game();
        let good = game.to_json().unwrap();
        let before = game.snapshot().clone();

        let mut bad_piece: serde_json::Value = serde_json::from_str(&good).unwrap();
        bad_piece["board"][0][0] = "xq".into();

        let mut short_row: serde_json::Value = serde_json::from_str(&good).unwrap();
        short_row["history"][1]["board"][2] = serde_json::json!(["", ""]);

        let mut bad_level: serde_json::Value = serde_json::from_str(&good).unwrap();
        bad_level["level"] = 9.into();

        let mut bad_turn: serde_json::Value = serde_json::from_str(&good).unwrap();
        bad_turn["turn"] = "white".into();

        let mut missing: serde_json::Value = serde_json::from_str(&good).unwrap();
        missing.as_object_mut().unwrap().remove("tB");

        let mut two_kings: serde_json::Value = serde_json::from_str(&good).unwrap();
        two_kings["history"][0]["board"][4][0] = "bk".into();

        let mut crowded: serde_json::Value = serde_json::from_str(&good).unwrap();
        for col in 0..8 {
            crowded["history"][0]["board"][4][col] = "wq".into();
        }

        for json in [
            bad_piece.to_string(),
            short_row.to_string(),
            bad_level.to_string(),
            bad_turn.to_string(),
            missing.to_string(),
            two_kings.to_string(),
            crowded.to_string(),
            String::from("{"),
            String::from("[]"),
        ] {
            let res = game.load_json(&json);
            assert!(
                matches!(res, Err(GameError::CorruptSaveData(_))),
                "{json} should be corrupt, got {res:?}"
            );
            assert_eq!(game.snapshot(), &before);
            assert_eq!(game.history().len(), 4);
        }
    }

    #[test]
    fn test_files_without_book_lines() {
        let mut game = played_game();
        let mut value: serde_json::Value = serde_json::from_str(&game.to_json().unwrap()).unwrap();
        value.as_object_mut().unwrap().remove("moveStr");
        for snapshot in value["history"].as_array_mut().unwrap() {
            snapshot.as_object_mut().unwrap().remove("moveStr");
        }

        game.load_json(&value.to_string()).unwrap();
        assert_eq!(game.book_line(), None);
        // Nothing had been played in the first snapshot yet
        assert_eq!(game.history()[0].book_line.as_deref(), Some(""));
        assert_eq!(game.history()[1].book_line, None);
    }

    #[test]
    fn test_file_round_trip() {
        let game = played_game();
        let path = std::env::temp_dir().join(format!("newt-save-{}.json", std::process::id()));

        game.save(&path).unwrap();
        let mut loaded = Game::default();
        loaded.load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.snapshot(), game.snapshot());

        let res = loaded.load(&path);
        assert!(matches!(res, Err(GameError::Io(_))));
    }
}
