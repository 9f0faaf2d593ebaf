/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use newt::{
    Board, Color, DecisionSource, Evaluator, Game, GameConfig, GameError, GameStatus, Mode,
    Outcome, Score, Search, SearchConfig, Style, TerminalReason,
};

fn bot_game(level: u8) -> Game {
    Game::with_seed(
        GameConfig {
            mode: Mode::Bot,
            level,
            ..Default::default()
        },
        2024,
    )
}

fn play_all(game: &mut Game, moves: &[&str]) {
    for mv in moves {
        game.play_uci(mv)
            .unwrap_or_else(|e| panic!("{mv} was rejected: {e}"));
    }
}

#[test]
fn test_standard_position_has_twenty_moves() {
    let game = Game::default();
    assert_eq!(game.legal_moves().len(), 20);
    assert_eq!(game.status(), GameStatus::AwaitingMove(Color::White));
}

#[test]
fn test_apply_then_undo_restores_everything() {
    let mut game = Game::default();
    play_all(&mut game, &["e2e4", "e7e5", "g1f3"]);
    game.tick();
    let before = game.snapshot().clone();

    game.play_uci("b8c6").unwrap();
    assert_ne!(game.snapshot(), &before);

    game.undo().unwrap();
    assert_eq!(game.snapshot(), &before);
    assert_eq!(game.board(), &before.board);
    assert_eq!(game.turn(), Color::Black);
    assert_eq!(game.clock().black, before.clock.black);
    assert_eq!(game.pgn(), ["e4", "e5", "Nf3"]);
}

#[test]
fn test_scholars_mate_is_checkmate() {
    let mut game = Game::default();
    play_all(
        &mut game,
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    );

    assert_eq!(
        game.status(),
        GameStatus::Terminal(Outcome {
            reason: TerminalReason::Checkmate,
            winner: Some(Color::White),
        })
    );
    assert!(game.legal_moves().is_empty());
    assert!(matches!(game.play_uci("e8f7"), Err(GameError::GameOver)));
}

#[test]
fn test_stalemate_is_a_draw() {
    let mut game = Game::default();
    // White queen to b6 leaves the lone black king with no moves
    game.set_position(Board::from_fen("k7/8/8/1Q6/8/8/8/K7").unwrap(), Color::White)
        .unwrap();
    game.play_uci("b5b6").unwrap();

    assert_eq!(
        game.status(),
        GameStatus::Terminal(Outcome {
            reason: TerminalReason::Stalemate,
            winner: None,
        })
    );
}

#[test]
fn test_bot_plays_from_the_book_then_searches() {
    let mut game = bot_game(2);

    game.play_uci("e2e4").unwrap();
    let reply = game.play_bot_move().unwrap();
    assert_eq!(reply.source(), DecisionSource::Book);
    assert!(["e7e5", "c7c5"].contains(&reply.mv().to_string().as_str()));

    game.play_uci("g1f3").unwrap();
    let reply = game.play_bot_move().unwrap();
    assert!(matches!(reply.source(), DecisionSource::Search(_)));
    assert_eq!(reply.mv().piece().color(), Color::Black);
    assert_eq!(game.history().len(), 4);
    assert_eq!(game.turn(), Color::White);
}

#[test]
fn test_bot_takes_a_free_queen() {
    let mut game = bot_game(2);
    game.set_position(
        Board::from_fen("4k3/8/8/3q4/4Q3/8/8/4K3").unwrap(),
        Color::White,
    )
    .unwrap();
    // Hanging the queen on d4
    game.play_uci("e4d4").unwrap();

    let reply = game.play_bot_move().unwrap();
    assert_eq!(reply.mv(), "d5d4");
}

#[test]
fn test_search_leaves_the_board_untouched() {
    let mut board = Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R").unwrap();
    let before = board;

    let result = Search::new(
        &mut board,
        Color::White,
        SearchConfig {
            depth: 3,
            style: Style::Standard,
        },
    )
    .start();

    assert!(result.bestmove.is_some());
    assert!(result.nodes > 0);
    assert_eq!(board, before);
}

#[test]
fn test_evaluation_favors_black() {
    // Black is a rook up
    let board = Board::from_fen("r3k3/8/8/8/8/8/8/4K3").unwrap();
    let score = Evaluator::new(&board).eval();
    assert_eq!(score, Score::from_centipawns(500));
    assert_eq!(Evaluator::new(&board).eval_for(Color::White), -score);

    let aggressive = Evaluator::new(&board).with_style(Style::Aggressive).eval();
    assert_eq!(aggressive, Score::from_centipawns(550));
}

#[test]
fn test_save_and_load_resume_the_game() {
    let mut game = bot_game(1);
    game.play_uci("d2d4").unwrap();
    game.play_bot_move().unwrap();
    let json = game.to_json().unwrap();

    let mut resumed = Game::default();
    resumed.load_json(&json).unwrap();
    assert_eq!(resumed.snapshot(), game.snapshot());
    assert_eq!(resumed.config().mode, Mode::Bot);

    // Undo in the resumed game goes back to the start
    resumed.undo().unwrap();
    assert_eq!(resumed.board(), &Board::default());
    assert_eq!(resumed.book_line(), Some(""));
}

#[test]
fn test_corrupt_save_is_rejected() {
    let mut game = Game::default();
    game.play_uci("e2e4").unwrap();
    let before = game.snapshot().clone();

    let res = game.load_json(r#"{"board": [], "turn": "w"}"#);
    assert!(matches!(res, Err(GameError::CorruptSaveData(_))));
    assert_eq!(game.snapshot(), &before);
}

#[test]
fn test_running_out_of_time_loses() {
    let mut game = Game::new(GameConfig {
        time_control: 3,
        ..Default::default()
    });
    game.play_uci("e2e4").unwrap();

    assert_eq!(game.tick(), None);
    assert_eq!(game.tick(), None);
    let outcome = game.tick().unwrap();
    assert_eq!(
        outcome,
        Outcome {
            reason: TerminalReason::Timeout,
            winner: Some(Color::White),
        }
    );
    assert_eq!(game.clock().white, 3);
    assert!(game.is_over());
}
