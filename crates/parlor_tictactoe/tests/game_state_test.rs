//! Tests for the tic-tac-toe state machine.

use parlor_tictactoe::{
    Board, GameResult, GameState, Mark, Move, MoveError, Position, Square, Turn, apply_move,
    is_game_ended, rules::LINES,
};

fn mv(row: i64, col: i64, player: &str) -> Move {
    Move::from_parts(row, col, player).expect("well-formed move")
}

fn play(game: &mut GameState, moves: &[(i64, i64, &str)]) {
    for &(row, col, player) in moves {
        assert!(game.try_move(mv(row, col, player)), "move ({row}, {col}, {player}) rejected");
    }
}

#[test]
fn test_reset_gives_empty_board_and_x_to_move() {
    let mut game = GameState::new();
    play(&mut game, &[(0, 0, "x"), (2, 2, "o")]);
    game.reset();

    assert_eq!(*game.board(), Board::new());
    assert!(game.board().rows().iter().flatten().all(|sq| *sq == Square::Empty));
    assert_eq!(game.turn(), Turn::ToMove(Mark::X));
    assert!(game.history().is_empty());
}

#[test]
fn test_accepted_move_occupies_cell_and_flips_turn() {
    let mut game = GameState::new();
    assert!(game.try_move(mv(1, 2, "x")));

    let pos = Position::new(1, 2).unwrap();
    assert_eq!(game.board().get(pos), Square::Occupied(Mark::X));
    assert_eq!(game.board().marked(), 1);
    assert_eq!(game.turn(), Turn::ToMove(Mark::O));
}

#[test]
fn test_occupied_cell_always_rejected() {
    let mut game = GameState::new();
    play(&mut game, &[(0, 0, "x")]);
    let before = game.clone();

    assert!(!game.try_move(mv(0, 0, "o")));
    assert!(!game.try_move(mv(0, 0, "x")));
    assert_eq!(game, before);
}

#[test]
fn test_wrong_player_rejected() {
    let mut game = GameState::new();
    assert!(matches!(
        game.apply_move(mv(1, 1, "o")),
        Err(MoveError::WrongTurn { expected: Mark::X, found: Mark::O })
    ));
    assert_eq!(game.board().marked(), 0);
}

#[test]
fn test_example_top_row_win() {
    let mut game = GameState::new();
    play(
        &mut game,
        &[(0, 0, "x"), (1, 1, "o"), (0, 1, "x"), (1, 0, "o"), (0, 2, "x")],
    );

    let row0 = serde_json::to_value(game.board()).unwrap()[0].clone();
    assert_eq!(row0, serde_json::json!(["x", "x", "x"]));
    assert!(is_game_ended(game.board()));
    assert_eq!(
        game.result(),
        GameResult::Won {
            winner: Mark::X,
            line: LINES[0]
        }
    );
    assert_eq!(game.turn(), Turn::Ended);
    assert_eq!(serde_json::to_string(&game.turn()).unwrap(), "\"\"");
}

#[test]
fn test_column_and_diagonal_wins() {
    let mut game = GameState::new();
    play(
        &mut game,
        &[(0, 0, "x"), (0, 1, "o"), (1, 0, "x"), (1, 1, "o"), (2, 2, "x"), (2, 1, "o")],
    );
    assert_eq!(
        game.result(),
        GameResult::Won {
            winner: Mark::O,
            line: LINES[4]
        }
    );

    let mut game = GameState::new();
    play(
        &mut game,
        &[(0, 2, "x"), (0, 0, "o"), (1, 1, "x"), (0, 1, "o"), (2, 0, "x")],
    );
    assert_eq!(
        game.result(),
        GameResult::Won {
            winner: Mark::X,
            line: LINES[7]
        }
    );
    assert!(game.is_ended());
}

#[test]
fn test_full_board_without_line_is_draw() {
    let mut game = GameState::new();
    // x o x / x o o / o x x
    play(
        &mut game,
        &[
            (0, 0, "x"),
            (0, 1, "o"),
            (0, 2, "x"),
            (1, 1, "o"),
            (1, 0, "x"),
            (1, 2, "o"),
            (2, 1, "x"),
            (2, 0, "o"),
            (2, 2, "x"),
        ],
    );
    assert_eq!(game.result(), GameResult::Draw);
    assert_eq!(game.turn(), Turn::Ended);
}

#[test]
fn test_every_move_rejected_after_end() {
    let mut game = GameState::new();
    play(
        &mut game,
        &[(0, 0, "x"), (1, 1, "o"), (0, 1, "x"), (1, 0, "o"), (0, 2, "x")],
    );
    let finished = game.clone();

    for pos in Position::ALL {
        for player in [Mark::X, Mark::O] {
            assert_eq!(
                game.apply_move(Move::new(player, pos)),
                Err(MoveError::GameOver)
            );
        }
    }
    assert_eq!(game, finished);
}

#[test]
fn test_pure_apply_matches_owned_state() {
    let moves = [mv(1, 1, "x"), mv(0, 0, "o"), mv(2, 2, "x")];
    let mut game = GameState::new();
    let (mut board, mut turn) = (Board::new(), Turn::default());

    for m in moves {
        let applied = apply_move(&board, turn, m);
        assert_eq!(applied.accepted, game.try_move(m));
        board = applied.board;
        turn = applied.turn;
    }
    assert_eq!(&board, game.board());
    assert_eq!(turn, game.turn());
}

#[test]
fn test_malformed_input_is_rejection() {
    assert!(Move::parse("a", "0", "x").is_err());
    assert!(Move::parse("0", "0", "X").is_err());
    assert!(Move::parse("-1", "0", "x").is_err());
    assert!(Move::from_parts(0, 3, "o").is_err());
}
