//! Tests for move preconditions and game invariants.

use tictactoe_ledger::{
    Board, CellIsEmpty, Game, GameError, GameInvariants, GameIsActive, GameSnapshot, GameStatus,
    InvariantSet, IsParticipant, LegalMove, MoveRecord, MoveResult, PlayerName, PlayersTurn,
    Position, PositionInRange, Symbol, ValidatedMove,
};

fn name(s: &str) -> PlayerName {
    PlayerName::from(s)
}

fn new_game() -> Game {
    Game::start(name("alice"), name("bob")).unwrap()
}

#[test]
fn test_individual_checks() {
    let game = new_game();

    assert_eq!(PositionInRange::check(9), Ok(Position::BottomRight));
    assert_eq!(PositionInRange::check(0), Err(GameError::OutOfRange(0)));
    assert_eq!(GameIsActive::check(&game), Ok(()));
    assert_eq!(IsParticipant::check(&game, &name("bob")), Ok(Symbol::O));
    assert_eq!(PlayersTurn::check(&game, &name("alice")), Ok(()));
    assert_eq!(
        PlayersTurn::check(&game, &name("bob")),
        Err(GameError::OutOfTurn(name("bob")))
    );
    assert_eq!(CellIsEmpty::check(&game, Position::Center), Ok(()));
}

#[test]
fn test_legal_move_validates() {
    let game = new_game();
    assert_eq!(
        LegalMove::check(&game, &name("alice"), 5),
        Ok(ValidatedMove {
            position: Position::Center,
            symbol: Symbol::X,
        })
    );
}

#[test]
fn test_legal_move_reports_first_failure() {
    let (game, _) = new_game().apply_move(&name("alice"), 5).unwrap();

    // Stranger, wrong turn and occupied cell together: participant check wins.
    assert_eq!(
        LegalMove::check(&game, &name("carol"), 5),
        Err(GameError::NotAParticipant(name("carol")))
    );
    // Wrong turn beats occupied cell.
    assert_eq!(
        LegalMove::check(&game, &name("alice"), 5),
        Err(GameError::OutOfTurn(name("alice")))
    );
    // Range beats everything.
    assert_eq!(
        LegalMove::check(&game, &name("carol"), 10),
        Err(GameError::OutOfRange(10))
    );
    assert_eq!(
        LegalMove::check(&game, &name("bob"), 5),
        Err(GameError::CellOccupied(Position::Center))
    );
}

#[test]
fn test_cancelled_game_fails_activity_check() {
    let cancelled = new_game().cancel().unwrap();
    assert_eq!(
        GameIsActive::check(&cancelled),
        Err(GameError::GameNotActive(GameStatus::Cancelled))
    );
}

#[test]
fn test_invariants_hold_through_a_game() {
    let mut game = new_game();
    assert!(GameInvariants::check_all(&game).is_ok());

    for (player, position) in [("alice", 1), ("bob", 4), ("alice", 2), ("bob", 5), ("alice", 3)] {
        game = game.apply_move(&name(player), position).unwrap().0;
        assert!(GameInvariants::check_all(&game).is_ok());
    }
}

#[test]
fn test_restore_rejects_winner_without_line() {
    let (game, _) = new_game().apply_move(&name("alice"), 1).unwrap();
    let mut snapshot = GameSnapshot::from(game);
    snapshot.status = GameStatus::Won;
    snapshot.winner = Some(name("alice"));
    snapshot.next_turn = None;

    let violations = snapshot.restore().unwrap_err();
    assert!(!violations.is_empty());
}

#[test]
fn test_restore_rejects_history_mismatch() {
    let mut board = Board::new();
    board.place(Position::TopLeft, Symbol::X).unwrap();

    let snapshot = GameSnapshot {
        player_x: name("alice"),
        player_o: name("bob"),
        board,
        number_of_moves: 1,
        next_turn: Some(name("bob")),
        status: GameStatus::Active,
        winner: None,
        history: vec![MoveRecord::new(Symbol::X, Position::Center, MoveResult::None)],
    };
    assert!(snapshot.restore().is_err());
}

#[test]
fn test_restore_rejects_result_contradicting_status() {
    let mut board = Board::new();
    board.place(Position::TopLeft, Symbol::X).unwrap();

    let snapshot = GameSnapshot {
        player_x: name("alice"),
        player_o: name("bob"),
        board,
        number_of_moves: 1,
        next_turn: Some(name("bob")),
        status: GameStatus::Active,
        winner: None,
        history: vec![MoveRecord::new(Symbol::X, Position::TopLeft, MoveResult::Win)],
    };
    assert!(snapshot.clone().restore().is_err());

    let mut consistent = snapshot;
    consistent.history[0] = MoveRecord::new(Symbol::X, Position::TopLeft, MoveResult::None);
    assert!(consistent.restore().is_ok());
}
