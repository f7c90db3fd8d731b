//! End-to-end tests for the game service over SQLite.

use tempfile::NamedTempFile;

use tictactoe_ledger::{
    GameError, GameKey, GameRepository, GameService, GameStatus, MoveResult, PlayerName,
    PlayerStore, Position, ServiceError, StoreError, Symbol,
};

fn setup_service() -> (NamedTempFile, GameService<GameRepository>) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    repo.run_migrations().expect("Migrations failed");
    (db_file, GameService::new(repo))
}

fn name(s: &str) -> PlayerName {
    PlayerName::from(s)
}

fn start(service: &GameService<GameRepository>, x: &str, o: &str) -> GameKey {
    *service
        .start_game(name(x), name(o))
        .expect("Start failed")
        .key()
}

#[test]
fn test_row_win_updates_history_and_score() {
    let (_db, service) = setup_service();
    service.register_player(name("A"), None).expect("Register failed");
    service.register_player(name("B"), None).expect("Register failed");
    let key = start(&service, "A", "B");

    for (player, position) in [("A", 1), ("B", 4), ("A", 2), ("B", 5)] {
        let (_, record) = service
            .apply_move(key, &name(player), position)
            .expect("Move failed");
        assert_eq!(record.result(), MoveResult::None);
    }
    let (stored, record) = service.apply_move(key, &name("A"), 3).expect("Move failed");

    assert_eq!(record.player(), Symbol::X);
    assert_eq!(record.position(), Position::TopRight);
    assert_eq!(record.result(), MoveResult::Win);
    assert_eq!(stored.game().status(), GameStatus::Won);
    assert_eq!(*stored.version(), 5);

    let history = service.get_history(key).expect("History failed");
    assert_eq!(history.len(), 5);
    assert_eq!(history[4], record);

    let leaderboard = service.leaderboard().expect("Leaderboard failed");
    assert_eq!(leaderboard[0].name(), &name("A"));
    assert_eq!(*leaderboard[0].score(), 1);
    assert_eq!(*leaderboard[1].score(), 0);
}

#[test]
fn test_tie_awards_nobody() {
    let (_db, service) = setup_service();
    service.register_player(name("A"), None).expect("Register failed");
    service.register_player(name("B"), None).expect("Register failed");
    let key = start(&service, "A", "B");

    let moves = [1, 2, 3, 5, 4, 6, 8, 7, 9];
    for (i, position) in moves.into_iter().enumerate() {
        let player = if i % 2 == 0 { "A" } else { "B" };
        service
            .apply_move(key, &name(player), position)
            .expect("Move failed");
    }

    let stored = service.get_game(key).expect("Load failed");
    assert_eq!(stored.game().status(), GameStatus::Tied);
    assert_eq!(stored.game().winner(), None);
    assert!(service.leaderboard().expect("Leaderboard failed").iter().all(|p| *p.score() == 0));
}

#[test]
fn test_unknown_player_rejected() {
    let (_db, service) = setup_service();
    service.register_player(name("A"), None).expect("Register failed");

    let result = service.start_game(name("A"), name("Ghost"));
    assert!(matches!(
        result,
        Err(ServiceError::Game(GameError::UnknownPlayer(ref n))) if *n == name("Ghost")
    ));
}

#[test]
fn test_duplicate_registration() {
    let (_db, service) = setup_service();
    service.register_player(name("A"), None).expect("Register failed");
    let result = service.register_player(name("A"), Some("a@example.com"));
    assert!(matches!(
        result,
        Err(ServiceError::Store(StoreError::DuplicatePlayer(_)))
    ));
}

#[test]
fn test_rejected_move_leaves_game_unchanged() {
    let (_db, service) = setup_service();
    service.register_player(name("A"), None).expect("Register failed");
    service.register_player(name("B"), None).expect("Register failed");
    let key = start(&service, "A", "B");
    service.apply_move(key, &name("A"), 5).expect("Move failed");

    let before = service.get_game(key).expect("Load failed");
    for (player, position) in [("A", 1), ("B", 5), ("B", 0), ("C", 1)] {
        assert!(matches!(
            service.apply_move(key, &name(player), position),
            Err(ServiceError::Game(_))
        ));
    }
    assert_eq!(service.get_game(key).expect("Load failed"), before);
}

#[test]
fn test_cancel_game() {
    let (_db, service) = setup_service();
    service.register_player(name("A"), None).expect("Register failed");
    service.register_player(name("B"), None).expect("Register failed");
    let key = start(&service, "A", "B");
    service.apply_move(key, &name("A"), 5).expect("Move failed");

    let cancelled = service.cancel_game(key).expect("Cancel failed");
    assert_eq!(cancelled.game().status(), GameStatus::Cancelled);
    assert_eq!(cancelled.game().next_turn(), None);

    let reloaded = service.get_game(key).expect("Load failed");
    assert_eq!(reloaded.game().status(), GameStatus::Cancelled);
    assert_eq!(reloaded.game().history().len(), 1);

    assert!(matches!(
        service.apply_move(key, &name("B"), 1),
        Err(ServiceError::Game(GameError::GameNotActive(GameStatus::Cancelled)))
    ));
    assert!(service.active_games(&name("A")).expect("Query failed").is_empty());
}

#[test]
fn test_unknown_game() {
    let (_db, service) = setup_service();
    let key = GameKey::new(7);
    assert!(matches!(service.get_game(key), Err(ServiceError::GameNotFound(k)) if k == key));
    assert!(matches!(service.cancel_game(key), Err(ServiceError::GameNotFound(_))));
}

#[test]
fn test_store_is_shared_with_service() {
    let (_db, service) = setup_service();
    service
        .register_player(name("A"), Some("a@example.com"))
        .expect("Register failed");
    let profile = service
        .store()
        .find_by_name(&name("A"))
        .expect("Query failed")
        .expect("Player missing");
    assert_eq!(profile.email().as_deref(), Some("a@example.com"));
}
