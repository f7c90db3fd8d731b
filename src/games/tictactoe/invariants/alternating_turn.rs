//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::super::{Game, Symbol};
use super::Invariant;

/// Invariant: Players alternate turns.
///
/// Move history must show X, O, X, O, ... pattern. First move is always X.
/// While the game is active, `next_turn` names the participant whose
/// symbol is due.
pub struct AlternatingTurnInvariant;

impl Invariant<Game> for AlternatingTurnInvariant {
    fn holds(game: &Game) -> bool {
        let history = game.history();

        if history.first().is_some_and(|record| record.player() != Symbol::X) {
            return false;
        }

        if history.windows(2).any(|pair| pair[0].player() == pair[1].player()) {
            return false;
        }

        let expected = if history.len() % 2 == 0 {
            Symbol::X
        } else {
            Symbol::O
        };

        match game.next_turn() {
            Some(next) => next == game.participant(expected),
            None => true,
        }
    }

    fn description() -> &'static str {
        "Players alternate turns starting with X"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::PlayerName;

    #[test]
    fn test_alternation_after_moves() {
        let mut game = Game::start("alice".into(), "bob".into()).unwrap();
        for (player, position) in [("alice", 1), ("bob", 2), ("alice", 5), ("bob", 9)] {
            game = game.apply_move(&player.into(), position).unwrap().0;
            assert!(AlternatingTurnInvariant::holds(&game));
        }
        assert_eq!(game.next_turn(), Some(&PlayerName::from("alice")));
    }
}
