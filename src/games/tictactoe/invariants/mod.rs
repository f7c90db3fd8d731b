//! First-class invariants for tic-tac-toe games.
//!
//! Invariants are logical properties that must hold for every game the
//! state machine produces. They are checked after each transition in debug
//! builds and whenever a game is restored from storage.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description)
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check_one<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn into_result(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

// Implement InvariantSet for 5-tuples
impl<S, I1, I2, I3, I4, I5> InvariantSet<S> for (I1, I2, I3, I4, I5)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
    I5: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        check_one::<S, I3>(state, &mut violations);
        check_one::<S, I4>(state, &mut violations);
        check_one::<S, I5>(state, &mut violations);
        into_result(violations)
    }
}

// Implement InvariantSet for 2-tuples
impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        into_result(violations)
    }
}

pub mod alternating_turn;
pub mod board_count;
pub mod history_consistent;
pub mod move_result;
pub mod outcome;

pub use alternating_turn::AlternatingTurnInvariant;
pub use board_count::BoardCountInvariant;
pub use history_consistent::HistoryConsistentInvariant;
pub use move_result::MoveResultInvariant;
pub use outcome::OutcomeInvariant;

/// All game invariants as a composable set.
pub type GameInvariants = (
    BoardCountInvariant,
    HistoryConsistentInvariant,
    AlternatingTurnInvariant,
    OutcomeInvariant,
    MoveResultInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Game;

    fn play(moves: &[(&str, i64)]) -> Game {
        let mut game = Game::start("alice".into(), "bob".into()).expect("distinct players");
        for (player, position) in moves {
            game = game
                .apply_move(&(*player).into(), *position)
                .expect("legal move")
                .0;
        }
        game
    }

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(GameInvariants::check_all(&play(&[])).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let game = play(&[("alice", 1), ("bob", 5), ("alice", 3)]);
        assert!(GameInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_win_and_cancel() {
        let won = play(&[
            ("alice", 1),
            ("bob", 4),
            ("alice", 2),
            ("bob", 5),
            ("alice", 3),
        ]);
        assert!(GameInvariants::check_all(&won).is_ok());

        let cancelled = play(&[("alice", 1)]).cancel().expect("active");
        assert!(GameInvariants::check_all(&cancelled).is_ok());
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (BoardCountInvariant, OutcomeInvariant);
        assert!(TwoInvariants::check_all(&play(&[("alice", 9)])).is_ok());
    }
}
