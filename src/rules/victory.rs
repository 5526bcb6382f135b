//! Elimination and victory detection.
//!
//! Run after every ownership change and at turn boundaries. Elimination is
//! reported once per player: a seat already flagged eliminated is no longer
//! in play and never reappears in a verdict.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId};

/// Outcome of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner holding every territory.
    Winner(PlayerId),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
        }
    }
}

/// What a scan found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Verdict {
    /// In-play players that own nothing any more.
    pub eliminated: Vec<PlayerId>,
    /// The in-play player owning every territory, if one does.
    pub winner: Option<PlayerId>,
}

impl Verdict {
    /// True when the scan found nothing to apply.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.eliminated.is_empty() && self.winner.is_none()
    }
}

/// Stateless ownership scanner.
#[derive(Clone, Copy, Debug, Default)]
pub struct EliminationVictoryChecker;

impl EliminationVictoryChecker {
    /// Scan ownership counts for newly eliminated players and a winner.
    ///
    /// Every in-play player owned territory at setup, so an in-play player
    /// at zero has lost everything they held.
    #[must_use]
    pub fn check(state: &GameState) -> Verdict {
        let counts = state.ownership_counts();
        let total = state.territories.len();

        let in_play = state.in_play_players();
        let eliminated: Vec<PlayerId> = in_play
            .iter()
            .copied()
            .filter(|&p| counts[p] == 0)
            .collect();

        let holders: Vec<PlayerId> = in_play
            .iter()
            .copied()
            .filter(|&p| counts[p] == total)
            .collect();
        let winner = match holders.as_slice() {
            [only] if total > 0 => Some(*only),
            _ => None,
        };

        Verdict { eliminated, winner }
    }

    /// The finished game's result, if any.
    #[must_use]
    pub fn result(state: &GameState) -> Option<GameResult> {
        state.winner.map(GameResult::Winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Player, PlayerSpec};

    fn state_with_owners(owners: &[u8], players: usize) -> GameState {
        let mut state = GameState::new(owners.len(), 8);
        state.players = (0..players)
            .map(|i| Player::from_spec(PlayerId::new(i as u8), &PlayerSpec::active(format!("P{i}"))))
            .collect();
        for (t, &owner) in state.territories.iter_mut().zip(owners) {
            t.owner = Some(PlayerId::new(owner));
            t.armies = 1;
        }
        state
    }

    #[test]
    fn test_quiet_when_contested() {
        let state = state_with_owners(&[0, 1, 0, 1], 2);
        assert!(EliminationVictoryChecker::check(&state).is_quiet());
    }

    #[test]
    fn test_elimination_without_victory() {
        let state = state_with_owners(&[0, 1, 0, 0], 3);
        let verdict = EliminationVictoryChecker::check(&state);

        assert_eq!(verdict.eliminated, vec![PlayerId::new(2)]);
        assert_eq!(verdict.winner, None);
    }

    #[test]
    fn test_victory_when_one_holds_all() {
        let state = state_with_owners(&[1, 1, 1, 1], 2);
        let verdict = EliminationVictoryChecker::check(&state);

        assert_eq!(verdict.eliminated, vec![PlayerId::new(0)]);
        assert_eq!(verdict.winner, Some(PlayerId::new(1)));
    }

    #[test]
    fn test_already_eliminated_not_reported() {
        let mut state = state_with_owners(&[0, 0, 1, 1], 3);
        state.players[2].eliminated = true;

        assert!(EliminationVictoryChecker::check(&state).is_quiet());
    }

    #[test]
    fn test_inactive_seat_cannot_win() {
        let mut state = state_with_owners(&[0, 0, 0, 0], 2);
        state.players[0].active = false;

        let verdict = EliminationVictoryChecker::check(&state);
        assert_eq!(verdict.winner, None);
    }

    #[test]
    fn test_game_result() {
        let mut state = state_with_owners(&[0, 0], 2);
        assert_eq!(EliminationVictoryChecker::result(&state), None);

        state.winner = Some(PlayerId::new(0));
        let result = EliminationVictoryChecker::result(&state).unwrap();
        assert!(result.is_winner(PlayerId::new(0)));
        assert!(!result.is_winner(PlayerId::new(1)));
    }
}
