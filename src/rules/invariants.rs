//! State invariants - sanity checks that detect bugs.
//!
//! These hold after every applied action. A violation means the engine
//! let an illegal transition through.

use thiserror::Error;

use crate::core::{GameState, Phase, Selection};
use crate::map::TerritoryGraph;

/// Invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Check all state invariants.
///
/// Returns every violation found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState, graph: &TerritoryGraph) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if state.territories.len() != graph.len() {
        violations.push(InvariantViolation::new(format!(
            "state tracks {} territories, map has {}",
            state.territories.len(),
            graph.len()
        )));
    }

    let started = state.phase != Phase::Setup;
    for territory in &state.territories {
        match territory.owner {
            Some(owner) => {
                if territory.armies < 1 {
                    violations.push(InvariantViolation::new(format!(
                        "{} is owned by {owner} with no armies",
                        territory.id
                    )));
                }
                if owner.index() >= state.players.len() || !state.player(owner).active {
                    violations.push(InvariantViolation::new(format!(
                        "{} is owned by non-participant {owner}",
                        territory.id
                    )));
                }
            }
            None if started => violations.push(InvariantViolation::new(format!(
                "{} has no owner after setup",
                territory.id
            ))),
            None => {}
        }
    }

    if started {
        let counts = state.ownership_counts();
        let owned: usize = counts.iter().map(|(_, c)| *c).sum();
        if owned != state.territories.len() {
            violations.push(InvariantViolation::new(format!(
                "{owned} owned territories out of {}",
                state.territories.len()
            )));
        }

        if state.current_turn_index().is_none() {
            violations.push(InvariantViolation::new(format!(
                "current player {} is not in play",
                state.current_player
            )));
        }

        for player in state.in_play_players() {
            if counts[player] == 0 {
                violations.push(InvariantViolation::new(format!(
                    "{player} owns nothing but is still in play"
                )));
            }
        }
    }

    let selection_ok = match state.selection {
        Selection::Empty => true,
        Selection::AttackSource { .. } => state.phase == Phase::Attack,
        Selection::FortifySource { .. } | Selection::FortifyPair { .. } => {
            state.phase == Phase::Fortify
        }
    };
    if !selection_ok {
        violations.push(InvariantViolation::new(format!(
            "{:?} selection during {:?}",
            state.selection, state.phase
        )));
    }

    if let Some(source) = state.selection.source() {
        let held = graph.contains(source) && state.owner(source) == Some(state.current_player);
        if !held {
            violations.push(InvariantViolation::new(format!(
                "selected {source} is not held by {}",
                state.current_player
            )));
        }
    }

    if (state.phase == Phase::Victory) != state.winner.is_some() {
        violations.push(InvariantViolation::new(format!(
            "phase {:?} with winner {:?}",
            state.phase, state.winner
        )));
    }

    violations
}
