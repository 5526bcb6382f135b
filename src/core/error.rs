//! Action rejections.
//!
//! Every rejection is recoverable: the state is untouched and the caller
//! may try a different action.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::PlayerId;
use super::state::Phase;
use crate::map::TerritoryId;

/// Why an action was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("action is not legal during the {phase:?} phase")]
    WrongPhase { phase: Phase },
    #[error("{territory} is not owned by the current player")]
    NotOwner { territory: TerritoryId },
    #[error("not enough armies on {territory:?} ({armies})")]
    InsufficientArmies {
        territory: Option<TerritoryId>,
        armies: u32,
    },
    #[error("{from} does not border {to}")]
    NotAdjacent { from: TerritoryId, to: TerritoryId },
    #[error("{territory} already belongs to the attacker")]
    TargetIsOwnTerritory { territory: TerritoryId },
    #[error("no territory is selected")]
    NoSelection,
    #[error("a selection is already pending")]
    SelectionPending,
    #[error("the fortify move for this turn has been used")]
    FortifyAlreadyUsed,
    #[error("cannot move {amount} armies")]
    InvalidAmount { amount: u32 },
    #[error("{territory} is not on the map")]
    UnknownTerritory { territory: TerritoryId },
    #[error("the game is over, {winner} won")]
    GameAlreadyWon { winner: PlayerId },
    #[error("cannot seat {active} active players in a roster of {seats}")]
    InvalidPlayerCount { active: usize, seats: usize },
}

/// Fieldless rejection code for views that branch on the reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionCode {
    WrongPhase,
    NotOwner,
    InsufficientArmies,
    NotAdjacent,
    TargetIsOwnTerritory,
    NoSelection,
    SelectionPending,
    FortifyAlreadyUsed,
    InvalidAmount,
    UnknownTerritory,
    GameAlreadyWon,
    InvalidPlayerCount,
}

impl ActionError {
    /// The reason code without its payload.
    #[must_use]
    pub fn code(&self) -> RejectionCode {
        match self {
            ActionError::WrongPhase { .. } => RejectionCode::WrongPhase,
            ActionError::NotOwner { .. } => RejectionCode::NotOwner,
            ActionError::InsufficientArmies { .. } => RejectionCode::InsufficientArmies,
            ActionError::NotAdjacent { .. } => RejectionCode::NotAdjacent,
            ActionError::TargetIsOwnTerritory { .. } => RejectionCode::TargetIsOwnTerritory,
            ActionError::NoSelection => RejectionCode::NoSelection,
            ActionError::SelectionPending => RejectionCode::SelectionPending,
            ActionError::FortifyAlreadyUsed => RejectionCode::FortifyAlreadyUsed,
            ActionError::InvalidAmount { .. } => RejectionCode::InvalidAmount,
            ActionError::UnknownTerritory { .. } => RejectionCode::UnknownTerritory,
            ActionError::GameAlreadyWon { .. } => RejectionCode::GameAlreadyWon,
            ActionError::InvalidPlayerCount { .. } => RejectionCode::InvalidPlayerCount,
        }
    }
}
