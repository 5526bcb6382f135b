//! Engine actions and the history record kept for each applied one.
//!
//! The view translates input into an `Action` and hands it to
//! `GameEngine::apply`. Setup (`initialize`) takes a roster and is not
//! part of this enum.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::map::TerritoryId;

/// A request from the current player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Place one reinforcement army.
    DeployArmy { territory: TerritoryId },
    /// Leave the deploy phase with reinforcements unspent.
    SkipToAttack,
    /// Pick the territory to attack from.
    SelectAttackSource { territory: TerritoryId },
    /// Attack a neighbor of the selected source.
    Attack { target: TerritoryId },
    /// Drop the pending source (and destination).
    CancelSelection,
    /// Stop attacking and move to the fortify phase.
    BeginFortify,
    /// Pick the territory armies move out of.
    SelectFortifySource { territory: TerritoryId },
    /// Pick the territory armies move into.
    SelectFortifyDestination { territory: TerritoryId },
    /// Move armies between the selected pair.
    Fortify { amount: u32 },
    /// Pass play to the next in-play player.
    EndTurn,
}

impl Action {
    /// Short name used in logs and tracing.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::DeployArmy { .. } => "deploy_army",
            Action::SkipToAttack => "skip_to_attack",
            Action::SelectAttackSource { .. } => "select_attack_source",
            Action::Attack { .. } => "attack",
            Action::CancelSelection => "cancel_selection",
            Action::BeginFortify => "begin_fortify",
            Action::SelectFortifySource { .. } => "select_fortify_source",
            Action::SelectFortifyDestination { .. } => "select_fortify_destination",
            Action::Fortify { .. } => "fortify",
            Action::EndTurn => "end_turn",
        }
    }
}

/// An applied action with the context it was applied in.
///
/// Used for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player whose turn it was.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
