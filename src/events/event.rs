//! Events emitted by the engine.
//!
//! Each applied action may emit several events. They queue inside the
//! engine until the view drains them; the battle log carries the same
//! information as text.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::map::TerritoryId;
use crate::rules::CombatOutcome;

/// Something that happened as a result of an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Dice were rolled and casualties applied.
    CombatResolved {
        from: TerritoryId,
        to: TerritoryId,
        outcome: CombatOutcome,
    },
    /// A territory changed hands.
    TerritoryConquered {
        territory: TerritoryId,
        by: PlayerId,
        from_player: PlayerId,
        armies_moved: u32,
    },
    /// A player lost their last territory.
    PlayerEliminated { player: PlayerId },
    /// One player owns the whole map.
    Victory { winner: PlayerId },
    /// A new turn began.
    TurnStarted {
        player: PlayerId,
        reinforcements: u32,
        turn: u32,
    },
    /// A battle log line was written.
    Log { message: String },
}

impl GameEvent {
    /// Whether this event ends the game.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::Victory { .. })
    }
}
