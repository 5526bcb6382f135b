//! Game state.
//!
//! ## GameState
//!
//! Everything that changes during play:
//! - Roster with active/eliminated flags
//! - Owner and army count per territory
//! - Phase, current player, reinforcements, pending selection
//! - Battle log and action history
//!
//! Collections use `im` persistent structures, so the snapshot returned
//! after every action is a cheap clone that shares structure with the
//! engine's copy.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::player::{Player, PlayerId, PlayerMap};
use crate::events::BattleLog;
use crate::map::TerritoryId;
use crate::rules::CombatOutcome;

/// Turn phase. Governs which actions are legal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Before `initialize`.
    #[default]
    Setup,
    /// Placing reinforcements.
    Deploy,
    /// Attacking neighbors.
    Attack,
    /// One army movement between owned neighbors.
    Fortify,
    /// Terminal: one player owns every territory.
    Victory,
}

/// Pending territory selection.
///
/// A destination can only exist alongside a fortify source, so invalid
/// combinations are unrepresentable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Empty,
    AttackSource { source: TerritoryId },
    FortifySource { source: TerritoryId },
    FortifyPair {
        source: TerritoryId,
        destination: TerritoryId,
    },
}

impl Selection {
    /// Whether anything is selected.
    #[must_use]
    pub fn is_some(&self) -> bool {
        !matches!(self, Selection::Empty)
    }

    /// The selected source, if any.
    #[must_use]
    pub fn source(&self) -> Option<TerritoryId> {
        match *self {
            Selection::Empty => None,
            Selection::AttackSource { source }
            | Selection::FortifySource { source }
            | Selection::FortifyPair { source, .. } => Some(source),
        }
    }
}

/// Dynamic state of one territory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryState {
    /// Territory this entry describes.
    pub id: TerritoryId,
    /// Army count. At least one whenever `owner` is set.
    pub armies: u32,
    /// Owning player; `None` only before setup.
    pub owner: Option<PlayerId>,
}

/// Complete game state, owned by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Roster in seat order, including inactive seats.
    pub players: Vector<Player>,

    /// One entry per territory, indexed by `TerritoryId`.
    pub territories: Vector<TerritoryState>,

    /// Whose turn it is.
    pub current_player: PlayerId,

    /// Current phase.
    pub phase: Phase,

    /// Reinforcements the current player has yet to deploy.
    pub reinforcements: u32,

    /// Pending source/destination selection.
    pub selection: Selection,

    /// Whether the current player has used this turn's fortify move.
    pub fortified: bool,

    /// Turn number (starts at 1 once play begins).
    pub turn_number: u32,

    /// Action sequence within the turn.
    pub action_sequence: u32,

    /// Winner, once the game is over.
    pub winner: Option<PlayerId>,

    /// Dice and casualties of the most recent attack.
    pub last_combat: Option<CombatOutcome>,

    /// Human-readable log.
    pub log: BattleLog,

    /// Applied actions, oldest first.
    pub action_history: Vector<ActionRecord>,
}

impl GameState {
    /// Create a setup-phase state for a map of `territory_count` territories.
    #[must_use]
    pub fn new(territory_count: usize, log_capacity: usize) -> Self {
        Self {
            players: Vector::new(),
            territories: (0..territory_count)
                .map(|i| TerritoryState {
                    id: TerritoryId(i as u8),
                    armies: 0,
                    owner: None,
                })
                .collect(),
            current_player: PlayerId::new(0),
            phase: Phase::Setup,
            reinforcements: 0,
            selection: Selection::Empty,
            fortified: false,
            turn_number: 0,
            action_sequence: 0,
            winner: None,
            last_combat: None,
            log: BattleLog::new(log_capacity),
            action_history: Vector::new(),
        }
    }

    // === Players ===

    /// Roster entry for `player`.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player.index()]
    }

    /// Display name of `player`.
    #[must_use]
    pub fn player_name(&self, player: PlayerId) -> &str {
        &self.player(player).name
    }

    /// Active, non-eliminated players in seat order. Recomputed on every call.
    #[must_use]
    pub fn in_play_players(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.in_play())
            .map(|p| p.id)
            .collect()
    }

    /// Position of the current player within `in_play_players`.
    #[must_use]
    pub fn current_turn_index(&self) -> Option<usize> {
        self.in_play_players()
            .iter()
            .position(|&p| p == self.current_player)
    }

    // === Territories ===

    /// Dynamic state of `id`.
    ///
    /// # Panics
    ///
    /// Panics on an id outside the map.
    #[must_use]
    pub fn territory(&self, id: TerritoryId) -> &TerritoryState {
        &self.territories[id.index()]
    }

    pub(crate) fn territory_mut(&mut self, id: TerritoryId) -> &mut TerritoryState {
        &mut self.territories[id.index()]
    }

    /// Owner of `id`.
    #[must_use]
    pub fn owner(&self, id: TerritoryId) -> Option<PlayerId> {
        self.territory(id).owner
    }

    /// Armies on `id`.
    #[must_use]
    pub fn armies(&self, id: TerritoryId) -> u32 {
        self.territory(id).armies
    }

    /// Territories owned by `player`, ascending.
    pub fn owned_territories(&self, player: PlayerId) -> impl Iterator<Item = TerritoryId> + '_ {
        self.territories
            .iter()
            .filter(move |t| t.owner == Some(player))
            .map(|t| t.id)
    }

    /// Number of territories owned by `player`.
    #[must_use]
    pub fn owned_count(&self, player: PlayerId) -> usize {
        self.owned_territories(player).count()
    }

    /// Owned-territory count for every seat.
    #[must_use]
    pub fn ownership_counts(&self) -> PlayerMap<usize> {
        let mut counts = PlayerMap::with_value(self.players.len(), 0);
        for owner in self.territories.iter().filter_map(|t| t.owner) {
            counts[owner] += 1;
        }
        counts
    }

    /// Armies fielded by `player` across the map.
    #[must_use]
    pub fn total_armies(&self, player: PlayerId) -> u32 {
        self.territories
            .iter()
            .filter(|t| t.owner == Some(player))
            .map(|t| t.armies)
            .sum()
    }

    // === Progression ===

    /// True once a winner is recorded.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Record an applied action in history.
    pub(crate) fn record_action(&mut self, action: crate::core::Action) {
        let record = ActionRecord::new(
            self.current_player,
            action,
            self.turn_number,
            self.action_sequence,
        );
        self.action_sequence += 1;
        self.action_history.push_back(record);
    }
}
