//! # conquest-engine
//!
//! Game logic for a turn-based territorial conquest game on a fixed map.
//!
//! ## Design Principles
//!
//! 1. **Reducer Core**: Every player intent is an `Action`. The engine
//!    validates it against the current state and either returns the next
//!    snapshot or an `ActionError`. Rejected actions change nothing.
//!
//! 2. **Injectable Randomness**: Dice and setup placement draw from a
//!    `RandomSource`. Seeded `GameRng` games replay exactly; `ScriptedRng`
//!    fixes every roll in tests.
//!
//! 3. **Configuration Over Convention**: Dice caps, army budgets, the
//!    reinforcement formula and the conquest transfer rule live in
//!    `GameConfig`. The map loads from JSON.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: `GameState` uses `im-rs` collections,
//!   so the snapshot handed to the view after every action is cheap.
//!
//! - **View Decoupling**: The engine emits `GameEvent`s and a bounded
//!   battle log. Rendering is somebody else's job.
//!
//! ## Modules
//!
//! - `core`: Players, state, actions, errors, RNG, configuration
//! - `map`: Territory graph and the built-in map
//! - `rules`: Combat, reinforcements, setup, victory, and `GameEngine`
//! - `events`: Event stream and battle log

pub mod core;
pub mod events;
pub mod map;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionError, ActionRecord, ConfigError, ConquestTransfer, GameConfig, GameRng,
    GameState, Phase, Player, PlayerId, PlayerMap, PlayerSpec, RandomSource, RejectionCode,
    ScriptedRng, Selection, StartingArmies, TerritoryState,
};

pub use crate::map::{MapError, TerritoryGraph, TerritoryId};

pub use crate::events::{BattleLog, GameEvent};

pub use crate::rules::{
    check_invariants, ActionResult, CombatOutcome, CombatResolver, EliminationVictoryChecker,
    GameEngine, GameResult, InvariantViolation,
};
