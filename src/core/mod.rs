//! Core engine types: players, state, actions, errors, RNG, configuration.
//!
//! Nothing here knows the rules of combat or turn order. The `rules`
//! module drives these types.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use config::{ConfigError, ConquestTransfer, GameConfig, StartingArmies};
pub use error::{ActionError, RejectionCode};
pub use player::{Player, PlayerId, PlayerMap, PlayerSpec};
pub use rng::{GameRng, RandomSource, ScriptedRng, DIE_FACES};
pub use state::{GameState, Phase, Selection, TerritoryState};
