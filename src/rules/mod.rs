//! Game rules: combat, reinforcements, setup, victory, and the engine that
//! sequences them.
//!
//! The pure rule functions know nothing about turn order or selections.
//! `GameEngine` calls into them and owns every state transition.

pub mod combat;
pub mod engine;
pub mod invariants;
pub mod reinforcement;
pub mod setup;
pub mod victory;

pub use combat::{compare_dice, roll_dice, CombatOutcome, CombatResolver, Dice};
pub use engine::{ActionResult, GameEngine};
pub use invariants::{check_invariants, InvariantViolation};
pub use reinforcement::{reinforcements, reinforcements_with};
pub use setup::{distribute, Allotment};
pub use victory::{EliminationVictoryChecker, GameResult, Verdict};
