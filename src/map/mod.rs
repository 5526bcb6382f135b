//! Static map data: territories and their adjacency.
//!
//! The graph is built once, validated, and never mutated. Dynamic
//! ownership and army counts live in `GameState`.

pub mod graph;
pub mod territory;

pub use graph::{MapError, TerritoryGraph, CLASSIC_MAP};
pub use territory::{MapDefinition, Neighbors, Territory, TerritoryDefinition, TerritoryId};
