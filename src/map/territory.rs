//! Territory identifiers and static territory data.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Territory identifier: position of the territory in its map definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TerritoryId(pub u8);

impl TerritoryId {
    /// Create a new territory ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Territory({})", self.0)
    }
}

/// Neighbor list. Classic territories have at most six neighbors.
pub type Neighbors = SmallVec<[TerritoryId; 6]>;

/// A node of the territory graph. Immutable once the graph is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    /// Identifier.
    pub id: TerritoryId,
    /// Display name.
    pub name: String,
    /// Adjacent territories, sorted ascending.
    pub neighbors: Neighbors,
}

impl Territory {
    /// Check adjacency.
    #[must_use]
    pub fn borders(&self, other: TerritoryId) -> bool {
        self.neighbors.contains(&other)
    }
}

/// One entry of a map definition file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryDefinition {
    /// Display name, unique within the map.
    pub name: String,
    /// Indices of adjacent entries.
    pub neighbors: Vec<u8>,
}

/// Raw map data as loaded from JSON, prior to validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDefinition {
    /// Territories in identifier order.
    pub territories: Vec<TerritoryDefinition>,
}
