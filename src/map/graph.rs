//! Immutable territory adjacency graph.
//!
//! Built once from a `MapDefinition` and validated at construction:
//! names are unique, neighbor indices resolve, no territory borders itself,
//! and every edge appears in both directions. A graph that fails any of
//! these is never handed to the engine.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use super::territory::{MapDefinition, Neighbors, Territory, TerritoryId};

/// The built-in sixteen-territory map.
pub const CLASSIC_MAP: &str = include_str!("classic.json");

/// Malformed map data.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to parse map definition: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("map defines no territories")]
    Empty,
    #[error("map defines {0} territories, at most 256 are supported")]
    TooLarge(usize),
    #[error("territory name {0:?} is used more than once")]
    DuplicateName(String),
    #[error("{territory} lists unknown neighbor {neighbor}")]
    UnknownNeighbor { territory: String, neighbor: u8 },
    #[error("{0} lists itself as a neighbor")]
    SelfAdjacent(String),
    #[error("{territory} lists neighbor {neighbor} twice")]
    DuplicateNeighbor { territory: String, neighbor: u8 },
    #[error("{from} borders {to} but {to} does not border {from}")]
    Asymmetric { from: String, to: String },
}

/// Adjacency structure over a fixed set of territories.
#[derive(Clone, Debug)]
pub struct TerritoryGraph {
    territories: Vec<Territory>,
    by_name: FxHashMap<String, TerritoryId>,
}

impl TerritoryGraph {
    /// The built-in map.
    ///
    /// # Panics
    ///
    /// Panics if the embedded definition is malformed, which the test suite
    /// rules out.
    #[must_use]
    pub fn classic() -> Self {
        Self::from_json_str(CLASSIC_MAP).expect("builtin map should validate")
    }

    /// Parse and validate a JSON map definition.
    pub fn from_json_str(data: &str) -> Result<Self, MapError> {
        let definition: MapDefinition = serde_json::from_str(data)?;
        Self::from_definition(&definition)
    }

    /// Validate a map definition and build the graph.
    pub fn from_definition(definition: &MapDefinition) -> Result<Self, MapError> {
        let count = definition.territories.len();
        if count == 0 {
            return Err(MapError::Empty);
        }
        if count > usize::from(u8::MAX) + 1 {
            return Err(MapError::TooLarge(count));
        }

        let mut by_name = FxHashMap::default();
        let mut territories = Vec::with_capacity(count);

        for (index, def) in definition.territories.iter().enumerate() {
            let id = TerritoryId(index as u8);
            if by_name.insert(def.name.clone(), id).is_some() {
                return Err(MapError::DuplicateName(def.name.clone()));
            }

            let mut seen = FxHashSet::default();
            let mut neighbors = Neighbors::new();
            for &neighbor in &def.neighbors {
                if usize::from(neighbor) >= count {
                    return Err(MapError::UnknownNeighbor {
                        territory: def.name.clone(),
                        neighbor,
                    });
                }
                if usize::from(neighbor) == index {
                    return Err(MapError::SelfAdjacent(def.name.clone()));
                }
                if !seen.insert(neighbor) {
                    return Err(MapError::DuplicateNeighbor {
                        territory: def.name.clone(),
                        neighbor,
                    });
                }
                neighbors.push(TerritoryId(neighbor));
            }
            neighbors.sort_unstable();

            territories.push(Territory {
                id,
                name: def.name.clone(),
                neighbors,
            });
        }

        for territory in &territories {
            for &neighbor in &territory.neighbors {
                if !territories[neighbor.index()].borders(territory.id) {
                    return Err(MapError::Asymmetric {
                        from: territory.name.clone(),
                        to: territories[neighbor.index()].name.clone(),
                    });
                }
            }
        }

        Ok(Self { territories, by_name })
    }

    /// Number of territories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.territories.len()
    }

    /// Always false for a constructed graph; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    /// Whether `id` names a territory on this map.
    #[must_use]
    pub fn contains(&self, id: TerritoryId) -> bool {
        id.index() < self.territories.len()
    }

    /// All territory ids in ascending order.
    pub fn all_territories(&self) -> impl Iterator<Item = TerritoryId> + '_ {
        self.territories.iter().map(|t| t.id)
    }

    /// Static territory data.
    ///
    /// # Panics
    ///
    /// Panics on an id outside the map; callers validate with `contains`.
    #[must_use]
    pub fn territory(&self, id: TerritoryId) -> &Territory {
        &self.territories[id.index()]
    }

    /// Neighbors of `id`, sorted ascending.
    ///
    /// # Panics
    ///
    /// Panics on an id outside the map.
    #[must_use]
    pub fn neighbors(&self, id: TerritoryId) -> &[TerritoryId] {
        &self.territory(id).neighbors
    }

    /// Whether `a` and `b` share a border.
    #[must_use]
    pub fn are_adjacent(&self, a: TerritoryId, b: TerritoryId) -> bool {
        self.contains(a) && self.territory(a).borders(b)
    }

    /// Display name of `id`.
    #[must_use]
    pub fn name(&self, id: TerritoryId) -> &str {
        &self.territory(id).name
    }

    /// Look a territory up by display name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<TerritoryId> {
        self.by_name.get(name).copied()
    }
}
