//! Player identification, roster entries, and per-player tallies.
//!
//! ## PlayerId
//!
//! Index into the game roster. Inactive seats keep their index so that
//! territory ownership never has to be renumbered when someone drops out.
//!
//! ## Player
//!
//! Roster entry: display name plus the `active` and `eliminated` flags that
//! together decide whether a seat is *in play*.
//!
//! ## PlayerMap
//!
//! `Vec`-backed per-player storage indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Roster index of a player. The first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw roster index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Roster entry requested by the caller of `initialize`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    /// Display name.
    pub name: String,
    /// Whether this seat takes part in the game.
    pub active: bool,
}

impl PlayerSpec {
    /// A seat that takes part in the game.
    pub fn active(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
        }
    }

    /// A seat that sits this game out.
    pub fn inactive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: false,
        }
    }
}

/// A player on the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Roster index.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Participating this game.
    pub active: bool,
    /// Lost every territory after having owned at least one.
    pub eliminated: bool,
}

impl Player {
    /// Build a roster entry from a spec.
    #[must_use]
    pub fn from_spec(id: PlayerId, spec: &PlayerSpec) -> Self {
        Self {
            id,
            name: spec.name.clone(),
            active: spec.active,
            eliminated: false,
        }
    }

    /// Active and not eliminated.
    #[must_use]
    pub fn in_play(&self) -> bool {
        self.active && !self.eliminated
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use conquest_engine::core::{PlayerId, PlayerMap};
///
/// let mut owned: PlayerMap<usize> = PlayerMap::with_value(3, 0);
/// owned[PlayerId::new(1)] += 2;
/// assert_eq!(owned[PlayerId::new(1)], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_in_play_flags() {
        let mut player = Player::from_spec(PlayerId::new(0), &PlayerSpec::active("Red Empire"));
        assert!(player.in_play());

        player.eliminated = true;
        assert!(!player.in_play());

        let benched = Player::from_spec(PlayerId::new(1), &PlayerSpec::inactive("Green Alliance"));
        assert!(!benched.in_play());
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<usize> = PlayerMap::new(4, |p| p.index() * 10);

        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(3)], 30);
        assert_eq!(map.iter().count(), 4);
    }

    #[test]
    fn test_player_map_mutation_and_iter() {
        let mut map: PlayerMap<i32> = PlayerMap::with_value(2, 0);

        map[PlayerId::new(0)] = 10;
        map[PlayerId::new(1)] = 20;

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::new(0), &10), (PlayerId::new(1), &20)]);
    }

    #[test]
    fn test_player_serialization() {
        let player = Player::from_spec(PlayerId::new(2), &PlayerSpec::active("Blue Kingdom"));
        let json = serde_json::to_string(&player).unwrap();
        let deserialized: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, deserialized);
    }
}
