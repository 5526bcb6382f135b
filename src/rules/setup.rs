//! Initial territory and army distribution.
//!
//! Territory `i` goes to in-play player `i mod N` with a fixed garrison. Each
//! player's remaining budget is then dropped one army at a time onto a
//! uniformly random territory they own.

use crate::core::{GameConfig, GameState, PlayerId, RandomSource};

/// Per-player result of setup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allotment {
    /// Player receiving armies.
    pub player: PlayerId,
    /// Territories dealt to the player.
    pub territories: usize,
    /// Armies placed in total.
    pub armies: u32,
}

/// Deal territories and armies to the in-play players of `state`.
///
/// Expects a fresh roster and unowned territories.
pub fn distribute<R: RandomSource + ?Sized>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
) -> Vec<Allotment> {
    let in_play = state.in_play_players();
    if in_play.is_empty() {
        return Vec::new();
    }
    let budget = config.starting_armies.for_headcount(in_play.len());
    let garrison = config.armies_per_initial_territory;

    for (i, territory) in state.territories.iter_mut().enumerate() {
        territory.owner = Some(in_play[i % in_play.len()]);
        territory.armies = garrison;
    }

    let mut allotments = Vec::with_capacity(in_play.len());
    for &player in &in_play {
        let owned: Vec<_> = state.owned_territories(player).collect();
        let base = garrison.saturating_mul(owned.len() as u32);
        let surplus = budget.saturating_sub(base);

        let mut placed = 0;
        if !owned.is_empty() {
            for _ in 0..surplus {
                let pick = owned[rng.pick_index(owned.len())];
                state.territory_mut(pick).armies += 1;
                placed += 1;
            }
        }

        allotments.push(Allotment {
            player,
            territories: owned.len(),
            armies: base + placed,
        });
    }

    allotments
}
