//! Dice combat for a single attack.
//!
//! Attacker rolls `min(3, attacker_armies - 1)` dice, defender rolls
//! `min(2, defender_armies)`. Both sides sort descending and compare pairwise;
//! the attacker must roll strictly higher to win a pair, so ties go to the
//! defender. A defender reduced to zero armies is conquered and armies move
//! in from the source, which always keeps at least one.
//!
//! ## Conquest transfer
//!
//! `ConquestTransfer::DiceCount` (default) moves exactly as many armies as
//! the attacker rolled dice. `ConquestTransfer::HalfSource` moves half of the
//! surviving source armies. Both are clamped to `source - 1`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ConquestTransfer, GameConfig, RandomSource};

/// A sorted (descending) set of dice.
pub type Dice = SmallVec<[u8; 3]>;

/// Result of one attack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatOutcome {
    /// Attacker's dice, descending.
    pub attacker_dice: Dice,
    /// Defender's dice, descending.
    pub defender_dice: Dice,
    /// Armies the attacker lost.
    pub attacker_losses: u32,
    /// Armies the defender lost.
    pub defender_losses: u32,
    /// Whether the defender was wiped out and the territory changes hands.
    pub conquered: bool,
    /// Armies moved from source to target on conquest, zero otherwise.
    pub armies_moved: u32,
    /// Armies left on the source after losses and any transfer.
    pub source_armies: u32,
    /// Armies on the target after the battle.
    pub target_armies: u32,
}

/// Stateless combat rules, parameterized by config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatResolver {
    max_attacker_dice: u32,
    max_defender_dice: u32,
    transfer: ConquestTransfer,
}

impl Default for CombatResolver {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl CombatResolver {
    /// Build from a game config.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            max_attacker_dice: config.max_attacker_dice,
            max_defender_dice: config.max_defender_dice,
            transfer: config.conquest_transfer,
        }
    }

    /// Dice each side rolls for the given army counts.
    #[must_use]
    pub fn dice_counts(&self, attacker_armies: u32, defender_armies: u32) -> (u32, u32) {
        (
            self.max_attacker_dice.min(attacker_armies.saturating_sub(1)),
            self.max_defender_dice.min(defender_armies),
        )
    }

    /// Roll dice and resolve an attack.
    ///
    /// Attacker dice are drawn before defender dice. The caller guarantees
    /// `attacker_armies >= 2` and `defender_armies >= 1`.
    pub fn resolve<R: RandomSource + ?Sized>(
        &self,
        attacker_armies: u32,
        defender_armies: u32,
        rng: &mut R,
    ) -> CombatOutcome {
        debug_assert!(attacker_armies >= 2, "attacker must keep one army home");
        debug_assert!(defender_armies >= 1, "defender must hold the territory");

        let (attack_count, defend_count) = self.dice_counts(attacker_armies, defender_armies);
        let attacker_dice = roll_dice(attack_count, rng);
        let defender_dice = roll_dice(defend_count, rng);

        self.resolve_with_dice(attacker_armies, defender_armies, attacker_dice, defender_dice)
    }

    /// Resolve an attack from already-rolled dice.
    ///
    /// Dice are sorted descending before comparison.
    #[must_use]
    pub fn resolve_with_dice(
        &self,
        attacker_armies: u32,
        defender_armies: u32,
        mut attacker_dice: Dice,
        mut defender_dice: Dice,
    ) -> CombatOutcome {
        sort_descending(&mut attacker_dice);
        sort_descending(&mut defender_dice);

        let (attacker_losses, defender_losses) = compare_dice(&attacker_dice, &defender_dice);

        let surviving_attackers = attacker_armies.saturating_sub(attacker_losses);
        let surviving_defenders = defender_armies.saturating_sub(defender_losses);
        let conquered = surviving_defenders == 0;

        // Conquest implies the attacker lost nothing: every pair went its way.
        let armies_moved = if conquered {
            let wanted = match self.transfer {
                ConquestTransfer::DiceCount => attacker_dice.len() as u32,
                ConquestTransfer::HalfSource => (surviving_attackers / 2).max(1),
            };
            wanted.min(surviving_attackers.saturating_sub(1))
        } else {
            0
        };

        CombatOutcome {
            attacker_dice,
            defender_dice,
            attacker_losses,
            defender_losses,
            conquered,
            armies_moved,
            source_armies: surviving_attackers - armies_moved,
            target_armies: if conquered { armies_moved } else { surviving_defenders },
        }
    }
}

/// Roll `count` dice, sorted descending.
pub fn roll_dice<R: RandomSource + ?Sized>(count: u32, rng: &mut R) -> Dice {
    let mut dice: Dice = (0..count).map(|_| rng.roll_die()).collect();
    sort_descending(&mut dice);
    dice
}

/// Compare sorted dice pairwise. Returns `(attacker_losses, defender_losses)`.
///
/// Only the first `min(len)` pairs count; ties are attacker losses.
#[must_use]
pub fn compare_dice(attacker: &[u8], defender: &[u8]) -> (u32, u32) {
    attacker
        .iter()
        .zip(defender)
        .fold((0, 0), |(att, def), (a, d)| {
            if a > d {
                (att, def + 1)
            } else {
                (att + 1, def)
            }
        })
}

fn sort_descending(dice: &mut Dice) {
    dice.sort_unstable_by(|a, b| b.cmp(a));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedRng;
    use smallvec::smallvec;

    #[test]
    fn test_compare_dice_attacker_sweeps() {
        assert_eq!(compare_dice(&[6, 4], &[5, 3]), (0, 2));
    }

    #[test]
    fn test_compare_dice_ties_favor_defender() {
        assert_eq!(compare_dice(&[4], &[4]), (1, 0));
        assert_eq!(compare_dice(&[6, 4, 1], &[6, 4]), (2, 0));
    }

    #[test]
    fn test_compare_dice_uneven_lengths() {
        assert_eq!(compare_dice(&[6, 6, 6], &[1]), (0, 1));
        assert_eq!(compare_dice(&[2], &[1, 1]), (0, 1));
    }

    #[test]
    fn test_dice_counts() {
        let resolver = CombatResolver::default();
        assert_eq!(resolver.dice_counts(2, 1), (1, 1));
        assert_eq!(resolver.dice_counts(4, 2), (3, 2));
        assert_eq!(resolver.dice_counts(10, 10), (3, 2));
    }

    #[test]
    fn test_resolve_draws_attacker_first() {
        let resolver = CombatResolver::default();
        let mut rng = ScriptedRng::new(vec![4, 6, 3, 5]);

        let outcome = resolver.resolve(3, 5, &mut rng);

        assert_eq!(outcome.attacker_dice.as_slice(), &[6, 4]);
        assert_eq!(outcome.defender_dice.as_slice(), &[5, 3]);
        assert_eq!(outcome.attacker_losses, 0);
        assert_eq!(outcome.defender_losses, 2);
        assert!(!outcome.conquered);
        assert_eq!(outcome.target_armies, 3);
        assert_eq!(outcome.source_armies, 3);
    }

    #[test]
    fn test_conquest_moves_dice_count() {
        let resolver = CombatResolver::default();
        let outcome = resolver.resolve_with_dice(5, 2, smallvec![6, 5, 1], smallvec![2, 1]);

        assert!(outcome.conquered);
        assert_eq!(outcome.armies_moved, 3);
        assert_eq!(outcome.target_armies, 3);
        assert_eq!(outcome.source_armies, 2);
    }

    #[test]
    fn test_conquest_keeps_one_at_home() {
        let resolver = CombatResolver::default();
        let outcome = resolver.resolve_with_dice(2, 1, smallvec![3], smallvec![2]);

        assert!(outcome.conquered);
        assert_eq!(outcome.armies_moved, 1);
        assert_eq!(outcome.source_armies, 1);
        assert_eq!(outcome.target_armies, 1);
    }

    #[test]
    fn test_half_source_transfer() {
        let resolver = CombatResolver::from_config(
            &GameConfig::default().with_conquest_transfer(ConquestTransfer::HalfSource),
        );
        let outcome = resolver.resolve_with_dice(9, 1, smallvec![6, 2, 2], smallvec![1]);

        assert!(outcome.conquered);
        assert_eq!(outcome.armies_moved, 4);
        assert_eq!(outcome.source_armies, 5);
    }

    #[test]
    fn test_failed_attack_loses_armies() {
        let resolver = CombatResolver::default();
        let outcome = resolver.resolve_with_dice(4, 3, smallvec![3, 2, 1], smallvec![6, 2]);

        assert_eq!(outcome.attacker_losses, 2);
        assert_eq!(outcome.defender_losses, 0);
        assert_eq!(outcome.source_armies, 2);
        assert_eq!(outcome.target_armies, 3);
        assert_eq!(outcome.armies_moved, 0);
    }

    #[test]
    fn test_unsorted_dice_are_sorted() {
        let resolver = CombatResolver::default();
        let outcome = resolver.resolve_with_dice(4, 2, smallvec![1, 6, 3], smallvec![4, 5]);

        assert_eq!(outcome.attacker_dice.as_slice(), &[6, 3, 1]);
        assert_eq!(outcome.defender_dice.as_slice(), &[5, 4]);
        assert_eq!((outcome.attacker_losses, outcome.defender_losses), (1, 1));
    }
}
