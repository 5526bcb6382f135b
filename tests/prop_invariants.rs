//! Property tests for combat, reinforcements and whole-game invariants.
//!
//! Run with: PROPTEST_CASES=10000 cargo test --release prop_invariants

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use conquest_engine::core::{
    Action, ConquestTransfer, GameConfig, Phase, PlayerSpec, ScriptedRng,
};
use conquest_engine::map::TerritoryId;
use conquest_engine::rules::{
    check_invariants, compare_dice, reinforcements, CombatResolver, GameEngine,
};

fn roster(count: usize) -> Vec<PlayerSpec> {
    (0..count).map(|i| PlayerSpec::active(format!("Player {i}"))).collect()
}

/// Any action, legal or not, over the classic map and a few bad ids.
fn any_action() -> impl Strategy<Value = Action> {
    let territory = (0u8..20).prop_map(TerritoryId::new);
    prop_oneof![
        territory.clone().prop_map(|territory| Action::DeployArmy { territory }),
        Just(Action::SkipToAttack),
        territory.clone().prop_map(|territory| Action::SelectAttackSource { territory }),
        territory.clone().prop_map(|target| Action::Attack { target }),
        Just(Action::CancelSelection),
        Just(Action::BeginFortify),
        territory.clone().prop_map(|territory| Action::SelectFortifySource { territory }),
        territory.prop_map(|territory| Action::SelectFortifyDestination { territory }),
        (0u32..6).prop_map(|amount| Action::Fortify { amount }),
        Just(Action::EndTurn),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Legal playouts never break a state invariant.
    #[test]
    fn prop_playout_keeps_invariants(
        seed in any::<u64>(),
        players in 2usize..=4,
        steps in 50usize..800,
    ) {
        let mut engine = GameEngine::classic(seed);
        engine.initialize(&roster(players)).unwrap();
        let mut policy = ChaCha8Rng::seed_from_u64(seed.rotate_left(17));

        for _ in 0..steps {
            let actions = engine.legal_actions();
            if actions.is_empty() {
                break;
            }
            let attacking: Vec<Action> = actions
                .iter()
                .copied()
                .filter(|a| matches!(a, Action::Attack { .. } | Action::SelectAttackSource { .. }))
                .collect();
            let action = if !attacking.is_empty() && policy.gen_bool(0.85) {
                attacking[policy.gen_range(0..attacking.len())]
            } else {
                actions[policy.gen_range(0..actions.len())]
            };

            let result = engine.apply(action);
            prop_assert!(result.is_ok(), "{action:?} listed but rejected: {result:?}");

            let violations = check_invariants(engine.state(), engine.graph());
            prop_assert!(violations.is_empty(), "after {action:?}: {violations:?}");
        }

        if let Some(winner) = engine.winner() {
            prop_assert_eq!(engine.state().phase, Phase::Victory);
            prop_assert_eq!(engine.owned_count(winner), engine.graph().len());
            prop_assert_eq!(engine.in_play_players(), vec![winner]);
        }
    }

    /// Arbitrary actions either apply or leave the state untouched.
    #[test]
    fn prop_rejections_are_atomic(
        seed in any::<u64>(),
        actions in proptest::collection::vec(any_action(), 1..120),
    ) {
        let mut engine = GameEngine::classic(seed);
        engine.initialize(&roster(3)).unwrap();

        for action in actions {
            let before = engine.snapshot();
            match engine.apply(action) {
                Ok(after) => prop_assert_eq!(&after, engine.state()),
                Err(_) => prop_assert_eq!(&before, engine.state()),
            }
            let violations = check_invariants(engine.state(), engine.graph());
            prop_assert!(violations.is_empty(), "after {action:?}: {violations:?}");
        }
    }

    /// Combat never strands the source and conquest always moves armies in.
    #[test]
    fn prop_combat_bounds(
        attacker in 2u32..60,
        defender in 1u32..60,
        rolls in proptest::collection::vec(1u8..=6, 5),
        half_source in any::<bool>(),
    ) {
        let rule = if half_source {
            ConquestTransfer::HalfSource
        } else {
            ConquestTransfer::DiceCount
        };
        let resolver = CombatResolver::from_config(
            &GameConfig::default().with_conquest_transfer(rule),
        );
        let outcome = resolver.resolve(attacker, defender, &mut ScriptedRng::new(rolls));
        let (attack_count, defend_count) = resolver.dice_counts(attacker, defender);

        prop_assert_eq!(outcome.attacker_dice.len() as u32, attack_count);
        prop_assert_eq!(outcome.defender_dice.len() as u32, defend_count);
        prop_assert_eq!(
            outcome.attacker_losses + outcome.defender_losses,
            attack_count.min(defend_count)
        );
        prop_assert!(outcome.source_armies >= 1);
        prop_assert_eq!(outcome.conquered, outcome.defender_losses == defender);

        if outcome.conquered {
            prop_assert_eq!(outcome.attacker_losses, 0);
            prop_assert!(outcome.armies_moved >= 1);
            prop_assert_eq!(outcome.target_armies, outcome.armies_moved);
            prop_assert_eq!(outcome.source_armies + outcome.armies_moved, attacker);
        } else {
            prop_assert!(outcome.target_armies >= 1);
            prop_assert_eq!(outcome.armies_moved, 0);
        }
    }

    /// Ties always go to the defender.
    #[test]
    fn prop_ties_favor_defender(face in 1u8..=6) {
        prop_assert_eq!(compare_dice(&[face], &[face]), (1, 0));
    }

    /// Reinforcements follow `max(3, n / 3)`.
    #[test]
    fn prop_reinforcement_formula(owned in 0usize..200) {
        let expected = if owned <= 8 { 3 } else { (owned / 3) as u32 }.max(3);
        prop_assert_eq!(reinforcements(owned), expected);
    }
}
