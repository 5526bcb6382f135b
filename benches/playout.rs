//! Benchmarks for full games and the hot paths inside them.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use conquest_engine::core::{Action, GameRng, PlayerSpec};
use conquest_engine::map::TerritoryId;
use conquest_engine::rules::{CombatResolver, GameEngine};

fn roster(count: usize) -> Vec<PlayerSpec> {
    (0..count).map(|i| PlayerSpec::active(format!("Player {i}"))).collect()
}

/// Play an aggressive random game for at most `steps` actions.
fn playout(seed: u64, players: usize, steps: usize) -> GameEngine {
    let mut engine = GameEngine::classic(seed);
    engine
        .initialize(&roster(players))
        .expect("roster should seat");
    let mut policy = ChaCha8Rng::seed_from_u64(seed);

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
        let action = if !attacking.is_empty() && policy.gen_bool(0.9) {
            attacking[policy.gen_range(0..attacking.len())]
        } else {
            actions[policy.gen_range(0..actions.len())]
        };
        engine.apply(action).expect("listed action should apply");
    }
    engine
}

fn bench_playout(c: &mut Criterion) {
    c.bench_function("playout_2p", |b| {
        b.iter(|| black_box(playout(black_box(42), 2, 2_000)))
    });

    c.bench_function("playout_4p", |b| {
        b.iter(|| black_box(playout(black_box(42), 4, 2_000)))
    });
}

fn bench_legal_actions(c: &mut Criterion) {
    let engine = playout(7, 3, 150);

    c.bench_function("legal_actions", |b| {
        b.iter(|| black_box(engine.legal_actions()))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let engine = playout(7, 3, 400);

    c.bench_function("snapshot_clone", |b| b.iter(|| black_box(engine.snapshot())));
}

fn bench_combat(c: &mut Criterion) {
    let resolver = CombatResolver::default();
    let mut rng = GameRng::new(99);

    c.bench_function("combat_resolve", |b| {
        b.iter(|| black_box(resolver.resolve(black_box(10), black_box(6), &mut rng)))
    });
}

fn bench_attack_targets(c: &mut Criterion) {
    let engine = playout(11, 2, 100);

    c.bench_function("attack_targets", |b| {
        b.iter(|| {
            for id in 0..16 {
                black_box(engine.attack_targets(TerritoryId::new(id)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_playout,
    bench_legal_actions,
    bench_snapshot,
    bench_combat,
    bench_attack_targets
);
criterion_main!(benches);
