//! Network analysis benchmarks
//!
//! Betweenness is the hot path (one BFS per source); this tracks it on a
//! mid-sized random graph alongside the full analysis pipeline.

use ahash::AHashMap;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gangland::core::config::EngineConfig;
use gangland::core::types::{AgentId, PairKey};
use gangland::model::{AgentProfile, PersonalityTraits, Relationship, RelationshipKind};
use gangland::network::{self, SocialGraph};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_population(
    n: usize,
    edge_chance: f64,
    seed: u64,
) -> (
    AHashMap<AgentId, AgentProfile>,
    AHashMap<PairKey, Relationship>,
) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut profiles = AHashMap::new();
    let ids: Vec<AgentId> = (0..n).map(|i| AgentId::from(format!("bot-{i:04}"))).collect();
    for id in &ids {
        let traits = PersonalityTraits::new(
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
        );
        profiles.insert(
            id.clone(),
            AgentProfile::new(id.clone(), id.to_string(), traits, None, 0),
        );
    }

    let mut relationships = AHashMap::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen::<f64>() < edge_chance {
                let key = PairKey::new(&ids[i], &ids[j]);
                let affinity = rng.gen_range(-1.0..1.0);
                relationships.insert(
                    key.clone(),
                    Relationship::seeded(key, affinity, RelationshipKind::Acquaintance),
                );
            }
        }
    }
    (profiles, relationships)
}

fn bench_betweenness(c: &mut Criterion) {
    let config = EngineConfig::default();
    let (profiles, relationships) = random_population(200, 0.05, 7);
    let graph = SocialGraph::build(&profiles, &relationships, &config.network);

    c.bench_function("betweenness_200_nodes", |b| {
        b.iter(|| network::centrality::betweenness(black_box(&graph)))
    });
}

fn bench_full_analysis(c: &mut Criterion) {
    let config = EngineConfig::default();
    let (profiles, relationships) = random_population(200, 0.05, 7);

    c.bench_function("full_analysis_200_nodes", |b| {
        b.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            network::analyze(
                black_box(&profiles),
                black_box(&relationships),
                &config.network,
                &mut rng,
            )
        })
    });
}

criterion_group!(benches, bench_betweenness, bench_full_analysis);
criterion_main!(benches);
