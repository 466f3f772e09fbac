//! Gang emergence simulation
//! Seeds a town of bots with varied personalities, feeds the engine a few
//! hundred interactions, and watches gangs, clusters, and influencers emerge.

use gangland::engine::SocialEngine;
use gangland::model::{InteractionKind, Outcome, PersonalityTraits};
use gangland::{AgentId, EngineConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const STEPS: u64 = 10;
const POPULATION: usize = 40;
const INTERACTIONS_PER_STEP: usize = 60;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gangland=info")),
        )
        .init();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║              GANGLAND: GANG EMERGENCE SIMULATION             ║");
    println!("║         {} bots, {} steps, {} interactions per step         ║",
        POPULATION, STEPS, INTERACTIONS_PER_STEP
    );
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut engine = SocialEngine::new(EngineConfig::with_seed(42));

    println!("Spawning {} bots with varied personalities...\n", POPULATION);
    let mut ids = Vec::with_capacity(POPULATION);
    for i in 0..POPULATION {
        let personality = PersonalityTraits::new(
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
        );
        let faction = match i % 4 {
            0 => Some("dockside".to_string()),
            1 => Some("uptown".to_string()),
            _ => None,
        };
        let id = format!("bot-{i:03}");
        let name = format!("Bot {i:03}");
        engine
            .register(id.as_str(), name, personality, faction)
            .expect("fresh id");
        ids.push(AgentId::from(id.as_str()));
    }

    for step in 1..=STEPS {
        // Interactions biased toward already-friendly pairs so cliques deepen
        for _ in 0..INTERACTIONS_PER_STEP {
            let a = &ids[rng.gen_range(0..ids.len())];
            let b = &ids[rng.gen_range(0..ids.len())];
            if a == b {
                continue;
            }
            let affinity = engine
                .relationship(a, b)
                .map(|r| r.affinity)
                .unwrap_or(0.0);
            let (kind, outcome) = pick_interaction(&mut rng, affinity);
            engine
                .record_interaction(a, b, kind, outcome, None)
                .expect("both registered");
        }

        let report = engine.run_step();
        println!("── Step {} ──────────────────────────────────────", step);
        println!(
            "   nodes {}  edges {}  density {:.3}",
            report.network_analysis.metrics.node_count,
            report.network_analysis.metrics.edge_count,
            report.network_analysis.metrics.density,
        );
        println!(
            "   clusters {}  isolates {}  proposals {}  gangs formed {}",
            report.network_analysis.clusters.len(),
            report.network_analysis.isolates.len(),
            report.gang_proposals.len(),
            report.gangs_formed.len(),
        );
        for gang in &report.gangs_formed {
            println!("   ★ new gang: {}", gang);
        }
        for action in &report.coordinated_actions {
            println!(
                "   ⚔ {:?} by {} ({:?}, {} participants)",
                action.kind,
                action.gang,
                action.status,
                action.participants.len()
            );
        }
    }

    println!("\n═══ FINAL STATE ═══════════════════════════════════");
    let snapshot = engine.export_state();
    println!(
        "agents {}  relationships {}  avg affinity {:+.3}  gangs {}",
        snapshot.analytics.agent_count,
        snapshot.analytics.relationship_count,
        snapshot.analytics.average_affinity,
        snapshot.analytics.gang_count,
    );
    println!("\nTop influencers:");
    for id in snapshot.network_analysis.top_influencers(5) {
        if let Some(agent) = snapshot.agents.iter().find(|a| a.id == id) {
            println!(
                "   {:10} influence {:5.1}  popularity {:5.1}  gang {}",
                agent.name,
                agent.influence,
                agent.popularity,
                agent
                    .gang
                    .as_ref()
                    .map(|g| g.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            );
        }
    }
    println!("\nClusters:");
    for cluster in &snapshot.network_analysis.clusters {
        println!(
            "   #{:2} {:?} members {:2}  cohesion {:.2}  avg influence {:.1}",
            cluster.id,
            cluster.cluster_type,
            cluster.members.len(),
            cluster.cohesion,
            cluster.average_influence,
        );
    }
}

/// Friendly pairs mostly cooperate; hostile pairs mostly fight
fn pick_interaction(rng: &mut ChaCha8Rng, affinity: f32) -> (InteractionKind, Outcome) {
    let roll: f32 = rng.gen();
    let kind = if affinity > 0.2 {
        match (roll * 5.0) as u32 {
            0 => InteractionKind::Trade,
            1 => InteractionKind::Cooperation,
            2 => InteractionKind::Gift,
            3 => InteractionKind::Help,
            _ => InteractionKind::Chat,
        }
    } else if affinity < -0.2 {
        if roll < 0.7 {
            InteractionKind::Combat
        } else {
            InteractionKind::Chat
        }
    } else {
        match (roll * 3.0) as u32 {
            0 => InteractionKind::Trade,
            1 => InteractionKind::Combat,
            _ => InteractionKind::Chat,
        }
    };
    let outcome = if rng.gen::<f32>() < 0.75 {
        Outcome::Positive
    } else {
        Outcome::Negative
    };
    (kind, outcome)
}
