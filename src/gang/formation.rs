//! Organic gang formation
//!
//! Scans the relationship table for mutual-high-affinity groups of
//! ungrouped agents and proposes named gangs. Detection never mutates
//! agent state; executing a proposal is the engine's explicit,
//! separate step.

use ahash::{AHashMap, AHashSet};
use ordered_float::OrderedFloat;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::GangConfig;
use crate::core::types::{AgentId, PairKey, Tick};
use crate::model::{AgentProfile, PersonalityArchetype, PersonalityTraits, Relationship};

/// A proposed gang; immutable once produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GangFormationProposal {
    pub proposer: AgentId,
    /// 3 to 8 members, proposer included
    pub members: Vec<AgentId>,
    pub average_affinity: f32,
    /// Trait axes where the group's center exceeds the dominance threshold
    pub dominant_traits: Vec<String>,
    /// Modal archetype among members
    pub archetype: PersonalityArchetype,
    /// Generated gang name, also used as the gang tag on execution
    pub name: String,
    /// Human-readable why
    pub reason: String,
    pub tick: Tick,
}

/// Signed affinity between a pair, zero when no relationship exists.
///
/// A never-interacted pair is a valid state, not an error.
fn affinity_of(relationships: &AHashMap<PairKey, Relationship>, a: &AgentId, b: &AgentId) -> f32 {
    relationships
        .get(&PairKey::new(a, b))
        .map(|r| r.affinity)
        .unwrap_or(0.0)
}

/// Scan for near-cliques of mutual high affinity among ungrouped agents.
///
/// Candidates are accepted only if they clear the threshold against every
/// member already accepted (mutual, not star-shaped around the proposer).
/// Proposals come back sorted by descending average affinity.
pub fn propose_gangs(
    profiles: &AHashMap<AgentId, AgentProfile>,
    relationships: &AHashMap<PairKey, Relationship>,
    config: &GangConfig,
    rng: &mut ChaCha8Rng,
    tick: Tick,
) -> Vec<GangFormationProposal> {
    let mut ungrouped: Vec<&AgentProfile> = profiles
        .values()
        .filter(|p| p.active && p.gang.is_none())
        .collect();
    ungrouped.sort_by(|a, b| a.id.cmp(&b.id));

    let mut processed: AHashSet<AgentId> = AHashSet::new();
    let mut proposals = Vec::new();

    for seed in &ungrouped {
        if processed.contains(&seed.id) {
            continue;
        }

        // Candidates by affinity to the seed, strongest first
        let mut candidates: Vec<(&AgentProfile, f32)> = ungrouped
            .iter()
            .filter(|p| p.id != seed.id && !processed.contains(&p.id))
            .map(|p| (*p, affinity_of(relationships, &seed.id, &p.id)))
            .filter(|(_, affinity)| *affinity >= config.affinity_threshold)
            .collect();
        candidates.sort_by_key(|(p, affinity)| {
            (std::cmp::Reverse(OrderedFloat(*affinity)), p.id.clone())
        });

        let mut members: Vec<&AgentProfile> = vec![seed];
        for (candidate, _) in candidates {
            if members.len() >= config.max_size {
                break;
            }
            let mutual = members.iter().all(|m| {
                affinity_of(relationships, &m.id, &candidate.id) >= config.affinity_threshold
            });
            if mutual {
                members.push(candidate);
            }
        }

        if members.len() < config.min_size {
            continue;
        }

        for m in &members {
            processed.insert(m.id.clone());
        }
        proposals.push(build_proposal(&members, relationships, config, rng, tick));
    }

    proposals.sort_by_key(|p| {
        (
            std::cmp::Reverse(OrderedFloat(p.average_affinity)),
            std::cmp::Reverse(p.members.len()),
            p.proposer.clone(),
        )
    });
    tracing::debug!(count = proposals.len(), "gang formation scan complete");
    proposals
}

fn build_proposal(
    members: &[&AgentProfile],
    relationships: &AHashMap<PairKey, Relationship>,
    config: &GangConfig,
    rng: &mut ChaCha8Rng,
    tick: Tick,
) -> GangFormationProposal {
    let mut affinity_sum = 0.0;
    let mut pairs = 0usize;
    for (i, a) in members.iter().enumerate() {
        for b in &members[i + 1..] {
            affinity_sum += affinity_of(relationships, &a.id, &b.id);
            pairs += 1;
        }
    }
    let average_affinity = if pairs > 0 {
        affinity_sum / pairs as f32
    } else {
        0.0
    };

    let traits: Vec<PersonalityTraits> = members.iter().map(|m| m.personality).collect();
    let center = PersonalityTraits::mean_of(&traits);
    let dominant_traits: Vec<String> = PersonalityTraits::AXIS_NAMES
        .iter()
        .zip(center.as_array())
        .filter(|(_, v)| *v > config.dominant_trait_threshold)
        .map(|(name, _)| (*name).to_string())
        .collect();

    let mut counts: AHashMap<PersonalityArchetype, usize> = AHashMap::new();
    for m in members {
        *counts.entry(m.personality.archetype()).or_insert(0) += 1;
    }
    let archetype = counts
        .into_iter()
        .max_by_key(|(_, c)| *c)
        .map(|(a, _)| a)
        .unwrap_or(PersonalityArchetype::Balanced);

    let name = generate_name(archetype, rng);
    let reason = format!(
        "{} agents with mutual affinity {:.2} and a shared {} streak",
        members.len(),
        average_affinity,
        archetype.label()
    );

    GangFormationProposal {
        proposer: members[0].id.clone(),
        members: members.iter().map(|m| m.id.clone()).collect(),
        average_affinity,
        dominant_traits,
        archetype,
        name,
        reason,
        tick,
    }
}

// Themed word lists per archetype; the rng pick keeps names varied while
// staying on theme.
const ENFORCER_PREFIXES: [&str; 4] = ["Iron", "Blood", "Grim", "Savage"];
const SOCIALITE_PREFIXES: [&str; 4] = ["Velvet", "Golden", "Neon", "Silk"];
const HUSTLER_PREFIXES: [&str; 4] = ["Gilded", "Copper", "Black Market", "Silver"];
const DAREDEVIL_PREFIXES: [&str; 4] = ["Reckless", "Midnight", "Free Fall", "Wildcard"];
const LOYALIST_PREFIXES: [&str; 4] = ["Sworn", "Old Guard", "True", "Oathbound"];
const EXPLORER_PREFIXES: [&str; 4] = ["Wandering", "Far Side", "Drifting", "Outland"];
const STRATEGIST_PREFIXES: [&str; 4] = ["Silent", "Long Game", "Patient", "Still Water"];
const BALANCED_PREFIXES: [&str; 4] = ["Crossroad", "Union", "Backstreet", "Harbor"];

const SUFFIXES: [&str; 6] = ["Crew", "Syndicate", "Wolves", "Circle", "Company", "Brotherhood"];

fn generate_name(archetype: PersonalityArchetype, rng: &mut ChaCha8Rng) -> String {
    let prefixes: &[&str] = match archetype {
        PersonalityArchetype::Enforcer => &ENFORCER_PREFIXES,
        PersonalityArchetype::Socialite => &SOCIALITE_PREFIXES,
        PersonalityArchetype::Hustler => &HUSTLER_PREFIXES,
        PersonalityArchetype::Daredevil => &DAREDEVIL_PREFIXES,
        PersonalityArchetype::Loyalist => &LOYALIST_PREFIXES,
        PersonalityArchetype::Explorer => &EXPLORER_PREFIXES,
        PersonalityArchetype::Strategist => &STRATEGIST_PREFIXES,
        PersonalityArchetype::Balanced => &BALANCED_PREFIXES,
    };
    let prefix = prefixes.choose(rng).unwrap_or(&"Backstreet");
    let suffix = SUFFIXES.choose(rng).unwrap_or(&"Crew");
    format!("{prefix} {suffix}")
}
