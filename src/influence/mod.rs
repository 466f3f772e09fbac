//! Influence spreading
//!
//! Opinions and behaviors travel outward from a source agent, gated by
//! relationship strength and the target's susceptibility to that kind of
//! influence. Spreading is a visited-set BFS like the reputation cascade,
//! but depth is earned: a high-influence source reaches further, and every
//! successful spread slightly raises the source's influence for next time.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

use crate::core::config::InfluenceConfig;
use crate::core::types::{AgentId, PairKey, Tick};
use crate::model::{AgentProfile, PersonalityTraits, Relationship};

/// What is being spread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfluenceKind {
    Behavior,
    Opinion,
    Action,
    Emotion,
}

/// Result of one spread invocation; immutable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfluenceEvent {
    pub id: Uuid,
    pub source: AgentId,
    pub kind: InfluenceKind,
    pub message: String,
    pub initial_strength: f32,
    /// Agents successfully influenced, in visit order
    pub reached: Vec<AgentId>,
    /// Deepest hop that landed
    pub depth_reached: usize,
    pub tick: Tick,
}

/// Stance taken in an opinion cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    Adopter,
    Resister,
    Undecided,
}

/// Result of a binary-adoption simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpinionCascade {
    pub id: Uuid,
    pub source: AgentId,
    pub opinion: String,
    pub adopters: Vec<AgentId>,
    pub resisters: Vec<AgentId>,
    pub undecided: Vec<AgentId>,
    pub tick: Tick,
}

/// How receptive a personality is to a kind of influence, in [0, 1].
///
/// Behavior copies need a weak sense of self (low loyalty helps); opinions
/// travel socially; actions need risk appetite; emotions land hardest on
/// the impatient.
pub fn susceptibility(kind: InfluenceKind, traits: &PersonalityTraits) -> f32 {
    let raw = match kind {
        InfluenceKind::Behavior => 0.4 + (1.0 - traits.loyalty) * 0.4 + traits.curiosity * 0.2,
        InfluenceKind::Opinion => 0.3 + traits.sociability * 0.5 + traits.curiosity * 0.2,
        InfluenceKind::Action => 0.3 + traits.risk_tolerance * 0.5 + traits.aggression * 0.2,
        InfluenceKind::Emotion => 0.4 + (1.0 - traits.patience) * 0.4 + traits.sociability * 0.2,
    };
    raw.clamp(0.0, 1.0)
}

fn adjacency_of(
    relationships: &AHashMap<PairKey, Relationship>,
) -> AHashMap<AgentId, Vec<(AgentId, f32, f32)>> {
    let mut adjacency: AHashMap<AgentId, Vec<(AgentId, f32, f32)>> = AHashMap::new();
    for rel in relationships.values() {
        adjacency
            .entry(rel.key.first().clone())
            .or_default()
            .push((rel.key.second().clone(), rel.affinity, rel.trust));
        adjacency
            .entry(rel.key.second().clone())
            .or_default()
            .push((rel.key.first().clone(), rel.affinity, rel.trust));
    }
    for neighbors in adjacency.values_mut() {
        neighbors.sort_by(|a, b| a.0.cmp(&b.0));
    }
    adjacency
}

/// Spread an influence from a source agent.
///
/// Maximum depth is `ceil(source influence / depth_divisor)`. At each hop
/// the carried strength is multiplied by the relationship's affinity mapped
/// to [0, 1], its trust, the source's influence fraction, the target's
/// susceptibility, and the fixed decay; hops under the minimum strength are
/// dropped and not recorded as reached. A spread that lands anywhere nudges
/// the source's influence upward.
pub fn spread(
    source: &AgentId,
    kind: InfluenceKind,
    message: impl Into<String>,
    initial_strength: f32,
    profiles: &mut AHashMap<AgentId, AgentProfile>,
    relationships: &AHashMap<PairKey, Relationship>,
    config: &InfluenceConfig,
    tick: Tick,
) -> InfluenceEvent {
    let message = message.into();
    let (source_influence, max_depth) = profiles
        .get(source)
        .map(|p| {
            (
                p.influence,
                (p.influence / config.depth_divisor).ceil() as usize,
            )
        })
        .unwrap_or((0.0, 0));

    let adjacency = adjacency_of(relationships);
    let mut visited: AHashSet<AgentId> = AHashSet::new();
    visited.insert(source.clone());

    let mut reached = Vec::new();
    let mut depth_reached = 0usize;
    let mut queue: VecDeque<(AgentId, usize, f32)> = VecDeque::new();
    queue.push_back((source.clone(), 0, initial_strength));

    while let Some((current, depth, strength)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        let Some(neighbors) = adjacency.get(&current) else {
            continue;
        };
        for (neighbor, affinity, trust) in neighbors {
            if visited.contains(neighbor) {
                continue;
            }
            let Some(target) = profiles.get(neighbor) else {
                continue;
            };
            if !target.active {
                continue;
            }

            let normalized_affinity = (affinity + 1.0) / 2.0;
            let next_strength = strength
                * normalized_affinity
                * trust
                * (source_influence / 100.0)
                * susceptibility(kind, &target.personality)
                * config.decay;
            if next_strength < config.min_strength {
                continue;
            }

            visited.insert(neighbor.clone());
            reached.push(neighbor.clone());
            depth_reached = depth_reached.max(depth + 1);
            queue.push_back((neighbor.clone(), depth + 1, next_strength));
        }
    }

    if !reached.is_empty() {
        if let Some(profile) = profiles.get_mut(source) {
            // Repeated successful spreading compounds future reach
            profile.gain_influence(config.source_gain);
        }
    }

    tracing::debug!(
        %source,
        ?kind,
        reached = reached.len(),
        depth_reached,
        "influence spread"
    );

    InfluenceEvent {
        id: Uuid::new_v4(),
        source: source.clone(),
        kind,
        message,
        initial_strength,
        reached,
        depth_reached,
        tick,
    }
}

/// Strength past which a personality adopts an incoming opinion.
///
/// Loyal agents hold their existing views; curious ones try new ones on.
fn adoption_threshold(traits: &PersonalityTraits) -> f32 {
    (0.3 + traits.loyalty * 0.3 - traits.curiosity * 0.2).clamp(0.05, 0.9)
}

/// Binary-adoption variant of spreading.
///
/// Candidates whose incoming strength clears their personal threshold
/// become adopters and keep propagating at full carried strength; those
/// far below (under half the threshold) become resisters; the rest stay
/// undecided. Resisters and the undecided do not propagate.
pub fn simulate_opinion_cascade(
    source: &AgentId,
    opinion: impl Into<String>,
    initial_strength: f32,
    profiles: &AHashMap<AgentId, AgentProfile>,
    relationships: &AHashMap<PairKey, Relationship>,
    config: &InfluenceConfig,
    tick: Tick,
) -> OpinionCascade {
    let adjacency = adjacency_of(relationships);
    let mut visited: AHashSet<AgentId> = AHashSet::new();
    visited.insert(source.clone());

    let mut adopters = Vec::new();
    let mut resisters = Vec::new();
    let mut undecided = Vec::new();

    let mut queue: VecDeque<(AgentId, f32)> = VecDeque::new();
    queue.push_back((source.clone(), initial_strength));

    while let Some((current, strength)) = queue.pop_front() {
        let Some(neighbors) = adjacency.get(&current) else {
            continue;
        };
        for (neighbor, affinity, trust) in neighbors {
            if visited.contains(neighbor) {
                continue;
            }
            let Some(target) = profiles.get(neighbor) else {
                continue;
            };
            if !target.active {
                continue;
            }

            let normalized_affinity = (affinity + 1.0) / 2.0;
            let incoming = strength * normalized_affinity * trust * config.decay;
            if incoming < config.min_strength {
                continue;
            }
            visited.insert(neighbor.clone());

            let threshold = adoption_threshold(&target.personality);
            if incoming >= threshold {
                adopters.push(neighbor.clone());
                queue.push_back((neighbor.clone(), incoming));
            } else if incoming < threshold * 0.5 {
                resisters.push(neighbor.clone());
            } else {
                undecided.push(neighbor.clone());
            }
        }
    }

    OpinionCascade {
        id: Uuid::new_v4(),
        source: source.clone(),
        opinion: opinion.into(),
        adopters,
        resisters,
        undecided,
        tick,
    }
}
