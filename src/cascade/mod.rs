//! Reputation cascades
//!
//! One observed action ripples outward through the relationship graph:
//! friends hear about it first and care the most, friends-of-friends less,
//! and the effect dies out with distance. The traversal is a depth-limited
//! BFS with a visited set, so cyclic graphs terminate and every agent is
//! affected at most once per cascade.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

use crate::core::config::CascadeConfig;
use crate::core::types::{AgentId, PairKey, Tick};
use crate::model::{AgentProfile, Relationship, ReputationCategory};

/// Closed set of actions that trigger reputation ripples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeActionKind {
    Help,
    Betray,
    Attack,
    Gift,
    Defend,
    Steal,
    Trade,
}

impl CascadeActionKind {
    /// Base reputation impact at depth zero distance from the actor
    pub fn base_impact(&self) -> f32 {
        match self {
            CascadeActionKind::Help => 8.0,
            CascadeActionKind::Defend => 10.0,
            CascadeActionKind::Gift => 5.0,
            CascadeActionKind::Trade => 3.0,
            CascadeActionKind::Steal => -8.0,
            CascadeActionKind::Attack => -10.0,
            CascadeActionKind::Betray => -15.0,
        }
    }

    pub fn category(&self) -> ReputationCategory {
        match self {
            CascadeActionKind::Attack | CascadeActionKind::Defend => ReputationCategory::Combat,
            CascadeActionKind::Trade | CascadeActionKind::Steal | CascadeActionKind::Gift => {
                ReputationCategory::Trade
            }
            CascadeActionKind::Help => ReputationCategory::Social,
            CascadeActionKind::Betray => ReputationCategory::Reliability,
        }
    }
}

/// How an action's outcome scales its impact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeOutcome {
    Positive,
    Negative,
}

/// The triggering action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadeTrigger {
    pub actor: AgentId,
    pub kind: CascadeActionKind,
    pub target: Option<AgentId>,
    pub outcome: CascadeOutcome,
}

/// One affected agent in a cascade result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadeNode {
    pub agent: AgentId,
    pub depth: usize,
    pub reputation_delta: f32,
    /// Set when |reputation_delta| cleared the significance threshold
    pub influenced: bool,
}

/// Immutable summary of one triggered cascade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationCascade {
    pub id: Uuid,
    pub trigger: CascadeTrigger,
    pub affected: Vec<CascadeNode>,
    /// Agents reached (excluding the actor)
    pub reach: usize,
    pub average_impact: f32,
    pub tick: Tick,
}

/// Propagate the reputation effect of one action outward from the actor.
///
/// Each hop attenuates the carried strength by the destination
/// relationship's affinity (non-positive affinity halts that edge: nobody
/// relays news through someone they dislike) and a per-hop decay; hops
/// falling under the minimum strength stop. The reputation delta applied at
/// a node is `base impact x depth_decay^depth x strength`, landing on both
/// the global score and the action's category, clamped. The relationship
/// the cascade arrived through gets a small affinity nudge in the same
/// direction.
pub fn propagate(
    trigger: CascadeTrigger,
    profiles: &mut AHashMap<AgentId, AgentProfile>,
    relationships: &mut AHashMap<PairKey, Relationship>,
    config: &CascadeConfig,
    tick: Tick,
) -> ReputationCascade {
    let signed_impact = match trigger.outcome {
        CascadeOutcome::Positive => trigger.kind.base_impact(),
        CascadeOutcome::Negative => -trigger.kind.base_impact(),
    };
    let category = trigger.kind.category();

    // One adjacency index per cascade; the per-node scan over the whole
    // table would make deep cascades quadratic in population size.
    let mut adjacency: AHashMap<AgentId, Vec<(AgentId, f32)>> = AHashMap::new();
    for rel in relationships.values() {
        adjacency
            .entry(rel.key.first().clone())
            .or_default()
            .push((rel.key.second().clone(), rel.affinity));
        adjacency
            .entry(rel.key.second().clone())
            .or_default()
            .push((rel.key.first().clone(), rel.affinity));
    }
    for neighbors in adjacency.values_mut() {
        neighbors.sort_by(|a, b| a.0.cmp(&b.0));
    }

    let mut visited: AHashSet<AgentId> = AHashSet::new();
    visited.insert(trigger.actor.clone());

    let mut affected = Vec::new();
    let mut queue: VecDeque<(AgentId, usize, f32)> = VecDeque::new();
    queue.push_back((trigger.actor.clone(), 0, 1.0));

    while let Some((current, depth, strength)) = queue.pop_front() {
        if depth >= config.max_depth {
            continue;
        }

        let neighbors = adjacency.get(&current).cloned().unwrap_or_default();
        for (neighbor, affinity) in neighbors {
            if visited.contains(&neighbor) {
                continue;
            }
            // Non-positive affinity halts propagation along this edge
            if affinity <= 0.0 {
                continue;
            }
            let next_strength = strength * affinity * config.hop_decay;
            if next_strength < config.min_strength {
                continue;
            }
            visited.insert(neighbor.clone());

            let next_depth = depth + 1;
            let delta =
                signed_impact * config.depth_decay.powi(next_depth as i32) * next_strength;
            let influenced = delta.abs() > config.significance_threshold;

            if let Some(profile) = profiles.get_mut(&neighbor) {
                profile.reputation.apply(category, delta);
            }
            if let Some(rel) = relationships.get_mut(&PairKey::new(&current, &neighbor)) {
                rel.affinity =
                    (rel.affinity + delta * config.affinity_nudge_factor).clamp(-1.0, 1.0);
            }

            affected.push(CascadeNode {
                agent: neighbor.clone(),
                depth: next_depth,
                reputation_delta: delta,
                influenced,
            });
            queue.push_back((neighbor, next_depth, next_strength));
        }
    }

    let reach = affected.len();
    let average_impact = if reach > 0 {
        affected.iter().map(|n| n.reputation_delta.abs()).sum::<f32>() / reach as f32
    } else {
        0.0
    };

    tracing::debug!(
        actor = %trigger.actor,
        kind = ?trigger.kind,
        reach,
        average_impact,
        "reputation cascade"
    );

    ReputationCascade {
        id: Uuid::new_v4(),
        trigger,
        affected,
        reach,
        average_impact,
        tick,
    }
}
