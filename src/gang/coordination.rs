//! Coordinated gang actions
//!
//! Scores each member's willingness to follow a coordinator into an action,
//! derives a priority from the action kind and gang cohesion, and resolves
//! execution stochastically. Success effects apply atomically; a failed
//! action only flips its status.

use ahash::AHashMap;
use ordered_float::OrderedFloat;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::config::CoordinationConfig;
use crate::core::types::{AgentId, GangId, PairKey, Tick};
use crate::model::{AgentProfile, Relationship, ReputationCategory};

/// Closed set of coordinated action kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    War,
    Raid,
    Defense,
    Recruitment,
    Mission,
}

impl ActionKind {
    /// Base priority weight; wars always matter more than recruitment drives
    fn base_weight(&self) -> f32 {
        match self {
            ActionKind::War => 0.9,
            ActionKind::Defense => 0.8,
            ActionKind::Raid => 0.7,
            ActionKind::Mission => 0.5,
            ActionKind::Recruitment => 0.4,
        }
    }

    /// Which reputation category a successful action feeds
    fn reputation_category(&self) -> ReputationCategory {
        match self {
            ActionKind::War | ActionKind::Raid | ActionKind::Defense => ReputationCategory::Combat,
            ActionKind::Recruitment => ReputationCategory::Social,
            ActionKind::Mission => ReputationCategory::Reliability,
        }
    }

    /// Reputation gained per participant on success
    fn success_reputation(&self) -> f32 {
        match self {
            ActionKind::War => 5.0,
            ActionKind::Defense => 4.0,
            ActionKind::Raid => 4.0,
            ActionKind::Mission => 3.0,
            ActionKind::Recruitment => 2.0,
        }
    }

    /// Personality-alignment term of the willingness score
    fn alignment(&self, profile: &AgentProfile) -> f32 {
        let t = &profile.personality;
        match self {
            ActionKind::War => t.aggression * 0.2 + t.loyalty * 0.1,
            ActionKind::Raid => t.risk_tolerance * 0.2 + t.greed * 0.1,
            ActionKind::Defense => t.loyalty * 0.2 + t.patience * 0.1,
            ActionKind::Recruitment => t.sociability * 0.2 + t.curiosity * 0.1,
            ActionKind::Mission => t.curiosity * 0.15 + t.patience * 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Status machine; terminal once it leaves Planned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Planned,
    Completed,
    Failed,
    Cancelled,
}

/// One planned (or resolved) coordinated action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GangCoordinationAction {
    pub id: Uuid,
    pub gang: GangId,
    pub kind: ActionKind,
    pub coordinator: AgentId,
    /// Coordinator first, then willing members ranked by willingness
    pub participants: Vec<AgentId>,
    pub target: Option<AgentId>,
    pub scheduled_for: Tick,
    pub priority: Priority,
    pub status: ActionStatus,
}

/// Caller-supplied plan parameters
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    pub target: Option<AgentId>,
    pub scheduled_for: Tick,
}

fn relationship_of<'a>(
    relationships: &'a AHashMap<PairKey, Relationship>,
    a: &AgentId,
    b: &AgentId,
) -> Option<&'a Relationship> {
    relationships.get(&PairKey::new(a, b))
}

/// Willingness of one member to follow the coordinator into an action.
///
/// 0.5 base + relationship-to-coordinator contribution + kind alignment
/// + a loyalty term. Unrelated members still show up for causes aligned
/// with their personality.
pub fn willingness(
    member: &AgentProfile,
    coordinator: &AgentId,
    kind: ActionKind,
    relationships: &AHashMap<PairKey, Relationship>,
) -> f32 {
    let relationship_term = relationship_of(relationships, &member.id, coordinator)
        .map(|r| r.affinity * 0.3 + r.trust * 0.2)
        .unwrap_or(0.0);
    0.5 + relationship_term + kind.alignment(member) + member.personality.loyalty * 0.2
}

/// Average pairwise affinity among a gang's members
pub fn gang_cohesion(
    members: &[&AgentProfile],
    relationships: &AHashMap<PairKey, Relationship>,
) -> f32 {
    let mut sum = 0.0;
    let mut pairs = 0usize;
    for (i, a) in members.iter().enumerate() {
        for b in &members[i + 1..] {
            sum += relationship_of(relationships, &a.id, &b.id)
                .map(|r| r.affinity)
                .unwrap_or(0.0);
            pairs += 1;
        }
    }
    if pairs > 0 {
        sum / pairs as f32
    } else {
        0.0
    }
}

fn priority_for(kind: ActionKind, cohesion: f32) -> Priority {
    let score = kind.base_weight() + cohesion * 0.5;
    if score >= 1.2 {
        Priority::Critical
    } else if score >= 0.9 {
        Priority::High
    } else if score >= 0.6 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Plan a coordinated action for a gang.
///
/// Returns None (with a warn) when the coordinator is not a member of the
/// gang or when too few members clear the willingness cutoff.
pub fn plan_action(
    profiles: &AHashMap<AgentId, AgentProfile>,
    relationships: &AHashMap<PairKey, Relationship>,
    config: &CoordinationConfig,
    gang: &GangId,
    kind: ActionKind,
    coordinator: &AgentId,
    options: PlanOptions,
) -> Option<GangCoordinationAction> {
    let members: Vec<&AgentProfile> = profiles
        .values()
        .filter(|p| p.active && p.gang.as_ref() == Some(gang))
        .collect();

    if !members.iter().any(|m| &m.id == coordinator) {
        tracing::warn!(%gang, %coordinator, "plan rejected: coordinator not a member");
        return None;
    }

    let mut willing: Vec<(&AgentProfile, f32)> = members
        .iter()
        .filter(|m| &m.id != coordinator)
        .map(|m| (*m, willingness(m, coordinator, kind, relationships)))
        .filter(|(_, w)| *w >= config.willingness_cutoff)
        .collect();
    willing.sort_by_key(|(m, w)| (std::cmp::Reverse(OrderedFloat(*w)), m.id.clone()));

    // Coordinator always participates
    let mut participants = vec![coordinator.clone()];
    participants.extend(willing.iter().map(|(m, _)| m.id.clone()));

    if participants.len() < config.min_participants {
        tracing::warn!(
            %gang,
            participants = participants.len(),
            minimum = config.min_participants,
            "plan rejected: not enough willing members"
        );
        return None;
    }

    let priority = priority_for(kind, gang_cohesion(&members, relationships));
    Some(GangCoordinationAction {
        id: Uuid::new_v4(),
        gang: gang.clone(),
        kind,
        coordinator: coordinator.clone(),
        participants,
        target: options.target,
        scheduled_for: options.scheduled_for,
        priority,
        status: ActionStatus::Planned,
    })
}

/// Resolve a planned action.
///
/// Success probability grows with participant count. On success every
/// participant gains reputation and all pairwise relationships among
/// participants strengthen; on failure only the status changes. Success
/// effects are never partially applied.
pub fn execute_action(
    action: &mut GangCoordinationAction,
    profiles: &mut AHashMap<AgentId, AgentProfile>,
    relationships: &mut AHashMap<PairKey, Relationship>,
    config: &CoordinationConfig,
    rng: &mut ChaCha8Rng,
) -> bool {
    if action.status != ActionStatus::Planned {
        return false;
    }

    let chance = (config.base_success_chance
        + config.per_participant_bonus * action.participants.len() as f32)
        .min(config.success_chance_cap);
    let success = rng.gen::<f32>() < chance;

    if !success {
        action.status = ActionStatus::Failed;
        tracing::debug!(action = %action.id, gang = %action.gang, "coordinated action failed");
        return false;
    }

    let gain = action.kind.success_reputation();
    let category = action.kind.reputation_category();
    for id in &action.participants {
        if let Some(profile) = profiles.get_mut(id) {
            profile.reputation.apply(category, gain);
        }
    }
    for (i, a) in action.participants.iter().enumerate() {
        for b in &action.participants[i + 1..] {
            if let Some(rel) = relationships.get_mut(&PairKey::new(a, b)) {
                rel.affinity = (rel.affinity + 0.05).clamp(-1.0, 1.0);
                rel.trust = (rel.trust + 0.03).clamp(0.0, 1.0);
            }
        }
    }

    action.status = ActionStatus::Completed;
    tracing::debug!(action = %action.id, gang = %action.gang, "coordinated action succeeded");
    true
}

/// Cancel a still-planned action; terminal states stay untouched
pub fn cancel_action(action: &mut GangCoordinationAction) {
    if action.status == ActionStatus::Planned {
        action.status = ActionStatus::Cancelled;
    }
}
