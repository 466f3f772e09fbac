//! The orchestrator
//!
//! [`SocialEngine`] owns the single profile store and the single canonical
//! relationship table, and drives one discrete simulation step: network
//! analysis, organic gang formation, influence spreading seeded from the
//! most central agents, and coordinated gang actions. Registration and
//! interaction recording are the only mutators between steps; a step
//! operates on the state as frozen at its start (the engine takes `&mut
//! self`, so callers cannot interleave mutation mid-step).

use ahash::{AHashMap, AHashSet};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::affinity;
use crate::cascade::{
    self, CascadeActionKind, CascadeOutcome, CascadeTrigger, ReputationCascade,
};
use crate::core::config::EngineConfig;
use crate::core::error::{Result, SocialError};
use crate::core::types::{AgentId, GangId, PairKey, Tick};
use crate::gang::coordination::{self, ActionKind, ActionStatus, PlanOptions};
use crate::gang::formation::{self, GangFormationProposal};
use crate::gang::GangCoordinationAction;
use crate::influence::{self, InfluenceEvent, InfluenceKind};
use crate::model::{
    AgentProfile, InteractionKind, InteractionRecord, Outcome, PersonalityArchetype,
    PersonalityTraits, Relationship, RelationshipKind, ReputationScores,
};
use crate::network::{self, NetworkAnalysis, VisualizationExport};

/// Everything one simulation step produced
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub tick: Tick,
    pub gang_proposals: Vec<GangFormationProposal>,
    /// Gangs auto-executed this step because their proposal cleared the bar
    pub gangs_formed: Vec<GangId>,
    pub network_analysis: NetworkAnalysis,
    pub influence_events: Vec<InfluenceEvent>,
    /// Actions planned or resolved this step
    pub coordinated_actions: Vec<GangCoordinationAction>,
}

/// One agent's social surroundings, for an external decision maker
#[derive(Debug, Clone, Serialize)]
pub struct AgentContext {
    pub friends: Vec<AgentId>,
    pub allies: Vec<AgentId>,
    pub rivals: Vec<AgentId>,
    pub enemies: Vec<AgentId>,
    pub group_members: Vec<AgentId>,
    pub influence: f32,
    pub reputation: ReputationScores,
}

/// Compact per-agent entry for the state snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSummary {
    pub id: AgentId,
    pub name: String,
    pub faction: Option<String>,
    pub gang: Option<GangId>,
    pub influence: f32,
    pub popularity: f32,
    pub reputation: ReputationScores,
    pub active: bool,
}

/// Aggregate engine statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineAnalytics {
    pub tick: Tick,
    pub agent_count: usize,
    pub relationship_count: usize,
    pub average_affinity: f32,
    pub gang_count: usize,
}

/// Serializable snapshot for an external persistence collaborator
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub agents: Vec<AgentSummary>,
    pub analytics: EngineAnalytics,
    pub network_analysis: NetworkAnalysis,
}

impl StateSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The social-graph simulation engine
pub struct SocialEngine {
    config: EngineConfig,
    profiles: AHashMap<AgentId, AgentProfile>,
    relationships: AHashMap<PairKey, Relationship>,
    pending_actions: Vec<GangCoordinationAction>,
    rng: ChaCha8Rng,
    tick: Tick,
}

impl SocialEngine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            profiles: AHashMap::new(),
            relationships: AHashMap::new(),
            pending_actions: Vec::new(),
            rng,
            tick: 0,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(EngineConfig::with_seed(seed))
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn agent_count(&self) -> usize {
        self.profiles.len()
    }

    pub fn agent(&self, id: &AgentId) -> Option<&AgentProfile> {
        self.profiles.get(id)
    }

    /// The single canonical relationship record for a pair, if any.
    ///
    /// A never-linked pair returns None; that is a valid state, not an
    /// error. The same record is returned for (a, b) and (b, a).
    pub fn relationship(&self, a: &AgentId, b: &AgentId) -> Option<&Relationship> {
        self.relationships.get(&PairKey::new(a, b))
    }

    /// Register a new agent and seed relationships against everyone already
    /// present, using personality compatibility plus faction modifiers.
    pub fn register(
        &mut self,
        id: impl Into<AgentId>,
        name: impl Into<String>,
        personality: PersonalityTraits,
        faction: Option<String>,
    ) -> Result<&AgentProfile> {
        let id = id.into();
        if self.profiles.contains_key(&id) {
            return Err(SocialError::DuplicateAgent(id));
        }

        let profile = AgentProfile::new(id.clone(), name.into(), personality, faction, self.tick);

        for existing in self.profiles.values() {
            let base =
                affinity::base_affinity(&profile.personality, &existing.personality, &self.config.affinity);
            let adjusted = affinity::apply_faction_modifier(
                base,
                profile.faction.as_deref(),
                existing.faction.as_deref(),
                &self.config.affinity,
            );
            let key = PairKey::new(&id, &existing.id);
            let kind = affinity::classify(adjusted, 0.0);
            self.relationships
                .insert(key.clone(), Relationship::seeded(key, adjusted, kind));
        }

        tracing::info!(agent = %id, "registered");
        self.profiles.insert(id.clone(), profile);
        Ok(&self.profiles[&id])
    }

    /// Mark an agent inactive. Profiles are never deleted during a run;
    /// inactive agents are skipped by analysis and formation.
    pub fn deactivate(&mut self, id: &AgentId) -> Result<()> {
        let profile = self
            .profiles
            .get_mut(id)
            .ok_or_else(|| SocialError::UnknownAgent(id.clone()))?;
        profile.active = false;
        Ok(())
    }

    /// Record one interaction between two agents, updating the canonical
    /// relationship, both agents' social memory, and, when the affinity
    /// swing is large enough, triggering a reputation cascade.
    ///
    /// A self-interaction is a silent no-op.
    pub fn record_interaction(
        &mut self,
        a: &AgentId,
        b: &AgentId,
        kind: InteractionKind,
        outcome: Outcome,
        context: Option<String>,
    ) -> Result<()> {
        if a == b {
            return Ok(());
        }
        if !self.profiles.contains_key(a) {
            return Err(SocialError::UnknownAgent(a.clone()));
        }
        if !self.profiles.contains_key(b) {
            return Err(SocialError::UnknownAgent(b.clone()));
        }

        let key = PairKey::new(a, b);
        let rel = self.relationships.entry(key.clone()).or_insert_with(|| {
            // First contact between agents registered before each other's
            // arrival never happens (registration seeds all pairs), but a
            // lazily created record keeps the invariant anyway.
            Relationship::seeded(key.clone(), 0.0, RelationshipKind::Stranger)
        });

        let (affinity_delta, trust_delta) =
            affinity::interaction_delta(kind, outcome, rel.affinity, rel.trust, &self.config.affinity);
        rel.record(
            InteractionRecord {
                tick: self.tick,
                kind,
                outcome,
                affinity_delta,
                trust_delta,
                context,
            },
            self.config.history_cap,
        );
        rel.kind = affinity::classify(rel.affinity, rel.trust);
        let new_kind = rel.kind;

        self.update_social_memory(a, b, kind, outcome, new_kind);

        if affinity_delta.abs() >= self.config.cascade.trigger_threshold {
            let trigger = CascadeTrigger {
                actor: a.clone(),
                kind: cascade_kind_for(kind),
                target: Some(b.clone()),
                outcome: match outcome {
                    Outcome::Negative => CascadeOutcome::Negative,
                    _ => CascadeOutcome::Positive,
                },
            };
            let cascade = cascade::propagate(
                trigger,
                &mut self.profiles,
                &mut self.relationships,
                &self.config.cascade,
                self.tick,
            );
            tracing::debug!(reach = cascade.reach, "interaction triggered cascade");
        }

        Ok(())
    }

    fn update_social_memory(
        &mut self,
        a: &AgentId,
        b: &AgentId,
        kind: InteractionKind,
        outcome: Outcome,
        new_kind: RelationshipKind,
    ) {
        if outcome == Outcome::Positive {
            if let Some(actor) = self.profiles.get_mut(a) {
                actor.memory.favors_given += 1;
            }
            if let Some(target) = self.profiles.get_mut(b) {
                target.memory.favors_received += 1;
                target.popularity += 0.1;
            }
        }

        match new_kind {
            RelationshipKind::Ally => {
                if let Some(actor) = self.profiles.get_mut(a) {
                    actor.memory.add_ally(b);
                }
                if let Some(target) = self.profiles.get_mut(b) {
                    target.memory.add_ally(a);
                }
            }
            RelationshipKind::Enemy | RelationshipKind::Rival => {
                if let Some(actor) = self.profiles.get_mut(a) {
                    actor.memory.add_grudge(b);
                }
                if let Some(target) = self.profiles.get_mut(b) {
                    target.memory.add_grudge(a);
                }
            }
            _ => {}
        }

        // The betrayed remembers the betrayer, not the other way around
        if kind == InteractionKind::Betrayal && outcome != Outcome::Negative {
            if let Some(target) = self.profiles.get_mut(b) {
                target.memory.add_betrayal(a);
            }
        }
    }

    /// Scenario hook: force a pair's affinity to an exact value.
    ///
    /// Used by tests and tuning tools to stage graph shapes without
    /// replaying interaction histories.
    pub fn set_affinity(&mut self, a: &AgentId, b: &AgentId, value: f32) -> Result<()> {
        if !self.profiles.contains_key(a) {
            return Err(SocialError::UnknownAgent(a.clone()));
        }
        if !self.profiles.contains_key(b) {
            return Err(SocialError::UnknownAgent(b.clone()));
        }
        let key = PairKey::new(a, b);
        let rel = self
            .relationships
            .entry(key.clone())
            .or_insert_with(|| Relationship::seeded(key, 0.0, RelationshipKind::Stranger));
        rel.affinity = value.clamp(-1.0, 1.0);
        rel.kind = affinity::classify(rel.affinity, rel.trust);
        Ok(())
    }

    /// Scenario hook: raise (or with a negative amount, lower) an agent's
    /// influence score directly, clamped to the usual [0, 100] range.
    pub fn boost_influence(&mut self, id: &AgentId, amount: f32) -> Result<()> {
        let profile = self
            .profiles
            .get_mut(id)
            .ok_or_else(|| SocialError::UnknownAgent(id.clone()))?;
        profile.gain_influence(amount);
        Ok(())
    }

    /// Apply a formation proposal: set every member's gang affiliation.
    ///
    /// Size bounds are re-checked as an internal assertion; a violation
    /// means the formation scan is broken, not the caller.
    pub fn execute_proposal(&mut self, proposal: &GangFormationProposal) -> Result<GangId> {
        let size = proposal.members.len();
        if size < self.config.gang.min_size || size > self.config.gang.max_size {
            return Err(SocialError::InvalidGroupSize {
                size,
                min: self.config.gang.min_size,
                max: self.config.gang.max_size,
            });
        }
        for member in &proposal.members {
            if !self.profiles.contains_key(member) {
                return Err(SocialError::UnknownAgent(member.clone()));
            }
        }

        let gang = GangId(proposal.name.clone());
        for member in &proposal.members {
            if let Some(profile) = self.profiles.get_mut(member) {
                profile.gang = Some(gang.clone());
            }
        }
        tracing::info!(%gang, members = size, "gang formed");
        Ok(gang)
    }

    /// Plan a coordinated action for a gang on behalf of a coordinator
    pub fn plan_gang_action(
        &mut self,
        gang: &GangId,
        kind: ActionKind,
        coordinator: &AgentId,
        options: PlanOptions,
    ) -> Option<GangCoordinationAction> {
        let action = coordination::plan_action(
            &self.profiles,
            &self.relationships,
            &self.config.coordination,
            gang,
            kind,
            coordinator,
            options,
        )?;
        self.pending_actions.push(action.clone());
        Some(action)
    }

    /// Run one discrete simulation step.
    ///
    /// Produces gang proposals (auto-executing only those above the
    /// configured bar), a full network analysis, influence spreads seeded
    /// from the most central agents, and resolves due coordinated actions.
    pub fn run_step(&mut self) -> StepReport {
        self.tick += 1;
        let tick = self.tick;
        tracing::info!(tick, agents = self.profiles.len(), "step start");

        let network_analysis = network::analyze(
            &self.profiles,
            &self.relationships,
            &self.config.network,
            &mut self.rng,
        );

        let gang_proposals = formation::propose_gangs(
            &self.profiles,
            &self.relationships,
            &self.config.gang,
            &mut self.rng,
            tick,
        );
        let mut gangs_formed = Vec::new();
        for proposal in &gang_proposals {
            if proposal.average_affinity > self.config.gang.auto_execute_threshold {
                match self.execute_proposal(proposal) {
                    Ok(gang) => gangs_formed.push(gang),
                    Err(err) => tracing::warn!(%err, "auto-execution rejected"),
                }
            }
        }

        let influence_events = self.seed_influence(&network_analysis, tick);
        let coordinated_actions = self.step_coordination(tick);

        StepReport {
            tick,
            gang_proposals,
            gangs_formed,
            network_analysis,
            influence_events,
            coordinated_actions,
        }
    }

    /// Spread influence from the step's most central agents
    fn seed_influence(&mut self, analysis: &NetworkAnalysis, tick: Tick) -> Vec<InfluenceEvent> {
        let seeds = analysis.top_influencers(self.config.influence.seeds_per_step);
        let mut events = Vec::new();
        for seed in seeds {
            let Some(profile) = self.profiles.get(&seed) else {
                continue;
            };
            let kind = influence_kind_for(profile.personality.archetype());
            let message = format!("{} sets the tone", profile.name);
            events.push(influence::spread(
                &seed,
                kind,
                message,
                1.0,
                &mut self.profiles,
                &self.relationships,
                &self.config.influence,
                tick,
            ));
        }
        events
    }

    /// Resolve due actions and occasionally plan new ones for idle gangs
    fn step_coordination(&mut self, tick: Tick) -> Vec<GangCoordinationAction> {
        let mut touched = Vec::new();

        // Resolve everything scheduled for this tick or earlier
        let mut due: Vec<GangCoordinationAction> = Vec::new();
        self.pending_actions.retain_mut(|action| {
            if action.status == ActionStatus::Planned && action.scheduled_for <= tick {
                due.push(action.clone());
                false
            } else {
                action.status == ActionStatus::Planned
            }
        });
        for mut action in due {
            coordination::execute_action(
                &mut action,
                &mut self.profiles,
                &mut self.relationships,
                &self.config.coordination,
                &mut self.rng,
            );
            touched.push(action);
        }

        // Idle gangs sometimes start something new
        let busy: AHashSet<GangId> = self
            .pending_actions
            .iter()
            .map(|a| a.gang.clone())
            .collect();
        let mut gangs: Vec<GangId> = self
            .profiles
            .values()
            .filter(|p| p.active)
            .filter_map(|p| p.gang.clone())
            .collect::<AHashSet<_>>()
            .into_iter()
            .filter(|g| !busy.contains(g))
            .collect();
        gangs.sort_by(|a, b| a.0.cmp(&b.0));

        for gang in gangs {
            if self.rng.gen::<f64>() >= self.config.coordination.plan_chance_per_step {
                continue;
            }
            let kind = match self.rng.gen_range(0..5) {
                0 => ActionKind::War,
                1 => ActionKind::Raid,
                2 => ActionKind::Defense,
                3 => ActionKind::Recruitment,
                _ => ActionKind::Mission,
            };
            // The most influential member calls the shots
            let coordinator = self
                .profiles
                .values()
                .filter(|p| p.active && p.gang.as_ref() == Some(&gang))
                .max_by(|a, b| {
                    a.influence
                        .partial_cmp(&b.influence)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then_with(|| b.id.cmp(&a.id))
                })
                .map(|p| p.id.clone());
            let Some(coordinator) = coordinator else {
                continue;
            };
            let options = PlanOptions {
                target: None,
                scheduled_for: tick + 1,
            };
            if let Some(action) = self.plan_gang_action(&gang, kind, &coordinator, options) {
                touched.push(action);
            }
        }

        touched
    }

    /// Trigger a reputation cascade directly (for external actuators that
    /// observed an action outside the interaction flow)
    pub fn trigger_cascade(
        &mut self,
        actor: &AgentId,
        kind: CascadeActionKind,
        target: Option<AgentId>,
        outcome: CascadeOutcome,
    ) -> Result<ReputationCascade> {
        if !self.profiles.contains_key(actor) {
            return Err(SocialError::UnknownAgent(actor.clone()));
        }
        let trigger = CascadeTrigger {
            actor: actor.clone(),
            kind,
            target,
            outcome,
        };
        Ok(cascade::propagate(
            trigger,
            &mut self.profiles,
            &mut self.relationships,
            &self.config.cascade,
            self.tick,
        ))
    }

    /// One agent's social surroundings; None for unregistered ids
    pub fn agent_context(&self, id: &AgentId) -> Option<AgentContext> {
        let profile = self.profiles.get(id)?;

        let mut friends = Vec::new();
        let mut allies = Vec::new();
        let mut rivals = Vec::new();
        let mut enemies = Vec::new();
        for rel in self.relationships.values() {
            let Some(other) = rel.key.other(id) else {
                continue;
            };
            match rel.kind {
                RelationshipKind::Friend => friends.push(other.clone()),
                RelationshipKind::Ally => allies.push(other.clone()),
                RelationshipKind::Rival => rivals.push(other.clone()),
                RelationshipKind::Enemy => enemies.push(other.clone()),
                _ => {}
            }
        }
        friends.sort();
        allies.sort();
        rivals.sort();
        enemies.sort();

        let mut group_members: Vec<AgentId> = profile
            .gang
            .as_ref()
            .map(|gang| {
                self.profiles
                    .values()
                    .filter(|p| p.id != *id && p.gang.as_ref() == Some(gang))
                    .map(|p| p.id.clone())
                    .collect()
            })
            .unwrap_or_default();
        group_members.sort();

        Some(AgentContext {
            friends,
            allies,
            rivals,
            enemies,
            group_members,
            influence: profile.influence,
            reputation: profile.reputation,
        })
    }

    /// Full snapshot for an external persistence collaborator
    pub fn export_state(&mut self) -> StateSnapshot {
        let mut agents: Vec<AgentSummary> = self
            .profiles
            .values()
            .map(|p| AgentSummary {
                id: p.id.clone(),
                name: p.name.clone(),
                faction: p.faction.clone(),
                gang: p.gang.clone(),
                influence: p.influence,
                popularity: p.popularity,
                reputation: p.reputation,
                active: p.active,
            })
            .collect();
        agents.sort_by(|a, b| a.id.cmp(&b.id));

        let relationship_count = self.relationships.len();
        let average_affinity = if relationship_count > 0 {
            self.relationships.values().map(|r| r.affinity).sum::<f32>()
                / relationship_count as f32
        } else {
            0.0
        };
        let gang_count = self
            .profiles
            .values()
            .filter_map(|p| p.gang.as_ref())
            .collect::<AHashSet<_>>()
            .len();

        let analytics = EngineAnalytics {
            tick: self.tick,
            agent_count: self.profiles.len(),
            relationship_count,
            average_affinity,
            gang_count,
        };

        let network_analysis = network::analyze(
            &self.profiles,
            &self.relationships,
            &self.config.network,
            &mut self.rng,
        );

        StateSnapshot {
            agents,
            analytics,
            network_analysis,
        }
    }

    /// `{ nodes, links }` for an external rendering collaborator
    pub fn export_visualization(&mut self) -> VisualizationExport {
        network::analyze(
            &self.profiles,
            &self.relationships,
            &self.config.network,
            &mut self.rng,
        )
        .visualization
    }
}

/// Cascade action corresponding to an interaction kind
fn cascade_kind_for(kind: InteractionKind) -> CascadeActionKind {
    match kind {
        InteractionKind::Betrayal => CascadeActionKind::Betray,
        InteractionKind::Combat => CascadeActionKind::Attack,
        InteractionKind::Gift => CascadeActionKind::Gift,
        InteractionKind::Trade => CascadeActionKind::Trade,
        InteractionKind::Help => CascadeActionKind::Help,
        InteractionKind::Cooperation | InteractionKind::Chat => CascadeActionKind::Help,
    }
}

/// What kind of influence an archetype naturally projects
fn influence_kind_for(archetype: PersonalityArchetype) -> InfluenceKind {
    match archetype {
        PersonalityArchetype::Socialite | PersonalityArchetype::Explorer => InfluenceKind::Opinion,
        PersonalityArchetype::Enforcer | PersonalityArchetype::Daredevil => InfluenceKind::Action,
        PersonalityArchetype::Hustler => InfluenceKind::Behavior,
        PersonalityArchetype::Loyalist
        | PersonalityArchetype::Strategist
        | PersonalityArchetype::Balanced => InfluenceKind::Emotion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn social_traits() -> PersonalityTraits {
        PersonalityTraits::new(0.8, 0.2, 0.7, 0.4, 0.2, 0.6, 0.6)
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut engine = SocialEngine::with_seed(1);
        engine
            .register("rex", "Rex", PersonalityTraits::neutral(), None)
            .unwrap();
        let err = engine
            .register("rex", "Rex Again", PersonalityTraits::neutral(), None)
            .unwrap_err();
        assert!(matches!(err, SocialError::DuplicateAgent(_)));
    }

    #[test]
    fn test_register_seeds_one_relationship_per_pair() {
        let mut engine = SocialEngine::with_seed(1);
        for id in ["a", "b", "c"] {
            engine
                .register(id, id.to_uppercase(), social_traits(), None)
                .unwrap();
        }
        // 3 agents -> 3 unordered pairs
        assert_eq!(engine.relationships.len(), 3);
        let ab = engine
            .relationship(&AgentId::from("a"), &AgentId::from("b"))
            .unwrap();
        let ba = engine
            .relationship(&AgentId::from("b"), &AgentId::from("a"))
            .unwrap();
        assert_eq!(ab.affinity, ba.affinity);
    }

    #[test]
    fn test_record_interaction_unknown_agent() {
        let mut engine = SocialEngine::with_seed(1);
        engine
            .register("known", "Known", PersonalityTraits::neutral(), None)
            .unwrap();
        let err = engine
            .record_interaction(
                &AgentId::from("known"),
                &AgentId::from("ghost"),
                InteractionKind::Chat,
                Outcome::Positive,
                None,
            )
            .unwrap_err();
        assert!(matches!(err, SocialError::UnknownAgent(_)));
    }

    #[test]
    fn test_self_interaction_is_a_noop() {
        let mut engine = SocialEngine::with_seed(1);
        engine
            .register("solo", "Solo", PersonalityTraits::neutral(), None)
            .unwrap();
        let id = AgentId::from("solo");
        engine
            .record_interaction(&id, &id, InteractionKind::Chat, Outcome::Positive, None)
            .unwrap();
        assert!(engine.relationships.is_empty());
    }

    #[test]
    fn test_betrayal_updates_memory_and_triggers_grudge() {
        let mut engine = SocialEngine::with_seed(1);
        engine
            .register("snake", "Snake", PersonalityTraits::neutral(), None)
            .unwrap();
        engine
            .register("mark", "Mark", PersonalityTraits::neutral(), None)
            .unwrap();
        let snake = AgentId::from("snake");
        let mark = AgentId::from("mark");

        engine
            .record_interaction(
                &snake,
                &mark,
                InteractionKind::Betrayal,
                Outcome::Positive,
                None,
            )
            .unwrap();

        let mark_profile = engine.agent(&mark).unwrap();
        assert!(mark_profile.memory.betrayals.contains(&snake));
        assert!(mark_profile.memory.grudges.contains(&snake));
    }

    #[test]
    fn test_execute_proposal_validates_size() {
        let mut engine = SocialEngine::with_seed(1);
        for id in ["a", "b"] {
            engine
                .register(id, id, PersonalityTraits::neutral(), None)
                .unwrap();
        }
        let proposal = GangFormationProposal {
            proposer: AgentId::from("a"),
            members: vec![AgentId::from("a"), AgentId::from("b")],
            average_affinity: 0.9,
            dominant_traits: vec![],
            archetype: PersonalityArchetype::Balanced,
            name: "Undersized".to_string(),
            reason: String::new(),
            tick: 0,
        };
        let err = engine.execute_proposal(&proposal).unwrap_err();
        assert!(matches!(err, SocialError::InvalidGroupSize { size: 2, .. }));
    }

    #[test]
    fn test_agent_context_none_for_unknown() {
        let engine = SocialEngine::with_seed(1);
        assert!(engine.agent_context(&AgentId::from("ghost")).is_none());
    }
}
