//! Relationships and interaction history
//!
//! Exactly one [`Relationship`] exists per unordered agent pair, stored in
//! the engine's canonical table keyed by [`PairKey`]. Agents never embed a
//! copy of it; symmetric lookups always hit the same record.

use serde::{Deserialize, Serialize};

use crate::core::types::{PairKey, Tick};

/// Closed set of interaction kinds the engine scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Chat,
    Trade,
    Combat,
    Cooperation,
    Betrayal,
    Gift,
    Help,
}

impl InteractionKind {
    pub fn label(&self) -> &'static str {
        match self {
            InteractionKind::Chat => "chat",
            InteractionKind::Trade => "trade",
            InteractionKind::Combat => "combat",
            InteractionKind::Cooperation => "cooperation",
            InteractionKind::Betrayal => "betrayal",
            InteractionKind::Gift => "gift",
            InteractionKind::Help => "help",
        }
    }
}

/// How an interaction went for the pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Positive,
    Negative,
    Neutral,
}

/// Relationship classification ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    Stranger,
    Acquaintance,
    Friend,
    Rival,
    Enemy,
    Ally,
}

impl RelationshipKind {
    pub fn label(&self) -> &'static str {
        match self {
            RelationshipKind::Stranger => "stranger",
            RelationshipKind::Acquaintance => "acquaintance",
            RelationshipKind::Friend => "friend",
            RelationshipKind::Rival => "rival",
            RelationshipKind::Enemy => "enemy",
            RelationshipKind::Ally => "ally",
        }
    }
}

/// One recorded interaction; immutable once appended
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub tick: Tick,
    pub kind: InteractionKind,
    pub outcome: Outcome,
    /// Affinity delta actually applied (after diminishing returns)
    pub affinity_delta: f32,
    /// Trust delta actually applied
    pub trust_delta: f32,
    pub context: Option<String>,
}

/// The single canonical record for one agent pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub key: PairKey,
    /// Signed compatibility, [-1, 1]
    pub affinity: f32,
    /// Confidence built from positive history, [0, 1]
    pub trust: f32,
    pub kind: RelationshipKind,
    /// Total interactions ever (history is bounded, this is not)
    pub interaction_count: u32,
    pub last_interaction: Option<Tick>,
    /// Bounded history; oldest records dropped past the cap
    pub history: Vec<InteractionRecord>,
}

impl Relationship {
    /// New relationship seeded from a registration-time affinity estimate
    pub fn seeded(key: PairKey, initial_affinity: f32, kind: RelationshipKind) -> Self {
        Self {
            key,
            affinity: initial_affinity.clamp(-1.0, 1.0),
            trust: 0.0,
            kind,
            interaction_count: 0,
            last_interaction: None,
            history: Vec::new(),
        }
    }

    /// Apply deltas and append a record, enforcing clamps and the history cap
    pub fn record(&mut self, record: InteractionRecord, history_cap: usize) {
        self.affinity = (self.affinity + record.affinity_delta).clamp(-1.0, 1.0);
        self.trust = (self.trust + record.trust_delta).clamp(0.0, 1.0);
        self.interaction_count += 1;
        self.last_interaction = Some(record.tick);

        self.history.push(record);
        if self.history.len() > history_cap {
            let excess = self.history.len() - history_cap;
            self.history.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::AgentId;

    fn record(tick: Tick, affinity_delta: f32, trust_delta: f32) -> InteractionRecord {
        InteractionRecord {
            tick,
            kind: InteractionKind::Chat,
            outcome: Outcome::Positive,
            affinity_delta,
            trust_delta,
            context: None,
        }
    }

    #[test]
    fn test_record_clamps_affinity_and_trust() {
        let key = PairKey::new(&AgentId::from("a"), &AgentId::from("b"));
        let mut rel = Relationship::seeded(key, 0.9, RelationshipKind::Stranger);
        rel.record(record(1, 0.5, -0.5), 20);
        assert_eq!(rel.affinity, 1.0);
        assert_eq!(rel.trust, 0.0);
    }

    #[test]
    fn test_history_is_bounded() {
        let key = PairKey::new(&AgentId::from("a"), &AgentId::from("b"));
        let mut rel = Relationship::seeded(key, 0.0, RelationshipKind::Stranger);
        for tick in 0..30 {
            rel.record(record(tick, 0.0, 0.0), 20);
        }
        assert_eq!(rel.history.len(), 20);
        // Oldest dropped, newest kept
        assert_eq!(rel.history[0].tick, 10);
        assert_eq!(rel.history[19].tick, 29);
        // Lifetime count unaffected by the cap
        assert_eq!(rel.interaction_count, 30);
    }

    #[test]
    fn test_enum_snake_case() {
        assert_eq!(
            serde_json::to_string(&InteractionKind::Cooperation).unwrap(),
            "\"cooperation\""
        );
        assert_eq!(
            serde_json::to_string(&RelationshipKind::Acquaintance).unwrap(),
            "\"acquaintance\""
        );
    }
}
