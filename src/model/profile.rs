//! Agent profiles: personality, reputation, social memory
//!
//! Profiles live exclusively in the engine's store. They are created on
//! registration, mutated only through the engine's recording/cascade/
//! influence entry points, and never deleted during a run (agents are
//! marked inactive instead).

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, GangId, Tick};

/// The seven personality axes, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonalityTraits {
    pub sociability: f32,
    pub aggression: f32,
    pub loyalty: f32,
    pub risk_tolerance: f32,
    pub greed: f32,
    pub curiosity: f32,
    pub patience: f32,
}

impl PersonalityTraits {
    /// Build a trait set, clamping every axis into [0, 1]
    pub fn new(
        sociability: f32,
        aggression: f32,
        loyalty: f32,
        risk_tolerance: f32,
        greed: f32,
        curiosity: f32,
        patience: f32,
    ) -> Self {
        Self {
            sociability: sociability.clamp(0.0, 1.0),
            aggression: aggression.clamp(0.0, 1.0),
            loyalty: loyalty.clamp(0.0, 1.0),
            risk_tolerance: risk_tolerance.clamp(0.0, 1.0),
            greed: greed.clamp(0.0, 1.0),
            curiosity: curiosity.clamp(0.0, 1.0),
            patience: patience.clamp(0.0, 1.0),
        }
    }

    /// Flat middle-of-the-road personality
    pub fn neutral() -> Self {
        Self::new(0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5)
    }

    pub fn as_array(&self) -> [f32; 7] {
        [
            self.sociability,
            self.aggression,
            self.loyalty,
            self.risk_tolerance,
            self.greed,
            self.curiosity,
            self.patience,
        ]
    }

    pub const AXIS_NAMES: [&'static str; 7] = [
        "sociability",
        "aggression",
        "loyalty",
        "risk_tolerance",
        "greed",
        "curiosity",
        "patience",
    ];

    /// Index and value of the strongest axis
    pub fn dominant_axis(&self) -> (usize, f32) {
        let values = self.as_array();
        let mut best = 0;
        for (i, v) in values.iter().enumerate() {
            if *v > values[best] {
                best = i;
            }
        }
        (best, values[best])
    }

    /// Archetype label derived from the strongest axis
    ///
    /// Returns `Balanced` when no axis clearly leads (below 0.6).
    pub fn archetype(&self) -> PersonalityArchetype {
        let (axis, value) = self.dominant_axis();
        if value < 0.6 {
            return PersonalityArchetype::Balanced;
        }
        match axis {
            0 => PersonalityArchetype::Socialite,
            1 => PersonalityArchetype::Enforcer,
            2 => PersonalityArchetype::Loyalist,
            3 => PersonalityArchetype::Daredevil,
            4 => PersonalityArchetype::Hustler,
            5 => PersonalityArchetype::Explorer,
            _ => PersonalityArchetype::Strategist,
        }
    }

    /// Per-axis mean of a set of trait records (the group's center of mass)
    pub fn mean_of(traits: &[PersonalityTraits]) -> Self {
        if traits.is_empty() {
            return Self::neutral();
        }
        let n = traits.len() as f32;
        let mut sums = [0.0f32; 7];
        for t in traits {
            for (sum, v) in sums.iter_mut().zip(t.as_array()) {
                *sum += v;
            }
        }
        Self::new(
            sums[0] / n,
            sums[1] / n,
            sums[2] / n,
            sums[3] / n,
            sums[4] / n,
            sums[5] / n,
            sums[6] / n,
        )
    }
}

/// Personality archetype, named for the dominant axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalityArchetype {
    Socialite,
    Enforcer,
    Loyalist,
    Daredevil,
    Hustler,
    Explorer,
    Strategist,
    Balanced,
}

impl PersonalityArchetype {
    pub fn label(&self) -> &'static str {
        match self {
            PersonalityArchetype::Socialite => "socialite",
            PersonalityArchetype::Enforcer => "enforcer",
            PersonalityArchetype::Loyalist => "loyalist",
            PersonalityArchetype::Daredevil => "daredevil",
            PersonalityArchetype::Hustler => "hustler",
            PersonalityArchetype::Explorer => "explorer",
            PersonalityArchetype::Strategist => "strategist",
            PersonalityArchetype::Balanced => "balanced",
        }
    }
}

/// Category a reputation change lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReputationCategory {
    Combat,
    Trade,
    Social,
    Reliability,
}

/// Per-agent reputation, global plus per category, each in [-100, 100]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReputationScores {
    pub global: f32,
    pub combat: f32,
    pub trade: f32,
    pub social: f32,
    pub reliability: f32,
}

impl ReputationScores {
    /// Apply a delta to the global score and one category, clamping both.
    ///
    /// Clamping is a silent correction, not an error.
    pub fn apply(&mut self, category: ReputationCategory, delta: f32) {
        self.global = (self.global + delta).clamp(-100.0, 100.0);
        let slot = match category {
            ReputationCategory::Combat => &mut self.combat,
            ReputationCategory::Trade => &mut self.trade,
            ReputationCategory::Social => &mut self.social,
            ReputationCategory::Reliability => &mut self.reliability,
        };
        *slot = (*slot + delta).clamp(-100.0, 100.0);
    }
}

/// What an agent remembers about its social history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialMemory {
    /// Count of positive interactions initiated toward others
    pub favors_given: u32,
    /// Count of positive interactions received
    pub favors_received: u32,
    /// Agents this one holds a grudge against
    pub grudges: Vec<AgentId>,
    /// Agents this one considers allies
    pub allies: Vec<AgentId>,
    /// Agents that betrayed this one
    pub betrayals: Vec<AgentId>,
}

impl SocialMemory {
    pub fn add_grudge(&mut self, id: &AgentId) {
        if !self.grudges.contains(id) {
            self.grudges.push(id.clone());
        }
    }

    pub fn add_ally(&mut self, id: &AgentId) {
        if !self.allies.contains(id) {
            self.allies.push(id.clone());
        }
        self.grudges.retain(|g| g != id);
    }

    pub fn add_betrayal(&mut self, id: &AgentId) {
        if !self.betrayals.contains(id) {
            self.betrayals.push(id.clone());
        }
        self.allies.retain(|a| a != id);
        self.add_grudge(id);
    }
}

/// One registered agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    pub id: AgentId,
    pub name: String,
    pub personality: PersonalityTraits,
    /// Faction label, if the agent declared one at registration
    pub faction: Option<String>,
    /// Gang tag, set only by executing a formation proposal
    pub gang: Option<GangId>,
    pub reputation: ReputationScores,
    /// Social influence in [0, 100]; grows with successful spreads
    pub influence: f32,
    pub popularity: f32,
    pub memory: SocialMemory,
    /// Inactive agents are kept (never deleted) but skipped by analysis
    pub active: bool,
    pub registered_at: Tick,
}

impl AgentProfile {
    pub fn new(
        id: AgentId,
        name: String,
        personality: PersonalityTraits,
        faction: Option<String>,
        tick: Tick,
    ) -> Self {
        Self {
            id,
            name,
            personality,
            faction,
            gang: None,
            reputation: ReputationScores::default(),
            influence: 10.0,
            popularity: 0.0,
            memory: SocialMemory::default(),
            active: true,
            registered_at: tick,
        }
    }

    /// Raise influence, clamped to [0, 100]
    pub fn gain_influence(&mut self, amount: f32) {
        self.influence = (self.influence + amount).clamp(0.0, 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traits_are_clamped() {
        let t = PersonalityTraits::new(1.5, -0.2, 0.5, 0.5, 0.5, 0.5, 0.5);
        assert_eq!(t.sociability, 1.0);
        assert_eq!(t.aggression, 0.0);
    }

    #[test]
    fn test_archetype_from_dominant_axis() {
        let mut t = PersonalityTraits::neutral();
        t.aggression = 0.9;
        assert_eq!(t.archetype(), PersonalityArchetype::Enforcer);

        let flat = PersonalityTraits::neutral();
        assert_eq!(flat.archetype(), PersonalityArchetype::Balanced);
    }

    #[test]
    fn test_reputation_clamps() {
        let mut rep = ReputationScores::default();
        rep.apply(ReputationCategory::Combat, 150.0);
        assert_eq!(rep.global, 100.0);
        assert_eq!(rep.combat, 100.0);
        rep.apply(ReputationCategory::Combat, -300.0);
        assert_eq!(rep.global, -100.0);
        assert_eq!(rep.combat, -100.0);
        // Other categories untouched
        assert_eq!(rep.trade, 0.0);
    }

    #[test]
    fn test_betrayal_removes_ally_and_adds_grudge() {
        let mut memory = SocialMemory::default();
        let judas = AgentId::from("judas");
        memory.add_ally(&judas);
        assert!(memory.allies.contains(&judas));

        memory.add_betrayal(&judas);
        assert!(!memory.allies.contains(&judas));
        assert!(memory.grudges.contains(&judas));
        assert!(memory.betrayals.contains(&judas));
    }

    #[test]
    fn test_trait_mean() {
        let a = PersonalityTraits::new(1.0, 0.0, 0.5, 0.5, 0.5, 0.5, 0.5);
        let b = PersonalityTraits::new(0.0, 1.0, 0.5, 0.5, 0.5, 0.5, 0.5);
        let mean = PersonalityTraits::mean_of(&[a, b]);
        assert!((mean.sociability - 0.5).abs() < 1e-6);
        assert!((mean.aggression - 0.5).abs() < 1e-6);
    }
}
