//! Engine configuration with documented constants
//!
//! All tunable numbers are collected here with explanations of their purpose.
//! None of them is derived from a hard requirement; they are simulation
//! parameters tuned to produce believable emergent behavior, and every one
//! can be overridden per engine instance (multiple engines with different
//! configs can coexist in one process).

use serde::{Deserialize, Serialize};

/// Top-level configuration for a [`SocialEngine`](crate::engine::SocialEngine)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for the engine's deterministic RNG
    ///
    /// Every stochastic choice (label-propagation order, path sampling,
    /// action outcome rolls, gang name picks) draws from one ChaCha8 stream
    /// seeded here, so a run is reproducible from (seed, call sequence).
    pub seed: u64,

    /// Maximum interaction records kept per relationship
    ///
    /// Oldest records are dropped past the cap. 20 keeps enough history
    /// for context generation without unbounded growth.
    pub history_cap: usize,

    pub affinity: AffinityConfig,
    pub network: NetworkConfig,
    pub gang: GangConfig,
    pub cascade: CascadeConfig,
    pub influence: InfluenceConfig,
    pub coordination: CoordinationConfig,
}

/// Tunables for pairwise affinity scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffinityConfig {
    /// Bonus applied when both agents share a faction
    pub same_faction_bonus: f32,

    /// Penalty applied when the two factions are configured rivals
    pub rival_faction_penalty: f32,

    /// Faction pairs that are hostile to each other
    ///
    /// Order within a pair does not matter; the modifier checks both ways.
    pub rivalries: Vec<(String, String)>,

    /// Greed level above which two greedy agents compete instead of bonding
    pub greed_rivalry_threshold: f32,

    /// Affinity level past which positive deltas diminish
    ///
    /// Above this, a positive delta is scaled by (1 - affinity * 0.5):
    /// close relationships are harder to deepen further.
    pub diminishing_returns_from: f32,
}

impl Default for AffinityConfig {
    fn default() -> Self {
        Self {
            same_faction_bonus: 0.2,
            rival_faction_penalty: -0.3,
            rivalries: Vec::new(),
            greed_rivalry_threshold: 0.7,
            diminishing_returns_from: 0.5,
        }
    }
}

/// Tunables for graph construction and analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Minimum |affinity| for a relationship to appear as a graph edge
    ///
    /// Registration seeds a relationship for every pair, so without a floor
    /// the step graph would always be complete and density meaningless.
    /// Pairs below the floor still exist in the table; they just do not
    /// count as social ties.
    pub min_edge_weight: f32,

    /// Convergence tolerance for eigenvector power iteration
    ///
    /// Iteration stops when no coordinate moves more than this between
    /// rounds. Non-convergence within the cap is not an error; the last
    /// iterate is returned as a best-effort approximation.
    pub eigenvector_tolerance: f32,

    /// Iteration cap for eigenvector power iteration
    pub eigenvector_max_iterations: usize,

    /// Round cap for label-propagation community detection
    pub label_propagation_max_rounds: usize,

    /// Number of node pairs sampled for the average-path-length estimate
    ///
    /// Unreachable pairs are excluded from the average. 100 samples keeps
    /// the estimate stable enough for analytics without an all-pairs pass.
    pub path_length_samples: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            min_edge_weight: 0.05,
            eigenvector_tolerance: 1e-4,
            eigenvector_max_iterations: 100,
            label_propagation_max_rounds: 20,
            path_length_samples: 100,
        }
    }
}

/// Tunables for organic gang formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GangConfig {
    /// Minimum pairwise affinity for two agents to gang up
    ///
    /// Every accepted member must clear this against every other member
    /// (mutual, not star-shaped), so detected groups are near-cliques.
    pub affinity_threshold: f32,

    /// Minimum members for a proposal to qualify
    pub min_size: usize,

    /// Members past this count are not recruited into one proposal
    pub max_size: usize,

    /// Trait level above which an axis counts as a dominant gang trait
    pub dominant_trait_threshold: f32,

    /// Average affinity above which run_step auto-executes a proposal
    ///
    /// Groups this tight would realistically self-organize without an
    /// external push; everything below stays a proposal for the caller.
    pub auto_execute_threshold: f32,
}

impl Default for GangConfig {
    fn default() -> Self {
        Self {
            affinity_threshold: 0.75,
            min_size: 3,
            max_size: 8,
            dominant_trait_threshold: 0.7,
            auto_execute_threshold: 0.8,
        }
    }
}

/// Tunables for reputation cascades
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadeConfig {
    /// Maximum hop distance a cascade travels from the actor
    pub max_depth: usize,

    /// Per-depth multiplier on the reputation delta (0.6 ^ depth)
    pub depth_decay: f32,

    /// Per-hop multiplier on the carried cascade strength
    pub hop_decay: f32,

    /// Hops whose resulting strength falls below this stop propagating
    pub min_strength: f32,

    /// |reputation delta| above which a node counts as influenced
    pub significance_threshold: f32,

    /// Multiplier turning a reputation delta into an affinity nudge on
    /// the relationship the cascade arrived through
    pub affinity_nudge_factor: f32,

    /// |Δaffinity| in record_interaction that triggers a cascade
    pub trigger_threshold: f32,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            depth_decay: 0.6,
            hop_decay: 0.7,
            min_strength: 0.1,
            significance_threshold: 5.0,
            affinity_nudge_factor: 0.005,
            trigger_threshold: 0.3,
        }
    }
}

/// Tunables for influence spreading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfluenceConfig {
    /// Fixed per-hop decay on propagation strength
    pub decay: f32,

    /// Hops below this strength are dropped from further propagation
    pub min_strength: f32,

    /// Influence points the source gains per successful spread
    ///
    /// Repeated successful spreading slowly raises future reach
    /// (max depth is influence / 30, rounded up).
    pub source_gain: f32,

    /// Divisor converting an influence score into a max spread depth
    pub depth_divisor: f32,

    /// Number of top-central agents seeded with spreads each step
    pub seeds_per_step: usize,
}

impl Default for InfluenceConfig {
    fn default() -> Self {
        Self {
            decay: 0.7,
            min_strength: 0.1,
            source_gain: 0.5,
            depth_divisor: 30.0,
            seeds_per_step: 2,
        }
    }
}

/// Tunables for coordinated gang actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinationConfig {
    /// Willingness below this excludes a member from the roster
    pub willingness_cutoff: f32,

    /// Minimum participants for a plan to go ahead
    pub min_participants: usize,

    /// Base success probability of an executed action
    pub base_success_chance: f32,

    /// Success probability gained per participant
    pub per_participant_bonus: f32,

    /// Ceiling on success probability regardless of turnout
    pub success_chance_cap: f32,

    /// Chance per step that an idle gang plans a new action
    pub plan_chance_per_step: f64,
}

impl Default for CoordinationConfig {
    fn default() -> Self {
        Self {
            willingness_cutoff: 0.3,
            min_participants: 2,
            base_success_chance: 0.4,
            per_participant_bonus: 0.05,
            success_chance_cap: 0.95,
            plan_chance_per_step: 0.15,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            history_cap: 20,
            affinity: AffinityConfig::default(),
            network: NetworkConfig::default(),
            gang: GangConfig::default(),
            cascade: CascadeConfig::default(),
            influence: InfluenceConfig::default(),
            coordination: CoordinationConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config with a specific RNG seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.gang.min_size < 2 {
            return Err(format!(
                "gang.min_size ({}) must be at least 2",
                self.gang.min_size
            ));
        }
        if self.gang.min_size > self.gang.max_size {
            return Err(format!(
                "gang.min_size ({}) must be <= gang.max_size ({})",
                self.gang.min_size, self.gang.max_size
            ));
        }
        if !(0.0..=1.0).contains(&self.gang.affinity_threshold) {
            return Err(format!(
                "gang.affinity_threshold ({}) must be in [0, 1]",
                self.gang.affinity_threshold
            ));
        }
        if self.cascade.max_depth == 0 {
            return Err("cascade.max_depth must be positive".into());
        }
        if self.network.eigenvector_max_iterations == 0 {
            return Err("network.eigenvector_max_iterations must be positive".into());
        }
        Ok(())
    }
}
