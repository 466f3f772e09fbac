//! Pairwise affinity scoring
//!
//! Pure, stateless functions: personality compatibility, faction modifiers,
//! per-interaction deltas, and the relationship classification ladder.
//! Nothing here touches the profile store; the engine feeds values in and
//! applies the results.

use crate::core::config::AffinityConfig;
use crate::model::{InteractionKind, Outcome, PersonalityTraits, RelationshipKind};

// Trait similarity weights. Sociability dominates because it gates how much
// two agents interact at all; greed is handled separately below.
const WEIGHT_SOCIABILITY: f32 = 3.0;
const WEIGHT_AGGRESSION: f32 = 2.0;
const WEIGHT_LOYALTY: f32 = 2.0;
const WEIGHT_RISK: f32 = 1.5;
const WEIGHT_PATIENCE: f32 = 1.0;
const WEIGHT_GREED: f32 = 1.5;

const MAX_SCORE: f32 = WEIGHT_SOCIABILITY
    + WEIGHT_AGGRESSION
    + WEIGHT_LOYALTY
    + WEIGHT_RISK
    + WEIGHT_PATIENCE
    + WEIGHT_GREED;

// Base (affinity, trust) deltas per interaction kind
const DELTA_CHAT: (f32, f32) = (0.03, 0.02);
const DELTA_TRADE: (f32, f32) = (0.05, 0.06);
const DELTA_COMBAT: (f32, f32) = (-0.15, -0.10);
const DELTA_COOPERATION: (f32, f32) = (0.08, 0.10);
const DELTA_BETRAYAL: (f32, f32) = (-0.5, -0.7);
const DELTA_GIFT: (f32, f32) = (0.10, 0.05);
const DELTA_HELP: (f32, f32) = (0.12, 0.08);

/// Multiplier applied to both deltas when the outcome is neutral
const NEUTRAL_SCALE: f32 = 0.25;

/// Personality compatibility in [-1, 1]
///
/// Weighted similarity across the trait axes, with one special case: two
/// high-greed agents compete for the same resources, so matching greed is
/// a penalty there instead of a reward. The weighted sum is normalized by
/// centering around the maximum possible score and doubling.
pub fn base_affinity(a: &PersonalityTraits, b: &PersonalityTraits, config: &AffinityConfig) -> f32 {
    let similarity = |x: f32, y: f32| 1.0 - (x - y).abs();

    let mut score = WEIGHT_SOCIABILITY * similarity(a.sociability, b.sociability)
        + WEIGHT_AGGRESSION * similarity(a.aggression, b.aggression)
        + WEIGHT_LOYALTY * similarity(a.loyalty, b.loyalty)
        + WEIGHT_RISK * similarity(a.risk_tolerance, b.risk_tolerance)
        + WEIGHT_PATIENCE * similarity(a.patience, b.patience);

    let both_greedy = a.greed > config.greed_rivalry_threshold
        && b.greed > config.greed_rivalry_threshold;
    if both_greedy {
        score -= WEIGHT_GREED;
    } else {
        score += WEIGHT_GREED * similarity(a.greed, b.greed);
    }

    ((score / MAX_SCORE - 0.5) * 2.0).clamp(-1.0, 1.0)
}

/// Adjust an affinity for faction alignment
///
/// Same faction is a bonus, configured rival factions a penalty; agents
/// without a faction are unaffected.
pub fn apply_faction_modifier(
    affinity: f32,
    faction_a: Option<&str>,
    faction_b: Option<&str>,
    config: &AffinityConfig,
) -> f32 {
    let (Some(a), Some(b)) = (faction_a, faction_b) else {
        return affinity;
    };

    let modifier = if a == b {
        config.same_faction_bonus
    } else if factions_are_rivals(a, b, config) {
        config.rival_faction_penalty
    } else {
        0.0
    };

    (affinity + modifier).clamp(-1.0, 1.0)
}

/// Whether two faction labels are configured as rivals (order-insensitive)
pub fn factions_are_rivals(a: &str, b: &str, config: &AffinityConfig) -> bool {
    config
        .rivalries
        .iter()
        .any(|(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// (Δaffinity, Δtrust) for one interaction
///
/// The base pair is kind-specific; a negative outcome flips the sign of the
/// affinity delta only, and a neutral outcome scales both down. Positive
/// affinity deltas diminish once the relationship is already strong.
pub fn interaction_delta(
    kind: InteractionKind,
    outcome: Outcome,
    current_affinity: f32,
    _current_trust: f32,
    config: &AffinityConfig,
) -> (f32, f32) {
    let (base_affinity, base_trust) = match kind {
        InteractionKind::Chat => DELTA_CHAT,
        InteractionKind::Trade => DELTA_TRADE,
        InteractionKind::Combat => DELTA_COMBAT,
        InteractionKind::Cooperation => DELTA_COOPERATION,
        InteractionKind::Betrayal => DELTA_BETRAYAL,
        InteractionKind::Gift => DELTA_GIFT,
        InteractionKind::Help => DELTA_HELP,
    };

    let (mut affinity_delta, trust_delta) = match outcome {
        Outcome::Positive => (base_affinity, base_trust),
        Outcome::Negative => (-base_affinity, base_trust),
        Outcome::Neutral => (base_affinity * NEUTRAL_SCALE, base_trust * NEUTRAL_SCALE),
    };

    // Diminishing returns past an already-close relationship
    if affinity_delta > 0.0 && current_affinity > config.diminishing_returns_from {
        affinity_delta *= 1.0 - current_affinity * 0.5;
    }

    (affinity_delta, trust_delta)
}

/// Classification ladder over (affinity, trust)
///
/// Ordered thresholds; every pair in [-1,1] x [0,1] lands on exactly one tag.
pub fn classify(affinity: f32, trust: f32) -> RelationshipKind {
    if affinity < -0.5 {
        RelationshipKind::Enemy
    } else if affinity < -0.2 {
        RelationshipKind::Rival
    } else if affinity > 0.5 && trust > 0.6 {
        RelationshipKind::Ally
    } else if affinity > 0.3 {
        RelationshipKind::Friend
    } else if affinity > -0.2 && trust < 0.3 {
        RelationshipKind::Acquaintance
    } else {
        RelationshipKind::Stranger
    }
}
