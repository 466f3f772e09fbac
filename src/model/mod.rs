pub mod profile;
pub mod relationship;

pub use profile::{
    AgentProfile, PersonalityArchetype, PersonalityTraits, ReputationCategory, ReputationScores,
    SocialMemory,
};
pub use relationship::{
    InteractionKind, InteractionRecord, Outcome, Relationship, RelationshipKind,
};
