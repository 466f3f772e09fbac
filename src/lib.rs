//! Gangland - Social Graph Simulation for Autonomous Game Agents
//!
//! A deterministic social simulation: agents with seven-axis personalities
//! build pairwise relationships through interactions, the relationship graph
//! is analyzed for centrality and communities, tight clusters crystallize
//! into gangs, and reputation and influence propagate along social ties.
//!
//! The engine is headless. It emits serializable reports and snapshots;
//! rendering, persistence, and agent decision-making live elsewhere.

pub mod affinity;
pub mod cascade;
pub mod core;
pub mod engine;
pub mod gang;
pub mod influence;
pub mod model;
pub mod network;

pub use crate::core::config::EngineConfig;
pub use crate::core::error::{Result, SocialError};
pub use crate::core::types::{AgentId, GangId, PairKey, Tick};
pub use engine::{SocialEngine, StepReport};
