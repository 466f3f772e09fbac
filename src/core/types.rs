//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for agents (bot account names)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier for a formed gang (its tag)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GangId(pub String);

impl fmt::Display for GangId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GangId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Simulation step counter (one run_step advances one tick)
pub type Tick = u64;

/// Canonical key for the single relationship record of an unordered agent pair.
///
/// The constructor orders the two ids lexicographically, so `(a, b)` and
/// `(b, a)` always map to the same key. This is what guarantees exactly one
/// mutable relationship per pair: there is no second copy to drift.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairKey {
    first: AgentId,
    second: AgentId,
}

impl PairKey {
    pub fn new(a: &AgentId, b: &AgentId) -> Self {
        if a <= b {
            Self {
                first: a.clone(),
                second: b.clone(),
            }
        } else {
            Self {
                first: b.clone(),
                second: a.clone(),
            }
        }
    }

    pub fn first(&self) -> &AgentId {
        &self.first
    }

    pub fn second(&self) -> &AgentId {
        &self.second
    }

    /// Given one endpoint, return the other. None if `id` is not an endpoint.
    pub fn other(&self, id: &AgentId) -> Option<&AgentId> {
        if &self.first == id {
            Some(&self.second)
        } else if &self.second == id {
            Some(&self.first)
        } else {
            None
        }
    }

    pub fn contains(&self, id: &AgentId) -> bool {
        &self.first == id || &self.second == id
    }
}
