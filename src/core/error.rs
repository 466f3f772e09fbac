use thiserror::Error;

use crate::core::types::AgentId;

#[derive(Error, Debug)]
pub enum SocialError {
    #[error("Agent already registered: {0}")]
    DuplicateAgent(AgentId),

    #[error("Unknown agent: {0}")]
    UnknownAgent(AgentId),

    #[error("Invalid group size {size} (expected {min}..={max})")]
    InvalidGroupSize {
        size: usize,
        min: usize,
        max: usize,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SocialError>;
