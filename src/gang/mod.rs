//! Organic gang formation and coordinated gang actions

pub mod coordination;
pub mod formation;

pub use coordination::{ActionKind, ActionStatus, GangCoordinationAction, PlanOptions, Priority};
pub use formation::GangFormationProposal;
