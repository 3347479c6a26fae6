//! Proposal timelock governance for the Weave registry.
//!
//! Every governance action passes through the same state machine:
//! propose → objection window → queue → execution delay → complete, with
//! cancellation possible until completion. Payload handlers run exactly
//! once, at completion. Who may queue or cancel is a pluggable policy;
//! the windows are configuration, not structure.

pub mod engine;
pub mod error;
pub mod params;
pub mod policy;
pub mod proposal;

pub use engine::TimelockEngine;
pub use error::GovernanceError;
pub use params::GovernableParam;
pub use policy::{GovernancePolicy, OpenPolicy};
pub use proposal::{Proposal, ProposalPayload, ProposalState};
