//! Pluggable queue/cancel authorization.
//!
//! The sampled deployments advance proposals purely on elapsed time, but a
//! real network likely wants a veto quorum or a guardian set. Those rules
//! plug in here rather than being hard-coded into the engine.

use weave_types::MemberAddress;

use crate::proposal::Proposal;

/// Decides who may queue and who may cancel a proposal.
///
/// Implementations see the full proposal, so they can discriminate by
/// payload kind, proposer, or age.
pub trait GovernancePolicy {
    /// May `actor` advance this proposal from Active to Queued?
    fn can_queue(&self, proposal: &Proposal, actor: &MemberAddress) -> bool;

    /// May `actor` cancel this proposal?
    fn can_cancel(&self, proposal: &Proposal, actor: &MemberAddress) -> bool;
}

/// The optimistic default: anyone may queue once the objection window has
/// elapsed; only the proposer may withdraw.
pub struct OpenPolicy;

impl GovernancePolicy for OpenPolicy {
    fn can_queue(&self, _proposal: &Proposal, _actor: &MemberAddress) -> bool {
        true
    }

    fn can_cancel(&self, proposal: &Proposal, actor: &MemberAddress) -> bool {
        proposal.proposer == *actor
    }
}
