//! The proposal timelock engine.
//!
//! Owns the proposal table and the whitelist batch registry. Exclusive
//! ownership gives the first-committer-wins discipline for free: once one
//! call flips a proposal's state, every later attempt observes the new
//! state and fails with `WrongState` instead of re-running the handler.

use std::collections::HashMap;

use weave_registry::BatchRegistry;
use weave_store::{GovernanceStore, RegistryStore};
use weave_types::{GovernanceParams, MemberAddress, ProposalId, Timestamp};

use crate::error::GovernanceError;
use crate::policy::{GovernancePolicy, OpenPolicy};
use crate::proposal::{Proposal, ProposalPayload, ProposalState};

const META_NEXT_ID: &str = "next_proposal_id";
const META_PARAMS: &str = "params";

/// The timelock engine — gates every governance action behind the
/// objection window and the execution delay.
pub struct TimelockEngine {
    params: GovernanceParams,
    policy: Box<dyn GovernancePolicy>,
    next_proposal_id: u64,
    proposals: HashMap<ProposalId, Proposal>,
    /// Committed whitelist batches. Only completion dispatch writes here;
    /// the rest of the system reads through `batches()`.
    batches: BatchRegistry,
}

impl TimelockEngine {
    /// Build an engine with the default open policy. Invalid window
    /// configuration is rejected here, never at call time.
    pub fn new(params: GovernanceParams) -> Result<Self, GovernanceError> {
        Self::with_policy(params, Box::new(OpenPolicy))
    }

    /// Build an engine with a custom queue/cancel policy.
    pub fn with_policy(
        params: GovernanceParams,
        policy: Box<dyn GovernancePolicy>,
    ) -> Result<Self, GovernanceError> {
        params.validate()?;
        Ok(Self {
            params,
            policy,
            next_proposal_id: 1,
            proposals: HashMap::new(),
            batches: BatchRegistry::new(),
        })
    }

    /// Submit a proposal. It enters the objection window immediately.
    pub fn propose(
        &mut self,
        payload: ProposalPayload,
        proposer: MemberAddress,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        payload.validate()?;

        let id = ProposalId::new(self.next_proposal_id);
        self.next_proposal_id += 1;

        tracing::info!(proposal = %id, kind = payload.kind(), proposer = %proposer, "proposal created");
        self.proposals.insert(
            id,
            Proposal {
                id,
                payload,
                proposer,
                state: ProposalState::Active,
                created_at: now,
                queued_at: None,
                completed_at: None,
            },
        );
        Ok(id)
    }

    /// Advance a proposal from Active to Queued once the objection window
    /// has elapsed.
    pub fn queue(
        &mut self,
        id: ProposalId,
        actor: &MemberAddress,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let objection_window = self.params.objection_window_secs;
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::UnknownProposal(id))?;

        if proposal.state != ProposalState::Active {
            return Err(GovernanceError::WrongState {
                actual: proposal.state,
            });
        }
        if !self.policy.can_queue(proposal, actor) {
            return Err(GovernanceError::Unauthorized(actor.to_string()));
        }
        if !proposal.created_at.window_elapsed(objection_window, now) {
            let eligible_at = proposal.created_at.plus_secs(objection_window);
            tracing::debug!(
                proposal = %id,
                remaining = %weave_utils::format_duration(eligible_at.as_secs().saturating_sub(now.as_secs())),
                "objection window still open"
            );
            return Err(GovernanceError::NotYetEligible { eligible_at });
        }

        proposal.state = ProposalState::Queued;
        proposal.queued_at = Some(now);
        tracing::info!(proposal = %id, actor = %actor, "proposal queued");
        Ok(())
    }

    /// Complete a Queued proposal once the execution delay has elapsed,
    /// dispatching its payload handler exactly once.
    pub fn complete(&mut self, id: ProposalId, now: Timestamp) -> Result<(), GovernanceError> {
        let proposal = self
            .proposals
            .get(&id)
            .ok_or(GovernanceError::UnknownProposal(id))?;

        if proposal.state != ProposalState::Queued {
            return Err(GovernanceError::WrongState {
                actual: proposal.state,
            });
        }
        let queued_at = proposal
            .queued_at
            .expect("queued proposal carries a queue timestamp");
        if !queued_at.window_elapsed(self.params.execution_delay_secs, now) {
            let eligible_at = queued_at.plus_secs(self.params.execution_delay_secs);
            tracing::debug!(
                proposal = %id,
                remaining = %weave_utils::format_duration(eligible_at.as_secs().saturating_sub(now.as_secs())),
                "execution delay still running"
            );
            return Err(GovernanceError::NotYetEligible { eligible_at });
        }

        // Dispatch before stamping: if a handler refuses, the proposal
        // stays Queued and no state has moved.
        let payload = proposal.payload.clone();
        match payload {
            ProposalPayload::ParticipantBatch { rank, root, .. } => {
                // Batch id = proposal id, unique by construction.
                self.batches
                    .commit(id, root, rank)
                    .map_err(|e| GovernanceError::Registry(e.to_string()))?;
            }
            ProposalPayload::ParameterChange { param, new_value } => {
                param.apply(&mut self.params, new_value);
                tracing::info!(param = param.name(), value = new_value, "parameter changed");
            }
        }

        let proposal = self
            .proposals
            .get_mut(&id)
            .expect("proposal checked above");
        proposal.state = ProposalState::Completed;
        proposal.completed_at = Some(now);
        tracing::info!(proposal = %id, "proposal completed");
        Ok(())
    }

    /// Cancel a proposal from Active or Queued. Terminal; the payload
    /// handler never runs.
    pub fn cancel(&mut self, id: ProposalId, actor: &MemberAddress) -> Result<(), GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::UnknownProposal(id))?;

        if proposal.state.is_terminal() {
            return Err(GovernanceError::WrongState {
                actual: proposal.state,
            });
        }
        if !self.policy.can_cancel(proposal, actor) {
            return Err(GovernanceError::Unauthorized(actor.to_string()));
        }

        proposal.state = ProposalState::Cancelled;
        tracing::info!(proposal = %id, actor = %actor, "proposal cancelled");
        Ok(())
    }

    /// Look up a proposal.
    pub fn get(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(&id)
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// Current window configuration.
    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    /// Read-only view of the committed whitelist batches. The only write
    /// path is completion dispatch.
    pub fn batches(&self) -> &BatchRegistry {
        &self.batches
    }

    /// Swap the queue/cancel policy (e.g. after restoring from a store).
    pub fn set_policy(&mut self, policy: Box<dyn GovernancePolicy>) {
        self.policy = policy;
    }
}

impl TimelockEngine {
    /// Persist all engine state.
    pub fn save_to_store(
        &self,
        governance: &dyn GovernanceStore,
        registry: &dyn RegistryStore,
    ) -> Result<(), GovernanceError> {
        governance
            .put_meta(META_NEXT_ID, &self.next_proposal_id.to_be_bytes())
            .map_err(|e| GovernanceError::Storage(e.to_string()))?;

        let params_bytes =
            bincode::serialize(&self.params).map_err(|e| GovernanceError::Storage(e.to_string()))?;
        governance
            .put_meta(META_PARAMS, &params_bytes)
            .map_err(|e| GovernanceError::Storage(e.to_string()))?;

        for (id, proposal) in &self.proposals {
            let bytes = bincode::serialize(proposal)
                .map_err(|e| GovernanceError::Storage(e.to_string()))?;
            governance
                .put_proposal(*id, &bytes)
                .map_err(|e| GovernanceError::Storage(e.to_string()))?;
        }

        self.batches
            .save_to_store(registry)
            .map_err(|e| GovernanceError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Restore an engine with the default open policy; use `set_policy`
    /// afterwards if the deployment runs a custom one.
    pub fn load_from_store(
        governance: &dyn GovernanceStore,
        registry: &dyn RegistryStore,
    ) -> Result<Self, GovernanceError> {
        let params = match governance
            .get_meta(META_PARAMS)
            .map_err(|e| GovernanceError::Storage(e.to_string()))?
        {
            Some(bytes) => bincode::deserialize(&bytes)
                .map_err(|e| GovernanceError::Storage(e.to_string()))?,
            None => GovernanceParams::default(),
        };

        let next_proposal_id = match governance
            .get_meta(META_NEXT_ID)
            .map_err(|e| GovernanceError::Storage(e.to_string()))?
        {
            Some(bytes) if bytes.len() >= 8 => {
                u64::from_be_bytes(bytes[..8].try_into().expect("length checked"))
            }
            _ => 1,
        };

        let entries = governance
            .iter_proposals()
            .map_err(|e| GovernanceError::Storage(e.to_string()))?;
        let mut proposals = HashMap::new();
        for (id, bytes) in entries {
            let proposal: Proposal = bincode::deserialize(&bytes)
                .map_err(|e| GovernanceError::Storage(e.to_string()))?;
            proposals.insert(id, proposal);
        }

        let batches = BatchRegistry::load_from_store(registry)
            .map_err(|e| GovernanceError::Storage(e.to_string()))?;

        let mut engine = Self::new(params)?;
        engine.next_proposal_id = next_proposal_id;
        engine.proposals = proposals;
        engine.batches = batches;
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weave_store::MemoryStore;
    use weave_types::{MerkleRoot, Rank};

    use crate::params::GovernableParam;

    fn addr(n: u8) -> MemberAddress {
        MemberAddress::new(format!("weav_{:040x}", n))
    }

    fn batch_payload() -> ProposalPayload {
        ProposalPayload::ParticipantBatch {
            rank: Rank::new(5),
            root: MerkleRoot::new([1u8; 32]),
            label: "new members".to_string(),
        }
    }

    /// Short windows so test arithmetic stays readable.
    fn engine() -> TimelockEngine {
        TimelockEngine::new(GovernanceParams::new(100, 50)).unwrap()
    }

    fn t(secs: u64) -> Timestamp {
        Timestamp::new(secs)
    }

    #[test]
    fn invalid_config_rejected_up_front() {
        assert!(matches!(
            TimelockEngine::new(GovernanceParams::new(0, 50)),
            Err(GovernanceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn propose_assigns_monotonic_ids() {
        let mut engine = engine();
        let a = engine.propose(batch_payload(), addr(1), t(0)).unwrap();
        let b = engine.propose(batch_payload(), addr(1), t(0)).unwrap();
        assert!(a < b);
        assert_eq!(engine.get(a).unwrap().state, ProposalState::Active);
        assert_eq!(engine.get(a).unwrap().created_at, t(0));
        assert!(engine.get(a).unwrap().queued_at.is_none());
    }

    #[test]
    fn malformed_payload_rejected_at_propose() {
        let mut engine = engine();
        let payload = ProposalPayload::ParticipantBatch {
            rank: Rank::new(5),
            root: MerkleRoot::ZERO,
            label: "new members".to_string(),
        };
        assert!(matches!(
            engine.propose(payload, addr(1), t(0)),
            Err(GovernanceError::InvalidPayload(_))
        ));
        assert_eq!(engine.proposal_count(), 0);
    }

    #[test]
    fn queue_before_window_fails() {
        let mut engine = engine();
        let id = engine.propose(batch_payload(), addr(1), t(0)).unwrap();

        let result = engine.queue(id, &addr(2), t(99));
        match result {
            Err(GovernanceError::NotYetEligible { eligible_at }) => {
                assert_eq!(eligible_at, t(100));
            }
            other => panic!("expected NotYetEligible, got {other:?}"),
        }
        assert_eq!(engine.get(id).unwrap().state, ProposalState::Active);
    }

    #[test]
    fn queue_at_exact_boundary_succeeds() {
        let mut engine = engine();
        let id = engine.propose(batch_payload(), addr(1), t(0)).unwrap();

        engine.queue(id, &addr(2), t(100)).unwrap();
        let proposal = engine.get(id).unwrap();
        assert_eq!(proposal.state, ProposalState::Queued);
        assert_eq!(proposal.queued_at, Some(t(100)));
    }

    #[test]
    fn second_queue_observes_new_state() {
        let mut engine = engine();
        let id = engine.propose(batch_payload(), addr(1), t(0)).unwrap();
        engine.queue(id, &addr(2), t(150)).unwrap();

        // First committer won; the concurrent repeat fails on state.
        let result = engine.queue(id, &addr(3), t(150));
        assert!(matches!(
            result,
            Err(GovernanceError::WrongState {
                actual: ProposalState::Queued
            })
        ));
        assert_eq!(engine.get(id).unwrap().queued_at, Some(t(150)));
    }

    #[test]
    fn complete_before_delay_fails() {
        let mut engine = engine();
        let id = engine.propose(batch_payload(), addr(1), t(0)).unwrap();
        engine.queue(id, &addr(2), t(100)).unwrap();

        let result = engine.complete(id, t(149));
        match result {
            Err(GovernanceError::NotYetEligible { eligible_at }) => {
                assert_eq!(eligible_at, t(150));
            }
            other => panic!("expected NotYetEligible, got {other:?}"),
        }
        // Failed completion must not have touched the batch registry.
        assert!(engine.batches().is_empty());
    }

    #[test]
    fn complete_commits_batch_exactly_once() {
        let mut engine = engine();
        let id = engine.propose(batch_payload(), addr(1), t(0)).unwrap();
        engine.queue(id, &addr(2), t(100)).unwrap();
        engine.complete(id, t(150)).unwrap();

        let batch = engine.batches().lookup(id).unwrap();
        assert_eq!(batch.rank, Rank::new(5));
        assert_eq!(batch.root, MerkleRoot::new([1u8; 32]));
        assert_eq!(engine.get(id).unwrap().completed_at, Some(t(150)));

        // The handler never fires twice.
        let result = engine.complete(id, t(200));
        assert!(matches!(
            result,
            Err(GovernanceError::WrongState {
                actual: ProposalState::Completed
            })
        ));
        assert_eq!(engine.batches().len(), 1);
    }

    #[test]
    fn complete_skips_active_proposals() {
        let mut engine = engine();
        let id = engine.propose(batch_payload(), addr(1), t(0)).unwrap();

        // No transition skips a state: Active cannot complete directly.
        let result = engine.complete(id, t(1000));
        assert!(matches!(
            result,
            Err(GovernanceError::WrongState {
                actual: ProposalState::Active
            })
        ));
    }

    #[test]
    fn unknown_proposal_fails() {
        let mut engine = engine();
        assert!(matches!(
            engine.queue(ProposalId::new(9), &addr(1), t(0)),
            Err(GovernanceError::UnknownProposal(_))
        ));
        assert!(matches!(
            engine.complete(ProposalId::new(9), t(0)),
            Err(GovernanceError::UnknownProposal(_))
        ));
    }

    #[test]
    fn cancel_from_active_and_queued() {
        let mut engine = engine();
        let a = engine.propose(batch_payload(), addr(1), t(0)).unwrap();
        let b = engine.propose(batch_payload(), addr(1), t(0)).unwrap();
        engine.queue(b, &addr(2), t(100)).unwrap();

        engine.cancel(a, &addr(1)).unwrap();
        engine.cancel(b, &addr(1)).unwrap();
        assert_eq!(engine.get(a).unwrap().state, ProposalState::Cancelled);
        assert_eq!(engine.get(b).unwrap().state, ProposalState::Cancelled);

        // Cancelled is terminal: the handler can never run.
        let result = engine.complete(b, t(1000));
        assert!(matches!(result, Err(GovernanceError::WrongState { .. })));
        assert!(engine.batches().is_empty());
    }

    #[test]
    fn cancel_by_stranger_unauthorized() {
        let mut engine = engine();
        let id = engine.propose(batch_payload(), addr(1), t(0)).unwrap();

        let result = engine.cancel(id, &addr(2));
        assert!(matches!(result, Err(GovernanceError::Unauthorized(_))));
        assert_eq!(engine.get(id).unwrap().state, ProposalState::Active);
    }

    #[test]
    fn cancel_after_completion_fails() {
        let mut engine = engine();
        let id = engine.propose(batch_payload(), addr(1), t(0)).unwrap();
        engine.queue(id, &addr(2), t(100)).unwrap();
        engine.complete(id, t(150)).unwrap();

        let result = engine.cancel(id, &addr(1));
        assert!(matches!(
            result,
            Err(GovernanceError::WrongState {
                actual: ProposalState::Completed
            })
        ));
    }

    #[test]
    fn parameter_change_applies_at_completion() {
        let mut engine = engine();
        let payload = ProposalPayload::ParameterChange {
            param: GovernableParam::ExecutionDelaySecs,
            new_value: 10,
        };
        let id = engine.propose(payload, addr(1), t(0)).unwrap();
        engine.queue(id, &addr(1), t(100)).unwrap();

        // The old delay governs this proposal's own completion.
        assert!(matches!(
            engine.complete(id, t(149)),
            Err(GovernanceError::NotYetEligible { .. })
        ));
        engine.complete(id, t(150)).unwrap();
        assert_eq!(engine.params().execution_delay_secs, 10);
        assert_eq!(engine.params().objection_window_secs, 100);
    }

    #[test]
    fn restrictive_policy_blocks_queue() {
        struct NobodyQueues;
        impl GovernancePolicy for NobodyQueues {
            fn can_queue(&self, _: &Proposal, _: &MemberAddress) -> bool {
                false
            }
            fn can_cancel(&self, _: &Proposal, _: &MemberAddress) -> bool {
                true
            }
        }

        let mut engine =
            TimelockEngine::with_policy(GovernanceParams::new(100, 50), Box::new(NobodyQueues))
                .unwrap();
        let id = engine.propose(batch_payload(), addr(1), t(0)).unwrap();

        let result = engine.queue(id, &addr(1), t(100));
        assert!(matches!(result, Err(GovernanceError::Unauthorized(_))));
        // But the permissive cancel side still works.
        engine.cancel(id, &addr(9)).unwrap();
    }

    #[test]
    fn store_roundtrip_preserves_everything() {
        let mut engine = engine();
        let completed = engine.propose(batch_payload(), addr(1), t(0)).unwrap();
        engine.queue(completed, &addr(2), t(100)).unwrap();
        engine.complete(completed, t(150)).unwrap();
        let active = engine.propose(batch_payload(), addr(1), t(200)).unwrap();

        let store = MemoryStore::new();
        engine.save_to_store(&store, &store).unwrap();

        let mut restored = TimelockEngine::load_from_store(&store, &store).unwrap();
        assert_eq!(restored.proposal_count(), 2);
        assert_eq!(
            restored.get(completed).unwrap().state,
            ProposalState::Completed
        );
        assert_eq!(restored.batches().len(), 1);
        assert_eq!(restored.params(), engine.params());

        // Ids keep counting from where the saved engine stopped, and the
        // still-active proposal can finish its lifecycle.
        let next = restored.propose(batch_payload(), addr(3), t(300)).unwrap();
        assert!(next > active);
        restored.queue(active, &addr(2), t(300)).unwrap();
        restored.complete(active, t(350)).unwrap();
        assert_eq!(restored.batches().len(), 2);
    }
}
