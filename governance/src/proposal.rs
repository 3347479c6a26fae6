//! Governance proposals and their lifecycle.

use serde::{Deserialize, Serialize};
use weave_types::{MemberAddress, MerkleRoot, ProposalId, Rank, Timestamp};

use crate::error::GovernanceError;
use crate::params::GovernableParam;

/// The lifecycle of a proposal.
///
/// Active is initial; Queued is the sole intermediate; Completed and
/// Cancelled are terminal. No transition skips a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalState {
    /// Sitting in the objection window.
    Active,
    /// Past the objection window, sitting in the execution delay.
    Queued,
    /// Executed; the payload handler has run exactly once.
    Completed,
    /// Withdrawn before execution; the handler never ran.
    Cancelled,
}

impl ProposalState {
    /// Terminal states admit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// What a proposal changes. Closed set: completion dispatches by
/// exhaustive match, so adding a kind is a compile-time-checked addition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalPayload {
    /// Admit an unbounded candidate set via one Merkle root. Proven
    /// members of the set are granted `rank` after KYC.
    ParticipantBatch {
        rank: Rank,
        root: MerkleRoot,
        label: String,
    },
    /// Change one of the timelock windows (the windows govern themselves).
    ParameterChange {
        param: GovernableParam,
        new_value: u64,
    },
}

impl ProposalPayload {
    /// Short kind tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ParticipantBatch { .. } => "participant_batch",
            Self::ParameterChange { .. } => "parameter_change",
        }
    }

    /// Structural validation, run at propose time so no malformed payload
    /// ever reaches dispatch.
    pub(crate) fn validate(&self) -> Result<(), GovernanceError> {
        match self {
            Self::ParticipantBatch { rank, root, label } => {
                if label.trim().is_empty() {
                    return Err(GovernanceError::InvalidPayload(
                        "participant batch label is empty".to_string(),
                    ));
                }
                if root.is_zero() {
                    return Err(GovernanceError::InvalidPayload(
                        "participant batch root is zero".to_string(),
                    ));
                }
                if !rank.is_member() {
                    return Err(GovernanceError::InvalidPayload(
                        "participant batch rank grants no membership".to_string(),
                    ));
                }
                Ok(())
            }
            Self::ParameterChange { param, new_value } => {
                if *new_value == 0 {
                    return Err(GovernanceError::InvalidPayload(format!(
                        "{} must be nonzero",
                        param.name()
                    )));
                }
                Ok(())
            }
        }
    }
}

/// A governance proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub payload: ProposalPayload,
    pub proposer: MemberAddress,
    pub state: ProposalState,
    /// When the proposal entered the objection window.
    pub created_at: Timestamp,
    /// Set exactly once, on Active → Queued.
    pub queued_at: Option<Timestamp>,
    /// Set exactly once, on Queued → Completed.
    pub completed_at: Option<Timestamp>,
}
