use thiserror::Error;
use weave_types::{ParamsError, ProposalId, Timestamp};

use crate::proposal::ProposalState;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("invalid governance configuration: {0}")]
    InvalidConfig(#[from] ParamsError),

    #[error("invalid proposal payload: {0}")]
    InvalidPayload(String),

    #[error("proposal {0} not found")]
    UnknownProposal(ProposalId),

    #[error("action not permitted while proposal is {actual:?}")]
    WrongState { actual: ProposalState },

    #[error("window still open: eligible at {eligible_at}")]
    NotYetEligible { eligible_at: Timestamp },

    #[error("actor {0} is not authorized for this action")]
    Unauthorized(String),

    #[error("registry error: {0}")]
    Registry(String),

    #[error("storage error: {0}")]
    Storage(String),
}
