use thiserror::Error;
use weave_types::ProposalId;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no committed batch with id {0}")]
    UnknownBatch(ProposalId),

    #[error("batch {0} has already been committed")]
    DuplicateBatch(ProposalId),

    #[error("merkle proof does not reconstruct the batch root")]
    ProofMismatch,

    #[error("attestation was not signed by the trusted authority")]
    InvalidSignature,

    #[error("invalid admission configuration: {0}")]
    InvalidConfig(String),

    #[error("storage error: {0}")]
    Storage(String),
}
