//! Governance storage trait.

use crate::StoreError;
use weave_types::ProposalId;

/// Trait for storing timelock state (proposals plus engine bookkeeping).
///
/// Values are opaque serialized records; the engine owns the encoding.
pub trait GovernanceStore {
    /// Store a proposal record.
    fn put_proposal(&self, id: ProposalId, data: &[u8]) -> Result<(), StoreError>;

    /// Get a proposal record by id.
    fn get_proposal(&self, id: ProposalId) -> Result<Option<Vec<u8>>, StoreError>;

    /// All stored proposal records.
    fn iter_proposals(&self) -> Result<Vec<(ProposalId, Vec<u8>)>, StoreError>;

    /// Store an engine bookkeeping value (next id, params).
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Retrieve an engine bookkeeping value.
    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
}
