//! Whitelist batch and participant storage trait.

use crate::StoreError;
use weave_types::{MemberAddress, ProposalId};

/// Trait for storing committed whitelist batches and participant ranks.
///
/// Both tables are append-mostly: batches are never rewritten, participant
/// records are overwritten in place on re-admission.
pub trait RegistryStore {
    /// Store a committed batch record.
    fn put_batch(&self, id: ProposalId, data: &[u8]) -> Result<(), StoreError>;

    /// Get a batch record by id.
    fn get_batch(&self, id: ProposalId) -> Result<Option<Vec<u8>>, StoreError>;

    /// All stored batch records.
    fn iter_batches(&self) -> Result<Vec<(ProposalId, Vec<u8>)>, StoreError>;

    /// Store a participant's rank record.
    fn put_participant(&self, address: &MemberAddress, data: &[u8]) -> Result<(), StoreError>;

    /// All stored participant records.
    fn iter_participants(&self) -> Result<Vec<(MemberAddress, Vec<u8>)>, StoreError>;
}
