//! Participant rank ledger.

use std::collections::HashMap;

use crate::error::RegistryError;
use weave_store::RegistryStore;
use weave_types::{MemberAddress, Rank};

/// Process-wide map of participant ranks.
///
/// Every address implicitly holds `Rank::NONE` until admitted. Writes go
/// through the admission processor (and one-time genesis seeding); the rest
/// of the system only reads.
#[derive(Debug, Default)]
pub struct ParticipantLedger {
    ranks: HashMap<MemberAddress, Rank>,
}

impl ParticipantLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rank of an address; `Rank::NONE` if never admitted.
    pub fn rank_of(&self, address: &MemberAddress) -> Rank {
        self.ranks.get(address).copied().unwrap_or(Rank::NONE)
    }

    /// Number of addresses holding a membership rank.
    pub fn member_count(&self) -> usize {
        self.ranks.values().filter(|rank| rank.is_member()).count()
    }

    /// Set a participant's rank. Last writer wins.
    pub(crate) fn set_rank(&mut self, address: MemberAddress, rank: Rank) {
        self.ranks.insert(address, rank);
    }

    /// Persist all participant records to a registry store.
    pub fn save_to_store(&self, store: &dyn RegistryStore) -> Result<(), RegistryError> {
        for (address, rank) in &self.ranks {
            let bytes =
                bincode::serialize(rank).map_err(|e| RegistryError::Storage(e.to_string()))?;
            store
                .put_participant(address, &bytes)
                .map_err(|e| RegistryError::Storage(e.to_string()))?;
        }
        Ok(())
    }

    /// Restore participant records from a registry store.
    pub fn load_from_store(store: &dyn RegistryStore) -> Result<Self, RegistryError> {
        let entries = store
            .iter_participants()
            .map_err(|e| RegistryError::Storage(e.to_string()))?;
        let mut ranks = HashMap::new();
        for (address, bytes) in entries {
            let rank: Rank =
                bincode::deserialize(&bytes).map_err(|e| RegistryError::Storage(e.to_string()))?;
            ranks.insert(address, rank);
        }
        Ok(Self { ranks })
    }
}
