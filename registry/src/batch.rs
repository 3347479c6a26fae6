//! Committed whitelist batches.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::RegistryError;
use weave_store::RegistryStore;
use weave_types::{MerkleRoot, ProposalId, Rank};

/// One committed batch: a Merkle root over a candidate set and the rank any
/// proven member of that set is granted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistBatch {
    /// Equal to the id of the proposal that created this batch.
    pub id: ProposalId,
    pub root: MerkleRoot,
    pub rank: Rank,
}

/// Append-only map of committed batches, keyed by the creating proposal id.
///
/// There is no update or delete: once committed a batch stays valid for
/// proof verification indefinitely.
#[derive(Debug, Default)]
pub struct BatchRegistry {
    batches: HashMap<ProposalId, WhitelistBatch>,
}

impl BatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a batch. Ids derive from proposal ids, so a duplicate here
    /// means the caller broke the one-commit-per-proposal discipline.
    pub fn commit(
        &mut self,
        id: ProposalId,
        root: MerkleRoot,
        rank: Rank,
    ) -> Result<(), RegistryError> {
        if self.batches.contains_key(&id) {
            return Err(RegistryError::DuplicateBatch(id));
        }
        self.batches.insert(id, WhitelistBatch { id, root, rank });
        tracing::info!(batch = %id, rank = %rank, "whitelist batch committed");
        Ok(())
    }

    /// Look up a committed batch.
    pub fn lookup(&self, id: ProposalId) -> Result<&WhitelistBatch, RegistryError> {
        self.batches.get(&id).ok_or(RegistryError::UnknownBatch(id))
    }

    pub fn contains(&self, id: ProposalId) -> bool {
        self.batches.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Persist all batches to a registry store.
    pub fn save_to_store(&self, store: &dyn RegistryStore) -> Result<(), RegistryError> {
        for (id, batch) in &self.batches {
            let bytes =
                bincode::serialize(batch).map_err(|e| RegistryError::Storage(e.to_string()))?;
            store
                .put_batch(*id, &bytes)
                .map_err(|e| RegistryError::Storage(e.to_string()))?;
        }
        Ok(())
    }

    /// Restore batches from a registry store.
    pub fn load_from_store(store: &dyn RegistryStore) -> Result<Self, RegistryError> {
        let entries = store
            .iter_batches()
            .map_err(|e| RegistryError::Storage(e.to_string()))?;
        let mut batches = HashMap::new();
        for (id, bytes) in entries {
            let batch: WhitelistBatch =
                bincode::deserialize(&bytes).map_err(|e| RegistryError::Storage(e.to_string()))?;
            batches.insert(id, batch);
        }
        Ok(Self { batches })
    }
}
