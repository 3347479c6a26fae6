//! In-memory storage backend.
//!
//! Backs the engine snapshot tests and embedders that keep all state in
//! process. Interior mutability via `Mutex` because the store traits take
//! `&self` (backends are shared between engines).

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::{BeaconStore, GovernanceStore, RegistryStore, StoreError};
use weave_types::{MemberAddress, ProposalId};

#[derive(Default)]
pub struct MemoryStore {
    proposals: Mutex<HashMap<u64, Vec<u8>>>,
    batches: Mutex<HashMap<u64, Vec<u8>>>,
    participants: Mutex<HashMap<MemberAddress, Vec<u8>>>,
    beacons: Mutex<HashMap<u64, Vec<u8>>>,
    meta: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
}

impl GovernanceStore for MemoryStore {
    fn put_proposal(&self, id: ProposalId, data: &[u8]) -> Result<(), StoreError> {
        lock(&self.proposals)?.insert(id.as_u64(), data.to_vec());
        Ok(())
    }

    fn get_proposal(&self, id: ProposalId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(lock(&self.proposals)?.get(&id.as_u64()).cloned())
    }

    fn iter_proposals(&self) -> Result<Vec<(ProposalId, Vec<u8>)>, StoreError> {
        Ok(lock(&self.proposals)?
            .iter()
            .map(|(id, data)| (ProposalId::new(*id), data.clone()))
            .collect())
    }

    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        lock(&self.meta)?.insert(format!("governance.{key}"), value.to_vec());
        Ok(())
    }

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(lock(&self.meta)?.get(&format!("governance.{key}")).cloned())
    }
}

impl RegistryStore for MemoryStore {
    fn put_batch(&self, id: ProposalId, data: &[u8]) -> Result<(), StoreError> {
        lock(&self.batches)?.insert(id.as_u64(), data.to_vec());
        Ok(())
    }

    fn get_batch(&self, id: ProposalId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(lock(&self.batches)?.get(&id.as_u64()).cloned())
    }

    fn iter_batches(&self) -> Result<Vec<(ProposalId, Vec<u8>)>, StoreError> {
        Ok(lock(&self.batches)?
            .iter()
            .map(|(id, data)| (ProposalId::new(*id), data.clone()))
            .collect())
    }

    fn put_participant(&self, address: &MemberAddress, data: &[u8]) -> Result<(), StoreError> {
        lock(&self.participants)?.insert(address.clone(), data.to_vec());
        Ok(())
    }

    fn iter_participants(&self) -> Result<Vec<(MemberAddress, Vec<u8>)>, StoreError> {
        Ok(lock(&self.participants)?
            .iter()
            .map(|(addr, data)| (addr.clone(), data.clone()))
            .collect())
    }
}

impl BeaconStore for MemoryStore {
    fn put_beacon(&self, id: u64, data: &[u8]) -> Result<(), StoreError> {
        lock(&self.beacons)?.insert(id, data.to_vec());
        Ok(())
    }

    fn get_beacon(&self, id: u64) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(lock(&self.beacons)?.get(&id).cloned())
    }

    fn iter_beacons(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError> {
        Ok(lock(&self.beacons)?
            .iter()
            .map(|(id, data)| (*id, data.clone()))
            .collect())
    }

    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        lock(&self.meta)?.insert(format!("beacon.{key}"), value.to_vec());
        Ok(())
    }

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(lock(&self.meta)?.get(&format!("beacon.{key}")).cloned())
    }
}
