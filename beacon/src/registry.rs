//! The beacon registry: implementation pointer + monotonic version.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::BeaconError;
use weave_store::BeaconStore;
use weave_types::MemberAddress;

const META_NEXT_ID: &str = "next_beacon_id";

/// Identifies a deployed beacon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeaconId(u64);

impl BeaconId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BeaconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque 32-byte identifier of a compiled implementation, supplied by the
/// artifact collaborator. The zero id is reserved as "unset".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImplementationId([u8; 32]);

impl ImplementationId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for ImplementationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImplementationId({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for ImplementationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// One beacon record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beacon {
    pub implementation: ImplementationId,
    /// Strictly increasing: every upgrade bumps it by one.
    pub version: u64,
    /// The only identity allowed to upgrade this beacon.
    pub upgrader: MemberAddress,
}

/// Registry of deployed beacons.
#[derive(Debug, Default)]
pub struct BeaconRegistry {
    next_beacon_id: u64,
    beacons: HashMap<BeaconId, Beacon>,
}

impl BeaconRegistry {
    pub fn new() -> Self {
        Self {
            next_beacon_id: 1,
            beacons: HashMap::new(),
        }
    }

    /// Deploy a beacon fixed at an initial implementation and version.
    pub fn deploy(
        &mut self,
        implementation: ImplementationId,
        initial_version: u64,
        upgrader: MemberAddress,
    ) -> Result<BeaconId, BeaconError> {
        if implementation.is_zero() {
            return Err(BeaconError::InvalidImplementation);
        }
        let id = BeaconId::new(self.next_beacon_id);
        self.next_beacon_id += 1;
        self.beacons.insert(
            id,
            Beacon {
                implementation,
                version: initial_version,
                upgrader,
            },
        );
        tracing::info!(beacon = %id, version = initial_version, "beacon deployed");
        Ok(id)
    }

    /// Swap the implementation and bump the version. Every proxy resolving
    /// through this beacon observes the new implementation on its next
    /// call.
    pub fn upgrade(
        &mut self,
        id: BeaconId,
        new_implementation: ImplementationId,
        caller: &MemberAddress,
    ) -> Result<u64, BeaconError> {
        if new_implementation.is_zero() {
            return Err(BeaconError::InvalidImplementation);
        }
        let beacon = self
            .beacons
            .get_mut(&id)
            .ok_or(BeaconError::UnknownBeacon(id.as_u64()))?;
        if beacon.upgrader != *caller {
            return Err(BeaconError::Unauthorized {
                beacon: id.as_u64(),
                caller: caller.to_string(),
            });
        }

        beacon.implementation = new_implementation;
        beacon.version += 1;
        tracing::info!(
            beacon = %id,
            version = beacon.version,
            implementation = %new_implementation,
            "beacon upgraded"
        );
        Ok(beacon.version)
    }

    /// Resolve the current implementation and version of a beacon.
    pub fn resolve(&self, id: BeaconId) -> Result<(ImplementationId, u64), BeaconError> {
        let beacon = self
            .beacons
            .get(&id)
            .ok_or(BeaconError::UnknownBeacon(id.as_u64()))?;
        Ok((beacon.implementation, beacon.version))
    }

    pub fn get(&self, id: BeaconId) -> Option<&Beacon> {
        self.beacons.get(&id)
    }

    pub fn len(&self) -> usize {
        self.beacons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beacons.is_empty()
    }

    /// Persist all beacons.
    pub fn save_to_store(&self, store: &dyn BeaconStore) -> Result<(), BeaconError> {
        store
            .put_meta(META_NEXT_ID, &self.next_beacon_id.to_be_bytes())
            .map_err(|e| BeaconError::Storage(e.to_string()))?;
        for (id, beacon) in &self.beacons {
            let bytes =
                bincode::serialize(beacon).map_err(|e| BeaconError::Storage(e.to_string()))?;
            store
                .put_beacon(id.as_u64(), &bytes)
                .map_err(|e| BeaconError::Storage(e.to_string()))?;
        }
        Ok(())
    }

    /// Restore beacons from a store.
    pub fn load_from_store(store: &dyn BeaconStore) -> Result<Self, BeaconError> {
        let next_beacon_id = match store
            .get_meta(META_NEXT_ID)
            .map_err(|e| BeaconError::Storage(e.to_string()))?
        {
            Some(bytes) if bytes.len() >= 8 => {
                u64::from_be_bytes(bytes[..8].try_into().expect("length checked"))
            }
            _ => 1,
        };

        let entries = store
            .iter_beacons()
            .map_err(|e| BeaconError::Storage(e.to_string()))?;
        let mut beacons = HashMap::new();
        for (id, bytes) in entries {
            let beacon: Beacon =
                bincode::deserialize(&bytes).map_err(|e| BeaconError::Storage(e.to_string()))?;
            beacons.insert(BeaconId::new(id), beacon);
        }
        Ok(Self {
            next_beacon_id,
            beacons,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weave_store::MemoryStore;

    fn addr(n: u8) -> MemberAddress {
        MemberAddress::new(format!("weav_{:040x}", n))
    }

    fn implementation(n: u8) -> ImplementationId {
        ImplementationId::new([n; 32])
    }

    #[test]
    fn deploy_and_resolve() {
        let mut registry = BeaconRegistry::new();
        let id = registry.deploy(implementation(2), 2, addr(1)).unwrap();
        assert_eq!(registry.resolve(id).unwrap(), (implementation(2), 2));
    }

    #[test]
    fn zero_implementation_rejected_at_deploy() {
        let mut registry = BeaconRegistry::new();
        let result = registry.deploy(ImplementationId::new([0u8; 32]), 1, addr(1));
        assert!(matches!(result, Err(BeaconError::InvalidImplementation)));
        assert!(registry.is_empty());
    }

    #[test]
    fn upgrade_swaps_implementation_and_bumps_version() {
        let mut registry = BeaconRegistry::new();
        let upgrader = addr(1);
        let id = registry.deploy(implementation(2), 1, upgrader.clone()).unwrap();

        let version = registry.upgrade(id, implementation(3), &upgrader).unwrap();
        assert_eq!(version, 2);
        assert_eq!(registry.resolve(id).unwrap(), (implementation(3), 2));

        let version = registry.upgrade(id, implementation(4), &upgrader).unwrap();
        assert_eq!(version, 3);
    }

    #[test]
    fn upgrade_by_stranger_unauthorized() {
        let mut registry = BeaconRegistry::new();
        let id = registry.deploy(implementation(2), 1, addr(1)).unwrap();

        let result = registry.upgrade(id, implementation(3), &addr(9));
        assert!(matches!(result, Err(BeaconError::Unauthorized { .. })));
        // The beacon is untouched.
        assert_eq!(registry.resolve(id).unwrap(), (implementation(2), 1));
    }

    #[test]
    fn upgrade_to_zero_rejected() {
        let mut registry = BeaconRegistry::new();
        let upgrader = addr(1);
        let id = registry.deploy(implementation(2), 1, upgrader.clone()).unwrap();

        let result = registry.upgrade(id, ImplementationId::new([0u8; 32]), &upgrader);
        assert!(matches!(result, Err(BeaconError::InvalidImplementation)));
        assert_eq!(registry.resolve(id).unwrap(), (implementation(2), 1));
    }

    #[test]
    fn unknown_beacon_fails() {
        let registry = BeaconRegistry::new();
        assert!(matches!(
            registry.resolve(BeaconId::new(9)),
            Err(BeaconError::UnknownBeacon(9))
        ));
    }

    #[test]
    fn store_roundtrip() {
        let mut registry = BeaconRegistry::new();
        let upgrader = addr(1);
        let id = registry.deploy(implementation(2), 1, upgrader.clone()).unwrap();
        registry.upgrade(id, implementation(3), &upgrader).unwrap();

        let store = MemoryStore::new();
        registry.save_to_store(&store).unwrap();

        let mut restored = BeaconRegistry::load_from_store(&store).unwrap();
        assert_eq!(restored.resolve(id).unwrap(), (implementation(3), 2));

        // Ids keep counting past the restored state.
        let next = restored.deploy(implementation(5), 1, upgrader).unwrap();
        assert!(next.as_u64() > id.as_u64());
    }
}
