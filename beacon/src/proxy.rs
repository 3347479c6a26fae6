//! Proxy instances bound to a beacon.
//!
//! A proxy holds no implementation pointer of its own — only the beacon id
//! and the opaque construction arguments the deployment collaborator
//! supplied (name, symbol, supply, parent whitelist, token references).
//! Resolution happens through the registry on every call, which is what
//! makes a beacon upgrade atomic across all instances.

use serde::{Deserialize, Serialize};

use crate::error::BeaconError;
use crate::registry::{BeaconId, BeaconRegistry, ImplementationId};

/// A deployed proxy instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proxy {
    pub beacon: BeaconId,
    /// Construction arguments, passed through uninterpreted.
    pub init_data: Vec<u8>,
}

impl Proxy {
    /// Deploy a proxy against an existing beacon.
    pub fn deploy(
        registry: &BeaconRegistry,
        beacon: BeaconId,
        init_data: Vec<u8>,
    ) -> Result<Self, BeaconError> {
        // Resolution must work from the first call, so the beacon has to
        // exist now.
        registry.resolve(beacon)?;
        Ok(Self { beacon, init_data })
    }

    /// The implementation this proxy runs right now.
    pub fn implementation(&self, registry: &BeaconRegistry) -> Result<ImplementationId, BeaconError> {
        registry.resolve(self.beacon).map(|(implementation, _)| implementation)
    }

    /// The implementation version this proxy runs right now.
    pub fn version(&self, registry: &BeaconRegistry) -> Result<u64, BeaconError> {
        registry.resolve(self.beacon).map(|(_, version)| version)
    }
}
