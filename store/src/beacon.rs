//! Beacon registry storage trait.

use crate::StoreError;

/// Trait for storing beacon records.
///
/// Beacon ids are plain integers here; the beacon crate owns the typed
/// wrapper.
pub trait BeaconStore {
    /// Store a beacon record.
    fn put_beacon(&self, id: u64, data: &[u8]) -> Result<(), StoreError>;

    /// Get a beacon record by id.
    fn get_beacon(&self, id: u64) -> Result<Option<Vec<u8>>, StoreError>;

    /// All stored beacon records.
    fn iter_beacons(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError>;

    /// Store a registry bookkeeping value (next id).
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Retrieve a registry bookkeeping value.
    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
}
