//! Abstract storage traits for the Weave registry.
//!
//! Every storage backend implements these traits; the engines depend only
//! on the traits and serialize their own records (bincode) before handing
//! them over. The in-memory backend ships here for tests and embedders
//! that do not need durability.

pub mod beacon;
pub mod error;
pub mod governance;
pub mod memory;
pub mod registry;

pub use beacon::BeaconStore;
pub use error::StoreError;
pub use governance::GovernanceStore;
pub use memory::MemoryStore;
pub use registry::RegistryStore;
