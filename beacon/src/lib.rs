//! Beacon upgrade registry for the Weave token instances.
//!
//! Many deployed proxy instances hold nothing but a beacon reference and
//! resolve their implementation through the registry on every call. One
//! authorized write swaps the implementation and bumps the version for all
//! of them atomically — there is no window where two proxies disagree.

pub mod error;
pub mod proxy;
pub mod registry;

pub use error::BeaconError;
pub use proxy::Proxy;
pub use registry::{Beacon, BeaconId, BeaconRegistry, ImplementationId};
