//! Network identifier.

use serde::{Deserialize, Serialize};

/// Identifies which Weave network a registry instance belongs to.
///
/// The network id is folded into attestation domain separation, so an
/// attestation signed for the test network never verifies on the live one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkId {
    /// The production network.
    Live,
    /// The public test network.
    Test,
    /// Local development network.
    Dev,
}

impl NetworkId {
    /// Numeric context id used in signed-message domain separation.
    pub fn context_id(&self) -> u64 {
        match self {
            Self::Live => 1,
            Self::Test => 2,
            Self::Dev => 3,
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Test => "test",
            Self::Dev => "dev",
        }
    }
}
