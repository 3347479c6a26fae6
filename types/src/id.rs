//! Proposal identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A monotonically increasing proposal id, assigned by the timelock engine.
///
/// Whitelist batches are keyed by the id of the proposal that created them,
/// so batch ids are unique by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProposalId(u64);

impl ProposalId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
