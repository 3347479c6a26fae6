//! Member address type with `weav_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Weave member address, always prefixed with `weav_`.
///
/// Derived from the member's public key via Blake2b hashing + hex encoding.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberAddress(String);

impl MemberAddress {
    /// The standard prefix for all Weave member addresses.
    pub const PREFIX: &'static str = "weav_";

    /// Create a new member address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `weav_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with weav_");
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The bytes hashed into a whitelist Merkle leaf for this address.
    pub fn leaf_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for MemberAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MemberAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
