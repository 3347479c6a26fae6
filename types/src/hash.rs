//! Fixed-size hash types for whitelist roots and KYC correlation tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte Merkle root committing to a batch of candidate addresses.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MerkleRoot([u8; 32]);

impl MerkleRoot {
    pub const ZERO: Self = Self([0u8; 32]);

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

impl fmt::Debug for MerkleRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MerkleRoot({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for MerkleRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

/// A 32-byte opaque KYC correlation token.
///
/// Produced off-chain by the KYC authority; it identifies a verification
/// record without carrying any secret material.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KycHash([u8; 32]);

impl KycHash {
    pub const ZERO: Self = Self([0u8; 32]);

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

impl fmt::Debug for KycHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KycHash({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for KycHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

// Inline hex encoding to avoid adding the `hex` crate as a dependency of types.
mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_root_detected() {
        assert!(MerkleRoot::ZERO.is_zero());
        assert!(!MerkleRoot::new([1u8; 32]).is_zero());
    }

    #[test]
    fn display_is_full_hex() {
        let root = MerkleRoot::new([0xAB; 32]);
        assert_eq!(root.to_string(), "ab".repeat(32));
    }

    #[test]
    fn kyc_hash_roundtrip() {
        let bytes = [7u8; 32];
        let h = KycHash::new(bytes);
        assert_eq!(h.as_bytes(), &bytes);
    }
}
