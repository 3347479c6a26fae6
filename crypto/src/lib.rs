//! Cryptographic primitives for the Weave membership registry.
//!
//! - **Ed25519** for attestation signing and verification
//! - **Blake2b** for hashing (Merkle leaves, domain-separated messages)
//! - **Sorted-pair Merkle trees** for batch whitelisting
//! - Address derivation with `weav_` prefix and hex encoding

pub mod address;
pub mod attestation;
pub mod hash;
pub mod keys;
pub mod merkle;
pub mod sign;

pub use address::{decode_address, derive_address, validate_address};
pub use attestation::{
    sign_attestation, verify_attestation, Attestation, AttestationDomain, PROTOCOL_NAME,
    PROTOCOL_VERSION,
};
pub use hash::{blake2b_256, blake2b_256_multi};
pub use keys::{generate_keypair, keypair_from_seed, public_from_private};
pub use merkle::{hash_leaf, verify_proof, MerkleProof, MerkleTree};
pub use sign::{sign_message, verify_signature};
