//! Fundamental types for the Weave membership registry.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: member addresses, hashes, proposal ids, membership ranks,
//! timestamps, key material, and governance parameters.

pub mod address;
pub mod hash;
pub mod id;
pub mod keys;
pub mod network;
pub mod params;
pub mod rank;
pub mod time;

pub use address::MemberAddress;
pub use hash::{KycHash, MerkleRoot};
pub use id::ProposalId;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use network::NetworkId;
pub use params::{GovernanceParams, ParamsError};
pub use rank::Rank;
pub use time::Timestamp;
