//! Whitelist batches, participant ranks, and KYC admission.
//!
//! A batch is a Merkle root plus the rank it grants, committed by the
//! timelock engine when a participant proposal completes. Candidates then
//! admit themselves with a Merkle proof of batch membership and a signed
//! KYC attestation from the trusted authority. Batches are immutable and
//! never expire, so late admissions against old batches stay valid.

pub mod admission;
pub mod batch;
pub mod error;
pub mod participant;

pub use admission::{AdmissionConfig, AdmissionProcessor};
pub use batch::{BatchRegistry, WhitelistBatch};
pub use error::RegistryError;
pub use participant::ParticipantLedger;
