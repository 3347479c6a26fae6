//! KYC admission processing.
//!
//! Converts an off-chain KYC decision into an on-chain rank change. Every
//! call re-verifies the full chain of evidence: batch existence, Merkle
//! membership, and the authority's attestation. Nothing is cached between
//! calls, so re-admission is just a re-proof.

use crate::batch::BatchRegistry;
use crate::error::RegistryError;
use crate::participant::ParticipantLedger;
use weave_crypto::attestation::{verify_attestation, Attestation, AttestationDomain};
use weave_crypto::merkle::{hash_leaf, verify_proof};
use weave_store::RegistryStore;
use weave_types::{KycHash, MemberAddress, ProposalId, PublicKey, Rank, Signature};

/// Static admission configuration, validated up front.
#[derive(Clone, Debug)]
pub struct AdmissionConfig {
    /// The KYC authority whose attestations are accepted.
    pub trusted_authority: PublicKey,
    /// Domain the attestations must be bound to.
    pub domain: AttestationDomain,
}

/// The admission processor: sole writer of the participant ledger.
pub struct AdmissionProcessor {
    config: AdmissionConfig,
    participants: ParticipantLedger,
}

impl AdmissionProcessor {
    /// Build a processor. An unset (all-zero) authority key is a
    /// configuration error, rejected here rather than at admit time.
    pub fn new(config: AdmissionConfig) -> Result<Self, RegistryError> {
        if config.trusted_authority.is_zero() {
            return Err(RegistryError::InvalidConfig(
                "trusted authority key is unset".to_string(),
            ));
        }
        Ok(Self {
            config,
            participants: ParticipantLedger::new(),
        })
    }

    /// Restore a processor around a previously persisted ledger.
    pub fn with_ledger(
        config: AdmissionConfig,
        participants: ParticipantLedger,
    ) -> Result<Self, RegistryError> {
        let mut processor = Self::new(config)?;
        processor.participants = participants;
        Ok(processor)
    }

    /// Seed the deployment's genesis members at a fixed rank, before any
    /// governance has run. Not gated on proofs: genesis is part of the
    /// construction arguments, not of admission.
    pub fn seed_genesis(&mut self, members: &[MemberAddress], rank: Rank) {
        for member in members {
            self.participants.set_rank(member.clone(), rank);
        }
        tracing::info!(count = members.len(), rank = %rank, "genesis members seeded");
    }

    /// Admit a candidate into a committed batch.
    ///
    /// Checks, in order, each gating the next:
    /// 1. the batch must exist;
    /// 2. the candidate's hashed leaf plus `proof` must reconstruct the
    ///    batch root;
    /// 3. `signature` must be the trusted authority's attestation over
    ///    `{participant, kyc_hash}` in the configured domain.
    ///
    /// On success the candidate's rank is set to the batch rank (last
    /// writer wins) and returned. No state is touched on failure.
    pub fn admit(
        &mut self,
        batches: &BatchRegistry,
        batch_id: ProposalId,
        participant: &MemberAddress,
        kyc_hash: KycHash,
        proof: &[[u8; 32]],
        signature: Signature,
    ) -> Result<Rank, RegistryError> {
        let batch = batches.lookup(batch_id)?;

        if !verify_proof(&batch.root, hash_leaf(participant), proof) {
            return Err(RegistryError::ProofMismatch);
        }

        let attestation = Attestation {
            participant: participant.clone(),
            kyc_hash,
            signature,
        };
        if !verify_attestation(
            &attestation,
            &self.config.domain,
            &self.config.trusted_authority,
        ) {
            return Err(RegistryError::InvalidSignature);
        }

        self.participants.set_rank(participant.clone(), batch.rank);
        tracing::info!(
            participant = %participant,
            batch = %batch_id,
            rank = %batch.rank,
            "participant admitted"
        );
        Ok(batch.rank)
    }

    /// The rank of an address; `Rank::NONE` if never admitted.
    pub fn rank_of(&self, address: &MemberAddress) -> Rank {
        self.participants.rank_of(address)
    }

    /// Read-only view of the participant ledger.
    pub fn participants(&self) -> &ParticipantLedger {
        &self.participants
    }

    /// Persist the participant ledger.
    pub fn save_to_store(&self, store: &dyn RegistryStore) -> Result<(), RegistryError> {
        self.participants.save_to_store(store)
    }
}
