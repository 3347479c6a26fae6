//! Domain-separated KYC attestations.
//!
//! An attestation is the off-chain KYC authority's signed statement binding
//! a participant address to an opaque correlation token. The signed message
//! is domain-separated by a protocol tag, protocol name/version, and the
//! network context id, so an attestation produced for one network or
//! protocol revision never verifies under another.

use serde::{Deserialize, Serialize};
use weave_types::{KycHash, MemberAddress, NetworkId, PrivateKey, PublicKey, Signature};

/// Protocol name bound into every attestation.
pub const PROTOCOL_NAME: &str = "Weave Protocol";

/// Attestation format revision.
pub const PROTOCOL_VERSION: &str = "1";

/// Leading tag separating KYC attestations from any other signed payload.
const DOMAIN_TAG: &[u8] = b"WEAVE_KYC_ATTESTATION";

/// The signing context an attestation is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationDomain {
    pub network: NetworkId,
}

impl AttestationDomain {
    pub fn new(network: NetworkId) -> Self {
        Self { network }
    }

    /// Canonical 32-byte message an authority signs for `{participant,
    /// kyc_hash}` in this domain. Field order is part of the wire format.
    pub fn signing_message(&self, participant: &MemberAddress, kyc_hash: &KycHash) -> [u8; 32] {
        crate::blake2b_256_multi(&[
            DOMAIN_TAG,
            PROTOCOL_NAME.as_bytes(),
            PROTOCOL_VERSION.as_bytes(),
            &self.network.context_id().to_be_bytes(),
            participant.as_str().as_bytes(),
            kyc_hash.as_bytes(),
        ])
    }
}

/// A signed KYC decision: single-use evidence, never persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Attestation {
    pub participant: MemberAddress,
    pub kyc_hash: KycHash,
    pub signature: Signature,
}

/// Produce an attestation for a participant (authority side; also used
/// throughout the tests).
pub fn sign_attestation(
    domain: &AttestationDomain,
    participant: MemberAddress,
    kyc_hash: KycHash,
    authority: &PrivateKey,
) -> Attestation {
    let message = domain.signing_message(&participant, &kyc_hash);
    let signature = crate::sign_message(&message, authority);
    Attestation {
        participant,
        kyc_hash,
        signature,
    }
}

/// Verify an attestation against the configured trusted authority.
///
/// Returns `true` iff the signature over the canonical domain-separated
/// message checks out under `trusted_authority`. A wrong signer or a
/// malformed key is a normal `false`, not an error.
pub fn verify_attestation(
    attestation: &Attestation,
    domain: &AttestationDomain,
    trusted_authority: &PublicKey,
) -> bool {
    let message = domain.signing_message(&attestation.participant, &attestation.kyc_hash);
    crate::verify_signature(&message, &attestation.signature, trusted_authority)
}
