//! Member address derivation from public keys.
//!
//! Address format: `weav_` + hex(Blake2b-256(public_key)[12..32]).
//! The trailing 20 bytes of the key hash keep addresses short while the
//! full-width hash binds them to the key; hex keeps them trivially
//! parseable.

use weave_types::{MemberAddress, PublicKey};

/// Prefix for all Weave addresses.
const PREFIX: &str = "weav_";
/// Number of key-hash bytes kept in the address.
const ADDR_BYTES: usize = 20;
/// Hex characters after the prefix.
const ENCODED_LEN: usize = ADDR_BYTES * 2;

/// Derive a `weav_`-prefixed member address from a public key.
pub fn derive_address(public_key: &PublicKey) -> MemberAddress {
    let digest = crate::blake2b_256(public_key.as_bytes());
    let tail = &digest[32 - ADDR_BYTES..];
    MemberAddress::new(format!("{}{}", PREFIX, hex::encode(tail)))
}

/// Extract the 20 address bytes from a valid Weave address string.
///
/// Returns `None` if the address is malformed.
pub fn decode_address(address: &str) -> Option<[u8; ADDR_BYTES]> {
    let encoded = address.strip_prefix(PREFIX)?;
    if encoded.len() != ENCODED_LEN {
        return None;
    }
    let bytes = hex::decode(encoded).ok()?;
    bytes.try_into().ok()
}

/// Validate that an address string is well-formed.
pub fn validate_address(address: &str) -> bool {
    decode_address(address).is_some()
}
