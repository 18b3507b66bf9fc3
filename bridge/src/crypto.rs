//! secp256k1 key handling for committee signatures
//!
//! Committee members are keyed by their 33-byte compressed public key.
//! Signature recovery is delegated to the host through
//! [`Api::secp256k1_recover_pubkey`]; key (de)compression and Ethereum-style
//! address derivation use `libsecp256k1`.

use cosmwasm_std::Api;
use libsecp256k1::{PublicKey, PublicKeyFormat};

use crate::error::ContractError;
use crate::hash::keccak256;

/// Length of a compressed secp256k1 public key
pub const COMPRESSED_PUBKEY_LENGTH: usize = 33;

/// Length of a recoverable ECDSA signature (`r ‖ s ‖ v`)
pub const RECOVERABLE_SIGNATURE_LENGTH: usize = 65;

/// Recover the compressed public key that signed `digest`.
///
/// `v` may be given as `{0, 1}` or in the Ethereum `{27, 28}` form.
pub fn recover_pubkey(
    api: &dyn Api,
    digest: &[u8; 32],
    signature: &[u8],
) -> Result<[u8; COMPRESSED_PUBKEY_LENGTH], ContractError> {
    if signature.len() != RECOVERABLE_SIGNATURE_LENGTH {
        return Err(ContractError::InvalidSignature);
    }

    let recovery_param = match signature[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        _ => return Err(ContractError::InvalidSignature),
    };

    let uncompressed = api
        .secp256k1_recover_pubkey(digest, &signature[..64], recovery_param)
        .map_err(|_| ContractError::InvalidSignature)?;

    PublicKey::parse_slice(&uncompressed, Some(PublicKeyFormat::Full))
        .map(|key| key.serialize_compressed())
        .map_err(|_| ContractError::InvalidSignature)
}

/// Check that `bytes` is a compressed public key on the curve.
pub fn validate_pubkey(bytes: &[u8]) -> Result<(), ContractError> {
    if bytes.len() != COMPRESSED_PUBKEY_LENGTH {
        return Err(ContractError::InvalidPubkeyLength { got: bytes.len() });
    }
    PublicKey::parse_slice(bytes, Some(PublicKeyFormat::Compressed))
        .map(|_| ())
        .map_err(|_| ContractError::InvalidPubkey)
}

/// Ethereum address of a compressed public key: the last 20 bytes of the
/// keccak256 of the 64-byte uncompressed point.
pub fn eth_address(compressed_pubkey: &[u8]) -> Result<[u8; 20], ContractError> {
    let key = PublicKey::parse_slice(compressed_pubkey, Some(PublicKeyFormat::Compressed))
        .map_err(|_| ContractError::InvalidPubkey)?;
    let uncompressed = key.serialize();
    let hash = keccak256(&uncompressed[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Ok(address)
}

#[cfg(test)]
pub(crate) mod test_keys {
    use common::BridgeMessage;
    use cosmwasm_std::Binary;
    use libsecp256k1::{Message, PublicKey, SecretKey};

    use crate::hash::message_digest;

    /// Deterministic test key; `seed` must be non-zero.
    pub fn secret_key(seed: u8) -> SecretKey {
        SecretKey::parse(&[seed; 32]).unwrap()
    }

    pub fn compressed_pubkey(seed: u8) -> [u8; 33] {
        PublicKey::from_secret_key(&secret_key(seed)).serialize_compressed()
    }

    /// Sign a bridge message the way a committee member does.
    pub fn sign(seed: u8, message: &BridgeMessage) -> Binary {
        let digest = message_digest(message);
        let (signature, recovery_id) =
            libsecp256k1::sign(&Message::parse(&digest), &secret_key(seed));
        let mut bytes = signature.serialize().to_vec();
        bytes.push(recovery_id.serialize());
        Binary::from(bytes)
    }
}
