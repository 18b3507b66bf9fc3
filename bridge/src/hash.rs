//! Hashing for committee-signed bridge messages
//!
//! Committee signers sign `keccak256(BRIDGE_MESSAGE_PREFIX ‖ message_bytes)`
//! where `message_bytes` is the canonical serialization from
//! [`BridgeMessage::serialize_message`]. The prefix keeps bridge signatures
//! from being replayed as signatures over other protocols' payloads.

use common::BridgeMessage;
use tiny_keccak::{Hasher, Keccak};

/// Domain separation tag prepended to every signed message
pub const BRIDGE_MESSAGE_PREFIX: &[u8] = b"CL8Y_BRIDGE_MESSAGE";

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Prefixed signing bytes of a bridge message.
pub fn prefixed_message_bytes(message: &BridgeMessage) -> Vec<u8> {
    let body = message.serialize_message();
    let mut bytes = Vec::with_capacity(BRIDGE_MESSAGE_PREFIX.len() + body.len());
    bytes.extend_from_slice(BRIDGE_MESSAGE_PREFIX);
    bytes.extend_from_slice(&body);
    bytes
}

/// Digest the committee signs for `message`.
pub fn message_digest(message: &BridgeMessage) -> [u8; 32] {
    keccak256(&prefixed_message_bytes(message))
}
