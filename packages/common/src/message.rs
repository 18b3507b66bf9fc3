//! Bridge message envelope and payload codec
//!
//! Committee members sign the canonical byte form of a [`BridgeMessage`]:
//!
//! | Field          | Size     |
//! |----------------|----------|
//! | message_type   | 1        |
//! | message_version| 1        |
//! | seq_num        | 8 (BE)   |
//! | source_chain   | 1        |
//! | payload        | variable |
//!
//! Payload layouts are type specific and documented on each payload struct.
//! Decoding is strict: truncated input and trailing bytes are both errors.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Binary;
use thiserror::Error;

/// Current version for every message type
pub const MESSAGE_VERSION: u8 = 1;

/// Length of an EVM address
pub const EVM_ADDRESS_LENGTH: usize = 20;

/// Blocklist payload type byte for adding members to the blocklist
pub const BLOCKLIST_TYPE_BLOCK: u8 = 0;

/// Blocklist payload type byte for removing members from the blocklist
pub const BLOCKLIST_TYPE_UNBLOCK: u8 = 1;

/// Emergency op payload byte that freezes the bridge
pub const EMERGENCY_OP_PAUSE: u8 = 0;

/// Emergency op payload byte that unfreezes the bridge
pub const EMERGENCY_OP_UNPAUSE: u8 = 1;

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug, PartialEq)]
pub enum MessageError {
    #[error("Message payload truncated: needed {needed} more bytes")]
    Truncated { needed: usize },

    #[error("Message payload has {remaining} trailing bytes")]
    TrailingBytes { remaining: usize },

    #[error("Unknown message type: {message_type}")]
    UnknownMessageType { message_type: u8 },

    #[error("Unexpected message type: expected {expected}, got {got}")]
    WrongMessageType { expected: u8, got: u8 },

    #[error("Invalid blocklist type: {blocklist_type}")]
    InvalidBlocklistType { blocklist_type: u8 },

    #[error("Invalid emergency op type: {op_type}")]
    InvalidEmergencyOpType { op_type: u8 },

    #[error("Field too long for length prefix: {len} bytes")]
    FieldTooLong { len: usize },
}

// ============================================================================
// Message Types
// ============================================================================

/// Kinds of bridge messages the committee signs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum MessageType {
    TokenTransfer = 0,
    CommitteeBlocklist = 1,
    EmergencyOp = 2,
    UpdateBridgeLimit = 3,
    UpdateAssetPrice = 4,
}

impl MessageType {
    pub const ALL: [MessageType; 5] = [
        MessageType::TokenTransfer,
        MessageType::CommitteeBlocklist,
        MessageType::EmergencyOp,
        MessageType::UpdateBridgeLimit,
        MessageType::UpdateAssetPrice,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::TokenTransfer => "token_transfer",
            MessageType::CommitteeBlocklist => "committee_blocklist",
            MessageType::EmergencyOp => "emergency_op",
            MessageType::UpdateBridgeLimit => "update_bridge_limit",
            MessageType::UpdateAssetPrice => "update_asset_price",
        }
    }
}

impl TryFrom<u8> for MessageType {
    type Error = MessageError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MessageType::TokenTransfer),
            1 => Ok(MessageType::CommitteeBlocklist),
            2 => Ok(MessageType::EmergencyOp),
            3 => Ok(MessageType::UpdateBridgeLimit),
            4 => Ok(MessageType::UpdateAssetPrice),
            message_type => Err(MessageError::UnknownMessageType { message_type }),
        }
    }
}

// ============================================================================
// Envelope
// ============================================================================

/// A bridge message as signed by the committee.
#[cw_serde]
pub struct BridgeMessage {
    pub message_type: u8,
    pub message_version: u8,
    /// Per-type sequence number assigned by the source chain
    pub seq_num: u64,
    pub source_chain: u8,
    /// Type-specific payload bytes
    pub payload: Binary,
}

/// Unique identity of a bridge message.
#[cw_serde]
#[derive(Copy, Eq, Hash, PartialOrd, Ord)]
pub struct BridgeMessageKey {
    pub source_chain: u8,
    pub message_type: u8,
    pub seq_num: u64,
}

impl BridgeMessageKey {
    /// Storage key for record maps.
    pub fn key(&self) -> (u8, u8, u64) {
        (self.source_chain, self.message_type, self.seq_num)
    }
}

impl BridgeMessage {
    /// Canonical byte form (without domain prefix).
    pub fn serialize_message(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(11 + self.payload.len());
        bytes.push(self.message_type);
        bytes.push(self.message_version);
        bytes.extend_from_slice(&self.seq_num.to_be_bytes());
        bytes.push(self.source_chain);
        bytes.extend_from_slice(self.payload.as_slice());
        bytes
    }

    pub fn key(&self) -> BridgeMessageKey {
        BridgeMessageKey {
            source_chain: self.source_chain,
            message_type: self.message_type,
            seq_num: self.seq_num,
        }
    }

    fn expect_type(&self, expected: MessageType) -> Result<(), MessageError> {
        if self.message_type != expected.as_u8() {
            return Err(MessageError::WrongMessageType {
                expected: expected.as_u8(),
                got: self.message_type,
            });
        }
        Ok(())
    }

    /// Decode the payload of a token transfer message.
    pub fn extract_token_bridge_payload(&self) -> Result<TokenTransferPayload, MessageError> {
        self.expect_type(MessageType::TokenTransfer)?;
        let mut reader = PayloadReader::new(self.payload.as_slice());
        let sender_len = reader.read_u8()? as usize;
        let sender_address = reader.read_bytes(sender_len)?.to_vec();
        let target_chain = reader.read_u8()?;
        let target_len = reader.read_u8()? as usize;
        let target_address = reader.read_bytes(target_len)?.to_vec();
        let token_type = reader.read_u8()?;
        let amount = reader.read_u64()?;
        reader.finish()?;

        Ok(TokenTransferPayload {
            sender_address,
            target_chain,
            target_address,
            token_type,
            amount,
        })
    }

    /// Decode the payload of a committee blocklist message.
    pub fn extract_blocklist_payload(&self) -> Result<BlocklistPayload, MessageError> {
        self.expect_type(MessageType::CommitteeBlocklist)?;
        let mut reader = PayloadReader::new(self.payload.as_slice());
        let blocklist_type = reader.read_u8()?;
        if blocklist_type != BLOCKLIST_TYPE_BLOCK && blocklist_type != BLOCKLIST_TYPE_UNBLOCK {
            return Err(MessageError::InvalidBlocklistType { blocklist_type });
        }
        let count = reader.read_u8()? as usize;
        let mut validator_eth_addresses = Vec::with_capacity(count);
        for _ in 0..count {
            let mut address = [0u8; EVM_ADDRESS_LENGTH];
            address.copy_from_slice(reader.read_bytes(EVM_ADDRESS_LENGTH)?);
            validator_eth_addresses.push(address);
        }
        reader.finish()?;

        Ok(BlocklistPayload {
            blocklist_type,
            validator_eth_addresses,
        })
    }

    /// Decode the payload of an emergency op message.
    pub fn extract_emergency_op_payload(&self) -> Result<EmergencyOpPayload, MessageError> {
        self.expect_type(MessageType::EmergencyOp)?;
        let mut reader = PayloadReader::new(self.payload.as_slice());
        let op_type = reader.read_u8()?;
        if op_type != EMERGENCY_OP_PAUSE && op_type != EMERGENCY_OP_UNPAUSE {
            return Err(MessageError::InvalidEmergencyOpType { op_type });
        }
        reader.finish()?;

        Ok(EmergencyOpPayload { op_type })
    }

    /// Decode the payload of a bridge limit update message.
    pub fn extract_update_bridge_limit(&self) -> Result<UpdateBridgeLimitPayload, MessageError> {
        self.expect_type(MessageType::UpdateBridgeLimit)?;
        let mut reader = PayloadReader::new(self.payload.as_slice());
        let sending_chain = reader.read_u8()?;
        let limit = reader.read_u64()?;
        reader.finish()?;

        Ok(UpdateBridgeLimitPayload {
            receiving_chain: self.source_chain,
            sending_chain,
            limit,
        })
    }

    /// Decode the payload of an asset price update message.
    pub fn extract_update_asset_price(&self) -> Result<UpdateAssetPricePayload, MessageError> {
        self.expect_type(MessageType::UpdateAssetPrice)?;
        let mut reader = PayloadReader::new(self.payload.as_slice());
        let token_id = reader.read_u8()?;
        let new_price = reader.read_u64()?;
        reader.finish()?;

        Ok(UpdateAssetPricePayload {
            token_id,
            new_price,
        })
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// `sender_len ‖ sender ‖ target_chain ‖ target_len ‖ target ‖ token_type ‖ amount`
#[cw_serde]
pub struct TokenTransferPayload {
    pub sender_address: Vec<u8>,
    pub target_chain: u8,
    pub target_address: Vec<u8>,
    pub token_type: u8,
    pub amount: u64,
}

/// `blocklist_type ‖ count ‖ count × 20-byte EVM address`
#[cw_serde]
pub struct BlocklistPayload {
    pub blocklist_type: u8,
    pub validator_eth_addresses: Vec<[u8; 20]>,
}

impl BlocklistPayload {
    pub fn is_unblock(&self) -> bool {
        self.blocklist_type == BLOCKLIST_TYPE_UNBLOCK
    }
}

/// `op_type`
#[cw_serde]
pub struct EmergencyOpPayload {
    pub op_type: u8,
}

impl EmergencyOpPayload {
    pub fn is_pause(&self) -> bool {
        self.op_type == EMERGENCY_OP_PAUSE
    }
}

/// `sending_chain ‖ limit`; the receiving chain is the envelope's source chain.
#[cw_serde]
pub struct UpdateBridgeLimitPayload {
    pub receiving_chain: u8,
    pub sending_chain: u8,
    pub limit: u64,
}

/// `token_id ‖ new_price`
#[cw_serde]
pub struct UpdateAssetPricePayload {
    pub token_id: u8,
    pub new_price: u64,
}

// ============================================================================
// Builders
// ============================================================================

fn push_length_prefixed(bytes: &mut Vec<u8>, field: &[u8]) -> Result<(), MessageError> {
    let len =
        u8::try_from(field.len()).map_err(|_| MessageError::FieldTooLong { len: field.len() })?;
    bytes.push(len);
    bytes.extend_from_slice(field);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn create_token_bridge_message(
    source_chain: u8,
    seq_num: u64,
    sender_address: &[u8],
    target_chain: u8,
    target_address: &[u8],
    token_type: u8,
    amount: u64,
) -> Result<BridgeMessage, MessageError> {
    let mut payload = Vec::new();
    push_length_prefixed(&mut payload, sender_address)?;
    payload.push(target_chain);
    push_length_prefixed(&mut payload, target_address)?;
    payload.push(token_type);
    payload.extend_from_slice(&amount.to_be_bytes());

    Ok(BridgeMessage {
        message_type: MessageType::TokenTransfer.as_u8(),
        message_version: MESSAGE_VERSION,
        seq_num,
        source_chain,
        payload: Binary::from(payload),
    })
}

pub fn create_blocklist_message(
    source_chain: u8,
    seq_num: u64,
    blocklist_type: u8,
    validator_eth_addresses: &[[u8; 20]],
) -> Result<BridgeMessage, MessageError> {
    let count = u8::try_from(validator_eth_addresses.len()).map_err(|_| {
        MessageError::FieldTooLong {
            len: validator_eth_addresses.len(),
        }
    })?;
    let mut payload = Vec::with_capacity(2 + validator_eth_addresses.len() * EVM_ADDRESS_LENGTH);
    payload.push(blocklist_type);
    payload.push(count);
    for address in validator_eth_addresses {
        payload.extend_from_slice(address);
    }

    Ok(BridgeMessage {
        message_type: MessageType::CommitteeBlocklist.as_u8(),
        message_version: MESSAGE_VERSION,
        seq_num,
        source_chain,
        payload: Binary::from(payload),
    })
}

pub fn create_update_bridge_limit_message(
    receiving_chain: u8,
    seq_num: u64,
    sending_chain: u8,
    new_limit: u64,
) -> BridgeMessage {
    let mut payload = Vec::with_capacity(9);
    payload.push(sending_chain);
    payload.extend_from_slice(&new_limit.to_be_bytes());

    BridgeMessage {
        message_type: MessageType::UpdateBridgeLimit.as_u8(),
        message_version: MESSAGE_VERSION,
        seq_num,
        source_chain: receiving_chain,
        payload: Binary::from(payload),
    }
}

pub fn create_emergency_op_message(source_chain: u8, seq_num: u64, op_type: u8) -> BridgeMessage {
    BridgeMessage {
        message_type: MessageType::EmergencyOp.as_u8(),
        message_version: MESSAGE_VERSION,
        seq_num,
        source_chain,
        payload: Binary::from(vec![op_type]),
    }
}

pub fn create_update_asset_price_message(
    token_id: u8,
    source_chain: u8,
    seq_num: u64,
    new_price: u64,
) -> BridgeMessage {
    let mut payload = Vec::with_capacity(9);
    payload.push(token_id);
    payload.extend_from_slice(&new_price.to_be_bytes());

    BridgeMessage {
        message_type: MessageType::UpdateAssetPrice.as_u8(),
        message_version: MESSAGE_VERSION,
        seq_num,
        source_chain,
        payload: Binary::from(payload),
    }
}

// ============================================================================
// Reader
// ============================================================================

struct PayloadReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> PayloadReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], MessageError> {
        let remaining = self.bytes.len() - self.pos;
        if remaining < len {
            return Err(MessageError::Truncated {
                needed: len - remaining,
            });
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, MessageError> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_u64(&mut self) -> Result<u64, MessageError> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.read_bytes(8)?);
        Ok(u64::from_be_bytes(buf))
    }

    fn finish(self) -> Result<(), MessageError> {
        let remaining = self.bytes.len() - self.pos;
        if remaining != 0 {
            return Err(MessageError::TrailingBytes { remaining });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain_ids::{ETH_SEPOLIA, TERRA_LOCAL_TEST, TERRA_TESTNET};

    /// Layout parity with the committee signer encoding for a token message.
    #[test]
    fn test_token_message_encoding_vector() {
        let mut sender = [0u8; 32];
        sender[31] = 0x64;
        let mut target = [0u8; 20];
        target[19] = 0xc8;

        let message =
            create_token_bridge_message(TERRA_TESTNET, 10, &sender, ETH_SEPOLIA, &target, 3, 12345)
                .unwrap();

        assert_eq!(
            hex::encode(message.serialize_message()),
            "0001000000000000000a0120000000000000000000000000000000000000000000000000000000000000\
             00640b1400000000000000000000000000000000000000c8030000000000003039"
        );
        // type + version + seq + chain + (1 + 32) + 1 + (1 + 20) + 1 + 8
        assert_eq!(message.serialize_message().len(), 1 + 1 + 8 + 1 + 33 + 1 + 21 + 1 + 8);
    }

    #[test]
    fn test_token_payload_decode() {
        let message = create_token_bridge_message(
            ETH_SEPOLIA,
            7,
            &[0xAB; 20],
            TERRA_TESTNET,
            b"terra1recipient",
            2,
            1_000_000,
        )
        .unwrap();

        let payload = message.extract_token_bridge_payload().unwrap();
        assert_eq!(payload.sender_address, vec![0xAB; 20]);
        assert_eq!(payload.target_chain, TERRA_TESTNET);
        assert_eq!(payload.target_address, b"terra1recipient".to_vec());
        assert_eq!(payload.token_type, 2);
        assert_eq!(payload.amount, 1_000_000);

        let key = message.key();
        assert_eq!(key.key(), (ETH_SEPOLIA, 0, 7));
    }

    #[test]
    fn test_blocklist_message_encoding_vector() {
        let address: [u8; 20] = hex::decode("68b43fd906c0b8f024a18c56e06744f7c6157c65")
            .unwrap()
            .try_into()
            .unwrap();
        let message =
            create_blocklist_message(TERRA_LOCAL_TEST, 129, BLOCKLIST_TYPE_BLOCK, &[address])
                .unwrap();

        assert_eq!(
            hex::encode(message.serialize_message()),
            "0101000000000000008103000168b43fd906c0b8f024a18c56e06744f7c6157c65"
        );

        let payload = message.extract_blocklist_payload().unwrap();
        assert!(!payload.is_unblock());
        assert_eq!(payload.validator_eth_addresses, vec![address]);
    }

    #[test]
    fn test_limit_and_price_payloads() {
        let message = create_update_bridge_limit_message(TERRA_TESTNET, 3, ETH_SEPOLIA, 1_000_000);
        let payload = message.extract_update_bridge_limit().unwrap();
        assert_eq!(payload.receiving_chain, TERRA_TESTNET);
        assert_eq!(payload.sending_chain, ETH_SEPOLIA);
        assert_eq!(payload.limit, 1_000_000);

        let message = create_update_asset_price_message(2, TERRA_TESTNET, 0, 12_345_000);
        assert_eq!(
            hex::encode(message.serialize_message()),
            "0401000000000000000001020000000000bc5ea8"
        );
        let payload = message.extract_update_asset_price().unwrap();
        assert_eq!(payload.token_id, 2);
        assert_eq!(payload.new_price, 12_345_000);
    }

    #[test]
    fn test_strict_decoding() {
        let mut message = create_update_bridge_limit_message(TERRA_TESTNET, 0, ETH_SEPOLIA, 5);

        // Trailing bytes
        let mut payload = message.payload.to_vec();
        payload.push(0);
        message.payload = Binary::from(payload);
        assert_eq!(
            message.extract_update_bridge_limit().unwrap_err(),
            MessageError::TrailingBytes { remaining: 1 }
        );

        // Truncated
        message.payload = Binary::from(vec![ETH_SEPOLIA, 0, 0]);
        assert_eq!(
            message.extract_update_bridge_limit().unwrap_err(),
            MessageError::Truncated { needed: 6 }
        );

        // Wrong type
        assert_eq!(
            message.extract_token_bridge_payload().unwrap_err(),
            MessageError::WrongMessageType {
                expected: 0,
                got: MessageType::UpdateBridgeLimit.as_u8(),
            }
        );
    }

    #[test]
    fn test_invalid_blocklist_type() {
        let message = create_blocklist_message(TERRA_TESTNET, 0, 7, &[]).unwrap();
        assert_eq!(
            message.extract_blocklist_payload().unwrap_err(),
            MessageError::InvalidBlocklistType { blocklist_type: 7 }
        );
    }

    #[test]
    fn test_message_type_conversion() {
        for message_type in MessageType::ALL {
            assert_eq!(MessageType::try_from(message_type.as_u8()), Ok(message_type));
        }
        assert_eq!(
            MessageType::try_from(5),
            Err(MessageError::UnknownMessageType { message_type: 5 })
        );
    }

    #[test]
    fn test_emergency_op_payload() {
        let message = create_emergency_op_message(TERRA_TESTNET, 2, EMERGENCY_OP_PAUSE);
        assert_eq!(hex::encode(message.serialize_message()), "020100000000000000020100");
        assert!(message.extract_emergency_op_payload().unwrap().is_pause());

        let message = create_emergency_op_message(TERRA_TESTNET, 3, EMERGENCY_OP_UNPAUSE);
        assert!(!message.extract_emergency_op_payload().unwrap().is_pause());

        let message = create_emergency_op_message(TERRA_TESTNET, 4, 2);
        assert_eq!(
            message.extract_emergency_op_payload().unwrap_err(),
            MessageError::InvalidEmergencyOpType { op_type: 2 }
        );

        let mut message = create_emergency_op_message(TERRA_TESTNET, 5, EMERGENCY_OP_PAUSE);
        message.payload = Binary::from(vec![EMERGENCY_OP_PAUSE, 0]);
        assert_eq!(
            message.extract_emergency_op_payload().unwrap_err(),
            MessageError::TrailingBytes { remaining: 1 }
        );
    }

    #[test]
    fn test_length_prefix_overflow() {
        let long = vec![1u8; 256];
        assert_eq!(
            create_token_bridge_message(TERRA_TESTNET, 0, &long, ETH_SEPOLIA, &[0; 20], 1, 1)
                .unwrap_err(),
            MessageError::FieldTooLong { len: 256 }
        );
    }
}
