//! Error types for the CL8Y committee bridge contract

use common::MessageError;
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Message(#[from] MessageError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================
    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Sender is not an active validator")]
    NotActiveValidator,

    #[error("Bridge is paused")]
    BridgePaused,

    #[error("Bridge is already paused")]
    BridgeAlreadyPaused,

    #[error("Bridge is not paused")]
    BridgeNotPaused,

    // ========================================================================
    // Committee Errors
    // ========================================================================
    #[error("Invalid bridge public key length: expected 33 bytes, got {got}")]
    InvalidPubkeyLength { got: usize },

    #[error("Invalid bridge public key")]
    InvalidPubkey,

    #[error("Bridge public key already registered by another validator")]
    DuplicatePubkey,

    #[error("Invalid stake participation: {bps} bps exceeds 10000")]
    InvalidStakeParticipation { bps: u64 },

    #[error("Validator listed more than once in stake snapshot: {address}")]
    DuplicateValidator { address: String },

    // ========================================================================
    // Signature Errors
    // ========================================================================
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Duplicate signature provided")]
    DuplicateSignature,

    #[error("Signature recovered an unknown signer")]
    UnknownSigner,

    #[error("Insufficient signature weight: got {got}, required {required}")]
    InsufficientSignatureWeight { got: u64, required: u64 },

    #[error("Unknown message type: {message_type}")]
    UnknownMessageType { message_type: u8 },

    #[error("Blocklist target is not a committee member: {address}")]
    UnknownValidatorInBlocklist { address: String },

    // ========================================================================
    // Message Errors
    // ========================================================================
    #[error("Unexpected chain id: {chain_id}")]
    UnexpectedChainId { chain_id: u8 },

    #[error("Unexpected message version: expected {expected}, got {got}")]
    UnexpectedMessageVersion { expected: u8, got: u8 },

    #[error("Unexpected sequence number: expected {expected}, got {got}")]
    UnexpectedSequenceNumber { expected: u64, got: u64 },

    #[error("Message must be a token transfer")]
    MustBeTokenMessage,

    #[error("Unexpected message type: {message_type}")]
    UnexpectedMessageType { message_type: u8 },

    #[error("Bridge message does not match the recorded transfer")]
    MalformedMessage,

    #[error("Invalid bridge route: {source_chain} -> {destination_chain}")]
    InvalidBridgeRoute {
        source_chain: u8,
        destination_chain: u8,
    },

    // ========================================================================
    // Transfer Errors
    // ========================================================================
    #[error("Token transfer not found")]
    TokenTransferNotFound,

    #[error("Token transfer has not been approved by the committee")]
    UnauthorisedClaim,

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    // ========================================================================
    // Limiter Errors
    // ========================================================================
    #[error("No limit configured for route {sending_chain} -> {receiving_chain}")]
    NoLimitConfiguredForRoute {
        sending_chain: u8,
        receiving_chain: u8,
    },

    #[error("No notional price configured for token {token_id}")]
    AssetPriceNotFound { token_id: u8 },

    #[error("Notional price must be greater than zero")]
    InvalidNotionalValue,

    // ========================================================================
    // Treasury Errors
    // ========================================================================
    #[error("Unsupported token type: {token}")]
    UnsupportedTokenType { token: String },

    #[error("Token already registered: {token_id}")]
    TokenAlreadyRegistered { token_id: u8 },

    #[error("Invalid token decimals: {decimals} exceeds 18")]
    InvalidTokenDecimals { decimals: u8 },
}
