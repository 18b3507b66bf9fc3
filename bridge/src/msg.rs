//! Message types for the CL8Y committee bridge contract

use common::BridgeMessage;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128, Uint64};

use crate::committee::CommitteeMemberRegistration;
use crate::limiter::TransferRecord;
use crate::state::{BridgeRecord, ValidatorStake};
use crate::treasury::TokenDescriptor;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Validator stake as reported by the host chain
#[cw_serde]
pub struct ValidatorStakeMsg {
    pub address: String,
    pub stake: Uint64,
}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address for token registration
    pub admin: String,
    /// Bridge chain id of this chain (see `common::chain_ids`)
    pub chain_id: u8,
    /// Minimum participating stake (bps) for a committee rotation
    pub min_stake_participation_bps: u64,
    /// Epoch of the initial validator set
    pub epoch: u64,
    /// Initial active validator set
    pub validators: Vec<ValidatorStakeMsg>,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Token Transfers
    // ========================================================================
    /// Bridge CW20 tokens out (called via CW20 send with a [`ReceiveMsg`])
    Receive(cw20::Cw20ReceiveMsg),

    /// Record committee approval of a token transfer
    ///
    /// Authorization: Anyone (signatures carry the authority)
    ApproveTokenTransfer {
        message: BridgeMessage,
        signatures: Vec<Binary>,
    },

    /// Mint an approved incoming transfer to its recipient
    ///
    /// Authorization: Anyone
    ClaimToken { source_chain: u8, seq_num: u64 },

    // ========================================================================
    // Committee
    // ========================================================================
    /// Declare the caller's bridge key for the next committee
    ///
    /// Authorization: Active validators
    RegisterCommitteeMember {
        /// 33-byte compressed secp256k1 public key
        bridge_pubkey: Binary,
        http_rest_url: String,
    },

    /// Execute a committee-signed blocklist, limit, or price update
    ///
    /// Authorization: Anyone (signatures carry the authority)
    ExecuteSystemMessage {
        message: BridgeMessage,
        signatures: Vec<Binary>,
    },

    // ========================================================================
    // Admin
    // ========================================================================
    /// Register a bridged CW20 token. The bridge must be its minter.
    ///
    /// Authorization: Admin
    AddToken {
        token_id: u8,
        contract_addr: String,
        decimals: u8,
    },
}

/// CW20 receive hook payload
#[cw_serde]
pub enum ReceiveMsg {
    SendToken {
        target_chain: u8,
        /// 20-byte EVM recipient
        target_address: Binary,
    },
}

/// Host chain hooks
#[cw_serde]
pub enum SudoMsg {
    /// New validator set at an epoch boundary; also attempts a committee rotation
    EndOfEpoch {
        epoch: u64,
        validators: Vec<ValidatorStakeMsg>,
    },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Current committee, ordered by pubkey
    #[returns(CommitteeResponse)]
    Committee {
        start_after: Option<Binary>,
        limit: Option<u32>,
    },

    #[returns(CommitteeMemberResponse)]
    CommitteeMember { bridge_pubkey: Binary },

    /// Registrations pending for the next rotation
    #[returns(MemberRegistrationsResponse)]
    MemberRegistrations {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(ThresholdsResponse)]
    Thresholds {},

    #[returns(StakeSnapshotResponse)]
    StakeSnapshot {},

    #[returns(RouteLimitResponse)]
    RouteLimit {
        sending_chain: u8,
        receiving_chain: u8,
    },

    #[returns(AssetNotionalPriceResponse)]
    AssetNotionalPrice { token_id: u8 },

    /// Rolling window of a route as of the current block
    #[returns(TransferRecordResponse)]
    TransferRecord {
        sending_chain: u8,
        receiving_chain: u8,
    },

    #[returns(TokenDescriptor)]
    Token { token_id: u8 },

    #[returns(TokensResponse)]
    Tokens {
        start_after: Option<u8>,
        limit: Option<u32>,
    },

    #[returns(BridgeRecordResponse)]
    BridgeRecord {
        source_chain: u8,
        message_type: u8,
        seq_num: u64,
    },

    /// Next sequence number expected for a message type
    #[returns(SequenceNumberResponse)]
    SequenceNumber { message_type: u8 },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub chain_id: u8,
    pub min_stake_participation_bps: u64,
    pub last_committee_update_epoch: Option<u64>,
    pub paused: bool,
}

#[cw_serde]
pub struct CommitteeMemberResponse {
    pub validator_address: Addr,
    pub bridge_pubkey: Binary,
    /// EVM address derived from the bridge key (0x-prefixed hex)
    pub eth_address: String,
    pub voting_power: u64,
    pub http_rest_url: String,
    pub blocklisted: bool,
}

#[cw_serde]
pub struct CommitteeResponse {
    pub members: Vec<CommitteeMemberResponse>,
}

#[cw_serde]
pub struct MemberRegistrationsResponse {
    pub registrations: Vec<CommitteeMemberRegistration>,
}

#[cw_serde]
pub struct ThresholdEntry {
    pub message_type: u8,
    pub threshold_bps: u64,
}

#[cw_serde]
pub struct EmergencyThresholdEntry {
    /// 0 pause, 1 unpause
    pub op_type: u8,
    pub threshold_bps: u64,
}

#[cw_serde]
pub struct ThresholdsResponse {
    /// Thresholds keyed by message type, excluding emergency ops
    pub thresholds: Vec<ThresholdEntry>,
    pub emergency_thresholds: Vec<EmergencyThresholdEntry>,
}

#[cw_serde]
pub struct StakeSnapshotResponse {
    pub epoch: u64,
    pub validators: Vec<ValidatorStake>,
    pub total_stake: Uint128,
}

#[cw_serde]
pub struct RouteLimitResponse {
    pub sending_chain: u8,
    pub receiving_chain: u8,
    /// `None` when the route has no configured cap
    pub limit: Option<u64>,
}

#[cw_serde]
pub struct AssetNotionalPriceResponse {
    pub token_id: u8,
    pub price: Option<u64>,
}

#[cw_serde]
pub struct TransferRecordResponse {
    /// Stored record, `None` before the first transfer on the route
    pub record: Option<TransferRecord>,
    pub current_hour: u64,
    /// USD notional transferred over the 24 hours ending at `current_hour`
    pub window_total: u64,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<TokenDescriptor>,
}

#[cw_serde]
pub struct BridgeRecordResponse {
    pub record: Option<BridgeRecord>,
}

#[cw_serde]
pub struct SequenceNumberResponse {
    pub message_type: u8,
    pub next_seq_num: u64,
}
