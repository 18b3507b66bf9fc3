//! Query handlers for the CL8Y committee bridge contract.

use cosmwasm_std::{Binary, Deps, Env, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;

use crate::committee::{
    CommitteeMember, StakeSnapshot, COMMITTEE_MEMBERS, EMERGENCY_THRESHOLDS,
    LAST_COMMITTEE_UPDATE_EPOCH, MEMBER_REGISTRATIONS, THRESHOLDS,
};
use crate::crypto::eth_address;
use crate::limiter::{
    current_hour_since_epoch, NOTIONAL_VALUES, TRANSFER_LIMITS, TRANSFER_RECORDS,
};
use crate::msg::{
    AssetNotionalPriceResponse, BridgeRecordResponse, CommitteeMemberResponse, CommitteeResponse,
    ConfigResponse, EmergencyThresholdEntry, MemberRegistrationsResponse, RouteLimitResponse,
    SequenceNumberResponse, StakeSnapshotResponse, ThresholdEntry, ThresholdsResponse,
    TokensResponse, TransferRecordResponse,
};
use crate::state::{BRIDGE_RECORDS, CONFIG, SEQUENCE_NUMS, STAKE_SNAPSHOT};
use crate::treasury::{TokenDescriptor, TOKENS};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

// ============================================================================
// Core Queries
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        chain_id: config.chain_id,
        min_stake_participation_bps: config.min_stake_participation_bps,
        last_committee_update_epoch: LAST_COMMITTEE_UPDATE_EPOCH.may_load(deps.storage)?,
        paused: config.paused,
    })
}

pub fn query_sequence_number(deps: Deps, message_type: u8) -> StdResult<SequenceNumberResponse> {
    Ok(SequenceNumberResponse {
        message_type,
        next_seq_num: SEQUENCE_NUMS
            .may_load(deps.storage, message_type)?
            .unwrap_or_default(),
    })
}

pub fn query_bridge_record(
    deps: Deps,
    source_chain: u8,
    message_type: u8,
    seq_num: u64,
) -> StdResult<BridgeRecordResponse> {
    Ok(BridgeRecordResponse {
        record: BRIDGE_RECORDS.may_load(deps.storage, (source_chain, message_type, seq_num))?,
    })
}

// ============================================================================
// Committee Queries
// ============================================================================

fn member_response(member: CommitteeMember) -> StdResult<CommitteeMemberResponse> {
    let address = eth_address(member.bridge_pubkey_bytes.as_slice())
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    Ok(CommitteeMemberResponse {
        validator_address: member.validator_address,
        bridge_pubkey: member.bridge_pubkey_bytes,
        eth_address: format!("0x{}", hex::encode(address)),
        voting_power: member.voting_power,
        http_rest_url: member.http_rest_url,
        blocklisted: member.blocklisted,
    })
}

pub fn query_committee(
    deps: Deps,
    start_after: Option<Binary>,
    limit: Option<u32>,
) -> StdResult<CommitteeResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_ref().map(|key| Bound::exclusive(key.as_slice()));

    let members = COMMITTEE_MEMBERS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| member_response(item?.1))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(CommitteeResponse { members })
}

pub fn query_committee_member(
    deps: Deps,
    bridge_pubkey: Binary,
) -> StdResult<CommitteeMemberResponse> {
    member_response(COMMITTEE_MEMBERS.load(deps.storage, bridge_pubkey.as_slice())?)
}

pub fn query_member_registrations(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<MemberRegistrationsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_addr = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let registrations = MEMBER_REGISTRATIONS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, reg)| reg))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(MemberRegistrationsResponse { registrations })
}

pub fn query_thresholds(deps: Deps) -> StdResult<ThresholdsResponse> {
    let thresholds = THRESHOLDS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            let (message_type, threshold_bps) = item?;
            Ok(ThresholdEntry {
                message_type,
                threshold_bps,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    let emergency_thresholds = EMERGENCY_THRESHOLDS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            let (op_type, threshold_bps) = item?;
            Ok(EmergencyThresholdEntry {
                op_type,
                threshold_bps,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(ThresholdsResponse {
        thresholds,
        emergency_thresholds,
    })
}

pub fn query_stake_snapshot(deps: Deps) -> StdResult<StakeSnapshotResponse> {
    let snapshot = STAKE_SNAPSHOT.load(deps.storage)?;
    Ok(StakeSnapshotResponse {
        epoch: snapshot.epoch,
        total_stake: Uint128::new(snapshot.total_stake_amount()),
        validators: snapshot.validators,
    })
}

// ============================================================================
// Limiter Queries
// ============================================================================

pub fn query_route_limit(
    deps: Deps,
    sending_chain: u8,
    receiving_chain: u8,
) -> StdResult<RouteLimitResponse> {
    Ok(RouteLimitResponse {
        sending_chain,
        receiving_chain,
        limit: TRANSFER_LIMITS.may_load(deps.storage, (sending_chain, receiving_chain))?,
    })
}

pub fn query_asset_notional_price(
    deps: Deps,
    token_id: u8,
) -> StdResult<AssetNotionalPriceResponse> {
    Ok(AssetNotionalPriceResponse {
        token_id,
        price: NOTIONAL_VALUES.may_load(deps.storage, token_id)?,
    })
}

/// The stored record is returned as-is; `window_total` is what the limiter
/// would see if a transfer arrived in the current block.
pub fn query_transfer_record(
    deps: Deps,
    env: Env,
    sending_chain: u8,
    receiving_chain: u8,
) -> StdResult<TransferRecordResponse> {
    let current_hour = current_hour_since_epoch(env.block.time.seconds());
    let record = TRANSFER_RECORDS.may_load(deps.storage, (sending_chain, receiving_chain))?;

    let window_total = match &record {
        Some(record) => {
            let mut window = record.clone();
            window.adjust_transfer_records(current_hour);
            window.total_amount
        }
        None => 0,
    };

    Ok(TransferRecordResponse {
        record,
        current_hour,
        window_total,
    })
}

// ============================================================================
// Token Queries
// ============================================================================

pub fn query_token(deps: Deps, token_id: u8) -> StdResult<TokenDescriptor> {
    TOKENS.load(deps.storage, token_id)
}

pub fn query_tokens(
    deps: Deps,
    start_after: Option<u8>,
    limit: Option<u32>,
) -> StdResult<TokensResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let tokens = TOKENS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, token)| token))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(TokensResponse { tokens })
}
