//! CL8Y Committee Bridge Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute and sudo message handlers
//! - `query` - Query message handlers

use common::chain_ids::is_valid_chain_id;
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::committee::{initialize_thresholds, BPS_DENOMINATOR};
use crate::error::ContractError;
use crate::execute::{
    execute_add_token, execute_approve_token_transfer, execute_claim_token, execute_receive,
    execute_register_committee_member, execute_system_message, sudo_end_of_epoch, validator_set,
};
use crate::limiter::initialize_limiter;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, SudoMsg};
use crate::query::{
    query_asset_notional_price, query_bridge_record, query_committee, query_committee_member,
    query_config, query_member_registrations, query_route_limit, query_sequence_number,
    query_stake_snapshot, query_thresholds, query_token, query_tokens, query_transfer_record,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, STAKE_SNAPSHOT};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;

    if !is_valid_chain_id(msg.chain_id) {
        return Err(ContractError::UnexpectedChainId {
            chain_id: msg.chain_id,
        });
    }
    if msg.min_stake_participation_bps as u128 > BPS_DENOMINATOR {
        return Err(ContractError::InvalidStakeParticipation {
            bps: msg.min_stake_participation_bps,
        });
    }

    let config = Config {
        admin,
        chain_id: msg.chain_id,
        min_stake_participation_bps: msg.min_stake_participation_bps,
        paused: false,
    };
    CONFIG.save(deps.storage, &config)?;

    let snapshot = validator_set(deps.api, msg.epoch, msg.validators)?;
    STAKE_SNAPSHOT.save(deps.storage, &snapshot)?;

    // Genesis committee thresholds, route limits, and asset prices
    initialize_thresholds(deps.storage)?;
    initialize_limiter(deps.storage)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("chain_id", config.chain_id.to_string())
        .add_attribute(
            "min_stake_participation_bps",
            config.min_stake_participation_bps.to_string(),
        )
        .add_attribute("validators", snapshot.validators.len().to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Token transfers
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, info, cw20_msg),
        ExecuteMsg::ApproveTokenTransfer {
            message,
            signatures,
        } => execute_approve_token_transfer(deps, message, signatures),
        ExecuteMsg::ClaimToken {
            source_chain,
            seq_num,
        } => execute_claim_token(deps, env, source_chain, seq_num),

        // Committee
        ExecuteMsg::RegisterCommitteeMember {
            bridge_pubkey,
            http_rest_url,
        } => execute_register_committee_member(deps, info, bridge_pubkey, http_rest_url),
        ExecuteMsg::ExecuteSystemMessage {
            message,
            signatures,
        } => execute_system_message(deps, message, signatures),

        // Admin
        ExecuteMsg::AddToken {
            token_id,
            contract_addr,
            decimals,
        } => execute_add_token(deps, info, token_id, contract_addr, decimals),
    }
}

// ============================================================================
// Sudo
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn sudo(deps: DepsMut, _env: Env, msg: SudoMsg) -> Result<Response, ContractError> {
    match msg {
        SudoMsg::EndOfEpoch { epoch, validators } => sudo_end_of_epoch(deps, epoch, validators),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),

        // Committee
        QueryMsg::Committee { start_after, limit } => {
            to_json_binary(&query_committee(deps, start_after, limit)?)
        }
        QueryMsg::CommitteeMember { bridge_pubkey } => {
            to_json_binary(&query_committee_member(deps, bridge_pubkey)?)
        }
        QueryMsg::MemberRegistrations { start_after, limit } => {
            to_json_binary(&query_member_registrations(deps, start_after, limit)?)
        }
        QueryMsg::Thresholds {} => to_json_binary(&query_thresholds(deps)?),
        QueryMsg::StakeSnapshot {} => to_json_binary(&query_stake_snapshot(deps)?),

        // Limiter
        QueryMsg::RouteLimit {
            sending_chain,
            receiving_chain,
        } => to_json_binary(&query_route_limit(deps, sending_chain, receiving_chain)?),
        QueryMsg::AssetNotionalPrice { token_id } => {
            to_json_binary(&query_asset_notional_price(deps, token_id)?)
        }
        QueryMsg::TransferRecord {
            sending_chain,
            receiving_chain,
        } => to_json_binary(&query_transfer_record(
            deps,
            env,
            sending_chain,
            receiving_chain,
        )?),

        // Tokens
        QueryMsg::Token { token_id } => to_json_binary(&query_token(deps, token_id)?),
        QueryMsg::Tokens { start_after, limit } => {
            to_json_binary(&query_tokens(deps, start_after, limit)?)
        }

        // Transfers
        QueryMsg::BridgeRecord {
            source_chain,
            message_type,
            seq_num,
        } => to_json_binary(&query_bridge_record(
            deps,
            source_chain,
            message_type,
            seq_num,
        )?),
        QueryMsg::SequenceNumber { message_type } => {
            to_json_binary(&query_sequence_number(deps, message_type)?)
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
