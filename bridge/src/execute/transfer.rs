//! Token transfer handlers.
//!
//! Outgoing: a user sends CW20 tokens to the bridge, which burns them and
//! records an unsigned token message for the committee to sign.
//!
//! Incoming: anyone relays the committee-signed message with
//! `ApproveTokenTransfer`, then anyone calls `ClaimToken` to mint to the
//! recipient once the route's rolling limit allows it.

use common::chain_ids::get_route;
use common::message::{create_token_bridge_message, EVM_ADDRESS_LENGTH, MESSAGE_VERSION};
use common::{BridgeMessage, BridgeMessageKey, MessageType};
use cosmwasm_std::{from_json, Binary, DepsMut, Env, MessageInfo, Response, Uint128};
use cw20::Cw20ReceiveMsg;

use crate::committee::verify_signatures;
use crate::error::ContractError;
use crate::events;
use crate::limiter::{check_and_record_sending_transfer, current_hour_since_epoch};
use crate::msg::ReceiveMsg;
use crate::state::{get_and_increment_sequence_number, BridgeRecord, BRIDGE_RECORDS, CONFIG};
use crate::treasury;

// ============================================================================
// Outgoing
// ============================================================================

/// CW20 receive hook.
pub fn execute_receive(
    deps: DepsMut,
    info: MessageInfo,
    wrapper: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    match from_json::<ReceiveMsg>(&wrapper.msg)? {
        ReceiveMsg::SendToken {
            target_chain,
            target_address,
        } => execute_send_token(deps, info, wrapper, target_chain, target_address),
    }
}

fn execute_send_token(
    deps: DepsMut,
    info: MessageInfo,
    wrapper: Cw20ReceiveMsg,
    target_chain: u8,
    target_address: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }
    get_route(config.chain_id, target_chain).ok_or(ContractError::InvalidBridgeRoute {
        source_chain: config.chain_id,
        destination_chain: target_chain,
    })?;

    if target_address.len() != EVM_ADDRESS_LENGTH {
        return Err(ContractError::InvalidAddress {
            reason: format!(
                "target address must be {} bytes, got {}",
                EVM_ADDRESS_LENGTH,
                target_address.len()
            ),
        });
    }

    // info.sender is the CW20 contract forwarding the tokens
    let token = treasury::token_by_contract(deps.storage, &info.sender)?;

    if wrapper.amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "amount must be greater than zero".to_string(),
        });
    }
    let amount = u64::try_from(wrapper.amount.u128()).map_err(|_| ContractError::InvalidAmount {
        reason: "amount exceeds u64".to_string(),
    })?;

    let sender = deps.api.addr_validate(&wrapper.sender)?;
    let seq_num =
        get_and_increment_sequence_number(deps.storage, MessageType::TokenTransfer.as_u8())?;
    let message = create_token_bridge_message(
        config.chain_id,
        seq_num,
        sender.as_bytes(),
        target_chain,
        target_address.as_slice(),
        token.token_id,
        amount,
    )?;
    let key = message.key();

    BRIDGE_RECORDS.save(
        deps.storage,
        key.key(),
        &BridgeRecord {
            message,
            verified_signatures: None,
            claimed: false,
        },
    )?;

    Ok(Response::new()
        .add_message(token.burn_msg(wrapper.amount)?)
        .add_event(events::token_deposited(
            &key,
            sender.as_bytes(),
            target_chain,
            target_address.as_slice(),
            token.token_id,
            amount,
        ))
        .add_attribute("action", "send_token")
        .add_attribute("sender", sender)
        .add_attribute("seq_num", seq_num.to_string())
        .add_attribute("amount", amount.to_string()))
}

// ============================================================================
// Approval
// ============================================================================

/// Record committee approval of a token transfer from or to this chain.
pub fn execute_approve_token_transfer(
    deps: DepsMut,
    message: BridgeMessage,
    signatures: Vec<Binary>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    verify_signatures(deps.storage, deps.api, &message, &signatures)?;

    if message.message_type != MessageType::TokenTransfer.as_u8() {
        return Err(ContractError::MustBeTokenMessage);
    }
    if message.message_version != MESSAGE_VERSION {
        return Err(ContractError::UnexpectedMessageVersion {
            expected: MESSAGE_VERSION,
            got: message.message_version,
        });
    }

    let payload = message.extract_token_bridge_payload()?;
    if message.source_chain != config.chain_id && payload.target_chain != config.chain_id {
        return Err(ContractError::UnexpectedChainId {
            chain_id: message.source_chain,
        });
    }
    get_route(message.source_chain, payload.target_chain).ok_or(
        ContractError::InvalidBridgeRoute {
            source_chain: message.source_chain,
            destination_chain: payload.target_chain,
        },
    )?;

    let key = message.key();
    let existing = BRIDGE_RECORDS.may_load(deps.storage, key.key())?;

    let record = if message.source_chain == config.chain_id {
        // Outgoing: the record was written when the tokens were sent
        let mut record = existing.ok_or(ContractError::TokenTransferNotFound)?;
        if record.message != message {
            return Err(ContractError::MalformedMessage);
        }
        if record.verified_signatures.is_some() {
            return Ok(already_approved(&key));
        }
        record.verified_signatures = Some(signatures);
        record
    } else {
        if existing.is_some() {
            return Ok(already_approved(&key));
        }
        BridgeRecord {
            message,
            verified_signatures: Some(signatures),
            claimed: false,
        }
    };
    BRIDGE_RECORDS.save(deps.storage, key.key(), &record)?;

    Ok(Response::new()
        .add_event(events::token_transfer_approved(&key))
        .add_attribute("action", "approve_token_transfer")
        .add_attribute("source_chain", key.source_chain.to_string())
        .add_attribute("seq_num", key.seq_num.to_string()))
}

fn already_approved(key: &BridgeMessageKey) -> Response {
    Response::new()
        .add_event(events::token_transfer_already_approved(key))
        .add_attribute("action", "approve_token_transfer")
        .add_attribute("already_approved", "true")
}

// ============================================================================
// Claim
// ============================================================================

/// Mint an approved incoming transfer to its recipient.
///
/// A transfer that would exceed the route's rolling limit is not an error:
/// the call succeeds with `token_transfer_limit_exceed` and the transfer
/// stays claimable.
pub fn execute_claim_token(
    deps: DepsMut,
    env: Env,
    source_chain: u8,
    seq_num: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }
    let key = BridgeMessageKey {
        source_chain,
        message_type: MessageType::TokenTransfer.as_u8(),
        seq_num,
    };

    let mut record = BRIDGE_RECORDS
        .may_load(deps.storage, key.key())?
        .ok_or(ContractError::TokenTransferNotFound)?;
    if record.verified_signatures.is_none() {
        return Err(ContractError::UnauthorisedClaim);
    }

    let payload = record.message.extract_token_bridge_payload()?;
    if payload.target_chain != config.chain_id {
        return Err(ContractError::UnexpectedChainId {
            chain_id: payload.target_chain,
        });
    }

    if record.claimed {
        return Ok(Response::new()
            .add_event(events::token_transfer_already_claimed(&key))
            .add_attribute("action", "claim_token")
            .add_attribute("already_claimed", "true"));
    }

    let recipient = String::from_utf8(payload.target_address.clone()).map_err(|_| {
        ContractError::InvalidAddress {
            reason: "recipient is not a UTF-8 address".to_string(),
        }
    })?;
    let recipient = deps.api.addr_validate(&recipient)?;
    let token = treasury::token(deps.storage, payload.token_type)?;

    let route = get_route(source_chain, config.chain_id).ok_or(
        ContractError::InvalidBridgeRoute {
            source_chain,
            destination_chain: config.chain_id,
        },
    )?;
    let current_hour = current_hour_since_epoch(env.block.time.seconds());
    if !check_and_record_sending_transfer(
        deps.storage,
        &route,
        &token,
        current_hour,
        payload.amount,
    )? {
        return Ok(Response::new()
            .add_event(events::token_transfer_limit_exceed(&key))
            .add_attribute("action", "claim_token")
            .add_attribute("limit_exceeded", "true"));
    }

    record.claimed = true;
    BRIDGE_RECORDS.save(deps.storage, key.key(), &record)?;

    let amount = Uint128::from(payload.amount);
    Ok(Response::new()
        .add_message(token.mint_msg(&recipient, amount)?)
        .add_event(events::token_transfer_claimed(&key))
        .add_attribute("action", "claim_token")
        .add_attribute("recipient", recipient)
        .add_attribute("token_id", token.token_id.to_string())
        .add_attribute("amount", amount.to_string()))
}
