//! Committee-signed system messages.
//!
//! System messages originate on this chain: the source chain must match and
//! each carries the next sequence number for its type, so every signed
//! update executes at most once and in order.

use common::message::MESSAGE_VERSION;
use common::{BridgeMessage, MessageType};
use cosmwasm_std::{Binary, DepsMut, Event, Response, Storage};

use crate::committee::{execute_blocklist, verify_signatures};
use crate::error::ContractError;
use crate::events;
use crate::limiter::{update_asset_notional_price, update_route_limit};
use crate::state::{get_and_increment_sequence_number, Config, CONFIG};

pub fn execute_system_message(
    deps: DepsMut,
    message: BridgeMessage,
    signatures: Vec<Binary>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let unexpected_type = || ContractError::UnexpectedMessageType {
        message_type: message.message_type,
    };
    let message_type = MessageType::try_from(message.message_type).map_err(|_| unexpected_type())?;
    if message_type == MessageType::TokenTransfer {
        return Err(unexpected_type());
    }
    if message.message_version != MESSAGE_VERSION {
        return Err(ContractError::UnexpectedMessageVersion {
            expected: MESSAGE_VERSION,
            got: message.message_version,
        });
    }
    if message.source_chain != config.chain_id {
        return Err(ContractError::UnexpectedChainId {
            chain_id: message.source_chain,
        });
    }

    let expected = get_and_increment_sequence_number(deps.storage, message.message_type)?;
    if message.seq_num != expected {
        return Err(ContractError::UnexpectedSequenceNumber {
            expected,
            got: message.seq_num,
        });
    }

    verify_signatures(deps.storage, deps.api, &message, &signatures)?;

    let event = match message_type {
        MessageType::CommitteeBlocklist => {
            let payload = message.extract_blocklist_payload()?;
            let public_keys = execute_blocklist(deps.storage, &payload)?;
            events::blocklist_validator(!payload.is_unblock(), &public_keys)
        }
        MessageType::EmergencyOp => {
            let payload = message.extract_emergency_op_payload()?;
            apply_emergency_op(deps.storage, config, payload.is_pause())?
        }
        MessageType::UpdateBridgeLimit => {
            let payload = message.extract_update_bridge_limit()?;
            update_route_limit(
                deps.storage,
                payload.sending_chain,
                payload.receiving_chain,
                payload.limit,
            )?
        }
        MessageType::UpdateAssetPrice => {
            let payload = message.extract_update_asset_price()?;
            update_asset_notional_price(deps.storage, payload.token_id, payload.new_price)?
        }
        MessageType::TokenTransfer => return Err(unexpected_type()),
    };

    Ok(Response::new()
        .add_event(event)
        .add_attribute("action", "execute_system_message")
        .add_attribute("message_type", message_type.as_str())
        .add_attribute("seq_num", message.seq_num.to_string()))
}

/// Freeze or unfreeze the bridge. Repeating the current state is an error.
fn apply_emergency_op(
    storage: &mut dyn Storage,
    mut config: Config,
    pause: bool,
) -> Result<Event, ContractError> {
    match (pause, config.paused) {
        (true, true) => return Err(ContractError::BridgeAlreadyPaused),
        (false, false) => return Err(ContractError::BridgeNotPaused),
        _ => {}
    }
    config.paused = pause;
    CONFIG.save(storage, &config)?;
    Ok(events::emergency_op(pause))
}
