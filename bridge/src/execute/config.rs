//! Admin configuration handlers.

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::state::CONFIG;
use crate::treasury;

/// Register a bridged CW20 token under its bridge token id.
pub fn execute_add_token(
    deps: DepsMut,
    info: MessageInfo,
    token_id: u8,
    contract_addr: String,
    decimals: u8,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let contract_addr = deps.api.addr_validate(&contract_addr)?;
    let token = treasury::register_token(deps.storage, token_id, contract_addr, decimals)?;

    Ok(Response::new()
        .add_attribute("action", "add_token")
        .add_attribute("token_id", token.token_id.to_string())
        .add_attribute("contract_addr", token.contract_addr)
        .add_attribute("decimals", token.decimals.to_string()))
}
