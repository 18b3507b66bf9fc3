//! Bridged token registry
//!
//! Maps the one-byte bridge token id to the CW20 contract that represents it
//! on this chain. The bridge is the minter of every registered token: incoming
//! transfers mint, outgoing transfers burn what the user sent.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, StdResult, Storage, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;
use cw_storage_plus::Map;

use crate::error::ContractError;

/// Highest supported token decimals; keeps `10^decimals` within limiter math
pub const MAX_TOKEN_DECIMALS: u8 = 18;

#[cw_serde]
pub struct TokenDescriptor {
    pub token_id: u8,
    pub contract_addr: Addr,
    pub decimals: u8,
}

impl TokenDescriptor {
    pub fn mint_msg(&self, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
        Ok(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: self.contract_addr.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Mint {
                recipient: recipient.to_string(),
                amount,
            })?,
            funds: vec![],
        }))
    }

    pub fn burn_msg(&self, amount: Uint128) -> StdResult<CosmosMsg> {
        Ok(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: self.contract_addr.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Burn { amount })?,
            funds: vec![],
        }))
    }
}

pub const TOKENS: Map<u8, TokenDescriptor> = Map::new("tokens");

/// Reverse index from CW20 contract to token id
pub const TOKEN_IDS: Map<&Addr, u8> = Map::new("token_ids");

pub fn register_token(
    storage: &mut dyn Storage,
    token_id: u8,
    contract_addr: Addr,
    decimals: u8,
) -> Result<TokenDescriptor, ContractError> {
    if decimals > MAX_TOKEN_DECIMALS {
        return Err(ContractError::InvalidTokenDecimals { decimals });
    }
    if TOKENS.has(storage, token_id) || TOKEN_IDS.has(storage, &contract_addr) {
        return Err(ContractError::TokenAlreadyRegistered { token_id });
    }

    let descriptor = TokenDescriptor {
        token_id,
        contract_addr,
        decimals,
    };
    TOKENS.save(storage, token_id, &descriptor)?;
    TOKEN_IDS.save(storage, &descriptor.contract_addr, &token_id)?;
    Ok(descriptor)
}

pub fn token(storage: &dyn Storage, token_id: u8) -> Result<TokenDescriptor, ContractError> {
    TOKENS
        .may_load(storage, token_id)?
        .ok_or_else(|| ContractError::UnsupportedTokenType {
            token: token_id.to_string(),
        })
}

/// Descriptor of the token behind a CW20 contract.
pub fn token_by_contract(
    storage: &dyn Storage,
    contract_addr: &Addr,
) -> Result<TokenDescriptor, ContractError> {
    let token_id = token_id(storage, contract_addr)?;
    token(storage, token_id)
}

pub fn token_id(storage: &dyn Storage, contract_addr: &Addr) -> Result<u8, ContractError> {
    TOKEN_IDS
        .may_load(storage, contract_addr)?
        .ok_or_else(|| ContractError::UnsupportedTokenType {
            token: contract_addr.to_string(),
        })
}

pub fn token_decimals(storage: &dyn Storage, token_id: u8) -> Result<u8, ContractError> {
    Ok(token(storage, token_id)?.decimals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_dependencies;
    use cosmwasm_std::from_json;

    #[test]
    fn test_token_lookup() {
        let mut deps = mock_dependencies();
        let usdc = Addr::unchecked("terra1usdc");
        register_token(deps.as_mut().storage, 3, usdc.clone(), 6).unwrap();

        assert_eq!(token_id(deps.as_ref().storage, &usdc).unwrap(), 3);
        assert_eq!(token_decimals(deps.as_ref().storage, 3).unwrap(), 6);
        assert_eq!(
            token_by_contract(deps.as_ref().storage, &usdc).unwrap().token_id,
            3
        );

        assert_eq!(
            token(deps.as_ref().storage, 9).unwrap_err(),
            ContractError::UnsupportedTokenType {
                token: "9".to_string()
            }
        );
        assert_eq!(
            token_id(deps.as_ref().storage, &Addr::unchecked("terra1other")).unwrap_err(),
            ContractError::UnsupportedTokenType {
                token: "terra1other".to_string()
            }
        );
    }

    #[test]
    fn test_register_token_validation() {
        let mut deps = mock_dependencies();
        let err = register_token(deps.as_mut().storage, 1, Addr::unchecked("terra1btc"), 19)
            .unwrap_err();
        assert_eq!(err, ContractError::InvalidTokenDecimals { decimals: 19 });

        register_token(deps.as_mut().storage, 1, Addr::unchecked("terra1btc"), 8).unwrap();
        // Same id
        let err = register_token(deps.as_mut().storage, 1, Addr::unchecked("terra1wbtc"), 8)
            .unwrap_err();
        assert_eq!(err, ContractError::TokenAlreadyRegistered { token_id: 1 });
        // Same contract under another id
        let err = register_token(deps.as_mut().storage, 2, Addr::unchecked("terra1btc"), 8)
            .unwrap_err();
        assert_eq!(err, ContractError::TokenAlreadyRegistered { token_id: 2 });
    }

    #[test]
    fn test_mint_and_burn_msgs() {
        let descriptor = TokenDescriptor {
            token_id: 2,
            contract_addr: Addr::unchecked("terra1eth"),
            decimals: 8,
        };

        let CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr, msg, ..
        }) = descriptor
            .mint_msg(&Addr::unchecked("terra1user"), Uint128::new(42))
            .unwrap()
        else {
            panic!("expected wasm execute");
        };
        assert_eq!(contract_addr, "terra1eth");
        assert_eq!(
            from_json::<Cw20ExecuteMsg>(&msg).unwrap(),
            Cw20ExecuteMsg::Mint {
                recipient: "terra1user".to_string(),
                amount: Uint128::new(42),
            }
        );

        let CosmosMsg::Wasm(WasmMsg::Execute { msg, .. }) =
            descriptor.burn_msg(Uint128::new(7)).unwrap()
        else {
            panic!("expected wasm execute");
        };
        assert_eq!(
            from_json::<Cw20ExecuteMsg>(&msg).unwrap(),
            Cw20ExecuteMsg::Burn {
                amount: Uint128::new(7)
            }
        );
    }
}
