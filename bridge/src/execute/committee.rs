//! Committee membership handlers.
//!
//! Validators register their bridge keys through `execute`; the host chain
//! drives rotation through `sudo` at each epoch boundary.

use std::collections::BTreeSet;

use cosmwasm_std::{Api, Binary, DepsMut, MessageInfo, Response};

use crate::committee::{self, CommitteeRotation};
use crate::error::ContractError;
use crate::events;
use crate::msg::ValidatorStakeMsg;
use crate::state::{ValidatorSet, ValidatorStake, CONFIG, STAKE_SNAPSHOT};

/// Register (or update) the caller's bridge key for the next committee.
pub fn execute_register_committee_member(
    deps: DepsMut,
    info: MessageInfo,
    bridge_pubkey: Binary,
    http_rest_url: String,
) -> Result<Response, ContractError> {
    let snapshot = STAKE_SNAPSHOT.load(deps.storage)?;
    let registration = committee::register(
        deps.storage,
        &snapshot,
        &info.sender,
        bridge_pubkey.as_slice(),
        http_rest_url,
    )?;

    Ok(Response::new()
        .add_event(events::committee_member_registration(
            &registration.validator_address,
            registration.bridge_pubkey_bytes.as_slice(),
            &registration.http_rest_url,
        ))
        .add_attribute("action", "register_committee_member")
        .add_attribute("validator", info.sender))
}

/// Validate a validator set reported by the host chain.
///
/// Each validator may appear once.
pub fn validator_set(
    api: &dyn Api,
    epoch: u64,
    validators: Vec<ValidatorStakeMsg>,
) -> Result<ValidatorSet, ContractError> {
    let mut seen = BTreeSet::new();
    let mut stakes = Vec::with_capacity(validators.len());
    for v in validators {
        let address = api.addr_validate(&v.address)?;
        if !seen.insert(address.clone()) {
            return Err(ContractError::DuplicateValidator {
                address: address.into_string(),
            });
        }
        stakes.push(ValidatorStake {
            address,
            stake: v.stake,
        });
    }
    Ok(ValidatorSet {
        epoch,
        validators: stakes,
    })
}

/// Epoch boundary: store the new stake snapshot and try to rotate the committee.
///
/// Never fails because of low participation, so the host's end-of-epoch
/// processing is not blocked by the bridge.
pub fn sudo_end_of_epoch(
    deps: DepsMut,
    epoch: u64,
    validators: Vec<ValidatorStakeMsg>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let snapshot = validator_set(deps.api, epoch, validators)?;
    STAKE_SNAPSHOT.save(deps.storage, &snapshot)?;

    let rotation = committee::try_create_next_committee(
        deps.storage,
        &snapshot,
        config.min_stake_participation_bps,
        epoch,
    )?;

    let response = Response::new()
        .add_attribute("action", "end_of_epoch")
        .add_attribute("epoch", epoch.to_string())
        .add_attribute("validators", snapshot.validators.len().to_string());

    Ok(match rotation {
        CommitteeRotation::Committed {
            members,
            stake_participation_bps,
        } => response
            .add_attribute("committee_rotation", "committed")
            .add_event(events::committee_update(
                members.len(),
                stake_participation_bps,
                epoch,
            )),
        CommitteeRotation::Declined {
            stake_participation_bps,
        } => response
            .add_attribute("committee_rotation", "declined")
            .add_attribute("stake_participation_bps", stake_participation_bps.to_string()),
    })
}
