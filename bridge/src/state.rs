//! State definitions for the CL8Y committee bridge contract
//!
//! Contract-wide configuration, the validator stake snapshot pushed by the
//! host chain, and the bridge transfer records. Committee, limiter, and
//! treasury storage live with the modules that own them.

use common::BridgeMessage;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, StdResult, Storage, Uint64};
use cw_storage_plus::{Item, Map};

use crate::committee::StakeSnapshot;

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:cl8y-committee-bridge";
/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address for token registration
    pub admin: Addr,
    /// Bridge chain id of the chain this contract is deployed on
    pub chain_id: u8,
    /// Minimum stake participation (bps) required to rotate the committee
    pub min_stake_participation_bps: u64,
    /// Set by a committee emergency op; blocks sends, approvals, and claims
    #[serde(default)]
    pub paused: bool,
}

// ============================================================================
// Stake Snapshot
// ============================================================================

/// Stake of a single active validator
#[cw_serde]
pub struct ValidatorStake {
    pub address: Addr,
    pub stake: Uint64,
}

/// Active validator set as of the last epoch boundary
#[cw_serde]
#[derive(Default)]
pub struct ValidatorSet {
    pub epoch: u64,
    pub validators: Vec<ValidatorStake>,
}

impl StakeSnapshot for ValidatorSet {
    fn active_validator_addresses(&self) -> Vec<Addr> {
        self.validators.iter().map(|v| v.address.clone()).collect()
    }

    fn total_stake_amount(&self) -> u128 {
        self.validators.iter().map(|v| v.stake.u64() as u128).sum()
    }

    fn validator_stake_amount(&self, address: &Addr) -> Option<u64> {
        self.validators
            .iter()
            .find(|v| &v.address == address)
            .map(|v| v.stake.u64())
    }
}

// ============================================================================
// Bridge Records
// ============================================================================

/// A token transfer known to this chain, outgoing or incoming.
#[cw_serde]
pub struct BridgeRecord {
    pub message: BridgeMessage,
    /// Committee signatures, set once the transfer is approved
    pub verified_signatures: Option<Vec<Binary>>,
    pub claimed: bool,
}

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

pub const STAKE_SNAPSHOT: Item<ValidatorSet> = Item::new("stake_snapshot");

/// Transfer records keyed by (source_chain, message_type, seq_num)
pub const BRIDGE_RECORDS: Map<(u8, u8, u64), BridgeRecord> = Map::new("bridge_records");

/// Next sequence number per message type
pub const SEQUENCE_NUMS: Map<u8, u64> = Map::new("sequence_nums");

/// Current sequence number for `message_type`, advancing the counter.
pub fn get_and_increment_sequence_number(
    storage: &mut dyn Storage,
    message_type: u8,
) -> StdResult<u64> {
    let seq_num = SEQUENCE_NUMS
        .may_load(storage, message_type)?
        .unwrap_or_default();
    SEQUENCE_NUMS.save(storage, message_type, &(seq_num + 1))?;
    Ok(seq_num)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_dependencies;

    #[test]
    fn test_sequence_numbers_per_type() {
        let mut deps = mock_dependencies();
        let storage = deps.as_mut().storage;
        assert_eq!(get_and_increment_sequence_number(storage, 0).unwrap(), 0);
        assert_eq!(get_and_increment_sequence_number(storage, 0).unwrap(), 1);
        assert_eq!(get_and_increment_sequence_number(storage, 3).unwrap(), 0);
        assert_eq!(SEQUENCE_NUMS.load(storage, 0).unwrap(), 2);
    }

    #[test]
    fn test_validator_set_snapshot() {
        let set = ValidatorSet {
            epoch: 1,
            validators: vec![
                ValidatorStake {
                    address: Addr::unchecked("terra1val1"),
                    stake: Uint64::new(u64::MAX),
                },
                ValidatorStake {
                    address: Addr::unchecked("terra1val2"),
                    stake: Uint64::new(u64::MAX),
                },
            ],
        };

        // Sum does not overflow thanks to u128 widening
        assert_eq!(set.total_stake_amount(), 2 * u64::MAX as u128);
        assert_eq!(
            set.validator_stake_amount(&Addr::unchecked("terra1val1")),
            Some(u64::MAX)
        );
        assert_eq!(set.validator_stake_amount(&Addr::unchecked("terra1nobody")), None);
        assert_eq!(set.active_validator_addresses().len(), 2);
    }
}
