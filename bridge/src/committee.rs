//! Bridge committee registry and signature verification
//!
//! The committee is a weighted signer set derived from validator stake.
//! Validators declare their bridge key with [`register`]; at each epoch
//! boundary [`try_create_next_committee`] folds those registrations against
//! the stake snapshot and, if enough stake participates, replaces the
//! committee in one write.
//!
//! [`verify_signatures`] is the authentication gate for every bridge message:
//! it sums the voting power of distinct, non-blocklisted signers and compares
//! it to the threshold for the message type.

use std::collections::BTreeSet;

use common::message::{BlocklistPayload, EMERGENCY_OP_PAUSE, EMERGENCY_OP_UNPAUSE};
use common::{BridgeMessage, MessageType};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Api, Binary, Order, StdResult, Storage};
use cw_storage_plus::{Item, Map};

use crate::crypto::{eth_address, recover_pubkey, validate_pubkey};
use crate::error::ContractError;
use crate::hash::message_digest;

/// Basis point denominator for voting power and participation
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Genesis thresholds (bps) per message type
pub const DEFAULT_THRESHOLDS: [(MessageType, u64); 4] = [
    (MessageType::TokenTransfer, 3334),
    (MessageType::CommitteeBlocklist, 5001),
    (MessageType::UpdateBridgeLimit, 5001),
    (MessageType::UpdateAssetPrice, 5001),
];

/// Genesis thresholds (bps) per emergency op
pub const DEFAULT_EMERGENCY_THRESHOLDS: [(u8, u64); 2] =
    [(EMERGENCY_OP_PAUSE, 450), (EMERGENCY_OP_UNPAUSE, 5001)];

// ============================================================================
// Stake Snapshot
// ============================================================================

/// Stake view of the host chain's active validator set.
pub trait StakeSnapshot {
    fn active_validator_addresses(&self) -> Vec<Addr>;

    fn total_stake_amount(&self) -> u128;

    /// `None` when `address` is not an active validator.
    fn validator_stake_amount(&self, address: &Addr) -> Option<u64>;

    fn is_active_validator(&self, address: &Addr) -> bool {
        self.validator_stake_amount(address).is_some()
    }
}

// ============================================================================
// Types & Storage
// ============================================================================

#[cw_serde]
pub struct CommitteeMember {
    /// Validator that owns this committee seat
    pub validator_address: Addr,
    /// 33-byte compressed secp256k1 key
    pub bridge_pubkey_bytes: Binary,
    /// Stake-derived weight out of 10000
    pub voting_power: u64,
    pub http_rest_url: String,
    /// Blocklisted members stay in the committee but carry no weight
    pub blocklisted: bool,
}

#[cw_serde]
pub struct CommitteeMemberRegistration {
    pub validator_address: Addr,
    pub bridge_pubkey_bytes: Binary,
    pub http_rest_url: String,
}

/// Outcome of an epoch-boundary committee rotation.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitteeRotation {
    Committed {
        members: Vec<CommitteeMember>,
        stake_participation_bps: u64,
    },
    Declined {
        stake_participation_bps: u64,
    },
}

/// Committee members keyed by compressed pubkey
pub const COMMITTEE_MEMBERS: Map<&[u8], CommitteeMember> = Map::new("committee_members");

/// Pending registrations keyed by validator address
pub const MEMBER_REGISTRATIONS: Map<&Addr, CommitteeMemberRegistration> =
    Map::new("member_registrations");

/// Minimum aggregate voting power (bps) per message type
pub const THRESHOLDS: Map<u8, u64> = Map::new("thresholds");

/// Emergency op thresholds keyed by op type
pub const EMERGENCY_THRESHOLDS: Map<u8, u64> = Map::new("emergency_thresholds");

pub const LAST_COMMITTEE_UPDATE_EPOCH: Item<u64> = Item::new("last_committee_update_epoch");

/// Store genesis thresholds.
pub fn initialize_thresholds(storage: &mut dyn Storage) -> StdResult<()> {
    for (message_type, threshold) in DEFAULT_THRESHOLDS {
        THRESHOLDS.save(storage, message_type.as_u8(), &threshold)?;
    }
    for (op_type, threshold) in DEFAULT_EMERGENCY_THRESHOLDS {
        EMERGENCY_THRESHOLDS.save(storage, op_type, &threshold)?;
    }
    Ok(())
}

// ============================================================================
// Registration
// ============================================================================

/// Declare (or re-declare) `owner`'s bridge key for the next committee.
pub fn register(
    storage: &mut dyn Storage,
    snapshot: &impl StakeSnapshot,
    owner: &Addr,
    bridge_pubkey_bytes: &[u8],
    http_rest_url: String,
) -> Result<CommitteeMemberRegistration, ContractError> {
    if !snapshot.is_active_validator(owner) {
        return Err(ContractError::NotActiveValidator);
    }
    validate_pubkey(bridge_pubkey_bytes)?;

    // One key per seat: another owner may not claim the same pubkey
    let taken = MEMBER_REGISTRATIONS
        .range(storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<_>>>()?
        .into_iter()
        .any(|(addr, reg)| {
            &addr != owner && reg.bridge_pubkey_bytes.as_slice() == bridge_pubkey_bytes
        });
    if taken {
        return Err(ContractError::DuplicatePubkey);
    }

    let registration = CommitteeMemberRegistration {
        validator_address: owner.clone(),
        bridge_pubkey_bytes: Binary::from(bridge_pubkey_bytes),
        http_rest_url,
    };
    MEMBER_REGISTRATIONS.save(storage, owner, &registration)?;
    Ok(registration)
}

// ============================================================================
// Rotation
// ============================================================================

/// Build the next committee from pending registrations.
///
/// Declines without error when total stake is zero or participating stake
/// is below `min_stake_participation_bps`; the committee and registrations
/// are then left untouched.
pub fn try_create_next_committee(
    storage: &mut dyn Storage,
    snapshot: &impl StakeSnapshot,
    min_stake_participation_bps: u64,
    epoch: u64,
) -> StdResult<CommitteeRotation> {
    let total_stake = snapshot.total_stake_amount();
    if total_stake == 0 {
        return Ok(CommitteeRotation::Declined {
            stake_participation_bps: 0,
        });
    }

    let registrations = MEMBER_REGISTRATIONS
        .range(storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, reg)| reg))
        .collect::<StdResult<Vec<_>>>()?;

    let mut participating_stake: u128 = 0;
    let mut candidates = Vec::with_capacity(registrations.len());
    for registration in registrations {
        let Some(stake) = snapshot.validator_stake_amount(&registration.validator_address) else {
            continue;
        };
        let voting_power = (stake as u128 * BPS_DENOMINATOR / total_stake) as u64;
        participating_stake += stake as u128;
        candidates.push(CommitteeMember {
            validator_address: registration.validator_address,
            bridge_pubkey_bytes: registration.bridge_pubkey_bytes,
            voting_power,
            http_rest_url: registration.http_rest_url,
            blocklisted: false,
        });
    }

    let stake_participation_bps =
        u64::try_from(participating_stake * BPS_DENOMINATOR / total_stake).unwrap_or(u64::MAX);
    if stake_participation_bps < min_stake_participation_bps {
        return Ok(CommitteeRotation::Declined {
            stake_participation_bps,
        });
    }

    let old_keys = COMMITTEE_MEMBERS
        .keys(storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<_>>>()?;
    for key in old_keys {
        COMMITTEE_MEMBERS.remove(storage, &key);
    }
    for member in &candidates {
        COMMITTEE_MEMBERS.save(storage, member.bridge_pubkey_bytes.as_slice(), member)?;
    }
    MEMBER_REGISTRATIONS.clear(storage);
    LAST_COMMITTEE_UPDATE_EPOCH.save(storage, &epoch)?;

    Ok(CommitteeRotation::Committed {
        members: candidates,
        stake_participation_bps,
    })
}

// ============================================================================
// Signature Verification
// ============================================================================

/// Fail unless `signatures` carry enough committee weight for `message`.
pub fn verify_signatures(
    storage: &dyn Storage,
    api: &dyn Api,
    message: &BridgeMessage,
    signatures: &[Binary],
) -> Result<(), ContractError> {
    let required = required_threshold(storage, message)?;

    let digest = message_digest(message);
    let mut seen = BTreeSet::new();
    let mut weight: u64 = 0;

    for signature in signatures {
        let pubkey = recover_pubkey(api, &digest, signature.as_slice())?;
        if seen.contains(&pubkey) {
            return Err(ContractError::DuplicateSignature);
        }
        let member = COMMITTEE_MEMBERS
            .may_load(storage, &pubkey)?
            .ok_or(ContractError::UnknownSigner)?;
        if !member.blocklisted {
            weight = weight.saturating_add(member.voting_power);
        }
        seen.insert(pubkey);
    }

    if weight < required {
        return Err(ContractError::InsufficientSignatureWeight {
            got: weight,
            required,
        });
    }
    Ok(())
}

/// Threshold for `message`. Emergency ops are priced per op type.
fn required_threshold(
    storage: &dyn Storage,
    message: &BridgeMessage,
) -> Result<u64, ContractError> {
    let unknown = || ContractError::UnknownMessageType {
        message_type: message.message_type,
    };
    if message.message_type == MessageType::EmergencyOp.as_u8() {
        let op = message.extract_emergency_op_payload()?;
        return EMERGENCY_THRESHOLDS
            .may_load(storage, op.op_type)?
            .ok_or_else(unknown);
    }
    THRESHOLDS
        .may_load(storage, message.message_type)?
        .ok_or_else(unknown)
}

// ============================================================================
// Blocklist
// ============================================================================

/// Apply a blocklist action to the members behind the given EVM addresses.
///
/// Every address must resolve to a member before any flag is written.
/// Returns the affected pubkeys.
pub fn execute_blocklist(
    storage: &mut dyn Storage,
    blocklist: &BlocklistPayload,
) -> Result<Vec<Binary>, ContractError> {
    let members = COMMITTEE_MEMBERS
        .range(storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, member)| member))
        .collect::<StdResult<Vec<_>>>()?;

    let mut addressed = Vec::with_capacity(members.len());
    for member in members {
        let address = eth_address(member.bridge_pubkey_bytes.as_slice())?;
        addressed.push((address, member));
    }

    let mut targets: Vec<usize> = Vec::with_capacity(blocklist.validator_eth_addresses.len());
    for target in &blocklist.validator_eth_addresses {
        let index = addressed
            .iter()
            .position(|(address, _)| address == target)
            .ok_or_else(|| ContractError::UnknownValidatorInBlocklist {
                address: format!("0x{}", hex::encode(target)),
            })?;
        if !targets.contains(&index) {
            targets.push(index);
        }
    }

    let blocklisted = !blocklist.is_unblock();
    let mut public_keys = Vec::with_capacity(targets.len());
    for index in targets {
        let member = &mut addressed[index].1;
        member.blocklisted = blocklisted;
        COMMITTEE_MEMBERS.save(storage, member.bridge_pubkey_bytes.as_slice(), member)?;
        public_keys.push(member.bridge_pubkey_bytes.clone());
    }
    Ok(public_keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::test_keys::{compressed_pubkey, sign};
    use crate::state::{ValidatorSet, ValidatorStake};
    use common::chain_ids::TERRA_TESTNET;
    use common::message::{
        create_blocklist_message, create_emergency_op_message, create_update_asset_price_message,
        BLOCKLIST_TYPE_BLOCK, BLOCKLIST_TYPE_UNBLOCK,
    };
    use common::MessageError;
    use cosmwasm_std::testing::mock_dependencies;
    use cosmwasm_std::Uint64;

    fn snapshot(stakes: &[(&str, u64)]) -> ValidatorSet {
        ValidatorSet {
            epoch: 0,
            validators: stakes
                .iter()
                .map(|(addr, stake)| ValidatorStake {
                    address: Addr::unchecked(*addr),
                    stake: Uint64::new(*stake),
                })
                .collect(),
        }
    }

    fn price_message(seq_num: u64) -> BridgeMessage {
        create_update_asset_price_message(2, TERRA_TESTNET, seq_num, 3_000 * 10_000)
    }

    /// Register `seeds[i]` for validator `terra1val{i}` and rotate.
    fn setup_committee(storage: &mut dyn Storage, stakes: &[(&str, u64)], seeds: &[u8]) {
        let set = snapshot(stakes);
        for ((addr, _), seed) in stakes.iter().zip(seeds) {
            register(
                storage,
                &set,
                &Addr::unchecked(*addr),
                &compressed_pubkey(*seed),
                format!("https://{addr}.example"),
            )
            .unwrap();
        }
        let rotation = try_create_next_committee(storage, &set, 0, 1).unwrap();
        assert!(matches!(rotation, CommitteeRotation::Committed { .. }));
        initialize_thresholds(storage).unwrap();
    }

    #[test]
    fn test_register_requires_active_validator() {
        let mut deps = mock_dependencies();
        let set = snapshot(&[("terra1val1", 100)]);

        let err = register(
            deps.as_mut().storage,
            &set,
            &Addr::unchecked("terra1stranger"),
            &compressed_pubkey(1),
            String::new(),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::NotActiveValidator);
    }

    #[test]
    fn test_register_validates_pubkey() {
        let mut deps = mock_dependencies();
        let set = snapshot(&[("terra1val1", 100), ("terra1val2", 100)]);
        let val1 = Addr::unchecked("terra1val1");
        let val2 = Addr::unchecked("terra1val2");

        let err =
            register(deps.as_mut().storage, &set, &val1, &[2u8; 20], String::new()).unwrap_err();
        assert_eq!(err, ContractError::InvalidPubkeyLength { got: 20 });

        register(deps.as_mut().storage, &set, &val1, &compressed_pubkey(1), String::new()).unwrap();
        let err = register(deps.as_mut().storage, &set, &val2, &compressed_pubkey(1), String::new())
            .unwrap_err();
        assert_eq!(err, ContractError::DuplicatePubkey);
    }

    #[test]
    fn test_register_overwrites() {
        let mut deps = mock_dependencies();
        let set = snapshot(&[("terra1val1", 100)]);
        let val1 = Addr::unchecked("terra1val1");

        let storage = deps.as_mut().storage;
        register(storage, &set, &val1, &compressed_pubkey(1), "a".to_string()).unwrap();
        // Re-using one's own key is fine
        register(storage, &set, &val1, &compressed_pubkey(1), "b".to_string()).unwrap();
        register(storage, &set, &val1, &compressed_pubkey(2), "c".to_string()).unwrap();

        let reg = MEMBER_REGISTRATIONS.load(deps.as_ref().storage, &val1).unwrap();
        assert_eq!(reg.bridge_pubkey_bytes.as_slice(), compressed_pubkey(2).as_slice());
        assert_eq!(reg.http_rest_url, "c");
    }

    #[test]
    fn test_end_to_end_committee() {
        let mut deps = mock_dependencies();
        let set = snapshot(&[("terra1val1", 100), ("terra1val2", 100)]);
        for (addr, seed) in [("terra1val1", 1u8), ("terra1val2", 2u8)] {
            register(
                deps.as_mut().storage,
                &set,
                &Addr::unchecked(addr),
                &compressed_pubkey(seed),
                String::new(),
            )
            .unwrap();
        }

        let rotation = try_create_next_committee(deps.as_mut().storage, &set, 6000, 5).unwrap();
        let CommitteeRotation::Committed {
            members,
            stake_participation_bps,
        } = rotation
        else {
            panic!("committee should rotate");
        };
        assert_eq!(stake_participation_bps, 10_000);
        assert_eq!(members.len(), 2);
        assert!(members.iter().all(|m| m.voting_power == 5000 && !m.blocklisted));
        assert!(MEMBER_REGISTRATIONS.is_empty(deps.as_ref().storage));
        assert_eq!(LAST_COMMITTEE_UPDATE_EPOCH.load(deps.as_ref().storage).unwrap(), 5);

        let message = price_message(0);
        let api = deps.api;

        THRESHOLDS.save(deps.as_mut().storage, message.message_type, &5000).unwrap();
        verify_signatures(deps.as_ref().storage, &api, &message, &[sign(1, &message)]).unwrap();
        verify_signatures(deps.as_ref().storage, &api, &message, &[sign(2, &message)]).unwrap();

        THRESHOLDS.save(deps.as_mut().storage, message.message_type, &6000).unwrap();
        for seed in [1u8, 2u8] {
            let signatures = [sign(seed, &message)];
            let err = verify_signatures(deps.as_ref().storage, &api, &message, &signatures)
                .unwrap_err();
            assert_eq!(
                err,
                ContractError::InsufficientSignatureWeight {
                    got: 5000,
                    required: 6000,
                }
            );
        }
        verify_signatures(
            deps.as_ref().storage,
            &api,
            &message,
            &[sign(1, &message), sign(2, &message)],
        )
        .unwrap();
    }

    #[test]
    fn test_voting_power_truncates() {
        let mut deps = mock_dependencies();
        setup_committee(
            deps.as_mut().storage,
            &[("terra1val1", 1), ("terra1val2", 1), ("terra1val3", 1)],
            &[1, 2, 3],
        );
        let powers: Vec<u64> = COMMITTEE_MEMBERS
            .range(deps.as_ref().storage, None, None, Order::Ascending)
            .map(|item| item.unwrap().1.voting_power)
            .collect();
        // 10000 / 3 with dust left over
        assert_eq!(powers, vec![3333, 3333, 3333]);
    }

    #[test]
    fn test_rotation_below_participation_declines() {
        let mut deps = mock_dependencies();
        let set = snapshot(&[("terra1val1", 100), ("terra1val2", 100)]);
        let val1 = Addr::unchecked("terra1val1");
        register(deps.as_mut().storage, &set, &val1, &compressed_pubkey(1), String::new()).unwrap();

        let rotation = try_create_next_committee(deps.as_mut().storage, &set, 6000, 1).unwrap();
        assert_eq!(
            rotation,
            CommitteeRotation::Declined {
                stake_participation_bps: 5000
            }
        );
        // Committee stays empty, registration survives for a retry
        assert!(COMMITTEE_MEMBERS.is_empty(deps.as_ref().storage));
        assert!(MEMBER_REGISTRATIONS.has(deps.as_ref().storage, &val1));
        assert!(LAST_COMMITTEE_UPDATE_EPOCH
            .may_load(deps.as_ref().storage)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_rotation_skips_departed_validators() {
        let mut deps = mock_dependencies();
        let before = snapshot(&[("terra1val1", 100), ("terra1val2", 100)]);
        for (addr, seed) in [("terra1val1", 1u8), ("terra1val2", 2u8)] {
            register(
                deps.as_mut().storage,
                &before,
                &Addr::unchecked(addr),
                &compressed_pubkey(seed),
                String::new(),
            )
            .unwrap();
        }

        // terra1val2 left the active set before the epoch boundary
        let after = snapshot(&[("terra1val1", 300), ("terra1val3", 100)]);
        let rotation = try_create_next_committee(deps.as_mut().storage, &after, 7000, 2).unwrap();
        let CommitteeRotation::Committed { members, .. } = rotation else {
            panic!("committee should rotate");
        };
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].validator_address, Addr::unchecked("terra1val1"));
        assert_eq!(members[0].voting_power, 7500);
    }

    #[test]
    fn test_rotation_with_zero_stake_declines() {
        let mut deps = mock_dependencies();
        let set = snapshot(&[("terra1val1", 0)]);
        register(
            deps.as_mut().storage,
            &set,
            &Addr::unchecked("terra1val1"),
            &compressed_pubkey(1),
            String::new(),
        )
        .unwrap();
        let rotation = try_create_next_committee(deps.as_mut().storage, &set, 0, 1).unwrap();
        assert_eq!(
            rotation,
            CommitteeRotation::Declined {
                stake_participation_bps: 0
            }
        );
    }

    #[test]
    fn test_rotation_replaces_members() {
        let mut deps = mock_dependencies();
        setup_committee(deps.as_mut().storage, &[("terra1val1", 100)], &[1]);

        let set = snapshot(&[("terra1val1", 100)]);
        register(
            deps.as_mut().storage,
            &set,
            &Addr::unchecked("terra1val1"),
            &compressed_pubkey(9),
            String::new(),
        )
        .unwrap();
        try_create_next_committee(deps.as_mut().storage, &set, 0, 2).unwrap();

        assert!(!COMMITTEE_MEMBERS.has(deps.as_ref().storage, &compressed_pubkey(1)));
        assert!(COMMITTEE_MEMBERS.has(deps.as_ref().storage, &compressed_pubkey(9)));
    }

    #[test]
    fn test_duplicate_signature() {
        let mut deps = mock_dependencies();
        setup_committee(
            deps.as_mut().storage,
            &[("terra1val1", 100), ("terra1val2", 100)],
            &[1, 2],
        );
        let api = deps.api;
        let message = price_message(0);

        let err = verify_signatures(
            deps.as_ref().storage,
            &api,
            &message,
            &[sign(1, &message), sign(2, &message), sign(1, &message)],
        )
        .unwrap_err();
        assert_eq!(err, ContractError::DuplicateSignature);

        // A non-member fails at its first signature, before a duplicate is seen
        let err = verify_signatures(
            deps.as_ref().storage,
            &api,
            &message,
            &[sign(5, &message), sign(5, &message)],
        )
        .unwrap_err();
        assert_eq!(err, ContractError::UnknownSigner);
    }

    #[test]
    fn test_unknown_message_type() {
        let mut deps = mock_dependencies();
        setup_committee(deps.as_mut().storage, &[("terra1val1", 100)], &[1]);
        let api = deps.api;

        let mut message = price_message(0);
        message.message_type = 7;
        let err = verify_signatures(deps.as_ref().storage, &api, &message, &[sign(1, &message)])
            .unwrap_err();
        assert_eq!(err, ContractError::UnknownMessageType { message_type: 7 });
    }

    #[test]
    fn test_blocklisted_weight_excluded() {
        let mut deps = mock_dependencies();
        setup_committee(
            deps.as_mut().storage,
            &[("terra1val1", 100), ("terra1val2", 100)],
            &[1, 2],
        );
        let api = deps.api;

        let target = eth_address(&compressed_pubkey(2)).unwrap();
        let blocklist = create_blocklist_message(TERRA_TESTNET, 0, BLOCKLIST_TYPE_BLOCK, &[target])
            .unwrap()
            .extract_blocklist_payload()
            .unwrap();
        let affected = execute_blocklist(deps.as_mut().storage, &blocklist).unwrap();
        assert_eq!(affected, vec![Binary::from(compressed_pubkey(2).to_vec())]);

        let message = price_message(0);
        THRESHOLDS.save(deps.as_mut().storage, message.message_type, &6000).unwrap();
        let err = verify_signatures(
            deps.as_ref().storage,
            &api,
            &message,
            &[sign(1, &message), sign(2, &message)],
        )
        .unwrap_err();
        assert_eq!(err, ContractError::InsufficientSignatureWeight { got: 5000, required: 6000 });

        // Unblocking restores the weight
        let unblock = create_blocklist_message(TERRA_TESTNET, 1, BLOCKLIST_TYPE_UNBLOCK, &[target])
            .unwrap()
            .extract_blocklist_payload()
            .unwrap();
        execute_blocklist(deps.as_mut().storage, &unblock).unwrap();
        verify_signatures(
            deps.as_ref().storage,
            &api,
            &message,
            &[sign(1, &message), sign(2, &message)],
        )
        .unwrap();
    }

    #[test]
    fn test_blocklist_unknown_address_is_atomic() {
        let mut deps = mock_dependencies();
        setup_committee(
            deps.as_mut().storage,
            &[("terra1val1", 100), ("terra1val2", 100)],
            &[1, 2],
        );

        let known = eth_address(&compressed_pubkey(1)).unwrap();
        let unknown = [0x11u8; 20];
        let blocklist =
            create_blocklist_message(TERRA_TESTNET, 0, BLOCKLIST_TYPE_BLOCK, &[known, unknown])
                .unwrap()
                .extract_blocklist_payload()
                .unwrap();

        let err = execute_blocklist(deps.as_mut().storage, &blocklist).unwrap_err();
        assert_eq!(
            err,
            ContractError::UnknownValidatorInBlocklist {
                address: format!("0x{}", hex::encode(unknown)),
            }
        );

        let member = COMMITTEE_MEMBERS
            .load(deps.as_ref().storage, &compressed_pubkey(1))
            .unwrap();
        assert!(!member.blocklisted);
    }

    #[test]
    fn test_emergency_op_thresholds_by_op_type() {
        let mut deps = mock_dependencies();
        setup_committee(
            deps.as_mut().storage,
            &[("terra1val1", 5), ("terra1val2", 95)],
            &[1, 2],
        );
        let api = deps.api;

        // 500 bps clears the pause threshold but not the unpause one
        let pause = create_emergency_op_message(TERRA_TESTNET, 0, EMERGENCY_OP_PAUSE);
        verify_signatures(deps.as_ref().storage, &api, &pause, &[sign(1, &pause)]).unwrap();

        let unpause = create_emergency_op_message(TERRA_TESTNET, 0, EMERGENCY_OP_UNPAUSE);
        let err =
            verify_signatures(deps.as_ref().storage, &api, &unpause, &[sign(1, &unpause)])
                .unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientSignatureWeight {
                got: 500,
                required: 5001,
            }
        );
        verify_signatures(deps.as_ref().storage, &api, &unpause, &[sign(2, &unpause)]).unwrap();

        let bogus = create_emergency_op_message(TERRA_TESTNET, 0, 9);
        let err =
            verify_signatures(deps.as_ref().storage, &api, &bogus, &[sign(2, &bogus)]).unwrap_err();
        assert_eq!(
            err,
            ContractError::Message(MessageError::InvalidEmergencyOpType { op_type: 9 })
        );
    }
}
