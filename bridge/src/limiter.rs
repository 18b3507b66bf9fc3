//! Rolling 24-hour USD transfer limiter
//!
//! Every directed route carries a USD notional cap over a sliding window of
//! 24 hourly buckets. USD values are fixed point, scaled by
//! [`USD_VALUE_MULTIPLIER`] (`10_000` = $1.00).
//!
//! Amounts are compared in native token units: the stored window total and
//! the route limit are scaled up by `10^decimals` instead of scaling each
//! transfer down, so small transfers are not rounded away before comparison.
//! All intermediate products are `u128`.

use std::collections::VecDeque;

use common::chain_ids::{
    get_route, ETH_LOCAL_TEST, ETH_MAINNET, ETH_SEPOLIA, TERRA_DEVNET, TERRA_LOCAL_TEST,
    TERRA_MAINNET, TERRA_TESTNET,
};
use common::BridgeRoute;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Event, StdResult, Storage};
use cw_storage_plus::Map;

use crate::error::ContractError;
use crate::events;
use crate::treasury::{self, TokenDescriptor};

/// Fixed-point scale for USD values
pub const USD_VALUE_MULTIPLIER: u64 = 10_000;

/// Sentinel for an effectively unlimited route
pub const MAX_TRANSFER_LIMIT: u64 = u64::MAX;

/// Number of hourly buckets in the window
pub const WINDOW_HOURS: u64 = 24;

const SECONDS_PER_HOUR: u64 = 3600;

// ============================================================================
// Storage
// ============================================================================

/// USD cap per route, keyed by (sending_chain, receiving_chain)
pub const TRANSFER_LIMITS: Map<(u8, u8), u64> = Map::new("transfer_limits");

/// USD price of one whole token, keyed by token id
pub const NOTIONAL_VALUES: Map<u8, u64> = Map::new("notional_values");

/// Rolling window per route
pub const TRANSFER_RECORDS: Map<(u8, u8), TransferRecord> = Map::new("transfer_records");

// ============================================================================
// Transfer Record
// ============================================================================

/// Hourly USD-notional buckets for one route.
///
/// When non-empty, `per_hour_amounts` holds one bucket per hour from
/// `hour_tail` to `hour_head` inclusive (front is oldest) and
/// `total_amount` is their sum.
#[cw_serde]
#[derive(Default)]
pub struct TransferRecord {
    pub hour_head: u64,
    pub hour_tail: u64,
    pub per_hour_amounts: VecDeque<u64>,
    pub total_amount: u64,
}

impl TransferRecord {
    /// Slide the window so `hour_head == current_hour`, evicting buckets
    /// older than 24 hours.
    pub fn adjust_transfer_records(&mut self, current_hour: u64) {
        if self.hour_head == current_hour && !self.per_hour_amounts.is_empty() {
            return;
        }

        let target_tail = current_hour.saturating_sub(WINDOW_HOURS - 1);

        if self.per_hour_amounts.is_empty() || self.hour_head < target_tail {
            // Whole window is stale
            self.per_hour_amounts.clear();
            self.total_amount = 0;
            self.hour_tail = target_tail;
            self.hour_head = target_tail;
            self.per_hour_amounts.push_back(0);
        } else {
            while self.hour_tail < target_tail {
                if let Some(evicted) = self.per_hour_amounts.pop_front() {
                    self.total_amount -= evicted;
                }
                self.hour_tail += 1;
            }
        }

        while self.hour_head < current_hour {
            self.per_hour_amounts.push_back(0);
            self.hour_head += 1;
        }
    }

    fn record(&mut self, amount: u64) {
        if let Some(current) = self.per_hour_amounts.back_mut() {
            *current += amount;
        }
        self.total_amount += amount;
    }
}

/// Bucket index of a block time.
pub fn current_hour_since_epoch(block_seconds: u64) -> u64 {
    block_seconds / SECONDS_PER_HOUR
}

fn load_route_limit(storage: &dyn Storage, route: &BridgeRoute) -> Result<u64, ContractError> {
    TRANSFER_LIMITS
        .may_load(storage, route.key())?
        .ok_or(ContractError::NoLimitConfiguredForRoute {
            sending_chain: route.source,
            receiving_chain: route.destination,
        })
}

// ============================================================================
// Check & Record
// ============================================================================

/// Record `amount` of `token` against `route` if it fits under the cap.
///
/// Returns `false` without writing anything when the transfer would exceed
/// the rolling limit.
pub fn check_and_record_sending_transfer(
    storage: &mut dyn Storage,
    route: &BridgeRoute,
    token: &TokenDescriptor,
    current_hour: u64,
    amount: u64,
) -> Result<bool, ContractError> {
    let mut record = TRANSFER_RECORDS
        .may_load(storage, route.key())?
        .unwrap_or_default();
    record.adjust_transfer_records(current_hour);

    let route_limit = load_route_limit(storage, route)?;
    let notional_price = NOTIONAL_VALUES
        .may_load(storage, token.token_id)?
        .ok_or(ContractError::AssetPriceNotFound {
            token_id: token.token_id,
        })?;

    let token_multiplier = 10u128.pow(token.decimals as u32);
    let notional_with_multiplier = notional_price as u128 * amount as u128;
    let total_with_multiplier = record.total_amount as u128 * token_multiplier;
    let limit_with_multiplier = route_limit as u128 * token_multiplier;

    let Some(new_total) = total_with_multiplier.checked_add(notional_with_multiplier) else {
        return Ok(false);
    };
    if new_total > limit_with_multiplier {
        return Ok(false);
    }

    // Bounded by the route limit, so it fits in u64
    let notional = u64::try_from(notional_with_multiplier / token_multiplier).map_err(|_| {
        ContractError::InvalidAmount {
            reason: "notional value overflow".to_string(),
        }
    })?;
    record.record(notional);
    TRANSFER_RECORDS.save(storage, route.key(), &record)?;

    Ok(true)
}

// ============================================================================
// Governance Updates
// ============================================================================

pub fn update_route_limit(
    storage: &mut dyn Storage,
    sending_chain: u8,
    receiving_chain: u8,
    new_limit: u64,
) -> Result<Event, ContractError> {
    let route =
        get_route(sending_chain, receiving_chain).ok_or(ContractError::InvalidBridgeRoute {
            source_chain: sending_chain,
            destination_chain: receiving_chain,
        })?;
    TRANSFER_LIMITS.save(storage, route.key(), &new_limit)?;
    Ok(events::update_route_limit(
        sending_chain,
        receiving_chain,
        new_limit,
    ))
}

pub fn update_asset_notional_price(
    storage: &mut dyn Storage,
    token_id: u8,
    new_price: u64,
) -> Result<Event, ContractError> {
    if new_price == 0 {
        return Err(ContractError::InvalidNotionalValue);
    }
    treasury::token(storage, token_id)?;
    NOTIONAL_VALUES.save(storage, token_id, &new_price)?;
    Ok(events::update_asset_price(token_id, new_price))
}

// ============================================================================
// Genesis
// ============================================================================

/// Genesis route limits into the Terra side.
pub fn initial_transfer_limits() -> Vec<(BridgeRoute, u64)> {
    let mut limits = vec![(
        BridgeRoute {
            source: ETH_MAINNET,
            destination: TERRA_MAINNET,
        },
        5_000_000 * USD_VALUE_MULTIPLIER,
    )];
    for destination in [TERRA_TESTNET, TERRA_DEVNET, TERRA_LOCAL_TEST] {
        for source in [ETH_SEPOLIA, ETH_LOCAL_TEST] {
            limits.push((
                BridgeRoute {
                    source,
                    destination,
                },
                MAX_TRANSFER_LIMIT,
            ));
        }
    }
    limits
}

/// Genesis USD prices keyed by token id: BTC, ETH, USDC, USDT.
pub fn initial_notional_values() -> Vec<(u8, u64)> {
    vec![
        (1, 50_000 * USD_VALUE_MULTIPLIER),
        (2, 3_000 * USD_VALUE_MULTIPLIER),
        (3, USD_VALUE_MULTIPLIER),
        (4, USD_VALUE_MULTIPLIER),
    ]
}

pub fn initialize_limiter(storage: &mut dyn Storage) -> StdResult<()> {
    for (route, limit) in initial_transfer_limits() {
        TRANSFER_LIMITS.save(storage, route.key(), &limit)?;
    }
    for (token_id, price) in initial_notional_values() {
        NOTIONAL_VALUES.save(storage, token_id, &price)?;
    }
    Ok(())
}
