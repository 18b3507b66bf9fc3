//! Typed events emitted by the bridge
//!
//! Events are the bridge's observable side effects. Off-chain committee
//! nodes index them by type, so the type names and attribute keys here are
//! part of the contract's interface.

use common::BridgeMessageKey;
use cosmwasm_std::{Addr, Binary, Event};

fn hex0x(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn with_key(event: Event, key: &BridgeMessageKey) -> Event {
    event
        .add_attribute("source_chain", key.source_chain.to_string())
        .add_attribute("message_type", key.message_type.to_string())
        .add_attribute("seq_num", key.seq_num.to_string())
}

// ============================================================================
// Committee
// ============================================================================

pub fn blocklist_validator(blocklisted: bool, public_keys: &[Binary]) -> Event {
    let keys: Vec<String> = public_keys.iter().map(|k| hex0x(k)).collect();
    Event::new("blocklist_validator")
        .add_attribute("blocklisted", blocklisted.to_string())
        .add_attribute("public_keys", keys.join(","))
}

pub fn committee_update(member_count: usize, stake_participation_bps: u64, epoch: u64) -> Event {
    Event::new("committee_update")
        .add_attribute("members", member_count.to_string())
        .add_attribute("stake_participation_bps", stake_participation_bps.to_string())
        .add_attribute("epoch", epoch.to_string())
}

pub fn committee_member_registration(
    owner: &Addr,
    bridge_pubkey: &[u8],
    http_rest_url: &str,
) -> Event {
    Event::new("committee_member_registration")
        .add_attribute("validator", owner.as_str())
        .add_attribute("bridge_pubkey", hex0x(bridge_pubkey))
        .add_attribute("http_rest_url", http_rest_url)
}

pub fn emergency_op(frozen: bool) -> Event {
    Event::new("emergency_op").add_attribute("frozen", frozen.to_string())
}

// ============================================================================
// Limiter
// ============================================================================

pub fn update_route_limit(sending_chain: u8, receiving_chain: u8, new_limit: u64) -> Event {
    Event::new("update_route_limit")
        .add_attribute("sending_chain", sending_chain.to_string())
        .add_attribute("receiving_chain", receiving_chain.to_string())
        .add_attribute("new_limit", new_limit.to_string())
}

pub fn update_asset_price(token_id: u8, new_price: u64) -> Event {
    Event::new("update_asset_price")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("new_price", new_price.to_string())
}

// ============================================================================
// Token Transfers
// ============================================================================

pub fn token_deposited(
    key: &BridgeMessageKey,
    sender: &[u8],
    target_chain: u8,
    target_address: &[u8],
    token_type: u8,
    amount: u64,
) -> Event {
    with_key(Event::new("token_deposited"), key)
        .add_attribute("sender_address", hex0x(sender))
        .add_attribute("target_chain", target_chain.to_string())
        .add_attribute("target_address", hex0x(target_address))
        .add_attribute("token_type", token_type.to_string())
        .add_attribute("amount", amount.to_string())
}

pub fn token_transfer_approved(key: &BridgeMessageKey) -> Event {
    with_key(Event::new("token_transfer_approved"), key)
}

pub fn token_transfer_already_approved(key: &BridgeMessageKey) -> Event {
    with_key(Event::new("token_transfer_already_approved"), key)
}

pub fn token_transfer_claimed(key: &BridgeMessageKey) -> Event {
    with_key(Event::new("token_transfer_claimed"), key)
}

pub fn token_transfer_already_claimed(key: &BridgeMessageKey) -> Event {
    with_key(Event::new("token_transfer_already_claimed"), key)
}

pub fn token_transfer_limit_exceed(key: &BridgeMessageKey) -> Event {
    with_key(Event::new("token_transfer_limit_exceed"), key)
}
