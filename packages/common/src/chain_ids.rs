//! Chain identifiers and bridge routes
//!
//! Every chain participating in the bridge is identified by a single byte.
//! A route is a directed `(source, destination)` pair and is the unit of
//! transfer-limit policy.

use cosmwasm_schema::cw_serde;

// ============================================================================
// Chain IDs
// ============================================================================

pub const TERRA_MAINNET: u8 = 0;
pub const TERRA_TESTNET: u8 = 1;
pub const TERRA_DEVNET: u8 = 2;
pub const TERRA_LOCAL_TEST: u8 = 3;

pub const ETH_MAINNET: u8 = 10;
pub const ETH_SEPOLIA: u8 = 11;
pub const ETH_LOCAL_TEST: u8 = 12;

/// Undirected chain pairs the bridge connects. Both directions are valid.
const VALID_PAIRS: [(u8, u8); 7] = [
    (TERRA_MAINNET, ETH_MAINNET),
    (TERRA_TESTNET, ETH_SEPOLIA),
    (TERRA_TESTNET, ETH_LOCAL_TEST),
    (TERRA_DEVNET, ETH_SEPOLIA),
    (TERRA_DEVNET, ETH_LOCAL_TEST),
    (TERRA_LOCAL_TEST, ETH_SEPOLIA),
    (TERRA_LOCAL_TEST, ETH_LOCAL_TEST),
];

/// Whether `chain_id` is one of the known chain identifiers.
pub fn is_valid_chain_id(chain_id: u8) -> bool {
    matches!(
        chain_id,
        TERRA_MAINNET
            | TERRA_TESTNET
            | TERRA_DEVNET
            | TERRA_LOCAL_TEST
            | ETH_MAINNET
            | ETH_SEPOLIA
            | ETH_LOCAL_TEST
    )
}

/// Whether the bridge connects `source` to `destination`.
pub fn is_valid_route(source: u8, destination: u8) -> bool {
    VALID_PAIRS
        .iter()
        .any(|&(a, b)| (a == source && b == destination) || (a == destination && b == source))
}

/// Build a route, returning `None` if the chains are not bridged.
pub fn get_route(source: u8, destination: u8) -> Option<BridgeRoute> {
    is_valid_route(source, destination).then_some(BridgeRoute {
        source,
        destination,
    })
}

// ============================================================================
// Bridge Route
// ============================================================================

/// Directed pair of chains.
#[cw_serde]
#[derive(Copy, Eq, Hash, PartialOrd, Ord)]
pub struct BridgeRoute {
    /// Sending chain
    pub source: u8,
    /// Receiving chain
    pub destination: u8,
}

impl BridgeRoute {
    /// Storage key for route-indexed maps.
    pub fn key(&self) -> (u8, u8) {
        (self.source, self.destination)
    }
}
