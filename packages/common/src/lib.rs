//! Common - Shared Types and Utilities for CL8Y Committee Bridge Contracts
//!
//! This package provides the wire-level definitions shared by the bridge
//! contract and the off-chain committee signers:
//! - `chain_ids` - chain identifiers and directed bridge routes
//! - `message` - the bridge message envelope and its typed payloads

pub mod chain_ids;
pub mod message;

pub use chain_ids::BridgeRoute;
pub use message::{BridgeMessage, BridgeMessageKey, MessageError, MessageType};
