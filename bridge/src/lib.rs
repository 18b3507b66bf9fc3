//! CL8Y Committee Bridge Contract - Weighted Committee Bridging for TerraClassic
//!
//! Bridge messages are authenticated by a committee of validators whose
//! signing weight is derived from stake, and incoming token transfers are
//! capped by a rolling 24-hour USD limit per route.
//!
//! # Outgoing Flow
//! 1. User sends CW20 tokens to the bridge with `ReceiveMsg::SendToken`
//! 2. The bridge burns them and records a token message under the next sequence number
//! 3. Committee members sign the message; the signed message is approved on both chains
//!
//! # Incoming Flow
//! 1. A relayer submits the committee-signed message with `ApproveTokenTransfer`
//! 2. Anyone calls `ClaimToken`, which mints to the recipient if the route limit allows
//!
//! # Security
//! - Stake-weighted thresholds per message type
//! - Blocklisted members keep their seat but carry no weight
//! - Rolling 24h USD notional limits per route
//! - Per-type sequence numbers for committee-signed system messages

pub mod committee;
pub mod contract;
pub mod crypto;
pub mod error;
pub mod events;
mod execute;
pub mod hash;
pub mod limiter;
pub mod msg;
mod query;
pub mod state;
pub mod treasury;

pub use crate::error::ContractError;
pub use crate::hash::{keccak256, message_digest, BRIDGE_MESSAGE_PREFIX};
