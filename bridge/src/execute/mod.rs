//! Execute handlers for the CL8Y committee bridge contract.
//!
//! - `transfer` - outgoing sends, committee approval, and claims
//! - `committee` - member registration and epoch rotation
//! - `governance` - committee-signed system messages
//! - `config` - admin token registration

mod committee;
mod config;
mod governance;
mod transfer;

pub use committee::*;
pub use config::*;
pub use governance::*;
pub use transfer::*;
