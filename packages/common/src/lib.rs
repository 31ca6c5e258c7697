//! Common - Shared Types and Utilities for Starkway Contracts
//!
//! This package provides the pieces every Starkway contract agrees on:
//! - `felt` - the field-element codec used by the L1 <-> L2 message channel
//! - `asset` - asset identity (native coin or CW20 token)
//! - `message` - L1->L2 / L2->L1 payload layouts, selectors and message hashes
//! - `messaging` - the interface of the messaging oracle (Starknet core)

pub mod asset;
pub mod felt;
pub mod message;
pub mod messaging;

pub use asset::{AssetInfo, TokenMetadata};
pub use felt::{Felt, FeltError, FIELD_PRIME};
pub use message::{DepositMessage, L1ToL2Message, L2ToL1Message};
pub use messaging::MessagingContract;
