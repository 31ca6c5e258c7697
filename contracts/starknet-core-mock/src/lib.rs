//! Starknet Core Mock - Messaging Oracle for Local Deployments and Tests
//!
//! Implements the messaging primitives the bridge depends on:
//! - `SendMessageToL2` assigns monotonic nonces and records the paid fee
//! - `ConsumeMessageFromL2` consumes L2 -> L1 messages exactly once
//! - `StartL1ToL2MessageCancellation` / `CancelL1ToL2Message` implement the
//!   delayed cancellation sub-protocol
//!
//! Every ledger is keyed by message hash, never by arrival order. The owner
//! plays the part of L2 through `AddL2ToL1Message` and `ConsumeL1ToL2Message`.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
