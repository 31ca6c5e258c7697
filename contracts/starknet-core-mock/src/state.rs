//! State definitions for the messaging oracle mock

use common::L1ToL2Message;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

/// Oracle configuration
#[cw_serde]
pub struct Config {
    /// Plays the part of L2: may add L2 -> L1 messages and consume L1 -> L2 ones
    pub owner: Addr,
    /// Denom message fees are paid in
    pub native_denom: String,
    /// Seconds between starting and finishing a message cancellation
    pub message_cancellation_delay: u64,
}

/// Call counters, resettable by the owner
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    pub send_message_count: u64,
    pub consume_message_count: u64,
    pub start_cancellation_count: u64,
    pub cancel_message_count: u64,
}

pub const CONTRACT_NAME: &str = "crates.io:starknet-core-mock";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lower bound of the cancellation delay
pub const MIN_CANCELLATION_DELAY: u64 = 60;

/// Upper bound of the cancellation delay (7 days)
pub const MAX_CANCELLATION_DELAY: u64 = 604_800;

pub const CONFIG: Item<Config> = Item::new("config");

pub const STATS: Item<Stats> = Item::new("stats");

/// Nonce of the next L1 -> L2 message
pub const L1_TO_L2_NONCE: Item<u64> = Item::new("l1_to_l2_nonce");

/// Pending L1 -> L2 messages
/// Key: 32-byte message hash, Value: fee paid
pub const L1_TO_L2_MESSAGES: Map<&[u8], Uint128> = Map::new("l1_to_l2_messages");

/// Cancellation requests
/// Key: 32-byte message hash, Value: request time
pub const L1_TO_L2_CANCELLATIONS: Map<&[u8], Timestamp> = Map::new("l1_to_l2_cancellations");

/// Pending L2 -> L1 messages
/// Key: 32-byte message hash, Value: number of pending copies
pub const L2_TO_L1_MESSAGES: Map<&[u8], u64> = Map::new("l2_to_l1_messages");

/// Consumed L2 -> L1 messages
/// Key: 32-byte message hash, Value: number of consumed copies
pub const L2_TO_L1_CONSUMED: Map<&[u8], u64> = Map::new("l2_to_l1_consumed");

/// Most recent L1 -> L2 message, for inspection in tests
pub const LAST_L1_TO_L2_MESSAGE: Item<L1ToL2Message> = Item::new("last_l1_to_l2_message");
