//! State definitions for the Starkway vault
//!
//! Custody itself lives in the bank module and the CW20 ledgers; the vault
//! only tracks which assets are initialized and which bridge versions may
//! move them.

use common::{AssetInfo, Felt};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    pub messaging: Addr,
    pub vault_l2: Felt,
    pub connection_delay: u64,
    pub native_asset: NativeAsset,
}

/// The native coin and the metadata announced for it
#[cw_serde]
pub struct NativeAsset {
    pub denom: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[cw_serde]
pub struct PendingAdmin {
    pub new_address: Addr,
}

// ============================================================================
// Connection State Machine
// ============================================================================

#[cw_serde]
pub enum ConnectionStatus {
    NotConnected,
    ToBeConnected,
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::NotConnected => "not_connected",
            ConnectionStatus::ToBeConnected => "to_be_connected",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
        }
    }
}

#[cw_serde]
pub struct ConnectionState {
    pub status: ConnectionStatus,
    /// Earliest time `FinalizeConnectionProcess` succeeds
    pub activation_time: Timestamp,
}

// ============================================================================
// Constants
// ============================================================================

pub const CONTRACT_NAME: &str = "crates.io:starkway-vault";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default page size of token listings
pub const DEFAULT_LIMIT: u32 = 10;

/// Maximum page size of token listings
pub const MAX_LIMIT: u32 = 50;

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

pub const PENDING_ADMIN: Item<PendingAdmin> = Item::new("pending_admin");

/// Initialized assets
/// Key: asset key (denom or contract address), Value: asset
pub const INITIALIZED_TOKENS: Map<&str, AssetInfo> = Map::new("initialized_tokens");

/// Initialized assets in initialization order
/// Key: position, Value: asset
pub const SUPPORTED_TOKENS: Map<u32, AssetInfo> = Map::new("supported_tokens");

pub const SUPPORTED_TOKEN_COUNT: Item<u32> = Item::new("supported_token_count");

/// Connection state per bridge version
pub const CONNECTIONS: Map<&Addr, ConnectionState> = Map::new("connections");

/// Every address that ever entered the connection process, in order
pub const CONNECTION_ORDER: Item<Vec<Addr>> = Item::new("connection_order");
