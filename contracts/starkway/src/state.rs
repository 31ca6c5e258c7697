//! State definitions for the Starkway bridge

use common::Felt;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    /// Vault holding the bridged assets
    pub vault: Addr,
    /// Messaging oracle
    pub messaging: Addr,
    /// Starkway contract on L2
    pub starkway_l2: Felt,
    /// Denom of the chain's native coin, also used for L2 message fees
    pub native_denom: String,
    /// Rate of the flat (non-segment) fee in basis points
    pub default_fee_rate: u64,
}

#[cw_serde]
pub struct PendingAdmin {
    pub new_address: Addr,
}

// ============================================================================
// Token Settings
// ============================================================================

/// Fee rate applied to deposits up to `to_amount` (inclusive).
/// A zero `to_amount` is unlimited and only allowed on the last segment.
#[cw_serde]
pub struct FeeSegment {
    pub fee_rate: u64,
    pub to_amount: Uint128,
}

/// Per-token deposit limits and fee schedule. Zero bounds are unbounded.
#[cw_serde]
#[derive(Default)]
pub struct TokenSettings {
    pub min_deposit: Uint128,
    pub max_deposit: Uint128,
    pub min_fee: Uint128,
    pub max_fee: Uint128,
    pub use_custom_fee_rate: bool,
    pub fee_segments: Vec<FeeSegment>,
}

// ============================================================================
// Constants
// ============================================================================

pub const CONTRACT_NAME: &str = "crates.io:starkway";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum fee rate in basis points (3%)
pub const MAX_FEE_RATE: u64 = 300;

/// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u128 = 10_000;

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

pub const PENDING_ADMIN: Item<PendingAdmin> = Item::new("pending_admin");

/// Key: asset key, Value: settings
pub const TOKEN_SETTINGS: Map<&str, TokenSettings> = Map::new("token_settings");

/// Assets whose deposits are disabled
/// Key: asset key
pub const DEPOSITS_DISABLED: Map<&str, bool> = Map::new("deposits_disabled");
