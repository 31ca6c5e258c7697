//! Message types for the Starkway vault

use common::{AssetInfo, Felt, L1ToL2Message, TokenMetadata};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Timestamp, Uint128};

use crate::state::{ConnectionStatus, NativeAsset};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address for the connection process and admin transfer
    pub admin: String,
    /// Messaging oracle used to announce new tokens to L2
    pub messaging: String,
    /// L2 counterpart receiving token initialization messages
    pub vault_l2: Felt,
    /// Seconds between starting and finalizing a bridge connection
    pub connection_delay: u64,
    /// The chain's native coin, bridgeable as an asset
    pub native_asset: NativeAsset,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Assets
    // ========================================================================
    /// Register an asset and announce it to L2.
    ///
    /// Authorization: Anyone. Attached native coins pay the L2 message fee.
    InitToken { token: AssetInfo },

    // ========================================================================
    // Custody (connected bridges only)
    // ========================================================================
    /// Take custody of `amount`. Native coins must be attached, CW20 tokens
    /// are pulled from `depositor` with an allowance.
    DepositToVault {
        token: AssetInfo,
        depositor: String,
        amount: Uint128,
    },
    /// Release `amount` to `recipient`.
    WithdrawFromVault {
        token: AssetInfo,
        recipient: String,
        amount: Uint128,
    },

    // ========================================================================
    // Connection Process (admin only)
    // ========================================================================
    StartConnectionProcess { address: String },
    FinalizeConnectionProcess { address: String },
    DisconnectStarkway { address: String },

    // ========================================================================
    // Admin Transfer
    // ========================================================================
    ProposeAdmin { new_admin: String },
    AcceptAdmin {},
    CancelAdminProposal {},
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(IsTokenInitializedResponse)]
    IsTokenInitialized { token: AssetInfo },

    #[returns(NumberOfSupportedTokensResponse)]
    NumberOfSupportedTokens {},

    /// Supported assets in initialization order. `start_after` is the
    /// position of the last asset of the previous page.
    #[returns(SupportedTokensResponse)]
    SupportedTokens {
        start_after: Option<u32>,
        limit: Option<u32>,
    },

    #[returns(ConnectionStateResponse)]
    ConnectionState { address: String },

    /// Every address that ever entered the connection process
    #[returns(AllConnectionsResponse)]
    AllConnections {},

    #[returns(IsConnectedResponse)]
    IsConnected { address: String },

    /// The init message `InitToken` would send right now
    #[returns(L1ToL2Message)]
    PrepareInitMessage { token: AssetInfo },

    /// Metadata as announced to L2, defaults substituted for unreadable fields
    #[returns(TokenMetadata)]
    TokenMetadata { token: AssetInfo },

    /// Supported assets `account` holds a non-zero balance of
    #[returns(TokensWithBalanceResponse)]
    SupportedTokensWithBalance {
        account: String,
        start_after: Option<u32>,
        limit: Option<u32>,
    },

    #[returns(PendingAdminResponse)]
    PendingAdmin {},
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub messaging: Addr,
    pub vault_l2: Felt,
    pub connection_delay: u64,
    pub native_asset: NativeAsset,
}

#[cw_serde]
pub struct IsTokenInitializedResponse {
    pub initialized: bool,
}

#[cw_serde]
pub struct NumberOfSupportedTokensResponse {
    pub count: u32,
}

#[cw_serde]
pub struct SupportedTokensResponse {
    pub tokens: Vec<AssetInfo>,
}

#[cw_serde]
pub struct ConnectionStateResponse {
    pub address: Addr,
    pub status: ConnectionStatus,
    pub activation_time: Option<Timestamp>,
}

#[cw_serde]
pub struct AllConnectionsResponse {
    pub connections: Vec<ConnectionStateResponse>,
}

#[cw_serde]
pub struct IsConnectedResponse {
    pub connected: bool,
}

#[cw_serde]
pub struct TokenInfo {
    pub token: AssetInfo,
    pub balance: Uint128,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[cw_serde]
pub struct TokensWithBalanceResponse {
    pub tokens: Vec<TokenInfo>,
}

#[cw_serde]
pub struct PendingAdminResponse {
    pub new_address: Option<Addr>,
}
