//! Error types for the Starkway vault

use common::FeltError;
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Felt(#[from] FeltError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending admin can accept")]
    UnauthorizedPendingAdmin,

    #[error("No pending admin change")]
    NoPendingAdmin,

    #[error("Caller is not a connected bridge")]
    NotConnectedBridge,

    // ========================================================================
    // Asset Errors
    // ========================================================================

    #[error("Token already initialized: {token}")]
    AlreadyInitialized { token: String },

    #[error("Token must be initialized: {token}")]
    TokenMustBeInitialized { token: String },

    #[error("Unsupported native asset: {denom}")]
    UnsupportedNativeAsset { denom: String },

    // ========================================================================
    // Transfer Errors
    // ========================================================================

    #[error("Invalid funds: {reason}")]
    InvalidFunds { reason: String },

    #[error("Transfer to zero address")]
    TransferToZero,

    // ========================================================================
    // Connection Errors
    // ========================================================================

    #[error("Zero address")]
    ZeroAddress,

    #[error("Too early to connect: {remaining_seconds} seconds remaining")]
    TooEarlyToConnect { remaining_seconds: u64 },

    #[error("At least one bridge version must remain connected")]
    MustRemainConnectedVersion,

    #[error("Invalid connection status: {status}")]
    InvalidConnectionStatus { status: String },
}
