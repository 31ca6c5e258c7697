//! Error types for the Starkway bridge

use common::FeltError;
use cosmwasm_std::{StdError, Uint128, Uint256};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending admin can accept")]
    UnauthorizedPendingAdmin,

    #[error("No pending admin change")]
    NoPendingAdmin,

    // ========================================================================
    // Deposit Validation Errors
    // ========================================================================

    #[error("Zero amount")]
    ZeroAmount,

    #[error("Zero address")]
    ZeroAddress,

    #[error("Invalid felt: {value}")]
    InvalidFelt { value: Uint256 },

    #[error("Invalid short text: {reason}")]
    InvalidShortText { reason: String },

    #[error("Token deposits disabled: {token}")]
    TokenDepositsDisabled { token: String },

    #[error("Invalid deposit amount: {amount}")]
    InvalidDepositAmount { amount: Uint128 },

    #[error("Invalid fee amount: expected {expected}, got {provided}")]
    InvalidFeeAmount { expected: Uint128, provided: Uint128 },

    #[error("Invalid msg value: expected {expected}")]
    InvalidMsgValue { expected: String },

    #[error("Unsupported native asset: {denom}")]
    UnsupportedNativeAsset { denom: String },

    #[error("Transfer to zero address")]
    TransferToZero,

    #[error("Empty withdrawal batch")]
    EmptyBatch,

    // ========================================================================
    // Token Settings Errors
    // ========================================================================

    #[error("Token not initialized: {token}")]
    TokenNotInitialized { token: String },

    #[error("Fee segments must exist when a custom fee rate is used")]
    SegmentsMustExist,

    #[error("Fee segments must be empty when no custom fee rate is used")]
    SegmentsMustBeEmpty,

    #[error("Invalid max fee: min fee exceeds max fee")]
    InvalidMaxFee,

    #[error("Invalid max deposit")]
    InvalidMaxDeposit,

    #[error("Invalid min fee: min fee exceeds min deposit")]
    InvalidMinFee,

    #[error("Invalid fee segments: upper bounds must be strictly increasing")]
    InvalidFeeSegments,

    #[error("Segment fee rate too high: {rate} bps, max {max} bps")]
    SegmentRateTooHigh { rate: u64, max: u64 },

    #[error("Default fee rate too high: {rate} bps, max {max} bps")]
    DefaultFeeRateTooHigh { rate: u64, max: u64 },
}

impl From<FeltError> for ContractError {
    fn from(err: FeltError) -> Self {
        match err {
            FeltError::InvalidFelt { value } => ContractError::InvalidFelt { value },
            other => ContractError::InvalidShortText {
                reason: other.to_string(),
            },
        }
    }
}
