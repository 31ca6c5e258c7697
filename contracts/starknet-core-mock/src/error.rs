use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    // ========================================================================
    // Sending
    // ========================================================================

    #[error("Fee must be greater than 0")]
    ZeroMessageFee,

    #[error("Invalid funds: only {denom} is accepted")]
    InvalidFunds { denom: String },

    // ========================================================================
    // Consumption
    // ========================================================================

    #[error("Message already consumed")]
    MessageAlreadyConsumed,

    #[error("No message to be consumed")]
    NoMessageToConsume,

    #[error("Message not pending on L2")]
    MessageNotPending,

    // ========================================================================
    // Cancellation
    // ========================================================================

    #[error("No message to cancel")]
    NoMessageToCancel,

    #[error("Message cancellation not requested")]
    CancellationNotRequested,

    #[error("Message cancellation not allowed yet: {remaining_seconds} seconds remaining")]
    CancellationNotAllowedYet { remaining_seconds: u64 },

    #[error("Invalid cancellation delay: must be between 60 and 604800 seconds")]
    InvalidCancellationDelay,

    #[error("Invalid message hash: {reason}")]
    InvalidMsgHash { reason: String },
}
