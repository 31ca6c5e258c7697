//! Message types for the Starkway bridge
//!
//! L2 values (addresses, message payloads) are taken as raw `Uint256` and
//! checked against the field prime by the handlers, so an out-of-range
//! value is reported as `InvalidFelt` instead of a parse error.

use common::{AssetInfo, Felt, L1ToL2Message, L2ToL1Message};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128, Uint256};

use crate::state::TokenSettings;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    pub vault: String,
    pub messaging: String,
    /// Starkway contract on L2, sender of withdrawals and receiver of deposits
    pub starkway_l2: Felt,
    /// Native coin denom; L2 message fees are paid in it
    pub native_denom: String,
    /// Flat fee rate in basis points for tokens without a custom schedule
    pub default_fee_rate: u64,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// One L2 -> L1 withdrawal, as found in the L2 message payload
#[cw_serde]
pub struct Withdrawal {
    pub token: AssetInfo,
    pub recipient_l1: String,
    pub sender_l2: Uint256,
    pub amount: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Deposits
    // ========================================================================
    /// Deposit to `recipient_l2`.
    ///
    /// Attached coins: `deposit_amount + fee_amount` of a native token, plus
    /// `starknet_fee` for every L2 message sent (two when the deposit
    /// initializes the token). CW20 deposits need an allowance for
    /// `deposit_amount + fee_amount` given to the vault.
    DepositFunds {
        token: AssetInfo,
        recipient_l2: Uint256,
        deposit_amount: Uint128,
        fee_amount: Uint128,
        starknet_fee: Uint128,
    },
    /// Deposit forwarding `message_payload` to the L2 contract
    /// `message_recipient`.
    DepositFundsWithMessage {
        token: AssetInfo,
        recipient_l2: Uint256,
        deposit_amount: Uint128,
        fee_amount: Uint128,
        starknet_fee: Uint128,
        message_recipient: Uint256,
        message_payload: Vec<Uint256>,
    },

    // ========================================================================
    // Deposit Cancelation
    // ========================================================================
    /// Request cancelation of the caller's deposit. The parameters must
    /// match the deposit exactly; a zero `message_recipient` denotes a
    /// deposit without message.
    StartDepositCancelation {
        token: AssetInfo,
        recipient_l2: Uint256,
        deposit_amount: Uint128,
        fee_amount: Uint128,
        message_recipient: Uint256,
        message_payload: Vec<Uint256>,
        nonce: u64,
    },
    /// Cancel the caller's deposit once the cancelation delay passed and
    /// refund `deposit_amount + fee_amount`.
    FinishDepositCancelation {
        token: AssetInfo,
        recipient_l2: Uint256,
        deposit_amount: Uint128,
        fee_amount: Uint128,
        message_recipient: Uint256,
        message_payload: Vec<Uint256>,
        nonce: u64,
    },
    /// Admin variant of `StartDepositCancelation` for any depositor
    StartDepositCancelationByOwner {
        token: AssetInfo,
        sender_l1: String,
        recipient_l2: Uint256,
        deposit_amount: Uint128,
        fee_amount: Uint128,
        message_recipient: Uint256,
        message_payload: Vec<Uint256>,
        nonce: u64,
    },
    /// Admin variant of `FinishDepositCancelation`; the refund still goes
    /// to `sender_l1`.
    FinishDepositCancelationByOwner {
        token: AssetInfo,
        sender_l1: String,
        recipient_l2: Uint256,
        deposit_amount: Uint128,
        fee_amount: Uint128,
        message_recipient: Uint256,
        message_payload: Vec<Uint256>,
        nonce: u64,
    },

    // ========================================================================
    // Withdrawals
    // ========================================================================
    /// Consume an L2 withdrawal message and release the funds.
    ///
    /// Authorization: Anyone
    WithdrawFunds {
        token: AssetInfo,
        recipient_l1: String,
        sender_l2: Uint256,
        amount: Uint128,
    },
    /// Process several withdrawals atomically (admin only)
    ProcessWithdrawalsBatch { withdrawals: Vec<Withdrawal> },
    /// Consume withdrawals that cannot reach their recipient and send the
    /// funds to `refund_to` instead (admin only)
    ProcessFailedWithdrawals {
        withdrawals: Vec<Withdrawal>,
        refund_to: String,
    },

    // ========================================================================
    // Token Settings (admin only)
    // ========================================================================
    UpdateTokenSettings {
        token: AssetInfo,
        settings: TokenSettings,
    },
    ClearTokenSettings { token: AssetInfo },
    DisableDepositsForToken { token: AssetInfo },
    EnableDepositsForToken { token: AssetInfo },
    UpdateDefaultFeeRate { fee_rate: u64 },

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

    /// Stored settings, zeroed when none are set
    #[returns(TokenSettings)]
    TokenSettings { token: AssetInfo },

    /// Validation result without storing
    #[returns(ValidateTokenSettingsResponse)]
    ValidateTokenSettings {
        token: AssetInfo,
        settings: TokenSettings,
    },

    #[returns(CalculateFeeResponse)]
    CalculateFee { token: AssetInfo, amount: Uint128 },

    /// Fee and exact L1 -> L2 message of a deposit made now. A zero
    /// `message_recipient` denotes a deposit without message.
    #[returns(PrepareDepositResponse)]
    PrepareDeposit {
        token: AssetInfo,
        sender_l1: String,
        recipient_l2: Uint256,
        deposit_amount: Uint128,
        message_recipient: Uint256,
        message_payload: Vec<Uint256>,
    },

    /// The L2 -> L1 message a withdrawal consumes
    #[returns(L2ToL1Message)]
    PrepareWithdrawal {
        token: AssetInfo,
        recipient_l1: String,
        sender_l2: Uint256,
        amount: Uint128,
    },

    #[returns(DepositsEnabledResponse)]
    DepositsEnabled { token: AssetInfo },

    #[returns(PendingAdminResponse)]
    PendingAdmin {},
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub vault: Addr,
    pub messaging: Addr,
    pub starkway_l2: Felt,
    pub native_denom: String,
    pub default_fee_rate: u64,
    pub max_fee_rate: u64,
}

#[cw_serde]
pub struct ValidateTokenSettingsResponse {
    pub valid: bool,
    pub error: Option<String>,
}

#[cw_serde]
pub struct CalculateFeeResponse {
    pub fee: Uint128,
}

#[cw_serde]
pub struct PrepareDepositResponse {
    pub fee: Uint128,
    /// The deposit initializes the token, sending an init message first
    pub initializes_token: bool,
    pub message: L1ToL2Message,
}

#[cw_serde]
pub struct DepositsEnabledResponse {
    pub enabled: bool,
}

#[cw_serde]
pub struct PendingAdminResponse {
    pub new_address: Option<Addr>,
}
