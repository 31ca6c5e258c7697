//! Starkway Bridge - Entry Points
//!
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::settings::validate_default_fee_rate;
use crate::execute::{
    execute_accept_admin, execute_cancel_admin_proposal, execute_clear_token_settings,
    execute_deposit_funds, execute_deposit_funds_with_message, execute_disable_deposits_for_token,
    execute_enable_deposits_for_token, execute_finish_deposit_cancelation,
    execute_finish_deposit_cancelation_by_owner, execute_process_failed_withdrawals,
    execute_process_withdrawals_batch, execute_propose_admin, execute_start_deposit_cancelation,
    execute_start_deposit_cancelation_by_owner, execute_update_default_fee_rate,
    execute_update_token_settings, execute_withdraw_funds, CanceledDeposit,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, Withdrawal};
use crate::query::{
    query_calculate_fee, query_config, query_deposits_enabled, query_pending_admin,
    query_prepare_deposit, query_prepare_withdrawal, query_token_settings,
    query_validate_token_settings,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    validate_default_fee_rate(msg.default_fee_rate)?;
    if msg.starkway_l2.is_zero() {
        return Err(ContractError::ZeroAddress);
    }

    let config = Config {
        admin: deps.api.addr_validate(&msg.admin)?,
        vault: deps.api.addr_validate(&msg.vault)?,
        messaging: deps.api.addr_validate(&msg.messaging)?,
        starkway_l2: msg.starkway_l2,
        native_denom: msg.native_denom,
        default_fee_rate: msg.default_fee_rate,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("vault", config.vault)
        .add_attribute("messaging", config.messaging)
        .add_attribute("starkway_l2", config.starkway_l2.to_string())
        .add_attribute("native_denom", config.native_denom)
        .add_attribute("default_fee_rate", config.default_fee_rate.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Deposits
        ExecuteMsg::DepositFunds {
            token,
            recipient_l2,
            deposit_amount,
            fee_amount,
            starknet_fee,
        } => execute_deposit_funds(
            deps,
            env,
            info,
            token,
            recipient_l2,
            deposit_amount,
            fee_amount,
            starknet_fee,
        ),
        ExecuteMsg::DepositFundsWithMessage {
            token,
            recipient_l2,
            deposit_amount,
            fee_amount,
            starknet_fee,
            message_recipient,
            message_payload,
        } => execute_deposit_funds_with_message(
            deps,
            env,
            info,
            token,
            recipient_l2,
            deposit_amount,
            fee_amount,
            starknet_fee,
            message_recipient,
            message_payload,
        ),

        // Deposit cancelation
        ExecuteMsg::StartDepositCancelation {
            token,
            recipient_l2,
            deposit_amount,
            fee_amount,
            message_recipient,
            message_payload,
            nonce,
        } => {
            let deposit = CanceledDeposit {
                token,
                sender_l1: info.sender,
                recipient_l2,
                deposit_amount,
                fee_amount,
                message_recipient,
                message_payload,
                nonce,
            };
            execute_start_deposit_cancelation(deps, env, deposit)
        }
        ExecuteMsg::FinishDepositCancelation {
            token,
            recipient_l2,
            deposit_amount,
            fee_amount,
            message_recipient,
            message_payload,
            nonce,
        } => {
            let deposit = CanceledDeposit {
                token,
                sender_l1: info.sender,
                recipient_l2,
                deposit_amount,
                fee_amount,
                message_recipient,
                message_payload,
                nonce,
            };
            execute_finish_deposit_cancelation(deps, env, deposit)
        }
        ExecuteMsg::StartDepositCancelationByOwner {
            token,
            sender_l1,
            recipient_l2,
            deposit_amount,
            fee_amount,
            message_recipient,
            message_payload,
            nonce,
        } => {
            let deposit = CanceledDeposit {
                token,
                sender_l1: deps.api.addr_validate(&sender_l1)?,
                recipient_l2,
                deposit_amount,
                fee_amount,
                message_recipient,
                message_payload,
                nonce,
            };
            execute_start_deposit_cancelation_by_owner(deps, env, info, deposit)
        }
        ExecuteMsg::FinishDepositCancelationByOwner {
            token,
            sender_l1,
            recipient_l2,
            deposit_amount,
            fee_amount,
            message_recipient,
            message_payload,
            nonce,
        } => {
            let deposit = CanceledDeposit {
                token,
                sender_l1: deps.api.addr_validate(&sender_l1)?,
                recipient_l2,
                deposit_amount,
                fee_amount,
                message_recipient,
                message_payload,
                nonce,
            };
            execute_finish_deposit_cancelation_by_owner(deps, env, info, deposit)
        }

        // Withdrawals
        ExecuteMsg::WithdrawFunds {
            token,
            recipient_l1,
            sender_l2,
            amount,
        } => execute_withdraw_funds(
            deps,
            env,
            Withdrawal {
                token,
                recipient_l1,
                sender_l2,
                amount,
            },
        ),
        ExecuteMsg::ProcessWithdrawalsBatch { withdrawals } => {
            execute_process_withdrawals_batch(deps, env, info, withdrawals)
        }
        ExecuteMsg::ProcessFailedWithdrawals {
            withdrawals,
            refund_to,
        } => execute_process_failed_withdrawals(deps, env, info, withdrawals, refund_to),

        // Token settings
        ExecuteMsg::UpdateTokenSettings { token, settings } => {
            execute_update_token_settings(deps, info, token, settings)
        }
        ExecuteMsg::ClearTokenSettings { token } => execute_clear_token_settings(deps, info, token),
        ExecuteMsg::DisableDepositsForToken { token } => {
            execute_disable_deposits_for_token(deps, info, token)
        }
        ExecuteMsg::EnableDepositsForToken { token } => {
            execute_enable_deposits_for_token(deps, info, token)
        }
        ExecuteMsg::UpdateDefaultFeeRate { fee_rate } => {
            execute_update_default_fee_rate(deps, info, fee_rate)
        }

        // Admin transfer
        ExecuteMsg::ProposeAdmin { new_admin } => execute_propose_admin(deps, info, new_admin),
        ExecuteMsg::AcceptAdmin {} => execute_accept_admin(deps, info),
        ExecuteMsg::CancelAdminProposal {} => execute_cancel_admin_proposal(deps, info),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::TokenSettings { token } => to_json_binary(&query_token_settings(deps, token)?),
        QueryMsg::ValidateTokenSettings { token, settings } => {
            to_json_binary(&query_validate_token_settings(deps, token, settings)?)
        }
        QueryMsg::CalculateFee { token, amount } => {
            to_json_binary(&query_calculate_fee(deps, token, amount)?)
        }
        QueryMsg::PrepareDeposit {
            token,
            sender_l1,
            recipient_l2,
            deposit_amount,
            message_recipient,
            message_payload,
        } => to_json_binary(&query_prepare_deposit(
            deps,
            env,
            token,
            sender_l1,
            recipient_l2,
            deposit_amount,
            message_recipient,
            message_payload,
        )?),
        QueryMsg::PrepareWithdrawal {
            token,
            recipient_l1,
            sender_l2,
            amount,
        } => to_json_binary(&query_prepare_withdrawal(
            deps,
            env,
            Withdrawal {
                token,
                recipient_l1,
                sender_l2,
                amount,
            },
        )?),
        QueryMsg::DepositsEnabled { token } => {
            to_json_binary(&query_deposits_enabled(deps, token)?)
        }
        QueryMsg::PendingAdmin {} => to_json_binary(&query_pending_admin(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
