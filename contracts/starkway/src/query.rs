//! Query handlers for the Starkway bridge.

use common::felt::felts_from_uints;
use common::{AssetInfo, DepositMessage, L2ToL1Message, MessagingContract};
use cosmwasm_std::{Deps, Env, StdError, StdResult, Uint128, Uint256};

use crate::error::ContractError;
use crate::execute::deposit::{deposit_message, parse_l2_recipient, validate_token};
use crate::execute::withdraw::prepare_withdrawal;
use crate::fee_engine::calculate_fee;
use crate::msg::{
    CalculateFeeResponse, ConfigResponse, DepositsEnabledResponse, PendingAdminResponse,
    PrepareDepositResponse, ValidateTokenSettingsResponse, Withdrawal,
};
use crate::state::{TokenSettings, CONFIG, DEPOSITS_DISABLED, MAX_FEE_RATE, PENDING_ADMIN};
use crate::token_settings;
use crate::vault::VaultContract;

fn to_std(err: ContractError) -> StdError {
    match err {
        ContractError::Std(err) => err,
        other => StdError::generic_err(other.to_string()),
    }
}

// ============================================================================
// Config
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        vault: config.vault,
        messaging: config.messaging,
        starkway_l2: config.starkway_l2,
        native_denom: config.native_denom,
        default_fee_rate: config.default_fee_rate,
        max_fee_rate: MAX_FEE_RATE,
    })
}

pub fn query_pending_admin(deps: Deps) -> StdResult<PendingAdminResponse> {
    let pending = PENDING_ADMIN.may_load(deps.storage)?;
    Ok(PendingAdminResponse {
        new_address: pending.map(|p| p.new_address),
    })
}

// ============================================================================
// Token Settings & Fees
// ============================================================================

pub fn query_token_settings(deps: Deps, token: AssetInfo) -> StdResult<TokenSettings> {
    let token = token.validate(deps.api)?;
    token_settings::get(deps.storage, &token)
}

pub fn query_validate_token_settings(
    deps: Deps,
    token: AssetInfo,
    settings: TokenSettings,
) -> StdResult<ValidateTokenSettingsResponse> {
    let config = CONFIG.load(deps.storage)?;
    let vault = VaultContract(config.vault.clone());
    let result = validate_token(deps, &config, &token)
        .and_then(|token| token_settings::validate(deps, &vault, &token, &settings));

    Ok(match result {
        Ok(()) => ValidateTokenSettingsResponse {
            valid: true,
            error: None,
        },
        Err(err) => ValidateTokenSettingsResponse {
            valid: false,
            error: Some(err.to_string()),
        },
    })
}

pub fn query_calculate_fee(
    deps: Deps,
    token: AssetInfo,
    amount: Uint128,
) -> StdResult<CalculateFeeResponse> {
    let config = CONFIG.load(deps.storage)?;
    let token = token.validate(deps.api)?;
    let settings = token_settings::get(deps.storage, &token)?;
    Ok(CalculateFeeResponse {
        fee: calculate_fee(&settings, amount, config.default_fee_rate),
    })
}

pub fn query_deposits_enabled(deps: Deps, token: AssetInfo) -> StdResult<DepositsEnabledResponse> {
    let token = token.validate(deps.api)?;
    Ok(DepositsEnabledResponse {
        enabled: !DEPOSITS_DISABLED.has(deps.storage, &token.key()),
    })
}

// ============================================================================
// Message Preparation
// ============================================================================

/// Fee and L1 -> L2 message of a deposit sent in the next transaction,
/// assuming no other message reaches the oracle first.
#[allow(clippy::too_many_arguments)]
pub fn query_prepare_deposit(
    deps: Deps,
    env: Env,
    token: AssetInfo,
    sender_l1: String,
    recipient_l2: Uint256,
    deposit_amount: Uint128,
    message_recipient: Uint256,
    message_payload: Vec<Uint256>,
) -> StdResult<PrepareDepositResponse> {
    prepare_deposit(
        deps,
        &env,
        token,
        sender_l1,
        recipient_l2,
        deposit_amount,
        message_recipient,
        message_payload,
    )
    .map_err(to_std)
}

#[allow(clippy::too_many_arguments)]
fn prepare_deposit(
    deps: Deps,
    env: &Env,
    token: AssetInfo,
    sender_l1: String,
    recipient_l2: Uint256,
    deposit_amount: Uint128,
    message_recipient: Uint256,
    message_payload: Vec<Uint256>,
) -> Result<PrepareDepositResponse, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let token = validate_token(deps, &config, &token)?;
    let sender_l1 = deps.api.addr_validate(&sender_l1)?;
    let recipient_l2 = parse_l2_recipient(recipient_l2)?;
    let message = if message_recipient.is_zero() {
        None
    } else {
        Some(DepositMessage {
            recipient: parse_l2_recipient(message_recipient)?,
            payload: felts_from_uints(&message_payload)?,
        })
    };

    let settings = token_settings::get(deps.storage, &token)?;
    let fee = calculate_fee(&settings, deposit_amount, config.default_fee_rate);

    let vault = VaultContract(config.vault.clone());
    let initializes_token = !vault.is_initialized(&deps.querier, &token)?;
    let mut nonce = MessagingContract(config.messaging.clone()).next_nonce(&deps.querier)?;
    if initializes_token {
        nonce += 1;
    }

    let message = deposit_message(
        deps,
        env,
        &config,
        &token,
        &sender_l1,
        recipient_l2,
        deposit_amount,
        fee,
        message.as_ref(),
        nonce,
    )?;

    Ok(PrepareDepositResponse {
        fee,
        initializes_token,
        message,
    })
}

pub fn query_prepare_withdrawal(
    deps: Deps,
    env: Env,
    withdrawal: Withdrawal,
) -> StdResult<L2ToL1Message> {
    let config = CONFIG.load(deps.storage)?;
    prepare_withdrawal(deps, &env, &config, &withdrawal)
        .map(|prepared| prepared.message)
        .map_err(to_std)
}
