//! Token settings and deposit switch handlers (admin only).

use common::AssetInfo;
use cosmwasm_std::{DepsMut, MessageInfo, Response, StdResult};

use crate::error::ContractError;
use crate::execute::deposit::validate_token;
use crate::execute::ensure_admin;
use crate::state::{TokenSettings, CONFIG, DEPOSITS_DISABLED, MAX_FEE_RATE};
use crate::token_settings;
use crate::vault::VaultContract;

// ============================================================================
// Token Settings
// ============================================================================

pub fn execute_update_token_settings(
    deps: DepsMut,
    info: MessageInfo,
    token: AssetInfo,
    settings: TokenSettings,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;
    let config = CONFIG.load(deps.storage)?;
    let token = validate_token(deps.as_ref(), &config, &token)?;

    let vault = VaultContract(config.vault);
    token_settings::validate(deps.as_ref(), &vault, &token, &settings)?;
    token_settings::save(deps.storage, &token, &settings)?;

    Ok(Response::new()
        .add_attribute("action", "update_token_settings")
        .add_attribute("token", token.key())
        .add_attribute("min_deposit", settings.min_deposit)
        .add_attribute("max_deposit", settings.max_deposit)
        .add_attribute("min_fee", settings.min_fee)
        .add_attribute("max_fee", settings.max_fee)
        .add_attribute("use_custom_fee_rate", settings.use_custom_fee_rate.to_string())
        .add_attribute("fee_segments", settings.fee_segments.len().to_string()))
}

pub fn execute_clear_token_settings(
    deps: DepsMut,
    info: MessageInfo,
    token: AssetInfo,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;
    let token = token.validate(deps.api)?;
    token_settings::clear(deps.storage, &token);

    Ok(Response::new()
        .add_attribute("action", "clear_token_settings")
        .add_attribute("token", token.key()))
}

pub fn execute_update_default_fee_rate(
    deps: DepsMut,
    info: MessageInfo,
    fee_rate: u64,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;
    validate_default_fee_rate(fee_rate)?;

    CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.default_fee_rate = fee_rate;
        Ok(config)
    })?;

    Ok(Response::new()
        .add_attribute("action", "update_default_fee_rate")
        .add_attribute("fee_rate", fee_rate.to_string()))
}

pub(crate) fn validate_default_fee_rate(fee_rate: u64) -> Result<(), ContractError> {
    if fee_rate > MAX_FEE_RATE {
        return Err(ContractError::DefaultFeeRateTooHigh {
            rate: fee_rate,
            max: MAX_FEE_RATE,
        });
    }
    Ok(())
}

// ============================================================================
// Deposit Switch
// ============================================================================

/// Stop deposits of `token`; withdrawals are not affected.
pub fn execute_disable_deposits_for_token(
    deps: DepsMut,
    info: MessageInfo,
    token: AssetInfo,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;
    let token = token.validate(deps.api)?;
    DEPOSITS_DISABLED.save(deps.storage, &token.key(), &true)?;

    Ok(Response::new()
        .add_attribute("action", "disable_deposits_for_token")
        .add_attribute("token", token.key()))
}

pub fn execute_enable_deposits_for_token(
    deps: DepsMut,
    info: MessageInfo,
    token: AssetInfo,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;
    let token = token.validate(deps.api)?;
    DEPOSITS_DISABLED.remove(deps.storage, &token.key());

    Ok(Response::new()
        .add_attribute("action", "enable_deposits_for_token")
        .add_attribute("token", token.key()))
}
