//! Deposit handlers.
//!
//! A deposit is handled in one transaction:
//! 1. Validate the request (amounts, L2 values, settings, fee, coins)
//! 2. Initialize the token in the vault if this is its first deposit
//! 3. Move `amount + fee` into the vault
//! 4. Send the deposit message to L2
//!
//! The deposit itself is not stored; its record is the L2 message and the
//! nonce the oracle assigns to it.

use common::felt::{address_to_felt, felts_from_uints};
use common::message::{
    bytes32_to_hex, deposit_payload, selector, DEPOSIT_SELECTOR_NAME,
    DEPOSIT_WITH_MESSAGE_SELECTOR_NAME,
};
use common::{AssetInfo, DepositMessage, Felt, L1ToL2Message, MessagingContract};
use cosmwasm_std::{
    coins, to_json_binary, Addr, Coin, Deps, DepsMut, Env, MessageInfo, Response, StdError,
    Uint128, Uint256,
};

use crate::error::ContractError;
use crate::fee_engine::calculate_fee;
use crate::state::{Config, CONFIG, DEPOSITS_DISABLED};
use crate::token_settings;
use crate::vault::VaultContract;

// ============================================================================
// Handlers
// ============================================================================

pub fn execute_deposit_funds(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: AssetInfo,
    recipient_l2: Uint256,
    deposit_amount: Uint128,
    fee_amount: Uint128,
    starknet_fee: Uint128,
) -> Result<Response, ContractError> {
    if deposit_amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let recipient_l2 = parse_l2_recipient(recipient_l2)?;

    execute_deposit(
        deps,
        env,
        info,
        token,
        recipient_l2,
        deposit_amount,
        fee_amount,
        starknet_fee,
        None,
    )
}

#[allow(clippy::too_many_arguments)]
pub fn execute_deposit_funds_with_message(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: AssetInfo,
    recipient_l2: Uint256,
    deposit_amount: Uint128,
    fee_amount: Uint128,
    starknet_fee: Uint128,
    message_recipient: Uint256,
    message_payload: Vec<Uint256>,
) -> Result<Response, ContractError> {
    if deposit_amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let recipient_l2 = parse_l2_recipient(recipient_l2)?;
    let message = DepositMessage {
        recipient: parse_l2_recipient(message_recipient)?,
        payload: felts_from_uints(&message_payload)?,
    };

    execute_deposit(
        deps,
        env,
        info,
        token,
        recipient_l2,
        deposit_amount,
        fee_amount,
        starknet_fee,
        Some(message),
    )
}

#[allow(clippy::too_many_arguments)]
fn execute_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: AssetInfo,
    recipient_l2: Felt,
    deposit_amount: Uint128,
    fee_amount: Uint128,
    starknet_fee: Uint128,
    message: Option<DepositMessage>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let token = validate_token(deps.as_ref(), &config, &token)?;
    let key = token.key();

    if DEPOSITS_DISABLED.has(deps.storage, &key) {
        return Err(ContractError::TokenDepositsDisabled { token: key });
    }

    let settings = token_settings::get(deps.storage, &token)?;
    if (!settings.min_deposit.is_zero() && deposit_amount < settings.min_deposit)
        || (!settings.max_deposit.is_zero() && deposit_amount > settings.max_deposit)
    {
        return Err(ContractError::InvalidDepositAmount {
            amount: deposit_amount,
        });
    }

    let expected_fee = calculate_fee(&settings, deposit_amount, config.default_fee_rate);
    if fee_amount != expected_fee {
        return Err(ContractError::InvalidFeeAmount {
            expected: expected_fee,
            provided: fee_amount,
        });
    }

    let vault = VaultContract(config.vault.clone());
    let messaging = MessagingContract(config.messaging.clone());
    let initializes_token = !vault.is_initialized(&deps.querier, &token)?;
    let message_count: u128 = if initializes_token { 2 } else { 1 };

    let total_amount = deposit_amount
        .checked_add(fee_amount)
        .map_err(StdError::from)?;
    let message_fees = starknet_fee
        .checked_mul(Uint128::new(message_count))
        .map_err(StdError::from)?;
    let expected_value = if token.is_native() {
        total_amount
            .checked_add(message_fees)
            .map_err(StdError::from)?
    } else {
        message_fees
    };
    ensure_exact_funds(&info.funds, &config.native_denom, expected_value)?;

    // Messages sent by this deposit are numbered from the oracle's next nonce
    let mut nonce = messaging.next_nonce(&deps.querier)?;
    if initializes_token {
        nonce += 1;
    }
    let l1_message = deposit_message(
        deps.as_ref(),
        &env,
        &config,
        &token,
        &info.sender,
        recipient_l2,
        deposit_amount,
        fee_amount,
        message.as_ref(),
        nonce,
    )?;

    let mut response = Response::new();
    if initializes_token {
        response = response.add_message(
            vault.init_token(&token, native_coins(&config.native_denom, starknet_fee))?,
        );
    }
    let custody_funds = if token.is_native() {
        coins(total_amount.u128(), &config.native_denom)
    } else {
        vec![]
    };
    response = response
        .add_message(vault.deposit(&token, &info.sender, total_amount, custody_funds)?)
        .add_message(messaging.send_message_to_l2(
            l1_message.to_address,
            l1_message.selector,
            l1_message.payload.clone(),
            native_coins(&config.native_denom, starknet_fee),
        )?);

    let mut response = response
        .set_data(to_json_binary(&nonce)?)
        .add_attribute("action", "deposit")
        .add_attribute("token", key)
        .add_attribute("sender_l1", info.sender)
        .add_attribute("recipient_l2", recipient_l2.to_string())
        .add_attribute("amount", deposit_amount)
        .add_attribute("fee", fee_amount)
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("msg_hash", bytes32_to_hex(&l1_message.hash()))
        .add_attribute("initializes_token", initializes_token.to_string());
    if let Some(message) = message {
        response = response
            .add_attribute("message_recipient", message.recipient.to_string())
            .add_attribute("message_payload_len", message.payload.len().to_string());
    }
    Ok(response)
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// The L1 -> L2 message of a deposit, as sent by this contract.
#[allow(clippy::too_many_arguments)]
pub(crate) fn deposit_message(
    deps: Deps,
    env: &Env,
    config: &Config,
    token: &AssetInfo,
    sender_l1: &Addr,
    recipient_l2: Felt,
    amount: Uint128,
    fee: Uint128,
    message: Option<&DepositMessage>,
    nonce: u64,
) -> Result<L1ToL2Message, ContractError> {
    let payload = deposit_payload(
        token.to_felt(deps.api)?,
        address_to_felt(deps.api, sender_l1)?,
        recipient_l2,
        amount,
        fee,
        message,
    )?;
    let selector_name = match message {
        Some(_) => DEPOSIT_WITH_MESSAGE_SELECTOR_NAME,
        None => DEPOSIT_SELECTOR_NAME,
    };

    Ok(L1ToL2Message {
        from_address: address_to_felt(deps.api, &env.contract.address)?,
        to_address: config.starkway_l2,
        selector: selector(selector_name),
        payload,
        nonce,
    })
}

/// Validate an asset and make sure a native asset is the chain's coin.
pub(crate) fn validate_token(
    deps: Deps,
    config: &Config,
    token: &AssetInfo,
) -> Result<AssetInfo, ContractError> {
    let token = token.validate(deps.api)?;
    if let AssetInfo::Native { denom } = &token {
        if denom != &config.native_denom {
            return Err(ContractError::UnsupportedNativeAsset {
                denom: denom.clone(),
            });
        }
    }
    Ok(token)
}

/// A non-zero L2 address.
pub(crate) fn parse_l2_recipient(value: Uint256) -> Result<Felt, ContractError> {
    if value.is_zero() {
        return Err(ContractError::ZeroAddress);
    }
    Ok(Felt::new(value)?)
}

/// Attached coins must be exactly `expected` of `denom`.
fn ensure_exact_funds(funds: &[Coin], denom: &str, expected: Uint128) -> Result<(), ContractError> {
    let attached: Uint128 = funds
        .iter()
        .filter(|c| c.denom == denom)
        .map(|c| c.amount)
        .sum();
    if attached != expected || funds.iter().any(|c| c.denom != denom) {
        return Err(ContractError::InvalidMsgValue {
            expected: format!("{}{}", expected, denom),
        });
    }
    Ok(())
}

/// Coins of `amount`, none when zero.
pub(crate) fn native_coins(denom: &str, amount: Uint128) -> Vec<Coin> {
    if amount.is_zero() {
        return vec![];
    }
    coins(amount.u128(), denom)
}
