//! Asset initialization and custody handlers.

use common::message::{init_payload, selector, TOKEN_INITIALIZATION_SELECTOR_NAME};
use common::{AssetInfo, MessagingContract};
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Coin, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response,
    StdResult, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use crate::error::ContractError;
use crate::metadata::read_metadata;
use crate::state::{
    Config, ConnectionStatus, CONFIG, CONNECTIONS, INITIALIZED_TOKENS, SUPPORTED_TOKENS,
    SUPPORTED_TOKEN_COUNT,
};

// ============================================================================
// Initialization
// ============================================================================

/// Register an asset and send its init message to L2.
pub fn execute_init_token(
    deps: DepsMut,
    info: MessageInfo,
    token: AssetInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let token = token.validate(deps.api)?;
    ensure_supported_native(&config, &token)?;

    let key = token.key();
    if INITIALIZED_TOKENS.has(deps.storage, &key) {
        return Err(ContractError::AlreadyInitialized { token: key });
    }

    if let Some(coin) = info
        .funds
        .iter()
        .find(|c| c.denom != config.native_asset.denom)
    {
        return Err(ContractError::InvalidFunds {
            reason: format!("unexpected denom {}", coin.denom),
        });
    }

    let metadata = read_metadata(&deps.querier, &config, &token);
    let token_felt = token.to_felt(deps.api)?;
    let payload = init_payload(
        token_felt,
        &metadata.name,
        &metadata.symbol,
        metadata.decimals,
    )?;

    INITIALIZED_TOKENS.save(deps.storage, &key, &token)?;
    let position = SUPPORTED_TOKEN_COUNT.load(deps.storage)?;
    SUPPORTED_TOKENS.save(deps.storage, position, &token)?;
    SUPPORTED_TOKEN_COUNT.save(deps.storage, &(position + 1))?;

    let messaging = MessagingContract(config.messaging);
    let init_msg = messaging.send_message_to_l2(
        config.vault_l2,
        selector(TOKEN_INITIALIZATION_SELECTOR_NAME),
        payload,
        info.funds,
    )?;

    Ok(Response::new()
        .add_message(init_msg)
        .add_attribute("action", "init_token")
        .add_attribute("token", key)
        .add_attribute("token_l2", token_felt.to_string())
        .add_attribute("name", metadata.name)
        .add_attribute("symbol", metadata.symbol)
        .add_attribute("decimals", metadata.decimals.to_string()))
}

fn ensure_supported_native(config: &Config, token: &AssetInfo) -> Result<(), ContractError> {
    if let AssetInfo::Native { denom } = token {
        if denom != &config.native_asset.denom {
            return Err(ContractError::UnsupportedNativeAsset {
                denom: denom.clone(),
            });
        }
    }
    Ok(())
}

// ============================================================================
// Custody
// ============================================================================

/// Take custody of `amount` on behalf of a connected bridge.
pub fn execute_deposit_to_vault(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: AssetInfo,
    depositor: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_connected(deps.as_ref(), &info.sender)?;
    let key = ensure_initialized(deps.as_ref(), &token)?;
    let depositor = deps.api.addr_validate(&depositor)?;

    let mut messages: Vec<CosmosMsg> = vec![];
    match &token {
        AssetInfo::Native { denom } => {
            let attached: Uint128 = info
                .funds
                .iter()
                .filter(|c| &c.denom == denom)
                .map(|c| c.amount)
                .sum();
            if attached != amount || info.funds.iter().any(|c| &c.denom != denom) {
                return Err(ContractError::InvalidFunds {
                    reason: format!("expected exactly {}{}", amount, denom),
                });
            }
        }
        AssetInfo::Cw20 { contract_addr } => {
            if !info.funds.is_empty() {
                return Err(ContractError::InvalidFunds {
                    reason: "no coins expected for a token deposit".to_string(),
                });
            }
            if !amount.is_zero() {
                messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
                    contract_addr: contract_addr.to_string(),
                    msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                        owner: depositor.to_string(),
                        recipient: env.contract.address.to_string(),
                        amount,
                    })?,
                    funds: vec![],
                }));
            }
        }
    }

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "deposit_to_vault")
        .add_attribute("bridge", info.sender)
        .add_attribute("token", key)
        .add_attribute("depositor", depositor)
        .add_attribute("amount", amount))
}

/// Release `amount` to `recipient` on behalf of a connected bridge.
pub fn execute_withdraw_from_vault(
    deps: DepsMut,
    info: MessageInfo,
    token: AssetInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_connected(deps.as_ref(), &info.sender)?;
    let key = ensure_initialized(deps.as_ref(), &token)?;

    if recipient.is_empty() {
        return Err(ContractError::TransferToZero);
    }
    let recipient = deps.api.addr_validate(&recipient)?;

    let mut messages: Vec<CosmosMsg> = vec![];
    if !amount.is_zero() {
        messages.push(transfer_msg(&token, &recipient, amount)?);
    }

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "withdraw_from_vault")
        .add_attribute("bridge", info.sender)
        .add_attribute("token", key)
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount))
}

fn transfer_msg(token: &AssetInfo, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    Ok(match token {
        AssetInfo::Native { denom } => CosmosMsg::Bank(BankMsg::Send {
            to_address: recipient.to_string(),
            amount: vec![Coin {
                denom: denom.clone(),
                amount,
            }],
        }),
        AssetInfo::Cw20 { contract_addr } => CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: contract_addr.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: recipient.to_string(),
                amount,
            })?,
            funds: vec![],
        }),
    })
}

fn ensure_connected(deps: Deps, caller: &Addr) -> Result<(), ContractError> {
    let connected = CONNECTIONS
        .may_load(deps.storage, caller)?
        .map(|state| state.status == ConnectionStatus::Connected)
        .unwrap_or(false);
    if !connected {
        return Err(ContractError::NotConnectedBridge);
    }
    Ok(())
}

fn ensure_initialized(deps: Deps, token: &AssetInfo) -> Result<String, ContractError> {
    let key = token.key();
    if !INITIALIZED_TOKENS.has(deps.storage, &key) {
        return Err(ContractError::TokenMustBeInitialized { token: key });
    }
    Ok(key)
}
