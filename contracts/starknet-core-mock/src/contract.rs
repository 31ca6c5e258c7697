use common::felt::address_to_felt;
use common::message::{bytes32_to_hex, hex_to_bytes32, l1_to_l2_msg_hash, l2_to_l1_msg_hash};
use common::{Felt, L1ToL2Message};
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
    Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{
    CancellationDelayResponse, CancellationResponse, ConfigResponse, ExecuteMsg, InstantiateMsg,
    L1ToL2MessageResponse, L2ToL1MessageResponse, LastMessageResponse, MigrateMsg, NonceResponse,
    QueryMsg,
};
use crate::state::{
    Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, L1_TO_L2_CANCELLATIONS,
    L1_TO_L2_MESSAGES, L1_TO_L2_NONCE, L2_TO_L1_CONSUMED, L2_TO_L1_MESSAGES,
    LAST_L1_TO_L2_MESSAGE, MAX_CANCELLATION_DELAY, MIN_CANCELLATION_DELAY, STATS,
};

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

    validate_cancellation_delay(msg.message_cancellation_delay)?;
    let config = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        native_denom: msg.native_denom,
        message_cancellation_delay: msg.message_cancellation_delay,
    };
    CONFIG.save(deps.storage, &config)?;
    STATS.save(deps.storage, &Stats::default())?;
    L1_TO_L2_NONCE.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("native_denom", config.native_denom)
        .add_attribute(
            "message_cancellation_delay",
            config.message_cancellation_delay.to_string(),
        ))
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
        ExecuteMsg::SendMessageToL2 {
            to_address,
            selector,
            payload,
        } => execute_send_message(deps, info, to_address, selector, payload),
        ExecuteMsg::ConsumeMessageFromL2 {
            from_address,
            payload,
        } => execute_consume_message(deps, info, from_address, payload),
        ExecuteMsg::StartL1ToL2MessageCancellation {
            to_address,
            selector,
            payload,
            nonce,
        } => execute_start_cancellation(deps, env, info, to_address, selector, payload, nonce),
        ExecuteMsg::CancelL1ToL2Message {
            to_address,
            selector,
            payload,
            nonce,
        } => execute_cancel_message(deps, env, info, to_address, selector, payload, nonce),
        ExecuteMsg::AddL2ToL1Message {
            from_address,
            to_address,
            payload,
        } => execute_add_l2_to_l1_message(deps, info, from_address, to_address, payload),
        ExecuteMsg::ConsumeL1ToL2Message { msg_hash } => {
            execute_consume_l1_to_l2_message(deps, info, msg_hash)
        }
        ExecuteMsg::SetMessageCancellationDelay { delay_seconds } => {
            execute_set_cancellation_delay(deps, info, delay_seconds)
        }
        ExecuteMsg::ResetCounters {} => execute_reset_counters(deps, info),
    }
}

fn execute_send_message(
    deps: DepsMut,
    info: MessageInfo,
    to_address: Felt,
    selector: Felt,
    payload: Vec<Felt>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if info.funds.iter().any(|c| c.denom != config.native_denom) {
        return Err(ContractError::InvalidFunds {
            denom: config.native_denom,
        });
    }
    let fee: Uint128 = info.funds.iter().map(|c| c.amount).sum();
    if fee.is_zero() {
        return Err(ContractError::ZeroMessageFee);
    }

    let nonce = L1_TO_L2_NONCE.load(deps.storage)?;
    L1_TO_L2_NONCE.save(deps.storage, &(nonce + 1))?;

    let message = L1ToL2Message {
        from_address: address_to_felt(deps.api, &info.sender)?,
        to_address,
        selector,
        payload,
        nonce,
    };
    let msg_hash = message.hash();
    L1_TO_L2_MESSAGES.save(deps.storage, &msg_hash, &fee)?;
    LAST_L1_TO_L2_MESSAGE.save(deps.storage, &message)?;

    STATS.update(deps.storage, |mut stats| -> StdResult<_> {
        stats.send_message_count += 1;
        Ok(stats)
    })?;

    Ok(Response::new()
        .set_data(to_json_binary(&nonce)?)
        .add_attribute("action", "send_message_to_l2")
        .add_attribute("from_address", message.from_address.to_string())
        .add_attribute("to_address", to_address.to_string())
        .add_attribute("selector", selector.to_string())
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("fee", fee)
        .add_attribute("msg_hash", bytes32_to_hex(&msg_hash)))
}

fn execute_consume_message(
    deps: DepsMut,
    info: MessageInfo,
    from_address: Felt,
    payload: Vec<Felt>,
) -> Result<Response, ContractError> {
    let to_address = address_to_felt(deps.api, &info.sender)?;
    let msg_hash = l2_to_l1_msg_hash(&from_address, &to_address, &payload);

    let pending = L2_TO_L1_MESSAGES
        .may_load(deps.storage, &msg_hash)?
        .unwrap_or(0);
    let consumed = L2_TO_L1_CONSUMED
        .may_load(deps.storage, &msg_hash)?
        .unwrap_or(0);

    if pending == 0 {
        if consumed > 0 {
            return Err(ContractError::MessageAlreadyConsumed);
        }
        return Err(ContractError::NoMessageToConsume);
    }

    if pending == 1 {
        L2_TO_L1_MESSAGES.remove(deps.storage, &msg_hash);
    } else {
        L2_TO_L1_MESSAGES.save(deps.storage, &msg_hash, &(pending - 1))?;
    }
    L2_TO_L1_CONSUMED.save(deps.storage, &msg_hash, &(consumed + 1))?;

    STATS.update(deps.storage, |mut stats| -> StdResult<_> {
        stats.consume_message_count += 1;
        Ok(stats)
    })?;

    Ok(Response::new()
        .set_data(Binary::from(msg_hash.to_vec()))
        .add_attribute("action", "consume_message_from_l2")
        .add_attribute("from_address", from_address.to_string())
        .add_attribute("to_address", info.sender)
        .add_attribute("msg_hash", bytes32_to_hex(&msg_hash)))
}

fn execute_start_cancellation(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    to_address: Felt,
    selector: Felt,
    payload: Vec<Felt>,
    nonce: u64,
) -> Result<Response, ContractError> {
    let from_address = address_to_felt(deps.api, &info.sender)?;
    let msg_hash = l1_to_l2_msg_hash(&from_address, &to_address, nonce, &selector, &payload);

    if !L1_TO_L2_MESSAGES.has(deps.storage, &msg_hash) {
        return Err(ContractError::NoMessageToCancel);
    }
    L1_TO_L2_CANCELLATIONS.save(deps.storage, &msg_hash, &env.block.time)?;

    STATS.update(deps.storage, |mut stats| -> StdResult<_> {
        stats.start_cancellation_count += 1;
        Ok(stats)
    })?;

    Ok(Response::new()
        .add_attribute("action", "start_l1_to_l2_message_cancellation")
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("msg_hash", bytes32_to_hex(&msg_hash)))
}

fn execute_cancel_message(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    to_address: Felt,
    selector: Felt,
    payload: Vec<Felt>,
    nonce: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let from_address = address_to_felt(deps.api, &info.sender)?;
    let msg_hash = l1_to_l2_msg_hash(&from_address, &to_address, nonce, &selector, &payload);

    if !L1_TO_L2_MESSAGES.has(deps.storage, &msg_hash) {
        return Err(ContractError::NoMessageToCancel);
    }
    let requested_at = L1_TO_L2_CANCELLATIONS
        .may_load(deps.storage, &msg_hash)?
        .ok_or(ContractError::CancellationNotRequested)?;

    let allowed_at = requested_at.plus_seconds(config.message_cancellation_delay);
    if env.block.time < allowed_at {
        return Err(ContractError::CancellationNotAllowedYet {
            remaining_seconds: allowed_at.seconds() - env.block.time.seconds(),
        });
    }

    L1_TO_L2_MESSAGES.remove(deps.storage, &msg_hash);
    L1_TO_L2_CANCELLATIONS.remove(deps.storage, &msg_hash);

    STATS.update(deps.storage, |mut stats| -> StdResult<_> {
        stats.cancel_message_count += 1;
        Ok(stats)
    })?;

    Ok(Response::new()
        .add_attribute("action", "cancel_l1_to_l2_message")
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("msg_hash", bytes32_to_hex(&msg_hash)))
}

// ============================================================================
// L2 Hooks
// ============================================================================

fn execute_add_l2_to_l1_message(
    deps: DepsMut,
    info: MessageInfo,
    from_address: Felt,
    to_address: Felt,
    payload: Vec<Felt>,
) -> Result<Response, ContractError> {
    ensure_owner(deps.as_ref(), &info)?;

    let msg_hash = l2_to_l1_msg_hash(&from_address, &to_address, &payload);
    let pending = L2_TO_L1_MESSAGES
        .may_load(deps.storage, &msg_hash)?
        .unwrap_or(0);
    L2_TO_L1_MESSAGES.save(deps.storage, &msg_hash, &(pending + 1))?;

    Ok(Response::new()
        .add_attribute("action", "add_l2_to_l1_message")
        .add_attribute("pending", (pending + 1).to_string())
        .add_attribute("msg_hash", bytes32_to_hex(&msg_hash)))
}

fn execute_consume_l1_to_l2_message(
    deps: DepsMut,
    info: MessageInfo,
    msg_hash: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.as_ref(), &info)?;

    let hash = parse_msg_hash(&msg_hash)?;
    if !L1_TO_L2_MESSAGES.has(deps.storage, &hash) {
        return Err(ContractError::MessageNotPending);
    }
    L1_TO_L2_MESSAGES.remove(deps.storage, &hash);
    L1_TO_L2_CANCELLATIONS.remove(deps.storage, &hash);

    Ok(Response::new()
        .add_attribute("action", "consume_l1_to_l2_message")
        .add_attribute("msg_hash", bytes32_to_hex(&hash)))
}

fn execute_set_cancellation_delay(
    deps: DepsMut,
    info: MessageInfo,
    delay_seconds: u64,
) -> Result<Response, ContractError> {
    ensure_owner(deps.as_ref(), &info)?;
    validate_cancellation_delay(delay_seconds)?;

    CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.message_cancellation_delay = delay_seconds;
        Ok(config)
    })?;

    Ok(Response::new()
        .add_attribute("action", "set_message_cancellation_delay")
        .add_attribute("delay_seconds", delay_seconds.to_string()))
}

fn execute_reset_counters(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_owner(deps.as_ref(), &info)?;
    STATS.save(deps.storage, &Stats::default())?;
    LAST_L1_TO_L2_MESSAGE.remove(deps.storage);

    Ok(Response::new().add_attribute("action", "reset_counters"))
}

fn ensure_owner(deps: Deps, info: &MessageInfo) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn validate_cancellation_delay(delay_seconds: u64) -> Result<(), ContractError> {
    if !(MIN_CANCELLATION_DELAY..=MAX_CANCELLATION_DELAY).contains(&delay_seconds) {
        return Err(ContractError::InvalidCancellationDelay);
    }
    Ok(())
}

fn parse_msg_hash(msg_hash: &str) -> Result<[u8; 32], ContractError> {
    hex_to_bytes32(msg_hash).map_err(|reason| ContractError::InvalidMsgHash { reason })
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::L1ToL2MessageNonce {} => {
            let nonce = L1_TO_L2_NONCE.load(deps.storage)?;
            to_json_binary(&NonceResponse { nonce })
        }
        QueryMsg::L1ToL2Message { msg_hash } => {
            let hash = parse_query_hash(&msg_hash)?;
            let fee = L1_TO_L2_MESSAGES.may_load(deps.storage, &hash)?;
            to_json_binary(&L1ToL2MessageResponse { fee })
        }
        QueryMsg::L2ToL1Message { msg_hash } => {
            let hash = parse_query_hash(&msg_hash)?;
            to_json_binary(&L2ToL1MessageResponse {
                pending: L2_TO_L1_MESSAGES.may_load(deps.storage, &hash)?.unwrap_or(0),
                consumed: L2_TO_L1_CONSUMED.may_load(deps.storage, &hash)?.unwrap_or(0),
            })
        }
        QueryMsg::L1ToL2MessageCancellation { msg_hash } => {
            let hash = parse_query_hash(&msg_hash)?;
            let requested_at = L1_TO_L2_CANCELLATIONS.may_load(deps.storage, &hash)?;
            to_json_binary(&CancellationResponse { requested_at })
        }
        QueryMsg::MessageCancellationDelay {} => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&CancellationDelayResponse {
                delay_seconds: config.message_cancellation_delay,
            })
        }
        QueryMsg::Config {} => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&ConfigResponse {
                owner: config.owner,
                native_denom: config.native_denom,
                message_cancellation_delay: config.message_cancellation_delay,
            })
        }
        QueryMsg::LastL1ToL2Message {} => {
            let message = LAST_L1_TO_L2_MESSAGE.may_load(deps.storage)?;
            let msg_hash = message.as_ref().map(|m| bytes32_to_hex(&m.hash()));
            to_json_binary(&LastMessageResponse { message, msg_hash })
        }
        QueryMsg::Stats {} => to_json_binary(&STATS.load(deps.storage)?),
    }
}

fn parse_query_hash(msg_hash: &str) -> StdResult<[u8; 32]> {
    hex_to_bytes32(msg_hash).map_err(cosmwasm_std::StdError::generic_err)
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
