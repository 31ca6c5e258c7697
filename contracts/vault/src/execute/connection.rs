//! Bridge connection state machine.
//!
//! | from                        | operation  | to             |
//! |-----------------------------|------------|----------------|
//! | NotConnected / Disconnected | start      | ToBeConnected  |
//! | ToBeConnected (delay over)  | finalize   | Connected      |
//! | Connected (not the last)    | disconnect | Disconnected   |
//!
//! Once any version has connected, at least one stays connected.

use cosmwasm_std::{Addr, Api, DepsMut, Env, MessageInfo, Order, Response, StdResult};

use super::ensure_admin;
use crate::error::ContractError;
use crate::state::{ConnectionState, ConnectionStatus, CONFIG, CONNECTIONS, CONNECTION_ORDER};

fn validate_bridge_address(api: &dyn Api, address: &str) -> Result<Addr, ContractError> {
    if address.is_empty() {
        return Err(ContractError::ZeroAddress);
    }
    Ok(api.addr_validate(address)?)
}

fn invalid_status(status: &ConnectionStatus) -> ContractError {
    ContractError::InvalidConnectionStatus {
        status: status.as_str().to_string(),
    }
}

/// Begin connecting a bridge version; it may connect after the delay.
pub fn execute_start_connection_process(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;
    let bridge = validate_bridge_address(deps.api, &address)?;
    let config = CONFIG.load(deps.storage)?;

    let current = CONNECTIONS.may_load(deps.storage, &bridge)?;
    match current.as_ref().map(|state| &state.status) {
        None | Some(ConnectionStatus::NotConnected) | Some(ConnectionStatus::Disconnected) => {}
        Some(status) => return Err(invalid_status(status)),
    }

    if current.is_none() {
        let mut order = CONNECTION_ORDER.may_load(deps.storage)?.unwrap_or_default();
        order.push(bridge.clone());
        CONNECTION_ORDER.save(deps.storage, &order)?;
    }

    let state = ConnectionState {
        status: ConnectionStatus::ToBeConnected,
        activation_time: env.block.time.plus_seconds(config.connection_delay),
    };
    CONNECTIONS.save(deps.storage, &bridge, &state)?;

    Ok(Response::new()
        .add_attribute("action", "start_connection_process")
        .add_attribute("bridge", bridge)
        .add_attribute("activation_time", state.activation_time.seconds().to_string()))
}

/// Connect a bridge version whose delay has elapsed.
pub fn execute_finalize_connection_process(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;
    let bridge = validate_bridge_address(deps.api, &address)?;

    let mut state = CONNECTIONS
        .may_load(deps.storage, &bridge)?
        .ok_or_else(|| invalid_status(&ConnectionStatus::NotConnected))?;
    if state.status != ConnectionStatus::ToBeConnected {
        return Err(invalid_status(&state.status));
    }

    if env.block.time < state.activation_time {
        return Err(ContractError::TooEarlyToConnect {
            remaining_seconds: state.activation_time.seconds() - env.block.time.seconds(),
        });
    }

    state.status = ConnectionStatus::Connected;
    CONNECTIONS.save(deps.storage, &bridge, &state)?;

    Ok(Response::new()
        .add_attribute("action", "finalize_connection_process")
        .add_attribute("bridge", bridge))
}

/// Disconnect a bridge version, unless it is the last connected one.
pub fn execute_disconnect_starkway(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;
    let bridge = validate_bridge_address(deps.api, &address)?;

    let mut state = CONNECTIONS
        .may_load(deps.storage, &bridge)?
        .ok_or_else(|| invalid_status(&ConnectionStatus::NotConnected))?;
    if state.status != ConnectionStatus::Connected {
        return Err(invalid_status(&state.status));
    }

    let connections = CONNECTIONS
        .range(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<_>>>()?;
    let connected = connections
        .iter()
        .filter(|(_, s)| s.status == ConnectionStatus::Connected)
        .count();
    if connected <= 1 {
        return Err(ContractError::MustRemainConnectedVersion);
    }

    state.status = ConnectionStatus::Disconnected;
    CONNECTIONS.save(deps.storage, &bridge, &state)?;

    Ok(Response::new()
        .add_attribute("action", "disconnect_starkway")
        .add_attribute("bridge", bridge)
        .add_attribute("remaining_connected", (connected - 1).to_string()))
}
