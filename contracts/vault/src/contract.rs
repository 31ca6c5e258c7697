//! Starkway Vault - Entry Points
//!
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_admin, execute_cancel_admin_proposal, execute_deposit_to_vault,
    execute_disconnect_starkway, execute_finalize_connection_process, execute_init_token,
    execute_propose_admin, execute_start_connection_process, execute_withdraw_from_vault,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_all_connections, query_config, query_connection_state, query_is_connected,
    query_is_token_initialized, query_number_of_supported_tokens, query_pending_admin,
    query_prepare_init_message, query_supported_tokens, query_supported_tokens_with_balance,
    query_token_metadata,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, SUPPORTED_TOKEN_COUNT};

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

    if msg.vault_l2.is_zero() {
        return Err(ContractError::ZeroAddress);
    }

    let config = Config {
        admin: deps.api.addr_validate(&msg.admin)?,
        messaging: deps.api.addr_validate(&msg.messaging)?,
        vault_l2: msg.vault_l2,
        connection_delay: msg.connection_delay,
        native_asset: msg.native_asset,
    };
    CONFIG.save(deps.storage, &config)?;
    SUPPORTED_TOKEN_COUNT.save(deps.storage, &0u32)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("messaging", config.messaging)
        .add_attribute("vault_l2", config.vault_l2.to_string())
        .add_attribute("connection_delay", config.connection_delay.to_string())
        .add_attribute("native_denom", config.native_asset.denom))
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
        ExecuteMsg::InitToken { token } => execute_init_token(deps, info, token),

        // Custody
        ExecuteMsg::DepositToVault {
            token,
            depositor,
            amount,
        } => execute_deposit_to_vault(deps, env, info, token, depositor, amount),
        ExecuteMsg::WithdrawFromVault {
            token,
            recipient,
            amount,
        } => execute_withdraw_from_vault(deps, info, token, recipient, amount),

        // Connection process
        ExecuteMsg::StartConnectionProcess { address } => {
            execute_start_connection_process(deps, env, info, address)
        }
        ExecuteMsg::FinalizeConnectionProcess { address } => {
            execute_finalize_connection_process(deps, env, info, address)
        }
        ExecuteMsg::DisconnectStarkway { address } => {
            execute_disconnect_starkway(deps, info, address)
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
        QueryMsg::IsTokenInitialized { token } => {
            to_json_binary(&query_is_token_initialized(deps, token)?)
        }
        QueryMsg::NumberOfSupportedTokens {} => {
            to_json_binary(&query_number_of_supported_tokens(deps)?)
        }
        QueryMsg::SupportedTokens { start_after, limit } => {
            to_json_binary(&query_supported_tokens(deps, start_after, limit)?)
        }
        QueryMsg::ConnectionState { address } => {
            to_json_binary(&query_connection_state(deps, address)?)
        }
        QueryMsg::AllConnections {} => to_json_binary(&query_all_connections(deps)?),
        QueryMsg::IsConnected { address } => to_json_binary(&query_is_connected(deps, address)?),
        QueryMsg::PrepareInitMessage { token } => {
            to_json_binary(&query_prepare_init_message(deps, env, token)?)
        }
        QueryMsg::TokenMetadata { token } => to_json_binary(&query_token_metadata(deps, token)?),
        QueryMsg::SupportedTokensWithBalance {
            account,
            start_after,
            limit,
        } => to_json_binary(&query_supported_tokens_with_balance(
            deps,
            account,
            start_after,
            limit,
        )?),
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
