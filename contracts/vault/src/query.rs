//! Query handlers for the Starkway vault.

use common::felt::address_to_felt;
use common::message::{init_payload, selector, TOKEN_INITIALIZATION_SELECTOR_NAME};
use common::{AssetInfo, L1ToL2Message, MessagingContract, TokenMetadata};
use cosmwasm_std::{Deps, Env, Order, StdError, StdResult};
use cw_storage_plus::Bound;

use crate::metadata::{read_metadata, try_read_balance};
use crate::msg::{
    AllConnectionsResponse, ConfigResponse, ConnectionStateResponse, IsConnectedResponse,
    IsTokenInitializedResponse, NumberOfSupportedTokensResponse, PendingAdminResponse,
    SupportedTokensResponse, TokenInfo, TokensWithBalanceResponse,
};
use crate::state::{
    ConnectionStatus, CONFIG, CONNECTIONS, CONNECTION_ORDER, DEFAULT_LIMIT, INITIALIZED_TOKENS,
    MAX_LIMIT, PENDING_ADMIN, SUPPORTED_TOKENS, SUPPORTED_TOKEN_COUNT,
};

// ============================================================================
// Config
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        messaging: config.messaging,
        vault_l2: config.vault_l2,
        connection_delay: config.connection_delay,
        native_asset: config.native_asset,
    })
}

pub fn query_pending_admin(deps: Deps) -> StdResult<PendingAdminResponse> {
    let pending = PENDING_ADMIN.may_load(deps.storage)?;
    Ok(PendingAdminResponse {
        new_address: pending.map(|p| p.new_address),
    })
}

// ============================================================================
// Assets
// ============================================================================

pub fn query_is_token_initialized(
    deps: Deps,
    token: AssetInfo,
) -> StdResult<IsTokenInitializedResponse> {
    Ok(IsTokenInitializedResponse {
        initialized: INITIALIZED_TOKENS.has(deps.storage, &token.key()),
    })
}

pub fn query_number_of_supported_tokens(deps: Deps) -> StdResult<NumberOfSupportedTokensResponse> {
    Ok(NumberOfSupportedTokensResponse {
        count: SUPPORTED_TOKEN_COUNT.load(deps.storage)?,
    })
}

pub fn query_supported_tokens(
    deps: Deps,
    start_after: Option<u32>,
    limit: Option<u32>,
) -> StdResult<SupportedTokensResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let tokens = SUPPORTED_TOKENS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, token)| token))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(SupportedTokensResponse { tokens })
}

pub fn query_token_metadata(deps: Deps, token: AssetInfo) -> StdResult<TokenMetadata> {
    let config = CONFIG.load(deps.storage)?;
    let token = token.validate(deps.api)?;
    Ok(read_metadata(&deps.querier, &config, &token))
}

/// The exact message `InitToken` would send in the current state.
pub fn query_prepare_init_message(
    deps: Deps,
    env: Env,
    token: AssetInfo,
) -> StdResult<L1ToL2Message> {
    let config = CONFIG.load(deps.storage)?;
    let token = token.validate(deps.api)?;
    let metadata = read_metadata(&deps.querier, &config, &token);
    let payload = init_payload(
        token.to_felt(deps.api)?,
        &metadata.name,
        &metadata.symbol,
        metadata.decimals,
    )
    .map_err(|e| StdError::generic_err(e.to_string()))?;

    let messaging = MessagingContract(config.messaging);
    Ok(L1ToL2Message {
        from_address: address_to_felt(deps.api, &env.contract.address)?,
        to_address: config.vault_l2,
        selector: selector(TOKEN_INITIALIZATION_SELECTOR_NAME),
        payload,
        nonce: messaging.next_nonce(&deps.querier)?,
    })
}

/// Supported assets held by `account`.
///
/// A token whose balance cannot be read counts as a zero balance and is
/// skipped, so one broken token never fails the page.
pub fn query_supported_tokens_with_balance(
    deps: Deps,
    account: String,
    start_after: Option<u32>,
    limit: Option<u32>,
) -> StdResult<TokensWithBalanceResponse> {
    let config = CONFIG.load(deps.storage)?;
    let account = deps.api.addr_validate(&account)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let page = SUPPORTED_TOKENS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, token)| token))
        .collect::<StdResult<Vec<_>>>()?;

    let tokens = page
        .into_iter()
        .filter_map(|token| {
            let balance = try_read_balance(&deps.querier, &token, &account).unwrap_or_default();
            if balance.is_zero() {
                return None;
            }
            let metadata = read_metadata(&deps.querier, &config, &token);
            Some(TokenInfo {
                token,
                balance,
                name: metadata.name,
                symbol: metadata.symbol,
                decimals: metadata.decimals,
            })
        })
        .collect();

    Ok(TokensWithBalanceResponse { tokens })
}

// ============================================================================
// Connections
// ============================================================================

pub fn query_connection_state(deps: Deps, address: String) -> StdResult<ConnectionStateResponse> {
    let address = deps.api.addr_validate(&address)?;
    let state = CONNECTIONS.may_load(deps.storage, &address)?;
    Ok(match state {
        Some(state) => ConnectionStateResponse {
            address,
            status: state.status,
            activation_time: Some(state.activation_time),
        },
        None => ConnectionStateResponse {
            address,
            status: ConnectionStatus::NotConnected,
            activation_time: None,
        },
    })
}

pub fn query_all_connections(deps: Deps) -> StdResult<AllConnectionsResponse> {
    let order = CONNECTION_ORDER.may_load(deps.storage)?.unwrap_or_default();
    let connections = order
        .into_iter()
        .map(|address| {
            let state = CONNECTIONS.load(deps.storage, &address)?;
            Ok(ConnectionStateResponse {
                address,
                status: state.status,
                activation_time: Some(state.activation_time),
            })
        })
        .collect::<StdResult<Vec<_>>>()?;
    Ok(AllConnectionsResponse { connections })
}

pub fn query_is_connected(deps: Deps, address: String) -> StdResult<IsConnectedResponse> {
    let address = deps.api.addr_validate(&address)?;
    let connected = CONNECTIONS
        .may_load(deps.storage, &address)?
        .map(|state| state.status == ConnectionStatus::Connected)
        .unwrap_or(false);
    Ok(IsConnectedResponse { connected })
}
