//! Admin transfer handlers (propose/accept/cancel).

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::execute::ensure_admin;
use crate::state::{PendingAdmin, CONFIG, PENDING_ADMIN};

/// Propose a new admin; the proposal takes effect once accepted.
pub fn execute_propose_admin(
    deps: DepsMut,
    info: MessageInfo,
    new_admin: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;

    let new_address = deps.api.addr_validate(&new_admin)?;
    PENDING_ADMIN.save(
        deps.storage,
        &PendingAdmin {
            new_address: new_address.clone(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "propose_admin")
        .add_attribute("new_admin", new_address))
}

pub fn execute_accept_admin(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let pending = PENDING_ADMIN
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingAdmin)?;

    if info.sender != pending.new_address {
        return Err(ContractError::UnauthorizedPendingAdmin);
    }

    let mut config = CONFIG.load(deps.storage)?;
    let old_admin = config.admin;
    config.admin = pending.new_address.clone();
    CONFIG.save(deps.storage, &config)?;
    PENDING_ADMIN.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("action", "accept_admin")
        .add_attribute("old_admin", old_admin)
        .add_attribute("new_admin", pending.new_address))
}

pub fn execute_cancel_admin_proposal(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;
    PENDING_ADMIN.remove(deps.storage);

    Ok(Response::new().add_attribute("action", "cancel_admin_proposal"))
}
