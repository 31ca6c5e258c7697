//! Execute handlers for the Starkway vault.
//!
//! - `custody` - token initialization, deposits and withdrawals
//! - `connection` - the bridge connection state machine
//! - `admin` - admin transfer (propose/accept/cancel)

mod admin;
mod connection;
mod custody;

pub use admin::*;
pub use connection::*;
pub use custody::*;

use cosmwasm_std::{Deps, MessageInfo};

use crate::error::ContractError;
use crate::state::CONFIG;

pub(crate) fn ensure_admin(deps: Deps, info: &MessageInfo) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}
