//! Execute message handlers for the Starkway bridge.
//!
//! - `deposit` - Deposits and the deposit message layout
//! - `cancelation` - Deposit cancelation and refund
//! - `withdraw` - Withdrawals and withdrawal batches
//! - `settings` - Token settings and deposit switches
//! - `admin` - Admin transfer

pub(crate) mod admin;
pub(crate) mod cancelation;
pub(crate) mod deposit;
pub(crate) mod settings;
pub(crate) mod withdraw;

pub use admin::*;
pub use cancelation::*;
pub use deposit::*;
pub use settings::*;
pub use withdraw::*;

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
