//! Deposit cancelation handlers.
//!
//! Cancelation goes through the oracle's delayed sub-protocol: the deposit
//! message is re-derived from the given parameters, cancelation is
//! requested, and after the oracle's delay the message is canceled and
//! `amount + fee` is refunded from the vault to the depositor.
//!
//! A started cancelation cannot be aborted; it is either finished or left
//! pending. If L2 handles the deposit first, finishing fails in the oracle.

use common::felt::felts_from_uints;
use common::message::bytes32_to_hex;
use common::{AssetInfo, DepositMessage, Felt, L1ToL2Message, MessagingContract};
use cosmwasm_std::{Addr, Deps, DepsMut, Env, MessageInfo, Response, StdError, Uint128, Uint256};

use crate::error::ContractError;
use crate::execute::deposit::{deposit_message, validate_token};
use crate::execute::ensure_admin;
use crate::state::CONFIG;
use crate::vault::VaultContract;

/// Deposit parameters identifying the message to cancel
pub struct CanceledDeposit {
    pub token: AssetInfo,
    pub sender_l1: Addr,
    pub recipient_l2: Uint256,
    pub deposit_amount: Uint128,
    pub fee_amount: Uint128,
    pub message_recipient: Uint256,
    pub message_payload: Vec<Uint256>,
    pub nonce: u64,
}

impl CanceledDeposit {
    /// Re-derive the L1 -> L2 message of the deposit.
    fn message(&self, deps: Deps, env: &Env) -> Result<(AssetInfo, L1ToL2Message), ContractError> {
        let config = CONFIG.load(deps.storage)?;
        let token = validate_token(deps, &config, &self.token)?;
        let message = if self.message_recipient.is_zero() {
            None
        } else {
            Some(DepositMessage {
                recipient: Felt::new(self.message_recipient)?,
                payload: felts_from_uints(&self.message_payload)?,
            })
        };

        let l1_message = deposit_message(
            deps,
            env,
            &config,
            &token,
            &self.sender_l1,
            Felt::new(self.recipient_l2)?,
            self.deposit_amount,
            self.fee_amount,
            message.as_ref(),
            self.nonce,
        )?;
        Ok((token, l1_message))
    }
}

// ============================================================================
// Start
// ============================================================================

/// Request cancelation of the caller's own deposit.
pub fn execute_start_deposit_cancelation(
    deps: DepsMut,
    env: Env,
    deposit: CanceledDeposit,
) -> Result<Response, ContractError> {
    start_cancelation(deps.as_ref(), &env, deposit, "start_deposit_cancelation")
}

/// Request cancelation of any deposit (admin only).
pub fn execute_start_deposit_cancelation_by_owner(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    deposit: CanceledDeposit,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;
    start_cancelation(
        deps.as_ref(),
        &env,
        deposit,
        "start_deposit_cancelation_by_owner",
    )
}

fn start_cancelation(
    deps: Deps,
    env: &Env,
    deposit: CanceledDeposit,
    action: &str,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let (token, l1_message) = deposit.message(deps, env)?;
    let msg_hash = l1_message.hash();

    let messaging = MessagingContract(config.messaging);
    let start_msg = messaging.start_cancellation(
        l1_message.to_address,
        l1_message.selector,
        l1_message.payload,
        l1_message.nonce,
    )?;

    Ok(Response::new()
        .add_message(start_msg)
        .add_attribute("action", action)
        .add_attribute("token", token.key())
        .add_attribute("sender_l1", deposit.sender_l1)
        .add_attribute("amount", deposit.deposit_amount)
        .add_attribute("fee", deposit.fee_amount)
        .add_attribute("nonce", deposit.nonce.to_string())
        .add_attribute("msg_hash", bytes32_to_hex(&msg_hash)))
}

// ============================================================================
// Finish
// ============================================================================

/// Cancel the caller's own deposit and refund it.
pub fn execute_finish_deposit_cancelation(
    deps: DepsMut,
    env: Env,
    deposit: CanceledDeposit,
) -> Result<Response, ContractError> {
    finish_cancelation(deps.as_ref(), &env, deposit, "finish_deposit_cancelation")
}

/// Cancel any deposit and refund its depositor (admin only).
pub fn execute_finish_deposit_cancelation_by_owner(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    deposit: CanceledDeposit,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;
    finish_cancelation(
        deps.as_ref(),
        &env,
        deposit,
        "finish_deposit_cancelation_by_owner",
    )
}

fn finish_cancelation(
    deps: Deps,
    env: &Env,
    deposit: CanceledDeposit,
    action: &str,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let (token, l1_message) = deposit.message(deps, env)?;
    let msg_hash = l1_message.hash();
    let refund = deposit
        .deposit_amount
        .checked_add(deposit.fee_amount)
        .map_err(StdError::from)?;

    let messaging = MessagingContract(config.messaging);
    let cancel_msg = messaging.cancel_message(
        l1_message.to_address,
        l1_message.selector,
        l1_message.payload,
        l1_message.nonce,
    )?;
    let vault = VaultContract(config.vault);
    let refund_msg = vault.withdraw(&token, &deposit.sender_l1, refund)?;

    Ok(Response::new()
        .add_message(cancel_msg)
        .add_message(refund_msg)
        .add_attribute("action", action)
        .add_attribute("token", token.key())
        .add_attribute("sender_l1", deposit.sender_l1)
        .add_attribute("refund", refund)
        .add_attribute("nonce", deposit.nonce.to_string())
        .add_attribute("msg_hash", bytes32_to_hex(&msg_hash)))
}
