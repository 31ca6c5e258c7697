//! Withdrawal handlers.
//!
//! A withdrawal consumes the L2 -> L1 message carrying it, then releases
//! the funds from the vault. The oracle keys messages by content hash, so
//! each withdrawal goes through at most once, in any order.

use common::felt::address_to_felt;
use common::message::{bytes32_to_hex, withdrawal_payload};
use common::{AssetInfo, Felt, L2ToL1Message, MessagingContract};
use cosmwasm_std::{Addr, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::execute::deposit::validate_token;
use crate::execute::ensure_admin;
use crate::msg::Withdrawal;
use crate::state::{Config, CONFIG};
use crate::vault::VaultContract;

/// Consume the withdrawal message and pay `recipient_l1`.
pub fn execute_withdraw_funds(
    deps: DepsMut,
    env: Env,
    withdrawal: Withdrawal,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let prepared = prepare_withdrawal(deps.as_ref(), &env, &config, &withdrawal)?;
    let msg_hash = prepared.message.hash();
    let msgs = prepared.msgs(&config, &prepared.recipient)?;

    Ok(Response::new()
        .add_messages(msgs)
        .add_attribute("action", "withdraw")
        .add_attribute("token", prepared.token.key())
        .add_attribute("recipient_l1", prepared.recipient)
        .add_attribute("sender_l2", withdrawal.sender_l2.to_string())
        .add_attribute("amount", withdrawal.amount)
        .add_attribute("msg_hash", bytes32_to_hex(&msg_hash)))
}

/// Process several withdrawals in one transaction (admin only).
///
/// One failing withdrawal reverts the whole batch.
pub fn execute_process_withdrawals_batch(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    withdrawals: Vec<Withdrawal>,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;
    if withdrawals.is_empty() {
        return Err(ContractError::EmptyBatch);
    }
    let config = CONFIG.load(deps.storage)?;

    let mut msgs: Vec<CosmosMsg> = vec![];
    for withdrawal in &withdrawals {
        let prepared = prepare_withdrawal(deps.as_ref(), &env, &config, withdrawal)?;
        msgs.extend(prepared.msgs(&config, &prepared.recipient)?);
    }

    Ok(Response::new()
        .add_messages(msgs)
        .add_attribute("action", "process_withdrawals_batch")
        .add_attribute("count", withdrawals.len().to_string()))
}

/// Consume withdrawals whose recipient cannot be paid and send the funds to
/// `refund_to` instead (admin only).
pub fn execute_process_failed_withdrawals(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    withdrawals: Vec<Withdrawal>,
    refund_to: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;
    if withdrawals.is_empty() {
        return Err(ContractError::EmptyBatch);
    }
    if refund_to.is_empty() {
        return Err(ContractError::TransferToZero);
    }
    let refund_to = deps.api.addr_validate(&refund_to)?;
    let config = CONFIG.load(deps.storage)?;

    let mut msgs: Vec<CosmosMsg> = vec![];
    for withdrawal in &withdrawals {
        let prepared = prepare_withdrawal(deps.as_ref(), &env, &config, withdrawal)?;
        msgs.extend(prepared.msgs(&config, &refund_to)?);
    }

    Ok(Response::new()
        .add_messages(msgs)
        .add_attribute("action", "process_failed_withdrawals")
        .add_attribute("refund_to", refund_to)
        .add_attribute("count", withdrawals.len().to_string()))
}

// ============================================================================
// Helpers
// ============================================================================

pub(crate) struct PreparedWithdrawal {
    pub token: AssetInfo,
    pub recipient: Addr,
    pub amount: Uint128,
    /// The L2 -> L1 message the withdrawal consumes
    pub message: L2ToL1Message,
}

impl PreparedWithdrawal {
    /// Consume the message, then pay `pay_to` from the vault.
    fn msgs(&self, config: &Config, pay_to: &Addr) -> Result<Vec<CosmosMsg>, ContractError> {
        let messaging = MessagingContract(config.messaging.clone());
        let vault = VaultContract(config.vault.clone());
        Ok(vec![
            messaging.consume_message_from_l2(
                self.message.from_address,
                self.message.payload.clone(),
            )?,
            vault.withdraw(&self.token, pay_to, self.amount)?,
        ])
    }
}

pub(crate) fn prepare_withdrawal(
    deps: Deps,
    env: &Env,
    config: &Config,
    withdrawal: &Withdrawal,
) -> Result<PreparedWithdrawal, ContractError> {
    let token = validate_token(deps, config, &withdrawal.token)?;
    if withdrawal.recipient_l1.is_empty() {
        return Err(ContractError::TransferToZero);
    }
    let recipient = deps.api.addr_validate(&withdrawal.recipient_l1)?;
    let sender_l2 = Felt::new(withdrawal.sender_l2)?;

    let vault = VaultContract(config.vault.clone());
    if !vault.is_initialized(&deps.querier, &token)? {
        return Err(ContractError::TokenNotInitialized { token: token.key() });
    }

    let payload = withdrawal_payload(
        token.to_felt(deps.api)?,
        address_to_felt(deps.api, &recipient)?,
        sender_l2,
        withdrawal.amount,
    );
    let message = L2ToL1Message {
        from_address: config.starkway_l2,
        to_address: address_to_felt(deps.api, &env.contract.address)?,
        payload,
    };
    Ok(PreparedWithdrawal {
        token,
        recipient,
        amount: withdrawal.amount,
        message,
    })
}
