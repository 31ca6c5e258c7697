//! Starkway Bridge - L1 Side of the Starknet Token Bridge
//!
//! The bridge accepts deposits, hands the funds to the vault and sends a
//! deposit message to the Starkway contract on L2. Withdrawals go the other
//! way: a message sent from L2 is consumed through the messaging oracle and
//! the vault releases the funds.
//!
//! # Deposit Flow
//! 1. User calls `DepositFunds` (or `DepositFundsWithMessage`) with the exact
//!    fee for the amount, see `fee_engine`
//! 2. On the token's first deposit, the vault initializes it on L2
//! 3. `amount + fee` moves into the vault, the deposit message goes to L2
//!
//! A deposit that is never handled on L2 can be canceled through the
//! oracle's delayed cancelation, refunding `amount + fee`.
//!
//! # Withdrawal Flow
//! Anyone may submit `WithdrawFunds` with the parameters of an L2
//! withdrawal. The oracle rejects messages it does not hold, so every
//! withdrawal is paid exactly once.

pub mod contract;
pub mod error;
mod execute;
pub mod fee_engine;
pub mod msg;
mod query;
pub mod state;
pub mod token_settings;
pub mod vault;

pub use crate::error::ContractError;
