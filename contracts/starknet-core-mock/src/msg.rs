//! Message types for the messaging oracle mock
//!
//! `ExecuteMsg` and `QueryMsg` are wire-compatible supersets of
//! `common::messaging::{MessagingExecuteMsg, MessagingQueryMsg}`.

use common::{Felt, L1ToL2Message};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

pub use common::messaging::{
    CancellationDelayResponse, CancellationResponse, L1ToL2MessageResponse,
    L2ToL1MessageResponse, NonceResponse,
};

use crate::state::Stats;

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    /// Account allowed to play the part of L2
    pub owner: String,
    /// Denom message fees are paid in
    pub native_denom: String,
    /// Seconds between starting and finishing a cancellation (60..=604800)
    pub message_cancellation_delay: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Messaging Primitives
    // ========================================================================
    SendMessageToL2 {
        to_address: Felt,
        selector: Felt,
        payload: Vec<Felt>,
    },
    ConsumeMessageFromL2 {
        from_address: Felt,
        payload: Vec<Felt>,
    },
    StartL1ToL2MessageCancellation {
        to_address: Felt,
        selector: Felt,
        payload: Vec<Felt>,
        nonce: u64,
    },
    CancelL1ToL2Message {
        to_address: Felt,
        selector: Felt,
        payload: Vec<Felt>,
        nonce: u64,
    },

    // ========================================================================
    // L2 Hooks (owner only)
    // ========================================================================
    /// Deliver an L2 -> L1 message, as a proven L2 state update would
    AddL2ToL1Message {
        from_address: Felt,
        to_address: Felt,
        payload: Vec<Felt>,
    },
    /// Mark an L1 -> L2 message as handled by L2
    ConsumeL1ToL2Message { msg_hash: String },
    SetMessageCancellationDelay { delay_seconds: u64 },
    ResetCounters {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(NonceResponse)]
    L1ToL2MessageNonce {},

    #[returns(L1ToL2MessageResponse)]
    L1ToL2Message { msg_hash: String },

    #[returns(L2ToL1MessageResponse)]
    L2ToL1Message { msg_hash: String },

    #[returns(CancellationResponse)]
    L1ToL2MessageCancellation { msg_hash: String },

    #[returns(CancellationDelayResponse)]
    MessageCancellationDelay {},

    #[returns(ConfigResponse)]
    Config {},

    #[returns(LastMessageResponse)]
    LastL1ToL2Message {},

    #[returns(Stats)]
    Stats {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub native_denom: String,
    pub message_cancellation_delay: u64,
}

#[cw_serde]
pub struct LastMessageResponse {
    pub message: Option<L1ToL2Message>,
    /// Hex hash of `message`
    pub msg_hash: Option<String>,
}
