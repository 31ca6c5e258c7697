//! Messaging oracle interface
//!
//! The bridge and the vault only depend on the four messaging primitives
//! below and on a handful of read-only queries. Any contract accepting these
//! messages (the Starknet core contract, or its in-repo mock) can back them.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_json_binary, Addr, Coin, CosmosMsg, QuerierWrapper, StdResult, Timestamp, Uint128, WasmMsg,
};

use crate::felt::Felt;

#[cw_serde]
pub enum MessagingExecuteMsg {
    /// Send a message to an L2 contract. The attached native coins pay the
    /// L2 handling fee and must be non-zero. Response data is the nonce.
    SendMessageToL2 {
        to_address: Felt,
        selector: Felt,
        payload: Vec<Felt>,
    },
    /// Consume a message sent from L2 to the caller. Response data is the
    /// message hash.
    ConsumeMessageFromL2 {
        from_address: Felt,
        payload: Vec<Felt>,
    },
    /// Start the cancellation of an L1 -> L2 message sent by the caller.
    StartL1ToL2MessageCancellation {
        to_address: Felt,
        selector: Felt,
        payload: Vec<Felt>,
        nonce: u64,
    },
    /// Cancel an L1 -> L2 message once the cancellation delay has elapsed.
    CancelL1ToL2Message {
        to_address: Felt,
        selector: Felt,
        payload: Vec<Felt>,
        nonce: u64,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum MessagingQueryMsg {
    /// Nonce the next L1 -> L2 message will receive
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
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct L1ToL2MessageResponse {
    /// Fee paid for a pending message, `None` if nothing is pending
    pub fee: Option<Uint128>,
}

#[cw_serde]
pub struct L2ToL1MessageResponse {
    /// Number of pending, not yet consumed, copies
    pub pending: u64,
    /// Number of copies consumed so far
    pub consumed: u64,
}

#[cw_serde]
pub struct CancellationResponse {
    /// Time the cancellation was requested, if it was
    pub requested_at: Option<Timestamp>,
}

#[cw_serde]
pub struct CancellationDelayResponse {
    pub delay_seconds: u64,
}

/// Helper for building messages to, and querying, a messaging oracle
#[cw_serde]
pub struct MessagingContract(pub Addr);

impl MessagingContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call(&self, msg: MessagingExecuteMsg, funds: Vec<Coin>) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg: to_json_binary(&msg)?,
            funds,
        }
        .into())
    }

    pub fn send_message_to_l2(
        &self,
        to_address: Felt,
        selector: Felt,
        payload: Vec<Felt>,
        fee: Vec<Coin>,
    ) -> StdResult<CosmosMsg> {
        self.call(
            MessagingExecuteMsg::SendMessageToL2 {
                to_address,
                selector,
                payload,
            },
            fee,
        )
    }

    pub fn consume_message_from_l2(
        &self,
        from_address: Felt,
        payload: Vec<Felt>,
    ) -> StdResult<CosmosMsg> {
        self.call(
            MessagingExecuteMsg::ConsumeMessageFromL2 {
                from_address,
                payload,
            },
            vec![],
        )
    }

    pub fn start_cancellation(
        &self,
        to_address: Felt,
        selector: Felt,
        payload: Vec<Felt>,
        nonce: u64,
    ) -> StdResult<CosmosMsg> {
        self.call(
            MessagingExecuteMsg::StartL1ToL2MessageCancellation {
                to_address,
                selector,
                payload,
                nonce,
            },
            vec![],
        )
    }

    pub fn cancel_message(
        &self,
        to_address: Felt,
        selector: Felt,
        payload: Vec<Felt>,
        nonce: u64,
    ) -> StdResult<CosmosMsg> {
        self.call(
            MessagingExecuteMsg::CancelL1ToL2Message {
                to_address,
                selector,
                payload,
                nonce,
            },
            vec![],
        )
    }

    /// Nonce the next message sent through this oracle will receive.
    pub fn next_nonce(&self, querier: &QuerierWrapper) -> StdResult<u64> {
        let res: NonceResponse =
            querier.query_wasm_smart(self.addr(), &MessagingQueryMsg::L1ToL2MessageNonce {})?;
        Ok(res.nonce)
    }

    pub fn cancellation_delay(&self, querier: &QuerierWrapper) -> StdResult<u64> {
        let res: CancellationDelayResponse = querier
            .query_wasm_smart(self.addr(), &MessagingQueryMsg::MessageCancellationDelay {})?;
        Ok(res.delay_seconds)
    }
}
