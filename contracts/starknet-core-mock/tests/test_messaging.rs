//! Integration tests for the messaging oracle mock.
//!
//! Covers nonce assignment, consume-once semantics and the delayed
//! cancellation sub-protocol.

use common::felt::address_to_felt;
use common::message::{bytes32_to_hex, l1_to_l2_msg_hash, l2_to_l1_msg_hash};
use common::Felt;
use cosmwasm_std::{coins, from_json, Addr};
use cw_multi_test::{App, ContractWrapper, Executor};

use starknet_core_mock::msg::{
    CancellationResponse, ExecuteMsg, InstantiateMsg, L1ToL2MessageResponse,
    L2ToL1MessageResponse, LastMessageResponse, NonceResponse, QueryMsg,
};
use starknet_core_mock::state::Stats;

const DENOM: &str = "uluna";
const DELAY: u64 = 300;

// ============================================================================
// Test Setup
// ============================================================================

fn contract_mock() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        starknet_core_mock::contract::execute,
        starknet_core_mock::contract::instantiate,
        starknet_core_mock::contract::query,
    );
    Box::new(contract)
}

struct TestEnv {
    app: App,
    mock: Addr,
    owner: Addr,
    sender: Addr,
}

fn setup() -> TestEnv {
    let mut app = App::default();
    let owner = Addr::unchecked("terra1owner");
    let sender = Addr::unchecked("terra1sender");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &sender, coins(1_000_000, DENOM))
            .unwrap();
    });

    let code_id = app.store_code(contract_mock());
    let mock = app
        .instantiate_contract(
            code_id,
            owner.clone(),
            &InstantiateMsg {
                owner: owner.to_string(),
                native_denom: DENOM.to_string(),
                message_cancellation_delay: DELAY,
            },
            &[],
            "starknet-core-mock",
            None,
        )
        .unwrap();

    TestEnv {
        app,
        mock,
        owner,
        sender,
    }
}

fn send(env: &mut TestEnv, payload: Vec<Felt>) -> u64 {
    let res = env
        .app
        .execute_contract(
            env.sender.clone(),
            env.mock.clone(),
            &ExecuteMsg::SendMessageToL2 {
                to_address: Felt::from(100u128),
                selector: Felt::from(7u128),
                payload,
            },
            &coins(10, DENOM),
        )
        .unwrap();
    from_json(res.data.unwrap()).unwrap()
}

fn stats(env: &TestEnv) -> Stats {
    env.app
        .wrap()
        .query_wasm_smart(&env.mock, &QueryMsg::Stats {})
        .unwrap()
}

// ============================================================================
// Sending
// ============================================================================

#[test]
fn test_send_assigns_monotonic_nonces() {
    let mut env = setup();

    assert_eq!(send(&mut env, vec![Felt::from(1u128)]), 0);
    assert_eq!(send(&mut env, vec![Felt::from(1u128)]), 1);
    assert_eq!(send(&mut env, vec![]), 2);

    let nonce: NonceResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.mock, &QueryMsg::L1ToL2MessageNonce {})
        .unwrap();
    assert_eq!(nonce.nonce, 3);
    assert_eq!(stats(&env).send_message_count, 3);

    let last: LastMessageResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.mock, &QueryMsg::LastL1ToL2Message {})
        .unwrap();
    let message = last.message.unwrap();
    assert_eq!(message.nonce, 2);
    assert_eq!(last.msg_hash.unwrap(), bytes32_to_hex(&message.hash()));

    let pending: L1ToL2MessageResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.mock,
            &QueryMsg::L1ToL2Message {
                msg_hash: bytes32_to_hex(&message.hash()),
            },
        )
        .unwrap();
    assert_eq!(pending.fee, Some(cosmwasm_std::Uint128::new(10)));
}

#[test]
fn test_send_requires_fee() {
    let mut env = setup();

    let err = env
        .app
        .execute_contract(
            env.sender.clone(),
            env.mock.clone(),
            &ExecuteMsg::SendMessageToL2 {
                to_address: Felt::from(100u128),
                selector: Felt::from(7u128),
                payload: vec![],
            },
            &[],
        )
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Fee must be greater than 0"));
}

// ============================================================================
// Consumption
// ============================================================================

#[test]
fn test_consume_once() {
    let mut env = setup();
    let consumer = Addr::unchecked("terra1consumer");
    let from_l2 = Felt::from(555u128);
    let to_l1 = address_to_felt(env.app.api(), &consumer).unwrap();
    let payload = vec![Felt::from(1u128), Felt::from(2u128)];

    // Nothing delivered yet
    let err = env
        .app
        .execute_contract(
            consumer.clone(),
            env.mock.clone(),
            &ExecuteMsg::ConsumeMessageFromL2 {
                from_address: from_l2,
                payload: payload.clone(),
            },
            &[],
        )
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("No message to be consumed"));

    env.app
        .execute_contract(
            env.owner.clone(),
            env.mock.clone(),
            &ExecuteMsg::AddL2ToL1Message {
                from_address: from_l2,
                to_address: to_l1,
                payload: payload.clone(),
            },
            &[],
        )
        .unwrap();

    // Mismatched content is not the same message
    let err = env
        .app
        .execute_contract(
            consumer.clone(),
            env.mock.clone(),
            &ExecuteMsg::ConsumeMessageFromL2 {
                from_address: from_l2,
                payload: vec![Felt::from(1u128), Felt::from(3u128)],
            },
            &[],
        )
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("No message to be consumed"));

    let res = env
        .app
        .execute_contract(
            consumer.clone(),
            env.mock.clone(),
            &ExecuteMsg::ConsumeMessageFromL2 {
                from_address: from_l2,
                payload: payload.clone(),
            },
            &[],
        )
        .unwrap();
    let expected_hash = l2_to_l1_msg_hash(&from_l2, &to_l1, &payload);
    assert_eq!(res.data.unwrap().to_vec(), expected_hash.to_vec());

    // Replay
    let err = env
        .app
        .execute_contract(
            consumer,
            env.mock.clone(),
            &ExecuteMsg::ConsumeMessageFromL2 {
                from_address: from_l2,
                payload,
            },
            &[],
        )
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Message already consumed"));

    let ledger: L2ToL1MessageResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.mock,
            &QueryMsg::L2ToL1Message {
                msg_hash: bytes32_to_hex(&expected_hash),
            },
        )
        .unwrap();
    assert_eq!(ledger.pending, 0);
    assert_eq!(ledger.consumed, 1);
    assert_eq!(stats(&env).consume_message_count, 1);
}

#[test]
fn test_l2_hooks_are_owner_only() {
    let mut env = setup();

    let err = env
        .app
        .execute_contract(
            env.sender.clone(),
            env.mock.clone(),
            &ExecuteMsg::AddL2ToL1Message {
                from_address: Felt::from(1u128),
                to_address: Felt::from(2u128),
                payload: vec![],
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Unauthorized"));

    let err = env
        .app
        .execute_contract(
            env.sender.clone(),
            env.mock.clone(),
            &ExecuteMsg::ResetCounters {},
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Unauthorized"));
}

// ============================================================================
// Cancellation
// ============================================================================

#[test]
fn test_cancellation_flow() {
    let mut env = setup();
    let payload = vec![Felt::from(42u128)];
    let nonce = send(&mut env, payload.clone());

    let cancel_msg = ExecuteMsg::CancelL1ToL2Message {
        to_address: Felt::from(100u128),
        selector: Felt::from(7u128),
        payload: payload.clone(),
        nonce,
    };
    let start_msg = ExecuteMsg::StartL1ToL2MessageCancellation {
        to_address: Felt::from(100u128),
        selector: Felt::from(7u128),
        payload: payload.clone(),
        nonce,
    };

    let err = env
        .app
        .execute_contract(env.sender.clone(), env.mock.clone(), &cancel_msg, &[])
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Message cancellation not requested"));

    env.app
        .execute_contract(env.sender.clone(), env.mock.clone(), &start_msg, &[])
        .unwrap();

    let from = address_to_felt(env.app.api(), &env.sender).unwrap();
    let msg_hash = l1_to_l2_msg_hash(
        &from,
        &Felt::from(100u128),
        nonce,
        &Felt::from(7u128),
        &payload,
    );
    let requested: CancellationResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.mock,
            &QueryMsg::L1ToL2MessageCancellation {
                msg_hash: bytes32_to_hex(&msg_hash),
            },
        )
        .unwrap();
    assert!(requested.requested_at.is_some());

    // One second short of the delay
    env.app
        .update_block(|block| block.time = block.time.plus_seconds(DELAY - 1));
    let err = env
        .app
        .execute_contract(env.sender.clone(), env.mock.clone(), &cancel_msg, &[])
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Message cancellation not allowed yet"));

    env.app
        .update_block(|block| block.time = block.time.plus_seconds(1));
    env.app
        .execute_contract(env.sender.clone(), env.mock.clone(), &cancel_msg, &[])
        .unwrap();

    let err = env
        .app
        .execute_contract(env.sender.clone(), env.mock.clone(), &cancel_msg, &[])
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("No message to cancel"));

    let s = stats(&env);
    assert_eq!(s.start_cancellation_count, 1);
    assert_eq!(s.cancel_message_count, 1);
}

#[test]
fn test_cannot_cancel_message_handled_by_l2() {
    let mut env = setup();
    let nonce = send(&mut env, vec![]);

    let last: LastMessageResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.mock, &QueryMsg::LastL1ToL2Message {})
        .unwrap();
    env.app
        .execute_contract(
            env.owner.clone(),
            env.mock.clone(),
            &ExecuteMsg::ConsumeL1ToL2Message {
                msg_hash: last.msg_hash.unwrap(),
            },
            &[],
        )
        .unwrap();

    let err = env
        .app
        .execute_contract(
            env.sender.clone(),
            env.mock.clone(),
            &ExecuteMsg::StartL1ToL2MessageCancellation {
                to_address: Felt::from(100u128),
                selector: Felt::from(7u128),
                payload: vec![],
                nonce,
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("No message to cancel"));
}

#[test]
fn test_invalid_cancellation_delay_rejected() {
    let mut app = App::default();
    let owner = Addr::unchecked("terra1owner");
    let code_id = app.store_code(contract_mock());

    for delay in [59u64, 604_801] {
        let err = app
            .instantiate_contract(
                code_id,
                owner.clone(),
                &InstantiateMsg {
                    owner: owner.to_string(),
                    native_denom: DENOM.to_string(),
                    message_cancellation_delay: delay,
                },
                &[],
                "starknet-core-mock",
                None,
            )
            .unwrap_err();
        assert!(err
            .root_cause()
            .to_string()
            .contains("Invalid cancellation delay"));
    }
}
