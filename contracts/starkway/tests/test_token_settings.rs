//! Token Settings and Admin Integration Tests.
//!
//! Covers instantiation, per-token settings (validation, storage, fee
//! queries), the default fee rate and the two-step admin transfer.

use common::{AssetInfo, Felt};
use cosmwasm_std::{coins, Addr, Empty, Uint128};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};

use starknet_core_mock::msg::InstantiateMsg as MockInstantiateMsg;
use starkway::msg::{
    CalculateFeeResponse, ConfigResponse, ExecuteMsg, InstantiateMsg, PendingAdminResponse,
    QueryMsg, ValidateTokenSettingsResponse,
};
use starkway::state::{FeeSegment, TokenSettings};
use starkway_vault::msg::{ExecuteMsg as VaultExecuteMsg, InstantiateMsg as VaultInstantiateMsg};
use starkway_vault::state::NativeAsset;

const DENOM: &str = "uluna";
const INIT_FEE: u128 = 10;
const STARKWAY_L2: u128 = 0x57a4;
const VAULT_L2: u128 = 0x5a17;

// ============================================================================
// Test Setup
// ============================================================================

fn contract_bridge() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        starkway::contract::execute,
        starkway::contract::instantiate,
        starkway::contract::query,
    );
    Box::new(contract)
}

fn contract_vault() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        starkway_vault::contract::execute,
        starkway_vault::contract::instantiate,
        starkway_vault::contract::query,
    );
    Box::new(contract)
}

fn contract_mock() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        starknet_core_mock::contract::execute,
        starknet_core_mock::contract::instantiate,
        starknet_core_mock::contract::query,
    );
    Box::new(contract)
}

struct TestEnv {
    app: App,
    bridge: Addr,
    vault: Addr,
    mock: Addr,
    admin: Addr,
    user: Addr,
    bridge_code_id: u64,
}

fn setup() -> TestEnv {
    let mut app = App::default();
    let admin = Addr::unchecked("terra1admin");
    let user = Addr::unchecked("terra1user");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &user, coins(1_000_000, DENOM))
            .unwrap();
    });

    let mock_code_id = app.store_code(contract_mock());
    let vault_code_id = app.store_code(contract_vault());
    let bridge_code_id = app.store_code(contract_bridge());

    let mock = app
        .instantiate_contract(
            mock_code_id,
            admin.clone(),
            &MockInstantiateMsg {
                owner: admin.to_string(),
                native_denom: DENOM.to_string(),
                message_cancellation_delay: 300,
            },
            &[],
            "starknet-core-mock",
            None,
        )
        .unwrap();

    let vault = app
        .instantiate_contract(
            vault_code_id,
            admin.clone(),
            &VaultInstantiateMsg {
                admin: admin.to_string(),
                messaging: mock.to_string(),
                vault_l2: Felt::from(VAULT_L2),
                connection_delay: 3600,
                native_asset: NativeAsset {
                    denom: DENOM.to_string(),
                    name: "Luna Classic".to_string(),
                    symbol: "LUNC".to_string(),
                    decimals: 6,
                },
            },
            &[],
            "starkway-vault",
            None,
        )
        .unwrap();

    let mut env = TestEnv {
        app,
        bridge: Addr::unchecked(""),
        vault,
        mock,
        admin,
        user,
        bridge_code_id,
    };
    env.bridge = instantiate_bridge(&mut env, 25).unwrap();
    env
}

fn instantiate_bridge(env: &mut TestEnv, default_fee_rate: u64) -> anyhow::Result<Addr> {
    env.app.instantiate_contract(
        env.bridge_code_id,
        env.admin.clone(),
        &InstantiateMsg {
            admin: env.admin.to_string(),
            vault: env.vault.to_string(),
            messaging: env.mock.to_string(),
            starkway_l2: Felt::from(STARKWAY_L2),
            native_denom: DENOM.to_string(),
            default_fee_rate,
        },
        &[],
        "starkway",
        None,
    )
}

/// Initialize the native coin in the vault.
fn init_native(env: &mut TestEnv) {
    env.app
        .execute_contract(
            env.user.clone(),
            env.vault.clone(),
            &VaultExecuteMsg::InitToken {
                token: AssetInfo::native(DENOM),
            },
            &coins(INIT_FEE, DENOM),
        )
        .unwrap();
}

fn update_settings(
    env: &mut TestEnv,
    sender: &Addr,
    settings: TokenSettings,
) -> anyhow::Result<AppResponse> {
    env.app.execute_contract(
        sender.clone(),
        env.bridge.clone(),
        &ExecuteMsg::UpdateTokenSettings {
            token: AssetInfo::native(DENOM),
            settings,
        },
        &[],
    )
}

fn stored_settings(env: &TestEnv) -> TokenSettings {
    env.app
        .wrap()
        .query_wasm_smart(
            &env.bridge,
            &QueryMsg::TokenSettings {
                token: AssetInfo::native(DENOM),
            },
        )
        .unwrap()
}

fn fee_for(env: &TestEnv, amount: u128) -> Uint128 {
    let res: CalculateFeeResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.bridge,
            &QueryMsg::CalculateFee {
                token: AssetInfo::native(DENOM),
                amount: Uint128::new(amount),
            },
        )
        .unwrap();
    res.fee
}

fn segment(fee_rate: u64, to_amount: u128) -> FeeSegment {
    FeeSegment {
        fee_rate,
        to_amount: Uint128::new(to_amount),
    }
}

fn tiered_settings() -> TokenSettings {
    TokenSettings {
        use_custom_fee_rate: true,
        fee_segments: vec![segment(100, 10), segment(50, 1000), segment(0, 0)],
        ..TokenSettings::default()
    }
}

// ============================================================================
// Instantiate
// ============================================================================

#[test]
fn test_instantiate() {
    let env = setup();
    let config: ConfigResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.bridge, &QueryMsg::Config {})
        .unwrap();

    assert_eq!(config.admin, env.admin);
    assert_eq!(config.vault, env.vault);
    assert_eq!(config.messaging, env.mock);
    assert_eq!(config.starkway_l2, Felt::from(STARKWAY_L2));
    assert_eq!(config.native_denom, DENOM);
    assert_eq!(config.default_fee_rate, 25);
    assert_eq!(config.max_fee_rate, 300);
}

#[test]
fn test_instantiate_rejects_high_fee_rate() {
    let mut env = setup();
    let err = instantiate_bridge(&mut env, 301).unwrap_err();
    assert!(err.root_cause().to_string().contains("Default fee rate too high"));

    instantiate_bridge(&mut env, 300).unwrap();
}

// ============================================================================
// Token Settings
// ============================================================================

#[test]
fn test_settings_require_initialized_token() {
    let mut env = setup();
    let admin = env.admin.clone();

    let err = update_settings(&mut env, &admin, tiered_settings()).unwrap_err();
    assert!(err.root_cause().to_string().contains("Token not initialized"));

    init_native(&mut env);
    update_settings(&mut env, &admin, tiered_settings()).unwrap();
}

#[test]
fn test_settings_admin_only() {
    let mut env = setup();
    init_native(&mut env);
    let user = env.user.clone();

    let err = update_settings(&mut env, &user, tiered_settings()).unwrap_err();
    assert!(err.root_cause().to_string().contains("Unauthorized"));

    let err = env
        .app
        .execute_contract(
            user,
            env.bridge.clone(),
            &ExecuteMsg::ClearTokenSettings {
                token: AssetInfo::native(DENOM),
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Unauthorized"));
}

#[test]
fn test_settings_round_trip_and_clear() {
    let mut env = setup();
    init_native(&mut env);
    let admin = env.admin.clone();

    assert_eq!(stored_settings(&env), TokenSettings::default());

    let settings = TokenSettings {
        min_deposit: Uint128::new(100),
        max_deposit: Uint128::new(50_000),
        min_fee: Uint128::new(5),
        max_fee: Uint128::new(400),
        use_custom_fee_rate: true,
        fee_segments: vec![segment(200, 1000), segment(100, 50_000)],
    };
    update_settings(&mut env, &admin, settings.clone()).unwrap();
    assert_eq!(stored_settings(&env), settings);

    env.app
        .execute_contract(
            admin,
            env.bridge.clone(),
            &ExecuteMsg::ClearTokenSettings {
                token: AssetInfo::native(DENOM),
            },
            &[],
        )
        .unwrap();
    assert_eq!(stored_settings(&env), TokenSettings::default());
}

#[test]
fn test_settings_validation_errors() {
    let mut env = setup();
    init_native(&mut env);
    let admin = env.admin.clone();

    let cases: Vec<(TokenSettings, &str)> = vec![
        (
            TokenSettings {
                use_custom_fee_rate: true,
                ..TokenSettings::default()
            },
            "Fee segments must exist",
        ),
        (
            TokenSettings {
                fee_segments: vec![segment(10, 0)],
                ..TokenSettings::default()
            },
            "Fee segments must be empty",
        ),
        (
            TokenSettings {
                min_fee: Uint128::new(10),
                max_fee: Uint128::new(5),
                min_deposit: Uint128::new(100),
                ..TokenSettings::default()
            },
            "Invalid max fee",
        ),
        (
            TokenSettings {
                min_deposit: Uint128::new(100),
                max_deposit: Uint128::new(50),
                ..TokenSettings::default()
            },
            "Invalid max deposit",
        ),
        (
            TokenSettings {
                min_fee: Uint128::new(10),
                min_deposit: Uint128::new(5),
                ..TokenSettings::default()
            },
            "Invalid min fee",
        ),
        (
            TokenSettings {
                use_custom_fee_rate: true,
                fee_segments: vec![segment(10, 1000), segment(10, 1000)],
                max_deposit: Uint128::new(1000),
                ..TokenSettings::default()
            },
            "Invalid fee segments",
        ),
        (
            TokenSettings {
                use_custom_fee_rate: true,
                fee_segments: vec![segment(10, 0), segment(10, 1000)],
                max_deposit: Uint128::new(1000),
                ..TokenSettings::default()
            },
            "Invalid fee segments",
        ),
        (
            TokenSettings {
                use_custom_fee_rate: true,
                fee_segments: vec![segment(301, 0)],
                ..TokenSettings::default()
            },
            "Segment fee rate too high",
        ),
        (
            TokenSettings {
                use_custom_fee_rate: true,
                fee_segments: vec![segment(10, 1000)],
                max_deposit: Uint128::new(2000),
                ..TokenSettings::default()
            },
            "Invalid max deposit",
        ),
    ];

    for (settings, expected) in cases {
        let res: ValidateTokenSettingsResponse = env
            .app
            .wrap()
            .query_wasm_smart(
                &env.bridge,
                &QueryMsg::ValidateTokenSettings {
                    token: AssetInfo::native(DENOM),
                    settings: settings.clone(),
                },
            )
            .unwrap();
        assert!(!res.valid);
        assert!(res.error.unwrap().contains(expected), "{}", expected);

        let err = update_settings(&mut env, &admin, settings).unwrap_err();
        assert!(err.root_cause().to_string().contains(expected), "{}", expected);
    }

    // Nothing was stored
    assert_eq!(stored_settings(&env), TokenSettings::default());

    let res: ValidateTokenSettingsResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.bridge,
            &QueryMsg::ValidateTokenSettings {
                token: AssetInfo::native(DENOM),
                settings: tiered_settings(),
            },
        )
        .unwrap();
    assert!(res.valid);
    assert_eq!(res.error, None);
}

// ============================================================================
// Fees
// ============================================================================

#[test]
fn test_segment_fees() {
    let mut env = setup();
    init_native(&mut env);
    let admin = env.admin.clone();
    update_settings(&mut env, &admin, tiered_settings()).unwrap();

    assert_eq!(fee_for(&env, 10), Uint128::zero());
    assert_eq!(fee_for(&env, 500), Uint128::new(2));
    assert_eq!(fee_for(&env, 1000), Uint128::new(5));
    // Past the last bounded segment the rate is zero
    assert_eq!(fee_for(&env, 1_000_000), Uint128::zero());
}

#[test]
fn test_default_fee_rate_with_clamps() {
    let mut env = setup();
    init_native(&mut env);
    let admin = env.admin.clone();

    // Without settings no fee is charged
    assert_eq!(fee_for(&env, 1_000_000), Uint128::zero());

    update_settings(
        &mut env,
        &admin,
        TokenSettings {
            min_deposit: Uint128::new(100),
            min_fee: Uint128::new(3),
            max_fee: Uint128::new(1000),
            ..TokenSettings::default()
        },
    )
    .unwrap();

    // 25 bps, clamped to [3, 1000]
    assert_eq!(fee_for(&env, 100), Uint128::new(3));
    assert_eq!(fee_for(&env, 100_000), Uint128::new(250));
    assert_eq!(fee_for(&env, 10_000_000), Uint128::new(1000));

    let err = env
        .app
        .execute_contract(
            admin.clone(),
            env.bridge.clone(),
            &ExecuteMsg::UpdateDefaultFeeRate { fee_rate: 301 },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Default fee rate too high"));

    env.app
        .execute_contract(
            admin,
            env.bridge.clone(),
            &ExecuteMsg::UpdateDefaultFeeRate { fee_rate: 100 },
            &[],
        )
        .unwrap();
    assert_eq!(fee_for(&env, 100_000), Uint128::new(1000));
    assert_eq!(fee_for(&env, 50_000), Uint128::new(500));
}

// ============================================================================
// Admin Transfer
// ============================================================================

#[test]
fn test_admin_transfer() {
    let mut env = setup();
    let new_admin = Addr::unchecked("terra1newadmin");

    let err = env
        .app
        .execute_contract(
            env.user.clone(),
            env.bridge.clone(),
            &ExecuteMsg::ProposeAdmin {
                new_admin: new_admin.to_string(),
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Unauthorized"));

    env.app
        .execute_contract(
            env.admin.clone(),
            env.bridge.clone(),
            &ExecuteMsg::ProposeAdmin {
                new_admin: new_admin.to_string(),
            },
            &[],
        )
        .unwrap();
    let pending: PendingAdminResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.bridge, &QueryMsg::PendingAdmin {})
        .unwrap();
    assert_eq!(pending.new_address, Some(new_admin.clone()));

    let err = env
        .app
        .execute_contract(
            env.user.clone(),
            env.bridge.clone(),
            &ExecuteMsg::AcceptAdmin {},
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("only pending admin"));

    env.app
        .execute_contract(
            new_admin.clone(),
            env.bridge.clone(),
            &ExecuteMsg::AcceptAdmin {},
            &[],
        )
        .unwrap();

    let config: ConfigResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.bridge, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.admin, new_admin);

    // The old admin lost its rights
    let err = env
        .app
        .execute_contract(
            env.admin.clone(),
            env.bridge.clone(),
            &ExecuteMsg::UpdateDefaultFeeRate { fee_rate: 10 },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Unauthorized"));

    let err = env
        .app
        .execute_contract(
            new_admin,
            env.bridge.clone(),
            &ExecuteMsg::AcceptAdmin {},
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("No pending admin"));
}
