//! Helper for building messages to, and querying, the Starkway vault

use common::AssetInfo;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Addr, Coin, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg};
use starkway_vault::msg::{
    ExecuteMsg as VaultExecuteMsg, IsTokenInitializedResponse, QueryMsg as VaultQueryMsg,
};

#[cw_serde]
pub struct VaultContract(pub Addr);

impl VaultContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    fn call(&self, msg: VaultExecuteMsg, funds: Vec<Coin>) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg: to_json_binary(&msg)?,
            funds,
        }
        .into())
    }

    /// `fee` pays for the L2 initialization message.
    pub fn init_token(&self, token: &AssetInfo, fee: Vec<Coin>) -> StdResult<CosmosMsg> {
        self.call(
            VaultExecuteMsg::InitToken {
                token: token.clone(),
            },
            fee,
        )
    }

    /// Native deposits carry the coins in `funds`; CW20 deposits are pulled
    /// from `depositor` by the vault.
    pub fn deposit(
        &self,
        token: &AssetInfo,
        depositor: &Addr,
        amount: Uint128,
        funds: Vec<Coin>,
    ) -> StdResult<CosmosMsg> {
        self.call(
            VaultExecuteMsg::DepositToVault {
                token: token.clone(),
                depositor: depositor.to_string(),
                amount,
            },
            funds,
        )
    }

    pub fn withdraw(
        &self,
        token: &AssetInfo,
        recipient: &Addr,
        amount: Uint128,
    ) -> StdResult<CosmosMsg> {
        self.call(
            VaultExecuteMsg::WithdrawFromVault {
                token: token.clone(),
                recipient: recipient.to_string(),
                amount,
            },
            vec![],
        )
    }

    pub fn is_initialized(&self, querier: &QuerierWrapper, token: &AssetInfo) -> StdResult<bool> {
        let res: IsTokenInitializedResponse = querier.query_wasm_smart(
            self.addr(),
            &VaultQueryMsg::IsTokenInitialized {
                token: token.clone(),
            },
        )?;
        Ok(res.initialized)
    }
}
