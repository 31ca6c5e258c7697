//! Asset identity shared by the vault and the bridge.
//!
//! The native coin is identified by its bank denom, tokens by their CW20
//! contract address. On L2 both are identified by a single field element.

use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Api, StdResult};

use crate::felt::{address_to_felt, sn_keccak, Felt};

/// Asset that can be bridged
#[cw_serde]
pub enum AssetInfo {
    /// Native bank coin
    Native { denom: String },
    /// CW20 token contract
    Cw20 { contract_addr: Addr },
}

impl AssetInfo {
    pub fn native(denom: impl Into<String>) -> Self {
        AssetInfo::Native {
            denom: denom.into(),
        }
    }

    pub fn cw20(contract_addr: Addr) -> Self {
        AssetInfo::Cw20 { contract_addr }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, AssetInfo::Native { .. })
    }

    /// Storage key: the denom or the contract address.
    pub fn key(&self) -> String {
        match self {
            AssetInfo::Native { denom } => denom.clone(),
            AssetInfo::Cw20 { contract_addr } => contract_addr.to_string(),
        }
    }

    /// Re-validate a user supplied CW20 address.
    pub fn validate(&self, api: &dyn Api) -> StdResult<AssetInfo> {
        match self {
            AssetInfo::Native { denom } => Ok(AssetInfo::native(denom.clone())),
            AssetInfo::Cw20 { contract_addr } => Ok(AssetInfo::Cw20 {
                contract_addr: api.addr_validate(contract_addr.as_str())?,
            }),
        }
    }

    /// L2 identity of the asset.
    pub fn to_felt(&self, api: &dyn Api) -> StdResult<Felt> {
        match self {
            AssetInfo::Native { denom } => Ok(sn_keccak(denom.as_bytes())),
            AssetInfo::Cw20 { contract_addr } => address_to_felt(api, contract_addr),
        }
    }
}

impl fmt::Display for AssetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetInfo::Native { denom } => write!(f, "{}", denom),
            AssetInfo::Cw20 { contract_addr } => write!(f, "{}", contract_addr),
        }
    }
}

/// Name, symbol and decimals of an asset as announced to L2
#[cw_serde]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            decimals: 18,
        }
    }
}
