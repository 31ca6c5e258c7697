//! Token metadata and balance reads
//!
//! Token contracts are untrusted: a query may fail or return garbage. Every
//! read here is contained to the token it concerns and falls back to a
//! default instead of failing the caller.

use common::felt::SHORT_TEXT_MAX_LEN;
use common::{AssetInfo, TokenMetadata};
use cosmwasm_std::{Addr, QuerierWrapper, Uint128};
use cw20::{BalanceResponse, Cw20QueryMsg, TokenInfoResponse};

use crate::state::Config;

/// Read CW20 metadata, `None` if the token does not answer.
pub fn try_read_metadata(querier: &QuerierWrapper, token: &Addr) -> Option<TokenMetadata> {
    let info: TokenInfoResponse = querier
        .query_wasm_smart(token, &Cw20QueryMsg::TokenInfo {})
        .ok()?;
    Some(TokenMetadata {
        name: info.name,
        symbol: info.symbol,
        decimals: info.decimals,
    })
}

/// Metadata of any asset, defaults substituted and texts made L2-encodable.
pub fn read_metadata(querier: &QuerierWrapper, config: &Config, token: &AssetInfo) -> TokenMetadata {
    let metadata = match token {
        AssetInfo::Native { .. } => TokenMetadata {
            name: config.native_asset.name.clone(),
            symbol: config.native_asset.symbol.clone(),
            decimals: config.native_asset.decimals,
        },
        AssetInfo::Cw20 { contract_addr } => {
            try_read_metadata(querier, contract_addr).unwrap_or_default()
        }
    };
    TokenMetadata {
        name: to_short_text(&metadata.name),
        symbol: to_short_text(&metadata.symbol),
        decimals: metadata.decimals,
    }
}

/// Keep the ASCII characters of `text`, cut to 31 bytes.
pub fn to_short_text(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii())
        .take(SHORT_TEXT_MAX_LEN)
        .collect()
}

/// Balance of `account`, `None` if the read fails.
pub fn try_read_balance(
    querier: &QuerierWrapper,
    token: &AssetInfo,
    account: &Addr,
) -> Option<Uint128> {
    match token {
        AssetInfo::Native { denom } => querier
            .query_balance(account, denom)
            .ok()
            .map(|coin| coin.amount),
        AssetInfo::Cw20 { contract_addr } => querier
            .query_wasm_smart::<BalanceResponse>(
                contract_addr,
                &Cw20QueryMsg::Balance {
                    address: account.to_string(),
                },
            )
            .ok()
            .map(|res| res.balance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_short_text() {
        assert_eq!(to_short_text("Ether"), "Ether");
        assert_eq!(to_short_text(&"a".repeat(40)).len(), 31);
        assert_eq!(to_short_text("Über Token"), "ber Token");
        assert_eq!(to_short_text(""), "");
    }
}
