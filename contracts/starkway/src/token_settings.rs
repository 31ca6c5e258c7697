//! Token Settings Store
//!
//! Per-token deposit limits and fee schedules. Settings are only stored
//! after passing [`validate`]; a token without stored settings reads back
//! as all-zero settings (no limits, no fee).

use common::AssetInfo;
use cosmwasm_std::{Deps, StdResult, Storage, Uint128};

use crate::error::ContractError;
use crate::state::{TokenSettings, MAX_FEE_RATE, TOKEN_SETTINGS};
use crate::vault::VaultContract;

/// Check `settings` for `token`, stopping at the first violation.
pub fn validate(
    deps: Deps,
    vault: &VaultContract,
    token: &AssetInfo,
    settings: &TokenSettings,
) -> Result<(), ContractError> {
    if !vault.is_initialized(&deps.querier, token)? {
        return Err(ContractError::TokenNotInitialized { token: token.key() });
    }

    if settings.use_custom_fee_rate && settings.fee_segments.is_empty() {
        return Err(ContractError::SegmentsMustExist);
    }
    if !settings.use_custom_fee_rate && !settings.fee_segments.is_empty() {
        return Err(ContractError::SegmentsMustBeEmpty);
    }

    if !settings.max_fee.is_zero() && settings.min_fee > settings.max_fee {
        return Err(ContractError::InvalidMaxFee);
    }
    if !settings.max_deposit.is_zero() && settings.min_deposit > settings.max_deposit {
        return Err(ContractError::InvalidMaxDeposit);
    }
    if !settings.min_fee.is_zero() && settings.min_fee > settings.min_deposit {
        return Err(ContractError::InvalidMinFee);
    }

    validate_segments(settings)
}

fn validate_segments(settings: &TokenSettings) -> Result<(), ContractError> {
    let segments = &settings.fee_segments;
    let Some(last) = segments.last() else {
        return Ok(());
    };

    let mut previous = Uint128::zero();
    for (i, segment) in segments.iter().enumerate() {
        let is_last = i + 1 == segments.len();
        if segment.to_amount.is_zero() {
            // Unlimited is only allowed to close the schedule
            if !is_last {
                return Err(ContractError::InvalidFeeSegments);
            }
        } else if segment.to_amount <= previous {
            return Err(ContractError::InvalidFeeSegments);
        }
        if segment.fee_rate > MAX_FEE_RATE {
            return Err(ContractError::SegmentRateTooHigh {
                rate: segment.fee_rate,
                max: MAX_FEE_RATE,
            });
        }
        previous = segment.to_amount;
    }

    if last.to_amount != settings.max_deposit {
        return Err(ContractError::InvalidMaxDeposit);
    }
    Ok(())
}

/// Stored settings of `token`, zeroed if none.
pub fn get(storage: &dyn Storage, token: &AssetInfo) -> StdResult<TokenSettings> {
    Ok(TOKEN_SETTINGS
        .may_load(storage, &token.key())?
        .unwrap_or_default())
}

pub fn save(
    storage: &mut dyn Storage,
    token: &AssetInfo,
    settings: &TokenSettings,
) -> StdResult<()> {
    TOKEN_SETTINGS.save(storage, &token.key(), settings)
}

pub fn clear(storage: &mut dyn Storage, token: &AssetInfo) {
    TOKEN_SETTINGS.remove(storage, &token.key());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FeeSegment;

    fn segment(fee_rate: u64, to_amount: u128) -> FeeSegment {
        FeeSegment {
            fee_rate,
            to_amount: Uint128::new(to_amount),
        }
    }

    fn custom(max_deposit: u128, fee_segments: Vec<FeeSegment>) -> TokenSettings {
        TokenSettings {
            min_deposit: Uint128::new(10),
            max_deposit: Uint128::new(max_deposit),
            min_fee: Uint128::new(5),
            max_fee: Uint128::new(100),
            use_custom_fee_rate: true,
            fee_segments,
        }
    }

    #[test]
    fn test_valid_schedules() {
        let bounded = custom(
            10_000_000,
            vec![segment(100, 10), segment(80, 1_000), segment(20, 10_000_000)],
        );
        assert_eq!(validate_segments(&bounded), Ok(()));

        let unlimited = custom(0, vec![segment(100, 10), segment(50, 1000), segment(0, 0)]);
        assert_eq!(validate_segments(&unlimited), Ok(()));
    }

    #[test]
    fn test_decreasing_bounds() {
        let settings = custom(
            10_000_000,
            vec![
                segment(100, 10),
                segment(80, 1_000),
                segment(60, 8_000),
                segment(40, 4_000),
                segment(20, 10_000_000),
            ],
        );
        assert_eq!(
            validate_segments(&settings),
            Err(ContractError::InvalidFeeSegments)
        );
    }

    #[test]
    fn test_equal_bounds() {
        let settings = custom(1_000, vec![segment(100, 1_000), segment(80, 1_000)]);
        assert_eq!(
            validate_segments(&settings),
            Err(ContractError::InvalidFeeSegments)
        );
    }

    #[test]
    fn test_unlimited_not_last() {
        let settings = custom(
            10_000_000,
            vec![segment(100, 10), segment(200, 0), segment(300, 10_000_000)],
        );
        assert_eq!(
            validate_segments(&settings),
            Err(ContractError::InvalidFeeSegments)
        );
    }

    #[test]
    fn test_rate_too_high() {
        let settings = custom(
            10_000_000,
            vec![
                segment(100, 10),
                segment(200, 100),
                segment(300, 1_000),
                segment(350, 10_000_000),
            ],
        );
        assert_eq!(
            validate_segments(&settings),
            Err(ContractError::SegmentRateTooHigh {
                rate: 350,
                max: MAX_FEE_RATE
            })
        );
    }

    #[test]
    fn test_schedule_must_reach_max_deposit() {
        let short = custom(
            10_000_000,
            vec![segment(100, 10), segment(200, 10_000), segment(300, 1_000_000)],
        );
        assert_eq!(
            validate_segments(&short),
            Err(ContractError::InvalidMaxDeposit)
        );

        // Unlimited schedule with a bounded deposit range
        let unlimited = custom(10_000_000, vec![segment(100, 10), segment(0, 0)]);
        assert_eq!(
            validate_segments(&unlimited),
            Err(ContractError::InvalidMaxDeposit)
        );
    }
}
