//! Fee Engine
//!
//! Deposit fees are computed from the token's settings:
//!
//! | `use_custom_fee_rate` | Rate                                           |
//! |-----------------------|------------------------------------------------|
//! | false                 | `default_fee_rate`, or no fee without clamps   |
//! | true                  | first segment whose bound covers the amount    |
//!
//! The raw fee `amount * rate / 10_000` (floored) is then clamped to
//! `[min_fee, max_fee]`, a zero bound leaving that side open.
//!
//! Deposit limits are enforced by the caller before a fee is computed.

use cosmwasm_std::Uint128;

use crate::state::{FeeSegment, TokenSettings, BPS_DENOMINATOR};

/// Fee for depositing `amount` under `settings`.
pub fn calculate_fee(settings: &TokenSettings, amount: Uint128, default_fee_rate: u64) -> Uint128 {
    let rate = if settings.use_custom_fee_rate {
        segment_rate(&settings.fee_segments, amount)
    } else {
        if settings.min_fee.is_zero() && settings.max_fee.is_zero() {
            return Uint128::zero();
        }
        default_fee_rate
    };

    let fee = calculate_fee_from_bps(amount, rate);
    clamp_fee(fee, settings.min_fee, settings.max_fee)
}

/// Rate of the first segment covering `amount`.
///
/// Amounts past the last bounded segment fall back to the last segment's
/// rate; validated settings never get there because the last bound equals
/// the maximum deposit.
fn segment_rate(segments: &[FeeSegment], amount: Uint128) -> u64 {
    segments
        .iter()
        .find(|s| s.to_amount.is_zero() || amount <= s.to_amount)
        .or_else(|| segments.last())
        .map(|s| s.fee_rate)
        .unwrap_or(0)
}

pub fn calculate_fee_from_bps(amount: Uint128, fee_bps: u64) -> Uint128 {
    amount.multiply_ratio(fee_bps as u128, BPS_DENOMINATOR)
}

fn clamp_fee(fee: Uint128, min_fee: Uint128, max_fee: Uint128) -> Uint128 {
    if !min_fee.is_zero() && fee < min_fee {
        return min_fee;
    }
    if !max_fee.is_zero() && fee > max_fee {
        return max_fee;
    }
    fee
}
