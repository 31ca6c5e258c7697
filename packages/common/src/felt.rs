//! Field Element Codec
//!
//! Every value crossing the L1 <-> L2 message channel is a field element of
//! the Starknet prime field. Wider integers are either split into 128-bit
//! halves or rejected; nothing is ever truncated or wrapped silently.
//!
//! ## Encodings
//!
//! | Source            | Encoding                                        |
//! |-------------------|-------------------------------------------------|
//! | `Uint256` amount  | `(low, high)` 128-bit halves                    |
//! | short ASCII text  | big-endian bytes, at most 31 characters         |
//! | L1 address        | canonical bytes if <= 31, else `sn_keccak`      |
//! | entry point name  | `sn_keccak(name)` (250-bit keccak)              |

use std::fmt;

use cosmwasm_std::{Addr, Api, StdResult, Uint128, Uint256};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tiny_keccak::{Hasher, Keccak};

/// The Starknet field prime: 2^251 + 17 * 2^192 + 1
pub const FIELD_PRIME: Uint256 = Uint256::from_be_bytes([
    0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x01,
]);

/// Maximum number of bytes a short string can hold
pub const SHORT_TEXT_MAX_LEN: usize = 31;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FeltError {
    #[error("Invalid felt: {value} is not below the field prime")]
    InvalidFelt { value: Uint256 },

    #[error("Short text too long: {len} bytes, at most 31 allowed")]
    ShortTextTooLong { len: usize },

    #[error("Short text must be ASCII")]
    NonAsciiShortText,
}

/// A value of the Starknet prime field.
///
/// Serialized exactly like `Uint256` (a decimal string). Deserializing an
/// out-of-range value fails, so a `Felt` received in a message is always valid.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, JsonSchema,
)]
#[serde(try_from = "Uint256", into = "Uint256")]
pub struct Felt(Uint256);

impl Felt {
    pub const ZERO: Felt = Felt(Uint256::zero());

    /// Checked conversion from a 256-bit integer.
    pub fn new(value: Uint256) -> Result<Self, FeltError> {
        if value >= FIELD_PRIME {
            return Err(FeltError::InvalidFelt { value });
        }
        Ok(Self(value))
    }

    /// Any `u128` fits the field.
    pub const fn from_u128(value: u128) -> Self {
        Self(Uint256::from_u128(value))
    }

    pub fn from_be_bytes(bytes: [u8; 32]) -> Result<Self, FeltError> {
        Self::new(Uint256::from_be_bytes(bytes))
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0.to_be_bytes()
    }

    pub fn value(&self) -> Uint256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn to_hex(&self) -> String {
        let bytes = self.to_be_bytes();
        let encoded = hex::encode(bytes);
        let trimmed = encoded.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{}", trimmed)
        }
    }
}

impl TryFrom<Uint256> for Felt {
    type Error = FeltError;

    fn try_from(value: Uint256) -> Result<Self, Self::Error> {
        Felt::new(value)
    }
}

impl From<Felt> for Uint256 {
    fn from(felt: Felt) -> Self {
        felt.0
    }
}

impl From<u128> for Felt {
    fn from(value: u128) -> Self {
        Felt::from_u128(value)
    }
}

impl From<u64> for Felt {
    fn from(value: u64) -> Self {
        Felt::from_u128(value as u128)
    }
}

impl From<u8> for Felt {
    fn from(value: u8) -> Self {
        Felt::from_u128(value as u128)
    }
}

impl From<Uint128> for Felt {
    fn from(value: Uint128) -> Self {
        Felt::from_u128(value.u128())
    }
}

impl fmt::Display for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ============================================================================
// Conversions
// ============================================================================

/// Validate a list of raw integers, failing on the first out-of-range element.
pub fn felts_from_uints(values: &[Uint256]) -> Result<Vec<Felt>, FeltError> {
    values.iter().map(|v| Felt::new(*v)).collect()
}

/// Split a 256-bit value into `(low, high)` 128-bit halves.
pub fn split_to_low_high(value: Uint256) -> Result<(Felt, Felt), FeltError> {
    let bytes = value.to_be_bytes();
    let mut high = [0u8; 16];
    let mut low = [0u8; 16];
    high.copy_from_slice(&bytes[0..16]);
    low.copy_from_slice(&bytes[16..32]);

    let low = Felt::new(Uint256::from_u128(u128::from_be_bytes(low)))?;
    let high = Felt::new(Uint256::from_u128(u128::from_be_bytes(high)))?;
    Ok((low, high))
}

/// Pack up to 31 ASCII bytes into one field element (Cairo short string).
pub fn encode_short_text(text: &str) -> Result<Felt, FeltError> {
    if !text.is_ascii() {
        return Err(FeltError::NonAsciiShortText);
    }
    let bytes = text.as_bytes();
    if bytes.len() > SHORT_TEXT_MAX_LEN {
        return Err(FeltError::ShortTextTooLong { len: bytes.len() });
    }

    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(bytes);
    Felt::from_be_bytes(word)
}

/// Decode a short string previously packed by `encode_short_text`.
pub fn decode_short_text(felt: &Felt) -> String {
    felt.to_be_bytes()
        .iter()
        .skip_while(|b| **b == 0)
        .map(|b| *b as char)
        .collect()
}

/// Starknet keccak: keccak-256 truncated to its low 250 bits.
pub fn sn_keccak(data: &[u8]) -> Felt {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output[0] &= 0x03;
    Felt(Uint256::from_be_bytes(output))
}

/// Encode an L1 address as a field element.
///
/// Canonical addresses of up to 31 bytes (20-byte account addresses) are
/// embedded as-is; longer ones are hashed with `sn_keccak`.
pub fn address_to_felt(api: &dyn Api, addr: &Addr) -> StdResult<Felt> {
    let canonical = api.addr_canonicalize(addr.as_str())?;
    let bytes = canonical.as_slice();

    if bytes.len() <= SHORT_TEXT_MAX_LEN {
        let mut word = [0u8; 32];
        word[32 - bytes.len()..].copy_from_slice(bytes);
        Ok(Felt(Uint256::from_be_bytes(word)))
    } else {
        Ok(sn_keccak(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockApi;
    use std::str::FromStr;

    #[test]
    fn test_field_prime_value() {
        let expected = Uint256::from_str(
            "3618502788666131213697322783095070105623107215331596699973092056135872020481",
        )
        .unwrap();
        assert_eq!(FIELD_PRIME, expected);
    }

    #[test]
    fn test_felt_range_check() {
        assert!(Felt::new(Uint256::zero()).is_ok());
        assert!(Felt::new(FIELD_PRIME - Uint256::one()).is_ok());
        assert_eq!(
            Felt::new(FIELD_PRIME),
            Err(FeltError::InvalidFelt { value: FIELD_PRIME })
        );

        // 0x800000000000011000000000000000000000000000000000000000000000111
        let mut bytes = FIELD_PRIME.to_be_bytes();
        bytes[30] = 0x01;
        bytes[31] = 0x11;
        assert!(Felt::from_be_bytes(bytes).is_err());
    }

    #[test]
    fn test_felt_serde_rejects_out_of_range() {
        let ok: Felt = cosmwasm_std::from_json(br#""12345""#).unwrap();
        assert_eq!(ok, Felt::from(12345u128));
        assert_eq!(cosmwasm_std::to_json_vec(&ok).unwrap(), br#""12345""#.to_vec());

        let json = format!("\"{}\"", FIELD_PRIME);
        let res: StdResult<Felt> = cosmwasm_std::from_json(json.as_bytes());
        assert!(res.is_err());
    }

    #[test]
    fn test_split_to_low_high() {
        let (low, high) = split_to_low_high(Uint256::from(1_000u128)).unwrap();
        assert_eq!(low, Felt::from(1_000u128));
        assert_eq!(high, Felt::ZERO);

        let max = Uint256::MAX;
        let (low, high) = split_to_low_high(max).unwrap();
        assert_eq!(low, Felt::from(u128::MAX));
        assert_eq!(high, Felt::from(u128::MAX));

        let value = Uint256::from(u128::MAX) + Uint256::from(6u128);
        let (low, high) = split_to_low_high(value).unwrap();
        assert_eq!(low, Felt::from(5u128));
        assert_eq!(high, Felt::from(1u128));
    }

    #[test]
    fn test_encode_short_text() {
        let felt = encode_short_text("ETH").unwrap();
        assert_eq!(felt, Felt::from(0x455448u128));
        assert_eq!(decode_short_text(&felt), "ETH");

        assert_eq!(encode_short_text("").unwrap(), Felt::ZERO);
        assert!(encode_short_text(&"a".repeat(31)).is_ok());
        assert_eq!(
            encode_short_text(&"a".repeat(32)),
            Err(FeltError::ShortTextTooLong { len: 32 })
        );
        assert_eq!(
            encode_short_text("Éther"),
            Err(FeltError::NonAsciiShortText)
        );
    }

    #[test]
    fn test_sn_keccak_fits_250_bits() {
        let felt = sn_keccak(b"handle_deposit");
        assert!(felt.to_be_bytes()[0] <= 0x03);
        assert_eq!(felt, sn_keccak(b"handle_deposit"));
        assert_ne!(felt, sn_keccak(b"handle_deposit_with_message"));
    }

    #[test]
    fn test_known_selector() {
        // Starknet's `transfer` selector
        let expected = Uint256::from_str(
            "232670485425082704932579856502088130646006032362877466777181098476241604910",
        )
        .unwrap();
        assert_eq!(sn_keccak(b"transfer").value(), expected);
    }

    #[test]
    fn test_address_to_felt_is_deterministic() {
        let api = MockApi::default();
        let alice = Addr::unchecked("terra1alice");
        let bob = Addr::unchecked("terra1bob");

        let a1 = address_to_felt(&api, &alice).unwrap();
        let a2 = address_to_felt(&api, &alice).unwrap();
        let b = address_to_felt(&api, &bob).unwrap();

        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert!(a1.value() < FIELD_PRIME);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Felt::ZERO.to_hex(), "0x0");
        assert_eq!(Felt::from(255u128).to_hex(), "0xff");
    }
}
