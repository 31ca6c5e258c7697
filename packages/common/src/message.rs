//! Cross-layer message layouts and hashes
//!
//! Both directions are identified by a keccak-256 hash over 32-byte
//! big-endian words. The messaging oracle keys every ledger by this hash,
//! so the layouts below must be reproduced exactly by every party.
//!
//! # L1 -> L2 hash
//! `keccak(from_l1, to_l2, nonce, selector, payload_len, payload...)`
//!
//! # L2 -> L1 hash
//! `keccak(from_l2, to_l1, payload_len, payload...)`
//!
//! # Payloads
//! - deposit: `[token, sender_l1, recipient_l2, amount_low, amount_high, fee_low, fee_high]`
//!   followed by `[message_recipient, len, ...message]` when a message is attached
//! - token initialization: `[token, name, symbol, decimals]`
//! - withdrawal: `[token, recipient_l1, sender_l2, amount, 0]`

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;
use tiny_keccak::{Hasher, Keccak};

use crate::felt::{encode_short_text, sn_keccak, split_to_low_high, Felt, FeltError};

pub const DEPOSIT_SELECTOR_NAME: &str = "handle_deposit";
pub const DEPOSIT_WITH_MESSAGE_SELECTOR_NAME: &str = "handle_deposit_with_message";
pub const TOKEN_INITIALIZATION_SELECTOR_NAME: &str = "handle_token_initialization";

/// Trailing flag of a plain withdrawal payload
pub const WITHDRAWAL_FLAG: u128 = 0;

/// Entry point selector of an L2 handler.
pub fn selector(name: &str) -> Felt {
    sn_keccak(name.as_bytes())
}

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Convert a 32-byte hash to a 0x-prefixed hex string
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a 0x-prefixed (or bare) hex string into 32 bytes
pub fn hex_to_bytes32(hex_str: &str) -> Result<[u8; 32], String> {
    let stripped = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let bytes = hex::decode(stripped).map_err(|e| format!("Invalid hex: {}", e))?;
    bytes
        .try_into()
        .map_err(|v: Vec<u8>| format!("Expected 32 bytes, got {}", v.len()))
}

fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..32].copy_from_slice(&value.to_be_bytes());
    word
}

/// Hash of an L1 -> L2 message
pub fn l1_to_l2_msg_hash(
    from_address: &Felt,
    to_address: &Felt,
    nonce: u64,
    selector: &Felt,
    payload: &[Felt],
) -> [u8; 32] {
    let mut data = Vec::with_capacity(32 * (5 + payload.len()));
    data.extend_from_slice(&from_address.to_be_bytes());
    data.extend_from_slice(&to_address.to_be_bytes());
    data.extend_from_slice(&u64_word(nonce));
    data.extend_from_slice(&selector.to_be_bytes());
    data.extend_from_slice(&u64_word(payload.len() as u64));
    for felt in payload {
        data.extend_from_slice(&felt.to_be_bytes());
    }
    keccak256(&data)
}

/// Hash of an L2 -> L1 message
pub fn l2_to_l1_msg_hash(from_address: &Felt, to_address: &Felt, payload: &[Felt]) -> [u8; 32] {
    let mut data = Vec::with_capacity(32 * (3 + payload.len()));
    data.extend_from_slice(&from_address.to_be_bytes());
    data.extend_from_slice(&to_address.to_be_bytes());
    data.extend_from_slice(&u64_word(payload.len() as u64));
    for felt in payload {
        data.extend_from_slice(&felt.to_be_bytes());
    }
    keccak256(&data)
}

// ============================================================================
// Messages
// ============================================================================

/// A fully determined L1 -> L2 message
#[cw_serde]
pub struct L1ToL2Message {
    pub from_address: Felt,
    pub to_address: Felt,
    pub selector: Felt,
    pub payload: Vec<Felt>,
    pub nonce: u64,
}

impl L1ToL2Message {
    pub fn hash(&self) -> [u8; 32] {
        l1_to_l2_msg_hash(
            &self.from_address,
            &self.to_address,
            self.nonce,
            &self.selector,
            &self.payload,
        )
    }
}

/// A fully determined L2 -> L1 message
#[cw_serde]
pub struct L2ToL1Message {
    pub from_address: Felt,
    pub to_address: Felt,
    pub payload: Vec<Felt>,
}

impl L2ToL1Message {
    pub fn hash(&self) -> [u8; 32] {
        l2_to_l1_msg_hash(&self.from_address, &self.to_address, &self.payload)
    }
}

/// Auxiliary message forwarded with a deposit to an L2 contract
#[cw_serde]
pub struct DepositMessage {
    pub recipient: Felt,
    pub payload: Vec<Felt>,
}

// ============================================================================
// Payload Builders
// ============================================================================

pub fn deposit_payload(
    token: Felt,
    sender_l1: Felt,
    recipient_l2: Felt,
    amount: Uint128,
    fee: Uint128,
    message: Option<&DepositMessage>,
) -> Result<Vec<Felt>, FeltError> {
    let (amount_low, amount_high) = split_to_low_high(amount.into())?;
    let (fee_low, fee_high) = split_to_low_high(fee.into())?;

    let mut payload = vec![
        token,
        sender_l1,
        recipient_l2,
        amount_low,
        amount_high,
        fee_low,
        fee_high,
    ];
    if let Some(message) = message {
        payload.push(message.recipient);
        payload.push(Felt::from(message.payload.len() as u64));
        payload.extend_from_slice(&message.payload);
    }
    Ok(payload)
}

/// `name` and `symbol` must already be cut to 31 bytes.
pub fn init_payload(
    token: Felt,
    name: &str,
    symbol: &str,
    decimals: u8,
) -> Result<Vec<Felt>, FeltError> {
    Ok(vec![
        token,
        encode_short_text(name)?,
        encode_short_text(symbol)?,
        Felt::from(decimals),
    ])
}

pub fn withdrawal_payload(
    token: Felt,
    recipient_l1: Felt,
    sender_l2: Felt,
    amount: Uint128,
) -> Vec<Felt> {
    vec![
        token,
        recipient_l1,
        sender_l2,
        Felt::from(amount),
        Felt::from(WITHDRAWAL_FLAG),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            bytes32_to_hex(&keccak256(b"")),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_hex_to_bytes32() {
        let hash = keccak256(b"starkway");
        let parsed = hex_to_bytes32(&bytes32_to_hex(&hash)).unwrap();
        assert_eq!(parsed, hash);
        assert!(hex_to_bytes32("0x1234").is_err());
        assert!(hex_to_bytes32("0xzz").is_err());
    }

    #[test]
    fn test_l1_to_l2_hash_layout() {
        let from = Felt::from(1u128);
        let to = Felt::from(2u128);
        let sel = Felt::from(4u128);
        let payload = vec![Felt::from(5u128), Felt::from(6u128)];

        let mut data = Vec::new();
        for v in [1u64, 2, 3, 4, 2, 5, 6] {
            data.extend_from_slice(&Felt::from(v).to_be_bytes());
        }
        assert_eq!(l1_to_l2_msg_hash(&from, &to, 3, &sel, &payload), keccak256(&data));

        // every field changes the hash
        let base = l1_to_l2_msg_hash(&from, &to, 3, &sel, &payload);
        assert_ne!(base, l1_to_l2_msg_hash(&from, &to, 4, &sel, &payload));
        assert_ne!(base, l1_to_l2_msg_hash(&to, &from, 3, &sel, &payload));
        assert_ne!(base, l1_to_l2_msg_hash(&from, &to, 3, &sel, &payload[..1]));
    }

    #[test]
    fn test_l2_to_l1_hash_layout() {
        let msg = L2ToL1Message {
            from_address: Felt::from(7u128),
            to_address: Felt::from(8u128),
            payload: vec![Felt::from(9u128)],
        };

        let mut data = Vec::new();
        for v in [7u64, 8, 1, 9] {
            data.extend_from_slice(&Felt::from(v).to_be_bytes());
        }
        assert_eq!(msg.hash(), keccak256(&data));
    }

    #[test]
    fn test_deposit_payload_layout() {
        let amount = Uint128::new(1000);
        let fee = Uint128::new(3);
        let plain = deposit_payload(
            Felt::from(1u128),
            Felt::from(2u128),
            Felt::from(3u128),
            amount,
            fee,
            None,
        )
        .unwrap();
        assert_eq!(
            plain,
            vec![
                Felt::from(1u128),
                Felt::from(2u128),
                Felt::from(3u128),
                Felt::from(1000u128),
                Felt::ZERO,
                Felt::from(3u128),
                Felt::ZERO,
            ]
        );

        let message = DepositMessage {
            recipient: Felt::from(44u128),
            payload: vec![Felt::from(10u128), Felt::from(11u128)],
        };
        let with_message = deposit_payload(
            Felt::from(1u128),
            Felt::from(2u128),
            Felt::from(3u128),
            amount,
            fee,
            Some(&message),
        )
        .unwrap();
        assert_eq!(with_message.len(), 7 + 2 + 2);
        assert_eq!(with_message[7], Felt::from(44u128));
        assert_eq!(with_message[8], Felt::from(2u128));
        assert_eq!(&with_message[9..], &message.payload[..]);
    }

    #[test]
    fn test_init_payload() {
        let payload = init_payload(Felt::from(1u128), "Ether", "ETH", 18).unwrap();
        assert_eq!(payload.len(), 4);
        assert_eq!(payload[2], Felt::from(0x455448u128));
        assert_eq!(payload[3], Felt::from(18u128));

        assert!(init_payload(Felt::from(1u128), &"x".repeat(32), "X", 6).is_err());
    }

    #[test]
    fn test_withdrawal_payload() {
        let payload = withdrawal_payload(
            Felt::from(1u128),
            Felt::from(2u128),
            Felt::from(3u128),
            Uint128::new(500),
        );
        assert_eq!(payload[3], Felt::from(500u128));
        assert_eq!(payload[4], Felt::ZERO);
    }

    #[test]
    fn test_selectors_are_distinct() {
        let a = selector(DEPOSIT_SELECTOR_NAME);
        let b = selector(DEPOSIT_WITH_MESSAGE_SELECTOR_NAME);
        let c = selector(TOKEN_INITIALIZATION_SELECTOR_NAME);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }
}
