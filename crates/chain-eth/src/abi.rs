//! 32-byte word encoding for the fixed ERC-20 call shapes.
//!
//! Only static `address` and `uint256` arguments are supported. This is not a
//! general ABI codec; `erc20` is the sole consumer.

use alloy_primitives::U256;
#[cfg(test)]
use sha3::{Digest, Keccak256};

use crate::address::Address;

/// A single static ABI argument.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Word {
    /// Left-padded to 32 bytes.
    Address(Address),
    /// Big-endian, 32 bytes.
    Uint256(U256),
}

impl Word {
    fn to_bytes(self) -> [u8; 32] {
        match self {
            Word::Address(addr) => {
                let mut word = [0u8; 32];
                word[12..].copy_from_slice(addr.as_bytes());
                word
            }
            Word::Uint256(value) => value.to_be_bytes::<32>(),
        }
    }
}

/// Encodes `selector || word(args[0]) || word(args[1]) || ...`.
pub(crate) fn encode_call(selector: [u8; 4], args: &[Word]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + args.len() * 32);
    data.extend_from_slice(&selector);

    for arg in args {
        data.extend_from_slice(&arg.to_bytes());
    }

    data
}

/// First four bytes of Keccak-256 over a canonical function signature.
#[cfg(test)]
pub(crate) fn selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_word_is_left_padded() {
        let mut raw = [0u8; 20];
        raw[0] = 0xde;
        raw[19] = 0xad;

        let word = Word::Address(Address::from_bytes(raw)).to_bytes();

        assert_eq!(&word[..12], &[0u8; 12]);
        assert_eq!(&word[12..], &raw);
    }

    #[test]
    fn uint_word_is_big_endian() {
        let word = Word::Uint256(U256::from(0x0102u64)).to_bytes();
        assert_eq!(&word[..30], &[0u8; 30]);
        assert_eq!(word[30], 0x01);
        assert_eq!(word[31], 0x02);
    }

    #[test]
    fn selector_only_call() {
        let data = encode_call([0x31, 0x3c, 0xe5, 0x67], &[]);
        assert_eq!(data, vec![0x31, 0x3c, 0xe5, 0x67]);
    }

    #[test]
    fn call_with_two_words() {
        let mut raw = [0u8; 20];
        raw[19] = 0x01;

        let data = encode_call(
            [0xa9, 0x05, 0x9c, 0xbb],
            &[Word::Address(Address::from_bytes(raw)), Word::Uint256(U256::from(100u64))],
        );

        assert_eq!(data.len(), 68);
        assert_eq!(data[35], 0x01);
        assert_eq!(data[67], 100);
    }

    #[test]
    fn selector_of_known_signatures() {
        assert_eq!(hex::encode(selector("transfer(address,uint256)")), "a9059cbb");
        assert_eq!(hex::encode(selector("balanceOf(address)")), "70a08231");
        assert_eq!(hex::encode(selector("decimals()")), "313ce567");
    }
}
