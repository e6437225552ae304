//! The three ERC-20 call shapes the wallet issues: `balanceOf`, `decimals`
//! and `transfer`, plus decoders for their return data.

use alloy_primitives::U256;

use crate::abi::{encode_call, Word};
use crate::address::Address;
use crate::error::EthError;

/// Function selector for `transfer(address,uint256)`: `0xa9059cbb`.
pub const TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];

/// Function selector for `balanceOf(address)`: `0x70a08231`.
pub const BALANCE_OF_SELECTOR: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];

/// Function selector for `decimals()`: `0x313ce567`.
pub const DECIMALS_SELECTOR: [u8; 4] = [0x31, 0x3c, 0xe5, 0x67];

/// Encoded calldata for one of the supported ERC-20 calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCall(Vec<u8>);

impl EncodedCall {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn selector(&self) -> [u8; 4] {
        [self.0[0], self.0[1], self.0[2], self.0[3]]
    }
}

/// Encodes `balanceOf(owner)` (4-byte selector + one 32-byte word).
pub fn balance_of(owner: Address) -> EncodedCall {
    EncodedCall(encode_call(BALANCE_OF_SELECTOR, &[Word::Address(owner)]))
}

/// Encodes `decimals()` (selector only).
pub fn decimals() -> EncodedCall {
    EncodedCall(encode_call(DECIMALS_SELECTOR, &[]))
}

/// Encodes `transfer(to, amount)` with `amount` in base units.
pub fn transfer(to: Address, amount: U256) -> EncodedCall {
    EncodedCall(encode_call(
        TRANSFER_SELECTOR,
        &[Word::Address(to), Word::Uint256(amount)],
    ))
}

/// Decodes a single uint256 return value. Extra trailing bytes are ignored.
pub fn decode_uint256(data: &[u8]) -> Result<U256, EthError> {
    if data.len() < 32 {
        return Err(EthError::EncodingError(format!(
            "expected at least 32 bytes for uint256, got {}",
            data.len()
        )));
    }

    Ok(U256::from_be_slice(&data[..32]))
}

/// Decodes the uint8 returned by `decimals()`.
///
/// The value arrives as a full 32-byte word; anything above 255 means the
/// contract is not returning a uint8.
pub fn decode_decimals(data: &[u8]) -> Result<u8, EthError> {
    let value = decode_uint256(data)?;
    u8::try_from(value).map_err(|_| {
        EthError::EncodingError(format!("decimals value {value} does not fit in uint8"))
    })
}
