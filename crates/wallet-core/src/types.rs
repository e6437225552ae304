use std::fmt;

use alloy_primitives::{TxHash, U256};
use chain_eth::units;
use chain_eth::Address;
use serde::Serialize;

/// A non-negative quantity held as integer base units at a fixed precision.
///
/// `Display` renders the canonical decimal form (trailing zeros trimmed,
/// no point for whole values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Amount {
    pub base_units: U256,
    pub decimals: u8,
}

impl Amount {
    pub fn new(base_units: U256, decimals: u8) -> Self {
        Self {
            base_units,
            decimals,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&units::to_decimal_string(self.base_units, self.decimals))
    }
}

/// Returned once a transaction has been accepted for broadcast. Use `hash`
/// with `Wallet::get_receipt` to follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransactionHandle {
    pub hash: TxHash,
    pub nonce: u64,
    /// Recipient of the transaction itself (the token contract for token
    /// transfers).
    pub to: Address,
}
