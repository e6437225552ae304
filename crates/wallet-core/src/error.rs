use alloy_primitives::TxHash;
use chain_eth::{Address, EthError};
use thiserror::Error;

use crate::client::RemoteError;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Signing failed: {0}")]
    SigningError(String),

    #[error("Contract {contract} is not a conforming token: {reason}")]
    UnknownToken { contract: Address, reason: String },

    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The nonce was already used or is pending. Safe to retry after
    /// re-reading the account nonce.
    #[error("Nonce {nonce} was rejected by the node: {source}")]
    NonceConflict { nonce: u64, source: RemoteError },

    /// The broadcast call failed, but the node may still have accepted the
    /// transaction. Look up `tx_hash` before resubmitting.
    #[error("Broadcast of {tx_hash} failed with an unknown outcome: {source}")]
    BroadcastUncertain { tx_hash: TxHash, source: RemoteError },

    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

impl WalletError {
    /// Whether resubmitting the same operation may succeed without caller
    /// intervention beyond re-fetching chain state.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WalletError::NonceConflict { .. })
    }
}

impl From<EthError> for WalletError {
    fn from(e: EthError) -> Self {
        match e {
            EthError::InvalidAddress(msg) => WalletError::InvalidAddress(msg),
            EthError::InvalidAmount(msg) => WalletError::InvalidAmount(msg),
            EthError::InvalidPrivateKey(msg) => WalletError::InvalidKey(msg),
            EthError::IncompleteContext(_) | EthError::SigningError(_) => {
                WalletError::SigningError(e.to_string())
            }
            EthError::EncodingError(msg) => WalletError::SigningError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eth_errors_map_onto_taxonomy() {
        assert!(matches!(
            WalletError::from(EthError::InvalidAddress("x".into())),
            WalletError::InvalidAddress(_)
        ));
        assert!(matches!(
            WalletError::from(EthError::InvalidAmount("x".into())),
            WalletError::InvalidAmount(_)
        ));
        assert!(matches!(
            WalletError::from(EthError::InvalidPrivateKey("x".into())),
            WalletError::InvalidKey(_)
        ));

        let err = WalletError::from(EthError::IncompleteContext("nonce"));
        assert!(matches!(err, WalletError::SigningError(_)));
        assert!(err.to_string().contains("missing nonce"));
    }

    #[test]
    fn remote_error_passes_through_code_and_message() {
        let err = WalletError::from(RemoteError::new(-32000, "insufficient funds for gas"));
        assert_eq!(err.to_string(), "RPC error -32000: insufficient funds for gas");
        assert!(!err.is_retryable());
    }

    #[test]
    fn nonce_conflict_is_retryable() {
        let err = WalletError::NonceConflict {
            nonce: 4,
            source: RemoteError::new(-32000, "nonce too low"),
        };
        assert!(err.is_retryable());
        assert!(err.to_string().contains("Nonce 4"));
    }

    #[test]
    fn broadcast_uncertain_names_the_hash() {
        let err = WalletError::BroadcastUncertain {
            tx_hash: TxHash::repeat_byte(0xab),
            source: RemoteError::new(-32603, "timeout"),
        };
        assert!(err.to_string().contains("0xabab"));
        assert!(!err.is_retryable());
    }
}
