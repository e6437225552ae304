//! The remote node, as seen by the wallet.
//!
//! Transport (JSON-RPC framing, connection handling, timeouts) belongs to
//! whoever implements [`ChainClient`]; this crate only consumes it.

use alloy_primitives::{TxHash, B256, U256};
use async_trait::async_trait;
use chain_eth::{Address, FeeParams, TransactionRequest};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON-RPC code geth and most EVM nodes use for `execution reverted`.
pub const EXECUTION_REVERTED: i64 = 3;

/// Failure reported by the node or the transport, passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("RPC error {code}: {message}")]
pub struct RemoteError {
    pub code: i64,
    pub message: String,
}

impl RemoteError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Whether a read-only call reverted inside the EVM. Reverts are
    /// deterministic, so retrying them is pointless.
    pub fn is_revert(&self) -> bool {
        self.code == EXECUTION_REVERTED || self.message.to_ascii_lowercase().contains("revert")
    }

    /// Whether a broadcast was rejected because its nonce is already used
    /// or occupied by a pending transaction.
    pub fn is_nonce_conflict(&self) -> bool {
        let message = self.message.to_ascii_lowercase();
        [
            "nonce too low",
            "already known",
            "replacement transaction underpriced",
            "nonce has already been used",
        ]
        .iter()
        .any(|pattern| message.contains(pattern))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Success,
    Failure,
}

/// Post-inclusion record of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    pub status: ReceiptStatus,
    pub gas_used: u64,
    pub effective_gas_price: u128,
    pub block_number: u64,
    pub block_hash: B256,
}

impl TransactionReceipt {
    pub fn is_success(&self) -> bool {
        self.status == ReceiptStatus::Success
    }
}

/// Operations the wallet needs from a remote EVM node.
///
/// Implementations must be safe to share between tasks; the wallet issues
/// independent reads concurrently.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// `eth_chainId`.
    async fn chain_id(&self) -> Result<u64, RemoteError>;

    /// Native balance in wei (`eth_getBalance` at `latest`).
    async fn get_balance(&self, address: Address) -> Result<U256, RemoteError>;

    /// Next nonce for `address`, counting pending transactions.
    async fn get_transaction_count(&self, address: Address) -> Result<u64, RemoteError>;

    /// Current EIP-1559 fee suggestion.
    async fn estimate_fee(&self) -> Result<FeeParams, RemoteError>;

    /// Gas needed to execute `request` from `from`.
    async fn estimate_gas(
        &self,
        from: Address,
        request: &TransactionRequest,
    ) -> Result<u64, RemoteError>;

    /// Read-only `eth_call` against `contract`; returns the raw return data.
    async fn call(&self, contract: Address, data: &[u8]) -> Result<Vec<u8>, RemoteError>;

    /// Broadcasts a signed transaction and returns the hash the node assigned.
    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash, RemoteError>;

    /// `Ok(None)` while the transaction is pending or unknown.
    async fn get_transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, RemoteError>;
}
