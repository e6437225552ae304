//! The sign-and-broadcast sequence shared by native and token transfers.

use std::sync::Arc;

use chain_eth::{chains, ChainContext, TransactionRequest};

use crate::client::ChainClient;
use crate::config::WalletConfig;
use crate::error::WalletError;
use crate::keys::KeyMaterial;
use crate::nonce::NonceManager;
use crate::retry::read_with_retry;
use crate::types::TransactionHandle;

/// Signs requests with one account and broadcasts them through one node.
#[derive(Clone)]
pub struct TransactionSender {
    key: Arc<KeyMaterial>,
    client: Arc<dyn ChainClient>,
    config: Arc<WalletConfig>,
    nonces: Arc<NonceManager>,
}

impl TransactionSender {
    pub fn new(
        key: Arc<KeyMaterial>,
        client: Arc<dyn ChainClient>,
        config: Arc<WalletConfig>,
        nonces: Arc<NonceManager>,
    ) -> Self {
        Self {
            key,
            client,
            config,
            nonces,
        }
    }

    pub(crate) fn client(&self) -> &Arc<dyn ChainClient> {
        &self.client
    }

    pub(crate) fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Fetches chain context, signs `request` and broadcasts it.
    ///
    /// The account's nonce slot is held until the node answers, so
    /// concurrent submissions are serialized. A broadcast is attempted at
    /// most once.
    pub async fn submit(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionHandle, WalletError> {
        let slot = self.nonces.acquire().await;

        let from = self.key.address();
        let policy = &self.config.read_retry;
        let client = &self.client;
        let pending_request = &request;

        let (chain_id, pending_count, fees, gas_estimate) = tokio::try_join!(
            read_with_retry(policy, "chain_id", move || client.chain_id()),
            read_with_retry(policy, "get_transaction_count", move || {
                client.get_transaction_count(from)
            }),
            read_with_retry(policy, "estimate_fee", move || client.estimate_fee()),
            read_with_retry(policy, "estimate_gas", move || {
                client.estimate_gas(from, pending_request)
            }),
        )?;

        if let Some(expected) = self.config.expected_chain_id {
            if expected != chain_id {
                return Err(WalletError::ChainMismatch {
                    expected,
                    actual: chain_id,
                });
            }
        }

        let nonce = slot.resolve(pending_count);
        let gas_limit = self.config.buffered_gas(gas_estimate);
        tracing::debug!(
            %from,
            chain_id,
            nonce,
            pending_count,
            gas_limit,
            max_fee_per_gas = fees.max_fee_per_gas,
            "Chain context fetched"
        );

        let context = ChainContext::new(chain_id, nonce, gas_limit, fees);
        let signed = self.key.sign(&request, &context)?;

        match self.client.send_raw_transaction(&signed.raw).await {
            Ok(hash) => {
                slot.commit(nonce);
                if hash != signed.hash {
                    tracing::warn!(
                        node_hash = %hash,
                        local_hash = %signed.hash,
                        "Node reported a different transaction hash"
                    );
                }
                let explorer = chains::by_chain_id(chain_id).map(|chain| chain.tx_url(&hash));
                tracing::info!(
                    tx_hash = %hash,
                    nonce,
                    to = %request.to,
                    explorer = explorer.as_deref().unwrap_or("-"),
                    "Transaction broadcast"
                );
                Ok(TransactionHandle {
                    hash,
                    nonce,
                    to: request.to,
                })
            }
            Err(source) => {
                slot.invalidate();
                if source.is_nonce_conflict() {
                    Err(WalletError::NonceConflict { nonce, source })
                } else {
                    Err(WalletError::BroadcastUncertain {
                        tx_hash: signed.hash,
                        source,
                    })
                }
            }
        }
    }
}
