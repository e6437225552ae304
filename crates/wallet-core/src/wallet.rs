use std::sync::Arc;

use alloy_primitives::TxHash;
use chain_eth::Address;

use crate::client::{ChainClient, TransactionReceipt};
use crate::config::WalletConfig;
use crate::error::WalletError;
use crate::keys::KeyMaterial;
use crate::native::NativeTransferBuilder;
use crate::nonce::NonceManager;
use crate::retry::read_with_retry;
use crate::sender::TransactionSender;
use crate::token::TokenClient;
use crate::types::{Amount, TransactionHandle};

/// One account bound to one node.
///
/// Cheap to clone; clones share the key, the node handle and the nonce
/// sequence, so concurrent sends through any clone are serialized.
#[derive(Clone)]
pub struct Wallet {
    key: Arc<KeyMaterial>,
    client: Arc<dyn ChainClient>,
    config: Arc<WalletConfig>,
    nonces: Arc<NonceManager>,
    native: NativeTransferBuilder,
    tokens: TokenClient,
}

impl Wallet {
    pub fn new(key: KeyMaterial, client: Arc<dyn ChainClient>) -> Self {
        Self::build(key, client, WalletConfig::default())
    }

    pub fn with_config(
        key: KeyMaterial,
        client: Arc<dyn ChainClient>,
        config: WalletConfig,
    ) -> Result<Self, WalletError> {
        config.validate()?;
        Ok(Self::build(key, client, config))
    }

    fn build(key: KeyMaterial, client: Arc<dyn ChainClient>, config: WalletConfig) -> Self {
        let key = Arc::new(key);
        let config = Arc::new(config);
        let nonces = Arc::new(NonceManager::new());
        let sender = TransactionSender::new(
            key.clone(),
            client.clone(),
            config.clone(),
            nonces.clone(),
        );

        Self {
            key,
            client,
            config,
            nonces,
            native: NativeTransferBuilder::new(sender.clone()),
            tokens: TokenClient::new(sender),
        }
    }

    pub fn address(&self) -> Address {
        self.key.address()
    }

    pub fn key_material(&self) -> &KeyMaterial {
        &self.key
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn native(&self) -> &NativeTransferBuilder {
        &self.native
    }

    pub fn tokens(&self) -> &TokenClient {
        &self.tokens
    }

    /// Native balance of this account.
    pub async fn balance(&self) -> Result<Amount, WalletError> {
        let address = self.address();
        let client = &self.client;
        let wei = read_with_retry(&self.config.read_retry, "get_balance", move || {
            client.get_balance(address)
        })
        .await?;
        Ok(Amount::new(wei, self.config.native_decimals))
    }

    pub async fn send_native(&self, to: &str, amount: &str) -> Result<TransactionHandle, WalletError> {
        self.native.send(to, amount).await
    }

    /// This account's balance of `token`.
    pub async fn token_balance(&self, token: &str) -> Result<Amount, WalletError> {
        let token: Address = token.parse()?;
        self.tokens.balance_of(token, self.address()).await
    }

    /// `owner`'s balance of `token`.
    pub async fn token_balance_of(&self, token: &str, owner: &str) -> Result<Amount, WalletError> {
        let token: Address = token.parse()?;
        let owner: Address = owner.parse()?;
        self.tokens.balance_of(token, owner).await
    }

    pub async fn token_decimals(&self, token: &str) -> Result<u8, WalletError> {
        let token: Address = token.parse()?;
        self.tokens.decimals(token).await
    }

    pub async fn send_token(
        &self,
        token: &str,
        to: &str,
        amount: &str,
    ) -> Result<TransactionHandle, WalletError> {
        let token: Address = token.parse()?;
        let to: Address = to.parse()?;
        self.tokens.transfer(token, to, amount).await
    }

    /// `None` while the transaction is pending or unknown to the node.
    pub async fn get_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, WalletError> {
        let client = &self.client;
        Ok(read_with_retry(&self.config.read_retry, "get_transaction_receipt", move || {
            client.get_transaction_receipt(hash)
        })
        .await?)
    }

    /// Forgets the locally sequenced nonce. Call after a `NonceConflict` or
    /// after sending from this account elsewhere.
    pub async fn reset_nonce(&self) {
        self.nonces.reset().await;
    }

    /// EIP-191 signature over `message` with this account's key.
    pub fn sign_message(&self, message: &[u8]) -> Result<[u8; 65], WalletError> {
        self.key.sign_message(message)
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.key.address())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
