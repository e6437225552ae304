//! Client-side EVM account: key material, balance reads, and signed native
//! and ERC-20 transfers through a caller-supplied [`ChainClient`].
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use wallet_core::{ChainClient, KeyMaterial, Wallet, WalletError};
//! # async fn demo(node: Arc<dyn ChainClient>) -> Result<(), WalletError> {
//! let wallet = Wallet::new(KeyMaterial::generate()?, node);
//! println!("{} holds {}", wallet.address(), wallet.balance().await?);
//! let handle = wallet
//!     .send_native("0x000000000000000000000000000000000000dEaD", "0.001")
//!     .await?;
//! let receipt = wallet.get_receipt(handle.hash).await?;
//! # let _ = receipt;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod hd_derivation;
pub mod keys;
pub mod mnemonic;
pub mod native;
pub mod nonce;
mod retry;
pub mod secret;
pub mod sender;
pub mod token;
pub mod types;
pub mod wallet;

pub use chain_eth::{Address, FeeParams, TransactionRequest};
pub use client::{ChainClient, ReceiptStatus, RemoteError, TransactionReceipt};
pub use config::{RetryPolicy, WalletConfig};
pub use error::WalletError;
pub use keys::KeyMaterial;
pub use native::NativeTransferBuilder;
pub use secret::SecretString;
pub use token::TokenClient;
pub use types::{Amount, TransactionHandle};
pub use wallet::Wallet;
