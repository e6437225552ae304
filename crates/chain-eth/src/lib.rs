//! Ethereum/EVM primitives for the wallet.
//!
//! This crate provides:
//! - A 20-byte `Address` type with EIP-55 checksum rendering and parsing
//! - Exact decimal string <-> base-unit conversion at any token precision
//! - Encoders and decoders for the ERC-20 `balanceOf`, `decimals` and
//!   `transfer` calls
//! - EIP-1559 transaction building and signing
//! - Well-known EVM network definitions
//!
//! Nothing here performs I/O.

mod abi;
pub mod address;
pub mod chains;
pub mod erc20;
pub mod error;
pub mod transaction;
pub mod units;

pub use address::Address;
pub use error::EthError;
pub use transaction::{ChainContext, FeeParams, SignedTransaction, TransactionRequest};
