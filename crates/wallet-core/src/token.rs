//! ERC-20 reads and transfers.
//!
//! Only three call shapes exist here: `balanceOf`, `decimals` and
//! `transfer`. A contract that reverts or answers with no data on either
//! read is reported as [`WalletError::UnknownToken`].

use chain_eth::erc20::{self, EncodedCall};
use chain_eth::units::{DecimalAmount, MAX_DECIMALS};
use chain_eth::{Address, TransactionRequest};

use crate::error::WalletError;
use crate::retry::read_with_retry;
use crate::sender::TransactionSender;
use crate::types::{Amount, TransactionHandle};

#[derive(Clone)]
pub struct TokenClient {
    sender: TransactionSender,
}

impl TokenClient {
    pub fn new(sender: TransactionSender) -> Self {
        Self { sender }
    }

    /// The token's declared precision.
    pub async fn decimals(&self, contract: Address) -> Result<u8, WalletError> {
        let data = self.read(contract, erc20::decimals(), "decimals").await?;
        let decimals = erc20::decode_decimals(&data).map_err(|e| not_a_token(contract, e))?;
        if decimals > MAX_DECIMALS {
            return Err(WalletError::UnknownToken {
                contract,
                reason: format!("decimals() returned {decimals}, above the maximum of {MAX_DECIMALS}"),
            });
        }
        Ok(decimals)
    }

    /// `owner`'s balance of `contract`, scaled by the token's decimals.
    ///
    /// The balance and decimals reads are independent and run concurrently.
    pub async fn balance_of(&self, contract: Address, owner: Address) -> Result<Amount, WalletError> {
        let (raw, decimals) = tokio::try_join!(
            self.read(contract, erc20::balance_of(owner), "balanceOf"),
            self.decimals(contract),
        )?;
        let base_units = erc20::decode_uint256(&raw).map_err(|e| not_a_token(contract, e))?;
        Ok(Amount::new(base_units, decimals))
    }

    /// Transfers `amount` (whole tokens as a decimal string) to `to`.
    ///
    /// The amount's syntax is checked before any network call. Whether it
    /// fits the token's precision is only known once `decimals()` returns.
    pub async fn transfer(
        &self,
        contract: Address,
        to: Address,
        amount: &str,
    ) -> Result<TransactionHandle, WalletError> {
        let amount = DecimalAmount::parse(amount)?;
        let decimals = self.decimals(contract).await?;
        let base_units = amount.to_base_units(decimals)?;

        tracing::debug!(%contract, %to, decimals, %base_units, "Encoding token transfer");
        let request = TransactionRequest::contract_call(contract, erc20::transfer(to, base_units));
        self.sender.submit(request).await
    }

    async fn read(
        &self,
        contract: Address,
        call: EncodedCall,
        function: &'static str,
    ) -> Result<Vec<u8>, WalletError> {
        let client = self.sender.client();
        let data = call.as_bytes();
        let result = read_with_retry(&self.sender.config().read_retry, function, move || {
            client.call(contract, data)
        })
        .await;

        match result {
            Ok(bytes) if bytes.is_empty() => Err(WalletError::UnknownToken {
                contract,
                reason: format!("{function}() returned no data"),
            }),
            Ok(bytes) => Ok(bytes),
            Err(e) if e.is_revert() => Err(WalletError::UnknownToken {
                contract,
                reason: format!("{function}() reverted: {}", e.message),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

fn not_a_token(contract: Address, e: chain_eth::EthError) -> WalletError {
    WalletError::UnknownToken {
        contract,
        reason: e.to_string(),
    }
}
