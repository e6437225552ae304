use chain_eth::{units, Address, TransactionRequest};

use crate::error::WalletError;
use crate::sender::TransactionSender;
use crate::types::TransactionHandle;

/// Native-currency transfers from the wallet's account.
#[derive(Clone)]
pub struct NativeTransferBuilder {
    sender: TransactionSender,
}

impl NativeTransferBuilder {
    pub fn new(sender: TransactionSender) -> Self {
        Self { sender }
    }

    /// Validates the recipient and amount and builds the request. No network
    /// access.
    pub fn build(&self, to: &str, amount: &str) -> Result<TransactionRequest, WalletError> {
        let to: Address = to.parse()?;
        let value = units::to_base_units(amount, self.sender.config().native_decimals)?;
        Ok(TransactionRequest::native(to, value))
    }

    /// Sends `amount` (a decimal string in whole units) to `to`.
    ///
    /// Malformed input fails before the node is contacted. Insufficient
    /// balance is not checked locally; the node reports it on broadcast.
    pub async fn send(&self, to: &str, amount: &str) -> Result<TransactionHandle, WalletError> {
        let request = self.build(to, amount)?;
        self.sender.submit(request).await
    }
}
