use std::time::Duration;

use chain_eth::chains::EvmChain;
use chain_eth::units::ETHER_DECIMALS;
use serde::Deserialize;

use crate::error::WalletError;

/// Bounded retry for read-only node calls. Broadcasts never use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero behaves like one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after each failure.
    pub initial_backoff_ms: u64,
}

impl RetryPolicy {
    pub(crate) fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.initial_backoff_ms.saturating_mul(1u64 << attempt.min(16)))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// When set, every send verifies the node reports this chain ID.
    pub expected_chain_id: Option<u64>,
    /// Precision of the native currency.
    pub native_decimals: u8,
    pub read_retry: RetryPolicy,
    /// Headroom added on top of the node's gas estimate, in percent.
    pub gas_limit_buffer_percent: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            expected_chain_id: None,
            native_decimals: ETHER_DECIMALS,
            read_retry: RetryPolicy::default(),
            gas_limit_buffer_percent: 20,
        }
    }
}

impl WalletConfig {
    /// Config pinned to one of the known networks.
    pub fn for_chain(chain: &EvmChain) -> Self {
        Self {
            expected_chain_id: Some(chain.chain_id),
            native_decimals: chain.decimals,
            ..Self::default()
        }
    }

    /// Parses a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Rejects settings that would make the wallet unusable.
    pub fn validate(&self) -> Result<(), WalletError> {
        if self.native_decimals > chain_eth::units::MAX_DECIMALS {
            return Err(WalletError::InvalidAmount(format!(
                "native_decimals {} exceeds {}",
                self.native_decimals,
                chain_eth::units::MAX_DECIMALS
            )));
        }
        Ok(())
    }

    pub(crate) fn buffered_gas(&self, estimate: u64) -> u64 {
        estimate.saturating_add(estimate.saturating_mul(self.gas_limit_buffer_percent) / 100)
    }
}
