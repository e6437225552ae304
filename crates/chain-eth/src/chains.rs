use alloy_primitives::TxHash;
use serde::Serialize;

/// Static description of an EVM network the wallet can target.
///
/// `rpc_url` is a public default endpoint for whatever `ChainClient` the host
/// application wires up; nothing in this crate dials it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EvmChain {
    pub chain_id: u64,
    pub name: &'static str,
    pub symbol: &'static str,
    /// Precision of the native currency.
    pub decimals: u8,
    pub rpc_url: &'static str,
    pub explorer_url: &'static str,
    pub is_testnet: bool,
}

impl EvmChain {
    /// Block-explorer link for a transaction hash.
    pub fn tx_url(&self, hash: &TxHash) -> String {
        format!("{}/tx/{hash}", self.explorer_url)
    }
}

/// Arbitrum One (chain ID 42161).
pub const ARBITRUM_ONE: EvmChain = EvmChain {
    chain_id: 42161,
    name: "Arbitrum One",
    symbol: "ETH",
    decimals: 18,
    rpc_url: "https://arb1.arbitrum.io/rpc",
    explorer_url: "https://arbiscan.io",
    is_testnet: false,
};

/// Arbitrum Sepolia (chain ID 421614).
pub const ARBITRUM_SEPOLIA: EvmChain = EvmChain {
    chain_id: 421614,
    name: "Arbitrum Sepolia",
    symbol: "ETH",
    decimals: 18,
    rpc_url: "https://sepolia-rollup.arbitrum.io/rpc",
    explorer_url: "https://sepolia.arbiscan.io",
    is_testnet: true,
};

/// Ethereum Mainnet (chain ID 1).
pub const ETHEREUM: EvmChain = EvmChain {
    chain_id: 1,
    name: "Ethereum",
    symbol: "ETH",
    decimals: 18,
    rpc_url: "https://eth.llamarpc.com",
    explorer_url: "https://etherscan.io",
    is_testnet: false,
};

/// Sepolia Testnet (chain ID 11155111).
pub const SEPOLIA: EvmChain = EvmChain {
    chain_id: 11155111,
    name: "Sepolia",
    symbol: "ETH",
    decimals: 18,
    rpc_url: "https://rpc.sepolia.org",
    explorer_url: "https://sepolia.etherscan.io",
    is_testnet: true,
};

/// Base (chain ID 8453).
pub const BASE: EvmChain = EvmChain {
    chain_id: 8453,
    name: "Base",
    symbol: "ETH",
    decimals: 18,
    rpc_url: "https://mainnet.base.org",
    explorer_url: "https://basescan.org",
    is_testnet: false,
};

/// Optimism (chain ID 10).
pub const OPTIMISM: EvmChain = EvmChain {
    chain_id: 10,
    name: "Optimism",
    symbol: "ETH",
    decimals: 18,
    rpc_url: "https://mainnet.optimism.io",
    explorer_url: "https://optimistic.etherscan.io",
    is_testnet: false,
};

/// Polygon PoS (chain ID 137).
pub const POLYGON: EvmChain = EvmChain {
    chain_id: 137,
    name: "Polygon",
    symbol: "POL",
    decimals: 18,
    rpc_url: "https://polygon-rpc.com",
    explorer_url: "https://polygonscan.com",
    is_testnet: false,
};

const KNOWN_CHAINS: &[&EvmChain] = &[
    &ARBITRUM_ONE,
    &ARBITRUM_SEPOLIA,
    &ETHEREUM,
    &SEPOLIA,
    &BASE,
    &OPTIMISM,
    &POLYGON,
];

/// Looks up a known network by chain ID.
pub fn by_chain_id(chain_id: u64) -> Option<&'static EvmChain> {
    known_chains()
        .iter()
        .find(|c| c.chain_id == chain_id)
        .copied()
}

/// Every network with a built-in definition.
pub fn known_chains() -> &'static [&'static EvmChain] {
    KNOWN_CHAINS
}
