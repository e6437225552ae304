use bip32::{DerivationPath, XPrv};
use k256::ecdsa::SigningKey;

use crate::error::WalletError;

/// BIP-44 path for the `index`-th EVM account: `m/44'/60'/0'/0/{index}`.
pub fn evm_derivation_path(index: u32) -> String {
    format!("m/44'/60'/0'/0/{index}")
}

/// Derive the secp256k1 signing key at `m/44'/60'/0'/0/{index}` from a
/// BIP-39 seed.
pub fn derive_signing_key(seed: &[u8], index: u32) -> Result<SigningKey, WalletError> {
    let path: DerivationPath = evm_derivation_path(index)
        .parse()
        .map_err(|e: bip32::Error| WalletError::DerivationFailed(e.to_string()))?;

    let xprv = XPrv::derive_from_path(seed, &path)
        .map_err(|e| WalletError::DerivationFailed(e.to_string()))?;

    Ok(xprv.private_key().clone())
}
