//! Signing capability for a single account.
//!
//! The secret never leaves a `KeyMaterial` except through the two explicit
//! `export_*` methods. Construction logs nothing but the address.

use std::fmt;

use chain_eth::transaction::{self, EthTransaction};
use chain_eth::{Address, ChainContext, EthError, SignedTransaction, TransactionRequest};
use k256::ecdsa::SigningKey;
use zeroize::{Zeroize, Zeroizing};

use crate::error::WalletError;
use crate::hd_derivation;
use crate::mnemonic;
use crate::secret::SecretString;

/// A secp256k1 signing key, its derived address and, when the key came from
/// a phrase, the phrase itself.
///
/// The key scalar and the phrase are wiped when this value is dropped.
pub struct KeyMaterial {
    signing_key: SigningKey,
    address: Address,
    mnemonic: Option<SecretString>,
}

impl KeyMaterial {
    /// Imports a raw 32-byte private key.
    ///
    /// Fails with `InvalidKey` for zero or for values at or above the curve
    /// order.
    pub fn from_private_key(secret: &[u8; 32]) -> Result<Self, WalletError> {
        let signing_key = SigningKey::from_bytes(secret.into())
            .map_err(|_| EthError::InvalidPrivateKey("not a valid secp256k1 scalar".into()))?;
        Ok(Self::from_signing_key(signing_key, None))
    }

    /// Imports a hex private key, with or without a `0x` prefix.
    pub fn from_hex(secret_hex: &str) -> Result<Self, WalletError> {
        let hex_part = secret_hex
            .strip_prefix("0x")
            .or_else(|| secret_hex.strip_prefix("0X"))
            .unwrap_or(secret_hex);

        if hex_part.len() != 64 {
            return Err(WalletError::InvalidKey(format!(
                "expected 64 hex characters, got {}",
                hex_part.len()
            )));
        }

        let mut bytes = Zeroizing::new([0u8; 32]);
        hex::decode_to_slice(hex_part, bytes.as_mut_slice())
            .map_err(|_| WalletError::InvalidKey("private key is not valid hex".into()))?;

        Self::from_private_key(&bytes)
    }

    /// Restores the first account (`m/44'/60'/0'/0/0`) of a BIP-39 phrase.
    pub fn from_mnemonic(phrase: &str, passphrase: &str) -> Result<Self, WalletError> {
        Self::from_mnemonic_at(phrase, passphrase, 0)
    }

    /// Restores account `index` of a BIP-39 phrase.
    pub fn from_mnemonic_at(
        phrase: &str,
        passphrase: &str,
        index: u32,
    ) -> Result<Self, WalletError> {
        let seed = mnemonic::mnemonic_to_seed(phrase, passphrase)?;
        let signing_key = hd_derivation::derive_signing_key(seed.as_slice(), index)?;
        Ok(Self::from_signing_key(
            signing_key,
            Some(SecretString::new(phrase.to_string())),
        ))
    }

    /// Creates a fresh account from 256 bits of OS entropy. The phrase is kept
    /// so the account can be exported and restored elsewhere.
    pub fn generate() -> Result<Self, WalletError> {
        let phrase = mnemonic::generate_mnemonic()?;
        let seed = mnemonic::mnemonic_to_seed(phrase.expose_secret(), "")?;
        let signing_key = hd_derivation::derive_signing_key(seed.as_slice(), 0)?;
        Ok(Self::from_signing_key(signing_key, Some(phrase)))
    }

    fn from_signing_key(signing_key: SigningKey, mnemonic: Option<SecretString>) -> Self {
        let address = Address::from_public_key(&signing_key.verifying_key().into());
        tracing::debug!(%address, from_mnemonic = mnemonic.is_some(), "Key material loaded");
        Self {
            signing_key,
            address,
            mnemonic,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn has_mnemonic(&self) -> bool {
        self.mnemonic.is_some()
    }

    /// Signs `request` under `context`.
    ///
    /// Pure computation: the same request and context always give the same
    /// bytes. Fails with `SigningError` if any context field is missing.
    pub fn sign(
        &self,
        request: &TransactionRequest,
        context: &ChainContext,
    ) -> Result<SignedTransaction, WalletError> {
        let tx = EthTransaction::from_request(request, context)?;
        Ok(transaction::sign_transaction(&tx, &self.signing_key)?)
    }

    /// EIP-191 `personal_sign` over `message`; 65 bytes r || s || v.
    pub fn sign_message(&self, message: &[u8]) -> Result<[u8; 65], WalletError> {
        Ok(transaction::sign_message(message, &self.signing_key)?)
    }

    /// Reveals the private key as `0x`-prefixed hex.
    pub fn export_private_key(&self) -> SecretString {
        let mut bytes: [u8; 32] = self.signing_key.to_bytes().into();
        let mut hexed = hex::encode(bytes);
        let exported = SecretString::new(format!("0x{hexed}"));
        bytes.zeroize();
        hexed.zeroize();
        exported
    }

    /// Reveals the recovery phrase, if the key was created from one.
    pub fn export_mnemonic(&self) -> Option<SecretString> {
        self.mnemonic.clone()
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("address", &self.address)
            .field("has_mnemonic", &self.mnemonic.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use chain_eth::FeeParams;

    const KEY_ONE: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";
    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn context(nonce: u64) -> ChainContext {
        ChainContext::new(
            421614,
            nonce,
            21_000,
            FeeParams {
                max_fee_per_gas: 200_000_000,
                max_priority_fee_per_gas: 0,
            },
        )
    }

    fn request() -> TransactionRequest {
        TransactionRequest::native(
            "0x000000000000000000000000000000000000dEaD".parse().unwrap(),
            U256::from(1_000u64),
        )
    }

    #[test]
    fn import_known_key() {
        let key = KeyMaterial::from_hex(KEY_ONE).unwrap();
        assert_eq!(key.address().to_string(), "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf");
        assert!(!key.has_mnemonic());
        assert!(key.export_mnemonic().is_none());
    }

    #[test]
    fn import_without_prefix() {
        let key = KeyMaterial::from_hex(&KEY_ONE[2..]).unwrap();
        assert_eq!(key.address().to_string(), "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf");
    }

    #[test]
    fn importing_twice_gives_same_address() {
        let a = KeyMaterial::from_hex(KEY_ONE).unwrap();
        let b = KeyMaterial::from_hex(KEY_ONE).unwrap();
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn invalid_scalars_are_rejected() {
        assert!(matches!(
            KeyMaterial::from_private_key(&[0u8; 32]),
            Err(WalletError::InvalidKey(_))
        ));
        // Values at or above the curve order are not valid private keys.
        assert!(matches!(
            KeyMaterial::from_private_key(&[0xff; 32]),
            Err(WalletError::InvalidKey(_))
        ));
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(KeyMaterial::from_hex("0x1234").is_err());
        assert!(KeyMaterial::from_hex(&format!("0x{}", "zz".repeat(32))).is_err());
    }

    #[test]
    fn export_roundtrips_private_key() {
        let key = KeyMaterial::from_hex(KEY_ONE).unwrap();
        assert_eq!(key.export_private_key().expose_secret(), KEY_ONE);
    }

    #[test]
    fn generated_keys_are_distinct_and_restorable() {
        let a = KeyMaterial::generate().unwrap();
        let b = KeyMaterial::generate().unwrap();
        assert_ne!(a.address(), b.address());

        let phrase = a.export_mnemonic().expect("generated keys keep their phrase");
        let restored = KeyMaterial::from_mnemonic(phrase.expose_secret(), "").unwrap();
        assert_eq!(restored.address(), a.address());
    }

    #[test]
    fn mnemonic_import_uses_first_account() {
        let key = KeyMaterial::from_mnemonic(TEST_MNEMONIC, "").unwrap();
        assert_eq!(key.address().to_string(), "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
        assert!(key.has_mnemonic());

        let second = KeyMaterial::from_mnemonic_at(TEST_MNEMONIC, "", 1).unwrap();
        assert_ne!(second.address(), key.address());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let key = KeyMaterial::from_mnemonic(TEST_MNEMONIC, "").unwrap();
        let debug = format!("{key:?}");
        assert!(debug.contains("0x9858EfFD232B4033E47d90003D41EC34EcaEda94"));
        assert!(!debug.contains("abandon"));
        assert!(!debug.contains(&key.export_private_key().expose_secret()[2..]));
    }

    #[test]
    fn signing_is_deterministic() {
        let key = KeyMaterial::from_hex(KEY_ONE).unwrap();
        let first = key.sign(&request(), &context(0)).unwrap();
        let second = key.sign(&request(), &context(0)).unwrap();
        assert_eq!(first, second);

        let other_nonce = key.sign(&request(), &context(1)).unwrap();
        assert_ne!(first.hash, other_nonce.hash);
    }

    #[test]
    fn signing_requires_complete_context() {
        let key = KeyMaterial::from_hex(KEY_ONE).unwrap();
        let incomplete = ChainContext {
            nonce: None,
            ..context(0)
        };
        assert!(matches!(
            key.sign(&request(), &incomplete),
            Err(WalletError::SigningError(_))
        ));
    }

    #[test]
    fn message_signature_has_recovery_byte() {
        let key = KeyMaterial::from_hex(KEY_ONE).unwrap();
        let sig = key.sign_message(b"hello").unwrap();
        assert!(sig[64] == 27 || sig[64] == 28);
    }
}
