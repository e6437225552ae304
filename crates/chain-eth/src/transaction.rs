use alloy_primitives::{Bytes, TxHash, B256, U256};
use alloy_rlp::{Encodable, RlpEncodable};
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{RecoveryId, Signature, SigningKey};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::address::Address;
use crate::erc20::EncodedCall;
use crate::error::EthError;

/// What the caller wants to happen: a recipient, a value in base units and
/// optional calldata. Chain parameters are supplied separately at signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub to: Address,
    /// Native value in wei.
    pub value: U256,
    /// Calldata (empty for plain transfers).
    pub data: Vec<u8>,
}

impl TransactionRequest {
    /// A native-currency transfer with no calldata.
    pub fn native(to: Address, value: U256) -> Self {
        Self {
            to,
            value,
            data: Vec::new(),
        }
    }

    /// A zero-value call to `contract`.
    pub fn contract_call(contract: Address, call: EncodedCall) -> Self {
        Self {
            to: contract,
            value: U256::ZERO,
            data: call.into_bytes(),
        }
    }
}

/// EIP-1559 fee parameters, in wei per gas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeParams {
    pub max_fee_per_gas: u128,
    pub max_priority_fee_per_gas: u128,
}

/// Chain parameters required to sign a request. Every field must be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainContext {
    pub chain_id: Option<u64>,
    pub nonce: Option<u64>,
    pub gas_limit: Option<u64>,
    pub fees: Option<FeeParams>,
}

impl ChainContext {
    pub fn new(chain_id: u64, nonce: u64, gas_limit: u64, fees: FeeParams) -> Self {
        Self {
            chain_id: Some(chain_id),
            nonce: Some(nonce),
            gas_limit: Some(gas_limit),
            fees: Some(fees),
        }
    }
}

/// An unsigned EIP-1559 (type 2) transaction with every field resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthTransaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: u128,
    pub max_fee_per_gas: u128,
    pub gas_limit: u64,
    pub to: Address,
    pub value: U256,
    pub data: Vec<u8>,
}

impl EthTransaction {
    /// Combines a request with its chain context.
    pub fn from_request(
        request: &TransactionRequest,
        context: &ChainContext,
    ) -> Result<Self, EthError> {
        let chain_id = context
            .chain_id
            .ok_or(EthError::IncompleteContext("chain id"))?;
        let nonce = context.nonce.ok_or(EthError::IncompleteContext("nonce"))?;
        let gas_limit = context
            .gas_limit
            .ok_or(EthError::IncompleteContext("gas limit"))?;
        let fees = context
            .fees
            .ok_or(EthError::IncompleteContext("fee parameters"))?;

        if fees.max_priority_fee_per_gas > fees.max_fee_per_gas {
            return Err(EthError::SigningError(format!(
                "priority fee {} exceeds max fee {}",
                fees.max_priority_fee_per_gas, fees.max_fee_per_gas
            )));
        }

        Ok(Self {
            chain_id,
            nonce,
            max_priority_fee_per_gas: fees.max_priority_fee_per_gas,
            max_fee_per_gas: fees.max_fee_per_gas,
            gas_limit,
            to: request.to,
            value: request.value,
            data: request.data.clone(),
        })
    }
}

/// A signed EIP-1559 transaction ready for broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    /// `0x02 || rlp(signed_fields)`.
    pub raw: Vec<u8>,
    /// Keccak-256 of `raw`; the hash the node will report.
    pub hash: TxHash,
    pub nonce: u64,
}

/// Signs an EIP-1559 transaction.
///
/// The signing process:
/// 1. RLP-encode the unsigned fields and prepend the type byte (0x02).
/// 2. Keccak-256 hash the payload.
/// 3. Sign the hash (RFC 6979, so the same inputs give the same bytes).
/// 4. Re-encode with y_parity, r and s appended.
pub fn sign_transaction(
    tx: &EthTransaction,
    signing_key: &SigningKey,
) -> Result<SignedTransaction, EthError> {
    let unsigned_payload = encode_unsigned_tx(tx);
    let msg_hash = Keccak256::digest(&unsigned_payload);

    let (signature, recovery_id): (Signature, RecoveryId) = signing_key
        .sign_prehash(msg_hash.as_slice())
        .map_err(|e| EthError::SigningError(e.to_string()))?;

    let signed_fields = SignedTxFields {
        chain_id: tx.chain_id,
        nonce: tx.nonce,
        max_priority_fee_per_gas: tx.max_priority_fee_per_gas,
        max_fee_per_gas: tx.max_fee_per_gas,
        gas_limit: tx.gas_limit,
        to: RlpAddress(tx.to),
        value: tx.value,
        data: Bytes::copy_from_slice(&tx.data),
        access_list: Vec::new(),
        signature_y_parity: u8::from(recovery_id.is_y_odd()),
        signature_r: U256::from_be_slice(&signature.r().to_bytes()),
        signature_s: U256::from_be_slice(&signature.s().to_bytes()),
    };

    let mut rlp_buf = Vec::new();
    signed_fields.encode(&mut rlp_buf);

    let mut raw = Vec::with_capacity(1 + rlp_buf.len());
    raw.push(0x02);
    raw.extend_from_slice(&rlp_buf);

    let hash = B256::from_slice(&Keccak256::digest(&raw));

    Ok(SignedTransaction {
        raw,
        hash,
        nonce: tx.nonce,
    })
}

/// Signs an arbitrary message using EIP-191 personal_sign.
///
/// Returns the 65-byte signature (r[32] + s[32] + v[1]) where v is 27 or 28.
pub fn sign_message(message: &[u8], signing_key: &SigningKey) -> Result<[u8; 65], EthError> {
    let msg_hash = eip191_hash(message);

    let (signature, recovery_id): (Signature, RecoveryId) = signing_key
        .sign_prehash(msg_hash.as_slice())
        .map_err(|e| EthError::SigningError(e.to_string()))?;

    let mut sig = [0u8; 65];
    sig[..32].copy_from_slice(&signature.r().to_bytes());
    sig[32..64].copy_from_slice(&signature.s().to_bytes());
    sig[64] = u8::from(recovery_id.is_y_odd()) + 27;
    Ok(sig)
}

/// keccak256("\x19Ethereum Signed Message:\n" + len(message) + message)
pub fn eip191_hash(message: &[u8]) -> B256 {
    let prefix = format!("\x19Ethereum Signed Message:\n{}", message.len());
    let mut hasher = Keccak256::new();
    hasher.update(prefix.as_bytes());
    hasher.update(message);
    B256::from_slice(&hasher.finalize())
}

/// Encodes the unsigned transaction as `0x02 || rlp(fields)`.
///
/// The RLP-encoded fields are:
/// `[chain_id, nonce, max_priority_fee_per_gas, max_fee_per_gas, gas_limit, to,
///   value, data, access_list]`
pub fn encode_unsigned_tx(tx: &EthTransaction) -> Vec<u8> {
    let unsigned_fields = UnsignedTxFields {
        chain_id: tx.chain_id,
        nonce: tx.nonce,
        max_priority_fee_per_gas: tx.max_priority_fee_per_gas,
        max_fee_per_gas: tx.max_fee_per_gas,
        gas_limit: tx.gas_limit,
        to: RlpAddress(tx.to),
        value: tx.value,
        data: Bytes::copy_from_slice(&tx.data),
        access_list: Vec::new(),
    };

    let mut rlp_buf = Vec::new();
    unsigned_fields.encode(&mut rlp_buf);

    let mut payload = Vec::with_capacity(1 + rlp_buf.len());
    payload.push(0x02);
    payload.extend_from_slice(&rlp_buf);
    payload
}

// ---------------------------------------------------------------------------
// RLP-encodable structures
// ---------------------------------------------------------------------------

#[derive(RlpEncodable)]
struct UnsignedTxFields {
    chain_id: u64,
    nonce: u64,
    max_priority_fee_per_gas: u128,
    max_fee_per_gas: u128,
    gas_limit: u64,
    to: RlpAddress,
    value: U256,
    data: Bytes,
    access_list: Vec<AccessListItem>,
}

#[derive(RlpEncodable)]
struct SignedTxFields {
    chain_id: u64,
    nonce: u64,
    max_priority_fee_per_gas: u128,
    max_fee_per_gas: u128,
    gas_limit: u64,
    to: RlpAddress,
    value: U256,
    data: Bytes,
    access_list: Vec<AccessListItem>,
    signature_y_parity: u8,
    signature_r: U256,
    signature_s: U256,
}

/// An EIP-2930 access list entry (always empty here).
#[derive(Debug, Clone, RlpEncodable)]
struct AccessListItem {
    address: RlpAddress,
    storage_keys: Vec<B256>,
}

/// Encodes an address as a 20-byte RLP string.
#[derive(Debug, Clone, Copy)]
struct RlpAddress(Address);

impl Encodable for RlpAddress {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.as_bytes().as_slice().encode(out);
    }

    fn length(&self) -> usize {
        self.0.as_bytes().as_slice().length()
    }
}
