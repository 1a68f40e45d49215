//! Oracle identity parsing and validation
//!
//! Node operators hand out their identifiers in the form the node prints them,
//! usually with a type label in front (`p2p_`, `ocroff_`, `ocrsad_`, `ocrcfg_`).
//! Every field is normalized the same way before interpretation: strip the
//! label, trim whitespace, then decode hex for the byte fields.

use crate::hex_codec::{bytes_to_array, decode_hex_array, hex_array};
use crate::{OcrConfigError, Result};
use serde::{Deserialize, Serialize};

/// Length of an off-chain (Ed25519) public key
pub const OFFCHAIN_PUBLIC_KEY_LEN: usize = 32;
/// Length of an account-style on-chain address
pub const ADDRESS_LEN: usize = 20;
/// Length of a shared-secret encryption (X25519) public key
pub const ENCRYPTION_PUBLIC_KEY_LEN: usize = 32;

/// One oracle in the committee
///
/// All byte fields are fixed-size, so a constructed identity is always
/// well-formed. Field order matches what the contract expects per oracle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleIdentity {
    /// Base58 peer network address
    pub peer_id: String,
    /// Key used for off-chain message authentication
    #[serde(with = "hex_array")]
    pub offchain_public_key: [u8; OFFCHAIN_PUBLIC_KEY_LEN],
    /// Address used for on-chain signature verification
    #[serde(with = "hex_array")]
    pub onchain_signing_address: [u8; ADDRESS_LEN],
    /// Address authorized to transmit reports on-chain
    #[serde(with = "hex_array")]
    pub transmit_address: [u8; ADDRESS_LEN],
    /// Recipient key for the shared-secret envelope
    #[serde(with = "hex_array")]
    pub shared_secret_encryption_public_key: [u8; ENCRYPTION_PUBLIC_KEY_LEN],
}

impl OracleIdentity {
    /// Build an identity from raw bytes, checking every length
    pub fn new(
        peer_id: &str,
        offchain_public_key: &[u8],
        onchain_signing_address: &[u8],
        transmit_address: &[u8],
        shared_secret_encryption_public_key: &[u8],
    ) -> Result<Self> {
        Ok(Self {
            peer_id: parse_peer_id(peer_id)?,
            offchain_public_key: bytes_to_array("offchainPublicKey", offchain_public_key)?,
            onchain_signing_address: bytes_to_array(
                "onchainSigningAddress",
                onchain_signing_address,
            )?,
            transmit_address: bytes_to_array("transmitAddress", transmit_address)?,
            shared_secret_encryption_public_key: bytes_to_array(
                "sharedSecretEncryptionPublicKey",
                shared_secret_encryption_public_key,
            )?,
        })
    }

    /// Parse an identity from the strings a node operator supplies
    ///
    /// Each field may carry a `label_` prefix and surrounding whitespace; byte
    /// fields are hex with an optional `0x` prefix.
    pub fn parse(
        peer_id: &str,
        offchain_public_key: &str,
        onchain_signing_address: &str,
        transmit_address: &str,
        shared_secret_encryption_public_key: &str,
    ) -> Result<Self> {
        Ok(Self {
            peer_id: parse_peer_id(peer_id)?,
            offchain_public_key: parse_hex_field("offchainPublicKey", offchain_public_key)?,
            onchain_signing_address: parse_hex_field(
                "onchainSigningAddress",
                onchain_signing_address,
            )?,
            transmit_address: parse_hex_field("transmitAddress", transmit_address)?,
            shared_secret_encryption_public_key: parse_hex_field(
                "sharedSecretEncryptionPublicKey",
                shared_secret_encryption_public_key,
            )?,
        })
    }
}

/// Free-function form of [`OracleIdentity::parse`]
pub fn parse_identity(
    peer_id: &str,
    offchain_public_key: &str,
    onchain_signing_address: &str,
    transmit_address: &str,
    shared_secret_encryption_public_key: &str,
) -> Result<OracleIdentity> {
    OracleIdentity::parse(
        peer_id,
        offchain_public_key,
        onchain_signing_address,
        transmit_address,
        shared_secret_encryption_public_key,
    )
}

/// Strip a `label_` prefix
///
/// Keeps the whole string when there is no `_` or nothing follows the first
/// one; otherwise keeps everything after the first `_`.
pub fn strip_label(s: &str) -> &str {
    match s.split_once('_') {
        Some((_, suffix)) if !suffix.is_empty() => suffix,
        _ => s,
    }
}

/// Label stripping followed by whitespace trimming
pub fn normalize_field(s: &str) -> &str {
    strip_label(s).trim()
}

fn parse_peer_id(raw: &str) -> Result<String> {
    let peer_id = normalize_field(raw);
    if peer_id.is_empty() {
        return Err(OcrConfigError::validation(
            "peerId",
            "must be the base58 p2p address",
        ));
    }
    Ok(peer_id.to_string())
}

fn parse_hex_field<const N: usize>(field: &str, raw: &str) -> Result<[u8; N]> {
    let normalized = normalize_field(raw);
    if normalized.is_empty() {
        return Err(OcrConfigError::validation(field, "is required"));
    }
    decode_hex_array(field, normalized)
}

/// Four copies of a placeholder oracle, useful for demos and encoding tests
///
/// The keys are well-formed but do not belong to a live node.
pub fn sample_oracles() -> Result<Vec<OracleIdentity>> {
    (0..4)
        .map(|_| {
            OracleIdentity::parse(
                "p2p_12D3KooWAjckJmmuNuWQdb6gFwYJ4ksCxnuPj2RnoBw2vENt4HBR",
                "ocroff_8f81e68a89546235a1472f3cb22956c27ae067cf305ab83009c19b632757f3ae",
                "ocrsad_0x7244dfbf59d40f18ac501193eaab04d33e7bfbda",
                "0x858df45E37352d2606AF9923757Fd809Cdd22037",
                "ocrcfg_89166bf5205dcf375a64ee3917f894a74a54d4dd630013fd8f26ac0bc069ae02",
            )
        })
        .collect()
}
