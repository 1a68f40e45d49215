//! Configuration assembly
//!
//! Combines validated oracle identities, a network profile and a freshly built
//! shared-secret envelope into the [`ConfigurationRecord`] submitted on-chain.
//! All per-oracle sequences in the record follow the input oracle order.

use crate::effects::{gen_random_bytes, production_random, RandomSource};
use crate::envelope::{
    encrypt_for_recipients, SharedSecretEnvelope, EPHEMERAL_SECRET_LEN, SHARED_SECRET_LEN,
};
use crate::hex_codec::{decode_hex, hex_array_vec};
use crate::identity::{OracleIdentity, OFFCHAIN_PUBLIC_KEY_LEN};
use crate::network::{NetworkClass, NetworkParams, ProfileTable};
use crate::{OcrConfigError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use zeroize::Zeroizing;

/// Everything the contract's `setConfig` needs, in contract field order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationRecord {
    /// Timing deltas plus the deviation threshold
    #[serde(flatten)]
    pub params: NetworkParams,
    /// Maximum number of rounds per epoch
    pub r_max: u8,
    /// Per-oracle weight, one entry per oracle
    pub weights: Vec<u8>,
    /// Off-chain public keys in oracle order
    #[serde(with = "hex_array_vec")]
    pub offchain_public_keys: Vec<[u8; OFFCHAIN_PUBLIC_KEY_LEN]>,
    /// Comma-separated peer ids in oracle order
    pub peer_ids: String,
    /// Shared secret encrypted for every oracle
    pub shared_secret_encryptions: SharedSecretEnvelope,
}

impl ConfigurationRecord {
    /// Number of oracles the record was built for
    pub fn oracle_count(&self) -> usize {
        self.offchain_public_keys.len()
    }

    /// Peer ids split back into a list
    pub fn peer_id_list(&self) -> Vec<&str> {
        if self.peer_ids.is_empty() {
            return Vec::new();
        }
        self.peer_ids.split(',').collect()
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a record from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Turn the optional shared-secret literal into key bytes
///
/// - absent or empty: 16 bytes from `random`
/// - `0x`/`0X` prefix: hex
/// - anything else: the UTF-8 bytes of the string
///
/// Fewer than 16 bytes is rejected here. Longer values pass and are rejected
/// by the envelope engine.
pub fn resolve_shared_secret(
    literal: Option<&str>,
    random: &dyn RandomSource,
) -> Result<Zeroizing<Vec<u8>>> {
    let literal = match literal {
        Some(s) if !s.is_empty() => s,
        _ => {
            let generated: Zeroizing<[u8; SHARED_SECRET_LEN]> =
                Zeroizing::new(gen_random_bytes(random));
            return Ok(Zeroizing::new(generated.to_vec()));
        }
    };

    let bytes = if literal.starts_with("0x") || literal.starts_with("0X") {
        decode_hex(literal).map(Zeroizing::new).map_err(|e| {
            OcrConfigError::validation("sharedSecret", format!("invalid hex: {e}"))
        })?
    } else {
        Zeroizing::new(literal.as_bytes().to_vec())
    };

    if bytes.len() < SHARED_SECRET_LEN {
        return Err(OcrConfigError::validation(
            "sharedSecret",
            format!(
                "must be a {SHARED_SECRET_LEN} character string or 0x-prefixed hex of {SHARED_SECRET_LEN} bytes, got {} bytes",
                bytes.len()
            ),
        ));
    }
    Ok(bytes)
}

/// Builds configuration records against a profile table and randomness source
#[derive(Clone)]
pub struct ConfigAssembler {
    profiles: ProfileTable,
    random: Arc<dyn RandomSource>,
}

impl std::fmt::Debug for ConfigAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigAssembler")
            .field("profiles", &self.profiles.len())
            .field("deterministic", &self.random.is_deterministic())
            .finish()
    }
}

impl ConfigAssembler {
    /// Assembler over the built-in profiles with the given randomness
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self {
            profiles: ProfileTable::default(),
            random,
        }
    }

    /// Assembler over the built-in profiles with OS entropy
    pub fn production() -> Self {
        Self::new(production_random())
    }

    /// Replace the profile table
    pub fn with_profiles(mut self, profiles: ProfileTable) -> Self {
        self.profiles = profiles;
        self
    }

    /// Assemble a record for a network class
    pub fn assemble(
        &self,
        network_class: NetworkClass,
        oracles: &[OracleIdentity],
        alpha_ppb: u64,
        r_max: u8,
        weights: &[u8],
        shared_secret: Option<&str>,
    ) -> Result<ConfigurationRecord> {
        self.assemble_index(
            network_class.index(),
            oracles,
            alpha_ppb,
            r_max,
            weights,
            shared_secret,
        )
    }

    /// Assemble a record for a raw profile index
    ///
    /// Indices beyond the table select the first profile.
    pub fn assemble_index(
        &self,
        profile_index: usize,
        oracles: &[OracleIdentity],
        alpha_ppb: u64,
        r_max: u8,
        weights: &[u8],
        shared_secret: Option<&str>,
    ) -> Result<ConfigurationRecord> {
        if oracles.is_empty() {
            return Err(OcrConfigError::validation(
                "oracles",
                "at least one oracle is required",
            ));
        }
        if weights.len() != oracles.len() {
            return Err(OcrConfigError::validation(
                "weights",
                format!(
                    "expected one weight per oracle ({}), got {}",
                    oracles.len(),
                    weights.len()
                ),
            ));
        }

        // Secret before ephemeral, so seeded builds are reproducible
        let secret = resolve_shared_secret(shared_secret, self.random.as_ref())?;
        let ephemeral: Zeroizing<[u8; EPHEMERAL_SECRET_LEN]> =
            Zeroizing::new(gen_random_bytes(self.random.as_ref()));

        let recipients: Vec<&[u8]> = oracles
            .iter()
            .map(|o| o.shared_secret_encryption_public_key.as_slice())
            .collect();
        let envelope = encrypt_for_recipients(&recipients, &secret, ephemeral.as_slice())?;

        let params = self.profiles.lookup(profile_index).with_alpha_ppb(alpha_ppb);

        debug!(
            profile_index,
            oracles = oracles.len(),
            r_max,
            alpha_ppb,
            "Assembled configuration record"
        );

        Ok(ConfigurationRecord {
            params,
            r_max,
            weights: weights.to_vec(),
            offchain_public_keys: oracles.iter().map(|o| o.offchain_public_key).collect(),
            peer_ids: oracles
                .iter()
                .map(|o| o.peer_id.as_str())
                .collect::<Vec<_>>()
                .join(","),
            shared_secret_encryptions: envelope,
        })
    }
}

/// Assemble a record with the built-in profiles and OS entropy
pub fn assemble_config(
    network_class: NetworkClass,
    oracles: &[OracleIdentity],
    alpha_ppb: u64,
    r_max: u8,
    weights: &[u8],
    shared_secret: Option<&str>,
) -> Result<ConfigurationRecord> {
    ConfigAssembler::production().assemble(
        network_class,
        oracles,
        alpha_ppb,
        r_max,
        weights,
        shared_secret,
    )
}

/// Serialize a record as pretty JSON
pub fn to_json(record: &ConfigurationRecord) -> Result<String> {
    record.to_json()
}

/// Parse a record from JSON
pub fn from_json(json: &str) -> Result<ConfigurationRecord> {
    ConfigurationRecord::from_json(json)
}
