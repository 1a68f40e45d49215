//! Build file loading
//!
//! A build file is TOML:
//!
//! ```toml
//! network = "slow"
//! alpha_ppb = 10000000
//! r_max = 1
//! weights = [1, 1, 1, 1]          # optional, one per oracle
//! shared_secret = "0x00..ff"      # optional, prefer OCR_SHARED_SECRET
//!
//! [[oracles]]
//! peer_id = "p2p_12D3KooW..."
//! offchain_public_key = "ocroff_..."
//! onchain_signing_address = "ocrsad_0x..."
//! transmit_address = "0x..."
//! shared_secret_encryption_public_key = "ocrcfg_..."
//! ```

use anyhow::Context;
use ocr_config::{NetworkClass, OcrConfigError, OracleIdentity, ProfileTable};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable that overrides `shared_secret`
pub const SHARED_SECRET_ENV: &str = "OCR_SHARED_SECRET";

/// One oracle as written in the build file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleEntry {
    pub peer_id: String,
    pub offchain_public_key: String,
    pub onchain_signing_address: String,
    pub transmit_address: String,
    pub shared_secret_encryption_public_key: String,
}

impl OracleEntry {
    /// Validate and normalize into an identity
    pub fn to_identity(&self) -> ocr_config::Result<OracleIdentity> {
        OracleIdentity::parse(
            &self.peer_id,
            &self.offchain_public_key,
            &self.onchain_signing_address,
            &self.transmit_address,
            &self.shared_secret_encryption_public_key,
        )
    }
}

/// Parameters for one `build` invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    pub network: NetworkClass,
    #[serde(default)]
    pub alpha_ppb: u64,
    pub r_max: u8,
    #[serde(default)]
    pub weights: Option<Vec<u8>>,
    #[serde(default)]
    pub shared_secret: Option<String>,
    #[serde(default)]
    pub profiles: Option<ProfileTable>,
    pub oracles: Vec<OracleEntry>,
}

impl BuildConfig {
    /// Parse a build file from TOML text
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read, parse, apply the `OCR_SHARED_SECRET` override, and validate
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        Self::load_with_override(path, std::env::var(SHARED_SECRET_ENV).ok())
    }

    /// [`BuildConfig::load`] with the override value supplied by the caller
    pub fn load_with_override(
        path: &Path,
        shared_secret: Option<String>,
    ) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read build file {}", path.display()))?;
        let mut config = Self::from_toml(&text)
            .with_context(|| format!("Failed to parse build file {}", path.display()))?;
        config.apply_shared_secret_override(shared_secret);
        config.validate()?;
        Ok(config)
    }

    /// Replace `shared_secret` when an override value is present
    pub fn apply_shared_secret_override(&mut self, value: Option<String>) {
        if let Some(secret) = value.filter(|s| !s.is_empty()) {
            self.shared_secret = Some(secret);
        }
    }

    /// Structural checks that do not need any key material
    pub fn validate(&self) -> ocr_config::Result<()> {
        if self.oracles.is_empty() {
            return Err(OcrConfigError::validation(
                "oracles",
                "at least one [[oracles]] entry is required",
            ));
        }
        if let Some(weights) = &self.weights {
            if weights.len() != self.oracles.len() {
                return Err(OcrConfigError::validation(
                    "weights",
                    format!(
                        "expected one weight per oracle ({}), got {}",
                        self.oracles.len(),
                        weights.len()
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Weights as configured, or 1 for every oracle
    pub fn effective_weights(&self) -> Vec<u8> {
        self.weights
            .clone()
            .unwrap_or_else(|| vec![1; self.oracles.len()])
    }

    /// All oracle entries as validated identities, in file order
    pub fn identities(&self) -> ocr_config::Result<Vec<OracleIdentity>> {
        self.oracles.iter().map(OracleEntry::to_identity).collect()
    }
}
