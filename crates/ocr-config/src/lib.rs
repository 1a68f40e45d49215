//! OCR configuration builder
//!
//! Turns a committee of oracle identities into the configuration record an OCR
//! aggregator contract expects:
//!
//! - [`identity`] validates and normalizes per-oracle identifiers
//! - [`network`] holds the timing profile table
//! - [`envelope`] encrypts one shared secret for every oracle
//! - [`assembler`] combines the above into a [`ConfigurationRecord`]
//! - [`abi`] encodes the record as contract call data
//!
//! ```ignore
//! use ocr_config::{assemble_config, sample_oracles, NetworkClass};
//!
//! let oracles = sample_oracles()?;
//! let record = assemble_config(NetworkClass::Slow, &oracles, 10_000_000, 1, &[1; 4], None)?;
//! println!("{}", record.to_json()?);
//! ```

pub mod abi;
pub mod assembler;
pub mod effects;
pub mod envelope;
pub mod error;
pub mod hash;
pub mod hex_codec;
pub mod identity;
pub mod network;

pub use abi::{encode_components, set_config_call_data};
pub use assembler::{
    assemble_config, from_json, resolve_shared_secret, to_json, ConfigAssembler,
    ConfigurationRecord,
};
pub use effects::{OsRandomSource, RandomSource, SeededRandomSource};
pub use envelope::{
    decrypt_shared_secret, encrypt_for_recipients, encrypt_with_random_secrets,
    recipient_public_key, SharedSecretEnvelope,
};
pub use error::{OcrConfigError, Result};
pub use identity::{parse_identity, sample_oracles, OracleIdentity};
pub use network::{lookup_profile, NetworkClass, NetworkParams, ProfileTable};
