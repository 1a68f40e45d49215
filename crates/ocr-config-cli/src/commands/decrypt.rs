//! `decrypt`: recover the shared secret as one oracle
//!
//! Useful for checking a record before it goes on-chain: an oracle operator
//! runs this with their own encryption key and compares the result with the
//! secret they expect.

use anyhow::Context;
use ocr_config::hex_codec::decode_hex_array;
use ocr_config::{decrypt_shared_secret, ConfigurationRecord};
use std::path::Path;
use tracing::info;

/// Decrypt slot `index` of a record with a hex private key
pub fn recover(
    record: &ConfigurationRecord,
    index: usize,
    private_key_hex: &str,
) -> anyhow::Result<String> {
    let private_key: [u8; 32] = decode_hex_array("privateKey", private_key_hex.trim())?;
    let secret = decrypt_shared_secret(&record.shared_secret_encryptions, index, &private_key)?;
    Ok(format!("0x{}", hex::encode(secret.as_slice())))
}

pub fn run(record_path: &Path, index: usize, private_key_hex: &str) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(record_path)
        .with_context(|| format!("Failed to read record {}", record_path.display()))?;
    let record = ConfigurationRecord::from_json(&json)?;

    let secret = recover(&record, index, private_key_hex)?;
    info!("Shared secret verified against secret hash for oracle {index}");
    println!("{secret}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocr_config::{
        recipient_public_key, sample_oracles, ConfigAssembler, NetworkClass, SeededRandomSource,
    };
    use std::sync::Arc;

    #[test]
    fn test_recover_supplied_secret() {
        let private_key = [0x42u8; 32];
        let mut oracles = sample_oracles().unwrap();
        oracles[2].shared_secret_encryption_public_key = recipient_public_key(&private_key);

        let record = ConfigAssembler::new(Arc::new(SeededRandomSource::new(8)))
            .assemble(
                NetworkClass::Testnet,
                &oracles,
                0,
                1,
                &[1; 4],
                Some("0x0f0e0d0c0b0a09080706050403020100"),
            )
            .unwrap();

        let key_hex = format!("0x{}", hex::encode(private_key));
        assert_eq!(
            recover(&record, 2, &key_hex).unwrap(),
            "0x0f0e0d0c0b0a09080706050403020100"
        );
        assert!(recover(&record, 1, &key_hex).is_err());
        assert!(recover(&record, 2, "0x1234").is_err());
    }
}
