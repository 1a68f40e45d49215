//! `sample`: print placeholder oracle identities

use ocr_config::sample_oracles;

/// Sample oracles as pretty JSON
pub fn render() -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&sample_oracles()?)?)
}

pub fn run() -> anyhow::Result<()> {
    println!("{}", render()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocr_config::OracleIdentity;

    #[test]
    fn test_output_parses_back_into_identities() {
        let json = render().unwrap();
        let parsed: Vec<OracleIdentity> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample_oracles().unwrap());
        assert!(json.contains(r#""sharedSecretEncryptionPublicKey": "0x89166bf5"#));
    }
}
