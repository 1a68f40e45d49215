//! `build`: build file in, configuration record out

use crate::config::BuildConfig;
use anyhow::Context;
use ocr_config::{set_config_call_data, ConfigAssembler, ConfigurationRecord};
use std::path::Path;
use tracing::info;

/// Assemble the record described by `config`
pub fn assemble(
    config: &BuildConfig,
    assembler: ConfigAssembler,
) -> anyhow::Result<ConfigurationRecord> {
    let assembler = match &config.profiles {
        Some(profiles) => assembler.with_profiles(profiles.clone()),
        None => assembler,
    };
    let oracles = config.identities()?;
    let record = assembler.assemble(
        config.network,
        &oracles,
        config.alpha_ppb,
        config.r_max,
        &config.effective_weights(),
        config.shared_secret.as_deref(),
    )?;
    Ok(record)
}

/// Render a record as pretty JSON, or as `0x` call data when `abi` is set
pub fn render(record: &ConfigurationRecord, abi: bool) -> anyhow::Result<String> {
    if abi {
        Ok(format!("0x{}", hex::encode(set_config_call_data(record))))
    } else {
        Ok(record.to_json()?)
    }
}

pub fn run(config_path: &Path, abi: bool, output: Option<&Path>) -> anyhow::Result<()> {
    let config = BuildConfig::load(config_path)?;
    write_record(&config, ConfigAssembler::production(), abi, output)
}

/// Assemble, render, and write to `output` or stdout
pub fn write_record(
    config: &BuildConfig,
    assembler: ConfigAssembler,
    abi: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    info!(
        "Building {} configuration for {} oracles",
        config.network,
        config.oracles.len()
    );

    let record = assemble(config, assembler)?;
    let rendered = render(&record, abi)?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote configuration to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
