//! `profiles`: list a network profile table
//!
//! Without a build file this is the built-in table. With one, a `[[profiles]]`
//! override replaces it, so operators can check what a build will select.

use crate::config::BuildConfig;
use ocr_config::network::{NetworkClass, NetworkParams, ProfileTable};
use std::path::Path;

fn seconds(ns: u64) -> String {
    let secs = ns as f64 / 1e9;
    format!("{secs}s")
}

fn row(index: usize, params: &NetworkParams) -> String {
    // Rows past the named classes are only reachable by raw index
    let name = NetworkClass::ALL.get(index).map_or("-", |class| class.name());
    format!(
        "{index:<3}{name:<11}{:>9}{:>9}{:>9}{:>9}{:>10}{:>9}",
        seconds(params.delta_progress),
        seconds(params.delta_resend),
        seconds(params.delta_round),
        seconds(params.delta_grace),
        seconds(params.delta_c),
        seconds(params.delta_stage),
    )
}

/// One line per row of `table`, under a header
pub fn render(table: &ProfileTable) -> String {
    let mut lines = vec![format!(
        "{:<3}{:<11}{:>9}{:>9}{:>9}{:>9}{:>10}{:>9}",
        "#", "class", "progress", "resend", "round", "grace", "deltaC", "stage"
    )];
    lines.extend(table.iter().enumerate().map(|(i, params)| row(i, params)));
    lines.join("\n")
}

/// Table a build file would use: its override, or the built-in rows
pub fn table_for(config: Option<&BuildConfig>) -> ProfileTable {
    config
        .and_then(|config| config.profiles.clone())
        .unwrap_or_default()
}

pub fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = config_path.map(BuildConfig::load).transpose()?;
    println!("{}", render(&table_for(config.as_ref())));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocr_config::lookup_profile;

    #[test]
    fn test_render_lists_every_class() {
        let table = render(&ProfileTable::default());
        assert_eq!(table.lines().count(), 1 + NetworkClass::ALL.len());
        assert!(table.contains("on-demand"));
        assert!(table.contains("0.5s"));
        assert!(table.contains("600s"));
    }

    #[test]
    fn test_override_table_is_rendered() {
        let fast = lookup_profile(NetworkClass::Fast);
        let mut rows = vec![fast; NetworkClass::ALL.len()];
        rows.push(NetworkParams {
            delta_c: 7_000_000_000,
            ..fast
        });
        let table = ProfileTable::new(rows).unwrap();

        let rendered = render(&table);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 1 + table.len());
        assert!(lines[1].starts_with("0  slow"));
        assert!(lines[7].starts_with("6  -"));
        assert!(lines[7].contains("7s"));
        assert!(!rendered.contains("600s"));
    }

    #[test]
    fn test_table_for_build_file() {
        assert_eq!(table_for(None), ProfileTable::default());

        let single = ProfileTable::new(vec![lookup_profile(NetworkClass::Testnet)]).unwrap();
        let config = BuildConfig {
            network: NetworkClass::Slow,
            alpha_ppb: 0,
            r_max: 1,
            weights: None,
            shared_secret: None,
            profiles: Some(single.clone()),
            oracles: Vec::new(),
        };
        assert_eq!(table_for(Some(&config)), single);
    }
}
