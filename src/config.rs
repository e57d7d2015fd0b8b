//! Application configuration
//! Command line arguments and the resolved settings the app runs with.

use crate::data::MAX_DISPLAY_RESULTS;
use clap::Parser;
use std::path::{Path, PathBuf};

pub const DATA_FILE_NAME: &str = "cid.csv";
pub const DEFAULT_HOME_INSTITUTION: &str = "De Anza College";

/// C-ID Course Equivalency Lookup.
#[derive(Debug, Parser)]
#[command(name = "cid_lookup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the C-ID CSV file (defaults to cid.csv next to the executable)
    #[arg(short, long, env = "CID_DATA_FILE")]
    pub data: Option<PathBuf>,

    /// Institution whose departments fill the selectors; empty uses every row
    #[arg(long, env = "CID_HOME_INSTITUTION", default_value = DEFAULT_HOME_INSTITUTION)]
    pub home: String,

    /// Maximum number of rows shown in the results table
    #[arg(long, default_value_t = MAX_DISPLAY_RESULTS)]
    pub max_results: usize,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// Settings resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub home_institution: Option<String>,
    pub max_results: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            home_institution: Some(DEFAULT_HOME_INSTITUTION.to_string()),
            max_results: MAX_DISPLAY_RESULTS,
        }
    }
}

impl From<&Cli> for AppConfig {
    fn from(cli: &Cli) -> Self {
        let home = cli.home.trim();
        Self {
            data_file: cli.data.clone().unwrap_or_else(default_data_file),
            home_institution: (!home.is_empty()).then(|| home.to_string()),
            max_results: cli.max_results.max(1),
        }
    }
}

/// `cid.csv` beside the executable if present, else in the working directory.
pub fn default_data_file() -> PathBuf {
    std::env::current_exe()
        .ok()
        .as_deref()
        .and_then(Path::parent)
        .map(|dir| dir.join(DATA_FILE_NAME))
        .filter(|path| path.is_file())
        .unwrap_or_else(|| PathBuf::from(DATA_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let cli = Cli::try_parse_from(["cid_lookup"]).unwrap();
        let config = AppConfig::from(&cli);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn explicit_data_file_wins() {
        let cli = Cli::try_parse_from(["cid_lookup", "--data", "/tmp/other.csv"]).unwrap();
        let config = AppConfig::from(&cli);
        assert_eq!(config.data_file, PathBuf::from("/tmp/other.csv"));
    }

    #[test]
    fn empty_home_disables_home_filtering() {
        let cli = Cli::try_parse_from(["cid_lookup", "--home", ""]).unwrap();
        assert_eq!(AppConfig::from(&cli).home_institution, None);
    }

    #[test]
    fn custom_home_and_cap() {
        let cli = Cli::try_parse_from([
            "cid_lookup",
            "--home",
            "Foothill College",
            "--max-results",
            "50",
            "--debug",
        ])
        .unwrap();
        let config = AppConfig::from(&cli);
        assert_eq!(config.home_institution.as_deref(), Some("Foothill College"));
        assert_eq!(config.max_results, 50);
        assert!(cli.debug);
    }

    #[test]
    fn zero_cap_is_raised_to_one() {
        let cli = Cli::try_parse_from(["cid_lookup", "--max-results", "0"]).unwrap();
        assert_eq!(AppConfig::from(&cli).max_results, 1);
    }
}
