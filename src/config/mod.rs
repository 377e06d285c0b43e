pub mod file;

pub use file::FileConfig;

use crate::adapters::api::DEFAULT_API_BASE;
use crate::utils::error::{AuditError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use clap::{ArgGroup, Parser};

#[derive(Debug, Clone, Parser)]
#[command(name = "blocklist-audit")]
#[command(about = "Find out which NextDNS blocklists are actually doing the blocking")]
#[command(group(ArgGroup::new("source").required(true).args(["profile", "file"])))]
pub struct CliArgs {
    /// JSON config file mapping profile names to profile IDs
    #[arg(short, long, default_value = "config.json")]
    pub config: String,

    /// Profile name (from the config file) to fetch logs for
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Analyze a previously saved log file instead of calling the API
    #[arg(short, long)]
    pub file: Option<String>,

    /// Save the downloaded log entries for later --file runs
    #[arg(short, long)]
    pub save: bool,

    /// How many log entries to request
    #[arg(long, default_value = "1000")]
    pub limit: usize,

    /// Base URL of the NextDNS API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Validate for CliArgs {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)?;
        validate_range("limit", self.limit, 1, 1000)?;

        if let Some(profile) = &self.profile {
            validate_non_empty_string("profile", profile)?;
        }
        if let Some(file) = &self.file {
            validate_non_empty_string("file", file)?;
        }
        if self.save && self.profile.is_none() {
            return Err(AuditError::ConfigError {
                message: "--save only makes sense together with --profile".to_string(),
            });
        }

        Ok(())
    }
}
