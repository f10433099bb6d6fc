pub mod cli;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "geosift")]
#[command(about = "Filter a traffic-ranked domain list down to country-affiliated domains")]
pub struct CliConfig {
    /// CSV of (origin, rank) rows; the header row is skipped
    pub records: String,

    /// Reference network file, one CIDR per line ('#' comments ignored)
    #[arg(short = 'i', long = "ip-file")]
    pub ip_file: Option<String>,

    /// Output path; the domain list goes to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Resolve deferred domains and match them against the reference networks
    #[arg(long)]
    pub resolve_dns: bool,

    /// Upper bound on concurrent DNS resolutions
    #[arg(long, default_value = "50")]
    pub max_workers: usize,

    /// Per-domain resolution timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout_secs: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn records_path(&self) -> &str {
        &self.records
    }

    fn network_path(&self) -> Option<&str> {
        self.ip_file.as_deref()
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn resolve_dns(&self) -> bool {
        self.resolve_dns
    }

    fn max_workers(&self) -> usize {
        self.max_workers
    }

    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("records", &self.records)?;
        if let Some(path) = &self.ip_file {
            validation::validate_path("ip_file", path)?;
        }
        if let Some(path) = &self.output {
            validation::validate_path("output", path)?;
        }
        validation::validate_positive_number("max_workers", self.max_workers, 1)?;
        validation::validate_range("timeout_secs", self.timeout_secs, 1, 300)?;
        Ok(())
    }
}
