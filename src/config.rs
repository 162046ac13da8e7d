//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::{services::DEFAULT_CONFIG_FILE, state::UnmatchedPolicy};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "basic-split")]
#[command(about = "A stopwatch and speedrun split timer")]
#[command(version)]
pub struct Config {
    /// Settings file, created with defaults if missing
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// How to mark splits past the end of a comparison baseline (slower or none)
    #[arg(short, long, default_value_t = UnmatchedPolicy::Slower)]
    pub unmatched: UnmatchedPolicy,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
