//! Configuration management for the Hopscotch validator.
//!
//! Handles:
//! - Command-line argument parsing
//! - Profile directory configuration

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Hopscotch validator
#[derive(Debug, Parser)]
#[command(name = "hoplint")]
#[command(about = "Validator for Hopscotch world documents")]
#[command(version)]
pub struct Args {
    /// Path to the .hopscotch document to validate
    pub path: PathBuf,

    /// Explicitly specify the schema profile to validate against
    #[arg(long, help = "Schema profile to validate against (e.g. 'hopscotch')")]
    pub profile: Option<String>,

    /// Custom profile directory to search for profile files
    #[arg(long, help = "Directory containing profile TOML files")]
    pub profile_dir: Option<PathBuf>,

    /// Emit the report as JSON instead of the text summary
    #[arg(long, help = "Emit the report as JSON on stdout")]
    pub json: bool,

    /// Log level for the validator
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Document to validate
    pub path: PathBuf,
    /// Profile name explicitly set via command line
    pub profile: Option<String>,
    /// Profile directories to search, in load order (later wins)
    pub profile_dirs: Vec<PathBuf>,
    /// JSON report output
    pub json: bool,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        // Determine profile directories; the explicit directory loads last
        // so it overrides same-named user profiles.
        let mut profile_dirs = Vec::new();

        if let Some(config_dir) = dirs::config_dir() {
            profile_dirs.push(config_dir.join("hoplint").join("profiles"));
        }

        if let Some(custom_dir) = args.profile_dir {
            profile_dirs.push(custom_dir);
        }

        Ok(Config {
            path: args.path,
            profile: args.profile,
            profile_dirs,
            json: args.json,
            log_level: args.log_level,
        })
    }
}
