//! CLI interface for the candidate ranker

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "candidate-ranker")]
#[command(about = "Rank candidates against a job requirement")]
#[command(long_about = "Score a candidate pool against a job requirement using skill coverage, qualification and category affinity, then rank and shortlist the results")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank a candidate pool and print the shortlist
    Rank {
        /// Path to the candidate pool (JSON, TOML)
        #[arg(long)]
        candidates: PathBuf,

        /// Path to the job requirement (JSON, TOML)
        #[arg(short, long)]
        requirement: PathBuf,

        /// Output format: console, json, markdown, csv
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to a file, or to a generated file name inside a directory
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// List every candidate instead of the shortlist
        #[arg(long)]
        all: bool,

        /// Keep at most this many shortlist entries
        #[arg(short, long, conflicts_with = "all")]
        limit: Option<usize>,

        /// Include sub-scores and skill evidence
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show the score breakdown for one candidate
    Score {
        /// Path to the candidate pool (JSON, TOML)
        #[arg(long)]
        candidates: PathBuf,

        /// Path to the job requirement (JSON, TOML)
        #[arg(short, long)]
        requirement: PathBuf,

        /// Candidate identifier
        #[arg(long)]
        id: String,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "csv" => Ok(crate::config::OutputFormat::Csv),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, csv",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
