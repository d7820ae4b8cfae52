//! Command line argument parsing for the veracity CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::config::VeracityConfig;
use crate::error::Result;
use crate::review::RawReviewInput;

/// Veracity - classify product reviews as real or fake
#[derive(Parser, Debug, Clone)]
#[command(name = "veracity")]
#[command(about = "Classify product reviews as real or fake")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct VeracityArgs {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(long, env = "VERACITY_CONFIG", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory containing the model artifact
    #[arg(long, env = "VERACITY_MODEL_PATH", value_name = "DIR", global = true)]
    pub model_path: Option<PathBuf>,

    /// File name of the model artifact
    #[arg(long, env = "VERACITY_MODEL_NAME", value_name = "NAME", global = true)]
    pub model_name: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl VeracityArgs {
    /// Get the effective verbosity level: 0 quiet, 1 default, 2 verbose,
    /// 3 and above debug.
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }

    /// Log level for the verbosity flags, falling back to `default` when
    /// none were given.
    pub fn log_level(&self, default: LevelFilter) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error,
            1 => default,
            2 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    /// Resolve the configuration: file first, then flag overrides.
    pub fn resolve_config(&self) -> Result<VeracityConfig> {
        let mut config = match &self.config {
            Some(path) => VeracityConfig::from_file(path)?,
            None => VeracityConfig::default(),
        };

        if let Some(model_path) = &self.model_path {
            config.model_path = model_path.clone();
        }
        if let Some(model_name) = &self.model_name {
            config.model_name = model_name.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify a single review
    Predict(ReviewArgs),

    /// Classify every review in a JSON Lines file
    Batch(BatchArgs),

    /// Show the tokens and feature vector built for a review
    Inspect(ReviewArgs),

    /// Report whether the model artifact is loaded
    Health,
}

/// A review given on the command line.
#[derive(Args, Debug, Clone)]
pub struct ReviewArgs {
    /// Review text
    #[arg(short, long)]
    pub text: String,

    /// Star rating (1-5)
    #[arg(short, long)]
    pub rating: u8,

    /// The purchase was verified
    #[arg(long)]
    pub verified: bool,

    /// Product category
    #[arg(short, long)]
    pub category: String,
}

impl ReviewArgs {
    /// Convert into a review input.
    pub fn to_input(&self) -> RawReviewInput {
        RawReviewInput::new(
            self.text.clone(),
            self.rating,
            self.verified,
            self.category.clone(),
        )
    }
}

/// Arguments for batch classification
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// JSON Lines file with one review object per line
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
