//! Command-line parsing for the freelance quote tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pricing and gateway code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Language;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fq", version, about = "Freelance project price estimator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute a quote, print it, and optionally export it to a text file.
    Quote(QuoteArgs),
    /// Print every UI label in a language (translating if needed).
    Labels(LabelsArgs),
    /// Launch the interactive form.
    Tui(TuiArgs),
}

/// Service endpoints and timeout. Each falls back to the environment.
#[derive(Debug, Args, Clone, Default)]
pub struct GatewayArgs {
    /// Exchange-rate endpoint (overrides FQ_RATE_URL).
    #[arg(long, value_name = "URL")]
    pub rate_url: Option<String>,

    /// Translation endpoint (overrides FQ_TRANSLATE_URL).
    #[arg(long, value_name = "URL")]
    pub translate_url: Option<String>,

    /// Per-request timeout in seconds (overrides FQ_HTTP_TIMEOUT_SECS).
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct QuoteArgs {
    /// Estimated hours.
    #[arg(long)]
    pub hours: String,

    /// Hourly profit in USD.
    #[arg(long)]
    pub profit: String,

    /// Lines of code.
    #[arg(long)]
    pub lines: String,

    /// Number of files.
    #[arg(long)]
    pub files: String,

    /// Client country; decides the quote currency (unknown countries use USD).
    #[arg(long, default_value = "USA")]
    pub country: String,

    /// Freelance platform (only echoed in the export).
    #[arg(long, default_value = "Upwork")]
    pub platform: String,

    /// Project category (only echoed in the export).
    #[arg(long, default_value = "Web")]
    pub category: String,

    /// Language for labels and messages.
    #[arg(short = 'l', long, value_enum, default_value_t = Language::En)]
    pub language: Language,

    /// Export the quote to a text file (defaults to quote_<timestamp>.txt).
    #[arg(long, value_name = "TXT", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,

    #[command(flatten)]
    pub gateway: GatewayArgs,
}

#[derive(Debug, Args, Clone)]
pub struct LabelsArgs {
    /// Language to print.
    #[arg(short = 'l', long, value_enum, default_value_t = Language::En)]
    pub language: Language,

    #[command(flatten)]
    pub gateway: GatewayArgs,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    /// Initial language.
    #[arg(short = 'l', long, value_enum, default_value_t = Language::En)]
    pub language: Language,

    /// Log file for the interactive session.
    #[arg(long, value_name = "PATH", default_value = "fq.log")]
    pub log_file: PathBuf,

    #[command(flatten)]
    pub gateway: GatewayArgs,
}
