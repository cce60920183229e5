//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - resolves gateway configuration (env + flags)
//! - dispatches to the quote / labels / TUI front-ends

use clap::Parser;
use tracing::warn;

use crate::cli::{Command, GatewayArgs, LabelsArgs, QuoteArgs, TuiArgs};
use crate::config::GatewayConfig;
use crate::domain::{LabelKey, QuoteForm};
use crate::error::AppError;
use crate::gateway::HttpGateway;

pub mod pipeline;
pub mod session;

pub use session::QuoteSession;

/// Entry point for the `fq` binary.
pub fn run() -> Result<(), AppError> {
    // `fq` and `fq -l de` should behave like `fq tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Quote(args) => {
            crate::logging::init_stderr("warn");
            handle_quote(args)
        }
        Command::Labels(args) => {
            crate::logging::init_stderr("warn");
            handle_labels(args)
        }
        Command::Tui(args) => {
            crate::logging::init_file(&args.log_file, "info")?;
            handle_tui(args)
        }
    }
}

fn handle_quote(args: QuoteArgs) -> Result<(), AppError> {
    let config = gateway_config_from_args(&args.gateway)?;
    let mut session = QuoteSession::new(HttpGateway::from_config(&config)?);

    if args.language != session.language() {
        let fallbacks = session.change_language(args.language);
        if !fallbacks.is_empty() {
            warn!(count = fallbacks.len(), "some labels were not translated");
        }
    }

    let form = form_from_args(&args);
    let result = match session.calculate(&form) {
        Ok(result) => result.clone(),
        Err(err) => {
            let message = format!("{}: {}", session.label(LabelKey::Error), session.message_for(&err));
            return Err(AppError::new(2, message));
        }
    };

    println!(
        "{}",
        crate::report::format_quote_summary(&form, &result, session.labels(), session.rate_degraded())
    );

    if let Some(path) = &args.export {
        let path = path.clone().unwrap_or_else(crate::io::export::default_export_path);
        if let Err(err) = session.export(&path) {
            return Err(AppError::new(3, session.message_for(&err).to_string()));
        }
        println!("{} ({})", session.label(LabelKey::TxtSaved), path.display());
    }

    Ok(())
}

fn handle_labels(args: LabelsArgs) -> Result<(), AppError> {
    let config = gateway_config_from_args(&args.gateway)?;
    let mut gateway = HttpGateway::from_config(&config)?;

    let resolved = gateway.resolve_labels(&LabelKey::ALL, args.language);
    print!("{}", crate::report::format_labels(&resolved.value));
    if resolved.is_degraded() {
        eprintln!(
            "{} of {} labels fell back to English.",
            resolved.fallbacks.len(),
            LabelKey::ALL.len()
        );
    }
    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    let config = gateway_config_from_args(&args.gateway)?;
    let session = QuoteSession::new(HttpGateway::from_config(&config)?);
    crate::tui::run(session, args.language)
}

/// Environment (and `.env`) first, then CLI flags on top.
pub fn gateway_config_from_args(args: &GatewayArgs) -> Result<GatewayConfig, AppError> {
    let config = GatewayConfig::from_env()?;
    apply_gateway_args(config, args)
}

fn apply_gateway_args(mut config: GatewayConfig, args: &GatewayArgs) -> Result<GatewayConfig, AppError> {
    if let Some(url) = &args.rate_url {
        config.rate_url = url.clone();
    }
    if let Some(url) = &args.translate_url {
        config.translate_url = url.clone();
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout = crate::config::parse_timeout_secs(&secs.to_string())?;
    }
    Ok(config)
}

pub fn form_from_args(args: &QuoteArgs) -> QuoteForm {
    QuoteForm {
        country: args.country.clone(),
        platform: args.platform.clone(),
        category: args.category.clone(),
        hours: args.hours.clone(),
        profit: args.profit.clone(),
        lines: args.lines.clone(),
        files: args.files.clone(),
    }
}

/// Rewrite argv so `fq` defaults to `fq tui`.
///
/// Rules:
/// - `fq`                      -> `fq tui`
/// - `fq -l de ...`            -> `fq tui -l de ...`
/// - `fq --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "quote" | "labels" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["fq"])), argv(&["fq", "tui"]));
        assert_eq!(rewrite_args(argv(&["fq", "-l", "de"])), argv(&["fq", "tui", "-l", "de"]));
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(argv(&["fq", "--help"])), argv(&["fq", "--help"]));
        assert_eq!(
            rewrite_args(argv(&["fq", "quote", "--hours", "1"])),
            argv(&["fq", "quote", "--hours", "1"])
        );
    }

    #[test]
    fn flags_override_config() {
        let args = GatewayArgs {
            rate_url: Some("http://rates.test/latest".to_string()),
            translate_url: None,
            timeout_secs: Some(9),
        };
        let config = apply_gateway_args(GatewayConfig::default(), &args).unwrap();
        assert_eq!(config.rate_url, "http://rates.test/latest");
        assert_eq!(config.translate_url, crate::config::DEFAULT_TRANSLATE_URL);
        assert_eq!(config.timeout, Duration::from_secs(9));
    }

    #[test]
    fn zero_timeout_flag_is_rejected() {
        let args = GatewayArgs {
            timeout_secs: Some(0),
            ..GatewayArgs::default()
        };
        assert!(apply_gateway_args(GatewayConfig::default(), &args).is_err());
    }
}
