//! Error types.
//!
//! Library operations return typed errors (`ValidationError`, `GatewayError`,
//! `ExportError`, `QuoteError`). The binary folds them into `AppError`, which
//! only carries a message and the process exit code.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// A numeric form field that failed to parse.
///
/// The field name is kept for logs only; users see a single generic message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid numeric value for `{field}`: {value:?}")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: String,
}

/// Failure of a remote lookup. Never surfaced to users; always converted into
/// a fallback value by the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("service answered with status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("service reported an error: {0}")]
    Service(String),
    #[error("no rate for {0} in response")]
    MissingRate(String),
    #[error("rate for {code} is not a positive number: {value}")]
    InvalidRate { code: String, value: f64 },
    #[error("empty translation")]
    EmptyTranslation,
}

/// Failure while writing the text export.
#[derive(Debug, Error)]
#[error("failed to write export '{}': {source}", path.display())]
pub struct ExportError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Errors a quote session reports back to its presentation layer.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("nothing to export: no price has been calculated yet")]
    NothingToExport,
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::new(3, err.to_string())
    }
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::Validation(e) => e.into(),
            QuoteError::Export(e) => e.into(),
            QuoteError::NothingToExport => {
                AppError::new(3, "Nothing to export: calculate a price first.")
            }
        }
    }
}
