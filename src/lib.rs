//! `freelance-quote` library crate.
//!
//! The binary (`fq`) is a thin wrapper around this library so that:
//!
//! - pricing and export are testable without spawning processes
//! - the exchange-rate and translation services sit behind traits and can be faked
//! - the CLI and the terminal form share one session type

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod io;
pub mod logging;
pub mod pricing;
pub mod report;
pub mod tui;
