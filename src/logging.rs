//! Tracing setup for the binary.
//!
//! The terminal runs in raw mode and carries the edited line, so log output
//! never goes to the console: without a log file no subscriber is installed.

use crate::config::ShellConfig;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Installs the global subscriber described by `config`. Returns whether one was
/// installed.
///
/// # Errors
///
/// Fails when the log file cannot be opened or a global subscriber already
/// exists.
pub fn init(config: &ShellConfig) -> Result<bool> {
    let Some(path) = &config.log_file else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("can't open log file {}", path.display()))?;

    let level_filter = LevelFilter::from_level(config.trace_level);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .with_filter(level_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .context("can't install tracing subscriber")?;
    Ok(true)
}
