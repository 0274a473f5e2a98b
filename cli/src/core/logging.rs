//! # ziprs Logging Setup
//!
//! File: cli/src/core/logging.rs
//!
//! ## Overview
//!
//! Installs the `tracing` subscriber used by the whole application. Logs go
//! to stderr in the compact format, so stdout stays reserved for archive
//! data and the completion message.
//!
//! ## Architecture
//!
//! The level filter sits behind a `tracing_subscriber::reload` layer:
//!
//! 1. `init_logging` starts at `warn`, or `info` with `--verbose`, so the
//!    configuration loader can already report which file it uses.
//! 2. Once options are resolved, `LogLevelHandle::apply_verbosity` sets the
//!    level from the resolved `verbose` flag, which may come from the
//!    configuration file.
//!
//! A `RUST_LOG` value always wins over both steps.
//!
use crate::core::error::Result;
use anyhow::Context;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

/// Handle for adjusting the log level after the subscriber is installed.
pub struct LogLevelHandle {
    handle: reload::Handle<EnvFilter, Registry>,
    env_override: bool,
}

fn level_for(verbose: bool) -> &'static str {
    if verbose {
        "info"
    } else {
        "warn"
    }
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logging(verbose: bool) -> Result<LogLevelHandle> {
    let env_filter = EnvFilter::try_from_default_env().ok();
    let env_override = env_filter.is_some();
    let filter = env_filter.unwrap_or_else(|| EnvFilter::new(level_for(verbose)));

    let (filter_layer, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .context("Failed to install the log subscriber")?;

    Ok(LogLevelHandle {
        handle,
        env_override,
    })
}

impl LogLevelHandle {
    /// Sets the level from the resolved `verbose` option. No-op under `RUST_LOG`.
    pub fn apply_verbosity(&self, verbose: bool) -> Result<()> {
        if self.env_override {
            return Ok(());
        }
        self.handle
            .reload(EnvFilter::new(level_for(verbose)))
            .context("Failed to update the log level")?;
        debug!("Log level set to {}", level_for(verbose));
        Ok(())
    }
}
