//! # Structured Logging Module
//!
//! Console logging for the scope system using the tracing ecosystem.
//!
//! The crate itself only emits `tracing` events: `debug!` for definitions, invocations and
//! scope context push/pop, `warn!` for name collisions and deprecated usage. Applications
//! that do not install their own subscriber can call [`init_structured_logging`].

use crate::config::{LogFormat, LoggingConfig, ScopesConfig};
use chrono::Utc;
use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize logging from the global [`ScopesConfig`]
pub fn init_structured_logging() {
    init_with_config(&ScopesConfig::global().logging);
}

/// Initialize logging with an explicit configuration. Only the first call has any effect.
pub fn init_with_config(logging: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(logging.level.clone()));

        let layer = match logging.format {
            LogFormat::Json => fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .json()
                .with_filter(filter)
                .boxed(),
            LogFormat::Pretty => fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(std::io::stdout().is_terminal())
                .with_filter(filter)
                .boxed(),
        };

        // Another subscriber (e.g. the host application's) may already be installed
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing");
        }

        tracing::info!(
            format = ?logging.format,
            level = %logging.level,
            "Structured logging initialized"
        );
    });
}

/// Log a structured record for a scope lifecycle event
pub fn log_scope_operation(
    operation: &str,
    entity: &str,
    scope: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::debug!(
        operation = %operation,
        entity = %entity,
        scope = scope,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "SCOPE_OPERATION"
    );
}
