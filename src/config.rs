//! # Scope Configuration
//!
//! Layered configuration for the scope system, loaded with the `config` crate:
//!
//! 1. Built-in defaults
//! 2. An optional file, `config/named_scopes.{toml,yaml,json}` or an explicit path
//! 3. Environment variables prefixed `NAMED_SCOPES__`, nested with `__`
//!    (e.g. `NAMED_SCOPES__LOGGING__LEVEL=info`)
//!
//! ```rust,no_run
//! use named_scopes::config::ScopesConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScopesConfig::load()?;
//! assert!(config.max_recorded_warnings > 0 || !config.record_warnings);
//! # Ok(())
//! # }
//! ```

use crate::error::{ScopeError, ScopeResult};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Default config file stem, resolved relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config/named_scopes";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "NAMED_SCOPES";

static GLOBAL_CONFIG: OnceLock<Arc<ScopesConfig>> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopesConfig {
    /// Log a warning when a scope shadows an existing member
    pub warn_on_name_collision: bool,

    /// Log a warning when a bare callable is used as scope criteria
    pub warn_on_deprecated_usage: bool,

    /// Keep emitted warnings on the entity type for inspection
    pub record_warnings: bool,

    /// Oldest warnings are dropped past this many per entity type
    pub max_recorded_warnings: usize,

    pub logging: LoggingConfig,
}

impl Default for ScopesConfig {
    fn default() -> Self {
        Self {
            warn_on_name_collision: true,
            warn_on_deprecated_usage: true,
            record_warnings: true,
            max_recorded_warnings: 256,
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl ScopesConfig {
    /// Load from the default file location and environment
    pub fn load() -> ScopeResult<Self> {
        Self::load_sources(None, ENV_PREFIX)
    }

    /// Load from an explicit file (format inferred from its extension) and environment
    pub fn load_from_file(path: &Path) -> ScopeResult<Self> {
        Self::load_sources(Some(path.to_path_buf()), ENV_PREFIX)
    }

    pub(crate) fn load_sources(file: Option<PathBuf>, env_prefix: &str) -> ScopeResult<Self> {
        let file_source = match &file {
            Some(path) => {
                if !path.is_file() {
                    return Err(ScopeError::Configuration(format!(
                        "configuration file not found: {}",
                        path.display()
                    )));
                }
                File::from(path.clone()).required(true)
            }
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: ScopesConfig = Config::builder()
            .add_source(file_source)
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;

        debug!(
            file = ?file,
            record_warnings = config.record_warnings,
            log_level = %config.logging.level,
            "Scope configuration loaded"
        );

        Ok(config)
    }

    pub fn validate(&self) -> ScopeResult<()> {
        if self.record_warnings && self.max_recorded_warnings == 0 {
            return Err(ScopeError::Configuration(
                "max_recorded_warnings must be greater than 0 when record_warnings is enabled"
                    .to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ScopeError::Configuration(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Process-wide configuration, loaded once. Falls back to defaults if loading fails.
    pub fn global() -> Arc<ScopesConfig> {
        GLOBAL_CONFIG
            .get_or_init(|| match Self::load() {
                Ok(config) => Arc::new(config),
                Err(e) => {
                    warn!(error = %e, "Falling back to default scope configuration");
                    Arc::new(Self::default())
                }
            })
            .clone()
    }
}
