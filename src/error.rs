//! Error and warning types for the named scope system.
//!
//! Errors abort a single definition or invocation. Warnings never abort; they are
//! logged and recorded on the owning entity type so callers can inspect them.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScopeError {
    #[error("Invalid scope name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("wrong number of arguments for scope {entity}.{scope} (given {given}, expected {expected})")]
    Arity {
        entity: String,
        scope: String,
        given: usize,
        expected: String,
    },

    #[error("Undefined scope '{scope}' for {entity}")]
    UndefinedScope { entity: String, scope: String },

    #[error("Undefined method '{method}' for relation on {table} (extensions: {available:?})")]
    UndefinedMethod {
        method: String,
        table: String,
        available: Vec<String>,
    },

    #[error("Invalid argument {index} for scope {scope}: {reason}")]
    InvalidArgument {
        scope: String,
        index: usize,
        reason: String,
    },

    #[error("Invalid finder option '{option}': {reason}")]
    InvalidFinderOption { option: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ScopeError {
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_finder_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFinderOption {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// True for errors raised by argument validation at invocation time
    pub fn is_arity_error(&self) -> bool {
        matches!(self, Self::Arity { .. })
    }
}

impl From<serde_json::Error> for ScopeError {
    fn from(error: serde_json::Error) -> Self {
        ScopeError::invalid_finder_option("<json>", error.to_string())
    }
}

impl From<config::ConfigError> for ScopeError {
    fn from(error: config::ConfigError) -> Self {
        ScopeError::Configuration(error.to_string())
    }
}

pub type ScopeResult<T> = anyhow::Result<T, ScopeError>;

/// Non-fatal conditions surfaced while defining scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeWarning {
    /// A scope name shadows an existing member of the entity type
    NameCollision {
        entity: String,
        name: String,
        existing: MemberKind,
    },
    /// A bare callable was passed where a parameterized accessor is expected
    DeprecatedUsage {
        entity: String,
        name: String,
        detail: String,
    },
}

/// What kind of member a new scope definition is about to replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    BuiltIn,
    Custom,
    Scope,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::BuiltIn => write!(f, "method"),
            MemberKind::Custom => write!(f, "custom method"),
            MemberKind::Scope => write!(f, "scope"),
        }
    }
}

impl ScopeWarning {
    pub fn entity(&self) -> &str {
        match self {
            ScopeWarning::NameCollision { entity, .. } => entity,
            ScopeWarning::DeprecatedUsage { entity, .. } => entity,
        }
    }

    pub fn scope_name(&self) -> &str {
        match self {
            ScopeWarning::NameCollision { name, .. } => name,
            ScopeWarning::DeprecatedUsage { name, .. } => name,
        }
    }
}

impl fmt::Display for ScopeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeWarning::NameCollision {
                entity,
                name,
                existing,
            } => write!(
                f,
                "Creating scope :{name}. Overwriting existing {existing} {entity}.{name}."
            ),
            ScopeWarning::DeprecatedUsage {
                entity,
                name,
                detail,
            } => write!(f, "DEPRECATION WARNING: scope {entity}.{name}: {detail}"),
        }
    }
}
