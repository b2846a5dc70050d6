#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Named Scopes
//!
//! Named, composable query scopes for a data-access layer.
//!
//! ## Overview
//!
//! A scope is a reusable query fragment attached to an entity type under a name. Invoking
//! a scope never runs a query: it returns a [`Relation`], a lazily evaluated query
//! description that merges with other relations, other scopes, and legacy finder options
//! into one statement.
//!
//! ## Module Organization
//!
//! - [`query_builder`] - The `Relation` type, its clause types, merge rules, and finder options
//! - [`scopes`] - Scope definition, registry, invocation, default-scope context, extensions
//! - [`config`] - Configuration loading (defaults, file, environment)
//! - [`error`] - Structured errors and non-fatal warnings
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use named_scopes::{EntityType, FinderOptions, Relation};
//! use serde_json::json;
//!
//! let task = EntityType::new("Task", "tasks");
//! task.default_scope(Relation::new("tasks").where_eq("archived", json!(false)))?;
//! task.define_scope("active", Relation::new("tasks").where_eq("status", json!("active")))?;
//!
//! let active = task.scope("active", ())?;
//! assert_eq!(
//!     active.to_sql(),
//!     "SELECT * FROM tasks WHERE archived = false AND status = 'active'"
//! );
//!
//! // Legacy options mapping through the anonymous entry point
//! let same = task.scoped_with(&FinderOptions::new().attribute("status", json!("active")))?;
//! assert_eq!(same, active);
//! # Ok::<(), named_scopes::ScopeError>(())
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod query_builder;
pub mod scopes;

pub use config::{LogFormat, LoggingConfig, ScopesConfig};
pub use error::{MemberKind, ScopeError, ScopeResult, ScopeWarning};
pub use logging::init_structured_logging;
pub use query_builder::{FinderOptions, Relation, WhereClause};
pub use scopes::{
    Arity, Criteria, EntityType, ExtensionModule, ExtensionOutput, ScopeArgs, ScopeContext,
};
