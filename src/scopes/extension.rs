//! # Extension Modules
//!
//! Extra members attached to the relation returned by one named scope. The relation
//! holds an `Arc<ExtensionModule>` and dispatches member calls by name, so the members
//! are only visible on relations that were explicitly extended.
//!
//! ```rust
//! use named_scopes::scopes::{ExtensionModule, ExtensionOutput};
//! use serde_json::json;
//!
//! let painter = ExtensionModule::new("painter")
//!     .relation_method("repaint", |relation, args| {
//!         Ok(relation.clone().where_eq("color", json!(args.str(0)?)))
//!     })
//!     .value_method("palette", |_relation, _args| Ok(json!(["red", "blue"])));
//!
//! assert!(painter.has_method("repaint"));
//! assert_eq!(painter.method_names(), vec!["palette", "repaint"]);
//! ```

use super::ScopeArgs;
use crate::error::ScopeResult;
use crate::query_builder::Relation;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// What an extension member produced
#[derive(Debug, Clone)]
pub enum ExtensionOutput {
    Relation(Relation),
    Value(Value),
}

impl ExtensionOutput {
    pub fn into_relation(self) -> Option<Relation> {
        match self {
            ExtensionOutput::Relation(relation) => Some(relation),
            ExtensionOutput::Value(_) => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            ExtensionOutput::Value(value) => Some(value),
            ExtensionOutput::Relation(_) => None,
        }
    }
}

pub type ExtensionMethod =
    Arc<dyn Fn(&Relation, &ScopeArgs) -> ScopeResult<ExtensionOutput> + Send + Sync>;

/// A named bundle of members attached to relations by a scope definition
#[derive(Clone)]
pub struct ExtensionModule {
    name: String,
    methods: BTreeMap<String, ExtensionMethod>,
}

impl ExtensionModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: BTreeMap::new(),
        }
    }

    /// Add a member returning an arbitrary output
    pub fn method<F>(mut self, name: &str, method: F) -> Self
    where
        F: Fn(&Relation, &ScopeArgs) -> ScopeResult<ExtensionOutput> + Send + Sync + 'static,
    {
        self.methods.insert(name.to_string(), Arc::new(method));
        self
    }

    /// Add a member that refines the relation it is called on
    pub fn relation_method<F>(self, name: &str, method: F) -> Self
    where
        F: Fn(&Relation, &ScopeArgs) -> ScopeResult<Relation> + Send + Sync + 'static,
    {
        self.method(name, move |relation, args| {
            method(relation, args).map(ExtensionOutput::Relation)
        })
    }

    /// Add a member that computes a value from the relation
    pub fn value_method<F>(self, name: &str, method: F) -> Self
    where
        F: Fn(&Relation, &ScopeArgs) -> ScopeResult<Value> + Send + Sync + 'static,
    {
        self.method(name, move |relation, args| {
            method(relation, args).map(ExtensionOutput::Value)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn method_names(&self) -> Vec<&str> {
        self.methods.keys().map(String::as_str).collect()
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<&ExtensionMethod> {
        self.methods.get(name)
    }
}

impl fmt::Debug for ExtensionModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionModule")
            .field("name", &self.name)
            .field("methods", &self.method_names())
            .finish()
    }
}
