//! # Entity Types
//!
//! An [`EntityType`] is the owner of a scope registry: one persistent type (its name and
//! table), the scopes declared on it, its default scope, and the member names those scopes
//! may shadow. All scope access goes through by-name dispatch on the entity type.

use super::{
    Criteria, ExtensionModule, ScopeArgs, ScopeContext, ScopeInvoker, ScopeRegistry,
};
use crate::config::ScopesConfig;
use crate::error::{MemberKind, ScopeError, ScopeResult, ScopeWarning};
use crate::logging::log_scope_operation;
use crate::query_builder::{FinderOptions, Relation};
use parking_lot::RwLock;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Members every entity type answers to before any scope is defined
pub const BUILT_IN_MEMBERS: &[&str] = &[
    "all",
    "first",
    "last",
    "count",
    "find",
    "where",
    "joins",
    "order",
    "limit",
    "offset",
    "select",
    "group",
    "having",
    "scoped",
    "unscoped",
    "with_scope",
    "scopes",
    "default_scope",
    "relation",
];

pub struct EntityType {
    name: String,
    table: String,
    registry: ScopeRegistry,
    default_relation: RwLock<Relation>,
    config: Arc<ScopesConfig>,
}

impl EntityType {
    /// Entity type using the process-wide configuration
    pub fn new(name: &str, table: &str) -> Self {
        Self::with_config(name, table, ScopesConfig::global())
    }

    pub fn with_config(name: &str, table: &str, config: Arc<ScopesConfig>) -> Self {
        let registry = ScopeRegistry::new(name, Arc::clone(&config));
        for member in BUILT_IN_MEMBERS {
            registry.declare_member(member, MemberKind::BuiltIn);
        }

        Self {
            name: name.to_string(),
            table: table.to_string(),
            registry,
            default_relation: RwLock::new(Relation::new(table).default_scoped()),
            config,
        }
    }

    /// Declare a custom member (e.g. a hand-written finder) that scopes may shadow
    pub fn with_member(self, name: &str) -> Self {
        self.registry.declare_member(name, MemberKind::Custom);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn registry(&self) -> &ScopeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ScopesConfig {
        &self.config
    }

    // ========================================================================
    // DEFINITION
    // ========================================================================

    /// Define (or redefine) a named scope.
    ///
    /// Shadowing an existing member records a warning and proceeds.
    pub fn define_scope(&self, name: &str, criteria: impl Into<Criteria>) -> ScopeResult<()> {
        self.registry.define(name, criteria.into(), None)
    }

    /// Define a scope whose relations carry `extension`'s members
    pub fn define_scope_with_extension(
        &self,
        name: &str,
        criteria: impl Into<Criteria>,
        extension: ExtensionModule,
    ) -> ScopeResult<()> {
        self.registry.define(name, criteria.into(), Some(extension))
    }

    /// Set the criteria every fresh default relation starts from.
    ///
    /// The criteria are evaluated once, here. Calling again replaces the previous default.
    pub fn default_scope(&self, criteria: impl Into<Criteria>) -> ScopeResult<()> {
        let criteria = criteria.into();
        let value = criteria.resolve(self, "default_scope", &ScopeArgs::none())?;
        let relation = value.apply_to(&Relation::new(&self.table).default_scoped())?;

        debug!(entity = %self.name, sql = %relation.to_sql(), "Set default scope");
        log_scope_operation("default_scope", &self.name, None, "ok", Some(criteria.kind()));

        *self.default_relation.write() = relation;
        Ok(())
    }

    // ========================================================================
    // INVOCATION
    // ========================================================================

    /// The accessor for scope `name`
    pub fn invoker(&self, name: &str) -> ScopeResult<ScopeInvoker<'_>> {
        self.registry
            .lookup(name)
            .map(|definition| ScopeInvoker::new(self, definition))
            .ok_or_else(|| ScopeError::UndefinedScope {
                entity: self.name.clone(),
                scope: name.to_string(),
            })
    }

    /// Invoke scope `name` against the ambient baseline
    pub fn scope(&self, name: &str, args: impl Into<ScopeArgs>) -> ScopeResult<Relation> {
        self.invoker(name)?.invoke(args)
    }

    /// Invoke scope `name` with `relation` as the baseline, i.e. `relation.name(args)`
    pub fn chain(
        &self,
        relation: &Relation,
        name: &str,
        args: impl Into<ScopeArgs>,
    ) -> ScopeResult<Relation> {
        let invoker = self.invoker(name)?;
        ScopeContext::with(&self.name, relation.clone(), || invoker.invoke(args))
    }

    // ========================================================================
    // RELATIONS
    // ========================================================================

    /// The active scope, else a fresh default relation. Always an independent copy.
    pub fn scoped(&self) -> Relation {
        ScopeContext::current(&self.name).unwrap_or_else(|| self.default_relation())
    }

    /// `scoped()` refined by a legacy options mapping
    pub fn scoped_with(&self, options: &FinderOptions) -> ScopeResult<Relation> {
        self.scoped().apply_finder_options(options)
    }

    /// A fresh relation carrying the default scope's criteria
    pub fn default_relation(&self) -> Relation {
        self.default_relation.read().clone()
    }

    /// The bare table relation, ignoring the default scope
    pub fn relation(&self) -> Relation {
        Relation::new(&self.table)
    }

    pub fn current_scope(&self) -> Option<Relation> {
        ScopeContext::current(&self.name)
    }

    // ========================================================================
    // SCOPE BLOCKS
    // ========================================================================

    /// Run `block` with the default scope lifted
    pub fn unscoped<R>(&self, block: impl FnOnce() -> R) -> R {
        ScopeContext::with(&self.name, self.relation(), block)
    }

    /// Run `block` with `relation` merged onto the current scope
    pub fn with_scope<R>(&self, relation: &Relation, block: impl FnOnce() -> R) -> R {
        ScopeContext::with(&self.name, self.scoped().merge(relation), block)
    }

    /// Run `block` with exactly `relation` as the current scope
    pub fn with_exclusive_scope<R>(&self, relation: &Relation, block: impl FnOnce() -> R) -> R {
        ScopeContext::with(&self.name, relation.clone(), block)
    }

    /// Async form of [`EntityType::with_scope`], isolated to the awaiting task
    pub async fn with_scope_async<F>(&self, relation: &Relation, future: F) -> F::Output
    where
        F: Future,
    {
        let merged = self.scoped().merge(relation);
        ScopeContext::with_async(&self.name, merged, future).await
    }

    // ========================================================================
    // INTROSPECTION
    // ========================================================================

    pub fn scope_names(&self) -> Vec<String> {
        self.registry.names()
    }

    pub fn has_scope(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Whether `name` is a scope, built-in, or declared custom member
    pub fn responds_to(&self, name: &str) -> bool {
        self.registry.member_kind(name).is_some()
    }

    pub fn warnings(&self) -> Vec<ScopeWarning> {
        self.registry.warnings()
    }

    pub fn clear_warnings(&self) {
        self.registry.clear_warnings();
    }
}

impl fmt::Debug for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityType")
            .field("name", &self.name)
            .field("table", &self.table)
            .field("scopes", &self.registry.names())
            .finish_non_exhaustive()
    }
}
