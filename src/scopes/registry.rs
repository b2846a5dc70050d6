//! # Scope Registry
//!
//! Per-entity-type mapping from scope name to definition.
//!
//! Defining a scope whose name is already taken, by a built-in member, a declared custom
//! member, or an earlier scope, logs a warning and replaces the member: the last
//! definition wins. Re-opening an entity type to redefine a scope is a supported pattern,
//! so a collision is never an error.

use super::{Criteria, ExtensionModule, ScopeDefinition, ScopeName};
use crate::config::ScopesConfig;
use crate::error::{MemberKind, ScopeResult, ScopeWarning};
use crate::logging::log_scope_operation;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ScopeRegistry {
    entity: String,
    scopes: DashMap<ScopeName, Arc<ScopeDefinition>>,
    members: DashMap<String, MemberKind>,
    warnings: Mutex<VecDeque<ScopeWarning>>,
    config: Arc<ScopesConfig>,
}

impl ScopeRegistry {
    pub fn new(entity: &str, config: Arc<ScopesConfig>) -> Self {
        Self {
            entity: entity.to_string(),
            scopes: DashMap::new(),
            members: DashMap::new(),
            warnings: Mutex::new(VecDeque::new()),
            config,
        }
    }

    /// Record a non-scope member name that scope definitions may shadow
    pub fn declare_member(&self, name: &str, kind: MemberKind) {
        self.members.insert(name.to_string(), kind);
    }

    /// What currently answers to `name`, scopes taking precedence
    pub fn member_kind(&self, name: &str) -> Option<MemberKind> {
        if self.scopes.contains_key(name) {
            return Some(MemberKind::Scope);
        }
        self.members.get(name).map(|kind| *kind)
    }

    /// Register (or replace) a scope
    pub fn define(
        &self,
        name: &str,
        criteria: Criteria,
        extension: Option<ExtensionModule>,
    ) -> ScopeResult<()> {
        let name = ScopeName::parse(name)?;

        if let Some(existing) = self.member_kind(name.as_str()) {
            self.warn(ScopeWarning::NameCollision {
                entity: self.entity.clone(),
                name: name.to_string(),
                existing,
            });
        }

        if criteria.is_deprecated() {
            self.warn(ScopeWarning::DeprecatedUsage {
                entity: self.entity.clone(),
                name: name.to_string(),
                detail: "passing a bare callable as scope criteria is deprecated; \
                         use Criteria::lazy or Criteria::parameterized instead"
                    .to_string(),
            });
        }

        let kind = criteria.kind();
        let arity = criteria.arity();
        let mut definition = ScopeDefinition::new(name.clone(), criteria);
        if let Some(extension) = extension {
            definition = definition.with_extension(extension);
        }
        let has_extension = definition.extension().is_some();

        self.scopes.insert(name.clone(), Arc::new(definition));

        debug!(
            entity = %self.entity,
            scope = %name,
            criteria = kind,
            arity = %arity,
            extension = has_extension,
            "Defined scope"
        );
        log_scope_operation("define", &self.entity, Some(name.as_str()), "ok", Some(kind));

        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<ScopeDefinition>> {
        self.scopes.get(name).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scopes.contains_key(name)
    }

    /// Defined scope names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.scopes.iter().map(|e| e.key().to_string()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Recorded warnings, oldest first
    pub fn warnings(&self) -> Vec<ScopeWarning> {
        self.warnings.lock().iter().cloned().collect()
    }

    pub fn clear_warnings(&self) {
        self.warnings.lock().clear();
    }

    fn warn(&self, warning: ScopeWarning) {
        let enabled = match warning {
            ScopeWarning::NameCollision { .. } => self.config.warn_on_name_collision,
            ScopeWarning::DeprecatedUsage { .. } => self.config.warn_on_deprecated_usage,
        };
        if !enabled {
            return;
        }

        warn!(entity = %self.entity, scope = %warning.scope_name(), "{warning}");

        if self.config.record_warnings && self.config.max_recorded_warnings > 0 {
            let mut warnings = self.warnings.lock();
            while warnings.len() >= self.config.max_recorded_warnings {
                warnings.pop_front();
            }
            warnings.push_back(warning);
        }
    }
}

impl std::fmt::Debug for ScopeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeRegistry")
            .field("entity", &self.entity)
            .field("scopes", &self.names())
            .field("warnings", &self.warnings.lock().len())
            .finish()
    }
}
