//! Criteria sources for scope definitions.
//!
//! A scope's criteria is one of a fixed set of forms, dispatched explicitly at
//! invocation time:
//!
//! - [`Criteria::Static`] - a relation fixed at definition time
//! - [`Criteria::Parameterized`] - a function of the invocation arguments, evaluated per call
//! - [`Criteria::LegacyOptions`] - a finder options mapping
//! - [`Criteria::Callable`] - a bare zero-argument closure (deprecated form)

use super::ScopeArgs;
use super::EntityType;
use crate::error::{ScopeError, ScopeResult};
use crate::query_builder::{FinderOptions, Relation};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Number of arguments a scope accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Range { min: usize, max: usize },
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, given: usize) -> bool {
        match *self {
            Arity::Exact(n) => given == n,
            Arity::Range { min, max } => (min..=max).contains(&given),
            Arity::AtLeast(min) => given >= min,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{n}"),
            Arity::Range { min, max } => write!(f, "{min}..{max}"),
            Arity::AtLeast(min) => write!(f, "{min}+"),
        }
    }
}

/// A resolved criteria value, ready to combine with a baseline relation
#[derive(Debug, Clone, PartialEq)]
pub enum CriteriaValue {
    Relation(Relation),
    Options(FinderOptions),
}

impl CriteriaValue {
    /// Merge relations, translate options mappings
    pub fn apply_to(&self, baseline: &Relation) -> ScopeResult<Relation> {
        match self {
            CriteriaValue::Relation(criteria) => Ok(baseline.merge(criteria)),
            CriteriaValue::Options(options) => baseline.apply_finder_options(options),
        }
    }
}

impl From<Relation> for CriteriaValue {
    fn from(relation: Relation) -> Self {
        CriteriaValue::Relation(relation)
    }
}

impl From<FinderOptions> for CriteriaValue {
    fn from(options: FinderOptions) -> Self {
        CriteriaValue::Options(options)
    }
}

pub type CriteriaFn =
    Arc<dyn Fn(&EntityType, &ScopeArgs) -> ScopeResult<CriteriaValue> + Send + Sync>;

pub type BareCallable = Arc<dyn Fn() -> CriteriaValue + Send + Sync>;

#[derive(Clone)]
pub enum Criteria {
    Static(Relation),
    Parameterized { arity: Arity, build: CriteriaFn },
    LegacyOptions(FinderOptions),
    Callable(BareCallable),
}

impl Criteria {
    /// Criteria computed from `arity` arguments on every invocation
    pub fn parameterized<F, C>(arity: Arity, build: F) -> Self
    where
        F: Fn(&EntityType, &ScopeArgs) -> ScopeResult<C> + Send + Sync + 'static,
        C: Into<CriteriaValue>,
    {
        Criteria::Parameterized {
            arity,
            build: Arc::new(
                move |entity: &EntityType, args: &ScopeArgs| -> ScopeResult<CriteriaValue> {
                    build(entity, args).map(Into::into)
                },
            ),
        }
    }

    /// Zero-argument criteria evaluated on every invocation rather than at definition time
    pub fn lazy<F, C>(build: F) -> Self
    where
        F: Fn(&EntityType) -> C + Send + Sync + 'static,
        C: Into<CriteriaValue>,
    {
        Self::parameterized(Arity::Exact(0), move |entity, _args| Ok(build(entity)))
    }

    /// Legacy options mapping, e.g. `json!({"status": "active"})`
    pub fn options(mapping: Value) -> ScopeResult<Self> {
        FinderOptions::from_value(mapping).map(Criteria::LegacyOptions)
    }

    /// A bare callable, accepted for compatibility. Defining a scope with it emits a
    /// deprecation warning; prefer [`Criteria::lazy`] or [`Criteria::parameterized`].
    pub fn callable<F, C>(callable: F) -> Self
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: Into<CriteriaValue>,
    {
        Criteria::Callable(Arc::new(move || -> CriteriaValue { callable().into() }))
    }

    pub fn arity(&self) -> Arity {
        match self {
            Criteria::Parameterized { arity, .. } => *arity,
            _ => Arity::Exact(0),
        }
    }

    pub fn is_deprecated(&self) -> bool {
        matches!(self, Criteria::Callable(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Criteria::Static(_) => "static",
            Criteria::Parameterized { .. } => "parameterized",
            Criteria::LegacyOptions(_) => "legacy_options",
            Criteria::Callable(_) => "callable",
        }
    }

    /// Check arity, then produce the criteria value for this call
    pub(crate) fn resolve(
        &self,
        entity: &EntityType,
        scope: &str,
        args: &ScopeArgs,
    ) -> ScopeResult<CriteriaValue> {
        let arity = self.arity();
        if !arity.accepts(args.len()) {
            return Err(ScopeError::Arity {
                entity: entity.name().to_string(),
                scope: scope.to_string(),
                given: args.len(),
                expected: arity.to_string(),
            });
        }

        match self {
            Criteria::Static(relation) => Ok(CriteriaValue::Relation(relation.clone())),
            Criteria::LegacyOptions(options) => Ok(CriteriaValue::Options(options.clone())),
            Criteria::Parameterized { build, .. } => build(entity, args),
            Criteria::Callable(callable) => Ok(callable()),
        }
    }
}

impl From<Relation> for Criteria {
    fn from(relation: Relation) -> Self {
        Criteria::Static(relation)
    }
}

impl From<FinderOptions> for Criteria {
    fn from(options: FinderOptions) -> Self {
        Criteria::LegacyOptions(options)
    }
}

impl fmt::Debug for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criteria::Static(relation) => f.debug_tuple("Static").field(relation).finish(),
            Criteria::Parameterized { arity, .. } => f
                .debug_struct("Parameterized")
                .field("arity", arity)
                .finish_non_exhaustive(),
            Criteria::LegacyOptions(options) => {
                f.debug_tuple("LegacyOptions").field(options).finish()
            }
            Criteria::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}
