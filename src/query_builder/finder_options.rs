//! # Legacy Finder Options
//!
//! The key/value query form that predates chainable relations:
//!
//! ```json
//! { "conditions": ["status = ? AND age > ?", "active", 21], "order": "created_at DESC", "limit": 10 }
//! ```
//!
//! Recognised keys map onto relation clauses. Any other key is shorthand for an
//! attribute equality condition, so `{"status": "active"}` filters on `status = 'active'`.

use super::{Join, WhereClause};
use crate::error::{ScopeError, ScopeResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `conditions:` accepts raw SQL, a `[sql, binds...]` array, or an attribute map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Conditions {
    Sql(String),
    Array(Vec<Value>),
    Hash(Map<String, Value>),
}

impl Conditions {
    pub fn to_clauses(&self) -> ScopeResult<Vec<WhereClause>> {
        match self {
            Conditions::Sql(sql) => Ok(vec![WhereClause::raw(sql)]),
            Conditions::Hash(attributes) => Ok(WhereClause::from_attributes(attributes)),
            Conditions::Array(parts) => match parts.split_first() {
                Some((Value::String(sql), binds)) => Ok(vec![WhereClause::sanitized(sql, binds)?]),
                Some(_) => Err(ScopeError::invalid_finder_option(
                    "conditions",
                    "first array element must be an SQL string",
                )),
                None => Ok(Vec::new()),
            },
        }
    }
}

/// A single string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    One(String),
    Many(Vec<String>),
}

impl StringList {
    pub fn values(&self) -> Vec<String> {
        match self {
            StringList::One(value) if value.trim().is_empty() => Vec::new(),
            StringList::One(value) => vec![value.trim().to_string()],
            StringList::Many(values) => values.clone(),
        }
    }
}

/// Legacy options mapping applied through `Relation::apply_finder_options`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinderOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Conditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joins: Option<StringList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<StringList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<StringList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub having: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<StringList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readonly: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<StringList>,
    /// Unrecognised keys: attribute equality shorthand
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl FinderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON mapping, e.g. `json!({"status": "active", "limit": 5})`
    pub fn from_value(value: Value) -> ScopeResult<Self> {
        if !value.is_object() {
            return Err(ScopeError::invalid_finder_option(
                "<root>",
                format!("expected a key/value mapping, got {value}"),
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| ScopeError::invalid_finder_option("<mapping>", e.to_string()))
    }

    pub fn conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = Some(conditions);
        self
    }

    pub fn conditions_sql(self, sql: &str) -> Self {
        self.conditions(Conditions::Sql(sql.to_string()))
    }

    pub fn attribute(mut self, field: &str, value: Value) -> Self {
        self.attributes.insert(field.to_string(), value);
        self
    }

    pub fn joins(mut self, join_sql: &str) -> Self {
        self.joins = Some(StringList::One(join_sql.to_string()));
        self
    }

    pub fn order(mut self, order: &str) -> Self {
        self.order = Some(StringList::One(order.to_string()));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Filters contributed by `conditions:` followed by attribute shorthand
    pub fn where_clauses(&self) -> ScopeResult<Vec<WhereClause>> {
        let mut clauses = match &self.conditions {
            Some(conditions) => conditions.to_clauses()?,
            None => Vec::new(),
        };
        clauses.extend(WhereClause::from_attributes(&self.attributes));
        Ok(clauses)
    }

    /// String joins are verbatim SQL, matching the legacy behaviour
    pub fn join_clauses(&self) -> Vec<Join> {
        match &self.joins {
            Some(StringList::One(sql)) => vec![Join::raw(sql)],
            Some(StringList::Many(fragments)) => fragments.iter().map(|f| Join::raw(f)).collect(),
            None => Vec::new(),
        }
    }
}
