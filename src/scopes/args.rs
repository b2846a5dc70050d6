//! Arguments passed to a scope or extension method at invocation time.

use crate::error::{ScopeError, ScopeResult};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Positional invocation arguments, carried as JSON values and decoded on demand
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeArgs {
    scope: String,
    values: Vec<Value>,
}

impl ScopeArgs {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(values: Vec<Value>) -> Self {
        Self {
            scope: String::new(),
            values,
        }
    }

    /// Label errors with the scope being invoked
    pub(crate) fn for_scope(mut self, scope: &str) -> Self {
        self.scope = scope.to_string();
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Raw value at `index`
    pub fn value(&self, index: usize) -> ScopeResult<&Value> {
        self.values.get(index).ok_or_else(|| ScopeError::InvalidArgument {
            scope: self.scope.clone(),
            index,
            reason: format!("missing (only {} given)", self.values.len()),
        })
    }

    /// Decode the argument at `index` into `T`
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> ScopeResult<T> {
        let value = self.value(index)?;
        serde_json::from_value(value.clone()).map_err(|e| ScopeError::InvalidArgument {
            scope: self.scope.clone(),
            index,
            reason: e.to_string(),
        })
    }

    /// Decode an optional trailing argument, `None` when absent or null
    pub fn get_opt<T: DeserializeOwned>(&self, index: usize) -> ScopeResult<Option<T>> {
        match self.values.get(index) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.get(index).map(Some),
        }
    }

    pub fn str(&self, index: usize) -> ScopeResult<String> {
        self.get(index)
    }

    pub fn timestamp(&self, index: usize) -> ScopeResult<DateTime<Utc>> {
        self.get(index)
    }
}

impl From<Vec<Value>> for ScopeArgs {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl<const N: usize> From<[Value; N]> for ScopeArgs {
    fn from(values: [Value; N]) -> Self {
        Self::new(values.into())
    }
}

impl From<()> for ScopeArgs {
    fn from(_: ()) -> Self {
        Self::none()
    }
}
