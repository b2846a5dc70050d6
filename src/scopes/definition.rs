use super::{Arity, Criteria, ExtensionModule};
use crate::error::{ScopeError, ScopeResult};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Longest accepted scope name
pub const MAX_SCOPE_NAME_LEN: usize = 64;

/// A validated, case-sensitive scope identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeName(String);

impl ScopeName {
    /// Trim surrounding whitespace and check identifier form
    pub fn parse(raw: &str) -> ScopeResult<Self> {
        let name = raw.trim();

        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return Err(ScopeError::invalid_name(raw, "name must not be empty"));
        };

        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(ScopeError::invalid_name(
                raw,
                "name must start with a letter or underscore",
            ));
        }
        if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Err(ScopeError::invalid_name(
                raw,
                format!("'{bad}' is not allowed in an identifier"),
            ));
        }
        if name.len() > MAX_SCOPE_NAME_LEN {
            return Err(ScopeError::invalid_name(
                raw,
                format!("name exceeds {MAX_SCOPE_NAME_LEN} characters"),
            ));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ScopeName {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ScopeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ScopeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One named scope: its criteria source and optional extension
#[derive(Debug, Clone)]
pub struct ScopeDefinition {
    name: ScopeName,
    criteria: Criteria,
    extension: Option<Arc<ExtensionModule>>,
}

impl ScopeDefinition {
    pub fn new(name: ScopeName, criteria: Criteria) -> Self {
        Self {
            name,
            criteria,
            extension: None,
        }
    }

    pub fn with_extension(mut self, extension: ExtensionModule) -> Self {
        self.extension = Some(Arc::new(extension));
        self
    }

    pub fn name(&self) -> &ScopeName {
        &self.name
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn extension(&self) -> Option<&Arc<ExtensionModule>> {
        self.extension.as_ref()
    }

    pub fn arity(&self) -> Arity {
        self.criteria.arity()
    }
}
