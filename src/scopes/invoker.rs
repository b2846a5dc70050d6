use super::{EntityType, ScopeArgs, ScopeContext, ScopeDefinition};
use crate::error::ScopeResult;
use crate::logging::log_scope_operation;
use crate::query_builder::Relation;
use std::sync::Arc;
use tracing::debug;

/// The accessor for one named scope of one entity type
#[derive(Debug, Clone)]
pub struct ScopeInvoker<'a> {
    entity: &'a EntityType,
    definition: Arc<ScopeDefinition>,
}

impl<'a> ScopeInvoker<'a> {
    pub(crate) fn new(entity: &'a EntityType, definition: Arc<ScopeDefinition>) -> Self {
        Self { entity, definition }
    }

    pub fn definition(&self) -> &ScopeDefinition {
        &self.definition
    }

    /// Build the scope's relation for `args`.
    ///
    /// Criteria are evaluated on every call. The result is the ambient baseline (active
    /// scope, else the entity's default relation) combined with the criteria, carrying the
    /// scope's extension if it declares one. Nothing is executed.
    pub fn invoke(&self, args: impl Into<ScopeArgs>) -> ScopeResult<Relation> {
        let name = self.definition.name().as_str();
        let args: ScopeArgs = args.into();
        let args = args.for_scope(name);

        let criteria = match self
            .definition
            .criteria()
            .resolve(self.entity, name, &args)
        {
            Ok(criteria) => criteria,
            Err(err) => {
                log_scope_operation(
                    "invoke",
                    self.entity.name(),
                    Some(name),
                    "error",
                    Some(&err.to_string()),
                );
                return Err(err);
            }
        };

        let baseline = self.entity.scoped();
        let mut relation = criteria.apply_to(&baseline)?;

        if let Some(extension) = self.definition.extension() {
            relation = relation.extending(Arc::clone(extension));
        }

        debug!(
            entity = %self.entity.name(),
            scope = %name,
            args = args.len(),
            ambient = ScopeContext::is_active(self.entity.name()),
            "Invoked scope"
        );

        Ok(relation)
    }
}
