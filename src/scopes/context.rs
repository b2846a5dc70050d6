//! # Scope Context
//!
//! Per-execution-context stacks of active default scopes, keyed by entity type name.
//!
//! Synchronous code sees a thread-local stack. Futures run through
//! [`ScopeContext::with_async`] see a tokio task-local stack instead, seeded from the
//! caller's stacks, so concurrent tasks sharing a worker thread never observe each
//! other's scopes.
//!
//! Entering a scope returns nothing to the caller: the push and its matching pop are tied
//! to a private guard whose `Drop` truncates the stack back to the depth it had before the
//! push. That runs on normal return, on early return through `?`, and while unwinding
//! from a panic.

use crate::query_builder::Relation;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use tracing::debug;

type ScopeStacks = HashMap<String, Vec<Relation>>;

thread_local! {
    static THREAD_SCOPES: RefCell<ScopeStacks> = RefCell::new(HashMap::new());
}

tokio::task_local! {
    static TASK_SCOPES: RefCell<ScopeStacks>;
}

/// Access the stacks of the current execution context
fn with_stacks<R>(f: impl FnOnce(&mut ScopeStacks) -> R) -> R {
    if ScopeContext::in_task_context() {
        TASK_SCOPES.with(|stacks| f(&mut stacks.borrow_mut()))
    } else {
        THREAD_SCOPES.with(|stacks| f(&mut stacks.borrow_mut()))
    }
}

struct ScopeGuard {
    entity: String,
    depth: usize,
}

impl ScopeGuard {
    fn push(entity: &str, relation: Relation) -> Self {
        let depth = with_stacks(|stacks| {
            let stack = stacks.entry(entity.to_string()).or_default();
            let depth = stack.len();
            stack.push(relation);
            depth
        });
        debug!(entity = %entity, depth = depth + 1, "Entered scope");
        Self {
            entity: entity.to_string(),
            depth,
        }
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        with_stacks(|stacks| {
            let now_empty = match stacks.get_mut(&self.entity) {
                Some(stack) => {
                    stack.truncate(self.depth);
                    stack.is_empty()
                }
                None => false,
            };
            if now_empty {
                stacks.remove(&self.entity);
            }
        });
        debug!(entity = %self.entity, depth = self.depth, "Exited scope");
    }
}

/// Entry points for reading and entering the active default scope of an entity type
pub struct ScopeContext;

impl ScopeContext {
    /// A clone of the innermost active relation for `entity`, if any
    pub fn current(entity: &str) -> Option<Relation> {
        with_stacks(|stacks| stacks.get(entity).and_then(|stack| stack.last().cloned()))
    }

    /// Number of nested scopes active for `entity`
    pub fn depth(entity: &str) -> usize {
        with_stacks(|stacks| stacks.get(entity).map_or(0, Vec::len))
    }

    pub fn is_active(entity: &str) -> bool {
        Self::depth(entity) > 0
    }

    /// Whether the caller runs inside [`ScopeContext::with_async`]
    pub fn in_task_context() -> bool {
        TASK_SCOPES.try_with(|_| ()).is_ok()
    }

    /// Run `block` with `relation` as the active scope for `entity`.
    ///
    /// The previous scope (or none) is restored when `block` returns or unwinds.
    pub fn with<R>(entity: &str, relation: Relation, block: impl FnOnce() -> R) -> R {
        let _guard = ScopeGuard::push(entity, relation);
        block()
    }

    /// Run `future` with `relation` as the active scope for `entity`, isolated to this task.
    ///
    /// The future starts from a copy of the caller's stacks; nothing it pushes is visible
    /// outside of it, and the caller's stacks are untouched when it completes.
    pub async fn with_async<F>(entity: &str, relation: Relation, future: F) -> F::Output
    where
        F: Future,
    {
        let mut stacks = with_stacks(|stacks| stacks.clone());
        stacks
            .entry(entity.to_string())
            .or_default()
            .push(relation);
        debug!(entity = %entity, "Entered task scope");

        TASK_SCOPES.scope(RefCell::new(stacks), future).await
    }
}
