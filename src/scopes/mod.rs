//! # Named Scopes
//!
//! Reusable, chainable query fragments attached to an entity type.
//!
//! ## Components
//!
//! - [`ScopeRegistry`]: per-entity-type mapping from scope name to [`ScopeDefinition`]
//! - [`ScopeContext`]: per-thread / per-task stack of active default scopes
//! - [`ScopeInvoker`]: the accessor that builds a scope's relation on each call
//! - [`ExtensionModule`]: extra members attached to the relations one scope returns
//! - [`EntityType`]: owner of all of the above, and the single dispatch entry point
//!
//! ## Usage
//!
//! ```rust
//! use named_scopes::query_builder::Relation;
//! use named_scopes::scopes::{Arity, Criteria, EntityType};
//! use serde_json::json;
//!
//! let car = EntityType::new("Car", "cars");
//! car.define_scope("red", Relation::new("cars").where_eq("color", json!("red")))?;
//! car.define_scope(
//!     "faster_than",
//!     Criteria::parameterized(Arity::Exact(1), |entity, args| {
//!         Ok(entity.relation().where_raw(&format!("top_speed > {}", args.get::<u32>(0)?)))
//!     }),
//! )?;
//!
//! let red = car.scope("red", ())?;
//! let fast_red = car.chain(&red, "faster_than", vec![json!(200)])?;
//! assert_eq!(
//!     fast_red.to_sql(),
//!     "SELECT * FROM cars WHERE color = 'red' AND top_speed > 200"
//! );
//! # Ok::<(), named_scopes::ScopeError>(())
//! ```

pub mod args;
pub mod context;
pub mod criteria;
pub mod definition;
pub mod entity;
pub mod extension;
pub mod invoker;
pub mod registry;

pub use args::ScopeArgs;
pub use context::ScopeContext;
pub use criteria::{Arity, Criteria, CriteriaValue};
pub use definition::{ScopeDefinition, ScopeName, MAX_SCOPE_NAME_LEN};
pub use entity::{EntityType, BUILT_IN_MEMBERS};
pub use extension::{ExtensionMethod, ExtensionModule, ExtensionOutput};
pub use invoker::ScopeInvoker;
pub use registry::ScopeRegistry;
