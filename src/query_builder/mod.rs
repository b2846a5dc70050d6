//! # Query Builder System
//!
//! The relation layer the named scopes compose over.
//!
//! ## Key Components
//!
//! - [`relation`] - [`Relation`], an immutable-by-convention query description with merge
//! - [`conditions`] - WHERE clause building
//! - [`joins`] - JOIN clause management (INNER, LEFT, CROSS, raw fragments)
//! - [`pagination`] - LIMIT/OFFSET with override-on-merge semantics
//! - [`finder_options`] - the legacy key/value query form
//!
//! ## Example Usage
//!
//! ```rust
//! use named_scopes::query_builder::{FinderOptions, Relation};
//! use serde_json::json;
//!
//! let active = Relation::new("tasks").where_eq("status", json!("active"));
//! let recent = Relation::new("tasks").order_desc("created_at").limit(10);
//!
//! let sql = active.merge(&recent).to_sql();
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM tasks WHERE status = 'active' ORDER BY created_at DESC LIMIT 10"
//! );
//!
//! let options = FinderOptions::from_value(json!({"priority": 1, "limit": 5})).unwrap();
//! let legacy = active.apply_finder_options(&options).unwrap();
//! assert_eq!(legacy.limit_value(), Some(5));
//! ```

pub mod conditions;
pub mod finder_options;
pub mod joins;
pub mod pagination;
pub mod relation;

pub use conditions::{Condition, LogicalOperator, WhereClause};
pub use finder_options::{Conditions, FinderOptions, StringList};
pub use joins::{Join, JoinType};
pub use pagination::Pagination;
pub use relation::Relation;
