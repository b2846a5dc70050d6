//! Query Builder Tests Module
//!
//! Relation construction, clause rendering, merge rules and finder options translation.

pub mod conditions;
pub mod finder_options;
pub mod joins;
pub mod relation;
