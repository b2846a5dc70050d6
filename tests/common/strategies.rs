use named_scopes::query_builder::Relation;
use proptest::prelude::*;
use serde_json::{json, Value};

/// Strategy for generating valid scope names
pub fn scope_name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,63}"
}

/// Strategy for generating names that can never be identifiers
pub fn invalid_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9][a-zA-Z0-9_]{0,10}",
        "[a-z]{1,5}[-. /][a-z]{1,5}",
        Just(String::new()),
        "[ \t]{1,4}",
    ]
}

/// Strategy for generating column names
pub fn field_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,11}"
}

/// Strategy for generating scalar filter values
pub fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i32>().prop_map(|n| json!(n)),
        any::<bool>().prop_map(|b| json!(b)),
        "[a-zA-Z0-9 ']{0,12}".prop_map(|s| json!(s)),
    ]
}

/// Strategy for generating relations with equality filters, ordering, and a limit
pub fn relation_strategy() -> impl Strategy<Value = Relation> {
    (
        prop::collection::vec((field_strategy(), scalar_strategy()), 0..4),
        prop::option::of(field_strategy()),
        prop::option::of(1u32..500),
    )
        .prop_map(|(filters, order, limit)| {
            let mut relation = Relation::new("widgets");
            for (field, value) in filters {
                relation = relation.where_eq(&field, value);
            }
            if let Some(field) = order {
                relation = relation.order_asc(&field);
            }
            if let Some(limit) = limit {
                relation = relation.limit(limit);
            }
            relation
        })
}
