//! Entity types shared across integration tests

use named_scopes::query_builder::Relation;
use named_scopes::scopes::{Arity, Criteria, EntityType, ExtensionModule};
use named_scopes::{ScopeError, ScopesConfig};
use serde_json::json;
use std::sync::Arc;

/// An entity type with default configuration, independent of any config file or env
pub fn entity(name: &str, table: &str) -> EntityType {
    EntityType::with_config(name, table, Arc::new(ScopesConfig::default()))
}

/// Extension attached to the `red` scope of [`car_entity`]
pub fn paint_shop() -> ExtensionModule {
    ExtensionModule::new("paint_shop")
        .relation_method("repaint", |relation, args| {
            Ok(relation.clone().where_eq("color", json!(args.str(0)?)))
        })
        .value_method("shade", |_relation, _args| Ok(json!("crimson")))
}

/// `Car` over `cars` with a handful of scopes:
///
/// - `red` (static, with the paint_shop extension)
/// - `blue` (static)
/// - `colored(color)`
/// - `faster_than(speed)`
/// - `made_between(from, to?)`
/// - `with_tags(tag, ...)`
/// - `available` (legacy options)
pub fn car_entity(name: &str) -> EntityType {
    let car = entity(name, "cars");

    car.define_scope_with_extension(
        "red",
        Relation::new("cars").where_eq("color", json!("red")),
        paint_shop(),
    )
    .expect("red");
    car.define_scope("blue", Relation::new("cars").where_eq("color", json!("blue")))
        .expect("blue");
    car.define_scope(
        "colored",
        Criteria::parameterized(Arity::Exact(1), |entity, args| {
            Ok(entity.relation().where_eq("color", json!(args.str(0)?)))
        }),
    )
    .expect("colored");
    car.define_scope(
        "faster_than",
        Criteria::parameterized(Arity::Exact(1), |entity, args| {
            let speed: u32 = args.get(0)?;
            Ok(entity
                .relation()
                .where_raw(&format!("top_speed > {speed}")))
        }),
    )
    .expect("faster_than");
    car.define_scope(
        "made_between",
        Criteria::parameterized(Arity::Range { min: 1, max: 2 }, |entity, args| {
            let from: i64 = args.get(0)?;
            let relation = entity.relation().where_raw(&format!("year >= {from}"));
            Ok(match args.get_opt::<i64>(1)? {
                Some(to) => relation.where_raw(&format!("year <= {to}")),
                None => relation,
            })
        }),
    )
    .expect("made_between");
    car.define_scope(
        "with_tags",
        Criteria::parameterized(Arity::AtLeast(1), |entity, args| {
            if args.values().iter().any(|tag| !tag.is_string()) {
                return Err(ScopeError::InvalidArgument {
                    scope: "with_tags".to_string(),
                    index: 0,
                    reason: "tags must be strings".to_string(),
                });
            }
            Ok(entity.relation().where_in("tag", args.values().to_vec()))
        }),
    )
    .expect("with_tags");
    car.define_scope(
        "available",
        Criteria::options(json!({"status": "available", "order": "price ASC"})).expect("mapping"),
    )
    .expect("available");

    car
}
