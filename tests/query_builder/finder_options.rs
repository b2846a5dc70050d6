use named_scopes::query_builder::{Conditions, FinderOptions, Relation, StringList};
use named_scopes::ScopeError;
use serde_json::json;

#[test]
fn test_full_options_mapping() {
    let options = FinderOptions::from_value(json!({
        "conditions": ["status = ? AND age > ?", "active", 21],
        "joins": "INNER JOIN owners ON owners.id = cars.owner_id",
        "order": "created_at DESC",
        "limit": 10,
        "offset": 20
    }))
    .expect("valid mapping");

    let sql = Relation::new("cars")
        .apply_finder_options(&options)
        .expect("options apply")
        .to_sql();
    assert_eq!(
        sql,
        "SELECT * FROM cars INNER JOIN owners ON owners.id = cars.owner_id \
         WHERE status = 'active' AND age > 21 ORDER BY created_at DESC LIMIT 10 OFFSET 20"
    );
}

#[test]
fn test_unrecognised_keys_are_equality_conditions() {
    let options = FinderOptions::from_value(json!({"status": "active", "deleted_at": null}))
        .expect("valid mapping");
    let mut filters = Relation::new("cars")
        .apply_finder_options(&options)
        .unwrap()
        .where_sql();
    filters.sort();
    assert_eq!(filters, vec!["deleted_at IS NULL", "status = 'active'"]);
}

#[test]
fn test_hash_conditions() {
    let options = FinderOptions::new().conditions(Conditions::Hash(
        json!({"color": "red", "doors": 4})
            .as_object()
            .cloned()
            .unwrap_or_default(),
    ));
    let mut filters = Relation::new("cars")
        .apply_finder_options(&options)
        .unwrap()
        .where_sql();
    filters.sort();
    assert_eq!(filters, vec!["color = 'red'", "doors = 4"]);
}

#[test]
fn test_select_group_having_and_flags() {
    let options = FinderOptions::from_value(json!({
        "select": "color, COUNT(*)",
        "group": "color",
        "having": "COUNT(*) > 1",
        "readonly": true,
        "lock": true,
        "include": ["owner", "dealer"]
    }))
    .unwrap();

    let relation = Relation::new("cars").apply_finder_options(&options).unwrap();
    assert_eq!(
        relation.to_sql(),
        "SELECT color, COUNT(*) FROM cars GROUP BY color HAVING COUNT(*) > 1 FOR UPDATE"
    );
    assert!(relation.is_readonly());
    assert_eq!(relation.includes_values(), ["owner", "dealer"]);
}

#[test]
fn test_string_list_keeps_fragments_whole() {
    let list = StringList::One(" COALESCE(a, b) DESC ".to_string());
    assert_eq!(list.values(), vec!["COALESCE(a, b) DESC"]);
    assert!(StringList::One("  ".to_string()).values().is_empty());
}

#[test]
fn test_non_mapping_is_rejected() {
    let err = FinderOptions::from_value(json!(["status = 'active'"])).unwrap_err();
    assert!(matches!(err, ScopeError::InvalidFinderOption { ref option, .. } if option == "<root>"));
}

#[test]
fn test_mistyped_option_is_rejected() {
    let err = FinderOptions::from_value(json!({"limit": "ten"})).unwrap_err();
    assert!(matches!(err, ScopeError::InvalidFinderOption { .. }));
}

#[test]
fn test_bind_mismatch_surfaces_on_apply() {
    let options = FinderOptions::from_value(json!({"conditions": ["a = ? AND b = ?", 1]})).unwrap();
    assert!(Relation::new("cars").apply_finder_options(&options).is_err());
}

#[test]
fn test_empty_options_leave_relation_unchanged() {
    let relation = Relation::new("cars").where_eq("color", json!("red"));
    let options = FinderOptions::new();
    assert!(options.is_empty());
    assert_eq!(relation.apply_finder_options(&options).unwrap(), relation);
}
