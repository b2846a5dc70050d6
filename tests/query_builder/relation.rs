use chrono::{TimeZone, Utc};
use named_scopes::query_builder::{Join, Relation, WhereClause};
use serde_json::json;

#[test]
fn test_basic_query_building() {
    let sql = Relation::new("tasks")
        .select(&["task_id", "context", "named_task_id"])
        .where_eq("named_task_id", json!(1))
        .order_desc("created_at")
        .limit(10)
        .to_sql();

    assert!(sql.contains("SELECT task_id, context, named_task_id"));
    assert!(sql.contains("FROM tasks"));
    assert!(sql.contains("ORDER BY created_at DESC"));
    assert!(sql.contains("LIMIT 10"));
}

#[test]
fn test_join_query_building() {
    let sql = Relation::new("tasks t")
        .inner_join("named_tasks nt", "t.named_task_id = nt.named_task_id")
        .left_join("task_namespaces tn", "nt.task_namespace_id = tn.task_namespace_id")
        .where_eq("tn.name", json!("default"))
        .to_sql();

    assert!(sql.contains("INNER JOIN named_tasks nt"));
    assert!(sql.contains("LEFT JOIN task_namespaces tn"));
    assert!(sql.ends_with("WHERE tn.name = 'default'"));
}

#[test]
fn test_time_window_filters() {
    let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let relation = Relation::new("tasks").where_after("created_at", since);
    assert_eq!(
        relation.where_sql(),
        vec!["created_at > '2024-01-01T00:00:00+00:00'"]
    );
}

#[test]
fn test_merge_accumulates_filters_and_overrides_limit() {
    let base = Relation::new("cars")
        .where_eq("color", json!("red"))
        .order_asc("name")
        .limit(50);
    let other = Relation::new("cars")
        .where_clause(WhereClause::simple("top_speed", ">", json!(200)))
        .order_desc("top_speed")
        .limit(5);

    let merged = base.merge(&other);
    assert_eq!(
        merged.to_sql(),
        "SELECT * FROM cars WHERE color = 'red' AND top_speed > 200 \
         ORDER BY name ASC, top_speed DESC LIMIT 5"
    );
}

#[test]
fn test_merge_unions_joins() {
    let owners = Join::inner("owners", "owners.id = cars.owner_id");
    let base = Relation::new("cars").join(owners.clone());
    let other = Relation::new("cars")
        .join(owners)
        .left_join("dealers", "dealers.id = cars.dealer_id");

    assert_eq!(base.merge(&other).joins().len(), 2);
}

#[test]
fn test_merge_drops_duplicate_filters() {
    let red = Relation::new("cars").where_raw("color = 'red'");
    assert_eq!(red.merge(&red).where_sql(), vec!["color = 'red'"]);
}

#[test]
fn test_reorder_replaces_ordering() {
    let relation = Relation::new("cars").order_asc("name").reorder("created_at DESC");
    assert_eq!(relation.order_values(), ["created_at DESC"]);
}

#[test]
fn test_builders_return_new_values() {
    let base = Relation::new("cars");
    let refined = base.clone().where_eq("color", json!("red"));
    assert!(base.where_clauses().is_empty());
    assert_eq!(refined.where_clauses().len(), 1);
}

#[test]
fn test_from_override() {
    let relation = Relation::new("cars").merge(&Relation::new("cars").from("cars AS c"));
    assert_eq!(relation.to_sql(), "SELECT * FROM cars AS c");
}
