use named_scopes::query_builder::conditions::*;
use named_scopes::ScopeError;
use serde_json::json;

#[test]
fn test_simple_condition() {
    let condition = Condition::Simple {
        field: "name".to_string(),
        operator: "=".to_string(),
        value: serde_json::Value::String("test".to_string()),
    };
    assert_eq!(condition.to_sql(), "name = 'test'");
}

#[test]
fn test_in_condition() {
    let condition = Condition::In {
        field: "id".to_string(),
        values: vec![json!(1), json!(2), json!(3)],
    };
    assert_eq!(condition.to_sql(), "id IN (1, 2, 3)");
}

#[test]
fn test_not_in_condition() {
    let clause = WhereClause::not_in_condition("status", vec![json!("sold"), json!("scrapped")]);
    assert_eq!(clause.to_sql(), "status NOT IN ('sold', 'scrapped')");
}

#[test]
fn test_exists_condition() {
    let condition = Condition::Exists {
        subquery: "SELECT 1 FROM related_table WHERE id = outer.id".to_string(),
    };
    assert_eq!(
        condition.to_sql(),
        "EXISTS (SELECT 1 FROM related_table WHERE id = outer.id)"
    );
}

#[test]
fn test_eq_picks_operator_from_value() {
    assert_eq!(WhereClause::eq("color", json!("red")).to_sql(), "color = 'red'");
    assert_eq!(WhereClause::eq("color", json!(null)).to_sql(), "color IS NULL");
    assert_eq!(
        WhereClause::eq("color", json!(["red", "blue"])).to_sql(),
        "color IN ('red', 'blue')"
    );
}

#[test]
fn test_string_values_are_quoted() {
    let clause = WhereClause::eq("owner", json!("O'Brien"));
    assert_eq!(clause.to_sql(), "owner = 'O''Brien'");
}

#[test]
fn test_sanitized_replaces_placeholders_in_order() {
    let clause = WhereClause::sanitized("status = ? AND age > ?", &[json!("active"), json!(21)])
        .expect("bind counts match");
    assert_eq!(clause.to_sql(), "status = 'active' AND age > 21");

    let clause = WhereClause::sanitized("id IN (?)", &[json!([1, 2])]).expect("one bind");
    assert_eq!(clause.to_sql(), "id IN (1, 2)");
}

#[test]
fn test_sanitized_leaves_quoted_question_marks_alone() {
    let clause = WhereClause::sanitized("name = '?' AND id = ?", &[json!(4)])
        .expect("quoted ? is not a placeholder");
    assert_eq!(clause.to_sql(), "name = '?' AND id = 4");

    let clause = WhereClause::sanitized("note = 'it''s ?' AND owner = ?", &[json!("Ann")])
        .expect("escaped quote keeps the literal open");
    assert_eq!(clause.to_sql(), "note = 'it''s ?' AND owner = 'Ann'");
}

#[test]
fn test_sanitized_rejects_bind_count_mismatch() {
    let err = WhereClause::sanitized("status = ? AND age > ?", &[json!("active")]).unwrap_err();
    assert!(matches!(err, ScopeError::InvalidFinderOption { ref option, .. } if option == "conditions"));
}

#[test]
fn test_or_clause_is_parenthesized() {
    let clause = WhereClause::or(vec![
        Condition::IsNull {
            field: "deleted_at".to_string(),
        },
        Condition::Raw {
            sql: "deleted_at > NOW()".to_string(),
        },
    ]);
    assert_eq!(clause.to_sql(), "(deleted_at IS NULL OR deleted_at > NOW())");
    assert_eq!(clause.equality_field(), None);
}
