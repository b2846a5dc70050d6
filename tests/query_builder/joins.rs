use named_scopes::query_builder::joins::{Join, JoinType};

#[test]
fn test_inner_join() {
    let join = Join::inner("users u", "u.id = posts.user_id");
    assert_eq!(join.to_sql(), "INNER JOIN users u ON u.id = posts.user_id");
}

#[test]
fn test_left_join() {
    let join = Join::left("profiles p", "p.user_id = u.id");
    assert_eq!(join.to_sql(), "LEFT JOIN profiles p ON p.user_id = u.id");
}

#[test]
fn test_cross_join() {
    let join = Join::cross("categories");
    assert_eq!(join.to_sql(), "CROSS JOIN categories");
}

#[test]
fn test_raw_join_is_trimmed_and_verbatim() {
    let join = Join::raw("  INNER JOIN owners ON owners.id = cars.owner_id ");
    assert_eq!(join.to_sql(), "INNER JOIN owners ON owners.id = cars.owner_id");
}

#[test]
fn test_join_type_keywords() {
    assert_eq!(JoinType::Inner.to_sql(), "INNER JOIN");
    assert_eq!(JoinType::Left.to_sql(), "LEFT JOIN");
    assert_eq!(JoinType::Cross.to_sql(), "CROSS JOIN");
}
