use crate::common::{car_entity, entity};
use named_scopes::query_builder::Relation;
use named_scopes::scopes::Criteria;
use named_scopes::{MemberKind, ScopeError, ScopeWarning};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

#[test]
fn test_define_registers_scope() {
    let car = entity("DefineCar", "cars");
    assert_ok!(car.define_scope("red", Relation::new("cars").where_eq("color", json!("red"))));
    assert!(car.has_scope("red"));
    assert!(!car.has_scope("Red"));
    assert!(car.warnings().is_empty());
}

#[test]
fn test_name_is_trimmed() {
    let car = entity("TrimCar", "cars");
    assert_ok!(car.define_scope("  recent\n", Relation::new("cars")));
    assert_eq!(car.scope_names(), vec!["recent"]);
}

#[test]
fn test_invalid_names_fail_without_side_effects() {
    let car = entity("InvalidNameCar", "cars");
    for name in ["", "  ", "2fast", "red-ish", "no spaces"] {
        let err = assert_err!(car.define_scope(name, Relation::new("cars")));
        assert!(
            matches!(err, ScopeError::InvalidName { .. }),
            "{name:?} produced {err:?}"
        );
    }
    assert!(car.scope_names().is_empty());
    assert!(car.warnings().is_empty());
}

#[test]
fn test_shadowing_builtin_warns_and_proceeds() {
    let car = entity("BuiltinCar", "cars");
    assert_ok!(car.define_scope("first", Relation::new("cars").order_asc("id").limit(1)));

    let warnings = car.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].to_string(),
        "Creating scope :first. Overwriting existing method BuiltinCar.first."
    );
    assert_eq!(
        car.scope("first", ()).unwrap().to_sql(),
        "SELECT * FROM cars ORDER BY id ASC LIMIT 1"
    );
}

#[test]
fn test_shadowing_custom_member_names_the_member_kind() {
    let car = entity("CustomCar", "cars").with_member("find_by_vin");
    assert_ok!(car.define_scope("find_by_vin", Relation::new("cars")));
    assert_eq!(
        car.warnings(),
        vec![ScopeWarning::NameCollision {
            entity: "CustomCar".to_string(),
            name: "find_by_vin".to_string(),
            existing: MemberKind::Custom,
        }]
    );
}

#[test]
fn test_redefinition_replaces_criteria() {
    let car = car_entity("RedefineCar");
    assert_ok!(car.define_scope(
        "red",
        Relation::new("cars").where_eq("color", json!("scarlet"))
    ));

    let red = car.scope("red", ()).unwrap();
    assert_eq!(red.where_sql(), vec!["color = 'scarlet'"]);
    assert!(!red.responds_to("repaint"));

    let warnings = car.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(matches!(
        warnings[0],
        ScopeWarning::NameCollision {
            existing: MemberKind::Scope,
            ..
        }
    ));
}

#[test]
fn test_bare_callable_is_deprecated_but_works() {
    let car = entity("CallableCar", "cars");
    assert_ok!(car.define_scope(
        "legacy",
        Criteria::callable(|| Relation::new("cars").where_eq("legacy", json!(true)))
    ));

    let warnings = car.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(matches!(warnings[0], ScopeWarning::DeprecatedUsage { .. }));
    assert!(warnings[0].to_string().starts_with("DEPRECATION WARNING: scope CallableCar.legacy"));

    assert_eq!(
        car.scope("legacy", ()).unwrap().where_sql(),
        vec!["legacy = true"]
    );
}

#[test]
fn test_scope_names_are_sorted() {
    let car = car_entity("NamesCar");
    assert_eq!(
        car.scope_names(),
        vec![
            "available",
            "blue",
            "colored",
            "faster_than",
            "made_between",
            "red",
            "with_tags"
        ]
    );
}
